use chunklife_core::{Coord, GridSnapshot, RunMode};

pub const ALIVE: char = '#';
pub const DEAD: char = '.';

/// Draw a snapshot as text, one row of cells per line.
///
/// Chunk boundaries are marked with a space between columns and a blank line
/// between rows of chunks when `show_chunks` is set.
pub fn render_text(snapshot: &GridSnapshot, show_chunks: bool) -> String {
    let width = snapshot.chunk_width as i32;
    let side = width * snapshot.extent as i32;
    let alive = snapshot.to_global_set();

    let line = side as usize + snapshot.extent as usize + 1;
    let mut out = String::with_capacity(line * side as usize);
    for y in 0..side {
        if show_chunks && y > 0 && y % width == 0 {
            out.push('\n');
        }
        for x in 0..side {
            if show_chunks && x > 0 && x % width == 0 {
                out.push(' ');
            }
            let glyph = if alive.contains(&Coord::new(x, y)) {
                ALIVE
            } else {
                DEAD
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

/// One-line status shown above each frame
pub fn status_line(snapshot: &GridSnapshot, mode: RunMode) -> String {
    let mode = match mode {
        RunMode::Editing => "editing",
        RunMode::Running => "running",
    };
    format!(
        "generation {} | population {} | {}",
        snapshot.generation,
        snapshot.population(),
        mode
    )
}
