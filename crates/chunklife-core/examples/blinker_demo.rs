use chunklife_core::{Coord, Grid, LifeConfig, Pattern};

fn print_grid(grid: &Grid) {
    let alive = grid.snapshot().to_global_set();
    let n = grid.config().cells_per_axis() as i32;
    for y in 0..n {
        let row: String = (0..n)
            .map(|x| if alive.contains(&Coord::new(x, y)) { '#' } else { '.' })
            .collect();
        println!("{}", row);
    }
}

fn main() {
    // 3x3 chunks of 4x4 cells
    let mut grid = Grid::new(LifeConfig::new(20, 4, 3)).expect("valid config");

    // Blinker straddling the chunk boundary at x = 4
    let blinker = Pattern::by_name("blinker").expect("known pattern");
    grid.seed_pattern(blinker, Coord::new(3, 5));

    println!("=== Generation {} ===", grid.generation());
    print_grid(&grid);

    for _ in 0..2 {
        let report = grid.step();
        println!(
            "\n=== Generation {} ({} flipped, {} alive) ===",
            report.generation, report.flipped, report.population
        );
        print_grid(&grid);
    }

    // A glider drifting through four chunks
    grid.clear();
    grid.seed_pattern(Pattern::by_name("glider").expect("known pattern"), Coord::new(0, 0));
    for _ in 0..16 {
        grid.step();
    }
    println!("\n=== Glider after 16 more generations ===");
    print_grid(&grid);
}
