use thiserror::Error;

/// Errors raised while building a grid from a [`LifeConfig`](crate::LifeConfig).
///
/// Everything after construction is infallible: lookups that can miss return
/// `Option` instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("chunk width must be at least 1 cell")]
    ZeroChunkWidth,

    #[error("cell pixel width must be at least 1 pixel")]
    ZeroCellWidth,

    #[error("lattice extent must be at least 1 chunk")]
    ZeroExtent,

    #[error("grid of {cells} cells exceeds the limit of {max}")]
    TooManyCells { cells: u64, max: u64 },

    #[error("lattice of {extent}x{extent} chunks of {chunk_width} cells at {cell_px}px does not fit in pixel space")]
    TooLarge {
        extent: u32,
        chunk_width: u32,
        cell_px: u32,
    },
}
