use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeodistError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid chamfer mask: {0}")]
    InvalidMask(String),

    #[error("Shape mismatch: expected {expected:?}, found {found:?}")]
    DimensionMismatch {
        expected: Vec<usize>,
        found: Vec<usize>,
    },

    #[error("Unsupported dimensionality: {0} (expected 2 or 3)")]
    UnsupportedDimensionality(usize),

    #[error("Distance overflow at {coords:?}: value exceeds {limit}")]
    Overflow { coords: Vec<usize>, limit: u64 },

    #[error("Array shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Empty slice stack")]
    EmptyStack,
}

pub type Result<T> = std::result::Result<T, GeodistError>;
