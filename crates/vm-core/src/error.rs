#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error(
        "dimension mismatch: expected {}x{}, got {}x{}",
        expected.0, expected.1, actual.0, actual.1
    )]
    DimensionMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("out of bounds")]
    OutOfBounds,

    #[error("invalid stride")]
    InvalidStride,

    #[error("invalid kernel: {0}")]
    InvalidKernel(String),
}
