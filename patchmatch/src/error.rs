use thiserror::Error;

/// Errors reported by the matching engine and the reconstructor.
///
/// All of them indicate caller misuse and are raised before any work is done.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatchMatchError {
    #[error("channel mismatch: expected {expected} channels, got {actual}")]
    ChannelMismatch { expected: usize, actual: usize },

    #[error(
        "dimension mismatch: expected {}x{}, got {}x{}",
        expected.0, expected.1, actual.0, actual.1
    )]
    DimensionMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("offset at ({x}, {y}) points outside the query image")]
    OffsetOutOfBounds { x: usize, y: usize },

    #[error("target photo has no pixels")]
    EmptyTarget,

    #[error("invalid photo data: expected {expected} samples, got {actual}")]
    InvalidPhoto { expected: usize, actual: usize },
}
