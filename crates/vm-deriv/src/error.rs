#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DerivativeError {
    /// A derivative needs at least one axis (order >= 1).
    #[error("axis sequence is empty; derivative order must be at least 1")]
    EmptyAxisSequence,

    #[error("no input image has been set")]
    MissingInput,

    #[error("derivative order {order} exceeds the configured maximum {max}")]
    OrderTooHigh { order: usize, max: usize },

    /// Raised by a filter or image factory and passed through unchanged.
    #[error(transparent)]
    Image(#[from] vm_core::Error),
}
