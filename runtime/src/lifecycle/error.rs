use thiserror::Error;

use mapsync_shared::UnsupportedFieldError;

/// Errors raised by the generic lifecycle protocol. Engine runtime
/// errors other than setter rejection bubble through unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    /// Node constructed without a ready ancestor scope. Thrown
    /// synchronously at construction.
    #[error("{overlay} cannot be used as a standalone. {overlay} must be a child component of {parent}.")]
    MissingScope {
        overlay: &'static str,
        parent: &'static str,
    },

    /// Engine rejected a setter call; propagated unmodified.
    #[error(transparent)]
    UnsupportedField(#[from] UnsupportedFieldError),
}
