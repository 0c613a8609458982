use thiserror::Error;

use mapsync_shared::ResourceKind;

/// A resource load errored out. Recorded by the bootstrap; the scope
/// stays permanently un-ready, and no retry is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to load {} resource: {reason}", kind.label())]
pub struct ResourceLoadError {
    pub kind: ResourceKind,
    pub reason: String,
}

impl ResourceLoadError {
    pub fn new(kind: ResourceKind, reason: &str) -> Self {
        Self {
            kind,
            reason: reason.to_string(),
        }
    }
}
