mod diff;
mod error;
mod overlay_node;

pub use diff::{bulk_eq, diff_apply, visible_in};
pub use error::LifecycleError;
pub use overlay_node::{AttachPoint, OverlayNode};
