mod error;
mod machine;
mod resource_load_state;

pub use error::ResourceLoadError;
pub use machine::{BootstrapMachine, BootstrapState};
pub use resource_load_state::{PendingEngineLoad, ResourceLoadState};
