mod catalog;
mod overlay_schema;
mod parse_config;

pub use catalog::schema;
pub use overlay_schema::{OverlaySchema, UpdateStyle};
pub use parse_config::{parse_config, OverlayConfig};
