//! # Mapsync Shared
//! Value model, option normalization, overlay schemas, and the engine
//! interface shared by the mapsync runtime.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod engine;
mod schema;
mod types;
mod value;

pub use engine::{
    data_vis_locator, engine_locator, ui_locator, EngineApi, EngineEvent, EventTarget,
    ResourceKind, UnsupportedFieldError,
};
pub use schema::{parse_config, schema, OverlayConfig, OverlaySchema, UpdateStyle};
pub use types::{HostId, ListenerId, OverlayKind, Protocol, SurfaceId};
pub use value::{
    clone_for_engine, coerce, coerce_field, coerce_options, options_eq, shallow_eq, CoerceRule,
    EngineValue, EngineValueKind, OptionMap, OptionValue, SharedObject, SharedSeq,
};
