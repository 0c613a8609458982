//! # Mapsync Runtime
//! Drives declarative overlay configuration into a live map engine:
//! bootstrap, scope publication, the generic overlay lifecycle, event
//! bridging, and the async two-phase data providers.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

pub mod bootstrap;
pub mod events;
pub mod lifecycle;
pub mod provider;
pub mod scene;
mod scope;

pub use scope::{
    surface_accepts_callback, ScopeHandle, SurfaceSettings, SURFACE_COERCE_RULES,
    SURFACE_EVENT_FIELDS, SURFACE_SETTERS,
};
