use mapsync_shared::{CoerceRule, EngineValueKind, OptionMap, Protocol, SurfaceId};

use crate::events::OverlayCallback;

/// Published reference to the constructed map surface. Undefined until
/// bootstrap completes; shared read-only with every descendant node;
/// destroyed once, on root unmount, after all descendants have torn down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScopeHandle {
    surface: SurfaceId,
}

impl ScopeHandle {
    pub fn new(surface: SurfaceId) -> Self {
        Self { surface }
    }

    pub fn surface(&self) -> SurfaceId {
        self.surface
    }
}

/// Root node input: credentials, versions, the render target, the map's
/// own render options, and scope-level event handlers.
pub struct SurfaceSettings {
    pub credential_key: String,
    pub engine_version: String,
    pub ui_version: String,
    pub data_vis_version: String,
    pub protocol: Protocol,
    pub render_target: String,
    pub map_options: OptionMap,
    pub map_callbacks: Vec<(&'static str, OverlayCallback)>,
}

impl SurfaceSettings {
    pub fn new(credential_key: &str, render_target: &str) -> Self {
        Self {
            credential_key: credential_key.to_string(),
            engine_version: "1.4.7".to_string(),
            ui_version: "1.0".to_string(),
            data_vis_version: "1.0.5".to_string(),
            protocol: Protocol::Https,
            render_target: render_target.to_string(),
            map_options: OptionMap::new(),
            map_callbacks: Vec::new(),
        }
    }

    pub fn protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = protocol;
        self
    }

    pub fn map_options(mut self, options: OptionMap) -> Self {
        self.map_options = options;
        self
    }

    pub fn on(mut self, field: &'static str, callback: OverlayCallback) -> Self {
        self.map_callbacks.push((field, callback));
        self
    }
}

/// Scope-level events bound on the surface once it exists. `on_complete`
/// fires at publication instead.
pub static SURFACE_EVENT_FIELDS: &[&str] = &[
    "on_click",
    "on_dbl_click",
    "on_map_move",
    "on_hotspot_click",
    "on_hotspot_over",
    "on_hotspot_out",
    "on_move_start",
    "on_move_end",
    "on_zoom_change",
    "on_zoom_start",
    "on_zoom_end",
    "on_mouse_move",
    "on_mouse_wheel",
    "on_mouse_over",
    "on_mouse_out",
    "on_mouse_up",
    "on_mouse_down",
    "on_right_click",
    "on_drag_start",
    "on_dragging",
    "on_drag_end",
    "on_resize",
    "on_touch_start",
    "on_touch_move",
    "on_touch_end",
];

/// Surface option fields with independent setters, diffed the same way
/// overlay fields are.
pub static SURFACE_SETTERS: &[(&str, &str)] = &[
    ("bounds", "set_bounds"),
    ("center", "set_center"),
    ("city", "set_city"),
    ("default_cursor", "set_default_cursor"),
    ("default_layer", "set_default_layer"),
    ("features", "set_features"),
    ("zoom", "set_zoom"),
    ("lang", "set_lang"),
    ("label_z_index", "set_label_z_index"),
    ("map_style", "set_map_style"),
    ("pitch", "set_pitch"),
    ("rotation", "set_rotation"),
    ("status", "set_status"),
];

pub static SURFACE_COERCE_RULES: &[(&str, CoerceRule)] = &[
    (
        "bounds",
        CoerceRule::Value {
            kind: EngineValueKind::Bounds,
            default: None,
        },
    ),
    (
        "center",
        CoerceRule::Value {
            kind: EngineValueKind::LngLat,
            default: None,
        },
    ),
];

pub fn surface_accepts_callback(field: &str) -> bool {
    field == "on_complete" || SURFACE_EVENT_FIELDS.contains(&field)
}
