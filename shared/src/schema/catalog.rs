use crate::types::OverlayKind;
use crate::value::{CoerceRule, EngineValueKind};

use super::overlay_schema::{OverlaySchema, UpdateStyle};

const LNG_LAT: CoerceRule = CoerceRule::Value {
    kind: EngineValueKind::LngLat,
    default: None,
};

const SIZE: CoerceRule = CoerceRule::Value {
    kind: EngineValueKind::Size,
    default: None,
};

const PIXEL_ORIGIN: CoerceRule = CoerceRule::Value {
    kind: EngineValueKind::Pixel,
    default: Some(&[0.0, 0.0]),
};

/// Marker anchor offset falls back to the engine's historical default.
const MARKER_OFFSET: CoerceRule = CoerceRule::Value {
    kind: EngineValueKind::Pixel,
    default: Some(&[-10.0, -34.0]),
};

const ICON: CoerceRule = CoerceRule::Object {
    members: &[
        ("image_offset", PIXEL_ORIGIN),
        ("image_size", SIZE),
        ("size", SIZE),
    ],
};

const LABEL: CoerceRule = CoerceRule::Object {
    members: &[("offset", PIXEL_ORIGIN)],
};

const POINT_STYLE: CoerceRule = CoerceRule::Object {
    members: &[
        (
            "anchor",
            CoerceRule::Value {
                kind: EngineValueKind::Pixel,
                default: None,
            },
        ),
        ("size", SIZE),
    ],
};

static MARKER: OverlaySchema = OverlaySchema {
    kind: OverlayKind::Marker,
    required_parent: "Map",
    event_fields: &[
        "on_click",
        "on_dbl_click",
        "on_right_click",
        "on_mouse_move",
        "on_mouse_over",
        "on_mouse_out",
        "on_mouse_down",
        "on_mouse_up",
        "on_drag_start",
        "on_dragging",
        "on_drag_end",
        "on_moving",
        "on_move_end",
        "on_move_along",
        "on_touch_start",
        "on_touch_move",
        "on_touch_end",
    ],
    complete_on_construct: true,
    deep_copy_fields: &["position"],
    coerce_rules: &[
        ("position", LNG_LAT),
        ("offset", MARKER_OFFSET),
        ("icon", ICON),
        ("label", LABEL),
    ],
    update_style: UpdateStyle::Fields(&[
        ("anchor", "set_anchor"),
        ("offset", "set_offset"),
        ("animation", "set_animation"),
        ("clickable", "set_clickable"),
        ("position", "set_position"),
        ("angle", "set_angle"),
        ("label", "set_label"),
        ("z_index", "set_z_index"),
        ("icon", "set_icon"),
        ("draggable", "set_draggable"),
        ("cursor", "set_cursor"),
        ("content", "set_content"),
        ("title", "set_title"),
        ("shadow", "set_shadow"),
        ("shape", "set_shape"),
        ("ext_data", "set_ext_data"),
    ]),
};

const SHAPE_EVENT_FIELDS: &[&str] = &[
    "on_click",
    "on_dbl_click",
    "on_right_click",
    "on_hide",
    "on_show",
    "on_change",
    "on_mouse_down",
    "on_mouse_up",
    "on_mouse_over",
    "on_mouse_out",
    "on_touch_start",
    "on_touch_move",
    "on_touch_end",
];

static POLYGON: OverlaySchema = OverlaySchema {
    kind: OverlayKind::Polygon,
    required_parent: "Map",
    event_fields: SHAPE_EVENT_FIELDS,
    complete_on_construct: true,
    deep_copy_fields: &["path"],
    coerce_rules: &[],
    update_style: UpdateStyle::Bulk {
        setter: "set_options",
    },
};

static POLYLINE: OverlaySchema = OverlaySchema {
    kind: OverlayKind::Polyline,
    required_parent: "Map",
    event_fields: SHAPE_EVENT_FIELDS,
    complete_on_construct: true,
    deep_copy_fields: &["path"],
    coerce_rules: &[],
    update_style: UpdateStyle::Bulk {
        setter: "set_options",
    },
};

static CIRCLE: OverlaySchema = OverlaySchema {
    kind: OverlayKind::Circle,
    required_parent: "Map",
    event_fields: SHAPE_EVENT_FIELDS,
    complete_on_construct: true,
    deep_copy_fields: &["center"],
    coerce_rules: &[("center", LNG_LAT)],
    update_style: UpdateStyle::Bulk {
        setter: "set_options",
    },
};

static BEZIER_CURVE: OverlaySchema = OverlaySchema {
    kind: OverlayKind::BezierCurve,
    required_parent: "Map",
    event_fields: SHAPE_EVENT_FIELDS,
    complete_on_construct: true,
    deep_copy_fields: &["path"],
    coerce_rules: &[],
    update_style: UpdateStyle::Bulk {
        setter: "set_options",
    },
};

static INFO_WINDOW: OverlaySchema = OverlaySchema {
    kind: OverlayKind::InfoWindow,
    required_parent: "Map",
    event_fields: &["on_change", "on_open", "on_close"],
    complete_on_construct: true,
    deep_copy_fields: &["position"],
    coerce_rules: &[
        ("position", LNG_LAT),
        ("offset", PIXEL_ORIGIN),
        ("size", SIZE),
    ],
    update_style: UpdateStyle::Fields(&[
        ("content", "set_content"),
        ("position", "set_position"),
        ("anchor", "set_anchor"),
        ("size", "set_size"),
    ]),
};

static TRAFFIC_LAYER: OverlaySchema = OverlaySchema {
    kind: OverlayKind::TrafficLayer,
    required_parent: "Map",
    event_fields: &["on_complete", "on_click", "on_dbl_click", "on_right_click"],
    complete_on_construct: false,
    deep_copy_fields: &[],
    coerce_rules: &[],
    update_style: UpdateStyle::Fields(&[
        ("opacity", "set_opacity"),
        ("z_index", "set_z_index"),
    ]),
};

static MASS_POINTS: OverlaySchema = OverlaySchema {
    kind: OverlayKind::MassPoints,
    required_parent: "Map",
    event_fields: &[
        "on_complete",
        "on_click",
        "on_dbl_click",
        "on_mouse_over",
        "on_mouse_out",
        "on_mouse_up",
        "on_mouse_down",
        "on_touch_start",
        "on_touch_end",
    ],
    complete_on_construct: false,
    deep_copy_fields: &["data", "style"],
    coerce_rules: &[("style", POINT_STYLE)],
    update_style: UpdateStyle::Fields(&[("style", "set_style"), ("data", "set_data")]),
};

// Data-visualization layer backed by the data-vis extension. The layer
// options only feed construction; dataset, dataset options, and visual
// options each re-apply through their own setter.
static VISUAL_LAYER: OverlaySchema = OverlaySchema {
    kind: OverlayKind::VisualLayer,
    required_parent: "Map",
    event_fields: &[],
    complete_on_construct: false,
    deep_copy_fields: &["data", "data_set_options", "visual_options"],
    coerce_rules: &[],
    update_style: UpdateStyle::Fields(&[
        ("data", "set_data"),
        ("data_set_options", "set_data_set_options"),
        ("visual_options", "set_options"),
    ]),
};

// The dataset is deliberately absent from the setter table: a dataset
// change remounts the provider and its dependents instead of patching.
static PATH_VIEW: OverlaySchema = OverlaySchema {
    kind: OverlayKind::PathView,
    required_parent: "Map",
    event_fields: &[
        "on_path_click",
        "on_path_mouse_over",
        "on_path_mouse_out",
        "on_point_click",
        "on_point_mouse_over",
        "on_point_mouse_out",
    ],
    complete_on_construct: true,
    deep_copy_fields: &["data"],
    coerce_rules: &[],
    update_style: UpdateStyle::Fields(&[("z_index", "set_z_index_of_path")]),
};

static PATH_NAVIGATOR: OverlaySchema = OverlaySchema {
    kind: OverlayKind::PathNavigator,
    required_parent: "PathView",
    event_fields: &["on_start", "on_pause", "on_move", "on_stop"],
    complete_on_construct: true,
    deep_copy_fields: &[],
    coerce_rules: &[],
    update_style: UpdateStyle::Fields(&[("speed", "set_speed")]),
};

/// Static registry mapping overlay kinds to their declarations.
pub fn schema(kind: OverlayKind) -> &'static OverlaySchema {
    match kind {
        OverlayKind::Marker => &MARKER,
        OverlayKind::Polygon => &POLYGON,
        OverlayKind::Polyline => &POLYLINE,
        OverlayKind::Circle => &CIRCLE,
        OverlayKind::BezierCurve => &BEZIER_CURVE,
        OverlayKind::InfoWindow => &INFO_WINDOW,
        OverlayKind::TrafficLayer => &TRAFFIC_LAYER,
        OverlayKind::MassPoints => &MASS_POINTS,
        OverlayKind::VisualLayer => &VISUAL_LAYER,
        OverlayKind::PathView => &PATH_VIEW,
        OverlayKind::PathNavigator => &PATH_NAVIGATOR,
    }
}
