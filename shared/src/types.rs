use std::fmt;

/// Engine-native instance backing one declarative node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HostId(u64);

impl HostId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for HostId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Host({})", self.0)
    }
}

/// Opaque token returned by the engine when binding one named event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Constructed map surface. Wrapped by `ScopeHandle` once published.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SurfaceId(u64);

impl SurfaceId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Every overlay type the runtime can drive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OverlayKind {
    Marker,
    Polygon,
    Polyline,
    Circle,
    BezierCurve,
    InfoWindow,
    TrafficLayer,
    MassPoints,
    VisualLayer,
    PathView,
    PathNavigator,
}

impl OverlayKind {
    pub fn label(&self) -> &'static str {
        match self {
            OverlayKind::Marker => "Marker",
            OverlayKind::Polygon => "Polygon",
            OverlayKind::Polyline => "Polyline",
            OverlayKind::Circle => "Circle",
            OverlayKind::BezierCurve => "BezierCurve",
            OverlayKind::InfoWindow => "InfoWindow",
            OverlayKind::TrafficLayer => "TrafficLayer",
            OverlayKind::MassPoints => "MassPoints",
            OverlayKind::VisualLayer => "VisualLayer",
            OverlayKind::PathView => "PathView",
            OverlayKind::PathNavigator => "PathNavigator",
        }
    }
}

/// Scheme used when composing resource locators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Protocol {
    Http,
    Https,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Protocol::Http => write!(f, "http"),
            Protocol::Https => write!(f, "https"),
        }
    }
}
