mod error;
mod runtime;
#[allow(clippy::module_inception)]
mod scene;

pub use error::SceneError;
pub use runtime::Runtime;
pub use scene::Scene;

use std::fmt;

use mapsync_shared::{OptionMap, OptionValue, OverlayKind};

use crate::events::OverlayCallback;

/// One mounted scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SceneId(u64);

impl SceneId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Scene({})", self.0)
    }
}

/// One declarative node within a scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(u64);

impl NodeId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

/// Declarative description of one overlay: its kind, render options,
/// event handlers, and (for nested overlays) the provider it depends on.
pub struct OverlayDef {
    pub kind: OverlayKind,
    pub options: OptionMap,
    pub callbacks: Vec<(&'static str, OverlayCallback)>,
    pub parent: Option<NodeId>,
}

impl OverlayDef {
    pub fn new(kind: OverlayKind) -> Self {
        Self {
            kind,
            options: OptionMap::new(),
            callbacks: Vec::new(),
            parent: None,
        }
    }

    pub fn option(mut self, field: &str, value: OptionValue) -> Self {
        self.options.insert(field, value);
        self
    }

    pub fn options(mut self, options: OptionMap) -> Self {
        self.options = options;
        self
    }

    pub fn on(mut self, field: &'static str, callback: OverlayCallback) -> Self {
        self.callbacks.push((field, callback));
        self
    }

    pub fn child_of(mut self, parent: NodeId) -> Self {
        self.parent = Some(parent);
        self
    }
}
