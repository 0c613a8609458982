use thiserror::Error;

use crate::lifecycle::LifecycleError;
use crate::scene::{NodeId, SceneId};

/// The reasons a scene operation can be rejected.
#[derive(Debug, Error)]
pub enum SceneError {
    /// No scene is mounted under the given id.
    #[error("no scene is mounted under {scene}")]
    SceneNotFound {
        /// The unknown scene id.
        scene: SceneId,
    },
    /// No overlay node exists under the given id.
    #[error("no overlay node exists under {node}")]
    NodeNotFound {
        /// The unknown node id.
        node: NodeId,
    },
    /// A nested overlay named a parent node that is not a provider.
    #[error("{node} is not a data provider and cannot host nested overlays")]
    ParentNotProvider {
        /// The node named as a parent.
        node: NodeId,
    },
    /// An overlay lifecycle operation failed.
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}

impl SceneError {
    pub(crate) fn scene_not_found(scene: SceneId) -> Self {
        Self::SceneNotFound { scene }
    }

    pub(crate) fn node_not_found(node: NodeId) -> Self {
        Self::NodeNotFound { node }
    }
}
