//! Error types
//!
//! Only configuration problems are errors. Per-bone misses and skipped
//! constraints are reported through `log` and never abort a pass.

use crate::bone::{BoneSlot, NodeId};
use thiserror::Error;

/// Configuration errors that abort a mapping or build pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// Avatar rig is missing or not humanoid.
    #[error("avatar rig is not humanoid")]
    NotHumanoid,

    /// No prosthetic root is set on the authoring record.
    #[error("prosthetic root is not set")]
    MissingRoot,

    /// A node handle does not belong to the scene.
    #[error("node {0} is not part of the scene")]
    UnknownNode(NodeId),

    /// Source-root slot has no bone on the avatar.
    #[error("could not find {0} bone on the avatar")]
    UnboundSlot(BoneSlot),
}

/// Errors raised while reading a scene document.
#[derive(Debug, Error)]
pub enum SceneError {
    /// Malformed JSON.
    #[error("failed to parse scene JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Parent must be listed before its children.
    #[error("bone {index} ('{name}') has parent {parent}, which is not an earlier bone")]
    ParentOutOfOrder {
        /// Index of the offending bone.
        index: usize,
        /// Name of the offending bone.
        name: String,
        /// Parent index as written.
        parent: usize,
    },

    /// Slot key does not name a humanoid slot.
    #[error("unknown humanoid slot '{0}'")]
    UnknownSlot(String),

    /// Slot binding points past the bone list.
    #[error("slot {slot} is bound to bone {index}, but the scene has {count} bones")]
    SlotBoneOutOfRange {
        /// Slot being bound.
        slot: BoneSlot,
        /// Bone index as written.
        index: usize,
        /// Number of bones in the scene.
        count: usize,
    },
}

/// Errors from the application state used by the host bindings.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("no scene loaded")]
    NoScene,

    #[error("unknown authoring record handle {0}")]
    UnknownRecord(u32),

    #[error("authoring record {0} was already applied")]
    AlreadyApplied(u32),

    #[error("no bone named '{0}' in the scene")]
    UnknownBone(String),

    #[error("unknown humanoid slot '{0}'")]
    UnknownSlot(String),

    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error(transparent)]
    Scene(#[from] SceneError),
}

pub type StateResult<T> = Result<T, StateError>;
