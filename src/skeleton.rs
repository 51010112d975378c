//! Humanoid rig: binds humanoid slots to nodes of a bone tree
//!
//! The resolver only sees the rig through `SkeletonProvider`, so tests and the
//! wasm host can plug in whatever binding source they have.

use crate::bone::{BoneSlot, NodeId};

/// Read-only view of an avatar's humanoid bindings.
pub trait SkeletonProvider {
    /// Node bound to `slot`, if the avatar has that bone
    fn bone_node(&self, slot: BoneSlot) -> Option<NodeId>;

    fn is_humanoid(&self) -> bool;

    /// Slot bound to `node`, scanning slots in canonical order.
    fn slot_of(&self, node: NodeId) -> Option<BoneSlot> {
        BoneSlot::ALL
            .into_iter()
            .find(|&slot| self.bone_node(slot) == Some(node))
    }
}

/// In-memory slot bindings for one avatar.
#[derive(Debug, Clone)]
pub struct HumanoidRig {
    bindings: [Option<NodeId>; BoneSlot::COUNT],
    humanoid: bool,
}

impl Default for HumanoidRig {
    fn default() -> Self {
        Self::new()
    }
}

impl HumanoidRig {
    /// Empty humanoid rig
    pub fn new() -> Self {
        Self {
            bindings: [None; BoneSlot::COUNT],
            humanoid: true,
        }
    }

    /// Rig flagged as generic (non-humanoid); the resolver refuses it.
    pub fn generic() -> Self {
        Self {
            bindings: [None; BoneSlot::COUNT],
            humanoid: false,
        }
    }

    /// Bind `slot` to `node`, replacing any previous binding for that slot.
    pub fn bind(&mut self, slot: BoneSlot, node: NodeId) {
        self.bindings[slot.index()] = Some(node);
    }

    pub fn with_binding(mut self, slot: BoneSlot, node: NodeId) -> Self {
        self.bind(slot, node);
        self
    }

    pub fn unbind(&mut self, slot: BoneSlot) {
        self.bindings[slot.index()] = None;
    }

    pub fn set_humanoid(&mut self, humanoid: bool) {
        self.humanoid = humanoid;
    }

    /// Bound slots in canonical order
    pub fn bound(&self) -> impl Iterator<Item = (BoneSlot, NodeId)> + '_ {
        BoneSlot::ALL
            .into_iter()
            .filter_map(|slot| self.bindings[slot.index()].map(|node| (slot, node)))
    }
}

impl SkeletonProvider for HumanoidRig {
    fn bone_node(&self, slot: BoneSlot) -> Option<NodeId> {
        self.bindings[slot.index()]
    }

    fn is_humanoid(&self) -> bool {
        self.humanoid
    }
}
