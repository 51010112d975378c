//! Rotation constraints produced by the build step
//!
//! A constraint makes one prosthetic bone follow the rotation of one avatar
//! bone, with a fixed offset on top. Attaching it to a real scene object is
//! the host's job; `ConstraintApplier` is the seam.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::bone::{BoneSlot, EulerAngles, NodeId};

/// Every constraint has exactly one source, at full weight.
pub const CONSTRAINT_WEIGHT: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationConstraintSpec {
    /// Prosthetic bone that carries the constraint
    pub target: NodeId,
    /// Avatar bone whose rotation is followed
    pub source: NodeId,
    pub source_slot: BoneSlot,
    pub weight: f32,
    pub rotation_offset: EulerAngles,
    pub active: bool,
    pub locked: bool,
}

impl RotationConstraintSpec {
    /// Active, locked, single-source constraint.
    pub fn new(
        target: NodeId,
        source: NodeId,
        source_slot: BoneSlot,
        rotation_offset: EulerAngles,
    ) -> Self {
        Self {
            target,
            source,
            source_slot,
            weight: CONSTRAINT_WEIGHT,
            rotation_offset,
            active: true,
            locked: true,
        }
    }
}

/// Host-side sink for constraints.
///
/// Applying twice to the same target replaces the previous source and offset.
pub trait ConstraintApplier {
    fn apply(&mut self, spec: RotationConstraintSpec);
}

/// In-memory applier, one constraint per target bone.
#[derive(Debug, Clone, Default)]
pub struct ConstraintSet {
    constraints: BTreeMap<NodeId, RotationConstraintSpec>,
}

impl ConstraintSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, target: NodeId) -> Option<&RotationConstraintSpec> {
        self.constraints.get(&target)
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Constraints ordered by target node
    pub fn specs(&self) -> Vec<RotationConstraintSpec> {
        self.constraints.values().copied().collect()
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.specs())
    }
}

impl ConstraintApplier for ConstraintSet {
    fn apply(&mut self, spec: RotationConstraintSpec) {
        self.constraints.insert(spec.target, spec);
    }
}
