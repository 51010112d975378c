//! Automatic bone correspondence
//!
//! For every bone under the prosthetic root, find the best-named avatar bone
//! below the chosen source-root slot, classify it into a humanoid slot and
//! record the rotation offset between the two.
//!
//! The resolver only reads the hierarchy and the rig. Replacing a record's
//! mapping list is left to the caller (see `authoring`).

use serde::{Deserialize, Serialize};

use crate::bone::{rotation_offset, BoneSlot, EulerAngles, HierarchyWalker, NodeId, Side};
use crate::error::MappingError;
use crate::naming;
use crate::skeleton::SkeletonProvider;

/// A candidate must score strictly above this to be considered a match.
pub const ACCEPT_THRESHOLD: f32 = 0.3;

/// Similarity above which a fallback slot is accepted outright.
pub const STRONG_MATCH_THRESHOLD: f32 = 0.6;

/// One resolved prosthetic bone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoneMapping {
    pub prosthetic_bone: NodeId,
    pub avatar_slot: BoneSlot,
    /// Euler offset in degrees, each axis in (-180, 180]
    pub rotation_offset: EulerAngles,
}

pub struct BoneResolver<'a, W, S> {
    walker: &'a W,
    rig: &'a S,
}

impl<'a, W: HierarchyWalker, S: SkeletonProvider> BoneResolver<'a, W, S> {
    pub fn new(walker: &'a W, rig: &'a S) -> Self {
        Self { walker, rig }
    }

    /// Map every bone below `prosthetic_root` onto the avatar.
    ///
    /// Fails only on configuration problems, before any bone is scanned.
    /// Bones without a plausible match are skipped.
    pub fn resolve(
        &self,
        prosthetic_root: NodeId,
        source_root: BoneSlot,
    ) -> Result<Vec<BoneMapping>, MappingError> {
        if !self.rig.is_humanoid() {
            return Err(MappingError::NotHumanoid);
        }
        if !self.walker.contains(prosthetic_root) {
            return Err(MappingError::UnknownNode(prosthetic_root));
        }
        let source_node = self
            .rig
            .bone_node(source_root)
            .ok_or(MappingError::UnboundSlot(source_root))?;
        if !self.walker.contains(source_node) {
            return Err(MappingError::UnknownNode(source_node));
        }

        log::info!(
            "Using avatar source root {}: {}",
            source_root,
            self.walker.name(source_node)
        );

        let candidates = self.walker.descendants(source_node);
        let bones: Vec<NodeId> = self
            .walker
            .descendants(prosthetic_root)
            .into_iter()
            .filter(|&bone| bone != prosthetic_root)
            .collect();

        let mappings: Vec<BoneMapping> = bones
            .iter()
            .filter_map(|&bone| self.resolve_bone(bone, &candidates))
            .collect();

        log::info!("Mapped {} of {} prosthetic bones", mappings.len(), bones.len());
        Ok(mappings)
    }

    /// Resolve a single prosthetic bone against `candidates`.
    pub fn resolve_bone(&self, bone: NodeId, candidates: &[NodeId]) -> Option<BoneMapping> {
        let name = self.walker.name(bone);
        let side = naming::side(name);

        let Some(matched) = self.best_candidate(name, side, candidates) else {
            log::info!("No good match found for prosthetic bone: {}", name);
            return None;
        };

        let Some(slot) = self.classify(matched, name, side) else {
            log::warn!(
                "Skipped: could not determine a humanoid slot for {} based on prosthetic bone {}",
                self.walker.name(matched),
                name
            );
            return None;
        };

        let offset = rotation_offset(
            self.walker.frame(matched).rotation,
            self.walker.frame(bone).rotation,
        );

        log::info!(
            "Mapped: {} -> {} ({})",
            name,
            self.walker.name(matched),
            slot
        );

        Some(BoneMapping {
            prosthetic_bone: bone,
            avatar_slot: slot,
            rotation_offset: offset,
        })
    }

    /// Highest-scoring side-compatible candidate above `ACCEPT_THRESHOLD`.
    ///
    /// Ties keep the earliest candidate.
    pub fn best_candidate(&self, name: &str, side: Side, candidates: &[NodeId]) -> Option<NodeId> {
        let mut best = None;
        let mut best_score = 0.0;

        for &candidate in candidates {
            let candidate_name = self.walker.name(candidate);
            if !side.compatible(naming::side(candidate_name)) {
                continue;
            }

            let score = naming::score(name, candidate_name);
            if score > best_score && score > ACCEPT_THRESHOLD {
                best_score = score;
                best = Some(candidate);
            }
        }
        best
    }

    /// Humanoid slot for a matched avatar bone: the slot it is bound to when
    /// sides agree, otherwise the first slot passing the strong-match test.
    pub fn classify(&self, matched: NodeId, name: &str, side: Side) -> Option<BoneSlot> {
        BoneSlot::ALL
            .into_iter()
            .filter(|&slot| self.rig.bone_node(slot) == Some(matched))
            .find(|slot| side.compatible(slot.side()))
            .or_else(|| self.fallback_slot(name, side))
    }

    fn fallback_slot(&self, name: &str, side: Side) -> Option<BoneSlot> {
        BoneSlot::ALL
            .into_iter()
            .filter(|&slot| slot != BoneSlot::Hips)
            .find(|&slot| {
                let Some(node) = self.rig.bone_node(slot) else {
                    return false;
                };
                if !side.compatible(slot.side()) {
                    return false;
                }
                let similarity = naming::score(name, self.walker.name(node));
                is_strong_match(name, slot, similarity)
            })
    }
}

/// Whether a prosthetic bone name plausibly names `slot`.
pub fn is_strong_match(prosthetic_name: &str, slot: BoneSlot, similarity: f32) -> bool {
    let side = naming::side(prosthetic_name);
    if !side.compatible(slot.side()) {
        return false;
    }
    if similarity > STRONG_MATCH_THRESHOLD {
        return true;
    }
    if side.is_defined() && side == slot.side() {
        return true;
    }

    // Containment checks compare the raw prosthetic name against lower-case
    // slot strings, so they are case-sensitive.
    let stripped = naming::strip_side_markers(prosthetic_name);
    if !stripped.is_empty() && naming::strip_side_words(slot.name()).contains(&stripped) {
        return true;
    }

    let body_part = slot.body_part();
    !body_part.is_empty() && prosthetic_name.contains(body_part)
}
