//! Authoring record and the build-time transition to constraints
//!
//! A record is editable authoring data: which prosthetic root to map, which
//! avatar slot bounds the search, and the current mapping list. The build step
//! consumes it and hands constraints to a `ConstraintApplier`; after that the
//! authoring data is gone.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bone::{BoneSlot, HierarchyWalker, NodeId};
use crate::constraint::{ConstraintApplier, RotationConstraintSpec};
use crate::error::MappingError;
use crate::resolver::{BoneMapping, BoneResolver};
use crate::skeleton::SkeletonProvider;

fn default_source_root() -> BoneSlot {
    BoneSlot::DEFAULT_SOURCE_ROOT
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthoringRecord {
    #[serde(default)]
    pub prosthetic_root: Option<NodeId>,
    #[serde(default = "default_source_root")]
    pub source_root: BoneSlot,
    #[serde(default)]
    pub mappings: Vec<BoneMapping>,
}

impl Default for AuthoringRecord {
    fn default() -> Self {
        Self {
            prosthetic_root: None,
            source_root: default_source_root(),
            mappings: Vec::new(),
        }
    }
}

/// Summary of a record that went through the build step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedRecord {
    pub prosthetic_root: NodeId,
    pub source_root: BoneSlot,
    /// Prosthetic bones that received a constraint, in mapping order
    pub constrained: Vec<NodeId>,
    /// Mappings dropped with a warning
    pub skipped: usize,
}

/// Build step refused the record; it is handed back untouched.
#[derive(Debug, Error)]
#[error("constraint setup skipped: {error}")]
pub struct Rejected {
    pub record: AuthoringRecord,
    #[source]
    pub error: MappingError,
}

impl AuthoringRecord {
    pub fn new(prosthetic_root: NodeId) -> Self {
        Self {
            prosthetic_root: Some(prosthetic_root),
            ..Self::default()
        }
    }

    pub fn with_source_root(self, source_root: BoneSlot) -> Self {
        Self {
            source_root,
            ..self
        }
    }

    /// Run the resolver and replace the mapping list with its result.
    ///
    /// On a configuration error the previous mappings are kept.
    pub fn auto_map<W, S>(&mut self, walker: &W, rig: &S) -> Result<usize, MappingError>
    where
        W: HierarchyWalker,
        S: SkeletonProvider,
    {
        let root = self.prosthetic_root.ok_or(MappingError::MissingRoot)?;
        let mappings = BoneResolver::new(walker, rig).resolve(root, self.source_root)?;
        self.commit(mappings);
        Ok(self.mappings.len())
    }

    /// Replace the mapping list. Prior mappings are discarded, not merged.
    pub fn commit(&mut self, mappings: Vec<BoneMapping>) {
        self.mappings = mappings;
    }

    pub fn clear_mappings(&mut self) {
        self.mappings.clear();
    }

    /// Build step: turn every usable mapping into a rotation constraint.
    ///
    /// Consumes the record. Mappings whose prosthetic bone is gone, whose slot
    /// is unbound, or whose avatar bone lies outside the source-root subtree
    /// are skipped with a warning.
    pub fn apply<W, S, A>(
        self,
        walker: &W,
        rig: &S,
        applier: &mut A,
    ) -> Result<AppliedRecord, Rejected>
    where
        W: HierarchyWalker,
        S: SkeletonProvider,
        A: ConstraintApplier,
    {
        let (root, source_root_node) = match self.check_config(walker, rig) {
            Ok(nodes) => nodes,
            Err(error) => {
                log::warn!("Prosthetic constraint: {}", error);
                return Err(Rejected {
                    record: self,
                    error,
                });
            }
        };

        log::info!(
            "Prosthetic constraint: using avatar source root {}: {}",
            self.source_root,
            walker.name(source_root_node)
        );

        let mut constrained = Vec::with_capacity(self.mappings.len());
        let mut skipped = 0;

        for mapping in &self.mappings {
            if !walker.contains(mapping.prosthetic_bone) {
                log::warn!(
                    "Prosthetic constraint: mapping points at missing bone {}",
                    mapping.prosthetic_bone
                );
                skipped += 1;
                continue;
            }

            let Some(source) = rig.bone_node(mapping.avatar_slot) else {
                log::warn!(
                    "Prosthetic constraint: could not find {} bone on the avatar",
                    mapping.avatar_slot
                );
                skipped += 1;
                continue;
            };

            if !walker.is_descendant_of(source, source_root_node) {
                log::warn!(
                    "Prosthetic constraint: avatar bone {} ({}) is not a descendant of source root {} ({}). Skipping.",
                    walker.name(source),
                    mapping.avatar_slot,
                    walker.name(source_root_node),
                    self.source_root
                );
                skipped += 1;
                continue;
            }

            applier.apply(RotationConstraintSpec::new(
                mapping.prosthetic_bone,
                source,
                mapping.avatar_slot,
                mapping.rotation_offset,
            ));
            constrained.push(mapping.prosthetic_bone);

            log::info!(
                "Prosthetic constraint: {} follows {} ({}), offset {:?}",
                walker.name(mapping.prosthetic_bone),
                walker.name(source),
                mapping.avatar_slot,
                mapping.rotation_offset.to_array()
            );
        }

        Ok(AppliedRecord {
            prosthetic_root: root,
            source_root: self.source_root,
            constrained,
            skipped,
        })
    }

    fn check_config<W, S>(&self, walker: &W, rig: &S) -> Result<(NodeId, NodeId), MappingError>
    where
        W: HierarchyWalker,
        S: SkeletonProvider,
    {
        if !rig.is_humanoid() {
            return Err(MappingError::NotHumanoid);
        }
        let root = self.prosthetic_root.ok_or(MappingError::MissingRoot)?;
        if !walker.contains(root) {
            return Err(MappingError::UnknownNode(root));
        }
        let source_root_node = rig
            .bone_node(self.source_root)
            .ok_or(MappingError::UnboundSlot(self.source_root))?;
        Ok((root, source_root_node))
    }
}

/// Lifecycle of one authoring record: editable until the build applies it.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthoringState {
    Authored(AuthoringRecord),
    Applied(AppliedRecord),
}

impl Default for AuthoringState {
    fn default() -> Self {
        AuthoringState::Authored(AuthoringRecord::default())
    }
}

impl AuthoringState {
    pub fn record(&self) -> Option<&AuthoringRecord> {
        match self {
            AuthoringState::Authored(record) => Some(record),
            AuthoringState::Applied(_) => None,
        }
    }

    pub fn record_mut(&mut self) -> Option<&mut AuthoringRecord> {
        match self {
            AuthoringState::Authored(record) => Some(record),
            AuthoringState::Applied(_) => None,
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, AuthoringState::Applied(_))
    }

    /// Authored -> Applied. Rejected records stay authored.
    pub fn apply<W, S, A>(self, walker: &W, rig: &S, applier: &mut A) -> (Self, Option<MappingError>)
    where
        W: HierarchyWalker,
        S: SkeletonProvider,
        A: ConstraintApplier,
    {
        match self {
            AuthoringState::Authored(record) => match record.apply(walker, rig, applier) {
                Ok(applied) => (AuthoringState::Applied(applied), None),
                Err(Rejected { record, error }) => (AuthoringState::Authored(record), Some(error)),
            },
            applied @ AuthoringState::Applied(_) => (applied, None),
        }
    }
}
