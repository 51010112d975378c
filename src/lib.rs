//! Prosthetic Mapper - Wasm Core
//!
//! Maps the bones of a prosthetic limb rig onto a humanoid avatar by name
//! similarity and side, and turns the mapping into rotation constraints.

pub mod authoring;
pub mod bone;
pub mod constraint;
pub mod error;
pub mod naming;
pub mod resolver;
pub mod scene;
pub mod skeleton;
pub mod state;

#[cfg(test)]
mod test_support;

cfg_if::cfg_if! {
    if #[cfg(target_arch = "wasm32")] {
        mod api;
        pub use api::{start, App};
    }
}

pub use authoring::{AppliedRecord, AuthoringRecord, AuthoringState, Rejected};
pub use bone::{BoneSlot, BoneTree, EulerAngles, Frame, HierarchyWalker, NodeId, Side};
pub use constraint::{ConstraintApplier, ConstraintSet, RotationConstraintSpec};
pub use error::{MappingError, SceneError, StateError, StateResult};
pub use resolver::{BoneMapping, BoneResolver};
pub use scene::Scene;
pub use skeleton::{HumanoidRig, SkeletonProvider};
pub use state::{AppState, RecordHandle};
