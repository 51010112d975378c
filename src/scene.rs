//! Scene documents: a bone tree plus humanoid slot bindings, as JSON
//!
//! ```json
//! { "humanoid": true,
//!   "bones": [ { "name": "Armature", "parent": null,
//!                "position": [0, 0, 0], "rotation": [0, 0, 0, 1] } ],
//!   "slots": { "Hips": 1 } }
//! ```
//!
//! Bones are listed parents-first; `parent` is an index into `bones`.

use std::collections::BTreeMap;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::bone::{BoneSlot, BoneTree, Frame, HierarchyWalker, NodeId};
use crate::error::SceneError;
use crate::skeleton::{HumanoidRig, SkeletonProvider};

fn default_humanoid() -> bool {
    true
}

fn default_position() -> [f32; 3] {
    [0.0; 3]
}

fn default_rotation() -> [f32; 4] {
    Quat::IDENTITY.to_array()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoneJson {
    pub name: String,
    #[serde(default)]
    pub parent: Option<usize>,
    #[serde(default = "default_position")]
    pub position: [f32; 3],
    /// World-space quaternion, `[x, y, z, w]`
    #[serde(default = "default_rotation")]
    pub rotation: [f32; 4],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneJson {
    #[serde(default = "default_humanoid")]
    pub humanoid: bool,
    #[serde(default)]
    pub bones: Vec<BoneJson>,
    #[serde(default)]
    pub slots: BTreeMap<String, usize>,
}

/// Avatar and prosthetic bones in one hierarchy, plus the avatar's rig.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub tree: BoneTree,
    pub rig: HumanoidRig,
}

impl Scene {
    pub fn new(tree: BoneTree, rig: HumanoidRig) -> Self {
        Self { tree, rig }
    }

    /// Parse from JSON string
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        let scene_json: SceneJson = serde_json::from_str(json)?;
        Self::from_scene_json(scene_json)
    }

    pub fn from_scene_json(scene_json: SceneJson) -> Result<Self, SceneError> {
        let mut tree = BoneTree::new();

        for (index, bone) in scene_json.bones.into_iter().enumerate() {
            let rotation = Quat::from_array(bone.rotation);
            // Zero quaternions can't be normalized
            let rotation = if rotation.length_squared() > f32::EPSILON {
                rotation.normalize()
            } else {
                Quat::IDENTITY
            };
            let frame = Frame::new(Vec3::from_array(bone.position), rotation);

            match bone.parent {
                None => {
                    tree.add_root(bone.name, frame);
                }
                Some(parent) if parent < index => {
                    tree.add_child(NodeId(parent as u32), bone.name, frame);
                }
                Some(parent) => {
                    return Err(SceneError::ParentOutOfOrder {
                        index,
                        name: bone.name,
                        parent,
                    });
                }
            }
        }

        let mut rig = if scene_json.humanoid {
            HumanoidRig::new()
        } else {
            HumanoidRig::generic()
        };

        for (name, index) in scene_json.slots {
            let slot = BoneSlot::from_name(&name).ok_or(SceneError::UnknownSlot(name))?;
            if index >= tree.len() {
                return Err(SceneError::SlotBoneOutOfRange {
                    slot,
                    index,
                    count: tree.len(),
                });
            }
            rig.bind(slot, NodeId(index as u32));
        }

        Ok(Self { tree, rig })
    }

    pub fn to_scene_json(&self) -> SceneJson {
        let bones = self
            .tree
            .ids()
            .map(|id| {
                let frame = self.tree.frame(id);
                BoneJson {
                    name: self.tree.name(id).to_string(),
                    parent: self.tree.parent(id).map(NodeId::index),
                    position: frame.position.to_array(),
                    rotation: frame.rotation.to_array(),
                }
            })
            .collect();

        let slots = self
            .rig
            .bound()
            .map(|(slot, node)| (slot.name().to_string(), node.index()))
            .collect();

        SceneJson {
            humanoid: self.rig.is_humanoid(),
            bones,
            slots,
        }
    }

    /// Convert to JSON string
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.to_scene_json())
    }

    /// First node with exactly this name
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.tree.find_by_name(name)
    }

    /// Humanoid slot bound to the named bone, if any
    pub fn slot_of_bone(&self, name: &str) -> Option<BoneSlot> {
        self.find_by_name(name)
            .and_then(|node| self.rig.slot_of(node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    const SCENE: &str = r#"{
        "humanoid": true,
        "bones": [
            { "name": "Armature" },
            { "name": "Hips", "parent": 0 },
            { "name": "Spine", "parent": 1 },
            { "name": "Chest", "parent": 2, "position": [0, 1.2, 0] },
            { "name": "Prosthetic" },
            { "name": "hand_L", "parent": 4, "rotation": [0, 0, 2, 0] }
        ],
        "slots": { "Hips": 1, "spine": 2, "Chest": 3 }
    }"#;

    #[test]
    #[wasm_bindgen_test]
    fn test_parse_scene() {
        let scene = Scene::from_json(SCENE).unwrap();

        assert_eq!(scene.tree.len(), 6);
        assert!(scene.rig.is_humanoid());
        assert_eq!(scene.rig.bone_node(BoneSlot::Spine), Some(NodeId(2)));
        assert_eq!(scene.rig.bone_node(BoneSlot::Chest), Some(NodeId(3)));
        assert_eq!(scene.rig.bone_node(BoneSlot::Neck), None);

        assert_eq!(scene.tree.parent(NodeId(3)), Some(NodeId(2)));
        assert_eq!(scene.tree.parent(NodeId(4)), None);
        assert_eq!(scene.tree.frame(NodeId(3)).position, Vec3::new(0.0, 1.2, 0.0));
        assert_eq!(scene.tree.frame(NodeId(0)).rotation, Quat::IDENTITY);

        // Rotations are normalized on load
        let rotation = scene.tree.frame(NodeId(5)).rotation;
        assert!(rotation.abs_diff_eq(Quat::from_xyzw(0.0, 0.0, 1.0, 0.0), 1e-6));
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_find_by_name() {
        let scene = Scene::from_json(SCENE).unwrap();
        assert_eq!(scene.find_by_name("hand_L"), Some(NodeId(5)));
        assert_eq!(scene.find_by_name("hand_l"), None);
        assert_eq!(scene.slot_of_bone("Chest"), Some(BoneSlot::Chest));
        assert_eq!(scene.slot_of_bone("Prosthetic"), None);
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_round_trip() {
        let scene = Scene::from_json(SCENE).unwrap();
        let json = scene.to_json_string().unwrap();
        let reloaded = Scene::from_json(&json).unwrap();

        assert_eq!(reloaded.tree.len(), scene.tree.len());
        for id in scene.tree.ids() {
            assert_eq!(reloaded.tree.name(id), scene.tree.name(id));
            assert_eq!(reloaded.tree.parent(id), scene.tree.parent(id));
            assert_eq!(reloaded.tree.frame(id), scene.tree.frame(id));
        }
        let bound: Vec<_> = reloaded.rig.bound().collect();
        assert_eq!(bound, scene.rig.bound().collect::<Vec<_>>());
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_generic_rig() {
        let scene = Scene::from_json(r#"{ "humanoid": false, "bones": [] }"#).unwrap();
        assert!(!scene.rig.is_humanoid());
        assert!(scene.tree.is_empty());
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_parent_must_come_first() {
        let json = r#"{ "bones": [ { "name": "Child", "parent": 1 }, { "name": "Root" } ] }"#;
        match Scene::from_json(json) {
            Err(SceneError::ParentOutOfOrder {
                index,
                name,
                parent,
            }) => {
                assert_eq!(index, 0);
                assert_eq!(name, "Child");
                assert_eq!(parent, 1);
            }
            other => panic!("unexpected result: {:?}", other.map(|s| s.tree.len())),
        }
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_unknown_slot() {
        let json = r#"{ "bones": [ { "name": "Root" } ], "slots": { "Tail": 0 } }"#;
        assert!(matches!(
            Scene::from_json(json),
            Err(SceneError::UnknownSlot(name)) if name == "Tail"
        ));
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_slot_out_of_range() {
        let json = r#"{ "bones": [ { "name": "Root" } ], "slots": { "Head": 3 } }"#;
        assert!(matches!(
            Scene::from_json(json),
            Err(SceneError::SlotBoneOutOfRange {
                slot: BoneSlot::Head,
                index: 3,
                count: 1
            })
        ));
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_malformed_json() {
        assert!(matches!(
            Scene::from_json("{ not json"),
            Err(SceneError::Json(_))
        ));
    }
}
