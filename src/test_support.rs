//! Shared fixtures for unit tests

use glam::{EulerRot, Quat};

use crate::bone::{BoneSlot, BoneTree, Frame, NodeId};
use crate::skeleton::HumanoidRig;

/// Compare two rotations, treating `q` and `-q` as equal.
pub fn same_rotation(a: Quat, b: Quat, eps: f32) -> bool {
    a.abs_diff_eq(b, eps) || a.abs_diff_eq(-b, eps)
}

fn rotated(y: f32, x: f32, z: f32) -> Frame {
    Frame::from_rotation(Quat::from_euler(EulerRot::YXZ, y, x, z))
}

/// Small avatar upper body plus a left prosthetic arm, in one tree.
///
/// The right arm is listed before the left one so side gating, not
/// enumeration order, has to pick the left bones.
pub struct ArmFixture {
    pub tree: BoneTree,
    pub rig: HumanoidRig,
    pub avatar_root: NodeId,
    pub chest: NodeId,
    pub avatar_sleeve: NodeId,
    pub prosthetic_root: NodeId,
    pub upper_arm: NodeId,
    pub lower_arm: NodeId,
    pub hand: NodeId,
    pub sleeve: NodeId,
    pub unnamed: NodeId,
}

impl ArmFixture {
    pub fn new() -> Self {
        let mut tree = BoneTree::new();
        let mut rig = HumanoidRig::new();

        let mut bound = |tree: &mut BoneTree,
                         parent: NodeId,
                         name: &str,
                         slot: BoneSlot,
                         frame: Frame|
         -> NodeId {
            let id = tree
                .add_child(parent, name, frame)
                .expect("parent exists");
            rig.bind(slot, id);
            id
        };

        let avatar_root = tree.add_root("Armature", Frame::IDENTITY);
        let hips = bound(&mut tree, avatar_root, "Hips", BoneSlot::Hips, Frame::IDENTITY);
        let spine = bound(&mut tree, hips, "Spine", BoneSlot::Spine, Frame::IDENTITY);
        let chest = bound(&mut tree, spine, "Chest", BoneSlot::Chest, Frame::IDENTITY);
        let neck = bound(&mut tree, chest, "Neck", BoneSlot::Neck, Frame::IDENTITY);
        bound(&mut tree, neck, "Head", BoneSlot::Head, Frame::IDENTITY);

        let shoulder_r = bound(
            &mut tree,
            chest,
            "Shoulder_R",
            BoneSlot::RightShoulder,
            rotated(0.0, 0.0, -0.1),
        );
        let upper_r = bound(
            &mut tree,
            shoulder_r,
            "UpperArm_R",
            BoneSlot::RightUpperArm,
            rotated(-0.4, 0.2, -1.2),
        );
        let lower_r = bound(
            &mut tree,
            upper_r,
            "LowerArm_R",
            BoneSlot::RightLowerArm,
            rotated(-0.5, 0.1, -1.1),
        );
        bound(
            &mut tree,
            lower_r,
            "Hand_R",
            BoneSlot::RightHand,
            rotated(-0.6, 0.0, -1.0),
        );

        let shoulder_l = bound(
            &mut tree,
            chest,
            "Shoulder_L",
            BoneSlot::LeftShoulder,
            rotated(0.0, 0.0, 0.1),
        );
        let upper_l = bound(
            &mut tree,
            shoulder_l,
            "UpperArm_L",
            BoneSlot::LeftUpperArm,
            rotated(0.4, -0.2, 1.2),
        );
        let lower_l = bound(
            &mut tree,
            upper_l,
            "LowerArm_L",
            BoneSlot::LeftLowerArm,
            rotated(0.5, -0.1, 1.1),
        );
        bound(
            &mut tree,
            lower_l,
            "Hand_L",
            BoneSlot::LeftHand,
            rotated(0.6, 0.0, 1.0),
        );
        let avatar_sleeve = tree
            .add_child(shoulder_l, "Sleeve_L", rotated(0.1, 0.0, 0.3))
            .expect("parent exists");

        let prosthetic_root = tree.add_root("Prosthetic", Frame::IDENTITY);
        let upper_arm = tree
            .add_child(prosthetic_root, "upperarm_L", rotated(0.9, 0.3, 0.7))
            .expect("parent exists");
        let lower_arm = tree
            .add_child(upper_arm, "lowerarm_L", rotated(-1.3, 0.6, 2.4))
            .expect("parent exists");
        let hand = tree
            .add_child(lower_arm, "hand_L", rotated(2.9, -0.8, -2.2))
            .expect("parent exists");
        let sleeve = tree
            .add_child(upper_arm, "sleeve_L", rotated(0.2, 0.2, 0.2))
            .expect("parent exists");
        let unnamed = tree
            .add_child(prosthetic_root, "Bone003", Frame::IDENTITY)
            .expect("parent exists");

        Self {
            tree,
            rig,
            avatar_root,
            chest,
            avatar_sleeve,
            prosthetic_root,
            upper_arm,
            lower_arm,
            hand,
            sleeve,
            unnamed,
        }
    }
}
