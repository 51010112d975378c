pub mod euler;
pub mod slot;
pub mod tree;

pub use euler::*;
pub use slot::*;
pub use tree::*;

#[cfg(test)]
mod tests {
    use super::*;

    use crate::test_support::same_rotation;
    use glam::Quat;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use wasm_bindgen_test::*;

    const EPSILON: f32 = 1e-3;

    #[test]
    #[wasm_bindgen_test]
    fn test_slot_table_order() {
        for (i, slot) in BoneSlot::ALL.iter().enumerate() {
            assert_eq!(slot.index(), i);
            assert_eq!(SLOT_TABLE[i].slot, *slot);
        }
        assert_eq!(BoneSlot::Hips.index(), 0);
        assert_eq!(BoneSlot::UpperChest.index(), BoneSlot::COUNT - 1);
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_slot_sides_follow_names() {
        for slot in BoneSlot::ALL {
            let expected = if slot.name().starts_with("Left") {
                Side::Left
            } else if slot.name().starts_with("Right") {
                Side::Right
            } else {
                Side::Undefined
            };
            assert_eq!(slot.side(), expected, "{}", slot);
        }
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_slot_body_parts() {
        assert_eq!(BoneSlot::LeftUpperArm.body_part(), "upperarm");
        assert_eq!(BoneSlot::RightHand.body_part(), "hand");
        assert_eq!(BoneSlot::LeftThumbDistal.body_part(), "thumb");
        assert_eq!(BoneSlot::Chest.body_part(), "chest");

        for slot in BoneSlot::ALL {
            let lowered = slot.name().to_lowercase();
            assert!(lowered.contains(slot.body_part()), "{}", slot);
        }
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_slot_from_name() {
        assert_eq!(BoneSlot::from_name("LeftHand"), Some(BoneSlot::LeftHand));
        assert_eq!(BoneSlot::from_name("upperchest"), Some(BoneSlot::UpperChest));
        assert_eq!(BoneSlot::from_name("Tail"), None);

        for slot in BoneSlot::ALL {
            assert_eq!(BoneSlot::from_name(&slot.to_string()), Some(slot));
        }
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_delta_angle() {
        assert_eq!(delta_angle(0.0), 0.0);
        assert_eq!(delta_angle(180.0), 180.0);
        assert_eq!(delta_angle(-180.0), 180.0);
        assert_eq!(delta_angle(540.0), 180.0);
        assert_eq!(delta_angle(190.0), -170.0);
        assert_eq!(delta_angle(-90.0), -90.0);
        assert_eq!(delta_angle(720.0), 0.0);
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_euler_host_order() {
        // 90 deg about Y alone
        let yaw = EulerAngles::new(0.0, 90.0, 0.0).to_quat();
        let expected = Quat::from_rotation_y(90f32.to_radians());
        assert!(same_rotation(yaw, expected, 1e-6));

        // Z is applied first, then X, then Y
        let q = EulerAngles::new(30.0, 20.0, 10.0).to_quat();
        let composed = Quat::from_rotation_y(20f32.to_radians())
            * Quat::from_rotation_x(30f32.to_radians())
            * Quat::from_rotation_z(10f32.to_radians());
        assert!(same_rotation(q, composed, 1e-5));
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_rotation_offset_reconstructs_target() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            let source = EulerAngles::new(
                rng.random_range(-80.0..80.0),
                rng.random_range(-180.0..180.0),
                rng.random_range(-180.0..180.0),
            )
            .to_quat();
            let target = EulerAngles::new(
                rng.random_range(-80.0..80.0),
                rng.random_range(-180.0..180.0),
                rng.random_range(-180.0..180.0),
            )
            .to_quat();

            let offset = rotation_offset(source, target);
            for axis in offset.to_array() {
                assert!(axis > -180.0 && axis <= 180.0, "axis {} out of range", axis);
            }
            assert!(same_rotation(source * offset.to_quat(), target, EPSILON));
        }
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_rotation_offset_identity() {
        let q = Quat::from_rotation_x(0.4) * Quat::from_rotation_y(-1.1);
        let offset = rotation_offset(q, q);
        for axis in offset.to_array() {
            assert!(axis.abs() < EPSILON);
        }
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_tree_descendants_preorder() {
        let mut tree = BoneTree::new();
        let root = tree.add_root("Root", Frame::IDENTITY);
        let a = tree.add_child(root, "A", Frame::IDENTITY).unwrap();
        let b = tree.add_child(root, "B", Frame::IDENTITY).unwrap();
        let a1 = tree.add_child(a, "A1", Frame::IDENTITY).unwrap();
        let other = tree.add_root("Other", Frame::IDENTITY);

        assert_eq!(tree.descendants(root), vec![root, a, a1, b]);
        assert_eq!(tree.descendants(a), vec![a, a1]);
        assert!(tree.descendants(NodeId(99)).is_empty());

        assert!(tree.is_descendant_of(a1, root));
        assert!(tree.is_descendant_of(a, a));
        assert!(!tree.is_descendant_of(b, a));
        assert!(!tree.is_descendant_of(other, root));

        assert_eq!(tree.add_child(NodeId(99), "Orphan", Frame::IDENTITY), None);
        assert_eq!(tree.find_by_name("A1"), Some(a1));
        assert_eq!(tree.name(NodeId(99)), "");
    }
}
