use serde::{Deserialize, Serialize};
use static_assertions::const_assert;

/// Laterality of a bone, read from its name or from its humanoid role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Side {
    #[default]
    Undefined,
    Left,
    Right,
}

impl Side {
    /// Two sides may be paired unless both are defined and differ.
    #[inline]
    pub fn compatible(self, other: Side) -> bool {
        self == Side::Undefined || other == Side::Undefined || self == other
    }

    #[inline]
    pub fn is_defined(self) -> bool {
        self != Side::Undefined
    }
}

/// Humanoid bone role, in the host avatar system's canonical order.
///
/// The order matters: slot classification scans slots front to back and the
/// first hit wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum BoneSlot {
    Hips = 0,
    LeftUpperLeg = 1,
    RightUpperLeg = 2,
    LeftLowerLeg = 3,
    RightLowerLeg = 4,
    LeftFoot = 5,
    RightFoot = 6,
    Spine = 7,
    Chest = 8,
    Neck = 9,
    Head = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftUpperArm = 13,
    RightUpperArm = 14,
    LeftLowerArm = 15,
    RightLowerArm = 16,
    LeftHand = 17,
    RightHand = 18,
    LeftToes = 19,
    RightToes = 20,
    LeftEye = 21,
    RightEye = 22,
    Jaw = 23,

    // Left fingers
    LeftThumbProximal = 24,
    LeftThumbIntermediate = 25,
    LeftThumbDistal = 26,
    LeftIndexProximal = 27,
    LeftIndexIntermediate = 28,
    LeftIndexDistal = 29,
    LeftMiddleProximal = 30,
    LeftMiddleIntermediate = 31,
    LeftMiddleDistal = 32,
    LeftRingProximal = 33,
    LeftRingIntermediate = 34,
    LeftRingDistal = 35,
    LeftLittleProximal = 36,
    LeftLittleIntermediate = 37,
    LeftLittleDistal = 38,

    // Right fingers
    RightThumbProximal = 39,
    RightThumbIntermediate = 40,
    RightThumbDistal = 41,
    RightIndexProximal = 42,
    RightIndexIntermediate = 43,
    RightIndexDistal = 44,
    RightMiddleProximal = 45,
    RightMiddleIntermediate = 46,
    RightMiddleDistal = 47,
    RightRingProximal = 48,
    RightRingIntermediate = 49,
    RightRingDistal = 50,
    RightLittleProximal = 51,
    RightLittleIntermediate = 52,
    RightLittleDistal = 53,

    UpperChest = 54,
}

/// Static per-slot metadata.
#[derive(Debug, Clone, Copy)]
pub struct SlotDef {
    pub slot: BoneSlot,
    /// Identity string as the host spells it
    pub name: &'static str,
    pub side: Side,
    /// Identity without side or phalanx qualifiers, lower-case
    pub body_part: &'static str,
}

const fn def(slot: BoneSlot, name: &'static str, side: Side, body_part: &'static str) -> SlotDef {
    SlotDef {
        slot,
        name,
        side,
        body_part,
    }
}

use BoneSlot as B;
use Side::{Left as L, Right as R, Undefined as U};

/// Slot table, indexed by `BoneSlot::index()`.
pub const SLOT_TABLE: [SlotDef; BoneSlot::COUNT] = [
    def(B::Hips, "Hips", U, "hips"),
    def(B::LeftUpperLeg, "LeftUpperLeg", L, "upperleg"),
    def(B::RightUpperLeg, "RightUpperLeg", R, "upperleg"),
    def(B::LeftLowerLeg, "LeftLowerLeg", L, "lowerleg"),
    def(B::RightLowerLeg, "RightLowerLeg", R, "lowerleg"),
    def(B::LeftFoot, "LeftFoot", L, "foot"),
    def(B::RightFoot, "RightFoot", R, "foot"),
    def(B::Spine, "Spine", U, "spine"),
    def(B::Chest, "Chest", U, "chest"),
    def(B::Neck, "Neck", U, "neck"),
    def(B::Head, "Head", U, "head"),
    def(B::LeftShoulder, "LeftShoulder", L, "shoulder"),
    def(B::RightShoulder, "RightShoulder", R, "shoulder"),
    def(B::LeftUpperArm, "LeftUpperArm", L, "upperarm"),
    def(B::RightUpperArm, "RightUpperArm", R, "upperarm"),
    def(B::LeftLowerArm, "LeftLowerArm", L, "lowerarm"),
    def(B::RightLowerArm, "RightLowerArm", R, "lowerarm"),
    def(B::LeftHand, "LeftHand", L, "hand"),
    def(B::RightHand, "RightHand", R, "hand"),
    def(B::LeftToes, "LeftToes", L, "toes"),
    def(B::RightToes, "RightToes", R, "toes"),
    def(B::LeftEye, "LeftEye", L, "eye"),
    def(B::RightEye, "RightEye", R, "eye"),
    def(B::Jaw, "Jaw", U, "jaw"),
    def(B::LeftThumbProximal, "LeftThumbProximal", L, "thumb"),
    def(B::LeftThumbIntermediate, "LeftThumbIntermediate", L, "thumb"),
    def(B::LeftThumbDistal, "LeftThumbDistal", L, "thumb"),
    def(B::LeftIndexProximal, "LeftIndexProximal", L, "index"),
    def(B::LeftIndexIntermediate, "LeftIndexIntermediate", L, "index"),
    def(B::LeftIndexDistal, "LeftIndexDistal", L, "index"),
    def(B::LeftMiddleProximal, "LeftMiddleProximal", L, "middle"),
    def(B::LeftMiddleIntermediate, "LeftMiddleIntermediate", L, "middle"),
    def(B::LeftMiddleDistal, "LeftMiddleDistal", L, "middle"),
    def(B::LeftRingProximal, "LeftRingProximal", L, "ring"),
    def(B::LeftRingIntermediate, "LeftRingIntermediate", L, "ring"),
    def(B::LeftRingDistal, "LeftRingDistal", L, "ring"),
    def(B::LeftLittleProximal, "LeftLittleProximal", L, "little"),
    def(B::LeftLittleIntermediate, "LeftLittleIntermediate", L, "little"),
    def(B::LeftLittleDistal, "LeftLittleDistal", L, "little"),
    def(B::RightThumbProximal, "RightThumbProximal", R, "thumb"),
    def(B::RightThumbIntermediate, "RightThumbIntermediate", R, "thumb"),
    def(B::RightThumbDistal, "RightThumbDistal", R, "thumb"),
    def(B::RightIndexProximal, "RightIndexProximal", R, "index"),
    def(B::RightIndexIntermediate, "RightIndexIntermediate", R, "index"),
    def(B::RightIndexDistal, "RightIndexDistal", R, "index"),
    def(B::RightMiddleProximal, "RightMiddleProximal", R, "middle"),
    def(B::RightMiddleIntermediate, "RightMiddleIntermediate", R, "middle"),
    def(B::RightMiddleDistal, "RightMiddleDistal", R, "middle"),
    def(B::RightRingProximal, "RightRingProximal", R, "ring"),
    def(B::RightRingIntermediate, "RightRingIntermediate", R, "ring"),
    def(B::RightRingDistal, "RightRingDistal", R, "ring"),
    def(B::RightLittleProximal, "RightLittleProximal", R, "little"),
    def(B::RightLittleIntermediate, "RightLittleIntermediate", R, "little"),
    def(B::RightLittleDistal, "RightLittleDistal", R, "little"),
    def(B::UpperChest, "UpperChest", U, "upperchest"),
];

const fn table_is_ordered() -> bool {
    let mut i = 0;
    while i < BoneSlot::COUNT {
        if SLOT_TABLE[i].slot as usize != i || BoneSlot::ALL[i] as usize != i {
            return false;
        }
        i += 1;
    }
    true
}

const_assert!(table_is_ordered());

impl BoneSlot {
    /// Total number of humanoid slots
    pub const COUNT: usize = 55;

    /// Default root of the avatar-side search
    pub const DEFAULT_SOURCE_ROOT: BoneSlot = BoneSlot::Chest;

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// All slots in canonical order
    pub const ALL: [BoneSlot; Self::COUNT] = [
        B::Hips,
        B::LeftUpperLeg,
        B::RightUpperLeg,
        B::LeftLowerLeg,
        B::RightLowerLeg,
        B::LeftFoot,
        B::RightFoot,
        B::Spine,
        B::Chest,
        B::Neck,
        B::Head,
        B::LeftShoulder,
        B::RightShoulder,
        B::LeftUpperArm,
        B::RightUpperArm,
        B::LeftLowerArm,
        B::RightLowerArm,
        B::LeftHand,
        B::RightHand,
        B::LeftToes,
        B::RightToes,
        B::LeftEye,
        B::RightEye,
        B::Jaw,
        B::LeftThumbProximal,
        B::LeftThumbIntermediate,
        B::LeftThumbDistal,
        B::LeftIndexProximal,
        B::LeftIndexIntermediate,
        B::LeftIndexDistal,
        B::LeftMiddleProximal,
        B::LeftMiddleIntermediate,
        B::LeftMiddleDistal,
        B::LeftRingProximal,
        B::LeftRingIntermediate,
        B::LeftRingDistal,
        B::LeftLittleProximal,
        B::LeftLittleIntermediate,
        B::LeftLittleDistal,
        B::RightThumbProximal,
        B::RightThumbIntermediate,
        B::RightThumbDistal,
        B::RightIndexProximal,
        B::RightIndexIntermediate,
        B::RightIndexDistal,
        B::RightMiddleProximal,
        B::RightMiddleIntermediate,
        B::RightMiddleDistal,
        B::RightRingProximal,
        B::RightRingIntermediate,
        B::RightRingDistal,
        B::RightLittleProximal,
        B::RightLittleIntermediate,
        B::RightLittleDistal,
        B::UpperChest,
    ];

    #[inline]
    pub const fn def(self) -> SlotDef {
        SLOT_TABLE[self.index()]
    }

    #[inline]
    pub const fn name(self) -> &'static str {
        self.def().name
    }

    #[inline]
    pub const fn side(self) -> Side {
        self.def().side
    }

    #[inline]
    pub const fn body_part(self) -> &'static str {
        self.def().body_part
    }

    /// Parse a slot from its identity string, ignoring case.
    pub fn from_name(name: &str) -> Option<BoneSlot> {
        SLOT_TABLE
            .iter()
            .find(|def| def.name.eq_ignore_ascii_case(name.trim()))
            .map(|def| def.slot)
    }
}

impl std::fmt::Display for BoneSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
