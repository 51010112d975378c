//! Bone-name heuristics: similarity scoring and side detection
//!
//! Everything here is case-insensitive and pure.

use crate::bone::Side;

/// Anatomical keywords counted by the keyword-overlap term of `score`.
pub const KEYWORDS: [&str; 21] = [
    "shoulder", "upper", "lower", "hand", "thumb", "index", "middle", "ring", "little", "pinky",
    "arm", "elbow", "wrist", "clavicle", "sleeve", "forearm", "upperarm", "fingers", "phalange",
    "digit", "carpals",
];

/// Substrings marking a left-side bone, tested in order.
pub const LEFT_INDICATORS: [&str; 15] = [
    "left",
    "l_",
    "_l",
    "-l",
    ".l",
    "lhand",
    "larm",
    "lshoulder",
    "l.001",
    "hand_l",
    "arm_l",
    "lowerarm.l",
    "upperarm.l",
    "elbow_l",
    "wrist_l",
];

/// Substrings marking a right-side bone, tested after the left ones.
pub const RIGHT_INDICATORS: [&str; 15] = [
    "right",
    "r_",
    "_r",
    "-r",
    ".r",
    "rhand",
    "rarm",
    "rshoulder",
    "r.001",
    "hand_r",
    "arm_r",
    "lowerarm.r",
    "upperarm.r",
    "elbow_r",
    "wrist_r",
];

/// Side words and separator markers removed by `strip_side_markers`.
const SIDE_MARKERS: [&str; 10] = [
    "left", "right", "l_", "r_", "_l", "_r", "-l", "-r", ".l", ".r",
];

/// Weight of the edit-distance term; the keyword term gets the rest.
const EDIT_WEIGHT: f32 = 0.7;
const KEYWORD_WEIGHT: f32 = 0.3;

/// Classic Levenshtein distance over chars (unit cost insert/delete/substitute).
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Two-row dynamic programming table
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// `1 - distance / longer length`, 0 when both names are empty.
pub fn edit_similarity(a: &str, b: &str) -> f32 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 0.0;
    }
    1.0 - levenshtein(a, b) as f32 / longest as f32
}

/// Share of keywords present in both names among those present in either.
pub fn keyword_overlap(a: &str, b: &str) -> f32 {
    let mut common = 0u32;
    let mut total = 0u32;

    for keyword in KEYWORDS {
        let in_a = a.contains(keyword);
        let in_b = b.contains(keyword);
        if in_a || in_b {
            total += 1;
            if in_a && in_b {
                common += 1;
            }
        }
    }

    if total == 0 {
        0.0
    } else {
        common as f32 / total as f32
    }
}

/// Similarity of two bone names in [0, 1].
///
/// Both terms are symmetric, so `score(a, b) == score(b, a)`.
pub fn score(a: &str, b: &str) -> f32 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    EDIT_WEIGHT * edit_similarity(&a, &b) + KEYWORD_WEIGHT * keyword_overlap(&a, &b)
}

/// Side implied by a bone name; left indicators win over right ones.
pub fn side(name: &str) -> Side {
    let name = name.to_lowercase();
    if LEFT_INDICATORS.iter().any(|marker| name.contains(marker)) {
        Side::Left
    } else if RIGHT_INDICATORS.iter().any(|marker| name.contains(marker)) {
        Side::Right
    } else {
        Side::Undefined
    }
}

/// Name with side words and side separators removed.
///
/// Case-sensitive: only lower-case markers are stripped.
pub fn strip_side_markers(name: &str) -> String {
    SIDE_MARKERS
        .iter()
        .fold(name.to_string(), |acc, marker| acc.replace(marker, ""))
}

/// Lower-cased name with only the words "left" and "right" removed.
pub fn strip_side_words(name: &str) -> String {
    name.to_lowercase().replace("left", "").replace("right", "")
}
