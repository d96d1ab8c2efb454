//! Whole-sign graha drishti (house aspects).
//!
//! Every graha aspects the 7th house from its own. Mars additionally
//! aspects the 4th and 8th, Jupiter the 5th and 9th, Saturn the 3rd and
//! 10th. The nodes take only the universal 7th-house aspect.

use serde::Serialize;

use crate::bhava::nth_house_from;
use crate::graha::Graha;

/// Which rule produced an aspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectKind {
    /// The universal 7th-house aspect.
    Opposition,
    /// Mars 4/8, Jupiter 5/9, Saturn 3/10.
    Special,
}

/// A single house aspect cast by a graha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HouseDrishti {
    /// Counted position of the target from the source (1 = same house).
    pub nth: u8,
    /// Target house (1-12).
    pub to_house: u8,
    pub kind: AspectKind,
}

/// Houses counted from the graha's own (1-based) that it aspects, ascending.
pub const fn aspect_offsets(graha: Graha) -> &'static [u8] {
    match graha {
        Graha::Mangal => &[4, 7, 8],
        Graha::Guru => &[5, 7, 9],
        Graha::Shani => &[3, 7, 10],
        _ => &[7],
    }
}

/// Classify the `nth`-house aspect of a graha; None if it casts none there.
pub fn aspect_kind(graha: Graha, nth: u8) -> Option<AspectKind> {
    if nth == 7 {
        Some(AspectKind::Opposition)
    } else if aspect_offsets(graha).contains(&nth) {
        Some(AspectKind::Special)
    } else {
        None
    }
}

/// All house aspects cast by a graha standing in `from_house`.
pub fn house_drishti(graha: Graha, from_house: u8) -> Vec<HouseDrishti> {
    aspect_offsets(graha)
        .iter()
        .map(|&nth| HouseDrishti {
            nth,
            to_house: nth_house_from(from_house, nth),
            kind: if nth == 7 {
                AspectKind::Opposition
            } else {
                AspectKind::Special
            },
        })
        .collect()
}

/// Whether a graha in `from_house` aspects `target_house`.
pub fn aspects_house(graha: Graha, from_house: u8, target_house: u8) -> bool {
    house_drishti(graha, from_house)
        .iter()
        .any(|d| d.to_house == target_house)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graha::ALL_GRAHAS;

    #[test]
    fn everyone_aspects_seventh() {
        for g in ALL_GRAHAS {
            assert_eq!(aspect_kind(g, 7), Some(AspectKind::Opposition));
            assert!(aspects_house(g, 1, 7));
        }
    }

    #[test]
    fn mars_special() {
        let targets: Vec<u8> = house_drishti(Graha::Mangal, 1)
            .iter()
            .map(|d| d.to_house)
            .collect();
        assert_eq!(targets, vec![4, 7, 8]);
        assert_eq!(aspect_kind(Graha::Mangal, 4), Some(AspectKind::Special));
    }

    #[test]
    fn jupiter_special_wraps() {
        let targets: Vec<u8> = house_drishti(Graha::Guru, 10)
            .iter()
            .map(|d| d.to_house)
            .collect();
        assert_eq!(targets, vec![2, 4, 6]);
    }

    #[test]
    fn saturn_special() {
        assert!(aspects_house(Graha::Shani, 1, 3));
        assert!(aspects_house(Graha::Shani, 1, 10));
        assert!(!aspects_house(Graha::Shani, 1, 4));
    }

    #[test]
    fn no_special_for_others() {
        for g in [
            Graha::Surya,
            Graha::Chandra,
            Graha::Buddh,
            Graha::Shukra,
            Graha::Rahu,
            Graha::Ketu,
        ] {
            assert_eq!(house_drishti(g, 3).len(), 1);
            assert_eq!(aspect_kind(g, 5), None);
        }
    }
}
