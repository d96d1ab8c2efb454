//! Dasha (planetary period) vocabulary.
//!
//! Period timelines are supplied by the chart provider; this module only
//! names the hierarchy levels and resolves period rulers, including the
//! eight yoginis of the Yogini system, to grahas.

use serde::Serialize;

use crate::graha::Graha;
use crate::names::{fold_name, parse_graha};

/// Hierarchical dasha levels, major to finest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[repr(u8)]
pub enum DashaLevel {
    Mahadasha = 0,
    Antardasha = 1,
    Pratyantardasha = 2,
    Sookshmadasha = 3,
}

/// All levels in depth order.
pub const ALL_DASHA_LEVELS: [DashaLevel; 4] = [
    DashaLevel::Mahadasha,
    DashaLevel::Antardasha,
    DashaLevel::Pratyantardasha,
    DashaLevel::Sookshmadasha,
];

impl DashaLevel {
    /// Create from raw u8 depth.
    pub fn from_u8(v: u8) -> Option<Self> {
        ALL_DASHA_LEVELS.get(v as usize).copied()
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Mahadasha => "Mahadasha",
            Self::Antardasha => "Antardasha",
            Self::Pratyantardasha => "Pratyantardasha",
            Self::Sookshmadasha => "Sookshmadasha",
        }
    }

    /// Next deeper level, if any.
    pub const fn child_level(self) -> Option<Self> {
        match self {
            Self::Mahadasha => Some(Self::Antardasha),
            Self::Antardasha => Some(Self::Pratyantardasha),
            Self::Pratyantardasha => Some(Self::Sookshmadasha),
            Self::Sookshmadasha => None,
        }
    }
}

/// Dasha systems the engine accepts from providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DashaSystem {
    Vimshottari,
    Yogini,
}

/// Yogini names (0-indexed).
pub const YOGINI_NAMES: [&str; 8] = [
    "Mangala", "Pingala", "Dhanya", "Bhramari", "Bhadrika", "Ulka", "Siddha", "Sankata",
];

/// Graha lord for each Yogini.
pub const YOGINI_GRAHAS: [Graha; 8] = [
    Graha::Chandra,
    Graha::Surya,
    Graha::Guru,
    Graha::Mangal,
    Graha::Buddh,
    Graha::Shani,
    Graha::Shukra,
    Graha::Rahu,
];

/// Yogini index (0-7) for a yogini name, case and punctuation insensitive.
pub fn parse_yogini(raw: &str) -> Option<u8> {
    let key = fold_name(raw);
    YOGINI_NAMES
        .iter()
        .position(|name| fold_name(name) == key)
        .map(|i| i as u8)
}

/// Ruling graha of a yogini index. None if index >= 8.
pub fn yogini_graha(index: u8) -> Option<Graha> {
    YOGINI_GRAHAS.get(index as usize).copied()
}

/// Resolve a period ruler to a graha: graha names first, then yogini names.
///
/// "Mangala" is both a Mars spelling and the first yogini; inside a Yogini
/// timeline the yogini reading wins.
pub fn parse_period_lord(raw: &str, system: DashaSystem) -> Option<Graha> {
    match system {
        DashaSystem::Yogini => parse_yogini(raw)
            .and_then(yogini_graha)
            .or_else(|| parse_graha(raw)),
        DashaSystem::Vimshottari => parse_graha(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_from_u8() {
        assert_eq!(DashaLevel::from_u8(0), Some(DashaLevel::Mahadasha));
        assert_eq!(DashaLevel::from_u8(3), Some(DashaLevel::Sookshmadasha));
        assert_eq!(DashaLevel::from_u8(4), None);
    }

    #[test]
    fn level_child() {
        assert_eq!(
            DashaLevel::Mahadasha.child_level(),
            Some(DashaLevel::Antardasha)
        );
        assert_eq!(DashaLevel::Sookshmadasha.child_level(), None);
    }

    #[test]
    fn yogini_lookup() {
        assert_eq!(parse_yogini("sankata"), Some(7));
        assert_eq!(yogini_graha(7), Some(Graha::Rahu));
        assert_eq!(yogini_graha(8), None);
        assert_eq!(parse_yogini("Shani"), None);
    }

    #[test]
    fn period_lord_by_system() {
        assert_eq!(
            parse_period_lord("Mangala", DashaSystem::Yogini),
            Some(Graha::Chandra)
        );
        assert_eq!(
            parse_period_lord("Mangala", DashaSystem::Vimshottari),
            Some(Graha::Mangal)
        );
        assert_eq!(
            parse_period_lord("Saturn", DashaSystem::Yogini),
            Some(Graha::Shani)
        );
        assert_eq!(parse_period_lord("Ulka", DashaSystem::Vimshottari), None);
    }
}
