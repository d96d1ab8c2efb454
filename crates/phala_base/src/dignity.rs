//! Dignity tables and natural (naisargika) friendship.
//!
//! Dignity here is the four-way sign classification the fact engine works
//! with: exalted, debilitated, own sign, or neutral. Priority is
//! exaltation > debilitation > own sign, which keeps the result exclusive
//! for Mercury (exalted in and lord of Kanya).
//!
//! Clean-room tables from BPHS. Rahu/Ketu carry no dignity.

use serde::Serialize;

use crate::graha::Graha;
use crate::rashi::Rashi;

// ---------------------------------------------------------------------------
// Exaltation, debilitation, own signs
// ---------------------------------------------------------------------------

/// Exaltation sign for sapta grahas. None for Rahu/Ketu.
pub const fn exaltation_sign(graha: Graha) -> Option<Rashi> {
    match graha {
        Graha::Surya => Some(Rashi::Mesha),
        Graha::Chandra => Some(Rashi::Vrishabha),
        Graha::Mangal => Some(Rashi::Makara),
        Graha::Buddh => Some(Rashi::Kanya),
        Graha::Guru => Some(Rashi::Karka),
        Graha::Shukra => Some(Rashi::Meena),
        Graha::Shani => Some(Rashi::Tula),
        Graha::Rahu | Graha::Ketu => None,
    }
}

/// Debilitation sign (7th from exaltation). None for Rahu/Ketu.
pub fn debilitation_sign(graha: Graha) -> Option<Rashi> {
    exaltation_sign(graha).map(|r| r.nth_from(7))
}

/// Own-sign rashis. Empty for Rahu/Ketu.
pub const fn own_signs(graha: Graha) -> &'static [Rashi] {
    match graha {
        Graha::Surya => &[Rashi::Simha],
        Graha::Chandra => &[Rashi::Karka],
        Graha::Mangal => &[Rashi::Mesha, Rashi::Vrischika],
        Graha::Buddh => &[Rashi::Mithuna, Rashi::Kanya],
        Graha::Guru => &[Rashi::Dhanu, Rashi::Meena],
        Graha::Shukra => &[Rashi::Vrishabha, Rashi::Tula],
        Graha::Shani => &[Rashi::Makara, Rashi::Kumbha],
        Graha::Rahu | Graha::Ketu => &[],
    }
}

/// Dignity of a graha in a rashi.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Dignity {
    Exalted,
    Debilitated,
    Own,
    Neutral,
}

pub const ALL_DIGNITIES: [Dignity; 4] = [
    Dignity::Exalted,
    Dignity::Debilitated,
    Dignity::Own,
    Dignity::Neutral,
];

impl Dignity {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Exalted => "Exalted",
            Self::Debilitated => "Debilitated",
            Self::Own => "Own",
            Self::Neutral => "Neutral",
        }
    }

    /// Exalted or own sign.
    pub const fn is_dignified(self) -> bool {
        matches!(self, Self::Exalted | Self::Own)
    }
}

/// Classify a graha's dignity in a rashi. Always Neutral for Rahu/Ketu.
pub fn dignity_in_sign(graha: Graha, rashi: Rashi) -> Dignity {
    if exaltation_sign(graha) == Some(rashi) {
        return Dignity::Exalted;
    }
    if debilitation_sign(graha) == Some(rashi) {
        return Dignity::Debilitated;
    }
    if own_signs(graha).contains(&rashi) {
        return Dignity::Own;
    }
    Dignity::Neutral
}

// ---------------------------------------------------------------------------
// Natural friendship (naisargika maitri)
// ---------------------------------------------------------------------------

/// Natural relationship between two grahas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NaisargikaMaitri {
    Friend,
    Neutral,
    Enemy,
}

/// Natural friends of a graha.
///
/// Sapta grahas follow BPHS. Node rows are an extension: Rahu befriends
/// Mercury, Venus, Saturn; Ketu befriends Mars, Venus, Saturn.
pub const fn natural_friends(graha: Graha) -> &'static [Graha] {
    use Graha::*;
    match graha {
        Surya => &[Chandra, Mangal, Guru],
        Chandra => &[Surya, Buddh],
        Mangal => &[Surya, Chandra, Guru],
        Buddh => &[Surya, Shukra],
        Guru => &[Surya, Chandra, Mangal],
        Shukra => &[Buddh, Shani],
        Shani => &[Buddh, Shukra],
        Rahu => &[Buddh, Shukra, Shani],
        Ketu => &[Mangal, Shukra, Shani],
    }
}

/// Natural neutrals of a graha. Anything in neither list (and not the graha
/// itself) is an enemy.
pub const fn natural_neutrals(graha: Graha) -> &'static [Graha] {
    use Graha::*;
    match graha {
        Surya => &[Buddh],
        Chandra => &[Mangal, Guru, Shukra, Shani],
        Mangal => &[Shukra, Shani],
        Buddh => &[Mangal, Guru, Shani],
        Guru => &[Shani],
        Shukra => &[Mangal, Guru],
        Shani => &[Guru],
        Rahu => &[Guru, Ketu],
        Ketu => &[Buddh, Guru, Rahu],
    }
}

/// Natural relationship of `graha` towards `other`.
///
/// Position independent. A classical graha's view of a node mirrors the
/// node's own row, since the classical tables do not list the nodes.
pub fn naisargika_maitri(graha: Graha, other: Graha) -> NaisargikaMaitri {
    if !graha.is_node() && other.is_node() {
        return naisargika_maitri(other, graha);
    }
    if natural_friends(graha).contains(&other) {
        NaisargikaMaitri::Friend
    } else if graha == other || natural_neutrals(graha).contains(&other) {
        NaisargikaMaitri::Neutral
    } else {
        NaisargikaMaitri::Enemy
    }
}
