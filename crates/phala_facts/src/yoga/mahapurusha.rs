//! Pancha mahapurusha yogas.
//!
//! Mars, Mercury, Jupiter, Venus or Saturn in a kendra from the ascendant,
//! in its own sign or exalted. Each yoga belongs to exactly one graha.

use phala_base::{Dignity, Graha, is_kendra};

use super::{RuleHit, factor};
use crate::derived::StrengthBand;
use crate::fact_sheet::FactSheet;

fn mahapurusha(facts: &FactSheet, graha: Graha, name: &str) -> Vec<RuleHit> {
    let Some(p) = facts.planet(graha) else {
        return Vec::new();
    };
    if !is_kendra(p.house) || !p.dignity.is_dignified() {
        return Vec::new();
    }
    let strength_hint = match p.dignity {
        Dignity::Exalted => StrengthBand::Strong,
        _ => StrengthBand::Medium,
    };
    vec![RuleHit {
        planets: vec![graha],
        factors: vec![
            factor("planet", graha.english_name()),
            factor("kendra", p.house),
            factor("dignity", p.dignity.name()),
            factor("sign", p.sign.western_name()),
        ],
        why: format!(
            "{} is {} in {} in house {}, a kendra: {name} yoga",
            graha.english_name(),
            if p.dignity == Dignity::Exalted { "exalted" } else { "in its own sign" },
            p.sign.western_name(),
            p.house
        ),
        strength_hint: Some(strength_hint),
        ..Default::default()
    }]
}

pub(super) fn ruchaka(facts: &FactSheet) -> Vec<RuleHit> {
    mahapurusha(facts, Graha::Mangal, "Ruchaka")
}

pub(super) fn bhadra(facts: &FactSheet) -> Vec<RuleHit> {
    mahapurusha(facts, Graha::Buddh, "Bhadra")
}

pub(super) fn hamsa(facts: &FactSheet) -> Vec<RuleHit> {
    mahapurusha(facts, Graha::Guru, "Hamsa")
}

pub(super) fn malavya(facts: &FactSheet) -> Vec<RuleHit> {
    mahapurusha(facts, Graha::Shukra, "Malavya")
}

pub(super) fn shasha(facts: &FactSheet) -> Vec<RuleHit> {
    mahapurusha(facts, Graha::Shani, "Shasha")
}
