//! Viparita raja, Gajakesari and Budhaditya.

use phala_base::{Graha, house_of, is_dusthana, is_kendra};

use super::{RuleHit, factor};
use crate::fact_sheet::FactSheet;

/// A dusthana lord placed in a different dusthana.
///
/// Fires once per owned dusthana. Named Harsha (6th lord), Sarala (8th) or
/// Vimala (12th).
pub(super) fn viparita_raja(facts: &FactSheet) -> Vec<RuleHit> {
    let mut hits = Vec::new();
    for p in &facts.planets {
        if !is_dusthana(p.house) {
            continue;
        }
        for &owned in p.lord_of.iter().filter(|h| is_dusthana(**h)) {
            if owned == p.house {
                continue;
            }
            let name = match owned {
                6 => "Harsha",
                8 => "Sarala",
                _ => "Vimala",
            };
            hits.push(RuleHit {
                suffix: Some(format!("{owned}_in_{}", p.house)),
                label: Some(format!("Viparita Raja Yoga ({name})")),
                planets: vec![p.planet],
                factors: vec![
                    factor("planet", p.planet.english_name()),
                    factor("lord_of", owned),
                    factor("placed", p.house),
                ],
                why: format!(
                    "{}, lord of dusthana {owned}, sits in dusthana {}",
                    p.planet.english_name(),
                    p.house
                ),
                ..Default::default()
            });
        }
    }
    hits
}

/// Jupiter in a kendra counted from the Moon.
pub(super) fn gajakesari(facts: &FactSheet) -> Vec<RuleHit> {
    let (Some(moon), Some(jup)) = (facts.sign_of(Graha::Chandra), facts.sign_of(Graha::Guru))
    else {
        return Vec::new();
    };
    let from_moon = house_of(jup, moon);
    if !is_kendra(from_moon) {
        return Vec::new();
    }
    vec![RuleHit {
        planets: vec![Graha::Chandra, Graha::Guru],
        factors: vec![factor("jupiter_from_moon", from_moon)],
        why: format!("Jupiter is in house {from_moon} counted from the Moon, a kendra"),
        ..Default::default()
    }]
}

/// Sun and Mercury in the same sign.
pub(super) fn budhaditya(facts: &FactSheet) -> Vec<RuleHit> {
    if !facts.conjunct(Graha::Surya, Graha::Buddh) {
        return Vec::new();
    }
    let sign = facts.sign_of(Graha::Surya).map(|s| s.western_name()).unwrap_or_default();
    let house = facts.house_of(Graha::Surya).unwrap_or_default();
    vec![RuleHit {
        planets: vec![Graha::Surya, Graha::Buddh],
        factors: vec![factor("sign", sign), factor("house", house)],
        why: format!("Sun and Mercury together in {sign} (house {house})"),
        ..Default::default()
    }]
}
