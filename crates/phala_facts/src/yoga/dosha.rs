//! Affliction patterns (doshas).

use phala_base::{
    Graha, SAPTA_GRAHAS, house_of, is_dusthana, is_natural_malefic, nth_house_from,
};

use super::{RuleHit, factor};
use crate::derived::StrengthBand;
use crate::fact_sheet::FactSheet;

/// Houses in which Mars causes Mangal dosha, from lagna or from the Moon.
const MANGAL_HOUSES: [u8; 6] = [1, 2, 4, 7, 8, 12];

/// Kaal sarp variants by Rahu's house.
const KAAL_SARP_NAMES: [&str; 12] = [
    "Anant",
    "Kulik",
    "Vasuki",
    "Shankhpal",
    "Padma",
    "Mahapadma",
    "Takshak",
    "Karkotak",
    "Shankhachood",
    "Ghatak",
    "Vishdhar",
    "Sheshnag",
];

/// Minimum number of grahas in dusthanas for a cluster.
const DUSTHANA_CLUSTER_MIN: usize = 4;

fn names(grahas: &[Graha]) -> String {
    grahas
        .iter()
        .map(|g| g.english_name())
        .collect::<Vec<_>>()
        .join(", ")
}

pub(super) fn mangal_dosha(facts: &FactSheet) -> Vec<RuleHit> {
    let Some(mars) = facts.planet(Graha::Mangal) else {
        return Vec::new();
    };
    let mut factors = Vec::new();
    let mut reasons = Vec::new();
    if MANGAL_HOUSES.contains(&mars.house) {
        factors.push(factor("from_lagna", mars.house));
        reasons.push(format!("house {} from the ascendant", mars.house));
    }
    if let Some(moon) = facts.sign_of(Graha::Chandra) {
        let from_moon = house_of(mars.sign, moon);
        if MANGAL_HOUSES.contains(&from_moon) {
            factors.push(factor("from_moon", from_moon));
            reasons.push(format!("house {from_moon} from the Moon"));
        }
    }
    if factors.is_empty() {
        return Vec::new();
    }
    let strength_hint = if factors.len() == 2 {
        StrengthBand::Strong
    } else {
        StrengthBand::Medium
    };
    vec![RuleHit {
        planets: vec![Graha::Mangal],
        factors,
        why: format!("Mars in {}", reasons.join(" and ")),
        strength_hint: Some(strength_hint),
        ..Default::default()
    }]
}

/// All seven classical grahas strictly on one side of the nodal axis.
pub(super) fn kaal_sarp(facts: &FactSheet) -> Vec<RuleHit> {
    let (Some(rahu), Some(ketu)) = (facts.planet(Graha::Rahu), facts.planet(Graha::Ketu)) else {
        return Vec::new();
    };
    let ketu_offset = house_of(ketu.sign, rahu.sign) - 1;
    if ketu_offset == 0 {
        return Vec::new();
    }
    let mut offsets = Vec::with_capacity(SAPTA_GRAHAS.len());
    for g in SAPTA_GRAHAS {
        let Some(sign) = facts.sign_of(g) else {
            return Vec::new();
        };
        offsets.push(house_of(sign, rahu.sign) - 1);
    }
    let rahu_to_ketu = offsets.iter().all(|&d| d > 0 && d < ketu_offset);
    let ketu_to_rahu = offsets.iter().all(|&d| d > ketu_offset);
    if !rahu_to_ketu && !ketu_to_rahu {
        return Vec::new();
    }
    let variant = KAAL_SARP_NAMES[usize::from(rahu.house - 1)];
    let arc = if rahu_to_ketu { "rahu_to_ketu" } else { "ketu_to_rahu" };
    vec![RuleHit {
        label: Some(format!("Kaal Sarp Dosha ({variant})")),
        planets: vec![Graha::Rahu, Graha::Ketu],
        factors: vec![
            factor("arc", arc),
            factor("rahu_house", rahu.house),
            factor("ketu_house", ketu.house),
        ],
        why: format!(
            "all seven classical planets lie between Rahu (house {}) and Ketu (house {})",
            rahu.house, ketu.house
        ),
        ..Default::default()
    }]
}

/// Sun or Moon sharing a sign with a node.
pub(super) fn grahan_dosha(facts: &FactSheet) -> Vec<RuleHit> {
    let mut planets = Vec::new();
    let mut pairs = Vec::new();
    for luminary in [Graha::Surya, Graha::Chandra] {
        for node in [Graha::Rahu, Graha::Ketu] {
            if facts.conjunct(luminary, node) {
                pairs.push(format!("{}+{}", luminary.english_name(), node.english_name()));
                for g in [luminary, node] {
                    if !planets.contains(&g) {
                        planets.push(g);
                    }
                }
            }
        }
    }
    if pairs.is_empty() {
        return Vec::new();
    }
    vec![RuleHit {
        why: format!("luminary conjoined with a node: {}", pairs.join(", ")),
        factors: pairs.iter().map(|p| factor("conjunction", p)).collect(),
        planets,
        ..Default::default()
    }]
}

fn conjunction(facts: &FactSheet, a: Graha, b: Graha) -> Vec<RuleHit> {
    if !facts.conjunct(a, b) {
        return Vec::new();
    }
    let house = facts.house_of(a).unwrap_or_default();
    vec![RuleHit {
        planets: vec![a, b],
        factors: vec![factor("house", house)],
        why: format!(
            "{} and {} together in house {house}",
            a.english_name(),
            b.english_name()
        ),
        ..Default::default()
    }]
}

pub(super) fn shrapit_dosha(facts: &FactSheet) -> Vec<RuleHit> {
    conjunction(facts, Graha::Shani, Graha::Rahu)
}

pub(super) fn vish_dosha(facts: &FactSheet) -> Vec<RuleHit> {
    conjunction(facts, Graha::Shani, Graha::Chandra)
}

/// Two or more natural malefics across the 2nd and 11th houses.
pub(super) fn daridra_dosha(facts: &FactSheet) -> Vec<RuleHit> {
    let malefics: Vec<Graha> = facts
        .planets
        .iter()
        .filter(|p| (p.house == 2 || p.house == 11) && is_natural_malefic(p.planet))
        .map(|p| p.planet)
        .collect();
    if malefics.len() < 2 {
        return Vec::new();
    }
    vec![RuleHit {
        factors: vec![factor("malefics", malefics.len())],
        why: format!("malefics in the houses of wealth and gains: {}", names(&malefics)),
        planets: malefics,
        ..Default::default()
    }]
}

/// Moon with no classical graha in the 2nd or 12th from it.
///
/// Needs all seven classical grahas; an incomplete chart cannot prove the
/// Moon is unsupported.
pub(super) fn kemadruma(facts: &FactSheet) -> Vec<RuleHit> {
    if !SAPTA_GRAHAS.iter().all(|&g| facts.is_present(g)) {
        return Vec::new();
    }
    let Some(moon) = facts.house_of(Graha::Chandra) else {
        return Vec::new();
    };
    let second = nth_house_from(moon, 2);
    let twelfth = nth_house_from(moon, 12);
    let supported = SAPTA_GRAHAS
        .iter()
        .filter(|&&g| g != Graha::Chandra)
        .filter_map(|&g| facts.house_of(g))
        .any(|h| h == second || h == twelfth);
    if supported {
        return Vec::new();
    }
    vec![RuleHit {
        planets: vec![Graha::Chandra],
        factors: vec![factor("moon_house", moon)],
        why: format!("no classical planet in house {twelfth} or {second} beside the Moon"),
        ..Default::default()
    }]
}

pub(super) fn guru_chandal(facts: &FactSheet) -> Vec<RuleHit> {
    let nodes: Vec<Graha> = [Graha::Rahu, Graha::Ketu]
        .into_iter()
        .filter(|&n| facts.conjunct(Graha::Guru, n))
        .collect();
    if nodes.is_empty() {
        return Vec::new();
    }
    let house = facts.house_of(Graha::Guru).unwrap_or_default();
    let mut planets = vec![Graha::Guru];
    planets.extend(&nodes);
    vec![RuleHit {
        factors: vec![factor("house", house)],
        why: format!("Jupiter conjoined with {} in house {house}", names(&nodes)),
        planets,
        ..Default::default()
    }]
}

/// Natural malefics on both sides of the 10th house.
pub(super) fn karma_papakartari(facts: &FactSheet) -> Vec<RuleHit> {
    let malefics_in = |house: u8| -> Vec<Graha> {
        facts
            .occupants(house)
            .into_iter()
            .filter(|&g| is_natural_malefic(g))
            .collect()
    };
    let ninth = malefics_in(9);
    let eleventh = malefics_in(11);
    if ninth.is_empty() || eleventh.is_empty() {
        return Vec::new();
    }
    let why = format!(
        "10th house hemmed by malefics: {} in 9, {} in 11",
        names(&ninth),
        names(&eleventh)
    );
    let mut planets = ninth;
    planets.extend(eleventh);
    vec![RuleHit {
        factors: vec![factor("hemmed", 10)],
        planets,
        why,
        ..Default::default()
    }]
}

pub(super) fn dusthana_cluster(facts: &FactSheet) -> Vec<RuleHit> {
    let placed: Vec<Graha> = facts
        .planets
        .iter()
        .filter(|p| is_dusthana(p.house))
        .map(|p| p.planet)
        .collect();
    if placed.len() < DUSTHANA_CLUSTER_MIN {
        return Vec::new();
    }
    vec![RuleHit {
        factors: vec![factor("count", placed.len())],
        why: format!("{} planets in houses 6, 8 and 12: {}", placed.len(), names(&placed)),
        planets: placed,
        ..Default::default()
    }]
}

/// Saturn in the 8th counted from the Moon.
pub(super) fn ashtama_shani(facts: &FactSheet) -> Vec<RuleHit> {
    let (Some(moon), Some(sat)) = (facts.sign_of(Graha::Chandra), facts.sign_of(Graha::Shani))
    else {
        return Vec::new();
    };
    if house_of(sat, moon) != 8 {
        return Vec::new();
    }
    vec![RuleHit {
        planets: vec![Graha::Shani],
        factors: vec![factor("saturn_from_moon", 8)],
        why: "Saturn is eighth from the Moon".to_string(),
        ..Default::default()
    }]
}
