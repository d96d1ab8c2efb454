//! Derived analytics over a fact sheet: house table, natural relations, strengths.

use phala_base::{
    ALL_GRAHAS, AspectKind, Dignity, Graha, NaisargikaMaitri, Rashi, house_lords,
    naisargika_maitri, sign_of_house,
};
use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::fact_sheet::FactSheet;

/// Aspect received by a house.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomingAspect {
    pub from: Graha,
    pub from_house: u8,
    #[serde(rename = "type")]
    pub kind: AspectKind,
}

/// Occupancy and aspect summary of one house.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseSummary {
    pub house: u8,
    #[serde(rename = "signId")]
    pub sign: Rashi,
    pub lord: Graha,
    pub occupants: Vec<Graha>,
    pub aspects_from: Vec<IncomingAspect>,
    /// Weighted count of incoming aspects. Relative ranking only.
    pub aspect_power: f64,
}

/// Natural relation of `a` towards `b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Relation {
    pub a: Graha,
    pub b: Graha,
    pub natural: NaisargikaMaitri,
}

/// Where a strength score came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StrengthSource {
    Shadbala,
    Dignity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StrengthBand {
    Strong,
    Medium,
    Weak,
}

impl StrengthBand {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Strong => "strong",
            Self::Medium => "medium",
            Self::Weak => "weak",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StrengthEntry {
    pub planet: Graha,
    /// Raw provider shadbala, if any.
    pub shadbala: Option<f64>,
    /// Shadbala mapped onto [0, 100].
    pub normalized: Option<f64>,
    pub dignity: Dignity,
    /// Combined score in [0, 100].
    pub score: f64,
    pub source: StrengthSource,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedBundle {
    pub houses: Vec<HouseSummary>,
    pub relations: Vec<Relation>,
    pub strengths: Vec<StrengthEntry>,
}

impl DerivedBundle {
    /// Summary for house 1-12.
    pub fn house(&self, house: u8) -> Option<&HouseSummary> {
        self.houses.get(usize::from(house).checked_sub(1)?)
    }

    pub fn strength(&self, graha: Graha) -> Option<&StrengthEntry> {
        self.strengths.iter().find(|s| s.planet == graha)
    }

    pub fn relation(&self, a: Graha, b: Graha) -> Option<NaisargikaMaitri> {
        self.relations
            .iter()
            .find(|r| r.a == a && r.b == b)
            .map(|r| r.natural)
    }
}

/// Build the derived bundle for a fact sheet.
pub fn build_derived(facts: &FactSheet, config: &AnalysisConfig) -> DerivedBundle {
    DerivedBundle {
        houses: house_table(facts, config),
        relations: relation_graph(),
        strengths: strength_table(facts, config),
    }
}

fn house_table(facts: &FactSheet, config: &AnalysisConfig) -> Vec<HouseSummary> {
    let asc = facts.ascendant.sign;
    let lords = house_lords(asc);
    (1..=12u8)
        .map(|h| {
            let aspects_from: Vec<IncomingAspect> = facts
                .aspects
                .iter()
                .filter(|a| a.to_house == h)
                .map(|a| IncomingAspect {
                    from: a.from,
                    from_house: a.from_house,
                    kind: a.kind,
                })
                .collect();
            let aspect_power = aspects_from
                .iter()
                .map(|a| config.aspects.weight(a.kind))
                .sum();
            HouseSummary {
                house: h,
                sign: sign_of_house(asc, h),
                lord: lords[usize::from(h - 1)],
                occupants: facts.occupants(h),
                aspects_from,
                aspect_power,
            }
        })
        .collect()
}

/// Every ordered pair of distinct grahas, in canonical order.
pub fn relation_graph() -> Vec<Relation> {
    ALL_GRAHAS
        .iter()
        .flat_map(|&a| {
            ALL_GRAHAS.iter().filter(move |&&b| b != a).map(move |&b| Relation {
                a,
                b,
                natural: naisargika_maitri(a, b),
            })
        })
        .collect()
}

fn strength_table(facts: &FactSheet, config: &AnalysisConfig) -> Vec<StrengthEntry> {
    facts
        .planets
        .iter()
        .map(|p| strength_of(p.planet, p.dignity, facts.shadbala_of(p.planet), config))
        .collect()
}

/// Combine an optional shadbala with dignity into a 0-100 score.
pub fn strength_of(
    planet: Graha,
    dignity: Dignity,
    shadbala: Option<f64>,
    config: &AnalysisConfig,
) -> StrengthEntry {
    let cfg = &config.strength;
    match shadbala {
        Some(raw) if cfg.shadbala_ceiling > 0.0 => {
            let normalized = (raw.min(cfg.shadbala_ceiling) / cfg.shadbala_ceiling) * 100.0;
            let score = (normalized + cfg.dignity_adjust.get(dignity)).clamp(0.0, 100.0);
            StrengthEntry {
                planet,
                shadbala: Some(raw),
                normalized: Some(normalized),
                dignity,
                score,
                source: StrengthSource::Shadbala,
            }
        }
        _ => StrengthEntry {
            planet,
            shadbala,
            normalized: None,
            dignity,
            score: cfg.dignity_scores.get(dignity).clamp(0.0, 100.0),
            source: StrengthSource::Dignity,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fact_sheet::build_fact_sheet;
    use crate::input::parse_chart_json;

    fn sample() -> FactSheet {
        let input = parse_chart_json(
            r#"{
                "ascendant": {"sign": 1},
                "planets": [
                    {"name": "Sun", "sign": 1},
                    {"name": "Moon", "sign": 4},
                    {"name": "Mars", "sign": 1},
                    {"name": "Jupiter", "sign": 9},
                    {"name": "Saturn", "sign": 10}
                ],
                "shadbala": {"Sun": 900.0, "Moon": 300.0}
            }"#,
        )
        .unwrap();
        build_fact_sheet(&input).unwrap().facts
    }

    #[test]
    fn twelve_houses_with_lords() {
        let d = build_derived(&sample(), &AnalysisConfig::default());
        assert_eq!(d.houses.len(), 12);
        let first = d.house(1).unwrap();
        assert_eq!(first.sign, Rashi::Mesha);
        assert_eq!(first.lord, Graha::Mangal);
        assert_eq!(first.occupants, vec![Graha::Surya, Graha::Mangal]);
        assert_eq!(d.house(10).unwrap().lord, Graha::Shani);
        assert!(d.house(13).is_none());
        assert!(d.house(0).is_none());
    }

    #[test]
    fn aspect_power_weights_special_aspects() {
        let d = build_derived(&sample(), &AnalysisConfig::default());
        // House 4: Mars (from 1, 4th special) and Saturn (from 10, 7th).
        let h4 = d.house(4).unwrap();
        assert_eq!(h4.aspects_from.len(), 2);
        assert!((h4.aspect_power - 2.5).abs() < 1e-10);
    }

    #[test]
    fn seventy_two_ordered_relations() {
        let rel = relation_graph();
        assert_eq!(rel.len(), 72);
        assert!(rel.iter().all(|r| r.a != r.b));
        let d = build_derived(&sample(), &AnalysisConfig::default());
        assert_eq!(
            d.relation(Graha::Surya, Graha::Chandra),
            Some(NaisargikaMaitri::Friend)
        );
        assert_eq!(
            d.relation(Graha::Surya, Graha::Shani),
            Some(NaisargikaMaitri::Enemy)
        );
    }

    #[test]
    fn shadbala_capped_and_adjusted() {
        let d = build_derived(&sample(), &AnalysisConfig::default());
        let sun = d.strength(Graha::Surya).unwrap();
        assert_eq!(sun.source, StrengthSource::Shadbala);
        assert_eq!(sun.normalized, Some(100.0));
        // Sun exalted in Aries: capped at 100 after the +10 adjustment.
        assert_eq!(sun.score, 100.0);
        let moon = d.strength(Graha::Chandra).unwrap();
        assert_eq!(moon.normalized, Some(50.0));
        assert_eq!(moon.dignity, Dignity::Own);
        assert_eq!(moon.score, 55.0);
    }

    #[test]
    fn dignity_fallback_ordering() {
        let cfg = AnalysisConfig::default();
        let ex = strength_of(Graha::Shani, Dignity::Exalted, None, &cfg).score;
        let own = strength_of(Graha::Shani, Dignity::Own, None, &cfg).score;
        let neu = strength_of(Graha::Shani, Dignity::Neutral, None, &cfg).score;
        let deb = strength_of(Graha::Shani, Dignity::Debilitated, None, &cfg).score;
        assert!(ex >= neu && own >= neu && neu >= deb);
        let d = build_derived(&sample(), &cfg);
        assert_eq!(d.strength(Graha::Shani).unwrap().source, StrengthSource::Dignity);
    }
}
