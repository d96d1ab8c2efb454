//! Yoga and dosha rule catalog.
//!
//! One canonical table, [`RULES`], keyed by stable rule id. Each entry is a
//! pure predicate over the [`FactSheet`]; detectors never read each other's
//! output, so evaluation order only fixes output order.

mod dosha;
mod mahapurusha;
mod provider;
mod raja;

use phala_base::{Graha, fold_name};
use serde::Serialize;

use crate::derived::StrengthBand;
use crate::fact_sheet::FactSheet;

pub use provider::{dedup_by_key, merge_detections, provider_detections, slugify};

/// Auspicious combination or affliction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionKind {
    Yoga,
    Dosha,
}

/// Who produced a detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionSource {
    Evaluated,
    Provider,
}

/// A fired yoga or dosha.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Detection {
    /// Stable id used for deduplication.
    pub key: String,
    /// Catalog rule this detection belongs to, if any.
    pub rule: Option<&'static str>,
    pub label: String,
    pub kind: DetectionKind,
    pub source: DetectionSource,
    /// Grahas forming the combination.
    pub planets: Vec<Graha>,
    /// Machine-readable `name=value` facts behind the detection.
    pub factors: Vec<String>,
    pub why: String,
    pub strength_hint: Option<StrengthBand>,
}

/// What a detector reports; the catalog entry supplies key and label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleHit {
    /// Appended to the rule key as `<key>_<suffix>`.
    pub suffix: Option<String>,
    /// Replaces the rule label.
    pub label: Option<String>,
    pub planets: Vec<Graha>,
    pub factors: Vec<String>,
    pub why: String,
    pub strength_hint: Option<StrengthBand>,
}

/// One catalog entry.
#[derive(Debug, Clone, Copy)]
pub struct YogaRule {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: DetectionKind,
    /// Alternate names accepted from providers and outlines.
    pub aliases: &'static [&'static str],
    /// The only grahas that can form this combination. Empty: any graha.
    pub planets: &'static [Graha],
    pub detect: fn(&FactSheet) -> Vec<RuleHit>,
}

impl YogaRule {
    fn detection(&self, hit: RuleHit) -> Detection {
        let key = match &hit.suffix {
            Some(s) => format!("{}_{s}", self.key),
            None => self.key.to_string(),
        };
        Detection {
            key,
            rule: Some(self.key),
            label: hit.label.unwrap_or_else(|| self.label.to_string()),
            kind: self.kind,
            source: DetectionSource::Evaluated,
            planets: hit.planets,
            factors: hit.factors,
            why: hit.why,
            strength_hint: hit.strength_hint,
        }
    }

    /// Whether `graha` may be credited with this combination.
    pub fn allows(&self, graha: Graha) -> bool {
        self.planets.is_empty() || self.planets.contains(&graha)
    }
}

use DetectionKind::{Dosha, Yoga};
use Graha::*;

/// The canonical rule table.
pub static RULES: &[YogaRule] = &[
    YogaRule {
        key: "ruchaka",
        label: "Ruchaka Yoga",
        kind: Yoga,
        aliases: &["ruchak", "ruchaka mahapurusha"],
        planets: &[Mangal],
        detect: mahapurusha::ruchaka,
    },
    YogaRule {
        key: "bhadra",
        label: "Bhadra Yoga",
        kind: Yoga,
        aliases: &["bhadra mahapurusha"],
        planets: &[Buddh],
        detect: mahapurusha::bhadra,
    },
    YogaRule {
        key: "hamsa",
        label: "Hamsa Yoga",
        kind: Yoga,
        aliases: &["hansa", "hamsa mahapurusha"],
        planets: &[Guru],
        detect: mahapurusha::hamsa,
    },
    YogaRule {
        key: "malavya",
        label: "Malavya Yoga",
        kind: Yoga,
        aliases: &["malavya mahapurusha"],
        planets: &[Shukra],
        detect: mahapurusha::malavya,
    },
    YogaRule {
        key: "shasha",
        label: "Shasha Yoga",
        kind: Yoga,
        aliases: &["sasa", "sasha", "shash", "shasha mahapurusha"],
        planets: &[Shani],
        detect: mahapurusha::shasha,
    },
    YogaRule {
        key: "viparita_raja",
        label: "Viparita Raja Yoga",
        kind: Yoga,
        aliases: &["viparit raja", "vipreet raja", "harsha", "sarala", "vimala"],
        planets: &[],
        detect: raja::viparita_raja,
    },
    YogaRule {
        key: "gajakesari",
        label: "Gajakesari Yoga",
        kind: Yoga,
        aliases: &["gaja kesari", "gajakesri"],
        planets: &[Chandra, Guru],
        detect: raja::gajakesari,
    },
    YogaRule {
        key: "budhaditya",
        label: "Budhaditya Yoga",
        kind: Yoga,
        aliases: &["budh aditya", "budha aditya", "nipuna"],
        planets: &[Surya, Buddh],
        detect: raja::budhaditya,
    },
    YogaRule {
        key: "mangal_dosha",
        label: "Mangal Dosha",
        kind: Dosha,
        aliases: &["manglik", "mangalik", "kuja", "kuja dosha", "chevvai"],
        planets: &[Mangal],
        detect: dosha::mangal_dosha,
    },
    YogaRule {
        key: "kaal_sarp",
        label: "Kaal Sarp Dosha",
        kind: Dosha,
        aliases: &["kala sarpa", "kaal sarpa", "kalsarp"],
        planets: &[],
        detect: dosha::kaal_sarp,
    },
    YogaRule {
        key: "grahan_dosha",
        label: "Grahan Dosha",
        kind: Dosha,
        aliases: &["grahan", "grahana", "eclipse"],
        planets: &[Surya, Chandra, Rahu, Ketu],
        detect: dosha::grahan_dosha,
    },
    YogaRule {
        key: "shrapit_dosha",
        label: "Shrapit Dosha",
        kind: Dosha,
        aliases: &["shrapit", "shrapit yoga"],
        planets: &[Shani, Rahu],
        detect: dosha::shrapit_dosha,
    },
    YogaRule {
        key: "vish_dosha",
        label: "Vish Dosha",
        kind: Dosha,
        aliases: &["vish", "visha", "vish yoga", "punarphoo"],
        planets: &[Shani, Chandra],
        detect: dosha::vish_dosha,
    },
    YogaRule {
        key: "daridra_dosha",
        label: "Daridra Dosha",
        kind: Dosha,
        aliases: &["daridra", "daridra yoga"],
        planets: &[],
        detect: dosha::daridra_dosha,
    },
    YogaRule {
        key: "kemadruma",
        label: "Kemadruma Dosha",
        kind: Dosha,
        aliases: &["kemadrum", "kemadruma yoga"],
        planets: &[Chandra],
        detect: dosha::kemadruma,
    },
    YogaRule {
        key: "guru_chandal",
        label: "Guru Chandal Dosha",
        kind: Dosha,
        aliases: &["guru chandala", "chandal", "guru chandal yoga"],
        planets: &[Guru, Rahu, Ketu],
        detect: dosha::guru_chandal,
    },
    YogaRule {
        key: "karma_papakartari",
        label: "Karma Papakartari Dosha",
        kind: Dosha,
        aliases: &["papakartari", "papa kartari", "karma papa kartari"],
        planets: &[],
        detect: dosha::karma_papakartari,
    },
    YogaRule {
        key: "dusthana_cluster",
        label: "Dusthana Cluster",
        kind: Dosha,
        aliases: &["dusthana"],
        planets: &[],
        detect: dosha::dusthana_cluster,
    },
    YogaRule {
        key: "ashtama_shani",
        label: "Ashtama Shani",
        kind: Dosha,
        aliases: &["ashtam shani", "ashtama sani"],
        planets: &[Shani],
        detect: dosha::ashtama_shani,
    },
];

/// Run every catalog rule, in table order.
pub fn evaluate_rules(facts: &FactSheet) -> Vec<Detection> {
    let mut out = Vec::new();
    for rule in RULES {
        for hit in (rule.detect)(facts) {
            let detection = rule.detection(hit);
            tracing::debug!(key = %detection.key, why = %detection.why, "rule fired");
            out.push(detection);
        }
    }
    out
}

/// Catalog entry for a key, label or alias in any spelling.
///
/// A trailing "yoga"/"dosha" is ignored, so "Shasha Yoga", "shasha" and
/// "Sasa" all resolve to the same rule.
pub fn find_rule(name: &str) -> Option<&'static YogaRule> {
    let needle = rule_stem(name);
    if needle.is_empty() {
        return None;
    }
    RULES.iter().find(|rule| {
        rule_stem(rule.key) == needle
            || rule_stem(rule.label) == needle
            || rule.aliases.iter().any(|a| rule_stem(a) == needle)
    })
}

/// Catalog entry by exact key.
pub fn rule_by_key(key: &str) -> Option<&'static YogaRule> {
    RULES.iter().find(|r| r.key == key)
}

fn rule_stem(name: &str) -> String {
    let folded = fold_name(name);
    for suffix in ["yoga", "dosha", "dosh", "yog"] {
        if let Some(stem) = folded.strip_suffix(suffix) {
            if !stem.is_empty() {
                return stem.to_string();
            }
        }
    }
    folded
}

/// `name=value` factor string.
pub(crate) fn factor(name: &str, value: impl std::fmt::Display) -> String {
    format!("{name}={value}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn rule_keys_unique() {
        let keys: HashSet<&str> = RULES.iter().map(|r| r.key).collect();
        assert_eq!(keys.len(), RULES.len());
    }

    #[test]
    fn find_rule_accepts_spellings() {
        assert_eq!(find_rule("Shasha Yoga").unwrap().key, "shasha");
        assert_eq!(find_rule("sasa").unwrap().key, "shasha");
        assert_eq!(find_rule("Gaja Kesari Yoga").unwrap().key, "gajakesari");
        assert_eq!(find_rule("Manglik").unwrap().key, "mangal_dosha");
        assert_eq!(find_rule("Kuja Dosha").unwrap().key, "mangal_dosha");
        assert_eq!(find_rule("Kala Sarpa Yoga").unwrap().key, "kaal_sarp");
        assert_eq!(find_rule("kaal_sarp").unwrap().key, "kaal_sarp");
        assert!(find_rule("Dhana Yoga").is_none());
        assert!(find_rule("  ").is_none());
    }

    #[test]
    fn shasha_only_allows_saturn() {
        let rule = rule_by_key("shasha").unwrap();
        assert!(rule.allows(Graha::Shani));
        assert!(!rule.allows(Graha::Chandra));
        assert!(rule_by_key("viparita_raja").unwrap().allows(Graha::Chandra));
    }
}
