//! Consistency check of an externally produced chart outline against the facts.
//!
//! The outline is whatever a downstream text generator claims about the
//! chart. Every claim is compared with the fact sheet and the detection list;
//! all mismatches are collected so the caller sees every problem at once.

use phala_base::{Graha, Rashi, parse_graha, parse_rashi};
use serde::{Deserialize, Serialize};

use crate::error::OutlineError;
use crate::fact_sheet::FactSheet;
use crate::input::{SignValue, describe};
use crate::yoga::{Detection, YogaRule, evaluate_rules, find_rule, slugify};

/// Structured claims about a chart.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Outline {
    #[serde(default, alias = "lagna")]
    pub ascendant: Option<OutlineAscendant>,
    #[serde(default)]
    pub planets: Vec<OutlinePlanet>,
    #[serde(default, alias = "doshas")]
    pub yogas: Vec<OutlineYoga>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutlineAscendant {
    #[serde(default)]
    pub sign: Option<SignValue>,
    #[serde(default)]
    pub lord: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutlinePlanet {
    #[serde(default, alias = "name")]
    pub planet: Option<String>,
    #[serde(default)]
    pub sign: Option<SignValue>,
    #[serde(default)]
    pub house: Option<i64>,
    #[serde(default, alias = "lordOf")]
    pub lord_of: Option<Vec<i64>>,
}

/// A yoga or dosha the outline attributes to the chart.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutlineYoga {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default, alias = "label")]
    pub name: Option<String>,
    /// Single attributed planet.
    #[serde(default)]
    pub planet: Option<String>,
    #[serde(default)]
    pub planets: Vec<String>,
}

impl OutlineYoga {
    fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.key.as_deref())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Parse an outline from JSON text.
pub fn parse_outline_json(text: &str) -> Result<Outline, OutlineError> {
    Ok(serde_json::from_str(text)?)
}

/// Validate an outline against the fact sheet and its evaluated rules.
pub fn validate_outline(facts: &FactSheet, outline: &Outline) -> Result<ValidationResult, OutlineError> {
    let detections = evaluate_rules(facts);
    validate_outline_against(facts, &detections, outline)
}

/// Validate an outline against the fact sheet and a given detection list.
///
/// Errors only on structurally malformed outlines; disagreements with the
/// chart go into the result.
pub fn validate_outline_against(
    facts: &FactSheet,
    detections: &[Detection],
    outline: &Outline,
) -> Result<ValidationResult, OutlineError> {
    check_structure(outline)?;

    let mut errors = Vec::new();
    if let Some(asc) = &outline.ascendant {
        check_ascendant(facts, asc, &mut errors);
    }
    for entry in &outline.planets {
        check_planet(facts, entry, &mut errors);
    }
    for yoga in &outline.yogas {
        check_yoga(detections, yoga, &mut errors);
    }

    let result = ValidationResult::from_errors(errors);
    tracing::debug!(valid = result.valid, errors = result.errors.len(), "outline validated");
    Ok(result)
}

fn check_structure(outline: &Outline) -> Result<(), OutlineError> {
    if let Some(asc) = &outline.ascendant {
        if asc.sign.is_none() && asc.lord.is_none() {
            return Err(OutlineError::missing("ascendant", "sign"));
        }
    }
    for (i, p) in outline.planets.iter().enumerate() {
        if p.planet.as_deref().is_none_or(|s| s.trim().is_empty()) {
            return Err(OutlineError::missing(format!("planets[{i}]"), "planet"));
        }
    }
    for (i, y) in outline.yogas.iter().enumerate() {
        if y.display_name().trim().is_empty() {
            return Err(OutlineError::missing(format!("yogas[{i}]"), "key"));
        }
    }
    Ok(())
}

/// Strict sign reading: no wrapping, no defaults.
fn outline_sign(value: &SignValue) -> Result<Rashi, String> {
    match value {
        SignValue::Name(s) => parse_rashi(s)
            .filter(|_| s.trim().parse::<i64>().map_or(true, |n| (1..=12).contains(&n)))
            .ok_or_else(|| format!("unknown sign '{s}'")),
        other => match other.as_integer() {
            Some(n) if (1..=12).contains(&n) => Ok(Rashi::from_number(n)),
            Some(n) => Err(format!("sign {n} is outside 1-12")),
            None => Err(format!("unreadable sign {}", describe(other))),
        },
    }
}

fn check_ascendant(facts: &FactSheet, asc: &OutlineAscendant, errors: &mut Vec<String>) {
    let actual = &facts.ascendant;
    if let Some(sign) = &asc.sign {
        match outline_sign(sign) {
            Ok(s) if s != actual.sign => errors.push(format!(
                "ascendant: outline says {}, chart has {}",
                s.western_name(),
                actual.sign.western_name()
            )),
            Ok(_) => {}
            Err(e) => errors.push(format!("ascendant: {e}")),
        }
    }
    if let Some(lord) = &asc.lord {
        match parse_graha(lord) {
            Some(g) if g != actual.lord => errors.push(format!(
                "ascendant lord: outline says {}, chart has {}",
                g.english_name(),
                actual.lord.english_name()
            )),
            Some(_) => {}
            None => errors.push(format!("ascendant lord: unknown planet '{lord}'")),
        }
    }
}

fn check_planet(facts: &FactSheet, entry: &OutlinePlanet, errors: &mut Vec<String>) {
    let raw = entry.planet.as_deref().unwrap_or_default();
    let Some(graha) = parse_graha(raw) else {
        errors.push(format!("outline names unknown planet '{raw}'"));
        return;
    };
    let name = graha.english_name();
    let Some(actual) = facts.planet(graha) else {
        errors.push(format!("{name}: outline describes a planet missing from the chart"));
        return;
    };

    if let Some(sign) = &entry.sign {
        match outline_sign(sign) {
            Ok(s) if s != actual.sign => errors.push(format!(
                "{name}: outline sign {}, chart has {}",
                s.western_name(),
                actual.sign.western_name()
            )),
            Ok(_) => {}
            Err(e) => errors.push(format!("{name}: {e}")),
        }
    }
    if let Some(house) = entry.house {
        if house != i64::from(actual.house) {
            errors.push(format!(
                "{name}: outline house {house}, chart has house {}",
                actual.house
            ));
        }
    }
    if let Some(claimed) = &entry.lord_of {
        let mut claimed = claimed.clone();
        claimed.sort_unstable();
        claimed.dedup();
        let actual_set: Vec<i64> = actual.lord_of.iter().map(|&h| i64::from(h)).collect();
        if claimed != actual_set {
            errors.push(format!(
                "{name}: outline lordship {claimed:?}, chart has {actual_set:?}"
            ));
        }
    }
}

fn allowed_names(rule: &YogaRule) -> String {
    rule.planets
        .iter()
        .map(|g| g.english_name())
        .collect::<Vec<_>>()
        .join(" or ")
}

fn check_yoga(detections: &[Detection], yoga: &OutlineYoga, errors: &mut Vec<String>) {
    let shown = yoga.display_name();
    let rule = yoga
        .key
        .as_deref()
        .and_then(find_rule)
        .or_else(|| yoga.name.as_deref().and_then(find_rule));

    let mut attributed = Vec::new();
    for raw in yoga.planet.iter().chain(&yoga.planets) {
        match parse_graha(raw) {
            Some(g) if !attributed.contains(&g) => attributed.push(g),
            Some(_) => {}
            None => errors.push(format!("{shown}: unknown planet '{raw}'")),
        }
    }

    // Rule-level constraint, independent of what the chart shows.
    let mut forbidden = Vec::new();
    if let Some(rule) = rule {
        for &g in &attributed {
            if !rule.allows(g) {
                errors.push(format!(
                    "{} can only be formed by {}; outline attributes it to {}",
                    rule.label,
                    allowed_names(rule),
                    g.english_name()
                ));
                forbidden.push(g);
            }
        }
    }

    let keys: Vec<String> = [yoga.key.as_deref(), yoga.name.as_deref()]
        .into_iter()
        .flatten()
        .map(slugify)
        .collect();
    let matching: Vec<&Detection> = detections
        .iter()
        .filter(|d| {
            keys.contains(&d.key)
                || rule.is_some_and(|r| d.rule == Some(r.key))
        })
        .collect();
    if matching.is_empty() {
        let label = rule.map_or(shown, |r| r.label);
        errors.push(format!("{label}: outline claims it, but it is not present in this chart"));
        return;
    }

    let formed_by: Vec<Graha> = matching
        .iter()
        .flat_map(|d| d.planets.iter().copied())
        .collect();
    if formed_by.is_empty() {
        return;
    }
    for g in attributed.iter().filter(|g| !forbidden.contains(g)) {
        if !formed_by.contains(g) {
            let names: Vec<&str> = formed_by.iter().map(|g| g.english_name()).collect();
            errors.push(format!(
                "{}: formed by {} in this chart; outline attributes it to {}",
                matching[0].label,
                names.join(", "),
                g.english_name()
            ));
        }
    }
}
