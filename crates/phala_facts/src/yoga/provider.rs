//! Provider-supplied yoga/dosha labels and key-based merging.

use std::collections::HashSet;

use super::{Detection, DetectionKind, DetectionSource, find_rule};
use crate::input::ProviderLabel;

/// Snake-case key for a free-form label: "Dhana Yoga" → "dhana_yoga".
pub fn slugify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.is_empty() && !out.ends_with('_') {
            out.push('_');
        }
    }
    while out.ends_with('_') {
        out.pop();
    }
    out
}

/// Convert provider labels to detections.
///
/// Labels naming a catalog rule take the rule's key and label, so they
/// deduplicate against evaluated detections. Blank labels are dropped.
pub fn provider_detections(labels: &[ProviderLabel], kind: DetectionKind) -> Vec<Detection> {
    labels
        .iter()
        .filter_map(|label| {
            let text = label.text()?.trim();
            let rule = find_rule(text);
            let key = match rule {
                Some(r) => r.key.to_string(),
                None => slugify(text),
            };
            if key.is_empty() {
                return None;
            }
            Some(Detection {
                key,
                rule: rule.map(|r| r.key),
                label: rule.map_or_else(|| text.to_string(), |r| r.label.to_string()),
                kind: rule.map_or(kind, |r| r.kind),
                source: DetectionSource::Provider,
                planets: Vec::new(),
                factors: Vec::new(),
                why: label
                    .description()
                    .map_or_else(|| "reported by chart provider".to_string(), str::to_string),
                strength_hint: None,
            })
        })
        .collect()
}

/// Drop later detections whose key was already seen. Order preserved.
pub fn dedup_by_key(detections: impl IntoIterator<Item = Detection>) -> Vec<Detection> {
    let mut seen = HashSet::new();
    detections
        .into_iter()
        .filter(|d| seen.insert(d.key.clone()))
        .collect()
}

/// Evaluated detections first, then provider ones, deduplicated by key.
///
/// A provider label naming a rule that already fired is dropped even when
/// the evaluated keys carry a placement suffix (`viparita_raja_8_in_6`).
pub fn merge_detections(evaluated: Vec<Detection>, provider: Vec<Detection>) -> Vec<Detection> {
    let fired: HashSet<&'static str> = evaluated.iter().filter_map(|d| d.rule).collect();
    let provider = provider
        .into_iter()
        .filter(|d| d.rule.is_none_or(|rule| !fired.contains(rule)));
    dedup_by_key(evaluated.into_iter().chain(provider))
}
