//! One-call pipeline: payload → facts → {derived, rules, dashas}.

use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::dasha::{ExpandedDasha, expand_dashas, expand_yogini};
use crate::derived::{DerivedBundle, build_derived};
use crate::diagnostics::Diagnostics;
use crate::error::{FactsError, OutlineError};
use crate::fact_sheet::{FactSheet, build_fact_sheet};
use crate::input::RawChartInput;
use crate::validate::{Outline, ValidationResult, validate_outline_against};
use crate::yoga::{
    Detection, DetectionKind, evaluate_rules, merge_detections, provider_detections,
};

/// Everything derived from one chart payload.
#[derive(Debug, Clone, Serialize)]
pub struct ChartAnalysis {
    pub facts: FactSheet,
    pub derived: DerivedBundle,
    pub yogas: Vec<Detection>,
    pub doshas: Vec<Detection>,
    pub dasha: ExpandedDasha,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yogini: Option<ExpandedDasha>,
    pub diagnostics: Diagnostics,
}

impl ChartAnalysis {
    /// Yogas then doshas.
    pub fn detections(&self) -> impl Iterator<Item = &Detection> {
        self.yogas.iter().chain(&self.doshas)
    }

    /// Check an outline against this chart's facts and detections.
    pub fn validate(&self, outline: &Outline) -> Result<ValidationResult, OutlineError> {
        let detections: Vec<Detection> = self.detections().cloned().collect();
        validate_outline_against(&self.facts, &detections, outline)
    }
}

/// Run the full pipeline.
///
/// Provider yoga/dosha labels are merged after the evaluated detections and
/// deduplicated by key.
pub fn analyze(input: &RawChartInput, config: &AnalysisConfig) -> Result<ChartAnalysis, FactsError> {
    let build = build_fact_sheet(input)?;
    let facts = build.facts;
    let derived = build_derived(&facts, config);

    let mut provider = provider_detections(&input.yogas, DetectionKind::Yoga);
    provider.extend(provider_detections(&input.doshas, DetectionKind::Dosha));
    let merged = merge_detections(evaluate_rules(&facts), provider);
    let (yogas, doshas): (Vec<_>, Vec<_>) = merged
        .into_iter()
        .partition(|d| d.kind == DetectionKind::Yoga);

    let dasha = expand_dashas(&facts, &derived, config);
    let yogini = expand_yogini(&facts, &derived, config);

    tracing::debug!(
        planets = facts.planets.len(),
        yogas = yogas.len(),
        doshas = doshas.len(),
        diagnostics = build.diagnostics.len(),
        "chart analyzed"
    );

    Ok(ChartAnalysis {
        facts,
        derived,
        yogas,
        doshas,
        dasha,
        yogini,
        diagnostics: build.diagnostics,
    })
}
