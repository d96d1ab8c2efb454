//! Birth-chart fact derivation, rule evaluation and outline validation.
//!
//! Data flows one way:
//!
//! ```text
//! RawChartInput ─► FactSheet ─┬─► DerivedBundle
//!                             ├─► Detection list (yogas, doshas)
//!                             └─► ExpandedDasha
//!                                       │
//!                 Outline ──────────────┴─► ValidationResult
//! ```
//!
//! [`build_fact_sheet`] is the only place untrusted provider data is parsed.
//! Everything after it is a pure function of the fact sheet. [`analyze`]
//! runs the whole pipeline in one call.

pub mod analysis;
pub mod config;
pub mod dasha;
pub mod derived;
pub mod diagnostics;
pub mod error;
pub mod fact_sheet;
pub mod input;
pub mod validate;
pub mod yoga;

pub use analysis::{ChartAnalysis, analyze};
pub use config::{AnalysisConfig, AspectWeights, DashaBandConfig, DignityTable, StrengthConfig};
pub use dasha::{
    CurrentDashaView, DashaPeriodView, ExpandedDasha, HOUSE_AREAS, expand_dashas, expand_yogini,
    house_area,
};
pub use derived::{
    DerivedBundle, HouseSummary, IncomingAspect, Relation, StrengthBand, StrengthEntry,
    StrengthSource, build_derived, relation_graph, strength_of,
};
pub use diagnostics::{Diagnostic, Diagnostics};
pub use error::{FactsError, OutlineError};
pub use fact_sheet::{
    AscendantFact, AspectFact, CurrentDashaFact, DashaFacts, DashaPeriodFact, DivisionalFact,
    FactSheet, FactSheetBuild, PlanetFact, build_fact_sheet,
};
pub use input::{
    FlagValue, NumberValue, ProviderLabel, RawAscendant, RawChartInput, RawCurrentDasha,
    RawDashaPeriod, RawDashas, RawDivisional, RawPlanet, SignValue, parse_chart_json,
};
pub use validate::{
    Outline, OutlineAscendant, OutlinePlanet, OutlineYoga, ValidationResult, parse_outline_json,
    validate_outline, validate_outline_against,
};
pub use yoga::{
    Detection, DetectionKind, DetectionSource, RULES, YogaRule, evaluate_rules, find_rule,
    merge_detections, provider_detections,
};
