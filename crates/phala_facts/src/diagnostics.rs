//! Non-fatal findings recorded while normalizing provider data.
//!
//! Every stage returns best-effort output plus the diagnostics collected on
//! the way. Recording a diagnostic also emits a `tracing` warning.

use std::fmt::{Display, Formatter};

use phala_base::{Graha, Rashi};
use serde::Serialize;

/// A recoverable problem found in provider input.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Diagnostic {
    /// A graha is absent from the payload; rules needing it do not fire.
    MissingRequiredPlanet { planet: Graha },
    /// A graha is listed without any sign or longitude.
    MissingPosition { planet: Graha },
    /// A sign or house id outside [1, 12], wrapped modulo 12.
    InvalidSignOrHouse {
        context: String,
        value: i64,
        corrected: u8,
    },
    /// Provider house disagrees with the whole-sign formula; the formula wins.
    AmbiguousProviderHouse {
        planet: Graha,
        provider: i64,
        computed: u8,
    },
    /// Unrecognized planet, sign or period name.
    UnknownName {
        context: String,
        name: String,
        fallback: Option<String>,
    },
    /// Provider sign disagrees with the sign of the provider longitude; the longitude wins.
    ConflictingSign {
        subject: String,
        provided: Rashi,
        from_longitude: Rashi,
    },
    /// A graha listed more than once; the first entry is kept.
    DuplicatePlanet { planet: Graha },
    /// A field whose value has the wrong type or no usable number; it is ignored.
    InvalidField { context: String, value: String },
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRequiredPlanet { planet } => {
                write!(f, "{} is missing from the chart", planet.english_name())
            }
            Self::MissingPosition { planet } => {
                write!(f, "{} has no sign or longitude", planet.english_name())
            }
            Self::InvalidSignOrHouse {
                context,
                value,
                corrected,
            } => write!(f, "{context}: value {value} out of range, wrapped to {corrected}"),
            Self::AmbiguousProviderHouse {
                planet,
                provider,
                computed,
            } => write!(
                f,
                "{}: provider house {provider} disagrees with computed house {computed}",
                planet.english_name()
            ),
            Self::UnknownName {
                context,
                name,
                fallback,
            } => match fallback {
                Some(fb) => write!(f, "{context}: unknown name '{name}', using {fb}"),
                None => write!(f, "{context}: unknown name '{name}', entry skipped"),
            },
            Self::ConflictingSign {
                subject,
                provided,
                from_longitude,
            } => write!(
                f,
                "{subject}: provider sign {} disagrees with longitude sign {}",
                provided.western_name(),
                from_longitude.western_name()
            ),
            Self::DuplicatePlanet { planet } => {
                write!(f, "{} listed more than once", planet.english_name())
            }
            Self::InvalidField { context, value } => {
                write!(f, "{context}: unusable value {value}, field ignored")
            }
        }
    }
}

/// Ordered collection of diagnostics for one chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic and log it.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        tracing::warn!(kind = diagnostic_kind(&diagnostic), "{diagnostic}");
        self.entries.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

fn diagnostic_kind(diagnostic: &Diagnostic) -> &'static str {
    match diagnostic {
        Diagnostic::MissingRequiredPlanet { .. } => "missing_required_planet",
        Diagnostic::MissingPosition { .. } => "missing_position",
        Diagnostic::InvalidSignOrHouse { .. } => "invalid_sign_or_house",
        Diagnostic::AmbiguousProviderHouse { .. } => "ambiguous_provider_house",
        Diagnostic::UnknownName { .. } => "unknown_name",
        Diagnostic::ConflictingSign { .. } => "conflicting_sign",
        Diagnostic::DuplicatePlanet { .. } => "duplicate_planet",
        Diagnostic::InvalidField { .. } => "invalid_field",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_preserves_order() {
        let mut d = Diagnostics::new();
        d.push(Diagnostic::MissingRequiredPlanet {
            planet: Graha::Ketu,
        });
        d.push(Diagnostic::DuplicatePlanet {
            planet: Graha::Surya,
        });
        assert_eq!(d.len(), 2);
        let v = d.into_vec();
        assert!(matches!(v[0], Diagnostic::MissingRequiredPlanet { .. }));
        assert!(matches!(v[1], Diagnostic::DuplicatePlanet { .. }));
    }

    #[test]
    fn display_ambiguous_house() {
        let d = Diagnostic::AmbiguousProviderHouse {
            planet: Graha::Shani,
            provider: 9,
            computed: 10,
        };
        assert_eq!(
            d.to_string(),
            "Saturn: provider house 9 disagrees with computed house 10"
        );
    }

    #[test]
    fn serializes_with_kind_tag() {
        let d = Diagnostic::MissingRequiredPlanet {
            planet: Graha::Shani,
        };
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["kind"], "missingRequiredPlanet");
        assert_eq!(json["planet"], "Saturn");
    }
}
