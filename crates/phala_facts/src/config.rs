//! Tunable constants for strength, aspect weighting and dasha banding.
//!
//! Every struct deserializes with `#[serde(default)]`, so a partial config
//! file overrides only the fields it names.

use phala_base::{AspectKind, Dignity};
use serde::{Deserialize, Serialize};

use crate::derived::StrengthBand;

/// Top-level analysis configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub strength: StrengthConfig,
    pub aspects: AspectWeights,
    pub dasha: DashaBandConfig,
}

/// One value per dignity class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DignityTable {
    pub exalted: f64,
    pub own: f64,
    pub neutral: f64,
    pub debilitated: f64,
}

impl DignityTable {
    pub fn get(&self, dignity: Dignity) -> f64 {
        match dignity {
            Dignity::Exalted => self.exalted,
            Dignity::Own => self.own,
            Dignity::Neutral => self.neutral,
            Dignity::Debilitated => self.debilitated,
        }
    }
}

/// How shadbala and dignity combine into a 0-100 strength score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrengthConfig {
    /// Raw shadbala (shashtiamsas) mapped to 100; larger values are capped.
    pub shadbala_ceiling: f64,
    /// Score used when no shadbala is supplied.
    pub dignity_scores: DignityTable,
    /// Offset added to normalized shadbala before clamping to [0, 100].
    pub dignity_adjust: DignityTable,
}

impl Default for StrengthConfig {
    fn default() -> Self {
        Self {
            shadbala_ceiling: 600.0,
            dignity_scores: DignityTable {
                exalted: 85.0,
                own: 70.0,
                neutral: 50.0,
                debilitated: 20.0,
            },
            dignity_adjust: DignityTable {
                exalted: 10.0,
                own: 5.0,
                neutral: 0.0,
                debilitated: -10.0,
            },
        }
    }
}

/// Relative weights of house aspects in `aspect_power`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AspectWeights {
    /// The universal 7th-house aspect.
    pub opposition: f64,
    /// Mars 4/8, Jupiter 5/9, Saturn 3/10.
    pub special: f64,
}

impl Default for AspectWeights {
    fn default() -> Self {
        Self {
            opposition: 1.0,
            special: 1.5,
        }
    }
}

impl AspectWeights {
    pub fn weight(&self, kind: AspectKind) -> f64 {
        match kind {
            AspectKind::Opposition => self.opposition,
            AspectKind::Special => self.special,
        }
    }
}

/// Score thresholds for dasha strength bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashaBandConfig {
    /// Scores at or above this are strong.
    pub strong_at: f64,
    /// Scores below this are weak.
    pub weak_below: f64,
}

impl Default for DashaBandConfig {
    fn default() -> Self {
        Self {
            strong_at: 66.0,
            weak_below: 40.0,
        }
    }
}

impl DashaBandConfig {
    pub fn band(&self, score: f64) -> StrengthBand {
        if score >= self.strong_at {
            StrengthBand::Strong
        } else if score < self.weak_below {
            StrengthBand::Weak
        } else {
            StrengthBand::Medium
        }
    }
}
