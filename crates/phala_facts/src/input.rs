//! Raw chart-provider payload.
//!
//! These types mirror what providers actually send: camelCase or snake_case
//! keys, signs as names or numbers, positions as sign-relative degrees or
//! absolute longitudes, yoga labels as bare strings or objects. Nothing here
//! is validated; the fact sheet builder is the single normalization boundary.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::FactsError;

/// A sign given either as a 1-based number or as a name in any vocabulary.
///
/// Anything else the provider sends lands in `Other` so one bad field never
/// rejects the whole payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SignValue {
    Number(i64),
    Float(f64),
    Name(String),
    Other(serde_json::Value),
}

impl SignValue {
    /// The sign number, when the value is an integer in any encoding.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Float(f) => integral(*f),
            Self::Name(s) => s.trim().parse().ok(),
            Self::Other(_) => None,
        }
    }
}

/// A numeric field as the provider sent it: a number, a numeric string, or junk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberValue {
    Integer(i64),
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl NumberValue {
    /// Finite numeric value, if the field holds one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(n) => Some(*n as f64),
            Self::Number(f) => Some(*f),
            Self::Text(s) => s.trim().parse().ok(),
            Self::Other(_) => None,
        }
        .filter(|f: &f64| f.is_finite())
    }

    /// Whole-number value, if the field holds one.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            Self::Number(f) => integral(*f),
            Self::Text(s) => {
                let s = s.trim();
                s.parse::<i64>().ok().or_else(|| s.parse::<f64>().ok().and_then(integral))
            }
            Self::Other(_) => None,
        }
    }
}

impl From<f64> for NumberValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// A yes/no field: a boolean, `"true"`/`"false"` style text, or 0/1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    Bool(bool),
    Integer(i64),
    Text(String),
    Other(serde_json::Value),
}

impl FlagValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Integer(0) => Some(false),
            Self::Integer(1) => Some(true),
            Self::Integer(_) | Self::Other(_) => None,
            Self::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "y" | "r" | "1" => Some(true),
                "false" | "no" | "n" | "" | "0" => Some(false),
                _ => None,
            },
        }
    }
}

impl From<bool> for FlagValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Render a raw field as the JSON it arrived as, for diagnostics.
pub(crate) fn describe<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

fn integral(f: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, which is out of range.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    (f.is_finite() && f.fract() == 0.0 && (-LIMIT..LIMIT).contains(&f)).then_some(f as i64)
}

/// Complete provider payload for one birth chart.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawChartInput {
    #[serde(default, alias = "lagna")]
    pub ascendant: Option<RawAscendant>,
    #[serde(default, alias = "grahas")]
    pub planets: Vec<RawPlanet>,
    /// Shadbala per planet name, in shashtiamsas.
    #[serde(default, alias = "strengths")]
    pub shadbala: BTreeMap<String, NumberValue>,
    #[serde(default)]
    pub yogas: Vec<ProviderLabel>,
    #[serde(default)]
    pub doshas: Vec<ProviderLabel>,
    #[serde(default)]
    pub dashas: RawDashas,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAscendant {
    #[serde(default)]
    pub sign: Option<SignValue>,
    /// Degree within the sign, or an absolute longitude if >= 30.
    #[serde(default, alias = "normDegree")]
    pub degree: Option<NumberValue>,
    #[serde(default, alias = "fullDegree", alias = "lon")]
    pub longitude: Option<NumberValue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPlanet {
    #[serde(alias = "planet", alias = "graha")]
    pub name: String,
    #[serde(default, alias = "rashi")]
    pub sign: Option<SignValue>,
    #[serde(default, alias = "fullDegree", alias = "lon")]
    pub longitude: Option<NumberValue>,
    #[serde(default, alias = "normDegree")]
    pub degree: Option<NumberValue>,
    #[serde(default, alias = "isRetro", alias = "retro", alias = "is_retro")]
    pub retrograde: Option<FlagValue>,
    /// Provider-computed house. Used only to flag disagreements.
    #[serde(default, alias = "bhava")]
    pub house: Option<NumberValue>,
    #[serde(default)]
    pub divisional: Option<RawDivisional>,
}

/// Alternate-harmonic (varga) placement supplied by the provider.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDivisional {
    /// Chart label such as "D9". Defaults to navamsha.
    #[serde(default)]
    pub chart: Option<String>,
    pub sign: SignValue,
}

/// Provider yoga or dosha label.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ProviderLabel {
    Name(String),
    Detailed {
        #[serde(default, alias = "key", alias = "id")]
        name: Option<String>,
        #[serde(default, alias = "label", alias = "title")]
        display: Option<String>,
        #[serde(default, alias = "why")]
        description: Option<String>,
    },
}

impl ProviderLabel {
    /// The most specific text identifying the label, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Name(s) => Some(s.as_str()),
            Self::Detailed { name, display, .. } => name.as_deref().or(display.as_deref()),
        }
        .filter(|s| !s.trim().is_empty())
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Name(_) => None,
            Self::Detailed { description, .. } => description.as_deref(),
        }
    }
}

/// Dasha period lists, nested major → finest.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDashas {
    #[serde(default)]
    pub vimshottari: Vec<RawDashaPeriod>,
    #[serde(default)]
    pub yogini: Option<Vec<RawDashaPeriod>>,
    /// Provider's own marker of the running periods (Vimshottari).
    #[serde(default)]
    pub current: Option<RawCurrentDasha>,
    /// Reference timestamp for locating the running periods.
    #[serde(default, alias = "as_of")]
    pub as_of: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDashaPeriod {
    #[serde(alias = "lord", alias = "name", alias = "yogini")]
    pub planet: String,
    #[serde(default, alias = "startDate", alias = "from")]
    pub start: Option<String>,
    #[serde(default, alias = "endDate", alias = "to")]
    pub end: Option<String>,
    #[serde(
        default,
        alias = "antardashas",
        alias = "subPeriods",
        alias = "sub_periods",
        alias = "children"
    )]
    pub periods: Vec<RawDashaPeriod>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCurrentDasha {
    #[serde(default, alias = "mahadasha")]
    pub maha: Option<String>,
    #[serde(default, alias = "antardasha")]
    pub antar: Option<String>,
    #[serde(default, alias = "pratyantardasha")]
    pub pratyantar: Option<String>,
    #[serde(default, alias = "sookshmadasha")]
    pub sookshma: Option<String>,
}

/// Parse a provider payload from JSON text.
pub fn parse_chart_json(text: &str) -> Result<RawChartInput, FactsError> {
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_mixed_conventions() {
        let input = parse_chart_json(
            r#"{
                "ascendant": {"sign": "Vrishabha", "degree": 12.5},
                "planets": [
                    {"name": "Shani", "sign": 11, "isRetro": true, "house": 10},
                    {"planet": "Mars", "fullDegree": 301.2}
                ],
                "shadbala": {"Saturn": 410.0},
                "yogas": ["Shasha Yoga", {"name": "Gajakesari", "description": "Moon-Jupiter"}]
            }"#,
        )
        .unwrap();
        let asc = input.ascendant.unwrap();
        assert_eq!(asc.sign, Some(SignValue::Name("Vrishabha".into())));
        assert_eq!(input.planets.len(), 2);
        assert_eq!(input.planets[0].retrograde, Some(FlagValue::Bool(true)));
        assert_eq!(input.planets[0].sign, Some(SignValue::Number(11)));
        assert_eq!(input.planets[1].longitude, Some(NumberValue::Number(301.2)));
        assert_eq!(input.yogas[0].text(), Some("Shasha Yoga"));
        assert_eq!(input.yogas[1].description(), Some("Moon-Jupiter"));
    }

    #[test]
    fn nested_dashas() {
        let input = parse_chart_json(
            r#"{
                "ascendant": {"sign": 1},
                "dashas": {
                    "vimshottari": [
                        {"lord": "Saturn", "start": "2020-01-01", "end": "2039-01-01",
                         "antardashas": [{"planet": "Mercury", "start": "2023-01-01", "end": "2025-09-01"}]}
                    ],
                    "asOf": "2024-05-01"
                }
            }"#,
        )
        .unwrap();
        assert_eq!(input.dashas.vimshottari[0].periods.len(), 1);
        assert_eq!(input.dashas.as_of.as_deref(), Some("2024-05-01"));
    }

    #[test]
    fn blank_labels_have_no_text() {
        assert_eq!(ProviderLabel::Name("  ".into()).text(), None);
    }

    #[test]
    fn wrongly_typed_fields_do_not_reject_the_chart() {
        let input = parse_chart_json(
            r#"{
                "ascendant": {"sign": 1.0, "degree": "12.5"},
                "planets": [
                    {"name": "Saturn", "sign": 10, "isRetro": "false", "house": 10.0},
                    {"name": "Mars", "sign": 10.0, "isRetro": "R"},
                    {"name": "Moon", "sign": [4], "isRetro": {"x": 1}, "fullDegree": null}
                ],
                "shadbala": {"Sun": null, "Moon": "402.5", "Mars": 380}
            }"#,
        )
        .unwrap();
        let asc = input.ascendant.unwrap();
        assert_eq!(asc.sign.unwrap().as_integer(), Some(1));
        assert_eq!(asc.degree.unwrap().as_f64(), Some(12.5));

        let sat = &input.planets[0];
        assert_eq!(sat.retrograde.as_ref().unwrap().as_bool(), Some(false));
        assert_eq!(sat.house.as_ref().unwrap().as_integer(), Some(10));
        let mars = &input.planets[1];
        assert_eq!(mars.sign.as_ref().unwrap().as_integer(), Some(10));
        assert_eq!(mars.retrograde.as_ref().unwrap().as_bool(), Some(true));
        let moon = &input.planets[2];
        assert!(matches!(moon.sign, Some(SignValue::Other(_))));
        assert_eq!(moon.retrograde.as_ref().unwrap().as_bool(), None);
        assert_eq!(moon.longitude, None);

        assert_eq!(input.shadbala["Sun"].as_f64(), None);
        assert_eq!(input.shadbala["Moon"].as_f64(), Some(402.5));
        assert_eq!(input.shadbala["Mars"].as_f64(), Some(380.0));
    }

    #[test]
    fn integral_values_only() {
        assert_eq!(SignValue::Float(4.5).as_integer(), None);
        assert_eq!(SignValue::Float(f64::NAN).as_integer(), None);
        assert_eq!(SignValue::Float(1e300).as_integer(), None);
        assert_eq!(NumberValue::Text("7.0".into()).as_integer(), Some(7));
        assert_eq!(NumberValue::Integer(i64::MIN).as_integer(), Some(i64::MIN));
        assert_eq!(NumberValue::Text("abc".into()).as_f64(), None);
        assert_eq!(FlagValue::Integer(2).as_bool(), None);
    }

    #[test]
    fn raw_fields_render_as_json() {
        assert_eq!(describe(&FlagValue::Text("maybe".into())), "\"maybe\"");
        assert_eq!(describe(&NumberValue::Other(serde_json::Value::Null)), "null");
        assert_eq!(describe(&SignValue::Float(4.5)), "4.5");
    }

    #[test]
    fn malformed_json_is_error() {
        assert!(matches!(
            parse_chart_json("{\"planets\": 3}"),
            Err(FactsError::Json(_))
        ));
    }
}
