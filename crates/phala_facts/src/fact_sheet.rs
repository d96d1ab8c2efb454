//! Canonical fact sheet and the builder that normalizes provider payloads into it.
//!
//! The builder is the single parsing boundary for untrusted chart data:
//! names in any vocabulary become [`Graha`] / [`Rashi`] values, houses are
//! recomputed with the whole-sign formula, lordship is derived from the
//! ascendant alone, and dignity comes from the fixed tables. Bad fields fail
//! soft, one at a time, with a [`Diagnostic`].

use std::collections::BTreeMap;

use phala_base::{
    ALL_DASHA_LEVELS, ALL_GRAHAS, AspectKind, DashaLevel, DashaSystem, Dignity, Graha,
    NAVAMSHA_CHART, Rashi, dignity_in_sign, house_drishti, house_of, is_ignored_body, lord_of,
    navamsha_sign, normalize_360, parse_graha, parse_period_lord, rashi_lord, resolve_rashi,
    sign_from_longitude, wrap_12,
};
use serde::Serialize;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::FactsError;
use crate::input::{
    NumberValue, RawAscendant, RawChartInput, RawCurrentDasha, RawDashaPeriod, RawPlanet,
    SignValue, describe,
};

/// The ascendant (lagna). Always house 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AscendantFact {
    pub sign: Rashi,
    /// Degree within the sign [0, 30), when known.
    pub degree: Option<f64>,
    pub lord: Graha,
    pub house: u8,
}

/// Alternate-harmonic (varga) placement of a planet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DivisionalFact {
    pub chart: String,
    pub sign: Rashi,
    pub dignity: Dignity,
}

/// Canonical placement of one graha.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetFact {
    pub planet: Graha,
    pub sign: Rashi,
    /// Degree within the sign [0, 30), when known.
    pub degree: Option<f64>,
    /// Sidereal longitude [0, 360), when known.
    pub longitude: Option<f64>,
    /// Whole-sign house from the ascendant, 1-12.
    pub house: u8,
    /// Houses this graha rules, ascending. Empty for the nodes.
    pub lord_of: Vec<u8>,
    pub dignity: Dignity,
    pub is_retro: bool,
    pub divisional: Option<DivisionalFact>,
}

/// One house aspect cast by a graha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AspectFact {
    pub from: Graha,
    pub from_house: u8,
    pub to_house: u8,
    pub nth: u8,
    #[serde(rename = "type")]
    pub kind: AspectKind,
}

/// One dasha period with its nested sub-periods.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashaPeriodFact {
    pub planet: Graha,
    /// Opaque provider timestamp, passed through verbatim.
    pub start: Option<String>,
    pub end: Option<String>,
    pub level: DashaLevel,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub periods: Vec<DashaPeriodFact>,
}

/// Provider-declared running periods.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentDashaFact {
    pub maha: Graha,
    pub antar: Option<Graha>,
    pub pratyantar: Option<Graha>,
    pub sookshma: Option<Graha>,
}

impl CurrentDashaFact {
    /// Rulers by depth, stopping at the first missing level.
    pub fn chain(&self) -> Vec<Graha> {
        let mut chain = vec![self.maha];
        for g in [self.antar, self.pratyantar, self.sookshma] {
            match g {
                Some(g) => chain.push(g),
                None => break,
            }
        }
        chain
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashaFacts {
    pub vimshottari: Vec<DashaPeriodFact>,
    pub yogini: Option<Vec<DashaPeriodFact>>,
    pub current: Option<CurrentDashaFact>,
    pub as_of: Option<String>,
}

/// Canonical, internally consistent chart facts. Read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactSheet {
    pub ascendant: AscendantFact,
    /// Present grahas in canonical order (Sun .. Ketu).
    pub planets: Vec<PlanetFact>,
    pub aspects: Vec<AspectFact>,
    pub shadbala: Option<BTreeMap<Graha, f64>>,
    pub dashas: DashaFacts,
}

impl FactSheet {
    pub fn planet(&self, graha: Graha) -> Option<&PlanetFact> {
        self.planets.iter().find(|p| p.planet == graha)
    }

    pub fn is_present(&self, graha: Graha) -> bool {
        self.planet(graha).is_some()
    }

    pub fn house_of(&self, graha: Graha) -> Option<u8> {
        self.planet(graha).map(|p| p.house)
    }

    pub fn sign_of(&self, graha: Graha) -> Option<Rashi> {
        self.planet(graha).map(|p| p.sign)
    }

    /// Grahas occupying a house, canonical order.
    pub fn occupants(&self, house: u8) -> Vec<Graha> {
        self.planets
            .iter()
            .filter(|p| p.house == house)
            .map(|p| p.planet)
            .collect()
    }

    /// Both grahas present and in the same sign.
    pub fn conjunct(&self, a: Graha, b: Graha) -> bool {
        match (self.sign_of(a), self.sign_of(b)) {
            (Some(sa), Some(sb)) => sa == sb,
            _ => false,
        }
    }

    pub fn shadbala_of(&self, graha: Graha) -> Option<f64> {
        self.shadbala.as_ref().and_then(|m| m.get(&graha).copied())
    }
}

/// Builder output: the fact sheet plus everything noticed along the way.
#[derive(Debug, Clone)]
pub struct FactSheetBuild {
    pub facts: FactSheet,
    pub diagnostics: Diagnostics,
}

/// Normalize a provider payload into a [`FactSheet`].
///
/// Fails only when no ascendant can be established; every other problem is
/// recorded in the returned diagnostics.
pub fn build_fact_sheet(input: &RawChartInput) -> Result<FactSheetBuild, FactsError> {
    let mut diags = Diagnostics::new();

    let raw_asc = input.ascendant.as_ref().ok_or(FactsError::MissingAscendant)?;
    let ascendant = build_ascendant(raw_asc, &mut diags)?;

    let mut planets: Vec<PlanetFact> = Vec::with_capacity(9);
    for raw in &input.planets {
        if is_ignored_body(&raw.name) {
            tracing::debug!(name = %raw.name, "ignoring non-graha body");
            continue;
        }
        let Some(graha) = parse_graha(&raw.name) else {
            diags.push(Diagnostic::UnknownName {
                context: "planet".into(),
                name: raw.name.clone(),
                fallback: None,
            });
            continue;
        };
        if planets.iter().any(|p| p.planet == graha) {
            diags.push(Diagnostic::DuplicatePlanet { planet: graha });
            continue;
        }
        if let Some(fact) = build_planet(graha, raw, ascendant.sign, &mut diags) {
            planets.push(fact);
        }
    }

    derive_ketu(&mut planets, ascendant.sign);
    planets.sort_by_key(|p| p.planet.index());

    for g in ALL_GRAHAS {
        if !planets.iter().any(|p| p.planet == g) {
            diags.push(Diagnostic::MissingRequiredPlanet { planet: g });
        }
    }

    let aspects = planets
        .iter()
        .flat_map(|p| {
            house_drishti(p.planet, p.house)
                .into_iter()
                .map(move |d| AspectFact {
                    from: p.planet,
                    from_house: p.house,
                    to_house: d.to_house,
                    nth: d.nth,
                    kind: d.kind,
                })
        })
        .collect();

    let shadbala = build_shadbala(&input.shadbala, &mut diags);
    let dashas = build_dashas(input, &mut diags);

    Ok(FactSheetBuild {
        facts: FactSheet {
            ascendant,
            planets,
            aspects,
            shadbala,
            dashas,
        },
        diagnostics: diags,
    })
}

// ---------------------------------------------------------------------------
// Ascendant and planets
// ---------------------------------------------------------------------------

fn build_ascendant(raw: &RawAscendant, diags: &mut Diagnostics) -> Result<AscendantFact, FactsError> {
    let raw_degree = number_field(raw.degree.as_ref(), "ascendant degree", diags);
    // A degree of 30 or more can only be an absolute longitude.
    let longitude = number_field(raw.longitude.as_ref(), "ascendant longitude", diags)
        .or(raw_degree.filter(|d| *d >= 30.0))
        .map(normalize_360);
    let provided = raw
        .sign
        .as_ref()
        .and_then(|s| resolve_sign(s, "ascendant sign", diags));

    let sign = match (provided, longitude) {
        (Some(p), Some(lon)) => reconcile_sign("ascendant", p, lon, diags),
        (Some(p), None) => p,
        (None, Some(lon)) => Rashi::from_number(sign_from_longitude(lon) as i64),
        (None, None) => return Err(FactsError::MissingAscendant),
    };
    let degree = in_sign_degree(longitude, raw_degree);

    Ok(AscendantFact {
        sign,
        degree,
        lord: rashi_lord(sign),
        house: 1,
    })
}

fn build_planet(
    graha: Graha,
    raw: &RawPlanet,
    ascendant: Rashi,
    diags: &mut Diagnostics,
) -> Option<PlanetFact> {
    let name = graha.english_name();
    let raw_degree = number_field(raw.degree.as_ref(), &format!("{name} degree"), diags);
    let longitude = number_field(raw.longitude.as_ref(), &format!("{name} longitude"), diags)
        .or(raw_degree.filter(|d| *d >= 30.0))
        .map(normalize_360);
    let provided = raw
        .sign
        .as_ref()
        .and_then(|s| resolve_sign(s, &format!("{name} sign"), diags));

    let sign = match (provided, longitude) {
        (Some(p), Some(lon)) => reconcile_sign(name, p, lon, diags),
        (Some(p), None) => p,
        (None, Some(lon)) => Rashi::from_number(sign_from_longitude(lon) as i64),
        (None, None) => {
            diags.push(Diagnostic::MissingPosition { planet: graha });
            return None;
        }
    };

    let house = house_of(sign, ascendant);
    if let Some(raw_house) = &raw.house {
        match raw_house.as_integer() {
            Some(provider_house) => check_provider_house(graha, provider_house, house, diags),
            None => diags.push(Diagnostic::InvalidField {
                context: format!("{name} provider house"),
                value: describe(raw_house),
            }),
        }
    }

    let is_retro = match &raw.retrograde {
        Some(flag) => flag.as_bool().unwrap_or_else(|| {
            diags.push(Diagnostic::InvalidField {
                context: format!("{name} retrograde flag"),
                value: describe(flag),
            });
            false
        }),
        None => false,
    };

    // A supplied varga sign wins; an unusable one falls back to the navamsha.
    let supplied = raw.divisional.as_ref().and_then(|d| {
        let dsign = resolve_sign(&d.sign, &format!("{name} divisional sign"), diags)?;
        Some(DivisionalFact {
            chart: d.chart.clone().unwrap_or_else(|| NAVAMSHA_CHART.to_string()),
            sign: dsign,
            dignity: dignity_in_sign(graha, dsign),
        })
    });
    let divisional = supplied.or_else(|| {
        longitude.map(|lon| {
            let dsign = navamsha_sign(lon);
            DivisionalFact {
                chart: NAVAMSHA_CHART.to_string(),
                sign: dsign,
                dignity: dignity_in_sign(graha, dsign),
            }
        })
    });

    Some(PlanetFact {
        planet: graha,
        sign,
        degree: in_sign_degree(longitude, raw_degree),
        longitude,
        house,
        lord_of: lord_of(graha, ascendant),
        dignity: dignity_in_sign(graha, sign),
        is_retro,
        divisional,
    })
}

/// Place Ketu opposite Rahu when only Rahu was supplied.
fn derive_ketu(planets: &mut Vec<PlanetFact>, ascendant: Rashi) {
    if planets.iter().any(|p| p.planet == Graha::Ketu) {
        return;
    }
    let Some(rahu) = planets.iter().find(|p| p.planet == Graha::Rahu) else {
        return;
    };
    let sign = rahu.sign.nth_from(7);
    let longitude = rahu.longitude.map(|lon| normalize_360(lon + 180.0));
    tracing::debug!(sign = sign.western_name(), "deriving Ketu opposite Rahu");
    let ketu = PlanetFact {
        planet: Graha::Ketu,
        sign,
        degree: rahu.degree,
        longitude,
        house: house_of(sign, ascendant),
        lord_of: Vec::new(),
        dignity: Dignity::Neutral,
        is_retro: rahu.is_retro,
        divisional: longitude.map(|lon| DivisionalFact {
            chart: NAVAMSHA_CHART.to_string(),
            sign: navamsha_sign(lon),
            dignity: Dignity::Neutral,
        }),
    };
    planets.push(ketu);
}

fn check_provider_house(graha: Graha, provider: i64, computed: u8, diags: &mut Diagnostics) {
    if !(1..=12).contains(&provider) {
        diags.push(Diagnostic::InvalidSignOrHouse {
            context: format!("{} provider house", graha.english_name()),
            value: provider,
            corrected: wrap_12(provider),
        });
    }
    if wrap_12(provider) != computed {
        diags.push(Diagnostic::AmbiguousProviderHouse {
            planet: graha,
            provider,
            computed,
        });
    }
}

/// Resolve a provider sign, wrapping numbers and defaulting unknown names.
///
/// Returns `None` only for values that are neither a whole number nor a name,
/// so the caller can fall back to a longitude.
pub(crate) fn resolve_sign(
    value: &SignValue,
    context: &str,
    diags: &mut Diagnostics,
) -> Option<Rashi> {
    if let Some(n) = value.as_integer() {
        if !(1..=12).contains(&n) {
            diags.push(Diagnostic::InvalidSignOrHouse {
                context: context.to_string(),
                value: n,
                corrected: wrap_12(n),
            });
        }
        return Some(Rashi::from_number(n));
    }
    let SignValue::Name(name) = value else {
        diags.push(Diagnostic::InvalidField {
            context: context.to_string(),
            value: describe(value),
        });
        return None;
    };
    let resolved = resolve_rashi(name);
    if !resolved.is_known() {
        diags.push(Diagnostic::UnknownName {
            context: context.to_string(),
            name: name.clone(),
            fallback: Some(resolved.value().western_name().to_string()),
        });
    }
    Some(resolved.value())
}

/// Numeric field value, or `None` with a diagnostic when it is unusable.
fn number_field(
    value: Option<&NumberValue>,
    context: &str,
    diags: &mut Diagnostics,
) -> Option<f64> {
    let value = value?;
    let number = value.as_f64();
    if number.is_none() {
        diags.push(Diagnostic::InvalidField {
            context: context.to_string(),
            value: describe(value),
        });
    }
    number
}

fn reconcile_sign(subject: &str, provided: Rashi, lon: f64, diags: &mut Diagnostics) -> Rashi {
    let from_longitude = Rashi::from_number(sign_from_longitude(lon) as i64);
    if provided != from_longitude {
        diags.push(Diagnostic::ConflictingSign {
            subject: subject.to_string(),
            provided,
            from_longitude,
        });
    }
    from_longitude
}

fn in_sign_degree(longitude: Option<f64>, degree: Option<f64>) -> Option<f64> {
    match longitude {
        Some(lon) => Some(lon % 30.0),
        None => degree.filter(|d| d.is_finite() && (0.0..30.0).contains(d)),
    }
}

// ---------------------------------------------------------------------------
// Shadbala and dashas
// ---------------------------------------------------------------------------

fn build_shadbala(
    raw: &BTreeMap<String, NumberValue>,
    diags: &mut Diagnostics,
) -> Option<BTreeMap<Graha, f64>> {
    let mut out = BTreeMap::new();
    for (name, raw_value) in raw {
        let Some(graha) = parse_graha(name) else {
            diags.push(Diagnostic::UnknownName {
                context: "shadbala".into(),
                name: name.clone(),
                fallback: None,
            });
            continue;
        };
        let context = format!("{} shadbala", graha.english_name());
        let Some(value) = number_field(Some(raw_value), &context, diags) else {
            continue;
        };
        if value < 0.0 {
            tracing::debug!(planet = graha.english_name(), value, "ignoring negative shadbala");
            continue;
        }
        out.insert(graha, value);
    }
    if out.is_empty() { None } else { Some(out) }
}

fn build_dashas(input: &RawChartInput, diags: &mut Diagnostics) -> DashaFacts {
    let raw = &input.dashas;
    DashaFacts {
        vimshottari: build_periods(&raw.vimshottari, 0, DashaSystem::Vimshottari, diags),
        yogini: raw
            .yogini
            .as_ref()
            .map(|list| build_periods(list, 0, DashaSystem::Yogini, diags)),
        current: raw.current.as_ref().and_then(|c| build_current(c, diags)),
        as_of: raw.as_of.clone(),
    }
}

fn build_periods(
    raw: &[RawDashaPeriod],
    depth: usize,
    system: DashaSystem,
    diags: &mut Diagnostics,
) -> Vec<DashaPeriodFact> {
    let Some(&level) = ALL_DASHA_LEVELS.get(depth) else {
        if !raw.is_empty() {
            tracing::debug!(depth, "dropping dasha periods below the finest level");
        }
        return Vec::new();
    };
    let mut out = Vec::with_capacity(raw.len());
    for period in raw {
        let Some(planet) = parse_period_lord(&period.planet, system) else {
            diags.push(Diagnostic::UnknownName {
                context: format!("{} period", level.name()),
                name: period.planet.clone(),
                fallback: None,
            });
            continue;
        };
        out.push(DashaPeriodFact {
            planet,
            start: period.start.clone(),
            end: period.end.clone(),
            level,
            periods: build_periods(&period.periods, depth + 1, system, diags),
        });
    }
    out
}

fn build_current(raw: &RawCurrentDasha, diags: &mut Diagnostics) -> Option<CurrentDashaFact> {
    let mut resolve = |name: &Option<String>, level: DashaLevel| -> Option<Graha> {
        let name = name.as_ref()?;
        let graha = parse_graha(name);
        if graha.is_none() {
            diags.push(Diagnostic::UnknownName {
                context: format!("current {}", level.name()),
                name: name.clone(),
                fallback: None,
            });
        }
        graha
    };
    let maha = resolve(&raw.maha, DashaLevel::Mahadasha)?;
    let antar = resolve(&raw.antar, DashaLevel::Antardasha);
    let pratyantar = resolve(&raw.pratyantar, DashaLevel::Pratyantardasha);
    let sookshma = resolve(&raw.sookshma, DashaLevel::Sookshmadasha);
    Some(CurrentDashaFact {
        maha,
        antar,
        pratyantar,
        sookshma,
    })
}
