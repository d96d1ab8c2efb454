//! Dasha expansion: running periods and the major-period timeline, annotated
//! with the ruler's house, lordship, strength band and life-area themes.

use phala_base::{DashaLevel, DashaSystem, Dignity, Graha, lord_of};
use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::derived::{DerivedBundle, StrengthBand, strength_of};
use crate::fact_sheet::{DashaPeriodFact, FactSheet};

/// Life areas signified by houses 1-12.
pub const HOUSE_AREAS: [&str; 12] = [
    "self and vitality",
    "wealth and family",
    "courage and siblings",
    "home and mother",
    "children and creativity",
    "health and service",
    "partnership and marriage",
    "transformation and longevity",
    "fortune and dharma",
    "career and status",
    "gains and networks",
    "expenses and liberation",
];

/// Life area of a house (1-12).
pub fn house_area(house: u8) -> Option<&'static str> {
    HOUSE_AREAS.get(usize::from(house).checked_sub(1)?).copied()
}

/// One period annotated against the chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashaPeriodView {
    pub planet: Graha,
    /// House of the ruler; None when the ruler is absent from the chart.
    pub house: Option<u8>,
    pub lord_of: Vec<u8>,
    pub strength_band: StrengthBand,
    pub themes: Vec<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub level: DashaLevel,
}

/// Running periods at each depth.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentDashaView {
    pub maha: DashaPeriodView,
    pub antar: Option<DashaPeriodView>,
    pub pratyantar: Option<DashaPeriodView>,
    pub sookshma: Option<DashaPeriodView>,
}

impl CurrentDashaView {
    fn from_chain(mut chain: Vec<DashaPeriodView>) -> Option<Self> {
        chain.truncate(4);
        let mut it = chain.into_iter();
        Some(Self {
            maha: it.next()?,
            antar: it.next(),
            pratyantar: it.next(),
            sookshma: it.next(),
        })
    }

    /// Views from major to finest.
    pub fn levels(&self) -> impl Iterator<Item = &DashaPeriodView> {
        std::iter::once(&self.maha)
            .chain(self.antar.as_ref())
            .chain(self.pratyantar.as_ref())
            .chain(self.sookshma.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpandedDasha {
    pub system: DashaSystem,
    pub current: Option<CurrentDashaView>,
    /// Major periods only.
    pub timeline: Vec<DashaPeriodView>,
}

struct Annotator<'a> {
    facts: &'a FactSheet,
    derived: &'a DerivedBundle,
    config: &'a AnalysisConfig,
}

impl Annotator<'_> {
    fn view(
        &self,
        planet: Graha,
        level: DashaLevel,
        start: Option<String>,
        end: Option<String>,
    ) -> DashaPeriodView {
        let house = self.facts.house_of(planet);
        let lord_of = lord_of(planet, self.facts.ascendant.sign);
        let score = match self.derived.strength(planet) {
            Some(s) => s.score,
            None => strength_of(planet, Dignity::Neutral, None, self.config).score,
        };
        let mut themes = Vec::new();
        if let Some(area) = house.and_then(house_area) {
            themes.push(area.to_string());
        }
        for &h in &lord_of {
            if let Some(area) = house_area(h) {
                themes.push(format!("lordship: {area}"));
            }
        }
        DashaPeriodView {
            planet,
            house,
            lord_of,
            strength_band: self.config.dasha.band(score),
            themes,
            start,
            end,
            level,
        }
    }

    fn period(&self, p: &DashaPeriodFact) -> DashaPeriodView {
        self.view(p.planet, p.level, p.start.clone(), p.end.clone())
    }
}

/// Expand the Vimshottari timeline.
pub fn expand_dashas(
    facts: &FactSheet,
    derived: &DerivedBundle,
    config: &AnalysisConfig,
) -> ExpandedDasha {
    let ann = Annotator {
        facts,
        derived,
        config,
    };
    let periods = &facts.dashas.vimshottari;
    let current = match &facts.dashas.current {
        Some(declared) => declared_chain(&ann, periods, &declared.chain()),
        None => facts
            .dashas
            .as_of
            .as_deref()
            .map(|as_of| running_chain(&ann, periods, as_of))
            .unwrap_or_default(),
    };
    ExpandedDasha {
        system: DashaSystem::Vimshottari,
        current: CurrentDashaView::from_chain(current),
        timeline: periods.iter().map(|p| ann.period(p)).collect(),
    }
}

/// Expand the Yogini timeline, if the provider supplied one.
pub fn expand_yogini(
    facts: &FactSheet,
    derived: &DerivedBundle,
    config: &AnalysisConfig,
) -> Option<ExpandedDasha> {
    let periods = facts.dashas.yogini.as_ref()?;
    let ann = Annotator {
        facts,
        derived,
        config,
    };
    let current = facts
        .dashas
        .as_of
        .as_deref()
        .map(|as_of| running_chain(&ann, periods, as_of))
        .unwrap_or_default();
    Some(ExpandedDasha {
        system: DashaSystem::Yogini,
        current: CurrentDashaView::from_chain(current),
        timeline: periods.iter().map(|p| ann.period(p)).collect(),
    })
}

/// Follow the provider's declared rulers down the period tree, taking dates
/// from the matching period when one exists.
fn declared_chain(
    ann: &Annotator<'_>,
    periods: &[DashaPeriodFact],
    rulers: &[Graha],
) -> Vec<DashaPeriodView> {
    let mut out = Vec::with_capacity(rulers.len());
    let mut level_periods = Some(periods);
    for (&planet, level) in rulers.iter().zip(phala_base::ALL_DASHA_LEVELS) {
        let found = level_periods.and_then(|ps| ps.iter().find(|p| p.planet == planet));
        match found {
            Some(p) => {
                out.push(ann.period(p));
                level_periods = Some(&p.periods);
            }
            None => {
                out.push(ann.view(planet, level, None, None));
                level_periods = None;
            }
        }
    }
    out
}

/// Periods with `start <= as_of < end` at each depth.
///
/// Timestamps are compared as strings, which orders ISO-8601 values of the
/// same format correctly.
fn running_chain(
    ann: &Annotator<'_>,
    periods: &[DashaPeriodFact],
    as_of: &str,
) -> Vec<DashaPeriodView> {
    let mut out = Vec::new();
    let mut level_periods = periods;
    while let Some(p) = level_periods.iter().find(|p| contains(p, as_of)) {
        out.push(ann.period(p));
        level_periods = &p.periods;
    }
    out
}

fn contains(period: &DashaPeriodFact, as_of: &str) -> bool {
    match (period.start.as_deref(), period.end.as_deref()) {
        (Some(start), Some(end)) => start <= as_of && as_of < end,
        _ => false,
    }
}
