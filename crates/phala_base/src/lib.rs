//! Static jyotish tables and sign/house arithmetic.
//!
//! This crate provides:
//! - Graha and rashi vocabularies with multi-convention name parsing
//! - Sign-from-longitude and the whole-sign house formula
//! - House lordship, dignity, natural friendship and house drishti tables
//! - Dasha level and yogini vocabularies, navamsha signs
//!
//! Everything here is pure data or pure arithmetic: no I/O, no logging,
//! no mutable state. Clean-room tables from BPHS.

pub mod amsha;
pub mod bhava;
pub mod dasha;
pub mod dignity;
pub mod drishti;
pub mod graha;
pub mod names;
pub mod rashi;
pub mod util;

pub use amsha::{NAVAMSHA_CHART, navamsha_sign};
pub use bhava::{
    DUSTHANA_HOUSES, KENDRA_HOUSES, TRIKONA_HOUSES, house_from_degrees, house_from_house,
    house_from_signs, house_lords, house_of, is_dusthana, is_kendra, is_trikona, lord_of,
    nth_house_from, sign_of_house,
};
pub use dasha::{
    ALL_DASHA_LEVELS, DashaLevel, DashaSystem, YOGINI_GRAHAS, YOGINI_NAMES, parse_period_lord,
    parse_yogini, yogini_graha,
};
pub use dignity::{
    ALL_DIGNITIES, Dignity, NaisargikaMaitri, debilitation_sign, dignity_in_sign,
    exaltation_sign, naisargika_maitri, natural_friends, natural_neutrals, own_signs,
};
pub use drishti::{AspectKind, HouseDrishti, aspect_kind, aspect_offsets, aspects_house, house_drishti};
pub use graha::{
    ALL_GRAHAS, BeneficNature, Graha, SAPTA_GRAHAS, is_natural_malefic, natural_benefic_malefic,
    rashi_lord,
};
pub use names::{
    DEFAULT_RASHI, Resolved, fold_name, is_ignored_body, parse_graha, parse_rashi,
    resolve_rashi,
};
pub use rashi::{ALL_RASHIS, Dms, Rashi, RashiInfo, deg_to_dms, rashi_from_longitude, sign_from_longitude};
pub use util::{normalize_360, wrap_12};

