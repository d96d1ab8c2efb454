//! Navamsha (D9) divisional sign from a sidereal longitude.
//!
//! Each rashi is split into 9 parts of 3°20'. Counting continues across
//! sign boundaries, so the navamsha index is simply `floor(lon * 9 / 30) mod 12`.
//! This reproduces the fire/earth/air/water starting-sign rule of BPHS.

use crate::rashi::Rashi;
use crate::util::normalize_360;

/// Label used for navamsha placements.
pub const NAVAMSHA_CHART: &str = "D9";

/// Span of one navamsha in degrees.
pub const NAVAMSHA_SPAN_DEG: f64 = 30.0 / 9.0;

/// Navamsha rashi for a sidereal longitude.
pub fn navamsha_sign(lon_deg: f64) -> Rashi {
    let part = (normalize_360(lon_deg) / NAVAMSHA_SPAN_DEG).floor() as u16;
    // Floating point can land on exactly 108 just below 360.0
    Rashi::from_index((part.min(107) % 12) as u8)
}
