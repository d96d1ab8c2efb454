//! Rashi (zodiac sign) vocabulary and sign-from-longitude arithmetic.
//!
//! The ecliptic circle is divided into 12 equal signs of 30 degrees each,
//! starting from Mesha (Aries) at 0 deg. Signs are numbered 1..=12 at the
//! public boundary (Mesha = 1) and indexed 0..=11 internally.

use serde::{Serialize, Serializer};

use crate::util::{normalize_360, wrap_12};

/// The 12 rashis (zodiac signs) starting from Mesha (Aries).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rashi {
    Mesha,
    Vrishabha,
    Mithuna,
    Karka,
    Simha,
    Kanya,
    Tula,
    Vrischika,
    Dhanu,
    Makara,
    Kumbha,
    Meena,
}

/// All 12 rashis in order (0 = Mesha, 11 = Meena).
pub const ALL_RASHIS: [Rashi; 12] = [
    Rashi::Mesha,
    Rashi::Vrishabha,
    Rashi::Mithuna,
    Rashi::Karka,
    Rashi::Simha,
    Rashi::Kanya,
    Rashi::Tula,
    Rashi::Vrischika,
    Rashi::Dhanu,
    Rashi::Makara,
    Rashi::Kumbha,
    Rashi::Meena,
];

impl Rashi {
    /// Sanskrit name of the rashi.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mesha => "Mesha",
            Self::Vrishabha => "Vrishabha",
            Self::Mithuna => "Mithuna",
            Self::Karka => "Karka",
            Self::Simha => "Simha",
            Self::Kanya => "Kanya",
            Self::Tula => "Tula",
            Self::Vrischika => "Vrischika",
            Self::Dhanu => "Dhanu",
            Self::Makara => "Makara",
            Self::Kumbha => "Kumbha",
            Self::Meena => "Meena",
        }
    }

    /// Western (English) name of the rashi.
    pub const fn western_name(self) -> &'static str {
        match self {
            Self::Mesha => "Aries",
            Self::Vrishabha => "Taurus",
            Self::Mithuna => "Gemini",
            Self::Karka => "Cancer",
            Self::Simha => "Leo",
            Self::Kanya => "Virgo",
            Self::Tula => "Libra",
            Self::Vrischika => "Scorpio",
            Self::Dhanu => "Sagittarius",
            Self::Makara => "Capricorn",
            Self::Kumbha => "Aquarius",
            Self::Meena => "Pisces",
        }
    }

    /// 0-based index (Mesha=0 .. Meena=11).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// 1-based sign number (Mesha=1 .. Meena=12).
    pub const fn number(self) -> u8 {
        self as u8 + 1
    }

    /// Rashi from a 1-based number, wrapping out-of-range values (0 → Meena, 13 → Mesha).
    pub fn from_number(number: i64) -> Self {
        ALL_RASHIS[(wrap_12(number) - 1) as usize]
    }

    /// Rashi from a 0-based index, wrapping modulo 12.
    pub fn from_index(index: u8) -> Self {
        ALL_RASHIS[(index % 12) as usize]
    }

    /// The rashi `offset` signs after this one (1-based offset, 1 = same sign).
    pub fn nth_from(self, offset: u8) -> Self {
        Self::from_number(self.number() as i64 + offset as i64 - 1)
    }
}

impl Serialize for Rashi {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.number())
    }
}

/// Degrees-minutes-seconds representation of an angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Dms {
    /// Whole degrees.
    pub degrees: u16,
    /// Arc-minutes (0..59).
    pub minutes: u8,
    /// Arc-seconds (0.0..60.0), may include fractional part.
    pub seconds: f64,
}

/// Full rashi position result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RashiInfo {
    /// The rashi (zodiac sign).
    pub rashi: Rashi,
    /// Position within the rashi as DMS.
    pub dms: Dms,
    /// Decimal degrees within the rashi [0.0, 30.0).
    pub degrees_in_rashi: f64,
}

/// Convert decimal degrees to degrees-minutes-seconds.
///
/// Handles negative input by taking absolute value.
pub fn deg_to_dms(deg: f64) -> Dms {
    let d = deg.abs();
    let total_degrees = d.floor() as u16;
    let remainder = (d - total_degrees as f64) * 60.0;
    let minutes = remainder.floor() as u8;
    let seconds = (remainder - minutes as f64) * 60.0;
    Dms {
        degrees: total_degrees,
        minutes,
        seconds,
    }
}

/// 1-based sign number from a sidereal longitude: `floor(normalize(lon) / 30) + 1`.
pub fn sign_from_longitude(lon_deg: f64) -> u8 {
    let idx = (normalize_360(lon_deg) / 30.0).floor() as u8;
    // Clamp in case of floating point edge just below 360.0
    idx.min(11) + 1
}

/// Determine rashi and in-sign position from a sidereal longitude.
pub fn rashi_from_longitude(lon_deg: f64) -> RashiInfo {
    let lon = normalize_360(lon_deg);
    let rashi = Rashi::from_number(sign_from_longitude(lon) as i64);
    let degrees_in_rashi = lon - (rashi.index() as f64) * 30.0;
    RashiInfo {
        rashi,
        dms: deg_to_dms(degrees_in_rashi),
        degrees_in_rashi,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rashi_numbers_sequential() {
        for (i, r) in ALL_RASHIS.iter().enumerate() {
            assert_eq!(r.index() as usize, i);
            assert_eq!(r.number() as usize, i + 1);
        }
    }

    #[test]
    fn rashi_names_nonempty() {
        for r in ALL_RASHIS {
            assert!(!r.name().is_empty());
            assert!(!r.western_name().is_empty());
        }
    }

    #[test]
    fn from_number_wraps() {
        assert_eq!(Rashi::from_number(1), Rashi::Mesha);
        assert_eq!(Rashi::from_number(12), Rashi::Meena);
        assert_eq!(Rashi::from_number(0), Rashi::Meena);
        assert_eq!(Rashi::from_number(13), Rashi::Mesha);
    }

    #[test]
    fn nth_from_wraps() {
        assert_eq!(Rashi::Meena.nth_from(2), Rashi::Mesha);
        assert_eq!(Rashi::Mesha.nth_from(7), Rashi::Tula);
        assert_eq!(Rashi::Mesha.nth_from(1), Rashi::Mesha);
    }

    #[test]
    fn sign_boundaries() {
        for i in 0..12u8 {
            assert_eq!(sign_from_longitude(i as f64 * 30.0), i + 1);
        }
        assert_eq!(sign_from_longitude(29.999), 1);
        assert_eq!(sign_from_longitude(359.999), 12);
    }

    #[test]
    fn sign_negative_and_large() {
        assert_eq!(sign_from_longitude(-10.0), 12);
        assert_eq!(sign_from_longitude(365.0), 1);
    }

    #[test]
    fn rashi_mid_sign() {
        let info = rashi_from_longitude(45.5);
        assert_eq!(info.rashi, Rashi::Vrishabha);
        assert!((info.degrees_in_rashi - 15.5).abs() < 1e-10);
        assert_eq!(info.dms.degrees, 15);
        assert_eq!(info.dms.minutes, 30);
    }

    #[test]
    fn deg_to_dms_known() {
        let d = deg_to_dms(23.853);
        assert_eq!(d.degrees, 23);
        assert_eq!(d.minutes, 51);
        assert!((d.seconds - 10.8).abs() < 0.01);
    }
}
