//! Multi-vocabulary name normalization for grahas and rashis.
//!
//! Chart providers spell the same body or sign in several conventions:
//! English ("Saturn", "Capricorn"), classical Sanskrit ("Shani", "Makara"),
//! regional transliterations ("Sani", "Makar"), and short codes ("Sa",
//! "Cap"). Every string that enters the engine goes through this module,
//! which folds case, strips punctuation and whitespace, and maps the
//! result onto the canonical [`Graha`] / [`Rashi`] vocabulary.

use crate::graha::Graha;
use crate::rashi::Rashi;

/// Rashi used when a sign name cannot be recognized.
pub const DEFAULT_RASHI: Rashi = Rashi::Mesha;

/// Outcome of a lenient sign lookup: either recognized, or replaced by a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved<T> {
    Known(T),
    Defaulted(T),
}

impl<T: Copy> Resolved<T> {
    /// The resolved value, whether recognized or defaulted.
    pub fn value(self) -> T {
        match self {
            Self::Known(v) | Self::Defaulted(v) => v,
        }
    }

    pub fn is_known(self) -> bool {
        matches!(self, Self::Known(_))
    }
}

/// Lowercase ASCII alphanumerics only: `"Mars (R)"` → `"marsr"`, `"North Node"` → `"northnode"`.
pub fn fold_name(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Provider decorations that carry no identity: retrograde markers and the like.
fn strip_decorations(raw: &str) -> &str {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_suffix("(R)").unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix("(r)").unwrap_or(trimmed);
    trimmed.trim()
}

/// Recognize a graha name in any supported vocabulary.
pub fn parse_graha(raw: &str) -> Option<Graha> {
    let key = fold_name(strip_decorations(raw));
    let graha = match key.as_str() {
        "sun" | "surya" | "soorya" | "suraj" | "ravi" | "aditya" | "su" => Graha::Surya,
        "moon" | "chandra" | "chandrama" | "chand" | "soma" | "mo" => Graha::Chandra,
        "mars" | "mangal" | "mangala" | "kuja" | "angaraka" | "bhauma" | "ma" => Graha::Mangal,
        "mercury" | "budh" | "budha" | "buddh" | "buddha" | "me" => Graha::Buddh,
        "jupiter" | "guru" | "brihaspati" | "brhaspati" | "jup" | "ju" => Graha::Guru,
        "venus" | "shukra" | "sukra" | "shukr" | "ve" => Graha::Shukra,
        "saturn" | "shani" | "sani" | "shanaishchara" | "sat" | "sa" => Graha::Shani,
        "rahu" | "northnode" | "truenode" | "meannode" | "dragonshead" | "ra" => Graha::Rahu,
        "ketu" | "southnode" | "dragonstail" | "ke" => Graha::Ketu,
        _ => return None,
    };
    Some(graha)
}

/// True for bodies providers list alongside the grahas but which play no
/// part in graha-based analysis (outer planets, the ascendant itself).
pub fn is_ignored_body(raw: &str) -> bool {
    matches!(
        fold_name(raw).as_str(),
        "uranus" | "neptune" | "pluto" | "chiron" | "ascendant" | "lagna" | "asc" | "as"
    )
}

/// Recognize a rashi name in any supported vocabulary, or a numeric sign id.
///
/// Numeric strings wrap modulo 12 the same way [`Rashi::from_number`] does.
pub fn parse_rashi(raw: &str) -> Option<Rashi> {
    let trimmed = raw.trim();
    if let Ok(n) = trimmed.parse::<i64>() {
        return Some(Rashi::from_number(n));
    }
    let key = fold_name(trimmed);
    let rashi = match key.as_str() {
        "aries" | "mesha" | "mesh" | "ari" => Rashi::Mesha,
        "taurus" | "vrishabha" | "vrishabh" | "vrushabh" | "rishabh" | "vrisha" | "tau" => {
            Rashi::Vrishabha
        }
        "gemini" | "mithuna" | "mithun" | "gem" => Rashi::Mithuna,
        "cancer" | "karka" | "kark" | "karkat" | "kataka" | "can" => Rashi::Karka,
        "leo" | "simha" | "singh" | "sinh" | "simh" => Rashi::Simha,
        "virgo" | "kanya" | "vir" => Rashi::Kanya,
        "libra" | "tula" | "thula" | "lib" => Rashi::Tula,
        "scorpio" | "vrischika" | "vrishchika" | "vrishchik" | "vrischik" | "sco" => {
            Rashi::Vrischika
        }
        "sagittarius" | "dhanu" | "dhanus" | "dhanush" | "sag" => Rashi::Dhanu,
        "capricorn" | "makara" | "makar" | "cap" => Rashi::Makara,
        "aquarius" | "kumbha" | "kumbh" | "aqu" | "aqr" => Rashi::Kumbha,
        "pisces" | "meena" | "meen" | "mina" | "pis" => Rashi::Meena,
        _ => return None,
    };
    Some(rashi)
}

/// Lenient rashi lookup: unknown names fall back to [`DEFAULT_RASHI`].
pub fn resolve_rashi(raw: &str) -> Resolved<Rashi> {
    match parse_rashi(raw) {
        Some(r) => Resolved::Known(r),
        None => Resolved::Defaulted(DEFAULT_RASHI),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graha::ALL_GRAHAS;
    use crate::rashi::ALL_RASHIS;

    #[test]
    fn fold_strips_punctuation() {
        assert_eq!(fold_name("North Node"), "northnode");
        assert_eq!(fold_name("  SATURN "), "saturn");
        assert_eq!(fold_name("Dragon's Head"), "dragonshead");
    }

    #[test]
    fn canonical_names_round_trip() {
        for g in ALL_GRAHAS {
            assert_eq!(parse_graha(g.name()), Some(g));
            assert_eq!(parse_graha(g.english_name()), Some(g));
        }
        for r in ALL_RASHIS {
            assert_eq!(parse_rashi(r.name()), Some(r));
            assert_eq!(parse_rashi(r.western_name()), Some(r));
        }
    }

    #[test]
    fn alternate_spellings() {
        assert_eq!(parse_graha("Sani"), Some(Graha::Shani));
        assert_eq!(parse_graha("Kuja"), Some(Graha::Mangal));
        assert_eq!(parse_graha("Budha"), Some(Graha::Buddh));
        assert_eq!(parse_graha("Mars (R)"), Some(Graha::Mangal));
        assert_eq!(parse_graha("True Node"), Some(Graha::Rahu));
        assert_eq!(parse_rashi("Makar"), Some(Rashi::Makara));
        assert_eq!(parse_rashi("vrishchik"), Some(Rashi::Vrischika));
        assert_eq!(parse_rashi("Aqu"), Some(Rashi::Kumbha));
    }

    #[test]
    fn numeric_signs_wrap() {
        assert_eq!(parse_rashi("10"), Some(Rashi::Makara));
        assert_eq!(parse_rashi("13"), Some(Rashi::Mesha));
        assert_eq!(parse_rashi("0"), Some(Rashi::Meena));
    }

    #[test]
    fn unknown_names_default() {
        assert_eq!(parse_graha("Vulcan"), None);
        assert_eq!(resolve_rashi("Ophiuchus"), Resolved::Defaulted(Rashi::Mesha));
        assert!(resolve_rashi("Leo").is_known());
    }

    #[test]
    fn ignored_bodies() {
        assert!(is_ignored_body("Uranus"));
        assert!(is_ignored_body("Ascendant"));
        assert!(!is_ignored_body("Saturn"));
    }
}
