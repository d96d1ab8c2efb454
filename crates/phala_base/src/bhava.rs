//! Whole-sign bhava (house) arithmetic and house lordship.
//!
//! Houses are counted from the ascendant sign: the ascendant sign is the 1st
//! house, the next sign the 2nd, and so on. [`house_from_signs`] is the one
//! formula every house placement in the engine is derived from.

use crate::graha::{Graha, rashi_lord};
use crate::rashi::Rashi;
use crate::util::normalize_360;

/// Angular houses (kendra).
pub const KENDRA_HOUSES: [u8; 4] = [1, 4, 7, 10];

/// Trinal houses (trikona).
pub const TRIKONA_HOUSES: [u8; 3] = [1, 5, 9];

/// Difficult houses (dusthana).
pub const DUSTHANA_HOUSES: [u8; 3] = [6, 8, 12];

pub fn is_kendra(house: u8) -> bool {
    KENDRA_HOUSES.contains(&house)
}

pub fn is_trikona(house: u8) -> bool {
    TRIKONA_HOUSES.contains(&house)
}

pub fn is_dusthana(house: u8) -> bool {
    DUSTHANA_HOUSES.contains(&house)
}

/// House (1-12) of a planet sign counted from the ascendant sign, both 1-based.
///
/// `((planet_sign - asc_sign + 12) mod 12) + 1`. Out-of-range sign ids
/// wrap modulo 12 instead of being rejected, so `house_from_signs(13, 1) = 1`.
pub fn house_from_signs(planet_sign: i64, asc_sign: i64) -> u8 {
    ((planet_sign.rem_euclid(12) - asc_sign.rem_euclid(12)).rem_euclid(12) + 1) as u8
}

/// Typed form of [`house_from_signs`].
pub fn house_of(rashi: Rashi, ascendant: Rashi) -> u8 {
    house_from_signs(rashi.number() as i64, ascendant.number() as i64)
}

/// House (1-12) from ascendant and planet longitudes (equal 30° houses from the ascendant degree).
pub fn house_from_degrees(asc_deg: f64, planet_deg: f64) -> u8 {
    let diff = normalize_360(planet_deg - asc_deg);
    let house = (diff / 30.0).floor() as u8 + 1;
    if house > 12 { ((house - 1) % 12) + 1 } else { house }
}

/// Count `target` house relative to `reference` house (both 1-based).
///
/// The reference house itself is the 1st: `house_from_house(5, 5) = 1`,
/// `house_from_house(12, 1) = 2`.
pub fn house_from_house(reference: u8, target: u8) -> u8 {
    house_from_signs(target as i64, reference as i64)
}

/// House reached by moving `nth` houses forward from `from` (1-based, 1 = same house).
pub fn nth_house_from(from: u8, nth: u8) -> u8 {
    ((from as u16 + nth as u16 - 2) % 12 + 1) as u8
}

/// Sign occupying a given house for an ascendant.
pub fn sign_of_house(ascendant: Rashi, house: u8) -> Rashi {
    ascendant.nth_from(house)
}

/// Lord of each house 1..=12 for an ascendant; `table[0]` is the 1st-house lord.
pub fn house_lords(ascendant: Rashi) -> [Graha; 12] {
    let mut lords = [Graha::Surya; 12];
    for (i, slot) in lords.iter_mut().enumerate() {
        *slot = rashi_lord(sign_of_house(ascendant, i as u8 + 1));
    }
    lords
}

/// Houses ruled by a graha for an ascendant, ascending. Empty for Rahu/Ketu.
///
/// Derived only from the ascendant sign and the fixed sign→lord table.
pub fn lord_of(graha: Graha, ascendant: Rashi) -> Vec<u8> {
    house_lords(ascendant)
        .iter()
        .enumerate()
        .filter(|(_, lord)| **lord == graha)
        .map(|(i, _)| i as u8 + 1)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taurus_ascendant_aquarius_is_tenth() {
        assert_eq!(house_from_signs(11, 2), 10);
    }

    #[test]
    fn same_sign_is_first() {
        for a in 1..=12 {
            assert_eq!(house_from_signs(a, a), 1);
        }
    }

    #[test]
    fn out_of_range_signs_wrap() {
        assert_eq!(house_from_signs(13, 1), 1);
        assert_eq!(house_from_signs(0, 1), 12);
        assert_eq!(house_from_signs(10, 13), 10);
    }

    #[test]
    fn degrees_agree_with_signs_at_midpoints() {
        for asc in 1..=12i64 {
            for p in 1..=12i64 {
                let asc_deg = (asc - 1) as f64 * 30.0 + 15.0;
                let p_deg = (p - 1) as f64 * 30.0 + 15.0;
                assert_eq!(house_from_degrees(asc_deg, p_deg), house_from_signs(p, asc));
            }
        }
    }

    #[test]
    fn degrees_wrap_across_zero() {
        assert_eq!(house_from_degrees(350.0, 10.0), 1);
        assert_eq!(house_from_degrees(10.0, 350.0), 12);
    }

    #[test]
    fn relative_houses() {
        assert_eq!(house_from_house(5, 5), 1);
        assert_eq!(house_from_house(12, 1), 2);
        assert_eq!(nth_house_from(1, 7), 7);
        assert_eq!(nth_house_from(8, 7), 2);
        assert_eq!(nth_house_from(12, 1), 12);
    }

    #[test]
    fn aries_lordship() {
        assert_eq!(lord_of(Graha::Mangal, Rashi::Mesha), vec![1, 8]);
        assert_eq!(lord_of(Graha::Guru, Rashi::Mesha), vec![9, 12]);
        assert_eq!(lord_of(Graha::Buddh, Rashi::Mesha), vec![3, 6]);
        assert_eq!(lord_of(Graha::Surya, Rashi::Mesha), vec![5]);
        assert!(lord_of(Graha::Rahu, Rashi::Mesha).is_empty());
    }

    #[test]
    fn taurus_saturn_rules_ninth_and_tenth() {
        assert_eq!(lord_of(Graha::Shani, Rashi::Vrishabha), vec![9, 10]);
    }

    #[test]
    fn every_house_has_one_lord() {
        let lords = house_lords(Rashi::Karka);
        assert_eq!(lords[0], Graha::Chandra);
        assert_eq!(lords[1], Graha::Surya);
        assert!(lords.iter().all(|g| !g.is_node()));
    }

    #[test]
    fn house_classes() {
        assert!(is_kendra(10) && !is_kendra(5));
        assert!(is_trikona(9) && !is_trikona(4));
        assert!(is_dusthana(8) && !is_dusthana(11));
    }
}
