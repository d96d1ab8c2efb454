//! Shared utility functions for sign and house arithmetic.

/// Normalize an angle to [0, 360) degrees.
///
/// Non-finite input collapses to 0.0 so downstream sign math stays in range.
pub fn normalize_360(deg: f64) -> f64 {
    if !deg.is_finite() {
        return 0.0;
    }
    let r = deg % 360.0;
    let r = if r < 0.0 { r + 360.0 } else { r };
    // -1e-17 % 360 + 360 rounds to exactly 360.0
    if r >= 360.0 { 0.0 } else { r }
}

/// Wrap any integer into the 1-based cycle [1, 12].
///
/// `wrap_12(0) = 12`, `wrap_12(13) = 1`, `wrap_12(-1) = 11`.
pub fn wrap_12(value: i64) -> u8 {
    ((value.rem_euclid(12) + 11) % 12 + 1) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_zero() {
        assert!((normalize_360(0.0) - 0.0).abs() < 1e-15);
    }

    #[test]
    fn normalize_360_wraps() {
        assert!((normalize_360(360.0) - 0.0).abs() < 1e-15);
    }

    #[test]
    fn normalize_negative() {
        assert!((normalize_360(-10.0) - 350.0).abs() < 1e-15);
    }

    #[test]
    fn normalize_large() {
        assert!((normalize_360(730.0) - 10.0).abs() < 1e-10);
    }

    #[test]
    fn normalize_tiny_negative_stays_below_360() {
        let r = normalize_360(-1e-17);
        assert!((0.0..360.0).contains(&r));
    }

    #[test]
    fn normalize_nan_is_zero() {
        assert_eq!(normalize_360(f64::NAN), 0.0);
    }

    #[test]
    fn wrap_12_cycle() {
        assert_eq!(wrap_12(1), 1);
        assert_eq!(wrap_12(12), 12);
        assert_eq!(wrap_12(0), 12);
        assert_eq!(wrap_12(13), 1);
        assert_eq!(wrap_12(-1), 11);
        assert_eq!(wrap_12(25), 1);
    }

    #[test]
    fn wrap_12_extremes() {
        assert_eq!(wrap_12(i64::MIN), 4);
        assert_eq!(wrap_12(i64::MAX), 7);
        assert_eq!(wrap_12(i64::MIN + 1), 5);
    }
}
