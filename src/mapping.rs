//! Range mapping helpers.

use crate::error::{PipelineError, Result};

/// Position of `value` within `[lo, hi]` as a fraction.
///
/// Not clamped: values outside the range give fractions outside `[0, 1]`.
pub fn fractionate(value: f64, lo: f64, hi: f64) -> Result<f64> {
    if lo == hi || !lo.is_finite() || !hi.is_finite() {
        return Err(PipelineError::InvalidRange { lo, hi });
    }
    Ok((value - lo) / (hi - lo))
}

/// Affinely map `value` from `[lo, hi]` onto `[out_lo, out_hi]`.
pub fn modulate(value: f64, lo: f64, hi: f64, out_lo: f64, out_hi: f64) -> Result<f64> {
    let fraction = fractionate(value, lo, hi)?;
    let delta = out_hi - out_lo;
    Ok(out_lo + fraction * delta)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RANGES: [(f64, f64); 5] = [
        (0.0, 1.0),
        (-3.0, 5.0),
        (10.0, 2.0),
        (0.25, 0.75),
        (-1.0, 0.0),
    ];

    #[test]
    fn test_fractionate_endpoints() {
        for (lo, hi) in RANGES {
            assert_eq!(fractionate(lo, lo, hi).unwrap(), 0.0);
            assert_eq!(fractionate(hi, lo, hi).unwrap(), 1.0);
        }
    }

    #[test]
    fn test_fractionate_is_unclamped() {
        assert_eq!(fractionate(2.0, 0.0, 1.0).unwrap(), 2.0);
        assert_eq!(fractionate(-0.5, 0.0, 1.0).unwrap(), -0.5);
    }

    #[test]
    fn test_equal_bounds_are_rejected() {
        assert_eq!(
            fractionate(0.5, 1.0, 1.0),
            Err(PipelineError::InvalidRange { lo: 1.0, hi: 1.0 })
        );
        assert!(modulate(0.5, 2.0, 2.0, 0.0, 8.0).is_err());
        assert!(fractionate(0.5, 0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_modulate_endpoints() {
        assert_eq!(modulate(0.0, 0.0, 1.0, 0.0, 8.0).unwrap(), 0.0);
        assert_eq!(modulate(1.0, 0.0, 1.0, 0.0, 8.0).unwrap(), 8.0);
        assert_eq!(modulate(-3.0, -3.0, 5.0, 2.0, 4.0).unwrap(), 2.0);
        assert_eq!(modulate(5.0, -3.0, 5.0, 2.0, 4.0).unwrap(), 4.0);
    }

    #[test]
    fn test_modulate_onto_unit_range_is_fractionate() {
        for (lo, hi) in RANGES {
            for i in -4..=12 {
                let v = i as f64 * 0.37;
                assert_eq!(
                    modulate(v, lo, hi, 0.0, 1.0).unwrap(),
                    fractionate(v, lo, hi).unwrap()
                );
            }
        }
    }

    #[test]
    fn test_modulate_is_affine_and_monotonic() {
        let map = |v: f64| modulate(v, 0.0, 1.0, 0.0, 4.0).unwrap();

        let mut previous = map(-1.0);
        for i in -9..=30 {
            let v = i as f64 * 0.1;
            let y = map(v);
            assert!(y > previous);
            previous = y;

            // Constant slope of (out_hi - out_lo) / (hi - lo)
            assert!((map(v + 0.5) - y - 2.0).abs() < 1e-12);
        }

        // Inverted output range is monotonic decreasing
        let down = |v: f64| modulate(v, 0.0, 1.0, 4.0, 0.0).unwrap();
        assert!(down(0.2) > down(0.8));
    }
}
