use crate::error::{HlError, HlResult};

/// Scalar type for every hydraulic quantity.
pub type Real = f64;

/// Relative difference `|a - b| / max(|a|, |b|)`, zero when both are zero.
pub fn relative_difference(a: Real, b: Real) -> Real {
    let scale = a.abs().max(b.abs());
    if scale == 0.0 {
        0.0
    } else {
        (a - b).abs() / scale
    }
}

pub fn ensure_finite(v: Real, what: &'static str) -> HlResult<Real> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(HlError::NonFinite { what, value: v })
    }
}

/// Finite and strictly greater than zero.
pub fn ensure_positive(v: Real, what: &'static str) -> HlResult<Real> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(HlError::NonPositive { what, value: v })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn ensure_positive_rejects_zero_and_negative() {
        assert!(ensure_positive(0.1, "d").is_ok());
        assert!(matches!(
            ensure_positive(0.0, "d"),
            Err(HlError::NonPositive { what: "d", .. })
        ));
        assert!(ensure_positive(-1.0, "d").is_err());
        assert!(matches!(
            ensure_positive(Real::INFINITY, "d"),
            Err(HlError::NonFinite { .. })
        ));
    }

    #[test]
    fn relative_difference_symmetric() {
        assert_eq!(relative_difference(0.0, 0.0), 0.0);
        let a = relative_difference(1.0, 1.05);
        let b = relative_difference(1.05, 1.0);
        assert_eq!(a, b);
        assert!((a - 0.05 / 1.05).abs() < 1e-15);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn relative_difference_is_symmetric(a in -1.0e12_f64..1.0e12, b in -1.0e12_f64..1.0e12) {
            prop_assert_eq!(relative_difference(a, b), relative_difference(b, a));
        }

        #[test]
        fn relative_difference_bounded(a in 0.0_f64..1.0e6, b in 0.0_f64..1.0e6) {
            let d = relative_difference(a, b);
            prop_assert!((0.0..=1.0).contains(&d));
        }
    }
}
