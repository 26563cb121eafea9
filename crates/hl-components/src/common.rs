//! Common utilities for segment calculations.

use crate::error::{ComponentError, ComponentResult};
use hl_core::numeric::ensure_finite;

/// Ensure a value is finite, returning ComponentError if not.
pub fn check_finite(value: f64, what: &'static str) -> ComponentResult<()> {
    ensure_finite(value, what).map_err(|_| ComponentError::NonPhysical { what })?;
    Ok(())
}

/// Geometry that must be finite and strictly positive (diameter, length).
pub fn check_positive_geometry(value: f64, what: &'static str) -> ComponentResult<()> {
    if !value.is_finite() {
        return Err(ComponentError::InvalidGeometry {
            what,
            value,
            reason: "must be finite",
        });
    }
    if value <= 0.0 {
        return Err(ComponentError::InvalidGeometry {
            what,
            value,
            reason: "must be positive",
        });
    }
    Ok(())
}

/// Geometry that may be zero but not negative (roughness).
pub fn check_non_negative_geometry(value: f64, what: &'static str) -> ComponentResult<()> {
    if !value.is_finite() {
        return Err(ComponentError::InvalidGeometry {
            what,
            value,
            reason: "must be finite",
        });
    }
    if value < 0.0 {
        return Err(ComponentError::InvalidGeometry {
            what,
            value,
            reason: "must not be negative",
        });
    }
    Ok(())
}
