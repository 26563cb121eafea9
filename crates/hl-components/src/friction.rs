//! Darcy friction factor for fully developed pipe flow.
//!
//! Below `Re = 2300` the laminar law `f = 64/Re` is exact and used regardless
//! of the requested method. Above it, one of two turbulent correlations is
//! applied:
//!
//! - [`FrictionMethod::Colebrook`]: implicit Colebrook–White equation solved
//!   by fixed-point iteration.
//! - [`FrictionMethod::SwameeJain`]: explicit approximation, accurate for
//!   `4e3 < Re < 1e8` and `1e-6 < ε/D < 1e-2`. Inputs outside that envelope
//!   are not rejected.
//!
//! The Colebrook iteration never fails on numerical grounds. When it runs out
//! of iterations or hits an undefined logarithm it returns its best estimate
//! tagged with a [`FrictionWarning`], and the caller decides what to do with it.

use std::fmt;
use std::str::FromStr;

use crate::error::{ComponentError, ComponentResult};
use hl_core::units::constants::RE_LAMINAR_MAX;

/// Correlation used for the turbulent branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum FrictionMethod {
    #[default]
    Colebrook,
    SwameeJain,
}

impl FrictionMethod {
    pub const ALL: [FrictionMethod; 2] = [FrictionMethod::Colebrook, FrictionMethod::SwameeJain];

    pub fn as_str(self) -> &'static str {
        match self {
            FrictionMethod::Colebrook => "colebrook",
            FrictionMethod::SwameeJain => "swamee_jain",
        }
    }
}

impl fmt::Display for FrictionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FrictionMethod {
    type Err = ComponentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match key.as_str() {
            "colebrook" | "colebrook_white" => Ok(FrictionMethod::Colebrook),
            "swamee_jain" | "swamee" => Ok(FrictionMethod::SwameeJain),
            _ => Err(ComponentError::UnknownMethod {
                name: s.to_string(),
            }),
        }
    }
}

/// Flow regime selected from the Reynolds number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum FlowRegime {
    Laminar,
    Turbulent,
}

impl FlowRegime {
    /// `Re < 2300` is laminar; exactly 2300 is already turbulent.
    pub fn classify(reynolds: f64) -> Self {
        if reynolds < RE_LAMINAR_MAX {
            FlowRegime::Laminar
        } else {
            FlowRegime::Turbulent
        }
    }
}

impl fmt::Display for FlowRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowRegime::Laminar => f.write_str("laminar"),
            FlowRegime::Turbulent => f.write_str("turbulent"),
        }
    }
}

/// Why a Colebrook estimate is not a clean converged answer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrictionWarning {
    /// Iteration cap reached; `last_delta` is the final `|f_{n+1} - f_n|`.
    NotConverged { iterations: usize, last_delta: f64 },
    /// Logarithm argument became non-positive or non-finite at `iteration`;
    /// the value is the last estimate computed before that point.
    Degenerate { iteration: usize },
}

impl fmt::Display for FrictionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrictionWarning::NotConverged {
                iterations,
                last_delta,
            } => write!(
                f,
                "Colebrook iteration not converged after {iterations} iterations (last change {last_delta:.3e})"
            ),
            FrictionWarning::Degenerate { iteration } => write!(
                f,
                "Colebrook iteration aborted at iteration {iteration}: logarithm undefined, using last stable estimate"
            ),
        }
    }
}

/// Friction factor together with how it was obtained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrictionFactor {
    /// Darcy friction factor (dimensionless)
    pub value: f64,
    pub regime: FlowRegime,
    /// Fixed-point iterations performed (0 for closed forms)
    pub iterations: usize,
    pub warning: Option<FrictionWarning>,
}

impl FrictionFactor {
    fn closed_form(value: f64, regime: FlowRegime) -> Self {
        Self {
            value,
            regime,
            iterations: 0,
            warning: None,
        }
    }

    pub fn is_converged(&self) -> bool {
        self.warning.is_none()
    }
}

/// Fixed-point iteration settings for Colebrook–White.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColebrookConfig {
    /// Starting estimate f₀
    pub initial_guess: f64,
    /// Stop when `|f_{n+1} - f_n|` drops below this
    pub tolerance: f64,
    /// Hard cap on iterations
    pub max_iterations: usize,
}

impl Default for ColebrookConfig {
    fn default() -> Self {
        Self {
            initial_guess: 0.02,
            tolerance: 1e-6,
            max_iterations: 40,
        }
    }
}

/// Darcy friction factor with default Colebrook settings.
///
/// `roughness` and `diameter` are in metres.
pub fn friction_factor(
    reynolds: f64,
    roughness: f64,
    diameter: f64,
    method: FrictionMethod,
) -> ComponentResult<FrictionFactor> {
    friction_factor_with(
        reynolds,
        roughness,
        diameter,
        method,
        &ColebrookConfig::default(),
    )
}

/// Darcy friction factor with explicit Colebrook settings.
///
/// # Errors
/// - [`ComponentError::InvalidFlow`] if `reynolds` is not a positive finite number.
/// - [`ComponentError::InvalidGeometry`] if `diameter` is not positive.
/// - [`ComponentError::FrictionDomain`] if Swamee–Jain is undefined for the inputs.
pub fn friction_factor_with(
    reynolds: f64,
    roughness: f64,
    diameter: f64,
    method: FrictionMethod,
    config: &ColebrookConfig,
) -> ComponentResult<FrictionFactor> {
    if !(reynolds > 0.0) || !reynolds.is_finite() {
        return Err(ComponentError::InvalidFlow { reynolds });
    }

    if let FlowRegime::Laminar = FlowRegime::classify(reynolds) {
        return Ok(FrictionFactor::closed_form(
            64.0 / reynolds,
            FlowRegime::Laminar,
        ));
    }

    crate::common::check_positive_geometry(diameter, "diameter")?;
    let relative_roughness = roughness / diameter;

    match method {
        FrictionMethod::SwameeJain => swamee_jain(reynolds, relative_roughness),
        FrictionMethod::Colebrook => Ok(colebrook(reynolds, relative_roughness, config)),
    }
}

/// Swamee–Jain: `f = 0.25 / [log10(ε/(3.7D) + 5.74/Re^0.9)]²`.
pub fn swamee_jain(reynolds: f64, relative_roughness: f64) -> ComponentResult<FrictionFactor> {
    let domain_error = || ComponentError::FrictionDomain {
        reynolds,
        relative_roughness,
    };

    let arg = relative_roughness / 3.7 + 5.74 / reynolds.powf(0.9);
    if !(arg > 0.0) || !arg.is_finite() {
        return Err(domain_error());
    }

    let log = arg.log10();
    if log == 0.0 {
        return Err(domain_error());
    }

    let f = 0.25 / (log * log);
    if !(f > 0.0) || !f.is_finite() {
        return Err(domain_error());
    }

    Ok(FrictionFactor::closed_form(f, FlowRegime::Turbulent))
}

/// Colebrook–White by Picard iteration:
/// `f_{n+1} = 1 / [-2 log10(ε/(3.7D) + 2.51/(Re √f_n))]²`.
///
/// Always returns a value; see [`FrictionWarning`] for the non-clean outcomes.
///
/// The degenerate guard only catches a non-positive or non-finite log
/// argument. Roughness of the order of the diameter (ε/D near 3.7) puts the
/// argument just below 1 and the iteration converges to a huge factor with no
/// warning; project validation rejects ε ≥ D/2 for that reason.
pub fn colebrook(
    reynolds: f64,
    relative_roughness: f64,
    config: &ColebrookConfig,
) -> FrictionFactor {
    let rough_term = relative_roughness / 3.7;
    let viscous_term = 2.51 / reynolds;

    let mut f = config.initial_guess;
    let mut last_delta = f64::INFINITY;

    for iteration in 1..=config.max_iterations {
        let arg = rough_term + viscous_term / f.sqrt();
        if !(arg > 0.0) || !arg.is_finite() {
            return degenerate(f, iteration);
        }

        let x = -2.0 * arg.log10();
        let f_new = 1.0 / (x * x);
        if !(f_new > 0.0) || !f_new.is_finite() {
            return degenerate(f, iteration);
        }

        last_delta = (f_new - f).abs();
        if last_delta < config.tolerance {
            return FrictionFactor {
                value: f_new,
                regime: FlowRegime::Turbulent,
                iterations: iteration,
                warning: None,
            };
        }
        f = f_new;
    }

    FrictionFactor {
        value: f,
        regime: FlowRegime::Turbulent,
        iterations: config.max_iterations,
        warning: Some(FrictionWarning::NotConverged {
            iterations: config.max_iterations,
            last_delta,
        }),
    }
}

fn degenerate(last_stable: f64, iteration: usize) -> FrictionFactor {
    FrictionFactor {
        value: last_stable,
        regime: FlowRegime::Turbulent,
        iterations: iteration,
        warning: Some(FrictionWarning::Degenerate { iteration }),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn laminar_law_dominates(re in 1.0e-3_f64..2299.9, rough in 0.0_f64..1e-3) {
            for method in FrictionMethod::ALL {
                let f = friction_factor(re, rough, 0.1, method).unwrap();
                prop_assert_eq!(f.value, 64.0 / re);
            }
        }

        #[test]
        fn turbulent_factor_positive(re in 4.0e3_f64..1.0e8, rr in 1.0e-6_f64..1.0e-2) {
            for method in FrictionMethod::ALL {
                let f = friction_factor(re, rr * 0.2, 0.2, method).unwrap();
                prop_assert!(f.value > 0.0 && f.value.is_finite());
                prop_assert!(f.is_converged());
            }
        }
    }
}
