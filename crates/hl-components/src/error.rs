//! Error types for segment and friction calculations.

use thiserror::Error;

/// Errors that can occur during segment calculations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComponentError {
    #[error("Invalid geometry: {what} = {value} m ({reason})")]
    InvalidGeometry {
        what: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("Invalid flow: Reynolds number {reynolds} must be positive and finite")]
    InvalidFlow { reynolds: f64 },

    #[error("Invalid fluid property: {what} = {value} (must be positive and finite)")]
    InvalidFluid { what: &'static str, value: f64 },

    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error(
        "Friction factor did not converge after {iterations} iterations \
         (last change {last_delta:.3e}, last estimate {estimate})"
    )]
    ConvergenceFailed {
        iterations: usize,
        last_delta: f64,
        estimate: f64,
    },

    #[error("Friction equation undefined at Re = {reynolds}, relative roughness = {relative_roughness}")]
    FrictionDomain {
        reynolds: f64,
        relative_roughness: f64,
    },

    #[error("Unknown friction method: '{name}' (expected colebrook or swamee_jain)")]
    UnknownMethod { name: String },

    #[error("Unknown pipe material: '{name}'")]
    UnknownMaterial { name: String },
}

pub type ComponentResult<T> = Result<T, ComponentError>;
