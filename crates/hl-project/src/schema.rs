//! Project schema definitions.

use hl_components::FrictionMethod;
use serde::{Deserialize, Serialize};

pub const LATEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub version: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fluid: Option<FluidDef>,
    #[serde(default)]
    pub method: FrictionMethod,
    /// Treat non-converged friction estimates as errors.
    #[serde(default)]
    pub strict: bool,
    #[serde(default)]
    pub segments: Vec<SegmentDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileDef>,
}

/// Partial override of the default water properties.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct FluidDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viscosity_pa_s: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density_kg_m3: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SegmentDef {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub length_m: f64,
    pub diameter_m: f64,
    pub flow_m3s: f64,
    /// Absolute roughness; takes precedence over `material`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roughness_m: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
}

impl SegmentDef {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// Longitudinal elevation profile, one value per station.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ProfileDef {
    #[serde(default)]
    pub elevations_m: Vec<f64>,
}
