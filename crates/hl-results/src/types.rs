//! Report data types.

use hl_components::{FrictionMethod, PipeSegment};
use hl_project::ElevationProfile;
use hl_solver::NetworkResult;
use serde::{Deserialize, Serialize};

use crate::{ResultsError, ResultsResult};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Report {
    pub name: String,
    pub method: FrictionMethod,
    pub segments: Vec<SegmentRecord>,
    pub total_head_loss_m: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub profile_m: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_elevation_change_m: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<WarningRecord>,
}

/// One row of the segment table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SegmentRecord {
    /// 1-based position in the network
    pub position: usize,
    pub length_m: f64,
    pub diameter_m: f64,
    pub flow_m3s: f64,
    pub roughness_m: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    pub velocity_mps: f64,
    pub reynolds: f64,
    pub friction_factor: f64,
    pub iterations: usize,
    pub head_loss_m: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WarningRecord {
    pub position: usize,
    pub message: String,
}

impl Report {
    /// Pair each input segment with its solved state.
    pub fn build(
        name: &str,
        method: FrictionMethod,
        inputs: &[PipeSegment],
        network: &NetworkResult,
        profile: Option<&ElevationProfile>,
    ) -> ResultsResult<Self> {
        if inputs.len() != network.len() {
            return Err(ResultsError::LengthMismatch {
                inputs: inputs.len(),
                results: network.len(),
            });
        }

        let segments = inputs
            .iter()
            .zip(&network.segments)
            .enumerate()
            .map(|(i, (input, result))| SegmentRecord {
                position: i + 1,
                length_m: input.length.value,
                diameter_m: input.diameter.value,
                flow_m3s: input.flow.value,
                roughness_m: input.roughness.value,
                material: input.material.map(|m| m.key().to_string()),
                velocity_mps: result.velocity.value,
                reynolds: result.reynolds,
                friction_factor: result.friction_factor,
                iterations: result.iterations,
                head_loss_m: result.head_loss.value,
            })
            .collect();

        let warnings = network
            .warnings()
            .into_iter()
            .map(|w| WarningRecord {
                position: w.position,
                message: w.warning.to_string(),
            })
            .collect();

        Ok(Self {
            name: name.to_string(),
            method,
            segments,
            total_head_loss_m: network.total_head_loss.value,
            profile_m: profile.map(|p| p.elevations_m.clone()).unwrap_or_default(),
            net_elevation_change_m: profile.map(ElevationProfile::net_change),
            warnings,
        })
    }
}
