//! Project validation logic.

use crate::schema::{FluidDef, LATEST_VERSION, Project, SegmentDef};
use hl_components::Material;
use std::collections::HashSet;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Project '{name}' has no segments")]
    NoSegments { name: String },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.version == 0 || project.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    if project.segments.is_empty() {
        return Err(ValidationError::NoSegments {
            name: project.name.clone(),
        });
    }

    if let Some(fluid) = &project.fluid {
        validate_fluid(fluid)?;
    }

    let mut segment_ids = HashSet::new();
    for (i, segment) in project.segments.iter().enumerate() {
        if !segment_ids.insert(&segment.id) {
            return Err(ValidationError::DuplicateId {
                id: segment.id.clone(),
                context: "segments".to_string(),
            });
        }
        validate_segment(i + 1, segment)?;
    }

    if let Some(profile) = &project.profile {
        for (i, z) in profile.elevations_m.iter().enumerate() {
            if !z.is_finite() {
                return Err(ValidationError::InvalidValue {
                    field: format!("profile station {}", i + 1),
                    value: z.to_string(),
                    reason: "must be finite".to_string(),
                });
            }
        }
    }

    Ok(())
}

fn validate_fluid(fluid: &FluidDef) -> Result<(), ValidationError> {
    for (field, value) in [
        ("fluid viscosity_pa_s", fluid.viscosity_pa_s),
        ("fluid density_kg_m3", fluid.density_kg_m3),
    ] {
        if let Some(v) = value {
            require_positive(field.to_string(), v)?;
        }
    }
    Ok(())
}

fn validate_segment(position: usize, segment: &SegmentDef) -> Result<(), ValidationError> {
    let label = |field: &str| {
        format!(
            "segment {} ('{}') {}",
            position,
            segment.display_name(),
            field
        )
    };

    require_positive(label("length_m"), segment.length_m)?;
    require_positive(label("diameter_m"), segment.diameter_m)?;

    if !segment.flow_m3s.is_finite() {
        return Err(ValidationError::InvalidValue {
            field: label("flow_m3s"),
            value: segment.flow_m3s.to_string(),
            reason: "must be finite".to_string(),
        });
    }

    if let Some(e) = segment.roughness_m {
        if !e.is_finite() || e < 0.0 {
            return Err(ValidationError::InvalidValue {
                field: label("roughness_m"),
                value: e.to_string(),
                reason: "must be non-negative and finite".to_string(),
            });
        }
    }

    if let Some(name) = &segment.material {
        if name.parse::<Material>().is_err() {
            let known: Vec<&str> = Material::ALL.iter().map(|m| m.key()).collect();
            return Err(ValidationError::InvalidValue {
                field: label("material"),
                value: name.clone(),
                reason: format!("unknown material, expected one of {}", known.join(", ")),
            });
        }
    }

    let roughness = match (segment.roughness_m, &segment.material) {
        (Some(e), _) => e,
        (None, Some(name)) => name.parse::<Material>().map_or(0.0, |m| m.roughness_m()),
        (None, None) => Material::DEFAULT.roughness_m(),
    };
    // ε/D ≥ 0.5 drives the Colebrook log argument towards 1, where the
    // iteration settles on an absurd factor without warning.
    if roughness >= 0.5 * segment.diameter_m {
        return Err(ValidationError::InvalidValue {
            field: label("roughness_m"),
            value: roughness.to_string(),
            reason: format!(
                "must be less than half the diameter ({} m)",
                segment.diameter_m
            ),
        });
    }

    Ok(())
}

fn require_positive(field: String, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::InvalidValue {
            field,
            value: value.to_string(),
            reason: "must be positive and finite".to_string(),
        });
    }
    Ok(())
}
