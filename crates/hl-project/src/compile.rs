//! Project → solver input.

use crate::profile::ElevationProfile;
use crate::schema::{FluidDef, Project, SegmentDef};
use crate::validate::validate_project;
use crate::{ProjectError, ProjectResult};
use hl_components::{FluidProperties, Material, PipeSegment, SolveOptions};
use hl_core::units::{kgpm3, m, m3ps, pas};

/// Everything needed to run a network solve for one project.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkInput {
    pub name: String,
    pub segments: Vec<PipeSegment>,
    pub fluid: FluidProperties,
    pub options: SolveOptions,
    pub profile: Option<ElevationProfile>,
}

/// Validate `project` and turn it into typed solver input.
pub fn compile_project(project: &Project) -> ProjectResult<NetworkInput> {
    validate_project(project)?;

    let segments = project
        .segments
        .iter()
        .map(compile_segment)
        .collect::<ProjectResult<Vec<_>>>()?;

    let mut options = SolveOptions::with_method(project.method);
    if project.strict {
        options = options.strict();
    }

    Ok(NetworkInput {
        name: project.name.clone(),
        segments,
        fluid: compile_fluid(project.fluid.as_ref()),
        options,
        profile: project
            .profile
            .as_ref()
            .map(|p| ElevationProfile::new(p.elevations_m.clone())),
    })
}

fn compile_segment(def: &SegmentDef) -> ProjectResult<PipeSegment> {
    let length = m(def.length_m);
    let diameter = m(def.diameter_m);
    let flow = m3ps(def.flow_m3s);

    let material = match &def.material {
        Some(name) => Some(name.parse::<Material>().map_err(ProjectError::Component)?),
        None => None,
    };

    let segment = match (def.roughness_m, material) {
        (Some(e), material) => PipeSegment {
            material,
            ..PipeSegment::new(length, diameter, flow, m(e))
        },
        (None, Some(material)) => PipeSegment::with_material(length, diameter, flow, material),
        (None, None) => PipeSegment::with_material(length, diameter, flow, Material::DEFAULT),
    };
    Ok(segment)
}

fn compile_fluid(def: Option<&FluidDef>) -> FluidProperties {
    let mut fluid = FluidProperties::water();
    if let Some(def) = def {
        if let Some(mu) = def.viscosity_pa_s {
            fluid.viscosity = pas(mu);
        }
        if let Some(rho) = def.density_kg_m3 {
            fluid.density = kgpm3(rho);
        }
    }
    fluid
}
