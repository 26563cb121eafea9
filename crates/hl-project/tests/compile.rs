use hl_components::{ConvergencePolicy, FrictionMethod, Material};
use hl_project::schema::*;
use hl_project::{ElevationMatrix, ProjectError, compile_project};

fn segment(id: &str, roughness_m: Option<f64>, material: Option<&str>) -> SegmentDef {
    SegmentDef {
        id: id.to_string(),
        name: None,
        length_m: 100.0,
        diameter_m: 0.1,
        flow_m3s: 0.01,
        roughness_m,
        material: material.map(str::to_string),
    }
}

fn project(segments: Vec<SegmentDef>) -> Project {
    Project {
        version: LATEST_VERSION,
        name: "Compile".to_string(),
        fluid: None,
        method: FrictionMethod::Colebrook,
        strict: false,
        segments,
        profile: None,
    }
}

#[test]
fn roughness_resolution_order() {
    let p = project(vec![
        segment("explicit", Some(2e-5), Some("concrete")),
        segment("material", None, Some("Galvanized Steel")),
        segment("default", None, None),
    ]);
    let input = compile_project(&p).unwrap();

    assert_eq!(input.segments[0].roughness.value, 2e-5);
    assert_eq!(input.segments[0].material, Some(Material::Concrete));
    assert_eq!(input.segments[1].roughness.value, 1.5e-4);
    assert_eq!(input.segments[2].roughness.value, 1.5e-6);
    assert_eq!(input.segments[2].material, Some(Material::Pvc));
}

#[test]
fn fluid_override_is_partial() {
    let mut p = project(vec![segment("a", None, None)]);
    p.fluid = Some(FluidDef {
        viscosity_pa_s: None,
        density_kg_m3: Some(998.0),
    });
    let input = compile_project(&p).unwrap();
    assert_eq!(input.fluid.density.value, 998.0);
    assert_eq!(input.fluid.viscosity.value, 1e-3);
}

#[test]
fn options_follow_project() {
    let mut p = project(vec![segment("a", None, None)]);
    p.method = FrictionMethod::SwameeJain;
    p.strict = true;
    let input = compile_project(&p).unwrap();
    assert_eq!(input.options.method, FrictionMethod::SwameeJain);
    assert_eq!(input.options.policy, ConvergencePolicy::Strict);
    assert_eq!(input.name, "Compile");
}

#[test]
fn profile_is_carried() {
    let mut p = project(vec![segment("a", None, None)]);
    p.profile = Some(ProfileDef {
        elevations_m: vec![12.0, 10.0],
    });
    let input = compile_project(&p).unwrap();
    assert_eq!(input.profile.unwrap().net_change(), -2.0);
}

#[test]
fn invalid_project_does_not_compile() {
    let p = project(vec![segment("a", None, Some("cardboard"))]);
    assert!(matches!(
        compile_project(&p),
        Err(ProjectError::Validation(_))
    ));
}

#[test]
fn matrix_column_feeds_profile() {
    let matrix = ElevationMatrix::parse("100 101 102\n99 100 101\n98 99 100\n").unwrap();
    let profile = matrix.column(0).unwrap();
    assert_eq!(profile.elevations_m, vec![100.0, 99.0, 98.0]);
    assert_eq!(profile.net_change(), -2.0);
}
