//! Single pipe segment solved with the Darcy–Weisbach relation.

use std::f64::consts::PI;

use crate::common::{check_finite, check_non_negative_geometry, check_positive_geometry};
use crate::error::{ComponentError, ComponentResult};
use crate::friction::{
    ColebrookConfig, FlowRegime, FrictionFactor, FrictionMethod, FrictionWarning,
    friction_factor_with,
};
use crate::material::Material;
use hl_core::numeric::ensure_positive;
use hl_core::units::constants::{G_MPS2, g};
use hl_core::units::{Area, Density, DynVisc, Length, Pressure, Velocity, VolumeRate};
use hl_core::units::{kgpm3, m, m2, mps, pas};

/// Straight pipe segment carrying a prescribed volumetric flow.
///
/// A negative flow means reverse flow; the head loss is the same either way.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipeSegment {
    /// Segment length
    pub length: Length,
    /// Internal diameter
    pub diameter: Length,
    /// Volumetric flow rate (signed)
    pub flow: VolumeRate,
    /// Absolute roughness height ε
    pub roughness: Length,
    /// Material the roughness was taken from, if any
    pub material: Option<Material>,
}

impl PipeSegment {
    pub fn new(length: Length, diameter: Length, flow: VolumeRate, roughness: Length) -> Self {
        Self {
            length,
            diameter,
            flow,
            roughness,
            material: None,
        }
    }

    /// Segment whose roughness comes from the material catalog.
    pub fn with_material(
        length: Length,
        diameter: Length,
        flow: VolumeRate,
        material: Material,
    ) -> Self {
        Self {
            length,
            diameter,
            flow,
            roughness: material.roughness(),
            material: Some(material),
        }
    }

    /// Cross-sectional area πD²/4.
    pub fn area(&self) -> Area {
        let d = self.diameter.value;
        m2(PI * d * d / 4.0)
    }

    /// ε/D (dimensionless).
    pub fn relative_roughness(&self) -> f64 {
        self.roughness.value / self.diameter.value
    }

    /// Checks diameter, then length, then roughness.
    pub fn validate(&self) -> ComponentResult<()> {
        check_positive_geometry(self.diameter.value, "diameter")?;
        check_positive_geometry(self.length.value, "length")?;
        check_non_negative_geometry(self.roughness.value, "roughness")?;
        Ok(())
    }
}

/// Fluid properties shared by every segment of a solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluidProperties {
    /// Dynamic viscosity μ
    pub viscosity: DynVisc,
    /// Density ρ
    pub density: Density,
}

impl FluidProperties {
    pub fn new(viscosity: DynVisc, density: Density) -> Self {
        Self { viscosity, density }
    }

    /// Water at roughly 20 °C.
    pub fn water() -> Self {
        Self::new(pas(1.0e-3), kgpm3(1000.0))
    }

    pub fn validate(&self) -> ComponentResult<()> {
        for (what, value) in [
            ("viscosity", self.viscosity.value),
            ("density", self.density.value),
        ] {
            ensure_positive(value, what)
                .map_err(|_| ComponentError::InvalidFluid { what, value })?;
        }
        Ok(())
    }
}

impl Default for FluidProperties {
    fn default() -> Self {
        Self::water()
    }
}

/// What to do with a Colebrook estimate that carries a [`FrictionWarning`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConvergencePolicy {
    /// Keep the estimate and pass the warning along with the result.
    #[default]
    BestEffort,
    /// Turn the warning into an error.
    Strict,
}

/// Everything besides geometry and fluid that shapes a solve.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SolveOptions {
    pub method: FrictionMethod,
    pub policy: ConvergencePolicy,
    pub colebrook: ColebrookConfig,
}

impl SolveOptions {
    pub fn with_method(method: FrictionMethod) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn strict(mut self) -> Self {
        self.policy = ConvergencePolicy::Strict;
        self
    }
}

/// Hydraulic state of one solved segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentResult {
    /// Cross-sectional area
    pub area: Area,
    /// Mean velocity, same sign as the flow
    pub velocity: Velocity,
    /// Reynolds number from |V| (non-negative)
    pub reynolds: f64,
    /// Darcy friction factor
    pub friction_factor: f64,
    pub regime: FlowRegime,
    /// Friction iterations (0 for closed forms)
    pub iterations: usize,
    pub warning: Option<FrictionWarning>,
    /// Frictional head loss (m of fluid column)
    pub head_loss: Length,
}

impl SegmentResult {
    /// Head loss expressed as pressure, ρ·g·hf.
    pub fn pressure_drop(&self, fluid: &FluidProperties) -> Pressure {
        fluid.density * g() * self.head_loss
    }
}

/// Solve one segment with default Colebrook settings and best-effort policy.
pub fn solve_segment(
    segment: &PipeSegment,
    fluid: &FluidProperties,
    method: FrictionMethod,
) -> ComponentResult<SegmentResult> {
    solve_segment_with(segment, fluid, &SolveOptions::with_method(method))
}

/// Solve one segment.
///
/// Geometry is checked before anything else, so a zero diameter never reaches
/// the friction model. Zero flow gives `Re = 0` and fails there with
/// [`ComponentError::InvalidFlow`].
pub fn solve_segment_with(
    segment: &PipeSegment,
    fluid: &FluidProperties,
    options: &SolveOptions,
) -> ComponentResult<SegmentResult> {
    segment.validate()?;
    fluid.validate()?;

    let d = segment.diameter.value;
    let area = segment.area();
    let velocity = segment.flow.value / area.value;
    check_finite(velocity, "velocity")?;

    let reynolds = fluid.density.value * velocity.abs() * d / fluid.viscosity.value;

    let friction = friction_factor_with(
        reynolds,
        segment.roughness.value,
        d,
        options.method,
        &options.colebrook,
    )?;
    let friction = apply_policy(friction, options.policy, reynolds, segment)?;

    let head_loss =
        friction.value * (segment.length.value / d) * (velocity * velocity / (2.0 * G_MPS2));
    check_finite(head_loss, "head loss")?;

    Ok(SegmentResult {
        area,
        velocity: mps(velocity),
        reynolds,
        friction_factor: friction.value,
        regime: friction.regime,
        iterations: friction.iterations,
        warning: friction.warning,
        head_loss: m(head_loss),
    })
}

fn apply_policy(
    friction: FrictionFactor,
    policy: ConvergencePolicy,
    reynolds: f64,
    segment: &PipeSegment,
) -> ComponentResult<FrictionFactor> {
    match (policy, friction.warning) {
        (ConvergencePolicy::BestEffort, _) | (_, None) => Ok(friction),
        (
            ConvergencePolicy::Strict,
            Some(FrictionWarning::NotConverged {
                iterations,
                last_delta,
            }),
        ) => Err(ComponentError::ConvergenceFailed {
            iterations,
            last_delta,
            estimate: friction.value,
        }),
        (ConvergencePolicy::Strict, Some(FrictionWarning::Degenerate { .. })) => {
            Err(ComponentError::FrictionDomain {
                reynolds,
                relative_roughness: segment.relative_roughness(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hl_core::units::{m3ps, mm};

    fn pvc_segment(length_m: f64) -> PipeSegment {
        PipeSegment::new(m(length_m), m(0.1), m3ps(0.01), m(1.5e-6))
    }

    #[test]
    fn derived_quantities_follow_definitions() {
        let seg = pvc_segment(100.0);
        let res = solve_segment(&seg, &FluidProperties::default(), FrictionMethod::Colebrook)
            .unwrap();

        let area = PI * 0.1 * 0.1 / 4.0;
        let v = 0.01 / area;
        assert!((res.area.value - area).abs() < 1e-15);
        assert!((res.velocity.value - v).abs() < 1e-12);
        assert!((res.reynolds - 1000.0 * v * 0.1 / 1e-3).abs() < 1e-6);

        let hf = res.friction_factor * (100.0 / 0.1) * (v * v / (2.0 * 9.81));
        assert!((res.head_loss.value - hf).abs() < 1e-12);
    }

    #[test]
    fn reverse_flow_has_same_loss_and_signed_velocity() {
        let fwd = pvc_segment(50.0);
        let rev = PipeSegment {
            flow: m3ps(-0.01),
            ..fwd
        };
        let fluid = FluidProperties::default();
        let a = solve_segment(&fwd, &fluid, FrictionMethod::Colebrook).unwrap();
        let b = solve_segment(&rev, &fluid, FrictionMethod::Colebrook).unwrap();

        assert!(b.velocity.value < 0.0);
        assert!(b.reynolds > 0.0);
        assert_eq!(a.head_loss, b.head_loss);
    }

    #[test]
    fn geometry_checked_in_order() {
        let fluid = FluidProperties::default();
        let seg = PipeSegment::new(m(-1.0), m(0.0), m3ps(0.01), m(-1.0));
        let err = solve_segment(&seg, &fluid, FrictionMethod::Colebrook).unwrap_err();
        assert!(matches!(
            err,
            ComponentError::InvalidGeometry {
                what: "diameter",
                ..
            }
        ));

        let seg = PipeSegment::new(m(10.0), mm(50.0), m3ps(0.01), m(-1e-6));
        let err = solve_segment(&seg, &fluid, FrictionMethod::Colebrook).unwrap_err();
        assert!(matches!(
            err,
            ComponentError::InvalidGeometry {
                what: "roughness",
                ..
            }
        ));
    }

    #[test]
    fn invalid_fluid_rejected() {
        let fluid = FluidProperties::new(pas(0.0), kgpm3(1000.0));
        let err =
            solve_segment(&pvc_segment(10.0), &fluid, FrictionMethod::Colebrook).unwrap_err();
        assert_eq!(
            err,
            ComponentError::InvalidFluid {
                what: "viscosity",
                value: 0.0
            }
        );
    }

    #[test]
    fn strict_policy_escalates_non_convergence() {
        let mut options = SolveOptions::with_method(FrictionMethod::Colebrook).strict();
        options.colebrook.max_iterations = 1;

        let err = solve_segment_with(&pvc_segment(100.0), &FluidProperties::default(), &options)
            .unwrap_err();
        assert!(matches!(
            err,
            ComponentError::ConvergenceFailed { iterations: 1, .. }
        ));

        options.policy = ConvergencePolicy::BestEffort;
        let res = solve_segment_with(&pvc_segment(100.0), &FluidProperties::default(), &options)
            .unwrap();
        assert!(matches!(
            res.warning,
            Some(FrictionWarning::NotConverged { iterations: 1, .. })
        ));
    }

    #[test]
    fn degenerate_estimate_follows_policy() {
        let seg = pvc_segment(100.0);
        let degenerate = FrictionFactor {
            value: 0.02,
            regime: FlowRegime::Turbulent,
            iterations: 1,
            warning: Some(FrictionWarning::Degenerate { iteration: 1 }),
        };

        let err =
            apply_policy(degenerate, ConvergencePolicy::Strict, 127_324.0, &seg).unwrap_err();
        assert_eq!(
            err,
            ComponentError::FrictionDomain {
                reynolds: 127_324.0,
                relative_roughness: seg.relative_roughness(),
            }
        );

        let kept =
            apply_policy(degenerate, ConvergencePolicy::BestEffort, 127_324.0, &seg).unwrap();
        assert_eq!(kept, degenerate);
    }

    #[test]
    fn material_segment_uses_catalog_roughness() {
        let seg = PipeSegment::with_material(m(10.0), m(0.2), m3ps(0.05), Material::Concrete);
        assert_eq!(seg.roughness.value, 3.0e-4);
        assert_eq!(seg.material, Some(Material::Concrete));
        assert!((seg.relative_roughness() - 1.5e-3).abs() < 1e-15);
    }

    #[test]
    fn pressure_drop_is_rho_g_hf() {
        let fluid = FluidProperties::default();
        let res = solve_segment(&pvc_segment(100.0), &fluid, FrictionMethod::SwameeJain).unwrap();
        let dp = res.pressure_drop(&fluid);
        assert!((dp.value - 1000.0 * 9.81 * res.head_loss.value).abs() < 1e-9);
    }
}
