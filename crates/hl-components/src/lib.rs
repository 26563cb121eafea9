//! hl-components: per-segment hydraulics for pressurized pipe lines.
//!
//! Provides:
//! - Darcy friction factor (laminar law, Colebrook–White, Swamee–Jain)
//! - Single-segment solve (area, velocity, Reynolds number, head loss)
//! - Roughness catalog for common pipe materials
//!
//! Every solve is a pure function of its inputs, so segments can be evaluated
//! independently and in any order.
//!
//! # Example
//!
//! ```
//! use hl_components::{FluidProperties, FrictionMethod, PipeSegment, solve_segment};
//! use hl_core::units::{m, m3ps};
//!
//! let segment = PipeSegment::new(m(100.0), m(0.1), m3ps(0.01), m(1.5e-6));
//! let result = solve_segment(&segment, &FluidProperties::default(), FrictionMethod::Colebrook)
//!     .unwrap();
//!
//! println!("hf = {:.3} m (f = {:.5})", result.head_loss.value, result.friction_factor);
//! ```

pub mod common;
pub mod error;
pub mod friction;
pub mod material;
pub mod segment;

// Re-exports
pub use error::{ComponentError, ComponentResult};
pub use friction::{
    ColebrookConfig, FlowRegime, FrictionFactor, FrictionMethod, FrictionWarning, colebrook,
    friction_factor, friction_factor_with, swamee_jain,
};
pub use material::Material;
pub use segment::{
    ConvergencePolicy, FluidProperties, PipeSegment, SegmentResult, SolveOptions, solve_segment,
    solve_segment_with,
};
