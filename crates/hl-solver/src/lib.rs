//! Head-loss aggregation over an ordered list of pipe segments.
//!
//! Each segment is solved independently with the prescribed flow; there is no
//! network balance. The aggregate is the plain sum of segment head losses.
//! A single failing segment fails the whole solve, so a total never silently
//! omits a segment.

pub mod error;
pub mod network;

pub use error::{SolverError, SolverResult};
pub use network::{
    NetworkResult, SegmentWarning, solve_network, solve_network_parallel, solve_network_with,
};
