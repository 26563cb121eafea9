//! Sequential and parallel network solves.

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::error::{SolverError, SolverResult};
use hl_components::{
    ComponentResult, FluidProperties, FrictionMethod, FrictionWarning, PipeSegment, SegmentResult,
    SolveOptions, solve_segment_with,
};
use hl_core::units::{Length, m};

/// Friction warning attached to a segment (1-based position).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentWarning {
    pub position: usize,
    pub warning: FrictionWarning,
}

/// Solved network: per-segment results in input order plus the total.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkResult {
    pub segments: Vec<SegmentResult>,
    /// Σ hf over all segments
    pub total_head_loss: Length,
}

impl NetworkResult {
    fn from_segments(segments: Vec<SegmentResult>) -> Self {
        let total: f64 = segments.iter().map(|s| s.head_loss.value).sum();
        Self {
            segments,
            total_head_loss: m(total),
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segments whose friction factor is a best-effort estimate.
    pub fn warnings(&self) -> Vec<SegmentWarning> {
        self.segments
            .iter()
            .enumerate()
            .filter_map(|(i, s)| {
                s.warning.map(|warning| SegmentWarning {
                    position: i + 1,
                    warning,
                })
            })
            .collect()
    }

    /// 1-based position and result of the segment with the largest head loss.
    pub fn max_head_loss_segment(&self) -> Option<(usize, &SegmentResult)> {
        self.segments
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.head_loss.value.total_cmp(&b.head_loss.value))
            .map(|(i, s)| (i + 1, s))
    }
}

/// Solve every segment with `method`, default Colebrook settings and
/// best-effort convergence.
pub fn solve_network(
    segments: &[PipeSegment],
    fluid: &FluidProperties,
    method: FrictionMethod,
) -> SolverResult<NetworkResult> {
    solve_network_with(segments, fluid, &SolveOptions::with_method(method))
}

/// Solve every segment in order, stopping at the first failure.
pub fn solve_network_with(
    segments: &[PipeSegment],
    fluid: &FluidProperties,
    options: &SolveOptions,
) -> SolverResult<NetworkResult> {
    let mut results = Vec::with_capacity(segments.len());
    for (i, segment) in segments.iter().enumerate() {
        let result = solve_one(i + 1, segment, fluid, options)?;
        results.push(result);
    }
    Ok(finish(results, options))
}

/// Solve segments concurrently.
///
/// Results keep input order. If several segments fail, the error reported is
/// the one with the lowest position, same as the sequential solve.
pub fn solve_network_parallel(
    segments: &[PipeSegment],
    fluid: &FluidProperties,
    options: &SolveOptions,
) -> SolverResult<NetworkResult> {
    let fluid = *fluid;
    let options = *options;

    let outcomes: Vec<ComponentResult<SegmentResult>> = segments
        .par_iter()
        .map(|segment| {
            let snapshot = fluid;
            solve_segment_with(segment, &snapshot, &options)
        })
        .collect();

    let mut results = Vec::with_capacity(outcomes.len());
    for (i, outcome) in outcomes.into_iter().enumerate() {
        let position = i + 1;
        let result = outcome.map_err(|source| SolverError::Segment { position, source })?;
        trace_segment(position, &result);
        results.push(result);
    }
    Ok(finish(results, &options))
}

fn solve_one(
    position: usize,
    segment: &PipeSegment,
    fluid: &FluidProperties,
    options: &SolveOptions,
) -> SolverResult<SegmentResult> {
    let result = solve_segment_with(segment, fluid, options)
        .map_err(|source| SolverError::Segment { position, source })?;
    trace_segment(position, &result);
    Ok(result)
}

fn trace_segment(position: usize, result: &SegmentResult) {
    debug!(
        segment = position,
        reynolds = result.reynolds,
        friction_factor = result.friction_factor,
        head_loss_m = result.head_loss.value,
        "segment solved"
    );
    if let Some(w) = &result.warning {
        warn!(segment = position, "{w}");
    }
}

fn finish(results: Vec<SegmentResult>, options: &SolveOptions) -> NetworkResult {
    let network = NetworkResult::from_segments(results);
    info!(
        segments = network.len(),
        method = %options.method,
        total_head_loss_m = network.total_head_loss.value,
        "network solved"
    );
    network
}

#[cfg(test)]
mod tests {
    use super::*;
    use hl_components::ComponentError;
    use hl_core::units::m3ps;

    fn seg(length: f64, flow: f64) -> PipeSegment {
        PipeSegment::new(m(length), m(0.1), m3ps(flow), m(1.5e-6))
    }

    #[test]
    fn empty_network_has_zero_total() {
        let res = solve_network(&[], &FluidProperties::default(), FrictionMethod::Colebrook)
            .unwrap();
        assert!(res.is_empty());
        assert_eq!(res.total_head_loss.value, 0.0);
        assert!(res.max_head_loss_segment().is_none());
    }

    #[test]
    fn first_failure_wins() {
        let segments = [seg(10.0, 0.01), seg(10.0, 0.0), seg(10.0, 0.0)];
        let err = solve_network(
            &segments,
            &FluidProperties::default(),
            FrictionMethod::Colebrook,
        )
        .unwrap_err();
        assert_eq!(err.position(), 2);
        assert!(matches!(err.cause(), ComponentError::InvalidFlow { .. }));
    }

    #[test]
    fn warnings_report_positions() {
        let mut options = SolveOptions::default();
        options.colebrook.max_iterations = 2;
        let segments = [seg(10.0, 0.0001), seg(10.0, 0.01)];

        // Segment 1 is laminar (no iteration), segment 2 hits the cap.
        let res = solve_network_with(&segments, &FluidProperties::default(), &options).unwrap();
        let warnings = res.warnings();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].position, 2);
    }

    #[test]
    fn max_head_loss_segment_is_one_based() {
        let segments = [seg(10.0, 0.01), seg(300.0, 0.01), seg(20.0, 0.01)];
        let res = solve_network(
            &segments,
            &FluidProperties::default(),
            FrictionMethod::SwameeJain,
        )
        .unwrap();
        let (pos, _) = res.max_head_loss_segment().unwrap();
        assert_eq!(pos, 2);
    }
}
