use serde::{Deserialize, Serialize};

use crate::service::dto::ProjectionPoint;

/// How projected values are laid over the period.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionMode {
    /// `projected[u] = run_rate * u` for every unit. Used by the per-advisor
    /// daily view.
    LinearShare,
    /// Starts at the last actual and adds `run_rate` per unit after it; empty
    /// before the anchor. Used by the intra-month views.
    AnchorThenExtrapolate,
}

/// Average per elapsed unit. With nothing elapsed there is no rate to
/// observe, so the rate is 0 and projections stay flat.
pub fn run_rate(total_so_far: f64, elapsed_units: u32) -> f64 {
    if elapsed_units == 0 {
        return 0.0;
    }
    total_so_far / elapsed_units as f64
}

/// Deterministic extrapolation of a partial period. Output always has one
/// point per unit in the period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunRateProjector {
    mode: ProjectionMode,
}

impl RunRateProjector {
    pub fn new(mode: ProjectionMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ProjectionMode {
        self.mode
    }

    /// Only the aggregate is known: elapsed actuals are a linear share of it.
    pub fn project(&self, total_so_far: f64, elapsed_units: u32, total_units: u32) -> Vec<ProjectionPoint> {
        let elapsed = elapsed_units.min(total_units);
        let rate = run_rate(total_so_far, elapsed);
        let actuals: Vec<f64> = (1..=elapsed).map(|u| rate * u as f64).collect();
        self.lay_out(&actuals, rate, total_units)
    }

    /// Raw per-unit actuals are known: elapsed actuals are their running sum.
    /// Values past `total_units` are ignored.
    pub fn project_observed(&self, per_unit: &[f64], total_units: u32) -> Vec<ProjectionPoint> {
        let observed = &per_unit[..per_unit.len().min(total_units as usize)];
        let actuals: Vec<f64> = observed
            .iter()
            .scan(0.0, |sum, value| {
                *sum += value;
                Some(*sum)
            })
            .collect();
        let total = actuals.last().copied().unwrap_or(0.0);
        let rate = run_rate(total, actuals.len() as u32);
        self.lay_out(&actuals, rate, total_units)
    }

    fn lay_out(&self, actuals: &[f64], rate: f64, total_units: u32) -> Vec<ProjectionPoint> {
        let elapsed = actuals.len() as u32;
        let anchor = actuals.last().copied().unwrap_or(0.0);

        (1..=total_units)
            .map(|unit| {
                let actual = actuals.get(unit as usize - 1).copied();
                let projected = match self.mode {
                    ProjectionMode::LinearShare => Some(rate * unit as f64),
                    ProjectionMode::AnchorThenExtrapolate if unit < elapsed => None,
                    ProjectionMode::AnchorThenExtrapolate if unit == elapsed => Some(anchor),
                    ProjectionMode::AnchorThenExtrapolate => {
                        Some(anchor + rate * (unit - elapsed) as f64)
                    }
                };
                ProjectionPoint { unit, actual, projected }
            })
            .collect()
    }
}

/// Projected period-end value, or the total so far when nothing remains.
pub fn projected_total(points: &[ProjectionPoint]) -> Option<f64> {
    points.last().and_then(|p| p.projected.or(p.actual))
}
