//! Options, schedules and the outward-facing data shapes.

use crate::geom::{Point, point};
use crate::graphlib::NodeId;
use crate::graphlib::alg::CostMap;
use crate::rings::RingAssignment;
use crate::spring::PositionMap;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::f64::consts::PI;

/// Empirically tuned force-weight schedules, kept as configuration so they
/// can be adjusted and tested independently of the simulation loop.
///
/// The per-iteration weights blend over the run: ring pull decays linearly,
/// edge pull oscillates on a cosine, and push is the complement of pull.
#[derive(Debug, Clone, Copy)]
pub struct ForceSchedule {
    /// Baseline added to every time-varying weight so no force fully
    /// vanishes mid-run.
    pub weight_floor: f64,
    /// Scale of the travel-cost repulsion term.
    pub repel_scale: f64,
    /// Scale of the short-range push term.
    pub push_scale: f64,
    /// Exponent on `longest_edge / distance` in the push term.
    pub push_exponent: f64,
    /// Exponent on edge length in the edge-pull term.
    pub pull_exponent: f64,
    /// Exponent on the distance to the ring in the ring-pull term.
    pub ring_exponent: f64,
    /// Number of half-periods the pull-weight cosine sweeps over the run.
    pub pull_periods: f64,
}

impl Default for ForceSchedule {
    fn default() -> Self {
        Self {
            weight_floor: 0.1,
            repel_scale: 0.3,
            push_scale: 0.5,
            push_exponent: 1.2,
            pull_exponent: 1.2,
            ring_exponent: 1.5,
            pull_periods: 3.0,
        }
    }
}

impl ForceSchedule {
    /// Blended weights for iteration `itr` of `max_itr`.
    pub fn weights(&self, itr: usize, max_itr: usize) -> ForceWeights {
        let t = itr as f64 / max_itr as f64;
        let pull = self.weight_floor + 1.0 - (PI * self.pull_periods * t).cos().abs();
        ForceWeights {
            repel: 1.0,
            ring: self.weight_floor + 1.0 - t,
            pull,
            push: self.weight_floor + 1.0 - pull,
        }
    }
}

/// The four schedule weights of one iteration.
#[derive(Debug, Clone, Copy)]
pub struct ForceWeights {
    pub repel: f64,
    pub ring: f64,
    pub pull: f64,
    pub push: f64,
}

/// Display viewport and simulation budget.
#[derive(Debug, Clone, Copy)]
pub struct LayoutOptions {
    /// Center of the square display region.
    pub center: Point,
    /// Half-extent of the display region; final positions land in
    /// `[center - radius, center + radius]` on both axes.
    pub radius: f64,
    /// Fixed iteration count; there is no early-exit convergence check.
    pub iterations: usize,
    /// Total displacement budget spread evenly across iterations
    /// (`speed = displacement_budget / iterations`).
    pub displacement_budget: f64,
    pub schedule: ForceSchedule,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            center: point(400.0, 300.0),
            radius: 275.0,
            iterations: 150,
            displacement_budget: 1000.0,
            schedule: ForceSchedule::default(),
        }
    }
}

/// One stop on a planned route: a node and the items transacted there.
#[derive(Debug, Clone, Serialize)]
pub struct PathStep {
    pub node: NodeId,
    pub items: Vec<String>,
}

/// A planned route, consumed by rendering.
///
/// `cost` is the precomputed sum of travel cost between consecutive steps
/// plus item costs; the planner fills it in, this crate only carries it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Path {
    pub cost: f64,
    pub steps: Vec<PathStep>,
}

/// Everything the pipeline produces for a graph. Serializable so a
/// rendering layer can consume the geometry across a process boundary.
#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    pub positions: PositionMap,
    pub rings: RingAssignment,
    pub travel_costs: FxHashMap<NodeId, CostMap>,
}
