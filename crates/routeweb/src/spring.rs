//! The iterative spring simulator.
//!
//! Four competing vector fields act on every node (travel-cost repulsion,
//! ring pull, short-range push and edge pull), with weights that blend over
//! the run. After each iteration the cloud of positions is remapped onto the
//! display viewport, so the final output is bounded by construction.

use crate::error::{Error, Result};
use crate::geom::{Point, Vector, point, point_at_same_angle, sum_vectors, vector};
use crate::graphlib::alg::CostMap;
use crate::graphlib::{Graph, Node, NodeId};
use crate::model::{ForceWeights, LayoutOptions};
use crate::rings::RingAssignment;
use rustc_hash::FxHashMap;
use std::f64::consts::PI;
use tracing::{debug, trace};

/// Final and intermediate node coordinates, keyed by node id.
pub type PositionMap = FxHashMap<NodeId, Point>;

/// Distance floor for the divisions inside the force terms. Coincident nodes
/// repel as if separated by this much, and an edgeless graph normalizes
/// against it, instead of dividing by zero.
const MIN_DISTANCE: f64 = 1e-6;

/// One simulation run over a fixed graph.
///
/// The travel-cost table and ring assignment are computed up front and
/// treated as immutable; only the position map evolves. The run is
/// single-threaded and performs no I/O; cost per iteration is dominated by
/// the all-pairs repulsion and push terms (`O(n^2)`).
pub struct Simulation<'g> {
    graph: &'g Graph,
    travel_costs: &'g FxHashMap<NodeId, CostMap>,
    rings: &'g RingAssignment,
    options: LayoutOptions,
    max_travel_cost: f64,
    max_ring: f64,
    positions: PositionMap,
}

impl<'g> Simulation<'g> {
    /// Seeds starting positions on a deterministic spiral: radius grows from
    /// `0.3 * R` to `R` by node index, the angle sweeps three full
    /// revolutions across the node list.
    pub fn new(
        graph: &'g Graph,
        travel_costs: &'g FxHashMap<NodeId, CostMap>,
        rings: &'g RingAssignment,
        options: LayoutOptions,
    ) -> Result<Self> {
        if graph.node_count() == 0 {
            return Err(Error::EmptyInput("layout of an empty graph"));
        }

        let max_travel_cost = travel_costs
            .values()
            .flat_map(|map| map.values())
            .fold(0.0_f64, |acc, &cost| acc.max(cost));
        let max_ring = rings.values().fold(0.0_f64, |acc, &ring| acc.max(ring));

        Ok(Self {
            graph,
            travel_costs,
            rings,
            options,
            max_travel_cost,
            max_ring,
            positions: seed_spiral(graph, &options),
        })
    }

    /// Current positions (the spiral seed before the first iteration).
    pub fn positions(&self) -> &PositionMap {
        &self.positions
    }

    /// Runs the full iteration budget headlessly.
    pub fn run(&mut self) -> Result<PositionMap> {
        self.run_with_observer(|_, _, _| {})
    }

    /// Runs the full iteration budget, invoking `observer` after every
    /// completed iteration with the iteration index, the current positions
    /// and the largest single-node displacement of that iteration.
    ///
    /// The observer is a presentation hook (incremental redraw); the
    /// simulation itself never suspends and always runs to completion.
    pub fn run_with_observer<F>(&mut self, mut observer: F) -> Result<PositionMap>
    where
        F: FnMut(usize, &PositionMap, f64),
    {
        debug!(
            nodes = self.graph.node_count(),
            edges = self.graph.edge_count(),
            iterations = self.options.iterations,
            radius = self.options.radius,
            "starting spring layout"
        );

        for itr in 0..self.options.iterations {
            let max_displacement = self.step(itr)?;
            self.recenter();
            observer(itr, &self.positions, max_displacement);
        }

        Ok(self.positions.clone())
    }

    /// One force pass: compute every node's displacement against the frozen
    /// current positions, then apply them all at once.
    ///
    /// Returns the largest single-node displacement, tracked as a
    /// convergence signal for observers (no early exit happens here).
    fn step(&mut self, itr: usize) -> Result<f64> {
        let weights = self.options.schedule.weights(itr, self.options.iterations);
        let speed = self.options.displacement_budget / self.options.iterations as f64;
        let longest_edge = self.longest_edge_length().max(MIN_DISTANCE);

        let mut moves: FxHashMap<NodeId, Vector> = FxHashMap::default();
        let mut max_displacement = 0.0_f64;

        for node in self.graph.nodes() {
            let net = self.net_force(node, longest_edge, weights)?;
            let displacement = net * speed;
            if !displacement.x.is_finite() || !displacement.y.is_finite() {
                return Err(Error::DegenerateVector { node: node.id() });
            }

            let length = displacement.length();
            if length > max_displacement {
                max_displacement = length;
            }
            moves.insert(node.id(), displacement);
        }

        for (id, displacement) in moves {
            if let Some(p) = self.positions.get_mut(&id) {
                *p += displacement;
            }
        }

        trace!(itr, ?weights, max_displacement, "iteration complete");
        Ok(max_displacement)
    }

    /// Arithmetic mean of the force vectors acting on `node`. The collection
    /// is seeded with one zero vector, so a node with no peers and no edges
    /// still averages cleanly to zero.
    fn net_force(&self, node: &Node, longest_edge: f64, w: ForceWeights) -> Result<Vector> {
        let sched = self.options.schedule;
        let p = self.positions[&node.id()];
        let mut forces: Vec<Vector> = vec![vector(0.0, 0.0)];

        // Travel-cost repulsion: graph-far nodes push apart harder than
        // graph-near ones, independent of current geometric distance.
        let costs = self.travel_costs.get(&node.id());
        for other in self.graph.nodes() {
            if other.id() == node.id() {
                continue;
            }
            let away = p - self.positions[&other.id()];
            // Unreachable pairs count as maximally far, as does a node the
            // caller left out of the travel-cost table entirely.
            let cost_frac = if self.max_travel_cost > 0.0 {
                costs
                    .and_then(|map| map.get(&other.id()))
                    .map_or(1.0, |&cost| cost / self.max_travel_cost)
            } else {
                0.0
            };
            forces.push(away * (sched.repel_scale * cost_frac * w.repel));
        }

        // Pull toward the closest point on this node's ring.
        let ring = self.rings.get(&node.id()).copied().unwrap_or(0.0);
        let ring_radius = if self.max_ring > 0.0 {
            self.options.radius * (ring / self.max_ring)
        } else {
            0.0
        };
        let ring_point = point_at_same_angle(self.options.center, p, ring_radius);
        let toward_ring = ring_point - p;
        let ring_frac = (toward_ring.length().powf(sched.ring_exponent) / longest_edge) * w.ring;
        forces.push(toward_ring * ring_frac);

        // Short-range push away from every other node; blows up as distance
        // shrinks, hence the floor.
        for other in self.graph.nodes() {
            if other.id() == node.id() {
                continue;
            }
            let away = p - self.positions[&other.id()];
            let dist = away.length().max(MIN_DISTANCE);
            let push_frac = sched.push_scale * (longest_edge / dist).powf(sched.push_exponent) * w.push;
            forces.push(away * push_frac);
        }

        // Edges pull this node toward its neighbors, capped so a stretched
        // edge cannot cause runaway attraction.
        for &eid in node.edges() {
            let edge = self.graph.edge(eid);
            let toward = self.positions[&edge.other_endpoint(node.id())] - p;
            let pull_frac = ((toward.length().powf(sched.pull_exponent) / longest_edge) * w.pull)
                .clamp(0.0, 1.0);
            forces.push(toward * pull_frac);
        }

        let sum = sum_vectors(&forces)?;
        Ok(sum / forces.len() as f64)
    }

    /// Longest current Euclidean edge length; the per-iteration
    /// normalization constant for the force magnitudes.
    fn longest_edge_length(&self) -> f64 {
        let mut longest = 0.0_f64;
        for edge in self.graph.edges() {
            let length = (self.positions[&edge.a()] - self.positions[&edge.b()]).length();
            if length > longest {
                longest = length;
            }
        }
        longest
    }

    /// Remaps the bounding box of all positions onto the display square
    /// `[center - R, center + R]^2`, linearly and per axis (not
    /// aspect-preserving). A degenerate axis collapses to the center line.
    fn recenter(&mut self) {
        let mut min = point(f64::INFINITY, f64::INFINITY);
        let mut max = point(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in self.positions.values() {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }

        let center = self.options.center;
        let r = self.options.radius;
        let span = max - min;

        for p in self.positions.values_mut() {
            p.x = if span.x > 0.0 {
                (center.x - r) + 2.0 * r * ((p.x - min.x) / span.x)
            } else {
                center.x
            };
            p.y = if span.y > 0.0 {
                (center.y - r) + 2.0 * r * ((p.y - min.y) / span.y)
            } else {
                center.y
            };
        }
    }
}

fn seed_spiral(graph: &Graph, options: &LayoutOptions) -> PositionMap {
    let n = graph.node_count();
    let angle_increment = 2.0 * PI / n as f64;

    let mut positions = PositionMap::default();
    for (i, node) in graph.nodes().iter().enumerate() {
        let frac = i as f64 / n as f64;
        let radius = options.radius * 0.3 + options.radius * 0.7 * frac;
        let angle = i as f64 * angle_increment * 3.0;
        positions.insert(
            node.id(),
            point(
                options.center.x + radius * angle.cos(),
                options.center.y + radius * angle.sin(),
            ),
        );
    }
    positions
}
