#![forbid(unsafe_code)]

//! Force-directed layout for trading-route graphs.
//!
//! The pipeline takes an undirected, cost-weighted graph of star systems,
//! computes per-node travel-cost maps and concentric ring levels, then runs
//! an iterative spring simulation that settles every node inside a square
//! display viewport. The output is geometry only; drawing is the caller's
//! concern.

pub use routeweb_graphlib as graphlib;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod geom;
pub mod model;
pub mod rings;
pub mod spring;

pub use error::{Error, Result};
pub use model::{ForceSchedule, Layout, LayoutOptions, Path, PathStep};
pub use rings::{RingAssignment, assign_rings};
pub use spring::{PositionMap, Simulation};

use routeweb_graphlib::alg::{self, CostMap};
use routeweb_graphlib::{Graph, NodeId};
use rustc_hash::FxHashMap;

/// Runs the whole pipeline: travel-cost maps for every node, ring
/// assignment, then the spring simulation to completion.
///
/// Fails on an empty graph, on a malformed cost model, or if the simulation
/// ever produces a non-finite displacement.
pub fn layout(g: &Graph, options: &LayoutOptions) -> Result<Layout> {
    let mut travel_costs: FxHashMap<NodeId, CostMap> = FxHashMap::default();
    for node in g.nodes() {
        travel_costs.insert(node.id(), alg::travel_costs(g, node.id())?);
    }

    let rings = rings::assign_rings(g)?;

    let mut sim = Simulation::new(g, &travel_costs, &rings, *options)?;
    let positions = sim.run()?;

    Ok(Layout {
        positions,
        rings,
        travel_costs,
    })
}
