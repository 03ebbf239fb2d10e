//! Concentric ring levels derived from farthest-destination travel cost.

use crate::error::{Error, Result};
use crate::graphlib::{Graph, NodeId, alg};
use rustc_hash::FxHashMap;

/// Ring level per node; values are `>= 0` and the best-placed node(s) sit on
/// ring 0.
pub type RingAssignment = FxHashMap<NodeId, f64>;

/// Assigns each node a ring level: its farthest-destination cost, rebased so
/// the smallest value across the graph lands on ring 0.
///
/// The underlying walk ([`alg::farthest_cost`]) is order-dependent for
/// cyclic graphs; ring levels are a layout-shaping signal, not a
/// graph-theoretic quantity.
pub fn assign_rings(g: &Graph) -> Result<RingAssignment> {
    if g.node_count() == 0 {
        return Err(Error::EmptyInput("ring assignment over zero nodes"));
    }

    let mut farthest: FxHashMap<NodeId, f64> = FxHashMap::default();
    for node in g.nodes() {
        farthest.insert(node.id(), alg::farthest_cost(g, node.id()));
    }

    let min = farthest
        .values()
        .fold(f64::INFINITY, |acc, &cost| acc.min(cost));

    Ok(farthest
        .into_iter()
        .map(|(id, cost)| (id, cost - min))
        .collect())
}
