//! Graph algorithms behind the layout engine: single-source travel costs and
//! the farthest-destination walk that drives ring assignment.

use crate::{Graph, NodeId};
use rustc_hash::{FxBuildHasher, FxHashMap};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

type HashSet<T> = hashbrown::HashSet<T, FxBuildHasher>;

/// Minimum cumulative travel cost per reachable destination, keyed by node.
/// Unreachable nodes are absent; callers treat absence as an infinite cost.
pub type CostMap = FxHashMap<NodeId, f64>;

/// Relaxation ceiling for [`travel_costs`]. Exceeding it means the cost
/// model diverged (for example, a negative-cost cycle smuggled in through a
/// bad cost source), not that the graph is merely large.
pub const DEFAULT_RELAXATION_LIMIT: usize = 10_000;

#[derive(Debug, thiserror::Error)]
pub enum AlgError {
    #[error("travel-cost relaxation exceeded {limit} steps; the graph's cost model is malformed")]
    RelaxationLimit { limit: usize },
}

#[derive(Debug, Clone, Copy)]
struct QueueEntry {
    node: NodeId,
    cost: f64,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; flip so the cheapest entry pops first.
        other.cost.total_cmp(&self.cost)
    }
}

/// Minimum cumulative edge cost from `root` to every reachable node.
///
/// Dijkstra-style relaxation. A node may sit in the queue several times with
/// different candidate costs; stale entries are skipped on pop rather than
/// removed, and correctness rests on the strictly-better improvement rule
/// alone. The resulting map always contains `root` at cost 0.
pub fn travel_costs(g: &Graph, root: NodeId) -> Result<CostMap, AlgError> {
    travel_costs_with_limit(g, root, DEFAULT_RELAXATION_LIMIT)
}

/// [`travel_costs`] with an explicit relaxation ceiling.
pub fn travel_costs_with_limit(
    g: &Graph,
    root: NodeId,
    limit: usize,
) -> Result<CostMap, AlgError> {
    let mut best: CostMap = FxHashMap::default();
    let mut queue: BinaryHeap<QueueEntry> = BinaryHeap::new();

    best.insert(root, 0.0);
    queue.push(QueueEntry { node: root, cost: 0.0 });

    let mut relaxations = 0usize;
    while let Some(QueueEntry { node, cost }) = queue.pop() {
        if best.get(&node).is_some_and(|&known| cost > known) {
            // Stale entry superseded by a cheaper path.
            continue;
        }

        for &eid in g.node(node).edges() {
            relaxations += 1;
            if relaxations > limit {
                return Err(AlgError::RelaxationLimit { limit });
            }

            let edge = g.edge(eid);
            let dest = edge.other_endpoint(node);
            let candidate = cost + edge.cost();
            if best.get(&dest).is_none_or(|&known| candidate < known) {
                best.insert(dest, candidate);
                queue.push(QueueEntry {
                    node: dest,
                    cost: candidate,
                });
            }
        }
    }

    Ok(best)
}

/// Accumulated cost of travelling from `root` to its most expensive
/// destination, following a visited-marked depth-first walk.
///
/// Each node is entered at most once, so for cyclic graphs the result
/// depends on edge insertion order and is not true graph eccentricity. The
/// walk charges the edge into an already-visited node before turning back,
/// which also inflates the value on trees. Both quirks are deliberate: the
/// value is a layout-shaping signal consumed by ring assignment, and keeping
/// it deterministic per insertion order is what matters.
///
/// Recursion depth is bounded by the longest path reachable from `root`.
/// That is fine for region-sized universes; a degenerate chain of hundreds
/// of thousands of nodes would exhaust the stack.
pub fn farthest_cost(g: &Graph, root: NodeId) -> f64 {
    fn recurse(g: &Graph, node: NodeId, past_cost: f64, visited: &mut HashSet<NodeId>) -> f64 {
        if !visited.insert(node) {
            return past_cost;
        }

        let mut max_future = 0.0_f64;
        for &eid in g.node(node).edges() {
            let edge = g.edge(eid);
            let future = recurse(g, edge.other_endpoint(node), past_cost + edge.cost(), visited);
            if future > max_future {
                max_future = future;
            }
        }
        max_future
    }

    let mut visited = HashSet::default();
    recurse(g, root, 0.0, &mut visited)
}
