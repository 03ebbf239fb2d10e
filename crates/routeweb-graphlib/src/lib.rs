#![forbid(unsafe_code)]

//! Arena graph container used by `routeweb`.
//!
//! Nodes and edges live inside the [`Graph`] and refer to each other by dense
//! integer ids handed out by the graph itself. Two graphs built with the same
//! sequence of calls therefore get identical ids, which keeps layout runs
//! reproducible. Nodes and edges are never removed.

pub mod alg;

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EdgeId(pub u32);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl EdgeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A star system (or any other waypoint) in the travel graph.
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    edges: Vec<EdgeId>,
    price_by_item: IndexMap<String, f64>,
}

impl Node {
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Incident edges in creation order.
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    pub fn item_price(&self, item: &str) -> Option<f64> {
        self.price_by_item.get(item).copied()
    }

    /// Item prices in insertion order.
    pub fn item_prices(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.price_by_item.iter().map(|(item, &price)| (item.as_str(), price))
    }
}

/// An undirected travel connection with a positive cost.
///
/// The `a`/`b` assignment is fixed at creation time but carries no meaning;
/// the pair is conceptually unordered.
#[derive(Debug, Clone, Copy)]
pub struct Edge {
    id: EdgeId,
    a: NodeId,
    b: NodeId,
    cost: f64,
}

impl Edge {
    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn a(&self) -> NodeId {
        self.a
    }

    pub fn b(&self) -> NodeId {
        self.b
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// True when this edge joins the unordered pair `{x, y}`.
    pub fn joins(&self, x: NodeId, y: NodeId) -> bool {
        (self.a == x && self.b == y) || (self.a == y && self.b == x)
    }

    /// The endpoint opposite `id`. For a self-loop both endpoints coincide.
    pub fn other_endpoint(&self, id: NodeId) -> NodeId {
        if self.a == id { self.b } else { self.a }
    }
}

/// Arena of nodes and edges. The graph owns every node and edge; ids are
/// only meaningful for the graph that allocated them.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a node with a fresh id, no incident edges and no prices.
    pub fn add_node(&mut self) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            id,
            edges: Vec::new(),
            price_by_item: IndexMap::new(),
        });
        id
    }

    /// Idempotently connects `a` and `b` with a unit-cost edge.
    ///
    /// If an edge already joins the unordered pair, that edge is returned
    /// unchanged; the call order of the endpoints does not matter.
    pub fn ensure_edge(&mut self, a: NodeId, b: NodeId) -> EdgeId {
        self.ensure_edge_with_cost(a, b, 1.0)
    }

    /// Like [`Graph::ensure_edge`] with an explicit cost. When the edge
    /// already exists its original cost is kept; costs are constant after
    /// creation.
    pub fn ensure_edge_with_cost(&mut self, a: NodeId, b: NodeId, cost: f64) -> EdgeId {
        debug_assert!(cost > 0.0, "edge costs must be positive");

        if let Some(existing) = self.edge_between(a, b) {
            return existing;
        }

        let id = EdgeId(self.edges.len() as u32);
        self.edges.push(Edge { id, a, b, cost });
        self.nodes[a.index()].edges.push(id);
        if b != a {
            self.nodes[b.index()].edges.push(id);
        }
        id
    }

    /// Sets the price of `item` at `node`; last write wins.
    pub fn set_item_price(&mut self, node: NodeId, item: impl Into<String>, price: f64) {
        self.nodes[node.index()].price_by_item.insert(item.into(), price);
    }

    /// The edge joining the unordered pair `{a, b}`, if any.
    pub fn edge_between(&self, a: NodeId, b: NodeId) -> Option<EdgeId> {
        self.nodes[a.index()]
            .edges
            .iter()
            .copied()
            .find(|&eid| self.edges[eid.index()].joins(a, b))
    }

    /// Panics if `id` was not allocated by this graph.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Panics if `id` was not allocated by this graph.
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.index()]
    }

    /// Nodes in allocation order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Edges in creation order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
