use routeweb::graphlib::alg::{self, CostMap};
use routeweb::graphlib::{Graph, NodeId};
use routeweb::{
    Error, LayoutOptions, Path, PathStep, Simulation, assign_rings, geom::point, layout,
};
use rustc_hash::FxHashMap;

/// Six systems: a chain with two chords and a few item prices, mirroring the
/// shape of the demo universe but fully deterministic.
fn demo_graph() -> (Graph, Vec<NodeId>) {
    let mut g = Graph::new();
    let ids: Vec<NodeId> = (0..6).map(|_| g.add_node()).collect();
    for pair in ids.windows(2) {
        g.ensure_edge(pair[0], pair[1]);
    }
    g.ensure_edge(ids[0], ids[3]);
    g.ensure_edge(ids[1], ids[5]);

    g.set_item_price(ids[0], "silver", 10.0);
    g.set_item_price(ids[2], "gold", 100.0);
    g.set_item_price(ids[4], "diamond", 10_000.0);
    (g, ids)
}

fn travel_cost_table(g: &Graph) -> FxHashMap<NodeId, CostMap> {
    g.nodes()
        .iter()
        .map(|node| (node.id(), alg::travel_costs(g, node.id()).unwrap()))
        .collect()
}

#[test]
fn final_positions_stay_inside_the_display_square() {
    let (g, _) = demo_graph();
    let options = LayoutOptions::default();

    let result = layout(&g, &options).unwrap();

    assert_eq!(result.positions.len(), g.node_count());
    for p in result.positions.values() {
        assert!(p.x >= options.center.x - options.radius - 1e-9);
        assert!(p.x <= options.center.x + options.radius + 1e-9);
        assert!(p.y >= options.center.y - options.radius - 1e-9);
        assert!(p.y <= options.center.y + options.radius + 1e-9);
    }
}

#[test]
fn identical_builds_produce_identical_layouts() {
    let options = LayoutOptions::default();

    let (g1, _) = demo_graph();
    let (g2, _) = demo_graph();
    let first = layout(&g1, &options).unwrap();
    let second = layout(&g2, &options).unwrap();

    // No hidden randomness anywhere in the pipeline: bit-identical output.
    assert_eq!(first.positions, second.positions);
    assert_eq!(first.rings, second.rings);
}

#[test]
fn the_spiral_seed_is_deterministic() {
    let (g, ids) = demo_graph();
    let costs = travel_cost_table(&g);
    let rings = assign_rings(&g).unwrap();
    let options = LayoutOptions::default();

    let sim = Simulation::new(&g, &costs, &rings, options).unwrap();

    // Node 0 sits at angle 0, radius 0.3 * R.
    let seed = sim.positions()[&ids[0]];
    assert!((seed.x - (options.center.x + 0.3 * options.radius)).abs() < 1e-9);
    assert!((seed.y - options.center.y).abs() < 1e-9);
}

#[test]
fn the_observer_fires_once_per_iteration() {
    let (g, _) = demo_graph();
    let costs = travel_cost_table(&g);
    let rings = assign_rings(&g).unwrap();
    let options = LayoutOptions {
        iterations: 40,
        ..Default::default()
    };

    let mut sim = Simulation::new(&g, &costs, &rings, options).unwrap();
    let mut seen = Vec::new();
    sim.run_with_observer(|itr, positions, max_displacement| {
        assert_eq!(positions.len(), g.node_count());
        assert!(max_displacement.is_finite());
        seen.push(itr);
    })
    .unwrap();

    assert_eq!(seen.len(), 40);
    assert_eq!(seen.first(), Some(&0));
    assert_eq!(seen.last(), Some(&39));
}

#[test]
fn a_single_node_settles_on_the_center() {
    let mut g = Graph::new();
    let a = g.add_node();
    let options = LayoutOptions::default();

    let result = layout(&g, &options).unwrap();

    let p = result.positions[&a];
    assert!((p.x - options.center.x).abs() < 1e-9);
    assert!((p.y - options.center.y).abs() < 1e-9);
}

#[test]
fn a_disconnected_graph_still_lays_out() {
    let mut g = Graph::new();
    let a = g.add_node();
    let b = g.add_node();
    let c = g.add_node();
    let d = g.add_node();
    g.ensure_edge(a, b);
    g.ensure_edge(c, d);
    let options = LayoutOptions::default();

    let result = layout(&g, &options).unwrap();

    assert_eq!(result.positions.len(), 4);
    assert!(!result.travel_costs[&a].contains_key(&c));
    for p in result.positions.values() {
        assert!(p.x.is_finite() && p.y.is_finite());
    }
}

#[test]
fn an_empty_graph_is_rejected() {
    let g = Graph::new();

    let err = layout(&g, &LayoutOptions::default()).unwrap_err();

    assert!(matches!(err, Error::EmptyInput(_)));
}

#[test]
fn layout_carries_the_travel_cost_table() {
    let (g, ids) = demo_graph();

    let result = layout(&g, &LayoutOptions::default()).unwrap();

    assert_eq!(result.travel_costs[&ids[0]][&ids[1]], 1.0);
    // The 0-3 chord beats walking the chain.
    assert_eq!(result.travel_costs[&ids[0]][&ids[3]], 1.0);
}

#[test]
fn layouts_serialize_for_the_rendering_layer() {
    let (g, ids) = demo_graph();

    let result = layout(&g, &LayoutOptions::default()).unwrap();

    let value = serde_json::to_value(&result).unwrap();
    let positions = value["positions"].as_object().unwrap();
    assert_eq!(positions.len(), g.node_count());
    let seed = &positions[&ids[0].0.to_string()];
    assert!(seed["x"].is_number());
    assert!(seed["y"].is_number());
    assert_eq!(value["rings"].as_object().unwrap().len(), g.node_count());
    assert_eq!(
        value["travel_costs"][&ids[0].0.to_string()][&ids[1].0.to_string()],
        1.0
    );
}

#[test]
fn a_sparse_travel_cost_table_degrades_like_unreachable() {
    let (g, ids) = demo_graph();
    let mut costs = travel_cost_table(&g);
    // A caller that dropped a node from the table gets the maximally-far
    // treatment for that node's repulsion, not a panic.
    costs.remove(&ids[2]);
    let rings = assign_rings(&g).unwrap();
    let options = LayoutOptions {
        iterations: 20,
        ..Default::default()
    };

    let mut sim = Simulation::new(&g, &costs, &rings, options).unwrap();
    let positions = sim.run().unwrap();

    assert_eq!(positions.len(), g.node_count());
    for p in positions.values() {
        assert!(p.x.is_finite() && p.y.is_finite());
    }
}

#[test]
fn paths_serialize_with_plain_node_ids() {
    let path = Path {
        cost: 42.5,
        steps: vec![
            PathStep {
                node: NodeId(1),
                items: vec!["gold".to_string()],
            },
            PathStep {
                node: NodeId(4),
                items: Vec::new(),
            },
        ],
    };

    let value = serde_json::to_value(&path).unwrap();
    assert_eq!(value["cost"], 42.5);
    assert_eq!(value["steps"][0]["node"], 1);
    assert_eq!(value["steps"][1]["items"], serde_json::json!([]));
}

#[test]
fn custom_viewports_are_honored() {
    let (g, _) = demo_graph();
    let options = LayoutOptions {
        center: point(0.0, 0.0),
        radius: 50.0,
        iterations: 60,
        ..Default::default()
    };

    let result = layout(&g, &options).unwrap();

    for p in result.positions.values() {
        assert!(p.x.abs() <= 50.0 + 1e-9);
        assert!(p.y.abs() <= 50.0 + 1e-9);
    }
}
