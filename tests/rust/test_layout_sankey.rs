use super::*;
use crate::error::SankeyError;
use crate::layout::graph::Node;
use crate::layout::{Alignment, compute_layout, full_layout};
use crate::syntax::types::FlowEdge;

const EPS: f64 = 1e-5;

fn graph(flows: &[(&str, &str, f64)]) -> SankeyGraph {
    let edges: Vec<FlowEdge> = flows
        .iter()
        .map(|(s, t, v)| FlowEdge::new(*s, *t, *v))
        .collect();
    SankeyGraph::from_edges(&edges)
}

fn config(width: f64, height: f64) -> LayoutConfig {
    LayoutConfig {
        node_width: 10.0,
        node_padding: 10.0,
        extent: Extent::new(0.0, 0.0, width, height),
        ..LayoutConfig::default()
    }
}

fn node<'r>(result: &'r LayoutResult, name: &str) -> &'r LaidOutNode {
    result
        .nodes
        .iter()
        .find(|n| n.name() == name)
        .unwrap_or_else(|| panic!("node {name} missing"))
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ── Values, depths, heights ──────────────────────────────────────────────

#[test]
fn test_node_values_depths_heights() {
    let g = graph(&[("A", "B", 10.0), ("B", "C", 5.0), ("A", "C", 3.0)]);
    let r = full_layout(&g, &config(110.0, 100.0)).unwrap();
    let (a, b, c) = (node(&r, "A"), node(&r, "B"), node(&r, "C"));
    assert_eq!((a.value, b.value, c.value), (13.0, 10.0, 8.0));
    assert_eq!((a.depth, b.depth, c.depth), (0, 1, 2));
    assert_eq!((a.height, b.height, c.height), (2, 1, 0));
    assert_eq!(r.column_count(), 3);
}

#[test]
fn test_columns_and_x_positions() {
    let g = graph(&[("A", "B", 10.0), ("B", "C", 5.0), ("A", "C", 3.0)]);
    let r = full_layout(&g, &config(110.0, 100.0)).unwrap();
    assert_eq!(node(&r, "A").x0, 0.0);
    assert_eq!(node(&r, "B").x0, 50.0);
    assert_eq!(node(&r, "C").x0, 100.0);
    for n in &r.nodes {
        assert_eq!(n.x1 - n.x0, 10.0);
    }
}

#[test]
fn test_initial_breadths_without_relaxation() {
    let g = graph(&[("A", "B", 10.0), ("B", "C", 5.0), ("A", "C", 3.0)]);
    let cfg = LayoutConfig {
        iterations: 0,
        ..config(110.0, 100.0)
    };
    let r = full_layout(&g, &cfg).unwrap();
    let ky = 100.0 / 13.0;

    let a = node(&r, "A");
    assert!(approx(a.y0, 0.0));
    assert!(approx(a.y1, 100.0));

    // B is stacked at 0 then shifted by the even spread of the leftover space.
    let b = node(&r, "B");
    let spread_b = (100.0 - (10.0 * ky + 10.0) + 10.0) / 2.0;
    assert!(approx(b.y0, spread_b));
    assert!(approx(b.y1, spread_b + 10.0 * ky));

    let ab = &r.links[0];
    assert!(approx(ab.width, 10.0 * ky));
    assert!(approx(ab.y0, 5.0 * ky));
    let ac = &r.links[2];
    assert!(approx(ac.width, 3.0 * ky));
    assert!(approx(ac.y0, 10.0 * ky + 1.5 * ky));
}

#[test]
fn test_two_node_layout_is_exact() {
    let g = graph(&[("A", "B", 10.0)]);
    let r = full_layout(&g, &config(100.0, 100.0)).unwrap();
    let (a, b) = (node(&r, "A"), node(&r, "B"));
    assert_eq!((a.x0, a.x1, a.y0, a.y1), (0.0, 10.0, 0.0, 100.0));
    assert_eq!((b.x0, b.x1, b.y0, b.y1), (90.0, 100.0, 0.0, 100.0));
    let link = &r.links[0];
    assert_eq!(link.width, 100.0);
    assert_eq!(link.y0, 50.0);
    assert_eq!(link.y1, 50.0);
    assert_eq!((link.source, link.target), (0, 1));
}

#[test]
fn test_extent_offset_applies() {
    let g = graph(&[("A", "B", 10.0)]);
    let cfg = LayoutConfig {
        extent: Extent::new(1.0, 5.0, 101.0, 105.0),
        ..config(0.0, 0.0)
    };
    let r = full_layout(&g, &cfg).unwrap();
    assert_eq!(node(&r, "A").x0, 1.0);
    assert_eq!(node(&r, "B").x1, 101.0);
    assert_eq!(node(&r, "A").y0, 5.0);
    assert_eq!(node(&r, "A").y1, 105.0);
}

// ── Alignment ────────────────────────────────────────────────────────────

fn aligned(align: Alignment) -> LayoutResult {
    // D feeds C directly; A→B→C is the long path.
    let g = graph(&[("A", "B", 5.0), ("B", "C", 5.0), ("D", "C", 2.0), ("A", "E", 1.0)]);
    let cfg = LayoutConfig {
        align,
        ..config(110.0, 200.0)
    };
    full_layout(&g, &cfg).unwrap()
}

#[test]
fn test_alignment_left() {
    let r = aligned(Alignment::Left);
    assert_eq!(node(&r, "D").layer, 0);
    assert_eq!(node(&r, "E").layer, 1);
}

#[test]
fn test_alignment_right() {
    let r = aligned(Alignment::Right);
    assert_eq!(node(&r, "D").layer, 1);
    assert_eq!(node(&r, "E").layer, 2);
    assert_eq!(node(&r, "D").x0, 50.0);
}

#[test]
fn test_alignment_center() {
    let r = aligned(Alignment::Center);
    assert_eq!(node(&r, "D").layer, 1);
    assert_eq!(node(&r, "E").layer, 1);
}

#[test]
fn test_alignment_justify() {
    let r = aligned(Alignment::Justify);
    assert_eq!(node(&r, "D").layer, 0);
    assert_eq!(node(&r, "E").layer, 2);
    assert_eq!(node(&r, "E").x0, 100.0);
}

// ── Failures ─────────────────────────────────────────────────────────────

#[test]
fn test_empty_graph() {
    let r = full_layout(&SankeyGraph::default(), &config(100.0, 100.0)).unwrap();
    assert!(r.nodes.is_empty());
    assert!(r.links.is_empty());
}

#[test]
fn test_self_loop_is_circular() {
    let g = graph(&[("A", "A", 1.0)]);
    let err = full_layout(&g, &config(100.0, 100.0)).unwrap_err();
    assert_eq!(
        err,
        SankeyError::Layout(LayoutError::CircularLink { node: "A".into() })
    );
}

#[test]
fn test_cycle_is_circular() {
    let g = graph(&[("A", "B", 1.0), ("B", "C", 1.0), ("C", "A", 1.0)]);
    let err = full_layout(&g, &config(100.0, 100.0)).unwrap_err();
    assert!(matches!(
        err,
        SankeyError::Layout(LayoutError::CircularLink { .. })
    ));
}

#[test]
fn test_all_zero_values_degenerate() {
    let g = graph(&[("A", "B", 0.0)]);
    let err = full_layout(&g, &config(100.0, 100.0)).unwrap_err();
    assert!(matches!(
        err,
        SankeyError::Layout(LayoutError::DegenerateScale { .. })
    ));
}

fn assert_degenerate(result: crate::error::SankeyResult<LayoutResult>) {
    match result {
        Err(SankeyError::Layout(LayoutError::DegenerateScale { ky })) => {
            assert!(!(ky > 0.0), "ky {ky} should not be positive");
        }
        other => panic!("expected DegenerateScale, got {other:?}"),
    }
}

#[test]
fn test_canvas_shorter_than_margins_degenerate() {
    let g = graph(&[("A", "B", 10.0)]);
    let render = crate::config::RenderConfig {
        height: 8.0,
        ..crate::config::RenderConfig::default()
    };
    assert_degenerate(full_layout(&g, &render.layout_config()));
}

#[test]
fn test_canvas_equal_to_margins_degenerate() {
    let g = graph(&[("A", "B", 10.0)]);
    let render = crate::config::RenderConfig {
        height: 10.0,
        ..crate::config::RenderConfig::default()
    };
    assert_degenerate(full_layout(&g, &render.layout_config()));
}

#[test]
fn test_zero_height_extent_degenerate() {
    let g = graph(&[("A", "B", 4.0), ("A", "C", 6.0)]);
    assert_degenerate(full_layout(&g, &config(100.0, 0.0)));
}

#[test]
fn test_negative_height_extent_degenerate() {
    let g = graph(&[("A", "B", 4.0), ("A", "C", 6.0)]);
    assert_degenerate(full_layout(&g, &config(100.0, -20.0)));
}

#[test]
fn test_reference_failure_through_adapter() {
    fn by_category(n: &Node) -> &str {
        &n.category
    }
    let g = graph(&[("Solar PV", "Grid", 1.0)]);
    let cfg = LayoutConfig {
        node_id: by_category,
        ..config(100.0, 100.0)
    };
    let err = full_layout(&g, &cfg).unwrap_err();
    assert!(matches!(err, SankeyError::Reference { link: 0, .. }));
}

#[test]
fn test_custom_engine_failure_propagates() {
    struct Refuses;
    impl LayoutEngine for Refuses {
        fn layout(
            &self,
            _graph: &SankeyGraph,
            _topology: &FlowDigraph,
            _config: &LayoutConfig,
        ) -> Result<LayoutResult, LayoutError> {
            Err(LayoutError::DegenerateScale { ky: f64::INFINITY })
        }
    }
    let g = graph(&[("A", "B", 1.0)]);
    let err = compute_layout(&g, &config(100.0, 100.0), &Refuses).unwrap_err();
    assert!(matches!(err, SankeyError::Layout(_)));
}

// ── Relaxation invariants ────────────────────────────────────────────────

fn assert_layout_invariants(r: &LayoutResult, py: f64) {
    let e = r.extent;
    for n in &r.nodes {
        assert!(n.x0 <= n.x1, "{} x0 > x1", n.name());
        assert!(n.y0 <= n.y1, "{} y0 > y1", n.name());
        assert!(n.y0 >= e.y0 - EPS, "{} above extent: {}", n.name(), n.y0);
        assert!(n.y1 <= e.y1 + EPS, "{} below extent: {}", n.name(), n.y1);
    }
    for layer in 0..r.column_count() {
        let mut column: Vec<&LaidOutNode> = r.nodes.iter().filter(|n| n.layer == layer).collect();
        column.sort_by(|a, b| a.y0.total_cmp(&b.y0));
        for pair in column.windows(2) {
            assert!(
                pair[0].y1 + py <= pair[1].y0 + EPS,
                "{} overlaps {}",
                pair[0].name(),
                pair[1].name()
            );
        }
    }
    for (i, n) in r.nodes.iter().enumerate() {
        let out: f64 = r.links.iter().filter(|l| l.source == i).map(|l| l.width).sum();
        let inc: f64 = r.links.iter().filter(|l| l.target == i).map(|l| l.width).sum();
        assert!(out <= n.breadth() + EPS);
        assert!(inc <= n.breadth() + EPS);
    }
}

#[test]
fn test_relaxed_energy_like_graph_invariants() {
    let g = graph(&[
        ("Coal", "Electricity", 40.0),
        ("Gas", "Electricity", 30.0),
        ("Gas", "Heat", 20.0),
        ("Solar", "Electricity", 10.0),
        ("Electricity", "Homes", 35.0),
        ("Electricity", "Industry", 30.0),
        ("Electricity", "Losses", 15.0),
        ("Heat", "Homes", 15.0),
        ("Heat", "Losses", 5.0),
    ]);
    let r = full_layout(&g, &config(600.0, 400.0)).unwrap();
    assert_layout_invariants(&r, 10.0);
    // Links leave their source at the source's right edge and stay inside its box.
    for link in &r.links {
        let s = r.source_of(link);
        let t = r.target_of(link);
        assert!(s.x1 <= t.x0);
        assert!(link.y0 >= s.y0 - EPS && link.y0 <= s.y1 + EPS);
        assert!(link.y1 >= t.y0 - EPS && link.y1 <= t.y1 + EPS);
    }
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn dag_edges() -> impl Strategy<Value = Vec<(usize, usize, f64)>> {
        prop::collection::vec((0usize..8, 1usize..8, 1.0_f64..100.0), 1..16).prop_map(|raw| {
            raw.into_iter()
                .filter_map(|(a, b, v)| {
                    let (lo, hi) = (a.min(b), a.max(b));
                    (lo != hi).then_some((lo, hi, v))
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn relaxed_layout_respects_extent_and_spacing(raw in dag_edges()) {
            prop_assume!(!raw.is_empty());
            let names: Vec<String> = (0..8).map(|i| format!("n{i}")).collect();
            let edges: Vec<FlowEdge> = raw
                .iter()
                .map(|(s, t, v)| FlowEdge::new(names[*s].clone(), names[*t].clone(), *v))
                .collect();
            let g = SankeyGraph::from_edges(&edges);
            for align in Alignment::ALL {
                let cfg = LayoutConfig { align, ..config(800.0, 500.0) };
                let r = full_layout(&g, &cfg).unwrap();
                prop_assert_eq!(r.links.len(), edges.len());
                let longest = (0..r.column_count())
                    .map(|c| r.nodes.iter().filter(|n| n.layer == c).count())
                    .max()
                    .unwrap_or(1);
                let py = if longest > 1 { 10.0_f64.min(500.0 / (longest - 1) as f64) } else { 10.0 };
                assert_layout_invariants(&r, py);
            }
        }
    }
}
