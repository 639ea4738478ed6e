use roadnet::geometry::tolerance::EPS_POS;
use roadnet::{GraphError, RoadClass, RoadGraph, Vec2};

fn v(x: f32, y: f32) -> Vec2 {
    Vec2 { x, y }
}

fn straight_edge(g: &mut RoadGraph, a: u32, b: u32, class: RoadClass) -> u32 {
    let pa = g.get_vertex(a).unwrap().pos();
    let pb = g.get_vertex(b).unwrap().pos();
    g.add_edge(a, b, vec![pa, pb], class, 1, false).unwrap()
}

/// Every live edge's polyline ends must coincide with its endpoint vertex
/// positions, in one orientation or the other.
fn assert_anchored(g: &RoadGraph) {
    for (id, e) in g.edges() {
        let a = g.get_vertex(e.a).expect("dangling endpoint a").pos();
        let b = g.get_vertex(e.b).expect("dangling endpoint b").pos();
        let first = e.polyline[0];
        let last = *e.polyline.last().unwrap();
        let ok = (first.dist(a) <= EPS_POS && last.dist(b) <= EPS_POS)
            || (first.dist(b) <= EPS_POS && last.dist(a) <= EPS_POS);
        assert!(ok, "edge {} polyline not anchored to its endpoints", id);
    }
}

#[test]
fn move_vertex_stretches_last_segment() {
    let mut g = RoadGraph::new();
    let a = g.add_vertex(0.0, 0.0);
    let b = g.add_vertex(10.0, 0.0);
    let e = g
        .add_edge(
            a,
            b,
            vec![v(0.0, 0.0), v(4.0, 3.0), v(10.0, 0.0)],
            RoadClass::Secondary,
            2,
            false,
        )
        .unwrap();

    g.move_vertex(b, v(12.0, 5.0)).unwrap();
    assert_eq!(
        g.get_edge(e).unwrap().polyline,
        vec![v(0.0, 0.0), v(4.0, 3.0), v(12.0, 5.0)]
    );

    // Moving the other end re-orients the polyline first.
    g.move_vertex(a, v(-2.0, -2.0)).unwrap();
    assert_eq!(
        g.get_edge(e).unwrap().polyline,
        vec![v(12.0, 5.0), v(4.0, 3.0), v(-2.0, -2.0)]
    );
    assert_anchored(&g);
}

#[test]
fn snap_merges_neighbors_without_duplicates() {
    let mut g = RoadGraph::new();
    let w = g.add_vertex(0.0, 0.0);
    let v1 = g.add_vertex(10.0, 0.0);
    let v2 = g.add_vertex(12.0, 0.0);
    let x = g.add_vertex(10.0, 8.0);
    let y = g.add_vertex(12.0, 8.0);
    straight_edge(&mut g, v1, w, RoadClass::Residential);
    straight_edge(&mut g, v2, w, RoadClass::Residential);
    straight_edge(&mut g, v1, x, RoadClass::Residential);
    straight_edge(&mut g, v2, y, RoadClass::Residential);

    g.snap_vertex(v1, v2).unwrap();

    assert!(g.get_vertex(v1).is_none());
    // Shared neighbor: exactly one surviving connection, not two.
    let shared: Vec<u32> = g
        .incident_edges(w)
        .into_iter()
        .filter(|&e| g.get_edge(e).unwrap().other_endpoint(w) == Some(v2))
        .collect();
    assert_eq!(shared.len(), 1);
    // Distinct neighbors of v1 were re-homed onto v2.
    assert!(g.find_edge(v2, x).is_some());
    assert!(g.find_edge(v2, y).is_some());
    assert_eq!(g.degree(v2), 3);
    assert_anchored(&g);
}

#[test]
fn snap_absorbs_collapsed_direct_edge() {
    let mut g = RoadGraph::new();
    let v1 = g.add_vertex(0.4, 0.0);
    let v2 = g.add_vertex(0.0, 0.0);
    let far = g.add_vertex(10.0, 0.0);
    straight_edge(&mut g, v1, v2, RoadClass::Primary);
    straight_edge(&mut g, v1, far, RoadClass::Primary);

    g.snap_vertex(v1, v2).unwrap();

    assert!(g.get_vertex(v1).is_none());
    // The direct edge collapsed to zero length and was absorbed.
    assert!(g.find_edge(v2, v2).is_none());
    assert_eq!(g.edge_count(), 1);
    assert!(g.find_edge(v2, far).is_some());
    assert_anchored(&g);
}

#[test]
fn snap_to_self_is_a_no_op() {
    let mut g = RoadGraph::new();
    let a = g.add_vertex(0.0, 0.0);
    let b = g.add_vertex(5.0, 0.0);
    straight_edge(&mut g, a, b, RoadClass::Residential);
    g.snap_vertex(a, a).unwrap();
    assert_eq!(g.vertex_count(), 2);
    assert_eq!(g.edge_count(), 1);
}

#[test]
fn split_preserves_total_geometry() {
    let mut g = RoadGraph::new();
    let a = g.add_vertex(0.0, 0.0);
    let b = g.add_vertex(10.0, 0.0);
    let original = vec![v(0.0, 0.0), v(5.0, 0.0), v(10.0, 0.0)];
    let e = g
        .add_edge(a, b, original.clone(), RoadClass::Trunk, 3, true)
        .unwrap();

    let mid = g.split_edge(e, v(3.0, 0.0)).unwrap();
    assert!(g.get_edge(e).is_none());
    let split_pos = g.get_vertex(mid).unwrap().pos();
    assert!(split_pos.dist(v(3.0, 0.0)) < 1e-5);

    let e1 = g.find_edge(a, mid).expect("first half missing");
    let e2 = g.find_edge(mid, b).expect("second half missing");
    for id in [e1, e2] {
        let edge = g.get_edge(id).unwrap();
        assert_eq!(edge.class, RoadClass::Trunk);
        assert_eq!(edge.lanes, 3);
        assert!(edge.one_way);
    }

    // Concatenating the halves reproduces the original samples, with the
    // split point inserted once.
    let mut merged = g.get_edge(e1).unwrap().polyline.clone();
    merged.extend_from_slice(&g.get_edge(e2).unwrap().polyline[1..]);
    let without_split: Vec<Vec2> = merged
        .iter()
        .copied()
        .filter(|p| p.dist(split_pos) > 1e-5)
        .collect();
    assert_eq!(without_split, original);
    assert_anchored(&g);
}

#[test]
fn split_lands_mid_segment_of_bent_polyline() {
    let mut g = RoadGraph::new();
    let a = g.add_vertex(0.0, 0.0);
    let b = g.add_vertex(20.0, 0.0);
    let e = g
        .add_edge(
            a,
            b,
            vec![v(0.0, 0.0), v(10.0, 6.0), v(20.0, 0.0)],
            RoadClass::Secondary,
            2,
            false,
        )
        .unwrap();
    let mid = g.split_edge(e, v(4.0, 3.0)).unwrap();
    let pos = g.get_vertex(mid).unwrap().pos();
    // Closest sampled point on the first leg, not an existing vertex.
    assert!(pos.dist(v(4.0, 3.0)) < 1.0);
    assert!(pos.dist(v(0.0, 0.0)) > 1.0 && pos.dist(v(10.0, 6.0)) > 1.0);
    assert_anchored(&g);
}

#[test]
fn invalid_handles_are_reported() {
    let mut g = RoadGraph::new();
    let a = g.add_vertex(0.0, 0.0);
    let b = g.add_vertex(10.0, 0.0);
    let e = straight_edge(&mut g, a, b, RoadClass::Residential);

    g.remove_edge(e).unwrap();
    assert_eq!(g.split_edge(e, v(5.0, 0.0)), Err(GraphError::InvalidEdge(e)));
    assert_eq!(g.remove_edge(e), Err(GraphError::InvalidEdge(e)));

    g.remove_vertex(a).unwrap();
    assert_eq!(
        g.move_vertex(a, v(1.0, 1.0)),
        Err(GraphError::InvalidVertex(a))
    );
    assert_eq!(g.snap_vertex(b, a), Err(GraphError::InvalidVertex(a)));
    assert_eq!(
        g.add_edge(
            a,
            b,
            vec![v(0.0, 0.0), v(10.0, 0.0)],
            RoadClass::Residential,
            1,
            false,
        ),
        Err(GraphError::InvalidVertex(a))
    );
}

#[test]
fn degenerate_polyline_is_rejected() {
    let mut g = RoadGraph::new();
    let a = g.add_vertex(0.0, 0.0);
    let b = g.add_vertex(10.0, 0.0);
    assert_eq!(
        g.add_edge(a, b, vec![v(0.0, 0.0)], RoadClass::Residential, 1, false),
        Err(GraphError::DegeneratePolyline)
    );
    assert_eq!(
        g.add_edge(a, a, vec![v(0.0, 0.0); 2], RoadClass::Residential, 1, false),
        Err(GraphError::LoopEdge)
    );
}

#[test]
fn planarify_then_reduce_stays_consistent() {
    let mut g = RoadGraph::new();
    // An X crossing plus a dangling chain that reduce should fold.
    let a = g.add_vertex(0.0, 0.0);
    let b = g.add_vertex(10.0, 10.0);
    let c = g.add_vertex(0.0, 10.0);
    let d = g.add_vertex(10.0, 0.0);
    straight_edge(&mut g, a, b, RoadClass::Primary);
    straight_edge(&mut g, c, d, RoadClass::Primary);
    let p = g.add_vertex(20.0, 0.0);
    let q = g.add_vertex(30.0, 0.0);
    let r = g.add_vertex(40.0, 0.0);
    straight_edge(&mut g, p, q, RoadClass::Residential);
    straight_edge(&mut g, q, r, RoadClass::Residential);

    g.planarify().unwrap();
    g.reduce().unwrap();

    // q folded away; the crossing hub has degree 4 and survives reduction.
    assert!(g.get_vertex(q).is_none());
    assert!(g.find_edge(p, r).is_some());
    let hub = g
        .vertices()
        .find(|(_, vert)| vert.pos().dist(v(5.0, 5.0)) < 1.5)
        .map(|(id, _)| id)
        .expect("crossing hub missing");
    assert_eq!(g.degree(hub), 4);
    assert_anchored(&g);

    // Compaction renumbers densely and keeps the topology.
    let before_vertices = g.vertex_count();
    let before_edges = g.edge_count();
    let (vmap, _) = g.compact();
    assert_eq!(g.vertex_count(), before_vertices);
    assert_eq!(g.edge_count(), before_edges);
    assert_eq!(g.vertex_count(), g.vertex_ids().count());
    let new_hub = vmap[hub as usize].expect("hub lost in compaction");
    assert_eq!(g.degree(new_hub), 4);
    assert_anchored(&g);
}

#[test]
fn history_round_trip_by_deep_copy() {
    let mut g = RoadGraph::new();
    let a = g.add_vertex(0.0, 0.0);
    let b = g.add_vertex(10.0, 0.0);
    straight_edge(&mut g, a, b, RoadClass::Residential);

    // External undo: deep copy before, restore by replacement after.
    let snapshot = g.clone();
    g.move_vertex(b, v(50.0, 50.0)).unwrap();
    g.remove_vertex(a).unwrap();
    assert_eq!(g.edge_count(), 0);

    let g = snapshot;
    assert_eq!(g.edge_count(), 1);
    assert_eq!(g.get_vertex(b).unwrap().pos(), v(10.0, 0.0));
}
