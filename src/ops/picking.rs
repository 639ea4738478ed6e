//! Read-only hit-testing for an interactive editor: vertices win over
//! edges, nearest candidate within tolerance wins overall.

use serde::{Deserialize, Serialize};

use crate::geometry::math::seg_distance_sq;
use crate::model::Vec2;
use crate::RoadGraph;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Pick {
    #[serde(rename = "vertex")]
    Vertex { id: u32, dist: f32 },
    #[serde(rename = "edge")]
    Edge { id: u32, dist: f32 },
}

impl RoadGraph {
    /// The live vertex or edge nearest `pt` within `tol` world units, if
    /// any. The caller converts from screen space first.
    pub fn pick(&self, pt: Vec2, tol: f32) -> Option<Pick> {
        let tol2 = tol * tol;

        let mut best_vertex: Option<(u32, f32)> = None;
        for (id, v) in self.vertices() {
            let d2 = v.pos().dist_sq(pt);
            if d2 <= tol2 && best_vertex.map_or(true, |(_, bd)| d2 < bd) {
                best_vertex = Some((id, d2));
            }
        }
        if let Some((id, d2)) = best_vertex {
            return Some(Pick::Vertex {
                id,
                dist: d2.sqrt(),
            });
        }

        let mut best_edge: Option<(u32, f32)> = None;
        for (id, e) in self.edges() {
            for w in e.polyline.windows(2) {
                let (d2, _) = seg_distance_sq(pt, w[0], w[1]);
                if d2 <= tol2 && best_edge.map_or(true, |(_, bd)| d2 < bd) {
                    best_edge = Some((id, d2));
                }
            }
        }
        best_edge.map(|(id, d2)| Pick::Edge {
            id,
            dist: d2.sqrt(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Pick;
    use crate::geometry::tolerance::PICK_TOL;
    use crate::model::{RoadClass, Vec2};
    use crate::RoadGraph;

    fn v(x: f32, y: f32) -> Vec2 {
        Vec2 { x, y }
    }

    #[test]
    fn vertex_beats_edge() {
        let mut g = RoadGraph::new();
        let a = g.add_vertex(0.0, 0.0);
        let b = g.add_vertex(10.0, 0.0);
        g.add_edge(
            a,
            b,
            vec![v(0.0, 0.0), v(10.0, 0.0)],
            RoadClass::Residential,
            1,
            false,
        )
        .unwrap();
        match g.pick(v(0.5, 0.5), PICK_TOL) {
            Some(Pick::Vertex { id, .. }) => assert_eq!(id, a),
            other => panic!("expected vertex pick, got {:?}", other),
        }
        match g.pick(v(5.0, 1.0), PICK_TOL) {
            Some(Pick::Edge { id, dist }) => {
                assert_eq!(id, 0);
                assert!((dist - 1.0).abs() < 1e-5);
            }
            other => panic!("expected edge pick, got {:?}", other),
        }
        assert!(g.pick(v(5.0, 50.0), PICK_TOL).is_none());
    }

    #[test]
    fn tombstoned_entities_are_never_picked() {
        let mut g = RoadGraph::new();
        let a = g.add_vertex(0.0, 0.0);
        let b = g.add_vertex(10.0, 0.0);
        let e = g
            .add_edge(
                a,
                b,
                vec![v(0.0, 0.0), v(10.0, 0.0)],
                RoadClass::Residential,
                1,
                false,
            )
            .unwrap();
        g.remove_edge(e).unwrap();
        // (5, 3) is within edge tolerance but past both endpoints.
        assert!(g.pick(v(5.0, 3.0), PICK_TOL).is_none());
        assert!(!matches!(
            g.pick(v(5.0, 0.0), PICK_TOL),
            Some(Pick::Edge { .. })
        ));
        g.remove_vertex(a).unwrap();
        assert!(g.pick(v(0.0, 0.0), PICK_TOL).is_none());
    }
}
