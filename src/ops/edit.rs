//! Local topology surgery: vertex translation, vertex merge, edge split.
//!
//! Each operation takes `&mut self` for its whole duration and leaves the
//! endpoint-anchoring and no-dangling-handle invariants intact before
//! returning; they may be violated transiently mid-call.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::geometry::tolerance::{MIN_EDGE_LEN, SPLIT_STEP};
use crate::model::Vec2;
use crate::{GraphError, RoadGraph};

/// What to do when merging two vertices would leave two parallel edges to
/// the same neighbor. The only implemented policy keeps whichever edge is
/// found first and drops the rest. It is a lossy heuristic, named here so
/// alternatives (keep shortest, keep by road class) can slot in without
/// touching the merge loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnapPolicy {
    KeepFirst,
}

impl RoadGraph {
    /// Reverse the edge's polyline in place, if needed, so that its first
    /// sample sits at `from`'s end.
    ///
    /// Polyline orientation is never guaranteed to match the `(a, b)`
    /// endpoint order, so every algorithm that cares re-derives it through
    /// this helper by nearest-endpoint comparison.
    pub fn orient_polyline(&mut self, e: u32, from: u32) -> Result<(), GraphError> {
        let edge = self.live_edge(e)?;
        let far = edge
            .other_endpoint(from)
            .ok_or(GraphError::InvalidVertex(from))?;
        let first = edge.polyline[0];
        let from_pos = self.live_vertex(from)?.pos();
        let far_pos = self.live_vertex(far)?.pos();
        if first.dist_sq(from_pos) > first.dist_sq(far_pos) {
            self.live_edge_mut(e)?.polyline.reverse();
        }
        Ok(())
    }

    /// Move a vertex, re-anchoring every incident polyline.
    ///
    /// Each polyline is re-oriented to start at its far endpoint and its
    /// last sample is overwritten with the new position; interior samples
    /// are left alone, so the final segment stretches. Orientation is
    /// decided against the old position, which is why the polylines are
    /// updated before the vertex itself.
    pub fn move_vertex(&mut self, v: u32, pt: Vec2) -> Result<(), GraphError> {
        let old = self.live_vertex(v)?.pos();
        for e in self.incident_edges(v) {
            let edge = self.live_edge(e)?;
            let far = edge
                .other_endpoint(v)
                .ok_or(GraphError::InvalidEdge(e))?;
            let far_pos = self.live_vertex(far)?.pos();
            let first = edge.polyline[0];
            let edge = self.live_edge_mut(e)?;
            if first.dist_sq(old) < first.dist_sq(far_pos) {
                edge.polyline.reverse();
            }
            edge.polyline[0] = far_pos;
            let n = edge.polyline.len();
            edge.polyline[n - 1] = pt;
        }
        let vertex = self.live_vertex_mut(v)?;
        vertex.x = pt.x;
        vertex.y = pt.y;
        Ok(())
    }

    /// Merge `v1` into `v2`: move `v1` onto `v2`, re-home every connection
    /// of `v1` to `v2`, drop duplicate and absorbed connections, and
    /// tombstone `v1`. A no-op when `v1 == v2`.
    pub fn snap_vertex(&mut self, v1: u32, v2: u32) -> Result<(), GraphError> {
        if v1 == v2 {
            return Ok(());
        }
        let target = self.live_vertex(v2)?.pos();
        self.move_vertex(v1, target)?;

        // A direct v1-v2 edge collapsed below the minimum length is
        // absorbed by the merge.
        if let Some(e) = self.find_edge(v1, v2) {
            if self.edge_length(e)? < MIN_EDGE_LEN {
                self.remove_edge(e)?;
            }
        }

        for e in self.incident_edges(v1) {
            let edge = self.live_edge(e)?.clone();
            let far = edge
                .other_endpoint(v1)
                .ok_or(GraphError::InvalidEdge(e))?;
            self.remove_edge(e)?;
            if far == v2 {
                continue;
            }
            if self.find_edge(v2, far).is_some() {
                match self.snap_policy {
                    SnapPolicy::KeepFirst => continue,
                }
            }
            self.add_edge(v2, far, edge.polyline, edge.class, edge.lanes, edge.one_way)?;
        }

        self.remove_vertex(v1)?;
        trace!(from = v1, onto = v2, "snapped vertex");
        Ok(())
    }

    /// Split an edge at the sampled polyline point closest to `pt` and
    /// return the new vertex's handle.
    ///
    /// Each polyline segment is walked at a fixed stride so the split can
    /// land anywhere along a bent polyline, not only at existing samples.
    /// The two replacement edges inherit the original's attributes and
    /// carry its polyline split at the chosen point; the original edge is
    /// tombstoned.
    pub fn split_edge(&mut self, e: u32, pt: Vec2) -> Result<u32, GraphError> {
        let edge = self.live_edge(e)?.clone();

        let mut best_d = edge.polyline[0].dist_sq(pt);
        let mut index = 0usize;
        let mut pos = edge.polyline[0];
        for i in 0..edge.polyline.len() - 1 {
            let p0 = edge.polyline[i];
            let p1 = edge.polyline[i + 1];
            let len = p0.dist(p1);
            let mut j = 0.0f32;
            while j < len {
                let s = Vec2 {
                    x: p0.x + (p1.x - p0.x) * j / len,
                    y: p0.y + (p1.y - p0.y) * j / len,
                };
                let d = s.dist_sq(pt);
                if d < best_d {
                    best_d = d;
                    index = i;
                    pos = s;
                }
                j += SPLIT_STEP;
            }
        }

        let src = edge.a;
        let tgt = edge.b;
        let src_pos = self.live_vertex(src)?.pos();
        let tgt_pos = self.live_vertex(tgt)?.pos();
        // Which endpoint does the polyline start at?
        let forward = edge.polyline[0].dist_sq(src_pos) < edge.polyline[0].dist_sq(tgt_pos);

        let v_new = self.add_vertex(pos.x, pos.y);

        let mut first_half: Vec<Vec2>;
        let mut second_half: Vec<Vec2>;
        if forward {
            first_half = edge.polyline[..=index].to_vec();
            first_half.push(pos);
            second_half = vec![pos];
            second_half.extend_from_slice(&edge.polyline[index + 1..]);
        } else {
            first_half = vec![pos];
            first_half.extend_from_slice(&edge.polyline[index + 1..]);
            second_half = edge.polyline[..=index].to_vec();
            second_half.push(pos);
        }

        self.add_edge(src, v_new, first_half, edge.class, edge.lanes, edge.one_way)?;
        self.add_edge(v_new, tgt, second_half, edge.class, edge.lanes, edge.one_way)?;
        self.remove_edge(e)?;

        trace!(edge = e, vertex = v_new, "split edge");
        Ok(v_new)
    }
}
