//! Global planarization: every segment crossing between two edges becomes
//! a shared vertex.
//!
//! One pass resolves a single crossing and reports it; the driver loops
//! until a full scan comes back clean. Fixing one crossing invalidates any
//! further scan state (split and snap change edge identities), so the
//! rescan-from-scratch strategy is what keeps this correct. Termination:
//! each resolved crossing tombstones both offending edges and adds a
//! vertex, so the same crossing can never be found twice.

use tracing::debug;

use crate::geometry::intersect::segment_segment_intersect;
use crate::{GraphError, RoadGraph};

impl RoadGraph {
    /// Resolve crossings until none remain.
    pub fn planarify(&mut self) -> Result<(), GraphError> {
        while self.planarify_one()? {}
        self.debug_validate();
        Ok(())
    }

    /// Resolve the first crossing found between two edges that do not
    /// share an endpoint: split both at the intersection point and merge
    /// the two new vertices into one. Returns whether a crossing was
    /// resolved.
    pub fn planarify_one(&mut self) -> Result<bool, GraphError> {
        let ids: Vec<u32> = self.edge_ids().collect();
        for (i, &e1) in ids.iter().enumerate() {
            let Some(first) = self.get_edge(e1).cloned() else {
                continue;
            };
            for &e2 in &ids[i + 1..] {
                let Some(second) = self.get_edge(e2) else {
                    continue;
                };
                // Edges meeting at a vertex are adjacent, not crossing.
                if first.a == second.a
                    || first.a == second.b
                    || first.b == second.a
                    || first.b == second.b
                {
                    continue;
                }
                let second = second.clone();
                for sa in first.polyline.windows(2) {
                    for sb in second.polyline.windows(2) {
                        let Some(hit) = segment_segment_intersect(sa[0], sa[1], sb[0], sb[1])
                        else {
                            continue;
                        };
                        let nv1 = self.split_edge(e1, hit.point)?;
                        let nv2 = self.split_edge(e2, hit.point)?;
                        self.snap_vertex(nv2, nv1)?;
                        debug!(
                            edge_a = e1,
                            edge_b = e2,
                            x = hit.point.x,
                            y = hit.point.y,
                            "resolved crossing"
                        );
                        return Ok(true);
                    }
                }
            }
        }
        Ok(false)
    }
}
