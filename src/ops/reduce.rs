//! Degree-2 reduction: vertices that only continue a path are folded into
//! a single edge spanning their two neighbors.

use tracing::debug;

use crate::{GraphError, RoadGraph};

impl RoadGraph {
    /// Eliminate every reducible degree-2 vertex.
    ///
    /// The scan restarts after each successful reduction, since a
    /// reduction tombstones entities and re-orients polylines; the loop
    /// terminates when one full scan finds nothing to fold.
    pub fn reduce(&mut self) -> Result<(), GraphError> {
        let mut reduced = true;
        while reduced {
            reduced = false;
            let ids: Vec<u32> = self.vertex_ids().collect();
            for v in ids {
                if self.degree(v) != 2 {
                    continue;
                }
                if self.reduce_vertex(v)? {
                    reduced = true;
                    break;
                }
            }
        }
        Ok(())
    }

    /// Fold a single degree-2 vertex into one edge connecting its two far
    /// endpoints, whose polyline is the two incident polylines
    /// concatenated end to end. Returns whether the vertex was reduced.
    ///
    /// Skipped when the two incident edges differ in road class, or when
    /// their far endpoints coincide: collapsing that vertex would destroy
    /// a real loop road.
    pub fn reduce_vertex(&mut self, v: u32) -> Result<bool, GraphError> {
        self.live_vertex(v)?;
        let incident = self.incident_edges(v);
        if incident.len() != 2 {
            return Ok(false);
        }
        let (e0, e1) = (incident[0], incident[1]);
        let far0 = self
            .live_edge(e0)?
            .other_endpoint(v)
            .ok_or(GraphError::InvalidEdge(e0))?;
        let far1 = self
            .live_edge(e1)?
            .other_endpoint(v)
            .ok_or(GraphError::InvalidEdge(e1))?;

        if far0 == far1 {
            return Ok(false);
        }
        if self.live_edge(e0)?.class != self.live_edge(e1)?.class {
            return Ok(false);
        }

        // First polyline runs far0 -> v, second runs v -> far1; drop the
        // shared sample where they meet.
        self.orient_polyline(e0, far0)?;
        self.orient_polyline(e1, v)?;
        let first = self.live_edge(e0)?;
        let mut polyline = first.polyline.clone();
        let (class, lanes, one_way) = (first.class, first.lanes, first.one_way);
        polyline.extend_from_slice(&self.live_edge(e1)?.polyline[1..]);

        self.add_edge(far0, far1, polyline, class, lanes, one_way)?;
        self.remove_edge(e0)?;
        self.remove_edge(e1)?;
        self.remove_vertex(v)?;

        debug!(vertex = v, "reduced degree-2 vertex");
        Ok(true)
    }
}
