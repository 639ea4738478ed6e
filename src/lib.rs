pub mod error;
pub mod model;
pub mod geometry {
    pub mod intersect;
    pub mod math;
    pub mod tolerance;
}
pub mod ops {
    pub mod edit;
    pub mod picking;
    pub mod planarize;
    pub mod reduce;
}
mod json;

pub use error::GraphError;
pub use model::{RoadClass, RoadEdge, Vec2, Vertex};
pub use ops::edit::SnapPolicy;
pub use ops::picking::Pick;

/// An undirected road network: vertex/edge arenas with index-stable
/// handles, plus an adjacency index.
///
/// Removal is soft: a removed entity's slot goes to `None` and its handle is
/// never reused while the graph is alive, so handles held by external
/// snapshots stay meaningful. Every query skips tombstoned slots; every
/// algorithm above this layer relies on that. Adjacency lists may hold ids
/// of tombstoned edges; they are filtered on read and dropped by
/// `compact()`.
///
/// The graph is `Clone`: an external history stack snapshots it by deep
/// copy around mutating calls. There is no internal versioning.
#[derive(Clone, Debug)]
pub struct RoadGraph {
    pub(crate) vertices: Vec<Option<Vertex>>,
    pub(crate) edges: Vec<Option<RoadEdge>>,
    pub(crate) adjacency: Vec<Vec<u32>>,
    pub snap_policy: SnapPolicy,
}

impl Default for RoadGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl RoadGraph {
    pub fn new() -> Self {
        RoadGraph {
            vertices: Vec::new(),
            edges: Vec::new(),
            adjacency: Vec::new(),
            snap_policy: SnapPolicy::KeepFirst,
        }
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.edges.clear();
        self.adjacency.clear();
    }

    // Internal checked accessors. Handles that are absent or tombstoned are
    // a reported error, never a silent corruption.
    pub(crate) fn live_vertex(&self, v: u32) -> Result<&Vertex, GraphError> {
        self.vertices
            .get(v as usize)
            .and_then(|s| s.as_ref())
            .ok_or(GraphError::InvalidVertex(v))
    }

    pub(crate) fn live_vertex_mut(&mut self, v: u32) -> Result<&mut Vertex, GraphError> {
        self.vertices
            .get_mut(v as usize)
            .and_then(|s| s.as_mut())
            .ok_or(GraphError::InvalidVertex(v))
    }

    pub(crate) fn live_edge(&self, e: u32) -> Result<&RoadEdge, GraphError> {
        self.edges
            .get(e as usize)
            .and_then(|s| s.as_ref())
            .ok_or(GraphError::InvalidEdge(e))
    }

    pub(crate) fn live_edge_mut(&mut self, e: u32) -> Result<&mut RoadEdge, GraphError> {
        self.edges
            .get_mut(e as usize)
            .and_then(|s| s.as_mut())
            .ok_or(GraphError::InvalidEdge(e))
    }

    pub fn add_vertex(&mut self, x: f32, y: f32) -> u32 {
        let id = self.vertices.len() as u32;
        self.vertices.push(Some(Vertex { x, y }));
        self.adjacency.push(Vec::new());
        id
    }

    /// Add an edge between two distinct live vertices. The caller supplies
    /// the polyline (at least two points, ends anchored to the endpoint
    /// positions).
    pub fn add_edge(
        &mut self,
        a: u32,
        b: u32,
        polyline: Vec<Vec2>,
        class: RoadClass,
        lanes: u32,
        one_way: bool,
    ) -> Result<u32, GraphError> {
        if a == b {
            return Err(GraphError::LoopEdge);
        }
        self.live_vertex(a)?;
        self.live_vertex(b)?;
        if polyline.len() < 2 {
            return Err(GraphError::DegeneratePolyline);
        }
        let id = self.edges.len() as u32;
        self.edges.push(Some(RoadEdge {
            a,
            b,
            polyline,
            class,
            lanes,
            one_way,
        }));
        self.adjacency[a as usize].push(id);
        self.adjacency[b as usize].push(id);
        Ok(id)
    }

    /// Tombstone a vertex and every edge incident to it.
    pub fn remove_vertex(&mut self, v: u32) -> Result<(), GraphError> {
        self.live_vertex(v)?;
        for e in self.incident_edges(v) {
            self.edges[e as usize] = None;
        }
        self.adjacency[v as usize].clear();
        self.vertices[v as usize] = None;
        Ok(())
    }

    /// Tombstone an edge. Its id stays in the adjacency lists and is
    /// filtered on read.
    pub fn remove_edge(&mut self, e: u32) -> Result<(), GraphError> {
        self.live_edge(e)?;
        self.edges[e as usize] = None;
        Ok(())
    }

    // Queries. All of them skip tombstoned entities transparently.

    pub fn vertex_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_some())
            .map(|(i, _)| i as u32)
    }

    pub fn edge_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_some())
            .map(|(i, _)| i as u32)
    }

    pub fn vertices(&self) -> impl Iterator<Item = (u32, &Vertex)> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|v| (i as u32, v)))
    }

    pub fn edges(&self) -> impl Iterator<Item = (u32, &RoadEdge)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|e| (i as u32, e)))
    }

    pub fn get_vertex(&self, v: u32) -> Option<&Vertex> {
        self.vertices.get(v as usize).and_then(|s| s.as_ref())
    }

    pub fn get_edge(&self, e: u32) -> Option<&RoadEdge> {
        self.edges.get(e as usize).and_then(|s| s.as_ref())
    }

    /// Live edges incident to `v`, empty for a tombstoned or unknown handle.
    pub fn incident_edges(&self, v: u32) -> Vec<u32> {
        match self.adjacency.get(v as usize) {
            Some(ids) => ids
                .iter()
                .copied()
                .filter(|&e| self.edges[e as usize].is_some())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Count of live incident edges.
    pub fn degree(&self, v: u32) -> usize {
        self.incident_edges(v).len()
    }

    /// The edge between `v1` and `v2`, or `None` when they are not
    /// adjacent. Not being connected is a normal miss, not an error.
    pub fn find_edge(&self, v1: u32, v2: u32) -> Option<u32> {
        self.adjacency
            .get(v1 as usize)?
            .iter()
            .copied()
            .find(|&e| match self.get_edge(e) {
                Some(edge) => edge.other_endpoint(v1) == Some(v2),
                None => false,
            })
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.iter().filter(|s| s.is_some()).count()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.iter().filter(|s| s.is_some()).count()
    }

    pub fn edge_length(&self, e: u32) -> Result<f32, GraphError> {
        Ok(self.live_edge(e)?.length())
    }

    pub fn to_json_value(&self) -> serde_json::Value {
        json::to_json_impl(self)
    }

    pub fn from_json_value(&mut self, v: serde_json::Value) -> Result<(), GraphError> {
        json::from_json_impl(self, v)
    }

    /// Rebuild dense arenas, dropping tombstones and renumbering handles.
    /// Meant to run between user-visible edits, never mid-algorithm.
    /// Returns the old-to-new handle maps (vertices, edges).
    pub fn compact(&mut self) -> (Vec<Option<u32>>, Vec<Option<u32>>) {
        let mut vmap: Vec<Option<u32>> = vec![None; self.vertices.len()];
        let mut vertices: Vec<Option<Vertex>> = Vec::new();
        for (i, slot) in self.vertices.iter().enumerate() {
            if let Some(v) = slot {
                vmap[i] = Some(vertices.len() as u32);
                vertices.push(Some(*v));
            }
        }
        let mut emap: Vec<Option<u32>> = vec![None; self.edges.len()];
        let mut edges: Vec<Option<RoadEdge>> = Vec::new();
        let mut adjacency: Vec<Vec<u32>> = vec![Vec::new(); vertices.len()];
        for (i, slot) in self.edges.iter().enumerate() {
            if let Some(e) = slot {
                // Endpoints of a live edge are live by invariant.
                let (Some(na), Some(nb)) = (vmap[e.a as usize], vmap[e.b as usize]) else {
                    continue;
                };
                let id = edges.len() as u32;
                emap[i] = Some(id);
                let mut e = e.clone();
                e.a = na;
                e.b = nb;
                edges.push(Some(e));
                adjacency[na as usize].push(id);
                adjacency[nb as usize].push(id);
            }
        }
        self.vertices = vertices;
        self.edges = edges;
        self.adjacency = adjacency;
        (vmap, emap)
    }

    /// Integrity checks for the storage invariants. Debug builds only; a
    /// violation here is a programming error, not a recoverable condition.
    pub fn debug_validate(&self) {
        #[cfg(debug_assertions)]
        {
            use geometry::tolerance::EPS_POS;

            for (id, v) in self.vertices() {
                debug_assert!(
                    v.x.is_finite() && v.y.is_finite(),
                    "vertex {} has non-finite position",
                    id
                );
            }
            for (id, e) in self.edges() {
                let a = self.get_vertex(e.a);
                let b = self.get_vertex(e.b);
                debug_assert!(
                    a.is_some() && b.is_some(),
                    "edge {} references a tombstoned vertex",
                    id
                );
                debug_assert!(
                    e.polyline.len() >= 2,
                    "edge {} has a degenerate polyline",
                    id
                );
                let (Some(a), Some(b)) = (a, b) else { continue };
                let first = e.polyline[0];
                let last = e.polyline[e.polyline.len() - 1];
                let anchored = (first.dist(a.pos()) <= EPS_POS && last.dist(b.pos()) <= EPS_POS)
                    || (first.dist(b.pos()) <= EPS_POS && last.dist(a.pos()) <= EPS_POS);
                debug_assert!(anchored, "edge {} polyline is not endpoint-anchored", id);
            }
        }
    }
}
