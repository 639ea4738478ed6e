//! Whole-graph snapshots as JSON values.
//!
//! This is the seam the external importer/exporter and history
//! collaborators consume. Handles are written out and restored verbatim
//! (tombstone slots are re-padded on load), so handles captured by value
//! against a snapshot stay meaningful.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{RoadClass, RoadEdge, Vec2};
use crate::{GraphError, RoadGraph};

#[derive(Serialize, Deserialize)]
struct VertexSer {
    id: u32,
    x: f32,
    y: f32,
}

#[derive(Serialize, Deserialize)]
struct EdgeSer {
    id: u32,
    a: u32,
    b: u32,
    polyline: Vec<Vec2>,
    class: RoadClass,
    lanes: u32,
    one_way: bool,
}

#[derive(Serialize, Deserialize)]
struct GraphSer {
    vertices: Vec<VertexSer>,
    edges: Vec<EdgeSer>,
}

pub fn to_json_impl(g: &RoadGraph) -> Value {
    let vertices = g
        .vertices()
        .map(|(id, v)| VertexSer { id, x: v.x, y: v.y })
        .collect();
    let edges = g
        .edges()
        .map(|(id, e)| EdgeSer {
            id,
            a: e.a,
            b: e.b,
            polyline: e.polyline.clone(),
            class: e.class,
            lanes: e.lanes,
            one_way: e.one_way,
        })
        .collect();
    serde_json::to_value(GraphSer { vertices, edges }).unwrap_or(Value::Null)
}

pub fn from_json_impl(g: &mut RoadGraph, v: Value) -> Result<(), GraphError> {
    let ser: GraphSer =
        serde_json::from_value(v).map_err(|e| GraphError::Snapshot(e.to_string()))?;

    g.clear();
    for vs in &ser.vertices {
        let idx = vs.id as usize;
        if g.vertices.len() <= idx {
            g.vertices.resize(idx + 1, None);
            g.adjacency.resize(idx + 1, Vec::new());
        }
        if g.vertices[idx].is_some() {
            return Err(GraphError::Snapshot(format!("duplicate vertex id {}", vs.id)));
        }
        g.vertices[idx] = Some(crate::Vertex { x: vs.x, y: vs.y });
    }
    for es in ser.edges {
        let idx = es.id as usize;
        if g.edges.len() <= idx {
            g.edges.resize(idx + 1, None);
        }
        if g.edges[idx].is_some() {
            return Err(GraphError::Snapshot(format!("duplicate edge id {}", es.id)));
        }
        if es.polyline.len() < 2 {
            return Err(GraphError::Snapshot(format!(
                "edge {} has a degenerate polyline",
                es.id
            )));
        }
        for &end in &[es.a, es.b] {
            if g.get_vertex(end).is_none() {
                return Err(GraphError::Snapshot(format!(
                    "edge {} references missing vertex {}",
                    es.id, end
                )));
            }
        }
        g.edges[idx] = Some(RoadEdge {
            a: es.a,
            b: es.b,
            polyline: es.polyline,
            class: es.class,
            lanes: es.lanes,
            one_way: es.one_way,
        });
        g.adjacency[es.a as usize].push(es.id);
        g.adjacency[es.b as usize].push(es.id);
    }
    g.debug_validate();
    Ok(())
}
