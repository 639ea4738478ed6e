use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }

    #[inline]
    pub fn dist_sq(self, other: Vec2) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    #[inline]
    pub fn dist(self, other: Vec2) -> f32 {
        self.dist_sq(other).sqrt()
    }
}

/// Road classification, ordered from most to least significant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoadClass {
    Trunk,
    Primary,
    Secondary,
    Residential,
}

/// An intersection or road endpoint in world coordinates.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Vertex {
    pub x: f32,
    pub y: f32,
}

impl Vertex {
    #[inline]
    pub fn pos(&self) -> Vec2 {
        Vec2 {
            x: self.x,
            y: self.y,
        }
    }
}

/// A road segment between two vertices.
///
/// The polyline holds at least two samples; its first and last samples
/// coincide with the two endpoint vertex positions, but which end lines up
/// with `a` vs `b` is not fixed. Callers resolve orientation by nearest
/// endpoint (see `RoadGraph::orient_polyline`).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoadEdge {
    pub a: u32,
    pub b: u32,
    pub polyline: Vec<Vec2>,
    pub class: RoadClass,
    pub lanes: u32,
    pub one_way: bool,
}

impl RoadEdge {
    /// Total polyline length.
    pub fn length(&self) -> f32 {
        self.polyline
            .windows(2)
            .map(|w| w[0].dist(w[1]))
            .sum()
    }

    /// The endpoint handle opposite `v`, if `v` is one of the endpoints.
    pub fn other_endpoint(&self, v: u32) -> Option<u32> {
        if self.a == v {
            Some(self.b)
        } else if self.b == v {
            Some(self.a)
        } else {
            None
        }
    }
}
