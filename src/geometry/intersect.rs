// Strict-interior segment-segment intersection with f64 internal math.
//
// Both parameters must land in [EPS_PARAM, 1 - EPS_PARAM]: an intersection
// at or within tolerance of an endpoint is deliberately not reported, so
// edges that merely touch at a shared vertex never read as crossing.
// Parallel, near-parallel, and degenerate pairs report no intersection.

use super::tolerance::{EPS_DENOM, EPS_LEN_SQ, EPS_PARAM};
use crate::model::Vec2;

/// A strict-interior crossing of two segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegHit {
    /// Parameter on the first segment, in (0, 1).
    pub t: f32,
    /// Parameter on the second segment, in (0, 1).
    pub u: f32,
    pub point: Vec2,
}

pub fn segment_segment_intersect(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> Option<SegHit> {
    let ax = a.x as f64;
    let ay = a.y as f64;
    let rx = (b.x - a.x) as f64;
    let ry = (b.y - a.y) as f64;
    let cx = c.x as f64;
    let cy = c.y as f64;
    let sx = (d.x - c.x) as f64;
    let sy = (d.y - c.y) as f64;

    if rx * rx + ry * ry < EPS_LEN_SQ as f64 || sx * sx + sy * sy < EPS_LEN_SQ as f64 {
        return None;
    }

    let denom = rx * sy - ry * sx;
    if denom.abs() < EPS_DENOM as f64 {
        // Parallel or collinear; overlaps are excluded by design.
        return None;
    }

    let qpx = cx - ax;
    let qpy = cy - ay;
    let t = (qpx * sy - qpy * sx) / denom;
    let u = (qpx * ry - qpy * rx) / denom;

    let eps = EPS_PARAM as f64;
    if t < eps || t > 1.0 - eps || u < eps || u > 1.0 - eps {
        return None;
    }

    Some(SegHit {
        t: t as f32,
        u: u as f32,
        point: Vec2 {
            x: (ax + t * rx) as f32,
            y: (ay + t * ry) as f32,
        },
    })
}
