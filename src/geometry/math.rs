use super::tolerance::EPS_LEN_SQ;
use crate::model::Vec2;

/// Squared distance from `p` to segment `ab`, plus the clamped projection
/// parameter along the segment.
pub fn seg_distance_sq(p: Vec2, a: Vec2, b: Vec2) -> (f32, f32) {
    let vx = b.x - a.x;
    let vy = b.y - a.y;
    let wx = p.x - a.x;
    let wy = p.y - a.y;
    let vv = vx * vx + vy * vy;
    let mut t = if vv > 0.0 { (wx * vx + wy * vy) / vv } else { 0.0 };
    if t < 0.0 {
        t = 0.0;
    } else if t > 1.0 {
        t = 1.0;
    }
    let dx = p.x - (a.x + t * vx);
    let dy = p.y - (a.y + t * vy);
    (dx * dx + dy * dy, t)
}

/// Distance from point `c` to the line through `a, b`.
///
/// With `segment_only`, the projection parameter is confined to the
/// segment: outside [0, 1] the distance to the nearer endpoint is returned.
/// A degenerate zero-length `ab` falls back to the distance to `a`.
pub fn point_segment_distance(a: Vec2, b: Vec2, c: Vec2, segment_only: bool) -> f32 {
    let denom = (b.x - a.x) * (b.x - a.x) + (b.y - a.y) * (b.y - a.y);
    if denom <= EPS_LEN_SQ {
        return a.dist(c);
    }
    let numer = (c.x - a.x) * (b.x - a.x) + (c.y - a.y) * (b.y - a.y);
    let r = numer / denom;

    if segment_only && !(0.0..=1.0).contains(&r) {
        let d1 = a.dist(c);
        let d2 = b.dist(c);
        d1.min(d2)
    } else {
        ((a.y - c.y) * (b.x - a.x) - (a.x - c.x) * (b.y - a.y)).abs() / denom.sqrt()
    }
}
