// Centralized tolerances and thresholds. These materially change
// planarization outcomes on near-degenerate input, so they are named here
// instead of being sprinkled as literals.

/// Parametric slack for the strict-interior intersection test: both
/// parameters must land in [EPS_PARAM, 1 - EPS_PARAM]. Keeps adjacent,
/// endpoint-touching edges from registering as crossings.
pub const EPS_PARAM: f32 = 1e-6;

/// Squared-length threshold below which a segment is degenerate.
pub const EPS_LEN_SQ: f32 = 1e-6;

/// Denominator guard for near-parallel segment pairs.
pub const EPS_DENOM: f32 = 1e-9;

/// Point coincidence threshold (world units) for endpoint anchoring.
pub const EPS_POS: f32 = 1e-3;

/// Edges shorter than this are absorbed when their endpoints merge.
pub const MIN_EDGE_LEN: f32 = 1.0;

/// Sampling stride (world units) when searching a polyline for the best
/// split location.
pub const SPLIT_STEP: f32 = 1.0;

/// Default hit-test radius (world units) for picking.
pub const PICK_TOL: f32 = 5.0;
