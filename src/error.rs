use thiserror::Error;

/// Errors reported by graph storage and topology operations.
///
/// A missing edge between two live vertices is not an error; `find_edge`
/// returns `None` for that normal miss.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("vertex {0} is absent or invalidated")]
    InvalidVertex(u32),
    #[error("edge {0} is absent or invalidated")]
    InvalidEdge(u32),
    #[error("polyline needs at least two points")]
    DegeneratePolyline,
    #[error("edge endpoints must be distinct")]
    LoopEdge,
    #[error("malformed snapshot: {0}")]
    Snapshot(String),
}
