// Centralized ingestion limits to harden against untrusted input (JSON documents, service payloads)

// Scene size caps
pub const MAX_NODES: usize = 50_000;
pub const MAX_EDGES: usize = 200_000;

// Labels longer than this are rejected on load
pub const MAX_LABEL_LEN: usize = 256;

// Numeric bounds
pub const COORD_MIN: f32 = -10_000_000.0;
pub const COORD_MAX: f32 = 10_000_000.0;
pub const CURVATURE_MAX: f32 = 100_000.0;

#[inline]
pub fn in_coord_bounds(x: f32) -> bool {
    x.is_finite() && x >= COORD_MIN && x <= COORD_MAX
}

#[inline]
pub fn in_curvature_bounds(c: f32) -> bool {
    c.is_finite() && c.abs() <= CURVATURE_MAX
}

/// Pulls a coordinate into the bounds the loaders accept; non-finite input lands on 0.
#[inline]
pub fn clamp_coord(x: f32) -> f32 {
    if x.is_finite() { x.clamp(COORD_MIN, COORD_MAX) } else { 0.0 }
}
