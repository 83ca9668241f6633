// Shared numeric guards for curve construction and hit-testing

pub const EPS_LEN: f32 = 1e-6; // zero-length edge vector threshold (px)

// Recursion cap for adaptive flattening
pub const MAX_FLATTEN_DEPTH: u32 = 16;

// Flattening tolerances below this explode the point count on long loops
pub const MIN_FLATTEN_TOL: f32 = 0.05;

#[inline]
pub fn clamp01(x: f32) -> f32 {
    x.max(0.0).min(1.0)
}

/// Unit vector and length; a degenerate vector yields `((0, 0), 0)`.
#[inline]
pub fn norm2(x: f32, y: f32) -> ((f32, f32), f32) {
    let len = (x * x + y * y).sqrt();
    if len > EPS_LEN {
        ((x / len, y / len), len)
    } else {
        ((0.0, 0.0), 0.0)
    }
}
