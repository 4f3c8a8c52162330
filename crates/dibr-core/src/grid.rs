use nalgebra::Point2;

/// Evenly spaced lattice axis from `lo` to `hi` inclusive.
///
/// Endpoints are hit exactly; callers guarantee `density >= 2`.
pub fn ndc_grid_axis(lo: f32, hi: f32, density: usize) -> Vec<f32> {
    let last = (density - 1) as f32;
    (0..density)
        .map(|i| lo + (hi - lo) * (i as f32 / last))
        .collect()
}

/// Map an NDC lattice point (x in `[-aspect, +aspect]`, y in `[-1, +1]`,
/// y up) to texture coordinates in the unit square, v down.
#[inline]
pub fn ndc_to_uv(p: Point2<f32>, aspect: f32) -> [f32; 2] {
    [(p.x / aspect + 1.0) / 2.0, (1.0 - p.y) / 2.0]
}

/// Map an NDC lattice point to the image pixel it samples.
///
/// This is the same affine transform as [`ndc_to_uv`] scaled to pixel
/// units, rounded and clamped into bounds, so depth sampling and UV
/// generation cannot drift apart.
#[inline]
pub fn ndc_to_pixel(
    p: Point2<f32>,
    aspect: f32,
    width: usize,
    height: usize,
) -> (usize, usize) {
    let [u, v] = ndc_to_uv(p, aspect);
    let max_x = width.saturating_sub(1) as f32;
    let max_y = height.saturating_sub(1) as f32;
    let px = (u * width as f32).round().clamp(0.0, max_x) as usize;
    let py = (v * height as f32).round().clamp(0.0, max_y) as usize;
    (px, py)
}
