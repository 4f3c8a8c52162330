use dibr_core::DepthMap;
use serde::{Deserialize, Serialize};

/// How the per-pixel horizontal displacement is derived from depth.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftPolicy {
    /// `shift × depth` everywhere.
    Uniform,
    /// `shift × depth`, amplified towards the left/right image borders to
    /// mimic perspective: pixels far from the horizontal center move more.
    Perspective,
}

/// Perspective amplification factor for column `x`.
///
/// 1 at the image center, `1 + strength` at the left/right borders;
/// strength 0 disables the effect.
#[inline]
pub fn perspective_scale(x: usize, width: usize, strength: f32) -> f32 {
    let half = width as f32 / 2.0;
    1.0 + ((x as f32 - half).abs() / half) * strength
}

#[inline]
pub(crate) fn pixel_shift(
    depth: f32,
    x: usize,
    width: usize,
    shift: i32,
    policy: ShiftPolicy,
    strength: f32,
) -> f32 {
    let base = shift as f32 * depth;
    match policy {
        ShiftPolicy::Uniform => base,
        ShiftPolicy::Perspective => base * perspective_scale(x, width, strength),
    }
}

/// Per-pixel horizontal displacement map for one view, row-major.
pub fn shift_map(depth: &DepthMap, shift: i32, policy: ShiftPolicy, strength: f32) -> Vec<f32> {
    let mut map = Vec::with_capacity(depth.width * depth.height);
    for y in 0..depth.height {
        for x in 0..depth.width {
            map.push(pixel_shift(
                depth.get(x, y),
                x,
                depth.width,
                shift,
                policy,
                strength,
            ));
        }
    }
    map
}
