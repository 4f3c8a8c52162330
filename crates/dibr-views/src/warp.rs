use dibr_core::{sample_bilinear_rgb, Border, DepthMap, RgbImage, RgbImageView};
use serde::{Deserialize, Serialize};

use crate::shift::{pixel_shift, ShiftPolicy};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors returned by the view synthesizer.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    #[error("shift list is empty")]
    EmptyShifts,
    #[error("depth dimensions {depth_width}x{depth_height} do not match image {image_width}x{image_height}")]
    DimensionMismatch {
        image_width: usize,
        image_height: usize,
        depth_width: usize,
        depth_height: usize,
    },
}

fn default_shifts() -> Vec<i32> {
    vec![-20, -10, 0, 10, 20]
}

fn default_policy() -> ShiftPolicy {
    ShiftPolicy::Uniform
}

fn default_perspective_strength() -> f32 {
    0.3
}

/// View synthesizer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewParams {
    /// Horizontal shift magnitudes, one output view per entry, order and
    /// duplicates preserved.
    #[serde(default = "default_shifts")]
    pub shifts: Vec<i32>,
    #[serde(default = "default_policy")]
    pub policy: ShiftPolicy,
    /// Border amplification for [`ShiftPolicy::Perspective`]; 0 disables.
    #[serde(default = "default_perspective_strength")]
    pub perspective_strength: f32,
}

impl Default for ViewParams {
    fn default() -> Self {
        Self {
            shifts: default_shifts(),
            policy: default_policy(),
            perspective_strength: default_perspective_strength(),
        }
    }
}

/// One synthesized view, tagged with the shift that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedView {
    pub shift: i32,
    pub image: RgbImage,
}

/// Re-project the source image horizontally by a depth-weighted shift.
///
/// For each output pixel the source is sampled at `x + shift × depth`
/// (bilinear, edge pixels replicated); the vertical coordinate is left
/// untouched.
pub fn synthesize_view(
    src: &RgbImageView<'_>,
    depth: &DepthMap,
    shift: i32,
    policy: ShiftPolicy,
    strength: f32,
) -> RgbImage {
    let (w, h) = (src.width, src.height);
    let mut data = vec![0u8; w * h * 3];

    for y in 0..h {
        for x in 0..w {
            let dx = pixel_shift(depth.get(x, y), x, w, shift, policy, strength);
            let rgb = sample_bilinear_rgb(src, x as f32 + dx, y as f32, Border::Clamp);
            let i = (y * w + x) * 3;
            data[i] = rgb[0].round().clamp(0.0, 255.0) as u8;
            data[i + 1] = rgb[1].round().clamp(0.0, 255.0) as u8;
            data[i + 2] = rgb[2].round().clamp(0.0, 255.0) as u8;
        }
    }

    RgbImage {
        width: w,
        height: h,
        data,
    }
}

/// Synthesize one view per configured shift, in input order.
///
/// Fails before producing anything if the shift list is empty or the
/// depth field does not match the image resolution.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "info",
        skip(src, depth, params),
        fields(width = src.width, height = src.height, views = params.shifts.len())
    )
)]
pub fn synthesize_views(
    src: &RgbImageView<'_>,
    depth: &DepthMap,
    params: &ViewParams,
) -> Result<Vec<SynthesizedView>, ViewError> {
    if params.shifts.is_empty() {
        return Err(ViewError::EmptyShifts);
    }
    if src.width != depth.width || src.height != depth.height {
        return Err(ViewError::DimensionMismatch {
            image_width: src.width,
            image_height: src.height,
            depth_width: depth.width,
            depth_height: depth.height,
        });
    }

    let mut views = Vec::with_capacity(params.shifts.len());
    for (i, &shift) in params.shifts.iter().enumerate() {
        log::info!(
            "synthesizing view {}/{} (shift {shift})",
            i + 1,
            params.shifts.len()
        );
        let image = synthesize_view(src, depth, shift, params.policy, params.perspective_strength);
        views.push(SynthesizedView { shift, image });
    }
    Ok(views)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker_image(width: usize, height: usize) -> RgbImage {
        let mut data = Vec::with_capacity(width * height * 3);
        for y in 0..height {
            for x in 0..width {
                let v = if (x + y) % 2 == 0 { 230u8 } else { 25 };
                data.extend_from_slice(&[v, v / 2, 255 - v]);
            }
        }
        RgbImage::from_vec(width, height, data).expect("valid image")
    }

    fn constant_depth(width: usize, height: usize, value: f32) -> DepthMap {
        DepthMap {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    #[test]
    fn zero_shift_is_the_identity() {
        let img = checker_image(6, 4);
        let depth = constant_depth(6, 4, 0.7);
        let out = synthesize_view(&img.as_view(), &depth, 0, ShiftPolicy::Uniform, 0.3);
        assert_eq!(out, img);
    }

    #[test]
    fn any_shift_is_invisible_on_flat_color() {
        let img = RgbImage::from_vec(5, 3, vec![90u8; 5 * 3 * 3]).expect("valid image");
        let depth = DepthMap {
            width: 5,
            height: 3,
            data: (0..15).map(|i| i as f32 / 14.0).collect(),
        };
        let out = synthesize_view(&img.as_view(), &depth, 10, ShiftPolicy::Uniform, 0.3);
        assert_eq!(out, img);
    }

    #[test]
    fn unit_depth_shifts_whole_rows() {
        // row of distinct columns, depth 1.0 everywhere, integer shift
        let data = vec![
            0u8, 0, 0, 50, 50, 50, 100, 100, 100, 150, 150, 150, //
        ];
        let img = RgbImage::from_vec(4, 1, data).expect("valid image");
        let depth = constant_depth(4, 1, 1.0);
        let out = synthesize_view(&img.as_view(), &depth, 1, ShiftPolicy::Uniform, 0.0);
        // out(x) = src(x + 1), right edge replicated
        assert_eq!(
            out.data,
            vec![50, 50, 50, 100, 100, 100, 150, 150, 150, 150, 150, 150]
        );
    }

    #[test]
    fn negative_shift_replicates_the_left_edge() {
        let data = vec![10u8, 10, 10, 200, 200, 200];
        let img = RgbImage::from_vec(2, 1, data).expect("valid image");
        let depth = constant_depth(2, 1, 1.0);
        let out = synthesize_view(&img.as_view(), &depth, -1, ShiftPolicy::Uniform, 0.0);
        assert_eq!(out.data, vec![10, 10, 10, 10, 10, 10]);
    }

    #[test]
    fn views_come_back_in_input_order_with_tags() {
        let img = checker_image(4, 4);
        let depth = constant_depth(4, 4, 0.5);
        let params = ViewParams {
            shifts: vec![3, -3, 0, 3],
            policy: ShiftPolicy::Uniform,
            perspective_strength: 0.0,
        };
        let views = synthesize_views(&img.as_view(), &depth, &params).expect("views");
        let shifts: Vec<i32> = views.iter().map(|v| v.shift).collect();
        assert_eq!(shifts, vec![3, -3, 0, 3]);
        // duplicate shifts produce identical images
        assert_eq!(views[0].image, views[3].image);
    }

    #[test]
    fn empty_shift_list_is_rejected() {
        let img = checker_image(4, 4);
        let depth = constant_depth(4, 4, 0.5);
        let params = ViewParams {
            shifts: vec![],
            ..ViewParams::default()
        };
        let err = synthesize_views(&img.as_view(), &depth, &params).unwrap_err();
        assert_eq!(err, ViewError::EmptyShifts);
    }

    #[test]
    fn mismatched_depth_resolution_is_rejected() {
        let img = checker_image(4, 4);
        let depth = constant_depth(2, 2, 0.5);
        let err = synthesize_views(&img.as_view(), &depth, &ViewParams::default()).unwrap_err();
        assert!(matches!(err, ViewError::DimensionMismatch { .. }));
    }

    #[test]
    fn params_deserialize_with_defaults() {
        let params: ViewParams = serde_json::from_str("{}").expect("parse");
        assert_eq!(params.shifts, vec![-20, -10, 0, 10, 20]);
        assert_eq!(params.policy, ShiftPolicy::Uniform);
        assert!((params.perspective_strength - 0.3).abs() < 1e-6);
    }
}
