use crate::image::GrayImageView;

/// Per-pixel depth field normalized to `[0, 1]`, row-major, same
/// dimensions as the image it will displace or warp.
///
/// Two normalization conventions exist side by side and are deliberately
/// kept separate: mesh displacement divides by the field maximum, view
/// synthesis divides by the fixed 8-bit ceiling. They produce different
/// fields for the same input whenever the raw maximum is below 255.
#[derive(Clone, Debug, PartialEq)]
pub struct DepthMap {
    pub width: usize,
    pub height: usize,
    pub data: Vec<f32>,
}

impl DepthMap {
    /// Normalize by the field maximum.
    ///
    /// An all-zero field has no usable maximum and collapses to the
    /// all-zero map; callers treat that as a flat result, not an error.
    pub fn from_max_normalized(raw: &GrayImageView<'_>) -> Self {
        let max = raw.data.iter().copied().max().unwrap_or(0);
        let data = if max == 0 {
            log::warn!("depth field is all zero; output will be flat");
            vec![0.0; raw.data.len()]
        } else {
            let inv = 1.0 / max as f32;
            raw.data.iter().map(|&d| d as f32 * inv).collect()
        };
        Self {
            width: raw.width,
            height: raw.height,
            data,
        }
    }

    /// Normalize by the fixed 8-bit ceiling (255).
    pub fn from_fixed_normalized(raw: &GrayImageView<'_>) -> Self {
        Self {
            width: raw.width,
            height: raw.height,
            data: raw.data.iter().map(|&d| d as f32 / 255.0).collect(),
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x]
    }
}
