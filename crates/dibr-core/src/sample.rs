use crate::image::{GrayImage, GrayImageView, RgbImageView};

/// Out-of-bounds policy for the resampling primitives.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Border {
    /// Replicate the nearest edge pixel.
    Clamp,
    /// Substitute a fixed value outside the image.
    Constant(f32),
}

#[inline]
fn clamp_index(i: i32, len: usize) -> usize {
    if i < 0 {
        0
    } else {
        (i as usize).min(len - 1)
    }
}

#[inline]
fn fetch_gray(src: &GrayImageView<'_>, x: i32, y: i32, border: Border) -> f32 {
    match border {
        Border::Constant(v) => {
            if x < 0 || y < 0 || x >= src.width as i32 || y >= src.height as i32 {
                v
            } else {
                src.data[y as usize * src.width + x as usize] as f32
            }
        }
        Border::Clamp => {
            let xi = clamp_index(x, src.width);
            let yi = clamp_index(y, src.height);
            src.data[yi * src.width + xi] as f32
        }
    }
}

#[inline]
fn fetch_rgb(src: &RgbImageView<'_>, x: i32, y: i32, border: Border) -> [f32; 3] {
    match border {
        Border::Constant(v) => {
            if x < 0 || y < 0 || x >= src.width as i32 || y >= src.height as i32 {
                [v, v, v]
            } else {
                let i = (y as usize * src.width + x as usize) * 3;
                [
                    src.data[i] as f32,
                    src.data[i + 1] as f32,
                    src.data[i + 2] as f32,
                ]
            }
        }
        Border::Clamp => {
            let xi = clamp_index(x, src.width);
            let yi = clamp_index(y, src.height);
            let i = (yi * src.width + xi) * 3;
            [
                src.data[i] as f32,
                src.data[i + 1] as f32,
                src.data[i + 2] as f32,
            ]
        }
    }
}

/// Bilinear sample of a single-channel image at a fractional coordinate.
#[inline]
pub fn sample_bilinear(src: &GrayImageView<'_>, x: f32, y: f32, border: Border) -> f32 {
    if src.width == 0 || src.height == 0 {
        return match border {
            Border::Constant(v) => v,
            Border::Clamp => 0.0,
        };
    }

    let x0 = x.floor() as i32;
    let y0 = y.floor() as i32;
    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    let p00 = fetch_gray(src, x0, y0, border);
    let p10 = fetch_gray(src, x0 + 1, y0, border);
    let p01 = fetch_gray(src, x0, y0 + 1, border);
    let p11 = fetch_gray(src, x0 + 1, y0 + 1, border);

    let a = p00 + fx * (p10 - p00);
    let b = p01 + fx * (p11 - p01);
    a + fy * (b - a)
}

/// Bilinear sample of an interleaved RGB image at a fractional coordinate.
#[inline]
pub fn sample_bilinear_rgb(src: &RgbImageView<'_>, x: f32, y: f32, border: Border) -> [f32; 3] {
    if src.width == 0 || src.height == 0 {
        return match border {
            Border::Constant(v) => [v, v, v],
            Border::Clamp => [0.0, 0.0, 0.0],
        };
    }

    let x0 = x.floor() as i32;
    let y0 = y.floor() as i32;
    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    let p00 = fetch_rgb(src, x0, y0, border);
    let p10 = fetch_rgb(src, x0 + 1, y0, border);
    let p01 = fetch_rgb(src, x0, y0 + 1, border);
    let p11 = fetch_rgb(src, x0 + 1, y0 + 1, border);

    let mut out = [0.0f32; 3];
    for c in 0..3 {
        let a = p00[c] + fx * (p10[c] - p00[c]);
        let b = p01[c] + fx * (p11[c] - p01[c]);
        out[c] = a + fy * (b - a);
    }
    out
}

/// Resize a single-channel image with bilinear interpolation.
///
/// Source coordinates are taken at pixel centers, so the output covers the
/// same spatial extent as the input regardless of the scale factor.
pub fn resize_bilinear(src: &GrayImageView<'_>, new_w: usize, new_h: usize) -> GrayImage {
    let mut data = vec![0u8; new_w * new_h];

    if new_w > 0 && new_h > 0 && src.width > 0 && src.height > 0 {
        let sx = src.width as f32 / new_w as f32;
        let sy = src.height as f32 / new_h as f32;

        for y in 0..new_h {
            let src_y = (y as f32 + 0.5) * sy - 0.5;
            for x in 0..new_w {
                let src_x = (x as f32 + 0.5) * sx - 0.5;
                let v = sample_bilinear(src, src_x, src_y, Border::Clamp);
                data[y * new_w + x] = v.round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    GrayImage {
        width: new_w,
        height: new_h,
        data,
    }
}
