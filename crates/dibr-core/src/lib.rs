//! Core types and utilities for depth-image-based rendering.
//!
//! This crate is intentionally small and purely numeric. It does *not*
//! depend on any concrete raster codec or depth estimator; callers hand it
//! plain row-major buffers.

mod depth;
mod grid;
mod image;
mod logger;
mod sample;

pub use depth::DepthMap;
pub use grid::{ndc_grid_axis, ndc_to_pixel, ndc_to_uv};
pub use image::{BufferError, GrayImage, GrayImageView, RgbImage, RgbImageView};
pub use sample::{resize_bilinear, sample_bilinear, sample_bilinear_rgb, Border};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
