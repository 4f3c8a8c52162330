//! File-based end-to-end helpers.
//!
//! Reads the RGB raster and grayscale depth raster with the `image`
//! crate, reconciles their resolutions (the depth field is resampled to
//! the image, with a warning), and hands plain buffers to the generator
//! crates. All failures abort the current job before any output is
//! written; only the per-view PNG loop can leave earlier views behind if
//! the disk fills mid-run.

use std::fs;
use std::path::{Path, PathBuf};

use dibr_core::{resize_bilinear, DepthMap, GrayImage, GrayImageView, RgbImageView};
use dibr_mesh::{build_displaced_mesh, Mesh, MeshError, MeshIoError, MeshParams};
use dibr_views::{synthesize_views, ViewError, ViewParams};
use image::ImageReader;

use crate::config::{MeshJobConfig, ViewJobConfig};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors produced by the file-based pipeline.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Mesh(#[from] MeshError),
    #[error(transparent)]
    MeshIo(#[from] MeshIoError),
    #[error(transparent)]
    View(#[from] ViewError),
}

/// Read an RGB raster from disk.
pub fn load_rgb(path: impl AsRef<Path>) -> Result<image::RgbImage, PipelineError> {
    let path = path.as_ref();
    log::info!("reading image {}", path.display());
    Ok(ImageReader::open(path)?.decode()?.to_rgb8())
}

/// Read a single-channel depth raster from disk.
pub fn load_gray(path: impl AsRef<Path>) -> Result<image::GrayImage, PipelineError> {
    let path = path.as_ref();
    log::info!("reading depth map {}", path.display());
    Ok(ImageReader::open(path)?.decode()?.to_luma8())
}

/// Borrow an `image::RgbImage` as the lightweight core view type.
pub fn rgb_view(img: &image::RgbImage) -> RgbImageView<'_> {
    RgbImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Borrow an `image::GrayImage` as the lightweight core view type.
pub fn gray_view(img: &image::GrayImage) -> GrayImageView<'_> {
    GrayImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Bring the depth raster to the image resolution, resampling if needed.
pub fn match_depth_resolution(
    depth: &image::GrayImage,
    width: usize,
    height: usize,
) -> GrayImage {
    let view = gray_view(depth);
    if view.width == width && view.height == height {
        return GrayImage {
            width,
            height,
            data: depth.as_raw().clone(),
        };
    }
    log::warn!(
        "depth map resolution {}x{} differs from image {}x{}; resizing depth map",
        view.width,
        view.height,
        width,
        height
    );
    resize_bilinear(&view, width, height)
}

/// Generate a displaced mesh from rasters on disk and write it as JSON.
///
/// Returns the mesh so callers can inspect it without re-reading the file.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(image_path, depth_path, output_path, params))
)]
pub fn generate_mesh_file(
    image_path: impl AsRef<Path>,
    depth_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    params: &MeshParams,
) -> Result<Mesh, PipelineError> {
    let img = load_rgb(&image_path)?;
    let depth_raw = load_gray(&depth_path)?;

    let (w, h) = (img.width() as usize, img.height() as usize);
    let depth_matched = match_depth_resolution(&depth_raw, w, h);
    let depth = DepthMap::from_max_normalized(&depth_matched.as_view());

    let mesh = build_displaced_mesh(&depth, params)?;

    let output_path = output_path.as_ref();
    mesh.write_json(output_path)?;
    log::info!("wrote mesh JSON to {}", output_path.display());
    Ok(mesh)
}

/// File name for the view at `index` produced by `shift`.
///
/// Zero-padded index plus the literal shift value, so a lexicographic
/// glob recovers generation order.
pub fn view_file_name(index: usize, shift: i32) -> String {
    format!("view_{index:03}_shift_{shift}.png")
}

/// Generate parallax views from rasters on disk and write one PNG each.
///
/// The output directory is created if missing (an existing directory is
/// fine). Returns the written paths in generation order.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(image_path, depth_path, output_dir, params))
)]
pub fn generate_view_files(
    image_path: impl AsRef<Path>,
    depth_path: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    params: &ViewParams,
) -> Result<Vec<PathBuf>, PipelineError> {
    let img = load_rgb(&image_path)?;
    let depth_raw = load_gray(&depth_path)?;

    let (w, h) = (img.width() as usize, img.height() as usize);
    let depth_matched = match_depth_resolution(&depth_raw, w, h);
    let depth = DepthMap::from_fixed_normalized(&depth_matched.as_view());

    let views = synthesize_views(&rgb_view(&img), &depth, params)?;

    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir)?;

    let mut paths = Vec::with_capacity(views.len());
    for (i, view) in views.iter().enumerate() {
        let path = output_dir.join(view_file_name(i, view.shift));
        image::save_buffer(
            &path,
            &view.image.data,
            view.image.width as u32,
            view.image.height as u32,
            image::ExtendedColorType::Rgb8,
        )?;
        log::debug!("saved view to {}", path.display());
        paths.push(path);
    }
    log::info!(
        "wrote {} views to {}",
        paths.len(),
        output_dir.display()
    );
    Ok(paths)
}

/// Run a mesh job, resolving the output path from the config.
pub fn run_mesh_job(cfg: &MeshJobConfig) -> Result<(Mesh, PathBuf), PipelineError> {
    let output_path = cfg.output_path();
    let mesh = generate_mesh_file(&cfg.image_path, &cfg.depth_path, &output_path, &cfg.params)?;
    Ok((mesh, output_path))
}

/// Run a view-synthesis job, resolving the output directory from the config.
pub fn run_views_job(cfg: &ViewJobConfig) -> Result<Vec<PathBuf>, PipelineError> {
    generate_view_files(
        &cfg.image_path,
        &cfg.depth_path,
        cfg.output_dir(),
        &cfg.params,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_file_names_sort_in_generation_order() {
        let names = [
            view_file_name(0, -20),
            view_file_name(1, -10),
            view_file_name(2, 0),
            view_file_name(3, 10),
        ];
        assert_eq!(names[0], "view_000_shift_-20.png");
        assert_eq!(names[2], "view_002_shift_0.png");
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(sorted, names);
    }

    #[test]
    fn matching_resolution_passes_depth_through() {
        let depth = image::GrayImage::from_pixel(3, 2, image::Luma([77]));
        let matched = match_depth_resolution(&depth, 3, 2);
        assert_eq!(matched.width, 3);
        assert_eq!(matched.height, 2);
        assert!(matched.data.iter().all(|&d| d == 77));
    }

    #[test]
    fn mismatched_resolution_is_resampled() {
        let depth = image::GrayImage::from_pixel(2, 2, image::Luma([128]));
        let matched = match_depth_resolution(&depth, 6, 4);
        assert_eq!(matched.width, 6);
        assert_eq!(matched.height, 4);
        assert!(matched.data.iter().all(|&d| d == 128));
    }
}
