use dibr_core::{ndc_grid_axis, ndc_to_pixel, ndc_to_uv, DepthMap};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::Mesh;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors returned by the mesh builder.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    #[error("grid density must be at least 2 (got {density})")]
    InvalidDensity { density: usize },
    #[error("depth field is empty (width={width}, height={height})")]
    EmptyDepth { width: usize, height: usize },
}

fn default_density() -> usize {
    150
}

fn default_depth_scale() -> f32 {
    0.1
}

/// Mesh builder configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeshParams {
    /// Number of lattice vertices along each dimension; minimum 2.
    #[serde(default = "default_density")]
    pub density: usize,
    /// Z displacement span. Vertices end up within `±depth_scale / 2`.
    #[serde(default = "default_depth_scale")]
    pub depth_scale: f32,
}

impl Default for MeshParams {
    fn default() -> Self {
        Self {
            density: default_density(),
            depth_scale: default_depth_scale(),
        }
    }
}

/// Build a Z-displaced grid mesh from a max-normalized depth field.
///
/// The depth map must already match the source image resolution; its
/// dimensions define the aspect ratio of the lattice. Depth 0 maps to
/// `-depth_scale/2`, depth 1 to `+depth_scale/2`, so near and far
/// features displace symmetrically around the Z=0 plane.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(depth), fields(width = depth.width, height = depth.height))
)]
pub fn build_displaced_mesh(depth: &DepthMap, params: &MeshParams) -> Result<Mesh, MeshError> {
    if params.density < 2 {
        return Err(MeshError::InvalidDensity {
            density: params.density,
        });
    }
    if depth.width == 0 || depth.height == 0 {
        return Err(MeshError::EmptyDepth {
            width: depth.width,
            height: depth.height,
        });
    }

    let (w, h) = (depth.width, depth.height);
    let aspect = w as f32 / h as f32;
    let d = params.density;

    log::info!("building {d}x{d} grid mesh over a {w}x{h} depth field");

    let xs = ndc_grid_axis(-aspect, aspect, d);
    // row 0 is the top of the image
    let ys = ndc_grid_axis(1.0, -1.0, d);

    let mut vertices = Vec::with_capacity(d * d);
    let mut uvs = Vec::with_capacity(d * d);

    for &y in &ys {
        for &x in &xs {
            let p = Point2::new(x, y);
            let (px, py) = ndc_to_pixel(p, aspect, w, h);
            let z = (depth.get(px, py) - 0.5) * params.depth_scale;
            vertices.push([x, y, z]);
            uvs.push(ndc_to_uv(p, aspect));
        }
    }

    let mut faces = Vec::with_capacity(2 * (d - 1) * (d - 1));
    for row in 0..d - 1 {
        for col in 0..d - 1 {
            let v0 = (row * d + col) as u32;
            let v1 = v0 + 1;
            let v2 = v0 + d as u32;
            let v3 = v2 + 1;
            faces.push([v0, v1, v2]);
            faces.push([v1, v3, v2]);
        }
    }

    Ok(Mesh {
        vertices,
        uvs,
        faces,
    })
}
