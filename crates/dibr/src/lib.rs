//! High-level facade crate for the `dibr-*` workspace.
//!
//! This crate provides:
//! - stable re-exports of the underlying generator crates
//! - (feature-gated) end-to-end helpers that read an RGB raster plus a
//!   grayscale depth raster from disk, reconcile their resolutions, and
//!   write a displaced mesh or a stack of parallax views.
//!
//! ## Quickstart
//!
//! ```no_run
//! use dibr::mesh::MeshParams;
//! use dibr::pipeline;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mesh = pipeline::generate_mesh_file(
//!     "photo.png",
//!     "photo_depth.png",
//!     "photo_mesh.json",
//!     &MeshParams::default(),
//! )?;
//! println!("{} vertices", mesh.vertices.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `dibr::core`: buffer types, bilinear sampling, depth normalization.
//! - `dibr::mesh`: displaced grid mesh construction and JSON output.
//! - `dibr::views`: shift maps and horizontal view warping.
//! - `dibr::config`: JSON job descriptions with output-path defaulting.
//! - `dibr::pipeline` (feature `image`): file-based end-to-end helpers.

pub use dibr_core as core;
pub use dibr_mesh as mesh;
pub use dibr_views as views;

pub use dibr_mesh::{Mesh, MeshParams};
pub use dibr_views::{ShiftPolicy, SynthesizedView, ViewParams};

pub mod config;

#[cfg(feature = "image")]
pub mod pipeline;
