//! Displaced grid mesh construction from a normalized depth field.
//!
//! The mesh is a `density × density` lattice in normalized device space
//! (X spanning `±aspect`, Y spanning `±1`) whose vertices are pushed along
//! Z by the depth sampled under each lattice point. Output is a plain
//! value type that serializes to the `vertices` / `uvs` / `faces` JSON
//! document consumed by downstream renderers.

mod builder;
mod mesh;

pub use builder::{build_displaced_mesh, MeshError, MeshParams};
pub use mesh::{Mesh, MeshIoError};
