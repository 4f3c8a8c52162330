//! JSON job descriptions for the two generators.
//!
//! A job pairs the input rasters with generator parameters and an
//! optional output location; when the location is omitted it is derived
//! from the image path the same way the CLI derives it.

use dibr_mesh::MeshParams;
use dibr_views::ViewParams;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Description of one mesh-generation job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshJobConfig {
    pub image_path: String,
    pub depth_path: String,
    /// Defaults to `<image stem>_mesh.json` next to the image.
    #[serde(default)]
    pub output_path: Option<String>,
    #[serde(default)]
    pub params: MeshParams,
}

impl MeshJobConfig {
    /// Load a JSON job from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this job to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Resolve the mesh output path.
    pub fn output_path(&self) -> PathBuf {
        match &self.output_path {
            Some(path) => PathBuf::from(path),
            None => {
                let image = Path::new(&self.image_path);
                let stem = image
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "image".to_owned());
                image.with_file_name(format!("{stem}_mesh.json"))
            }
        }
    }
}

/// Description of one view-synthesis job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewJobConfig {
    pub image_path: String,
    pub depth_path: String,
    /// Defaults to a `views` directory next to the image.
    #[serde(default)]
    pub output_dir: Option<String>,
    #[serde(default)]
    pub params: ViewParams,
}

impl ViewJobConfig {
    /// Load a JSON job from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this job to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Resolve the view output directory.
    pub fn output_dir(&self) -> PathBuf {
        match &self.output_dir {
            Some(dir) => PathBuf::from(dir),
            None => {
                let image = Path::new(&self.image_path);
                image
                    .parent()
                    .map(|p| p.join("views"))
                    .unwrap_or_else(|| PathBuf::from("views"))
            }
        }
    }
}
