//! Driver for the external COLMAP photogrammetry pipeline.
//!
//! Feeds a flat directory of synthesized views (single virtual camera,
//! consistent resolution) through feature extraction, matching, sparse
//! mapping, undistortion, dense stereo, and fusion. Every stage is an
//! external `colmap` invocation; a nonzero exit aborts the run.

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

#[derive(thiserror::Error, Debug)]
pub enum ReconstructError {
    #[error("colmap binary not found on PATH")]
    ColmapNotFound,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("colmap {stage} exited with {status}")]
    StageFailed {
        stage: &'static str,
        status: std::process::ExitStatus,
    },
    #[error("no sparse model found in {}", .0.display())]
    NoSparseModel(PathBuf),
}

pub(crate) fn run_stage(stage: &'static str, cmd: &mut Command) -> Result<(), ReconstructError> {
    log::info!("running colmap {stage}");
    let mut child = cmd
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                ReconstructError::ColmapNotFound
            } else {
                ReconstructError::Io(err)
            }
        })?;

    if let Some(stdout) = child.stdout.take() {
        for line in BufReader::new(stdout).lines() {
            log::info!("colmap: {}", line?.trim_end());
        }
    }

    let status = child.wait()?;
    if !status.success() {
        return Err(ReconstructError::StageFailed { stage, status });
    }
    log::info!("colmap {stage} finished");
    Ok(())
}

/// Pick the sparse model to undistort: `0` when the mapper produced it,
/// otherwise the first model directory present.
pub(crate) fn select_sparse_model(sparse_path: &Path) -> Result<PathBuf, ReconstructError> {
    let default = sparse_path.join("0");
    if default.is_dir() {
        return Ok(default);
    }

    let mut models: Vec<PathBuf> = fs::read_dir(sparse_path)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    models.sort();

    match models.into_iter().next() {
        Some(model) => {
            log::warn!(
                "sparse model '0' not found, using first available: {}",
                model.display()
            );
            Ok(model)
        }
        None => Err(ReconstructError::NoSparseModel(sparse_path.to_path_buf())),
    }
}

/// Run the full COLMAP pipeline and return the fused point cloud path.
pub fn run_reconstruction(
    image_dir: &Path,
    output_dir: &Path,
) -> Result<PathBuf, ReconstructError> {
    let db_path = output_dir.join("colmap.db");
    let sparse_path = output_dir.join("sparse");
    let dense_path = output_dir.join("dense");
    let fused_ply = dense_path.join("fused.ply");

    log::info!(
        "reconstructing {} into {}",
        image_dir.display(),
        output_dir.display()
    );
    fs::create_dir_all(&sparse_path)?;
    fs::create_dir_all(&dense_path)?;

    run_stage(
        "feature_extractor",
        Command::new("colmap")
            .arg("feature_extractor")
            .arg("--database_path")
            .arg(&db_path)
            .arg("--image_path")
            .arg(image_dir)
            // all views come from one synthetic camera
            .args(["--ImageReader.single_camera", "1"])
            .args(["--ImageReader.camera_model", "PINHOLE"]),
    )?;

    run_stage(
        "exhaustive_matcher",
        Command::new("colmap")
            .arg("exhaustive_matcher")
            .arg("--database_path")
            .arg(&db_path),
    )?;

    run_stage(
        "mapper",
        Command::new("colmap")
            .arg("mapper")
            .arg("--database_path")
            .arg(&db_path)
            .arg("--image_path")
            .arg(image_dir)
            .arg("--output_path")
            .arg(&sparse_path),
    )?;

    let sparse_model = select_sparse_model(&sparse_path)?;

    run_stage(
        "image_undistorter",
        Command::new("colmap")
            .arg("image_undistorter")
            .arg("--image_path")
            .arg(image_dir)
            .arg("--input_path")
            .arg(&sparse_model)
            .arg("--output_path")
            .arg(&dense_path)
            .args(["--output_type", "COLMAP"]),
    )?;

    run_stage(
        "patch_match_stereo",
        Command::new("colmap")
            .arg("patch_match_stereo")
            .arg("--workspace_path")
            .arg(&dense_path)
            .args(["--workspace_format", "COLMAP"])
            .args(["--PatchMatchStereo.geom_consistency", "true"]),
    )?;

    run_stage(
        "stereo_fusion",
        Command::new("colmap")
            .arg("stereo_fusion")
            .arg("--workspace_path")
            .arg(&dense_path)
            .args(["--workspace_format", "COLMAP"])
            .args(["--input_type", "geometric"])
            .arg("--output_path")
            .arg(&fused_ply),
    )?;

    log::info!("fused point cloud at {}", fused_ply.display());
    Ok(fused_ply)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_model_zero_is_preferred() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::create_dir(dir.path().join("0")).expect("mkdir 0");
        fs::create_dir(dir.path().join("1")).expect("mkdir 1");
        let model = select_sparse_model(dir.path()).expect("select model");
        assert_eq!(model, dir.path().join("0"));
    }

    #[test]
    fn falls_back_to_first_model_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::create_dir(dir.path().join("3")).expect("mkdir 3");
        fs::create_dir(dir.path().join("7")).expect("mkdir 7");
        // stray files are not models
        fs::write(dir.path().join("log.txt"), "x").expect("write file");
        let model = select_sparse_model(dir.path()).expect("select model");
        assert_eq!(model, dir.path().join("3"));
    }

    #[test]
    fn empty_sparse_directory_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = select_sparse_model(dir.path()).unwrap_err();
        assert!(matches!(err, ReconstructError::NoSparseModel(_)));
    }

    #[test]
    fn missing_binary_maps_to_not_found() {
        let err = run_stage(
            "feature_extractor",
            &mut Command::new("definitely-not-a-real-binary-dibr"),
        )
        .unwrap_err();
        assert!(matches!(err, ReconstructError::ColmapNotFound));
    }
}
