mod reconstruct;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;

use dibr::config::{MeshJobConfig, ViewJobConfig};
use dibr::pipeline::{run_mesh_job, run_views_job};
use dibr::{MeshParams, ShiftPolicy, ViewParams};

#[derive(Parser)]
#[command(
    name = "dibr",
    version,
    about = "Turn a photo plus a depth map into a displaced mesh or a stack of parallax views"
)]
struct Cli {
    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a Z-displaced grid mesh as JSON
    Mesh {
        /// Input image file
        image: PathBuf,
        /// Input depth map file (grayscale)
        depth: PathBuf,
        /// Output mesh path; defaults to <image stem>_mesh.json
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Grid density (vertices along each dimension)
        #[arg(short, long, default_value_t = 150)]
        density: usize,
        /// Depth scale factor for Z displacement
        #[arg(short, long, default_value_t = 0.1)]
        scale: f32,
    },
    /// Generate horizontally shifted parallax views as PNGs
    Views {
        /// Input image file
        image: PathBuf,
        /// Input depth map file (grayscale)
        depth: PathBuf,
        /// Output directory; defaults to a `views` directory next to the image
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Horizontal shift amounts, one view per value
        #[arg(long, num_args = 1.., allow_negative_numbers = true, default_values_t = [-20, -10, 0, 10, 20])]
        shifts: Vec<i32>,
        /// Amplify shifts towards the image borders
        #[arg(long)]
        perspective: bool,
        /// Strength of the perspective amplification
        #[arg(long, default_value_t = 0.3)]
        perspective_strength: f32,
    },
    /// Run the external COLMAP pipeline over a directory of views
    Reconstruct {
        /// Directory containing the input views
        image_dir: PathBuf,
        /// Directory for COLMAP intermediate and final results
        output_dir: PathBuf,
    },
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Pipeline(#[from] dibr::pipeline::PipelineError),
    #[error(transparent)]
    Reconstruct(#[from] reconstruct::ReconstructError),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let _ = dibr::core::init_with_level(level);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Mesh {
            image,
            depth,
            output,
            density,
            scale,
        } => {
            let cfg = MeshJobConfig {
                image_path: image.to_string_lossy().into_owned(),
                depth_path: depth.to_string_lossy().into_owned(),
                output_path: output.map(|p| p.to_string_lossy().into_owned()),
                params: MeshParams {
                    density,
                    depth_scale: scale,
                },
            };
            let (mesh, path) = run_mesh_job(&cfg)?;
            println!(
                "wrote mesh with {} vertices and {} faces to {}",
                mesh.vertices.len(),
                mesh.faces.len(),
                path.display()
            );
        }
        Command::Views {
            image,
            depth,
            output,
            shifts,
            perspective,
            perspective_strength,
        } => {
            let cfg = ViewJobConfig {
                image_path: image.to_string_lossy().into_owned(),
                depth_path: depth.to_string_lossy().into_owned(),
                output_dir: output.map(|p| p.to_string_lossy().into_owned()),
                params: ViewParams {
                    shifts,
                    policy: if perspective {
                        ShiftPolicy::Perspective
                    } else {
                        ShiftPolicy::Uniform
                    },
                    perspective_strength,
                },
            };
            let paths = run_views_job(&cfg)?;
            println!("wrote {} views", paths.len());
        }
        Command::Reconstruct {
            image_dir,
            output_dir,
        } => {
            let fused = reconstruct::run_reconstruction(&image_dir, &output_dir)?;
            println!("reconstruction finished, fused point cloud at {}", fused.display());
        }
    }
    Ok(())
}
