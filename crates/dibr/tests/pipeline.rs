#![cfg(feature = "image")]

use std::path::Path;

use approx::assert_relative_eq;
use dibr::config::ViewJobConfig;
use dibr::mesh::{Mesh, MeshParams};
use dibr::pipeline::{generate_mesh_file, generate_view_files, run_views_job, view_file_name};
use dibr::views::ViewParams;
use dibr::ShiftPolicy;

fn save_rgb_gradient(path: &Path, width: u32, height: u32) {
    let img = image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x * 40) as u8, (y * 40) as u8, 200])
    });
    img.save(path).expect("save rgb image");
}

fn save_rgb_flat(path: &Path, width: u32, height: u32, value: u8) {
    image::RgbImage::from_pixel(width, height, image::Rgb([value, value, value]))
        .save(path)
        .expect("save rgb image");
}

fn save_gray_flat(path: &Path, width: u32, height: u32, value: u8) {
    image::GrayImage::from_pixel(width, height, image::Luma([value]))
        .save(path)
        .expect("save depth image");
}

#[test]
fn mesh_from_uniform_depth_is_flat_at_plus_half_scale() {
    let dir = tempfile::tempdir().expect("tempdir");
    let image_path = dir.path().join("photo.png");
    let depth_path = dir.path().join("depth.png");
    let mesh_path = dir.path().join("photo_mesh.json");

    save_rgb_gradient(&image_path, 4, 4);
    save_gray_flat(&depth_path, 4, 4, 128);

    let params = MeshParams {
        density: 4,
        depth_scale: 0.2,
    };
    let mesh = generate_mesh_file(&image_path, &depth_path, &mesh_path, &params)
        .expect("generate mesh");

    assert_eq!(mesh.vertices.len(), 16);
    assert_eq!(mesh.uvs.len(), 16);
    assert_eq!(mesh.faces.len(), 18);

    // uniform raw depth normalizes to 1.0 against its own maximum, so the
    // whole sheet sits at +depth_scale/2
    for v in &mesh.vertices {
        assert_relative_eq!(v[2], 0.1, epsilon = 1e-6);
    }

    let loaded = Mesh::load_json(&mesh_path).expect("load mesh json");
    assert_eq!(loaded, mesh);
}

#[test]
fn undersized_depth_is_resampled_before_meshing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let image_path = dir.path().join("photo.png");
    let depth_path = dir.path().join("depth.png");
    let mesh_path = dir.path().join("mesh.json");

    save_rgb_gradient(&image_path, 8, 4);
    // depth at a quarter of the image resolution
    save_gray_flat(&depth_path, 4, 2, 200);

    let params = MeshParams {
        density: 5,
        depth_scale: 0.1,
    };
    let mesh = generate_mesh_file(&image_path, &depth_path, &mesh_path, &params)
        .expect("generate mesh");

    // constant depth stays constant through the resize, so the mesh is flat
    for v in &mesh.vertices {
        assert_relative_eq!(v[2], 0.05, epsilon = 1e-6);
    }
    // 2:1 image aspect carried into the lattice
    assert_relative_eq!(mesh.vertices[0][0], -2.0, epsilon = 1e-6);
}

#[test]
fn shifted_views_of_flat_color_reproduce_the_source() {
    let dir = tempfile::tempdir().expect("tempdir");
    let image_path = dir.path().join("photo.png");
    let depth_path = dir.path().join("depth.png");
    let out_dir = dir.path().join("views");

    save_rgb_flat(&image_path, 6, 4, 99);
    save_gray_flat(&depth_path, 6, 4, 255);

    let params = ViewParams {
        shifts: vec![-2, 0, 2],
        policy: ShiftPolicy::Uniform,
        perspective_strength: 0.0,
    };
    let paths =
        generate_view_files(&image_path, &depth_path, &out_dir, &params).expect("generate views");

    assert_eq!(paths.len(), 3);
    assert_eq!(
        paths[0].file_name().and_then(|n| n.to_str()),
        Some("view_000_shift_-2.png")
    );
    assert_eq!(
        paths[2].file_name().and_then(|n| n.to_str()),
        Some("view_002_shift_2.png")
    );

    for path in &paths {
        let view = image::open(path).expect("open view").to_rgb8();
        assert!(view.pixels().all(|p| p.0 == [99, 99, 99]));
    }
}

#[test]
fn zero_shift_view_is_pixel_identical_to_the_source() {
    let dir = tempfile::tempdir().expect("tempdir");
    let image_path = dir.path().join("photo.png");
    let depth_path = dir.path().join("depth.png");
    let out_dir = dir.path().join("views");

    save_rgb_gradient(&image_path, 5, 5);
    save_gray_flat(&depth_path, 5, 5, 200);

    let params = ViewParams {
        shifts: vec![0],
        policy: ShiftPolicy::Perspective,
        perspective_strength: 0.3,
    };
    let paths =
        generate_view_files(&image_path, &depth_path, &out_dir, &params).expect("generate views");

    let source = image::open(&image_path).expect("open source").to_rgb8();
    let view = image::open(&paths[0]).expect("open view").to_rgb8();
    assert_eq!(view.as_raw(), source.as_raw());
}

#[test]
fn missing_input_aborts_before_creating_the_output_dir() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out_dir = dir.path().join("views");

    let result = generate_view_files(
        dir.path().join("absent.png"),
        dir.path().join("absent_depth.png"),
        &out_dir,
        &ViewParams::default(),
    );
    assert!(result.is_err());
    assert!(!out_dir.exists());
}

#[test]
fn views_job_defaults_output_next_to_the_image() {
    let dir = tempfile::tempdir().expect("tempdir");
    let image_path = dir.path().join("photo.png");
    let depth_path = dir.path().join("depth.png");

    save_rgb_flat(&image_path, 4, 4, 10);
    save_gray_flat(&depth_path, 4, 4, 128);

    let cfg = ViewJobConfig {
        image_path: image_path.to_string_lossy().into_owned(),
        depth_path: depth_path.to_string_lossy().into_owned(),
        output_dir: None,
        params: ViewParams {
            shifts: vec![1],
            policy: ShiftPolicy::Uniform,
            perspective_strength: 0.0,
        },
    };
    let paths = run_views_job(&cfg).expect("run job");
    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0], dir.path().join("views").join(view_file_name(0, 1)));
}
