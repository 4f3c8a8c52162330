use dibr::mesh::MeshParams;
use dibr::pipeline;
use dibr::views::ViewParams;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let (Some(image), Some(depth)) = (args.next(), args.next()) else {
        eprintln!("Usage: mesh_and_views <image_path> <depth_path>");
        return Ok(());
    };

    let mesh = pipeline::generate_mesh_file(&image, &depth, "mesh.json", &MeshParams::default())?;
    println!(
        "mesh.json: {} vertices, {} faces",
        mesh.vertices.len(),
        mesh.faces.len()
    );

    let paths = pipeline::generate_view_files(&image, &depth, "views", &ViewParams::default())?;
    println!("views/: {} images", paths.len());

    Ok(())
}
