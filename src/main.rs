//! Orbis - model mesh viewer
//!
//! Loads a glTF model (or a built-in triangle), places every primitive as a
//! renderable mesh, and drives a fixed number of frames through the
//! renderer.
//!
//! Usage: `orbis [settings.toml] [model.gltf|model.glb]`

mod renderer;
mod settings;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use orbis_assets::{AssetServer, GltfContents, SourceMesh};
use orbis_core::{Quat, Transform, Vec3};
use orbis_render::{RenderContext, RenderableMesh};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::renderer::LogRenderer;
use crate::settings::ViewerSettings;

/// Command-line inputs; a `.toml` argument is settings, anything else a model
struct Args {
    settings: Option<PathBuf>,
    model: Option<PathBuf>,
}

impl Args {
    fn parse() -> Self {
        let mut args = Args {
            settings: None,
            model: None,
        };
        for arg in std::env::args().skip(1).map(PathBuf::from) {
            if arg.extension().is_some_and(|ext| ext == "toml") {
                args.settings = Some(arg);
            } else {
                args.model = Some(arg);
            }
        }
        args
    }
}

/// Unit right triangle in the XY plane, facing +Z
fn builtin_triangle() -> Result<GltfContents> {
    let mesh = SourceMesh::new(
        vec![Vec3::ZERO, Vec3::X, Vec3::Y],
        Some(vec![Vec3::Z; 3]),
        vec![0, 1, 2],
    )?
    .with_name("builtin#0");
    Ok(GltfContents { meshes: vec![mesh] })
}

fn load_meshes(server: &mut AssetServer, model: Option<&Path>) -> Result<Vec<Arc<SourceMesh>>> {
    let handle = match model {
        Some(path) => server
            .load_model(path)
            .with_context(|| format!("Failed to load model {}", path.display()))?,
        None => server.insert(PathBuf::from("builtin/triangle"), builtin_triangle()?),
    };

    let model = server
        .get_model(handle)
        .context("Model handle not registered")?;
    Ok(model.meshes.clone())
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    info!("Starting Orbis viewer...");

    let args = Args::parse();
    let settings = ViewerSettings::load(args.settings.as_deref());
    let model = args.model.or_else(|| settings.run.model.clone());

    let base_path = std::env::current_dir().context("Failed to read working directory")?;
    let mut server = AssetServer::new(base_path);
    let sources = load_meshes(&mut server, model.as_deref())?;

    let context = RenderContext::new(settings.shape.clone());
    let mut meshes: Vec<RenderableMesh> = sources
        .into_iter()
        .map(|source| {
            let mut mesh = RenderableMesh::new(source, &context);
            mesh.set_altitude_mode(settings.run.altitude_mode);
            mesh
        })
        .collect();
    info!("Placed {} meshes", meshes.len());

    let mut renderer = LogRenderer::new();
    let mut transform = Transform::default();
    let spin = Quat::from_rotation_y(settings.run.spin_degrees.to_radians());

    for frame in 0..settings.run.frames {
        let matrix = transform.matrix();
        // A mesh that fails to assemble is defective for good; stop drawing it.
        meshes.retain_mut(|mesh| match mesh.render_instance(&mut renderer, matrix) {
            Ok(()) => true,
            Err(e) => {
                error!("Dropping mesh '{}': {}", mesh.source().name(), e);
                false
            }
        });
        renderer.end_frame(frame);
        transform.rotate(spin);
    }

    info!(
        "Done: {} meshes drawn, {} bytes uploaded",
        meshes.len(),
        renderer.uploaded_bytes()
    );
    Ok(())
}
