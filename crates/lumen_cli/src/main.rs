use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use serde::de::DeserializeOwned;

mod cli;
mod logger;

use cli::{Cli, Command, OutputArgs, RasterArgs, SceneArg, TraceArgs};
use logger::init_logger;
use lumen_core::{Framebuffer, Mesh, Texture};
use lumen_math::{Camera, Transform, Vec3};
use lumen_raster::{Model, RasterConfig, Rasterizer, TextureSet};
use lumen_tracer::{RenderConfig, Scene};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.log_level.into());

    match cli.command {
        Command::Trace(args) => trace(args),
        Command::Raster(args) => raster(args),
    }
}

/// Load a JSON config file, or the defaults when no path is given.
fn load_config<T: DeserializeOwned + Default>(path: Option<&Path>) -> Result<T> {
    let Some(path) = path else {
        return Ok(T::default());
    };
    let text = fs::read_to_string(path).with_context(|| format!("Failed to read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse config {}", path.display()))
}

fn save(framebuffer: &Framebuffer, output: &OutputArgs) -> Result<()> {
    framebuffer
        .save_png(&output.output)
        .with_context(|| format!("Failed to write {}", output.output.display()))?;
    info!("Saved {}", output.output.display());
    Ok(())
}

fn trace(args: TraceArgs) -> Result<()> {
    let mut config: RenderConfig = load_config(args.output.config.as_deref())?;
    if args.shadows {
        config.shadows = true;
    }
    if let Some(lighting) = args.lighting {
        config.lighting_mode = lighting.into();
    }

    let mut framebuffer = Framebuffer::new(args.output.width, args.output.height);
    let aspect_ratio = framebuffer.aspect_ratio();
    let scene = match args.scene {
        SceneArg::Spheres => Scene::spheres_and_planes(aspect_ratio),
        SceneArg::Triangles => Scene::triangle_showcase(aspect_ratio),
    };
    info!(
        "Tracing {} primitives at {}x{} ({:?}, shadows {})",
        scene.primitive_count(),
        framebuffer.width,
        framebuffer.height,
        config.lighting_mode,
        config.shadows
    );

    let stats = lumen_tracer::render(&scene, &config, &mut framebuffer);
    info!("Traced {} pixels, {} hits in {:.2?}", stats.pixels, stats.primary_hits, stats.elapsed);

    save(&framebuffer, &args.output)
}

fn load_texture(path: Option<&Path>) -> Result<Option<Arc<Texture>>> {
    path.map(|path| {
        Texture::load(path)
            .map(Arc::new)
            .with_context(|| format!("Failed to load texture {}", path.display()))
    })
    .transpose()
}

fn raster(args: RasterArgs) -> Result<()> {
    let mut config: RasterConfig = load_config(args.output.config.as_deref())?;
    if let Some(shading) = args.shading {
        config.shading_mode = shading.into();
    }
    if let Some(filter) = args.filter {
        config.filter = filter.into();
    }
    if let Some(display) = args.display() {
        config.display = display;
    }
    if args.no_normal_mapping {
        config.normal_mapping = false;
    }

    let mesh = match &args.mesh {
        Some(path) => Mesh::load_obj(path).with_context(|| format!("Failed to load mesh {}", path.display()))?,
        None => Mesh::quad(2.0),
    };
    let mesh = mesh.with_transform(Transform::from_rotation_y(args.yaw.to_radians()));

    let textures = TextureSet {
        diffuse: load_texture(args.diffuse.as_deref())?,
        normal: load_texture(args.normal.as_deref())?,
        specular: load_texture(args.specular.as_deref())?,
        gloss: load_texture(args.gloss.as_deref())?,
    };
    let models = [Model::new(mesh).with_textures(textures)];

    let mut framebuffer = Framebuffer::new(args.output.width, args.output.height);
    let camera = Camera::new(Vec3::new(0.0, 0.0, -args.distance), 45.0, framebuffer.aspect_ratio());

    let mut rasterizer = Rasterizer::new();
    let stats = rasterizer.render(&models, &camera, &config, &mut framebuffer);
    info!(
        "Rasterized {} triangles, {} fragments in {:.2?}",
        stats.triangles, stats.fragments_written, stats.elapsed
    );

    save(&framebuffer, &args.output)
}
