use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use whitted_core::{SceneDescription, TextureCache};
use whitted_renderer::{
    render, render_parallel, Camera, ImageBuffer, RenderConfig, Scene, DEFAULT_BUCKET_SIZE,
};

/// Render a scene with the recursive ray tracer and write it as PNG.
#[derive(Parser, Debug)]
#[command(name = "whitted", version, about)]
struct Args {
    /// JSON scene description; the built-in museum scene when omitted
    #[arg(short, long)]
    scene: Option<PathBuf>,

    /// Output image path
    #[arg(short, long, default_value = "render.png")]
    output: PathBuf,

    /// Image width in pixels
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 800)]
    height: u32,

    /// Sub-pixel grid size (N gives NxN rays per pixel)
    #[arg(long, default_value_t = 2)]
    samples: u32,

    /// Maximum recursion depth for secondary rays
    #[arg(long, default_value_t = whitted_renderer::DEFAULT_MAX_DEPTH)]
    max_depth: u32,

    /// Directory texture paths are resolved against
    #[arg(short, long)]
    textures: Option<PathBuf>,

    /// Render on the calling thread instead of the rayon pool
    #[arg(long)]
    single_threaded: bool,

    /// Print the scene description as JSON and exit
    #[arg(long)]
    dump_scene: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();

    let description = match &args.scene {
        Some(path) => SceneDescription::from_json_file(path)
            .with_context(|| format!("Failed to load scene {}", path.display()))?,
        None => SceneDescription::museum(),
    };

    if args.dump_scene {
        println!("{}", description.to_json_string()?);
        return Ok(());
    }

    if args.width == 0 || args.height == 0 {
        bail!("Image size must be non-zero, got {}x{}", args.width, args.height);
    }

    let mut textures = match texture_dir(&args) {
        Some(dir) => TextureCache::with_base_dir(dir),
        None => TextureCache::new(),
    };
    let scene = Scene::from_description(&description, &mut textures)
        .context("Failed to build scene")?;

    let camera = Camera::new().with_resolution(args.width, args.height);
    let config = RenderConfig {
        supersampling: args.samples,
        max_depth: args.max_depth,
        background: description.background,
    };

    let image = if args.single_threaded {
        render(&camera, &scene, &config)
    } else {
        render_parallel(&camera, &scene, &config, DEFAULT_BUCKET_SIZE)
    };

    save_png(&image, &args.output)?;
    log::info!("Saved {}", args.output.display());

    Ok(())
}

/// Texture directory from the flag, else the scene file's directory.
fn texture_dir(args: &Args) -> Option<PathBuf> {
    args.textures.clone().or_else(|| {
        args.scene
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
    })
}

fn save_png(image: &ImageBuffer, path: &Path) -> Result<()> {
    let rgba = image::RgbaImage::from_raw(image.width, image.height, image.to_rgba())
        .context("Image buffer size does not match its dimensions")?;
    rgba.save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
