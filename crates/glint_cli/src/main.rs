// Render the demo scene to a PNG
// Run with: cargo run --release --bin glint -- [--config render.json] [--mesh model.off] [--floor-texture floor.png] [--light-texture light.png] [--output out.png]

mod demo_scene;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use glint_core::Texture;
use glint_tracer::{render, RenderConfig};

use crate::demo_scene::DemoTextures;

const USAGE: &str = "Usage: glint [--config <render.json>] [--mesh <model.off|model.obj>] \
[--floor-texture <image>] [--light-texture <image>] [--output <image.png>]";

#[derive(Debug, PartialEq)]
struct Args {
    config: Option<PathBuf>,
    mesh: Option<PathBuf>,
    floor_texture: Option<PathBuf>,
    light_texture: Option<PathBuf>,
    output: PathBuf,
}

/// Parse command line arguments (without the program name).
/// Returns `None` when help was requested.
fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Option<Args>> {
    let mut parsed = Args {
        config: None,
        mesh: None,
        floor_texture: None,
        light_texture: None,
        output: PathBuf::from("render.png"),
    };

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        let mut value = || {
            args.next()
                .map(PathBuf::from)
                .with_context(|| format!("{arg} expects a value"))
        };

        match arg.as_str() {
            "--config" | "-c" => parsed.config = Some(value()?),
            "--mesh" | "-m" => parsed.mesh = Some(value()?),
            "--floor-texture" => parsed.floor_texture = Some(value()?),
            "--light-texture" => parsed.light_texture = Some(value()?),
            "--output" | "-o" => parsed.output = value()?,
            "--help" | "-h" => return Ok(None),
            other => bail!("unknown argument '{other}'\n{USAGE}"),
        }
    }

    Ok(Some(parsed))
}

fn load_config(path: &Path) -> Result<RenderConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
}

fn load_texture(path: Option<&Path>) -> Result<Option<Arc<Texture>>> {
    path.map(|path| {
        Texture::load(path)
            .map(Arc::new)
            .with_context(|| format!("failed to load texture {}", path.display()))
    })
    .transpose()
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Some(args) = parse_args(std::env::args().skip(1))? else {
        println!("{USAGE}");
        return Ok(());
    };

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => RenderConfig::default(),
    };
    log::info!("Rendering at {}x{}", config.width, config.height);

    let textures = DemoTextures {
        floor: load_texture(args.floor_texture.as_deref())?,
        light: load_texture(args.light_texture.as_deref())?,
    };

    let (scene, camera) = demo_scene::build(&config, args.mesh.as_deref(), &textures);
    let image = render(&scene, &camera);

    image
        .to_image()
        .save(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    log::info!("Wrote {}", args.output.display());

    Ok(())
}
