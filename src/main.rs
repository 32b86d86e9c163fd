use anyhow::Result;
use clap::Parser;
use log::{LevelFilter, info};
use soft_rasterizer::app;
use soft_rasterizer::io::config::Config;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "soft-rasterizer")]
#[command(version, about = "TOML-driven CPU software rasterizer")]
struct Cli {
    /// Path to a TOML scene file; built-in defaults are used without one.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output image path (overrides render.output).
    #[arg(short, long)]
    output: Option<String>,

    /// Number of frames to render (overrides render.frames).
    #[arg(short, long)]
    frames: Option<usize>,

    /// Shading mode: observed_area, diffuse, specular or combined.
    #[arg(long)]
    shading: Option<String>,

    /// Cull mode: back, front or none.
    #[arg(long)]
    cull: Option<String>,

    /// Disable normal mapping.
    #[arg(long)]
    no_normal_map: bool,

    /// Render the depth buffer as grayscale.
    #[arg(long)]
    depth: bool,

    /// Fill each triangle's bounding box with white.
    #[arg(long)]
    bounding_boxes: bool,

    /// Clear to the uniform dark gray.
    #[arg(long)]
    uniform_clear: bool,

    /// Fragment shader: phong or unlit.
    #[arg(long)]
    shader: Option<String>,
}

impl Cli {
    fn apply(self, config: &mut Config) {
        let render = &mut config.render;
        if let Some(output) = self.output {
            render.output = output;
        }
        if let Some(frames) = self.frames {
            render.frames = frames;
        }
        if let Some(shading) = self.shading {
            render.shading = shading;
        }
        if let Some(cull) = self.cull {
            render.cull_mode = cull;
        }
        if let Some(shader) = self.shader {
            render.shader = shader;
        }
        render.normal_map &= !self.no_normal_map;
        render.depth_visualization |= self.depth;
        render.bounding_box_visualization |= self.bounding_boxes;
        render.uniform_clear_color |= self.uniform_clear;
    }
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            info!("Loading config from {}", path.display());
            Config::load(path)?
        }
        None => {
            info!("No config file given, using built-in scene");
            Config::default()
        }
    };
    cli.apply(&mut config);

    app::run(&config)
}
