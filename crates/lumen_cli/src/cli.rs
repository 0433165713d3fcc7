use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use lumen_core::{LightingMode, SampleFilter};
use lumen_raster::{DisplayMode, ShadingMode};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "lumen")]
#[command(about = "Software rasterizer and Whitted ray tracer")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(long, global = true, default_value = "info", help = "Set the logging level")]
    pub log_level: LogLevel,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Ray trace one of the reference scenes
    Trace(TraceArgs),
    /// Rasterize a mesh with optional texture maps
    Raster(RasterArgs),
}

/// Options shared by both renderers.
#[derive(Args, Debug)]
pub struct OutputArgs {
    #[arg(long, default_value = "640", help = "Image width in pixels")]
    pub width: u32,

    #[arg(long, default_value = "480", help = "Image height in pixels")]
    pub height: u32,

    #[arg(short, long, default_value = "output.png", help = "Output PNG path")]
    pub output: PathBuf,

    /// JSON render configuration; flags given on the command line win
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SceneArg {
    Spheres,
    Triangles,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LightingArg {
    ObservedArea,
    Radiance,
    Brdf,
    Combined,
}

impl From<LightingArg> for LightingMode {
    fn from(arg: LightingArg) -> Self {
        match arg {
            LightingArg::ObservedArea => LightingMode::ObservedArea,
            LightingArg::Radiance => LightingMode::Radiance,
            LightingArg::Brdf => LightingMode::Brdf,
            LightingArg::Combined => LightingMode::Combined,
        }
    }
}

#[derive(Args, Debug)]
pub struct TraceArgs {
    #[command(flatten)]
    pub output: OutputArgs,

    #[arg(long, value_enum, default_value = "spheres")]
    pub scene: SceneArg,

    #[arg(long, help = "Trace shadow rays towards every light")]
    pub shadows: bool,

    #[arg(long, value_enum)]
    pub lighting: Option<LightingArg>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ShadingArg {
    ObservedArea,
    Diffuse,
    Specular,
    Combined,
}

impl From<ShadingArg> for ShadingMode {
    fn from(arg: ShadingArg) -> Self {
        match arg {
            ShadingArg::ObservedArea => ShadingMode::ObservedArea,
            ShadingArg::Diffuse => ShadingMode::Diffuse,
            ShadingArg::Specular => ShadingMode::Specular,
            ShadingArg::Combined => ShadingMode::Combined,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FilterArg {
    Point,
    Linear,
}

impl From<FilterArg> for SampleFilter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::Point => SampleFilter::Point,
            FilterArg::Linear => SampleFilter::Linear,
        }
    }
}

#[derive(Args, Debug)]
pub struct RasterArgs {
    #[command(flatten)]
    pub output: OutputArgs,

    /// Wavefront OBJ file; a textured quad is drawn when omitted
    #[arg(long)]
    pub mesh: Option<PathBuf>,

    #[arg(long)]
    pub diffuse: Option<PathBuf>,

    #[arg(long)]
    pub normal: Option<PathBuf>,

    #[arg(long)]
    pub specular: Option<PathBuf>,

    #[arg(long)]
    pub gloss: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub shading: Option<ShadingArg>,

    #[arg(long, value_enum)]
    pub filter: Option<FilterArg>,

    #[arg(long, help = "Write remapped depth instead of shaded colour")]
    pub depth: bool,

    #[arg(long, help = "Ignore the normal map")]
    pub no_normal_mapping: bool,

    /// Distance from the camera to the mesh origin along +Z
    #[arg(long, default_value = "5.0")]
    pub distance: f32,

    /// Mesh rotation around Y in degrees
    #[arg(long, default_value = "0.0")]
    pub yaw: f32,
}

impl RasterArgs {
    pub fn display(&self) -> Option<DisplayMode> {
        self.depth.then_some(DisplayMode::Depth)
    }
}
