use std::path::PathBuf;
use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use serde::{Deserialize, Serialize};
use crate::renderer::config::{RenderConfig, RenderMode};

#[derive(Debug, Parser)]
#[command(version, about = "Headless frame loop over the tessa resource cache")]
pub struct Args {
    /// JSON file with application settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Shader source file holding every program
    #[arg(long)]
    pub shaders: Option<PathBuf>,

    /// OBJ model to draw in textured-model mode
    #[arg(short, long)]
    pub model: Option<PathBuf>,

    /// Texture to draw in textured-quad mode
    #[arg(short, long)]
    pub texture: Option<PathBuf>,

    /// Number of frames to run, 0 runs until interrupted
    #[arg(short, long)]
    pub frames: Option<u64>,

    #[arg(long, value_enum)]
    pub mode: Option<RenderMode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub shader_path: PathBuf,
    pub quad_program: String,
    pub mesh_program: String,
    pub quad_texture: Option<PathBuf>,
    pub model_path: Option<PathBuf>,
    pub frames: u64,
    pub frame_interval_ms: u64,
    pub display_width: u32,
    pub display_height: u32,
    pub mode: RenderMode,
    pub hot_reload: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            shader_path: PathBuf::from("shaders/shaders.glsl"),
            quad_program: String::from("TEXTURED_GEOMETRY"),
            mesh_program: String::from("SHOW_TEXTURED_MESH"),
            quad_texture: None,
            model_path: None,
            frames: 600,
            frame_interval_ms: 16,
            display_width: 1280,
            display_height: 720,
            mode: RenderMode::TexturedModel,
            hot_reload: true,
        }
    }
}

impl AppConfig {
    /// Settings from the config file named in `args` (or the defaults), with command line flags on top
    pub fn from_args(args: &Args) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .wrap_err_with(|| format!("Failed to read config file {:?}", path))?;
                serde_json::from_str(&text)
                    .wrap_err_with(|| format!("Failed to parse config file {:?}", path))?
            }
            None => Self::default(),
        };

        if let Some(shaders) = &args.shaders {
            config.shader_path = shaders.clone();
        }
        if let Some(model) = &args.model {
            config.model_path = Some(model.clone());
        }
        if let Some(texture) = &args.texture {
            config.quad_texture = Some(texture.clone());
        }
        if let Some(frames) = args.frames {
            config.frames = frames;
        }
        if let Some(mode) = args.mode {
            config.mode = mode;
        }

        Ok(config)
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            display_width: self.display_width,
            display_height: self.display_height,
            hot_reload: self.hot_reload,
            mode: self.mode,
            ..Default::default()
        }
    }
}
