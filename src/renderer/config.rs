use serde::{Deserialize, Serialize};

/// What the frame renderer draws
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// The embedded screen quad with a single texture
    TexturedQuad,
    /// The active model, one draw per submesh
    #[default]
    TexturedModel,
}

/// Contains configuration options for the renderer like the display size, clear color, and other settings
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Prepended to shader sources that do not declare a version of their own
    pub version_line: String,
    pub clear_color: [f32; 4],
    pub display_width: u32,
    pub display_height: u32,
    pub hot_reload: bool,
    pub mode: RenderMode,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            version_line: String::from("#version 450"),
            clear_color: [0.1, 0.1, 0.1, 1.0],
            display_width: 1280,
            display_height: 720,
            hot_reload: true,
            mode: RenderMode::default(),
        }
    }
}
