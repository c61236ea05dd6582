pub mod config;
pub mod contexts;
pub mod error;
pub mod import;
pub mod resources;
pub mod shader_data;
pub mod util;

use std::path::Path;
use crate::renderer::config::{RenderConfig, RenderMode};
use crate::renderer::contexts::device_ctx::{DebugSeverity, GraphicsDevice};
use crate::renderer::contexts::frame_ctx::RenderFrameContext;
use crate::renderer::contexts::resource_ctx::RenderResourceStorage;
use crate::renderer::error::RenderError;
use crate::renderer::import::{ModelImporter, ObjImporter};
use crate::renderer::resources::mesh::Mesh;
use crate::renderer::resources::{MeshId, ModelId, ProgramId, TextureId};

pub struct Renderer<D: GraphicsDevice> {
    dev: D,
    res: RenderResourceStorage,
    frm: RenderFrameContext,

    config: RenderConfig,
    mode: RenderMode,
    quad_mesh: MeshId,
    quad_program: Option<ProgramId>,
    quad_texture: Option<TextureId>,
    mesh_program: Option<ProgramId>,
    active_model: Option<ModelId>,
}

impl<D: GraphicsDevice> Renderer<D> {
    pub fn new(mut dev: D, config: RenderConfig) -> Self {
        let info = dev.info();
        log::info!("Renderer: {}", info.renderer);
        log::info!("Version: {}", info.version);
        log::info!("Vendor: {}", info.vendor);
        log::info!("Shading language version: {}", info.shading_language_version);

        let mut res = RenderResourceStorage::new(&mut dev, &config.version_line);
        let quad_mesh = res.add_mesh(Mesh::new_quad(&mut dev));
        let frm = RenderFrameContext::new(&config);

        Self {
            dev,
            res,
            frm,
            mode: config.mode,
            config,
            quad_mesh,
            quad_program: None,
            quad_texture: None,
            mesh_program: None,
            active_model: None,
        }
    }

    pub fn load_program(&mut self, path: impl AsRef<Path>, name: &str) -> ProgramId {
        self.res.programs.load_program(&mut self.dev, path, name)
    }

    pub fn load_texture_2d(&mut self, path: impl AsRef<Path>) -> Option<TextureId> {
        self.res.textures.load_texture_2d(&mut self.dev, path)
    }

    /// Imports an OBJ model and makes it the active model
    pub fn load_model(&mut self, path: impl AsRef<Path>) -> Result<ModelId, RenderError> {
        self.load_model_with(&ObjImporter, path)
    }

    pub fn load_model_with<I: ModelImporter>(&mut self, importer: &I, path: impl AsRef<Path>) -> Result<ModelId, RenderError> {
        let path = path.as_ref();
        let scene = importer.import(path)?;
        let base_dir = path.parent().unwrap_or(Path::new(""));

        let model = self.res.register_scene(&mut self.dev, scene, base_dir);
        self.active_model = Some(model);
        Ok(model)
    }

    pub fn set_mode(&mut self, mode: RenderMode) {
        self.mode = mode;
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn set_quad_program(&mut self, program: ProgramId) {
        self.quad_program = Some(program);
    }

    pub fn set_quad_texture(&mut self, texture: Option<TextureId>) {
        self.quad_texture = texture;
    }

    pub fn set_mesh_program(&mut self, program: ProgramId) {
        self.mesh_program = Some(program);
    }

    pub fn set_active_model(&mut self, model: ModelId) {
        self.active_model = Some(model);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.frm.display_width = width;
        self.frm.display_height = height;
    }

    /// Per-frame housekeeping: reloads changed programs and forwards device debug output to the log
    pub fn update(&mut self) {
        if self.config.hot_reload {
            for stale in self.res.programs.check_and_hot_reload(&mut self.dev) {
                let dropped = self.res.invalidate_program(&mut self.dev, stale);
                if dropped > 0 {
                    log::debug!("Dropped {} vertex arrays of reloaded program {:?}", dropped, stale);
                }
            }
        }

        for message in self.dev.drain_debug_messages() {
            match message.severity {
                DebugSeverity::High => log::error!("[{}] {}", message.source, message.message),
                DebugSeverity::Medium => log::warn!("[{}] {}", message.source, message.message),
                DebugSeverity::Low => log::debug!("[{}] {}", message.source, message.message),
                DebugSeverity::Notification => {}
            }
        }
    }

    pub fn draw(&mut self) -> Result<(), RenderError> {
        self.frm.begin(&mut self.dev);

        match self.mode {
            RenderMode::TexturedQuad => {
                if let Some(program) = self.quad_program {
                    self.frm.draw_textured_mesh(&mut self.dev, &mut self.res, program, self.quad_mesh, self.quad_texture)?;
                }
            }
            RenderMode::TexturedModel => {
                if let (Some(program), Some(model)) = (self.mesh_program, self.active_model) {
                    self.frm.draw_textured_model(&mut self.dev, &mut self.res, program, model)?;
                }
            }
        }

        self.frm.end(&mut self.dev);
        Ok(())
    }

    pub fn frame_index(&self) -> u64 {
        self.frm.frame_index()
    }

    pub fn device(&self) -> &D {
        &self.dev
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.dev
    }

    pub fn resources(&self) -> &RenderResourceStorage {
        &self.res
    }
}
