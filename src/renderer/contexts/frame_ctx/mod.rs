use crate::renderer::config::RenderConfig;
use crate::renderer::contexts::device_ctx::{GpuHandle, GraphicsDevice};
use crate::renderer::contexts::resource_ctx::RenderResourceStorage;
use crate::renderer::error::RenderError;
use crate::renderer::resources::{MeshId, ModelId, ProgramId, TextureId};

/// Responsibilities:
/// - Set up and tear down per-frame device state
/// - Resolve the vertex array of every (submesh, program) pair before drawing it
/// - Issue one indexed draw per submesh, in submesh order
pub struct RenderFrameContext {
    pub clear_color: [f32; 4],
    pub display_width: u32,
    pub display_height: u32,
    frame_index: u64,
}

impl RenderFrameContext {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            clear_color: config.clear_color,
            display_width: config.display_width,
            display_height: config.display_height,
            frame_index: 0,
        }
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    pub fn begin<D: GraphicsDevice>(&mut self, device: &mut D) {
        device.set_viewport(self.display_width, self.display_height);
        device.clear(self.clear_color);
    }

    pub fn end<D: GraphicsDevice>(&mut self, device: &mut D) {
        device.bind_vertex_array(GpuHandle::NULL);
        device.use_program(GpuHandle::NULL);
        self.frame_index += 1;
    }

    /// Draws every submesh of `mesh` with `texture` on unit 0
    pub fn draw_textured_mesh<D: GraphicsDevice>(
        &mut self,
        device: &mut D,
        res: &mut RenderResourceStorage,
        program: ProgramId,
        mesh: MeshId,
        texture: Option<TextureId>,
    ) -> Result<(), RenderError> {
        let texture = texture.unwrap_or(res.standard_textures.white);
        self.draw_submeshes(device, res, program, mesh, |_, _| Some(texture))
    }

    /// Draws every submesh of `model` with the albedo texture of its material on unit 0
    pub fn draw_textured_model<D: GraphicsDevice>(
        &mut self,
        device: &mut D,
        res: &mut RenderResourceStorage,
        program: ProgramId,
        model: ModelId,
    ) -> Result<(), RenderError> {
        let model = res
            .model(model)
            .cloned()
            .ok_or(RenderError::InvalidId { kind: "model", index: model.index() })?;

        self.draw_submeshes(device, res, program, model.mesh, |res, submesh| {
            model
                .material_for(submesh)
                .and_then(|m| res.material(m))
                .and_then(|m| m.albedo_texture)
        })
    }

    fn draw_submeshes<D, F>(
        &mut self,
        device: &mut D,
        res: &mut RenderResourceStorage,
        program: ProgramId,
        mesh: MeshId,
        albedo: F,
    ) -> Result<(), RenderError>
    where
        D: GraphicsDevice,
        F: Fn(&RenderResourceStorage, usize) -> Option<TextureId>,
    {
        let Some(prog) = res.programs.get(program) else {
            return Err(RenderError::InvalidId { kind: "program", index: program.index() });
        };
        if !prog.is_valid() {
            log::debug!("Skipping draw with program `{}`, it has no compiled handle", prog.name);
            return Ok(());
        }
        let prog = prog.clone();

        let submesh_count = res
            .mesh(mesh)
            .map(|m| m.submeshes.len())
            .ok_or(RenderError::InvalidId { kind: "mesh", index: mesh.index() })?;

        device.use_program(prog.handle);

        for i in 0..submesh_count {
            let texture = albedo(res, i).unwrap_or(res.standard_textures.white);
            let texture = res.textures.get(texture).map(|t| t.handle).unwrap_or(GpuHandle::NULL);

            let Some(target) = res.meshes.get_mut(mesh.index()) else {
                break;
            };
            let vao = target.find_or_create_binding(device, i, &prog)?;
            let submesh = &target.submeshes[i];

            device.bind_vertex_array(vao);
            device.bind_texture(0, texture);
            device.draw_elements(submesh.index_count(), submesh.index_offset as u64);
        }

        Ok(())
    }
}
