use bytemuck::Pod;
use smallvec::SmallVec;
use crate::renderer::contexts::device_ctx::{
    BufferTarget, ComponentType, GpuHandle, GraphicsDevice, VertexAttribPointer,
};
use crate::renderer::error::RenderError;
use crate::renderer::resources::program::Program;
use crate::renderer::resources::vertex::VertexBufferLayout;
use crate::renderer::shader_data::PerQuadVertexData;

/// A vertex array configured for one program over one submesh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VaoBinding {
    pub handle: GpuHandle,
    pub program_handle: GpuHandle,
}

#[derive(Debug, Clone)]
pub struct Submesh {
    pub layout: VertexBufferLayout,
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
    /// Byte offset of the first vertex within the mesh vertex buffer
    pub vertex_offset: u32,
    /// Byte offset of the first index within the mesh index buffer
    pub index_offset: u32,
    pub material_index: usize,
    pub vaos: SmallVec<[VaoBinding; 2]>,
}

impl Submesh {
    pub fn new(layout: VertexBufferLayout, vertices: Vec<f32>, indices: Vec<u32>, material_index: usize) -> Self {
        Self {
            layout,
            vertices,
            indices,
            vertex_offset: 0,
            index_offset: 0,
            material_index,
            vaos: SmallVec::new(),
        }
    }

    /// Flattens typed per-vertex structs into the float stream the layout describes
    pub fn from_vertices<T: Pod>(layout: VertexBufferLayout, vertices: &[T], indices: Vec<u32>, material_index: usize) -> Self {
        Self::new(layout, bytemuck::cast_slice(vertices).to_vec(), indices, material_index)
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    pub fn binding_for(&self, program_handle: GpuHandle) -> Option<GpuHandle> {
        self.vaos
            .iter()
            .find(|vao| vao.program_handle == program_handle)
            .map(|vao| vao.handle)
    }
}

/// Submeshes sharing one vertex buffer and one index buffer
#[derive(Debug)]
pub struct Mesh {
    pub submeshes: Vec<Submesh>,
    pub vertex_buffer: GpuHandle,
    pub index_buffer: GpuHandle,
}

impl Mesh {
    /// Packs every submesh back to back into a shared vertex and index buffer and uploads both
    pub fn upload<D: GraphicsDevice>(device: &mut D, mut submeshes: Vec<Submesh>) -> Self {
        let mut vertex_bytes: Vec<u8> = Vec::new();
        let mut index_bytes: Vec<u8> = Vec::new();

        for submesh in &mut submeshes {
            submesh.vertex_offset = vertex_bytes.len() as u32;
            submesh.index_offset = index_bytes.len() as u32;
            vertex_bytes.extend_from_slice(bytemuck::cast_slice(&submesh.vertices));
            index_bytes.extend_from_slice(bytemuck::cast_slice(&submesh.indices));
        }

        let vertex_buffer = device.create_buffer(BufferTarget::Vertex, &vertex_bytes);
        let index_buffer = device.create_buffer(BufferTarget::Index, &index_bytes);

        Self {
            submeshes,
            vertex_buffer,
            index_buffer,
        }
    }

    /// The screen quad drawn in textured-quad mode
    pub fn new_quad<D: GraphicsDevice>(device: &mut D) -> Self {
        let vertices = [
            PerQuadVertexData { // Bottom left
                position: [-0.5, -0.5, 0.0].into(),
                texcoord: [0.0, 0.0].into(),
            },
            PerQuadVertexData { // Bottom right
                position: [0.5, -0.5, 0.0].into(),
                texcoord: [1.0, 0.0].into(),
            },
            PerQuadVertexData { // Top right
                position: [0.5, 0.5, 0.0].into(),
                texcoord: [1.0, 1.0].into(),
            },
            PerQuadVertexData { // Top left
                position: [-0.5, 0.5, 0.0].into(),
                texcoord: [0.0, 1.0].into(),
            },
        ];
        let indices = vec![0, 1, 2, 0, 2, 3];

        let submesh = Submesh::from_vertices(PerQuadVertexData::buffer_layout(), &vertices, indices, 0);
        Self::upload(device, vec![submesh])
    }

    /// Returns the vertex array that feeds `program` from submesh `submesh_index`, creating it on first use.
    ///
    /// Every input of the program is matched by location against the submesh layout. Buffer attributes
    /// the program does not read stay disabled. An input with no matching buffer attribute fails with
    /// [`RenderError::MissingAttribute`] and leaves no binding behind.
    pub fn find_or_create_binding<D: GraphicsDevice>(
        &mut self,
        device: &mut D,
        submesh_index: usize,
        program: &Program,
    ) -> Result<GpuHandle, RenderError> {
        let (vertex_buffer, index_buffer) = (self.vertex_buffer, self.index_buffer);
        let submesh = self
            .submeshes
            .get_mut(submesh_index)
            .ok_or(RenderError::InvalidId {
                kind: "submesh",
                index: submesh_index,
            })?;

        if let Some(handle) = submesh.binding_for(program.handle) {
            return Ok(handle);
        }

        let vao = device.create_vertex_array(vertex_buffer, index_buffer);

        for input in &program.input_layout.attributes {
            let Some(attribute) = submesh.layout.find(input.location) else {
                device.delete_vertex_array(vao);
                return Err(RenderError::MissingAttribute {
                    location: input.location,
                    submesh: submesh_index,
                    program: program.handle,
                });
            };

            let index = input.location as u32;
            device.vertex_attrib_pointer(vao, &VertexAttribPointer {
                index,
                component_count: attribute.component_count as u32,
                component_type: ComponentType::F32,
                normalized: false,
                stride: submesh.layout.stride as u32,
                offset: attribute.offset as u64 + submesh.vertex_offset as u64,
            });
            device.enable_vertex_attrib(vao, index);
        }

        submesh.vaos.push(VaoBinding {
            handle: vao,
            program_handle: program.handle,
        });
        log::debug!(
            "Created vertex array {:?} for submesh {} and program `{}`",
            vao, submesh_index, program.name,
        );

        Ok(vao)
    }

    /// Deletes every binding made for `program_handle`, returning how many were dropped
    pub fn invalidate_program<D: GraphicsDevice>(&mut self, device: &mut D, program_handle: GpuHandle) -> usize {
        let mut dropped = 0;
        for submesh in &mut self.submeshes {
            submesh.vaos.retain(|vao| {
                if vao.program_handle == program_handle {
                    device.delete_vertex_array(vao.handle);
                    dropped += 1;
                    false
                } else {
                    true
                }
            });
        }
        dropped
    }

    pub fn binding_count(&self) -> usize {
        self.submeshes.iter().map(|s| s.vaos.len()).sum()
    }
}
