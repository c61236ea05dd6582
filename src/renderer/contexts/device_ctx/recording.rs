use std::collections::HashMap;
use crate::renderer::contexts::device_ctx::{
    BufferTarget, DebugMessage, DeviceError, DeviceInfo, GpuHandle, GraphicsDevice,
    ProgramDescriptor, TextureDescriptor, VertexAttribPointer,
};

#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCommand {
    CreateProgram { handle: GpuHandle, label: String },
    DeleteProgram(GpuHandle),
    CreateTexture2D { handle: GpuHandle, descriptor: TextureDescriptor },
    CreateBuffer { handle: GpuHandle, target: BufferTarget, size: usize },
    CreateVertexArray { handle: GpuHandle, vertex_buffer: GpuHandle, index_buffer: GpuHandle },
    DeleteVertexArray(GpuHandle),
    VertexAttribPointer { vertex_array: GpuHandle, attrib: VertexAttribPointer },
    EnableVertexAttrib { vertex_array: GpuHandle, index: u32 },
    SetViewport { width: u32, height: u32 },
    Clear { color: [f32; 4] },
    UseProgram(GpuHandle),
    BindVertexArray(GpuHandle),
    BindTexture { unit: u32, texture: GpuHandle },
    DrawElements { index_count: u32, byte_offset: u64 },
}

/// Headless device that hands out handles and records every command it receives.
///
/// Used by the frame loop when no windowing backend is attached, and by tests to
/// assert on exactly which objects and draws were issued.
#[derive(Debug)]
pub struct RecordingDevice {
    next_handle: u32,
    commands: Vec<DeviceCommand>,
    buffers: HashMap<GpuHandle, Vec<u8>>,
    debug_messages: Vec<DebugMessage>,
}

impl Default for RecordingDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingDevice {
    pub fn new() -> Self {
        Self {
            next_handle: 1,
            commands: Vec::new(),
            buffers: HashMap::new(),
            debug_messages: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DeviceCommand] {
        &self.commands
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    pub fn buffer_data(&self, buffer: GpuHandle) -> Option<&[u8]> {
        self.buffers.get(&buffer).map(Vec::as_slice)
    }

    /// Queues a message that the next `drain_debug_messages` call reports
    pub fn push_debug_message(&mut self, message: DebugMessage) {
        self.debug_messages.push(message);
    }

    pub fn created_vertex_arrays(&self) -> Vec<GpuHandle> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DeviceCommand::CreateVertexArray { handle, .. } => Some(*handle),
                _ => None,
            })
            .collect()
    }

    pub fn created_textures(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DeviceCommand::CreateTexture2D { .. }))
            .count()
    }

    /// `(index_count, byte_offset)` of every draw call in issue order
    pub fn draw_calls(&self) -> Vec<(u32, u64)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DeviceCommand::DrawElements { index_count, byte_offset } => {
                    Some((*index_count, *byte_offset))
                }
                _ => None,
            })
            .collect()
    }

    /// Attribute pointers configured on `vertex_array`, in the order they were set
    pub fn attrib_pointers(&self, vertex_array: GpuHandle) -> Vec<VertexAttribPointer> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DeviceCommand::VertexAttribPointer { vertex_array: vao, attrib } if *vao == vertex_array => {
                    Some(*attrib)
                }
                _ => None,
            })
            .collect()
    }

    fn allocate_handle(&mut self) -> GpuHandle {
        let handle = GpuHandle(self.next_handle);
        self.next_handle += 1;
        handle
    }
}

impl GraphicsDevice for RecordingDevice {
    fn info(&self) -> DeviceInfo {
        DeviceInfo {
            renderer: "tessa recording device".to_owned(),
            version: "headless".to_owned(),
            vendor: "tessa".to_owned(),
            shading_language_version: "450".to_owned(),
        }
    }

    fn create_program(&mut self, descriptor: &ProgramDescriptor) -> Result<GpuHandle, DeviceError> {
        let handle = self.allocate_handle();
        self.commands.push(DeviceCommand::CreateProgram {
            handle,
            label: descriptor.label.to_owned(),
        });
        Ok(handle)
    }

    fn delete_program(&mut self, program: GpuHandle) {
        self.commands.push(DeviceCommand::DeleteProgram(program));
    }

    fn create_texture_2d(&mut self, descriptor: &TextureDescriptor, _pixels: &[u8]) -> GpuHandle {
        let handle = self.allocate_handle();
        self.commands.push(DeviceCommand::CreateTexture2D {
            handle,
            descriptor: *descriptor,
        });
        handle
    }

    fn create_buffer(&mut self, target: BufferTarget, data: &[u8]) -> GpuHandle {
        let handle = self.allocate_handle();
        self.buffers.insert(handle, data.to_vec());
        self.commands.push(DeviceCommand::CreateBuffer {
            handle,
            target,
            size: data.len(),
        });
        handle
    }

    fn create_vertex_array(&mut self, vertex_buffer: GpuHandle, index_buffer: GpuHandle) -> GpuHandle {
        let handle = self.allocate_handle();
        self.commands.push(DeviceCommand::CreateVertexArray {
            handle,
            vertex_buffer,
            index_buffer,
        });
        handle
    }

    fn delete_vertex_array(&mut self, vertex_array: GpuHandle) {
        self.commands.push(DeviceCommand::DeleteVertexArray(vertex_array));
    }

    fn vertex_attrib_pointer(&mut self, vertex_array: GpuHandle, attrib: &VertexAttribPointer) {
        self.commands.push(DeviceCommand::VertexAttribPointer {
            vertex_array,
            attrib: *attrib,
        });
    }

    fn enable_vertex_attrib(&mut self, vertex_array: GpuHandle, index: u32) {
        self.commands.push(DeviceCommand::EnableVertexAttrib { vertex_array, index });
    }

    fn set_viewport(&mut self, width: u32, height: u32) {
        self.commands.push(DeviceCommand::SetViewport { width, height });
    }

    fn clear(&mut self, color: [f32; 4]) {
        self.commands.push(DeviceCommand::Clear { color });
    }

    fn use_program(&mut self, program: GpuHandle) {
        self.commands.push(DeviceCommand::UseProgram(program));
    }

    fn bind_vertex_array(&mut self, vertex_array: GpuHandle) {
        self.commands.push(DeviceCommand::BindVertexArray(vertex_array));
    }

    fn bind_texture(&mut self, unit: u32, texture: GpuHandle) {
        self.commands.push(DeviceCommand::BindTexture { unit, texture });
    }

    fn draw_elements(&mut self, index_count: u32, byte_offset: u64) {
        self.commands.push(DeviceCommand::DrawElements { index_count, byte_offset });
    }

    fn drain_debug_messages(&mut self) -> Vec<DebugMessage> {
        std::mem::take(&mut self.debug_messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_unique_and_never_null() {
        let mut device = RecordingDevice::new();
        let a = device.create_buffer(BufferTarget::Vertex, &[0; 4]);
        let b = device.create_buffer(BufferTarget::Index, &[0; 4]);
        let vao = device.create_vertex_array(a, b);

        assert!(!a.is_null());
        assert_ne!(a, b);
        assert_ne!(b, vao);
        assert_eq!(device.created_vertex_arrays(), vec![vao]);
    }

    #[test]
    fn buffer_contents_are_kept() {
        let mut device = RecordingDevice::new();
        let buffer = device.create_buffer(BufferTarget::Vertex, &[1, 2, 3]);
        assert_eq!(device.buffer_data(buffer), Some(&[1u8, 2, 3][..]));
    }
}
