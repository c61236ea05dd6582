pub mod recording;

use thiserror::Error;

pub use recording::{DeviceCommand, RecordingDevice};

/// Opaque name of an object living on the graphics device. Zero is never handed out.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GpuHandle(pub u32);

impl GpuHandle {
    pub const NULL: Self = Self(0);

    pub fn is_null(self) -> bool {
        self == Self::NULL
    }
}

#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("graphics device rejected program `{label}`: {details}")]
    ProgramRejected { label: String, details: String },
}

/// Stage text handed to the device after preprocessing, together with the
/// validated IR the text produced.
pub struct ProgramDescriptor<'a> {
    pub label: &'a str,
    pub vertex_source: &'a str,
    pub fragment_source: &'a str,
    pub vertex_module: &'a naga::Module,
    pub fragment_module: &'a naga::Module,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFormat {
    Rgb8,
    Rgba8,
}

impl TextureFormat {
    pub fn channel_count(&self) -> u8 {
        match self {
            Self::Rgb8 => 3,
            Self::Rgba8 => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFilter {
    Nearest,
    Linear,
    LinearMipmapLinear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureWrap {
    Repeat,
    ClampToEdge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureDescriptor {
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
    pub min_filter: TextureFilter,
    pub mag_filter: TextureFilter,
    pub wrap_r: TextureWrap,
    pub wrap_s: TextureWrap,
    pub wrap_t: TextureWrap,
    pub generate_mipmaps: bool,
}

impl TextureDescriptor {
    /// Sampling state used for every texture loaded from disk
    pub fn sampled_2d(width: u32, height: u32, format: TextureFormat) -> Self {
        Self {
            width,
            height,
            format,
            min_filter: TextureFilter::Linear,
            mag_filter: TextureFilter::LinearMipmapLinear,
            wrap_r: TextureWrap::ClampToEdge,
            wrap_s: TextureWrap::ClampToEdge,
            wrap_t: TextureWrap::ClampToEdge,
            generate_mipmaps: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferTarget {
    Vertex,
    Index,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentType {
    F32,
}

/// One attribute slot of a vertex array
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribPointer {
    pub index: u32,
    pub component_count: u32,
    pub component_type: ComponentType,
    pub normalized: bool,
    pub stride: u32,
    pub offset: u64,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub renderer: String,
    pub version: String,
    pub vendor: String,
    pub shading_language_version: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugSeverity {
    High,
    Medium,
    Low,
    Notification,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugMessage {
    pub severity: DebugSeverity,
    pub source: String,
    pub message: String,
}

/// The graphics command capability the renderer is written against.
///
/// Implementations own a single graphics context and are driven from one thread.
/// Object lifetime follows the explicit create/delete calls below.
pub trait GraphicsDevice {
    fn info(&self) -> DeviceInfo;

    fn create_program(&mut self, descriptor: &ProgramDescriptor) -> Result<GpuHandle, DeviceError>;
    fn delete_program(&mut self, program: GpuHandle);

    fn create_texture_2d(&mut self, descriptor: &TextureDescriptor, pixels: &[u8]) -> GpuHandle;

    fn create_buffer(&mut self, target: BufferTarget, data: &[u8]) -> GpuHandle;

    /// Creates a vertex array with `vertex_buffer` and `index_buffer` attached
    fn create_vertex_array(&mut self, vertex_buffer: GpuHandle, index_buffer: GpuHandle) -> GpuHandle;
    fn delete_vertex_array(&mut self, vertex_array: GpuHandle);
    fn vertex_attrib_pointer(&mut self, vertex_array: GpuHandle, attrib: &VertexAttribPointer);
    fn enable_vertex_attrib(&mut self, vertex_array: GpuHandle, index: u32);

    fn set_viewport(&mut self, width: u32, height: u32);
    fn clear(&mut self, color: [f32; 4]);
    fn use_program(&mut self, program: GpuHandle);
    fn bind_vertex_array(&mut self, vertex_array: GpuHandle);
    fn bind_texture(&mut self, unit: u32, texture: GpuHandle);

    /// Draws `index_count` 32-bit indices starting `byte_offset` bytes into the bound index buffer
    fn draw_elements(&mut self, index_count: u32, byte_offset: u64);

    /// Debug output reported by the driver since the last call
    fn drain_debug_messages(&mut self) -> Vec<DebugMessage>;
}
