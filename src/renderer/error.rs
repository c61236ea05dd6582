use std::path::PathBuf;
use thiserror::Error;
use crate::renderer::contexts::device_ctx::{DeviceError, GpuHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    Vertex,
    Fragment,
}

impl std::fmt::Display for StageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Vertex => write!(f, "vertex"),
            Self::Fragment => write!(f, "fragment"),
        }
    }
}

/// Failures while turning a shader source file into a program.
/// The program registry recovers from all of these by registering a null program.
#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("failed to read shader source {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{stage} stage of `{name}` failed to compile:\n{details}")]
    Compile {
        stage: StageKind,
        name: String,
        details: String,
    },

    #[error("{stage} stage of `{name}` failed validation: {details}")]
    Validation {
        stage: StageKind,
        name: String,
        details: String,
    },

    #[error("program `{name}` failed to link: {details}")]
    Link { name: String, details: String },

    #[error("{stage} stage of `{name}` has no entry point")]
    MissingEntryPoint { stage: StageKind, name: String },

    #[error("vertex input `{input}` of `{name}` has a type that cannot be fed from a vertex buffer")]
    UnsupportedInput { name: String, input: String },

    #[error(transparent)]
    Device(#[from] DeviceError),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Shader(#[from] ShaderError),

    #[error("failed to decode image {path:?}: {details}")]
    Decode { path: PathBuf, details: String },

    #[error("image {path:?} has {channels} channels, only 3 or 4 are supported")]
    UnsupportedChannels { path: PathBuf, channels: u8 },

    #[error("submesh {submesh} provides no vertex attribute at location {location} required by program {program:?}")]
    MissingAttribute {
        location: u8,
        submesh: usize,
        program: GpuHandle,
    },

    #[error("failed to import model {path:?}: {details}")]
    Import { path: PathBuf, details: String },

    #[error("no {kind} with index {index}")]
    InvalidId { kind: &'static str, index: usize },

    #[error(transparent)]
    Device(#[from] DeviceError),
}
