//! Boundary between external 3D asset formats and the mesh store.
//!
//! An importer turns a file into plain CPU-side geometry and material descriptions.
//! It never touches the graphics device; uploading and texture resolution happen
//! when the scene is registered with the renderer.

mod obj;

use std::path::{Path, PathBuf};
use glam::Vec3;
use crate::renderer::error::RenderError;
use crate::renderer::shader_data::PerVertexData;

pub use obj::ObjImporter;

#[derive(Debug, Clone, PartialEq)]
pub struct ImportedSubmesh {
    pub vertices: Vec<PerVertexData>,
    pub indices: Vec<u32>,
    /// Index into [`ImportedScene::materials`]
    pub material_index: usize,
}

/// Material as described by the asset. Texture paths are relative to the asset's directory.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedMaterial {
    pub name: String,
    pub albedo: Vec3,
    pub emissive: Vec3,
    pub smoothness: f32,
    pub albedo_texture: Option<PathBuf>,
    pub emissive_texture: Option<PathBuf>,
    pub specular_texture: Option<PathBuf>,
    pub normals_texture: Option<PathBuf>,
    pub bump_texture: Option<PathBuf>,
}

impl Default for ImportedMaterial {
    fn default() -> Self {
        Self {
            name: String::from("default"),
            albedo: Vec3::ONE,
            emissive: Vec3::ZERO,
            smoothness: 0.0,
            albedo_texture: None,
            emissive_texture: None,
            specular_texture: None,
            normals_texture: None,
            bump_texture: None,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ImportedScene {
    pub submeshes: Vec<ImportedSubmesh>,
    pub materials: Vec<ImportedMaterial>,
}

/// A trait for types that can read a model file into an [`ImportedScene`]
pub trait ModelImporter {
    fn import(&self, path: &Path) -> Result<ImportedScene, RenderError>;
}
