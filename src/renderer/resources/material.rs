use glam::Vec3;
use crate::renderer::resources::TextureId;

/// Surface description of a submesh. A `None` texture means the channel is not textured.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub albedo: Vec3,
    pub emissive: Vec3,
    pub smoothness: f32,
    pub albedo_texture: Option<TextureId>,
    pub emissive_texture: Option<TextureId>,
    pub specular_texture: Option<TextureId>,
    pub normals_texture: Option<TextureId>,
    pub bump_texture: Option<TextureId>,
}

impl Default for Material {
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
