use std::path::Path;
use crate::renderer::contexts::device_ctx::{GpuHandle, GraphicsDevice, TextureFormat};
use crate::renderer::import::{ImportedMaterial, ImportedScene};
use crate::renderer::resources::material::Material;
use crate::renderer::resources::mesh::{Mesh, Submesh};
use crate::renderer::resources::model::Model;
use crate::renderer::resources::program::ProgramRegistry;
use crate::renderer::resources::texture::TextureCache;
use crate::renderer::resources::{MaterialId, MeshId, ModelId, TextureId};
use crate::renderer::shader_data::PerVertexData;

/// 1x1 textures bound when a material channel has no texture of its own
#[derive(Debug, Clone, Copy)]
pub struct StandardTextures {
    pub white: TextureId,
    pub black: TextureId,
    pub normal: TextureId,
    pub magenta: TextureId,
}

impl StandardTextures {
    fn create<D: GraphicsDevice>(device: &mut D, textures: &mut TextureCache) -> Self {
        let mut solid = |key: &str, rgb: [u8; 3]| {
            textures.create_from_pixels(&mut *device, key, 1, 1, TextureFormat::Rgb8, &rgb)
        };

        Self {
            white: solid("<white>", [255, 255, 255]),
            black: solid("<black>", [0, 0, 0]),
            normal: solid("<normal>", [128, 128, 255]),
            magenta: solid("<magenta>", [255, 0, 255]),
        }
    }
}

/// Responsibilities:
/// - Own programs, textures, meshes, materials and models in append-only registries
/// - Hand out typed ids instead of references between records
/// - Turn imported scenes into uploaded meshes with resolved materials
pub struct RenderResourceStorage {
    pub programs: ProgramRegistry,
    pub textures: TextureCache,
    pub meshes: Vec<Mesh>,
    pub materials: Vec<Material>,
    pub models: Vec<Model>,
    pub standard_textures: StandardTextures,
}

impl RenderResourceStorage {
    pub fn new<D: GraphicsDevice>(device: &mut D, version_line: &str) -> Self {
        let mut textures = TextureCache::new();
        let standard_textures = StandardTextures::create(device, &mut textures);

        Self {
            programs: ProgramRegistry::new(version_line),
            textures,
            meshes: Vec::new(),
            materials: Vec::new(),
            models: Vec::new(),
            standard_textures,
        }
    }

    pub fn add_mesh(&mut self, mesh: Mesh) -> MeshId {
        self.meshes.push(mesh);
        MeshId(self.meshes.len() as u32 - 1)
    }

    pub fn mesh(&self, id: MeshId) -> Option<&Mesh> {
        self.meshes.get(id.index())
    }

    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.index())
    }

    pub fn model(&self, id: ModelId) -> Option<&Model> {
        self.models.get(id.index())
    }

    /// Uploads an imported scene as one mesh and registers its materials after the existing ones.
    /// Texture paths are resolved against `base_dir` through the texture cache.
    pub fn register_scene<D: GraphicsDevice>(&mut self, device: &mut D, scene: ImportedScene, base_dir: &Path) -> ModelId {
        let material_base = self.materials.len();
        for imported in &scene.materials {
            let material = self.resolve_material(device, imported, base_dir);
            self.materials.push(material);
        }

        let materials = scene
            .submeshes
            .iter()
            .map(|s| MaterialId((material_base + s.material_index) as u32))
            .collect();

        let submeshes = scene
            .submeshes
            .into_iter()
            .map(|s| {
                Submesh::from_vertices(
                    PerVertexData::buffer_layout(),
                    &s.vertices,
                    s.indices,
                    material_base + s.material_index,
                )
            })
            .collect();

        let mesh = self.add_mesh(Mesh::upload(device, submeshes));
        self.models.push(Model { mesh, materials });
        ModelId(self.models.len() as u32 - 1)
    }

    /// Drops the bindings made for a program handle that no longer exists, across every mesh
    pub fn invalidate_program<D: GraphicsDevice>(&mut self, device: &mut D, program_handle: GpuHandle) -> usize {
        self.meshes
            .iter_mut()
            .map(|mesh| mesh.invalidate_program(device, program_handle))
            .sum()
    }

    fn resolve_material<D: GraphicsDevice>(&mut self, device: &mut D, imported: &ImportedMaterial, base_dir: &Path) -> Material {
        let mut texture = |path: &Option<std::path::PathBuf>| {
            path.as_ref()
                .and_then(|p| self.textures.load_texture_2d(&mut *device, base_dir.join(p)))
        };

        Material {
            name: imported.name.clone(),
            albedo: imported.albedo,
            emissive: imported.emissive,
            smoothness: imported.smoothness,
            albedo_texture: texture(&imported.albedo_texture),
            emissive_texture: texture(&imported.emissive_texture),
            specular_texture: texture(&imported.specular_texture),
            normals_texture: texture(&imported.normals_texture),
            bump_texture: texture(&imported.bump_texture),
        }
    }
}
