use crate::renderer::resources::{MaterialId, MeshId};

/// A mesh together with the material of each of its submeshes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    pub mesh: MeshId,
    /// Indexed by submesh
    pub materials: Vec<MaterialId>,
}

impl Model {
    pub fn material_for(&self, submesh_index: usize) -> Option<MaterialId> {
        self.materials.get(submesh_index).copied()
    }
}
