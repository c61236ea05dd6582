//! "Resources" refers to the objects the renderer builds on top of the graphics device.
//! They are created once, referenced by typed ids and live as long as the renderer.

pub mod material;
pub mod mesh;
pub mod model;
pub mod program;
pub mod shader;
pub mod texture;
pub mod vertex;

macro_rules! resource_id {
    ($($name:ident),* $(,)?) => {
        $(
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
            pub struct $name(pub u32);

            impl $name {
                pub fn index(self) -> usize {
                    self.0 as usize
                }
            }
        )*
    };
}

resource_id!(ProgramId, TextureId, MeshId, MaterialId, ModelId);
