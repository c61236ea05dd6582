pub mod storage;

pub use storage::{RenderResourceStorage, StandardTextures};
