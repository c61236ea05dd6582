use std::path::{Path, PathBuf};
use std::time::SystemTime;
use crate::renderer::contexts::device_ctx::{GpuHandle, GraphicsDevice, ProgramDescriptor};
use crate::renderer::error::ShaderError;
use crate::renderer::resources::shader::compile_program;
use crate::renderer::resources::vertex::VertexShaderLayout;
use crate::renderer::resources::ProgramId;

#[derive(Debug, Clone)]
pub struct Program {
    /// `GpuHandle::NULL` when the last compilation failed
    pub handle: GpuHandle,
    pub filepath: PathBuf,
    /// Logical name, injected into the source as a define
    pub name: String,
    pub last_write: SystemTime,
    pub input_layout: VertexShaderLayout,
}

impl Program {
    pub fn is_valid(&self) -> bool {
        !self.handle.is_null()
    }
}

/// Owns every program loaded from disk and keeps them in sync with their source files
#[derive(Debug)]
pub struct ProgramRegistry {
    programs: Vec<Program>,
    version_line: String,
}

impl ProgramRegistry {
    pub fn new(version_line: impl Into<String>) -> Self {
        Self {
            programs: Vec::new(),
            version_line: version_line.into(),
        }
    }

    /// Loads the program `name` from the shared source file at `path`.
    ///
    /// Failures are logged and still produce an entry with a null handle, so that a later
    /// hot reload can bring the program to life once the file is fixed.
    pub fn load_program<D: GraphicsDevice>(&mut self, device: &mut D, path: impl AsRef<Path>, name: &str) -> ProgramId {
        let path = path.as_ref();
        let last_write = modified_time(path);

        let (handle, input_layout) = match self.build(device, path, name) {
            Ok(built) => built,
            Err(e) => {
                log::error!("Failed to load program `{}` from {:?}: {}", name, path, e);
                (GpuHandle::NULL, VertexShaderLayout::default())
            }
        };

        let id = ProgramId(self.programs.len() as u32);
        self.programs.push(Program {
            handle,
            filepath: path.to_path_buf(),
            name: name.to_owned(),
            last_write,
            input_layout,
        });
        log::info!("Loaded program `{}` ({:?}) as {:?}", name, handle, id);
        id
    }

    /// Recompiles every program whose source file changed since it was last loaded.
    /// Returns the handles the reloaded programs had before, so bindings made for them can be dropped.
    pub fn check_and_hot_reload<D: GraphicsDevice>(&mut self, device: &mut D) -> Vec<GpuHandle> {
        let mut stale = Vec::new();

        for i in 0..self.programs.len() {
            let current_write = modified_time(&self.programs[i].filepath);
            if current_write <= self.programs[i].last_write {
                continue;
            }

            let (path, name) = (self.programs[i].filepath.clone(), self.programs[i].name.clone());
            log::info!("Reloading program `{}` from {:?}", name, path);

            let old_handle = self.programs[i].handle;
            if !old_handle.is_null() {
                device.delete_program(old_handle);
            }

            let (handle, input_layout) = match self.build(device, &path, &name) {
                Ok(built) => built,
                Err(e) => {
                    log::error!("Failed to reload program `{}`: {}", name, e);
                    (GpuHandle::NULL, VertexShaderLayout::default())
                }
            };

            let program = &mut self.programs[i];
            program.handle = handle;
            program.input_layout = input_layout;
            program.last_write = current_write;
            stale.push(old_handle);
        }

        stale
    }

    pub fn get(&self, id: ProgramId) -> Option<&Program> {
        self.programs.get(id.index())
    }

    pub fn find_by_name(&self, name: &str) -> Option<ProgramId> {
        self.programs
            .iter()
            .position(|p| p.name == name)
            .map(|i| ProgramId(i as u32))
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Program> {
        self.programs.iter()
    }

    fn build<D: GraphicsDevice>(&self, device: &mut D, path: &Path, name: &str) -> Result<(GpuHandle, VertexShaderLayout), ShaderError> {
        let source = std::fs::read_to_string(path).map_err(|source| ShaderError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let compiled = compile_program(&source, &self.version_line, name)?;
        let handle = device.create_program(&ProgramDescriptor {
            label: name,
            vertex_source: &compiled.vertex_source,
            fragment_source: &compiled.fragment_source,
            vertex_module: &compiled.vertex_module,
            fragment_module: &compiled.fragment_module,
        })?;

        Ok((handle, compiled.input_layout))
    }
}

fn modified_time(path: &Path) -> SystemTime {
    std::fs::metadata(path)
        .and_then(|m| m.modified())
        .unwrap_or(SystemTime::UNIX_EPOCH)
}
