use std::collections::HashMap;
use std::path::{Path, PathBuf};
use crate::renderer::contexts::device_ctx::{GpuHandle, GraphicsDevice, TextureDescriptor, TextureFormat};
use crate::renderer::error::RenderError;
use crate::renderer::resources::TextureId;

#[derive(Debug, Clone)]
pub struct Texture {
    pub handle: GpuHandle,
    /// Source path, or a synthetic key for textures created from pixels
    pub filepath: PathBuf,
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
}

/// Decodes each texture path at most once and hands out the same id on every later request
#[derive(Debug, Default)]
pub struct TextureCache {
    textures: Vec<Texture>,
    by_path: HashMap<PathBuf, TextureId>,
    decode_count: usize,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the texture for `path`, decoding and uploading it on first use.
    /// Images that fail to decode or that are not RGB/RGBA are logged and yield `None`.
    pub fn load_texture_2d<D: GraphicsDevice>(&mut self, device: &mut D, path: impl AsRef<Path>) -> Option<TextureId> {
        let path = path.as_ref();
        if let Some(&id) = self.by_path.get(path) {
            return Some(id);
        }

        match self.decode(path) {
            Ok((width, height, format, pixels)) => {
                Some(self.create_from_pixels(device, path, width, height, format, &pixels))
            }
            Err(e) => {
                log::error!("Failed to load texture: {}", e);
                None
            }
        }
    }

    /// Uploads already decoded pixels and registers them under `key`
    pub fn create_from_pixels<D: GraphicsDevice>(
        &mut self,
        device: &mut D,
        key: impl AsRef<Path>,
        width: u32,
        height: u32,
        format: TextureFormat,
        pixels: &[u8],
    ) -> TextureId {
        let key = key.as_ref();
        if let Some(&id) = self.by_path.get(key) {
            return id;
        }

        let handle = device.create_texture_2d(&TextureDescriptor::sampled_2d(width, height, format), pixels);
        let id = TextureId(self.textures.len() as u32);
        self.textures.push(Texture {
            handle,
            filepath: key.to_path_buf(),
            width,
            height,
            format,
        });
        self.by_path.insert(key.to_path_buf(), id);
        log::debug!("Created texture {:?} ({}x{} {:?}) as {:?}", key, width, height, format, id);
        id
    }

    pub fn get(&self, id: TextureId) -> Option<&Texture> {
        self.textures.get(id.index())
    }

    pub fn find(&self, path: impl AsRef<Path>) -> Option<TextureId> {
        self.by_path.get(path.as_ref()).copied()
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Number of image files decoded so far
    pub fn decode_count(&self) -> usize {
        self.decode_count
    }

    fn decode(&mut self, path: &Path) -> Result<(u32, u32, TextureFormat, Vec<u8>), RenderError> {
        self.decode_count += 1;
        let image = image::open(path).map_err(|e| RenderError::Decode {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;

        // Rows go bottom to top on the device
        let image = image.flipv();
        let (width, height) = (image.width(), image.height());

        match image.color().channel_count() {
            3 => Ok((width, height, TextureFormat::Rgb8, image.into_rgb8().into_raw())),
            4 => Ok((width, height, TextureFormat::Rgba8, image.into_rgba8().into_raw())),
            channels => Err(RenderError::UnsupportedChannels {
                path: path.to_path_buf(),
                channels,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::contexts::device_ctx::RecordingDevice;

    #[test]
    fn pixel_textures_are_keyed() {
        let mut device = RecordingDevice::new();
        let mut cache = TextureCache::new();

        let white = cache.create_from_pixels(&mut device, "<white>", 1, 1, TextureFormat::Rgba8, &[255; 4]);
        let again = cache.create_from_pixels(&mut device, "<white>", 1, 1, TextureFormat::Rgba8, &[255; 4]);

        assert_eq!(white, again);
        assert_eq!(device.created_textures(), 1);
        assert_eq!(cache.decode_count(), 0);
    }

    #[test]
    fn missing_file_yields_none() {
        let mut device = RecordingDevice::new();
        let mut cache = TextureCache::new();

        assert!(cache.load_texture_2d(&mut device, "does/not/exist.png").is_none());
        assert_eq!(device.created_textures(), 0);
        assert!(cache.is_empty());
    }

    #[test]
    fn out_of_range_id_is_none() {
        let cache = TextureCache::new();
        assert!(cache.get(TextureId(3)).is_none());
    }
}
