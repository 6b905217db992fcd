use std::collections::HashMap;

use crate::coords::Vec2;

use super::RegistryError;

/// A decoded image resident on the GPU, with the sampler sprites bind it with.
pub struct GpuTexture {
    /// Registry-unique; lets bind groups notice a texture was replaced.
    pub(crate) id: u64,
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub width: u32,
    pub height: u32,
}

impl GpuTexture {
    /// Size in texels.
    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

/// Texture path → GPU texture.
#[derive(Default)]
pub struct TextureRegistry {
    textures: HashMap<String, GpuTexture>,
    next_id: u64,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes `path` and uploads it, or returns the cached entry if the path
    /// was loaded before.
    pub fn load(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        path: &str,
    ) -> Result<&GpuTexture, RegistryError> {
        if !self.textures.contains_key(path) {
            let rgba = decode_rgba8(path)?;
            let id = self.next_id;
            self.next_id += 1;
            let texture = upload(device, queue, path, id, &rgba);
            self.textures.insert(path.to_string(), texture);
        }
        self.get(path)
    }

    pub fn get(&self, path: &str) -> Result<&GpuTexture, RegistryError> {
        self.textures
            .get(path)
            .ok_or_else(|| RegistryError::TextureNotFound(path.to_string()))
    }

    pub fn contains(&self, path: &str) -> bool {
        self.textures.contains_key(path)
    }

    /// Drops the texture; sprites still bound to it keep their GPU copy until
    /// they are rebound or disposed.
    pub fn remove(&mut self, path: &str) -> bool {
        match self.textures.remove(path) {
            Some(t) => {
                t.texture.destroy();
                log::debug!("texture `{path}` removed");
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

pub(crate) fn decode_rgba8(path: &str) -> Result<image::RgbaImage, RegistryError> {
    let img = image::open(path).map_err(|source| RegistryError::TextureLoad {
        path: path.to_string(),
        source,
    })?;
    let rgba = img.to_rgba8();

    let (w, h) = rgba.dimensions();
    if !is_power_of_two_size(w, h) {
        log::warn!("texture `{path}` is {w}x{h}; non-power-of-two sizes may sample poorly on old hardware");
    }
    Ok(rgba)
}

fn is_power_of_two_size(width: u32, height: u32) -> bool {
    width.is_power_of_two() && height.is_power_of_two()
}

fn upload(device: &wgpu::Device, queue: &wgpu::Queue, path: &str, id: u64, rgba: &image::RgbaImage) -> GpuTexture {
    let (width, height) = rgba.dimensions();
    let extent = wgpu::Extent3d { width, height, depth_or_array_layers: 1 };

    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(path),
        size: extent,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        rgba.as_raw(),
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * width),
            rows_per_image: Some(height),
        },
        extent,
    );

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

    // Pixel art: no filtering between texels.
    let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("skelly sprite sampler"),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Nearest,
        min_filter: wgpu::FilterMode::Nearest,
        mipmap_filter: wgpu::MipmapFilterMode::Nearest,
        ..Default::default()
    });

    log::info!("texture `{path}` loaded ({width}x{height})");
    GpuTexture { id, texture, view, sampler, width, height }
}
