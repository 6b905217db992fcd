//! Textured quad entity.
//!
//! A sprite is a fixed four-vertex quad: geometry is stored in small arrays
//! and the GPU buffers are allocated once and overwritten on change.

use crate::coords::{Rect, Vec2};
use crate::geometry::PivotType;
use crate::render::sprite::SpriteGpu;
use crate::render::registry::GpuTexture;
use crate::render::RenderCtx;

use super::Transform2D;

/// Registry name of the built-in sprite shader.
pub const SPRITE_SHADER_NAME: &str = "sprite_default";

pub const SPRITE_VERTEX_COUNT: usize = 4;

/// Two counter-clockwise triangles over the quad corners
/// (bottom-left, bottom-right, top-right, top-left).
pub const SPRITE_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SpriteState {
    Uninitialized,
    Ready,
    Disposed,
}

pub struct Sprite {
    pub name: String,
    pub texture_path: String,
    pub shader_name: String,
    pub transform: Transform2D,
    pub alpha_blend: bool,

    size: Vec2,
    texture_size: Vec2,
    /// Sub-image in texels; empty = whole texture.
    clip_rect: Rect,
    pivot_type: PivotType,
    pivot: Vec2,

    vertices: [[f32; 2]; SPRITE_VERTEX_COUNT],
    uvs: [[f32; 2]; SPRITE_VERTEX_COUNT],

    state: SpriteState,
    dirty: bool,
    gpu: Option<SpriteGpu>,
}

impl Sprite {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            texture_path: String::new(),
            shader_name: SPRITE_SHADER_NAME.to_string(),
            transform: Transform2D::default(),
            alpha_blend: false,
            size: Vec2::zero(),
            texture_size: Vec2::zero(),
            clip_rect: Rect::default(),
            pivot_type: PivotType::Centre,
            pivot: Vec2::zero(),
            vertices: [[0.0; 2]; SPRITE_VERTEX_COUNT],
            uvs: [[0.0; 2]; SPRITE_VERTEX_COUNT],
            state: SpriteState::Uninitialized,
            dirty: false,
            gpu: None,
        }
    }

    /// Binds a texture and sizes the quad.
    ///
    /// `size = None` uses the texture's own size in texels.
    pub fn init(
        &mut self,
        texture_path: impl Into<String>,
        shader_name: impl Into<String>,
        texture_size: Vec2,
        size: Option<Vec2>,
    ) {
        self.texture_path = texture_path.into();
        self.shader_name = shader_name.into();
        self.texture_size = texture_size;
        self.size = size.unwrap_or(texture_size);
        self.state = SpriteState::Ready;
        self.update_geometry();
    }

    /// Selects a preset pivot. With `update = false` the quad is left as is
    /// until the next `update_geometry`.
    pub fn set_pivot_type(&mut self, pivot_type: PivotType, update: bool) {
        self.pivot_type = pivot_type;
        if update {
            self.update_geometry();
        }
    }

    /// Sets an explicit pivot in local units; switches to `PivotType::Custom`.
    pub fn set_custom_pivot(&mut self, pivot: Vec2, update: bool) {
        self.pivot_type = PivotType::Custom;
        self.pivot = pivot;
        if update {
            self.update_geometry();
        }
    }

    pub fn set_clip_rect(&mut self, clip_rect: Rect) {
        self.clip_rect = clip_rect;
        self.update_geometry();
    }

    pub fn set_size(&mut self, size: Vec2) {
        self.size = size;
        self.update_geometry();
    }

    /// Recomputes corner positions (relative to the pivot) and UVs.
    pub fn update_geometry(&mut self) {
        if self.state == SpriteState::Disposed {
            return;
        }
        if let Some(p) = self.pivot_type.offset(self.size) {
            self.pivot = p;
        }

        let (w, h) = (self.size.x, self.size.y);
        let corners = [
            Vec2::new(0.0, 0.0),
            Vec2::new(w, 0.0),
            Vec2::new(w, h),
            Vec2::new(0.0, h),
        ];
        for (dst, c) in self.vertices.iter_mut().zip(corners) {
            let p = c - self.pivot;
            *dst = [p.x, p.y];
        }

        // Image rows run top-down, so the bottom edge samples v1.
        let [u0, v0, u1, v1] = self.clip_rect.uv_bounds(self.texture_size);
        self.uvs = [[u0, v1], [u1, v1], [u1, v0], [u0, v0]];
        self.dirty = true;
    }

    /// Creates or refreshes GPU buffers for this sprite.
    pub(crate) fn upload(
        &mut self,
        ctx: &RenderCtx<'_>,
        layout: &wgpu::BindGroupLayout,
        texture: &GpuTexture,
    ) {
        if self.state != SpriteState::Ready {
            return;
        }
        match self.gpu.as_mut() {
            None => {
                log::debug!("sprite `{}`: allocating GPU buffers", self.name);
                self.gpu = Some(SpriteGpu::allocate(ctx, layout, texture, &self.vertices, &self.uvs, &self.name));
            }
            Some(gpu) => {
                gpu.rebind_texture(ctx, layout, texture);
                if self.dirty {
                    gpu.write(ctx, &self.vertices, &self.uvs);
                }
            }
        }
        self.dirty = false;
    }

    /// Releases GPU resources. Terminal.
    pub fn dispose(&mut self) {
        if let Some(gpu) = self.gpu.take() {
            gpu.destroy();
        }
        self.state = SpriteState::Disposed;
        log::debug!("sprite `{}` disposed", self.name);
    }

    // ── accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn state(&self) -> SpriteState {
        self.state
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    #[inline]
    pub fn pivot(&self) -> Vec2 {
        self.pivot
    }

    #[inline]
    pub fn pivot_type(&self) -> PivotType {
        self.pivot_type
    }

    #[inline]
    pub fn vertices(&self) -> &[[f32; 2]; SPRITE_VERTEX_COUNT] {
        &self.vertices
    }

    #[inline]
    pub fn uvs(&self) -> &[[f32; 2]; SPRITE_VERTEX_COUNT] {
        &self.uvs
    }

    #[inline]
    pub fn model_matrix(&self) -> glam::Mat4 {
        self.transform.model_matrix()
    }

    #[inline]
    pub(crate) fn gpu(&self) -> Option<&SpriteGpu> {
        self.gpu.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready(w: f32, h: f32) -> Sprite {
        let mut s = Sprite::new("hero");
        s.init("data/textures/hero.png", SPRITE_SHADER_NAME, Vec2::new(64.0, 32.0), Some(Vec2::new(w, h)));
        s
    }

    #[test]
    fn new_sprite_is_uninitialized() {
        let s = Sprite::new("s");
        assert_eq!(s.state(), SpriteState::Uninitialized);
        assert_eq!(s.shader_name, SPRITE_SHADER_NAME);
    }

    #[test]
    fn init_defaults_to_texture_size() {
        let mut s = Sprite::new("s");
        s.init("tex.png", SPRITE_SHADER_NAME, Vec2::new(64.0, 32.0), None);
        assert_eq!(s.state(), SpriteState::Ready);
        assert_eq!(s.size(), Vec2::new(64.0, 32.0));
    }

    #[test]
    fn centre_pivot_centres_the_quad() {
        let s = ready(40.0, 20.0);
        assert_eq!(s.pivot(), Vec2::new(20.0, 10.0));
        assert_eq!(s.vertices(), &[[-20.0, -10.0], [20.0, -10.0], [20.0, 10.0], [-20.0, 10.0]]);
    }

    #[test]
    fn pivot_update_can_be_deferred() {
        let mut s = ready(40.0, 20.0);
        s.set_pivot_type(PivotType::BotLeft, false);
        assert_eq!(s.vertices()[0], [-20.0, -10.0]);

        s.update_geometry();
        assert_eq!(s.vertices()[0], [0.0, 0.0]);
        assert_eq!(s.vertices()[2], [40.0, 20.0]);
    }

    #[test]
    fn custom_pivot_is_kept_across_updates() {
        let mut s = ready(40.0, 20.0);
        s.set_custom_pivot(Vec2::new(5.0, 5.0), true);
        assert_eq!(s.pivot_type(), PivotType::Custom);
        s.set_size(Vec2::new(80.0, 40.0));
        assert_eq!(s.pivot(), Vec2::new(5.0, 5.0));
        assert_eq!(s.vertices()[2], [75.0, 35.0]);
    }

    #[test]
    fn clip_rect_selects_sub_image() {
        let mut s = ready(16.0, 16.0);
        assert_eq!(s.uvs(), &[[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]]);

        s.set_clip_rect(Rect::new(32.0, 0.0, 32.0, 16.0));
        assert_eq!(s.uvs(), &[[0.5, 0.5], [1.0, 0.5], [1.0, 0.0], [0.5, 0.0]]);
    }

    #[test]
    fn dispose_is_terminal() {
        let mut s = ready(8.0, 8.0);
        s.dispose();
        assert_eq!(s.state(), SpriteState::Disposed);
        let before = *s.vertices();
        s.set_size(Vec2::new(100.0, 100.0));
        assert_eq!(s.vertices(), &before);
    }
}
