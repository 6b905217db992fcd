use std::collections::HashSet;

use crate::coords::Vec2;
use crate::scene::{Camera, Drawable, LineEntity, LineState, Sprite, SpriteState};

use super::registry::{RegistryError, ShaderKind, ShaderRegistry, TextureRegistry};
use super::{RenderCtx, RenderTarget};

/// Draws scene entities.
///
/// Owns the shader and texture registries for the render session. Entities
/// own their GPU buffers; the renderer uploads them lazily on draw.
///
/// A failed lookup (unknown shader or texture) is logged once per entity and
/// the draw is skipped; the frame carries on.
pub struct Renderer {
    shaders: ShaderRegistry,
    textures: TextureRegistry,
    reported: HashSet<String>,
}

impl Renderer {
    pub fn new(device: &wgpu::Device) -> Self {
        Self {
            shaders: ShaderRegistry::new(device),
            textures: TextureRegistry::new(),
            reported: HashSet::new(),
        }
    }

    pub fn shaders(&self) -> &ShaderRegistry {
        &self.shaders
    }

    pub fn textures(&self) -> &TextureRegistry {
        &self.textures
    }

    /// Registers a WGSL file as shader `name`, replacing any earlier one.
    pub fn load_shader(
        &mut self,
        ctx: &RenderCtx<'_>,
        name: &str,
        kind: ShaderKind,
        path: impl AsRef<std::path::Path>,
    ) -> Result<(), RegistryError> {
        self.shaders.load_file(ctx.device, name, kind, path)
    }

    /// Loads (or finds) a texture and returns its size in texels.
    pub fn load_texture(&mut self, ctx: &RenderCtx<'_>, path: &str) -> Result<Vec2, RegistryError> {
        self.textures.load(ctx.device, ctx.queue, path).map(|t| t.size())
    }

    pub fn draw(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, camera: &Camera, item: &mut Drawable) {
        match item {
            Drawable::Line(line) => self.draw_line(ctx, target, camera, line),
            Drawable::Sprite(sprite) => self.draw_sprite(ctx, target, camera, sprite),
        }
    }

    /// Uploads pending geometry and draws the ribbon.
    pub fn draw_line(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, camera: &Camera, line: &mut LineEntity) {
        if line.state() == LineState::Disposed {
            return;
        }
        if let Err(err) = line.upload(ctx, self.shaders.bind_group_layout(ShaderKind::Line)) {
            report_once(&mut self.reported, &line.name, &err);
            return;
        }
        // Anything else means the last rebuild produced no drawable mesh.
        if line.state() != LineState::Uploaded {
            return;
        }
        let Some(gpu) = line.gpu() else { return };

        let pipeline = match self.shaders.pipeline(
            ctx.device,
            &line.shader_name,
            ShaderKind::Line,
            line.alpha_blend,
            ctx.surface_format,
        ) {
            Ok(p) => p,
            Err(err) => {
                report_once(&mut self.reported, &line.name, &err);
                return;
            }
        };

        gpu.write_transform(ctx, camera.view_projection() * line.model_matrix());

        let mut pass = target.begin_load_pass("skelly line pass");
        pass.set_pipeline(pipeline);
        gpu.encode(&mut pass);
    }

    /// Uploads pending quad changes and draws the sprite.
    pub fn draw_sprite(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, camera: &Camera, sprite: &mut Sprite) {
        if sprite.state() != SpriteState::Ready {
            return;
        }
        let texture = match self.textures.get(&sprite.texture_path) {
            Ok(t) => t,
            Err(err) => {
                report_once(&mut self.reported, &sprite.name, &err);
                return;
            }
        };

        sprite.upload(ctx, self.shaders.bind_group_layout(ShaderKind::Sprite), texture);
        let Some(gpu) = sprite.gpu() else { return };

        let pipeline = match self.shaders.pipeline(
            ctx.device,
            &sprite.shader_name,
            ShaderKind::Sprite,
            sprite.alpha_blend,
            ctx.surface_format,
        ) {
            Ok(p) => p,
            Err(err) => {
                report_once(&mut self.reported, &sprite.name, &err);
                return;
            }
        };

        gpu.write_transform(ctx, camera.view_projection() * sprite.model_matrix());

        let mut pass = target.begin_load_pass("skelly sprite pass");
        pass.set_pipeline(pipeline);
        gpu.encode(&mut pass);
    }
}

/// Logs `err` at error level the first time `entity` hits it, at trace after.
fn report_once(reported: &mut HashSet<String>, entity: &str, err: &dyn std::error::Error) {
    let key = format!("{entity}: {err}");
    if reported.insert(key) {
        log::error!("skipping draw of `{entity}`: {err}");
    } else {
        log::trace!("skipping draw of `{entity}`: {err}");
    }
}
