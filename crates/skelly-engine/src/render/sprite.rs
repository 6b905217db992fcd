//! GPU side of a sprite: a fixed four-vertex quad bound to one texture.

use wgpu::util::DeviceExt;

use crate::scene::{SPRITE_INDICES, SPRITE_VERTEX_COUNT};

use super::common::{create_mvp_buffer, MvpUniform};
use super::registry::GpuTexture;
use super::RenderCtx;

type Corners = [[f32; 2]; SPRITE_VERTEX_COUNT];

pub struct SpriteGpu {
    vertex_buf: wgpu::Buffer,
    uv_buf: wgpu::Buffer,
    index_buf: wgpu::Buffer,
    mvp_buf: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    texture_id: u64,
}

impl SpriteGpu {
    pub(crate) fn allocate(
        ctx: &RenderCtx<'_>,
        layout: &wgpu::BindGroupLayout,
        texture: &GpuTexture,
        vertices: &Corners,
        uvs: &Corners,
        name: &str,
    ) -> Self {
        let vertex_buf = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{name} vbo")),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        let uv_buf = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{name} uv vbo")),
            contents: bytemuck::cast_slice(uvs),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        let index_buf = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{name} ibo")),
            contents: bytemuck::cast_slice(&SPRITE_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        let mvp_buf = create_mvp_buffer(ctx.device, &format!("{name} mvp ubo"));
        let bind_group = create_bind_group(ctx.device, layout, &mvp_buf, texture, name);

        Self {
            vertex_buf,
            uv_buf,
            index_buf,
            mvp_buf,
            bind_group,
            texture_id: texture.id,
        }
    }

    pub(crate) fn write(&self, ctx: &RenderCtx<'_>, vertices: &Corners, uvs: &Corners) {
        ctx.queue.write_buffer(&self.vertex_buf, 0, bytemuck::cast_slice(vertices));
        ctx.queue.write_buffer(&self.uv_buf, 0, bytemuck::cast_slice(uvs));
    }

    /// Rebuilds the bind group if `texture` is not the one currently bound.
    pub(crate) fn rebind_texture(&mut self, ctx: &RenderCtx<'_>, layout: &wgpu::BindGroupLayout, texture: &GpuTexture) {
        if self.texture_id == texture.id {
            return;
        }
        self.bind_group = create_bind_group(ctx.device, layout, &self.mvp_buf, texture, "sprite rebind");
        self.texture_id = texture.id;
    }

    pub(crate) fn write_transform(&self, ctx: &RenderCtx<'_>, mvp: glam::Mat4) {
        ctx.queue.write_buffer(&self.mvp_buf, 0, bytemuck::bytes_of(&MvpUniform::new(mvp)));
    }

    pub(crate) fn encode(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buf.slice(..));
        pass.set_vertex_buffer(1, self.uv_buf.slice(..));
        pass.set_index_buffer(self.index_buf.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..SPRITE_INDICES.len() as u32, 0, 0..1);
    }

    pub(crate) fn destroy(self) {
        self.vertex_buf.destroy();
        self.uv_buf.destroy();
        self.index_buf.destroy();
        self.mvp_buf.destroy();
    }
}

fn create_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    mvp_buf: &wgpu::Buffer,
    texture: &GpuTexture,
    name: &str,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(&format!("{name} bind group")),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: mvp_buf.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(&texture.view),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::Sampler(&texture.sampler),
            },
        ],
    })
}
