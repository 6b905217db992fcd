//! GPU side of a ribbon: vertex, color and index buffers plus the MVP uniform.

use wgpu::util::DeviceExt;

use crate::geometry::ribbon::RibbonMesh;

use super::common::{create_mvp_buffer, target_colors, MvpUniform};
use super::RenderCtx;

/// Buffers sized for exactly one mesh shape (`MeshSizes`).
///
/// Same-shape rebuilds go through `write`; a shape change means dropping this
/// and allocating a new one.
pub struct RibbonGpu {
    vertex_buf: wgpu::Buffer,
    color_buf: wgpu::Buffer,
    index_buf: wgpu::Buffer,
    index_count: u32,
    mvp_buf: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl RibbonGpu {
    pub(crate) fn allocate(
        ctx: &RenderCtx<'_>,
        layout: &wgpu::BindGroupLayout,
        mesh: &RibbonMesh,
        name: &str,
    ) -> Self {
        let vertex_buf = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{name} vbo")),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        let color_buf = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{name} color vbo")),
            contents: bytemuck::cast_slice(&target_colors(&mesh.colors, ctx.surface_format)),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        let index_buf = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{name} ibo")),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let mvp_buf = create_mvp_buffer(ctx.device, &format!("{name} mvp ubo"));
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{name} bind group")),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: mvp_buf.as_entire_binding(),
            }],
        });

        Self {
            vertex_buf,
            color_buf,
            index_buf,
            index_count: mesh.index_count() as u32,
            mvp_buf,
            bind_group,
        }
    }

    /// Overwrites positions and colors in place.
    ///
    /// Indices depend only on the point count, so they are left as they are.
    /// Colors are converted for the target; the CPU mesh keeps the caller's values.
    pub(crate) fn write(&self, ctx: &RenderCtx<'_>, mesh: &RibbonMesh) {
        debug_assert_eq!(mesh.index_count() as u32, self.index_count);
        ctx.queue.write_buffer(&self.vertex_buf, 0, bytemuck::cast_slice(&mesh.vertices));
        let colors = target_colors(&mesh.colors, ctx.surface_format);
        ctx.queue.write_buffer(&self.color_buf, 0, bytemuck::cast_slice(&colors));
    }

    pub(crate) fn write_transform(&self, ctx: &RenderCtx<'_>, mvp: glam::Mat4) {
        ctx.queue.write_buffer(&self.mvp_buf, 0, bytemuck::bytes_of(&MvpUniform::new(mvp)));
    }

    pub(crate) fn encode(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buf.slice(..));
        pass.set_vertex_buffer(1, self.color_buf.slice(..));
        pass.set_index_buffer(self.index_buf.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.index_count, 0, 0..1);
    }

    pub(crate) fn destroy(self) {
        self.vertex_buf.destroy();
        self.color_buf.destroy();
        self.index_buf.destroy();
        self.mvp_buf.destroy();
    }
}
