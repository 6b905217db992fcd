//! GPU types shared by the ribbon and sprite backends.

use std::borrow::Cow;

use bytemuck::{Pod, Zeroable};

use crate::coords::ColorRgba;

use crate::geometry::ribbon::{FLOATS_PER_COLOR, FLOATS_PER_VERTEX};

// ── blend ─────────────────────────────────────────────────────────────────

/// Straight-alpha blending when `alpha_blend` is set, plain overwrite otherwise.
pub(crate) fn blend_state(alpha_blend: bool) -> Option<wgpu::BlendState> {
    alpha_blend.then_some(wgpu::BlendState::ALPHA_BLENDING)
}

// ── color space ───────────────────────────────────────────────────────────

/// Flat RGBA floats as the color buffer must hold them for a target format.
///
/// Mesh colors are sRGB values; an sRGB target gets them decoded to linear,
/// any other target gets them as they are.
pub(crate) fn target_colors(colors: &[f32], format: wgpu::TextureFormat) -> Cow<'_, [f32]> {
    if !format.is_srgb() {
        return Cow::Borrowed(colors);
    }
    let mut out = Vec::with_capacity(colors.len());
    for px in colors.chunks_exact(FLOATS_PER_COLOR) {
        let c = ColorRgba::new(px[0], px[1], px[2], px[3]).srgb_to_linear();
        out.extend_from_slice(&c.to_array());
    }
    Cow::Owned(out)
}

/// Clear color for a target format, decoded like [`target_colors`].
pub(crate) fn target_clear(clear: ColorRgba, format: wgpu::TextureFormat) -> wgpu::Color {
    let c = if format.is_srgb() { clear.srgb_to_linear() } else { clear };
    wgpu::Color {
        r: c.r as f64,
        g: c.g as f64,
        b: c.b as f64,
        a: c.a as f64,
    }
}

// ── transform uniform ─────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(crate) struct MvpUniform {
    pub mvp: [[f32; 4]; 4],
}

impl MvpUniform {
    pub(crate) fn new(mvp: glam::Mat4) -> Self {
        Self { mvp: mvp.to_cols_array_2d() }
    }
}

pub(crate) fn mvp_min_binding_size() -> Option<std::num::NonZeroU64> {
    std::num::NonZeroU64::new(std::mem::size_of::<MvpUniform>() as u64)
}

pub(crate) fn mvp_layout_entry() -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding: 0,
        visibility: wgpu::ShaderStages::VERTEX,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: mvp_min_binding_size(),
        },
        count: None,
    }
}

pub(crate) fn create_mvp_buffer(device: &wgpu::Device, label: &str) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: std::mem::size_of::<MvpUniform>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

// ── vertex layouts ────────────────────────────────────────────────────────
//
// Positions and per-vertex attributes live in separate buffers so the CPU
// mesh arrays can be uploaded as they are.

const POSITION_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];
const COLOR_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x4];
const UV_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x2];

const F32: u64 = std::mem::size_of::<f32>() as u64;

pub(crate) fn line_vertex_layouts() -> [wgpu::VertexBufferLayout<'static>; 2] {
    [
        wgpu::VertexBufferLayout {
            array_stride: FLOATS_PER_VERTEX as u64 * F32,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &POSITION_ATTRS,
        },
        wgpu::VertexBufferLayout {
            array_stride: FLOATS_PER_COLOR as u64 * F32,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &COLOR_ATTRS,
        },
    ]
}

pub(crate) fn sprite_vertex_layouts() -> [wgpu::VertexBufferLayout<'static>; 2] {
    [
        wgpu::VertexBufferLayout {
            array_stride: 2 * F32,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &POSITION_ATTRS,
        },
        wgpu::VertexBufferLayout {
            array_stride: 2 * F32,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &UV_ATTRS,
        },
    ]
}
