use std::collections::HashMap;
use std::path::Path;

use crate::render::common::{blend_state, line_vertex_layouts, mvp_layout_entry, sprite_vertex_layouts};
use crate::scene::{LINE_SHADER_NAME, SPRITE_SHADER_NAME};

use super::RegistryError;

/// Vertex interface a shader is written against.
///
/// - `Line`: `@location(0) pos: vec2`, `@location(1) color: vec4`, group 0 =
///   MVP uniform
/// - `Sprite`: `@location(0) pos: vec2`, `@location(1) uv: vec2`, group 0 =
///   MVP uniform, texture, sampler
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderKind {
    Line,
    Sprite,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
struct PipelineKey {
    alpha_blend: bool,
    format: wgpu::TextureFormat,
}

struct ShaderEntry {
    kind: ShaderKind,
    module: wgpu::ShaderModule,
    pipelines: HashMap<PipelineKey, wgpu::RenderPipeline>,
}

/// Shader name → compiled WGSL module, plus the render pipelines built from
/// it on demand.
pub struct ShaderRegistry {
    line_bgl: wgpu::BindGroupLayout,
    sprite_bgl: wgpu::BindGroupLayout,
    line_layout: wgpu::PipelineLayout,
    sprite_layout: wgpu::PipelineLayout,
    shaders: HashMap<String, ShaderEntry>,
}

impl ShaderRegistry {
    /// Creates the registry with `lines_default` and `sprite_default` registered.
    pub fn new(device: &wgpu::Device) -> Self {
        let line_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("skelly line bgl"),
            entries: &[mvp_layout_entry()],
        });

        let sprite_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("skelly sprite bgl"),
            entries: &[
                mvp_layout_entry(),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let line_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("skelly line pipeline layout"),
            bind_group_layouts: &[&line_bgl],
            immediate_size: 0,
        });

        let sprite_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("skelly sprite pipeline layout"),
            bind_group_layouts: &[&sprite_bgl],
            immediate_size: 0,
        });

        let mut registry = Self {
            line_bgl,
            sprite_bgl,
            line_layout,
            sprite_layout,
            shaders: HashMap::new(),
        };

        registry.register_wgsl(
            device,
            LINE_SHADER_NAME,
            ShaderKind::Line,
            include_str!("../shaders/lines_default.wgsl"),
        );
        registry.register_wgsl(
            device,
            SPRITE_SHADER_NAME,
            ShaderKind::Sprite,
            include_str!("../shaders/sprite_default.wgsl"),
        );
        registry
    }

    /// Compiles `source` and stores it under `name`, replacing any previous
    /// entry (and its cached pipelines).
    pub fn register_wgsl(&mut self, device: &wgpu::Device, name: &str, kind: ShaderKind, source: &str) {
        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(name),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });

        let replaced = self
            .shaders
            .insert(name.to_string(), ShaderEntry { kind, module, pipelines: HashMap::new() })
            .is_some();

        if replaced {
            log::debug!("shader `{name}` replaced");
        } else {
            log::debug!("shader `{name}` registered ({kind:?})");
        }
    }

    /// Reads a WGSL file and registers it under `name`.
    pub fn load_file(
        &mut self,
        device: &wgpu::Device,
        name: &str,
        kind: ShaderKind,
        path: impl AsRef<Path>,
    ) -> Result<(), RegistryError> {
        let source = read_source(path.as_ref())?;
        self.register_wgsl(device, name, kind, &source);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.shaders.contains_key(name)
    }

    pub fn kind(&self, name: &str) -> Option<ShaderKind> {
        self.shaders.get(name).map(|e| e.kind)
    }

    /// Bind group layout every shader of `kind` is compiled against.
    pub fn bind_group_layout(&self, kind: ShaderKind) -> &wgpu::BindGroupLayout {
        match kind {
            ShaderKind::Line => &self.line_bgl,
            ShaderKind::Sprite => &self.sprite_bgl,
        }
    }

    /// Returns the pipeline for `name` with the given blend mode and target
    /// format, building it on first use.
    pub fn pipeline(
        &mut self,
        device: &wgpu::Device,
        name: &str,
        kind: ShaderKind,
        alpha_blend: bool,
        format: wgpu::TextureFormat,
    ) -> Result<&wgpu::RenderPipeline, RegistryError> {
        let entry = self
            .shaders
            .get_mut(name)
            .ok_or_else(|| RegistryError::ShaderNotFound(name.to_string()))?;

        if entry.kind != kind {
            return Err(RegistryError::ShaderKindMismatch {
                name: name.to_string(),
                expected: kind,
                found: entry.kind,
            });
        }

        let layout = match kind {
            ShaderKind::Line => &self.line_layout,
            ShaderKind::Sprite => &self.sprite_layout,
        };

        let key = PipelineKey { alpha_blend, format };
        let module = &entry.module;
        let pipeline = entry.pipelines.entry(key).or_insert_with(|| {
            log::debug!("building pipeline for `{name}` (blend: {alpha_blend}, format: {format:?})");
            build_pipeline(device, module, layout, kind, key, name)
        });
        Ok(pipeline)
    }
}

fn build_pipeline(
    device: &wgpu::Device,
    module: &wgpu::ShaderModule,
    layout: &wgpu::PipelineLayout,
    kind: ShaderKind,
    key: PipelineKey,
    name: &str,
) -> wgpu::RenderPipeline {
    let buffers = match kind {
        ShaderKind::Line => line_vertex_layouts(),
        ShaderKind::Sprite => sprite_vertex_layouts(),
    };

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(name),
        layout: Some(layout),

        vertex: wgpu::VertexState {
            module,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &buffers,
        },

        fragment: Some(wgpu::FragmentState {
            module,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: key.format,
                blend: blend_state(key.alpha_blend),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),

        // Ribbon winding flips with the turn direction, so nothing is culled.
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },

        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

fn read_source(path: &Path) -> Result<String, RegistryError> {
    std::fs::read_to_string(path).map_err(|source| RegistryError::ShaderSource {
        path: path.to_path_buf(),
        source,
    })
}
