//! Render pipeline management system for wgpu
//!
//! One shader and one pipeline layout serve every draw; what varies is the
//! raster state. Pipelines are keyed by [`PipelineKey`] and created lazily
//! the first time a key is requested.

use std::{collections::HashMap, sync::Arc};
use wgpu::*;

use super::vertex::Vertex3D;
use crate::gfx::{
    resources::TextureResource,
    scene::{DrawMode, RenderOptions},
};

/// Raster state that selects a pipeline variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PipelineKey {
    pub mode: DrawMode,
    pub backface_culling: bool,
    pub depth_test: bool,
}

impl PipelineKey {
    pub fn new(mode: DrawMode, options: &RenderOptions) -> Self {
        Self {
            mode,
            backface_culling: options.backface_culling,
            depth_test: options.depth_test,
        }
    }
}

/// Configuration for creating a render pipeline
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub label: String,
    pub primitive_topology: PrimitiveTopology,
    pub cull_mode: Option<Face>,
    pub depth_test: bool,
    pub color_format: TextureFormat,
}

impl PipelineConfig {
    pub fn new(color_format: TextureFormat) -> Self {
        Self {
            label: "Phong Pipeline".to_string(),
            primitive_topology: PrimitiveTopology::TriangleList,
            cull_mode: Some(Face::Back),
            depth_test: true,
            color_format,
        }
    }

    /// Derives the full configuration for `key`
    pub fn for_key(color_format: TextureFormat, key: PipelineKey) -> Self {
        let topology = match key.mode {
            DrawMode::Filled => PrimitiveTopology::TriangleList,
            DrawMode::Wireframe => PrimitiveTopology::LineList,
        };
        let cull = if key.backface_culling && key.mode == DrawMode::Filled {
            Some(Face::Back)
        } else {
            None
        };

        Self::new(color_format)
            .with_label(&format!("Phong {:?}", key))
            .with_primitive_topology(topology)
            .with_cull_mode(cull)
            .with_depth_test(key.depth_test)
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_owned();
        self
    }

    pub fn with_cull_mode(mut self, face: Option<Face>) -> Self {
        self.cull_mode = face;
        self
    }

    pub fn with_primitive_topology(mut self, topology: PrimitiveTopology) -> Self {
        self.primitive_topology = topology;
        self
    }

    pub fn with_depth_test(mut self, enabled: bool) -> Self {
        self.depth_test = enabled;
        self
    }

    /// Depth state; the pass always has a depth attachment, so a disabled
    /// test still needs a state, just one that always passes and never writes
    fn depth_stencil(&self) -> DepthStencilState {
        DepthStencilState {
            format: TextureResource::DEPTH_FORMAT,
            depth_write_enabled: self.depth_test,
            depth_compare: if self.depth_test {
                CompareFunction::Less
            } else {
                CompareFunction::Always
            },
            stencil: StencilState::default(),
            bias: DepthBiasState::default(),
        }
    }
}

/// Caches pipeline variants for the Phong shader
pub struct PipelineManager {
    device: Arc<Device>,
    shader: ShaderModule,
    layout: PipelineLayout,
    color_format: TextureFormat,
    pipelines: HashMap<PipelineKey, RenderPipeline>,
}

impl PipelineManager {
    /// # Arguments
    /// * `device` - Shared wgpu device for creating resources
    /// * `shader_source` - WGSL source with `vs_main` and `fs_main`
    /// * `bind_group_layouts` - Layouts in bind group order
    /// * `color_format` - Surface format of the colour target
    pub fn new(
        device: Arc<Device>,
        shader_source: &str,
        bind_group_layouts: &[&BindGroupLayout],
        color_format: TextureFormat,
    ) -> Self {
        let shader = device.create_shader_module(ShaderModuleDescriptor {
            label: Some("Phong Shader"),
            source: ShaderSource::Wgsl(shader_source.into()),
        });
        let layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
            label: Some("Phong Pipeline Layout"),
            bind_group_layouts,
            push_constant_ranges: &[],
        });

        Self {
            device,
            shader,
            layout,
            color_format,
            pipelines: HashMap::new(),
        }
    }

    /// Gets or creates the pipeline for `key`
    pub fn get_pipeline(&mut self, key: PipelineKey) -> &RenderPipeline {
        if !self.pipelines.contains_key(&key) {
            let config = PipelineConfig::for_key(self.color_format, key);
            log::debug!("creating pipeline '{}'", config.label);
            let pipeline = self.create_pipeline_from_config(&config);
            self.pipelines.insert(key, pipeline);
        }
        &self.pipelines[&key]
    }

    /// Returns the pipeline for `key` only if it was already created
    pub fn cached(&self, key: PipelineKey) -> Option<&RenderPipeline> {
        self.pipelines.get(&key)
    }

    /// Creates every variant a frame with `options` can ask for
    pub fn warm_up(&mut self, options: &RenderOptions) {
        for mode in [DrawMode::Filled, DrawMode::Wireframe] {
            self.get_pipeline(PipelineKey::new(mode, options));
        }
        log::debug!("{} pipeline variants cached", self.pipelines.len());
    }

    fn create_pipeline_from_config(&self, config: &PipelineConfig) -> RenderPipeline {
        let targets = [Some(ColorTargetState {
            format: config.color_format,
            blend: Some(BlendState::REPLACE),
            write_mask: ColorWrites::ALL,
        })];

        self.device
            .create_render_pipeline(&RenderPipelineDescriptor {
                label: Some(&config.label),
                layout: Some(&self.layout),
                vertex: VertexState {
                    module: &self.shader,
                    entry_point: Some("vs_main"),
                    buffers: &[Vertex3D::desc()],
                    compilation_options: PipelineCompilationOptions::default(),
                },
                fragment: Some(FragmentState {
                    module: &self.shader,
                    entry_point: Some("fs_main"),
                    targets: &targets,
                    compilation_options: PipelineCompilationOptions::default(),
                }),
                primitive: PrimitiveState {
                    topology: config.primitive_topology,
                    strip_index_format: None,
                    front_face: FrontFace::Ccw,
                    cull_mode: config.cull_mode,
                    polygon_mode: PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: Some(config.depth_stencil()),
                multisample: MultisampleState::default(),
                multiview: None,
                cache: None,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(mode: DrawMode, culling: bool, depth: bool) -> PipelineKey {
        PipelineKey {
            mode,
            backface_culling: culling,
            depth_test: depth,
        }
    }

    #[test]
    fn test_wireframe_uses_lines_without_culling() {
        let config = PipelineConfig::for_key(
            TextureFormat::Bgra8Unorm,
            key(DrawMode::Wireframe, true, true),
        );
        assert_eq!(config.primitive_topology, PrimitiveTopology::LineList);
        assert_eq!(config.cull_mode, None);
    }

    #[test]
    fn test_culling_toggle() {
        let on = PipelineConfig::for_key(TextureFormat::Bgra8Unorm, key(DrawMode::Filled, true, true));
        let off =
            PipelineConfig::for_key(TextureFormat::Bgra8Unorm, key(DrawMode::Filled, false, true));
        assert_eq!(on.cull_mode, Some(Face::Back));
        assert_eq!(off.cull_mode, None);
    }

    #[test]
    fn test_depth_toggle() {
        let off =
            PipelineConfig::for_key(TextureFormat::Bgra8Unorm, key(DrawMode::Filled, true, false));
        let state = off.depth_stencil();
        assert_eq!(state.depth_compare, CompareFunction::Always);
        assert!(!state.depth_write_enabled);

        let on =
            PipelineConfig::for_key(TextureFormat::Bgra8Unorm, key(DrawMode::Filled, true, true));
        assert_eq!(on.depth_stencil().depth_compare, CompareFunction::Less);
    }

    #[test]
    fn test_key_follows_options() {
        let options = RenderOptions {
            backface_culling: false,
            ..RenderOptions::default()
        };
        let key = PipelineKey::new(DrawMode::Filled, &options);
        assert!(!key.backface_culling);
        assert!(key.depth_test);
    }
}
