//! WGPU-based rendering engine
//!
//! Implements the shading protocol and the draw seam over wgpu. Named
//! parameters are mirrored on the CPU as they arrive; each `draw` snapshots
//! the per-object block into its own dynamic-offset slot and records a
//! command. [`RenderEngine::present`] then uploads both blocks, replays the
//! recorded draws in a single render pass, runs the UI overlay and presents.

use std::sync::Arc;
use wgpu::TextureFormat;

use crate::{
    error::{Result, ViewerError},
    gfx::{
        resources::TextureResource,
        scene::{DrawMode, RenderContext, RenderOptions, Shape},
        shading::{ShadingError, ShadingStage, UniformValue},
    },
    wgpu_utils::{self, DynamicUniformBuffer, UniformBuffer},
};

use super::{
    mesh::MeshLibrary,
    pipeline_manager::{PipelineKey, PipelineManager},
    uniforms::{FrameUniforms, ObjectUniforms, UniformMirror},
};

/// Initial number of per-draw uniform slots
const INITIAL_OBJECT_SLOTS: usize = 32;

const PHONG_SHADER: &str = include_str!("../../shaders/phong.wgsl");

#[derive(Debug, Clone, Copy)]
struct DrawCommand {
    shape: Shape,
    mode: DrawMode,
    key: PipelineKey,
    slot: usize,
}

/// Core rendering engine managing GPU resources and draw calls
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    format: TextureFormat,
    clear_color: wgpu::Color,

    pipeline_manager: PipelineManager,
    meshes: MeshLibrary,

    mirror: UniformMirror,
    frame_buffer: UniformBuffer<FrameUniforms>,
    frame_bind_group: wgpu::BindGroup,
    object_buffer: DynamicUniformBuffer<ObjectUniforms>,
    object_layout: wgpu::BindGroupLayout,
    object_bind_group: wgpu::BindGroup,

    options: RenderOptions,
    object_slots: Vec<ObjectUniforms>,
    draws: Vec<DrawCommand>,
}

impl RenderEngine {
    /// Creates a new render engine for the given window
    ///
    /// # Arguments
    /// * `window` - Window surface target for rendering
    /// * `width` - Initial surface width in pixels
    /// * `height` - Initial surface height in pixels
    /// * `clear_color` - RGBA colour the frame is cleared to
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        clear_color: [f64; 4],
    ) -> Result<RenderEngine> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("using adapter {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits::downlevel_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .ok_or(ViewerError::NoSurfaceFormat)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            // One frame per display refresh
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_capabilities
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture =
            TextureResource::create_depth_texture(&device, &config, "depth_texture");

        let frame_layout = wgpu_utils::single_entry_layout(
            &device,
            "Frame Uniforms Layout",
            wgpu_utils::uniform(),
        );
        let object_layout = wgpu_utils::single_entry_layout(
            &device,
            "Object Uniforms Layout",
            wgpu_utils::dynamic_uniform::<ObjectUniforms>(),
        );

        let frame_buffer = UniformBuffer::<FrameUniforms>::new(&device);
        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Frame Bind Group"),
            layout: &frame_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.binding_resource(),
            }],
        });

        let object_buffer = DynamicUniformBuffer::<ObjectUniforms>::new(&device, INITIAL_OBJECT_SLOTS);
        let object_bind_group = create_object_bind_group(&device, &object_layout, &object_buffer);

        let meshes = MeshLibrary::new(&device);

        let device: Arc<wgpu::Device> = device.into();
        let queue: Arc<wgpu::Queue> = queue.into();

        let options = RenderOptions::default();
        let mut pipeline_manager = PipelineManager::new(
            device.clone(),
            PHONG_SHADER,
            &[&frame_layout, &object_layout],
            format,
        );
        pipeline_manager.warm_up(&options);

        let [r, g, b, a] = clear_color;

        Ok(RenderEngine {
            surface,
            device,
            queue,
            config,
            depth_texture,
            format,
            clear_color: wgpu::Color { r, g, b, a },
            pipeline_manager,
            meshes,
            mirror: UniformMirror::new(),
            frame_buffer,
            frame_bind_group,
            object_buffer,
            object_layout,
            object_bind_group,
            options,
            object_slots: Vec::with_capacity(INITIAL_OBJECT_SLOTS),
            draws: Vec::with_capacity(INITIAL_OBJECT_SLOTS),
        })
    }

    /// Submits the recorded frame with an optional UI overlay and presents it
    ///
    /// Returns `false` when no surface texture was available; the recorded
    /// draws are dropped and the next frame starts over.
    pub fn present<F>(&mut self, ui_callback: Option<F>) -> bool
    where
        F: FnOnce(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView),
    {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return false;
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("timed out acquiring surface texture, skipping frame");
                return false;
            }
            Err(e) => {
                log::error!("failed to acquire surface texture: {}", e);
                return false;
            }
        };

        self.upload_uniforms();
        for command in &self.draws {
            self.pipeline_manager.get_pipeline(command.key);
        }

        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_bind_group(0, &self.frame_bind_group, &[]);

            for command in &self.draws {
                let Some(pipeline) = self.pipeline_manager.cached(command.key) else {
                    continue;
                };
                render_pass.set_pipeline(pipeline);
                render_pass.set_bind_group(
                    1,
                    &self.object_bind_group,
                    &[self.object_buffer.offset(command.slot)],
                );
                self.meshes
                    .get(command.shape)
                    .draw(&mut render_pass, command.mode);
            }
        }

        if let Some(ui_callback) = ui_callback {
            ui_callback(
                &self.device,
                &self.queue,
                &mut encoder,
                &surface_texture_view,
            );
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        true
    }

    fn upload_uniforms(&mut self) {
        self.frame_buffer
            .update_content(&self.queue, &self.mirror.frame);

        if self
            .object_buffer
            .write_slots(&self.device, &self.queue, &self.object_slots)
        {
            self.object_bind_group =
                create_object_bind_group(&self.device, &self.object_layout, &self.object_buffer);
        }
    }

    /// Resizes the surface and recreates the depth buffer
    ///
    /// Zero-sized requests (minimized windows) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);

        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Used for creating compatible render targets and UI systems
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.format
    }
}

fn create_object_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    buffer: &DynamicUniformBuffer<ObjectUniforms>,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Object Bind Group"),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.binding_resource(),
        }],
    })
}

impl ShadingStage for RenderEngine {
    fn set_uniform(
        &mut self,
        name: &str,
        value: UniformValue,
    ) -> std::result::Result<(), ShadingError> {
        self.mirror.set(name, value)
    }
}

impl RenderContext for RenderEngine {
    fn configure(&mut self, options: &RenderOptions) {
        self.options = *options;
    }

    fn clear(&mut self) {
        self.object_slots.clear();
        self.draws.clear();
    }

    fn draw(&mut self, shape: Shape, mode: DrawMode) {
        let slot = self.object_slots.len();
        self.object_slots.push(self.mirror.object);
        self.draws.push(DrawCommand {
            shape,
            mode,
            key: PipelineKey::new(mode, &self.options),
            slot,
        });
    }
}
