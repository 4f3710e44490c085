use web_sys as web;

use crate::core::scene::{SceneFrame, SceneRenderer, Star};
use crate::core::VizError;
use crate::dom;

mod helpers;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct StarUniforms {
    view_proj: [[f32; 4]; 4],
    cam_right: [f32; 4],
    cam_up: [f32; 4],
    light: [f32; 4],
    params: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct StarInstance {
    pos_size: [f32; 4],
    tint: [f32; 4],
}

impl From<&Star> for StarInstance {
    fn from(s: &Star) -> Self {
        Self {
            pos_size: [s.position.x, s.position.y, s.position.z, s.size],
            tint: [s.tint[0], s.tint[1], s.tint[2], 1.0],
        }
    }
}

const STAR_ATTRIBUTES: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x4, 1 => Float32x4];

/// WebGPU starfield renderer bound to its own canvas layer.
pub struct GpuState {
    canvas: web::HtmlCanvasElement,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    instance_buffer: wgpu::Buffer,
    instance_capacity: usize,
    instances: Vec<StarInstance>,
    clear_color: wgpu::Color,
    released: bool,
}

impl GpuState {
    pub async fn new(canvas: web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("stars_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::STARS_WGSL.into()),
        });
        let bgl = helpers::uniform_bind_group_layout(&device, "stars_bgl");
        let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("stars_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let pipeline = helpers::make_instanced_pipeline(
            &device,
            &pl,
            &shader,
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<StarInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &STAR_ATTRIBUTES,
            },
            format,
        );
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("stars_uniforms"),
            size: std::mem::size_of::<StarUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("stars_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        let instance_capacity = 1024;
        let instance_buffer = helpers::create_instance_buffer(
            &device,
            "stars_instances",
            (instance_capacity * std::mem::size_of::<StarInstance>()) as u64,
        );

        log::info!("[gpu] star renderer ready ({}x{} {:?})", width, height, format);
        Ok(Self {
            canvas,
            surface,
            device,
            queue,
            config,
            pipeline,
            uniform_buffer,
            bind_group,
            instance_buffer,
            instance_capacity,
            instances: Vec::with_capacity(instance_capacity),
            clear_color: wgpu::Color {
                r: 0.004,
                g: 0.004,
                b: 0.012,
                a: 1.0,
            },
            released: false,
        })
    }

    fn ensure_instance_capacity(&mut self, count: usize) {
        if count <= self.instance_capacity {
            return;
        }
        self.instance_capacity = count.next_power_of_two();
        self.instance_buffer = helpers::create_instance_buffer(
            &self.device,
            "stars_instances",
            (self.instance_capacity * std::mem::size_of::<StarInstance>()) as u64,
        );
    }
}

impl SceneRenderer for GpuState {
    fn resize(&mut self, width: u32, height: u32) {
        if self.released {
            return;
        }
        let (width, height) = (width.max(1), height.max(1));
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        if width == self.config.width && height == self.config.height {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    fn render(&mut self, frame: &SceneFrame<'_>) -> Result<(), VizError> {
        if self.released {
            return Ok(());
        }
        let inv_view = frame.view.inverse();
        let dir = frame.light.direction.normalize_or_zero();
        let uniforms = StarUniforms {
            view_proj: frame.view_proj.to_cols_array_2d(),
            cam_right: inv_view.x_axis.truncate().extend(0.0).to_array(),
            cam_up: inv_view.y_axis.truncate().extend(0.0).to_array(),
            light: [dir.x, dir.y, dir.z, frame.light.intensity],
            params: [
                frame.time,
                self.config.width as f32 / self.config.height as f32,
                0.0,
                0.0,
            ],
        };
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        self.instances.clear();
        self.instances.extend(frame.stars.iter().map(StarInstance::from));
        self.ensure_instance_capacity(self.instances.len());
        if !self.instances.is_empty() {
            self.queue
                .write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&self.instances));
        }

        let surface_tex = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return Err(VizError::Render("surface lost; reconfigured".into()));
            }
            Err(e) => return Err(VizError::Render(format!("{:?}", e))),
        };
        let view = surface_tex
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("stars_encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("stars_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &self.bind_group, &[]);
            rpass.set_vertex_buffer(0, self.instance_buffer.slice(..));
            rpass.draw(0..6, 0..self.instances.len() as u32);
        }
        self.queue.submit(Some(encoder.finish()));
        surface_tex.present();
        Ok(())
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.instance_buffer.destroy();
        self.uniform_buffer.destroy();
        dom::remove_canvas(&self.canvas);
        log::debug!("[gpu] star renderer released");
    }
}

impl Drop for GpuState {
    fn drop(&mut self) {
        self.release();
    }
}
