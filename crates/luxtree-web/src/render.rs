use crate::constants::*;
use glam::{Mat4, Vec3};
use luxtree_core::{InstanceData, Scene, ShapeCategory};
use web_sys as web;

mod helpers;
mod mesh;
mod post;
mod targets;

use helpers::{DEPTH_FORMAT, HDR_FORMAT};
use mesh::Mesh;
use post::{PostBindings, PostPass, PostResources, PostUniforms};
use targets::RenderTargets;

pub static PARTICLES_WGSL: &str = include_str!("../shaders/particles.wgsl");
pub static POST_WGSL: &str = include_str!("../shaders/post.wgsl");

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct CameraUniforms {
    view_proj: [[f32; 4]; 4],
    eye: [f32; 4],
    // x = time, y = ambient strength
    params: [f32; 4],
}

/// Surface response of one draw slot.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct MaterialUniforms {
    metallic: f32,
    roughness: f32,
    clearcoat: f32,
    // 1.0 draws pure emissive sparkles
    unlit: f32,
}

impl MaterialUniforms {
    const GOLD: Self = Self {
        metallic: 1.0,
        roughness: 0.15,
        clearcoat: 0.0,
        unlit: 0.0,
    };
    const EMERALD: Self = Self {
        metallic: 0.1,
        roughness: 0.2,
        clearcoat: 1.0,
        unlit: 0.0,
    };
    const DUST: Self = Self {
        metallic: 0.0,
        roughness: 1.0,
        clearcoat: 0.0,
        unlit: 1.0,
    };

    fn for_shape(shape: ShapeCategory) -> Self {
        match shape {
            ShapeCategory::Cube => Self::GOLD,
            ShapeCategory::Sphere => Self::EMERALD,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MeshKind {
    Cube,
    Sphere,
    Mote,
}

/// Growable instance buffer plus the material it is drawn with.
struct InstanceSlot {
    mesh: MeshKind,
    buffer: wgpu::Buffer,
    capacity: usize,
    count: u32,
    material_bind_group: wgpu::BindGroup,
}

impl InstanceSlot {
    fn new(
        device: &wgpu::Device,
        material_bgl: &wgpu::BindGroupLayout,
        mesh: MeshKind,
        material: MaterialUniforms,
        capacity: usize,
    ) -> Self {
        use wgpu::util::DeviceExt;
        let material_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("material_uniforms"),
            contents: bytemuck::bytes_of(&material),
            usage: wgpu::BufferUsages::UNIFORM,
        });
        let material_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("material_bg"),
            layout: material_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: material_buffer.as_entire_binding(),
            }],
        });
        Self {
            mesh,
            buffer: Self::alloc(device, capacity),
            capacity: capacity.max(1),
            count: 0,
            material_bind_group,
        }
    }

    fn alloc(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instances"),
            size: (capacity.max(1) * std::mem::size_of::<InstanceData>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, instances: &[InstanceData]) {
        if instances.len() > self.capacity {
            self.capacity = instances.len().next_power_of_two();
            self.buffer = Self::alloc(device, self.capacity);
        }
        if !instances.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(instances));
        }
        self.count = instances.len() as u32;
    }
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    particle_pipeline: wgpu::RenderPipeline,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    material_bgl: wgpu::BindGroupLayout,
    cube_mesh: Mesh,
    sphere_mesh: Mesh,
    mote_mesh: Mesh,
    group_slots: Vec<InstanceSlot>,
    dust_slot: InstanceSlot,

    targets: RenderTargets,
    post: PostResources,
    post_bindings: PostBindings,

    width: u32,
    height: u32,
    view_proj: Mat4,
    eye: Vec3,
    time_accum: f32,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
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
                    // Default limits on web avoid passing unknown fields to older WebGPU impls
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
        log::info!("[gpu] surface {}x{} {:?}", width, height, format);

        let targets = RenderTargets::new(&device, width, height);

        // Particle pass
        let particle_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("particles_shader"),
            source: wgpu::ShaderSource::Wgsl(PARTICLES_WGSL.into()),
        });
        let camera_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("camera_bgl"),
            entries: &[helpers::uniform_entry(
                0,
                wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            )],
        });
        let material_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("material_bgl"),
            entries: &[helpers::uniform_entry(0, wgpu::ShaderStages::FRAGMENT)],
        });
        let camera_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("camera_uniforms"),
            size: std::mem::size_of::<CameraUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("camera_bg"),
            layout: &camera_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });
        let particle_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("particle_pl"),
            bind_group_layouts: &[&camera_bgl, &material_bgl],
            push_constant_ranges: &[],
        });
        let instance_attrs =
            wgpu::vertex_attr_array![2 => Float32x3, 3 => Float32, 4 => Float32x4, 5 => Float32x4];
        let particle_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("particle_pipeline"),
            layout: Some(&particle_pl),
            vertex: wgpu::VertexState {
                module: &particle_shader,
                entry_point: Some("vs_main"),
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<mesh::Vertex>() as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &mesh::VERTEX_ATTRS,
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<InstanceData>() as u64,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &instance_attrs,
                    },
                ],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &particle_shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: HDR_FORMAT,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        let (v, i) = mesh::cube(CUBE_EDGE);
        let cube_mesh = Mesh::upload(&device, "cube_mesh", &v, &i);
        let (v, i) = mesh::uv_sphere(SPHERE_RADIUS, SPHERE_STACKS, SPHERE_SLICES);
        let sphere_mesh = Mesh::upload(&device, "sphere_mesh", &v, &i);
        let (v, i) = mesh::uv_sphere(1.0, DUST_STACKS, DUST_SLICES);
        let mote_mesh = Mesh::upload(&device, "mote_mesh", &v, &i);
        let dust_slot = InstanceSlot::new(&device, &material_bgl, MeshKind::Mote, MaterialUniforms::DUST, 0);

        // Post shader + pipelines
        let post_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(POST_WGSL.into()),
        });
        let post = post::create_post_resources(&device, &post_shader, format);
        let post_bindings = post.bindings(&device, &targets);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            particle_pipeline,
            camera_buffer,
            camera_bind_group,
            material_bgl,
            cube_mesh,
            sphere_mesh,
            mote_mesh,
            group_slots: Vec::new(),
            dust_slot,
            targets,
            post,
            post_bindings,
            width,
            height,
            view_proj: Mat4::IDENTITY,
            eye: Vec3::Z,
            time_accum: 0.0,
        })
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    pub fn set_camera(&mut self, view_proj: Mat4, eye: Vec3) {
        self.view_proj = view_proj;
        self.eye = eye;
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.targets.recreate(&self.device, width, height);
            self.post_bindings = self.post.bindings(&self.device, &self.targets);
            log::info!("[gpu] resized to {}x{}", width, height);
        }
    }

    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Upload this frame's instances. Groups get one slot each, created lazily.
    fn upload_scene(&mut self, scene: &Scene) {
        for (i, group) in scene.groups().iter().enumerate() {
            if self.group_slots.len() <= i {
                let mesh = match group.config.shape {
                    ShapeCategory::Cube => MeshKind::Cube,
                    ShapeCategory::Sphere => MeshKind::Sphere,
                };
                let material = MaterialUniforms::for_shape(group.config.shape);
                self.group_slots.push(InstanceSlot::new(
                    &self.device,
                    &self.material_bgl,
                    mesh,
                    material,
                    group.len(),
                ));
            }
            self.group_slots[i].upload(&self.device, &self.queue, group.instances());
        }
        self.group_slots.truncate(scene.groups().len());
        self.dust_slot
            .upload(&self.device, &self.queue, scene.dust().instances());
    }

    fn mesh(&self, kind: MeshKind) -> &Mesh {
        match kind {
            MeshKind::Cube => &self.cube_mesh,
            MeshKind::Sphere => &self.sphere_mesh,
            MeshKind::Mote => &self.mote_mesh,
        }
    }

    fn post_uniforms(&self, blur_dir: [f32; 2]) -> PostUniforms {
        PostUniforms {
            resolution: self.targets.bloom_resolution(),
            time: self.time_accum,
            exposure: EXPOSURE,
            blur_dir,
            bloom_strength: BLOOM_STRENGTH,
            threshold: BLOOM_THRESHOLD,
            vignette_offset: VIGNETTE_OFFSET,
            vignette_darkness: VIGNETTE_DARKNESS,
            chroma_offset: CHROMA_OFFSET,
            grain: GRAIN_OPACITY,
        }
    }

    pub fn render(&mut self, scene: &Scene, dt_sec: f32) -> Result<(), wgpu::SurfaceError> {
        if dt_sec.is_finite() && dt_sec > 0.0 {
            self.time_accum += dt_sec;
        }
        self.upload_scene(scene);

        let cam = CameraUniforms {
            view_proj: self.view_proj.to_cols_array_2d(),
            eye: self.eye.extend(1.0).to_array(),
            params: [self.time_accum, 0.2, 0.0, 0.0],
        };
        self.queue
            .write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(&cam));
        for (pass, dir) in [
            (PostPass::Bright, [0.0, 0.0]),
            (PostPass::BlurH, [1.0, 0.0]),
            (PostPass::BlurV, [0.0, 1.0]),
            (PostPass::Composite, [0.0, 0.0]),
        ] {
            let mut u = self.post_uniforms(dir);
            if pass == PostPass::Composite {
                u.resolution = [self.width as f32, self.height as f32];
            }
            self.post.write(&self.queue, pass, &u);
        }

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });

        // Pass 1: particles -> HDR
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.hdr_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            if scene.is_started() {
                rpass.set_pipeline(&self.particle_pipeline);
                rpass.set_bind_group(0, &self.camera_bind_group, &[]);
                for slot in self.group_slots.iter().chain(std::iter::once(&self.dust_slot)) {
                    if slot.count == 0 {
                        continue;
                    }
                    let mesh = self.mesh(slot.mesh);
                    rpass.set_bind_group(1, &slot.material_bind_group, &[]);
                    rpass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                    rpass.set_vertex_buffer(1, slot.buffer.slice(..));
                    rpass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                    rpass.draw_indexed(0..mesh.index_count, 0, 0..slot.count);
                }
            }
        }

        // Pass 2: bright pass -> bloom_a
        post::blit(
            &mut encoder,
            "bright_pass",
            &self.targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.post.bright_pipeline,
            &self.post_bindings.bright,
            None,
        );
        // Pass 3: blur horizontal bloom_a -> bloom_b
        post::blit(
            &mut encoder,
            "blur_h",
            &self.targets.bloom_b_view,
            wgpu::Color::BLACK,
            &self.post.blur_pipeline,
            &self.post_bindings.blur_h,
            None,
        );
        // Pass 4: blur vertical bloom_b -> bloom_a
        post::blit(
            &mut encoder,
            "blur_v",
            &self.targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.post.blur_pipeline,
            &self.post_bindings.blur_v,
            None,
        );
        // Pass 5: composite to swapchain
        post::blit(
            &mut encoder,
            "composite",
            &view,
            CLEAR_COLOR,
            &self.post.composite_pipeline,
            &self.post_bindings.composite,
            Some(&self.post_bindings.bloom),
        );

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
