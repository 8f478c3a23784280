use cgmath::{Matrix4, SquareMatrix};
use wgpu::util::DeviceExt;

use crate::{
    data_structures::{
        mesh::{Mesh, MeshVertex},
        object::{ObjectState, ObjectUniform},
        texture::Texture,
    },
    pipelines::{PipelineState, depth_less, mk_render_pipeline, texture_bind_group, texture_layout},
};

/// Bind group layouts of the card shader: texture at group 0, object uniform
/// at group 1.
#[derive(Debug)]
pub struct CardLayouts {
    pub texture: wgpu::BindGroupLayout,
    pub object: wgpu::BindGroupLayout,
}

impl CardLayouts {
    pub fn new(device: &wgpu::Device) -> Self {
        let object = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
            label: Some("object_bind_group_layout"),
        });
        Self {
            texture: texture_layout(device, "card_texture_bind_group_layout"),
            object,
        }
    }
}

pub fn mk_card_pipeline(
    device: &wgpu::Device,
    layouts: &CardLayouts,
    color_format: wgpu::TextureFormat,
    object: ObjectState,
    sample_count: u32,
) -> wgpu::RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Card Pipeline Layout"),
        bind_group_layouts: &[&layouts.texture, &layouts.object],
        immediate_size: 0,
    });

    let shader = wgpu::ShaderModuleDescriptor {
        label: Some("Card Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("card.wgsl").into()),
    };

    mk_render_pipeline(
        device,
        &layout,
        PipelineState {
            label: "Card Pipeline",
            color_format,
            blend: object.alpha_mode.blend_state(),
            write_mask: wgpu::ColorWrites::ALL,
            cull_mode: object.face_culling.cull_mode(),
            depth_stencil: Some(depth_less(Texture::DEPTH_FORMAT)),
            multisample: wgpu::MultisampleState {
                count: sample_count,
                mask: !0,
                alpha_to_coverage_enabled: object.alpha_mode.alpha_to_coverage(sample_count),
            },
        },
        &[MeshVertex::desc()],
        shader,
    )
}

/// GPU side of a drawable object: mesh, texture binding and uniform block.
#[derive(Debug)]
pub struct CardModel {
    pub mesh: Mesh,
    pub state: ObjectState,
    pub texture_bind_group: wgpu::BindGroup,
    pub uniform_buffer: wgpu::Buffer,
    pub object_bind_group: wgpu::BindGroup,
}

impl CardModel {
    pub fn new(
        device: &wgpu::Device,
        layouts: &CardLayouts,
        mesh: Mesh,
        texture: &Texture,
        sampler: &wgpu::Sampler,
        state: ObjectState,
    ) -> Self {
        let texture_bind_group = texture_bind_group(
            device,
            &layouts.texture,
            &texture.view,
            sampler,
            "card_texture_bind_group",
        );
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Object Buffer"),
            contents: bytemuck::cast_slice(&[ObjectUniform::new(Matrix4::identity(), false)]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let object_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &layouts.object,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
            label: Some("object_bind_group"),
        });
        Self {
            mesh,
            state,
            texture_bind_group,
            uniform_buffer,
            object_bind_group,
        }
    }

    pub fn write_uniform(&self, queue: &wgpu::Queue, uniform: ObjectUniform) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniform]));
    }

    pub fn draw<'pass>(&self, render_pass: &mut wgpu::RenderPass<'pass>) {
        render_pass.set_bind_group(0, &self.texture_bind_group, &[]);
        render_pass.set_bind_group(1, &self.object_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.mesh.vertex_buffer.slice(..));
        render_pass.draw(0..self.mesh.num_vertices, 0..1);
    }
}
