//! Scissored clears.
//!
//! Load-op clears always hit the whole attachment. Clearing a sub-rectangle
//! draws a full-screen triangle under a scissor rect instead: the colour
//! pipeline writes colour only, the depth pipeline writes depth only.

use crate::{
    data_structures::texture::Texture,
    pipelines::{PipelineState, mk_render_pipeline},
};

/// Per-clear data, one instance per cleared rectangle.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ClearInstance {
    pub colour: [f32; 4],
    pub depth: f32,
}

impl ClearInstance {
    const ATTRIBS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x4, 1 => Float32];

    pub fn colour(colour: wgpu::Color) -> Self {
        Self {
            colour: [
                colour.r as f32,
                colour.g as f32,
                colour.b as f32,
                colour.a as f32,
            ],
            depth: 0.0,
        }
    }

    pub fn depth(depth: f32) -> Self {
        Self {
            colour: [0.0; 4],
            depth: depth.clamp(0.0, 1.0),
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ClearInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBS,
        }
    }
}

#[derive(Debug)]
pub struct ClearPipelines {
    pub colour: wgpu::RenderPipeline,
    pub depth: wgpu::RenderPipeline,
}

impl ClearPipelines {
    pub fn new(device: &wgpu::Device, color_format: wgpu::TextureFormat) -> Self {
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Clear Pipeline Layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });
        let shader = || wgpu::ShaderModuleDescriptor {
            label: Some("Clear Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("clear.wgsl").into()),
        };
        let depth_stencil = |write: bool| wgpu::DepthStencilState {
            format: Texture::DEPTH_FORMAT,
            depth_write_enabled: write,
            depth_compare: wgpu::CompareFunction::Always,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        };

        let colour = mk_render_pipeline(
            device,
            &layout,
            PipelineState {
                label: "Clear Colour Pipeline",
                color_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
                cull_mode: None,
                depth_stencil: Some(depth_stencil(false)),
                multisample: wgpu::MultisampleState::default(),
            },
            &[ClearInstance::desc()],
            shader(),
        );
        let depth = mk_render_pipeline(
            device,
            &layout,
            PipelineState {
                label: "Clear Depth Pipeline",
                color_format,
                blend: None,
                write_mask: wgpu::ColorWrites::empty(),
                cull_mode: None,
                depth_stencil: Some(depth_stencil(true)),
                multisample: wgpu::MultisampleState::default(),
            },
            &[ClearInstance::desc()],
            shader(),
        );

        Self { colour, depth }
    }
}
