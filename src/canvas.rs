//! GPU implementation of [`Canvas`].
//!
//! A [`GpuCanvas`] queues commands until `render` is called and then encodes
//! them into a single render pass:
//!
//! - leading whole-area clears become the pass' load operations
//! - any other clear draws a scissored full-screen triangle
//! - `Draw` draws the card with the painter's card pipeline
//!
//! After submission a window canvas presents its surface texture, a render
//! target canvas regenerates its mip chain.

use std::iter;

use wgpu::util::DeviceExt;

use crate::{
    data_structures::{object::ObjectState, rect::Rect},
    pipelines::{
        card::{CardLayouts, CardModel, mk_card_pipeline},
        clear::{ClearInstance, ClearPipelines},
        mipmap::MipmapGenerator,
    },
    render::{Canvas, Command},
};

/// Sample count of every attachment in this crate.
pub const SAMPLE_COUNT: u32 = 1;

/// Pipelines for one colour format.
#[derive(Debug)]
pub struct Painter {
    clear: ClearPipelines,
    card: Option<wgpu::RenderPipeline>,
}

impl Painter {
    /// Painter that can only clear.
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        Self {
            clear: ClearPipelines::new(device, format),
            card: None,
        }
    }

    /// Painter that can clear and draw objects with the card shader.
    pub fn with_card(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        layouts: &CardLayouts,
        state: ObjectState,
    ) -> Self {
        Self {
            clear: ClearPipelines::new(device, format),
            card: Some(mk_card_pipeline(device, layouts, format, state, SAMPLE_COUNT)),
        }
    }
}

/// What happens after the queued commands are submitted.
pub enum Finish<'a> {
    Present(Option<wgpu::SurfaceTexture>),
    Mipmaps {
        generator: &'a MipmapGenerator,
        texture: &'a wgpu::Texture,
    },
}

pub struct GpuCanvas<'a> {
    device: &'a wgpu::Device,
    queue: &'a wgpu::Queue,
    painter: &'a Painter,
    color: wgpu::TextureView,
    depth: &'a wgpu::TextureView,
    bounds: Rect,
    card: Option<&'a CardModel>,
    finish: Finish<'a>,
    pending: Vec<Command>,
}

impl<'a> GpuCanvas<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        painter: &'a Painter,
        color: wgpu::TextureView,
        depth: &'a wgpu::TextureView,
        bounds: Rect,
        card: Option<&'a CardModel>,
        finish: Finish<'a>,
    ) -> Self {
        Self {
            device,
            queue,
            painter,
            color,
            depth,
            bounds,
            card,
            finish,
            pending: Vec::new(),
        }
    }

    fn encode(&self, encoder: &mut wgpu::CommandEncoder, commands: &[Command]) {
        let mut colour_load = wgpu::LoadOp::Load;
        let mut depth_load = wgpu::LoadOp::Load;
        let mut rest = commands;
        while let Some((first, tail)) = rest.split_first() {
            match *first {
                Command::Clear(rect, colour) if rect.covers(self.bounds) => {
                    colour_load = wgpu::LoadOp::Clear(colour);
                }
                Command::ClearDepth(rect, depth) if rect.covers(self.bounds) => {
                    depth_load = wgpu::LoadOp::Clear(depth.clamp(0.0, 1.0));
                }
                _ => break,
            }
            rest = tail;
        }

        let instances: Vec<ClearInstance> = rest
            .iter()
            .filter_map(|command| match *command {
                Command::Clear(_, colour) => Some(ClearInstance::colour(colour)),
                Command::ClearDepth(_, depth) => Some(ClearInstance::depth(depth)),
                _ => None,
            })
            .collect();
        let instance_buffer = (!instances.is_empty()).then(|| {
            self.device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Clear Instance Buffer"),
                    contents: bytemuck::cast_slice(&instances),
                    usage: wgpu::BufferUsages::VERTEX,
                })
        });

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Canvas Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &self.color,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: colour_load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: self.depth,
                depth_ops: Some(wgpu::Operations {
                    load: depth_load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
            multiview_mask: None,
        });

        let mut instance = 0u32;
        for command in rest {
            match *command {
                Command::Clear(rect, _) | Command::ClearDepth(rect, _) => {
                    let index = instance;
                    instance += 1;
                    let (Some(scissor), Some(buffer)) = (rect.resolve(self.bounds), &instance_buffer)
                    else {
                        continue;
                    };
                    let pipeline = match command {
                        Command::Clear(..) => &self.painter.clear.colour,
                        _ => &self.painter.clear.depth,
                    };
                    render_pass.set_pipeline(pipeline);
                    render_pass.set_vertex_buffer(0, buffer.slice(..));
                    set_scissor(&mut render_pass, scissor);
                    render_pass.draw(0..3, index..index + 1);
                }
                Command::Draw(rect) => {
                    let (Some(card), Some(pipeline)) = (self.card, &self.painter.card) else {
                        log::warn!("draw on a canvas without an object or card pipeline");
                        continue;
                    };
                    let Some(scissor) = rect.resolve(self.bounds) else {
                        continue;
                    };
                    render_pass.set_pipeline(pipeline);
                    set_scissor(&mut render_pass, scissor);
                    card.draw(&mut render_pass);
                }
                // `replay` turns presents into `render` calls
                Command::Present => (),
            }
        }
    }
}

fn set_scissor(render_pass: &mut wgpu::RenderPass<'_>, rect: Rect) {
    render_pass.set_scissor_rect(rect.min[0], rect.min[1], rect.width(), rect.height());
}

impl Canvas for GpuCanvas<'_> {
    type Error = anyhow::Error;

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn clear(&mut self, rect: Rect, colour: wgpu::Color) {
        self.pending.push(Command::Clear(rect, colour));
    }

    fn clear_depth(&mut self, rect: Rect, depth: f32) {
        self.pending.push(Command::ClearDepth(rect, depth));
    }

    fn draw(&mut self, rect: Rect) {
        self.pending.push(Command::Draw(rect));
    }

    fn render(&mut self) -> anyhow::Result<()> {
        if let Finish::Present(None) = self.finish {
            anyhow::bail!("frame was already presented");
        }
        let commands = std::mem::take(&mut self.pending);
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Canvas Encoder"),
            });
        self.encode(&mut encoder, &commands);
        if let Finish::Mipmaps { generator, texture } = &self.finish {
            generator.encode(self.device, &mut encoder, texture);
        }
        self.queue.submit(iter::once(encoder.finish()));

        if let Finish::Present(output) = &mut self.finish {
            if let Some(output) = output.take() {
                output.present();
            }
        }
        Ok(())
    }
}
