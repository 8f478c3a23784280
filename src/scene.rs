//! The demo scene: a striped render target shown on a spinning card.
//!
//! [`RenderTarget`] owns the offscreen colour and depth textures plus the
//! pipelines that paint into them. [`Scene`] builds the target, paints the
//! stripes once, and renders the window frame by frame.

use std::sync::Arc;

use anyhow::Context as _;
use futures_intrusive::channel::shared::oneshot_channel;
use instant::Duration;

use crate::{
    camera::{self, Camera, Projection},
    canvas::{Finish, GpuCanvas, Painter, SAMPLE_COUNT},
    clock::FrameClock,
    config::DemoConfig,
    context::Context,
    data_structures::{
        mesh::Mesh,
        object::{ObjectUniform, Transform},
        rect::Rect,
        texture::Texture,
    },
    events::SharedScene,
    input::InputState,
    pipelines::{
        card::{CardLayouts, CardModel},
        mipmap::MipmapGenerator,
    },
    render::{frame_commands, replay, target_commands},
};

/// Offscreen canvas whose colour texture can be sampled once rendered.
#[derive(Debug)]
pub struct RenderTarget {
    pub color: Texture,
    depth: Texture,
    painter: Painter,
    mipmaps: MipmapGenerator,
}

impl RenderTarget {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat, size: [u32; 2]) -> Self {
        Self::with_painter(device, format, size, Painter::new(device, format))
    }

    /// Target whose canvas paints with `painter`, e.g. one that can draw cards.
    pub fn with_painter(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        size: [u32; 2],
        painter: Painter,
    ) -> Self {
        let color = Texture::create_render_target(device, format, size, "render target");
        let depth = Texture::create_depth_texture(device, color.size(), "render target depth");
        Self {
            color,
            depth,
            painter,
            mipmaps: MipmapGenerator::new(device, format),
        }
    }

    pub fn bounds(&self) -> Rect {
        let [width, height] = self.color.size();
        Rect::from_size(width, height)
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.color.texture.format()
    }

    /// Canvas drawing into mip level 0; rendering it refreshes the mip chain.
    ///
    /// `Draw` commands need both `card` and a painter with a card pipeline.
    pub fn canvas<'a>(
        &'a self,
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        card: Option<&'a CardModel>,
    ) -> GpuCanvas<'a> {
        GpuCanvas::new(
            device,
            queue,
            &self.painter,
            self.color.attachment_view(),
            &self.depth.view,
            self.bounds(),
            card,
            Finish::Mipmaps {
                generator: &self.mipmaps,
                texture: &self.color.texture,
            },
        )
    }

    /// Copy mip level 0 back to the CPU.
    ///
    /// Only 8-bit RGBA / BGRA targets are supported; BGRA is swizzled to RGBA.
    pub async fn read_pixels(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
    ) -> anyhow::Result<image::RgbaImage> {
        let format = self.format();
        let bgra = match format {
            wgpu::TextureFormat::Rgba8Unorm | wgpu::TextureFormat::Rgba8UnormSrgb => false,
            wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Bgra8UnormSrgb => true,
            other => anyhow::bail!("cannot read back {:?} render targets", other),
        };
        let [width, height] = self.color.size();
        let unpadded_row = 4 * width;
        let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
        let padded_row = unpadded_row.div_ceil(align) * align;

        let output_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Render Target Readback"),
            size: (padded_row * height) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Readback Encoder"),
        });
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                aspect: wgpu::TextureAspect::All,
                texture: &self.color.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &output_buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_row),
                    rows_per_image: Some(height),
                },
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
        queue.submit(std::iter::once(encoder.finish()));

        let (tx, rx) = oneshot_channel();
        let buffer_slice = output_buffer.slice(..);
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            tx.send(result).ok();
        });
        device.poll(wgpu::PollType::Wait {
            submission_index: None,
            timeout: Some(Duration::from_secs(3)),
        })?;
        rx.receive()
            .await
            .context("map callback dropped")?
            .context("failed to map readback buffer")?;

        let data = buffer_slice.get_mapped_range();
        let mut pixels = Vec::with_capacity((unpadded_row * height) as usize);
        for row in data.chunks(padded_row as usize).take(height as usize) {
            pixels.extend_from_slice(&row[..unpadded_row as usize]);
        }
        drop(data);
        output_buffer.unmap();

        if bgra {
            pixels.chunks_exact_mut(4).for_each(|px| px.swap(0, 2));
        }
        image::RgbaImage::from_raw(width, height, pixels).context("readback size mismatch")
    }
}

pub struct Scene {
    config: DemoConfig,
    camera: Camera,
    target: RenderTarget,
    painter: Painter,
    card: CardModel,
    shared: Arc<SharedScene>,
    clock: FrameClock,
}

impl Scene {
    /// Build the scene and paint the render target once.
    pub fn new(ctx: &Context, config: DemoConfig) -> anyhow::Result<Self> {
        let cam = &config.camera;
        let camera = Camera::new(cam.position, cam.forward, cam.up);
        let projection = Projection::new(
            ctx.config.width,
            ctx.config.height,
            cam.fovy,
            cam.znear,
            cam.zfar,
        );

        let target = RenderTarget::new(&ctx.device, ctx.target_format, config.target.size);
        let layouts = CardLayouts::new(&ctx.device);
        let painter = Painter::with_card(&ctx.device, ctx.config.format, &layouts, config.card);
        let sampler = target
            .color
            .sampler
            .as_ref()
            .context("render target has no sampler")?;
        let card = CardModel::new(
            &ctx.device,
            &layouts,
            Mesh::card(&ctx.device),
            &target.color,
            sampler,
            config.card,
        );

        let shared = Arc::new(SharedScene::new(Transform::default(), projection));
        let scene = Self {
            config,
            camera,
            target,
            painter,
            card,
            shared,
            clock: FrameClock::new(),
        };
        scene.paint_target(&ctx.device, &ctx.queue)?;
        Ok(scene)
    }

    pub fn shared(&self) -> Arc<SharedScene> {
        self.shared.clone()
    }

    pub fn paint_target(&self, device: &wgpu::Device, queue: &wgpu::Queue) -> anyhow::Result<()> {
        let commands = target_commands(&self.config, self.target.bounds());
        log::debug!("painting render target with {} commands", commands.len());
        replay(&mut self.target.canvas(device, queue, None), &commands)
    }

    /// Advance the animation and render one frame into the window.
    ///
    /// Surface acquisition failures are returned as `wgpu::SurfaceError`
    /// inside the `anyhow::Error`.
    pub fn render_frame(&mut self, ctx: &Context, input: &InputState) -> anyhow::Result<()> {
        let dt = self.clock.tick();
        let model = {
            let mut card = self.shared.card();
            card.spin(self.config.spin_speed, dt);
            card.to_matrix()
        };
        let projection = *self.shared.projection();
        let mvp = camera::mvp(&projection, &self.camera, model);
        let binary_alpha = self.card.state.alpha_mode.binary_alpha(SAMPLE_COUNT);
        self.card
            .write_uniform(&ctx.queue, ObjectUniform::new(mvp, binary_alpha));

        let output = ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut canvas = GpuCanvas::new(
            &ctx.device,
            &ctx.queue,
            &self.painter,
            view,
            &ctx.depth_texture.view,
            ctx.bounds(),
            Some(&self.card),
            Finish::Present(Some(output)),
        );
        replay(&mut canvas, &frame_commands(&self.config, input))
    }
}

