use std::sync::Arc;

use anyhow::Context as _;
use winit::window::Window;

use crate::data_structures::{
    rect::Rect,
    texture::{self, Precision, Texture},
};

/// Error shown when no colour format can be rendered into and sampled.
pub const NO_RENDER_TO_TEXTURE: &str = "Graphic card doesn't support render to texture";

/// GPU device, window surface and the format chosen for render targets.
#[derive(Debug)]
pub struct Context {
    window: Arc<Window>,
    pub(crate) depth_texture: Texture,
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub target_format: wgpu::TextureFormat,
    is_surface_configured: bool,
}

impl Context {
    pub async fn new(window: Arc<Window>, precision: Precision) -> anyhow::Result<Self> {
        let size = window.inner_size();

        log::info!("WGPU setup");
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("failed to create wgpu surface")?;

        let (adapter, device, queue) = request_device(&instance, Some(&surface)).await?;
        let target_format = choose_target_format(&adapter, precision)?;
        log::info!("render targets use {:?}", target_format);

        let surface_caps = surface.get_capabilities(&adapter);
        // Clear colours are given in linear space; an sRGB surface keeps them
        // consistent with the render target.
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .context("surface reports no formats")?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        let depth_texture =
            Texture::create_depth_texture(&device, [config.width, config.height], "depth_texture");

        let mut ctx = Self {
            window,
            depth_texture,
            surface,
            device,
            queue,
            config,
            target_format,
            is_surface_configured: false,
        };
        ctx.resize(size.width, size.height);
        Ok(ctx)
    }

    /// Reconfigure the surface and depth buffer. Zero sized requests are
    /// ignored; rendering pauses until a real size arrives.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            self.is_surface_configured = false;
            return false;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_texture =
            Texture::create_depth_texture(&self.device, [width, height], "depth_texture");
        self.is_surface_configured = true;
        true
    }

    pub fn is_surface_configured(&self) -> bool {
        self.is_surface_configured
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.config.width, self.config.height)
    }

    pub fn window(&self) -> &Window {
        &self.window
    }
}

/// Pick an adapter and open a device on it.
///
/// Without a surface the adapter is chosen for offscreen use only.
pub async fn request_device(
    instance: &wgpu::Instance,
    surface: Option<&wgpu::Surface<'_>>,
) -> anyhow::Result<(wgpu::Adapter, wgpu::Device, wgpu::Queue)> {
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: surface,
            force_fallback_adapter: false,
        })
        .await
        .context("failed to find a suitable GPU adapter")?;
    log::info!("adapter: {:?}", adapter.get_info().name);

    let (device, queue) = adapter
        .request_device(&wgpu::DeviceDescriptor {
            label: Some("rtt-card device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            experimental_features: wgpu::ExperimentalFeatures::disabled(),
            memory_hints: Default::default(),
            trace: wgpu::Trace::Off,
        })
        .await
        .context("failed to create wgpu device/queue")?;
    Ok((adapter, device, queue))
}

/// Choose the render target format for `precision`, failing when the adapter
/// cannot render to texture at that precision.
pub fn choose_target_format(
    adapter: &wgpu::Adapter,
    precision: Precision,
) -> anyhow::Result<wgpu::TextureFormat> {
    let supported = texture::supported_target_formats(adapter);
    log::debug!("render target candidates: {:?}", supported);
    texture::choose_format(&supported, precision).context(NO_RENDER_TO_TEXTURE)
}
