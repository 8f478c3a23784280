//! GPU textures and render-target selection.
//!
//! This module provides [`Texture`], a wrapper around WGPU texture resources,
//! helpers for depth buffers and render-to-texture colour targets, and the
//! format negotiation that decides whether render-to-texture is possible on the
//! current adapter at all.

/// A GPU texture with a view and optional sampler.
///
/// Render targets carry a sampler so the same texture can be bound to a shader
/// once rendering into it has finished.
#[derive(Clone, Debug)]
pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: Option<wgpu::Sampler>,
}

impl Texture {
    /// Standard depth buffer texture format (32-bit float).
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    /// Create a depth texture for depth-testing during rendering.
    ///
    /// * `size` is [width, height] of the texture in pixels, clamped to at least 1
    /// * `label` is used as a debug label for the GPU resource
    pub fn create_depth_texture(device: &wgpu::Device, size: [u32; 2], label: &str) -> Self {
        let size = wgpu::Extent3d {
            width: size[0].max(1),
            height: size[1].max(1),
            depth_or_array_layers: 1,
        };
        let desc = wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[Self::DEPTH_FORMAT],
        };
        let texture = device.create_texture(&desc);
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            texture,
            view,
            sampler: None,
        }
    }

    /// Create the colour texture of a render target.
    ///
    /// The texture carries a full mip chain which is regenerated every time
    /// the target is rendered. Level 0 is the render attachment; the view
    /// covers all levels so the sampler can filter between them.
    pub fn create_render_target(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        size: [u32; 2],
        label: &str,
    ) -> Self {
        let width = size[0].max(1);
        let height = size[1].max(1);
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: mip_level_count(width, height),
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                | wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = Some(device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("render target sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Linear,
            ..Default::default()
        }));

        Self {
            texture,
            view,
            sampler,
        }
    }

    /// A view of the first mip level, used as the colour attachment.
    pub fn attachment_view(&self) -> wgpu::TextureView {
        self.texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some("render target attachment"),
            base_mip_level: 0,
            mip_level_count: Some(1),
            ..Default::default()
        })
    }

    pub fn size(&self) -> [u32; 2] {
        [self.texture.width(), self.texture.height()]
    }
}

/// Number of mip levels for a full chain down to 1x1.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    let largest = width.max(height).max(1);
    32 - largest.leading_zeros()
}

/// Requested bit depth per colour channel of a render target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Precision {
    pub red_bits: u8,
    pub green_bits: u8,
    pub blue_bits: u8,
    pub alpha_bits: u8,
}

impl Precision {
    pub const fn rgba(red_bits: u8, green_bits: u8, blue_bits: u8, alpha_bits: u8) -> Self {
        Self {
            red_bits,
            green_bits,
            blue_bits,
            alpha_bits,
        }
    }

    /// True when every channel of `self` is at least as deep as in `wanted`.
    pub fn satisfies(&self, wanted: &Precision) -> bool {
        self.red_bits >= wanted.red_bits
            && self.green_bits >= wanted.green_bits
            && self.blue_bits >= wanted.blue_bits
            && self.alpha_bits >= wanted.alpha_bits
    }

    /// Total number of bits `self` has beyond `wanted`.
    fn surplus(&self, wanted: &Precision) -> u32 {
        [
            (self.red_bits, wanted.red_bits),
            (self.green_bits, wanted.green_bits),
            (self.blue_bits, wanted.blue_bits),
            (self.alpha_bits, wanted.alpha_bits),
        ]
        .iter()
        .map(|(have, want)| have.saturating_sub(*want) as u32)
        .sum()
    }
}

/// Colour formats considered for render-to-texture, in order of preference.
pub const CANDIDATE_FORMATS: [wgpu::TextureFormat; 7] = [
    wgpu::TextureFormat::Rgba8UnormSrgb,
    wgpu::TextureFormat::Bgra8UnormSrgb,
    wgpu::TextureFormat::Rgba8Unorm,
    wgpu::TextureFormat::Bgra8Unorm,
    wgpu::TextureFormat::Rgb10a2Unorm,
    wgpu::TextureFormat::Rgba16Float,
    wgpu::TextureFormat::Rgba32Float,
];

/// Channel depths of the candidate render target formats.
pub fn precision_of(format: wgpu::TextureFormat) -> Option<Precision> {
    use wgpu::TextureFormat as F;
    match format {
        F::Rgba8UnormSrgb | F::Bgra8UnormSrgb | F::Rgba8Unorm | F::Bgra8Unorm => {
            Some(Precision::rgba(8, 8, 8, 8))
        }
        F::Rgb10a2Unorm => Some(Precision::rgba(10, 10, 10, 2)),
        F::Rgba16Float => Some(Precision::rgba(16, 16, 16, 16)),
        F::Rgba32Float => Some(Precision::rgba(32, 32, 32, 32)),
        _ => None,
    }
}

/// Pick the render target format closest to `wanted` among `supported`.
///
/// Only formats meeting every requested channel depth qualify; among those the
/// smallest surplus wins and ties go to the earlier entry of `supported`.
/// Returns `None` when no supported format is good enough.
pub fn choose_format(
    supported: &[wgpu::TextureFormat],
    wanted: Precision,
) -> Option<wgpu::TextureFormat> {
    supported
        .iter()
        .filter_map(|format| precision_of(*format).map(|p| (*format, p)))
        .filter(|(_, p)| p.satisfies(&wanted))
        .enumerate()
        .min_by_key(|(idx, (_, p))| (p.surplus(&wanted), *idx))
        .map(|(_, (format, _))| format)
}

/// Candidate formats the adapter can both render into and sample with filtering.
pub fn supported_target_formats(adapter: &wgpu::Adapter) -> Vec<wgpu::TextureFormat> {
    let needed = wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING;
    CANDIDATE_FORMATS
        .iter()
        .copied()
        .filter(|format| {
            let features = adapter.get_texture_format_features(*format);
            features.allowed_usages.contains(needed)
                && features
                    .flags
                    .contains(wgpu::TextureFormatFeatureFlags::FILTERABLE)
        })
        .collect()
}
