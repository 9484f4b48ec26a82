//! Shadow map render target
//!
//! A depth-only 2D texture rendered from the light's point of view. It has
//! no color attachment, nearest filtering, and samples outside [0, 1]
//! return an opaque white border (depth 1.0, "not in shadow").

use crate::error::RenderInitError;
use crate::pipeline::DEPTH_FORMAT;

/// Shadow map dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShadowMapConfig {
    /// Width and height in texels
    pub size: u32,
}

impl Default for ShadowMapConfig {
    fn default() -> Self {
        Self { size: 1024 }
    }
}

impl ShadowMapConfig {
    pub fn extent(&self) -> wgpu::Extent3d {
        wgpu::Extent3d {
            width: self.size,
            height: self.size,
            depth_or_array_layers: 1,
        }
    }

    /// Single-precision depth texture, written as an attachment and
    /// readable as a texture
    pub fn texture_descriptor(&self) -> wgpu::TextureDescriptor<'static> {
        wgpu::TextureDescriptor {
            label: Some("Shadow Map Texture"),
            size: self.extent(),
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        }
    }

    /// Nearest-filtered sampler
    ///
    /// `clamp_to_border` requires `Features::ADDRESS_MODE_CLAMP_TO_BORDER`;
    /// without it the sampler clamps to the edge texel instead.
    pub fn sampler_descriptor(clamp_to_border: bool) -> wgpu::SamplerDescriptor<'static> {
        let (address_mode, border_color) = if clamp_to_border {
            (wgpu::AddressMode::ClampToBorder, Some(wgpu::SamplerBorderColor::OpaqueWhite))
        } else {
            (wgpu::AddressMode::ClampToEdge, None)
        };

        wgpu::SamplerDescriptor {
            label: Some("Shadow Map Sampler"),
            address_mode_u: address_mode,
            address_mode_v: address_mode,
            address_mode_w: address_mode,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            border_color,
            ..Default::default()
        }
    }
}

/// Depth-only off-screen render target for the light pass
///
/// Allocated once at startup and kept for the lifetime of the renderer;
/// the GPU resources are released when it is dropped.
#[derive(Debug)]
pub struct ShadowTarget {
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
    // Not bound by any pass yet; owned so it lives as long as the texture
    _sampler: wgpu::Sampler,
    config: ShadowMapConfig,
}

impl ShadowTarget {
    /// Allocate the depth texture, its attachment view and the sampler
    ///
    /// Allocation runs inside a device error scope so that out-of-memory
    /// and validation failures surface as [`RenderInitError::ShadowAllocation`].
    pub fn new(
        device: &wgpu::Device,
        config: ShadowMapConfig,
        clamp_to_border: bool,
    ) -> Result<Self, RenderInitError> {
        if config.size == 0 {
            return Err(RenderInitError::ShadowAllocation("shadow map size must be positive".to_string()));
        }

        device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let texture = device.create_texture(&config.texture_descriptor());
        let view = texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some("Shadow Map View"),
            aspect: wgpu::TextureAspect::DepthOnly,
            ..Default::default()
        });
        let sampler = device.create_sampler(&ShadowMapConfig::sampler_descriptor(clamp_to_border));

        let validation = pollster::block_on(device.pop_error_scope());
        let out_of_memory = pollster::block_on(device.pop_error_scope());
        if let Some(err) = out_of_memory.or(validation) {
            return Err(RenderInitError::ShadowAllocation(err.to_string()));
        }

        log::info!("Allocated {0}x{0} shadow map", config.size);

        Ok(Self {
            _texture: texture,
            view,
            _sampler: sampler,
            config,
        })
    }

    /// View used as the light pass depth attachment
    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    pub fn size(&self) -> u32 {
        self.config.size
    }
}
