//! WGPU context: surface, device and queue for one window

use std::sync::Arc;

use winit::{dpi::PhysicalSize, window::Window};

use crate::error::RenderInitError;
use crate::pipeline::DEPTH_FORMAT;

/// Options that shape device and surface creation
#[derive(Debug, Clone, Copy)]
pub struct ContextOptions {
    /// Present with vsync (Fifo) instead of the lowest-latency mode
    pub vsync: bool,
    /// Requested MSAA sample count for the camera pass
    pub msaa_samples: u32,
}

impl Default for ContextOptions {
    fn default() -> Self {
        Self {
            vsync: true,
            msaa_samples: 4,
        }
    }
}

/// GPU state bound to a window
pub struct RenderContext {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub size: PhysicalSize<u32>,
    /// Sample count actually used for the camera pass
    pub sample_count: u32,
    /// Whether samplers may use `AddressMode::ClampToBorder`
    pub clamp_to_border: bool,
}

impl RenderContext {
    /// Create the surface, pick an adapter and open a device
    pub async fn new(window: Arc<Window>, options: ContextOptions) -> Result<Self, RenderInitError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(RenderInitError::NoAdapter)?;

        let info = adapter.get_info();
        log::info!("Using adapter '{}' ({:?})", info.name, info.backend);

        let clamp_to_border = adapter
            .features()
            .contains(wgpu::Features::ADDRESS_MODE_CLAMP_TO_BORDER);
        let mut required_features = wgpu::Features::empty();
        if clamp_to_border {
            required_features |= wgpu::Features::ADDRESS_MODE_CLAMP_TO_BORDER;
        } else {
            log::warn!("Adapter lacks clamp-to-border sampling; shadow map will clamp to edge");
        }

        // Without this feature the device only accepts the guaranteed sample counts
        if adapter
            .features()
            .contains(wgpu::Features::TEXTURE_ADAPTER_SPECIFIC_FORMAT_FEATURES)
        {
            required_features |= wgpu::Features::TEXTURE_ADAPTER_SPECIFIC_FORMAT_FEATURES;
        }

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Shadowcube Device"),
                    required_features,
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::default(),
                },
                None,
            )
            .await?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| RenderInitError::SurfaceCreation("surface reports no formats".to_string()))?;

        let present_mode = if options.vsync {
            wgpu::PresentMode::Fifo
        } else {
            wgpu::PresentMode::AutoNoVsync
        };

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            desired_maximum_frame_latency: 2,
            alpha_mode: caps.alpha_modes.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let sample_count = Self::supported_sample_count(&adapter, &device, format, options.msaa_samples);
        log::info!("Surface format {:?}", format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            sample_count,
            clamp_to_border,
        })
    }

    /// Sample count the device accepts for both the surface format and
    /// [`DEPTH_FORMAT`]
    fn supported_sample_count(
        adapter: &wgpu::Adapter,
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        requested: u32,
    ) -> u32 {
        let features = device.features();
        let flags = |f: wgpu::TextureFormat| {
            if features.contains(wgpu::Features::TEXTURE_ADAPTER_SPECIFIC_FORMAT_FEATURES) {
                adapter.get_texture_format_features(f).flags
            } else {
                f.guaranteed_format_features(features).flags
            }
        };

        let count = pick_sample_count(requested, flags(format), flags(DEPTH_FORMAT));
        if count != requested {
            log::warn!("{}x MSAA unsupported, using {}x", requested, count);
        }
        count
    }

    /// Reconfigure the surface for a new window size
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Width / height of the surface
    pub fn aspect_ratio(&self) -> f32 {
        self.config.width as f32 / self.config.height.max(1) as f32
    }
}

/// Largest sample count not above `requested` that both the color and the
/// depth format support, or 1
pub fn pick_sample_count(
    requested: u32,
    color: wgpu::TextureFormatFeatureFlags,
    depth: wgpu::TextureFormatFeatureFlags,
) -> u32 {
    [16, 8, 4, 2]
        .into_iter()
        .filter(|&n| n <= requested)
        .find(|&n| color.sample_count_supported(n) && depth.sample_count_supported(n))
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guaranteed(format: wgpu::TextureFormat) -> wgpu::TextureFormatFeatureFlags {
        format.guaranteed_format_features(wgpu::Features::empty()).flags
    }

    fn pick(requested: u32) -> u32 {
        pick_sample_count(
            requested,
            guaranteed(wgpu::TextureFormat::Bgra8UnormSrgb),
            guaranteed(DEPTH_FORMAT),
        )
    }

    #[test]
    fn test_unsupported_count_falls_back_to_four() {
        assert_eq!(pick(8), 4);
        assert_eq!(pick(16), 4);
    }

    #[test]
    fn test_two_samples_falls_back_to_single() {
        assert_eq!(pick(2), 1);
        assert_eq!(pick(3), 1);
    }

    #[test]
    fn test_four_samples_kept() {
        assert_eq!(pick(4), 4);
    }

    #[test]
    fn test_single_sample_requests() {
        assert_eq!(pick(1), 1);
        assert_eq!(pick(0), 1);
    }

    #[test]
    fn test_depth_format_limits_choice() {
        let color = wgpu::TextureFormatFeatureFlags::MULTISAMPLE_X4;
        let depth = wgpu::TextureFormatFeatureFlags::empty();
        assert_eq!(pick_sample_count(4, color, depth), 1);
    }
}
