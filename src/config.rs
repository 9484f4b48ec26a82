//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`SHADOWCUBE_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;
use std::time::Duration;

use shadowcube_core::{GeometryError, Scene, SceneState, TorusParams, Vec3};
use shadowcube_render::camera::{LightCamera, OrbitCamera};
use shadowcube_render::context::ContextOptions;
use shadowcube_render::shadow_map::ShadowMapConfig;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Camera configuration
    #[serde(default)]
    pub camera: CameraConfig,
    /// Light and shadow map configuration
    #[serde(default)]
    pub light: LightConfig,
    /// Rotation speeds and frame pacing
    #[serde(default)]
    pub animation: AnimationConfig,
    /// Torus shape
    #[serde(default)]
    pub torus: TorusParams,
    /// Rendering configuration
    #[serde(default)]
    pub rendering: RenderingConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`SHADOWCUBE_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Optional local overrides
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // SHADOWCUBE_WINDOW__TITLE=Test -> window.title = "Test"
        figment = figment.merge(Env::prefixed("SHADOWCUBE_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }

    /// Build the scene from the torus and color settings
    pub fn scene(&self) -> Result<Scene, GeometryError> {
        Ok(Scene::new(self.torus)?
            .with_colors(self.rendering.cube_color, self.rendering.torus_color))
    }

    /// Initial rotation state
    pub fn scene_state(&self) -> SceneState {
        SceneState::new(self.animation.primary_speed, self.animation.secondary_speed)
    }

    pub fn light_camera(&self) -> LightCamera {
        LightCamera {
            position: Vec3::from_array(self.light.position),
            fov_degrees: self.light.fov,
            near: self.light.near,
            far: self.light.far,
            ..LightCamera::default()
        }
    }

    pub fn orbit_camera(&self) -> OrbitCamera {
        OrbitCamera {
            distance: self.camera.distance,
            primary_axis: Vec3::from_array(self.camera.rotation_axis),
            fov_degrees: self.camera.fov,
            near: self.camera.near,
            far: self.camera.far,
            ..OrbitCamera::default()
        }
    }

    pub fn shadow_map(&self) -> ShadowMapConfig {
        ShadowMapConfig { size: self.light.shadow_map_size }
    }

    pub fn context_options(&self) -> ContextOptions {
        ContextOptions {
            vsync: self.window.vsync,
            msaa_samples: self.window.msaa_samples,
        }
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Enable VSync
    pub vsync: bool,
    /// Requested MSAA samples for the camera pass (falls back if unsupported)
    pub msaa_samples: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Shadowcube".to_string(),
            width: 800,
            height: 600,
            vsync: true,
            msaa_samples: 4,
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Field of view in degrees
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Distance from the viewer to the scene center
    pub distance: f32,
    /// Axis of the speed-controlled rotation [x, y, z]
    pub rotation_axis: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: 45.0,
            near: 0.1,
            far: 50.0,
            distance: 5.0,
            rotation_axis: [3.0, 1.0, 1.0],
        }
    }
}

/// Light configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    /// Light position [x, y, z]; the light always looks at the origin
    pub position: [f32; 3],
    /// Field of view in degrees
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Shadow map width and height in texels
    pub shadow_map_size: u32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            position: [2.0, 4.0, -2.0],
            fov: 45.0,
            near: 1.0,
            far: 7.5,
            shadow_map_size: 1024,
        }
    }
}

/// Animation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Initial primary rotation speed (degrees per frame)
    pub primary_speed: i64,
    /// Secondary rotation speed (degrees per frame)
    pub secondary_speed: i64,
    /// Minimum time per frame in milliseconds
    pub frame_budget_ms: u64,
}

impl AnimationConfig {
    pub fn frame_budget(&self) -> Duration {
        Duration::from_millis(self.frame_budget_ms)
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            primary_speed: 1,
            secondary_speed: 2,
            frame_budget_ms: 10,
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    /// Background color [r, g, b, a]
    pub background_color: [f32; 4],
    /// Cube edge color [r, g, b, a]
    pub cube_color: [f32; 4],
    /// Torus color [r, g, b, a]
    pub torus_color: [f32; 4],
}

impl RenderingConfig {
    pub fn clear_color(&self) -> wgpu::Color {
        let bg = &self.background_color;
        wgpu::Color {
            r: bg[0] as f64,
            g: bg[1] as f64,
            b: bg[2] as f64,
            a: bg[3] as f64,
        }
    }
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            background_color: [0.0, 0.0, 0.0, 1.0],
            cube_color: [1.0, 1.0, 1.0, 1.0],
            torus_color: [1.0, 1.0, 1.0, 1.0],
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
