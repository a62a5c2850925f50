//! WGPU device, queue, and surface management

use std::fmt;
use std::sync::Arc;
use winit::window::Window;

/// Error creating the render context
///
/// GPU initialization failures are fatal at startup; the application
/// surfaces the cause and exits rather than running degraded.
#[derive(Debug)]
pub enum ContextError {
    /// Surface creation failed
    Surface(String),
    /// No compatible adapter was found
    NoAdapter,
    /// Device request failed
    Device(String),
}

impl fmt::Display for ContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextError::Surface(msg) => write!(f, "Failed to create surface: {}", msg),
            ContextError::NoAdapter => write!(f, "No compatible GPU adapter found"),
            ContextError::Device(msg) => write!(f, "Failed to acquire GPU device: {}", msg),
        }
    }
}

impl std::error::Error for ContextError {}

/// WGPU surface, device, and queue for one window
pub struct RenderContext {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub size: winit::dpi::PhysicalSize<u32>,
    /// Whether the device supports line polygon mode (wireframe toggle)
    pub supports_wireframe: bool,
}

impl RenderContext {
    /// Create a render context for the given window
    pub async fn new(window: Arc<Window>) -> Result<Self, ContextError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance
            .create_surface(window)
            .map_err(|e| ContextError::Surface(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(ContextError::NoAdapter)?;

        // Wireframe needs the line polygon mode feature; fall back to
        // fill-only rendering when the adapter lacks it.
        let supports_wireframe = adapter
            .features()
            .contains(wgpu::Features::POLYGON_MODE_LINE);
        let required_features = if supports_wireframe {
            wgpu::Features::POLYGON_MODE_LINE
        } else {
            wgpu::Features::empty()
        };

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Arachne Device"),
                    required_features,
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::default(),
                },
                None,
            )
            .await
            .map_err(|e| ContextError::Device(e.to_string()))?;

        let config = surface
            .get_default_config(&adapter, size.width.max(1), size.height.max(1))
            .ok_or(ContextError::NoAdapter)?;
        surface.configure(&device, &config);

        log::info!(
            "Render context ready: {} ({:?})",
            adapter.get_info().name,
            adapter.get_info().backend
        );
        if !supports_wireframe {
            log::warn!("Adapter lacks line polygon mode; wireframe toggle disabled");
        }

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            supports_wireframe,
        })
    }

    /// Resize the surface (ignores zero-sized requests from minimization)
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Current surface aspect ratio
    pub fn aspect_ratio(&self) -> f32 {
        self.config.width as f32 / self.config.height.max(1) as f32
    }
}
