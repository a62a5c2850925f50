//! GPU rendering system
//!
//! Owns the render context, the scene pipeline, and the mesh registry.
//! Each frame it turns a [`FrameSnapshot`] plus the physics body list into
//! a draw list composed through the [`MatrixStack`], then encodes one
//! render pass.

use std::path::Path;
use std::sync::Arc;

use winit::window::Window;

use arachne_math::{mat4, Vec3};
use arachne_physics::PhysicsSet;
use arachne_render::{
    ContextError, DrawCommand, FrameUniforms, MatrixStack, MeshError, MeshKey, MeshRegistry,
    RenderContext, ScenePipeline,
};

use crate::config::{CameraConfig, RenderingConfig};
use crate::scene::{DrawSet, EyeTableau, FrameSnapshot};

const SPIDER_SCALE: f32 = 0.05;
const HAND_SCALE: f32 = 0.5;

/// Scale of the two focus eyes while the others converge on them
const FOCUS_EYE_SCALE: f32 = 0.005;
/// Scale of the converging eyes
const MOVING_EYE_SCALE: f32 = 0.0035;

/// The terminal tableau: two big eyes with pupils in front of them
const MERGED_EYE_POSITIONS: [Vec3; 2] = [
    Vec3::new(-0.008, 0.01, -0.2),
    Vec3::new(0.008, 0.01, -0.2),
];
const MERGED_PUPIL_POSITIONS: [Vec3; 2] = [
    Vec3::new(-0.008, 0.01, -0.15),
    Vec3::new(0.008, 0.01, -0.15),
];
const MERGED_EYE_SCALE: f32 = 0.01;
const MERGED_PUPIL_SCALE: f32 = 0.002;

const SPIDER_COLOR: [f32; 4] = [0.12, 0.1, 0.08, 1.0];
const HAND_COLOR: [f32; 4] = [0.87, 0.68, 0.52, 1.0];
const EYE_COLOR: [f32; 4] = [0.75, 0.08, 0.08, 1.0];
const PUPIL_COLOR: [f32; 4] = [0.02, 0.02, 0.02, 1.0];
const BODY_COLOR: [f32; 4] = [0.6, 0.6, 0.65, 1.0];

/// Fatal render-system startup failure
#[derive(Debug)]
pub enum RenderInitError {
    /// GPU context creation failed
    Context(ContextError),
    /// A required mesh failed to load
    Mesh(MeshError),
}

impl std::fmt::Display for RenderInitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderInitError::Context(e) => write!(f, "Render context failed: {}", e),
            RenderInitError::Mesh(e) => write!(f, "Mesh load failed: {}", e),
        }
    }
}

impl std::error::Error for RenderInitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderInitError::Context(e) => Some(e),
            RenderInitError::Mesh(e) => Some(e),
        }
    }
}

impl From<ContextError> for RenderInitError {
    fn from(e: ContextError) -> Self {
        RenderInitError::Context(e)
    }
}

impl From<MeshError> for RenderInitError {
    fn from(e: MeshError) -> Self {
        RenderInitError::Mesh(e)
    }
}

/// Per-frame render error
#[derive(Debug)]
pub enum RenderError {
    /// Surface was lost (window resized, minimized, etc.)
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// Other surface error
    Other(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

/// Keys for the three scene meshes
#[derive(Clone, Copy, Debug)]
struct SceneMeshes {
    spider: MeshKey,
    hand: MeshKey,
    sphere: MeshKey,
}

/// Manages GPU rendering
pub struct RenderSystem {
    context: RenderContext,
    pipeline: ScenePipeline,
    meshes: MeshRegistry,
    scene_meshes: SceneMeshes,
    render_config: RenderingConfig,
    camera_config: CameraConfig,
}

impl RenderSystem {
    /// Create the render system and load the scene meshes
    pub fn new(
        window: Arc<Window>,
        render_config: RenderingConfig,
        camera_config: CameraConfig,
        asset_root: &Path,
    ) -> Result<Self, RenderInitError> {
        let context = pollster::block_on(RenderContext::new(window))?;

        let mut pipeline = ScenePipeline::new(
            &context.device,
            context.config.format,
            context.supports_wireframe,
        );
        pipeline.ensure_depth_texture(&context.device, context.size.width, context.size.height);

        let models = asset_root.join("models");
        let mut meshes = MeshRegistry::new();
        let scene_meshes = SceneMeshes {
            spider: meshes.load(&context.device, &models.join("spider.obj"))?,
            hand: meshes.load(&context.device, &models.join("hand.obj"))?,
            sphere: meshes.load(&context.device, &models.join("ico_sphere.obj"))?,
        };
        log::info!("Loaded {} scene meshes from {}", meshes.len(), models.display());

        Ok(Self {
            context,
            pipeline,
            meshes,
            scene_meshes,
            render_config,
            camera_config,
        })
    }

    /// Handle window resize
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        self.context.resize(new_size);
        self.pipeline.ensure_depth_texture(
            &self.context.device,
            self.context.size.width,
            self.context.size.height,
        );
    }

    /// Reconfigure the surface at its current size (after a lost surface)
    pub fn reconfigure(&mut self) {
        let size = self.context.size;
        self.context.resize(size);
    }

    /// Render one frame from a snapshot
    pub fn render_frame(
        &mut self,
        snapshot: &FrameSnapshot,
        physics: &PhysicsSet,
        wireframe: bool,
    ) -> Result<(), RenderError> {
        let uniforms = FrameUniforms {
            projection: mat4::perspective(
                self.camera_config.fov.to_radians(),
                self.context.aspect_ratio(),
                self.camera_config.near,
                self.camera_config.far,
            ),
            // The choreography is authored in camera space
            view: mat4::IDENTITY,
            light_dir: self.render_config.light_dir,
            ambient: self.render_config.ambient_strength,
            diffuse: self.render_config.diffuse_strength,
            _padding: [0.0; 3],
        };
        self.pipeline.begin_frame(&self.context.queue, &uniforms);

        for command in scene_draws(snapshot, physics, self.scene_meshes) {
            self.pipeline.submit(command);
        }

        let output = match self.context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost) => return Err(RenderError::SurfaceLost),
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(e) => return Err(RenderError::Other(format!("{:?}", e))),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        let bg = &self.render_config.background_color;
        self.pipeline.render(
            &self.context.device,
            &self.context.queue,
            &mut encoder,
            &view,
            &self.meshes,
            wgpu::Color {
                r: bg[0] as f64,
                g: bg[1] as f64,
                b: bg[2] as f64,
                a: bg[3] as f64,
            },
            wireframe && self.context.supports_wireframe,
        );

        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

/// Build the frame's draw list from a snapshot and the physics bodies
///
/// Transform composition order matches the scene's authoring convention:
/// the spider scales before it rotates, the hand rotates before it scales.
fn scene_draws(
    snapshot: &FrameSnapshot,
    physics: &PhysicsSet,
    meshes: SceneMeshes,
) -> Vec<DrawCommand> {
    let mut stack = MatrixStack::new();
    let mut commands = Vec::new();

    if snapshot.draw.contains(DrawSet::SPIDER) {
        let mut frame = stack.push();
        frame.translate(snapshot.spider_position);
        frame.scale_uniform(SPIDER_SCALE);
        frame.rotate_x(snapshot.spider_rotation.x);
        frame.rotate_y(snapshot.spider_rotation.y);
        frame.rotate_z(snapshot.spider_rotation.z);
        commands.push(DrawCommand {
            mesh: meshes.spider,
            model: frame.top(),
            color: SPIDER_COLOR,
        });
    }

    if snapshot.draw.contains(DrawSet::HAND) {
        let mut frame = stack.push();
        frame.translate(snapshot.hand_position);
        frame.rotate_x(snapshot.hand_rotation.x);
        frame.rotate_y(snapshot.hand_rotation.y);
        frame.rotate_z(snapshot.hand_rotation.z);
        frame.scale_uniform(HAND_SCALE);
        commands.push(DrawCommand {
            mesh: meshes.hand,
            model: frame.top(),
            color: HAND_COLOR,
        });
    }

    match snapshot.eyes {
        EyeTableau::Hidden => {}
        EyeTableau::Merging(positions) => {
            for (i, &position) in positions.iter().enumerate() {
                // Eyes 2 and 3 (indices 1 and 2) are the focus pair
                let scale = if i == 1 || i == 2 {
                    FOCUS_EYE_SCALE
                } else {
                    MOVING_EYE_SCALE
                };
                let mut frame = stack.push();
                frame.translate(position);
                frame.scale_uniform(scale);
                commands.push(DrawCommand {
                    mesh: meshes.sphere,
                    model: frame.top(),
                    color: EYE_COLOR,
                });
            }
        }
        EyeTableau::Merged => {
            for position in MERGED_EYE_POSITIONS {
                let mut frame = stack.push();
                frame.translate(position);
                frame.scale_uniform(MERGED_EYE_SCALE);
                commands.push(DrawCommand {
                    mesh: meshes.sphere,
                    model: frame.top(),
                    color: EYE_COLOR,
                });
            }
            for position in MERGED_PUPIL_POSITIONS {
                let mut frame = stack.push();
                frame.translate(position);
                frame.scale_uniform(MERGED_PUPIL_SCALE);
                commands.push(DrawCommand {
                    mesh: meshes.sphere,
                    model: frame.top(),
                    color: PUPIL_COLOR,
                });
            }
        }
    }

    for body in physics.iter() {
        let mut frame = stack.push();
        frame.translate(body.position);
        frame.scale_uniform(body.radius);
        commands.push(DrawCommand {
            mesh: meshes.sphere,
            model: frame.top(),
            color: BODY_COLOR,
        });
    }

    commands
}
