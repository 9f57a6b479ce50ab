//! Sonosphere - a sphere that breathes with the music.
//!
//! Bass swells the radius, treble roughens the surface. Drop a WAV file
//! on the window to play it; space pauses, escape quits.

mod cli;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use cli::Args;
use sonosphere::audio::{AudioSystem, Track};
use sonosphere::camera::CameraSystem;
use sonosphere::noise::SimplexField;
use sonosphere::params::{AnalyserConfig, RenderConfig};
use sonosphere::pipeline::FramePipeline;
use sonosphere::rendering::{RenderSystem, Uniforms};
use sonosphere::sphere::SphereMesh;

const TITLE: &str = "Sonosphere";

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,

    // Audio and geometry
    audio: Option<AudioSystem>,
    pipeline: FramePipeline,
    mesh: SphereMesh,
    noise: SimplexField,
    camera: CameraSystem,

    // Configuration
    render_config: RenderConfig,
    analyser_config: AnalyserConfig,

    /// Track given on the command line, started once audio is up
    pending_track: Option<Track>,

    /// Setup failure to report once the event loop returns
    fatal: Option<anyhow::Error>,
}

impl App {
    fn new(args: &Args, pending_track: Option<Track>) -> Self {
        let sphere_params = args.sphere_params();
        let render_config = RenderConfig::default();

        Self {
            window: None,
            render_system: None,
            audio: None,
            pipeline: FramePipeline::new(args.band_mapping(), sphere_params.amplitude),
            mesh: SphereMesh::uv_sphere(&sphere_params),
            noise: SimplexField::new(sphere_params.noise_seed),
            camera: CameraSystem::new(&render_config),
            render_config,
            analyser_config: args.analyser_config(),
            pending_track,
            fatal: None,
        }
    }

    /// Create window, GPU resources and audio output
    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_attributes = Window::default_attributes()
            .with_title(TITLE)
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .context("Failed to create window")?,
        );

        let render_system = pollster::block_on(RenderSystem::new(
            Arc::clone(&window),
            &self.mesh,
            &self.render_config,
        ))
        .context("Failed to initialize renderer")?;

        // Without audio the sphere simply stays at rest
        match AudioSystem::new(self.analyser_config.clone()) {
            Ok(mut audio) => {
                match self.pending_track.take() {
                    Some(track) => {
                        window.set_title(&format!("{} - {}", TITLE, track.name));
                        audio.play_track(track);
                    }
                    None => {
                        if let Err(e) = audio.play_synth() {
                            warn!("Procedural music unavailable: {}", e);
                        }
                    }
                }
                self.audio = Some(audio);
            }
            Err(e) => warn!("Audio unavailable: {}", e),
        }

        info!(
            vertices = self.mesh.vertex_count(),
            amplitude = self.pipeline.amplitude(),
            "Sonosphere is running (space: pause, esc: quit, drop a WAV file to play it)"
        );

        self.window = Some(window);
        self.render_system = Some(render_system);
        Ok(())
    }

    fn load_dropped(&mut self, path: &Path) {
        let Some(audio) = self.audio.as_mut() else {
            warn!("Ignoring dropped file, no audio output");
            return;
        };

        match Track::open(path) {
            Ok(track) => {
                if let Some(window) = &self.window {
                    window.set_title(&format!("{} - {}", TITLE, track.name));
                }
                audio.play_track(track);
            }
            Err(e) => warn!(path = %path.display(), "Could not play dropped file: {}", e),
        }
    }

    fn toggle_pause(&self) {
        if let Some(audio) = &self.audio {
            if audio.toggle_pause() {
                info!("Paused");
            } else {
                info!("Resumed");
            }
        }
    }

    /// Advance the pipeline one frame and draw
    fn render_frame(&mut self, event_loop: &ActiveEventLoop) {
        let Some(render_system) = &self.render_system else {
            return;
        };

        if let Some(audio) = self.audio.as_mut() {
            if let Err(e) = self.pipeline.run_frame(audio, &mut self.mesh, &self.noise) {
                warn!("Frame skipped: {}", e);
            }
        }

        if self.mesh.needs_normal_update() {
            self.mesh.recompute_normals();
            render_system.update_mesh(&self.mesh);
        }

        let view_proj = self.camera.view_proj(render_system.aspect_ratio());
        render_system.update_uniforms(&Uniforms::new(view_proj, &self.render_config));

        match render_system.render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                if let Some(render_system) = self.render_system.as_mut() {
                    let (width, height) = render_system.size();
                    render_system.resize(width, height);
                }
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("GPU out of memory");
                event_loop.exit();
            }
            Err(e) => warn!("Render error: {:?}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        if let Err(e) = self.init(event_loop) {
            error!("{:#}", e);
            self.fatal = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(code),
                        repeat: false,
                        ..
                    },
                ..
            } => match code {
                KeyCode::Escape => event_loop.exit(),
                KeyCode::Space => self.toggle_pause(),
                _ => {}
            },
            WindowEvent::DroppedFile(path) => self.load_dropped(&path),
            WindowEvent::Resized(size) => {
                if let Some(render_system) = self.render_system.as_mut() {
                    render_system.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => self.render_frame(event_loop),
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(&args.log_level)?;

    args.analyser_config()
        .validate()
        .context("Invalid analyser settings")?;
    args.sphere_params()
        .validate()
        .context("Invalid sphere settings")?;

    let track = args
        .track
        .as_deref()
        .map(|path| {
            Track::open(path).with_context(|| format!("Failed to open track {}", path.display()))
        })
        .transpose()?;

    let mut app = App::new(&args, track);
    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    event_loop.run_app(&mut app)?;

    match app.fatal.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
