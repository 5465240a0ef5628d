//! Synthflight - an endless first-person flight through a neon city
//!
//! Buildings and speed-streaks stream past a drifting, banking camera while
//! a ring of bars on the horizon pulses with the soundtrack.

use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use synthflight::audio::{AudioSystem, FrequencyAnalyzer};
use synthflight::cli::Args;
use synthflight::clock::FrameClock;
use synthflight::params::{AnalyzerConfig, ClockConfig, RenderConfig};
use synthflight::rendering::{FrameUniforms, RenderSystem};
use synthflight::simulation::Simulation;

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,

    // Simulation
    simulation: Simulation,
    audio: Option<AudioSystem>,

    // Configuration
    render_config: RenderConfig,

    // Time tracking
    clock: FrameClock,
}

impl App {
    fn new(args: &Args) -> anyhow::Result<Self> {
        let render_config = args.render_config();
        render_config.validate().context("invalid viewport")?;

        let audio = if args.mute {
            log::info!("Audio muted");
            None
        } else {
            match AudioSystem::new(AnalyzerConfig::default(), &args.soundtrack_source()) {
                Ok(audio) => Some(audio),
                Err(e) => {
                    log::warn!("Audio unavailable, spectrum ring will idle: {}", e);
                    None
                }
            }
        };
        let analyzer = audio
            .as_ref()
            .map_or_else(FrequencyAnalyzer::unavailable, AudioSystem::analyzer);

        let simulation = Simulation::new(args.simulation_config(), analyzer)
            .context("invalid simulation parameters")?;

        Ok(Self {
            window: None,
            render_system: None,
            simulation,
            audio,
            render_config,
            clock: FrameClock::new(ClockConfig::default()),
        })
    }

    fn toggle_playback(&mut self) {
        match &self.audio {
            Some(audio) => {
                audio.toggle();
            }
            None => log::warn!("No audio output; nothing to play"),
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

        // Create window
        let window_attributes = Window::default_attributes()
            .with_title("Synthflight")
            .with_inner_size(winit::dpi::PhysicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let instance_capacity = self.simulation.buildings().len()
            + self.simulation.streaks().len()
            + self.simulation.spectrum().bars().len();

        // Initialize rendering system
        let render_system = match pollster::block_on(RenderSystem::new(
            Arc::clone(&window),
            self.simulation.terrain(),
            instance_capacity,
        )) {
            Ok(render_system) => render_system,
            Err(e) => {
                log::error!("Failed to initialize renderer: {}", e);
                event_loop.exit();
                return;
            }
        };

        let (width, height) = render_system.size();
        self.render_config.resize(width, height);

        log::info!("Synthflight is running! SPACE plays/pauses, ESC quits");

        self.window = Some(window);
        self.render_system = Some(render_system);
        self.clock.restart();
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
                KeyCode::Space => self.toggle_playback(),
                _ => {}
            },
            WindowEvent::Resized(size) => {
                self.render_config.resize(size.width, size.height);
                if let Some(render_system) = &mut self.render_system {
                    render_system.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => self.render_frame(event_loop),
            _ => {}
        }
    }
}

impl App {
    /// Advance the simulation and render a single frame
    fn render_frame(&mut self, event_loop: &ActiveEventLoop) {
        let Some(render_system) = &mut self.render_system else {
            return;
        };

        let time = self.clock.tick();
        self.simulation.tick(time);

        let view_proj = self.simulation.pose().view_proj(&self.render_config);
        render_system.update(
            &self.simulation,
            &FrameUniforms::new(view_proj, time.elapsed_s),
        );

        match render_system.render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let (width, height) = render_system.size();
                render_system.resize(width, height);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory");
                event_loop.exit();
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    log::info!("Synthflight - endless synthwave flight");

    let mut app = App::new(&args)?;
    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.run_app(&mut app)?;
    Ok(())
}
