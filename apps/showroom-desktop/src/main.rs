mod demo;

use anyhow::Result;
use clap::Parser;
use demo::{ActiveDemo, DemoKind, LoggingAnimationPlayer};
use egui::Context as EguiContext;
use showroom_common::{FrameClock, FrameTimer};
use showroom_config::ShowroomConfig;
use showroom_input::{Action, InputState};
use showroom_render::Renderer;
use showroom_render_wgpu::{GpuContext, SurfacePass, WgpuRenderer};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{
    DeviceEvent, ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent,
};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window, WindowId};

/// Pixels of touchpad scroll that count as one wheel line.
const PIXELS_PER_LINE: f32 = 40.0;

#[derive(Parser)]
#[command(name = "showroom-desktop", about = "Run one showroom demo in a window")]
struct Cli {
    /// Which demo to run
    #[arg(long, value_enum, default_value = "combat")]
    demo: DemoKind,

    /// YAML or JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the spawn seed from the configuration
    #[arg(long)]
    seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn action_for(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::KeyW => Some(Action::Forward),
        KeyCode::KeyS => Some(Action::Back),
        KeyCode::KeyA => Some(Action::Left),
        KeyCode::KeyD => Some(Action::Right),
        KeyCode::KeyJ => Some(Action::Shoot),
        KeyCode::Escape => Some(Action::Quit),
        _ => None,
    }
}

/// Everything that is not a GPU handle.
struct AppState {
    config: ShowroomConfig,
    demo: ActiveDemo,
    input: InputState,
    animator: LoggingAnimationPlayer,
    clock: FrameClock,
    timer: FrameTimer,
    show_hud: bool,
    cursor_grabbed: bool,
    /// Shoot is held while either binding is down.
    shoot_key: bool,
    shoot_button: bool,
}

impl AppState {
    fn new(kind: DemoKind, config: ShowroomConfig) -> Self {
        let demo = ActiveDemo::new(kind, &config);
        Self {
            clock: FrameClock::new(config.window.max_frame_dt),
            timer: FrameTimer::new(120),
            show_hud: config.window.hud,
            demo,
            config,
            input: InputState::new(),
            animator: LoggingAnimationPlayer::default(),
            cursor_grabbed: false,
            shoot_key: false,
            shoot_button: false,
        }
    }

    /// Auto-repeat presses are ignored; only physical transitions count.
    fn handle_key(&mut self, key: KeyCode, pressed: bool, repeat: bool) {
        if repeat && pressed {
            return;
        }
        if key == KeyCode::F1 && pressed {
            self.show_hud = !self.show_hud;
            return;
        }
        match action_for(key) {
            Some(Action::Shoot) => {
                self.shoot_key = pressed;
                self.sync_shoot();
            }
            Some(action) => self.input.set(action, pressed),
            None => {}
        }
    }

    fn handle_button(&mut self, pressed: bool) {
        self.shoot_button = pressed;
        self.sync_shoot();
    }

    fn sync_shoot(&mut self) {
        self.input
            .set(Action::Shoot, self.shoot_key || self.shoot_button);
    }

    fn release_all(&mut self) {
        self.shoot_key = false;
        self.shoot_button = false;
        self.input.release_all();
    }

    /// Snapshot input and advance the active demo. Returns false once quit
    /// is held.
    fn update(&mut self) -> bool {
        let dt = self.clock.tick();
        self.timer.record(Duration::from_secs_f32(dt));
        let snapshot = self.input.snapshot();
        if snapshot.held.quit {
            return false;
        }
        self.demo.step(&snapshot, dt, &mut self.animator);
        true
    }

    fn draw_hud(&self, ctx: &EguiContext) {
        if !self.show_hud {
            return;
        }
        egui::Window::new(self.demo.kind().as_str())
            .default_pos([10.0, 10.0])
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(format!(
                    "{:.0} fps ({:.1} ms max)",
                    self.timer.fps(),
                    self.timer.max().as_secs_f32() * 1000.0
                ));
                ui.separator();
                egui::Grid::new("stats").num_columns(2).show(ui, |ui| {
                    for (label, value) in self.demo.stats() {
                        ui.label(label);
                        ui.label(value);
                        ui.end_row();
                    }
                });
                if let Some(clip) = &self.animator.current {
                    ui.label(format!("clip: {clip}"));
                }
                ui.separator();
                ui.small("WASD: move | J/LMB: shoot | wheel: zoom | F1: HUD | Esc: quit");
            });
    }
}

/// GPU and egui handles, created once the event loop resumes.
struct Graphics {
    window: Arc<Window>,
    ctx: GpuContext,
    renderer: WgpuRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

struct GpuApp {
    state: AppState,
    graphics: Option<Graphics>,
    egui_ctx: EguiContext,
}

impl GpuApp {
    fn new(state: AppState) -> Self {
        Self {
            state,
            graphics: None,
            egui_ctx: EguiContext::default(),
        }
    }

    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<Graphics> {
        let window_config = &self.state.config.window;
        let attrs = Window::default_attributes()
            .with_title(format!(
                "{} - {}",
                window_config.title,
                self.state.demo.kind().as_str()
            ))
            .with_inner_size(PhysicalSize::new(window_config.width, window_config.height));
        let window = Arc::new(event_loop.create_window(attrs)?);

        let ctx = GpuContext::new(window.clone(), window_config.vsync)?;
        let (width, height) = ctx.size();
        let renderer = WgpuRenderer::new(&ctx.device, ctx.format(), width, height);

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&ctx.device, ctx.format(), None, 1, false);

        tracing::info!(
            backend = ctx.adapter_info.backend.to_str(),
            width,
            height,
            "GPU initialized"
        );
        Ok(Graphics {
            window,
            ctx,
            renderer,
            egui_winit,
            egui_renderer,
        })
    }

    fn set_cursor_grab(&mut self, grab: bool) {
        let Some(gfx) = &self.graphics else {
            return;
        };
        let result = if grab {
            gfx.window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| gfx.window.set_cursor_grab(CursorGrabMode::Confined))
        } else {
            gfx.window.set_cursor_grab(CursorGrabMode::None)
        };
        match result {
            Ok(()) => {
                gfx.window.set_cursor_visible(!grab);
                self.state.cursor_grabbed = grab;
            }
            Err(e) => tracing::warn!("cursor grab failed: {e}"),
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        if !self.state.update() {
            tracing::info!("quit requested");
            event_loop.exit();
            return;
        }
        let frame = self.state.demo.frame();

        let Some(gfx) = &mut self.graphics else {
            return;
        };

        let output = match gfx.ctx.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gfx.ctx.reconfigure();
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        SurfacePass {
            renderer: &mut gfx.renderer,
            ctx: &gfx.ctx,
            target: &view,
        }
        .render(&frame);

        let raw_input = gfx.egui_winit.take_egui_input(&gfx.window);
        let state = &self.state;
        let full_output = self.egui_ctx.run(raw_input, |ctx| state.draw_hud(ctx));
        gfx.egui_winit
            .handle_platform_output(&gfx.window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let (width, height) = gfx.ctx.size();
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [width, height],
            pixels_per_point: full_output.pixels_per_point,
        };

        let device = &gfx.ctx.device;
        let queue = &gfx.ctx.queue;
        for (id, image_delta) in &full_output.textures_delta.set {
            gfx.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("egui_encoder"),
        });
        gfx.egui_renderer.update_buffers(
            device,
            queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            gfx.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            gfx.egui_renderer.free_texture(id);
        }

        output.present();
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.graphics.is_some() {
            return;
        }
        match self.init_graphics(event_loop) {
            Ok(gfx) => {
                self.graphics = Some(gfx);
                self.set_cursor_grab(true);
            }
            Err(e) => {
                tracing::error!("graphics initialization failed: {e:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(gfx) = &mut self.graphics {
            let response = gfx.egui_winit.on_window_event(&gfx.window, &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gfx) = &mut self.graphics {
                    if gfx.ctx.resize(new_size.width, new_size.height) {
                        gfx.renderer
                            .resize(&gfx.ctx.device, new_size.width, new_size.height);
                    }
                }
            }
            WindowEvent::Focused(false) => {
                self.state.release_all();
                self.set_cursor_grab(false);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        repeat,
                        ..
                    },
                ..
            } => {
                self.state
                    .handle_key(key, key_state == ElementState::Pressed, repeat);
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state: btn_state,
                ..
            } => {
                let pressed = btn_state == ElementState::Pressed;
                if pressed && !self.state.cursor_grabbed {
                    self.set_cursor_grab(true);
                }
                self.state.handle_button(pressed);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_LINE,
                };
                self.state.input.add_scroll(lines);
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if self.state.cursor_grabbed {
                self.state
                    .input
                    .add_pointer_motion(delta.0 as f32, delta.1 as f32);
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gfx) = &self.graphics {
            gfx.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let mut config = ShowroomConfig::load_or_default(cli.config.as_deref())?;
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    tracing::info!(demo = cli.demo.as_str(), seed = config.seed, "showroom-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(AppState::new(cli.demo, config));
    event_loop.run_app(&mut app)?;

    Ok(())
}
