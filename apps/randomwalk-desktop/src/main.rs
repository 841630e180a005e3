use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use randomwalk_input::{Action, ScrollDelta};
use randomwalk_render::{DebugTextRenderer, Renderer};
use randomwalk_render_wgpu::{GpuContext, LineRenderer, OrbitCamera};
use randomwalk_walk::{WalkConfig, WalkScene};
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

const WINDOW_TITLE: &str = "Random Walk";
const WINDOW_WIDTH: u32 = 640;
const WINDOW_HEIGHT: u32 = 480;

/// Application state, independent of the window and the GPU.
struct AppState {
    scene: WalkScene,
    camera: OrbitCamera,
    last_frame: Instant,
}

impl AppState {
    fn new(scene: WalkScene) -> Self {
        Self {
            scene,
            camera: OrbitCamera::default(),
            last_frame: Instant::now(),
        }
    }

    /// Apply an input action. Returns false when the app should exit.
    fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::Zoom(amount) => {
                self.camera.zoom(amount);
                tracing::debug!("camera distance {:.1}", self.camera.distance);
            }
            Action::Resize { width, height } => {
                self.camera.set_viewport(width, height);
            }
            Action::Quit => return false,
            Action::Noop => {}
        }
        true
    }

    /// Advance one rendered frame at `now`, rotating by the time since the last one.
    fn advance_frame(&mut self, now: Instant) {
        let dt = now.saturating_duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.update(dt);
    }

    /// Rotate the view and reveal one more point per walk.
    fn update(&mut self, dt: f32) {
        self.camera.advance(dt);
        if !self.scene.is_fully_revealed() && self.scene.advance_reveal() == self.scene.max_len() {
            tracing::info!("all {} walks fully revealed", self.scene.walk_count());
            tracing::debug!("\n{}", self.summary());
        }
    }

    /// Text summary of the scene as currently seen by the camera.
    fn summary(&self) -> String {
        DebugTextRenderer::new().render(&self.scene, &self.camera.render_view())
    }
}

/// Outcome of asking the surface for the next frame's texture.
#[derive(Debug, PartialEq)]
enum Acquired<T> {
    Ready(T),
    /// Surface lost or outdated; reconfigure and try again next frame.
    Reconfigure,
    /// Nothing to draw into this time.
    Skip,
}

impl<T> Acquired<T> {
    fn from_surface(result: Result<T, wgpu::SurfaceError>) -> Result<Self> {
        match result {
            Ok(texture) => Ok(Acquired::Ready(texture)),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => Ok(Acquired::Reconfigure),
            Err(wgpu::SurfaceError::Timeout) => {
                tracing::warn!("surface timeout, skipping frame");
                Ok(Acquired::Skip)
            }
            Err(e) => Err(e).context("failed to acquire surface texture"),
        }
    }
}

fn map_window_event(event: &WindowEvent) -> Action {
    match event {
        WindowEvent::CloseRequested => Action::Quit,
        WindowEvent::Resized(size) => Action::Resize {
            width: size.width,
            height: size.height,
        },
        WindowEvent::MouseWheel { delta, .. } => Action::from_scroll(match *delta {
            MouseScrollDelta::LineDelta(x, y) => ScrollDelta::Lines { x, y },
            MouseScrollDelta::PixelDelta(p) => ScrollDelta::Pixels { x: p.x, y: p.y },
        }),
        _ => Action::Noop,
    }
}

struct GpuApp {
    state: AppState,
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    renderer: Option<LineRenderer>,
    /// First fatal error raised inside an event callback; returned from `main`.
    fatal: Option<anyhow::Error>,
}

impl GpuApp {
    fn new(scene: WalkScene) -> Self {
        Self {
            state: AppState::new(scene),
            window: None,
            gpu: None,
            renderer: None,
            fatal: None,
        }
    }

    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(PhysicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let size = window.inner_size();
        let gpu = GpuContext::new(window.clone(), size.width, size.height)
            .context("failed to initialize GPU")?;
        let renderer = LineRenderer::new(&gpu.device, gpu.surface_format(), &self.state.scene)
            .context("failed to build line renderer")?;
        tracing::info!(
            "uploaded {} walks to the GPU ({} backend)",
            renderer.strip_count(),
            gpu.backend().to_str()
        );

        self.state.apply(Action::Resize {
            width: size.width,
            height: size.height,
        });
        self.state.last_frame = Instant::now();

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.renderer = Some(renderer);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        tracing::error!("{err:#}");
        if self.fatal.is_none() {
            self.fatal = Some(err);
        }
        event_loop.exit();
    }

    fn redraw(&mut self) -> Result<()> {
        let (Some(gpu), Some(renderer)) = (&self.gpu, &self.renderer) else {
            return Ok(());
        };

        let output = match Acquired::from_surface(gpu.surface.get_current_texture())? {
            Acquired::Ready(texture) => texture,
            Acquired::Reconfigure => {
                gpu.reconfigure();
                return Ok(());
            }
            Acquired::Skip => return Ok(()),
        };

        // Only frames that are actually drawn reveal a point or move the orbit.
        self.state.advance_frame(Instant::now());

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        renderer.render(
            &gpu.device,
            &gpu.queue,
            &view,
            &self.state.camera,
            &self.state.scene,
        );
        output.present();

        if let Some(window) = &self.window {
            window.request_redraw();
        }
        Ok(())
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.init_graphics(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let WindowEvent::Resized(size) = event {
            if let Some(gpu) = &mut self.gpu {
                gpu.resize(size.width, size.height);
            }
        }

        if let WindowEvent::RedrawRequested = event {
            if let Err(err) = self.redraw() {
                self.fail(event_loop, err);
            }
            return;
        }

        if !self.state.apply(map_window_event(&event)) {
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("randomwalk-desktop starting");

    let mut rng = StdRng::from_os_rng();
    let scene = WalkScene::generate(&mut rng, &WalkConfig::default());

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(scene);
    event_loop.run_app(&mut app)?;

    if let Some(err) = app.fatal.take() {
        return Err(err);
    }
    tracing::info!("window closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use randomwalk_walk::generate_trajectory;

    fn state() -> AppState {
        let mut rng = StdRng::seed_from_u64(1);
        let walks = (0..2).map(|_| generate_trajectory(&mut rng, 3, 0.1)).collect();
        AppState::new(WalkScene::new(walks))
    }

    #[test]
    fn scroll_scenario_clamps_distance() {
        let mut s = state();
        assert!(s.apply(Action::Zoom(3.0)));
        assert_eq!(s.camera.distance, 13.0);
        s.apply(Action::Zoom(-20.0));
        assert_eq!(s.camera.distance, 1.0);
    }

    #[test]
    fn resize_updates_aspect() {
        let mut s = state();
        s.apply(Action::Resize {
            width: 1000,
            height: 500,
        });
        assert_eq!(s.camera.aspect, 2.0);
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut s = state();
        assert!(!s.apply(Action::Quit));
    }

    #[test]
    fn frames_reveal_and_rotate() {
        let mut s = state();
        for _ in 0..5 {
            s.update(0.5);
        }
        assert_eq!(s.scene.revealed(), 3);
        assert!(s.camera.orbit_angle > 0.0);
    }

    #[test]
    fn frame_advance_uses_elapsed_time() {
        let mut s = state();
        let start = s.last_frame;
        s.advance_frame(start + std::time::Duration::from_secs(1));
        assert_eq!(s.scene.revealed(), 1);
        assert!((s.camera.orbit_angle - 0.2).abs() < 1e-6);
        assert_eq!(s.last_frame, start + std::time::Duration::from_secs(1));
    }

    #[test]
    fn unavailable_surface_does_not_draw() {
        assert_eq!(
            Acquired::from_surface(Err::<(), _>(wgpu::SurfaceError::Lost)).unwrap(),
            Acquired::Reconfigure
        );
        assert_eq!(
            Acquired::from_surface(Err::<(), _>(wgpu::SurfaceError::Outdated)).unwrap(),
            Acquired::Reconfigure
        );
        assert_eq!(
            Acquired::from_surface(Err::<(), _>(wgpu::SurfaceError::Timeout)).unwrap(),
            Acquired::Skip
        );
        assert_eq!(Acquired::from_surface(Ok(7)).unwrap(), Acquired::Ready(7));
    }

    #[test]
    fn out_of_memory_surface_is_fatal() {
        assert!(Acquired::from_surface(Err::<(), _>(wgpu::SurfaceError::OutOfMemory)).is_err());
    }

    #[test]
    fn summary_reports_camera_and_reveal() {
        let mut s = state();
        s.apply(Action::Zoom(2.0));
        s.update(0.0);
        let text = s.summary();
        assert!(text.contains("revealed=1/3"));
        assert!(text.contains("eye=(0.0, 0.0, 12.0)"));
    }

    #[test]
    fn close_request_maps_to_quit() {
        assert_eq!(map_window_event(&WindowEvent::CloseRequested), Action::Quit);
        assert_eq!(
            map_window_event(&WindowEvent::Resized(PhysicalSize::new(3, 4))),
            Action::Resize {
                width: 3,
                height: 4
            }
        );
    }
}
