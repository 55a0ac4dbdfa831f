//! Platform layer: window, GL context and the frame loop.
//!
//! Design goals:
//! - Own the winit event loop and the glutin display/context/surface.
//! - Hand a ready `glow::Context` to a [`FrameHandler`] and drive it.
//! - Clear log messages to help future debugging.
//!
//! The loop clears the framebuffer before each frame and swaps after it, so
//! handlers only update state, push uniforms and draw.

use std::ffi::CString;
use std::num::NonZeroU32;

use anyhow::{Context as _, Result, anyhow};
use glow::HasContext;
use glutin::config::ConfigTemplateBuilder;
use glutin::context::{ContextApi, ContextAttributesBuilder, PossiblyCurrentContext, Version};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface};
use glutin_winit::DisplayBuilder;
use raw_window_handle::HasWindowHandle;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowId};

/// Background color for every frame (dark blue-gray).
const CLEAR_COLOR: [f32; 4] = [0.05, 0.05, 0.08, 1.0];

/// Window and context options for [`run`].
#[derive(Clone, Debug)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Zarya3D".to_string(),
            width: 800,
            height: 600,
            vsync: true,
        }
    }
}

/// Callbacks driven by the frame loop. Every method runs on the event-loop
/// thread that owns the GL context.
pub trait FrameHandler {
    /// One-time resource setup, right after the context became current.
    fn init(&mut self, gl: &glow::Context) -> Result<()>;

    /// One frame: update state, push uniforms, draw. The framebuffer is
    /// already cleared; buffers are swapped after this returns.
    fn frame(&mut self, gl: &glow::Context, width: u32, height: u32) -> Result<()>;

    /// Release GL resources; the context is still current here.
    fn term(&mut self, _gl: &glow::Context) {}
}

/// Open the window, run `handler` until the window closes, then tear down.
/// Handler errors abort the loop and surface here.
pub fn run<H: FrameHandler>(config: WindowConfig, handler: H) -> Result<()> {
    // Event loop creation (new API with Result return).
    let event_loop: EventLoop<()> = EventLoop::new().expect("Failed to create event loop");
    let mut app = App {
        config,
        handler,
        gl_window: None,
        error: None,
    };
    event_loop
        .run_app(&mut app)
        .map_err(|e| anyhow!("Event loop error: {e:?}"))?;
    match app.error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct GlWindow {
    window: Window,
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    gl: glow::Context,
}

struct App<H: FrameHandler> {
    config: WindowConfig,
    handler: H,
    gl_window: Option<GlWindow>,
    error: Option<anyhow::Error>,
}

impl<H: FrameHandler> App<H> {
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.error = Some(err);
        event_loop.exit();
    }
}

impl<H: FrameHandler> ApplicationHandler for App<H> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gl_window.is_some() {
            return;
        }
        let glw = match create_gl_window(event_loop, &self.config) {
            Ok(glw) => glw,
            Err(err) => return self.fail(event_loop, err.context("Window setup failed")),
        };
        if let Err(err) = self.handler.init(&glw.gl) {
            return self.fail(event_loop, err.context("Handler init failed"));
        }
        glw.window.request_redraw();
        self.gl_window = Some(glw);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(glw) = self.gl_window.as_mut() else {
            return;
        };
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested. Exiting event loop.");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                log::info!("Resized: {}x{}", new_size.width, new_size.height);
                glw.surface.resize(
                    &glw.context,
                    NonZeroU32::new(new_size.width).unwrap_or(NonZeroU32::MIN),
                    NonZeroU32::new(new_size.height).unwrap_or(NonZeroU32::MIN),
                );
                glw.window.request_redraw();
            }
            WindowEvent::RedrawRequested => {
                let size = glw.window.inner_size();
                let (width, height) = (size.width.max(1), size.height.max(1));
                unsafe {
                    glw.gl.viewport(0, 0, width as i32, height as i32);
                    glw.gl.clear_color(
                        CLEAR_COLOR[0],
                        CLEAR_COLOR[1],
                        CLEAR_COLOR[2],
                        CLEAR_COLOR[3],
                    );
                    glw.gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
                }
                if let Err(err) = self.handler.frame(&glw.gl, width, height) {
                    let err = err.context("Handler frame failed");
                    log::error!("{err:#}");
                    self.error = Some(err);
                    event_loop.exit();
                    return;
                }
                if let Err(err) = glw.surface.swap_buffers(&glw.context) {
                    let err = anyhow!("Failed to swap buffers: {err}");
                    log::error!("{err:#}");
                    self.error = Some(err);
                    event_loop.exit();
                    return;
                }
                // Keep the redraw chain going; this is a continuous demo.
                glw.window.request_redraw();
            }
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(glw) = self.gl_window.as_mut() {
            self.handler.term(&glw.gl);
        }
    }
}

fn create_gl_window(event_loop: &ActiveEventLoop, config: &WindowConfig) -> Result<GlWindow> {
    let window_attributes = Window::default_attributes()
        .with_title(config.title.clone())
        .with_inner_size(PhysicalSize::new(config.width.max(1), config.height.max(1)));

    // 24-bit depth so the depth test has something to test against.
    let template = ConfigTemplateBuilder::new().with_depth_size(24);
    let (window, gl_config) = DisplayBuilder::new()
        .with_window_attributes(Some(window_attributes))
        .build(event_loop, template, |mut configs| {
            configs
                .next()
                .expect("display returned no matching GL config")
        })
        .map_err(|e| anyhow!("Failed to create window and pick GL config: {e}"))?;
    let window = window.context("Display builder returned no window")?;

    let display = gl_config.display();
    let raw_window_handle = window
        .window_handle()
        .map_err(|e| anyhow!("Failed to get window handle: {e}"))?
        .as_raw();

    // Uniforms are addressed via layout(location = N), which needs 4.3.
    let context_attributes = ContextAttributesBuilder::new()
        .with_context_api(ContextApi::OpenGl(Some(Version::new(4, 3))))
        .build(Some(raw_window_handle));
    let not_current = unsafe { display.create_context(&gl_config, &context_attributes) }
        .context("Failed to create GL context")?;

    let size = window.inner_size();
    let surface_attributes = SurfaceAttributesBuilder::<WindowSurface>::new().build(
        raw_window_handle,
        NonZeroU32::new(size.width).unwrap_or(NonZeroU32::MIN),
        NonZeroU32::new(size.height).unwrap_or(NonZeroU32::MIN),
    );
    let surface = unsafe { display.create_window_surface(&gl_config, &surface_attributes) }
        .context("Failed to create window surface")?;
    let context = not_current
        .make_current(&surface)
        .context("Failed to make GL context current")?;

    let gl = unsafe {
        glow::Context::from_loader_function(|symbol| {
            let symbol = CString::new(symbol).expect("GL symbol name contained NUL");
            display.get_proc_address(&symbol) as *const _
        })
    };

    let swap = if config.vsync {
        SwapInterval::Wait(NonZeroU32::MIN)
    } else {
        SwapInterval::DontWait
    };
    if let Err(err) = surface.set_swap_interval(&context, swap) {
        log::warn!("Failed to set swap interval: {err}");
    }

    unsafe {
        gl.enable(glow::DEPTH_TEST);
        log::info!("GL version: {}", gl.get_parameter_string(glow::VERSION));
    }
    log::info!("Window created: {}x{}", size.width, size.height);

    Ok(GlWindow {
        window,
        surface,
        context,
        gl,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = WindowConfig::default();
        assert_eq!((config.width, config.height), (800, 600));
        assert_eq!(config.title, "Zarya3D");
        assert!(config.vsync);
    }
}
