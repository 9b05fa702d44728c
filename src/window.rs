use std::ffi::{CStr, CString};
use std::num::NonZeroU32;
use std::time::Duration;

use glam::Vec4;
use glutin::{
    config::{Config, ConfigTemplateBuilder},
    context::{ContextApi, ContextAttributesBuilder, NotCurrentContext, PossiblyCurrentContext, Version},
    display::{Display, GetGlDisplay},
    prelude::*,
    surface::{Surface, SwapInterval, WindowSurface},
};
use glutin_winit::{DisplayBuilder, GlWindow};
use log::{debug, info, warn};
use raw_window_handle::{HasRawWindowHandle, RawWindowHandle};
use thiserror::Error;
use winit::{
    dpi::LogicalSize,
    event::{DeviceEvent, ElementState, Event, KeyEvent, MouseScrollDelta, WindowEvent},
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    platform::pump_events::{EventLoopExtPumpEvents, PumpStatus},
    window::{CursorGrabMode, WindowBuilder},
};

use crate::config::WindowOptions;
use crate::input::{InputEvent, KeyboardState};
use crate::render::core::set_viewport;
use crate::ui::TextOverlay;
use crate::utils::FrameClock;

/// Pixel scroll deltas (touchpads) are scaled down to roughly one wheel notch.
const PIXELS_PER_LINE: f32 = 20.0;

#[derive(Error, Debug)]
pub enum WindowError {
    #[error("Failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("Failed to create display or window: {0}")]
    Display(String),
    #[error("No window was created alongside the GL config")]
    MissingWindow,
    #[error("Failed to create OpenGL {major}.{minor} context: {source}")]
    ContextCreation {
        major: u8,
        minor: u8,
        #[source]
        source: glutin::error::Error,
    },
    #[error("Failed to create window surface: {0}")]
    Surface(#[source] glutin::error::Error),
    #[error("Failed to make context current: {0}")]
    MakeCurrent(#[source] glutin::error::Error),
    #[error("Failed to load OpenGL function pointers")]
    LoaderInit,
    #[error("Failed to swap buffers: {0}")]
    SwapBuffers(#[source] glutin::error::Error),
    #[error("Failed to change swap interval: {0}")]
    VSync(#[source] glutin::error::Error),
}

/// A window with a current OpenGL context, polled once per frame.
///
/// Field order matters: the overlay releases its GL objects while the
/// context is still alive, and the surface and context are dropped before
/// the native window they render into.
pub struct Window {
    overlay: Option<TextOverlay>,
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    window: winit::window::Window,
    event_loop: EventLoop<()>,
    options: WindowOptions,
    clock: FrameClock,
    keyboard: KeyboardState,
    clear_colour: Vec4,
    framebuffer_size: (u32, u32),
    cursor_captured: bool,
    vsync: bool,
    should_close: bool,
}

impl Window {
    pub fn new(options: WindowOptions) -> Result<Self, WindowError> {
        let event_loop = EventLoop::new()?;

        let window_builder = WindowBuilder::new()
            .with_title(options.title.clone())
            .with_inner_size(LogicalSize::new(options.width, options.height))
            .with_resizable(options.resizable);

        let template = ConfigTemplateBuilder::new()
            .with_alpha_size(8)
            .with_depth_size(24)
            .with_stencil_size(8);

        let (window, gl_config) = DisplayBuilder::new()
            .with_window_builder(Some(window_builder))
            .build(&event_loop, template, pick_config)
            .map_err(|e| WindowError::Display(e.to_string()))?;
        let window = window.ok_or(WindowError::MissingWindow)?;

        let gl_display = gl_config.display();
        let raw_window_handle = window.raw_window_handle();
        let not_current = create_context(&gl_display, &gl_config, &options, raw_window_handle)?;

        let attrs = window.build_surface_attributes(Default::default());
        let surface = unsafe {
            gl_display
                .create_window_surface(&gl_config, &attrs)
                .map_err(WindowError::Surface)?
        };
        let context = not_current
            .make_current(&surface)
            .map_err(WindowError::MakeCurrent)?;

        gl::load_with(|symbol| match CString::new(symbol) {
            Ok(symbol) => gl_display.get_proc_address(symbol.as_c_str()) as *const _,
            Err(_) => std::ptr::null(),
        });
        if !gl::ClearColor::is_loaded() || !gl::Viewport::is_loaded() {
            return Err(WindowError::LoaderInit);
        }
        log_gl_info();

        let overlay = if options.overlay {
            TextOverlay::new(&window, &gl_display)
                .map_err(|e| warn!("{}, continuing without overlay", e))
                .ok()
        } else {
            None
        };

        let size = window.inner_size();
        let mut window = Self {
            overlay,
            surface,
            context,
            window,
            event_loop,
            framebuffer_size: (size.width, size.height),
            clock: FrameClock::new(),
            keyboard: KeyboardState::new(),
            clear_colour: Vec4::new(0.2, 0.3, 0.3, 1.0),
            cursor_captured: false,
            vsync: false,
            should_close: false,
            options,
        };

        if let Err(e) = window.set_vsync(window.options.vsync) {
            warn!("{}", e);
        }
        set_viewport(size.width, size.height);

        info!(
            "Created window \"{}\" ({}x{} framebuffer)",
            window.options.title, size.width, size.height
        );
        Ok(window)
    }

    /// Advances the frame clock. Call once at the top of every frame.
    pub fn update_time(&mut self) {
        self.clock.tick();
    }

    /// Seconds between the two most recent `update_time` calls.
    pub fn delta_time(&self) -> f32 {
        self.clock.delta_time()
    }

    /// Seconds since the window was created.
    pub fn time(&self) -> f64 {
        self.clock.elapsed()
    }

    pub fn set_clear_colour(&mut self, colour: Vec4) {
        self.clear_colour = colour;
    }

    pub fn clear(&self) {
        let c = self.clear_colour;
        unsafe {
            gl::ClearColor(c.x, c.y, c.z, c.w);
            gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
        }
    }

    pub fn swap_buffers(&self) -> Result<(), WindowError> {
        self.surface
            .swap_buffers(&self.context)
            .map_err(WindowError::SwapBuffers)
    }

    /// Drains pending window-system events without blocking and returns the
    /// ones a lesson may care about. Resizes and close requests are handled
    /// here before being reported.
    pub fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut pending = Vec::new();
        let status = self
            .event_loop
            .pump_events(Some(Duration::ZERO), |event, _| pending.push(event));

        if let PumpStatus::Exit(code) = status {
            debug!("Event loop exited with code {}", code);
            self.should_close = true;
        }

        let mut events = Vec::new();
        for event in pending {
            match event {
                Event::WindowEvent { event, .. } => self.handle_window_event(event, &mut events),
                Event::DeviceEvent {
                    event: DeviceEvent::MouseMotion { delta: (dx, dy) },
                    ..
                } if self.cursor_captured => events.push(InputEvent::MouseMotion { dx, dy }),
                _ => {}
            }
        }
        events
    }

    fn handle_window_event(&mut self, event: WindowEvent, events: &mut Vec<InputEvent>) {
        match event {
            WindowEvent::CloseRequested => self.should_close = true,
            WindowEvent::Resized(size) => {
                // Minimising reports a zero size, which the surface rejects.
                if let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) {
                    self.surface.resize(&self.context, w, h);
                    set_viewport(size.width, size.height);
                    self.framebuffer_size = (size.width, size.height);
                    events.push(InputEvent::Resized {
                        width: size.width,
                        height: size.height,
                    });
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        repeat,
                        ..
                    },
                ..
            } => {
                let pressed = state == ElementState::Pressed;
                self.keyboard.handle_key(code, pressed);
                if !pressed {
                    events.push(InputEvent::KeyReleased(code));
                } else if !repeat {
                    events.push(InputEvent::KeyPressed(code));
                }
            }
            WindowEvent::CursorMoved { position, .. } if !self.cursor_captured => {
                events.push(InputEvent::CursorMoved {
                    x: position.x,
                    y: position.y,
                });
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let (x, y) = match delta {
                    MouseScrollDelta::LineDelta(x, y) => (x, y),
                    MouseScrollDelta::PixelDelta(p) => {
                        (p.x as f32 / PIXELS_PER_LINE, p.y as f32 / PIXELS_PER_LINE)
                    }
                };
                events.push(InputEvent::Scroll { x, y });
            }
            WindowEvent::Focused(false) => self.keyboard.release_all(),
            _ => {}
        }
    }

    pub fn should_close(&self) -> bool {
        self.should_close
    }

    pub fn set_should_close(&mut self, should_close: bool) {
        self.should_close = should_close;
    }

    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keyboard.is_pressed(key)
    }

    pub fn keyboard(&self) -> &KeyboardState {
        &self.keyboard
    }

    /// Hides and grabs the cursor for mouse-look. Mouse input is then
    /// reported as `InputEvent::MouseMotion` instead of `CursorMoved`.
    pub fn capture_cursor(&mut self) {
        let grabbed = self
            .window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| self.window.set_cursor_grab(CursorGrabMode::Confined));
        if let Err(e) = grabbed {
            warn!("Cursor grab unavailable: {}", e);
        }
        self.window.set_cursor_visible(false);
        self.cursor_captured = true;
    }

    pub fn has_overlay(&self) -> bool {
        self.overlay.is_some()
    }

    /// Draws `text` in the top-left corner when the overlay is enabled. Call
    /// after the scene and before `swap_buffers`.
    pub fn draw_overlay(&mut self, text: &str) {
        if let Some(overlay) = &mut self.overlay {
            overlay.draw(&self.window, text);
        }
    }

    pub fn set_title(&self, title: &str) {
        self.window.set_title(title);
    }

    /// Requested width in logical units.
    pub fn width(&self) -> u32 {
        self.options.width
    }

    pub fn height(&self) -> u32 {
        self.options.height
    }

    pub fn framebuffer_width(&self) -> u32 {
        self.framebuffer_size.0
    }

    pub fn framebuffer_height(&self) -> u32 {
        self.framebuffer_size.1
    }

    pub fn aspect_ratio(&self) -> f32 {
        let (w, h) = self.framebuffer_size;
        w.max(1) as f32 / h.max(1) as f32
    }

    pub fn is_vsync(&self) -> bool {
        self.vsync
    }

    pub fn set_vsync(&mut self, enabled: bool) -> Result<(), WindowError> {
        let interval = if enabled {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        self.surface
            .set_swap_interval(&self.context, interval)
            .map_err(WindowError::VSync)?;
        self.vsync = enabled;
        Ok(())
    }

    pub fn options(&self) -> &WindowOptions {
        &self.options
    }
}

fn pick_config(configs: Box<dyn Iterator<Item = Config> + '_>) -> Config {
    // glutin reports BadConfig before calling the picker when nothing matches
    // the template, so the iterator is never empty here.
    configs
        .reduce(|best, config| {
            if config.num_samples() > best.num_samples() {
                config
            } else {
                best
            }
        })
        .expect("glutin passes at least one config to the picker")
}

fn create_context(
    display: &Display,
    config: &Config,
    options: &WindowOptions,
    raw_window_handle: RawWindowHandle,
) -> Result<NotCurrentContext, WindowError> {
    let mut attributes = ContextAttributesBuilder::new().with_context_api(ContextApi::OpenGl(Some(
        Version::new(options.gl_major, options.gl_minor),
    )));
    if let Some(profile) = options.profile.to_glutin() {
        attributes = attributes.with_profile(profile);
    }
    let attributes = attributes.build(Some(raw_window_handle));

    match unsafe { display.create_context(config, &attributes) } {
        Ok(context) => Ok(context),
        Err(e) if !options.is_fallback_context() => {
            warn!(
                "OpenGL {}.{} {:?} unavailable ({}), falling back to 3.3 core",
                options.gl_major, options.gl_minor, options.profile, e
            );
            let fallback = ContextAttributesBuilder::new()
                .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
                .with_profile(glutin::context::GlProfile::Core)
                .build(Some(raw_window_handle));
            unsafe { display.create_context(config, &fallback) }.map_err(|source| {
                WindowError::ContextCreation {
                    major: 3,
                    minor: 3,
                    source,
                }
            })
        }
        Err(source) => Err(WindowError::ContextCreation {
            major: options.gl_major,
            minor: options.gl_minor,
            source,
        }),
    }
}

fn log_gl_info() {
    let read = |name: gl::types::GLenum| unsafe {
        let ptr = gl::GetString(name);
        if ptr.is_null() {
            String::from("unknown")
        } else {
            CStr::from_ptr(ptr as *const _).to_string_lossy().into_owned()
        }
    };
    info!("OpenGL version: {}", read(gl::VERSION));
    info!("Renderer: {}", read(gl::RENDERER));
}
