use std::{ffi::CString, num::NonZeroU32, time::Duration};

use glutin::{
    config::{Config, ConfigTemplateBuilder, GlConfig},
    context::{
        ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext,
        PossiblyCurrentContext, Version,
    },
    display::{GetGlDisplay, GlDisplay},
    surface::{GlSurface, Surface, SwapInterval, WindowSurface},
};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasWindowHandle;
use tracing::{debug, error, info};
use winit::{
    application::ApplicationHandler,
    dpi::{PhysicalPosition, PhysicalSize, Position, Size},
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    platform::pump_events::{EventLoopExtPumpEvents, PumpStatus},
    window::{Window, WindowAttributes, WindowId},
};

use super::internal_game_loop::Presenter;
use crate::{
    application_context::Command,
    common::{application_builder::ApplicationBuilder, color::Color, errors::SteadyError, gl, helpers},
};

/// Pumps allowed for the event loop to deliver `resumed` before giving up.
const WINDOW_CREATION_PUMPS: usize = 16;

/// Window, GL surface and context, released together on drop.
struct WindowState {
    gl_surface: Surface<WindowSurface>,
    gl_context: PossiblyCurrentContext,
    window: Window,
}

struct InnerApplication {
    builder: ApplicationBuilder,
    state: Option<WindowState>,
    creation_error: Option<SteadyError>,
    close_requested: bool,
    framebuffer_size: (u32, u32),
}

impl InnerApplication {
    fn new(builder: ApplicationBuilder) -> Self {
        let framebuffer_size = builder.window_size;
        Self {
            builder,
            state: None,
            creation_error: None,
            close_requested: false,
            framebuffer_size,
        }
    }

    fn window_attributes(&self) -> WindowAttributes {
        let (width, height) = self.builder.window_size;
        let mut attributes = Window::default_attributes()
            .with_title(self.builder.title.clone())
            .with_inner_size(Size::Physical(PhysicalSize::new(width, height)))
            .with_resizable(self.builder.resizable);
        if let Some((x, y)) = self.builder.window_position {
            attributes = attributes.with_position(Position::Physical(PhysicalPosition::new(x, y)));
        }
        attributes
    }

    fn create_window_state(&mut self, event_loop: &ActiveEventLoop) -> Result<WindowState, SteadyError> {
        let window_attributes = self.window_attributes();
        let msaa = self.builder.msaa_samples;
        let display_builder =
            DisplayBuilder::new().with_window_attributes(Some(window_attributes.clone()));
        let (window, gl_config) = display_builder
            .build(event_loop, ConfigTemplateBuilder::new(), |configs| {
                gl_config_picker(configs, msaa)
            })
            .map_err(SteadyError::InternalError)?;
        info!("Picked a config with {} samples", gl_config.num_samples());

        let raw_window_handle = window
            .as_ref()
            .and_then(|window| window.window_handle().ok())
            .map(|handle| handle.as_raw());
        let gl_display = gl_config.display();
        let (major, minor) = self.builder.gl_version;
        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
            .with_profile(GlProfile::Core)
            .build(raw_window_handle);
        let not_current_gl_context =
            unsafe { gl_display.create_context(&gl_config, &context_attributes)? };

        let window = match window {
            Some(window) => window,
            None => glutin_winit::finalize_window(event_loop, window_attributes, &gl_config)?,
        };
        window.set_cursor_visible(self.builder.mouse_cursor_visible);

        let attrs = window.build_surface_attributes(Default::default())?;
        let gl_surface = unsafe { gl_display.create_window_surface(&gl_config, &attrs)? };
        let gl_context = not_current_gl_context.make_current(&gl_surface)?;

        gl::load_with(|symbol| match CString::new(symbol) {
            Ok(symbol) => gl_display.get_proc_address(symbol.as_c_str()).cast(),
            Err(_) => std::ptr::null(),
        });

        let interval = if self.builder.vsync {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        if let Err(res) = gl_surface.set_swap_interval(&gl_context, interval) {
            error!("Error setting vsync: {res:?}");
        }

        let size = window.inner_size();
        self.framebuffer_size = (size.width, size.height);
        unsafe {
            helpers::log_driver_info();
            helpers::set_viewport(size.width, size.height);
            helpers::check_gl_error()?;
        }

        Ok(WindowState {
            gl_surface,
            gl_context,
            window,
        })
    }
}

impl ApplicationHandler for InnerApplication {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() || self.creation_error.is_some() {
            return;
        }
        match self.create_window_state(event_loop) {
            Ok(state) => self.state = Some(state),
            Err(e) => self.creation_error = Some(e),
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::Resized(size) if size.width != 0 && size.height != 0 => {
                if let Some(WindowState {
                    gl_surface,
                    gl_context,
                    window: _,
                }) = self.state.as_ref()
                {
                    gl_surface.resize(
                        gl_context,
                        NonZeroU32::new(size.width).unwrap_or(NonZeroU32::MIN),
                        NonZeroU32::new(size.height).unwrap_or(NonZeroU32::MIN),
                    );
                    unsafe { helpers::set_viewport(size.width, size.height) };
                    self.framebuffer_size = (size.width, size.height);
                }
            }
            WindowEvent::CloseRequested => {
                debug!("window close requested");
                self.close_requested = true;
            }
            _ => (),
        }
    }
}

/// Poll-driven window with a current OpenGL context.
pub(crate) struct Platform {
    // declared first so the window and context go before the event loop
    app: InnerApplication,
    event_loop: EventLoop<()>,
}

impl Platform {
    pub(crate) fn new(builder: ApplicationBuilder) -> Result<Self, SteadyError> {
        let mut event_loop = EventLoop::new()?;
        let mut app = InnerApplication::new(builder);

        for _ in 0..WINDOW_CREATION_PUMPS {
            if let PumpStatus::Exit(code) = event_loop.pump_app_events(Some(Duration::ZERO), &mut app) {
                return Err(SteadyError::UnexpectedExit(code));
            }
            if let Some(e) = app.creation_error.take() {
                return Err(e);
            }
            if app.state.is_some() {
                info!("created window {:?}", app.builder.title);
                return Ok(Self { app, event_loop });
            }
        }
        Err(SteadyError::WindowNotCreated)
    }

    fn pump(&mut self) -> Result<(), SteadyError> {
        match self.event_loop.pump_app_events(Some(Duration::ZERO), &mut self.app) {
            PumpStatus::Continue => Ok(()),
            PumpStatus::Exit(code) => Err(SteadyError::UnexpectedExit(code)),
        }
    }
}

impl Presenter for Platform {
    fn close_requested(&self) -> bool {
        self.app.close_requested
    }

    fn framebuffer_size(&self) -> (u32, u32) {
        self.app.framebuffer_size
    }

    fn clear(&mut self, changed: Option<Color>) {
        unsafe { helpers::clear(changed) };
    }

    fn apply(&mut self, command: Command) {
        let Some(state) = self.app.state.as_ref() else {
            return;
        };
        match command {
            Command::CursorVisible(enable) => state.window.set_cursor_visible(enable),
            Command::Title(title) => state.window.set_title(&title),
            Command::Exit => (),
        }
    }

    fn present_and_poll(&mut self) -> Result<(), SteadyError> {
        if let Some(state) = self.app.state.as_ref() {
            state.window.pre_present_notify();
            state.gl_surface.swap_buffers(&state.gl_context)?;
        }
        self.pump()
    }
}

impl Drop for Platform {
    fn drop(&mut self) {
        if self.app.state.take().is_some() {
            debug!("released window and GL context");
        }
    }
}

fn gl_config_picker(configs: Box<dyn Iterator<Item = Config> + '_>, msaa: Option<u8>) -> Config {
    configs
        .reduce(|best, config| {
            let matches = |c: &Config| Some(c.num_samples()) == msaa;
            if matches(&best) {
                best
            } else if matches(&config) || config.num_samples() > best.num_samples() {
                config
            } else {
                best
            }
        })
        // glutin only calls the picker with a non-empty set
        .expect("display offered no GL configs")
}
