use std::ffi::{CStr, CString};
use std::num::NonZeroU32;

use glutin::config::{Config, ConfigTemplateBuilder};
use glutin::context::{ContextApi, ContextAttributesBuilder, PossiblyCurrentContext, Version};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{Surface, SurfaceAttributesBuilder, WindowSurface};
use glutin_winit::DisplayBuilder;

use raw_window_handle::HasRawWindowHandle;

use thiserror::Error;

use winit::dpi::{PhysicalSize, Size};
use winit::event::Event;
use winit::event_loop::{ControlFlow, EventLoop};
use winit::platform::run_return::EventLoopExtRunReturn;
use winit::window::{Window, WindowBuilder};

use gl_wrapper::geometry::{GBError, Geometry, GeometryBuilder, VertexAttribute};
use gl_wrapper::program::{PBError, Program, ProgramBuilder};
use gl_wrapper::renderer::GlRenderer;
use gl_wrapper::texture::{Texture2D, TextureError, TextureFilter, TextureFormats, TextureWrap};
use gl_wrapper::{QUAD, QUAD_INDICES};

use crate::lifecycle::Lifecycle;
use crate::map::MapImage;
use crate::shaders::{
    COLOR_OUTPUT, MAP_FRAG, MAP_SAMPLER, POSITION_ATTRIBUTE, QUAD_VERT, UV_ATTRIBUTE,
};
use crate::view::PlayerView;
use crate::{DEPTH_BITS, STENCIL_BITS, WINDOW_SIZE, WINDOW_TITLE};

pub struct App {
    scene: Scene,
    gl_context: PossiblyCurrentContext,
    gl_window: GlWindow,
    event_loop: EventLoop<()>,
}

impl App {
    pub fn new(map: &MapImage, view: PlayerView) -> Result<Self, AppError> {
        let event_loop = EventLoop::new();
        let window_builder = WindowBuilder::new()
            .with_inner_size(Size::Physical(PhysicalSize::new(WINDOW_SIZE, WINDOW_SIZE)))
            .with_resizable(false)
            .with_title(WINDOW_TITLE);
        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));
        // depth/stencil are ranked in `pick_config` rather than required, so
        // a display without a 24/8 config still yields one
        let template = ConfigTemplateBuilder::new();

        let (window, gl_config) = display_builder
            .build(&event_loop, template, |configs| {
                // the picker cannot return an error, this only fires when the
                // display offers no configs at all
                pick_config(configs, |c| (c.depth_size(), c.stencil_size()))
                    .expect("display offers no GL configs")
            })
            .map_err(|e| AppError::Display(e.to_string()))?;

        if gl_config.depth_size() < DEPTH_BITS || gl_config.stencil_size() < STENCIL_BITS {
            log::warn!(
                "no {DEPTH_BITS}/{STENCIL_BITS} depth/stencil config, using {}/{}",
                gl_config.depth_size(),
                gl_config.stencil_size()
            );
        }

        let window = window.ok_or(AppError::NoWindow)?;
        let handle = window.raw_window_handle();
        let gl_display = gl_config.display();

        log::debug!(
            "picked config: {} depth bits, {} stencil bits",
            gl_config.depth_size(),
            gl_config.stencil_size()
        );

        let context_attr = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .build(Some(handle));

        let gl_window = GlWindow::new(window, &gl_config)?;

        let gl_context = unsafe { gl_display.create_context(&gl_config, &context_attr)? }
            .make_current(&gl_window.surface)?;

        gl::load_with(|s| match CString::new(s) {
            Ok(name) => gl_display.get_proc_address(name.as_c_str()).cast(),
            Err(_) => std::ptr::null(),
        });

        if let Some(version) = gl_version() {
            log::info!("OpenGL {version}");
        }

        let scene = Scene::new(map, view)?;

        Ok(Self {
            scene,
            gl_context,
            gl_window,
            event_loop,
        })
    }

    /// Pumps events and redraws until `lifecycle` reaches a terminal state.
    ///
    /// GL objects are released before this returns, while the context is
    /// still current.
    pub fn run(self, lifecycle: &mut Lifecycle) {
        let App {
            mut scene,
            gl_context,
            gl_window,
            mut event_loop,
        } = self;

        let window_id = gl_window.window.id();

        event_loop.run_return(|event, _window_target, control_flow| {
            *control_flow = ControlFlow::Poll;
            match event {
                Event::WindowEvent { event, window_id: id } if id == window_id => {
                    if lifecycle.window_event(&event) {
                        control_flow.set_exit();
                    }
                }
                Event::MainEventsCleared => {
                    if !lifecycle.is_terminal() {
                        gl_window.window.request_redraw();
                    }
                }
                Event::RedrawRequested(_) => {
                    if lifecycle.is_terminal() {
                        return;
                    }

                    scene.draw();

                    if let Err(e) = gl_window.surface.swap_buffers(&gl_context) {
                        log::error!("Could not present frame: {e}");
                    }
                }
                _ => (),
            }
        });

        drop(scene);
        drop(gl_context);
        drop(gl_window);
    }
}

/// GL objects for the map quad. Fields drop in declaration order, the
/// reverse of creation order.
struct Scene {
    texture: Texture2D,
    program: Program,
    quad: Geometry,
    renderer: GlRenderer,
}

impl Scene {
    fn new(map: &MapImage, view: PlayerView) -> Result<Self, AppError> {
        let quad = GeometryBuilder::new(&QUAD, &QUAD_INDICES)
            .with_attribute(VertexAttribute::Vec2)
            .with_attribute(VertexAttribute::Vec2)
            .build()?;

        let program = ProgramBuilder::new(QUAD_VERT, MAP_FRAG)
            .with_attribute(0, POSITION_ATTRIBUTE)
            .with_attribute(1, UV_ATTRIBUTE)
            .with_output(0, COLOR_OUTPUT)
            .build()?;

        let mut renderer = GlRenderer::new();
        renderer.use_program(&program);
        program.set_i32(MAP_SAMPLER, 0);
        view.apply(&program);

        let texture = Texture2D::new(
            map.width(),
            map.height(),
            map.pixels(),
            TextureFormats::Rgba8,
            TextureFilter::Nearest,
            TextureWrap::ClampToEdge,
        )?;

        Ok(Self {
            texture,
            program,
            quad,
            renderer,
        })
    }

    fn draw(&mut self) {
        self.renderer.clear_color(0.0, 0.0, 0.0);

        self.texture.bind(0);
        self.renderer.draw_indexed(&self.quad, &self.program);

        log::trace!("frame: {:?}", self.renderer.stats());
    }
}

/// Prefers the first config with at least the requested depth and stencil
/// bits, otherwise the one with the most.
pub(crate) fn pick_config<C>(
    configs: impl Iterator<Item = C>,
    bits: impl Fn(&C) -> (u8, u8),
) -> Option<C> {
    let rank = |(depth, stencil): (u8, u8)| {
        if depth >= DEPTH_BITS && stencil >= STENCIL_BITS {
            (true, 0, 0)
        } else {
            (false, depth, stencil)
        }
    };

    configs.reduce(|best, candidate| {
        if rank(bits(&candidate)) > rank(bits(&best)) {
            candidate
        } else {
            best
        }
    })
}

fn gl_version() -> Option<String> {
    let ptr = unsafe { gl::GetString(gl::VERSION) };

    if ptr.is_null() {
        return None;
    }

    let version = unsafe { CStr::from_ptr(ptr.cast()) };

    Some(version.to_string_lossy().into_owned())
}

pub struct GlWindow {
    // XXX the surface must be dropped before the window.
    pub surface: Surface<WindowSurface>,
    pub window: Window,
}

impl GlWindow {
    pub fn new(window: Window, config: &Config) -> Result<Self, AppError> {
        let (width, height): (u32, u32) = window.inner_size().into();
        let raw_window_handle = window.raw_window_handle();
        let attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            raw_window_handle,
            NonZeroU32::new(width).ok_or(AppError::ZeroSizedWindow)?,
            NonZeroU32::new(height).ok_or(AppError::ZeroSizedWindow)?,
        );

        let surface = unsafe { config.display().create_window_surface(config, &attrs)? };

        Ok(Self { surface, window })
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Could not create display: {0}")]
    Display(String),
    #[error("Display did not create a window")]
    NoWindow,
    #[error("Window has zero width or height")]
    ZeroSizedWindow,
    #[error(transparent)]
    Context(#[from] glutin::error::Error),
    #[error("Could not upload quad: {0}")]
    Geometry(#[from] GBError),
    #[error("Could not build shader program: {0}")]
    Program(#[from] PBError),
    #[error("Could not upload map texture: {0}")]
    Texture(#[from] TextureError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pick(configs: &[(u8, u8)]) -> Option<(u8, u8)> {
        pick_config(configs.iter().copied(), |c| *c)
    }

    #[test]
    fn first_matching_config_wins() {
        assert_eq!(pick(&[(16, 0), (24, 8), (32, 8)]), Some((24, 8)));
        assert_eq!(pick(&[(32, 8), (24, 8)]), Some((32, 8)));
    }

    #[test]
    fn falls_back_to_deepest() {
        assert_eq!(pick(&[(0, 0), (16, 0), (24, 0)]), Some((24, 0)));
        assert_eq!(pick(&[(16, 8), (16, 0)]), Some((16, 8)));
    }

    #[test]
    fn single_config_always_picked() {
        assert_eq!(pick(&[(0, 0)]), Some((0, 0)));
    }

    #[test]
    fn empty_list_yields_none() {
        assert_eq!(pick(&[]), None);
    }
}
