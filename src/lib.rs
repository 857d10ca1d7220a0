pub mod app;
pub mod args;
pub mod lifecycle;
pub mod map;
pub mod shaders;
pub mod view;

pub const WINDOW_TITLE: &str = "OpenGL";
pub const WINDOW_SIZE: u32 = 512;
pub const DEPTH_BITS: u8 = 24;
pub const STENCIL_BITS: u8 = 8;

pub const DEFAULT_MAP_PATH: &str = "./map.bmp";
/// Expected edge length of the map bitmap, in pixels.
pub const MAP_SIZE: u32 = 20;

/// Printed to stdout when the map cannot be loaded.
pub const NO_MAP_MESSAGE: &str = "no map data";

pub const EXIT_OK: u8 = 0;
pub const EXIT_MAP_FAILED: u8 = 1;
pub const EXIT_GL_FAILED: u8 = 2;
