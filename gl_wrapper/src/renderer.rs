use crate::geometry::Geometry;
use crate::program::Program;

/// Counters for the draw calls issued since the last [`GlRenderer::clear_color`].
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct FrameStats {
    pub draw_calls: usize,
    pub indices: usize,
}

pub struct GlRenderer {
    current_program: u32,
    stats: FrameStats,
}

impl GlRenderer {
    pub fn new() -> Self {
        Self {
            current_program: 0,
            stats: FrameStats::default(),
        }
    }

    pub fn use_program(&mut self, program: &Program) {
        let p_id = program.get_id();
        if self.current_program != p_id {
            unsafe { gl::UseProgram(p_id) }
            self.current_program = p_id;
        }
    }

    pub fn draw_indexed(&mut self, geometry: &Geometry, program: &Program) {
        self.use_program(program);

        unsafe {
            gl::BindVertexArray(geometry.vao());
            gl::DrawElements(
                gl::TRIANGLES,
                geometry.indices() as i32,
                gl::UNSIGNED_INT,
                std::ptr::null(),
            );
        }

        self.stats.draw_calls += 1;
        self.stats.indices += geometry.indices();
    }

    /// Clears the color buffer and starts a new frame.
    pub fn clear_color(&mut self, r: f32, g: f32, b: f32) {
        unsafe {
            gl::ClearColor(r, g, b, 1.0);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }

        self.stats = FrameStats::default();
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }
}

impl Default for GlRenderer {
    fn default() -> Self {
        Self::new()
    }
}
