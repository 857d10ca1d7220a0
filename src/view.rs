use gl_wrapper::program::Program;

use crate::shaders::{LOOK_DIR_UNIFORM, PLAYER_POS_UNIFORM};

/// Player placement handed to the map shader once at startup.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PlayerView {
    pub player_pos: [f32; 2],
    pub look_dir: [f32; 2],
}

impl Default for PlayerView {
    fn default() -> Self {
        Self {
            player_pos: [64.5, 64.5],
            look_dir: [1.0, 0.0],
        }
    }
}

impl PlayerView {
    /// `program` must be in use.
    pub fn apply(&self, program: &Program) {
        let uniforms = [
            (PLAYER_POS_UNIFORM, self.player_pos),
            (LOOK_DIR_UNIFORM, self.look_dir),
        ];

        for (name, value) in uniforms {
            if !program.set_vec2(name, value) {
                log::debug!("{name} = {value:?} has no effect, uniform is inactive");
            }
        }
    }
}
