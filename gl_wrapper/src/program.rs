use gl::types::{GLenum, GLint, GLuint};
use std::ffi::{c_char, CString, NulError};
use thiserror::Error;

pub struct ProgramBuilder {
    vert: String,
    frag: String,
    attributes: Vec<(u32, String)>,
    outputs: Vec<(u32, String)>,
}

impl ProgramBuilder {
    pub fn new(vert_src: &str, frag_src: &str) -> Self {
        Self {
            vert: vert_src.to_owned(),
            frag: frag_src.to_owned(),
            attributes: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Binds vertex input `name` to attribute slot `index` before linking.
    pub fn with_attribute(mut self, index: u32, name: &str) -> Self {
        self.attributes.push((index, name.to_owned()));
        self
    }

    /// Binds fragment output `name` to color attachment `index` before linking.
    pub fn with_output(mut self, index: u32, name: &str) -> Self {
        self.outputs.push((index, name.to_owned()));
        self
    }

    pub fn build(self) -> Result<Program, PBError> {
        let vert = CString::new(self.vert)?;
        let frag = CString::new(self.frag)?;
        let attributes = to_c_names(self.attributes)?;
        let outputs = to_c_names(self.outputs)?;

        let vert = compile(gl::VERTEX_SHADER, &vert)?;
        let frag = match compile(gl::FRAGMENT_SHADER, &frag) {
            Ok(frag) => frag,
            Err(e) => {
                unsafe { gl::DeleteShader(vert) };
                return Err(e);
            }
        };

        let mut success: i32 = 0;

        unsafe {
            let program = gl::CreateProgram();
            gl::AttachShader(program, vert);
            gl::AttachShader(program, frag);

            for (index, name) in &attributes {
                gl::BindAttribLocation(program, *index, name.as_ptr());
            }

            for (index, name) in &outputs {
                gl::BindFragDataLocation(program, *index, name.as_ptr());
            }

            gl::LinkProgram(program);

            gl::DetachShader(program, vert);
            gl::DetachShader(program, frag);
            gl::DeleteShader(vert);
            gl::DeleteShader(frag);

            gl::GetProgramiv(program, gl::LINK_STATUS, (&mut success) as *mut i32);
            if success != 1 {
                let log = info_log(program, gl::GetProgramInfoLog);
                gl::DeleteProgram(program);

                return Err(PBError::Linking(log));
            }

            log::debug!("linked program {program}");

            Ok(Program { id: program })
        }
    }
}

fn to_c_names(names: Vec<(u32, String)>) -> Result<Vec<(u32, CString)>, NulError> {
    names
        .into_iter()
        .map(|(index, name)| Ok((index, CString::new(name)?)))
        .collect()
}

fn compile(kind: GLenum, src: &CString) -> Result<GLuint, PBError> {
    let mut success: i32 = 0;

    unsafe {
        let shader = gl::CreateShader(kind);

        gl::ShaderSource(
            shader,
            1,
            (&src.as_ptr()) as *const *const c_char,
            std::ptr::null(),
        );

        gl::CompileShader(shader);
        gl::GetShaderiv(shader, gl::COMPILE_STATUS, (&mut success) as *mut i32);
        if success != 1 {
            let log = info_log(shader, gl::GetShaderInfoLog);
            gl::DeleteShader(shader);

            return Err(PBError::Compilation(log));
        }

        Ok(shader)
    }
}

type InfoLogFn = unsafe fn(GLuint, i32, *mut i32, *mut c_char);

unsafe fn info_log(id: GLuint, getter: InfoLogFn) -> String {
    let mut buf = [0_u8; 1024];

    getter(
        id,
        buf.len() as i32,
        std::ptr::null_mut(),
        buf.as_mut_ptr() as *mut c_char,
    );

    let data = buf.split(|a| *a == 0).next().unwrap_or(&buf[..]);

    String::from_utf8_lossy(data).into_owned()
}

#[derive(Debug, Error)]
pub enum PBError {
    #[error("Shader source contains a NUL byte: {0}")]
    InvalidSource(#[from] NulError),
    #[error("{0}")]
    Compilation(String),
    #[error("{0}")]
    Linking(String),
}

pub struct Program {
    id: GLuint,
}

impl Program {
    pub fn get_id(&self) -> GLuint {
        self.id
    }

    /// `None` when `name` is not an active uniform, which includes uniforms
    /// the compiler dropped because nothing reads them.
    pub fn uniform_location(&self, name: &str) -> Option<GLint> {
        let c_name = CString::new(name).ok()?;
        let location = unsafe { gl::GetUniformLocation(self.id, c_name.as_ptr()) };

        (location != -1).then_some(location)
    }

    /// The program must be in use. Returns whether the uniform is active.
    pub fn set_i32(&self, name: &str, value: i32) -> bool {
        match self.uniform_location(name) {
            Some(location) => {
                unsafe { gl::Uniform1i(location, value) };
                true
            }
            None => {
                log::debug!("uniform {name} is not active in program {}", self.id);
                false
            }
        }
    }

    /// The program must be in use. Returns whether the uniform is active.
    pub fn set_vec2(&self, name: &str, value: [f32; 2]) -> bool {
        match self.uniform_location(name) {
            Some(location) => {
                unsafe { gl::Uniform2f(location, value[0], value[1]) };
                true
            }
            None => {
                log::debug!("uniform {name} is not active in program {}", self.id);
                false
            }
        }
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        unsafe { gl::DeleteProgram(self.id) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nul_in_source_fails_before_gl() {
        let res = ProgramBuilder::new("void main() {}\0", "void main() {}").build();

        assert!(matches!(res, Err(PBError::InvalidSource(_))));
    }

    #[test]
    fn nul_in_attribute_name_fails_before_gl() {
        let res = ProgramBuilder::new("", "")
            .with_attribute(0, "posi\0tion")
            .build();

        assert!(matches!(res, Err(PBError::InvalidSource(_))));
    }

    #[test]
    fn bindings_keep_order() {
        let builder = ProgramBuilder::new("", "")
            .with_attribute(0, "position")
            .with_attribute(1, "vertexUV")
            .with_output(0, "outColor");

        assert_eq!(
            builder.attributes,
            vec![(0, "position".to_owned()), (1, "vertexUV".to_owned())]
        );
        assert_eq!(builder.outputs, vec![(0, "outColor".to_owned())]);
    }
}
