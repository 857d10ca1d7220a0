use std::ffi::c_void;
use thiserror::Error;

pub struct GeometryBuilder<'a> {
    attributes: Vec<VertexAttribute>,
    data: &'a [f32],
    indices: &'a [u32],
}

impl<'a> GeometryBuilder<'a> {
    pub fn new(data: &'a [f32], indices: &'a [u32]) -> Self {
        Self {
            data,
            indices,
            attributes: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, attr: VertexAttribute) -> Self {
        self.attributes.push(attr);
        self
    }

    /// Checks the vertex and index data against the attribute layout.
    ///
    /// Returns the layout and the number of vertices. Does not touch GL.
    pub fn validate(&self) -> Result<(VertexLayout, usize), GBError> {
        let layout = VertexLayout::new(&self.attributes);

        if layout.components() == 0 {
            return Err(GBError::NoAttributes);
        }

        if self.data.len() % layout.components() != 0 {
            return Err(GBError::InvalidDataLength);
        }

        if self.indices.is_empty() || self.indices.len() % 3 != 0 {
            return Err(GBError::IncompleteTriangles(self.indices.len()));
        }

        let vertices = self.data.len() / layout.components();

        if let Some(&index) = self.indices.iter().find(|&&i| i as usize >= vertices) {
            return Err(GBError::IndexOutOfRange { index, vertices });
        }

        Ok((layout, vertices))
    }

    pub fn build(self) -> Result<Geometry, GBError> {
        let (layout, vertices) = self.validate()?;

        let mut vao = 0;
        let mut vbo = 0;
        let mut ebo = 0;

        unsafe {
            gl::GenVertexArrays(1, (&mut vao) as *mut u32);
            gl::GenBuffers(1, (&mut vbo) as *mut u32);
            gl::GenBuffers(1, (&mut ebo) as *mut u32);

            gl::BindVertexArray(vao);

            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                std::mem::size_of_val(self.data) as isize,
                self.data.as_ptr() as *const c_void,
                gl::STATIC_DRAW,
            );

            // element buffer binding is recorded in the VAO
            gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, ebo);
            gl::BufferData(
                gl::ELEMENT_ARRAY_BUFFER,
                std::mem::size_of_val(self.indices) as isize,
                self.indices.as_ptr() as *const c_void,
                gl::STATIC_DRAW,
            );

            for (i, (attr, offset)) in self.attributes.iter().zip(layout.offsets()).enumerate() {
                gl::VertexAttribPointer(
                    i as u32,
                    attr.size() as i32,
                    gl::FLOAT,
                    gl::FALSE,
                    layout.stride() as i32,
                    offset as *const c_void,
                );
                gl::EnableVertexAttribArray(i as u32);
            }

            gl::BindVertexArray(0);
            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
        }

        log::debug!(
            "uploaded geometry: {vertices} vertices, {} indices, stride {} bytes",
            self.indices.len(),
            layout.stride()
        );

        Ok(Geometry {
            vao,
            vbo,
            ebo,
            indices: self.indices.len(),
        })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GBError {
    #[error("No vertex attributes specified")]
    NoAttributes,
    #[error("Invalid data length for given attributes")]
    InvalidDataLength,
    #[error("Index count {0} does not form whole triangles")]
    IncompleteTriangles(usize),
    #[error("Index {index} out of range for {vertices} vertices")]
    IndexOutOfRange { index: u32, vertices: usize },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum VertexAttribute {
    Float,
    Vec2,
    Vec3,
}

impl VertexAttribute {
    pub fn size(&self) -> usize {
        match self {
            VertexAttribute::Float => 1,
            VertexAttribute::Vec2 => 2,
            VertexAttribute::Vec3 => 3,
        }
    }
}

/// Interleaved float layout, attributes packed in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexLayout {
    sizes: Vec<usize>,
}

impl VertexLayout {
    pub fn new(attributes: &[VertexAttribute]) -> Self {
        Self {
            sizes: attributes.iter().map(|a| a.size()).collect(),
        }
    }

    /// Floats per vertex.
    pub fn components(&self) -> usize {
        self.sizes.iter().sum()
    }

    /// Bytes per vertex.
    pub fn stride(&self) -> usize {
        self.components() * std::mem::size_of::<f32>()
    }

    /// Byte offset of each attribute inside a vertex.
    pub fn offsets(&self) -> Vec<usize> {
        self.sizes
            .iter()
            .scan(0, |acc, size| {
                let offset = *acc;
                *acc += size * std::mem::size_of::<f32>();
                Some(offset)
            })
            .collect()
    }
}

pub struct Geometry {
    vao: u32,
    vbo: u32,
    ebo: u32,
    indices: usize,
}

impl Geometry {
    pub fn vao(&self) -> u32 {
        self.vao
    }
    pub fn indices(&self) -> usize {
        self.indices
    }
}

impl Drop for Geometry {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteBuffers(1, (&self.ebo) as *const u32);
            gl::DeleteBuffers(1, (&self.vbo) as *const u32);
            gl::DeleteVertexArrays(1, (&self.vao) as *const u32);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{QUAD, QUAD_INDICES};

    fn quad_builder<'a>(data: &'a [f32], indices: &'a [u32]) -> GeometryBuilder<'a> {
        GeometryBuilder::new(data, indices)
            .with_attribute(VertexAttribute::Vec2)
            .with_attribute(VertexAttribute::Vec2)
    }

    #[test]
    fn layout_offsets() {
        let layout = VertexLayout::new(&[VertexAttribute::Vec2, VertexAttribute::Vec2]);

        assert_eq!(layout.components(), 4);
        assert_eq!(layout.stride(), 16);
        assert_eq!(layout.offsets(), vec![0, 8]);

        let layout = VertexLayout::new(&[
            VertexAttribute::Vec3,
            VertexAttribute::Float,
            VertexAttribute::Vec2,
        ]);

        assert_eq!(layout.stride(), 24);
        assert_eq!(layout.offsets(), vec![0, 12, 16]);
    }

    #[test]
    fn quad_is_one_quad() {
        let (layout, vertices) = quad_builder(&QUAD, &QUAD_INDICES).validate().unwrap();

        assert_eq!(layout.components(), 4);
        assert_eq!(vertices, 4);
        assert_eq!(QUAD_INDICES.len(), 6);
        assert_eq!(QUAD_INDICES.len() / 3, 2);
    }

    #[test]
    fn rejects_misaligned_data() {
        let data = [0.0; 7];

        assert_eq!(
            quad_builder(&data, &QUAD_INDICES).validate().unwrap_err(),
            GBError::InvalidDataLength
        );
    }

    #[test]
    fn rejects_index_out_of_range() {
        let indices = [0, 1, 2, 2, 3, 4];

        assert_eq!(
            quad_builder(&QUAD, &indices).build().err(),
            Some(GBError::IndexOutOfRange {
                index: 4,
                vertices: 4
            })
        );
    }

    #[test]
    fn rejects_partial_triangles() {
        assert_eq!(
            quad_builder(&QUAD, &[0, 1]).validate().unwrap_err(),
            GBError::IncompleteTriangles(2)
        );
        assert_eq!(
            quad_builder(&QUAD, &[]).validate().unwrap_err(),
            GBError::IncompleteTriangles(0)
        );
    }

    #[test]
    fn rejects_empty_layout() {
        assert_eq!(
            GeometryBuilder::new(&QUAD, &QUAD_INDICES)
                .validate()
                .unwrap_err(),
            GBError::NoAttributes
        );
    }
}
