use gl::types::*;
use std::mem::size_of;
use std::ptr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Component {
    Attribute(usize),
    Padding(usize),
}

/// One `glVertexAttribPointer` call: `size` floats read from `offset` bytes
/// into every vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    pub index: GLuint,
    pub size: usize,
    pub offset: usize,
}

/// Describes how interleaved float vertex data is split into shader
/// attributes. Attributes get consecutive locations starting at 0; skipped
/// floats still count towards the stride but are not bound.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VertexLayout {
    components: Vec<Component>,
}

impl VertexLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attribute(mut self, size: usize) -> Self {
        self.components.push(Component::Attribute(size));
        self
    }

    pub fn skip(mut self, size: usize) -> Self {
        self.components.push(Component::Padding(size));
        self
    }

    pub fn floats_per_vertex(&self) -> usize {
        self.components
            .iter()
            .map(|component| match component {
                Component::Attribute(size) | Component::Padding(size) => *size,
            })
            .sum()
    }

    /// Bytes between the starts of consecutive vertices.
    pub fn stride(&self) -> usize {
        self.floats_per_vertex() * size_of::<f32>()
    }

    pub fn attributes(&self) -> Vec<VertexAttribute> {
        let mut attributes = Vec::new();
        let mut offset = 0;
        for component in &self.components {
            match *component {
                Component::Attribute(size) => {
                    attributes.push(VertexAttribute {
                        index: attributes.len() as GLuint,
                        size,
                        offset: offset * size_of::<f32>(),
                    });
                    offset += size;
                }
                Component::Padding(size) => offset += size,
            }
        }
        attributes
    }

    /// Number of whole vertices in `float_count` floats.
    pub fn vertex_count(&self, float_count: usize) -> usize {
        match self.floats_per_vertex() {
            0 => 0,
            per_vertex => float_count / per_vertex,
        }
    }

    /// Records the layout into the currently bound vertex array.
    fn apply(&self) {
        let stride = self.stride() as GLsizei;
        for attribute in self.attributes() {
            unsafe {
                gl::VertexAttribPointer(
                    attribute.index,
                    attribute.size as GLint,
                    gl::FLOAT,
                    gl::FALSE,
                    stride,
                    if attribute.offset == 0 {
                        ptr::null()
                    } else {
                        attribute.offset as *const _
                    },
                );
                gl::EnableVertexAttribArray(attribute.index);
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferTarget {
    Array,
    ElementArray,
}

impl BufferTarget {
    pub fn gl_enum(self) -> GLenum {
        match self {
            BufferTarget::Array => gl::ARRAY_BUFFER,
            BufferTarget::ElementArray => gl::ELEMENT_ARRAY_BUFFER,
        }
    }
}

/// GPU buffer filled once with static data.
pub struct Buffer {
    id: GLuint,
    target: BufferTarget,
}

impl Buffer {
    pub fn new<T: bytemuck::Pod>(target: BufferTarget, data: &[T]) -> Self {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        let mut id = 0;
        unsafe {
            gl::GenBuffers(1, &mut id);
            gl::BindBuffer(target.gl_enum(), id);
            gl::BufferData(
                target.gl_enum(),
                bytes.len() as GLsizeiptr,
                bytes.as_ptr() as *const _,
                gl::STATIC_DRAW,
            );
        }
        Self { id, target }
    }

    pub fn bind(&self) {
        unsafe {
            gl::BindBuffer(self.target.gl_enum(), self.id);
        }
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn target(&self) -> BufferTarget {
        self.target
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteBuffers(1, &self.id);
        }
    }
}

pub struct VertexArray {
    id: GLuint,
}

impl VertexArray {
    pub fn new() -> Self {
        let mut id = 0;
        unsafe {
            gl::GenVertexArrays(1, &mut id);
        }
        Self { id }
    }

    pub fn bind(&self) {
        unsafe {
            gl::BindVertexArray(self.id);
        }
    }

    pub fn unbind() {
        unsafe {
            gl::BindVertexArray(0);
        }
    }

    pub fn id(&self) -> GLuint {
        self.id
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteVertexArrays(1, &self.id);
        }
    }
}

/// Static geometry: a vertex array with its vertex buffer and an optional
/// index buffer, drawn as triangles.
pub struct Mesh {
    vao: VertexArray,
    vbo: Buffer,
    ebo: Option<Buffer>,
    vertex_count: usize,
    index_count: usize,
}

impl Mesh {
    pub fn new(vertices: &[f32], layout: &VertexLayout) -> Self {
        Self::build(vertices, None, layout)
    }

    pub fn indexed(vertices: &[f32], indices: &[u32], layout: &VertexLayout) -> Self {
        Self::build(vertices, Some(indices), layout)
    }

    fn build(vertices: &[f32], indices: Option<&[u32]>, layout: &VertexLayout) -> Self {
        if vertices.len() % layout.floats_per_vertex().max(1) != 0 {
            log::warn!(
                "Vertex data length {} is not a multiple of the layout size {}",
                vertices.len(),
                layout.floats_per_vertex()
            );
        }

        let vao = VertexArray::new();
        vao.bind();

        let vbo = Buffer::new(BufferTarget::Array, vertices);
        // The element binding is stored in the VAO, so it must stay bound
        // until the VAO is unbound.
        let ebo = indices.map(|indices| Buffer::new(BufferTarget::ElementArray, indices));
        layout.apply();

        unsafe {
            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
        }
        VertexArray::unbind();

        Self {
            vao,
            vbo,
            ebo,
            vertex_count: layout.vertex_count(vertices.len()),
            index_count: indices.map_or(0, <[u32]>::len),
        }
    }

    /// Number of vertices (or indices, for indexed meshes) a full draw submits.
    pub fn element_count(&self) -> usize {
        if self.ebo.is_some() {
            self.index_count
        } else {
            self.vertex_count
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn is_indexed(&self) -> bool {
        self.ebo.is_some()
    }

    pub fn vertex_array(&self) -> &VertexArray {
        &self.vao
    }

    pub fn vertex_buffer(&self) -> &Buffer {
        &self.vbo
    }

    pub fn draw(&self) {
        self.draw_range(0, self.element_count());
    }

    /// Draws `count` vertices (or indices) starting at `first`.
    pub fn draw_range(&self, first: usize, count: usize) {
        let count = clamp_range(self.element_count(), first, count);
        if count == 0 {
            return;
        }

        self.vao.bind();
        unsafe {
            if self.ebo.is_some() {
                gl::DrawElements(
                    gl::TRIANGLES,
                    count as GLsizei,
                    gl::UNSIGNED_INT,
                    (first * size_of::<u32>()) as *const _,
                );
            } else {
                gl::DrawArrays(gl::TRIANGLES, first as GLint, count as GLsizei);
            }
        }
    }
}

/// Number of elements a draw starting at `first` can submit without reading
/// past `total`.
fn clamp_range(total: usize, first: usize, count: usize) -> usize {
    count.min(total.saturating_sub(first))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_texcoord_layout() {
        let layout = VertexLayout::new().attribute(3).attribute(2);
        assert_eq!(layout.floats_per_vertex(), 5);
        assert_eq!(layout.stride(), 20);
        assert_eq!(
            layout.attributes(),
            vec![
                VertexAttribute {
                    index: 0,
                    size: 3,
                    offset: 0
                },
                VertexAttribute {
                    index: 1,
                    size: 2,
                    offset: 12
                },
            ]
        );
    }

    #[test]
    fn test_position_colour_texcoord_layout() {
        let layout = VertexLayout::new().attribute(3).attribute(3).attribute(2);
        assert_eq!(layout.stride(), 32);
        let offsets: Vec<usize> = layout.attributes().iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 12, 24]);
    }

    #[test]
    fn test_skipped_floats_count_towards_stride() {
        // Lamp cube reads positions out of position + normal data.
        let layout = VertexLayout::new().attribute(3).skip(3);
        assert_eq!(layout.stride(), 24);
        assert_eq!(layout.attributes().len(), 1);

        let layout = VertexLayout::new().skip(3).attribute(3);
        let attributes = layout.attributes();
        assert_eq!(attributes[0].index, 0);
        assert_eq!(attributes[0].offset, 12);
    }

    #[test]
    fn test_vertex_count() {
        let layout = VertexLayout::new().attribute(3).attribute(2);
        assert_eq!(layout.vertex_count(36 * 5), 36);
        assert_eq!(layout.vertex_count(11), 2);
        assert_eq!(VertexLayout::new().vertex_count(10), 0);
    }

    #[test]
    fn test_buffer_targets() {
        assert_eq!(BufferTarget::Array.gl_enum(), gl::ARRAY_BUFFER);
        assert_eq!(BufferTarget::ElementArray.gl_enum(), gl::ELEMENT_ARRAY_BUFFER);
    }

    #[test]
    fn test_clamp_range() {
        assert_eq!(clamp_range(36, 0, 36), 36);
        assert_eq!(clamp_range(36, 6, 6), 6);
        // Count is cut to what remains after `first`.
        assert_eq!(clamp_range(9, 6, 10), 3);
        assert_eq!(clamp_range(9, 9, 3), 0);
        assert_eq!(clamp_range(9, 20, 3), 0);
        assert_eq!(clamp_range(0, 0, 3), 0);
    }
}
