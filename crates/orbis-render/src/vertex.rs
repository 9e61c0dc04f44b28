//! Vertex layout for uploading assembled model geometry

use bytemuck::{Pod, Zeroable};
use std::collections::HashMap;

/// Interleaved model vertex: position followed by normal
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex3D {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex3D {
    pub fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Self { position, normal }
    }

    /// Vertex without a normal; lighting treats a zero normal as unlit
    pub fn with_position(position: [f32; 3]) -> Self {
        Self {
            position,
            normal: [0.0; 3],
        }
    }

    /// Vulkano vertex buffer description
    pub fn per_vertex() -> vulkano::pipeline::graphics::vertex_input::VertexBufferDescription {
        let stride = std::mem::size_of::<Self>() as u32;
        vulkano::pipeline::graphics::vertex_input::VertexBufferDescription {
            stride,
            input_rate: vulkano::pipeline::graphics::vertex_input::VertexInputRate::Vertex,
            members: HashMap::from([
                (
                    "position".to_string(),
                    vulkano::pipeline::graphics::vertex_input::VertexMemberInfo {
                        offset: 0,
                        format: vulkano::format::Format::R32G32B32_SFLOAT,
                        num_elements: 1,
                        stride,
                    },
                ),
                (
                    "normal".to_string(),
                    vulkano::pipeline::graphics::vertex_input::VertexMemberInfo {
                        offset: 12,
                        format: vulkano::format::Format::R32G32B32_SFLOAT,
                        num_elements: 1,
                        stride,
                    },
                ),
            ]),
        }
    }
}

/// Raw bytes of interleaved vertices, ready for a vertex buffer upload.
pub fn as_bytes(vertices: &[Vertex3D]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vertex3D>(), 24);
        let description = Vertex3D::per_vertex();
        assert_eq!(description.stride, 24);
        assert_eq!(description.members["normal"].offset, 12);
    }

    #[test]
    fn bytes_follow_field_order() {
        let vertices = [Vertex3D::new([1.0, 2.0, 3.0], [0.0, 0.0, 1.0])];
        let bytes = as_bytes(&vertices);
        assert_eq!(bytes.len(), 24);
        assert_eq!(&bytes[0..4], &1.0f32.to_ne_bytes());
        assert_eq!(&bytes[20..24], &1.0f32.to_ne_bytes());
    }
}
