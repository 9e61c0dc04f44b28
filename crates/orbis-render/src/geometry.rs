//! Index expansion: indexed source meshes to flat triangle-list buffers

use orbis_assets::SourceMesh;
use tracing::{debug, warn};

use crate::error::MeshError;
use crate::vertex::Vertex3D;

/// Vertices per primitive in a triangle list.
pub const TRIANGLE_LIST: u32 = 3;

/// Renderer-ready geometry: one vertex per index, in index order.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledGeometry {
    vertex_buffer: Vec<f32>,
    normal_buffer: Option<Vec<f32>>,
    verts_per_primitive: u32,
}

impl AssembledGeometry {
    /// Flat `[x, y, z, x, y, z, ...]` positions.
    pub fn vertex_buffer(&self) -> &[f32] {
        &self.vertex_buffer
    }

    /// Flat normals, same length as the vertex buffer. `None` when the
    /// source mesh had no normals.
    pub fn normal_buffer(&self) -> Option<&[f32]> {
        self.normal_buffer.as_deref()
    }

    pub fn verts_per_primitive(&self) -> u32 {
        self.verts_per_primitive
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_buffer.len() / 3
    }

    pub fn primitive_count(&self) -> usize {
        self.vertex_count() / self.verts_per_primitive as usize
    }

    /// Interleave positions and normals into `Vertex3D` records. Missing
    /// normals are written as zero vectors.
    pub fn interleaved(&self) -> Vec<Vertex3D> {
        let positions = self.vertex_buffer.chunks_exact(3);
        match &self.normal_buffer {
            Some(normals) => positions
                .zip(normals.chunks_exact(3))
                .map(|(p, n)| Vertex3D::new([p[0], p[1], p[2]], [n[0], n[1], n[2]]))
                .collect(),
            None => positions
                .map(|p| Vertex3D::with_position([p[0], p[1], p[2]]))
                .collect(),
        }
    }
}

/// Turns a source mesh into assembled geometry.
pub trait GeometryAssembler {
    fn assemble(&self, source: &SourceMesh) -> Result<AssembledGeometry, MeshError>;
}

/// The stock assembler: expands the index list into a triangle list.
#[derive(Debug, Clone, Copy, Default)]
pub struct TriangleListAssembler;

impl GeometryAssembler for TriangleListAssembler {
    fn assemble(&self, source: &SourceMesh) -> Result<AssembledGeometry, MeshError> {
        assemble(source)
    }
}

/// Expand `source` into flat buffers holding one vertex per index.
///
/// Indices are walked in their original order with no deduplication, so
/// the winding of every triangle is preserved. Index counts that are not a
/// multiple of 3 are passed through; the trailing vertices form no whole
/// triangle.
pub fn assemble(source: &SourceMesh) -> Result<AssembledGeometry, MeshError> {
    let indices = source.indices();
    if indices.is_empty() {
        return Err(MeshError::EmptyIndices);
    }
    if indices.len() % 3 != 0 {
        warn!(
            "Mesh '{}' has {} indices, not a whole number of triangles",
            source.name(),
            indices.len()
        );
    }

    let positions = source.positions();
    let normals = source.normals();

    let mut vertex_buffer = Vec::with_capacity(indices.len() * 3);
    let mut normal_buffer = normals.map(|_| Vec::with_capacity(indices.len() * 3));

    for (position, &index) in indices.iter().enumerate() {
        let slot = index as usize;
        let vertex = positions
            .get(slot)
            .ok_or_else(|| MeshError::IndexOutOfRange {
                position,
                index,
                vertex_count: positions.len(),
            })?;
        vertex_buffer.extend_from_slice(&vertex.to_array());

        // Normals are aligned with positions, so `slot` is in range for both.
        if let (Some(buffer), Some(normals)) = (normal_buffer.as_mut(), normals) {
            buffer.extend_from_slice(&normals[slot].to_array());
        }
    }

    debug!(
        "Assembled '{}': {} indices -> {} floats, normals: {}",
        source.name(),
        indices.len(),
        vertex_buffer.len(),
        normal_buffer.is_some()
    );

    Ok(AssembledGeometry {
        vertex_buffer,
        normal_buffer,
        verts_per_primitive: TRIANGLE_LIST,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbis_core::Vec3;

    fn corner_positions() -> Vec<Vec3> {
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ]
    }

    fn mesh(indices: Vec<u32>) -> SourceMesh {
        SourceMesh::new(corner_positions(), None, indices).unwrap()
    }

    #[test]
    fn expands_indices_in_order() {
        let geometry = assemble(&mesh(vec![0, 1, 2])).unwrap();
        let expected: [f32; 9] = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        assert_eq!(geometry.vertex_buffer(), &expected);
        assert!(geometry.normal_buffer().is_none());
        assert_eq!(geometry.verts_per_primitive(), 3);
        assert_eq!(geometry.primitive_count(), 1);
    }

    #[test]
    fn reversed_indices_keep_reversed_winding() {
        let geometry = assemble(&mesh(vec![2, 1, 0])).unwrap();
        let expected: [f32; 9] = [0.0, 1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        assert_eq!(geometry.vertex_buffer(), &expected);
    }

    #[test]
    fn out_of_range_index_fails() {
        let err = assemble(&mesh(vec![5])).unwrap_err();
        assert_eq!(
            err,
            MeshError::IndexOutOfRange {
                position: 0,
                index: 5,
                vertex_count: 3,
            }
        );
    }

    #[test]
    fn out_of_range_index_after_valid_ones_fails() {
        let err = assemble(&mesh(vec![0, 1, 2, 2, 1, 3])).unwrap_err();
        assert!(matches!(
            err,
            MeshError::IndexOutOfRange { position: 5, index: 3, .. }
        ));
    }

    #[test]
    fn empty_indices_fail() {
        assert_eq!(assemble(&mesh(Vec::new())).unwrap_err(), MeshError::EmptyIndices);
    }

    #[test]
    fn buffers_follow_index_list() {
        let normals = vec![Vec3::Z, Vec3::NEG_Z, Vec3::X];
        let indices = vec![0, 1, 2, 2, 2, 0, 1, 0, 2];
        let source = SourceMesh::new(corner_positions(), Some(normals.clone()), indices.clone()).unwrap();
        let geometry = assemble(&source).unwrap();

        assert_eq!(geometry.vertex_buffer().len(), 3 * indices.len());
        let normal_buffer = geometry.normal_buffer().unwrap();
        assert_eq!(normal_buffer.len(), geometry.vertex_buffer().len());

        let positions = corner_positions();
        for (i, &index) in indices.iter().enumerate() {
            let slot = index as usize;
            assert_eq!(&geometry.vertex_buffer()[3 * i..3 * i + 3], &positions[slot].to_array());
            assert_eq!(&normal_buffer[3 * i..3 * i + 3], &normals[slot].to_array());
        }
    }

    #[test]
    fn assembly_is_deterministic() {
        let source = SourceMesh::new(
            corner_positions(),
            Some(vec![Vec3::Z; 3]),
            vec![0, 2, 1, 1, 2, 0],
        )
        .unwrap();
        let first = assemble(&source).unwrap();
        let second = TriangleListAssembler.assemble(&source).unwrap();
        let bits = |g: &AssembledGeometry| {
            let normals = g.normal_buffer().unwrap_or_default();
            g.vertex_buffer()
                .iter()
                .chain(normals)
                .map(|f| f.to_bits())
                .collect::<Vec<_>>()
        };
        assert_eq!(bits(&first), bits(&second));
    }

    #[test]
    fn partial_triangle_is_passed_through() {
        let geometry = assemble(&mesh(vec![0, 1, 2, 1])).unwrap();
        assert_eq!(geometry.vertex_count(), 4);
        assert_eq!(geometry.primitive_count(), 1);
    }

    #[test]
    fn interleaved_pairs_positions_with_normals() {
        let source = SourceMesh::new(corner_positions(), Some(vec![Vec3::Z; 3]), vec![1, 2, 0]).unwrap();
        let vertices = assemble(&source).unwrap().interleaved();
        assert_eq!(vertices.len(), 3);
        assert_eq!(vertices[0], Vertex3D::new([1.0, 0.0, 0.0], [0.0, 0.0, 1.0]));

        let flat = assemble(&mesh(vec![2, 0, 1])).unwrap().interleaved();
        assert_eq!(flat[0], Vertex3D::with_position([0.0, 1.0, 0.0]));
        assert_eq!(crate::vertex::as_bytes(&flat).len(), 3 * 24);
    }
}
