//! Renderer that reports draw submissions through tracing instead of a GPU

use std::collections::HashSet;

use orbis_render::{as_bytes, DrawRequest, ShapeRenderer, Vertex3D};
use tracing::{debug, info};

/// Per-frame draw statistics
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    pub draws: usize,
    pub triangles: usize,
}

#[derive(Debug, Default)]
pub struct LogRenderer {
    uploaded: HashSet<String>,
    frame: FrameStats,
    uploaded_bytes: usize,
}

impl LogRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Close the current frame and return its statistics
    pub fn end_frame(&mut self, index: u32) -> FrameStats {
        let stats = std::mem::take(&mut self.frame);
        info!(
            "Frame {}: {} draws, {} triangles",
            index, stats.draws, stats.triangles
        );
        stats
    }

    pub fn uploaded_bytes(&self) -> usize {
        self.uploaded_bytes
    }
}

impl ShapeRenderer for LogRenderer {
    fn draw(&mut self, request: DrawRequest<'_>) {
        let geometry = request.geometry;

        // Buffers only go to the GPU the first time a mesh is seen.
        if self.uploaded.insert(request.label.to_string()) {
            let vertices = geometry.interleaved();
            let bytes = as_bytes(&vertices).len();
            self.uploaded_bytes += bytes;
            debug!(
                "Uploaded '{}': {} vertices, stride {}, {} bytes",
                request.label,
                vertices.len(),
                Vertex3D::per_vertex().stride,
                bytes
            );
        }

        debug!(
            "Draw '{}': {} vertices, {} per primitive, double-sided: {}, altitude: {:?}, color: {:?}",
            request.label,
            geometry.vertex_count(),
            request.verts_per_primitive,
            request.double_sided,
            request.altitude_mode,
            request.attributes.interior_color.to_array()
        );

        self.frame.draws += 1;
        self.frame.triangles += geometry.primitive_count();
    }
}
