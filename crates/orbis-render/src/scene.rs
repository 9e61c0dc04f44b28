//! Draw submission seam between renderable meshes and the rasterizer

use glam::Mat4;
use orbis_core::AltitudeMode;

use crate::attributes::ShapeAttributes;
use crate::geometry::AssembledGeometry;

/// Everything the rasterizer needs to submit one mesh instance.
#[derive(Clone, Copy, Debug)]
pub struct DrawRequest<'a> {
    /// Name of the source mesh, for diagnostics
    pub label: &'a str,
    pub geometry: &'a AssembledGeometry,
    /// Model matrix of this instance
    pub transform: Mat4,
    pub attributes: &'a ShapeAttributes,
    /// Disable back-face culling
    pub double_sided: bool,
    pub verts_per_primitive: u32,
    pub altitude_mode: AltitudeMode,
}

/// The base shape-rendering routine that turns draw requests into GPU work.
pub trait ShapeRenderer {
    fn draw(&mut self, request: DrawRequest<'_>);
}
