//! Model meshes that assemble their geometry on first draw

use std::sync::Arc;

use glam::Mat4;
use orbis_assets::SourceMesh;
use orbis_core::AltitudeMode;
use tracing::debug;

use crate::attributes::{resolve_attributes, RenderContext, ShapeAttributes};
use crate::error::MeshError;
use crate::geometry::{AssembledGeometry, GeometryAssembler, TriangleListAssembler};
use crate::scene::{DrawRequest, ShapeRenderer};

/// Kind of renderable mesh, carrying the capabilities of that kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeshKind {
    /// Triangle soup decoded from a 3D model asset
    Model,
}

impl MeshKind {
    /// Whether back faces are drawn. Model assets do not guarantee
    /// consistent outward winding, so both faces are always drawn.
    pub const fn double_sided(self) -> bool {
        match self {
            MeshKind::Model => true,
        }
    }
}

/// Geometry lifecycle of one mesh instance. There is no transition back
/// to `Unassembled`; source meshes never change.
#[derive(Debug)]
enum GeometryState {
    Unassembled,
    Assembled(AssembledGeometry),
    /// Assembly failed; the error is replayed instead of re-running it.
    Failed(MeshError),
}

/// A source mesh placed in the scene, with its resolved shading attributes
/// and lazily assembled geometry.
///
/// Not meant to be rendered from several threads at once; distinct
/// instances may live on distinct threads.
#[derive(Debug)]
pub struct RenderableMesh<A = TriangleListAssembler> {
    source: Arc<SourceMesh>,
    attributes: Arc<ShapeAttributes>,
    kind: MeshKind,
    altitude_mode: AltitudeMode,
    assembler: A,
    state: GeometryState,
}

impl RenderableMesh {
    pub fn new(source: Arc<SourceMesh>, context: &RenderContext) -> Self {
        Self::with_assembler(source, context, TriangleListAssembler)
    }
}

impl<A: GeometryAssembler> RenderableMesh<A> {
    /// Resolve attributes now; geometry is left for the first render so
    /// meshes culled before they are ever drawn never pay for it.
    pub fn with_assembler(source: Arc<SourceMesh>, context: &RenderContext, assembler: A) -> Self {
        let material = source.material().or(context.material.as_ref());
        let attributes = resolve_attributes(&context.default_attributes, material);

        Self {
            source,
            attributes,
            kind: MeshKind::Model,
            altitude_mode: AltitudeMode::RelativeToGround,
            assembler,
            state: GeometryState::Unassembled,
        }
    }

    /// Draw this instance with the given model matrix, assembling geometry
    /// on the first call.
    pub fn render_instance<R>(&mut self, renderer: &mut R, transform: Mat4) -> Result<(), MeshError>
    where
        R: ShapeRenderer + ?Sized,
    {
        self.assemble_once()?;

        if let GeometryState::Assembled(geometry) = &self.state {
            renderer.draw(DrawRequest {
                label: self.source.name(),
                geometry,
                transform,
                attributes: &self.attributes,
                double_sided: self.is_double_sided(),
                verts_per_primitive: geometry.verts_per_primitive(),
                altitude_mode: self.altitude_mode,
            });
        }
        Ok(())
    }

    fn assemble_once(&mut self) -> Result<(), MeshError> {
        match &self.state {
            GeometryState::Assembled(_) => Ok(()),
            GeometryState::Failed(err) => Err(err.clone()),
            GeometryState::Unassembled => match self.assembler.assemble(&self.source) {
                Ok(geometry) => {
                    debug!(
                        "Mesh '{}' assembled: {} triangles",
                        self.source.name(),
                        geometry.primitive_count()
                    );
                    self.state = GeometryState::Assembled(geometry);
                    Ok(())
                }
                Err(err) => {
                    self.state = GeometryState::Failed(err.clone());
                    Err(err)
                }
            },
        }
    }
}

impl<A> RenderableMesh<A> {
    pub fn is_double_sided(&self) -> bool {
        self.kind.double_sided()
    }

    /// Cached geometry, if this instance has been rendered successfully.
    pub fn geometry(&self) -> Option<&AssembledGeometry> {
        match &self.state {
            GeometryState::Assembled(geometry) => Some(geometry),
            _ => None,
        }
    }

    pub fn is_assembled(&self) -> bool {
        matches!(self.state, GeometryState::Assembled(_))
    }

    pub fn attributes(&self) -> &Arc<ShapeAttributes> {
        &self.attributes
    }

    pub fn source(&self) -> &Arc<SourceMesh> {
        &self.source
    }

    pub fn kind(&self) -> MeshKind {
        self.kind
    }

    pub fn altitude_mode(&self) -> AltitudeMode {
        self.altitude_mode
    }

    pub fn set_altitude_mode(&mut self, altitude_mode: AltitudeMode) {
        self.altitude_mode = altitude_mode;
    }

    pub fn assembler(&self) -> &A {
        &self.assembler
    }
}
