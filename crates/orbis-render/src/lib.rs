//! Orbis Render - Renderable model meshes
//!
//! Bridges decoded model assets and the rasterizer: expands indexed
//! source meshes into flat triangle-list buffers, resolves per-mesh
//! shading attributes from materials, and hands draw requests to a
//! `ShapeRenderer`.

pub mod attributes;
pub mod error;
pub mod geometry;
pub mod renderable;
pub mod scene;
pub mod vertex;

pub use attributes::{resolve_attributes, RenderContext, ShapeAttributes};
pub use error::MeshError;
pub use geometry::{assemble, AssembledGeometry, GeometryAssembler, TriangleListAssembler, TRIANGLE_LIST};
pub use renderable::{MeshKind, RenderableMesh};
pub use scene::{DrawRequest, ShapeRenderer};
pub use vertex::{as_bytes, Vertex3D};
