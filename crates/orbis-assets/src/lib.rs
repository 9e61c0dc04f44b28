//! Orbis Assets - Model decoding and source mesh storage
//!
//! Decodes glTF 2.0 models into immutable indexed `SourceMesh` values and
//! caches them per file for the renderer.

mod error;
mod gltf_loader;
mod mesh;
mod server;

pub use error::AssetError;
pub use gltf_loader::{load_gltf, load_gltf_slice, GltfContents};
pub use mesh::{MaterialDescriptor, SourceMesh};
pub use server::{AssetId, AssetServer, ModelAsset, ModelHandle};
