use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use crate::error::AssetError;
use crate::gltf_loader::{self, GltfContents};
use crate::mesh::SourceMesh;

/// Unique identifier for a decoded model.
pub type AssetId = u64;

/// Handle to a model registered with an `AssetServer`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ModelHandle(AssetId);

impl ModelHandle {
    pub fn id(&self) -> AssetId {
        self.0
    }
}

/// All source meshes decoded from one model file.
#[derive(Debug, Clone)]
pub struct ModelAsset {
    pub path: PathBuf,
    pub meshes: Vec<Arc<SourceMesh>>,
}

/// Registry of decoded models. Each file is decoded once; its meshes are
/// shared with every renderable built from them.
pub struct AssetServer {
    base_path: PathBuf,
    models: HashMap<AssetId, ModelAsset>,
    path_to_model: HashMap<PathBuf, ModelHandle>,
    next_id: AssetId,
}

impl AssetServer {
    /// Create a new AssetServer rooted at the given base path.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        let base_path = base_path.into();
        info!("AssetServer created with base path: {}", base_path.display());
        Self {
            base_path,
            models: HashMap::new(),
            path_to_model: HashMap::new(),
            next_id: 1,
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_path.join(path)
        }
    }

    /// Decode a glTF file. Subsequent loads of the same path return the cached handle.
    pub fn load_model(&mut self, path: &Path) -> Result<ModelHandle, AssetError> {
        let full_path = self.resolve(path);

        if let Some(&handle) = self.path_to_model.get(&full_path) {
            return Ok(handle);
        }

        if !full_path.exists() {
            return Err(AssetError::NotFound(full_path));
        }

        let contents = gltf_loader::load_gltf(&full_path)?;
        Ok(self.insert(full_path, contents))
    }

    /// Register meshes decoded elsewhere (e.g. from memory) under a virtual path.
    pub fn insert(&mut self, path: PathBuf, contents: GltfContents) -> ModelHandle {
        let id = self.next_id;
        self.next_id += 1;
        let handle = ModelHandle(id);
        let model = ModelAsset {
            path: path.clone(),
            meshes: contents.meshes.into_iter().map(Arc::new).collect(),
        };
        info!(
            "Registered model '{}' with {} meshes",
            path.display(),
            model.meshes.len()
        );
        self.models.insert(id, model);
        self.path_to_model.insert(path, handle);
        handle
    }

    pub fn get_model(&self, handle: ModelHandle) -> Option<&ModelAsset> {
        self.models.get(&handle.id())
    }
}
