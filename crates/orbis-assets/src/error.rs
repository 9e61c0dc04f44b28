use std::path::PathBuf;

/// Errors that can occur while decoding model assets.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("asset not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to load glTF file '{0}': {1}")]
    GltfLoadFailed(PathBuf, String),

    #[error("failed to decode in-memory glTF: {0}")]
    GltfDecodeFailed(String),

    #[error("primitive {primitive} of mesh '{mesh}' has no POSITION attribute")]
    MissingPositions { mesh: String, primitive: usize },

    #[error("normal count {normals} does not match position count {positions}")]
    NormalCountMismatch { positions: usize, normals: usize },
}
