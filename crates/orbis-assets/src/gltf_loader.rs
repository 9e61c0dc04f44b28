use std::path::Path;

use gltf::mesh::Mode;
use orbis_core::Vec3;
use tracing::debug;

use crate::error::AssetError;
use crate::mesh::{MaterialDescriptor, SourceMesh};

/// Result of decoding a glTF file: one source mesh per triangle primitive.
pub struct GltfContents {
    pub meshes: Vec<SourceMesh>,
}

/// Load a glTF 2.0 file (.gltf or .glb) and extract all triangle primitives.
pub fn load_gltf(path: &Path) -> Result<GltfContents, AssetError> {
    let (document, buffers, _images) = gltf::import(path)
        .map_err(|e| AssetError::GltfLoadFailed(path.to_path_buf(), e.to_string()))?;

    let contents = decode(&document, &buffers)?;
    debug!(
        "glTF '{}': {} source meshes",
        path.display(),
        contents.meshes.len()
    );
    Ok(contents)
}

/// Decode a glTF 2.0 document held in memory. External buffer URIs are
/// not resolvable here; embedded (`data:`) and GLB buffers are.
pub fn load_gltf_slice(bytes: &[u8]) -> Result<GltfContents, AssetError> {
    let (document, buffers, _images) =
        gltf::import_slice(bytes).map_err(|e| AssetError::GltfDecodeFailed(e.to_string()))?;
    decode(&document, &buffers)
}

fn decode(
    document: &gltf::Document,
    buffers: &[gltf::buffer::Data],
) -> Result<GltfContents, AssetError> {
    let mut meshes = Vec::new();

    for mesh in document.meshes() {
        let name = mesh.name().unwrap_or("unnamed").to_string();

        for (primitive_index, primitive) in mesh.primitives().enumerate() {
            if primitive.mode() != Mode::Triangles {
                debug!(
                    "Skipping primitive {} of mesh '{}': mode {:?} is not a triangle list",
                    primitive_index,
                    name,
                    primitive.mode()
                );
                continue;
            }

            let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

            let positions: Vec<Vec3> = reader
                .read_positions()
                .map(|iter| iter.map(Vec3::from).collect())
                .ok_or_else(|| AssetError::MissingPositions {
                    mesh: name.clone(),
                    primitive: primitive_index,
                })?;

            let normals: Option<Vec<Vec3>> = reader
                .read_normals()
                .map(|iter| iter.map(Vec3::from).collect());

            // Non-indexed primitives draw their vertices in order.
            let indices: Vec<u32> = reader
                .read_indices()
                .map(|idx| idx.into_u32().collect())
                .unwrap_or_else(|| (0..positions.len() as u32).collect());

            let mut source = SourceMesh::new(positions, normals, indices)?
                .with_name(format!("{}#{}", name, primitive_index));

            let material = primitive.material();
            // The implicit default material has no index and carries nothing to override.
            if material.index().is_some() {
                source = source.with_material(material_descriptor(&material));
            }

            debug!(
                "Decoded '{}': {} vertices, {} indices, normals: {}",
                source.name(),
                source.positions().len(),
                source.indices().len(),
                source.normals().is_some()
            );
            meshes.push(source);
        }
    }

    Ok(GltfContents { meshes })
}

const DEFAULT_BASE_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const DEFAULT_EMISSIVE: [f32; 3] = [0.0, 0.0, 0.0];

/// gltf reports unauthored factors as their glTF defaults; those are
/// treated as unset so they never override configured attributes.
fn material_descriptor(material: &gltf::Material<'_>) -> MaterialDescriptor {
    let base_color = material.pbr_metallic_roughness().base_color_factor();
    let emissive = material.emissive_factor();

    MaterialDescriptor {
        name: material.name().map(str::to_string),
        base_color: (base_color != DEFAULT_BASE_COLOR).then_some(base_color),
        emissive: (emissive != DEFAULT_EMISSIVE).then_some(emissive),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Single triangle, indices [2, 1, 0], red material, no normals.
    const TRIANGLE_GLTF: &str = r#"{
        "asset": { "version": "2.0" },
        "buffers": [{
            "byteLength": 44,
            "uri": "data:application/octet-stream;base64,AgABAAAAAAAAAAAAAAAAAAAAAAAAAIA/AAAAAAAAAAAAAAAAAACAPwAAAAA="
        }],
        "bufferViews": [
            { "buffer": 0, "byteOffset": 0, "byteLength": 6 },
            { "buffer": 0, "byteOffset": 8, "byteLength": 36 }
        ],
        "accessors": [
            { "bufferView": 0, "componentType": 5123, "count": 3, "type": "SCALAR" },
            {
                "bufferView": 1, "componentType": 5126, "count": 3, "type": "VEC3",
                "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0]
            }
        ],
        "materials": [{
            "name": "red",
            "pbrMetallicRoughness": { "baseColorFactor": [1.0, 0.0, 0.0, 0.5] }
        }],
        "meshes": [{
            "name": "marker",
            "primitives": [{ "attributes": { "POSITION": 1 }, "indices": 0, "material": 0 }]
        }]
    }"#;

    #[test]
    fn decodes_embedded_triangle() {
        let contents = load_gltf_slice(TRIANGLE_GLTF.as_bytes()).unwrap();
        assert_eq!(contents.meshes.len(), 1);

        let mesh = &contents.meshes[0];
        assert_eq!(mesh.name(), "marker#0");
        assert_eq!(mesh.positions(), &[Vec3::ZERO, Vec3::X, Vec3::Y]);
        assert_eq!(mesh.indices(), &[2, 1, 0]);
        assert!(mesh.normals().is_none());

        let material = mesh.material().unwrap();
        assert_eq!(material.name.as_deref(), Some("red"));
        assert_eq!(material.base_color, Some([1.0, 0.0, 0.0, 0.5]));
        assert_eq!(material.emissive, None);
    }

    #[test]
    fn unauthored_factors_are_unset() {
        let emissive_only = TRIANGLE_GLTF.replace(
            r#""pbrMetallicRoughness": { "baseColorFactor": [1.0, 0.0, 0.0, 0.5] }"#,
            r#""emissiveFactor": [0.0, 1.0, 0.0]"#,
        );
        let contents = load_gltf_slice(emissive_only.as_bytes()).unwrap();

        let material = contents.meshes[0].material().unwrap();
        assert_eq!(material.base_color, None);
        assert_eq!(material.emissive, Some([0.0, 1.0, 0.0]));
    }

    #[test]
    fn garbage_is_a_decode_error() {
        match load_gltf_slice(b"not a model") {
            Err(AssetError::GltfDecodeFailed(_)) => {}
            Err(other) => panic!("expected GltfDecodeFailed, got: {:?}", other),
            Ok(_) => panic!("expected an error"),
        }
    }
}
