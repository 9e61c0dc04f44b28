/// Errors raised while turning a source mesh into renderable geometry.
///
/// Assembly is deterministic, so a failure is a permanent defect of the
/// asset and retrying cannot help.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MeshError {
    #[error("index {index} at position {position} is outside the {vertex_count} vertex slots")]
    IndexOutOfRange {
        position: usize,
        index: u32,
        vertex_count: usize,
    },

    #[error("mesh has an empty index list")]
    EmptyIndices,
}
