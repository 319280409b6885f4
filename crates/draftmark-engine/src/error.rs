use crate::model::{BlockKey, EntityKey};

/// Structural problems found by [`crate::Document::validate`].
///
/// Conversion itself never fails; these only describe documents that break
/// the model's invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("Duplicate block key: {key}")]
    DuplicateKey { key: BlockKey },

    #[error(
        "Style range {offset}+{length} in block {key} exceeds text length {text_len}"
    )]
    StyleRangeOutOfBounds {
        key: BlockKey,
        offset: usize,
        length: usize,
        text_len: usize,
    },

    #[error(
        "Entity range {offset}+{length} in block {key} exceeds text length {text_len}"
    )]
    EntityRangeOutOfBounds {
        key: BlockKey,
        offset: usize,
        length: usize,
        text_len: usize,
    },

    #[error("Block {block} references unknown entity {entity}")]
    UnknownEntity { block: BlockKey, entity: EntityKey },

    #[error("Unknown block type: {name}")]
    UnknownBlockType { name: String },
}
