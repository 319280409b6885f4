pub mod block;
pub mod document;
pub mod entity;

pub use block::{
    Block, BlockData, BlockKey, BlockType, EntityRange, HeaderLevel, InlineStyle,
    InlineStyleRange,
};
pub use document::Document;
pub use entity::{Entity, EntityKey, EntityMap, EntityType, Mutability};
