use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{Block, BlockKey, EntityMap};
use crate::error::ModelError;

/// An ordered sequence of blocks plus the entities they reference.
///
/// Block order is reading order. The converter never mutates a caller's
/// document in place: parsing consumes one and returns a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub entity_map: EntityMap,
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self {
            blocks,
            entity_map: EntityMap::new(),
        }
    }

    pub fn with_entity_map(mut self, entity_map: EntityMap) -> Self {
        self.entity_map = entity_map;
        self
    }

    /// Splits Markdown text into one unstyled block per line.
    ///
    /// This is the raw form [`crate::from_markdown`] expects. A single
    /// trailing newline does not produce an extra empty block.
    pub fn from_markdown_lines(markdown: &str) -> Self {
        let body = markdown.strip_suffix('\n').unwrap_or(markdown);
        if body.is_empty() {
            return Self::default();
        }
        let blocks = body
            .split('\n')
            .map(|line| Block::new(line.strip_suffix('\r').unwrap_or(line)))
            .collect();
        Self::new(blocks)
    }

    pub fn block(&self, key: &BlockKey) -> Option<&Block> {
        self.blocks.iter().find(|b| &b.key == key)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Checks key uniqueness, range bounds and entity references.
    pub fn validate(&self) -> Result<(), ModelError> {
        let mut seen = HashSet::new();
        for block in &self.blocks {
            if !seen.insert(&block.key) {
                return Err(ModelError::DuplicateKey {
                    key: block.key.clone(),
                });
            }

            let text_len = block.char_len();
            if let Some(range) = block
                .inline_style_ranges
                .iter()
                .find(|r| r.end() > text_len)
            {
                return Err(ModelError::StyleRangeOutOfBounds {
                    key: block.key.clone(),
                    offset: range.offset,
                    length: range.length,
                    text_len,
                });
            }

            for range in &block.entity_ranges {
                if range.end() > text_len {
                    return Err(ModelError::EntityRangeOutOfBounds {
                        key: block.key.clone(),
                        offset: range.offset,
                        length: range.length,
                        text_len,
                    });
                }
                if !self.entity_map.contains_key(&range.key) {
                    return Err(ModelError::UnknownEntity {
                        block: block.key.clone(),
                        entity: range.key.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Entity, InlineStyle};

    #[test]
    fn from_markdown_lines_splits_per_line() {
        let doc = Document::from_markdown_lines("# Title\n\n- item\n");
        let texts: Vec<_> = doc.blocks.iter().map(|b| b.text.as_str()).collect();
        assert_eq!(texts, vec!["# Title", "", "- item"]);
    }

    #[test]
    fn from_markdown_lines_strips_carriage_returns() {
        let doc = Document::from_markdown_lines("one\r\ntwo");
        assert_eq!(doc.blocks[0].text, "one");
        assert_eq!(doc.blocks[1].text, "two");
    }

    #[test]
    fn from_markdown_lines_empty_input_has_no_blocks() {
        assert!(Document::from_markdown_lines("").is_empty());
        assert!(Document::from_markdown_lines("\n").is_empty());
    }

    #[test]
    fn from_markdown_lines_keeps_inner_blank_lines() {
        assert_eq!(Document::from_markdown_lines("\n\n").len(), 2);
    }

    #[test]
    fn validate_rejects_duplicate_keys() {
        let doc = Document::new(vec![Block::with_key("a", "x"), Block::with_key("a", "y")]);
        assert_eq!(
            doc.validate(),
            Err(ModelError::DuplicateKey {
                key: BlockKey::from("a")
            })
        );
    }

    #[test]
    fn validate_rejects_style_past_end() {
        let doc = Document::new(vec![
            Block::with_key("a", "abc").with_style(1, 5, InlineStyle::Bold),
        ]);
        assert!(matches!(
            doc.validate(),
            Err(ModelError::StyleRangeOutOfBounds { text_len: 3, .. })
        ));
    }

    #[test]
    fn validate_rejects_unknown_entity() {
        let doc = Document::new(vec![Block::with_key("a", "abc").with_entity(0, 3, "9")]);
        assert!(matches!(
            doc.validate(),
            Err(ModelError::UnknownEntity { .. })
        ));
    }

    #[test]
    fn validate_accepts_well_formed_document() {
        let mut entity_map = EntityMap::new();
        let key = entity_map.insert(Entity::link("http://example.com"));
        let doc = Document::new(vec![
            Block::with_key("a", "see here")
                .with_style(0, 3, InlineStyle::Italic)
                .with_entity(4, 4, key),
        ])
        .with_entity_map(entity_map);
        assert_eq!(doc.validate(), Ok(()));
    }
}
