use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entity::EntityKey;
use crate::error::ModelError;

/// Opaque block identifier, unique within a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockKey(pub String);

impl BlockKey {
    /// Generates a fresh random key.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BlockKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for BlockKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl fmt::Display for BlockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Header levels supported by the Markdown dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderLevel {
    One,
    Two,
    Three,
    Four,
}

impl HeaderLevel {
    /// All levels, deepest first. Recognition must try `####` before `#`.
    pub const DEEPEST_FIRST: [HeaderLevel; 4] = [
        HeaderLevel::Four,
        HeaderLevel::Three,
        HeaderLevel::Two,
        HeaderLevel::One,
    ];

    pub fn as_usize(self) -> usize {
        match self {
            HeaderLevel::One => 1,
            HeaderLevel::Two => 2,
            HeaderLevel::Three => 3,
            HeaderLevel::Four => 4,
        }
    }

    pub fn from_usize(level: usize) -> Option<Self> {
        match level {
            1 => Some(HeaderLevel::One),
            2 => Some(HeaderLevel::Two),
            3 => Some(HeaderLevel::Three),
            4 => Some(HeaderLevel::Four),
            _ => None,
        }
    }
}

/// The type of a block.
///
/// Code blocks carry their fence language; two code blocks belong to the
/// same code run only when their languages are equal. The wire form is the
/// dashed name shown by `Display`, e.g. `header-2` or `code-block-js`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum BlockType {
    #[default]
    Unstyled,
    Header(HeaderLevel),
    Blockquote,
    UnorderedListItem,
    OrderedListItem,
    CodeBlock {
        language: Option<String>,
    },
    Todo,
    Image,
}

impl BlockType {
    /// Builds a code block type, treating an empty language as none.
    pub fn code(language: Option<&str>) -> Self {
        BlockType::CodeBlock {
            language: language
                .map(str::trim)
                .filter(|lang| !lang.is_empty())
                .map(str::to_string),
        }
    }

    pub fn is_code(&self) -> bool {
        matches!(self, BlockType::CodeBlock { .. })
    }

    /// Types whose `depth` is rendered as leading indentation.
    pub fn is_list_like(&self) -> bool {
        matches!(
            self,
            BlockType::UnorderedListItem | BlockType::OrderedListItem | BlockType::Todo
        )
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockType::Unstyled => f.write_str("unstyled"),
            BlockType::Header(level) => write!(f, "header-{}", level.as_usize()),
            BlockType::Blockquote => f.write_str("blockquote"),
            BlockType::UnorderedListItem => f.write_str("unordered-list-item"),
            BlockType::OrderedListItem => f.write_str("ordered-list-item"),
            BlockType::CodeBlock { language: None } => f.write_str("code-block"),
            BlockType::CodeBlock {
                language: Some(lang),
            } => write!(f, "code-block-{lang}"),
            BlockType::Todo => f.write_str("todo"),
            BlockType::Image => f.write_str("image"),
        }
    }
}

impl FromStr for BlockType {
    type Err = ModelError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let block_type = match name {
            "unstyled" => BlockType::Unstyled,
            "blockquote" => BlockType::Blockquote,
            "unordered-list-item" => BlockType::UnorderedListItem,
            "ordered-list-item" => BlockType::OrderedListItem,
            "code-block" => BlockType::code(None),
            "todo" => BlockType::Todo,
            "image" => BlockType::Image,
            _ => {
                if let Some(lang) = name.strip_prefix("code-block-")
                    && !lang.is_empty()
                {
                    BlockType::code(Some(lang))
                } else if let Some(level) = name
                    .strip_prefix("header-")
                    .and_then(|n| n.parse().ok())
                    .and_then(HeaderLevel::from_usize)
                {
                    BlockType::Header(level)
                } else {
                    return Err(ModelError::UnknownBlockType {
                        name: name.to_string(),
                    });
                }
            }
        };
        Ok(block_type)
    }
}

impl TryFrom<String> for BlockType {
    type Error = ModelError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

impl From<BlockType> for String {
    fn from(block_type: BlockType) -> Self {
        block_type.to_string()
    }
}

/// Inline formatting attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InlineStyle {
    Bold,
    Italic,
    Code,
}

/// A styled span of a block's text, in chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineStyleRange {
    pub offset: usize,
    pub length: usize,
    pub style: InlineStyle,
}

impl InlineStyleRange {
    pub fn new(offset: usize, length: usize, style: InlineStyle) -> Self {
        Self {
            offset,
            length,
            style,
        }
    }

    pub fn end(&self) -> usize {
        self.offset + self.length
    }
}

/// A span of a block's text that refers to an entity, in chars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRange {
    pub offset: usize,
    pub length: usize,
    pub key: EntityKey,
}

impl EntityRange {
    pub fn new(offset: usize, length: usize, key: EntityKey) -> Self {
        Self {
            offset,
            length,
            key,
        }
    }

    pub fn end(&self) -> usize {
        self.offset + self.length
    }
}

/// Block-level metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockData {
    /// Checkbox state of a todo block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    /// Source URL of an image block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    /// Alt text of an image block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    /// Any other caller-defined metadata. Passed through untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl BlockData {
    pub fn is_checked(&self) -> bool {
        self.checked.unwrap_or(false)
    }
}

/// One line/paragraph-equivalent unit of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub key: BlockKey,
    #[serde(rename = "type", default)]
    pub block_type: BlockType,
    pub text: String,
    #[serde(default)]
    pub depth: usize,
    #[serde(default)]
    pub inline_style_ranges: Vec<InlineStyleRange>,
    #[serde(default)]
    pub entity_ranges: Vec<EntityRange>,
    #[serde(default)]
    pub data: BlockData,
}

impl Block {
    /// Creates an unstyled block with a freshly generated key.
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_key(BlockKey::generate(), text)
    }

    pub fn with_key(key: impl Into<BlockKey>, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            block_type: BlockType::Unstyled,
            text: text.into(),
            depth: 0,
            inline_style_ranges: Vec::new(),
            entity_ranges: Vec::new(),
            data: BlockData::default(),
        }
    }

    pub fn with_type(mut self, block_type: BlockType) -> Self {
        self.block_type = block_type;
        self
    }

    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_style(mut self, offset: usize, length: usize, style: InlineStyle) -> Self {
        self.inline_style_ranges
            .push(InlineStyleRange::new(offset, length, style));
        self
    }

    pub fn with_entity(mut self, offset: usize, length: usize, key: impl Into<EntityKey>) -> Self {
        self.entity_ranges
            .push(EntityRange::new(offset, length, key.into()));
        self
    }

    pub fn with_data(mut self, data: BlockData) -> Self {
        self.data = data;
        self
    }

    /// Marks a block as a todo with the given checkbox state.
    pub fn todo(mut self, checked: bool) -> Self {
        self.block_type = BlockType::Todo;
        self.data.checked = Some(checked);
        self
    }

    /// Length of the text in chars, the unit of all range offsets.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_type_drops_empty_language() {
        assert_eq!(
            BlockType::code(Some("  ")),
            BlockType::CodeBlock { language: None }
        );
        assert_eq!(
            BlockType::code(Some(" js ")),
            BlockType::CodeBlock {
                language: Some("js".to_string())
            }
        );
    }

    #[test]
    fn display_uses_dashed_names() {
        assert_eq!(BlockType::Header(HeaderLevel::Three).to_string(), "header-3");
        assert_eq!(BlockType::code(Some("js")).to_string(), "code-block-js");
        assert_eq!(BlockType::code(None).to_string(), "code-block");
    }

    #[test]
    fn names_parse_back_to_types() {
        for block_type in [
            BlockType::Unstyled,
            BlockType::Header(HeaderLevel::One),
            BlockType::Header(HeaderLevel::Four),
            BlockType::Blockquote,
            BlockType::UnorderedListItem,
            BlockType::OrderedListItem,
            BlockType::code(None),
            BlockType::code(Some("objective-c")),
            BlockType::Todo,
            BlockType::Image,
        ] {
            assert_eq!(block_type.to_string().parse::<BlockType>(), Ok(block_type));
        }
    }

    #[test]
    fn unknown_names_are_rejected() {
        for name in ["header-5", "header-one", "code-block-", "paragraph"] {
            assert_eq!(
                name.parse::<BlockType>(),
                Err(ModelError::UnknownBlockType {
                    name: name.to_string()
                })
            );
        }
    }

    #[test]
    fn serde_uses_display_names() {
        let block = Block::with_key("a", "x").with_type(BlockType::code(Some("js")));
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["type"], "code-block-js");

        let header: Block = serde_json::from_str(r#"{"key":"h","type":"header-2","text":"Hi"}"#)
            .unwrap();
        assert_eq!(header.block_type, BlockType::Header(HeaderLevel::Two));

        let bad = serde_json::from_str::<Block>(r#"{"key":"h","type":"header-9","text":""}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn generated_keys_are_unique() {
        assert_ne!(BlockKey::generate(), BlockKey::generate());
    }

    #[test]
    fn char_len_counts_scalars_not_bytes() {
        let block = Block::with_key("a", "héllo");
        assert_eq!(block.char_len(), 5);
        assert_eq!(block.text.len(), 6);
    }

    #[test]
    fn todo_sets_checked_data() {
        let block = Block::with_key("a", "milk").todo(true);
        assert_eq!(block.block_type, BlockType::Todo);
        assert!(block.data.is_checked());
    }
}
