//! # Delimiter Table
//!
//! Every Markdown marker the converter emits or strips lives here. The
//! serializer, the code-run grouper and the inline scanner refer to these
//! constants; none of them spell a marker out themselves.

use crate::model::{BlockData, BlockType, HeaderLevel, InlineStyle};
use crate::options::Options;

pub const BOLD: &str = "**";
pub const ITALIC: &str = "*";
pub const ITALIC_ALT: &str = "_";
pub const CODE: &str = "`";

pub const FENCE: &str = "```";

pub const LINK_OPEN: &str = "[";
pub const IMAGE_OPEN: &str = "![";
pub const TARGET_OPEN: &str = "](";
pub const TARGET_CLOSE: &str = ")";

/// Alt text for image blocks that carry none of their own.
pub const IMAGE_BLOCK_ALT: &str = "Image";

/// Two trailing spaces: a Markdown hard line break.
pub const HARD_BREAK: &str = "  ";

/// One nesting level of list indentation.
pub const INDENT: &str = "  ";

/// Marker emitted for an inline style.
pub fn inline_marker(style: InlineStyle, options: &Options) -> &'static str {
    match style {
        InlineStyle::Bold => BOLD,
        InlineStyle::Italic => options.italic_marker.as_str(),
        InlineStyle::Code => CODE,
    }
}

/// Line prefix for a block type, without indentation.
///
/// Code blocks and images have no prefix: they are rendered whole by the
/// code-run grouper and the image special case.
pub fn block_marker(block_type: &BlockType, data: &BlockData) -> &'static str {
    match block_type {
        BlockType::Unstyled => "",
        BlockType::Header(level) => header_marker(*level),
        BlockType::Blockquote => "> ",
        BlockType::UnorderedListItem => "- ",
        BlockType::OrderedListItem => "1. ",
        BlockType::Todo if data.is_checked() => "- [x] ",
        BlockType::Todo => "- [ ] ",
        BlockType::CodeBlock { .. } | BlockType::Image => "",
    }
}

pub fn header_marker(level: HeaderLevel) -> &'static str {
    match level {
        HeaderLevel::One => "# ",
        HeaderLevel::Two => "## ",
        HeaderLevel::Three => "### ",
        HeaderLevel::Four => "#### ",
    }
}

/// Indentation plus marker for a block: the part of a line before its text.
pub fn block_prefix(block_type: &BlockType, depth: usize, data: &BlockData) -> String {
    let indent = if block_type.is_list_like() { depth } else { 0 };
    let mut prefix = INDENT.repeat(indent);
    prefix.push_str(block_marker(block_type, data));
    prefix
}

/// Opening fence line for a code run.
pub fn fence_open(language: Option<&str>) -> String {
    format!("{FENCE}{}", language.unwrap_or(""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ItalicMarker;

    #[test]
    fn italic_marker_follows_options() {
        let underscore = Options {
            italic_marker: ItalicMarker::Underscore,
            ..Options::default()
        };
        assert_eq!(inline_marker(InlineStyle::Italic, &Options::default()), "*");
        assert_eq!(inline_marker(InlineStyle::Italic, &underscore), "_");
    }

    #[test]
    fn todo_marker_reflects_checked_state() {
        let checked = BlockData {
            checked: Some(true),
            ..BlockData::default()
        };
        assert_eq!(block_marker(&BlockType::Todo, &checked), "- [x] ");
        assert_eq!(block_marker(&BlockType::Todo, &BlockData::default()), "- [ ] ");
    }

    #[test]
    fn list_prefix_is_indented_by_depth() {
        let data = BlockData::default();
        assert_eq!(block_prefix(&BlockType::UnorderedListItem, 2, &data), "    - ");
        assert_eq!(block_prefix(&BlockType::OrderedListItem, 1, &data), "  1. ");
    }

    #[test]
    fn depth_is_ignored_outside_lists() {
        let data = BlockData::default();
        assert_eq!(
            block_prefix(&BlockType::Header(HeaderLevel::Two), 3, &data),
            "## "
        );
    }

    #[test]
    fn fence_open_appends_language() {
        assert_eq!(fence_open(Some("js")), "```js");
        assert_eq!(fence_open(None), "```");
    }
}
