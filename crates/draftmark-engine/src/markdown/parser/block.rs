//! Line-anchored recognition: decides a block's type from its prefix.

use std::ops::Range;

use regex::Captures;

use super::working::WorkingText;
use crate::markdown::patterns::BlockPattern;
use crate::model::{Block, BlockType};

/// List nesting from leading whitespace: two spaces per level, a tab is a
/// level on its own.
pub fn depth_from_indent(indent: &str) -> usize {
    let width: usize = indent
        .chars()
        .map(|c| if c == '\t' { 2 } else { 1 })
        .sum();
    width / 2
}

/// What a block pattern captured, detached from the matched text.
struct LineFacts {
    content: Range<usize>,
    depth: usize,
    checked: Option<bool>,
    src: Option<String>,
    alt: Option<String>,
}

impl LineFacts {
    fn from_captures(caps: &Captures<'_>) -> Self {
        Self {
            content: caps.name("content").map_or(0..0, |m| m.range()),
            depth: caps
                .name("indent")
                .map_or(0, |m| depth_from_indent(m.as_str())),
            checked: caps.name("check").map(|m| m.as_str() != " "),
            src: caps.name("src").map(|m| m.as_str().trim().to_string()),
            alt: caps.name("alt").map(|m| m.as_str().to_string()),
        }
    }
}

/// Applies the first matching block pattern to `block` and strips its
/// marker from `work`. Returns the pattern that matched.
pub fn apply_block_pattern(block: &mut Block, work: &mut WorkingText) -> Option<BlockPattern> {
    let (pattern, facts) = BlockPattern::PRIORITY.into_iter().find_map(|p| {
        p.regex()
            .captures(&work.text)
            .map(|caps| (p, LineFacts::from_captures(&caps)))
    })?;
    log::trace!("block {} matched {pattern:?} ({:?})", block.key, pattern.mutation());

    block.depth = facts.depth;
    match pattern {
        BlockPattern::ImageLine => {
            block.block_type = BlockType::Image;
            block.data.src = facts.src;
            block.data.alt = facts.alt;
            work.clear();
            return Some(pattern);
        }
        BlockPattern::Header(level) => block.block_type = BlockType::Header(level),
        BlockPattern::Blockquote => block.block_type = BlockType::Blockquote,
        BlockPattern::Todo => {
            block.block_type = BlockType::Todo;
            block.data.checked = facts.checked;
        }
        BlockPattern::UnorderedList => block.block_type = BlockType::UnorderedListItem,
        BlockPattern::OrderedList => block.block_type = BlockType::OrderedListItem,
    }

    work.keep(facts.content);
    Some(pattern)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HeaderLevel;
    use rstest::rstest;

    fn apply(text: &str) -> (Block, WorkingText) {
        let mut block = Block::with_key("k", text);
        let mut work = WorkingText::from_block(&block);
        apply_block_pattern(&mut block, &mut work);
        (block, work)
    }

    #[rstest]
    #[case("", 0)]
    #[case("  ", 1)]
    #[case("   ", 1)]
    #[case("    ", 2)]
    #[case("\t", 1)]
    #[case("\t  ", 2)]
    fn depth_counts_two_per_level(#[case] indent: &str, #[case] depth: usize) {
        assert_eq!(depth_from_indent(indent), depth);
    }

    #[test]
    fn level_four_header_is_not_level_one() {
        let (block, work) = apply("#### Deep");
        assert_eq!(block.block_type, BlockType::Header(HeaderLevel::Four));
        assert_eq!(work.text, "Deep");
    }

    #[test]
    fn checked_todo() {
        let (block, work) = apply("- [x] buy milk");
        assert_eq!(block.block_type, BlockType::Todo);
        assert_eq!(block.data.checked, Some(true));
        assert_eq!(work.text, "buy milk");
    }

    #[test]
    fn unchecked_nested_todo() {
        let (block, work) = apply("  - [ ] later");
        assert_eq!(block.data.checked, Some(false));
        assert_eq!(block.depth, 1);
        assert_eq!(work.text, "later");
    }

    #[test]
    fn nested_unordered_item_depth() {
        let (block, work) = apply("    - deep");
        assert_eq!(block.block_type, BlockType::UnorderedListItem);
        assert_eq!(block.depth, 2);
        assert_eq!(work.text, "deep");
    }

    #[test]
    fn ordered_item_any_number() {
        let (block, work) = apply("7. seventh");
        assert_eq!(block.block_type, BlockType::OrderedListItem);
        assert_eq!(work.text, "seventh");
    }

    #[test]
    fn blockquote_strips_marker() {
        let (block, work) = apply("> wise words");
        assert_eq!(block.block_type, BlockType::Blockquote);
        assert_eq!(work.text, "wise words");
    }

    #[test]
    fn image_line_becomes_image_block() {
        let (block, work) = apply("![Image](http://x/cat.png)");
        assert_eq!(block.block_type, BlockType::Image);
        assert_eq!(block.data.src.as_deref(), Some("http://x/cat.png"));
        assert_eq!(block.data.alt.as_deref(), Some("Image"));
        assert!(work.text.is_empty());
    }

    #[rstest]
    #[case("![cat](cat.png)", "cat")]
    #[case("![](cat.png)", "")]
    #[case("  ![a tabby cat](cat.png) ", "a tabby cat")]
    fn image_line_keeps_alt_text(#[case] line: &str, #[case] alt: &str) {
        let (block, _) = apply(line);
        assert_eq!(block.block_type, BlockType::Image);
        assert_eq!(block.data.src.as_deref(), Some("cat.png"));
        assert_eq!(block.data.alt.as_deref(), Some(alt));
    }

    #[test]
    fn plain_text_matches_nothing() {
        let mut block = Block::with_key("k", "just text");
        let mut work = WorkingText::from_block(&block);
        assert_eq!(apply_block_pattern(&mut block, &mut work), None);
        assert_eq!(block.block_type, BlockType::Unstyled);
        assert_eq!(work.text, "just text");
    }
}
