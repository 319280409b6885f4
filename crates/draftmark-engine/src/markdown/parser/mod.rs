pub mod block;
pub mod inline;
pub mod working;

use block::apply_block_pattern;
use inline::apply_inline_patterns;
use working::WorkingText;

use crate::diagnostics::Diagnostics;
use crate::markdown::code_run::expand_fences;
use crate::markdown::entities::EntityResolver;
use crate::markdown::patterns::BlockPattern;
use crate::model::{Block, BlockType, Document};
use crate::options::Options;

/// Parses every Markdown-bearing block of `document`.
///
/// Fences are expanded first so fenced lines are never seen by the block
/// or inline patterns.
pub fn parse_document(
    document: Document,
    options: &Options,
    diagnostics: &mut Diagnostics,
) -> Document {
    let Document {
        blocks,
        mut entity_map,
    } = document;

    let blocks = expand_fences(blocks, diagnostics);
    let mut resolver = EntityResolver::new(&mut entity_map);
    let blocks = blocks
        .into_iter()
        .map(|block| match block.block_type {
            BlockType::CodeBlock { .. } | BlockType::Image => block,
            _ => parse_block(block, &mut resolver, options, diagnostics),
        })
        .collect();

    Document { blocks, entity_map }
}

/// Parses one block's text: block pattern, hard break, then inline
/// patterns.
pub fn parse_block(
    mut block: Block,
    resolver: &mut EntityResolver<'_>,
    options: &Options,
    diagnostics: &mut Diagnostics,
) -> Block {
    let mut work = WorkingText::from_block(&block);
    if apply_block_pattern(&mut block, &mut work) == Some(BlockPattern::ImageLine) {
        work.write_back(&mut block);
        return block;
    }

    work.strip_hard_break();
    apply_inline_patterns(
        &mut work,
        resolver,
        options.max_matches_per_block,
        &block.key,
        diagnostics,
    );
    work.write_back(&mut block);
    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EntityMap, HeaderLevel, InlineStyle, InlineStyleRange};
    use pretty_assertions::assert_eq;

    fn parse_line(text: &str) -> (Block, EntityMap) {
        let mut map = EntityMap::new();
        let mut diagnostics = Diagnostics::new();
        let block = parse_block(
            Block::with_key("k", text),
            &mut EntityResolver::new(&mut map),
            &Options::default(),
            &mut diagnostics,
        );
        (block, map)
    }

    #[test]
    fn header_with_inline_style() {
        let (block, _) = parse_line("## Hello **world**");
        assert_eq!(block.block_type, BlockType::Header(HeaderLevel::Two));
        assert_eq!(block.text, "Hello world");
        assert_eq!(
            block.inline_style_ranges,
            vec![InlineStyleRange::new(6, 5, InlineStyle::Bold)]
        );
    }

    #[test]
    fn hard_break_is_stripped_before_inline() {
        let (block, _) = parse_line("first *line*  ");
        assert_eq!(block.text, "first line");
        assert_eq!(
            block.inline_style_ranges,
            vec![InlineStyleRange::new(6, 4, InlineStyle::Italic)]
        );
    }

    #[test]
    fn image_line_skips_inline_patterns() {
        let (block, map) = parse_line("![Image](cat.png)");
        assert_eq!(block.block_type, BlockType::Image);
        assert_eq!(block.text, "");
        assert!(map.is_empty());
    }

    #[test]
    fn offsets_are_chars_after_parse() {
        let (block, _) = parse_line("- café **crème**");
        assert_eq!(block.text, "café crème");
        assert_eq!(
            block.inline_style_ranges,
            vec![InlineStyleRange::new(5, 5, InlineStyle::Bold)]
        );
    }

    #[test]
    fn document_expands_fences_and_reuses_entities() {
        let document = Document::new(vec![
            Block::with_key("1", "[a](x.com) and [b](x.com)"),
            Block::with_key("2", "```"),
            Block::with_key("3", "**raw**"),
            Block::with_key("4", "```"),
        ]);
        let mut diagnostics = Diagnostics::new();
        let parsed = parse_document(document, &Options::default(), &mut diagnostics);

        assert_eq!(parsed.blocks.len(), 2);
        assert_eq!(parsed.blocks[0].text, "a and b");
        assert_eq!(parsed.entity_map.len(), 1);
        assert_eq!(
            parsed.blocks[0].entity_ranges[0].key,
            parsed.blocks[0].entity_ranges[1].key
        );
        assert_eq!(parsed.blocks[1].text, "**raw**");
        assert!(parsed.blocks[1].inline_style_ranges.is_empty());
        assert!(!diagnostics.has_warnings());
    }
}
