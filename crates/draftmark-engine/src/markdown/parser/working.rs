use std::ops::Range;

use crate::markdown::offsets::{byte_to_char, char_to_byte, shift_after_removal};
use crate::model::{Block, EntityKey, EntityRange, InlineStyle, InlineStyleRange};

/// A byte span with its style, while a block is being parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSpan {
    pub span: Range<usize>,
    pub style: InlineStyle,
}

/// A byte span with its entity, while a block is being parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySpan {
    pub span: Range<usize>,
    pub key: EntityKey,
}

/// A block's text and ranges in byte offsets.
///
/// Every removal shifts every recorded span, so spans always refer to the
/// current text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingText {
    pub text: String,
    pub styles: Vec<StyleSpan>,
    pub entities: Vec<EntitySpan>,
}

impl WorkingText {
    pub fn from_block(block: &Block) -> Self {
        let text = block.text.clone();
        let to_bytes = |offset: usize, length: usize| {
            char_to_byte(&text, offset)..char_to_byte(&text, offset.saturating_add(length))
        };
        let styles = block
            .inline_style_ranges
            .iter()
            .map(|r| StyleSpan {
                span: to_bytes(r.offset, r.length),
                style: r.style,
            })
            .collect();
        let entities = block
            .entity_ranges
            .iter()
            .map(|r| EntitySpan {
                span: to_bytes(r.offset, r.length),
                key: r.key.clone(),
            })
            .collect();
        Self {
            text,
            styles,
            entities,
        }
    }

    /// Removes bytes `[range.start, range.end)` and shifts all spans.
    pub fn remove(&mut self, range: Range<usize>) {
        if range.is_empty() {
            return;
        }
        self.text.replace_range(range.clone(), "");
        let shift = |span: &mut Range<usize>| {
            span.start = shift_after_removal(span.start, range.start, range.end);
            span.end = shift_after_removal(span.end, range.start, range.end);
        };
        self.styles.iter_mut().for_each(|s| shift(&mut s.span));
        self.entities.iter_mut().for_each(|e| shift(&mut e.span));
    }

    /// Keeps only `range` of the text.
    pub fn keep(&mut self, range: Range<usize>) {
        self.remove(range.end..self.text.len());
        self.remove(0..range.start);
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.styles.clear();
        self.entities.clear();
    }

    /// Drops a trailing hard-line-break marker (two or more spaces).
    pub fn strip_hard_break(&mut self) {
        let trimmed = self.text.trim_end_matches(' ').len();
        if self.text.len() - trimmed >= 2 {
            self.remove(trimmed..self.text.len());
        }
    }

    /// Whether `range` touches a code span, inside which nothing else is
    /// recognized.
    pub fn in_raw_zone(&self, range: &Range<usize>) -> bool {
        !range.is_empty()
            && self.styles.iter().any(|s| {
                s.style == InlineStyle::Code && range.start < s.span.end && s.span.start < range.end
            })
    }

    /// Whether `span` already carries `style`.
    pub fn has_style(&self, style: InlineStyle, span: &Range<usize>) -> bool {
        self.styles
            .iter()
            .any(|s| s.style == style && s.span == *span)
    }

    /// Writes text and ranges back to `block`, converting to char offsets.
    /// Ranges that collapsed to nothing are dropped.
    pub fn write_back(self, block: &mut Block) {
        let text = self.text;
        let to_chars = |span: &Range<usize>| {
            let start = byte_to_char(&text, span.start);
            (start, byte_to_char(&text, span.end) - start)
        };
        block.inline_style_ranges = self
            .styles
            .iter()
            .filter(|s| !s.span.is_empty())
            .map(|s| {
                let (offset, length) = to_chars(&s.span);
                InlineStyleRange::new(offset, length, s.style)
            })
            .collect();
        block.entity_ranges = self
            .entities
            .iter()
            .filter(|e| !e.span.is_empty())
            .map(|e| {
                let (offset, length) = to_chars(&e.span);
                EntityRange::new(offset, length, e.key.clone())
            })
            .collect();
        block.text = text;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn remove_shifts_following_and_shrinks_covering_spans() {
        let block = Block::with_key("a", "**ab** cd")
            .with_style(0, 6, InlineStyle::Bold)
            .with_style(7, 2, InlineStyle::Italic);
        let mut work = WorkingText::from_block(&block);

        work.remove(4..6);
        work.remove(0..2);

        assert_eq!(work.text, "ab cd");
        assert_eq!(work.styles[0].span, 0..2);
        assert_eq!(work.styles[1].span, 3..5);
    }

    #[test]
    fn keep_trims_both_ends() {
        let mut work = WorkingText::from_block(&Block::with_key("a", "## Title"));
        work.keep(3..8);
        assert_eq!(work.text, "Title");
    }

    #[test]
    fn strip_hard_break_needs_two_spaces() {
        let mut work = WorkingText::from_block(&Block::with_key("a", "line  "));
        work.strip_hard_break();
        assert_eq!(work.text, "line");

        let mut single = WorkingText::from_block(&Block::with_key("a", "line "));
        single.strip_hard_break();
        assert_eq!(single.text, "line ");
    }

    #[test]
    fn raw_zone_detects_overlap_with_code() {
        let block = Block::with_key("a", "x `y` z").with_style(3, 1, InlineStyle::Code);
        let work = WorkingText::from_block(&block);
        assert!(work.in_raw_zone(&(3..4)));
        assert!(!work.in_raw_zone(&(0..1)));
        assert!(!work.in_raw_zone(&(4..4)));
    }

    #[test]
    fn has_style_needs_exact_span() {
        let block = Block::with_key("a", "abc").with_style(1, 1, InlineStyle::Code);
        let work = WorkingText::from_block(&block);
        assert!(work.has_style(InlineStyle::Code, &(1..2)));
        assert!(!work.has_style(InlineStyle::Bold, &(1..2)));
        assert!(!work.has_style(InlineStyle::Code, &(0..2)));
    }

    #[test]
    fn write_back_converts_to_chars() {
        let block = Block::with_key("a", "é **b**").with_style(4, 1, InlineStyle::Bold);
        let mut work = WorkingText::from_block(&block);
        assert_eq!(work.styles[0].span, 5..6);

        work.remove(6..8);
        work.remove(3..5);

        let mut out = Block::with_key("a", "");
        work.write_back(&mut out);
        assert_eq!(out.text, "é b");
        assert_eq!(out.inline_style_ranges[0].offset, 2);
        assert_eq!(out.inline_style_ranges[0].length, 1);
    }
}
