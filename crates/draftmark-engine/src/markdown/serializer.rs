//! # Serializer
//!
//! Folds the document's segments into Markdown lines. Each line, including
//! the last, ends with `\n`.

use super::code_run::{Segment, segments};
use super::delimiters;
use super::merge::merge_block;
use crate::diagnostics::Diagnostics;
use crate::model::{Block, BlockType, Document};
use crate::options::Options;

/// Lines emitted so far, and whether the last one was non-empty plain text.
#[derive(Debug, Default)]
struct Output {
    lines: Vec<String>,
    after_text: bool,
}

impl Output {
    fn push_block(mut self, block: &Block, line: String, options: &Options) -> Self {
        let is_text = is_plain_text(block);
        if options.hard_line_breaks
            && self.after_text
            && is_text
            && let Some(prev) = self.lines.last_mut()
            && !prev.ends_with(delimiters::HARD_BREAK)
        {
            prev.push_str(delimiters::HARD_BREAK);
        }
        self.lines.push(line);
        self.after_text = is_text;
        self
    }

    fn push_run(mut self, lines: Vec<String>) -> Self {
        self.lines.extend(lines);
        self.after_text = false;
        self
    }

    fn finish(self) -> String {
        self.lines.into_iter().fold(String::new(), |mut out, line| {
            out.push_str(&line);
            out.push('\n');
            out
        })
    }
}

fn is_plain_text(block: &Block) -> bool {
    block.block_type == BlockType::Unstyled && !block.text.is_empty()
}

/// Renders `document` as Markdown.
pub fn serialize_document(
    document: &Document,
    options: &Options,
    diagnostics: &mut Diagnostics,
) -> String {
    segments(&document.blocks)
        .into_iter()
        .fold(Output::default(), |out, segment| match segment {
            Segment::Single(block) => {
                let merged = merge_block(block, &document.entity_map, options, diagnostics);
                out.push_block(block, merged.line, options)
            }
            Segment::CodeRun(run) => out.push_run(run.render()),
        })
        .finish()
}
