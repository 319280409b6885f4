//! # Code-Run Grouper
//!
//! A code run is a maximal sequence of contiguous blocks with the same
//! code block type. Serializing collapses a run into one fenced segment;
//! parsing expands a fenced segment back into one block per line and drops
//! the fence marker blocks.

use super::delimiters;
use crate::diagnostics::{ConversionWarning, Diagnostics};
use crate::model::{Block, BlockKey, BlockType};

/// Fence line recognition.
pub struct CodeFence;

impl CodeFence {
    /// Language tag of an opening fence line, `Some(None)` for a bare fence.
    pub fn opening(text: &str) -> Option<Option<&str>> {
        let rest = text.trim().strip_prefix(delimiters::FENCE)?;
        let language = rest.trim();
        Some((!language.is_empty()).then_some(language))
    }

    pub fn is_closing(text: &str) -> bool {
        text.trim() == delimiters::FENCE
    }
}

/// A slice of the document as the serializer sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Single(&'a Block),
    CodeRun(CodeRun<'a>),
}

/// Contiguous code blocks sharing one type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeRun<'a> {
    pub blocks: &'a [Block],
}

impl<'a> CodeRun<'a> {
    pub fn language(&self) -> Option<&'a str> {
        match self.blocks.first().map(|b| &b.block_type) {
            Some(BlockType::CodeBlock { language }) => language.as_deref(),
            _ => None,
        }
    }

    /// The fenced segment: opening fence, one line per block, closing fence.
    pub fn render(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.blocks.len() + 2);
        lines.push(delimiters::fence_open(self.language()));
        lines.extend(self.blocks.iter().map(|b| b.text.clone()));
        lines.push(delimiters::FENCE.to_string());
        lines
    }
}

/// Splits blocks into single blocks and maximal code runs.
pub fn segments(blocks: &[Block]) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < blocks.len() {
        let block = &blocks[i];
        if !block.block_type.is_code() {
            out.push(Segment::Single(block));
            i += 1;
            continue;
        }

        let len = blocks[i..]
            .iter()
            .take_while(|b| b.block_type == block.block_type)
            .count();
        log::debug!("code run of {len} blocks ({}) at {}", block.block_type, block.key);
        out.push(Segment::CodeRun(CodeRun {
            blocks: &blocks[i..i + len],
        }));
        i += len;
    }
    out
}

/// Fence tracking while expanding.
#[derive(Debug, Clone, PartialEq, Eq)]
enum FenceState {
    Outside,
    Inside {
        opener: BlockKey,
        block_type: BlockType,
    },
}

/// Re-types fenced lines as code blocks and removes the fence markers.
///
/// Blocks that are already code blocks are never treated as fence
/// markers. An opening fence without a closing fence turns every
/// remaining block into code.
pub fn expand_fences(blocks: Vec<Block>, diagnostics: &mut Diagnostics) -> Vec<Block> {
    let mut state = FenceState::Outside;
    let mut out = Vec::with_capacity(blocks.len());

    for mut block in blocks {
        match &state {
            FenceState::Outside => {
                if !block.block_type.is_code()
                    && let Some(language) = CodeFence::opening(&block.text)
                {
                    log::debug!("fence opened at {} ({language:?})", block.key);
                    state = FenceState::Inside {
                        opener: block.key.clone(),
                        block_type: BlockType::code(language),
                    };
                    continue;
                }
                out.push(block);
            }
            FenceState::Inside { block_type, .. } => {
                if !block.block_type.is_code() && CodeFence::is_closing(&block.text) {
                    log::debug!("fence closed at {}", block.key);
                    state = FenceState::Outside;
                    continue;
                }
                block.block_type = block_type.clone();
                block.depth = 0;
                block.inline_style_ranges.clear();
                block.entity_ranges.clear();
                out.push(block);
            }
        }
    }

    if let FenceState::Inside { opener, block_type } = state {
        let language = match block_type {
            BlockType::CodeBlock { language } => language,
            _ => None,
        };
        diagnostics.push(ConversionWarning::UnclosedFence {
            block: opener,
            language,
        });
    }

    out
}
