//! # Range Merger
//!
//! Turns one block into one Markdown line by inserting delimiters for its
//! style and entity ranges.
//!
//! Insertions are collected into a map keyed by char offset in the
//! unmarked text. At one offset every closing delimiter comes before every
//! opening one, so a style ending where a link starts stays outside the
//! bracket. Closers nest inside out and openers outside in; when a style
//! and a link cover the same text the bracket is outermost. Ranges that are
//! otherwise tied keep their processing order: style ranges in supplied
//! order, then entity ranges.
//!
//! The map is applied in ascending offset order. A running counter of bytes
//! already inserted, seeded with the prefix length, gives each insertion
//! point without rescanning shifted text.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use super::delimiters;
use super::entities::{self, ResolvedEntity};
use super::offsets::char_to_byte;
use crate::diagnostics::{ConversionWarning, Diagnostics};
use crate::model::{Block, BlockType, EntityMap, EntityType};
use crate::options::Options;

/// A rendered line and the byte length of its block prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedLine {
    pub line: String,
    pub prefix_len: usize,
}

/// Renders a single non-code block.
pub fn merge_block(
    block: &Block,
    entity_map: &EntityMap,
    options: &Options,
    diagnostics: &mut Diagnostics,
) -> MergedLine {
    if block.block_type == BlockType::Image {
        return MergedLine {
            line: image_line(
                block.data.alt.as_deref().unwrap_or(delimiters::IMAGE_BLOCK_ALT),
                block.data.src.as_deref().unwrap_or(""),
            ),
            prefix_len: 0,
        };
    }

    let insertions = insertions(block, entity_map, options, diagnostics);
    let prefix = delimiters::block_prefix(&block.block_type, block.depth, &block.data);
    let prefix_len = prefix.len();

    let mut line = prefix;
    line.push_str(&block.text);

    let mut cumulative = prefix_len;
    for (offset, insert) in &insertions {
        let at = cumulative + char_to_byte(&block.text, *offset);
        line.insert_str(at, insert);
        cumulative += insert.len();
    }

    MergedLine { line, prefix_len }
}

/// `![alt](src)`, the rendering of an image block.
pub fn image_line(alt: &str, src: &str) -> String {
    format!(
        "{}{alt}{}{src}{}",
        delimiters::IMAGE_OPEN,
        delimiters::TARGET_OPEN,
        delimiters::TARGET_CLOSE
    )
}

/// A range's opening and closing delimiters, clamped to the text.
struct Wrap {
    start: usize,
    end: usize,
    open: String,
    close: String,
    entity: bool,
}

impl Wrap {
    /// Both delimiters at once, for a range of length zero.
    fn whole(&self) -> String {
        format!("{}{}", self.open, self.close)
    }
}

fn insertions(
    block: &Block,
    entity_map: &EntityMap,
    options: &Options,
    diagnostics: &mut Diagnostics,
) -> BTreeMap<usize, String> {
    let wraps = wraps(block, entity_map, options, diagnostics);

    let mut slots: BTreeMap<usize, (Vec<usize>, Vec<usize>)> = BTreeMap::new();
    for (i, wrap) in wraps.iter().enumerate() {
        if wrap.start < wrap.end {
            slots.entry(wrap.end).or_default().0.push(i);
        }
        slots.entry(wrap.start).or_default().1.push(i);
    }

    slots
        .into_iter()
        .map(|(offset, (mut closing, mut opening))| {
            // Inner ranges close first and open last. On equal spans an
            // entity is the outermost and styles keep their supplied order.
            closing.sort_by_key(|&i| (Reverse(wraps[i].start), wraps[i].entity, Reverse(i)));
            opening.sort_by_key(|&i| (Reverse(wraps[i].end), !wraps[i].entity, i));

            let mut insert = String::new();
            for &i in &closing {
                insert.push_str(&wraps[i].close);
            }
            for &i in &opening {
                let wrap = &wraps[i];
                if wrap.start == wrap.end {
                    insert.push_str(&wrap.whole());
                } else {
                    insert.push_str(&wrap.open);
                }
            }
            (offset, insert)
        })
        .collect()
}

/// Delimiters for every style range, then every entity range.
fn wraps(
    block: &Block,
    entity_map: &EntityMap,
    options: &Options,
    diagnostics: &mut Diagnostics,
) -> Vec<Wrap> {
    let text_len = block.char_len();
    let mut wraps = Vec::with_capacity(block.inline_style_ranges.len() + block.entity_ranges.len());

    for range in &block.inline_style_ranges {
        let (start, end) = clamp(block, range.offset, range.length, text_len, diagnostics);
        let marker = delimiters::inline_marker(range.style, options);
        wraps.push(Wrap {
            start,
            end,
            open: marker.to_string(),
            close: marker.to_string(),
            entity: false,
        });
    }

    for range in &block.entity_ranges {
        let (start, end) = clamp(block, range.offset, range.length, text_len, diagnostics);
        let resolved = entities::lookup(entity_map, &range.key).unwrap_or_else(|| {
            diagnostics.push(ConversionWarning::UnresolvableEntity {
                block: block.key.clone(),
                entity: range.key.clone(),
            });
            ResolvedEntity {
                entity_type: EntityType::Link,
                payload: "",
            }
        });

        let open = match resolved.entity_type {
            EntityType::Link => delimiters::LINK_OPEN,
            EntityType::Image => delimiters::IMAGE_OPEN,
        };
        wraps.push(Wrap {
            start,
            end,
            open: open.to_string(),
            close: format!(
                "{}{}{}",
                delimiters::TARGET_OPEN,
                resolved.payload,
                delimiters::TARGET_CLOSE
            ),
            entity: true,
        });
    }

    wraps
}

/// Clamps a range to the text, reporting ranges that reach past the end.
fn clamp(
    block: &Block,
    offset: usize,
    length: usize,
    text_len: usize,
    diagnostics: &mut Diagnostics,
) -> (usize, usize) {
    let end = offset.saturating_add(length);
    if end > text_len {
        diagnostics.push(ConversionWarning::RangeOutOfBounds {
            block: block.key.clone(),
            offset,
            length,
            text_len,
        });
    }
    (offset.min(text_len), end.min(text_len))
}
