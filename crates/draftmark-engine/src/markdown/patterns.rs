//! # Pattern Table
//!
//! Recognition patterns in priority order, each with the mutation it
//! implies. Block-level patterns are anchored at line start and matched with
//! regexes; inline patterns are scanned by [`super::parser::inline`].
//!
//! ## Precedence
//!
//! - `####` is tried before `###`, `##` and `#`.
//! - A whole-line image is tried before any list or header pattern.
//! - Todo (`- [ ] `) is tried before unordered list (`- `).
//! - Inline: code first (a raw zone), then image before link (a link
//!   never starts right after `!`), then bold before italic (`**` starts
//!   with `*`).

use std::sync::OnceLock;

use regex::Regex;

use crate::model::{HeaderLevel, InlineStyle};

/// The kind of change a matched pattern makes to a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    ChangeBlockType,
    ChangeInlineStyle,
    ApplyEntity,
}

/// Line-anchored patterns that decide a block's type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockPattern {
    ImageLine,
    Header(HeaderLevel),
    Blockquote,
    Todo,
    UnorderedList,
    OrderedList,
}

impl BlockPattern {
    pub const PRIORITY: [BlockPattern; 9] = [
        BlockPattern::ImageLine,
        BlockPattern::Header(HeaderLevel::DEEPEST_FIRST[0]),
        BlockPattern::Header(HeaderLevel::DEEPEST_FIRST[1]),
        BlockPattern::Header(HeaderLevel::DEEPEST_FIRST[2]),
        BlockPattern::Header(HeaderLevel::DEEPEST_FIRST[3]),
        BlockPattern::Blockquote,
        BlockPattern::Todo,
        BlockPattern::UnorderedList,
        BlockPattern::OrderedList,
    ];

    pub fn mutation(self) -> Mutation {
        Mutation::ChangeBlockType
    }

    /// The regex for this pattern.
    ///
    /// Named groups: `content` (text kept in the block), `indent` (list
    /// indentation), `check` (todo checkbox), `alt` and `src` (image line).
    pub fn regex(self) -> &'static Regex {
        static IMAGE_LINE: OnceLock<Regex> = OnceLock::new();
        static HEADERS: OnceLock<[Regex; 4]> = OnceLock::new();
        static BLOCKQUOTE: OnceLock<Regex> = OnceLock::new();
        static TODO: OnceLock<Regex> = OnceLock::new();
        static UNORDERED: OnceLock<Regex> = OnceLock::new();
        static ORDERED: OnceLock<Regex> = OnceLock::new();

        match self {
            BlockPattern::ImageLine => IMAGE_LINE.get_or_init(|| {
                Regex::new(r"^[ \t]*!\[(?P<alt>[^\]]*)\]\((?P<src>[^)]*)\)[ \t]*$")
                    .expect("Invalid image line regex")
            }),
            BlockPattern::Header(level) => {
                let headers = HEADERS.get_or_init(|| {
                    [1, 2, 3, 4].map(|n| {
                        Regex::new(&format!(r"(?s)^#{{{n}}} (?P<content>.*)$"))
                            .expect("Invalid header regex")
                    })
                });
                &headers[level.as_usize() - 1]
            }
            BlockPattern::Blockquote => BLOCKQUOTE.get_or_init(|| {
                Regex::new(r"(?s)^> (?P<content>.*)$").expect("Invalid blockquote regex")
            }),
            BlockPattern::Todo => TODO.get_or_init(|| {
                Regex::new(r"(?s)^(?P<indent>[ \t]*)[-*+] \[(?P<check>[ xX])\] (?P<content>.*)$")
                    .expect("Invalid todo regex")
            }),
            BlockPattern::UnorderedList => UNORDERED.get_or_init(|| {
                Regex::new(r"(?s)^(?P<indent>[ \t]*)[-*+][ \t]+(?P<content>.*)$")
                    .expect("Invalid unordered list regex")
            }),
            BlockPattern::OrderedList => ORDERED.get_or_init(|| {
                Regex::new(r"(?s)^(?P<indent>[ \t]*)[0-9]+\.[ \t]+(?P<content>.*)$")
                    .expect("Invalid ordered list regex")
            }),
        }
    }
}

/// Inline patterns, scanned left to right inside a block's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlinePattern {
    Code,
    Image,
    Link,
    Bold,
    Italic,
}

impl InlinePattern {
    pub const PRIORITY: [InlinePattern; 5] = [
        InlinePattern::Code,
        InlinePattern::Image,
        InlinePattern::Link,
        InlinePattern::Bold,
        InlinePattern::Italic,
    ];

    pub fn mutation(self) -> Mutation {
        match self {
            InlinePattern::Code | InlinePattern::Bold | InlinePattern::Italic => {
                Mutation::ChangeInlineStyle
            }
            InlinePattern::Image | InlinePattern::Link => Mutation::ApplyEntity,
        }
    }

    /// The style recorded for a style pattern.
    pub fn style(self) -> Option<InlineStyle> {
        match self {
            InlinePattern::Code => Some(InlineStyle::Code),
            InlinePattern::Bold => Some(InlineStyle::Bold),
            InlinePattern::Italic => Some(InlineStyle::Italic),
            InlinePattern::Image | InlinePattern::Link => None,
        }
    }
}
