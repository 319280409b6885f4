//! # Inline Recognition
//!
//! Each inline pattern is run to a fixpoint in priority order. A pass scans
//! the current text with a [`Cursor`] for the first acceptable match,
//! records a style or entity over the match's inner text, removes the
//! delimiters, and scans again. Every accepted match removes at least two
//! delimiter bytes, so a block with `n` bytes needs at most `n / 2` rounds.
//!
//! Code spans are raw zones: once a code span is recorded, no later match
//! may place a delimiter inside it.

use std::ops::Range;

use super::working::{EntitySpan, StyleSpan, WorkingText};
use crate::diagnostics::{ConversionWarning, Diagnostics};
use crate::markdown::cursor::Cursor;
use crate::markdown::delimiters;
use crate::markdown::entities::EntityResolver;
use crate::markdown::patterns::{InlinePattern, Mutation};
use crate::model::BlockKey;

/// A recognized inline construct, in byte offsets of the current text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineMatch {
    /// Full span including delimiters.
    pub full: Range<usize>,
    /// Content kept in the text.
    pub inner: Range<usize>,
    /// Link or image target, for entity patterns.
    pub target: Option<Range<usize>>,
}

impl InlineMatch {
    fn opening(&self) -> Range<usize> {
        self.full.start..self.inner.start
    }

    fn closing(&self) -> Range<usize> {
        self.inner.end..self.full.end
    }
}

/// Runs every inline pattern over `work`.
pub fn apply_inline_patterns(
    work: &mut WorkingText,
    resolver: &mut EntityResolver<'_>,
    limit: Option<usize>,
    block: &BlockKey,
    diagnostics: &mut Diagnostics,
) {
    let mut applied = 0usize;
    for pattern in InlinePattern::PRIORITY {
        while let Some(m) = find(pattern, work) {
            if limit.is_some_and(|limit| applied >= limit) {
                diagnostics.push(ConversionWarning::MatchLimit {
                    block: block.clone(),
                    limit: applied,
                });
                return;
            }
            log::trace!("block {block}: {pattern:?} at {:?}", m.full);
            apply(pattern, &m, work, resolver);
            applied += 1;
        }
    }
}

/// First acceptable match of `pattern` in the current text.
pub fn find(pattern: InlinePattern, work: &WorkingText) -> Option<InlineMatch> {
    let mut cur = Cursor::new(&work.text);
    while !cur.eof() {
        let mut attempt = cur.clone();
        if let Some(m) = try_parse(pattern, &mut attempt)
            && !work.in_raw_zone(&m.opening())
            && !work.in_raw_zone(&m.closing())
            && !pattern
                .style()
                .is_some_and(|style| work.has_style(style, &m.inner))
        {
            return Some(m);
        }
        cur.bump();
    }
    None
}

fn try_parse(pattern: InlinePattern, cur: &mut Cursor<'_>) -> Option<InlineMatch> {
    match pattern {
        InlinePattern::Code => try_parse_delimited(cur, delimiters::CODE),
        InlinePattern::Bold => try_parse_delimited(cur, delimiters::BOLD),
        InlinePattern::Italic if cur.starts_with(delimiters::ITALIC_ALT) => {
            try_parse_underscore(cur)
        }
        InlinePattern::Italic => try_parse_delimited(cur, delimiters::ITALIC),
        InlinePattern::Image => try_parse_target(cur, delimiters::IMAGE_OPEN),
        InlinePattern::Link => {
            // `![` belongs to images.
            if cur.prev() == Some(b'!') {
                return None;
            }
            try_parse_target(cur, delimiters::LINK_OPEN)
        }
    }
}

/// `<delim>inner<delim>` with non-empty inner text, closed by the nearest
/// following delimiter.
fn try_parse_delimited(cur: &mut Cursor<'_>, delim: &str) -> Option<InlineMatch> {
    if !cur.starts_with(delim) {
        return None;
    }

    let start = cur.i;
    cur.bump_n(delim.len());
    let inner_start = cur.i;
    let close = cur.find(delim)?;
    if close == inner_start {
        return None;
    }
    cur.i = close + delim.len();

    Some(InlineMatch {
        full: start..cur.i,
        inner: inner_start..close,
        target: None,
    })
}

/// `_inner_`, only at word boundaries so `snake_case_name` stays text.
fn try_parse_underscore(cur: &mut Cursor<'_>) -> Option<InlineMatch> {
    let is_word = |b: Option<u8>| b.is_some_and(|b| b.is_ascii_alphanumeric());
    if is_word(cur.prev()) {
        return None;
    }
    let m = try_parse_delimited(cur, delimiters::ITALIC_ALT)?;
    if is_word(cur.peek()) {
        return None;
    }
    Some(m)
}

/// `<open>text](target)` with non-empty text.
fn try_parse_target(cur: &mut Cursor<'_>, open: &str) -> Option<InlineMatch> {
    if !cur.starts_with(open) {
        return None;
    }

    let start = cur.i;
    cur.bump_n(open.len());
    let inner_start = cur.i;
    let inner_end = cur.find("]")?;
    if inner_end == inner_start {
        return None;
    }

    cur.i = inner_end;
    if !cur.starts_with(delimiters::TARGET_OPEN) {
        return None;
    }
    cur.bump_n(delimiters::TARGET_OPEN.len());
    let target_start = cur.i;
    let target_end = cur.find(delimiters::TARGET_CLOSE)?;
    cur.i = target_end + delimiters::TARGET_CLOSE.len();

    Some(InlineMatch {
        full: start..cur.i,
        inner: inner_start..inner_end,
        target: Some(target_start..target_end),
    })
}

/// Records the match and strips its delimiters.
fn apply(
    pattern: InlinePattern,
    m: &InlineMatch,
    work: &mut WorkingText,
    resolver: &mut EntityResolver<'_>,
) {
    let mutation = pattern.mutation();
    // The target is read before the delimiters around it are removed.
    let entity = match (mutation, &m.target) {
        (Mutation::ApplyEntity, Some(target)) => {
            let target = &work.text[target.clone()];
            Some(match pattern {
                InlinePattern::Image => resolver.resolve_image(target),
                _ => resolver.resolve_link(target),
            })
        }
        _ => None,
    };

    work.remove(m.closing());
    work.remove(m.opening());
    let span = m.full.start..m.full.start + m.inner.len();

    match mutation {
        Mutation::ChangeInlineStyle => {
            if let Some(style) = pattern.style() {
                work.styles.push(StyleSpan { span, style });
            }
        }
        Mutation::ApplyEntity => {
            if let Some(key) = entity {
                work.entities.push(EntitySpan { span, key });
            }
        }
        Mutation::ChangeBlockType => {}
    }
}
