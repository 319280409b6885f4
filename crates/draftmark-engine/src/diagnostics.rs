use std::fmt;

use crate::model::{BlockKey, EntityKey};

/// Non-fatal conditions met while converting.
///
/// Conversion is best-effort: each of these is resolved by a fixed policy
/// and reported so callers can decide whether the result is acceptable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionWarning {
    /// An entity range points at a key missing from the entity map.
    /// Serialized as a link with an empty URL.
    UnresolvableEntity { block: BlockKey, entity: EntityKey },
    /// A range reaches past the end of its block's text and was clamped.
    RangeOutOfBounds {
        block: BlockKey,
        offset: usize,
        length: usize,
        text_len: usize,
    },
    /// An opening fence had no closing fence; the rest of the document
    /// became one code run.
    UnclosedFence {
        block: BlockKey,
        language: Option<String>,
    },
    /// Inline recognition stopped at the configured per-block ceiling.
    MatchLimit { block: BlockKey, limit: usize },
}

impl ConversionWarning {
    /// The block the warning was raised for.
    pub fn block(&self) -> &BlockKey {
        match self {
            ConversionWarning::UnresolvableEntity { block, .. }
            | ConversionWarning::RangeOutOfBounds { block, .. }
            | ConversionWarning::UnclosedFence { block, .. }
            | ConversionWarning::MatchLimit { block, .. } => block,
        }
    }
}

impl fmt::Display for ConversionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionWarning::UnresolvableEntity { block, entity } => {
                write!(f, "block {block}: entity {entity} not found, emitted empty link")
            }
            ConversionWarning::RangeOutOfBounds {
                block,
                offset,
                length,
                text_len,
            } => write!(
                f,
                "block {block}: range {offset}+{length} clamped to text length {text_len}"
            ),
            ConversionWarning::UnclosedFence { block, language } => write!(
                f,
                "block {block}: unclosed code fence ({}) runs to end of document",
                language.as_deref().unwrap_or("no language")
            ),
            ConversionWarning::MatchLimit { block, limit } => {
                write!(f, "block {block}: stopped after {limit} inline matches")
            }
        }
    }
}

/// Warnings collected during one conversion call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    pub warnings: Vec<ConversionWarning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, warning: ConversionWarning) {
        log::warn!("{warning}");
        self.warnings.push(warning);
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn count(&self) -> usize {
        self.warnings.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConversionWarning> {
        self.warnings.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_records_warning() {
        let mut diagnostics = Diagnostics::new();
        assert!(!diagnostics.has_warnings());

        diagnostics.push(ConversionWarning::MatchLimit {
            block: BlockKey::from("b1"),
            limit: 3,
        });

        assert_eq!(diagnostics.count(), 1);
        assert_eq!(diagnostics.warnings[0].block(), &BlockKey::from("b1"));
    }

    #[test]
    fn unclosed_fence_message_names_language() {
        let warning = ConversionWarning::UnclosedFence {
            block: BlockKey::from("b1"),
            language: Some("rust".to_string()),
        };
        assert_eq!(
            warning.to_string(),
            "block b1: unclosed code fence (rust) runs to end of document"
        );
    }
}
