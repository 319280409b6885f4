use serde::{Deserialize, Serialize};

use crate::markdown::delimiters;

/// Marker emitted for italic text. Both are recognized when parsing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItalicMarker {
    #[default]
    Asterisk,
    Underscore,
}

impl ItalicMarker {
    pub fn as_str(self) -> &'static str {
        match self {
            ItalicMarker::Asterisk => delimiters::ITALIC,
            ItalicMarker::Underscore => delimiters::ITALIC_ALT,
        }
    }
}

/// Dialect and resource settings for a [`crate::Converter`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    pub italic_marker: ItalicMarker,
    /// Emit two trailing spaces between adjacent non-empty unstyled lines.
    pub hard_line_breaks: bool,
    /// Upper bound on inline matches applied to a single block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_matches_per_block: Option<usize>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            italic_marker: ItalicMarker::Asterisk,
            hard_line_breaks: true,
            max_matches_per_block: None,
        }
    }
}
