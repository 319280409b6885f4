//! Conversion between [`Document`] and Markdown text.
//!
//! [`Converter`] carries the [`Options`]; the free functions use the
//! defaults and drop diagnostics.

pub mod code_run;
pub mod cursor;
pub mod delimiters;
pub mod entities;
pub mod merge;
pub mod offsets;
pub mod parser;
pub mod patterns;
pub mod serializer;

use crate::diagnostics::Diagnostics;
use crate::model::Document;
use crate::options::Options;

/// A configured converter. Holds no state between calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Converter {
    options: Options,
}

impl Converter {
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Serializes `document`, one line per block except for code runs.
    pub fn to_markdown(&self, document: &Document) -> String {
        self.to_markdown_with_diagnostics(document).0
    }

    pub fn to_markdown_with_diagnostics(&self, document: &Document) -> (String, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        log::debug!("serializing {} blocks", document.len());
        let markdown = serializer::serialize_document(document, &self.options, &mut diagnostics);
        (markdown, diagnostics)
    }

    /// Parses the Markdown held in `document`'s block texts into block
    /// types, styles and entities.
    pub fn from_markdown(&self, document: Document) -> Document {
        self.from_markdown_with_diagnostics(document).0
    }

    pub fn from_markdown_with_diagnostics(&self, document: Document) -> (Document, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        log::debug!("parsing {} blocks", document.len());
        let parsed = parser::parse_document(document, &self.options, &mut diagnostics);
        (parsed, diagnostics)
    }

    /// Splits `markdown` into lines and parses them.
    pub fn parse_str(&self, markdown: &str) -> Document {
        self.from_markdown(Document::from_markdown_lines(markdown))
    }
}

/// [`Converter::to_markdown`] with default options.
pub fn to_markdown(document: &Document) -> String {
    Converter::default().to_markdown(document)
}

/// [`Converter::from_markdown`] with default options.
pub fn from_markdown(document: Document) -> Document {
    Converter::default().from_markdown(document)
}
