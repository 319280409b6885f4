pub mod diagnostics;
pub mod error;
pub mod markdown;
pub mod model;
pub mod options;

// Re-export key types for easier usage
pub use diagnostics::{ConversionWarning, Diagnostics};
pub use error::ModelError;
pub use markdown::{Converter, from_markdown, to_markdown};
pub use model::*;
pub use options::{ItalicMarker, Options};
