//! Report output formats.

pub mod markdown;
pub mod structured;

pub use markdown::{MarkdownOutputError, MarkdownReportWriter};
pub use structured::{JsonOutputError, JsonReportWriter};
