//! quizdrill-report: human-readable session reviews.

pub mod markdown;

pub use markdown::{render_markdown, write_markdown_review};
