//! Atlassian Document Format (ADF) conversion
//!
//! Jira stores rich-text fields (descriptions, environments, comment bodies)
//! as a JSON tree of typed nodes. This module reads that tree from untrusted
//! JSON, renders it as Markdown or plain text, and builds minimal documents
//! from plain text for create and update requests.
//!
//! Nothing in here returns an error. Unknown node kinds render their
//! children, unknown marks are ignored, and values of an unexpected shape are
//! treated as absent.
//!
//! ```rust,ignore
//! use jiratools_core::adf;
//!
//! let description = serde_json::json!("Steps to reproduce\n\nClick login");
//! let document = adf::normalize(Some(&description)).unwrap();
//! assert_eq!(document.to_markdown(), "Steps to reproduce\n\nClick login\n\n");
//! ```

mod classify;
mod construct;
mod markdown;
mod model;
mod normalize;
mod plain;

pub use classify::{classify, Classification};
pub use construct::text_to_document;
pub use markdown::render;
pub use model::{
    Attrs, Block, Document, Mark, Node, Text, UnknownNode, DEFAULT_VERSION, MAX_DEPTH,
};
pub use normalize::normalize;
pub use plain::extract_plain_text;
