//! Core library for jiratools
//!
//! This crate implements the **Functional Core** of the jiratools application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! - **`jiratools_core`** (this crate): Pure transformation functions with zero I/O
//! - **`jiratools`**: HTTP, CLI and MCP server (the Imperative Shell)
//!
//! All functions in this crate are pure: same input, same output, no I/O and
//! no logging. They are tested with fixture data only.
//!
//! # Module Organization
//!
//! - [`adf`]: Atlassian Document Format model and its Markdown / plain-text
//!   conversions
//! - [`atlassian`]: Jira response transformations and request payload builders
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use jiratools_core::adf;
//!
//! let raw = serde_json::json!({
//!     "type": "doc",
//!     "version": 1,
//!     "content": [{"type": "paragraph", "content": [{"type": "text", "text": "Hi"}]}]
//! });
//!
//! assert_eq!(adf::render(Some(&raw)), "Hi\n\n");
//! ```

pub mod adf;
pub mod atlassian;
