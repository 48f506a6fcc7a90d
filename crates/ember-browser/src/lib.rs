//! High-level browser API for the Ember renderer.
//!
//! # Scope
//!
//! This crate provides:
//! - **Document Session** - parse, style, lay out and paint a page, then keep
//!   it current as the tree changes
//! - **Stylesheet Collection** - the default sheet plus `<link rel=stylesheet>`
//!   and `<style>` sheets in document order
//! - **Resource Fetching** - an injectable [`ResourceFetcher`] with file, data
//!   URL and in-memory implementations
//! - **DOM Mutation** - the calls a script collaborator makes (`innerHTML`,
//!   attributes, `querySelectorAll`, focus)
//! - **Font Metrics** - a fontdue-backed [`FontMetrics`](ember_css::FontMetrics)
//!
//! # Not Yet Implemented
//!
//! - Network fetching (`http:`/`https:`)
//! - Script execution
//! - Response caching by `max-age`

pub mod document;
pub mod fetch;
pub mod font_metrics;

pub use ember_css as css;
pub use ember_dom as dom;
pub use ember_html as html;

pub use document::{Document, DocumentError};
pub use fetch::{FetchError, FileFetcher, MemoryFetcher, Resource, ResourceFetcher};
pub use font_metrics::FontdueFontMetrics;
