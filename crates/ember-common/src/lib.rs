//! Common utilities for the Ember renderer.
//!
//! This crate provides shared infrastructure used by all rendering stages:
//! - **Warning System** - deduplicated diagnostics for unsupported input
//! - **URL Resolution** - resolving `href`/`src` values against a document URL

pub mod url;
pub mod warning;
