//! Snippet generation.
//!
//! A snippet is a named generator of one code construct plus a predicate that
//! recognizes that construct's shape. Concrete snippets implement
//! [`SnippetProvider`]; [`generate`] drives every provider through the same
//! stages:
//!
//! 1. synthesize the construct as a syntax node,
//! 2. normalize its whitespace to the document's conventions and render it,
//! 3. emit a single insertion at the requested position.
//!
//! Cancellation is checked before each stage and yields an empty edit list.
//! [`get_snippet`] additionally applies the edits to a scratch copy, re-locates
//! the inserted construct with the provider's container predicate, and reports
//! the caret and placeholder positions for the host's snippet session.

mod document;
mod error;
mod pipeline;
mod prop;
mod provider;
mod registry;

#[cfg(test)]
mod invariants;

pub use document::Document;
pub use error::{Result, SnippetError};
pub use pipeline::{SnippetChange, generate, get_snippet};
pub use prop::PropSnippetProvider;
pub use provider::{SnippetPlaceholder, SnippetProvider};
pub use registry::SnippetRegistry;
