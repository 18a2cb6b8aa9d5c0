use quill_primitives::{CharIdx, EditError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnippetError {
	/// The provider gave up because the request was cancelled.
	///
	/// The pipeline never surfaces this variant; it turns it into an empty result.
	#[error("snippet generation cancelled")]
	Cancelled,
	#[error("position {position} is outside the document ({len} chars)")]
	PositionOutOfBounds { position: CharIdx, len: usize },
	#[error("snippet '{identifier}' failed to synthesize: {reason}")]
	Synthesis {
		identifier: &'static str,
		reason: String,
	},
	#[error("no snippet provider named '{0}'")]
	UnknownSnippet(String),
	#[error(transparent)]
	Edit(#[from] EditError),
}

pub type Result<T> = std::result::Result<T, SnippetError>;
