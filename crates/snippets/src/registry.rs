use std::sync::Arc;

use quill_primitives::CharIdx;
use tokio_util::sync::CancellationToken;

use crate::document::Document;
use crate::error::{Result, SnippetError};
use crate::pipeline::{SnippetChange, get_snippet};
use crate::prop::PropSnippetProvider;
use crate::provider::SnippetProvider;

/// The set of snippet providers offered to the user, looked up by identifier.
#[derive(Clone, Default)]
pub struct SnippetRegistry {
	providers: Vec<Arc<dyn SnippetProvider>>,
}

impl SnippetRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// A registry holding the built-in providers.
	pub fn with_builtins() -> Self {
		let mut registry = Self::new();
		registry.register(Arc::new(PropSnippetProvider));
		registry
	}

	/// Adds `provider`, replacing any provider with the same identifier.
	pub fn register(&mut self, provider: Arc<dyn SnippetProvider>) {
		let id = provider.identifier();
		self.providers.retain(|existing| existing.identifier() != id);
		self.providers.push(provider);
	}

	pub fn get(&self, identifier: &str) -> Option<&Arc<dyn SnippetProvider>> {
		self.providers.iter().find(|p| p.identifier() == identifier)
	}

	/// Providers that may be offered at `position`, in registration order.
	pub fn available_at(&self, document: &Document, position: CharIdx) -> Vec<&Arc<dyn SnippetProvider>> {
		self.providers
			.iter()
			.filter(|p| p.is_valid_location(document, position))
			.collect()
	}

	/// Runs the provider named `identifier`.
	pub async fn snippet(
		&self,
		identifier: &str,
		document: &Document,
		position: CharIdx,
		cancel: &CancellationToken,
	) -> Result<SnippetChange> {
		let provider = self
			.get(identifier)
			.ok_or_else(|| SnippetError::UnknownSnippet(identifier.to_string()))?;
		get_snippet(provider.as_ref(), document, position, cancel).await
	}
}
