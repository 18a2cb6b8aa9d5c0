use std::sync::Arc;

use arc_swap::ArcSwap;
use quill_config::{Config, RenameUiOptions};

/// Source of the presentation option, read on every recompute.
pub trait OptionsReader: Send + Sync {
	/// Inline flyout when true, dashboard panel otherwise.
	fn use_inline_adornment(&self) -> bool;
}

impl OptionsReader for RenameUiOptions {
	fn use_inline_adornment(&self) -> bool {
		self.inline_adornment
	}
}

/// Options that can be swapped at runtime, e.g. after a config reload.
///
/// Readers never block; a store is visible to the next recompute.
#[derive(Debug)]
pub struct SharedOptions {
	current: ArcSwap<RenameUiOptions>,
}

impl SharedOptions {
	pub fn new(options: RenameUiOptions) -> Self {
		Self {
			current: ArcSwap::from_pointee(options),
		}
	}

	pub fn from_config(config: &Config) -> Self {
		Self::new(config.rename_options())
	}

	pub fn load(&self) -> Arc<RenameUiOptions> {
		self.current.load_full()
	}

	pub fn store(&self, options: RenameUiOptions) {
		tracing::debug!(inline = options.inline_adornment, "rename options updated");
		self.current.store(Arc::new(options));
	}
}

impl Default for SharedOptions {
	fn default() -> Self {
		Self::new(RenameUiOptions::default())
	}
}

impl OptionsReader for SharedOptions {
	fn use_inline_adornment(&self) -> bool {
		self.current.load().inline_adornment
	}
}
