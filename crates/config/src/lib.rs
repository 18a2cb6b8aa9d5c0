//! Configuration loading for quill.
//!
//! Configuration is a TOML file with one table per concern:
//!
//! ```toml
//! [rename]
//! # Show the rename flyout next to the identifier (true) or the
//! # dashboard panel (false).
//! inline-adornment = true
//!
//! [theme]
//! name = "gruvbox"
//! ```
//!
//! Unknown keys are not fatal; they are collected in [`Config::warnings`] so the
//! host can surface them at startup. Type mismatches are errors.

pub mod error;

use std::path::Path;

use serde::Deserialize;
use toml::{Table, Value};

pub use error::{ConfigError, ConfigWarning, Result};

/// Options governing how an active rename session is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct RenameUiOptions {
	/// Inline flyout at the identifier when true, dashboard panel otherwise.
	pub inline_adornment: bool,
}

impl Default for RenameUiOptions {
	fn default() -> Self {
		Self { inline_adornment: true }
	}
}

/// Values written in a `[rename]` table.
///
/// Keys left out stay `None`, so merging a later file never resets an earlier
/// setting to its default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct RenameSection {
	pub inline_adornment: Option<bool>,
}

impl RenameSection {
	/// Fills unset keys from [`RenameUiOptions::default`].
	pub fn resolve(&self) -> RenameUiOptions {
		let defaults = RenameUiOptions::default();
		RenameUiOptions {
			inline_adornment: self.inline_adornment.unwrap_or(defaults.inline_adornment),
		}
	}

	fn merge(&mut self, other: RenameSection) {
		if other.inline_adornment.is_some() {
			self.inline_adornment = other.inline_adornment;
		}
	}
}

/// Theme selection. Resolution of the name is left to the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ThemeConfig {
	pub name: Option<String>,
}

/// Parsed configuration from a TOML file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
	/// Rename presentation keys as written; see [`Config::rename_options`].
	pub rename: RenameSection,
	/// Theme selection.
	pub theme: ThemeConfig,
	/// Non-fatal warnings encountered during parsing.
	pub warnings: Vec<ConfigWarning>,
}

const RENAME_KEYS: &[&str] = &["inline-adornment"];
const THEME_KEYS: &[&str] = &["name"];

impl Config {
	/// Parse a TOML string into a [`Config`].
	pub fn parse(input: &str) -> Result<Self> {
		let mut doc: Table = input.parse()?;
		let mut warnings = Vec::new();

		let rename = match doc.remove("rename") {
			Some(value) => parse_section::<RenameSection>("rename", value, RENAME_KEYS, &mut warnings)?,
			None => RenameSection::default(),
		};
		let theme = match doc.remove("theme") {
			Some(value) => parse_section::<ThemeConfig>("theme", value, THEME_KEYS, &mut warnings)?,
			None => ThemeConfig::default(),
		};

		warnings.extend(doc.keys().map(|key| ConfigWarning::UnknownKey(key.clone())));
		for warning in &warnings {
			tracing::warn!(%warning, "config");
		}

		Ok(Config { rename, theme, warnings })
	}

	/// Effective rename options, with defaults for unset keys.
	pub fn rename_options(&self) -> RenameUiOptions {
		self.rename.resolve()
	}

	/// Load configuration from a file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
			path: path.to_path_buf(),
			error: e,
		})?;
		Self::parse(&content)
	}

	/// Merge another config into this one.
	///
	/// Values set in `other` override values in `self`; unset ones are kept.
	/// Warnings accumulate.
	pub fn merge(&mut self, other: Config) {
		self.rename.merge(other.rename);
		if other.theme.name.is_some() {
			self.theme = other.theme;
		}
		self.warnings.extend(other.warnings);
	}
}

fn parse_section<T: for<'de> Deserialize<'de>>(
	name: &str,
	value: Value,
	known: &[&str],
	warnings: &mut Vec<ConfigWarning>,
) -> Result<T> {
	let Value::Table(mut table) = value else {
		return Err(ConfigError::InvalidType {
			key: name.to_string(),
			expected: "table",
			found: value.type_str(),
		});
	};

	let unknown: Vec<String> = table.keys().filter(|k| !known.contains(&k.as_str())).cloned().collect();
	for key in unknown {
		table.remove(&key);
		warnings.push(ConfigWarning::UnknownKey(format!("{name}.{key}")));
	}

	Ok(Value::Table(table).try_into()?)
}
