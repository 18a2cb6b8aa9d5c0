//! Error types for configuration parsing.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when parsing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing TOML syntax.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// A section or option had a value of the wrong type.
	#[error("invalid value for '{key}': expected {expected}, found {found}")]
	InvalidType {
		/// Dotted key, e.g. `rename` or `theme.name`.
		key: String,
		/// Expected TOML type name.
		expected: &'static str,
		/// Actual TOML type name.
		found: &'static str,
	},
}

/// Non-fatal problems found while parsing. Collected rather than raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
	/// A key that no option recognizes.
	UnknownKey(String),
}

impl std::fmt::Display for ConfigWarning {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::UnknownKey(key) => write!(f, "unknown option '{key}' ignored"),
		}
	}
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
