//! Error types for typeahead construction.

use thiserror::Error;

/// Errors reported before a widget becomes interactive.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// No data source was supplied to the builder.
	#[error("missing required data source")]
	MissingDataSource,

	/// The debounce delay must be a positive number of milliseconds.
	#[error("invalid debounce delay: {0}ms (expected a positive integer)")]
	InvalidDebounceDelay(u64),

	/// Options could not be parsed from TOML.
	#[error("failed to parse typeahead options: {0}")]
	Parse(#[from] toml::de::Error),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
