use std::fmt;
use std::sync::Arc;

/// Converts a suggestion into the text shown in the input box.
pub type Stringify<S> = Arc<dyn Fn(&S) -> String + Send + Sync>;

/// A committed widget value.
///
/// Rigid widgets only ever commit [`Model::Suggestion`]. Free-text widgets
/// may also commit whatever the user typed as [`Model::Text`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Model<S> {
	/// A candidate returned by the data source.
	Suggestion(S),
	/// Raw input text.
	Text(String),
}

impl<S> Model<S> {
	/// Returns the suggestion, if this model holds one.
	pub fn as_suggestion(&self) -> Option<&S> {
		match self {
			Self::Suggestion(s) => Some(s),
			Self::Text(_) => None,
		}
	}

	/// Returns the raw text, if this model holds free text.
	pub fn as_text(&self) -> Option<&str> {
		match self {
			Self::Suggestion(_) => None,
			Self::Text(text) => Some(text),
		}
	}

	/// Returns the string form shown in the input for this model.
	pub fn display_with(&self, to_string: &(dyn Fn(&S) -> String + Send + Sync)) -> String {
		match self {
			Self::Suggestion(s) => to_string(s),
			Self::Text(text) => text.clone(),
		}
	}
}

impl<S: fmt::Display> fmt::Display for Model<S> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Suggestion(s) => s.fmt(f),
			Self::Text(text) => f.write_str(text),
		}
	}
}
