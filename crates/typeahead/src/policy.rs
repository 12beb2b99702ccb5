//! Commit policy: when an event updates the model and when it rewrites the
//! displayed text.

/// Events the policy distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelEvent {
	/// The input is about to lose focus.
	InputTextBlurred,
	/// A suggestion was highlighted by keyboard or mouse.
	SuggestionActivated,
	/// The user edited the input text.
	InputTextChanged,
}

/// Snapshot of the two mode switches that drive commit decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Policy {
	/// Only suggestions may be committed.
	pub rigid: bool,
	/// Commit on blur instead of on every change.
	pub change_on_blur: bool,
}

impl Default for Policy {
	fn default() -> Self {
		Self {
			rigid: true,
			change_on_blur: true,
		}
	}
}

impl Policy {
	/// Returns true if `event` commits a new model value.
	pub const fn updates_model(self, event: ModelEvent) -> bool {
		match event {
			ModelEvent::InputTextBlurred => self.change_on_blur && !self.rigid,
			ModelEvent::SuggestionActivated => !self.change_on_blur,
			ModelEvent::InputTextChanged => !self.change_on_blur && !self.rigid,
		}
	}

	/// Returns true if `event` replaces the input text with a suggestion's
	/// string form.
	pub const fn displays_suggestion(self, event: ModelEvent) -> bool {
		matches!(event, ModelEvent::SuggestionActivated) && !self.change_on_blur
	}
}
