//! Typeahead state record and its transition functions.
//!
//! Transitions mutate a [`TypeaheadState`] in place and return the model
//! commits they made as [`Commits`]. They never call user code other than the
//! stringifier carried by [`TransitionCx`]; reporting commits through
//! `on_change` is left to the caller, after any lock guarding the state has
//! been released.
//!
//! # Generations
//!
//! Every search runs under the generation current at dispatch time. Resets,
//! source changes and external model changes bump the generation, and results
//! tagged with an older one are discarded by [`TypeaheadState::got_suggestions`].

use tracing::{debug, trace};

use crate::model::Model;
use crate::policy::{ModelEvent, Policy};

#[cfg(test)]
mod tests;

/// Inputs every transition needs besides the state itself.
pub struct TransitionCx<'a, S> {
	/// Policy as of the event being handled.
	pub policy: Policy,
	/// Suggestion stringifier.
	pub to_string: &'a (dyn Fn(&S) -> String + Send + Sync),
}

/// Model commits produced by one transition, in order.
///
/// Each entry is the new model value. Consecutive identical commits are
/// collapsed so one transition reports a given value once.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct Commits<S> {
	values: Vec<Option<Model<S>>>,
}

impl<S> Default for Commits<S> {
	fn default() -> Self {
		Self { values: Vec::new() }
	}
}

impl<S: PartialEq> Commits<S> {
	fn push(&mut self, value: Option<Model<S>>) {
		if self.values.last() != Some(&value) {
			self.values.push(value);
		}
	}
}

impl<S> Commits<S> {
	/// Creates an empty set of commits.
	pub fn none() -> Self {
		Self::default()
	}

	/// Returns true if the transition left the model alone.
	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	/// Returns the number of commits.
	pub fn len(&self) -> usize {
		self.values.len()
	}

	/// Iterates over the committed values in order.
	pub fn iter(&self) -> impl Iterator<Item = Option<&Model<S>>> {
		self.values.iter().map(Option::as_ref)
	}
}

impl<S> IntoIterator for Commits<S> {
	type Item = Option<Model<S>>;
	type IntoIter = std::vec::IntoIter<Option<Model<S>>>;

	fn into_iter(self) -> Self::IntoIter {
		self.values.into_iter()
	}
}

/// The single mutable record behind one typeahead widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeaheadState<S> {
	pub(crate) input_text: String,
	pub(crate) model: Option<Model<S>>,
	pub(crate) suggestions: Vec<S>,
	pub(crate) active_index: Option<usize>,
	pub(crate) waiting: bool,
	pub(crate) displaying_suggestion: bool,
	pub(crate) generation: u64,
}

impl<S> Default for TypeaheadState<S> {
	fn default() -> Self {
		Self {
			input_text: String::new(),
			model: None,
			suggestions: Vec::new(),
			active_index: None,
			waiting: false,
			displaying_suggestion: false,
			generation: 0,
		}
	}
}

impl<S> TypeaheadState<S> {
	/// Currently displayed text.
	pub fn input_text(&self) -> &str {
		&self.input_text
	}

	/// Last committed value.
	pub fn model(&self) -> Option<&Model<S>> {
		self.model.as_ref()
	}

	/// Current candidate list; empty when the list is closed.
	pub fn suggestions(&self) -> &[S] {
		&self.suggestions
	}

	/// Highlighted index into [`Self::suggestions`].
	pub fn active_index(&self) -> Option<usize> {
		self.active_index
	}

	/// Highlighted suggestion.
	pub fn active_suggestion(&self) -> Option<&S> {
		self.active_index.and_then(|i| self.suggestions.get(i))
	}

	/// True while an asynchronous search has not answered yet.
	pub fn waiting(&self) -> bool {
		self.waiting
	}

	/// True while the input text mirrors a suggestion rather than typed text.
	pub fn displaying_suggestion(&self) -> bool {
		self.displaying_suggestion
	}

	/// Current search generation.
	pub fn generation(&self) -> u64 {
		self.generation
	}

	fn bump_generation(&mut self) {
		self.generation = self.generation.wrapping_add(1);
	}

	fn clear_suggestions(&mut self) {
		self.suggestions.clear();
		self.active_index = None;
	}
}

impl<S: Clone + PartialEq> TypeaheadState<S> {
	/// Creates a state with an initial committed value already displayed.
	pub fn with_model(model: Option<Model<S>>, to_string: &(dyn Fn(&S) -> String + Send + Sync)) -> Self {
		let mut state = Self::default();
		if let Some(value) = &model {
			state.input_text = value.display_with(to_string);
			state.displaying_suggestion = true;
		}
		state.model = model;
		state
	}

	fn commit(&mut self, value: Option<Model<S>>, commits: &mut Commits<S>) {
		self.model = value.clone();
		commits.push(value);
	}

	fn display(&mut self, text: String) {
		self.input_text = text;
		self.displaying_suggestion = true;
	}

	/// Applies a free-text edit.
	///
	/// Returns `None` when `text` equals the current input, in which case the
	/// edit must not be forwarded to the search pipeline either.
	pub fn input_text_changed(&mut self, cx: &TransitionCx<'_, S>, text: &str) -> Option<Commits<S>> {
		if self.input_text == text {
			return None;
		}
		let mut commits = Commits::none();
		self.input_text = text.to_owned();
		self.displaying_suggestion = false;
		if cx.policy.updates_model(ModelEvent::InputTextChanged) {
			self.commit(Some(Model::Text(text.to_owned())), &mut commits);
		}
		trace!(len = text.len(), "typeahead.input_text_changed");
		Some(commits)
	}

	/// Highlights suggestion `index`, committing and displaying it when the
	/// policy says activation does so. Out-of-range indices are ignored.
	pub fn activate_suggestion_by_index(&mut self, cx: &TransitionCx<'_, S>, index: usize) -> Commits<S> {
		let mut commits = Commits::none();
		self.activate_into(cx, index, &mut commits);
		commits
	}

	fn activate_into(&mut self, cx: &TransitionCx<'_, S>, index: usize, commits: &mut Commits<S>) -> Option<S> {
		let Some(suggestion) = self.suggestions.get(index).cloned() else {
			debug!(index, count = self.suggestions.len(), "typeahead.activate.out_of_range");
			return None;
		};
		self.active_index = Some(index);
		if cx.policy.updates_model(ModelEvent::SuggestionActivated) {
			self.commit(Some(Model::Suggestion(suggestion.clone())), commits);
		}
		if cx.policy.displays_suggestion(ModelEvent::SuggestionActivated) {
			self.display((cx.to_string)(&suggestion));
		}
		trace!(index, "typeahead.activate");
		Some(suggestion)
	}

	/// Selects suggestion `index`: commits it, displays it and closes the list.
	pub fn choose_suggestion_by_index(&mut self, cx: &TransitionCx<'_, S>, index: usize) -> Commits<S> {
		let mut commits = Commits::none();
		if let Some(suggestion) = self.activate_into(cx, index, &mut commits) {
			let text = (cx.to_string)(&suggestion);
			self.commit(Some(Model::Suggestion(suggestion)), &mut commits);
			self.display(text);
			trace!(index, "typeahead.choose");
		}
		self.clear_suggestions();
		commits
	}

	/// Selects the highlighted suggestion, if any.
	pub fn choose_suggestion_active(&mut self, cx: &TransitionCx<'_, S>) -> Commits<S> {
		match self.active_index {
			Some(index) => self.choose_suggestion_by_index(cx, index),
			None => Commits::none(),
		}
	}

	/// Highlights the next suggestion, wrapping past the end.
	pub fn activate_suggestion_next(&mut self, cx: &TransitionCx<'_, S>) -> Commits<S> {
		let count = self.suggestions.len();
		if count == 0 {
			return Commits::none();
		}
		let next = self.active_index.map_or(0, |i| (i + 1) % count);
		self.activate_suggestion_by_index(cx, next)
	}

	/// Highlights the previous suggestion, wrapping before the start.
	pub fn activate_suggestion_prev(&mut self, cx: &TransitionCx<'_, S>) -> Commits<S> {
		let count = self.suggestions.len();
		if count == 0 {
			return Commits::none();
		}
		// With nothing active, "previous of 0" lands on the last entry.
		let prev = match self.active_index.unwrap_or(0) {
			0 => count - 1,
			i => (i - 1) % count,
		};
		self.activate_suggestion_by_index(cx, prev)
	}

	/// Clears text and suggestions and invalidates outstanding searches.
	pub fn reset_typeahead(&mut self, cx: &TransitionCx<'_, S>) -> Commits<S> {
		let mut commits = Commits::none();
		self.clear_suggestions();
		self.waiting = false;
		self.input_text.clear();
		self.displaying_suggestion = false;
		self.bump_generation();
		if cx.policy.updates_model(ModelEvent::InputTextChanged) {
			self.commit(None, &mut commits);
		}
		trace!(generation = self.generation, "typeahead.reset");
		commits
	}

	/// Commits typed text when focus leaves a free-text, commit-on-blur widget.
	pub fn input_text_will_blur(&mut self, cx: &TransitionCx<'_, S>) -> Commits<S> {
		let mut commits = Commits::none();
		if !self.displaying_suggestion && cx.policy.updates_model(ModelEvent::InputTextBlurred) {
			let text = self.input_text.clone();
			self.commit(Some(Model::Text(text)), &mut commits);
		}
		commits
	}

	/// Reconciles a model value changed by its external owner.
	///
	/// The value is adopted without producing commits and abandons any
	/// outstanding search. Returns `false` when it already equals the current
	/// model.
	pub fn external_model_changed(&mut self, cx: &TransitionCx<'_, S>, value: Option<Model<S>>) -> bool {
		if self.model == value {
			trace!("typeahead.external_model_unchanged");
			return false;
		}
		// An absent model displays as empty text, still owned by the model.
		let text = value.as_ref().map(|model| model.display_with(cx.to_string)).unwrap_or_default();
		self.display(text);
		self.model = value;
		self.clear_suggestions();
		self.waiting = false;
		self.bump_generation();
		trace!(generation = self.generation, "typeahead.external_model_changed");
		true
	}

	/// Marks a search of `generation` as outstanding. Stale generations are
	/// ignored.
	pub fn begin_waiting(&mut self, generation: u64) -> bool {
		if generation != self.generation {
			return false;
		}
		self.waiting = true;
		true
	}

	/// Installs search results. Results from a stale generation are dropped.
	pub fn got_suggestions(&mut self, generation: u64, suggestions: Vec<S>) -> bool {
		if generation != self.generation {
			debug!(generation, current = self.generation, "typeahead.stale_suggestions");
			return false;
		}
		self.suggestions = suggestions;
		self.waiting = false;
		self.active_index = None;
		trace!(count = self.suggestions.len(), "typeahead.got_suggestions");
		true
	}
}
