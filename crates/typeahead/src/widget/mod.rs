//! Widget handle tying the state machine to its debounce and dispatch tasks.
//!
//! A [`Typeahead`] owns:
//! * the shared state record behind a lock, republished to subscribers after
//!   every transition
//! * a debounce stage fed by [`Typeahead::input_text_changed`]
//! * a dispatcher task draining settled queries into the data source
//! * optionally, an observer task reconciling a bound external model cell
//!
//! All tasks share one cancellation token. [`Typeahead::shutdown`] cancels
//! and joins them; dropping the handle only cancels.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::debug;
use typeahead_primitives::Key;
use typeahead_worker::{DebounceSender, TaskGroup};

use crate::input::{self, KeyResult};
use crate::model::Model;
use crate::source::DataSource;
use crate::state::TypeaheadState;

mod builder;
mod shared;

pub use builder::TypeaheadBuilder;
pub(crate) use shared::Shared;
pub use shared::{OnChange, RenderSuggestion};

/// How long [`Typeahead::shutdown`] waits for tasks before aborting them.
pub const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(1);

/// A running typeahead widget.
pub struct Typeahead<S> {
	shared: Arc<Shared<S>>,
	queries: DebounceSender<String>,
	tasks: TaskGroup,
}

impl<S> std::fmt::Debug for Typeahead<S> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Typeahead").field("tasks", &self.tasks).finish_non_exhaustive()
	}
}

impl<S> Typeahead<S>
where
	S: Clone + PartialEq + Send + Sync + 'static,
{
	/// Starts building a widget around `source`, displaying suggestions
	/// through their [`std::fmt::Display`] form.
	pub fn builder(source: impl DataSource<S> + 'static) -> TypeaheadBuilder<S>
	where
		S: std::fmt::Display,
	{
		TypeaheadBuilder::new().data_source(source)
	}

	/// Returns a copy of the current state.
	pub fn snapshot(&self) -> TypeaheadState<S> {
		self.shared.snapshot()
	}

	/// Subscribes to state snapshots, republished after every change.
	pub fn subscribe(&self) -> watch::Receiver<TypeaheadState<S>> {
		self.shared.subscribe()
	}

	/// Returns the string form of `suggestion`.
	pub fn suggestion_to_string(&self, suggestion: &S) -> String {
		(self.shared.to_string)(suggestion)
	}

	/// Renders the current suggestion list for presentation, using the
	/// configured renderer or the string form.
	pub fn rendered_suggestions(&self) -> Vec<String> {
		let state = self.snapshot();
		state
			.suggestions()
			.iter()
			.map(|s| match &self.shared.render {
				Some(render) => render(state.input_text(), s),
				None => (self.shared.to_string)(s),
			})
			.collect()
	}

	/// Applies a text-change notification from the input.
	///
	/// Changes equal to the current text are ignored. Otherwise the text is
	/// queued for a debounced search.
	pub fn input_text_changed(&self, text: &str) {
		let Some(commits) = self.shared.transition(|state, cx| state.input_text_changed(cx, text)) else {
			return;
		};
		if !self.queries.send(text.to_owned()) {
			debug!("typeahead.query_dropped_after_shutdown");
		}
		self.shared.report(commits);
	}

	/// Applies a key press and tells the host whether to suppress its default.
	pub fn handle_key(&self, key: Key) -> KeyResult {
		let (result, commits) = self.shared.transition(|state, cx| input::apply_key(state, cx, key));
		self.shared.report(commits);
		result
	}

	/// Highlights suggestion `index` (mouse hover).
	pub fn activate_suggestion_by_index(&self, index: usize) {
		self.shared.commit_transition(|state, cx| state.activate_suggestion_by_index(cx, index));
	}

	/// Selects suggestion `index` (mouse down).
	pub fn choose_suggestion_by_index(&self, index: usize) {
		self.shared.commit_transition(|state, cx| state.choose_suggestion_by_index(cx, index));
	}

	/// Selects the highlighted suggestion, if any.
	pub fn choose_suggestion_active(&self) {
		self.shared.commit_transition(|state, cx| state.choose_suggestion_active(cx));
	}

	/// Highlights the next suggestion.
	pub fn activate_suggestion_next(&self) {
		self.shared.commit_transition(|state, cx| state.activate_suggestion_next(cx));
	}

	/// Highlights the previous suggestion.
	pub fn activate_suggestion_prev(&self) {
		self.shared.commit_transition(|state, cx| state.activate_suggestion_prev(cx));
	}

	/// Clears the input and suggestions and abandons outstanding searches.
	pub fn reset_typeahead(&self) {
		self.shared.commit_transition(|state, cx| state.reset_typeahead(cx));
	}

	/// Notifies the widget that the input is about to lose focus.
	pub fn input_text_will_blur(&self) {
		self.shared.commit_transition(|state, cx| state.input_text_will_blur(cx));
	}

	/// Resets the widget and queries `source` from now on.
	pub fn change_data_source(&self, source: impl DataSource<S> + 'static) {
		let commits = self.shared.replace_source(Arc::new(source));
		self.shared.report(commits);
	}

	/// Adopts a model value set by its external owner, without reporting it
	/// back through `on_change`.
	pub fn external_model_changed(&self, value: Option<Model<S>>) {
		let _ = self.shared.transition(|state, cx| state.external_model_changed(cx, value));
	}

	/// Cancels the widget's tasks and waits for them to finish.
	pub async fn shutdown(self) -> bool {
		self.tasks.shutdown(SHUTDOWN_TIMEOUT).await
	}
}

/// Observes an externally owned model cell for the widget's lifetime.
pub(crate) async fn observe_model<S>(shared: Arc<Shared<S>>, mut cell: watch::Receiver<Option<Model<S>>>, cancel: typeahead_worker::CancellationToken)
where
	S: Clone + PartialEq + Send + Sync + 'static,
{
	loop {
		let changed = tokio::select! {
			biased;
			_ = cancel.cancelled() => break,
			changed = cell.changed() => changed,
		};
		if changed.is_err() {
			debug!("typeahead.model_cell_closed");
			break;
		}
		let value = cell.borrow_and_update().clone();
		let _ = shared.transition(|state, cx| state.external_model_changed(cx, value));
	}
}
