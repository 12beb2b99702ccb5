use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{Notify, watch};

use crate::config::Settings;
use crate::model::{Model, Stringify};
use crate::source::DataSource;
use crate::state::{Commits, TransitionCx, TypeaheadState};

/// Callback receiving internally driven model commits.
pub type OnChange<S> = Arc<dyn Fn(Option<&Model<S>>) + Send + Sync>;

/// Renders one suggestion line given the current input text.
pub type RenderSuggestion<S> = Arc<dyn Fn(&str, &S) -> String + Send + Sync>;

struct Inner<S> {
	state: TypeaheadState<S>,
	source: Arc<dyn DataSource<S>>,
}

/// State and configuration shared between a widget handle and its tasks.
///
/// Every mutation goes through [`Shared::transition`], which holds the lock
/// for the duration of one transition, republishes the snapshot and wakes the
/// dispatcher when the search generation moved. User callbacks run after the
/// lock is released.
pub(crate) struct Shared<S> {
	inner: Mutex<Inner<S>>,
	pub(crate) settings: Settings,
	pub(crate) to_string: Stringify<S>,
	pub(crate) render: Option<RenderSuggestion<S>>,
	on_change: Option<OnChange<S>>,
	snapshots: watch::Sender<TypeaheadState<S>>,
	pub(crate) invalidated: Notify,
}

impl<S> Shared<S>
where
	S: Clone + PartialEq + Send + Sync + 'static,
{
	pub(crate) fn new(
		state: TypeaheadState<S>,
		source: Arc<dyn DataSource<S>>,
		settings: Settings,
		to_string: Stringify<S>,
		render: Option<RenderSuggestion<S>>,
		on_change: Option<OnChange<S>>,
	) -> Self {
		let (snapshots, _) = watch::channel(state.clone());
		Self {
			inner: Mutex::new(Inner { state, source }),
			settings,
			to_string,
			render,
			on_change,
			snapshots,
			invalidated: Notify::new(),
		}
	}

	/// Runs one transition against the current state under the lock.
	pub(crate) fn transition<R>(&self, f: impl FnOnce(&mut TypeaheadState<S>, &TransitionCx<'_, S>) -> R) -> R {
		self.locked(|inner, cx| f(&mut inner.state, cx))
	}

	fn locked<R>(&self, f: impl FnOnce(&mut Inner<S>, &TransitionCx<'_, S>) -> R) -> R {
		let cx = TransitionCx {
			policy: self.settings.policy(),
			to_string: &*self.to_string,
		};
		let mut inner = self.inner.lock();
		let generation = inner.state.generation();
		let result = f(&mut *inner, &cx);
		let invalidated = inner.state.generation() != generation;
		self.snapshots.send_if_modified(|published| {
			if *published == inner.state {
				return false;
			}
			published.clone_from(&inner.state);
			true
		});
		drop(inner);

		if invalidated {
			self.invalidated.notify_waiters();
		}
		result
	}

	/// Runs a committing transition and reports its commits to `on_change`.
	pub(crate) fn commit_transition(&self, f: impl FnOnce(&mut TypeaheadState<S>, &TransitionCx<'_, S>) -> Commits<S>) {
		let commits = self.transition(f);
		self.report(commits);
	}

	pub(crate) fn report(&self, commits: Commits<S>) {
		let Some(on_change) = &self.on_change else {
			return;
		};
		for value in commits {
			on_change(value.as_ref());
		}
	}

	/// Returns the search generation and the source to query under it.
	pub(crate) fn search_context(&self) -> (u64, Arc<dyn DataSource<S>>) {
		let inner = self.inner.lock();
		(inner.state.generation(), Arc::clone(&inner.source))
	}

	/// Resets the widget and swaps the data source in one critical section.
	pub(crate) fn replace_source(&self, source: Arc<dyn DataSource<S>>) -> Commits<S> {
		self.locked(|inner, cx| {
			let commits = inner.state.reset_typeahead(cx);
			inner.source = source;
			commits
		})
	}

	pub(crate) fn snapshot(&self) -> TypeaheadState<S> {
		self.inner.lock().state.clone()
	}

	pub(crate) fn subscribe(&self) -> watch::Receiver<TypeaheadState<S>> {
		self.snapshots.subscribe()
	}
}
