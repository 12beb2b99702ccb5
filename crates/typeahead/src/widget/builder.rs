use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;
use typeahead_worker::{TaskClass, TaskGroup};

use super::shared::{OnChange, RenderSuggestion, Shared};
use super::{Typeahead, observe_model};
use crate::config::{Setting, Settings, TypeaheadOptions};
use crate::dispatch;
use crate::error::{ConfigError, Result};
use crate::model::{Model, Stringify};
use crate::source::DataSource;
use crate::state::TypeaheadState;

/// Capacity of the queue between the debounce stage and the dispatcher.
const SETTLED_QUERY_CAPACITY: usize = 16;

/// Configures and starts a [`Typeahead`].
pub struct TypeaheadBuilder<S> {
	source: Option<Arc<dyn DataSource<S>>>,
	settings: Settings,
	to_string: Stringify<S>,
	render: Option<RenderSuggestion<S>>,
	on_change: Option<OnChange<S>>,
	model: Option<Model<S>>,
	model_cell: Option<watch::Receiver<Option<Model<S>>>>,
}

impl<S> fmt::Debug for TypeaheadBuilder<S> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TypeaheadBuilder")
			.field("has_source", &self.source.is_some())
			.field("settings", &self.settings)
			.field("bound_model", &self.model_cell.is_some())
			.finish_non_exhaustive()
	}
}

impl<S> Default for TypeaheadBuilder<S>
where
	S: fmt::Display + Clone + PartialEq + Send + Sync + 'static,
{
	fn default() -> Self {
		Self::new()
	}
}

impl<S> TypeaheadBuilder<S>
where
	S: fmt::Display + Clone + PartialEq + Send + Sync + 'static,
{
	/// Creates a builder that displays suggestions through [`fmt::Display`].
	pub fn new() -> Self {
		Self::with_stringifier(|s: &S| s.to_string())
	}
}

impl<S> TypeaheadBuilder<S>
where
	S: Clone + PartialEq + Send + Sync + 'static,
{
	/// Creates a builder for suggestions without a [`fmt::Display`] form.
	pub fn with_stringifier(to_string: impl Fn(&S) -> String + Send + Sync + 'static) -> Self {
		Self {
			source: None,
			settings: Settings::default(),
			to_string: Arc::new(to_string),
			render: None,
			on_change: None,
			model: None,
			model_cell: None,
		}
	}

	/// Sets the required data source.
	pub fn data_source(mut self, source: impl DataSource<S> + 'static) -> Self {
		self.source = Some(Arc::new(source));
		self
	}

	/// Replaces all settings with fixed values from `options`.
	pub fn options(mut self, options: TypeaheadOptions) -> Self {
		self.settings = options.into();
		self
	}

	/// Replaces all settings.
	pub fn settings(mut self, settings: Settings) -> Self {
		self.settings = settings;
		self
	}

	/// Sets the debounce window in milliseconds.
	pub fn debounce_delay_ms(mut self, delay: impl Into<Setting<u64>>) -> Self {
		self.settings.debounce_delay_ms = delay.into();
		self
	}

	/// Sets rigid mode.
	pub fn rigid(mut self, rigid: impl Into<Setting<bool>>) -> Self {
		self.settings.rigid = rigid.into();
		self
	}

	/// Sets commit-on-blur mode.
	pub fn change_on_blur(mut self, change_on_blur: impl Into<Setting<bool>>) -> Self {
		self.settings.change_on_blur = change_on_blur.into();
		self
	}

	/// Overrides how suggestions are turned into input text.
	pub fn suggestion_to_string(mut self, to_string: impl Fn(&S) -> String + Send + Sync + 'static) -> Self {
		self.to_string = Arc::new(to_string);
		self
	}

	/// Sets a presentation renderer for suggestion lines.
	pub fn render_suggestion(mut self, render: impl Fn(&str, &S) -> String + Send + Sync + 'static) -> Self {
		self.render = Some(Arc::new(render));
		self
	}

	/// Sets the callback receiving internally driven model commits.
	pub fn on_change(mut self, on_change: impl Fn(Option<&Model<S>>) + Send + Sync + 'static) -> Self {
		self.on_change = Some(Arc::new(on_change));
		self
	}

	/// Sets the initial model, displayed in the input at startup.
	pub fn initial_model(mut self, model: Option<Model<S>>) -> Self {
		self.model = model;
		self
	}

	/// Binds an externally owned model cell. Its current value replaces any
	/// initial model, and later changes are adopted as they are published.
	pub fn bind_model(mut self, cell: watch::Receiver<Option<Model<S>>>) -> Self {
		self.model_cell = Some(cell);
		self
	}

	/// Validates the configuration and starts the widget's tasks.
	///
	/// Must be called from within a tokio runtime, or tasks run on a shared
	/// background runtime.
	pub fn build(self) -> Result<Typeahead<S>> {
		let source = self.source.ok_or(ConfigError::MissingDataSource)?;
		self.settings.validate()?;

		let mut cell = self.model_cell;
		let model = match cell.as_mut() {
			Some(cell) => cell.borrow_and_update().clone(),
			None => self.model,
		};
		let state = TypeaheadState::with_model(model, &*self.to_string);
		let shared = Arc::new(Shared::new(state, source, self.settings.clone(), self.to_string, self.render, self.on_change));

		let mut tasks = TaskGroup::new("typeahead");
		let cancel = tasks.token();

		let settings = self.settings;
		let (queries, settled, debounce_task) =
			typeahead_worker::debounce(TaskClass::Interactive, move || settings.debounce_delay(), SETTLED_QUERY_CAPACITY, cancel.clone());
		tasks.adopt("debounce", debounce_task);
		tasks.spawn(TaskClass::Interactive, "dispatch", dispatch::run(Arc::clone(&shared), settled, cancel.clone()));
		if let Some(cell) = cell {
			tasks.spawn(TaskClass::Background, "model_observer", observe_model(Arc::clone(&shared), cell, cancel));
		}

		tracing::debug!(tasks = tasks.len(), "typeahead.started");
		Ok(Typeahead { shared, queries, tasks })
	}
}
