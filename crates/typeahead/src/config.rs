//! Widget options and live settings.
//!
//! [`TypeaheadOptions`] is the static, deserializable form. [`Settings`] is
//! what the widget consults at runtime: each field is a [`Setting`] that is
//! either a fixed value or an accessor re-read at every decision point, so
//! callers can flip `rigid` or `change_on_blur` on a live widget through a
//! [`SettingCell`].

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use serde::Deserialize;

use crate::error::{ConfigError, Result};
use crate::policy::Policy;

/// Default quiet window before a typed query is dispatched.
pub const DEFAULT_DEBOUNCE_DELAY_MS: u64 = 250;

/// Static typeahead options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TypeaheadOptions {
	/// Quiet window in milliseconds; must be positive.
	pub debounce_delay_ms: u64,
	/// Forbids free-text commits; only suggestions can become the model.
	pub rigid: bool,
	/// Defers model updates until the input loses focus.
	pub change_on_blur: bool,
}

impl Default for TypeaheadOptions {
	fn default() -> Self {
		Self {
			debounce_delay_ms: DEFAULT_DEBOUNCE_DELAY_MS,
			rigid: true,
			change_on_blur: true,
		}
	}
}

impl TypeaheadOptions {
	/// Parses and validates options from a TOML document. Missing keys take
	/// their defaults; unknown keys are rejected.
	pub fn from_toml_str(input: &str) -> Result<Self> {
		let options: Self = toml::from_str(input)?;
		options.validate()?;
		Ok(options)
	}

	/// Checks value ranges that the type system cannot express.
	pub fn validate(&self) -> Result<()> {
		if self.debounce_delay_ms == 0 {
			return Err(ConfigError::InvalidDebounceDelay(self.debounce_delay_ms));
		}
		Ok(())
	}
}

/// A configuration value read on demand.
pub struct Setting<T>(Source<T>);

enum Source<T> {
	Fixed(T),
	Cell(Arc<ArcSwap<T>>),
	Accessor(Arc<dyn Fn() -> T + Send + Sync>),
}

impl<T: Copy> Setting<T> {
	/// A value that never changes.
	pub const fn fixed(value: T) -> Self {
		Self(Source::Fixed(value))
	}

	/// A value computed by `f` each time it is read.
	pub fn from_fn(f: impl Fn() -> T + Send + Sync + 'static) -> Self {
		Self(Source::Accessor(Arc::new(f)))
	}

	/// Returns the current value.
	pub fn get(&self) -> T {
		match &self.0 {
			Source::Fixed(value) => *value,
			Source::Cell(cell) => **cell.load(),
			Source::Accessor(f) => f(),
		}
	}

	fn is_fixed(&self) -> bool {
		matches!(self.0, Source::Fixed(_))
	}
}

impl<T: Copy> From<T> for Setting<T> {
	fn from(value: T) -> Self {
		Self::fixed(value)
	}
}

impl<T> Clone for Setting<T>
where
	T: Copy,
{
	fn clone(&self) -> Self {
		Self(match &self.0 {
			Source::Fixed(value) => Source::Fixed(*value),
			Source::Cell(cell) => Source::Cell(Arc::clone(cell)),
			Source::Accessor(f) => Source::Accessor(Arc::clone(f)),
		})
	}
}

impl<T: Copy + fmt::Debug> fmt::Debug for Setting<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let kind = match self.0 {
			Source::Fixed(_) => "fixed",
			Source::Cell(_) => "cell",
			Source::Accessor(_) => "accessor",
		};
		f.debug_struct("Setting").field("kind", &kind).field("value", &self.get()).finish()
	}
}

/// Externally owned, updatable cell backing one or more [`Setting`]s.
#[derive(Debug)]
pub struct SettingCell<T> {
	inner: Arc<ArcSwap<T>>,
}

impl<T> Clone for SettingCell<T> {
	fn clone(&self) -> Self {
		Self {
			inner: Arc::clone(&self.inner),
		}
	}
}

impl<T: Copy> SettingCell<T> {
	/// Creates a cell holding `value`.
	pub fn new(value: T) -> Self {
		Self {
			inner: Arc::new(ArcSwap::from_pointee(value)),
		}
	}

	/// Replaces the value; readers observe it on their next check.
	pub fn set(&self, value: T) {
		self.inner.store(Arc::new(value));
	}

	/// Returns the current value.
	pub fn get(&self) -> T {
		**self.inner.load()
	}

	/// Returns a setting that reads through this cell.
	pub fn setting(&self) -> Setting<T> {
		Setting(Source::Cell(Arc::clone(&self.inner)))
	}
}

/// Live settings consulted by a widget.
#[derive(Debug, Clone)]
pub struct Settings {
	pub debounce_delay_ms: Setting<u64>,
	pub rigid: Setting<bool>,
	pub change_on_blur: Setting<bool>,
}

impl Default for Settings {
	fn default() -> Self {
		TypeaheadOptions::default().into()
	}
}

impl From<TypeaheadOptions> for Settings {
	fn from(options: TypeaheadOptions) -> Self {
		Self {
			debounce_delay_ms: Setting::fixed(options.debounce_delay_ms),
			rigid: Setting::fixed(options.rigid),
			change_on_blur: Setting::fixed(options.change_on_blur),
		}
	}
}

impl Settings {
	/// Returns the commit policy as of now.
	pub fn policy(&self) -> Policy {
		Policy {
			rigid: self.rigid.get(),
			change_on_blur: self.change_on_blur.get(),
		}
	}

	/// Returns the current debounce window.
	pub fn debounce_delay(&self) -> Duration {
		Duration::from_millis(self.debounce_delay_ms.get())
	}

	/// Rejects a fixed zero delay. Dynamic delays are read as-is.
	pub(crate) fn validate(&self) -> Result<()> {
		if self.debounce_delay_ms.is_fixed() {
			let delay = self.debounce_delay_ms.get();
			if delay == 0 {
				return Err(ConfigError::InvalidDebounceDelay(delay));
			}
		}
		Ok(())
	}
}
