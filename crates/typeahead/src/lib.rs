//! Typeahead interaction core.
//!
//! As the user types, a [`Typeahead`] debounces the input, queries a pluggable
//! [`DataSource`], and tracks the suggestion list, the highlighted entry and
//! the committed [`Model`]. Rendering is left to the host, which reads
//! [`TypeaheadState`] snapshots and forwards text changes, key presses and
//! mouse activations.
//!
//! * [`state`]: the state record and its transition functions
//! * [`policy`]: when events commit the model or rewrite the input text
//! * [`input`]: key press adapter
//! * [`source`]: data source contract
//! * [`config`]: options and live settings

pub mod config;
mod dispatch;
pub mod error;
pub mod input;
mod model;
pub mod policy;
pub mod source;
pub mod state;
mod widget;

pub use config::{Setting, SettingCell, Settings, TypeaheadOptions};
pub use error::ConfigError;
pub use input::KeyResult;
pub use model::{Model, Stringify};
pub use policy::{ModelEvent, Policy};
pub use source::{DataSource, Reply};
pub use state::{Commits, TransitionCx, TypeaheadState};
pub use typeahead_primitives::{Key, KeyCode, Modifiers};
pub use widget::{OnChange, RenderSuggestion, SHUTDOWN_TIMEOUT, Typeahead, TypeaheadBuilder};
