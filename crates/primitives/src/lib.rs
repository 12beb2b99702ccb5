//! Basic input primitives for the typeahead widget.

/// Key and modifier types.
pub mod key;

pub use key::{Key, KeyCode, KeyParseError, Modifiers};
