//! Key event types and their compact textual notation.
//!
//! Notation mirrors the keymap syntax: modifier prefixes `c-`, `a-` and `s-`
//! followed by a named key (`up`, `tab`, `esc`, ...) or a single character.
//! `c-n`, `s-tab` and `enter` are all valid.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

mod modifiers;
#[cfg(test)]
mod tests;

pub use modifiers::Modifiers;

/// Physical key identity, independent of modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
	/// A printable character.
	Char(char),
	Up,
	Down,
	Left,
	Right,
	Enter,
	Escape,
	Tab,
	Backspace,
	Home,
	End,
	PageUp,
	PageDown,
}

impl KeyCode {
	const NAMED: &[(&'static str, KeyCode)] = &[
		("up", KeyCode::Up),
		("down", KeyCode::Down),
		("left", KeyCode::Left),
		("right", KeyCode::Right),
		("enter", KeyCode::Enter),
		("ret", KeyCode::Enter),
		("esc", KeyCode::Escape),
		("escape", KeyCode::Escape),
		("tab", KeyCode::Tab),
		("backspace", KeyCode::Backspace),
		("home", KeyCode::Home),
		("end", KeyCode::End),
		("pageup", KeyCode::PageUp),
		("pagedown", KeyCode::PageDown),
		("space", KeyCode::Char(' ')),
	];

	fn from_name(name: &str) -> Option<Self> {
		Self::NAMED.iter().find(|(n, _)| n.eq_ignore_ascii_case(name)).map(|(_, code)| *code)
	}

	fn name(self) -> Option<&'static str> {
		Self::NAMED.iter().find(|(_, code)| *code == self).map(|(n, _)| *n)
	}
}

/// A key press with its modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
	pub code: KeyCode,
	pub modifiers: Modifiers,
}

impl Key {
	/// Creates a key with explicit modifiers.
	pub const fn new(code: KeyCode, modifiers: Modifiers) -> Self {
		Self { code, modifiers }
	}

	/// Creates an unmodified character key.
	pub const fn char(c: char) -> Self {
		Self::new(KeyCode::Char(c), Modifiers::NONE)
	}
}

impl From<KeyCode> for Key {
	fn from(code: KeyCode) -> Self {
		Self::new(code, Modifiers::NONE)
	}
}

/// Error returned when key notation cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyParseError {
	#[error("empty key notation")]
	Empty,
	#[error("unknown key: {0}")]
	UnknownKey(String),
	#[error("unknown modifier prefix: {0}")]
	UnknownModifier(String),
}

impl FromStr for Key {
	type Err = KeyParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let s = s.trim();
		if s.is_empty() {
			return Err(KeyParseError::Empty);
		}

		let mut modifiers = Modifiers::NONE;
		let mut rest = s;
		// A lone "-" or "c--" keeps its trailing dash as the key.
		while rest.len() > 2 && rest.as_bytes()[1] == b'-' {
			modifiers = match &rest[..1] {
				"c" | "C" => modifiers.ctrl(),
				"a" | "A" => modifiers.alt(),
				"s" | "S" => modifiers.shift(),
				other => return Err(KeyParseError::UnknownModifier(other.to_string())),
			};
			rest = &rest[2..];
		}

		let mut chars = rest.chars();
		let code = match (chars.next(), chars.next()) {
			(Some(c), None) => KeyCode::Char(c),
			_ => KeyCode::from_name(rest).ok_or_else(|| KeyParseError::UnknownKey(rest.to_string()))?,
		};
		Ok(Self::new(code, modifiers))
	}
}

impl fmt::Display for Key {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.modifiers.ctrl {
			f.write_str("c-")?;
		}
		if self.modifiers.alt {
			f.write_str("a-")?;
		}
		if self.modifiers.shift {
			f.write_str("s-")?;
		}
		match self.code {
			KeyCode::Char(' ') => f.write_str("space"),
			KeyCode::Char(c) => write!(f, "{c}"),
			code => f.write_str(code.name().unwrap_or("?")),
		}
	}
}
