//! Line-oriented event scripts.
//!
//! Each non-blank line not starting with `#` is one step:
//!
//! ```text
//! # let the debounce window pass before navigating
//! type ap
//! wait 300
//! key down
//! hover 1
//! click 0
//! blur
//! reset
//! show
//! ```
//!
//! `type` takes the rest of the line verbatim. `key` accepts the notation of
//! `Key::from_str`.

use std::str::FromStr;

use thiserror::Error;
use typeahead_core::Key;

/// One scripted step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
	Type(String),
	Key(Key),
	Hover(usize),
	Click(usize),
	Blur,
	Reset,
	Wait(u64),
	Show,
}

/// A script line that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct ParseError {
	pub line: usize,
	pub message: String,
}

/// Parses one script line. Returns `Ok(None)` for blank lines and comments.
pub fn parse_line(line_no: usize, line: &str) -> Result<Option<Step>, ParseError> {
	let err = |message: String| ParseError { line: line_no, message };

	let trimmed = line.trim_start();
	if trimmed.trim_end().is_empty() || trimmed.starts_with('#') {
		return Ok(None);
	}
	let (verb, rest) = trimmed.split_once(' ').unwrap_or((trimmed.trim_end(), ""));

	let index = |what: &str| rest.trim().parse::<usize>().map_err(|_| err(format!("{what} expects an index, got {:?}", rest.trim())));

	let step = match verb {
		// Text is taken verbatim so trailing spaces survive.
		"type" => Step::Type(rest.to_string()),
		"key" => Step::Key(rest.trim().parse().map_err(|e| err(format!("{e}")))?),
		"hover" => Step::Hover(index("hover")?),
		"click" => Step::Click(index("click")?),
		"wait" => Step::Wait(rest.trim().parse().map_err(|_| err(format!("wait expects milliseconds, got {:?}", rest.trim())))?),
		"blur" => Step::Blur,
		"reset" => Step::Reset,
		"show" => Step::Show,
		other => return Err(err(format!("unknown command {other:?}"))),
	};
	Ok(Some(step))
}

impl FromStr for Step {
	type Err = ParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		parse_line(1, s)?.ok_or_else(|| ParseError {
			line: 1,
			message: "empty step".to_string(),
		})
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use typeahead_core::{KeyCode, Modifiers};

	use super::*;

	#[test]
	fn parses_every_command() {
		let cases = [
			("type ap", Step::Type("ap".into())),
			("type new york ", Step::Type("new york ".into())),
			("type", Step::Type(String::new())),
			("key down", Step::Key(KeyCode::Down.into())),
			("key s-tab", Step::Key(Key::new(KeyCode::Tab, Modifiers::SHIFT))),
			("hover 2", Step::Hover(2)),
			("click 0", Step::Click(0)),
			("wait 300", Step::Wait(300)),
			("blur", Step::Blur),
			("reset", Step::Reset),
			("  show", Step::Show),
		];
		for (line, expected) in cases {
			assert_eq!(line.parse::<Step>(), Ok(expected), "{line:?}");
		}
	}

	#[test]
	fn skips_blank_and_comment_lines() {
		assert_eq!(parse_line(1, ""), Ok(None));
		assert_eq!(parse_line(2, "   "), Ok(None));
		assert_eq!(parse_line(3, "# type x"), Ok(None));
	}

	#[test]
	fn reports_line_numbers() {
		let err = parse_line(7, "hover x").unwrap_err();
		assert_eq!(err.line, 7);
		assert!(err.to_string().starts_with("line 7: hover expects an index"));

		assert!(parse_line(1, "jump 3").is_err());
		assert!(parse_line(1, "key nope").is_err());
		assert!(parse_line(1, "wait soon").is_err());
	}
}
