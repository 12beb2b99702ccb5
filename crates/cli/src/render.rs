//! Plain-text rendering of widget snapshots.

use std::fmt::Write;

use typeahead_core::{Model, TypeaheadState};

/// Brackets the part of `suggestion` matching the typed prefix.
pub fn highlight_prefix(input: &str, suggestion: &str) -> String {
	match suggestion.get(..input.len()) {
		Some(head) if !input.is_empty() && head.eq_ignore_ascii_case(input) => {
			format!("[{head}]{}", &suggestion[input.len()..])
		}
		_ => suggestion.to_string(),
	}
}

/// Describes one model commit.
pub fn commit(value: Option<&Model<String>>) -> String {
	format!("commit: {}", model(value))
}

fn model(value: Option<&Model<String>>) -> String {
	match value {
		None => "none".to_string(),
		Some(Model::Suggestion(s)) => format!("suggestion {s:?}"),
		Some(Model::Text(text)) => format!("text {text:?}"),
	}
}

/// Renders a snapshot with its already rendered suggestion lines.
pub fn snapshot(state: &TypeaheadState<String>, lines: &[String]) -> String {
	let mut out = String::new();
	let _ = writeln!(out, "  input  {:?}", state.input_text());
	let _ = writeln!(out, "  model  {}", model(state.model()));
	if state.waiting() {
		out.push_str("  (searching)\n");
	}
	for (i, line) in lines.iter().enumerate() {
		let marker = if state.active_index() == Some(i) { '>' } else { ' ' };
		let _ = writeln!(out, "  {marker} {i} {line}");
	}
	out
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn highlights_case_insensitive_prefix() {
		assert_eq!(highlight_prefix("ap", "Apple"), "[Ap]ple");
		assert_eq!(highlight_prefix("", "apple"), "apple");
		assert_eq!(highlight_prefix("xy", "apple"), "apple");
		assert_eq!(highlight_prefix("applesauce", "apple"), "apple");
	}

	#[test]
	fn highlight_respects_char_boundaries() {
		assert_eq!(highlight_prefix("a", "éclair"), "éclair");
	}

	#[test]
	fn describes_commits() {
		assert_eq!(commit(None), "commit: none");
		assert_eq!(commit(Some(&Model::Suggestion("kiwi".into()))), "commit: suggestion \"kiwi\"");
		assert_eq!(commit(Some(&Model::Text("ki".into()))), "commit: text \"ki\"");
	}

	#[test]
	fn renders_idle_snapshot() {
		let state = TypeaheadState::<String>::default();
		assert_eq!(snapshot(&state, &[]), "  input  \"\"\n  model  none\n");
	}
}
