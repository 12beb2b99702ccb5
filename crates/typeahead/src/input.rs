//! Keyboard adapter mapping key presses onto state transitions.

use typeahead_primitives::{Key, KeyCode};

use crate::state::{Commits, TransitionCx, TypeaheadState};

/// Outcome of a key press, telling the host what to do with its default
/// behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResult {
	/// The key drove a transition and its default action must be suppressed.
	Consumed,
	/// The key drove a transition; the default action may proceed.
	Handled,
	/// The key is not a typeahead key.
	Unhandled,
}

impl KeyResult {
	/// Returns true when the host should suppress the key's default action.
	pub fn prevents_default(self) -> bool {
		self == Self::Consumed
	}
}

/// Transition selected by a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
	ActivatePrev,
	ActivateNext,
	ChooseActive,
	Reset,
	Blur,
}

/// Resolves `key` against the current list state.
///
/// Keys are matched on their code alone; modifiers never change the action.
/// Tab cycles through open suggestions and keeps focus; with no suggestions
/// it behaves as a blur and lets focus move on.
pub fn resolve_key(key: Key, has_suggestions: bool) -> Option<(KeyAction, KeyResult)> {
	Some(match key.code {
		KeyCode::Up => (KeyAction::ActivatePrev, KeyResult::Handled),
		KeyCode::Down => (KeyAction::ActivateNext, KeyResult::Handled),
		KeyCode::Enter => (KeyAction::ChooseActive, KeyResult::Handled),
		KeyCode::Escape => (KeyAction::Reset, KeyResult::Handled),
		KeyCode::Tab if has_suggestions => (KeyAction::ActivateNext, KeyResult::Consumed),
		KeyCode::Tab => (KeyAction::Blur, KeyResult::Handled),
		_ => return None,
	})
}

/// Resolves and applies `key` to `state` in one step.
pub fn apply_key<S: Clone + PartialEq>(state: &mut TypeaheadState<S>, cx: &TransitionCx<'_, S>, key: Key) -> (KeyResult, Commits<S>) {
	let Some((action, result)) = resolve_key(key, !state.suggestions().is_empty()) else {
		return (KeyResult::Unhandled, Commits::none());
	};
	tracing::trace!(%key, ?action, "typeahead.key");
	let commits = match action {
		KeyAction::ActivatePrev => state.activate_suggestion_prev(cx),
		KeyAction::ActivateNext => state.activate_suggestion_next(cx),
		KeyAction::ChooseActive => state.choose_suggestion_active(cx),
		KeyAction::Reset => state.reset_typeahead(cx),
		KeyAction::Blur => state.input_text_will_blur(cx),
	};
	(result, commits)
}
