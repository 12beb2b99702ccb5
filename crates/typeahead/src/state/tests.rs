use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;

fn to_string(s: &String) -> String {
	s.to_uppercase()
}

fn cx(rigid: bool, change_on_blur: bool) -> TransitionCx<'static, String> {
	TransitionCx {
		policy: Policy { rigid, change_on_blur },
		to_string: &to_string,
	}
}

fn with_suggestions(items: &[&str]) -> TypeaheadState<String> {
	let mut state = TypeaheadState::default();
	assert!(state.got_suggestions(0, items.iter().map(|s| s.to_string()).collect()));
	state
}

fn suggestion(s: &str) -> Option<Model<String>> {
	Some(Model::Suggestion(s.to_string()))
}

#[test]
fn next_and_prev_wrap_around() {
	let cx = cx(true, true);
	let mut state = with_suggestions(&["a", "b", "c"]);

	let _ = state.activate_suggestion_next(&cx);
	assert_eq!(state.active_index(), Some(0));
	let _ = state.activate_suggestion_prev(&cx);
	assert_eq!(state.active_index(), Some(2));
	let _ = state.activate_suggestion_next(&cx);
	assert_eq!(state.active_index(), Some(0));
	let _ = state.activate_suggestion_next(&cx);
	let _ = state.activate_suggestion_next(&cx);
	assert_eq!(state.active_suggestion().map(String::as_str), Some("c"));
}

#[test]
fn prev_with_nothing_active_selects_last() {
	let cx = cx(true, true);
	let mut state = with_suggestions(&["a", "b", "c"]);
	let _ = state.activate_suggestion_prev(&cx);
	assert_eq!(state.active_index(), Some(2));
}

#[test]
fn navigation_without_suggestions_is_noop() {
	let cx = cx(true, false);
	let mut state = TypeaheadState::<String>::default();
	assert!(state.activate_suggestion_next(&cx).is_empty());
	assert!(state.activate_suggestion_prev(&cx).is_empty());
	assert_eq!(state, TypeaheadState::default());
}

#[test]
fn activation_on_blur_widgets_leaves_model_and_text() {
	let cx = cx(true, true);
	let mut state = with_suggestions(&["apple", "apricot"]);
	let _ = state.input_text_changed(&cx, "ap");

	let commits = state.activate_suggestion_by_index(&cx, 1);

	assert!(commits.is_empty());
	assert_eq!(state.active_index(), Some(1));
	assert_eq!(state.input_text(), "ap");
	assert!(!state.displaying_suggestion());
	assert_eq!(state.model(), None);
}

#[test]
fn activation_on_immediate_widgets_commits_and_displays() {
	let cx = cx(true, false);
	let mut state = with_suggestions(&["apple", "apricot"]);

	let commits = state.activate_suggestion_by_index(&cx, 1);

	assert_eq!(commits.into_iter().collect::<Vec<_>>(), vec![suggestion("apricot")]);
	assert_eq!(state.input_text(), "APRICOT");
	assert!(state.displaying_suggestion());
	assert_eq!(state.model(), suggestion("apricot").as_ref());
}

#[test]
fn activating_out_of_range_is_noop() {
	let cx = cx(true, false);
	let mut state = with_suggestions(&["a"]);
	let before = state.clone();
	assert!(state.activate_suggestion_by_index(&cx, 5).is_empty());
	assert_eq!(state, before);
}

#[test]
fn choose_commits_displays_and_closes() {
	let cx = cx(true, true);
	let mut state = with_suggestions(&["apple", "apricot"]);

	let commits = state.choose_suggestion_by_index(&cx, 0);

	assert_eq!(commits.len(), 1);
	assert_eq!(state.model(), suggestion("apple").as_ref());
	assert_eq!(state.input_text(), "APPLE");
	assert!(state.displaying_suggestion());
	assert!(state.suggestions().is_empty());
	assert_eq!(state.active_index(), None);
}

#[test]
fn choose_after_committing_activation_reports_once() {
	let cx = cx(true, false);
	let mut state = with_suggestions(&["apple"]);
	let commits = state.choose_suggestion_by_index(&cx, 0);
	assert_eq!(commits.len(), 1);
}

#[test]
fn choose_active_requires_highlight() {
	let cx = cx(true, true);
	let mut state = with_suggestions(&["apple", "apricot"]);
	assert!(state.choose_suggestion_active(&cx).is_empty());
	assert_eq!(state.suggestions().len(), 2);

	let _ = state.activate_suggestion_next(&cx);
	let _ = state.activate_suggestion_next(&cx);
	let commits = state.choose_suggestion_active(&cx);
	assert_eq!(commits.iter().collect::<Vec<_>>(), vec![suggestion("apricot").as_ref()]);
}

#[test]
fn typing_commits_text_only_for_immediate_free_text() {
	let mut state = TypeaheadState::<String>::default();
	let commits = state.input_text_changed(&cx(false, false), "xy").unwrap();
	assert_eq!(commits.into_iter().collect::<Vec<_>>(), vec![Some(Model::Text("xy".into()))]);

	let commits = state.input_text_changed(&cx(true, false), "xyz").unwrap();
	assert!(commits.is_empty());
	assert_eq!(state.model(), Some(&Model::Text("xy".into())));
}

#[test]
fn unchanged_text_is_ignored() {
	let cx = cx(false, false);
	let mut state = TypeaheadState::<String>::default();
	assert!(state.input_text_changed(&cx, "").is_none());
	assert!(state.input_text_changed(&cx, "a").is_some());
	assert!(state.input_text_changed(&cx, "a").is_none());
}

#[test]
fn typing_clears_displaying_suggestion() {
	let cx = cx(true, true);
	let mut state = with_suggestions(&["apple"]);
	let _ = state.choose_suggestion_by_index(&cx, 0);
	assert!(state.displaying_suggestion());

	let _ = state.input_text_changed(&cx, "APPL");
	assert!(!state.displaying_suggestion());
}

#[test]
fn reset_is_idempotent() {
	let cx = cx(false, false);
	let mut state = with_suggestions(&["a", "b"]);
	let _ = state.input_text_changed(&cx, "a");
	let _ = state.activate_suggestion_next(&cx);
	state.waiting = true;

	let first = state.reset_typeahead(&cx);
	assert_eq!(first.into_iter().collect::<Vec<_>>(), vec![None]);
	let once = state.clone();
	let _ = state.reset_typeahead(&cx);

	for s in [&once, &state] {
		assert!(s.suggestions().is_empty());
		assert_eq!(s.active_index(), None);
		assert_eq!(s.input_text(), "");
		assert!(!s.waiting());
		assert!(!s.displaying_suggestion());
		assert_eq!(s.model(), None);
	}
}

#[test]
fn reset_keeps_model_on_rigid_widgets() {
	let cx = cx(true, false);
	let mut state = with_suggestions(&["a"]);
	let _ = state.choose_suggestion_by_index(&cx, 0);
	assert!(state.reset_typeahead(&cx).is_empty());
	assert_eq!(state.model(), suggestion("a").as_ref());
}

#[test]
fn rigid_blur_never_commits() {
	let cx = cx(true, true);
	let mut state = TypeaheadState::<String>::default();
	let _ = state.input_text_changed(&cx, "free text");
	assert!(state.input_text_will_blur(&cx).is_empty());
	assert_eq!(state.model(), None);
}

#[test]
fn free_text_blur_commits_typed_text() {
	let cx = cx(false, true);
	let mut state = TypeaheadState::<String>::default();
	let _ = state.input_text_changed(&cx, "xyz");
	let commits = state.input_text_will_blur(&cx);
	assert_eq!(commits.len(), 1);
	assert_eq!(state.model(), Some(&Model::Text("xyz".into())));
}

#[test]
fn blur_skips_commit_while_displaying_suggestion() {
	let cx = cx(false, true);
	let mut state = with_suggestions(&["apple"]);
	let _ = state.choose_suggestion_by_index(&cx, 0);
	assert!(state.input_text_will_blur(&cx).is_empty());
	assert_eq!(state.model(), suggestion("apple").as_ref());
}

#[test]
fn external_model_is_adopted_silently() {
	let cx = cx(true, true);
	let mut state = with_suggestions(&["a", "b"]);
	let generation = state.generation();

	assert!(state.external_model_changed(&cx, suggestion("pear")));
	assert_eq!(state.input_text(), "PEAR");
	assert!(state.displaying_suggestion());
	assert!(state.suggestions().is_empty());
	assert!(state.generation() > generation);

	assert!(!state.external_model_changed(&cx, suggestion("pear")), "equal values are not re-applied");

	assert!(state.external_model_changed(&cx, None));
	assert_eq!(state.input_text(), "");
	assert!(state.displaying_suggestion());
}

#[test]
fn blur_after_external_clear_keeps_external_value() {
	let cx = cx(false, true);
	let mut state = TypeaheadState::<String>::default();
	let _ = state.input_text_changed(&cx, "typed");
	let _ = state.input_text_will_blur(&cx);
	assert_eq!(state.model(), Some(&Model::Text("typed".into())));

	assert!(state.external_model_changed(&cx, None));
	assert!(state.input_text_will_blur(&cx).is_empty());
	assert_eq!(state.model(), None);
}

#[test]
fn external_model_change_ends_waiting() {
	let cx = cx(true, true);
	let mut state = TypeaheadState::<String>::default();
	assert!(state.begin_waiting(state.generation()));

	assert!(state.external_model_changed(&cx, Some(Model::Text("ext".into()))));
	assert!(!state.waiting());
}

#[test]
fn stale_generations_are_discarded() {
	let cx = cx(true, true);
	let mut state = TypeaheadState::<String>::default();
	let generation = state.generation();
	assert!(state.begin_waiting(generation));
	assert!(state.waiting());

	let _ = state.reset_typeahead(&cx);
	assert!(!state.begin_waiting(generation));
	assert!(!state.got_suggestions(generation, vec!["late".into()]));
	assert!(state.suggestions().is_empty());
	assert!(!state.waiting());
}

#[test]
fn got_suggestions_leaves_text_and_model() {
	let cx = cx(false, false);
	let mut state = TypeaheadState::<String>::default();
	let _ = state.input_text_changed(&cx, "ap");
	let _ = state.activate_suggestion_next(&cx);
	state.waiting = true;

	assert!(state.got_suggestions(state.generation(), vec!["apple".into()]));
	assert_eq!(state.input_text(), "ap");
	assert_eq!(state.model(), Some(&Model::Text("ap".into())));
	assert_eq!(state.active_index(), None);
	assert!(!state.waiting());
}

#[derive(Debug, Clone, Copy)]
enum Nav {
	Next,
	Prev,
}

fn nav() -> impl Strategy<Value = Nav> {
	prop_oneof![Just(Nav::Next), Just(Nav::Prev)]
}

proptest! {
	#[test]
	fn navigation_stays_in_bounds_and_cycles(count in 1usize..12, moves in prop::collection::vec(nav(), 1..64)) {
		let cx = cx(true, false);
		let items: Vec<String> = (0..count).map(|i| i.to_string()).collect();
		let mut state = TypeaheadState::default();
		prop_assert!(state.got_suggestions(0, items));

		for step in moves {
			let before = state.active_index();
			let _ = match step {
				Nav::Next => state.activate_suggestion_next(&cx),
				Nav::Prev => state.activate_suggestion_prev(&cx),
			};
			let after = state.active_index().expect("navigation always activates");
			prop_assert!(after < count);
			let expected = match (step, before) {
				(Nav::Next, None) => 0,
				(Nav::Next, Some(i)) => (i + 1) % count,
				(Nav::Prev, None) | (Nav::Prev, Some(0)) => count - 1,
				(Nav::Prev, Some(i)) => i - 1,
			};
			prop_assert_eq!(after, expected);
		}
	}

	#[test]
	fn choose_always_closes_list(
		count in 0usize..8,
		index in 0usize..10,
		rigid in any::<bool>(),
		change_on_blur in any::<bool>(),
		active in prop::option::of(0usize..8),
	) {
		let cx = cx(rigid, change_on_blur);
		let mut state = TypeaheadState::default();
		prop_assert!(state.got_suggestions(0, (0..count).map(|i| i.to_string()).collect()));
		if let Some(active) = active {
			let _ = state.activate_suggestion_by_index(&cx, active);
		}

		let _ = state.choose_suggestion_by_index(&cx, index);

		prop_assert!(state.suggestions().is_empty());
		prop_assert_eq!(state.active_index(), None);
	}

	#[test]
	fn activation_commits_iff_immediate(rigid in any::<bool>(), change_on_blur in any::<bool>(), index in 0usize..4) {
		let cx = cx(rigid, change_on_blur);
		let mut state = TypeaheadState::default();
		prop_assert!(state.got_suggestions(0, ["w", "x", "y", "z"].iter().map(|s| s.to_string()).collect()));

		let commits = state.activate_suggestion_by_index(&cx, index);
		if change_on_blur {
			prop_assert!(commits.is_empty());
		} else {
			let expected = vec![Some(Model::Suggestion(state.suggestions()[index].clone()))];
			prop_assert_eq!(commits.into_iter().collect::<Vec<_>>(), expected);
		}
	}
}
