use super::*;

#[test]
fn parses_named_keys() {
	assert_eq!("down".parse::<Key>(), Ok(Key::from(KeyCode::Down)));
	assert_eq!("Esc".parse::<Key>(), Ok(Key::from(KeyCode::Escape)));
	assert_eq!("ret".parse::<Key>(), Ok(Key::from(KeyCode::Enter)));
}

#[test]
fn parses_modifier_prefixes() {
	let key: Key = "s-tab".parse().unwrap();
	assert_eq!(key.code, KeyCode::Tab);
	assert_eq!(key.modifiers, Modifiers::SHIFT);

	let key: Key = "c-a-n".parse().unwrap();
	assert_eq!(key.code, KeyCode::Char('n'));
	assert!(key.modifiers.ctrl && key.modifiers.alt && !key.modifiers.shift);
}

#[test]
fn single_characters_are_literal() {
	assert_eq!("x".parse::<Key>(), Ok(Key::char('x')));
	assert_eq!("-".parse::<Key>(), Ok(Key::char('-')));
	assert_eq!("c--".parse::<Key>(), Ok(Key::new(KeyCode::Char('-'), Modifiers::CTRL)));
}

#[test]
fn rejects_garbage() {
	assert_eq!("".parse::<Key>(), Err(KeyParseError::Empty));
	assert_eq!("bogus".parse::<Key>(), Err(KeyParseError::UnknownKey("bogus".into())));
	assert_eq!("x-up".parse::<Key>(), Err(KeyParseError::UnknownModifier("x".into())));
}

#[test]
fn display_uses_canonical_names() {
	assert_eq!(Key::new(KeyCode::Tab, Modifiers::SHIFT).to_string(), "s-tab");
	assert_eq!(Key::char(' ').to_string(), "space");
	assert_eq!(Key::from(KeyCode::Escape).to_string(), "esc");
}
