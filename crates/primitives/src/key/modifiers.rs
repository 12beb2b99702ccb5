//! Modifier state carried by a [`super::Key`].

/// Held modifier keys. Written as `c-`, `a-` and `s-` prefixes in key
/// notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
	/// Whether Ctrl is held.
	pub ctrl: bool,
	/// Whether Alt is held.
	pub alt: bool,
	/// Whether Shift is held.
	pub shift: bool,
}

impl Modifiers {
	/// Bare key.
	pub const NONE: Self = Self {
		ctrl: false,
		alt: false,
		shift: false,
	};

	/// `c-` alone.
	pub const CTRL: Self = Self {
		ctrl: true,
		alt: false,
		shift: false,
	};

	/// `s-` alone.
	pub const SHIFT: Self = Self {
		ctrl: false,
		alt: false,
		shift: true,
	};

	/// Adds the `c-` prefix.
	pub fn ctrl(self) -> Self {
		Self { ctrl: true, ..self }
	}

	/// Adds the `a-` prefix.
	pub fn alt(self) -> Self {
		Self { alt: true, ..self }
	}

	/// Adds the `s-` prefix.
	pub fn shift(self) -> Self {
		Self { shift: true, ..self }
	}
}
