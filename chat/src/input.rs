//! Keyboard and pointer routing.
//!
//! Front ends translate their native events into [`KeyPress`] and
//! [`PointerTarget`]; routing decides what the widget does with them.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

/// Key name reported for the cancellation key.
pub const ESCAPE: &str = "Escape";

/// Key name reported for the submit key.
pub const ENTER: &str = "Enter";

/// A key plus required modifiers that toggles the panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyChord {
    pub key: String,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Default for KeyChord {
    /// Ctrl + `/`.
    fn default() -> Self {
        Self { key: "/".to_owned(), ctrl: true, alt: false, meta: false }
    }
}

impl KeyChord {
    /// Whether `press` satisfies this chord. Modifiers the chord does not
    /// require are ignored.
    #[must_use]
    pub fn matches(&self, press: &KeyPress) -> bool {
        (!self.ctrl || press.ctrl)
            && (!self.alt || press.alt)
            && (!self.meta || press.meta)
            && press.key.eq_ignore_ascii_case(&self.key)
    }
}

/// A key-down event as seen by the widget.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyPress {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
}

impl KeyPress {
    #[must_use]
    pub fn key(key: impl Into<String>) -> Self {
        Self { key: key.into(), ..Self::default() }
    }

    #[must_use]
    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    #[must_use]
    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }
}

/// Where a key-down was observed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyScope {
    /// Document-level listener: shortcuts and cancellation.
    Document,
    /// The message text field.
    Input,
}

/// What a routed key press did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    Ignored,
    Toggled,
    Closed,
    /// The caller should start a submit.
    Submit,
}

impl KeyOutcome {
    /// Whether the native default action should be suppressed.
    #[must_use]
    pub fn prevent_default(self) -> bool {
        matches!(self, Self::Toggled | Self::Submit)
    }
}

/// Where a pointer interaction landed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerTarget {
    Panel,
    Toggle,
    Outside,
}

/// Decide what a key press means, without touching any state.
#[must_use]
pub fn route_key(chord: &KeyChord, press: &KeyPress, scope: KeyScope, open: bool) -> KeyOutcome {
    match scope {
        KeyScope::Input => {
            if press.key == ENTER && !press.shift {
                KeyOutcome::Submit
            } else {
                KeyOutcome::Ignored
            }
        }
        KeyScope::Document => {
            if chord.matches(press) {
                KeyOutcome::Toggled
            } else if press.key == ESCAPE && open {
                KeyOutcome::Closed
            } else {
                KeyOutcome::Ignored
            }
        }
    }
}
