use super::*;

// =============================================================
// Role
// =============================================================

#[test]
fn role_labels_are_lowercase() {
    assert_eq!(Role::User.as_str(), "user");
    assert_eq!(Role::Bot.as_str(), "bot");
}

#[test]
fn role_serializes_as_lowercase_string() {
    let json = serde_json::to_string(&Role::Bot).expect("serialize");
    assert_eq!(json, "\"bot\"");
}

// =============================================================
// Turn
// =============================================================

#[test]
fn user_turn_keeps_literal_text() {
    let turn = Turn::user("  spaced  ");
    assert_eq!(turn.role(), Role::User);
    assert_eq!(turn.text(), "  spaced  ");
}

#[test]
fn bot_turn_has_bot_role() {
    let turn = Turn::bot("Hello!");
    assert_eq!(turn.role(), Role::Bot);
    assert_eq!(turn.text(), "Hello!");
}
