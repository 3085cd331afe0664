//! Ensures help and registration cover every command word.
use guarda_din_bot::commands::help::{all_command_names, help_text};
use guarda_din_bot::handler::commands_to_register;

#[test]
fn help_command_names_unique_and_present() {
    let names = all_command_names();
    let mut sorted = names.clone();
    sorted.sort();
    for w in sorted.windows(2) {
        assert_ne!(w[0], w[1], "Duplicate help command name: {}", w[0]);
    }
    for expected in ["start", "help", "novo", "consultar", "cancelar"] {
        assert!(names.contains(&expected), "Missing command: {expected}");
    }
}

#[test]
fn every_name_is_registered_as_slash_command() {
    assert_eq!(commands_to_register().len(), all_command_names().len());
}

#[test]
fn help_uses_configured_prefix() {
    let text = help_text("?");
    assert!(text.contains("`?novo`"));
    assert!(!text.contains("`!novo`"));
}
