//! Discord presentation helpers (buttons and styles).
pub mod buttons;
pub mod style;
