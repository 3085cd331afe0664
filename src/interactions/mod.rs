//! Central router for component interactions.
//!
//! `handler.rs` delegates every button press here; the custom_id family
//! (`exp`, `rep`) picks the specialized handler.

pub mod expense_handler;
pub mod ids;
pub mod util;
