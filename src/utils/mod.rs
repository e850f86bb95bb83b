//! Utility functions.
//!
//! Collection of helpers used across the command handlers.

pub mod parser;
pub mod reply;

pub use parser::{parse_name, parse_remind_args, RemindArgsError};
pub use reply::{reply_text, sender_id};
