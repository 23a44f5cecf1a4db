//! Bot module for handling Telegram interactions
//!
//! - `router`: decides which action, if any, a message triggers
//! - `message_handler`: teloxide endpoint that carries the action out
//! - `replies`: the texts the bot sends back

pub mod message_handler;
pub mod replies;
pub mod router;

// Re-export main handler functions for use in main.rs
pub use message_handler::{message_handler, BotState};
pub use router::{Action, Inbound, Router};
