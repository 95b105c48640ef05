//! Conversation entries and the persisted message log

mod log;
mod message;

pub use log::MessageLog;
pub use message::{Message, NewMessage, Sender};
