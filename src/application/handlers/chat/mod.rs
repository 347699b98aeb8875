//! Chat handlers: sending a message through the agent engine, history.

pub mod clear_history;
pub mod get_history;
pub mod send_message;

pub use clear_history::{ClearHistoryCommand, ClearHistoryHandler};
pub use get_history::{GetHistoryHandler, GetHistoryQuery};
pub use send_message::{SendMessageCommand, SendMessageHandler, SendMessageResult};
