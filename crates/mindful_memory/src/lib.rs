pub mod history;
pub mod log;

pub use history::{History, Role, Turn};
pub use log::ConversationLog;
