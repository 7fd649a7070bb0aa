//! Chat bot: command parsing, reply generation and the Telegram transport.

mod command;
mod error;
mod responder;
mod runner;
mod telegram;
mod transport;

pub use command::{CallbackAction, Command};
pub use error::{BotError, TransportError};
pub use responder::*;
pub use runner::BotRunner;
pub use telegram::TelegramTransport;
pub use transport::{ChatTransport, Inbound, Outbound};
