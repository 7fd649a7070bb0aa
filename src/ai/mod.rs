//! Language model access for conversational replies.

mod client;
mod prompts;

pub use client::*;
pub use prompts::{Persona, DEFAULT_PERSONA};
