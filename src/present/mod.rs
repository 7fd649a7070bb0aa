//! Presentation of fact sets: prompt context for the model and cards for
//! direct display.

mod card;
mod prompt;

pub use card::*;
pub use prompt::*;
