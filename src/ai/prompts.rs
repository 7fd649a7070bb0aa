//! Persona prompt for the conversational assistant.

use std::path::Path;

/// Persona used when no persona file can be read.
pub const DEFAULT_PERSONA: &str = "You are Weather Uncle, a friendly and knowledgeable \
     weather expert who loves to chat about weather and climate.";

/// Persona text, loaded once and shared read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persona {
    text: String,
}

impl Persona {
    /// Wrap persona text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Read the persona file, falling back to [`DEFAULT_PERSONA`].
    #[must_use]
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) if !text.trim().is_empty() => {
                tracing::info!(path = %path.display(), "Persona prompt loaded");
                Self::new(text)
            }
            Ok(_) => {
                tracing::warn!(path = %path.display(), "Persona file is empty, using default");
                Self::default()
            }
            Err(e) => {
                tracing::error!(
                    path = %path.display(),
                    error = %e,
                    "Failed to load persona file, using default"
                );
                Self::default()
            }
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Default for Persona {
    fn default() -> Self {
        Self::new(DEFAULT_PERSONA)
    }
}
