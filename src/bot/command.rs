//! Inbound command parsing.

use serde::{Deserialize, Serialize};

use crate::analysis::CheckKind;

/// Button identifiers the dashboard can send back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallbackAction {
    CheckJogging,
    CheckChildren,
    CheckLaundry,
    CheckPicnic,
    CheckRain,
    CheckHaze,
    RefreshWeather,
    FullAnalysis,
}

impl CallbackAction {
    pub const ALL: [CallbackAction; 8] = [
        Self::CheckJogging,
        Self::CheckChildren,
        Self::CheckLaundry,
        Self::CheckPicnic,
        Self::CheckRain,
        Self::CheckHaze,
        Self::RefreshWeather,
        Self::FullAnalysis,
    ];

    /// Wire identifier carried in callback data.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::CheckJogging => "check_jogging",
            Self::CheckChildren => "check_children",
            Self::CheckLaundry => "check_laundry",
            Self::CheckPicnic => "check_picnic",
            Self::CheckRain => "check_rain",
            Self::CheckHaze => "check_haze",
            Self::RefreshWeather => "refresh_weather",
            Self::FullAnalysis => "full_analysis",
        }
    }

    /// Parse a wire identifier.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.id() == id)
    }

    /// Assessment the button asks for, if it is a `check_*` button.
    #[must_use]
    pub fn check(self) -> Option<CheckKind> {
        match self {
            Self::CheckJogging => Some(CheckKind::Jogging),
            Self::CheckChildren => Some(CheckKind::ChildPlay),
            Self::CheckLaundry => Some(CheckKind::Laundry),
            Self::CheckPicnic => Some(CheckKind::Picnic),
            Self::CheckRain => Some(CheckKind::RainPrediction),
            Self::CheckHaze => Some(CheckKind::HazeRisk),
            Self::RefreshWeather | Self::FullAnalysis => None,
        }
    }
}

/// What an inbound message or button press asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/start` or `/dashboard`.
    Dashboard,
    /// Free text for the conversational path.
    Ask(String),
    /// A known button.
    Action(CallbackAction),
    /// Button identifier outside the known set.
    Unknown(String),
}

impl Command {
    /// Interpret a text message.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let trimmed = text.trim();
        // Telegram appends "@botname" to commands in group chats.
        let command = trimmed
            .split_whitespace()
            .next()
            .map(|word| word.split('@').next().unwrap_or(word))
            .unwrap_or_default();
        match command {
            "/start" | "/dashboard" => Self::Dashboard,
            _ => Self::Ask(trimmed.to_string()),
        }
    }

    /// Interpret button callback data.
    #[must_use]
    pub fn from_callback(data: &str) -> Self {
        CallbackAction::from_id(data).map_or_else(|| Self::Unknown(data.to_string()), Self::Action)
    }
}
