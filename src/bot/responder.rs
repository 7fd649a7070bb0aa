//! Turns commands into replies.

use std::sync::Arc;

use crate::ai::{AiClient, AiProvider, FailureClass, Persona};
use crate::analysis::{Aggregator, CheckKind};
use crate::config::BotConfig;
use crate::present::{
    assessment_card, dashboard_card, fact_line, full_analysis_card, prompt_context, reply_footer,
    DisplayCard, PromptBuilder,
};

use super::{BotError, CallbackAction, Command};

/// Reply when the model quota is exhausted.
pub const QUOTA_MESSAGE: &str =
    "🤔 Weather Uncle is taking a short break due to API quota limits. Please try again later!";

/// Reply when the model credential is missing or rejected.
pub const CREDENTIAL_MESSAGE: &str = "⚠️ Weather Uncle can't access his weather data right now. \
     Please check the API configuration.";

/// Reply for any other model failure.
pub const FAILURE_MESSAGE: &str =
    "🌧️ Weather Uncle is experiencing some technical difficulties. Please try again in a moment!";

/// Apology sent when a reply could not be delivered.
pub const UNEXPECTED_MESSAGE: &str =
    "⚠️ Weather Uncle encountered an unexpected error. Please try again!";

/// Reply for a button this version does not know.
pub const UNKNOWN_ACTION_MESSAGE: &str =
    "🤷 Weather Uncle doesn't know that button. Try /dashboard for the latest one.";

/// User-facing text for a failed model call.
#[must_use]
pub fn fallback_message(class: FailureClass) -> &'static str {
    match class {
        FailureClass::Quota => QUOTA_MESSAGE,
        FailureClass::Credential => CREDENTIAL_MESSAGE,
        FailureClass::Other => FAILURE_MESSAGE,
    }
}

/// Produces a reply for every command. Never fails: feed and model problems
/// degrade into partial cards or fallback text.
pub struct Responder {
    aggregator: Aggregator,
    model: Option<Arc<dyn AiProvider>>,
    prompts: PromptBuilder,
}

impl Responder {
    /// Create a responder without a language model.
    #[must_use]
    pub fn new(aggregator: Aggregator, prompts: PromptBuilder) -> Self {
        Self {
            aggregator,
            model: None,
            prompts,
        }
    }

    /// Build from configuration: persona file, feed client and, when its key
    /// is set, the language model. A missing key is logged, not fatal.
    ///
    /// # Errors
    ///
    /// Returns `BotError::Feed` if the feed HTTP client cannot be built.
    pub fn from_config(config: &BotConfig) -> Result<Self, BotError> {
        let persona = Persona::load(&config.persona_path);
        let aggregator = Aggregator::new(config.feeds.clone())?;
        let responder = Self::new(aggregator, PromptBuilder::new(persona));

        match AiClient::from_config(config.ai.clone()) {
            Ok(client) => {
                tracing::info!(model = %client.model(), "Language model configured");
                Ok(responder.with_model(Arc::new(client)))
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    "Language model unavailable, conversational replies disabled"
                );
                Ok(responder)
            }
        }
    }

    /// Attach a language model (builder pattern).
    #[must_use]
    pub fn with_model(mut self, model: Arc<dyn AiProvider>) -> Self {
        self.model = Some(model);
        self
    }

    #[must_use]
    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    /// Reply to a parsed command.
    pub async fn respond(&self, command: &Command) -> DisplayCard {
        match command {
            Command::Dashboard | Command::Action(CallbackAction::RefreshWeather) => {
                self.dashboard().await
            }
            Command::Action(CallbackAction::FullAnalysis) => self.full_analysis().await,
            Command::Action(action) => match action.check() {
                Some(kind) => self.check(kind).await,
                None => self.dashboard().await,
            },
            Command::Ask(question) => DisplayCard {
                text: self.answer(question).await,
                keyboard: None,
            },
            Command::Unknown(data) => {
                tracing::warn!(data = %data, "Unknown callback action");
                DisplayCard {
                    text: UNKNOWN_ACTION_MESSAGE.to_string(),
                    keyboard: None,
                }
            }
        }
    }

    /// Dashboard over every feed.
    pub async fn dashboard(&self) -> DisplayCard {
        let aggregate = self.aggregator.gather_all().await;
        tracing::debug!(facts = %fact_line(&aggregate.facts), "Dashboard facts");
        dashboard_card(&aggregate.facts)
    }

    /// One assessment, fetching only the feeds it reads.
    pub async fn check(&self, kind: CheckKind) -> DisplayCard {
        let aggregate = self.aggregator.gather_metrics(kind.inputs()).await;
        let assessment = kind.assess(&aggregate.facts);
        tracing::info!(
            check = ?kind,
            safe = assessment.safe,
            facts = %fact_line(&aggregate.facts),
            "Assessment complete"
        );
        assessment_card(&assessment, &aggregate.facts)
    }

    /// Every assessment on one card.
    pub async fn full_analysis(&self) -> DisplayCard {
        let aggregate = self.aggregator.gather_all().await;
        full_analysis_card(&aggregate.facts)
    }

    /// Conversational reply to free text.
    ///
    /// Live data is fetched only for the topics the text mentions and is
    /// handed to the model verbatim. Model failures map to fixed messages.
    pub async fn answer(&self, question: &str) -> String {
        let topics = self.aggregator.detect(question);
        if !topics.any() {
            tracing::debug!("No weather or traffic topic, answering without live data");
        }
        let aggregate = self.aggregator.gather(topics).await;
        let context = prompt_context(&aggregate);
        if context.is_some() {
            tracing::info!(facts = %fact_line(&aggregate.facts), "Including live data in prompt");
        }

        let Some(model) = &self.model else {
            tracing::warn!("No language model configured");
            return CREDENTIAL_MESSAGE.to_string();
        };

        let system = self.prompts.system_prompt(context.as_deref());
        match model.generate(&system, question).await {
            Ok(reply) => match reply_footer(&aggregate.facts) {
                Some(footer) if context.is_some() => format!("{reply}{footer}"),
                _ => reply,
            },
            Err(e) => {
                tracing::error!(error = %e, "Language model call failed");
                fallback_message(e.class()).to_string()
            }
        }
    }
}
