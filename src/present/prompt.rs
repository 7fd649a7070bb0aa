//! Prompt-context rendering for the language model.

use crate::ai::Persona;
use crate::analysis::{Aggregate, FactSet};
use crate::feeds::{with_unit, SourceResult};

use super::card::fact_value;

/// Builds system prompts from the persona and real-time facts.
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    persona: Persona,
}

impl PromptBuilder {
    #[must_use]
    pub fn new(persona: Persona) -> Self {
        Self { persona }
    }

    /// Persona text, followed by the data block when one is given.
    #[must_use]
    pub fn system_prompt(&self, context: Option<&str>) -> String {
        match context {
            Some(block) => format!("{}\n\n{block}", self.persona.text()),
            None => self.persona.text().to_string(),
        }
    }
}

/// Render the real-time data block appended to the system prompt.
///
/// Returns `None` when nothing was fetched successfully.
#[must_use]
pub fn prompt_context(aggregate: &Aggregate) -> Option<String> {
    let facts = &aggregate.facts;
    if facts.is_empty() {
        return None;
    }

    let mut block = format!(
        "🔴 IMPORTANT: REAL-TIME SINGAPORE DATA ({}):\n\
         Use these literal values. Don't make up weather information.\n\n",
        facts.observed_at.as_deref().unwrap_or("just now")
    );

    for metric in facts.present() {
        if let Some(value) = fact_value(facts, metric) {
            block.push_str(&format!("- {}: {value}\n", metric.label()));
        }
    }

    let details: Vec<&str> = aggregate
        .results
        .iter()
        .filter_map(SourceResult::data)
        .map(|d| d.summary.as_str())
        .filter(|s| !s.is_empty())
        .collect();
    if !details.is_empty() {
        block.push_str("\nDETAILS:\n");
        block.push_str(&details.join("\n"));
        block.push('\n');
    }

    block.push_str(
        "\nYOU MUST reference this actual current data in your response. \
         Mention specific areas and their current conditions from this data.",
    );
    Some(block)
}

/// Footer appended to model replies that used live data.
#[must_use]
pub fn reply_footer(facts: &FactSet) -> Option<String> {
    facts.observed_at.as_ref().map(|ts| {
        format!("\n\n📡 *Weather insights powered by Singapore Government API ({ts})*")
    })
}

/// One-line numeric rendering, used in logs.
#[must_use]
pub fn fact_line(facts: &FactSet) -> String {
    facts
        .present()
        .into_iter()
        .filter_map(|m| facts.number(m).map(|v| format!("{}={}", m.label(), with_unit(m, v))))
        .collect::<Vec<_>>()
        .join(", ")
}
