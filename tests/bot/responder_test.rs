//! Responder tests with a scripted model and fixture feeds.

use std::sync::Arc;

use weather_uncle::ai::Persona;
use weather_uncle::bot::{
    CallbackAction, Command, Responder, CREDENTIAL_MESSAGE, FAILURE_MESSAGE, QUOTA_MESSAGE,
    UNKNOWN_ACTION_MESSAGE,
};
use weather_uncle::feeds::FeedKind;
use weather_uncle::present::PromptBuilder;

use super::{Scripted, ScriptedModel};
use crate::fixtures::aggregator;

const PERSONA: &str = "You are Weather Uncle, a friendly Singaporean uncle.";

async fn responder(failing: &[FeedKind]) -> Responder {
    Responder::new(
        aggregator(failing).await,
        PromptBuilder::new(Persona::new(PERSONA)),
    )
}

#[tokio::test]
async fn test_weather_question_carries_live_data() {
    let model = Arc::new(ScriptedModel::new(Scripted::Reply("Aiyah, very hot today lah!")));
    let responder = responder(&[]).await.with_model(model.clone());

    let reply = responder.answer("What's the weather like in Singapore?").await;

    assert!(reply.starts_with("Aiyah, very hot today lah!"));
    assert!(reply.ends_with("Singapore Government API (18/10/2026, 2:00:00 pm)*"));

    let system = model.last_system_prompt();
    assert!(system.starts_with(PERSONA));
    assert!(system.contains("REAL-TIME SINGAPORE DATA"));
    assert!(system.contains("- Temperature: 31.2°C"));
    assert!(system.contains("- PSI: 45 (good)"));
    assert!(system.contains("Don't make up weather information"));
    assert!(!system.contains("cameras online"));
}

#[tokio::test]
async fn test_small_talk_skips_data_and_footer() {
    let model = Arc::new(ScriptedModel::new(Scripted::Reply("Hello ah!")));
    let responder = responder(&[]).await.with_model(model.clone());

    let reply = responder.answer("Hello uncle, how are you?").await;

    assert_eq!(reply, "Hello ah!");
    assert_eq!(model.last_system_prompt(), PERSONA);
}

#[tokio::test]
async fn test_all_feeds_down_still_answers_without_data() {
    let model = Arc::new(ScriptedModel::new(Scripted::Reply("Cannot check now.")));
    let responder = responder(&FeedKind::ALL).await.with_model(model.clone());

    let reply = responder.answer("Will it rain later?").await;

    assert_eq!(reply, "Cannot check now.");
    assert_eq!(model.last_system_prompt(), PERSONA);
}

#[tokio::test]
async fn test_model_failures_map_to_fallbacks() {
    let cases = [
        (Scripted::Quota, QUOTA_MESSAGE),
        (Scripted::BadKey, CREDENTIAL_MESSAGE),
        (Scripted::Broken, FAILURE_MESSAGE),
    ];
    for (outcome, expected) in cases {
        let responder = responder(&[])
            .await
            .with_model(Arc::new(ScriptedModel::new(outcome)));
        assert_eq!(responder.answer("Is it sunny?").await, expected);
    }
}

#[tokio::test]
async fn test_missing_model_uses_credential_message() {
    let responder = responder(&[]).await;
    assert!(!responder.has_model());
    assert_eq!(responder.answer("Is it sunny?").await, CREDENTIAL_MESSAGE);
}

#[tokio::test]
async fn test_dashboard_command_bypasses_model() {
    let model = Arc::new(ScriptedModel::new(Scripted::Broken));
    let responder = responder(&[]).await.with_model(model.clone());

    let card = responder.respond(&Command::Dashboard).await;

    assert!(card.text.contains("Singapore Weather Dashboard"));
    assert!(card.text.contains("├─ Temperature: 31.2°C"));
    assert!(card.text.contains("🚦 Traffic"));
    assert!(card.keyboard.is_some());
    assert!(model.prompts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_check_buttons_render_assessments() {
    let responder = responder(&[]).await;
    let cases = [
        (CallbackAction::CheckJogging, "Good time for a jog"),
        (CallbackAction::CheckChildren, "Safe for outdoor play"),
        (CallbackAction::CheckLaundry, "Good time to dry laundry"),
        (CallbackAction::CheckPicnic, "Great for a picnic"),
        (CallbackAction::CheckRain, "Rain unlikely"),
        (CallbackAction::CheckHaze, "Haze risk low"),
    ];
    for (action, verdict) in cases {
        let card = responder.respond(&Command::Action(action)).await;
        assert!(card.text.contains(verdict), "{action:?}: {}", card.text);
        assert!(card.keyboard.is_none());
    }
}

#[tokio::test]
async fn test_haze_without_psi_is_unknown() {
    let responder = responder(&[FeedKind::Psi]).await;
    let card = responder
        .respond(&Command::Action(CallbackAction::CheckHaze))
        .await;
    assert!(card.text.contains("Haze risk unknown"));
}

#[tokio::test]
async fn test_full_analysis_and_refresh() {
    let responder = responder(&[]).await;

    let full = responder
        .respond(&Command::Action(CallbackAction::FullAnalysis))
        .await;
    assert!(full.text.contains("Full Weather Analysis"));

    let refreshed = responder
        .respond(&Command::Action(CallbackAction::RefreshWeather))
        .await;
    assert!(refreshed.text.contains("Singapore Weather Dashboard"));
}

#[tokio::test]
async fn test_unknown_button() {
    let responder = responder(&[]).await;
    let card = responder
        .respond(&Command::from_callback("check_moon_phase"))
        .await;
    assert_eq!(card.text, UNKNOWN_ACTION_MESSAGE);
}
