//! Display cards sent straight to the chat, bypassing the language model.
//!
//! Layout is fixed: environmental conditions, air quality, forecast, traffic
//! (when fetched), safety summary, then the attribution footer. Markup is the
//! light Telegram Markdown dialect: `*bold*` and `_italic_`.

use serde::Serialize;

use crate::analysis::{Assessment, CheckKind, FactSet, PsiBand, RiskLevel};
use crate::bot::CallbackAction;
use crate::feeds::{with_unit, Metric};

const ENVIRONMENT: [Metric; 5] = [
    Metric::Temperature,
    Metric::Humidity,
    Metric::WindSpeed,
    Metric::WindDirection,
    Metric::Rainfall,
];
const AIR_QUALITY: [Metric; 3] = [Metric::Psi, Metric::Pm25, Metric::UvIndex];
const FORECAST: [Metric; 3] = [Metric::Forecast2h, Metric::Forecast24h, Metric::Forecast4d];

/// One inline button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Button {
    pub label: String,
    pub action: CallbackAction,
}

impl Button {
    #[must_use]
    pub fn new(label: impl Into<String>, action: CallbackAction) -> Self {
        Self {
            label: label.into(),
            action,
        }
    }
}

/// Grid of buttons, row by row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Keyboard {
    pub rows: Vec<Vec<Button>>,
}

/// A formatted message, optionally with buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayCard {
    pub text: String,
    pub keyboard: Option<Keyboard>,
}

/// Button grid attached to the dashboard.
#[must_use]
pub fn dashboard_keyboard() -> Keyboard {
    let b = Button::new;
    Keyboard {
        rows: vec![
            vec![
                b("🏃 Jogging", CallbackAction::CheckJogging),
                b("👶 Kids Play", CallbackAction::CheckChildren),
            ],
            vec![
                b("👕 Laundry", CallbackAction::CheckLaundry),
                b("🧺 Picnic", CallbackAction::CheckPicnic),
            ],
            vec![
                b("🌧️ Rain", CallbackAction::CheckRain),
                b("🌫️ Haze", CallbackAction::CheckHaze),
            ],
            vec![
                b("🔄 Refresh", CallbackAction::RefreshWeather),
                b("📊 Full Analysis", CallbackAction::FullAnalysis),
            ],
        ],
    }
}

/// Rendered value of one fact, with unit. `None` when absent.
#[must_use]
pub fn fact_value(facts: &FactSet, metric: Metric) -> Option<String> {
    if let Some(value) = facts.number(metric) {
        let rendered = with_unit(metric, value);
        return Some(if metric == Metric::Psi {
            format!("{rendered} ({})", PsiBand::from_psi(value).label())
        } else {
            rendered
        });
    }
    facts.text(metric).map(str::to_string)
}

/// Prefix lines with tree bullets.
fn tree(lines: &[String]) -> String {
    let last = lines.len().saturating_sub(1);
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let bullet = if i == last { "└─" } else { "├─" };
            format!("{bullet} {line}\n")
        })
        .collect()
}

fn section(out: &mut String, heading: &str, lines: &[String]) {
    out.push_str(&format!("*{heading}*\n"));
    if lines.is_empty() {
        out.push_str("└─ No data available\n");
    } else {
        out.push_str(&tree(lines));
    }
    out.push('\n');
}

fn metric_lines(facts: &FactSet, metrics: &[Metric]) -> Vec<String> {
    metrics
        .iter()
        .filter_map(|m| fact_value(facts, *m).map(|v| format!("{}: {v}", m.label())))
        .collect()
}

fn header(out: &mut String, title: &str, facts: &FactSet) {
    out.push_str(&format!("*{title}*\n"));
    if let Some(ts) = &facts.observed_at {
        out.push_str(&format!("_Updated {ts}_\n"));
    }
    out.push('\n');
}

/// Footer naming the feeds that contributed.
#[must_use]
pub fn attribution_footer(facts: &FactSet) -> String {
    if facts.sources.is_empty() {
        return "📡 _No live data available right now_".to_string();
    }
    let names: Vec<&str> = facts
        .sources
        .iter()
        .map(|k| k.descriptor().attribution)
        .collect();
    format!("📡 _Data: data.gov.sg ({})_", names.join(", "))
}

/// Short verdict phrase for an assessment.
#[must_use]
pub fn verdict(assessment: &Assessment) -> String {
    let risk = assessment.risk.unwrap_or(RiskLevel::Low);
    match assessment.kind {
        CheckKind::Jogging if assessment.safe => "✅ Good time for a jog".to_string(),
        CheckKind::Jogging => "❌ Better skip the jog for now".to_string(),
        CheckKind::ChildPlay if assessment.safe => "✅ Safe for outdoor play".to_string(),
        CheckKind::ChildPlay => "❌ Keep the kids indoors for now".to_string(),
        CheckKind::Laundry if assessment.safe => "✅ Good time to dry laundry".to_string(),
        CheckKind::Laundry => "❌ Not a good time to hang laundry".to_string(),
        CheckKind::Picnic if assessment.safe => "✅ Great for a picnic".to_string(),
        CheckKind::Picnic => format!("⚠️ Picnic not advised ({risk} risk)"),
        CheckKind::RainPrediction => format!(
            "🌧️ Rain {} ({}/3 signals)",
            assessment.likelihood().unwrap_or("Unlikely").to_lowercase(),
            assessment.rain_signal.unwrap_or(0)
        ),
        CheckKind::HazeRisk => match assessment.risk {
            Some(level) if assessment.safe => format!("✅ Haze risk {level}"),
            Some(level) => format!("⚠️ Haze risk {level}"),
            None => "❔ Haze risk unknown (no PSI reading)".to_string(),
        },
    }
}

fn safety_lines(facts: &FactSet) -> Vec<String> {
    CheckKind::ALL
        .iter()
        .map(|kind| {
            let assessment = kind.assess(facts);
            format!("{}: {}", kind.title(), verdict(&assessment))
        })
        .collect()
}

/// Full dashboard: every section plus the safety summary and buttons.
#[must_use]
pub fn dashboard_card(facts: &FactSet) -> DisplayCard {
    let mut text = String::new();
    header(&mut text, "🌤️ Singapore Weather Dashboard", facts);
    section(&mut text, "🌡️ Environmental Conditions", &metric_lines(facts, &ENVIRONMENT));
    section(&mut text, "🌫️ Air Quality", &metric_lines(facts, &AIR_QUALITY));
    section(&mut text, "🔮 Forecast", &metric_lines(facts, &FORECAST));
    if let Some(traffic) = &facts.traffic_summary {
        section(&mut text, "🚦 Traffic", &[traffic.clone()]);
    }
    section(&mut text, "🛡️ Safety Summary", &safety_lines(facts));
    text.push_str(&attribution_footer(facts));

    DisplayCard {
        text,
        keyboard: Some(dashboard_keyboard()),
    }
}

/// Card for one assessment.
#[must_use]
pub fn assessment_card(assessment: &Assessment, facts: &FactSet) -> DisplayCard {
    let mut text = String::new();
    header(&mut text, assessment.kind.title(), facts);
    text.push_str(&format!("*{}*\n\n", verdict(assessment)));

    if !assessment.reasons.is_empty() {
        let heading = if assessment.safe { "Notes" } else { "Reasons" };
        section(&mut text, heading, &assessment.reasons);
    }
    section(
        &mut text,
        "Conditions",
        &metric_lines(&assessment.inputs, assessment.kind.inputs()),
    );
    text.push_str(&attribution_footer(facts));

    DisplayCard {
        text,
        keyboard: None,
    }
}

/// Every assessment on one card.
#[must_use]
pub fn full_analysis_card(facts: &FactSet) -> DisplayCard {
    let mut text = String::new();
    header(&mut text, "📊 Full Weather Analysis", facts);
    section(&mut text, "🌡️ Environmental Conditions", &metric_lines(facts, &ENVIRONMENT));
    section(&mut text, "🌫️ Air Quality", &metric_lines(facts, &AIR_QUALITY));
    section(&mut text, "🔮 Forecast", &metric_lines(facts, &FORECAST));

    for kind in CheckKind::ALL {
        let assessment = kind.assess(facts);
        let mut lines = vec![verdict(&assessment)];
        lines.extend(assessment.reasons.iter().cloned());
        section(&mut text, kind.title(), &lines);
    }
    text.push_str(&attribution_footer(facts));

    DisplayCard {
        text,
        keyboard: Some(dashboard_keyboard()),
    }
}
