//! Assessments over fetched facts.

use serde_json::json;
use weather_uncle::analysis::{CheckKind, FactSet, RiskLevel};
use weather_uncle::feeds::{parse_feed, FeedKind, SourceResult};

use crate::fixtures::aggregator;

#[tokio::test]
async fn test_pleasant_afternoon_is_safe_for_everything() {
    let facts = aggregator(&[]).await.gather_all().await.facts;
    for kind in CheckKind::ALL {
        let assessment = kind.assess(&facts);
        assert!(assessment.safe, "{kind:?}: {:?}", assessment.reasons);
    }
    assert_eq!(
        CheckKind::HazeRisk.assess(&facts).risk,
        Some(RiskLevel::Low)
    );
    assert_eq!(
        CheckKind::RainPrediction.assess(&facts).likelihood(),
        Some("Unlikely")
    );
}

#[tokio::test]
async fn test_missing_psi_is_not_treated_as_clean_air_reading() {
    let facts = aggregator(&[FeedKind::Psi]).await.gather_all().await.facts;
    let haze = CheckKind::HazeRisk.assess(&facts);
    assert_eq!(haze.risk, None);
    assert!(haze.inputs.psi.is_none());

    let jogging = CheckKind::Jogging.assess(&facts);
    assert!(jogging.safe);
    assert!(jogging.inputs.psi.is_none());
}

#[tokio::test]
async fn test_assessment_inputs_are_a_subset() {
    let facts = aggregator(&[]).await.gather_all().await.facts;
    let laundry = CheckKind::Laundry.assess(&facts);
    assert_eq!(laundry.inputs.humidity, Some(78.0));
    assert_eq!(laundry.inputs.uv_index, None);
    assert_eq!(laundry.inputs.psi, None);
}

#[test]
fn test_rain_outside_sampled_areas_still_counts() {
    let areas = [
        ("Ang Mo Kio", "Fair (Day)"),
        ("Bedok", "Fair (Day)"),
        ("City", "Partly Cloudy (Day)"),
        ("Jurong West", "Fair (Day)"),
        ("Woodlands", "Fair (Day)"),
        ("Tuas", "Fair (Day)"),
        ("Yishun", "Fair (Day)"),
        ("Pasir Ris", "Fair (Day)"),
        ("Sembawang", "Thundery Showers"),
    ];
    let forecasts: Vec<_> = areas
        .iter()
        .map(|(area, forecast)| json!({"area": area, "forecast": forecast}))
        .collect();
    let payload = json!({"code": 0, "data": {"items": [{
        "timestamp": "2026-10-18T14:00:00+08:00",
        "forecasts": forecasts
    }]}});

    let data = parse_feed(FeedKind::TwoHourForecast.descriptor(), &payload, 8).unwrap();
    let facts = FactSet::from_results(&[SourceResult::Success(data)]);
    assert!(!facts.forecast_2h.as_deref().unwrap().contains("Sembawang"));
    assert_eq!(facts.forecast_2h_rain_areas, Some(1));

    let laundry = CheckKind::Laundry.assess(&facts);
    assert!(!laundry.safe);
    assert_eq!(laundry.reasons, vec!["Rain expected in the next 2 hours"]);

    let rain = CheckKind::RainPrediction.assess(&facts);
    assert_eq!(rain.rain_signal, Some(1));
    assert_eq!(rain.likelihood(), Some("Possible"));
    assert!(!CheckKind::Picnic.assess(&facts).safe);
}
