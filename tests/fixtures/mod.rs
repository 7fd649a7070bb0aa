//! Local stand-ins for the upstream feeds.

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use weather_uncle::analysis::Aggregator;
use weather_uncle::config::FeedsConfig;
use weather_uncle::feeds::FeedKind;

pub const CAMERA_COUNT: usize = 50;

fn stations(values: &[f64]) -> Value {
    let ids: Vec<String> = (0..values.len()).map(|i| format!("S{}", 100 + i)).collect();
    json!({
        "metadata": {"stations": ids.iter().enumerate().map(|(i, id)| {
            json!({"id": id, "name": format!("Station {i}")})
        }).collect::<Vec<_>>()},
        "items": [{
            "timestamp": "2026-10-18T14:00:00+08:00",
            "readings": ids.iter().zip(values).map(|(id, v)| {
                json!({"station_id": id, "value": v})
            }).collect::<Vec<_>>()
        }]
    })
}

fn cameras(count: usize) -> Value {
    json!({"items": [{
        "timestamp": "2026-10-18T14:00:00+08:00",
        "cameras": (0..count).map(|i| json!({
            "camera_id": format!("{}", 1001 + i),
            "image": format!("https://images.example/{i}.jpg"),
            "timestamp": "2026-10-18T13:59:30+08:00",
            "location": {"latitude": 1.29_f64 + i as f64 * 0.001, "longitude": 103.85}
        })).collect::<Vec<_>>()
    }]})
}

/// A healthy payload for each feed.
pub fn payload(kind: FeedKind) -> Value {
    match kind {
        FeedKind::TwoHourForecast => json!({"code": 0, "data": {"items": [{
            "timestamp": "2026-10-18T14:00:00+08:00",
            "forecasts": [
                {"area": "Ang Mo Kio", "forecast": "Partly Cloudy (Day)"},
                {"area": "Bedok", "forecast": "Fair (Day)"},
                {"area": "City", "forecast": "Fair (Day)"},
                {"area": "Tuas", "forecast": "Cloudy"}
            ]
        }]}}),
        FeedKind::DayForecast => json!({"items": [{
            "timestamp": "2026-10-18T06:00:00+08:00",
            "general": {
                "forecast": "Partly Cloudy",
                "temperature": {"low": 25, "high": 33},
                "relative_humidity": {"low": 60, "high": 90}
            }
        }]}),
        FeedKind::FourDayOutlook => json!({"items": [{
            "timestamp": "2026-10-18T06:00:00+08:00",
            "forecasts": [
                {"date": "2026-10-19", "forecast": "Fair", "temperature": {"low": 25, "high": 33}},
                {"date": "2026-10-20", "forecast": "Afternoon thundery showers"}
            ]
        }]}),
        FeedKind::Temperature => stations(&[31.2, 29.8]),
        FeedKind::Humidity => stations(&[70.0, 78.0]),
        FeedKind::WindSpeed => stations(&[4.5, 7.2]),
        FeedKind::WindDirection => stations(&[40.0, 120.0]),
        FeedKind::Rainfall => stations(&[0.0, 0.0]),
        FeedKind::Psi => json!({"items": [{
            "timestamp": "2026-10-18T14:00:00+08:00",
            "readings": {"psi_twenty_four_hourly": {"national": 45, "west": 42, "east": 45}}
        }]}),
        FeedKind::Pm25 => json!({"items": [{
            "timestamp": "2026-10-18T14:00:00+08:00",
            "readings": {"pm25_one_hourly": {"national": 12, "west": 9, "east": 12}}
        }]}),
        FeedKind::UvIndex => json!({"items": [{
            "timestamp": "2026-10-18T14:00:00+08:00",
            "index": [{"value": 5, "timestamp": "2026-10-18T14:00:00+08:00"}]
        }]}),
        FeedKind::TrafficCameras => cameras(CAMERA_COUNT),
    }
}

/// Router serving every feed; feeds in `failing` answer HTTP 500.
pub fn feed_router(failing: &[FeedKind]) -> Router {
    FeedKind::ALL.iter().fold(Router::new(), |router, kind| {
        let path = kind.descriptor().path;
        if failing.contains(kind) {
            router.route(
                path,
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream down") }),
            )
        } else {
            let body = payload(*kind);
            router.route(
                path,
                get(move || {
                    let body = body.clone();
                    async move { Json(body) }
                }),
            )
        }
    })
}

/// Bind a router to an ephemeral local port and return its base URL.
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fixture server");
    let addr = listener.local_addr().expect("Failed to read local address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });
    format!("http://{addr}")
}

/// Aggregator pointed at a fixture server.
pub async fn aggregator(failing: &[FeedKind]) -> Aggregator {
    let base = serve(feed_router(failing)).await;
    Aggregator::new(FeedsConfig::with_base_url(base)).expect("Failed to build aggregator")
}
