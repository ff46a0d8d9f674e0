//! End-to-end dashboard tests against a mocked OpenWeatherMap.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, TimeZone};
use skyglass_core::{AppError, WeatherError};
use skyglass_dashboard::render::render_report;
use skyglass_dashboard::{
    request_fetch, ApplyOutcome, DashboardMessage, DashboardState, DisplayPreferences,
    FetchContext, ForecastView,
};
use skyglass_weather::background::{BackgroundCategory, TimeOfDay};
use skyglass_weather::{CityQuery, FixedClock, WeatherProvider};
use tokio::sync::mpsc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn current_body(name: &str, lat: f64) -> serde_json::Value {
    serde_json::json!({
        "coord": { "lon": 2.35, "lat": lat },
        "weather": [{ "id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d" }],
        "main": { "temp": 14.2, "humidity": 72 },
        "wind": { "speed": 3.1 },
        "sys": { "sunrise": 1792390000, "sunset": 1792429000 },
        "name": name
    })
}

fn forecast_body() -> serde_json::Value {
    // Three samples a day apart, so any viewer timezone sees three days.
    serde_json::json!({
        "cod": "200",
        "list": [
            { "dt": 1792400400, "main": { "temp": 15.0 }, "weather": [{ "icon": "04d" }] },
            { "dt": 1792486800, "main": { "temp": 17.0 }, "weather": [{ "icon": "10d" }] },
            { "dt": 1792573200, "main": { "temp": 12.0 }, "weather": [{ "icon": "01d" }] }
        ]
    })
}

fn air_body() -> serde_json::Value {
    serde_json::json!({
        "list": [{ "main": { "aqi": 3 }, "components": { "pm2_5": 21.4, "o3": 60.1 } }]
    })
}

async fn mount_location_endpoints(server: &MockServer, forecast: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(forecast)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/air_pollution"))
        .respond_with(ResponseTemplate::new(200).set_body_json(air_body()))
        .mount(server)
        .await;
}

fn context(server: &MockServer) -> FetchContext {
    let provider = WeatherProvider::new("test-key", None)
        .unwrap()
        .with_base_url(server.uri());
    let now = Local.timestamp_opt(1792400000, 0).unwrap();
    FetchContext::new(Arc::new(provider), Arc::new(FixedClock(now)), 1440)
}

#[tokio::test]
async fn test_full_report_is_applied_and_rendered() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "Paris,FR"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body("Paris", 48.85)))
        .mount(&server)
        .await;
    mount_location_endpoints(
        &server,
        ResponseTemplate::new(200).set_body_json(forecast_body()),
    )
    .await;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut state = DashboardState::new();
    let city = CityQuery::resolve("Paris");
    let token = state.begin_request(city.clone());

    request_fetch(
        &tx,
        &tokio::runtime::Handle::current(),
        context(&server),
        city,
        token,
    );

    let message = rx.recv().await.unwrap();
    assert_eq!(state.apply(message), ApplyOutcome::Updated);

    let report = state.report().unwrap();
    assert_eq!(report.current.city_name, "Paris");
    assert_eq!(report.air_quality.as_ref().map(|a| a.aqi), Some(3));
    assert!(matches!(report.forecast, ForecastView::Days(ref d) if d.len() == 3));
    assert_eq!(report.background.category, BackgroundCategory::Clouds);
    assert_eq!(report.background.time_of_day, TimeOfDay::Day);
    assert!(report.background.url.starts_with("https://source.unsplash.com/1440x900/?"));

    let text = render_report(report, &DisplayPreferences::default(), &report.fetched_at);
    assert!(text.contains("Weather in Paris"));
    assert!(text.contains("Air Quality: Moderate (AQI 3)"));
    assert!(text.contains("DAY"));
    assert!(text.contains("NIGHT"));
}

#[tokio::test]
async fn test_background_uses_reported_condition_group() {
    let server = MockServer::start().await;

    let mut body = current_body("Delhi", 28.61);
    body["weather"][0]["main"] = serde_json::json!("Smoke");
    body["weather"][0]["description"] = serde_json::json!("smoke");
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;
    mount_location_endpoints(
        &server,
        ResponseTemplate::new(200).set_body_json(forecast_body()),
    )
    .await;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut state = DashboardState::new();
    let city = CityQuery::resolve("Delhi");
    let token = state.begin_request(city.clone());
    request_fetch(
        &tx,
        &tokio::runtime::Handle::current(),
        context(&server),
        city,
        token,
    );

    assert_eq!(state.apply(rx.recv().await.unwrap()), ApplyOutcome::Updated);
    let report = state.report().unwrap();
    assert_eq!(report.current.condition_main, "Smoke");
    assert_eq!(report.background.category, BackgroundCategory::Default);
}

#[tokio::test]
async fn test_malformed_forecast_shows_placeholder() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body("Paris", 48.85)))
        .mount(&server)
        .await;
    mount_location_endpoints(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({ "cod": "200" })),
    )
    .await;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut state = DashboardState::new();
    let city = CityQuery::resolve("Paris");
    let token = state.begin_request(city.clone());
    request_fetch(
        &tx,
        &tokio::runtime::Handle::current(),
        context(&server),
        city,
        token,
    );

    state.apply(rx.recv().await.unwrap());

    let forecast = &state.report().unwrap().forecast;
    assert!(forecast.is_placeholder());
    assert_eq!(forecast.days().len(), 7);
}

#[tokio::test]
async fn test_forecast_outage_keeps_current_conditions() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body("Paris", 48.85)))
        .mount(&server)
        .await;
    mount_location_endpoints(&server, ResponseTemplate::new(503)).await;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut state = DashboardState::new();
    let city = CityQuery::resolve("Paris");
    let token = state.begin_request(city.clone());
    request_fetch(
        &tx,
        &tokio::runtime::Handle::current(),
        context(&server),
        city,
        token,
    );

    assert_eq!(state.apply(rx.recv().await.unwrap()), ApplyOutcome::Updated);
    assert!(matches!(
        state.report().unwrap().forecast,
        ForecastView::Unavailable(_)
    ));
}

#[tokio::test]
async fn test_unknown_city_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut state = DashboardState::new();
    let city = CityQuery::resolve("Atlantis");
    let token = state.begin_request(city.clone());
    request_fetch(
        &tx,
        &tokio::runtime::Handle::current(),
        context(&server),
        city,
        token,
    );

    assert_eq!(state.apply(rx.recv().await.unwrap()), ApplyOutcome::Failed);
    assert!(matches!(
        state.last_error(),
        Some(AppError::Weather(WeatherError::LocationNotFound(c))) if c == "Atlantis"
    ));
    assert!(state.report().is_none());
}

#[tokio::test]
async fn test_slow_older_response_does_not_overwrite_newer() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "Paris,FR"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(current_body("Paris", 48.85))
                .set_delay(Duration::from_millis(400)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "Tokyo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body("Tokyo", 35.68)))
        .mount(&server)
        .await;
    mount_location_endpoints(
        &server,
        ResponseTemplate::new(200).set_body_json(forecast_body()),
    )
    .await;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut state = DashboardState::new();
    let runtime = tokio::runtime::Handle::current();
    let ctx = context(&server);

    let paris = CityQuery::resolve("Paris");
    let first = state.begin_request(paris.clone());
    request_fetch(&tx, &runtime, ctx.clone(), paris, first);

    let tokyo = CityQuery::resolve("Tokyo");
    let second = state.begin_request(tokyo.clone());
    request_fetch(&tx, &runtime, ctx, tokyo, second);

    let mut outcomes = Vec::new();
    for _ in 0..2 {
        let message = rx.recv().await.unwrap();
        let DashboardMessage::FetchDone { token, .. } = &message;
        let token = *token;
        outcomes.push((token, state.apply(message)));
    }

    assert!(outcomes.contains(&(first, ApplyOutcome::Stale)));
    assert!(outcomes.contains(&(second, ApplyOutcome::Updated)));
    assert_eq!(state.report().unwrap().current.city_name, "Tokyo");
}
