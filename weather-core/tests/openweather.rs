use std::time::Duration;

use weather_core::{
    Config, WeatherError, WeatherProvider, WeatherRequest,
    provider::openweather::{OpenWeatherProvider, OpenWeatherSettings},
    provider_from_config,
    report::render,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

const WEATHER_PATH: &str = "/data/2.5/weather";

fn provider(server: &MockServer, timeout: Duration) -> OpenWeatherProvider {
    OpenWeatherProvider::new(OpenWeatherSettings {
        api_key: "TEST_KEY".into(),
        base_url: format!("{}{WEATHER_PATH}", server.uri()),
        timeout,
        retries: 1,
    })
    .expect("client should build")
}

fn london_body() -> serde_json::Value {
    serde_json::json!({
        "main": {"temp": 288.15, "humidity": 72},
        "weather": [{"description": "clear sky"}],
        "wind": {"speed": 4.1}
    })
}

#[tokio::test]
async fn prints_report_for_mocked_london() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(WEATHER_PATH))
        .and(query_param("q", "london"))
        .and(query_param("appid", "TEST_KEY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(london_body()))
        .expect(1)
        .mount(&server)
        .await;

    let report = provider(&server, Duration::from_secs(5))
        .current_weather(&WeatherRequest::new("london"))
        .await
        .expect("lookup should succeed");

    let text = render(&report, "14 Oct 2026 | 03:04:05 PM");
    assert!(text.contains("Weather Stats for - LONDON  || 14 Oct 2026 | 03:04:05 PM"));
    assert!(text.contains("Current temperature is: 15.00 deg C"));
    assert!(text.contains("Current weather desc  : clear sky"));
    assert!(text.contains("Current Humidity      : 72 %"));
    assert!(text.contains("Current wind speed    : 4.1 kmph"));
}

#[tokio::test]
async fn location_with_spaces_is_encoded_in_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(WEATHER_PATH))
        .and(query_param("q", "New York"))
        .respond_with(ResponseTemplate::new(200).set_body_json(london_body()))
        .expect(1)
        .mount(&server)
        .await;

    let report = provider(&server, Duration::from_secs(5))
        .current_weather(&WeatherRequest::new("New York"))
        .await
        .expect("lookup should succeed");

    assert_eq!(report.location, "New York");
}

#[tokio::test]
async fn unknown_city_surfaces_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(WEATHER_PATH))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_string(r#"{"cod":"404","message":"city not found"}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = provider(&server, Duration::from_secs(5))
        .current_weather(&WeatherRequest::new("atlantis"))
        .await
        .unwrap_err();

    match err {
        WeatherError::HttpStatus { status, body } => {
            assert_eq!(status.as_u16(), 404);
            assert!(body.contains("city not found"));
        }
        other => panic!("expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn invalid_key_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid API key"))
        .expect(1)
        .mount(&server)
        .await;

    let err = provider(&server, Duration::from_secs(5))
        .current_weather(&WeatherRequest::new("london"))
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherError::HttpStatus { .. }));
}

#[tokio::test]
async fn missing_weather_list_fails_lookup() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "main": {"temp": 288.15, "humidity": 72},
            "wind": {"speed": 4.1}
        })))
        .mount(&server)
        .await;

    let err = provider(&server, Duration::from_secs(5))
        .current_weather(&WeatherRequest::new("london"))
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherError::MissingField("weather")));
}

#[tokio::test]
async fn timeout_is_retried_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(london_body())
                .set_delay(Duration::from_secs(2)),
        )
        .expect(2)
        .mount(&server)
        .await;

    let err = provider(&server, Duration::from_millis(200))
        .current_weather(&WeatherRequest::new("london"))
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherError::Timeout(_)));
    assert!(!format!("{:#}", anyhow::Error::new(err)).contains("TEST_KEY"));
}

#[tokio::test]
async fn empty_location_sends_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(london_body()))
        .expect(0)
        .mount(&server)
        .await;

    let err = provider(&server, Duration::from_secs(5))
        .current_weather(&WeatherRequest::new("  "))
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherError::EmptyLocation));
}

#[tokio::test]
async fn provider_from_config_uses_configured_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(WEATHER_PATH))
        .and(query_param("appid", "CFG_KEY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(london_body()))
        .expect(1)
        .mount(&server)
        .await;

    let mut cfg = Config::default();
    cfg.set_api_key("CFG_KEY".into());
    cfg.openweather.base_url = Some(format!("{}{WEATHER_PATH}", server.uri()));

    let provider = provider_from_config(&cfg).expect("provider should build");
    let report = provider
        .current_weather(&WeatherRequest::new("london"))
        .await
        .expect("lookup should succeed");

    assert_eq!(report.humidity, 72);
}

#[tokio::test]
async fn whole_number_wind_speed_survives_to_report() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"main": {"temp": 288.15, "humidity": 72}, "weather": [{"description": "clear sky"}], "wind": {"speed": 4.0}}"#,
        ))
        .mount(&server)
        .await;

    let report = provider(&server, Duration::from_secs(5))
        .current_weather(&WeatherRequest::new("london"))
        .await
        .expect("lookup should succeed");

    let text = render(&report, "ts");
    assert!(text.contains("Current wind speed    : 4.0 kmph"));
}

#[tokio::test]
async fn connection_error_does_not_leak_api_key() {
    let provider = OpenWeatherProvider::new(OpenWeatherSettings {
        api_key: "SECRET_KEY".into(),
        base_url: "http://127.0.0.1:1/data/2.5/weather".into(),
        timeout: Duration::from_secs(5),
        retries: 0,
    })
    .expect("client should build");

    let err = provider
        .current_weather(&WeatherRequest::new("london"))
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherError::Network(_) | WeatherError::Timeout(_)));

    let rendered = format!("{:#}", anyhow::Error::new(err));
    assert!(!rendered.contains("appid="), "{rendered}");
    assert!(!rendered.contains("SECRET_KEY"), "{rendered}");
}
