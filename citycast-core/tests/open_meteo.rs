//! Lookups against a mocked Open-Meteo, using wiremock.

use citycast_core::{
    Description, Error, GeocodeResolver, OpenMeteoForecast, OpenMeteoGeocoder, WeatherFetcher,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn geocoder(server: &MockServer) -> OpenMeteoGeocoder {
    OpenMeteoGeocoder::new(reqwest::Client::new(), format!("{}/v1/search", server.uri()))
}

fn forecast(server: &MockServer) -> OpenMeteoForecast {
    OpenMeteoForecast::new(reqwest::Client::new(), format!("{}/v1/forecast", server.uri()))
}

fn current_weather(code: i64) -> serde_json::Value {
    serde_json::json!({
        "latitude": 48.86,
        "longitude": 2.34,
        "current_weather": {
            "temperature": 11.2,
            "windspeed": 7.9,
            "winddirection": 240,
            "weathercode": code,
            "time": "2026-10-19T09:00"
        }
    })
}

#[tokio::test]
async fn resolve_sends_name_and_count() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "São Paulo"))
        .and(query_param("count", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [
                { "name": "São Paulo", "latitude": -23.5475, "longitude": -46.63611 }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let coords = geocoder(&server).resolve("São Paulo").await.unwrap();

    assert_eq!(coords.latitude, -23.5475);
    assert_eq!(coords.longitude, -46.63611);
}

#[tokio::test]
async fn resolve_without_results_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": []
        })))
        .mount(&server)
        .await;

    let err = geocoder(&server).resolve("Atlantis").await.unwrap_err();
    assert!(matches!(err, Error::NotFound { ref city } if city == "Atlantis"));
}

#[tokio::test]
async fn resolve_server_error_is_network_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let err = geocoder(&server).resolve("Paris").await.unwrap_err();
    assert!(err.is_network());
    assert!(err.to_string().contains("upstream exploded"));
}

#[tokio::test]
async fn unreachable_endpoint_is_network_error() {
    // Nothing listens on port 1.
    let err = OpenMeteoGeocoder::new(reqwest::Client::new(), "http://127.0.0.1:1/v1/search")
        .resolve("Paris")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Transport { .. }));
}

#[tokio::test]
async fn fetch_sends_coordinates_and_current_flag() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "48.85"))
        .and(query_param("longitude", "2.35"))
        .and(query_param("current_weather", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_weather(0)))
        .expect(1)
        .mount(&server)
        .await;

    let conditions = forecast(&server).fetch(48.85, 2.35).await.unwrap();

    assert_eq!(conditions.temp, 11.2);
    assert_eq!(conditions.wind, 7.9);
    assert_eq!(conditions.description, Description::Clear);
}

#[tokio::test]
async fn any_non_zero_code_is_cloudy() {
    for code in [3, 61, 95] {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(current_weather(code)))
            .mount(&server)
            .await;

        let conditions = forecast(&server).fetch(1.0, 2.0).await.unwrap();
        assert_eq!(conditions.description, Description::Cloudy, "code {code}");
    }
}

#[tokio::test]
async fn fetch_server_error_is_network_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = forecast(&server).fetch(1.0, 2.0).await.unwrap_err();
    assert!(matches!(err, Error::Status { status, .. } if status.as_u16() == 503));
}

#[tokio::test]
async fn fetch_unexpected_body_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "hourly": {}
        })))
        .mount(&server)
        .await;

    let err = forecast(&server).fetch(1.0, 2.0).await.unwrap_err();
    assert!(matches!(err, Error::Decode { endpoint: "forecast", .. }));
}
