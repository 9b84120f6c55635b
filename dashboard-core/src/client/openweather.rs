use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::{
    config::Config,
    credential::Credential,
    error::WeatherError,
    model::{CurrentConditions, ForecastSeries},
};

use super::WeatherClient;

/// OpenWeatherMap 2.5 client. No retries, caching or timeouts.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    base_url: String,
    units: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(base_url: impl Into<String>, units: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            units: units.into(),
            http: Client::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.base_url.clone(), config.units.clone())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        city: &str,
        credential: &Credential,
    ) -> Result<T, WeatherError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        tracing::debug!(%endpoint, %city, "Fetching from OpenWeather");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", credential.expose()),
                ("units", self.units.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                WeatherError::UpstreamError(format!("request to {endpoint} failed: {e}"))
            })?;

        let status = res.status();
        if !status.is_success() {
            return Err(status_error(status));
        }

        let body = res.text().await.map_err(|e| {
            WeatherError::UpstreamError(format!("failed to read {endpoint} response: {e}"))
        })?;

        serde_json::from_str(&body).map_err(|e| {
            WeatherError::UpstreamError(format!(
                "malformed {endpoint} response ({e}): {}",
                truncate_body(&body)
            ))
        })
    }
}

#[async_trait]
impl WeatherClient for OpenWeatherClient {
    async fn fetch_current(
        &self,
        city: &str,
        credential: &Credential,
    ) -> Result<CurrentConditions, WeatherError> {
        self.get_json("weather", city, credential).await
    }

    async fn fetch_forecast(
        &self,
        city: &str,
        credential: &Credential,
    ) -> Result<ForecastSeries, WeatherError> {
        self.get_json("forecast", city, credential).await
    }
}

fn status_error(status: StatusCode) -> WeatherError {
    match status {
        StatusCode::UNAUTHORIZED => WeatherError::InvalidCredential,
        StatusCode::NOT_FOUND => WeatherError::LocationNotFound,
        other => WeatherError::UpstreamError(
            other
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| other.as_str().to_string()),
        ),
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    fn key() -> Credential {
        Credential::new("test-key").unwrap()
    }

    fn client_for(server: &MockServer) -> OpenWeatherClient {
        OpenWeatherClient::new(server.uri(), "metric")
    }

    #[tokio::test]
    async fn fetch_current_sends_expected_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("q", "São Paulo"))
            .and(query_param("appid", "test-key"))
            .and(query_param("units", "metric"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "São Paulo",
                "sys": { "country": "BR" },
                "main": { "temp": 24.0 }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let current = client_for(&server).fetch_current("São Paulo", &key()).await.unwrap();

        assert_eq!(current.location_label(), "São Paulo, BR");
        assert_eq!(current.main.temp, Some(24.0));
    }

    #[tokio::test]
    async fn fetch_forecast_parses_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .and(query_param("q", "Oslo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "city": { "name": "Oslo", "country": "NO" },
                "list": [{ "dt": 1 }, { "dt": 2 }, { "dt": 3 }]
            })))
            .mount(&server)
            .await;

        let series = client_for(&server).fetch_forecast("Oslo", &key()).await.unwrap();

        assert_eq!(series.list.iter().map(|s| s.dt).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn unauthorized_maps_to_invalid_credential_for_both_endpoints() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "cod": 401 })))
            .mount(&server)
            .await;
        let client = client_for(&server);

        for city in ["London", "Tokyo", "nowhere-at-all"] {
            assert_eq!(
                client.fetch_current(city, &key()).await.unwrap_err(),
                WeatherError::InvalidCredential
            );
            assert_eq!(
                client.fetch_forecast(city, &key()).await.unwrap_err(),
                WeatherError::InvalidCredential
            );
        }
    }

    #[tokio::test]
    async fn not_found_maps_to_location_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_current("Atlantis", &key()).await.unwrap_err();
        assert_eq!(err, WeatherError::LocationNotFound);
    }

    #[tokio::test]
    async fn other_status_carries_status_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_forecast("London", &key()).await.unwrap_err();
        assert_eq!(err, WeatherError::UpstreamError("Service Unavailable".into()));
    }

    #[tokio::test]
    async fn non_json_body_is_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_current("London", &key()).await.unwrap_err();
        assert!(
            matches!(err, WeatherError::UpstreamError(msg) if msg.contains("malformed weather"))
        );
    }

    #[tokio::test]
    async fn null_fields_in_success_body_come_through_absent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": null,
                "weather": null,
                "main": { "temp": 3.5, "humidity": 81.5 }
            })))
            .mount(&server)
            .await;

        let current = client_for(&server).fetch_current("London", &key()).await.unwrap();

        assert_eq!(current.name, "");
        assert!(current.primary().is_none());
        assert_eq!(current.main.temp, Some(3.5));
        assert_eq!(current.main.humidity, Some(81.5));
    }

    #[tokio::test]
    async fn transport_failure_is_upstream_error() {
        // Nothing listens on port 9 of localhost.
        let client = OpenWeatherClient::new("http://127.0.0.1:9", "metric");

        let err = client.fetch_current("London", &key()).await.unwrap_err();
        assert!(matches!(err, WeatherError::UpstreamError(_)));
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "é".repeat(300);
        let out = truncate_body(&long);

        assert!(out.ends_with("..."));
        assert_eq!(out.chars().count(), 203);
        assert_eq!(truncate_body("short"), "short");
    }
}
