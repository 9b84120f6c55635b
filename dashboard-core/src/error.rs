use thiserror::Error;

/// Failures of a single upstream fetch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherError {
    #[error("Invalid API key. Please check your OpenWeatherMap API key.")]
    InvalidCredential,

    #[error("City not found. Please check the city name and try again.")]
    LocationNotFound,

    #[error("Weather service error: {0}")]
    UpstreamError(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    #[error("API key must not be empty")]
    Empty,
}
