use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    credential::Credential,
    error::WeatherError,
    model::{CurrentConditions, ForecastSeries},
};

pub mod openweather;

pub use openweather::OpenWeatherClient;

/// Upstream weather source. The API key is passed on every call rather than held by the client.
#[async_trait]
pub trait WeatherClient: Send + Sync + Debug {
    async fn fetch_current(
        &self,
        city: &str,
        credential: &Credential,
    ) -> Result<CurrentConditions, WeatherError>;

    /// 5-day forecast at 3-hour resolution.
    async fn fetch_forecast(
        &self,
        city: &str,
        credential: &Credential,
    ) -> Result<ForecastSeries, WeatherError>;
}
