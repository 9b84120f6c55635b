use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};

/// Main measurement block shared by current conditions and forecast samples.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Measurements {
    #[serde(deserialize_with = "lenient")]
    pub temp: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub feels_like: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub temp_min: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub temp_max: Option<f64>,
    /// hPa
    #[serde(deserialize_with = "lenient")]
    pub pressure: Option<f64>,
    /// Percent.
    #[serde(deserialize_with = "lenient")]
    pub humidity: Option<f64>,
}

/// One entry of the upstream `weather` array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Classification {
    #[serde(deserialize_with = "lenient")]
    pub id: Option<u16>,
    #[serde(deserialize_with = "lenient")]
    pub main: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub description: String,
    /// Icon code such as `10d`.
    #[serde(deserialize_with = "lenient")]
    pub icon: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wind {
    /// m/s with metric units.
    #[serde(deserialize_with = "lenient")]
    pub speed: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub deg: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SunCycle {
    #[serde(deserialize_with = "lenient")]
    pub country: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub sunrise: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub sunset: Option<i64>,
}

/// Snapshot returned by the current-conditions endpoint.
///
/// Every field is optional or defaulted: a successful response with a
/// surprising shape still deserialises, and the gaps show up as absent
/// values wherever they are rendered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentConditions {
    #[serde(deserialize_with = "lenient")]
    pub name: String,
    #[serde(deserialize_with = "lenient")]
    pub sys: SunCycle,
    #[serde(deserialize_with = "lenient")]
    pub main: Measurements,
    #[serde(deserialize_with = "lenient")]
    pub weather: Vec<Classification>,
    #[serde(deserialize_with = "lenient")]
    pub wind: Wind,
    /// Metres.
    #[serde(deserialize_with = "lenient")]
    pub visibility: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub dt: Option<i64>,
}

impl CurrentConditions {
    /// First classification, which is the one shown to the user.
    pub fn primary(&self) -> Option<&Classification> {
        self.weather.first()
    }

    /// "Name, CC", or just the name when the country is missing.
    pub fn location_label(&self) -> String {
        match self.sys.country.as_deref() {
            Some(country) if !country.is_empty() => format!("{}, {}", self.name, country),
            _ => self.name.clone(),
        }
    }

    pub fn visibility_km(&self) -> Option<f64> {
        self.visibility.map(|m| m / 1000.0)
    }

    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        self.dt.and_then(unix_to_utc)
    }

    pub fn sunrise(&self) -> Option<DateTime<Utc>> {
        self.sys.sunrise.and_then(unix_to_utc)
    }

    pub fn sunset(&self) -> Option<DateTime<Utc>> {
        self.sys.sunset.and_then(unix_to_utc)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastCity {
    #[serde(deserialize_with = "lenient")]
    pub name: String,
    #[serde(deserialize_with = "lenient")]
    pub country: Option<String>,
}

/// One 3-hour step of the forecast endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastSample {
    #[serde(deserialize_with = "lenient")]
    pub dt: i64,
    #[serde(deserialize_with = "lenient")]
    pub main: Measurements,
    #[serde(deserialize_with = "lenient")]
    pub weather: Vec<Classification>,
    #[serde(deserialize_with = "lenient")]
    pub wind: Wind,
    #[serde(deserialize_with = "lenient")]
    pub visibility: Option<f64>,
    /// Probability of precipitation, 0.0..=1.0.
    #[serde(deserialize_with = "lenient")]
    pub pop: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub dt_txt: Option<String>,
}

impl ForecastSample {
    pub fn primary(&self) -> Option<&Classification> {
        self.weather.first()
    }

    pub fn time(&self) -> Option<DateTime<Utc>> {
        unix_to_utc(self.dt)
    }
}

/// Forecast samples in the chronological order the upstream returned them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastSeries {
    #[serde(deserialize_with = "lenient")]
    pub city: ForecastCity,
    #[serde(deserialize_with = "lenient")]
    pub cnt: Option<u32>,
    #[serde(deserialize_with = "lenient")]
    pub list: Vec<ForecastSample>,
}

/// Field deserializer that turns `null` or a value of the wrong shape into the default,
/// so one odd field does not reject the whole payload.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

pub(crate) fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}
