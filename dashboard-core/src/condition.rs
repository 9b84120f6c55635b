use serde::{Deserialize, Serialize};

/// Display category derived from an upstream icon code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConditionCategory {
    Clear,
    Cloudy,
    Rain,
    Snow,
    #[default]
    Unknown,
}

impl ConditionCategory {
    /// Map an icon code such as `"04n"` to its category.
    ///
    /// Only the two-digit group is significant; the day/night suffix is ignored.
    /// See: https://openweathermap.org/weather-conditions
    pub fn from_icon_code(code: &str) -> Self {
        match code.get(..2) {
            Some("01" | "02") => Self::Clear,
            Some("03" | "04" | "50") => Self::Cloudy,
            Some("09" | "10" | "11") => Self::Rain,
            Some("13") => Self::Snow,
            _ => Self::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::Cloudy => "Cloudy",
            Self::Rain => "Rain",
            Self::Snow => "Snow",
            Self::Unknown => "Unknown",
        }
    }

    /// Single glyph used by terminal renderers.
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Clear => "☀",
            Self::Cloudy => "☁",
            Self::Rain => "☂",
            Self::Snow => "❄",
            Self::Unknown => "?",
        }
    }
}

impl std::fmt::Display for ConditionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
