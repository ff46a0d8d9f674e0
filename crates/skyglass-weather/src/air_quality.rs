use serde::{Deserialize, Serialize};

/// OpenWeatherMap air quality index bands (1-5 scale)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AqiLevel {
    Good,
    Fair,
    Moderate,
    Poor,
    VeryPoor,
    Unknown,
}

impl AqiLevel {
    pub fn from_index(aqi: u8) -> Self {
        match aqi {
            1 => Self::Good,
            2 => Self::Fair,
            3 => Self::Moderate,
            4 => Self::Poor,
            5 => Self::VeryPoor,
            _ => Self::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Moderate => "Moderate",
            Self::Poor => "Poor",
            Self::VeryPoor => "Very Poor",
            Self::Unknown => "Unknown",
        }
    }

    /// Health guidance shown next to the label
    pub fn advice(&self) -> &'static str {
        match self {
            Self::Good => "Air quality is good",
            Self::Fair => "Satisfactory",
            Self::Moderate => "Unhealthy for sensitive groups",
            Self::Poor => "Unhealthy",
            Self::VeryPoor => "Very unhealthy",
            Self::Unknown => "Not available",
        }
    }
}
