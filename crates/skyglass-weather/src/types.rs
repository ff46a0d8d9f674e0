use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::air_quality::AqiLevel;
use crate::forecast::ForecastError;

const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// Temperature unit preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
        }
    }
}

/// Weather condition groups as reported in OpenWeatherMap's `weather[].main`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    #[default]
    Clear,
    Clouds,
    Drizzle,
    Rain,
    Snow,
    Thunderstorm,
    Mist,
    Fog,
    Haze,
    Dust,
    Other,
}

impl WeatherCondition {
    /// Map an OpenWeatherMap condition group name to a WeatherCondition
    /// See: https://openweathermap.org/weather-conditions
    pub fn from_owm_main(main: &str) -> Self {
        match main.to_ascii_lowercase().as_str() {
            "clear" => Self::Clear,
            "clouds" => Self::Clouds,
            "drizzle" => Self::Drizzle,
            "rain" => Self::Rain,
            "snow" => Self::Snow,
            "thunderstorm" | "squall" | "tornado" => Self::Thunderstorm,
            "mist" => Self::Mist,
            "fog" => Self::Fog,
            "haze" | "smoke" => Self::Haze,
            "dust" | "sand" | "ash" => Self::Dust,
            _ => Self::Other,
        }
    }
}

/// Geographic location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub city_name: Option<String>,
}

/// Current weather conditions for a resolved city
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub city_name: String,
    pub location: Location,
    pub condition: WeatherCondition,
    /// Upstream condition group (`weather[0].main`), e.g. "Clouds" or "Smoke"
    pub condition_main: String,
    pub description: String,
    pub icon: String,
    /// Degrees Celsius, as reported upstream
    pub temperature: f64,
    pub humidity: u8,
    pub wind_speed: f64,
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
}

impl CurrentConditions {
    pub fn icon_url(&self) -> String {
        format!("{}/{}.png", ICON_BASE_URL, self.icon)
    }
}

/// Air quality reading from the air pollution endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQuality {
    /// OpenWeatherMap index, 1 (good) to 5 (very poor)
    pub aqi: u8,
    /// Pollutant concentrations in μg/m³, keyed by pollutant (co, no2, pm2_5, ...)
    pub components: BTreeMap<String, f64>,
}

impl AirQuality {
    pub fn level(&self) -> AqiLevel {
        AqiLevel::from_index(self.aqi)
    }
}

/// One normalized forecast day, ready for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    /// Calendar day in the viewer's timezone
    pub date: NaiveDate,
    pub display_icon: String,
    /// Degrees Celsius
    pub min_temperature: f64,
    /// Degrees Celsius
    pub max_temperature: f64,
    pub is_today: bool,
}

impl DailySummary {
    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }

    /// Full English weekday name, e.g. "Monday"
    pub fn weekday_name(&self) -> &'static str {
        weekday_name(self.date.weekday())
    }
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Weather data not found for \"{0}\"")]
    CityNotFound(String),
    #[error("Invalid API key")]
    InvalidApiKey,
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("No air quality data available")]
    NoAirQualityData,
    #[error("Forecast error: {0}")]
    Forecast(#[from] ForecastError),
    #[error("Parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_owm_main_mapping() {
        assert_eq!(
            WeatherCondition::from_owm_main("Clear"),
            WeatherCondition::Clear
        );
        assert_eq!(
            WeatherCondition::from_owm_main("Clouds"),
            WeatherCondition::Clouds
        );
        assert_eq!(
            WeatherCondition::from_owm_main("rain"),
            WeatherCondition::Rain
        );
        assert_eq!(
            WeatherCondition::from_owm_main("Squall"),
            WeatherCondition::Thunderstorm
        );
        assert_eq!(
            WeatherCondition::from_owm_main("Smoke"),
            WeatherCondition::Haze
        );
        assert_eq!(
            WeatherCondition::from_owm_main("Sand"),
            WeatherCondition::Dust
        );
    }

    #[test]
    fn test_owm_main_unknown() {
        assert_eq!(
            WeatherCondition::from_owm_main("Meteor"),
            WeatherCondition::Other
        );
    }

    #[test]
    fn test_unit_symbol() {
        assert_eq!(TemperatureUnit::Celsius.symbol(), "°C");
        assert_eq!(TemperatureUnit::Fahrenheit.symbol(), "°F");
        assert_eq!(TemperatureUnit::default(), TemperatureUnit::Celsius);
    }

    #[test]
    fn test_daily_summary_weekday() {
        let day = DailySummary {
            date: NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
            display_icon: "10d".to_string(),
            min_temperature: 12.0,
            max_temperature: 18.5,
            is_today: false,
        };
        assert_eq!(day.weekday(), Weekday::Mon);
        assert_eq!(day.weekday_name(), "Monday");
    }

    #[test]
    fn test_current_icon_url() {
        let current = CurrentConditions {
            city_name: "London".to_string(),
            location: Location {
                latitude: 51.5,
                longitude: -0.12,
                city_name: Some("London".to_string()),
            },
            condition: WeatherCondition::Clear,
            condition_main: "Clear".to_string(),
            description: "clear sky".to_string(),
            icon: "01d".to_string(),
            temperature: 14.2,
            humidity: 70,
            wind_speed: 3.1,
            sunrise: Utc.with_ymd_and_hms(2026, 10, 19, 6, 0, 0).unwrap(),
            sunset: Utc.with_ymd_and_hms(2026, 10, 19, 18, 0, 0).unwrap(),
        };
        assert_eq!(
            current.icon_url(),
            "https://openweathermap.org/img/wn/01d.png"
        );
    }
}
