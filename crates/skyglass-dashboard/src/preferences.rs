use serde::{Deserialize, Serialize};
use skyglass_core::Config;
use skyglass_weather::TemperatureUnit;

/// How reports are displayed. Passed explicitly to every render call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayPreferences {
    pub unit: TemperatureUnit,
    /// Language code sent to the weather API
    pub language: Option<String>,
    /// Viewport width used to size background images
    pub viewport_width: u32,
}

impl Default for DisplayPreferences {
    fn default() -> Self {
        Self {
            unit: TemperatureUnit::Celsius,
            language: None,
            viewport_width: 1440,
        }
    }
}

impl DisplayPreferences {
    pub fn from_config(config: &Config) -> Self {
        Self {
            unit: match config.display.temperature_unit {
                skyglass_core::TemperatureUnit::Celsius => TemperatureUnit::Celsius,
                skyglass_core::TemperatureUnit::Fahrenheit => TemperatureUnit::Fahrenheit,
            },
            language: config.weather.language.clone(),
            viewport_width: config.display.viewport_width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config() {
        let mut config = Config::default();
        config.display.temperature_unit = skyglass_core::TemperatureUnit::Fahrenheit;
        config.weather.language = Some("hi".to_string());

        let prefs = DisplayPreferences::from_config(&config);

        assert_eq!(prefs.unit, TemperatureUnit::Fahrenheit);
        assert_eq!(prefs.language.as_deref(), Some("hi"));
        assert_eq!(prefs.viewport_width, 1440);
    }
}
