//! Celsius/Fahrenheit conversion for display.
//!
//! Forecast cards show whole degrees while the current readout keeps two
//! decimals; both conventions are kept as separate functions.

use crate::types::TemperatureUnit;

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * (9.0 / 5.0) + 32.0
}

/// Round to the nearest integer, halves toward positive infinity.
pub fn round_half_up(value: f64) -> i64 {
    // `value + 0.5` can round up to the next integer before flooring
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded as i64
}

/// Whole-degree Fahrenheit for forecast cards.
pub fn to_display_fahrenheit_rounded(celsius: f64) -> i64 {
    round_half_up(celsius_to_fahrenheit(celsius))
}

/// Fahrenheit rounded to two decimals for the current-temperature readout.
pub fn to_display_fahrenheit_precise(celsius: f64) -> f64 {
    round_half_up(celsius_to_fahrenheit(celsius) * 100.0) as f64 / 100.0
}

/// Forecast card temperature, e.g. `28°C` or `82°F`.
pub fn format_card_temperature(celsius: f64, unit: TemperatureUnit) -> String {
    let value = match unit {
        TemperatureUnit::Celsius => round_half_up(celsius),
        TemperatureUnit::Fahrenheit => to_display_fahrenheit_rounded(celsius),
    };
    format!("{}{}", value, unit.symbol())
}

/// Current readout temperature. Celsius is shown as reported; Fahrenheit
/// always carries two decimals, e.g. `70.00°F`.
pub fn format_current_temperature(celsius: f64, unit: TemperatureUnit) -> String {
    match unit {
        TemperatureUnit::Celsius => format!("{}{}", celsius, unit.symbol()),
        TemperatureUnit::Fahrenheit => {
            format!(
                "{:.2}{}",
                to_display_fahrenheit_precise(celsius),
                unit.symbol()
            )
        }
    }
}
