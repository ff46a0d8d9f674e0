//! Shareable weather summary.

use std::fmt::Display;

use chrono::TimeZone;
use skyglass_weather::units::format_current_temperature;
use skyglass_weather::CurrentConditions;

use crate::preferences::DisplayPreferences;
use crate::render::{format_time_12h, wind_speed_kmh};

const WHATSAPP_SEND_URL: &str = "https://api.whatsapp.com/send?text=";

pub fn share_message<Tz>(
    current: &CurrentConditions,
    prefs: &DisplayPreferences,
    tz: &Tz,
) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!(
        "Weather in {} today\nTemperature: {},\nHumidity: {}%,\nWind Speed: {}km/hr,\nSunrise: {},\nSunset: {}.",
        current.city_name,
        format_current_temperature(current.temperature, prefs.unit),
        current.humidity,
        wind_speed_kmh(current.wind_speed),
        format_time_12h(current.sunrise, tz),
        format_time_12h(current.sunset, tz)
    )
}

/// Link that opens WhatsApp with `message` prefilled.
pub fn whatsapp_share_url(message: &str) -> String {
    format!("{}{}", WHATSAPP_SEND_URL, urlencoding::encode(message))
}
