//! Plain-text rendering of dashboard reports.

use std::fmt::{Display, Write};

use chrono::{DateTime, TimeZone, Utc};
use skyglass_weather::background::sun_progress;
use skyglass_weather::units::{format_card_temperature, format_current_temperature};
use skyglass_weather::{AirQuality, CurrentConditions, DailySummary};

use crate::preferences::DisplayPreferences;
use crate::report::{ForecastView, WeatherReport};

const TODAY_MARKER: &str = "▶";

/// Upstream wind speeds are metres per second; the dashboard shows km/h.
pub fn wind_speed_kmh(metres_per_second: f64) -> f64 {
    (metres_per_second * 3.6 * 10.0).round() / 10.0
}

/// Hours and minutes on a 12-hour clock, e.g. `06:05 AM`.
pub fn format_time_12h<Tz>(instant: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    instant.with_timezone(tz).format("%I:%M %p").to_string()
}

/// Date and time line, e.g. `Monday  19  October 2026,  Clock: 09:05:03`.
pub fn clock_line<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    now.format("%A  %-d  %B %Y,  Clock: %H:%M:%S").to_string()
}

pub fn air_quality_line(air_quality: Option<&AirQuality>) -> String {
    match air_quality {
        Some(reading) => {
            let level = reading.level();
            format!(
                "Air Quality: {} (AQI {}) - {}",
                level.label(),
                reading.aqi,
                level.advice()
            )
        }
        None => "Air Quality: Not available".to_string(),
    }
}

/// Share of today's daylight already elapsed, e.g. `Daylight: 42% elapsed`.
pub fn daylight_line(current: &CurrentConditions, now: DateTime<Utc>) -> String {
    let progress = sun_progress(now, current.sunrise, current.sunset);
    format!("Daylight: {:.0}% elapsed", progress)
}

/// Current conditions block, one fact per line.
pub fn render_current<Tz>(
    current: &CurrentConditions,
    air_quality: Option<&AirQuality>,
    prefs: &DisplayPreferences,
    tz: &Tz,
) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let lines = [
        format!("Weather in {}", current.city_name),
        format!("{} ({})", current.description, current.icon_url()),
        format_current_temperature(current.temperature, prefs.unit),
        format!("Humidity: {}%", current.humidity),
        format!("Wind speed: {}km/h", wind_speed_kmh(current.wind_speed)),
        format!("Sunrise: {}", format_time_12h(current.sunrise, tz)),
        format!("Sunset: {}", format_time_12h(current.sunset, tz)),
        air_quality_line(air_quality),
    ];
    lines.join("\n")
}

/// One forecast card on a single line.
pub fn render_day_card(day: &DailySummary, prefs: &DisplayPreferences) -> String {
    let marker = if day.is_today { TODAY_MARKER } else { " " };
    format!(
        "{} {:<9} {:>3}  DAY {:>5}  NIGHT {:>5}",
        marker,
        day.weekday_name().to_uppercase(),
        day.display_icon,
        format_card_temperature(day.max_temperature, prefs.unit),
        format_card_temperature(day.min_temperature, prefs.unit)
    )
}

pub fn render_forecast(view: &ForecastView, prefs: &DisplayPreferences) -> String {
    let mut out = String::new();
    match view {
        ForecastView::Days(days) => {
            for day in days {
                let _ = writeln!(out, "{}", render_day_card(day, prefs));
            }
        }
        ForecastView::Placeholder(days) => {
            let _ = writeln!(out, "Demo Data (API Issue)");
            for day in days {
                let _ = writeln!(out, "{}", render_day_card(day, prefs));
            }
        }
        ForecastView::Unavailable(reason) => {
            let _ = writeln!(out, "Forecast data unavailable: {}", reason);
        }
    }
    out.trim_end().to_string()
}

/// Full dashboard: clock, current conditions, forecast, background.
pub fn render_report<Tz>(
    report: &WeatherReport,
    prefs: &DisplayPreferences,
    now: &DateTime<Tz>,
) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    [
        clock_line(now),
        render_current(
            &report.current,
            report.air_quality.as_ref(),
            prefs,
            &now.timezone(),
        ),
        daylight_line(&report.current, now.with_timezone(&Utc)),
        render_forecast(&report.forecast, prefs),
        format!("Background: {}", report.background.url),
    ]
    .join("\n\n")
}
