//! Weather domain for Skyglass
//!
//! Turns OpenWeatherMap responses into dashboard-ready values: current
//! conditions, air quality, and a normalized per-day forecast.

pub mod air_quality;
pub mod background;
pub mod city;
pub mod clock;
pub mod forecast;
pub mod location;
pub mod provider;
pub mod today;
pub mod types;
pub mod units;

pub use air_quality::AqiLevel;
pub use city::CityQuery;
pub use clock::{Clock, FixedClock, SystemClock};
pub use forecast::{ForecastError, ForecastNormalizer, RawForecast};
pub use location::locate_city;
pub use provider::WeatherProvider;
pub use today::is_current_day;
pub use types::*;
