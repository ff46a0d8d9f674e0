//! Forecast normalization.
//!
//! OpenWeatherMap serves forecasts in two shapes: the One Call `daily` array
//! (one pre-aggregated entry per day) and the 5 day / 3 hour `list` array
//! (eight samples per day). Both are reduced here to an ordered sequence of
//! [`DailySummary`] values.

use chrono::{DateTime, NaiveDate, TimeZone};
use serde::Deserialize;
use serde_json::Value;

use crate::today::is_current_day;
use crate::types::DailySummary;

/// Maximum days taken from a daily-aggregate payload
pub const DAILY_DAY_LIMIT: usize = 7;
/// Maximum days produced from a three-hour-interval payload
pub const INTERVAL_DAY_LIMIT: usize = 5;

#[derive(Debug, thiserror::Error)]
pub enum ForecastError {
    #[error("Malformed forecast: {0}")]
    Malformed(String),
}

/// Condition tag attached to every upstream entry
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherTag {
    pub icon: String,
    #[serde(default)]
    pub main: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DailyTemperature {
    pub min: f64,
    pub max: f64,
}

/// One entry of the daily-aggregate shape
#[derive(Debug, Clone, Deserialize)]
pub struct DailyEntry {
    pub dt: i64,
    pub temp: DailyTemperature,
    pub weather: Vec<WeatherTag>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IntervalReading {
    pub temp: f64,
}

/// One entry of the three-hour-interval shape
#[derive(Debug, Clone, Deserialize)]
pub struct IntervalEntry {
    pub dt: i64,
    pub main: IntervalReading,
    pub weather: Vec<WeatherTag>,
}

/// A forecast payload tagged by shape
#[derive(Debug, Clone)]
pub enum RawForecast {
    DailyAggregate(Vec<DailyEntry>),
    ThreeHourInterval(Vec<IntervalEntry>),
}

impl RawForecast {
    /// Detect the payload shape. `daily` wins over `list` when both are present.
    pub fn from_value(payload: &Value) -> Result<Self, ForecastError> {
        let object = payload
            .as_object()
            .ok_or_else(|| ForecastError::Malformed("payload is not a JSON object".into()))?;

        if let Some(daily) = object.get("daily").filter(|v| !v.is_null()) {
            let entries = Vec::<DailyEntry>::deserialize(daily)
                .map_err(|e| ForecastError::Malformed(format!("invalid `daily` entries: {}", e)))?;
            return Ok(Self::DailyAggregate(entries));
        }

        if let Some(list) = object.get("list").filter(|v| !v.is_null()) {
            let entries = Vec::<IntervalEntry>::deserialize(list)
                .map_err(|e| ForecastError::Malformed(format!("invalid `list` entries: {}", e)))?;
            return Ok(Self::ThreeHourInterval(entries));
        }

        Err(ForecastError::Malformed(
            "neither `daily` nor `list` present".into(),
        ))
    }

    pub fn len(&self) -> usize {
        match self {
            Self::DailyAggregate(entries) => entries.len(),
            Self::ThreeHourInterval(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Running min/max for one calendar day of interval samples
struct DayAccumulator {
    date: NaiveDate,
    icon: String,
    min: f64,
    max: f64,
}

/// Reduces forecast payloads to [`DailySummary`] values.
///
/// Timestamps are read in the timezone of `now`, and `now` also decides
/// which day is flagged as today.
#[derive(Debug, Clone)]
pub struct ForecastNormalizer<Tz: TimeZone> {
    now: DateTime<Tz>,
}

impl<Tz: TimeZone> ForecastNormalizer<Tz> {
    pub fn new(now: DateTime<Tz>) -> Self {
        Self { now }
    }

    /// Detect the shape of `payload` and normalize it.
    pub fn normalize_value(&self, payload: &Value) -> Result<Vec<DailySummary>, ForecastError> {
        let raw = RawForecast::from_value(payload)?;
        self.normalize(&raw)
    }

    pub fn normalize(&self, raw: &RawForecast) -> Result<Vec<DailySummary>, ForecastError> {
        let days = match raw {
            RawForecast::DailyAggregate(entries) => self.normalize_daily(entries)?,
            RawForecast::ThreeHourInterval(entries) => self.normalize_intervals(entries)?,
        };

        tracing::debug!(
            "Normalized {} forecast entries into {} days",
            raw.len(),
            days.len()
        );
        Ok(days)
    }

    fn normalize_daily(&self, entries: &[DailyEntry]) -> Result<Vec<DailySummary>, ForecastError> {
        entries
            .iter()
            .take(DAILY_DAY_LIMIT)
            .map(|entry| {
                let date = self.local_date(entry.dt)?;
                Ok(DailySummary {
                    date,
                    display_icon: first_icon(&entry.weather, entry.dt)?,
                    min_temperature: entry.temp.min,
                    max_temperature: entry.temp.max,
                    is_today: is_current_day(date, &self.now),
                })
            })
            .collect()
    }

    fn normalize_intervals(
        &self,
        entries: &[IntervalEntry],
    ) -> Result<Vec<DailySummary>, ForecastError> {
        let mut days: Vec<DayAccumulator> = Vec::new();

        for entry in entries {
            let date = self.local_date(entry.dt)?;
            let icon = first_icon(&entry.weather, entry.dt)?;
            let temp = entry.main.temp;

            match days.iter_mut().find(|day| day.date == date) {
                Some(day) => {
                    day.min = day.min.min(temp);
                    day.max = day.max.max(temp);
                }
                // First sample of the day supplies the icon
                None => days.push(DayAccumulator {
                    date,
                    icon,
                    min: temp,
                    max: temp,
                }),
            }
        }

        Ok(days
            .into_iter()
            .take(INTERVAL_DAY_LIMIT)
            .map(|day| DailySummary {
                date: day.date,
                display_icon: day.icon,
                min_temperature: day.min,
                max_temperature: day.max,
                is_today: is_current_day(day.date, &self.now),
            })
            .collect())
    }

    fn local_date(&self, timestamp: i64) -> Result<NaiveDate, ForecastError> {
        self.now
            .timezone()
            .timestamp_opt(timestamp, 0)
            .single()
            .map(|local| local.date_naive())
            .ok_or_else(|| {
                ForecastError::Malformed(format!("timestamp {} out of range", timestamp))
            })
    }
}

fn first_icon(tags: &[WeatherTag], timestamp: i64) -> Result<String, ForecastError> {
    tags.first()
        .map(|tag| tag.icon.clone())
        .ok_or_else(|| ForecastError::Malformed(format!("entry at {} has no weather", timestamp)))
}
