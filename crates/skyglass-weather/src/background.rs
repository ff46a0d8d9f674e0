//! Decorative background selection from weather and time of day.

use chrono::{DateTime, TimeZone, Timelike, Utc};
use rand::Rng;
use serde::Serialize;

const UNSPLASH_BASE_URL: &str = "https://source.unsplash.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundCategory {
    Clear,
    Clouds,
    Rain,
    Snow,
    Mist,
    Thunderstorm,
    Default,
}

impl BackgroundCategory {
    /// Classify free condition text ("Clouds", "light rain", "haze", ...).
    /// Checks run in order, so "thunderstorm with rain" is `Rain`.
    pub fn from_condition(condition: &str) -> Self {
        let condition = condition.to_lowercase();
        if condition.contains("clear") {
            Self::Clear
        } else if condition.contains("cloud") {
            Self::Clouds
        } else if condition.contains("rain") || condition.contains("drizzle") {
            Self::Rain
        } else if condition.contains("snow") {
            Self::Snow
        } else if ["mist", "fog", "haze"].iter().any(|w| condition.contains(w)) {
            Self::Mist
        } else if condition.contains("thunder") || condition.contains("storm") {
            Self::Thunderstorm
        } else {
            Self::Default
        }
    }

    pub fn keywords(&self, time: TimeOfDay) -> &'static [&'static str] {
        match (self, time) {
            (Self::Clear, TimeOfDay::Day) => &["sunny", "clear sky", "blue sky", "sunshine"],
            (Self::Clear, TimeOfDay::Night) => &["night sky", "stars", "clear night", "moonlight"],
            (Self::Clouds, TimeOfDay::Day) => {
                &["cloudy", "overcast", "grey clouds", "dramatic sky"]
            }
            (Self::Clouds, TimeOfDay::Night) => &["cloudy night", "dark clouds", "stormy night"],
            (Self::Rain, TimeOfDay::Day) => &["rain", "rainy day", "storm", "monsoon"],
            (Self::Rain, TimeOfDay::Night) => &["rain night", "night storm", "rainy evening"],
            (Self::Snow, TimeOfDay::Day) => &["snow", "winter", "snowy landscape", "white snow"],
            (Self::Snow, TimeOfDay::Night) => &["snowy night", "winter night", "snow evening"],
            (Self::Mist, TimeOfDay::Day) => &["mist", "fog", "misty morning", "haze"],
            (Self::Mist, TimeOfDay::Night) => &["misty night", "fog night", "ethereal night"],
            (Self::Thunderstorm, TimeOfDay::Day) => {
                &["thunderstorm", "lightning", "storm clouds", "dramatic weather"]
            }
            (Self::Thunderstorm, TimeOfDay::Night) => {
                &["lightning night", "storm night", "thunder clouds"]
            }
            (Self::Default, TimeOfDay::Day) => {
                &["landscape", "nature", "mountains", "beautiful scenery"]
            }
            (Self::Default, TimeOfDay::Night) => {
                &["night landscape", "evening", "dusk", "twilight"]
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Day,
    Night,
}

impl TimeOfDay {
    /// Day from 06:00 up to (not including) 18:00
    pub fn from_hour(hour: u32) -> Self {
        if (6..18).contains(&hour) {
            Self::Day
        } else {
            Self::Night
        }
    }

    pub fn from_clock(now: &impl Timelike) -> Self {
        Self::from_hour(now.hour())
    }

    pub fn from_sun(now: DateTime<Utc>, sunrise: DateTime<Utc>, sunset: DateTime<Utc>) -> Self {
        if now >= sunrise && now <= sunset {
            Self::Day
        } else {
            Self::Night
        }
    }

    /// Sun position when sunrise precedes sunset, otherwise the clock hour of `now`.
    /// Polar day and night report no usable sunrise/sunset pair.
    pub fn at<Tz: TimeZone>(
        now: &DateTime<Tz>,
        sunrise: DateTime<Utc>,
        sunset: DateTime<Utc>,
    ) -> Self {
        if sunrise < sunset {
            Self::from_sun(now.with_timezone(&Utc), sunrise, sunset)
        } else {
            Self::from_clock(now)
        }
    }
}

/// Image size bucket for a viewport width in pixels
pub fn screen_size(width: u32) -> &'static str {
    match width {
        0..=480 => "480x800",
        481..=768 => "768x1024",
        769..=1024 => "1024x768",
        1025..=1440 => "1440x900",
        _ => "1920x1080",
    }
}

/// Percentage of daylight elapsed: 0 before sunrise, 100 after sunset
pub fn sun_progress(now: DateTime<Utc>, sunrise: DateTime<Utc>, sunset: DateTime<Utc>) -> f64 {
    if now < sunrise {
        return 0.0;
    }
    if now > sunset {
        return 100.0;
    }
    let span = (sunset - sunrise).num_seconds();
    if span <= 0 {
        return 100.0;
    }
    (now - sunrise).num_seconds() as f64 / span as f64 * 100.0
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackgroundSelection {
    pub category: BackgroundCategory,
    pub time_of_day: TimeOfDay,
    pub keyword: &'static str,
    pub url: String,
}

/// Pick a background image for an upstream condition group such as "Rain".
pub fn select_background<R: Rng>(
    condition: &str,
    time_of_day: TimeOfDay,
    viewport_width: u32,
    rng: &mut R,
) -> BackgroundSelection {
    let category = BackgroundCategory::from_condition(condition);
    let keywords = category.keywords(time_of_day);
    let keyword = keywords[rng.random_range(0..keywords.len())];
    let url = format!(
        "{}/{}/?{}",
        UNSPLASH_BASE_URL,
        screen_size(viewport_width),
        urlencoding::encode(keyword)
    );

    tracing::debug!(
        "Selected background: {:?} - {:?} - {}",
        category,
        time_of_day,
        keyword
    );

    BackgroundSelection {
        category,
        time_of_day,
        keyword,
        url,
    }
}
