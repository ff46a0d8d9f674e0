use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone};
use serde::Serialize;
use serde_json::Value;
use skyglass_weather::background::BackgroundSelection;
use skyglass_weather::{
    AirQuality, CityQuery, CurrentConditions, DailySummary, ForecastNormalizer, WeatherError,
};

const PLACEHOLDER_ICONS: [&str; 7] = ["01d", "02d", "03d", "04d", "09d", "10d", "11d"];
const PLACEHOLDER_MAX: [f64; 7] = [28.0, 30.0, 27.0, 25.0, 26.0, 29.0, 31.0];
const PLACEHOLDER_MIN: [f64; 7] = [18.0, 20.0, 17.0, 15.0, 16.0, 19.0, 21.0];

/// Everything the dashboard shows for one city.
#[derive(Debug, Clone, Serialize)]
pub struct WeatherReport {
    pub city: CityQuery,
    pub current: CurrentConditions,
    /// `None` when the air pollution endpoint failed or had no reading
    pub air_quality: Option<AirQuality>,
    pub forecast: ForecastView,
    pub background: BackgroundSelection,
    pub fetched_at: DateTime<Local>,
}

/// What the forecast area shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "days", rename_all = "snake_case")]
pub enum ForecastView {
    Days(Vec<DailySummary>),
    /// Demo week shown when the forecast payload had no usable entries
    Placeholder(Vec<DailySummary>),
    /// The forecast request itself failed
    Unavailable(String),
}

impl ForecastView {
    pub fn days(&self) -> &[DailySummary] {
        match self {
            ForecastView::Days(days) | ForecastView::Placeholder(days) => days,
            ForecastView::Unavailable(_) => &[],
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, ForecastView::Placeholder(_))
    }
}

/// Turn a forecast fetch result into a view, falling back to the demo week
/// when the payload cannot be normalized or is empty.
pub fn forecast_view<Tz: TimeZone>(
    payload: Result<Value, WeatherError>,
    now: &DateTime<Tz>,
) -> ForecastView {
    let payload = match payload {
        Ok(payload) => payload,
        Err(e) => {
            tracing::error!("Error fetching weekly weather: {}", e);
            return ForecastView::Unavailable(e.to_string());
        }
    };

    match ForecastNormalizer::new(now.clone()).normalize_value(&payload) {
        Ok(days) if !days.is_empty() => ForecastView::Days(days),
        Ok(_) => {
            tracing::warn!("Forecast response had no entries, showing demo data");
            ForecastView::Placeholder(placeholder_forecast(now.date_naive()))
        }
        Err(e) => {
            tracing::warn!("No forecast data found in response: {}", e);
            ForecastView::Placeholder(placeholder_forecast(now.date_naive()))
        }
    }
}

/// Seven demo days starting on the Sunday on or before `today`.
pub fn placeholder_forecast(today: NaiveDate) -> Vec<DailySummary> {
    let back = u64::from(today.weekday().num_days_from_sunday());
    let start = today
        .checked_sub_days(chrono::Days::new(back))
        .unwrap_or(today);

    start
        .iter_days()
        .zip(PLACEHOLDER_ICONS)
        .zip(PLACEHOLDER_MIN.iter().zip(PLACEHOLDER_MAX))
        .map(|((date, icon), (&min, max))| DailySummary {
            date,
            display_icon: icon.to_string(),
            min_temperature: min,
            max_temperature: max,
            is_today: false,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Weekday};
    use serde_json::json;

    fn now() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2026, 10, 21, 12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_placeholder_week() {
        let days = placeholder_forecast(NaiveDate::from_ymd_opt(2026, 10, 21).unwrap());

        assert_eq!(days.len(), 7);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2026, 10, 18).unwrap());
        assert_eq!(days[0].weekday(), Weekday::Sun);
        assert_eq!(days[6].weekday(), Weekday::Sat);
        assert_eq!(days[0].display_icon, "01d");
        assert_eq!(days[6].display_icon, "11d");
        assert_eq!(days[1].max_temperature, 30.0);
        assert_eq!(days[1].min_temperature, 20.0);
        assert!(days.iter().all(|d| !d.is_today));
    }

    #[test]
    fn test_placeholder_starting_on_sunday() {
        let sunday = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        assert_eq!(placeholder_forecast(sunday)[0].date, sunday);
    }

    #[test]
    fn test_view_from_daily_payload() {
        let payload = json!({
            "daily": [
                {
                    "dt": 1_792_584_000,
                    "temp": {"min": 10.0, "max": 20.0},
                    "weather": [{"icon": "01d"}]
                }
            ]
        });

        let view = forecast_view(Ok(payload), &now());

        assert!(matches!(view, ForecastView::Days(ref d) if d.len() == 1));
        assert!(!view.is_placeholder());
    }

    #[test]
    fn test_view_falls_back_on_malformed_payload() {
        let view = forecast_view(Ok(json!({"cod": "200"})), &now());
        assert!(view.is_placeholder());
        assert_eq!(view.days().len(), 7);
    }

    #[test]
    fn test_view_falls_back_on_empty_list() {
        let view = forecast_view(Ok(json!({"list": []})), &now());
        assert!(view.is_placeholder());
    }

    #[test]
    fn test_view_unavailable_on_fetch_error() {
        let err = WeatherError::Api {
            status: 503,
            message: "down".to_string(),
        };
        let view = forecast_view(Err(err), &now());

        assert!(matches!(view, ForecastView::Unavailable(ref m) if m.contains("503")));
        assert!(view.days().is_empty());
    }
}
