//! OpenWeatherMap client: current conditions, forecast, and air quality.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use crate::city::CityQuery;
use crate::types::{AirQuality, CurrentConditions, Location, WeatherCondition, WeatherError};

const OWM_BASE_URL: &str = "https://api.openweathermap.org";
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize)]
struct OwmCurrentResponse {
    name: String,
    coord: OwmCoord,
    weather: Vec<OwmWeather>,
    main: OwmMain,
    wind: OwmWind,
    sys: OwmSys,
}

#[derive(Debug, Deserialize)]
struct OwmCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwmWeather {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwmSys {
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwmAirResponse {
    #[serde(default)]
    list: Vec<OwmAirEntry>,
}

#[derive(Debug, Deserialize)]
struct OwmAirEntry {
    main: OwmAirIndex,
    #[serde(default)]
    components: BTreeMap<String, f64>,
}

#[derive(Debug, Deserialize)]
struct OwmAirIndex {
    aqi: u8,
}

impl TryFrom<OwmCurrentResponse> for CurrentConditions {
    type Error = WeatherError;

    fn try_from(body: OwmCurrentResponse) -> Result<Self, Self::Error> {
        let weather = body
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::Parse("current weather has no condition".into()))?;

        Ok(Self {
            location: Location {
                latitude: body.coord.lat,
                longitude: body.coord.lon,
                city_name: Some(body.name.clone()),
            },
            city_name: body.name,
            condition: WeatherCondition::from_owm_main(&weather.main),
            condition_main: weather.main,
            description: weather.description,
            icon: weather.icon,
            temperature: body.main.temp,
            humidity: body.main.humidity,
            wind_speed: body.wind.speed,
            sunrise: utc_from_timestamp(body.sys.sunrise)?,
            sunset: utc_from_timestamp(body.sys.sunset)?,
        })
    }
}

fn utc_from_timestamp(secs: i64) -> Result<DateTime<Utc>, WeatherError> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| WeatherError::Parse(format!("timestamp {} out of range", secs)))
}

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    api_key: String,
    language: Option<String>,
    base_url: String,
}

impl WeatherProvider {
    pub fn new(api_key: impl Into<String>, language: Option<String>) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            api_key: api_key.into(),
            language: language.filter(|l| !l.is_empty()),
            base_url: OWM_BASE_URL.to_string(),
        })
    }

    /// Point the client at another host (a proxy, or a mock server in tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    fn current_url(&self, query: &str, language: Option<&str>) -> String {
        let mut url = format!(
            "{}/data/2.5/weather?q={}&units=metric&appid={}",
            self.base_url,
            urlencoding::encode(query),
            self.api_key
        );
        if let Some(lang) = language {
            url.push_str(&format!("&lang={}", urlencoding::encode(lang)));
        }
        url
    }

    /// Current conditions for a city.
    ///
    /// When the localized request fails and the query has no country code,
    /// the request is repeated once without the `lang` parameter.
    #[instrument(skip(self), level = "info")]
    pub async fn current(&self, city: &CityQuery) -> Result<CurrentConditions, WeatherError> {
        let response = self
            .client
            .get(self.current_url(&city.query, self.language()))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return parse_current(response).await;
        }

        tracing::error!(
            "Weather API failed for \"{}\" with status: {}",
            city.query,
            status
        );

        if status == StatusCode::UNAUTHORIZED {
            return Err(WeatherError::InvalidApiKey);
        }

        if self.language.is_some() && !city.has_country_code() {
            tracing::info!("Retrying without language parameter for \"{}\"", city.query);
            let fallback = self
                .client
                .get(self.current_url(&city.query, None))
                .send()
                .await?;
            if fallback.status().is_success() {
                return parse_current(fallback).await;
            }
            tracing::warn!("Fallback request returned status {}", fallback.status());
        }

        Err(WeatherError::CityNotFound(city.original.clone()))
    }

    /// Raw forecast payload for a location. Shape detection and
    /// normalization are left to [`crate::ForecastNormalizer`].
    #[instrument(skip(self), level = "info")]
    pub async fn forecast(&self, location: &Location) -> Result<Value, WeatherError> {
        let url = format!(
            "{}/data/2.5/forecast?lat={}&lon={}&units=metric&appid={}",
            self.base_url, location.latitude, location.longitude, self.api_key
        );

        let response = self.client.get(&url).send().await?;
        let response = check_status(response).await?;

        response
            .json::<Value>()
            .await
            .map_err(|e| WeatherError::Parse(e.to_string()))
    }

    #[instrument(skip(self), level = "info")]
    pub async fn air_quality(&self, location: &Location) -> Result<AirQuality, WeatherError> {
        let url = format!(
            "{}/data/2.5/air_pollution?lat={}&lon={}&appid={}",
            self.base_url, location.latitude, location.longitude, self.api_key
        );

        let response = self.client.get(&url).send().await?;
        let response = check_status(response).await?;

        let body: OwmAirResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::Parse(e.to_string()))?;

        let entry = body
            .list
            .into_iter()
            .next()
            .ok_or(WeatherError::NoAirQualityData)?;

        Ok(AirQuality {
            aqi: entry.main.aqi,
            components: entry.components,
        })
    }
}

async fn parse_current(response: Response) -> Result<CurrentConditions, WeatherError> {
    let body: OwmCurrentResponse = response
        .json()
        .await
        .map_err(|e| WeatherError::Parse(e.to_string()))?;
    CurrentConditions::try_from(body)
}

async fn check_status(response: Response) -> Result<Response, WeatherError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::UNAUTHORIZED {
        return Err(WeatherError::InvalidApiKey);
    }

    let message = response.text().await.unwrap_or_default();
    tracing::error!("API error response ({}): {}", status, message);
    Err(WeatherError::Api {
        status: status.as_u16(),
        message,
    })
}
