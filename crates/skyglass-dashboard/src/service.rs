//! Dashboard backend: async report fetching.
//! Network work runs on the tokio runtime; results are sent back via mpsc
//! tagged with the token of the request that produced them.

use std::sync::Arc;

use skyglass_core::AppError;
use skyglass_weather::background::{select_background, TimeOfDay};
use skyglass_weather::{CityQuery, Clock, WeatherError, WeatherProvider};
use tokio::sync::mpsc;

use crate::error_mapping::ProviderErrorExt;
use crate::report::{forecast_view, WeatherReport};
use crate::sequence::RequestToken;

/// Messages sent from async operations back to the dashboard loop
#[derive(Debug)]
pub enum DashboardMessage {
    /// Result of fetching a full report
    FetchDone {
        token: RequestToken,
        result: Result<WeatherReport, AppError>,
    },
}

/// Shared handles every fetch needs.
#[derive(Clone)]
pub struct FetchContext {
    pub provider: Arc<WeatherProvider>,
    pub clock: Arc<dyn Clock>,
    pub viewport_width: u32,
}

impl FetchContext {
    pub fn new(
        provider: Arc<WeatherProvider>,
        clock: Arc<dyn Clock>,
        viewport_width: u32,
    ) -> Self {
        Self {
            provider,
            clock,
            viewport_width,
        }
    }
}

/// Fetch current conditions, then air quality and forecast together.
///
/// Only the current-conditions request is fatal. Air quality failures leave
/// the reading empty and forecast failures become [`crate::ForecastView::Unavailable`].
pub async fn fetch_report(
    ctx: &FetchContext,
    city: CityQuery,
) -> Result<WeatherReport, WeatherError> {
    let current = ctx.provider.current(&city).await?;
    tracing::info!(
        "Got weather for {}: {}, {}",
        current.city_name,
        current.location.latitude,
        current.location.longitude
    );

    let (air_quality, forecast) = tokio::join!(
        ctx.provider.air_quality(&current.location),
        ctx.provider.forecast(&current.location)
    );

    let air_quality = match air_quality {
        Ok(reading) => Some(reading),
        Err(e) => {
            tracing::warn!("Error fetching air quality data: {}", e);
            None
        }
    };

    let now = ctx.clock.now();
    let forecast = forecast_view(forecast, &now);

    let time_of_day = TimeOfDay::at(&now, current.sunrise, current.sunset);
    let background = select_background(
        &current.condition_main,
        time_of_day,
        ctx.viewport_width,
        &mut rand::rng(),
    );

    Ok(WeatherReport {
        city,
        current,
        air_quality,
        forecast,
        background,
        fetched_at: now,
    })
}

/// Request a report asynchronously.
/// Sends `FetchDone` with `token` on the channel when complete.
pub fn request_fetch(
    tx: &mpsc::UnboundedSender<DashboardMessage>,
    runtime: &tokio::runtime::Handle,
    ctx: FetchContext,
    city: CityQuery,
    token: RequestToken,
) {
    let tx = tx.clone();
    tracing::debug!("Requesting report #{} for {}", token.value(), city.query);

    runtime.spawn(async move {
        let result = fetch_report(&ctx, city)
            .await
            .map_err(ProviderErrorExt::into_app_error);
        if tx.send(DashboardMessage::FetchDone { token, result }).is_err() {
            tracing::debug!("Dashboard closed before report #{} arrived", token.value());
        }
    });
}
