//! Maps weather crate errors into the application error hierarchy.

use skyglass_core::{AppError, NetworkError, ReqwestErrorExt, WeatherError};
use skyglass_weather::WeatherError as ProviderError;

/// Conversion from [`ProviderError`] into [`AppError`].
pub trait ProviderErrorExt {
    fn into_app_error(self) -> AppError;
}

impl ProviderErrorExt for ProviderError {
    fn into_app_error(self) -> AppError {
        match self {
            ProviderError::Network(err) => AppError::Network(err.into_network_error()),
            ProviderError::CityNotFound(city) => {
                AppError::Weather(WeatherError::LocationNotFound(city))
            }
            ProviderError::InvalidApiKey => AppError::Weather(WeatherError::InvalidApiKey),
            ProviderError::Api { status, message } if status >= 500 => {
                AppError::Network(NetworkError::ServerError { status, message })
            }
            ProviderError::Api { status, message } => {
                AppError::Weather(WeatherError::ApiError(format!("{} - {}", status, message)))
            }
            ProviderError::NoAirQualityData => AppError::Weather(WeatherError::ServiceUnavailable),
            ProviderError::Forecast(err) => {
                AppError::Weather(WeatherError::MalformedForecast(err.to_string()))
            }
            ProviderError::Parse(s) => AppError::Network(NetworkError::InvalidResponse(s)),
        }
    }
}
