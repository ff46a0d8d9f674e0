//! Application error hierarchy.
//!
//! Every layer converts into [`AppError`]; the dashboard prints
//! [`AppError::user_message`] and logs the full error.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Weather: {0}")]
    Weather(#[from] WeatherError),

    #[error("Network: {0}")]
    Network(#[from] NetworkError),

    #[error("Config: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Short message for the dashboard, without internal details.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Weather(e) => e.user_message(),
            Self::Network(e) => e.user_message(),
            Self::Config(e) => e.user_message(),
            Self::Other(_) => "Something went wrong while loading the weather.",
        }
    }
}

/// Lookup and data problems reported by the weather service.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("city \"{0}\" not found")]
    LocationNotFound(String),

    #[error("service rejected the request: {0}")]
    ApiError(String),

    #[error("API key rejected")]
    InvalidApiKey,

    #[error("service unavailable")]
    ServiceUnavailable,

    #[error("forecast payload not understood: {0}")]
    MalformedForecast(String),
}

impl WeatherError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::LocationNotFound(_) => "No weather found for that city.",
            Self::ApiError(_) => "The weather service returned an error.",
            Self::InvalidApiKey => "The OpenWeatherMap API key is missing or invalid.",
            Self::ServiceUnavailable => "The weather service is not responding right now.",
            Self::MalformedForecast(_) => "Forecast data is unavailable.",
        }
    }
}

/// Transport failures talking to any upstream service.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    #[error("timed out")]
    Timeout,

    #[error("HTTP {status}: {message}")]
    ServerError { status: u16, message: String },

    #[error("unreadable response: {0}")]
    InvalidResponse(String),
}

impl NetworkError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::ConnectionFailed(_) => {
                "Cannot reach the weather service. Check your connection."
            }
            Self::Timeout => "The weather service took too long to answer.",
            Self::ServerError { status, .. } if *status >= 500 => {
                "The weather service is having trouble. Try again later."
            }
            Self::ServerError { .. } => "The weather request was refused.",
            Self::InvalidResponse(_) => "The weather service sent data we could not read.",
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0}")]
    Invalid(String),

    #[error("missing {0}")]
    MissingSetting(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Invalid(_) => "The config file has invalid values.",
            Self::MissingSetting(_) => "A required setting is missing from the config file.",
        }
    }
}

/// Classify a reqwest failure as a [`NetworkError`].
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        let message = self.to_string();
        if self.is_timeout() {
            return NetworkError::Timeout;
        }
        if self.is_decode() || self.is_body() {
            return NetworkError::InvalidResponse(message);
        }
        match self.status() {
            Some(status) if !self.is_connect() => NetworkError::ServerError {
                status: status.as_u16(),
                message,
            },
            _ => NetworkError::ConnectionFailed(message),
        }
    }
}
