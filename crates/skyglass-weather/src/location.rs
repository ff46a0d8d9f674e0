//! IP-based city lookup used when no city was given.
//! Uses ipapi.co - free, no API key required.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_GEOLOCATION_URL: &str = "https://ipapi.co/json/";
const REQUEST_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = concat!("skyglass/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    city: Option<String>,
}

/// City of the caller's public IP address, or `default_city` when the
/// lookup fails for any reason.
pub async fn locate_city(lookup_url: &str, default_city: &str) -> String {
    match lookup_city(lookup_url).await {
        Some(city) => {
            tracing::info!("Located city via IP: {}", city);
            city
        }
        None => {
            tracing::info!("IP geolocation failed, using {} as default", default_city);
            default_city.to_string()
        }
    }
}

async fn lookup_city(lookup_url: &str) -> Option<String> {
    let client = match Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to create geolocation client: {}", e);
            return None;
        }
    };

    let response = match client.get(lookup_url).send().await {
        Ok(r) => r,
        Err(e) => {
            tracing::debug!("Geolocation request failed: {}", e);
            return None;
        }
    };

    if !response.status().is_success() {
        tracing::debug!("Geolocation returned status {}", response.status());
        return None;
    }

    let body: IpApiResponse = match response.json().await {
        Ok(b) => b,
        Err(e) => {
            tracing::debug!("Geolocation parse error: {}", e);
            return None;
        }
    };

    body.city.map(|c| c.trim().to_string()).filter(|c| !c.is_empty())
}
