use skyglass_core::AppError;
use skyglass_weather::CityQuery;

use crate::report::WeatherReport;
use crate::sequence::{RequestSequence, RequestToken};
use crate::service::DashboardMessage;

/// Result of applying a message to the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// A new report is on screen
    Updated,
    /// The latest request failed; the previous report, if any, is kept
    Failed,
    /// A newer request was issued after this one; the message was dropped
    Stale,
}

/// Latest report plus the bookkeeping that keeps it in request order.
#[derive(Debug, Default)]
pub struct DashboardState {
    sequence: RequestSequence,
    city: Option<CityQuery>,
    report: Option<WeatherReport>,
    last_error: Option<AppError>,
    loading: bool,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new request for `city` and return its token.
    pub fn begin_request(&mut self, city: CityQuery) -> RequestToken {
        let token = self.sequence.issue();
        tracing::info!(
            "Loading weather for {} (request #{})",
            city.original,
            token.value()
        );
        self.city = Some(city);
        self.loading = true;
        token
    }

    pub fn apply(&mut self, message: DashboardMessage) -> ApplyOutcome {
        match message {
            DashboardMessage::FetchDone { token, result } => {
                if !self.sequence.is_latest(token) {
                    tracing::debug!(
                        "Dropping stale response #{} (latest is #{:?})",
                        token.value(),
                        self.sequence.latest().map(|t| t.value())
                    );
                    return ApplyOutcome::Stale;
                }

                self.loading = false;
                match result {
                    Ok(report) => {
                        self.report = Some(report);
                        self.last_error = None;
                        ApplyOutcome::Updated
                    }
                    Err(e) => {
                        tracing::error!("Weather fetch failed: {}", e);
                        self.last_error = Some(e);
                        ApplyOutcome::Failed
                    }
                }
            }
        }
    }

    pub fn city(&self) -> Option<&CityQuery> {
        self.city.as_ref()
    }

    pub fn report(&self) -> Option<&WeatherReport> {
        self.report.as_ref()
    }

    pub fn last_error(&self) -> Option<&AppError> {
        self.last_error.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}
