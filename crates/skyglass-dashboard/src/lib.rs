//! Dashboard layer for Skyglass.
//!
//! Fetches weather reports off the caller's task, applies only the newest
//! response, and renders reports as text.

pub mod error_mapping;
pub mod preferences;
pub mod render;
pub mod report;
pub mod sequence;
pub mod service;
pub mod share;
pub mod state;

pub use preferences::DisplayPreferences;
pub use report::{ForecastView, WeatherReport};
pub use sequence::{RequestSequence, RequestToken};
pub use service::{fetch_report, request_fetch, DashboardMessage, FetchContext};
pub use state::{ApplyOutcome, DashboardState};
