use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::Parser;
use skyglass_core::{AppError, Config, ConfigError};
use skyglass_dashboard::render::render_report;
use skyglass_dashboard::share::{share_message, whatsapp_share_url};
use skyglass_dashboard::{
    request_fetch, ApplyOutcome, DashboardMessage, DashboardState, DisplayPreferences,
    FetchContext,
};
use skyglass_weather::{
    locate_city, CityQuery, Clock, SystemClock, TemperatureUnit, WeatherProvider,
};
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(name = "skyglass")]
#[command(author, version, about = "Weather dashboard for the terminal", long_about = None)]
struct Cli {
    /// City or country name; looked up from your IP address when omitted
    city: Option<String>,

    /// Show temperatures in Fahrenheit
    #[arg(short, long)]
    fahrenheit: bool,

    /// Language code for weather descriptions (e.g. "hi", "fr")
    #[arg(short, long)]
    lang: Option<String>,

    /// Keep running and refresh on the configured interval
    #[arg(short, long)]
    watch: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Also print a WhatsApp share link
    #[arg(long)]
    share: bool,

    /// Path to the configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    skyglass_core::init()?;
    let cli = Cli::parse();

    let (config, _) = Config::load_validated(cli.config.as_deref())?;

    let api_key = config.weather.resolved_api_key().ok_or_else(|| {
        AppError::Config(ConfigError::MissingSetting(format!(
            "weather.api_key (or the {} environment variable)",
            skyglass_core::config::API_KEY_ENV
        )))
    })?;

    let mut prefs = DisplayPreferences::from_config(&config);
    if cli.fahrenheit {
        prefs.unit = TemperatureUnit::Fahrenheit;
    }
    if cli.lang.is_some() {
        prefs.language = cli.lang.clone();
    }

    let provider = WeatherProvider::new(api_key, prefs.language.clone())?
        .with_base_url(config.weather.api_base_url.as_str());

    let input = match cli.city.clone() {
        Some(city) => city,
        None => {
            locate_city(
                &config.weather.geolocation_url,
                &config.weather.default_city,
            )
            .await
        }
    };
    let city = CityQuery::resolve(&input);
    tracing::info!("Skyglass started for {}", city.query);

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let ctx = FetchContext::new(Arc::new(provider), clock.clone(), prefs.viewport_width);
    let runtime = tokio::runtime::Handle::current();
    let (tx, mut rx) = mpsc::unbounded_channel::<DashboardMessage>();
    let mut state = DashboardState::new();

    let token = state.begin_request(city.clone());
    request_fetch(&tx, &runtime, ctx.clone(), city.clone(), token);

    if !cli.watch {
        let message = rx
            .recv()
            .await
            .ok_or_else(|| anyhow!("weather fetch task ended without a result"))?;
        return match state.apply(message) {
            ApplyOutcome::Updated => show(&cli, &state, &prefs, clock.as_ref()),
            _ => Err(failure(&state)),
        };
    }

    let period = Duration::from_secs(u64::from(config.weather.refresh_minutes.max(1)) * 60);
    let mut refresh = tokio::time::interval_at(tokio::time::Instant::now() + period, period);

    loop {
        tokio::select! {
            Some(message) = rx.recv() => match state.apply(message) {
                ApplyOutcome::Updated => show(&cli, &state, &prefs, clock.as_ref())?,
                ApplyOutcome::Failed => eprintln!("{}", failure(&state)),
                ApplyOutcome::Stale => {}
            },
            _ = refresh.tick() => {
                if state.is_loading() {
                    tracing::warn!("Previous refresh still pending; its result will be dropped");
                }
                let token = state.begin_request(city.clone());
                request_fetch(&tx, &runtime, ctx.clone(), city.clone(), token);
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down");
                break;
            }
        }
    }

    Ok(())
}

fn show(
    cli: &Cli,
    state: &DashboardState,
    prefs: &DisplayPreferences,
    clock: &dyn Clock,
) -> Result<()> {
    let Some(report) = state.report() else {
        return Ok(());
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        let now = clock.now();
        println!("{}", render_report(report, prefs, &now));
    }

    if cli.share {
        let message = share_message(&report.current, prefs, &chrono::Local);
        println!("\nShare: {}", whatsapp_share_url(&message));
    }
    Ok(())
}

fn failure(state: &DashboardState) -> anyhow::Error {
    match state.last_error() {
        Some(e) => anyhow!("{} ({})", e.user_message(), e),
        None => anyhow!("weather fetch failed"),
    }
}
