use clap::Parser;
use tokio::sync::watch;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use ledclock::config::{Overrides, Settings};
use ledclock::driver::{self, OutputDriver};
use ledclock::engine::{self, ClockEngine};
use ledclock::error::Result;
use ledclock::input::TimeInput;
use ledclock::layout::ClockKind;
use ledclock::server;

/// Display time on a seven segment LED or nixie tube clock
#[derive(Parser)]
#[command(name = "ledclock")]
struct Cli {
    /// Time to start the clock at, as HHMM (defaults to the local time)
    #[arg(value_name = "HHMM")]
    time: Option<String>,
    /// Log the line writes instead of setting any GPIO pins
    #[arg(long, alias = "dry_run")]
    dry_run: bool,
    /// Type of clock: "tube" (default) or "led"
    #[arg(long = "type", value_name = "TYPE")]
    clock_type: Option<String>,
    /// Config file to read instead of ledclock.toml
    #[arg(long)]
    config: Option<String>,
    /// Address the web form listens on
    #[arg(long)]
    bind: Option<String>,
}

#[cfg(feature = "rpi")]
fn output(kind: ClockKind, dry_run: bool) -> Box<dyn OutputDriver> {
    if dry_run {
        return driver::select::<driver::PinBank<rppal::gpio::OutputPin>>(kind, None);
    }
    match driver::rpi::gpio_bank() {
        Ok(bank) => driver::select(kind, Some(bank)),
        Err(e) => {
            warn!(error = %e, "GPIO not available, forcing a dry run");
            driver::select::<driver::PinBank<rppal::gpio::OutputPin>>(kind, None)
        }
    }
}

#[cfg(not(feature = "rpi"))]
fn output(kind: ClockKind, dry_run: bool) -> Box<dyn OutputDriver> {
    if !dry_run {
        warn!("built without GPIO support, forcing a dry run");
    }
    Box::new(driver::DryRunDriver::new(kind))
}

async fn serve(settings: Settings) -> Result<()> {
    let start = settings.start()?;
    let input = TimeInput::new();
    let engine = ClockEngine::new(start, output(settings.clock_type, settings.dry_run), input.clone());

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let ticker = tokio::spawn(engine::run(engine, shutdown_rx));

    let listener = tokio::net::TcpListener::bind(settings.bind.as_str()).await?;
    info!(bind = %settings.bind, clock = %settings.clock_type, "web form listening");
    axum::serve(listener, server::router(input))
        .with_graceful_shutdown(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "cannot listen for ctrl-c");
            }
            info!("Received a keyboard interrupt, cleaning up GPIO");
        })
        .await?;

    // the display lines are reset once the tick loop sees this
    if shutdown_tx.send(true).is_err() {
        warn!("tick loop already gone, display lines may not have been reset");
    }
    if let Err(e) = ticker.await {
        warn!(error = %e, "tick loop ended abnormally");
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let overrides = Overrides {
        config_file: cli.config,
        clock_type: cli.clock_type,
        dry_run: cli.dry_run,
        start_time: cli.time,
        bind: cli.bind,
    };
    let settings = match Settings::load(overrides) {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %e, "Unknown clock type or bad settings, aborting");
            std::process::exit(1);
        }
    };
    if let Err(e) = serve(settings).await {
        error!(error = %e, "clock stopped");
        std::process::exit(1);
    }
}
