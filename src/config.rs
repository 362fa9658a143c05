//! Startup settings, layered: defaults, optional config file, `LEDCLOCK_*`
//! environment variables, then command line flags.

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::Result;
use crate::input::parse_hhmm;
use crate::layout::ClockKind;
use crate::time::ClockTime;

pub const DEFAULT_CONFIG_FILE: &str = "ledclock.toml";
pub const DEFAULT_BIND: &str = "0.0.0.0:1080";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub clock_type: ClockKind,
    pub dry_run: bool,
    pub start_time: Option<String>,
    pub bind: String,
}

/// Values given on the command line; `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub config_file: Option<String>,
    pub clock_type: Option<String>,
    pub dry_run: bool,
    pub start_time: Option<String>,
    pub bind: Option<String>,
}

impl Settings {
    pub fn load(overrides: Overrides) -> Result<Settings> {
        let (file, required) = match overrides.config_file {
            Some(path) => (path, true),
            None => (DEFAULT_CONFIG_FILE.to_string(), false),
        };
        let mut builder = Config::builder()
            .set_default("clock_type", "tube")?
            .set_default("dry_run", false)?
            .set_default("bind", DEFAULT_BIND)?
            .add_source(File::with_name(&file).required(required))
            .add_source(Environment::with_prefix("LEDCLOCK"))
            .set_override_option("clock_type", overrides.clock_type)?
            .set_override_option("start_time", overrides.start_time)?
            .set_override_option("bind", overrides.bind)?;
        if overrides.dry_run {
            builder = builder.set_override("dry_run", true)?;
        }
        let settings: Settings = builder.build()?.try_deserialize()?;
        // reject a bad start time now rather than on the first tick
        settings.start()?;
        Ok(settings)
    }

    /// The configured start time, or the local wall time if none was given.
    pub fn start(&self) -> Result<ClockTime> {
        match &self.start_time {
            Some(raw) => Ok(parse_hhmm(raw)?),
            None => Ok(ClockTime::now()),
        }
    }
}
