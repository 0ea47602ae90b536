//! Shared setup logic for the scoring subcommands.

use camino::Utf8PathBuf;
use clap::Args;
use clap::ValueEnum;
use core::time::Duration;
use hub_rank::Result;
use hub_rank::config::Config;
use hub_rank::hosting::HostingClient;
use hub_rank::hub::{HttpHub, ModelHub, NullHub};
use hub_rank::metrics::MetricDeps;
use hub_rank::reports::ColorMode;
use std::sync::Arc;

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,
    /// Only error messages
    Error,
    /// Warning and error messages
    Warn,
    /// Info, warning, and error messages
    Info,
    /// Debug and above messages
    Debug,
    /// All messages including trace
    Trace,
}

/// Common arguments shared between subcommands
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// GitHub personal access token
    #[arg(long, value_name = "TOKEN", env = "GITHUB_TOKEN")]
    pub github_token: Option<String>,

    /// Path to configuration file [default: hubrank.toml]
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Don't contact the model hub; metrics that consult the hub fall back to their floor scores
    #[arg(long)]
    pub offline: bool,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,
}

pub struct Common {
    pub deps: MetricDeps,
    pub color: ColorMode,
}

impl Common {
    /// Create a new Common processor with logger, collaborators, and config
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or a client
    /// cannot be constructed.
    pub fn new(args: &CommonArgs) -> Result<Self> {
        init_logging(args.log_level);

        let config = Arc::new(Config::load(args.config.as_deref())?);
        let api_timeout = Duration::from_secs(config.api_timeout_secs);

        let hub: Arc<dyn ModelHub> = if args.offline {
            Arc::new(NullHub)
        } else {
            Arc::new(HttpHub::new(&config.hub_base_url, api_timeout)?)
        };

        let hosting = Arc::new(HostingClient::new(args.github_token.as_deref(), api_timeout)?);

        Ok(Self {
            deps: MetricDeps { hub, hosting, config },
            color: args.color,
        })
    }
}

/// Initialize logger based on log level
pub fn init_logging(log_level: LogLevel) {
    if log_level == LogLevel::None {
        return;
    }

    let level = match log_level {
        LogLevel::None => return, // Already checked above, but being explicit
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug) || matches!(log_level, LogLevel::Trace))
        .init();
}
