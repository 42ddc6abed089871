use anyhow::Result;
use movie_discovery_config::{LoggingConfig, PathManager};
use std::io;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::{self, time::ChronoUtc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};
use tracing_appender::rolling::{RollingFileAppender, Rotation};

const JSON_ENV: &str = "MOVIESCOUT_LOG_JSON";

/// `log_file` wins over `[logging] file`; with neither, logs go to stderr
pub fn init_logging(
    verbose_level: u8,
    quiet: bool,
    settings: &LoggingConfig,
    log_file: Option<PathBuf>,
) -> Result<()> {
    // 0 = configured level, 1 = debug without hyper noise, 2+ = trace
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        let default_filter = match verbose_level {
            0 => settings.level.as_str(),
            1 => "debug,hyper::proto::h1=warn,hyper::client::pool=warn",
            _ => "trace",
        };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
    };

    let json = json_requested(settings);
    let registry = Registry::default().with(filter);

    match log_file.as_ref().or(settings.file.as_ref()) {
        Some(log_path) => {
            let file_appender = rolling_appender(log_path)?;
            if json {
                let json_layer = fmt::layer()
                    .json()
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(file_appender);
                registry.with(json_layer).init();
            } else {
                let fmt_layer = fmt::layer()
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(false)
                    .with_writer(file_appender);
                registry.with(fmt_layer).init();
            }
        }
        None => {
            if json {
                let json_layer = fmt::layer()
                    .json()
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(io::stderr);
                registry.with(json_layer).init();
            } else {
                let fmt_layer = fmt::layer()
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(io::stderr);
                registry.with(fmt_layer).init();
            }
        }
    }

    Ok(())
}

/// File asked for with `--log-file`: the configured one, else the default under the config dir
pub fn requested_log_file(requested: bool, settings: &LoggingConfig, paths: &PathManager) -> Option<PathBuf> {
    requested.then(|| settings.file.clone().unwrap_or_else(|| paths.default_log_file()))
}

/// Environment first, then the config file, then "not a terminal"
fn json_requested(settings: &LoggingConfig) -> bool {
    std::env::var(JSON_ENV)
        .ok()
        .map(|v| v == "true")
        .or(settings.json)
        .unwrap_or_else(|| !io::stdout().is_terminal())
}

/// Daily rotation: moviescout.log becomes moviescout.YYYY-MM-DD
fn rolling_appender(log_path: &Path) -> Result<RollingFileAppender> {
    let log_dir = log_path
        .parent()
        .ok_or_else(|| anyhow::anyhow!("Log file path has no parent directory"))?;
    std::fs::create_dir_all(log_dir)?;

    let log_filename = log_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("Invalid log filename"))?;
    let log_prefix = log_filename.rsplitn(2, '.').nth(1).unwrap_or(log_filename);

    Ok(RollingFileAppender::new(Rotation::DAILY, log_dir, log_prefix))
}
