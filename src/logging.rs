//! Log file setup.  The terminal belongs to the game, so log messages go to a
//! file.
use crate::config::Config;
use log::LevelFilter;
use log4rs::{
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
};
use thiserror::Error;

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {l} {t} - {m}{n}";

/// Start logging to the file named in `config`.  Does nothing if the
/// configured level is `off`.
pub(crate) fn init_logging(config: &Config) -> Result<(), LogInitError> {
    let level = config.log.level;
    if level == LevelFilter::Off {
        return Ok(());
    }
    let path = config.log_file().ok_or(LogInitError::NoPath)?;
    let logfile = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build(&path)
        .map_err(LogInitError::Open)?;
    let log_config = log4rs::Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(level)))
                .build("logfile", Box::new(logfile)),
        )
        .build(Root::builder().appender("logfile").build(level))?;
    log4rs::init_config(log_config)?;
    log::info!(
        "snakebite {} starting; logging to {}",
        env!("CARGO_PKG_VERSION"),
        path.display()
    );
    Ok(())
}

#[derive(Debug, Error)]
pub(crate) enum LogInitError {
    #[error("failed to determine path to log file")]
    NoPath,
    #[error("failed to open log file")]
    Open(#[source] std::io::Error),
    #[error("invalid logging configuration")]
    Config(#[from] log4rs::config::runtime::ConfigErrors),
    #[error("a logger has already been installed")]
    SetLogger(#[from] log::SetLoggerError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logging_off() {
        let mut config = Config::default();
        config.log.level = LevelFilter::Off;
        assert!(init_logging(&config).is_ok());
    }
}
