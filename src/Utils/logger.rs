//! Logger setup shared by the calculator entry points.
//!
//! The level comes from the calculator settings as an optional string in the
//! same spirit as the solver configuration: `None` means the default "info",
//! "off" or "none" disables logging entirely, and "debug" additionally
//! writes a timestamped log file next to the artifacts.

use chrono::Local;
use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};
use std::fs::File;

/// Maps a level string to the filter; unknown strings fall back to Info
/// rather than aborting the evaluation.
pub fn level_filter(loglevel: Option<&str>) -> Option<LevelFilter> {
    match loglevel {
        Some("off") | Some("none") => None,
        Some("debug") => Some(LevelFilter::Debug),
        Some("warn") => Some(LevelFilter::Warn),
        Some("error") => Some(LevelFilter::Error),
        Some(_) | None => Some(LevelFilter::Info),
    }
}

/// Initializes the global logger once; repeated calls are no-ops because
/// every "Calculate" action goes through the same wrapper.
pub fn init_logger(loglevel: Option<&str>) {
    let Some(filter) = level_filter(loglevel) else {
        return;
    };

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        filter,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];

    if filter == LevelFilter::Debug {
        let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
        let name = format!("log_{}.txt", date_and_time);
        if let Ok(file) = File::create(&name) {
            loggers.push(WriteLogger::new(filter, Config::default(), file));
        }
    }

    // a second init (another calculator instance) keeps the first logger
    let _ = CombinedLogger::init(loggers);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_filter_mapping() {
        assert_eq!(level_filter(Some("off")), None);
        assert_eq!(level_filter(Some("none")), None);
        assert_eq!(level_filter(Some("debug")), Some(LevelFilter::Debug));
        assert_eq!(level_filter(Some("warn")), Some(LevelFilter::Warn));
        assert_eq!(level_filter(Some("error")), Some(LevelFilter::Error));
        assert_eq!(level_filter(Some("info")), Some(LevelFilter::Info));
        assert_eq!(level_filter(None), Some(LevelFilter::Info));
    }

    #[test]
    fn test_unknown_level_defaults_to_info() {
        assert_eq!(level_filter(Some("verbose")), Some(LevelFilter::Info));
    }

    #[test]
    fn test_repeated_init_does_not_panic() {
        init_logger(Some("info"));
        init_logger(Some("debug"));
        init_logger(Some("off"));
    }
}
