#![cfg(feature = "std")]

//! Stderr logging configured from `BROADSIDE_LOG`.
//!
//! The variable takes comma-separated directives: a bare level sets the
//! default, `target=level` overrides it for a module path and everything
//! below it. `warn,broadside::strategy=trace` keeps the scheduler quiet
//! while tracing every heatmap and queue update.

use log::{self, LevelFilter, Metadata, Record};
use std::env;

pub const LOG_ENV: &str = "BROADSIDE_LOG";

/// Default level plus per-target overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFilter {
    default: LevelFilter,
    targets: Vec<(String, LevelFilter)>,
}

impl Default for LogFilter {
    fn default() -> Self {
        Self {
            default: LevelFilter::Info,
            targets: Vec::new(),
        }
    }
}

impl LogFilter {
    /// Parse a directive list. Malformed directives are skipped.
    pub fn parse(spec: &str) -> Self {
        let mut filter = Self::default();
        for directive in spec.split(',').map(str::trim).filter(|d| !d.is_empty()) {
            match directive.split_once('=') {
                None => {
                    if let Ok(level) = directive.parse() {
                        filter.default = level;
                    }
                }
                Some((target, level)) => {
                    let target = target.trim();
                    match level.trim().parse::<LevelFilter>() {
                        Ok(level) if !target.is_empty() => {
                            filter.targets.retain(|(t, _)| t != target);
                            filter.targets.push((target.to_string(), level));
                        }
                        _ => {}
                    }
                }
            }
        }
        filter
    }

    /// Level for `target`; the longest matching module prefix wins.
    pub fn level_for(&self, target: &str) -> LevelFilter {
        self.targets
            .iter()
            .filter(|(prefix, _)| {
                target
                    .strip_prefix(prefix.as_str())
                    .map_or(false, |rest| rest.is_empty() || rest.starts_with("::"))
            })
            .max_by_key(|(prefix, _)| prefix.len())
            .map_or(self.default, |&(_, level)| level)
    }

    /// Most verbose level any target can reach.
    pub fn max_level(&self) -> LevelFilter {
        self.targets
            .iter()
            .map(|&(_, level)| level)
            .fold(self.default, Ord::max)
    }
}

struct StderrLogger {
    filter: LogFilter,
}

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.filter.level_for(metadata.target())
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{:<5} {}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Install the stderr logger with directives from `BROADSIDE_LOG`.
/// Defaults to `info` everywhere. Repeated calls are no-ops.
pub fn init_logging() {
    let filter = env::var(LOG_ENV)
        .map(|spec| LogFilter::parse(&spec))
        .unwrap_or_default();
    let max = filter.max_level();
    let _ = log::set_boxed_logger(Box::new(StderrLogger { filter }))
        .map(|()| log::set_max_level(max));
}
