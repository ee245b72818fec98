//! Console logger for the `log` facade.

use std::io::Write;
use std::sync::Once;

use log::{Level, LevelFilter, Metadata, Record};

struct ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        // stdout may carry the catalogue JSON; progress goes to stderr.
        let mut err = std::io::stderr().lock();
        let _ = match record.level() {
            Level::Info => writeln!(err, "{}", record.args()),
            level => writeln!(err, "[{}] {}", level, record.args()),
        };
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: ConsoleLogger = ConsoleLogger;
static INIT: Once = Once::new();

/// Maps `-v` occurrences to a level filter.
pub fn level_for(quiet: bool, verbose: u8) -> LevelFilter {
    if quiet {
        return LevelFilter::Warn;
    }
    match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Installs the console logger once; later calls only adjust the level.
pub fn init_logger(level: LevelFilter) {
    INIT.call_once(|| {
        let _ = log::set_logger(&LOGGER);
    });
    log::set_max_level(level);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for() {
        assert_eq!(level_for(false, 0), LevelFilter::Info);
        assert_eq!(level_for(false, 1), LevelFilter::Debug);
        assert_eq!(level_for(false, 5), LevelFilter::Trace);
        assert_eq!(level_for(true, 2), LevelFilter::Warn);
    }
}
