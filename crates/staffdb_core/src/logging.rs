//! Process-wide file logging.
//!
//! Core modules only emit through the `log` facade; a binary decides whether
//! those records go anywhere by calling [`init_logging`] once at startup.
//! Records carry ids, counts and durations only, never names or salaries.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

const LOG_BASENAME: &str = "staffdb";
const ROTATE_AT_BYTES: u64 = 4 * 1024 * 1024;
const KEEP_ROTATED: usize = 3;
const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

static ACTIVE: OnceCell<ActiveLogger> = OnceCell::new();

struct ActiveLogger {
    level: &'static str,
    dir: PathBuf,
    handle: LoggerHandle,
}

/// Starts rotating file logs at `level` under the absolute directory `log_dir`.
///
/// Calling again with the same level and directory is a no-op; any other
/// combination is rejected because the first logger stays in place for the
/// life of the process.
pub fn init_logging(level: &str, log_dir: &str) -> Result<(), String> {
    let level = parse_level(level)?;
    let dir = parse_log_dir(log_dir)?;

    let active = ACTIVE.get_or_try_init(|| start(level, &dir))?;
    if active.level != level || active.dir != dir {
        return Err(format!(
            "logging already writes `{}` records to `{}`",
            active.level,
            active.dir.display()
        ));
    }
    Ok(())
}

/// Writes buffered records to disk. No-op before [`init_logging`].
pub fn flush_logging() {
    if let Some(active) = ACTIVE.get() {
        active.handle.flush();
    }
}

/// `debug` for debug builds, `info` for release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start(level: &'static str, dir: &Path) -> Result<ActiveLogger, String> {
    std::fs::create_dir_all(dir)
        .map_err(|err| format!("cannot create log directory `{}`: {err}", dir.display()))?;

    let handle = Logger::try_with_str(level)
        .map_err(|err| err.to_string())?
        .log_to_file(FileSpec::default().directory(dir).basename(LOG_BASENAME))
        .rotate(
            Criterion::Size(ROTATE_AT_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(KEEP_ROTATED),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| format!("cannot start file logger: {err}"))?;

    info!(
        "event=logging_init module=core status=ok version={} level={level}",
        env!("CARGO_PKG_VERSION")
    );

    Ok(ActiveLogger {
        level,
        dir: dir.to_path_buf(),
        handle,
    })
}

fn parse_level(level: &str) -> Result<&'static str, String> {
    let wanted = level.trim().to_ascii_lowercase();
    let wanted = if wanted == "warning" { "warn" } else { wanted.as_str() };
    LEVELS
        .into_iter()
        .find(|known| *known == wanted)
        .ok_or_else(|| format!("unknown log level `{level}`, use one of {}", LEVELS.join("|")))
}

fn parse_log_dir(log_dir: &str) -> Result<PathBuf, String> {
    let dir = Path::new(log_dir.trim());
    if !dir.is_absolute() {
        return Err(format!("log directory must be absolute, got `{log_dir}`"));
    }
    Ok(dir.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::{flush_logging, init_logging, parse_level, parse_log_dir};

    #[test]
    fn parse_level_is_case_insensitive_and_accepts_warning() {
        assert_eq!(parse_level(" INFO ").unwrap(), "info");
        assert_eq!(parse_level("warning").unwrap(), "warn");
        assert!(parse_level("verbose").unwrap_err().contains("trace|debug"));
    }

    #[test]
    fn parse_log_dir_requires_an_absolute_path() {
        assert!(parse_log_dir("logs").is_err());
        assert!(parse_log_dir("  ").is_err());
    }

    #[test]
    fn second_init_must_match_the_first() {
        let first = tempfile::tempdir().unwrap();
        let other = tempfile::tempdir().unwrap();
        let first_dir = first.path().to_str().unwrap();

        init_logging("info", first_dir).unwrap();
        init_logging("Info", first_dir).unwrap();
        assert!(init_logging("debug", first_dir).is_err());
        assert!(init_logging("info", other.path().to_str().unwrap()).is_err());

        log::info!("event=logging_test module=core status=ok");
        flush_logging();
        let written = std::fs::read_dir(first.path()).unwrap().count();
        assert!(written > 0);
    }
}
