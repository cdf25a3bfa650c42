use parking_lot::Mutex;
/// Logging infrastructure for avour
///
/// All `log::info!()` etc. calls are routed through a bridge logger that
/// writes to `avour_debug.log` in the temp directory (/tmp on Unix/macOS,
/// %TEMP% on Windows). When RUST_LOG is set the same lines are mirrored to
/// stderr.
///
/// Level precedence:
/// 1. `--log-level` CLI flag
/// 2. RUST_LOG environment variable
/// 3. `log_level` from the config file (applied after the config loads)
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

struct BridgeLogger {
    file: Mutex<Option<File>>,
    mirror_stderr: bool,
}

impl BridgeLogger {
    fn write_line(&self, line: &str) {
        let mut file = self.file.lock();
        if file.is_none() {
            *file = open_log_file();
        }
        if let Some(file) = file.as_mut() {
            let _ = file.write_all(line.as_bytes());
            let _ = file.flush();
        }
        if self.mirror_stderr {
            eprint!("{line}");
        }
    }
}

impl log::Log for BridgeLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        self.write_line(&format!(
            "[{}] [{:<5}] [{}] {}\n",
            get_timestamp(),
            record.level(),
            record.target(),
            record.args()
        ));
    }

    fn flush(&self) {
        if let Some(file) = self.file.lock().as_mut() {
            let _ = file.flush();
        }
    }
}

static LOGGER: OnceLock<BridgeLogger> = OnceLock::new();

/// Set when the level came from the CLI or RUST_LOG, so the config cannot override it.
static LEVEL_PINNED: AtomicBool = AtomicBool::new(false);

fn open_log_file() -> Option<File> {
    let path = log_path();
    match OpenOptions::new()
        .write(true)
        .truncate(true)
        .create(true)
        .open(&path)
    {
        Ok(mut f) => {
            let _ = writeln!(
                f,
                "{}\navour debug session started at {}\n{}",
                "=".repeat(80),
                get_timestamp(),
                "=".repeat(80)
            );
            Some(f)
        }
        // Logging must never take the sketch down
        Err(_) => None,
    }
}

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

fn rust_log_level() -> Option<log::LevelFilter> {
    let value = std::env::var("RUST_LOG").ok()?;
    // Module-scoped filters ("avour=debug") are not supported; treat them as info
    Some(value.trim().parse().unwrap_or(log::LevelFilter::Info))
}

/// Path of the debug log file.
pub fn log_path() -> PathBuf {
    #[cfg(unix)]
    {
        PathBuf::from("/tmp/avour_debug.log")
    }
    #[cfg(not(unix))]
    {
        std::env::temp_dir().join("avour_debug.log")
    }
}

/// Install the bridge logger. Safe to call more than once; later calls only
/// adjust the level.
pub fn init_log_bridge(cli_level: Option<log::LevelFilter>) {
    let env_level = rust_log_level();
    let level = cli_level.or(env_level);
    LEVEL_PINNED.store(level.is_some(), Ordering::Relaxed);

    let logger = LOGGER.get_or_init(|| BridgeLogger {
        file: Mutex::new(None),
        mirror_stderr: env_level.is_some(),
    });
    // Fails only when another logger is already installed (e.g. in tests)
    let _ = log::set_logger(logger);
    log::set_max_level(level.unwrap_or(log::LevelFilter::Off));
}

/// Apply the config file's log level unless the CLI or RUST_LOG pinned one.
pub fn apply_config_log_level(level: log::LevelFilter) {
    if !LEVEL_PINNED.load(Ordering::Relaxed) {
        log::set_max_level(level);
    }
}

// Category macros: the category becomes the log target
#[macro_export]
macro_rules! debug_error {
    ($category:expr, $($arg:tt)*) => {
        log::error!(target: $category, $($arg)*)
    };
}

#[macro_export]
macro_rules! debug_info {
    ($category:expr, $($arg:tt)*) => {
        log::info!(target: $category, $($arg)*)
    };
}

#[macro_export]
macro_rules! debug_log {
    ($category:expr, $($arg:tt)*) => {
        log::debug!(target: $category, $($arg)*)
    };
}

#[macro_export]
macro_rules! debug_trace {
    ($category:expr, $($arg:tt)*) => {
        log::trace!(target: $category, $($arg)*)
    };
}
