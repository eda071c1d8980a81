//! Conversion timing and the rewrite debug log.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

static ENABLED: AtomicBool = AtomicBool::new(false);
static DEBUG_LOG_ENABLED: AtomicBool = AtomicBool::new(false);
static DEBUG_LOG: LazyLock<Mutex<DebugLog>> = LazyLock::new(|| Mutex::new(DebugLog::new()));

/// Prints its lifetime in milliseconds on drop when timing is enabled.
#[derive(Debug)]
pub struct Scope {
    name: &'static str,
    start: Instant,
}

impl Drop for Scope {
    fn drop(&mut self) {
        if !is_enabled() {
            return;
        }
        let elapsed_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        eprintln!("[perf] {}: {:.3} ms", self.name, elapsed_ms);
    }
}

#[derive(Debug)]
struct DebugLog {
    start: Instant,
    writer: Option<BufWriter<File>>,
}

impl DebugLog {
    fn new() -> Self {
        Self {
            start: Instant::now(),
            writer: None,
        }
    }
}

fn debug_log() -> MutexGuard<'static, DebugLog> {
    DEBUG_LOG.lock().unwrap_or_else(PoisonError::into_inner)
}

pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

pub fn scope(name: &'static str) -> Scope {
    Scope {
        name,
        start: Instant::now(),
    }
}

/// Start writing rewrite events to `path`, or stop when `None`.
///
/// # Errors
/// Returns an error if the log file cannot be created or written.
pub fn set_debug_log_path(path: Option<&Path>) -> std::io::Result<()> {
    let mut log = debug_log();
    if let Some(path) = path {
        let mut writer = BufWriter::new(File::create(path)?);
        writeln!(writer, "marksmith rewrite log start")?;
        writer.flush()?;
        log.start = Instant::now();
        log.writer = Some(writer);
        DEBUG_LOG_ENABLED.store(true, Ordering::Relaxed);
    } else {
        DEBUG_LOG_ENABLED.store(false, Ordering::Relaxed);
        if let Some(mut writer) = log.writer.take() {
            writer.flush()?;
        }
    }
    Ok(())
}

/// Cheap check so callers can skip formatting event details.
pub fn is_debug_log_enabled() -> bool {
    DEBUG_LOG_ENABLED.load(Ordering::Relaxed)
}

pub fn log_event(name: &str, detail: impl AsRef<str>) {
    if !is_debug_log_enabled() {
        return;
    }
    let mut log = debug_log();
    let elapsed_ms = log.start.elapsed().as_secs_f64() * 1000.0;
    if let Some(writer) = log.writer.as_mut() {
        let _ = writeln!(writer, "[{elapsed_ms:>10.3} ms] {name}: {}", detail.as_ref());
        let _ = writer.flush();
    }
}
