//! Re-conversion on source changes.
//!
//! Uses notify for cross-platform file system events. The parent directory
//! is watched, not the file itself.
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};

/// Debounced change notifications for one source file.
pub struct SourceWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
    watch_root: PathBuf,
    source_path: PathBuf,
    source_name: Option<OsString>,
    debounce: Duration,
    pending_since: Option<Instant>,
}

impl SourceWatcher {
    /// Watch `path`, reporting a change once events settle for `debounce`.
    ///
    /// # Errors
    /// Returns an error if the OS watcher cannot be created or attached.
    pub fn new(path: impl AsRef<Path>, debounce: Duration) -> notify::Result<Self> {
        // Event paths from the OS are canonical.
        let source_path = path
            .as_ref()
            .canonicalize()
            .unwrap_or_else(|_| path.as_ref().to_path_buf());
        let source_name = source_path.file_name().map(std::ffi::OsStr::to_os_string);
        let watch_root = watch_root_for(&source_path);

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })?;
        watcher.watch(&watch_root, RecursiveMode::NonRecursive)?;
        tracing::debug!(root = %watch_root.display(), "watching for changes");

        Ok(Self {
            _watcher: watcher,
            rx,
            watch_root,
            source_path,
            source_name,
            debounce,
            pending_since: None,
        })
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Drain pending events; true once a debounced change is ready.
    pub fn take_change_ready(&mut self) -> bool {
        let mut relevant = 0u32;
        let mut ignored = 0u32;
        while let Ok(event) = self.rx.try_recv() {
            match event {
                Ok(ev) if self.is_relevant(&ev) => relevant += 1,
                Ok(_) => ignored += 1,
                Err(err) => {
                    tracing::warn!(%err, "watch error");
                    crate::perf::log_event("watch.error", err.to_string());
                }
            }
        }

        if relevant + ignored > 0 {
            crate::perf::log_event(
                "watch.poll",
                format!(
                    "relevant={relevant} ignored={ignored} source={}",
                    self.source_path.display()
                ),
            );
        }
        if relevant > 0 {
            self.pending_since = Some(Instant::now());
        }

        match self.pending_since {
            Some(since) if since.elapsed() >= self.debounce => {
                self.pending_since = None;
                true
            }
            _ => false,
        }
    }

    /// Block until a debounced change is ready, polling every `interval`.
    pub fn wait_for_change(&mut self, interval: Duration) {
        while !self.take_change_ready() {
            std::thread::sleep(interval);
        }
    }

    fn is_relevant(&self, event: &Event) -> bool {
        event.paths.iter().any(|path| {
            path == &self.watch_root
                || path == &self.source_path
                || self
                    .source_name
                    .as_ref()
                    .is_some_and(|name| path.file_name().is_some_and(|f| f == name))
        })
    }
}

fn watch_root_for(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::EventKind;
    use tempfile::tempdir;

    fn event(paths: Vec<PathBuf>) -> Event {
        Event {
            kind: EventKind::Any,
            paths,
            attrs: notify::event::EventAttributes::new(),
        }
    }

    #[test]
    fn test_directory_event_counts_for_source() {
        let dir = tempdir().expect("tempdir");
        let canonical_dir = dir.path().canonicalize().expect("canonicalize");
        let path = canonical_dir.join("notes.md");
        std::fs::write(&path, "# hi").expect("write");
        let watcher = SourceWatcher::new(&path, Duration::from_millis(10)).expect("watcher");

        assert!(watcher.is_relevant(&event(vec![canonical_dir])));
    }

    #[test]
    fn test_sibling_file_event_is_ignored() {
        let dir = tempdir().expect("tempdir");
        let canonical_dir = dir.path().canonicalize().expect("canonicalize");
        let path = canonical_dir.join("notes.md");
        std::fs::write(&path, "# hi").expect("write");
        let watcher = SourceWatcher::new(&path, Duration::from_millis(10)).expect("watcher");

        assert!(!watcher.is_relevant(&event(vec![canonical_dir.join("other.md")])));
    }

    #[test]
    fn test_watch_root_for_relative_file_is_dot() {
        assert_eq!(watch_root_for(Path::new("README.md")), PathBuf::from("."));
    }

    #[test]
    fn test_real_file_modification_detected() {
        let dir = tempdir().expect("tempdir");
        let canonical_dir = dir.path().canonicalize().expect("canonicalize");
        let path = canonical_dir.join("watched.md");
        std::fs::write(&path, "original").expect("write");

        let mut watcher = SourceWatcher::new(&path, Duration::from_millis(50)).expect("watcher");

        // Let the backend register the watch.
        std::thread::sleep(Duration::from_millis(500));
        std::fs::write(&path, "modified").expect("write");

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut detected = false;
        while Instant::now() < deadline {
            if watcher.take_change_ready() {
                detected = true;
                break;
            }
            std::thread::sleep(Duration::from_millis(50));
        }

        assert!(detected, "watcher should detect modification within 5 seconds");
    }
}
