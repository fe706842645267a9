use crossbeam_channel::Sender;
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};

/// Watches the catalog file on notify's background thread and forwards
/// events to a channel. Only one catalog is watched at a time.
pub struct FileWatcher {
    watcher: RecommendedWatcher,
    current: Option<PathBuf>,
}

impl FileWatcher {
    pub fn new(tx: Sender<notify::Result<Event>>) -> notify::Result<Self> {
        let watcher = notify::recommended_watcher(move |res| {
            // Receiver dropped means the REPL is shutting down
            let _ = tx.send(res);
        })?;

        Ok(Self {
            watcher,
            current: None,
        })
    }

    /// Watch `path`, replacing any previously watched catalog
    pub fn watch<P: AsRef<Path>>(&mut self, path: P) -> notify::Result<()> {
        let path = path.as_ref();
        self.watcher.watch(path, RecursiveMode::NonRecursive)?;

        if let Some(previous) = self.current.replace(path.to_path_buf()) {
            if previous != path {
                if let Err(e) = self.watcher.unwatch(&previous) {
                    log::debug!("Failed to unwatch {}: {}", previous.display(), e);
                }
            }
        }
        log::info!("Watching catalog {}", path.display());
        Ok(())
    }

    pub fn current(&self) -> Option<&Path> {
        self.current.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    #[test]
    fn test_watch_missing_file_fails() {
        let (tx, _rx) = unbounded();
        let mut watcher = FileWatcher::new(tx).unwrap();
        assert!(watcher.watch("/definitely/not/here.json").is_err());
        assert!(watcher.current().is_none());
    }

    #[test]
    fn test_watch_replaces_previous() {
        let (tx, _rx) = unbounded();
        let mut watcher = FileWatcher::new(tx).unwrap();
        let dir = std::env::temp_dir();
        let a = dir.join(format!("jazzkeys-watch-a-{}.json", std::process::id()));
        let b = dir.join(format!("jazzkeys-watch-b-{}.json", std::process::id()));
        std::fs::write(&a, "{}").unwrap();
        std::fs::write(&b, "{}").unwrap();

        watcher.watch(&a).unwrap();
        watcher.watch(&b).unwrap();
        assert_eq!(watcher.current(), Some(b.as_path()));

        std::fs::remove_file(&a).unwrap();
        std::fs::remove_file(&b).unwrap();
    }
}
