use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;

use crate::components::preview::{load_preview, PreviewContent};
use crate::epoch::{Epoch, Stamped};

/// Reads previews on short-lived worker threads. Results come back stamped
/// with the epoch they were requested under; the caller decides whether they
/// are still wanted.
pub struct PreviewLoader {
    tx: Sender<Stamped<PreviewContent>>,
    rx: Receiver<Stamped<PreviewContent>>,
}

impl PreviewLoader {
    pub fn new() -> Self {
        let (tx, rx) = channel();
        Self { tx, rx }
    }

    pub fn request(&self, epoch: Epoch, path: PathBuf) {
        let tx = self.tx.clone();
        tracing::debug!(path = %path.display(), epoch = epoch.value(), "preview requested");

        let spawned = thread::Builder::new()
            .name("preview".to_string())
            .spawn(move || {
                let content = load_preview(&path);
                // The app may have exited; nothing to report to.
                let _ = tx.send(epoch.stamp(content));
            });

        if let Err(e) = spawned {
            tracing::warn!("Failed to spawn preview thread: {}", e);
        }
    }

    pub fn drain(&self) -> Vec<Stamped<PreviewContent>> {
        self.rx.try_iter().collect()
    }

    #[cfg(test)]
    fn wait(&self) -> Option<Stamped<PreviewContent>> {
        self.rx.recv_timeout(std::time::Duration::from_secs(5)).ok()
    }
}
