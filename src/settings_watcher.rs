//! Settings hot-reload watcher.
//!
//! Watches the settings file with `notify` and applies changes to the
//! shared handle when polled. Polling keeps the reload on the caller's
//! thread, so there is no callback reentrancy into live sessions.

use crate::settings::{self, SettingsHandle};
use anyhow::{Context, Result};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, channel};

/// Event surfaced by a poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsEvent {
    Modified,
}

/// Watches one settings file for modification.
pub struct SettingsWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<notify::Event>>,
    path: PathBuf,
}

impl SettingsWatcher {
    pub fn new(path: PathBuf) -> Result<Self> {
        let (tx, rx) = channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })
        .context("creating settings watcher")?;
        watcher
            .watch(&path, RecursiveMode::NonRecursive)
            .with_context(|| format!("watching settings file {}", path.display()))?;
        Ok(Self {
            _watcher: watcher,
            rx,
            path,
        })
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Drain pending file system events. Returns `Some(Modified)` when the
    /// settings file changed since the last poll.
    pub fn poll(&mut self) -> Option<SettingsEvent> {
        let mut seen = false;
        while let Ok(event) = self.rx.try_recv() {
            match event {
                Ok(event)
                    if matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) =>
                {
                    seen = true;
                }
                Ok(_) => {}
                Err(err) => tracing::warn!(error = %err, "settings watcher error"),
            }
        }
        seen.then_some(SettingsEvent::Modified)
    }

    /// Poll and, when the file changed, reload it into `handle`. Returns
    /// true when a reload was applied.
    pub fn poll_and_apply(&mut self, handle: &SettingsHandle) -> bool {
        if self.poll().is_none() {
            return false;
        }
        match settings::load_from(&self.path) {
            Ok(new_settings) => {
                *handle.write() = new_settings;
                tracing::info!(path = %self.path.display(), "settings reloaded");
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to reload settings, keeping current");
                false
            }
        }
    }
}
