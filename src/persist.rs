//! Persisted state layout for the external persistence collaborator.
//!
//! The in-memory model is an id-keyed arena plus an order list; the
//! external layout is the historical parallel-list shape: canvas titles
//! and canvas title ids, index-aligned, plus the active-canvas index and
//! the note trash. Index *i* of each list describes the same canvas. Live
//! note content is stored out-of-band by the collaborator and is not part
//! of this layout.

use crate::registry::{CanvasRegistry, TrashedNote};
use crate::types::{CanvasId, NoteId};
use serde::{Deserialize, Serialize};

/// Serialized workspace state.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceSnapshot {
    /// Canvas titles in display order
    pub canvas_titles: Vec<String>,
    /// Canvas ids, index-aligned with `canvas_titles`
    pub canvas_title_ids: Vec<CanvasId>,
    /// Index of the active canvas in the ordered lists, none when empty
    pub current_canvas_index: Option<usize>,
    /// Removed notes retained for recovery, oldest first
    pub trashed_notes: Vec<TrashedNote>,
    /// The most recently restored note, if any
    pub recovered_note: Option<NoteId>,
}

impl WorkspaceSnapshot {
    /// Materialize the parallel-list layout from the registry.
    pub fn capture(registry: &CanvasRegistry) -> Self {
        let mut canvas_titles = Vec::with_capacity(registry.len());
        let mut canvas_title_ids = Vec::with_capacity(registry.len());
        for (id, title) in registry.list() {
            canvas_titles.push(title.to_string());
            canvas_title_ids.push(id);
        }
        Self {
            canvas_titles,
            canvas_title_ids,
            current_canvas_index: registry.active_canvas_index(),
            trashed_notes: registry.trashed_notes().to_vec(),
            recovered_note: registry.last_recovered(),
        }
    }

    /// Rebuild a registry from the layout. Identity, order, the active
    /// canvas, and the trash come back; the id counter is re-armed past
    /// every persisted id so ids are never reused. A title without a
    /// matching id (misaligned lists) is dropped with a warning.
    pub fn restore(&self) -> CanvasRegistry {
        if self.canvas_titles.len() != self.canvas_title_ids.len() {
            tracing::warn!(
                titles = self.canvas_titles.len(),
                ids = self.canvas_title_ids.len(),
                "misaligned snapshot lists, extra entries dropped"
            );
        }
        let mut registry = CanvasRegistry::new();
        for (title, id) in self.canvas_titles.iter().zip(&self.canvas_title_ids) {
            registry.restore_canvas(*id, title.clone());
        }
        registry.restore_active_index(self.current_canvas_index);
        registry.restore_trash(self.trashed_notes.clone());
        registry.restore_recovered(self.recovered_note);
        registry
    }
}
