//! Canvas registry - the ordered collection of canvases with stable identity.
//!
//! Identity is index-independent: canvases live in an id-keyed arena while
//! display order is a separately mutable list of ids. Reordering permutes
//! the order list only, so which id maps to which title can never change
//! under any permutation. This is the arena+order replacement for the
//! historical parallel title/id arrays (see `persist` for that layout).

use crate::error::{RegistryError, RegistryResult};
use crate::types::{CanvasBounds, CanvasId, Note, NoteId, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Canvas
// ============================================================================

/// A named workspace containing notes.
#[derive(Clone, Debug)]
pub struct Canvas {
    pub id: CanvasId,
    pub title: String,
    /// Arena the settle physics clamps notes into
    pub bounds: CanvasBounds,
    notes: HashMap<NoteId, Note>,
    next_note_id: u64,
}

impl Canvas {
    fn new(id: CanvasId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            bounds: CanvasBounds::default(),
            notes: HashMap::new(),
            next_note_id: 1,
        }
    }

    /// Create a note on this canvas and return its id. Ids are scoped to
    /// the canvas and never reused.
    pub fn add_note(
        &mut self,
        title: impl Into<String>,
        body: impl Into<String>,
        position: Vec2,
    ) -> NoteId {
        let id = NoteId(self.next_note_id);
        self.next_note_id += 1;
        self.notes
            .insert(id, Note::new(id, self.id, title, body, position));
        id
    }

    /// Re-attach an existing note (trash recovery, re-parenting). Keeps
    /// the note's id when it is still free on this canvas, otherwise
    /// mints a fresh one. Returns the id the note ended up with.
    pub fn insert_note(&mut self, mut note: Note) -> NoteId {
        if note.canvas_id != self.id || self.notes.contains_key(&note.id) {
            note.id = NoteId(self.next_note_id);
        }
        self.next_note_id = self.next_note_id.max(note.id.0 + 1);
        note.canvas_id = self.id;
        let id = note.id;
        self.notes.insert(id, note);
        id
    }

    pub fn get_note(&self, id: NoteId) -> Option<&Note> {
        self.notes.get(&id)
    }

    pub fn get_note_mut(&mut self, id: NoteId) -> Option<&mut Note> {
        self.notes.get_mut(&id)
    }

    pub fn remove_note(&mut self, id: NoteId) -> Option<Note> {
        self.notes.remove(&id)
    }

    pub fn notes(&self) -> impl Iterator<Item = &Note> {
        self.notes.values()
    }

    pub fn note_count(&self) -> usize {
        self.notes.len()
    }
}

/// A trashed note together with the canvas it was removed from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrashedNote {
    pub canvas_id: CanvasId,
    pub note: Note,
}

// ============================================================================
// CanvasRegistry
// ============================================================================

/// Owns all canvases, their display order, the active-canvas pointer, and
/// the note trash.
#[derive(Debug)]
pub struct CanvasRegistry {
    canvases: HashMap<CanvasId, Canvas>,
    order: Vec<CanvasId>,
    next_canvas_id: u64,
    active: Option<CanvasId>,
    trashed: Vec<TrashedNote>,
    recovered: Option<NoteId>,
}

impl Default for CanvasRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasRegistry {
    pub fn new() -> Self {
        Self {
            canvases: HashMap::new(),
            order: Vec::new(),
            next_canvas_id: 1,
            active: None,
            trashed: Vec::new(),
            recovered: None,
        }
    }

    // ==================== Canvas CRUD ====================

    /// Append a new empty canvas and return its freshly minted id. The
    /// first canvas created becomes the active one.
    pub fn create_canvas(&mut self, title: impl Into<String>) -> CanvasId {
        let id = CanvasId(self.next_canvas_id);
        self.next_canvas_id += 1;
        self.canvases.insert(id, Canvas::new(id, title));
        self.order.push(id);
        if self.active.is_none() {
            self.active = Some(id);
        }
        id
    }

    pub fn rename_canvas(&mut self, id: CanvasId, title: impl Into<String>) -> RegistryResult<()> {
        let canvas = self
            .canvases
            .get_mut(&id)
            .ok_or(RegistryError::NotFound(id))?;
        canvas.title = title.into();
        Ok(())
    }

    /// Remove a canvas from the order, returning it (with its notes) to
    /// the caller. Remaining ids are untouched. If the removed canvas was
    /// active, the canvas now at index 0 becomes active, or none if the
    /// registry is empty.
    pub fn remove_canvas(&mut self, id: CanvasId) -> RegistryResult<Canvas> {
        let canvas = self
            .canvases
            .remove(&id)
            .ok_or(RegistryError::NotFound(id))?;
        self.order.retain(|entry| *entry != id);
        if self.active == Some(id) {
            self.active = self.order.first().copied();
        }
        Ok(canvas)
    }

    /// Move the canvas at `from` to `to`, shifting intervening entries.
    /// Ids travel with their canvases; nothing is renumbered.
    pub fn reorder(&mut self, from: usize, to: usize) -> RegistryResult<()> {
        let count = self.order.len();
        for index in [from, to] {
            if index >= count {
                return Err(RegistryError::OutOfRange { index, count });
            }
        }
        let id = self.order.remove(from);
        self.order.insert(to, id);
        Ok(())
    }

    /// Current display order as `(id, title)` pairs. Iterating never
    /// mutates the registry.
    pub fn list(&self) -> impl Iterator<Item = (CanvasId, &str)> {
        self.order
            .iter()
            .filter_map(|id| self.canvases.get(id).map(|c| (*id, c.title.as_str())))
    }

    pub fn lookup(&self, id: CanvasId) -> Option<&str> {
        self.canvases.get(&id).map(|c| c.title.as_str())
    }

    pub fn canvas(&self, id: CanvasId) -> Option<&Canvas> {
        self.canvases.get(&id)
    }

    pub fn canvas_mut(&mut self, id: CanvasId) -> Option<&mut Canvas> {
        self.canvases.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    // ==================== Active Canvas ====================

    pub fn active_canvas(&self) -> Option<CanvasId> {
        self.active
    }

    /// Index of the active canvas in the current display order.
    pub fn active_canvas_index(&self) -> Option<usize> {
        let active = self.active?;
        self.order.iter().position(|id| *id == active)
    }

    pub fn set_active(&mut self, id: CanvasId) -> RegistryResult<()> {
        if !self.canvases.contains_key(&id) {
            return Err(RegistryError::NotFound(id));
        }
        self.active = Some(id);
        Ok(())
    }

    // ==================== Note Trash ====================

    /// Move a note into the trash. Trashed notes are retained as a
    /// collection; recovery hands them back newest-first.
    pub fn trash_note(&mut self, canvas_id: CanvasId, note_id: NoteId) -> RegistryResult<()> {
        let canvas = self
            .canvases
            .get_mut(&canvas_id)
            .ok_or(RegistryError::NotFound(canvas_id))?;
        let note = canvas
            .remove_note(note_id)
            .ok_or(RegistryError::NoteNotFound {
                canvas: canvas_id,
                note: note_id,
            })?;
        self.trashed.push(TrashedNote { canvas_id, note });
        Ok(())
    }

    /// Restore the most recently trashed note. It returns to its original
    /// canvas when that still exists, otherwise to the active canvas.
    /// Returns the canvas and note id it ended up with, or `None` when the
    /// trash is empty or no canvas can host it.
    pub fn recover_note(&mut self) -> Option<(CanvasId, NoteId)> {
        let TrashedNote { canvas_id, note } = self.trashed.pop()?;
        let target = if self.canvases.contains_key(&canvas_id) {
            Some(canvas_id)
        } else {
            self.active
        };
        let Some(target) = target.filter(|id| self.canvases.contains_key(id)) else {
            self.trashed.push(TrashedNote { canvas_id, note });
            return None;
        };
        let canvas = self.canvases.get_mut(&target)?;
        let id = canvas.insert_note(note);
        self.recovered = Some(id);
        Some((target, id))
    }

    pub fn trashed_notes(&self) -> &[TrashedNote] {
        &self.trashed
    }

    /// Id of the most recently recovered note, if any.
    pub fn last_recovered(&self) -> Option<NoteId> {
        self.recovered
    }

    // ==================== Lookup Across Canvases ====================

    /// Find a note by canvas and id, mutably. Focus commits use this so a
    /// session can land even after the active canvas changed.
    pub fn find_note_mut(
        &mut self,
        canvas_id: CanvasId,
        note_id: NoteId,
    ) -> Option<&mut Note> {
        self.canvases
            .get_mut(&canvas_id)
            .and_then(|canvas| canvas.get_note_mut(note_id))
    }

    // ==================== Snapshot Restore Hooks ====================

    /// Re-create a canvas with a persisted id during snapshot restore.
    /// Keeps the id counter ahead of every restored id so ids are never
    /// reused. Duplicate ids in a malformed snapshot are skipped.
    pub(crate) fn restore_canvas(&mut self, id: CanvasId, title: String) {
        if self.canvases.contains_key(&id) {
            tracing::warn!(canvas = %id, "duplicate canvas id in snapshot, skipping");
            return;
        }
        self.next_canvas_id = self.next_canvas_id.max(id.0 + 1);
        self.canvases.insert(id, Canvas::new(id, title));
        self.order.push(id);
    }

    pub(crate) fn restore_trash(&mut self, trashed: Vec<TrashedNote>) {
        for entry in &trashed {
            self.next_canvas_id = self.next_canvas_id.max(entry.canvas_id.0 + 1);
        }
        self.trashed = trashed;
    }

    pub(crate) fn restore_active_index(&mut self, index: Option<usize>) {
        self.active = index.and_then(|i| self.order.get(i).copied());
    }

    pub(crate) fn restore_recovered(&mut self, recovered: Option<NoteId>) {
        self.recovered = recovered;
    }
}
