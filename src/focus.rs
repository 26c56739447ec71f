//! Focus coordinator - enlarged-editor sessions over notes.
//!
//! Focusing a note opens an exclusive editing session holding draft copies
//! of its title and body. While the session is open the note is marked
//! focused, which suppresses drag events on it. Title edits stream to
//! registered listeners synchronously, once per edit, so an external label
//! mirror stays in sync without waiting for the commit.

use crate::error::FocusError;
use crate::types::{CanvasId, Note, NoteId};
use std::collections::HashMap;
use uuid::Uuid;

/// An exclusive editing context for one note's title and body.
///
/// Opaque to callers beyond its accessors; hand it back to the
/// coordinator via `commit` or `cancel` to end it.
#[derive(Debug)]
pub struct FocusSession {
    token: Uuid,
    canvas_id: CanvasId,
    note_id: NoteId,
    title: String,
    body: String,
}

impl FocusSession {
    pub fn canvas(&self) -> CanvasId {
        self.canvas_id
    }

    pub fn note(&self) -> NoteId {
        self.note_id
    }

    /// Current draft title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Current draft body
    pub fn body(&self) -> &str {
        &self.body
    }
}

type TitleListener = Box<dyn FnMut(&str)>;

/// Manages the transition between "note on canvas" and "note in the
/// enlarged editor".
#[derive(Default)]
pub struct FocusCoordinator {
    active: HashMap<(CanvasId, NoteId), Uuid>,
    listeners: Vec<TitleListener>,
}

impl FocusCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a focus session on `note`. Fails with `AlreadyFocused` when a
    /// session for it is already active. Marks the note focused for the
    /// session's duration.
    pub fn focus(&mut self, note: &mut Note) -> Result<FocusSession, FocusError> {
        let key = (note.canvas_id, note.id);
        if self.active.contains_key(&key) {
            return Err(FocusError::AlreadyFocused(note.id));
        }
        let token = Uuid::new_v4();
        self.active.insert(key, token);
        note.focused = true;
        tracing::debug!(note = %note.id, canvas = %note.canvas_id, "focus session opened");
        Ok(FocusSession {
            token,
            canvas_id: note.canvas_id,
            note_id: note.id,
            title: note.title.clone(),
            body: note.body.clone(),
        })
    }

    /// Register a callback fired synchronously on every title edit with
    /// the current draft title.
    pub fn on_title_changed(&mut self, listener: impl FnMut(&str) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Replace the session's draft title and notify listeners once.
    pub fn edit_title(&mut self, session: &mut FocusSession, title: impl Into<String>) {
        session.title = title.into();
        for listener in &mut self.listeners {
            listener(&session.title);
        }
    }

    /// Replace the session's draft body. Body edits do not stream.
    pub fn edit_body(&mut self, session: &mut FocusSession, body: impl Into<String>) {
        session.body = body.into();
    }

    /// Write the session's drafts back into the note, end the session,
    /// and release the drag suppression.
    pub fn commit(&mut self, session: FocusSession, note: &mut Note) -> Result<(), FocusError> {
        self.end_session(&session, note)?;
        note.title = session.title;
        note.body = session.body;
        tracing::debug!(note = %note.id, "focus session committed");
        Ok(())
    }

    /// Discard the session's drafts, end the session, and release the
    /// drag suppression. The note keeps its pre-focus content.
    pub fn cancel(&mut self, session: FocusSession, note: &mut Note) -> Result<(), FocusError> {
        self.end_session(&session, note)?;
        tracing::debug!(note = %note.id, "focus session cancelled");
        Ok(())
    }

    /// Whether the note currently has an active focus session.
    pub fn is_focused(&self, canvas_id: CanvasId, note_id: NoteId) -> bool {
        self.active.contains_key(&(canvas_id, note_id))
    }

    fn end_session(&mut self, session: &FocusSession, note: &mut Note) -> Result<(), FocusError> {
        if note.id != session.note_id || note.canvas_id != session.canvas_id {
            return Err(FocusError::NotFound(session.note_id));
        }
        let key = (session.canvas_id, session.note_id);
        match self.active.get(&key) {
            Some(token) if *token == session.token => {
                self.active.remove(&key);
                note.focused = false;
                Ok(())
            }
            _ => Err(FocusError::StaleSession),
        }
    }
}
