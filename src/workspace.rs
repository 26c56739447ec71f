//! Workspace façade - canvas management, drag routing, focus transitions.
//!
//! Wires the registry, interaction engine, and focus coordinator together:
//! the registry selects the active canvas, its notes are handed to the
//! engine for manipulation, and focusing a note hands it to the
//! coordinator, which writes edits back on commit. The spatial index
//! tracks the active canvas's notes for hit testing and gravity landings.

use crate::error::{RegistryError, RegistryResult, WorkspaceError, WorkspaceResult};
use crate::focus::{FocusCoordinator, FocusSession};
use crate::input::{InteractionEngine, TickOutcome};
use crate::persist::WorkspaceSnapshot;
use crate::profile_scope;
use crate::registry::CanvasRegistry;
use crate::settings::{self, Settings, SettingsHandle};
use crate::spatial_index::SpatialIndex;
use crate::types::{CanvasId, DragMode, Note, NoteId, PointerSample, Vec2};

pub struct Workspace {
    registry: CanvasRegistry,
    engine: InteractionEngine,
    focus: FocusCoordinator,
    spatial: SpatialIndex,
    settings: SettingsHandle,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Workspace {
    pub fn new() -> Self {
        Self::with_settings(settings::shared(Settings::default()))
    }

    pub fn with_settings(settings: SettingsHandle) -> Self {
        let physics = settings.read().physics;
        Self {
            registry: CanvasRegistry::new(),
            engine: InteractionEngine::new(physics),
            focus: FocusCoordinator::new(),
            spatial: SpatialIndex::new(),
            settings,
        }
    }

    /// Rebuild a workspace from the persisted layout.
    pub fn restore(snapshot: &WorkspaceSnapshot, settings: SettingsHandle) -> Self {
        let mut workspace = Self::with_settings(settings);
        workspace.registry = snapshot.restore();
        workspace.rebuild_spatial();
        workspace
    }

    /// Materialize the persisted layout for the external collaborator.
    pub fn snapshot(&self) -> WorkspaceSnapshot {
        WorkspaceSnapshot::capture(&self.registry)
    }

    pub fn registry(&self) -> &CanvasRegistry {
        &self.registry
    }

    pub fn engine(&self) -> &InteractionEngine {
        &self.engine
    }

    pub fn focus_coordinator(&self) -> &FocusCoordinator {
        &self.focus
    }

    pub fn settings(&self) -> &SettingsHandle {
        &self.settings
    }

    // ==================== Canvas Management ====================

    pub fn create_canvas(&mut self, title: impl Into<String>) -> CanvasId {
        let id = self.registry.create_canvas(title);
        tracing::info!(canvas = %id, "canvas created");
        if self.registry.active_canvas() == Some(id) {
            self.rebuild_spatial();
        }
        id
    }

    pub fn rename_canvas(&mut self, id: CanvasId, title: impl Into<String>) -> RegistryResult<()> {
        self.registry.rename_canvas(id, title)
    }

    pub fn remove_canvas(&mut self, id: CanvasId) -> RegistryResult<()> {
        let was_active = self.registry.active_canvas() == Some(id);
        let removed = self.registry.remove_canvas(id)?;
        tracing::info!(canvas = %id, notes = removed.note_count(), "canvas removed");
        if was_active {
            self.engine.reset();
            self.rebuild_spatial();
        }
        Ok(())
    }

    pub fn reorder_canvases(&mut self, from: usize, to: usize) -> RegistryResult<()> {
        self.registry.reorder(from, to)
    }

    pub fn canvases(&self) -> impl Iterator<Item = (CanvasId, &str)> {
        self.registry.list()
    }

    pub fn active_canvas(&self) -> Option<CanvasId> {
        self.registry.active_canvas()
    }

    pub fn set_active_canvas(&mut self, id: CanvasId) -> RegistryResult<()> {
        self.registry.set_active(id)?;
        self.engine.reset();
        self.rebuild_spatial();
        Ok(())
    }

    // ==================== Notes on the Active Canvas ====================

    /// Create a note on the active canvas, taking its defaults (size,
    /// drag mode) from the current settings.
    pub fn add_note(
        &mut self,
        title: impl Into<String>,
        body: impl Into<String>,
        position: Vec2,
    ) -> RegistryResult<NoteId> {
        let active = self.active_or_err()?;
        let (default_mode, default_size) = {
            let settings = self.settings.read();
            (settings.default_drag_mode, settings.default_note_size)
        };
        let canvas = self
            .registry
            .canvas_mut(active)
            .ok_or(RegistryError::NotFound(active))?;
        let id = canvas.add_note(title, body, position);
        if let Some(note) = canvas.get_note_mut(id) {
            note.drag_mode = default_mode;
            note.size = default_size.into();
            self.spatial.insert(id, note.position, note.size);
        }
        Ok(id)
    }

    pub fn note(&self, id: NoteId) -> Option<&Note> {
        let active = self.registry.active_canvas()?;
        self.registry.canvas(active)?.get_note(id)
    }

    /// Move a note from the active canvas into the trash.
    pub fn trash_note(&mut self, id: NoteId) -> RegistryResult<()> {
        let active = self.active_or_err()?;
        if self.engine.current_note() == Some(id) {
            self.engine.reset();
        }
        self.registry.trash_note(active, id)?;
        self.spatial.remove(id);
        tracing::debug!(note = %id, "note trashed");
        Ok(())
    }

    /// Restore the most recently trashed note.
    pub fn recover_note(&mut self) -> Option<(CanvasId, NoteId)> {
        let (canvas_id, note_id) = self.registry.recover_note()?;
        tracing::debug!(note = %note_id, canvas = %canvas_id, "note recovered");
        if Some(canvas_id) == self.registry.active_canvas() {
            if let Some(note) = self
                .registry
                .canvas(canvas_id)
                .and_then(|canvas| canvas.get_note(note_id))
            {
                self.spatial.insert(note.id, note.position, note.size);
            }
        }
        Some((canvas_id, note_id))
    }

    /// Change the drag mode of a note on the active canvas. Rejected while
    /// the engine runs a session on it.
    pub fn set_drag_mode(&mut self, id: NoteId, mode: DragMode) -> WorkspaceResult<()> {
        let active = self.active_or_err()?;
        let canvas = self
            .registry
            .canvas_mut(active)
            .ok_or(RegistryError::NotFound(active))?;
        let note = canvas.get_note_mut(id).ok_or(RegistryError::NoteNotFound {
            canvas: active,
            note: id,
        })?;
        self.engine.set_mode(note, mode)?;
        Ok(())
    }

    // ==================== Drag Routing ====================

    /// Begin a drag on a note of the active canvas. Physics parameters
    /// are captured from settings for the whole session.
    pub fn drag_start(&mut self, id: NoteId, sample: PointerSample) -> RegistryResult<()> {
        let active = self.active_or_err()?;
        let physics = self.settings.read().physics;
        if self.engine.is_idle() {
            self.engine.set_physics(physics);
        }
        let canvas = self
            .registry
            .canvas_mut(active)
            .ok_or(RegistryError::NotFound(active))?;
        let note = canvas.get_note_mut(id).ok_or(RegistryError::NoteNotFound {
            canvas: active,
            note: id,
        })?;
        self.engine.drag_start(note, sample);
        Ok(())
    }

    pub fn drag_move(&mut self, id: NoteId, sample: PointerSample) -> RegistryResult<()> {
        let active = self.active_or_err()?;
        let canvas = self
            .registry
            .canvas_mut(active)
            .ok_or(RegistryError::NotFound(active))?;
        let note = canvas.get_note_mut(id).ok_or(RegistryError::NoteNotFound {
            canvas: active,
            note: id,
        })?;
        self.engine.drag_move(note, sample);
        Ok(())
    }

    /// Release a drag. The spatial index picks up the note's released
    /// bounds so later hit tests and landings see them.
    pub fn drag_end(&mut self, id: NoteId) -> RegistryResult<()> {
        let active = self.active_or_err()?;
        let canvas = self
            .registry
            .canvas_mut(active)
            .ok_or(RegistryError::NotFound(active))?;
        let note = canvas.get_note_mut(id).ok_or(RegistryError::NoteNotFound {
            canvas: active,
            note: id,
        })?;
        self.engine.drag_end(note);
        let (position, size) = (note.position, note.size);
        self.spatial.update(id, position, size);
        Ok(())
    }

    /// Advance settle physics for a note by `dt` seconds.
    pub fn tick(&mut self, id: NoteId, dt: f32) -> RegistryResult<TickOutcome> {
        let active = self.active_or_err()?;
        let canvas = self
            .registry
            .canvas_mut(active)
            .ok_or(RegistryError::NotFound(active))?;
        let arena = canvas.bounds;
        let note = canvas.get_note_mut(id).ok_or(RegistryError::NoteNotFound {
            canvas: active,
            note: id,
        })?;
        let outcome = self.engine.tick(note, dt, arena, &self.spatial);
        let (position, size) = (note.position, note.size);
        if outcome != TickOutcome::Ignored {
            self.spatial.update(id, position, size);
        }
        Ok(outcome)
    }

    /// Notes under the given canvas point, for hit testing.
    pub fn notes_at(&self, x: f32, y: f32) -> Vec<NoteId> {
        self.spatial.query_point(x, y)
    }

    // ==================== Focus Transitions ====================

    /// Open a focus session on a note of the active canvas. Any drag
    /// session on it is abandoned; drags stay suppressed until the
    /// session ends.
    pub fn focus_note(&mut self, id: NoteId) -> WorkspaceResult<FocusSession> {
        let active = self.active_or_err()?;
        if self.engine.current_note() == Some(id) {
            self.engine.reset();
        }
        let canvas = self
            .registry
            .canvas_mut(active)
            .ok_or(RegistryError::NotFound(active))?;
        let note = canvas.get_note_mut(id).ok_or(RegistryError::NoteNotFound {
            canvas: active,
            note: id,
        })?;
        Ok(self.focus.focus(note)?)
    }

    /// Register a listener for title edits during focus sessions.
    pub fn on_title_changed(&mut self, listener: impl FnMut(&str) + 'static) {
        self.focus.on_title_changed(listener);
    }

    pub fn edit_title(&mut self, session: &mut FocusSession, title: impl Into<String>) {
        self.focus.edit_title(session, title);
    }

    pub fn edit_body(&mut self, session: &mut FocusSession, body: impl Into<String>) {
        self.focus.edit_body(session, body);
    }

    /// Commit a focus session back into its note. The note is looked up
    /// by the session's canvas, so a commit lands even after the active
    /// canvas changed.
    pub fn commit_focus(&mut self, session: FocusSession) -> WorkspaceResult<()> {
        let note = self
            .registry
            .find_note_mut(session.canvas(), session.note())
            .ok_or(WorkspaceError::Registry(RegistryError::NoteNotFound {
                canvas: session.canvas(),
                note: session.note(),
            }))?;
        self.focus.commit(session, note)?;
        Ok(())
    }

    /// Cancel a focus session, discarding its edits.
    pub fn cancel_focus(&mut self, session: FocusSession) -> WorkspaceResult<()> {
        let note = self
            .registry
            .find_note_mut(session.canvas(), session.note())
            .ok_or(WorkspaceError::Registry(RegistryError::NoteNotFound {
                canvas: session.canvas(),
                note: session.note(),
            }))?;
        self.focus.cancel(session, note)?;
        Ok(())
    }

    // ==================== Internals ====================

    fn active_or_err(&self) -> RegistryResult<CanvasId> {
        self.registry
            .active_canvas()
            .ok_or(RegistryError::NoActiveCanvas)
    }

    fn rebuild_spatial(&mut self) {
        profile_scope!("rebuild_spatial");
        match self
            .registry
            .active_canvas()
            .and_then(|id| self.registry.canvas(id))
        {
            Some(canvas) => self
                .spatial
                .rebuild(canvas.notes().map(|n| (n.id, n.position, n.size))),
            None => self.spatial.clear(),
        }
    }
}
