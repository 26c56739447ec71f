//! Spatial index over note bounds.
//!
//! R-tree based indexing for the active canvas's notes. Hit testing drops
//! from O(n) to O(log n), and the gravity settle uses the same tree to find
//! the note a falling note lands on.

use crate::constants::SUPPORT_EPSILON;
use crate::types::{NoteBounds, NoteId, Vec2};
use rstar::{AABB, RTree, RTreeObject};
use std::collections::HashMap;

/// A spatial entry for one note's bounding box.
#[derive(Debug, Clone, Copy)]
pub struct SpatialEntry {
    pub note_id: NoteId,
    pub bounds: NoteBounds,
}

impl SpatialEntry {
    pub fn new(note_id: NoteId, position: Vec2, size: Vec2) -> Self {
        Self {
            note_id,
            bounds: NoteBounds::new(position, size),
        }
    }
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.bounds.min_x, self.bounds.min_y],
            [self.bounds.max_x, self.bounds.max_y],
        )
    }
}

impl PartialEq for SpatialEntry {
    fn eq(&self, other: &Self) -> bool {
        self.note_id == other.note_id
    }
}

/// Spatial index for canvas notes using an R-tree.
#[derive(Debug, Default)]
pub struct SpatialIndex {
    tree: RTree<SpatialEntry>,
    entries: HashMap<NoteId, SpatialEntry>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self {
            tree: RTree::new(),
            entries: HashMap::new(),
        }
    }

    pub fn insert(&mut self, note_id: NoteId, position: Vec2, size: Vec2) {
        if let Some(old_entry) = self.entries.remove(&note_id) {
            self.tree.remove(&old_entry);
        }
        let entry = SpatialEntry::new(note_id, position, size);
        self.tree.insert(entry);
        self.entries.insert(note_id, entry);
    }

    pub fn remove(&mut self, note_id: NoteId) -> bool {
        if let Some(entry) = self.entries.remove(&note_id) {
            self.tree.remove(&entry);
            true
        } else {
            false
        }
    }

    pub fn update(&mut self, note_id: NoteId, position: Vec2, size: Vec2) {
        self.insert(note_id, position, size);
    }

    /// All notes containing the given point, in canvas coordinates.
    pub fn query_point(&self, x: f32, y: f32) -> Vec<NoteId> {
        let point_envelope = AABB::from_point([x, y]);
        self.tree
            .locate_in_envelope_intersecting(&point_envelope)
            .filter(|entry| entry.bounds.contains_point(x, y))
            .map(|entry| entry.note_id)
            .collect()
    }

    /// All notes intersecting a rectangular region.
    pub fn query_rect(&self, min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Vec<NoteId> {
        let envelope = AABB::from_corners([min_x, min_y], [max_x, max_y]);
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|entry| entry.note_id)
            .collect()
    }

    /// Top edge of the nearest note directly below `bounds`, searched no
    /// further than `max_drop` beneath its bottom edge. `exclude` is the
    /// falling note itself. Used for gravity rest detection.
    pub fn support_below(
        &self,
        exclude: NoteId,
        bounds: &NoteBounds,
        max_drop: f32,
    ) -> Option<f32> {
        let envelope = AABB::from_corners(
            [bounds.min_x, bounds.max_y],
            [bounds.max_x, bounds.max_y + max_drop],
        );
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .filter(|entry| entry.note_id != exclude)
            .filter(|entry| entry.bounds.min_y + SUPPORT_EPSILON >= bounds.max_y)
            .map(|entry| entry.bounds.min_y)
            .min_by(|a, b| a.total_cmp(b))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace the whole index, e.g. after switching the active canvas.
    pub fn rebuild<I>(&mut self, notes: I)
    where
        I: Iterator<Item = (NoteId, Vec2, Vec2)>,
    {
        let entries: Vec<SpatialEntry> = notes
            .map(|(id, position, size)| SpatialEntry::new(id, position, size))
            .collect();
        self.entries = entries.iter().map(|e| (e.note_id, *e)).collect();
        self.tree = RTree::bulk_load(entries);
    }

    pub fn clear(&mut self) {
        self.tree = RTree::new();
        self.entries.clear();
    }
}
