//! Annotation store: ordered (snapshot, note) entries for one session.

use serde::{Deserialize, Serialize};

use crate::config::NO_NOTE_PLACEHOLDER;
use crate::ids::{AnnotationId, IdAllocator};
use crate::snapshot::ElementSnapshot;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnnotationEntry {
    pub id: AnnotationId,
    pub snapshot: ElementSnapshot,
    pub note: String,
}

/// Insertion-ordered collection; insertion order is report order.
#[derive(Debug)]
pub struct AnnotationStore {
    ids: IdAllocator,
    entries: Vec<AnnotationEntry>,
    placeholder: String,
}

impl Default for AnnotationStore {
    fn default() -> Self {
        Self::with_placeholder(NO_NOTE_PLACEHOLDER)
    }
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_placeholder(placeholder: &str) -> Self {
        Self {
            ids: IdAllocator::new(),
            entries: Vec::new(),
            placeholder: placeholder.to_string(),
        }
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Append an entry. A blank note is stored as the placeholder.
    pub fn add(&mut self, snapshot: ElementSnapshot, note: &str) -> &AnnotationEntry {
        let note = note.trim();
        let note = if note.is_empty() {
            self.placeholder.clone()
        } else {
            note.to_string()
        };
        let id = self.ids.alloc();
        self.entries.push(AnnotationEntry { id, snapshot, note });
        &self.entries[self.entries.len() - 1]
    }

    /// Remove the entry with `id`; absent ids are ignored.
    pub fn remove(&mut self, id: AnnotationId) -> Option<AnnotationEntry> {
        let idx = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(idx))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, id: AnnotationId) -> Option<&AnnotationEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn list(&self) -> &[AnnotationEntry] {
        &self.entries
    }
}
