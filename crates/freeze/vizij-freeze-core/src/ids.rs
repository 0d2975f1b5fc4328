//! Identifiers and a simple allocator for stored annotations.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnnotationId(pub u64);

impl fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic allocator for AnnotationId.
/// Ids are never handed out twice by the same allocator, so an id stays
/// stable for the whole session even after the store is cleared.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc(&mut self) -> AnnotationId {
        let id = AnnotationId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}
