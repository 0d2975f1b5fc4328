//! Output contracts from the session.
//!
//! The session appends semantic events as it transitions; adapters drain
//! them to drive the highlight overlay, popups and the clipboard write.

use serde::{Deserialize, Serialize};

use crate::ids::AnnotationId;

/// Discrete signals emitted by the session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[non_exhaustive]
pub enum SessionEvent {
    Enabled,
    Disabled,
    Captured {
        tag_name: String,
        paused: usize,
    },
    /// A pick arrived while a capture was already pending, or while disabled.
    PickIgnored,
    Committed {
        id: AnnotationId,
    },
    Cancelled,
    Removed {
        id: AnnotationId,
    },
    Cleared,
    /// Text to be written to the clipboard by the adapter.
    CopyRequested {
        text: String,
    },
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub events: Vec<SessionEvent>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.events.clear();
    }

    #[inline]
    pub fn push_event(&mut self, event: SessionEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Take all pending events, leaving the buffer empty.
    pub fn drain(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }
}
