//! Core configuration for vizij-freeze-core.

use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// Default text stored for a committed annotation whose note was left blank.
pub const NO_NOTE_PLACEHOLDER: &str = "(no note)";

/// How commits are handled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationMode {
    /// Every commit is copied to the clipboard immediately; nothing accumulates.
    Single,
    /// Commits accumulate in the store until copied or cleared.
    #[default]
    Multi,
}

/// Configuration for one mounted overlay session.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub mode: AnnotationMode,
    /// Text stored in place of an empty note.
    pub note_placeholder: String,
    /// Heading of the combined report.
    pub report_title: String,
    /// Maximum number of characters of serialized SVG markup kept per snapshot.
    pub svg_markup_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: AnnotationMode::Multi,
            note_placeholder: NO_NOTE_PLACEHOLDER.to_string(),
            report_title: "Animation Feedback".to_string(),
            svg_markup_limit: 4000,
        }
    }
}

impl Config {
    pub fn single() -> Self {
        Self {
            mode: AnnotationMode::Single,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), SessionError> {
        if self.note_placeholder.trim().is_empty() {
            return Err(SessionError::InvalidConfig(
                "note_placeholder must not be blank".into(),
            ));
        }
        if self.report_title.trim().is_empty() {
            return Err(SessionError::InvalidConfig(
                "report_title must not be blank".into(),
            ));
        }
        Ok(())
    }
}
