//! Immutable capture records.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::host::{Phase, PlayState, Point, Rect, SourceLocation};

/// Style keys captured for every snapshot, in report order.
pub const STYLE_KEYS: &[&str] = &[
    "transform",
    "transformOrigin",
    "opacity",
    "width",
    "height",
    "top",
    "left",
    "margin",
    "padding",
    "backgroundColor",
    "color",
    "borderRadius",
    "fill",
    "stroke",
    "strokeWidth",
    "strokeDasharray",
    "strokeDashoffset",
    "visibility",
    "display",
];

/// Name used when an animation has neither a name nor an id.
pub const UNNAMED_ANIMATION: &str = "unnamed";

/// State of one animation at capture time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimationSample {
    pub name: String,
    /// Milliseconds.
    pub current_time: Option<f64>,
    /// Milliseconds; `None` for `auto`.
    pub duration: Option<f64>,
    /// In `[0, 1]` when resolved.
    pub progress: Option<f64>,
    pub phase: Phase,
    pub play_state: PlayState,
    pub easing: String,
}

/// SVG content captured alongside the node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SvgPayload {
    /// `d` attribute of a `<path>`.
    PathData(String),
    /// Inner markup of an `<svg>` root.
    Markup(String),
}

/// Ordered camelCase style key → computed value.
pub type ComputedStyles = IndexMap<String, String>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElementSnapshot {
    pub tag_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_location: Option<SourceLocation>,
    pub bounding_rect: Rect,
    pub computed_styles: ComputedStyles,
    pub animations: Vec<AnimationSample>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub svg: Option<SvgPayload>,
    /// Viewport point the user picked, when the capture came from a pick.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pick_point: Option<Point>,
    pub captured_at_epoch_millis: u64,
}

impl ElementSnapshot {
    /// `tag#id.class` identity string.
    pub fn identity(&self) -> String {
        let mut out = self.tag_name.clone();
        if let Some(id) = self.element_id.as_deref().filter(|s| !s.is_empty()) {
            out.push('#');
            out.push_str(id);
        }
        if let Some(class) = &self.class_name {
            for part in class.split_whitespace() {
                out.push('.');
                out.push_str(part);
            }
        }
        out
    }

    pub fn path_data(&self) -> Option<&str> {
        match &self.svg {
            Some(SvgPayload::PathData(d)) => Some(d),
            _ => None,
        }
    }
}
