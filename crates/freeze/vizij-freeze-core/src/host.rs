//! Host capability traits.
//!
//! The core never touches a real document. Adapters (wasm/DOM, test fakes)
//! implement [`Host`] and [`AnimationControl`] over whatever the platform
//! exposes and pass them into the session.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// Playback state reported by a host animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayState {
    Idle,
    Running,
    Paused,
    Finished,
}

impl PlayState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayState::Idle => "idle",
            PlayState::Running => "running",
            PlayState::Paused => "paused",
            PlayState::Finished => "finished",
        }
    }
}

impl fmt::Display for PlayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position of an animation relative to its active interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Before,
    Active,
    After,
}

impl Phase {
    /// Derive the phase from a local time, start delay and active duration
    /// (all in milliseconds). Hosts that do not report a phase directly use this.
    ///
    /// An unresolved local time counts as `Before`; an unbounded active
    /// duration never reaches `After`.
    pub fn from_local_time(local_time: Option<f64>, delay: f64, active_duration: f64) -> Self {
        let Some(t) = local_time else {
            return Phase::Before;
        };
        if t < delay {
            Phase::Before
        } else if active_duration.is_finite() && t >= delay + active_duration {
            Phase::After
        } else {
            Phase::Active
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Before => "before",
            Phase::Active => "active",
            Phase::After => "after",
        }
    }
}

/// Computed timing of an animation's effect.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EffectTiming {
    /// Iteration duration in milliseconds; `None` when the host reports `auto`.
    pub duration: Option<f64>,
    /// Iteration progress in `[0, 1]`; `None` when unresolvable.
    pub progress: Option<f64>,
    pub phase: Phase,
    pub easing: String,
}

impl Default for EffectTiming {
    fn default() -> Self {
        Self {
            duration: None,
            progress: None,
            phase: Phase::Before,
            easing: "linear".to_string(),
        }
    }
}

/// Axis-aligned bounding box in viewport coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A point in viewport coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Originating source position attached to a node by dev tooling.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    /// 1-based.
    pub line: u32,
    /// 1-based.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
}

impl SourceLocation {
    /// Parse `file:line` or `file:line:col`. The file part may itself contain
    /// colons (e.g. a Windows drive or URL scheme).
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let (rest, last) = raw.rsplit_once(':')?;
        let last: u32 = last.parse().ok()?;
        if let Some((file, line)) = rest.rsplit_once(':') {
            if let Ok(line) = line.parse::<u32>() {
                if !file.is_empty() {
                    return Some(Self {
                        file: file.to_string(),
                        line,
                        column: Some(last),
                    });
                }
            }
        }
        if rest.is_empty() {
            return None;
        }
        Some(Self {
            file: rest.to_string(),
            line: last,
            column: None,
        })
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.column {
            Some(col) => write!(f, "{}:{}:{}", self.file, self.line, col),
            None => write!(f, "{}:{}", self.file, self.line),
        }
    }
}

/// One host-managed animation. Implementations are cheap clones of a host
/// reference; pausing/playing mutates the shared host object.
pub trait AnimationControl: Clone {
    fn play_state(&self) -> PlayState;
    /// Current time in milliseconds, if resolved.
    fn current_time(&self) -> Option<f64>;
    fn timing(&self) -> EffectTiming;
    /// Explicit animation name (e.g. a CSS `animation-name`).
    fn name(&self) -> Option<String>;
    fn id(&self) -> Option<String>;
    fn pause(&self);
    fn play(&self);
}

/// Document-side queries the engine needs.
pub trait Host {
    /// Non-owning reference to a host node.
    type Node: Clone + PartialEq + fmt::Debug;
    type Animation: AnimationControl;

    /// Animations on `node` and all of its descendants, or on the whole
    /// document when `node` is `None`.
    fn animations(&self, node: Option<&Self::Node>) -> Vec<Self::Animation>;

    fn bounding_rect(&self, node: &Self::Node) -> Rect;

    /// Computed value of one style property, addressed by its hyphenated name.
    fn style_property(&self, node: &Self::Node, name: &str) -> Option<String>;

    /// Lower-case tag name.
    fn tag_name(&self, node: &Self::Node) -> String;

    fn element_id(&self, node: &Self::Node) -> Option<String>;

    fn class_name(&self, node: &Self::Node) -> Option<String>;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    /// Serialized inner markup of the node.
    fn inner_markup(&self, node: &Self::Node) -> Option<String>;

    fn source_location(&self, node: &Self::Node) -> Option<SourceLocation>;

    /// Wall-clock time in epoch milliseconds.
    fn now_millis(&self) -> u64;

    fn overlay_mounted(&self) -> bool;

    /// Install (`true`) or remove (`false`) the marker read by `overlay_mounted`.
    fn set_overlay_mounted(&mut self, mounted: bool) -> Result<(), SessionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_from_local_time() {
        assert_eq!(Phase::from_local_time(None, 0.0, 100.0), Phase::Before);
        assert_eq!(Phase::from_local_time(Some(10.0), 50.0, 100.0), Phase::Before);
        assert_eq!(Phase::from_local_time(Some(50.0), 50.0, 100.0), Phase::Active);
        assert_eq!(Phase::from_local_time(Some(150.0), 50.0, 100.0), Phase::After);
        assert_eq!(
            Phase::from_local_time(Some(1.0e9), 0.0, f64::INFINITY),
            Phase::Active
        );
    }

    #[test]
    fn source_location_display() {
        let loc = SourceLocation {
            file: "src/Card.tsx".into(),
            line: 12,
            column: Some(5),
        };
        assert_eq!(loc.to_string(), "src/Card.tsx:12:5");
        let loc = SourceLocation {
            column: None,
            ..loc
        };
        assert_eq!(loc.to_string(), "src/Card.tsx:12");
    }

    #[test]
    fn source_location_parse() {
        let loc = SourceLocation::parse("src/Card.tsx:12:5").unwrap();
        assert_eq!((loc.file.as_str(), loc.line, loc.column), ("src/Card.tsx", 12, Some(5)));
        let loc = SourceLocation::parse("C:/app/Card.tsx:7").unwrap();
        assert_eq!((loc.file.as_str(), loc.line, loc.column), ("C:/app/Card.tsx", 7, None));
        assert!(SourceLocation::parse("Card.tsx").is_none());
        assert!(SourceLocation::parse(":3").is_none());
    }
}
