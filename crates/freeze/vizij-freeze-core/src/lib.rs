//! Vizij Freeze Core (host-agnostic)
//!
//! Capture-and-annotate engine behind the freeze overlay: pause the
//! animations under a picked node, snapshot its visual and animation state,
//! pair snapshots with free-text notes, and render the collected notes into a
//! Markdown report meant to be pasted into an assistant.
//!
//! Hosts (the wasm DOM adapter, test fakes) implement [`Host`] and
//! [`AnimationControl`]; everything else in this crate is pure.

pub mod capture;
pub mod config;
pub mod error;
pub mod host;
pub mod ids;
pub mod outputs;
pub mod registry;
pub mod report;
pub mod session;
pub mod snapshot;
pub mod store;

// Re-exports for consumers (adapters)
pub use capture::{capture, sample_animation, CaptureOptions};
pub use config::{AnnotationMode, Config, NO_NOTE_PLACEHOLDER};
pub use error::SessionError;
pub use host::{AnimationControl, EffectTiming, Host, Phase, PlayState, Point, Rect, SourceLocation};
pub use ids::AnnotationId;
pub use outputs::{Outputs, SessionEvent};
pub use registry::AnimationRegistry;
pub use report::{kebab_case, render_all, render_entry, ReportOptions};
pub use session::{Session, SessionPhase};
pub use snapshot::{AnimationSample, ComputedStyles, ElementSnapshot, SvgPayload, STYLE_KEYS};
pub use store::{AnnotationEntry, AnnotationStore};
