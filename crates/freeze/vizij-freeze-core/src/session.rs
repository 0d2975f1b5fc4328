//! Session controller: the enable/pick/commit/cancel state machine.
//!
//! States:
//! - `Disabled`: nothing paused, no pending capture.
//! - `Idle`: enabled, waiting for a pick.
//! - `Pending`: one capture taken and its animations paused, awaiting commit or cancel.
//!
//! Every exit from `Pending` resumes what the registry paused.

use serde::{Deserialize, Serialize};

use crate::capture::{capture, CaptureOptions};
use crate::config::{AnnotationMode, Config};
use crate::error::SessionError;
use crate::host::{Host, Point};
use crate::ids::AnnotationId;
use crate::outputs::{Outputs, SessionEvent};
use crate::registry::AnimationRegistry;
use crate::report::{render_all, render_entry, ReportOptions};
use crate::snapshot::ElementSnapshot;
use crate::store::{AnnotationEntry, AnnotationStore};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    Disabled,
    Idle,
    Pending,
}

/// Mutable state of one mounted overlay.
#[derive(Debug)]
pub struct SessionState<N> {
    pub enabled: bool,
    /// Borrowed host node; never owned by the session.
    pub target: Option<N>,
    pub pending: Option<ElementSnapshot>,
    pub annotations: AnnotationStore,
}

impl<N> SessionState<N> {
    fn new(placeholder: &str) -> Self {
        Self {
            enabled: false,
            target: None,
            pending: None,
            annotations: AnnotationStore::with_placeholder(placeholder),
        }
    }
}

/// One overlay instance bound to a host.
pub struct Session<H: Host> {
    cfg: Config,
    host: H,
    registry: AnimationRegistry<H::Animation>,
    state: SessionState<H::Node>,
    outputs: Outputs,
}

impl<H: Host> std::fmt::Debug for Session<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("cfg", &self.cfg)
            .field("phase", &self.phase())
            .field("paused", &self.registry.paused_len())
            .field("annotations", &self.state.annotations.count())
            .finish()
    }
}

impl<H: Host> Drop for Session<H> {
    fn drop(&mut self) {
        self.disable();
        if let Err(err) = self.host.set_overlay_mounted(false) {
            log::warn!("overlay unmount failed: {err}");
        }
        log::debug!("overlay unmounted");
    }
}

impl<H: Host> Session<H> {
    /// Install an overlay on `host`. Fails if one is already mounted there.
    pub fn mount(mut host: H, cfg: Config) -> Result<Self, SessionError> {
        cfg.validate()?;
        if host.overlay_mounted() {
            return Err(SessionError::AlreadyMounted);
        }
        host.set_overlay_mounted(true)?;
        log::debug!("overlay mounted ({:?} mode)", cfg.mode);
        Ok(Self {
            state: SessionState::new(&cfg.note_placeholder),
            cfg,
            host,
            registry: AnimationRegistry::new(),
            outputs: Outputs::default(),
        })
    }

    /// Disable and release the mount. Dropping the session does the same.
    pub fn unmount(self) {
        drop(self);
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn phase(&self) -> SessionPhase {
        if !self.state.enabled {
            SessionPhase::Disabled
        } else if self.state.pending.is_some() {
            SessionPhase::Pending
        } else {
            SessionPhase::Idle
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.state.enabled
    }

    /// Node currently highlighted by the overlay.
    pub fn target(&self) -> Option<&H::Node> {
        self.state.target.as_ref()
    }

    pub fn pending(&self) -> Option<&ElementSnapshot> {
        self.state.pending.as_ref()
    }

    pub fn annotations(&self) -> &AnnotationStore {
        &self.state.annotations
    }

    /// Number of animations currently held paused by this session.
    pub fn paused_count(&self) -> usize {
        self.registry.paused_len()
    }

    pub fn outputs(&self) -> &Outputs {
        &self.outputs
    }

    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        self.outputs.drain()
    }

    fn report_options(&self) -> ReportOptions {
        ReportOptions::from(&self.cfg)
    }

    pub fn toggle(&mut self) {
        if self.state.enabled {
            self.disable();
        } else {
            self.enable();
        }
    }

    pub fn enable(&mut self) {
        if self.state.enabled {
            return;
        }
        self.state.enabled = true;
        log::debug!("session enabled");
        self.outputs.push_event(SessionEvent::Enabled);
    }

    /// Cancel any pending capture, resume everything and disable.
    /// Multi-mode annotations survive; single mode keeps nothing.
    pub fn disable(&mut self) {
        if !self.state.enabled {
            // still make sure nothing is left paused
            self.registry.resume();
            return;
        }
        if self.state.pending.is_some() {
            self.cancel();
        }
        self.registry.resume();
        if self.cfg.mode == AnnotationMode::Single {
            self.state.annotations.clear();
        }
        self.state.enabled = false;
        self.state.target = None;
        log::debug!("session disabled");
        self.outputs.push_event(SessionEvent::Disabled);
    }

    /// Freeze animations under `node` and take a pending capture.
    ///
    /// Returns `false` (and changes nothing) when disabled, when a capture is
    /// already pending, or when there is no node.
    pub fn pick(&mut self, node: Option<H::Node>, viewport_x: f64, viewport_y: f64) -> bool {
        if !self.state.enabled || self.state.pending.is_some() {
            log::warn!("pick ignored in {:?} phase", self.phase());
            self.outputs.push_event(SessionEvent::PickIgnored);
            return false;
        }
        let Some(node) = node else {
            return false;
        };

        let paused = self.registry.pause(&self.host, Some(&node));
        let opts = CaptureOptions {
            svg_markup_limit: self.cfg.svg_markup_limit,
        };
        let Some(mut snapshot) = capture(&self.host, Some(&node), opts) else {
            self.registry.resume();
            return false;
        };
        snapshot.pick_point = Some(Point {
            x: viewport_x,
            y: viewport_y,
        });

        log::debug!(
            "captured <{}> with {} animation(s), {paused} paused",
            snapshot.tag_name,
            snapshot.animations.len()
        );
        self.outputs.push_event(SessionEvent::Captured {
            tag_name: snapshot.tag_name.clone(),
            paused,
        });
        self.state.pending = Some(snapshot);
        self.state.target = Some(node);
        true
    }

    /// Store the pending capture with `note` and resume playback.
    /// In single mode the entry's report is requested for copying immediately.
    pub fn commit(&mut self, note: &str) -> Option<AnnotationId> {
        let snapshot = self.state.pending.take()?;
        self.state.target = None;

        let opts = self.report_options();
        if self.cfg.mode == AnnotationMode::Single {
            self.state.annotations.clear();
        }
        let entry = self.state.annotations.add(snapshot, note);
        let id = entry.id;
        let copy_text = match self.cfg.mode {
            AnnotationMode::Single => Some(render_entry(entry, None, &opts)),
            AnnotationMode::Multi => None,
        };

        self.registry.resume();
        log::debug!("committed annotation {id}");
        self.outputs.push_event(SessionEvent::Committed { id });
        if let Some(text) = copy_text {
            self.outputs.push_event(SessionEvent::CopyRequested { text });
        }
        Some(id)
    }

    /// Discard the pending capture and resume playback.
    pub fn cancel(&mut self) {
        if self.state.pending.take().is_none() {
            return;
        }
        self.state.target = None;
        self.registry.resume();
        log::debug!("capture cancelled");
        self.outputs.push_event(SessionEvent::Cancelled);
    }

    pub fn remove_entry(&mut self, id: AnnotationId) {
        if self.state.annotations.remove(id).is_some() {
            self.outputs.push_event(SessionEvent::Removed { id });
        }
    }

    pub fn clear_all(&mut self) {
        self.state.annotations.clear();
        self.outputs.push_event(SessionEvent::Cleared);
    }

    /// Combined report of every stored annotation.
    pub fn report(&self) -> String {
        render_all(self.state.annotations.list(), &self.report_options())
    }

    /// Report for one entry, without a numbered heading.
    pub fn entry_report(&self, id: AnnotationId) -> Option<String> {
        let entry: &AnnotationEntry = self.state.annotations.get(id)?;
        Some(render_entry(entry, None, &self.report_options()))
    }

    /// Request a copy of the combined report. Nothing is requested when the
    /// store is empty.
    pub fn copy_all(&mut self) -> Option<String> {
        if self.state.annotations.is_empty() {
            return None;
        }
        let text = self.report();
        self.outputs.push_event(SessionEvent::CopyRequested { text: text.clone() });
        Some(text)
    }

    pub fn copy_one(&mut self, id: AnnotationId) -> Option<String> {
        let text = self.entry_report(id)?;
        self.outputs.push_event(SessionEvent::CopyRequested { text: text.clone() });
        Some(text)
    }
}
