#![allow(dead_code)]
//! In-memory document used by the integration tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use vizij_freeze_core::{
    AnimationControl, EffectTiming, Host, Phase, PlayState, Rect, SessionError, SourceLocation,
};

#[derive(Debug)]
struct AnimState {
    name: Option<String>,
    id: Option<String>,
    play_state: PlayState,
    current_time: Option<f64>,
    duration: Option<f64>,
    progress: Option<f64>,
    phase: Phase,
    easing: String,
}

/// Shared handle; clones observe the same playback state.
#[derive(Clone, Debug)]
pub struct FakeAnimation(Rc<RefCell<AnimState>>);

impl FakeAnimation {
    pub fn new(name: &str, state: PlayState, current_ms: f64, duration_ms: f64) -> Self {
        Self(Rc::new(RefCell::new(AnimState {
            name: Some(name.to_string()),
            id: None,
            play_state: state,
            current_time: Some(current_ms),
            duration: Some(duration_ms),
            progress: Some(current_ms / duration_ms),
            phase: Phase::Active,
            easing: "ease".to_string(),
        })))
    }

    pub fn running(name: &str, current_ms: f64, duration_ms: f64) -> Self {
        Self::new(name, PlayState::Running, current_ms, duration_ms)
    }

    pub fn paused(name: &str, current_ms: f64, duration_ms: f64) -> Self {
        Self::new(name, PlayState::Paused, current_ms, duration_ms)
    }

    pub fn without_name(self, id: Option<&str>) -> Self {
        {
            let mut s = self.0.borrow_mut();
            s.name = None;
            s.id = id.map(str::to_string);
        }
        self
    }

    pub fn unresolved(self) -> Self {
        {
            let mut s = self.0.borrow_mut();
            s.progress = None;
            s.current_time = None;
            s.phase = Phase::Before;
        }
        self
    }

    pub fn state(&self) -> PlayState {
        self.0.borrow().play_state
    }
}

impl AnimationControl for FakeAnimation {
    fn play_state(&self) -> PlayState {
        self.0.borrow().play_state
    }

    fn current_time(&self) -> Option<f64> {
        self.0.borrow().current_time
    }

    fn timing(&self) -> EffectTiming {
        let s = self.0.borrow();
        EffectTiming {
            duration: s.duration,
            progress: s.progress,
            phase: s.phase,
            easing: s.easing.clone(),
        }
    }

    fn name(&self) -> Option<String> {
        self.0.borrow().name.clone()
    }

    fn id(&self) -> Option<String> {
        self.0.borrow().id.clone()
    }

    fn pause(&self) {
        self.0.borrow_mut().play_state = PlayState::Paused;
    }

    fn play(&self) {
        self.0.borrow_mut().play_state = PlayState::Running;
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

#[derive(Default, Debug)]
struct NodeData {
    tag: String,
    parent: Option<NodeId>,
    id: Option<String>,
    class: Option<String>,
    rect: Rect,
    styles: HashMap<String, String>,
    attrs: HashMap<String, String>,
    markup: Option<String>,
    source: Option<SourceLocation>,
    animations: Vec<FakeAnimation>,
}

#[derive(Default, Debug)]
struct Doc {
    nodes: Vec<NodeData>,
    mounted: bool,
    mount_fails: bool,
    now: u64,
}

/// Cloneable document; clones share one tree, like two scripts on one page.
#[derive(Clone, Default, Debug)]
pub struct FakeDom(Rc<RefCell<Doc>>);

impl FakeDom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&self, tag: &str, parent: Option<NodeId>) -> NodeId {
        let mut doc = self.0.borrow_mut();
        doc.nodes.push(NodeData {
            tag: tag.to_string(),
            parent,
            ..NodeData::default()
        });
        NodeId(doc.nodes.len() - 1)
    }

    pub fn set_id(&self, node: NodeId, id: &str) {
        self.0.borrow_mut().nodes[node.0].id = Some(id.to_string());
    }

    pub fn set_class(&self, node: NodeId, class: &str) {
        self.0.borrow_mut().nodes[node.0].class = Some(class.to_string());
    }

    pub fn set_rect(&self, node: NodeId, rect: Rect) {
        self.0.borrow_mut().nodes[node.0].rect = rect;
    }

    /// `name` is the hyphenated CSS property name.
    pub fn set_style(&self, node: NodeId, name: &str, value: &str) {
        self.0.borrow_mut().nodes[node.0]
            .styles
            .insert(name.to_string(), value.to_string());
    }

    pub fn set_attr(&self, node: NodeId, name: &str, value: &str) {
        self.0.borrow_mut().nodes[node.0]
            .attrs
            .insert(name.to_string(), value.to_string());
    }

    pub fn set_markup(&self, node: NodeId, markup: &str) {
        self.0.borrow_mut().nodes[node.0].markup = Some(markup.to_string());
    }

    pub fn set_source(&self, node: NodeId, file: &str, line: u32, column: u32) {
        self.0.borrow_mut().nodes[node.0].source = Some(SourceLocation {
            file: file.to_string(),
            line,
            column: Some(column),
        });
    }

    pub fn set_now(&self, now: u64) {
        self.0.borrow_mut().now = now;
    }

    /// Make the next overlay mounts fail, like a page without a body.
    pub fn set_mount_fails(&self, fails: bool) {
        self.0.borrow_mut().mount_fails = fails;
    }

    pub fn is_mounted(&self) -> bool {
        self.0.borrow().mounted
    }

    pub fn animate(&self, node: NodeId, anim: FakeAnimation) -> FakeAnimation {
        self.0.borrow_mut().nodes[node.0].animations.push(anim.clone());
        anim
    }

    fn is_within(doc: &Doc, node: NodeId, root: NodeId) -> bool {
        let mut cur = Some(node);
        while let Some(n) = cur {
            if n == root {
                return true;
            }
            cur = doc.nodes[n.0].parent;
        }
        false
    }
}

impl Host for FakeDom {
    type Node = NodeId;
    type Animation = FakeAnimation;

    fn animations(&self, node: Option<&NodeId>) -> Vec<FakeAnimation> {
        let doc = self.0.borrow();
        doc.nodes
            .iter()
            .enumerate()
            .filter(|(i, _)| match node {
                Some(root) => Self::is_within(&doc, NodeId(*i), *root),
                None => true,
            })
            .flat_map(|(_, n)| n.animations.iter().cloned())
            .collect()
    }

    fn bounding_rect(&self, node: &NodeId) -> Rect {
        self.0.borrow().nodes[node.0].rect
    }

    fn style_property(&self, node: &NodeId, name: &str) -> Option<String> {
        self.0.borrow().nodes[node.0].styles.get(name).cloned()
    }

    fn tag_name(&self, node: &NodeId) -> String {
        self.0.borrow().nodes[node.0].tag.clone()
    }

    fn element_id(&self, node: &NodeId) -> Option<String> {
        self.0.borrow().nodes[node.0].id.clone()
    }

    fn class_name(&self, node: &NodeId) -> Option<String> {
        self.0.borrow().nodes[node.0].class.clone()
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.0.borrow().nodes[node.0].attrs.get(name).cloned()
    }

    fn inner_markup(&self, node: &NodeId) -> Option<String> {
        self.0.borrow().nodes[node.0].markup.clone()
    }

    fn source_location(&self, node: &NodeId) -> Option<SourceLocation> {
        self.0.borrow().nodes[node.0].source.clone()
    }

    fn now_millis(&self) -> u64 {
        self.0.borrow().now
    }

    fn overlay_mounted(&self) -> bool {
        self.0.borrow().mounted
    }

    fn set_overlay_mounted(&mut self, mounted: bool) -> Result<(), SessionError> {
        let mut doc = self.0.borrow_mut();
        if mounted && doc.mount_fails {
            return Err(SessionError::MountFailed("no document body".into()));
        }
        doc.mounted = mounted;
        Ok(())
    }
}
