//! Animation registry: discovers, pauses and resumes host animations.
//!
//! The registry is the only component that changes playback. It tracks just
//! the animations it paused itself, so resuming never touches animations that
//! were already paused, finished or idle before the tool engaged.

use crate::host::{AnimationControl, Host, PlayState};

/// One animation paused by the registry, tagged with its pre-pause state.
#[derive(Clone, Debug)]
pub struct PausedAnimation<A> {
    pub handle: A,
    pub prior: PlayState,
}

#[derive(Debug)]
pub struct AnimationRegistry<A: AnimationControl> {
    paused: Vec<PausedAnimation<A>>,
}

impl<A: AnimationControl> Default for AnimationRegistry<A> {
    fn default() -> Self {
        Self { paused: Vec::new() }
    }
}

impl<A: AnimationControl> AnimationRegistry<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same discovery as [`pause`](Self::pause) without touching playback.
    pub fn query<H>(host: &H, target: Option<&H::Node>) -> Vec<A>
    where
        H: Host<Animation = A>,
    {
        host.animations(target)
    }

    /// Pause every running animation on `target` and its descendants (or the
    /// whole document). Returns how many were paused.
    ///
    /// A previously tracked set is resumed first so a second pause can never
    /// strand animations in the paused state.
    pub fn pause<H>(&mut self, host: &H, target: Option<&H::Node>) -> usize
    where
        H: Host<Animation = A>,
    {
        if !self.paused.is_empty() {
            log::warn!(
                "pause requested while {} animation(s) still tracked; resuming them first",
                self.paused.len()
            );
            self.resume();
        }

        self.paused = Self::query(host, target)
            .into_iter()
            .filter(|anim| anim.play_state() == PlayState::Running)
            .map(|handle| {
                handle.pause();
                PausedAnimation {
                    handle,
                    prior: PlayState::Running,
                }
            })
            .collect();

        log::debug!("paused {} animation(s)", self.paused.len());
        self.paused.len()
    }

    /// Resume everything this registry paused and forget the handles.
    /// Returns how many were resumed; a no-op on an empty set.
    pub fn resume(&mut self) -> usize {
        let count = self.paused.len();
        for entry in self.paused.drain(..) {
            entry.handle.play();
        }
        if count > 0 {
            log::debug!("resumed {count} animation(s)");
        }
        count
    }

    pub fn paused(&self) -> &[PausedAnimation<A>] {
        &self.paused
    }

    pub fn paused_len(&self) -> usize {
        self.paused.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paused.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SessionError;
    use crate::host::{EffectTiming, Rect, SourceLocation};
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone, Debug)]
    struct Anim(Rc<Cell<PlayState>>);

    impl AnimationControl for Anim {
        fn play_state(&self) -> PlayState {
            self.0.get()
        }
        fn current_time(&self) -> Option<f64> {
            None
        }
        fn timing(&self) -> EffectTiming {
            EffectTiming::default()
        }
        fn name(&self) -> Option<String> {
            None
        }
        fn id(&self) -> Option<String> {
            None
        }
        fn pause(&self) {
            self.0.set(PlayState::Paused);
        }
        fn play(&self) {
            self.0.set(PlayState::Running);
        }
    }

    /// Every node shares one flat animation list.
    struct Flat(Vec<Anim>);

    impl Host for Flat {
        type Node = u32;
        type Animation = Anim;

        fn animations(&self, _node: Option<&u32>) -> Vec<Anim> {
            self.0.clone()
        }
        fn bounding_rect(&self, _node: &u32) -> Rect {
            Rect::default()
        }
        fn style_property(&self, _node: &u32, _name: &str) -> Option<String> {
            None
        }
        fn tag_name(&self, _node: &u32) -> String {
            "div".into()
        }
        fn element_id(&self, _node: &u32) -> Option<String> {
            None
        }
        fn class_name(&self, _node: &u32) -> Option<String> {
            None
        }
        fn attribute(&self, _node: &u32, _name: &str) -> Option<String> {
            None
        }
        fn inner_markup(&self, _node: &u32) -> Option<String> {
            None
        }
        fn source_location(&self, _node: &u32) -> Option<SourceLocation> {
            None
        }
        fn now_millis(&self) -> u64 {
            0
        }
        fn overlay_mounted(&self) -> bool {
            false
        }
        fn set_overlay_mounted(&mut self, _mounted: bool) -> Result<(), SessionError> {
            Ok(())
        }
    }

    fn anim(state: PlayState) -> Anim {
        Anim(Rc::new(Cell::new(state)))
    }

    #[test]
    fn pause_only_tracks_running() {
        let host = Flat(vec![
            anim(PlayState::Running),
            anim(PlayState::Paused),
            anim(PlayState::Finished),
            anim(PlayState::Idle),
        ]);
        let mut reg = AnimationRegistry::new();
        assert_eq!(reg.pause(&host, Some(&1)), 1);
        assert_eq!(reg.paused()[0].prior, PlayState::Running);
        assert_eq!(host.0[0].play_state(), PlayState::Paused);
        assert_eq!(host.0[2].play_state(), PlayState::Finished);
        assert_eq!(host.0[3].play_state(), PlayState::Idle);
    }

    #[test]
    fn repause_resumes_previous_set_first() {
        let first = anim(PlayState::Running);
        let mut reg = AnimationRegistry::new();
        reg.pause(&Flat(vec![first.clone()]), None);
        assert_eq!(first.play_state(), PlayState::Paused);

        let second = anim(PlayState::Running);
        reg.pause(&Flat(vec![second.clone()]), None);
        assert_eq!(first.play_state(), PlayState::Running);
        assert_eq!(second.play_state(), PlayState::Paused);
        assert_eq!(reg.paused_len(), 1);
    }

    #[test]
    fn resume_is_idempotent() {
        let a = anim(PlayState::Running);
        let mut reg = AnimationRegistry::new();
        reg.pause(&Flat(vec![a.clone()]), None);
        assert_eq!(reg.resume(), 1);
        assert!(reg.is_empty());
        assert_eq!(reg.resume(), 0);
        assert_eq!(a.play_state(), PlayState::Running);
    }
}
