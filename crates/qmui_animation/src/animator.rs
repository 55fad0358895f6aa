//! Animation collections
//!
//! Groups independent animations so they can be started or stopped together.
//! Each animation keeps its own lifecycle and can still be queried directly.

use crate::driver::Animation;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to an animation registered with an [`Animator`]
    pub struct AnimationId;
}

/// Unordered collection of animations with bulk start/stop
#[derive(Debug, Default)]
pub struct Animator {
    animations: SlotMap<AnimationId, Animation>,
}

impl Animator {
    pub fn new() -> Self {
        Self {
            animations: SlotMap::with_key(),
        }
    }

    pub fn add(&mut self, animation: Animation) -> AnimationId {
        self.animations.insert(animation)
    }

    pub fn get(&self, id: AnimationId) -> Option<&Animation> {
        self.animations.get(id)
    }

    /// Remove an animation from the collection; it keeps running if started
    pub fn remove(&mut self, id: AnimationId) -> Option<Animation> {
        self.animations.remove(id)
    }

    /// Start every animation; already running or finished ones are unaffected
    pub fn start_all(&self) {
        tracing::debug!("Animator: starting {} animations", self.animations.len());
        for (_, animation) in self.animations.iter() {
            animation.start();
        }
    }

    /// Stop every running animation
    pub fn stop_all(&self) {
        tracing::debug!("Animator: stopping {} animations", self.running_count());
        for (_, animation) in self.animations.iter() {
            animation.stop();
        }
    }

    /// Check if any animations are still active
    pub fn is_any_running(&self) -> bool {
        self.animations.iter().any(|(_, a)| a.is_running())
    }

    pub fn running_count(&self) -> usize {
        self.animations
            .iter()
            .filter(|(_, a)| a.is_running())
            .count()
    }

    /// Drop animations that completed or were cancelled
    ///
    /// Returns how many were removed.
    pub fn clear_finished(&mut self) -> usize {
        let before = self.animations.len();
        self.animations.retain(|_, a| !a.state().is_terminal());
        before - self.animations.len()
    }

    /// Iterate over all animations
    pub fn iter(&self) -> impl Iterator<Item = (AnimationId, &Animation)> {
        self.animations.iter()
    }

    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::AnimationState;
    use std::time::Duration;

    #[test]
    fn test_add_and_remove() {
        let mut animator = Animator::new();
        let id = animator.add(Animation::new(Duration::from_millis(50), None, |_| {}));

        assert_eq!(animator.len(), 1);
        assert!(animator.get(id).is_some());
        assert!(animator.remove(id).is_some());
        assert!(animator.get(id).is_none());
        assert!(animator.is_empty());
    }

    #[test]
    fn test_stop_all_cancels_every_animation() {
        let mut animator = Animator::new();
        let ids: Vec<_> = (0..3)
            .map(|_| animator.add(Animation::new(Duration::from_secs(5), None, |_| {})))
            .collect();

        animator.start_all();
        assert_eq!(animator.running_count(), 3);

        animator.stop_all();
        assert!(!animator.is_any_running());
        for id in ids {
            assert_eq!(animator.get(id).unwrap().state(), AnimationState::Cancelled);
        }

        assert_eq!(animator.clear_finished(), 3);
        assert!(animator.is_empty());
    }

    #[test]
    fn test_clear_finished_keeps_idle_animations() {
        let mut animator = Animator::new();
        animator.add(Animation::new(Duration::from_millis(50), None, |_| {}));
        assert_eq!(animator.clear_finished(), 0);
        assert_eq!(animator.len(), 1);
    }
}
