//! Edge detection over level-triggered button samples.

use handheld_core::{Button, ButtonSample, ButtonSet};

/// One detection step.
///
/// A tracked button that is held while armed fires once and becomes
/// disarmed; a tracked button that is not held becomes armed again. Buttons
/// outside `tracked` never fire and keep their latch state.
///
/// Returns `(fired, new_armed)`.
pub fn detect(armed: ButtonSet, sample: ButtonSample, tracked: ButtonSet) -> (ButtonSet, ButtonSet) {
    let held = sample.intersection(tracked);
    let released = tracked.difference(sample);
    let fired = held.intersection(armed);
    let new_armed = armed.difference(held).union(released);
    (fired, new_armed)
}

/// Per-button "armed" flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeLatch {
    armed: ButtonSet,
}

impl EdgeLatch {
    /// A latch with every button armed.
    pub fn armed() -> Self {
        Self {
            armed: ButtonSet::all(),
        }
    }

    pub fn is_armed(&self, button: Button) -> bool {
        self.armed.contains(button)
    }

    /// The currently armed buttons.
    pub fn armed_set(&self) -> ButtonSet {
        self.armed
    }
}

impl Default for EdgeLatch {
    fn default() -> Self {
        Self::armed()
    }
}

/// Turns successive samples into single-fire press edges.
#[derive(Debug, Clone)]
pub struct EdgeDetector {
    tracked: ButtonSet,
    latch: EdgeLatch,
}

impl EdgeDetector {
    /// Create a detector for the given buttons, all armed.
    pub fn new(tracked: ButtonSet) -> Self {
        Self {
            tracked,
            latch: EdgeLatch::armed(),
        }
    }

    /// Feed one sample and return the edges fired by it.
    pub fn detect(&mut self, sample: ButtonSample) -> ButtonSet {
        let (fired, armed) = detect(self.latch.armed, sample, self.tracked);
        self.latch.armed = armed;
        fired
    }

    pub fn latch(&self) -> &EdgeLatch {
        &self.latch
    }

    pub fn tracked(&self) -> ButtonSet {
        self.tracked
    }
}

impl Default for EdgeDetector {
    fn default() -> Self {
        Self::new(ButtonSet::all())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(buttons: &[Button]) -> ButtonSet {
        buttons.iter().copied().collect()
    }

    #[test]
    fn test_held_button_fires_once() {
        let mut detector = EdgeDetector::default();
        let a = set(&[Button::A]);

        assert_eq!(detector.detect(a), a);
        for _ in 0..20 {
            assert!(detector.detect(a).is_empty());
        }
        assert!(!detector.latch().is_armed(Button::A));
    }

    #[test]
    fn test_release_rearms() {
        let mut detector = EdgeDetector::default();
        let b = set(&[Button::B]);

        assert_eq!(detector.detect(b), b);
        assert!(detector.detect(ButtonSet::EMPTY).is_empty());
        assert!(detector.latch().is_armed(Button::B));
        assert_eq!(detector.detect(b), b);
    }

    #[test]
    fn test_simultaneous_presses_fire_independently() {
        let mut detector = EdgeDetector::default();
        let both = set(&[Button::DPadDown, Button::A]);

        assert_eq!(detector.detect(both), both);
        // Release only A; holding Down must not fire again.
        assert!(detector.detect(set(&[Button::DPadDown])).is_empty());
        assert_eq!(detector.detect(both), set(&[Button::A]));
    }

    #[test]
    fn test_untracked_buttons_never_fire() {
        let mut detector = EdgeDetector::new(set(&[Button::A]));
        let fired = detector.detect(set(&[Button::A, Button::Start]));
        assert_eq!(fired, set(&[Button::A]));
        assert_eq!(detector.tracked(), set(&[Button::A]));
    }

    #[test]
    fn test_pure_detect_keeps_untracked_latches() {
        let armed = set(&[Button::Start]);
        let (fired, new_armed) = detect(armed, set(&[Button::Start]), set(&[Button::A]));
        assert!(fired.is_empty());
        assert!(new_armed.contains(Button::Start));
        assert!(new_armed.contains(Button::A));
    }
}
