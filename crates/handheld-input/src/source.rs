//! Controller sample sources.

use std::collections::VecDeque;

use handheld_core::ButtonSample;

/// Something that can be asked for the currently held buttons.
pub trait GamepadSource {
    /// Read the held buttons.
    ///
    /// Returns `None` while no controller is connected. Implementations retry
    /// discovery on every call and must return within one poll period.
    fn poll(&mut self) -> Option<ButtonSample>;

    /// Human-readable name of the device, for logging.
    fn name(&self) -> &str;
}

impl<S: GamepadSource + ?Sized> GamepadSource for Box<S> {
    fn poll(&mut self) -> Option<ButtonSample> {
        (**self).poll()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Replays a fixed sequence of samples, then reports a disconnected device.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPad {
    samples: VecDeque<Option<ButtonSample>>,
}

impl ScriptedPad {
    /// Create a pad from per-tick samples; `None` simulates "no controller".
    pub fn new(samples: impl IntoIterator<Item = Option<ButtonSample>>) -> Self {
        Self {
            samples: samples.into_iter().collect(),
        }
    }

    /// Create a pad that is connected for every sample.
    pub fn connected(samples: impl IntoIterator<Item = ButtonSample>) -> Self {
        Self::new(samples.into_iter().map(Some))
    }

    /// Number of samples left to replay.
    pub fn remaining(&self) -> usize {
        self.samples.len()
    }
}

impl GamepadSource for ScriptedPad {
    fn poll(&mut self) -> Option<ButtonSample> {
        self.samples.pop_front().flatten()
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Two sources read as one device: held buttons are the union of both.
///
/// Disconnected only when both halves are.
#[derive(Debug)]
pub struct MergedPad<A, B> {
    primary: A,
    secondary: B,
    name: String,
}

impl<A: GamepadSource, B: GamepadSource> MergedPad<A, B> {
    pub fn new(primary: A, secondary: B) -> Self {
        let name = format!("{}+{}", primary.name(), secondary.name());
        Self {
            primary,
            secondary,
            name,
        }
    }
}

impl<A: GamepadSource, B: GamepadSource> GamepadSource for MergedPad<A, B> {
    fn poll(&mut self) -> Option<ButtonSample> {
        match (self.primary.poll(), self.secondary.poll()) {
            (Some(a), Some(b)) => Some(a.union(b)),
            (sample, None) | (None, sample) => sample,
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
