//! Controller input for handheld-commander.
//!
//! A [`GamepadSource`] is sampled on a fixed period by a background poll
//! task. Each level-triggered sample passes through the [`EdgeDetector`],
//! which turns "button held" into exactly one "button pressed" edge per
//! physical press. Non-empty edge sets are posted to the UI context over a
//! channel; the poll task never touches application state.

mod edge;
mod keyboard;
mod poller;
#[cfg(feature = "sdl")]
mod sdl;
mod source;

pub use edge::{EdgeDetector, EdgeLatch, detect};
pub use keyboard::{KeyboardPad, map_key};
pub use poller::{Poller, PollerHandle, spawn_poller};
#[cfg(feature = "sdl")]
pub use sdl::SdlPad;
pub use source::{GamepadSource, MergedPad, ScriptedPad};
