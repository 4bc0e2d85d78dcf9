//! The periodic poll task.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use handheld_core::ButtonSet;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::{EdgeDetector, GamepadSource};

/// Sampling state of the poll task, independent of any thread.
#[derive(Debug, Default)]
pub struct Poller {
    detector: EdgeDetector,
    connected: bool,
}

impl Poller {
    pub fn new(detector: EdgeDetector) -> Self {
        Self {
            detector,
            connected: false,
        }
    }

    /// Sample the source once and return the fired edges, if any.
    ///
    /// A missing controller leaves the latches untouched.
    pub fn step<S: GamepadSource + ?Sized>(&mut self, source: &mut S) -> Option<ButtonSet> {
        let Some(sample) = source.poll() else {
            if self.connected {
                info!("Controller lost: {}", source.name());
                self.connected = false;
            }
            return None;
        };

        if !self.connected {
            info!("Controller connected: {}", source.name());
            self.connected = true;
        }

        let fired = self.detector.detect(sample);
        if fired.is_empty() {
            None
        } else {
            debug!(edges = %fired, "Edges fired");
            Some(fired)
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }
}

/// Handle to a running poll task.
#[derive(Debug)]
pub struct PollerHandle {
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl PollerHandle {
    /// Stop the task and wait for it to exit.
    pub fn stop(mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }

    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().is_none_or(JoinHandle::is_finished)
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

/// Start the poll task on a dedicated thread.
///
/// `factory` runs on that thread, so the source itself need not be `Send`.
/// Every `period` the source is sampled, edges are detected, and non-empty
/// edge sets are posted to `sender`. The task ends when the receiver is
/// dropped or the handle is stopped.
pub fn spawn_poller<F, S>(
    factory: F,
    period: Duration,
    sender: mpsc::UnboundedSender<ButtonSet>,
) -> std::io::Result<PollerHandle>
where
    F: FnOnce() -> S + Send + 'static,
    S: GamepadSource,
{
    let stop = Arc::new(AtomicBool::new(false));
    let stop_flag = Arc::clone(&stop);

    let thread = thread::Builder::new()
        .name("gamepad-poll".to_string())
        .spawn(move || {
            let mut source = factory();
            let mut poller = Poller::default();
            debug!("Polling {} every {:?}", source.name(), period);

            while !stop_flag.load(Ordering::Relaxed) && !sender.is_closed() {
                let started = Instant::now();
                if let Some(edges) = poller.step(&mut source) {
                    if sender.send(edges).is_err() {
                        break;
                    }
                }
                thread::sleep(period.saturating_sub(started.elapsed()));
            }
            debug!("Poll task stopped");
        })?;

    Ok(PollerHandle {
        stop,
        thread: Some(thread),
    })
}
