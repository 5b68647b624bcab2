//! Background integrity monitor.
//!
//! A single tokio task supervises the protected process for its lifetime:
//! it sleeps an unpredictable jittered interval, checks that the wall
//! clock did not jump ahead of the sleep, then runs the injected validity
//! predicate. Either trigger ends the task with a [`TerminationReason`]
//! delivered to the host through the [`MonitorHandle`]; the host performs
//! the actual shutdown, which keeps the stop unconditional but observable.
//!
//! The clock comparison is deliberately asymmetric: only a forward jump
//! beyond `sleep + 30` minutes fires. A machine resumed from a long
//! suspend trips it (false positive) and a clock set backward does not
//! (false negative); both are characteristics of the artifact format's
//! reference behavior and are kept as-is.

use crate::clock::{Clock, SystemClock};
use crate::validity::ValidityCheck;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// Number of jitter slots the sleep is drawn from.
pub const JITTER_SLOTS: u32 = 240;

/// Length of one jitter slot in minutes. Sleeps are uniform in
/// `[0, JITTER_SLOTS) * SLOT_MINUTES`.
pub const SLOT_MINUTES: u64 = 6;

/// Forward clock skew tolerated beyond the scheduled sleep, in minutes.
pub const SKEW_TOLERANCE_MINUTES: i64 = 30;

/// Why the monitor ordered the process to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// The wall clock advanced past the scheduled sleep beyond tolerance.
    ClockJump {
        /// Observed skew in minutes beyond the scheduled sleep.
        skew_minutes: i64,
    },
    /// The validity predicate returned false.
    ValidityRejected,
}

/// Uniform integer source for the jitter draw.
pub trait RandomSource: Send + 'static {
    /// Returns a uniform integer in `[0, bound)`.
    fn next_below(&mut self, bound: u32) -> u32;
}

/// Random source seeded once from OS entropy at monitor start.
pub struct EntropyRandom(StdRng);

impl EntropyRandom {
    /// Seeds a fresh generator from OS entropy.
    #[must_use]
    pub fn new() -> Self {
        Self(StdRng::from_entropy())
    }
}

impl Default for EntropyRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for EntropyRandom {
    fn next_below(&mut self, bound: u32) -> u32 {
        self.0.gen_range(0..bound)
    }
}

/// The background integrity monitor.
pub struct IntegrityMonitor {
    validity: Box<dyn ValidityCheck>,
    clock: Arc<dyn Clock>,
    random: Box<dyn RandomSource>,
}

impl IntegrityMonitor {
    /// Creates a monitor over the given validity predicate with the system
    /// clock and an entropy-seeded jitter source.
    pub fn new(validity: impl ValidityCheck) -> Self {
        Self {
            validity: Box::new(validity),
            clock: Arc::new(SystemClock),
            random: Box::new(EntropyRandom::new()),
        }
    }

    /// Replaces the wall-clock source.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replaces the jitter source.
    #[must_use]
    pub fn with_random(mut self, random: impl RandomSource) -> Self {
        self.random = Box::new(random);
        self
    }

    /// Starts the monitor task and returns its handle.
    pub fn spawn(self) -> MonitorHandle {
        let (reason_tx, reason_rx) = oneshot::channel();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(self.run(reason_tx, shutdown_rx));
        MonitorHandle {
            reason_rx,
            shutdown_tx,
            task,
        }
    }

    async fn run(
        mut self,
        reason_tx: oneshot::Sender<TerminationReason>,
        mut shutdown_rx: watch::Receiver<bool>,
    ) {
        let mut last_run = self.clock.now();
        loop {
            let slots = self.random.next_below(JITTER_SLOTS);
            let sleep_minutes = u64::from(slots) * SLOT_MINUTES;
            debug!(sleep_minutes, "integrity check scheduled");

            tokio::select! {
                // Fires on stop() and when the handle is dropped.
                _ = shutdown_rx.changed() => {
                    info!("integrity monitor stopped");
                    return;
                }
                () = tokio::time::sleep(Duration::from_secs(sleep_minutes * 60)) => {}
            }

            let now = self.clock.now();
            let elapsed_minutes = now.signed_duration_since(last_run).num_minutes();
            let skew_minutes = elapsed_minutes - sleep_minutes as i64;
            if skew_minutes >= SKEW_TOLERANCE_MINUTES {
                error!(
                    skew_minutes,
                    "system time moved under the monitor; stopping"
                );
                let _ = reason_tx.send(TerminationReason::ClockJump { skew_minutes });
                return;
            }

            if !self.validity.check() {
                error!("license validity rejected; stopping");
                let _ = reason_tx.send(TerminationReason::ValidityRejected);
                return;
            }
            last_run = now;
        }
    }
}

/// Host-side handle to a running monitor.
///
/// Dropping the handle cancels the monitor task.
pub struct MonitorHandle {
    reason_rx: oneshot::Receiver<TerminationReason>,
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl MonitorHandle {
    /// Requests the monitor to stop. No termination reason is delivered.
    pub fn stop(&self) {
        let _ = self.shutdown_tx.send(true);
    }

    /// Waits for the monitor to end.
    ///
    /// Returns the termination reason when the monitor tripped, or `None`
    /// when it was stopped by the host.
    pub async fn wait(self) -> Option<TerminationReason> {
        let reason = self.reason_rx.await.ok();
        let _ = self.task.await;
        reason
    }
}
