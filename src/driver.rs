//! Fixed-period frame driver
//!
//! Runs [`OverlayEngine::tick`] on a tokio interval until a shutdown signal
//! arrives. Hosts that already own a frame clock can skip this and call
//! `tick` themselves.

use crate::engine::OverlayEngine;
use crate::host::Host;
use crate::settings::SettingsStore;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior};

/// ~60 Hz.
pub const FRAME_PERIOD: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, Copy)]
pub struct FrameDriver {
    period: Duration,
}

impl FrameDriver {
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Tick `engine` until `shutdown` turns true or its sender goes away.
    /// Each tick gets the measured time since the previous one, so late
    /// frames advance animations by the real gap. Returns the tick count.
    pub async fn run<S, H>(
        &self,
        engine: &mut OverlayEngine<S>,
        host: &mut H,
        mut shutdown: watch::Receiver<bool>,
    ) -> u64
    where
        S: SettingsStore,
        H: Host + ?Sized,
    {
        if *shutdown.borrow() {
            return 0;
        }

        let mut interval = tokio::time::interval(self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tracing::info!("Frame driver started (period={:?})", self.period);
        let mut last = Instant::now();
        let mut ticks = 0u64;

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let now = Instant::now();
                    let delta_ms = now.duration_since(last).as_secs_f64() * 1000.0;
                    last = now;
                    engine.tick(host, delta_ms);
                    ticks += 1;
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow_and_update() {
                        break;
                    }
                }
            }
        }

        engine.shutdown(host);
        tracing::info!("Frame driver stopped after {} ticks", ticks);
        ticks
    }
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new(FRAME_PERIOD)
    }
}
