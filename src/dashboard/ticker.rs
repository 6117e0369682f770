//! Fixed-period scheduling for the dashboard tick
//!
//! The loop runs on the calling thread and polls in short sleeps, so a stop
//! request is noticed within one poll. The configured interval is read again
//! after every tick; a new value sets the wait until the following tick.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};
use tracing::info;

use super::{DataSource, Metrics};
use crate::config::RefreshInterval;
use crate::constants::dashboard::POLL_INTERVAL_MS;

#[derive(Debug, Clone, Copy)]
pub struct Ticker {
    interval: Duration,
    next_due: Instant,
}

impl Ticker {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next_due: now + interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_due
    }

    /// Start a new period of `interval` from `now`
    pub fn restart(&mut self, interval: Duration, now: Instant) {
        *self = Self::new(interval, now);
    }

    /// Schedule the next tick one period after `now`
    pub fn mark_fired(&mut self, now: Instant) {
        self.next_due = now + self.interval;
    }

    /// Restart with `interval` if it differs from the current one.
    /// Returns true if the period changed.
    pub fn retune(&mut self, interval: Duration, now: Instant) -> bool {
        if interval == self.interval {
            return false;
        }
        info!(
            old_ms = self.interval.as_millis() as u64,
            new_ms = interval.as_millis() as u64,
            "Refresh interval changed, restarting timer"
        );
        self.restart(interval, now);
        true
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }
}

/// Drive `source` until `stop` is set or `max_ticks` ticks have run.
///
/// `render` sees the initial snapshot (tick 0) and then every tick. The
/// interval is read again before each wait so a change restarts the period.
/// Returns the number of ticks performed.
pub fn run<S, F>(
    source: &mut S,
    interval: &RefreshInterval,
    stop: &AtomicBool,
    max_ticks: Option<u64>,
    mut render: F,
) -> u64
where
    S: DataSource + ?Sized,
    F: FnMut(u64, &Metrics),
{
    let mut ticker = Ticker::new(Duration::from_millis(interval.current_ms()), Instant::now());
    let mut ticks = 0;

    info!(interval_ms = ticker.interval().as_millis() as u64, backing = interval.backing_name(), "Dashboard started");
    render(ticks, &source.snapshot());

    while max_ticks.is_none_or(|max| ticks < max) {
        if stop.load(Ordering::Relaxed) {
            info!(ticks, "Dashboard stopped");
            break;
        }

        let now = Instant::now();
        if ticker.is_due(now) {
            source.tick();
            ticks += 1;
            render(ticks, &source.snapshot());
            ticker.mark_fired(now);

            ticker.retune(Duration::from_millis(interval.current_ms()), now);
            continue;
        }

        thread::sleep(ticker.remaining(now).min(Duration::from_millis(POLL_INTERVAL_MS)));
    }

    ticks
}
