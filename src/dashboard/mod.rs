//! Simulated tunneling metrics for the dashboard
//!
//! Nothing here talks to a PLC. `Simulator` nudges a handful of gauges at
//! random on every tick so the presentation layer has something moving to
//! draw. Anything that can produce a `Metrics` snapshot on demand can stand in
//! for it through `DataSource`.

pub mod ticker;

use rand::Rng;
use rand::rngs::ThreadRng;
use std::collections::VecDeque;
use tracing::debug;

use crate::constants::dashboard::*;

/// Integer reading kept inside `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gauge {
    value: i32,
    min: i32,
    max: i32,
    max_delta: i32,
}

impl Gauge {
    pub const fn new(value: i32, (min, max): (i32, i32), max_delta: i32) -> Self {
        Self {
            value,
            min,
            max,
            max_delta,
        }
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn bounds(&self) -> (i32, i32) {
        (self.min, self.max)
    }

    /// Shift by `delta`, clamped to the bounds
    pub fn perturb(&mut self, delta: i32) {
        self.value = self.value.saturating_add(delta).clamp(self.min, self.max);
    }

    fn perturb_random<R: Rng>(&mut self, rng: &mut R) {
        let delta = rng.random_range(-self.max_delta..=self.max_delta);
        self.perturb(delta);
    }
}

/// One completed ring in the rolling window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingSample {
    pub ring: u32,
    pub output: i32,
    pub stroke: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metrics {
    /// 0 idle, 1 advancing, 2 fault
    pub status: u8,
    pub advance_stroke: Gauge,
    pub instant_output: Gauge,
    pub ring_output: Gauge,
    /// Oldest ring first
    pub rings: VecDeque<RingSample>,
}

impl Default for Metrics {
    fn default() -> Self {
        let rings = INITIAL_RING_OUTPUTS
            .iter()
            .zip(1..)
            .map(|(&output, ring)| RingSample {
                ring,
                output,
                stroke: ADVANCE_STROKE_DEFAULT,
            })
            .collect();

        Self {
            status: DEFAULT_STATUS,
            advance_stroke: Gauge::new(ADVANCE_STROKE_DEFAULT, ADVANCE_STROKE_RANGE, ADVANCE_STROKE_DELTA),
            instant_output: Gauge::new(INSTANT_OUTPUT_DEFAULT, INSTANT_OUTPUT_RANGE, INSTANT_OUTPUT_DELTA),
            ring_output: Gauge::new(RING_OUTPUT_DEFAULT, RING_OUTPUT_RANGE, RING_OUTPUT_DELTA),
            rings,
        }
    }
}

impl Metrics {
    pub fn latest_ring(&self) -> Option<&RingSample> {
        self.rings.back()
    }

    /// Drop the oldest ring and append the next one
    pub fn advance_ring(&mut self, output: i32) {
        let (min, max) = RING_OUTPUT_RANGE;
        let next = self.latest_ring().map_or(1, |r| r.ring + 1);
        if self.rings.len() >= RING_WINDOW {
            self.rings.pop_front();
        }
        self.rings.push_back(RingSample {
            ring: next,
            output: output.clamp(min, max),
            stroke: self.advance_stroke.value(),
        });
    }
}

/// Source of dashboard readings
pub trait DataSource {
    /// Advance the readings by one period
    fn tick(&mut self);

    fn snapshot(&self) -> Metrics;
}

pub struct Simulator<R = ThreadRng> {
    metrics: Metrics,
    rng: R,
}

impl Simulator {
    pub fn new() -> Self {
        Self::with_rng(rand::rng())
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Simulator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            metrics: Metrics::default(),
            rng,
        }
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}

impl<R: Rng> DataSource for Simulator<R> {
    fn tick(&mut self) {
        let Self { metrics, rng } = self;

        if rng.random_bool(PERTURB_PROBABILITY) {
            metrics.status = rng.random_range(0..=STATUS_MAX);
        }
        for gauge in [
            &mut metrics.advance_stroke,
            &mut metrics.instant_output,
            &mut metrics.ring_output,
        ] {
            if rng.random_bool(PERTURB_PROBABILITY) {
                gauge.perturb_random(rng);
            }
        }

        if rng.random_bool(RING_ADVANCE_PROBABILITY) {
            let (min, max) = RING_OUTPUT_RANGE;
            metrics.advance_ring(rng.random_range(min..=max));
            debug!(ring = ?metrics.latest_ring().map(|r| r.ring), "Ring advanced");
        }
    }

    fn snapshot(&self) -> Metrics {
        self.metrics.clone()
    }
}
