//! Performance counters
//!
//! Sixteen `f32` slots exposed to the host as a flat array. Counters are
//! telemetry only; nothing in the renderer reads them back.
//!
//! | Slot | Meaning | Update |
//! |------|---------|--------|
//! | 0 | total march steps | set per pass |
//! | 1 | scene SDF calls (steps + normal samples) | accumulated |
//! | 2 | normal SDF calls | accumulated |
//! | 3 | color lookup shape scans | accumulated |
//! | 4 | hits | set per pass |
//! | 5 | misses | set per pass |
//! | 6 | average steps per batch | set per pass |
//! | 7 | hit rate, percent of rays | set per pass |
//! | 8 | rays in the last pass | set per pass |
//! | 9 | batches in the last pass | set per pass |
//!
//! Slots 10 to 15 are reserved and stay zero.

use crate::raycast::MarchStats;

/// Number of metric slots
pub const METRICS_LEN: usize = 16;

/// Slot indices
pub mod slot {
    /// Total march steps of the last pass
    pub const TOTAL_STEPS: usize = 0;
    /// Scene SDF calls since reset
    pub const SDF_CALLS: usize = 1;
    /// Normal SDF calls since reset
    pub const NORMAL_SDF_CALLS: usize = 2;
    /// Color lookup shape scans since reset
    pub const COLOR_LOOKUPS: usize = 3;
    /// Hits in the last pass
    pub const HITS: usize = 4;
    /// Misses in the last pass
    pub const MISSES: usize = 5;
    /// Average steps per batch in the last pass
    pub const AVG_STEPS: usize = 6;
    /// Hit rate of the last pass, in percent
    pub const HIT_RATE: usize = 7;
    /// Rays in the last pass
    pub const RAYS: usize = 8;
    /// Batches in the last pass
    pub const BATCHES: usize = 9;
}

/// The host-visible counter block
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PerfMetrics([f32; METRICS_LEN]);

impl PerfMetrics {
    /// Zeroed counters
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero every slot
    pub fn reset(&mut self) {
        self.0 = [0.0; METRICS_LEN];
    }

    /// All slots
    #[inline]
    pub fn as_slice(&self) -> &[f32; METRICS_LEN] {
        &self.0
    }

    /// One slot; out-of-range reads return 0
    #[inline]
    pub fn get(&self, index: usize) -> f32 {
        self.0.get(index).copied().unwrap_or(0.0)
    }

    /// Fold the counters of a finished pass into the block
    pub fn record_pass(&mut self, stats: &MarchStats) {
        let m = &mut self.0;
        m[slot::TOTAL_STEPS] = stats.steps as f32;
        m[slot::SDF_CALLS] += (stats.steps + stats.normal_samples) as f32;
        m[slot::NORMAL_SDF_CALLS] += stats.normal_samples as f32;
        m[slot::COLOR_LOOKUPS] += stats.color_lookups as f32;
        m[slot::HITS] = stats.hits as f32;
        m[slot::MISSES] = stats.misses as f32;
        m[slot::AVG_STEPS] = stats.steps as f32 / stats.batches.max(1) as f32;
        m[slot::HIT_RATE] = if stats.rays > 0 {
            100.0 * stats.hits as f32 / stats.rays as f32
        } else {
            0.0
        };
        m[slot::RAYS] = stats.rays as f32;
        m[slot::BATCHES] = stats.batches as f32;
    }
}
