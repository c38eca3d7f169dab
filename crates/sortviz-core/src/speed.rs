//! Speed slider → timer cadence.
//!
//! Speed maps exponentially onto a tick interval, so each slider notch feels
//! like the same relative change. Near the top of the range, and on large
//! arrays, several trace steps are consumed per tick.

use serde::{Deserialize, Serialize};

/// Accepted slider bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedRange {
    pub min: f64,
    pub max: f64,
}

impl Default for SpeedRange {
    fn default() -> Self {
        Self { min: 0.0, max: 100.0 }
    }
}

impl SpeedRange {
    pub fn clamp(&self, speed: f64) -> f64 {
        speed.max(self.min).min(self.max)
    }
}

/// Interval bounds in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaybackIntervalRange {
    pub fast_ms: f64,
    pub slow_ms: f64,
}

impl Default for PlaybackIntervalRange {
    fn default() -> Self {
        Self {
            fast_ms: 1.0,
            slow_ms: 700.0,
        }
    }
}

/// How often to tick and how many steps each tick consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackCadence {
    pub interval_ms: u64,
    pub steps_per_tick: usize,
}

/// Tick interval for `speed`, with the default ranges.
pub fn map_speed_to_interval_ms(speed: f64) -> u64 {
    map_speed_to_interval_ms_with(
        speed,
        SpeedRange::default(),
        PlaybackIntervalRange::default(),
    )
}

pub fn map_speed_to_interval_ms_with(
    speed: f64,
    speed_range: SpeedRange,
    interval_range: PlaybackIntervalRange,
) -> u64 {
    let span = speed_range.max - speed_range.min;
    if span == 0.0 {
        return interval_range.fast_ms.round().max(0.0) as u64;
    }

    let progress = (speed_range.clamp(speed) - speed_range.min) / span;
    let slow = interval_range.slow_ms.max(1.0);
    let fast = interval_range.fast_ms.min(slow).max(1.0);
    let interval = slow * (fast / slow).powf(progress);

    interval.round() as u64
}

/// Cadence for `speed` on an array of `array_size` values.
pub fn resolve_playback_cadence(speed: f64, array_size: usize) -> PlaybackCadence {
    resolve_playback_cadence_with(speed, array_size, SpeedRange::default())
}

pub fn resolve_playback_cadence_with(
    speed: f64,
    array_size: usize,
    speed_range: SpeedRange,
) -> PlaybackCadence {
    let interval_ms =
        map_speed_to_interval_ms_with(speed, speed_range, PlaybackIntervalRange::default());
    let speed = speed_range.clamp(speed);
    let size = array_size.max(1);

    // (minimum size, minimum speed, extra steps)
    const BANDS: [(usize, f64, usize); 8] = [
        (0, 75.0, 1),
        (0, 90.0, 2),
        (0, 97.0, 2),
        (120, 70.0, 1),
        (170, 85.0, 1),
        (300, 85.0, 2),
        (600, 90.0, 3),
        (900, 95.0, 4),
    ];

    let steps_per_tick = 1 + BANDS
        .iter()
        .filter(|(min_size, min_speed, _)| size >= *min_size && speed >= *min_speed)
        .map(|(_, _, extra)| extra)
        .sum::<usize>();

    PlaybackCadence {
        interval_ms,
        steps_per_tick,
    }
}

/// Length of the inter-step animation for a single-step tick.
pub fn transition_duration_ms(interval_ms: u64) -> u64 {
    let scaled = (interval_ms as f64 * 0.85).round() as u64;
    scaled.clamp(12, 260)
}
