//! Playback speed levels.
//!
//! Stored preferences hold the level (1-5), so the level-to-multiplier table
//! must stay exactly as it is.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Base delay between automatic steps at multiplier 1, in milliseconds.
pub const BASE_INTERVAL_MS: u64 = 200;

/// Shortest delay between automatic steps, in milliseconds.
pub const MIN_INTERVAL_MS: u64 = 1;

/// A speed slider position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpeedLevel(u8);

impl Default for SpeedLevel {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl SpeedLevel {
    pub const VERY_SLOW: Self = Self(1);
    pub const SLOW: Self = Self(2);
    pub const NORMAL: Self = Self(3);
    pub const FAST: Self = Self(4);
    pub const VERY_FAST: Self = Self(5);

    /// Wrap a raw level. Out-of-range levels are kept and read as Normal.
    pub const fn new(level: u8) -> Self {
        Self(level)
    }

    pub const fn level(self) -> u8 {
        self.0
    }

    /// Speed multiplier; higher is faster.
    pub const fn multiplier(self) -> u64 {
        match self.0 {
            1 => 1,
            2 => 5,
            3 => 15,
            4 => 30,
            5 => 60,
            _ => 15,
        }
    }

    pub const fn label(self) -> &'static str {
        match self.0 {
            1 => "Very Slow",
            2 => "Slow",
            3 => "Normal",
            4 => "Fast",
            5 => "Very Fast",
            _ => "Normal",
        }
    }

    /// Delay before the next automatic step: `max(1, 200 / multiplier)` ms.
    pub fn delay(self) -> Duration {
        let micros = BASE_INTERVAL_MS * 1_000 / self.multiplier();
        Duration::from_micros(micros.max(MIN_INTERVAL_MS * 1_000))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multipliers_match_stored_levels() {
        let table: Vec<u64> = (1..=5).map(|l| SpeedLevel::new(l).multiplier()).collect();
        assert_eq!(table, vec![1, 5, 15, 30, 60]);
    }

    #[test]
    fn unknown_levels_read_as_normal() {
        assert_eq!(SpeedLevel::new(0).multiplier(), 15);
        assert_eq!(SpeedLevel::new(9).label(), "Normal");
        assert_eq!(SpeedLevel::default(), SpeedLevel::NORMAL);
    }

    #[test]
    fn delays() {
        assert_eq!(SpeedLevel::VERY_SLOW.delay(), Duration::from_millis(200));
        assert_eq!(SpeedLevel::SLOW.delay(), Duration::from_millis(40));
        assert_eq!(SpeedLevel::NORMAL.delay(), Duration::from_micros(13_333));
        assert_eq!(SpeedLevel::VERY_FAST.delay(), Duration::from_micros(3_333));
    }

    #[test]
    fn faster_levels_never_slow_down() {
        let delays: Vec<_> = (1..=5).map(|l| SpeedLevel::new(l).delay()).collect();
        assert!(delays.windows(2).all(|w| w[0] > w[1]));
        assert!(delays.iter().all(|d| *d >= Duration::from_millis(MIN_INTERVAL_MS)));
    }

    #[test]
    fn serializes_as_bare_level() {
        assert_eq!(serde_json::to_string(&SpeedLevel::FAST).unwrap(), "4");
        let level: SpeedLevel = serde_json::from_str("2").unwrap();
        assert_eq!(level, SpeedLevel::SLOW);
    }
}
