//! Runtime configuration.
//!
//! `EngineConfig` carries everything the binary can override from the command
//! line; `SearchConfig` is the slice of it the search itself reads.

use std::time::Duration;

use crate::search::move_orderer::KILLER_DEPTHS;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 8888;
pub const DEFAULT_MOVE_TIME_MS: u64 = 4700;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub host: String,
    pub port: u16,
    /// Wall-clock budget per move. The search stops starting new work once it
    /// elapses.
    pub move_time_ms: u64,
    pub max_depth: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_owned(),
            port: DEFAULT_PORT,
            move_time_ms: DEFAULT_MOVE_TIME_MS,
            max_depth: KILLER_DEPTHS,
        }
    }
}

impl EngineConfig {
    #[inline]
    pub fn move_time(&self) -> Duration {
        Duration::from_millis(self.move_time_ms)
    }

    #[inline]
    pub fn search(&self) -> SearchConfig {
        SearchConfig::new(self.max_depth)
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Limits for one iterative-deepening run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub max_depth: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: KILLER_DEPTHS,
        }
    }
}

impl SearchConfig {
    /// Killers are only recorded for depths below `KILLER_DEPTHS`, so deeper
    /// limits are clamped.
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth: max_depth.clamp(1, KILLER_DEPTHS),
        }
    }
}
