//! Top-level world configuration, loaded from TOML.
//!
//! ```toml
//! tick_ms               = 100
//! total_ticks           = 3000
//! output_interval_ticks = 10
//! activation_radius     = 250.0
//! loaded_maps           = [0, 1]
//! seed                  = 42
//! ```
//!
//! Every key is optional; missing keys take the [`Default`] values.

use std::path::Path;

use serde::Deserialize;

use crate::{CoreError, CoreResult, MapId, SimClock, Tick};

/// Top-level world configuration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorldConfig {
    /// Milliseconds per world tick.
    pub tick_ms: u32,

    /// Total ticks `World::run` simulates.
    pub total_ticks: u64,

    /// Snapshot every N ticks.  0 disables snapshots.
    pub output_interval_ticks: u64,

    /// A region counts as active while a player is within this many units of
    /// the carrier.  Static passengers exist only in active regions.
    pub activation_radius: f32,

    /// Maps that accept teleported players.  Empty means "every map".
    pub loaded_maps: Vec<u32>,

    /// Seed for applications that randomize their setup.  The core
    /// simulation itself is deterministic and ignores it.
    pub seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            tick_ms:               100,
            total_ticks:           600,
            output_interval_ticks: 10,
            activation_radius:     250.0,
            loaded_maps:           Vec::new(),
            seed:                  0,
        }
    }
}

impl WorldConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> CoreResult<Self> {
        let config: WorldConfig =
            toml::from_str(text).map_err(|e| CoreError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.tick_ms == 0 {
            return Err(CoreError::Config("tick_ms must be > 0".into()));
        }
        if !(self.activation_radius.is_finite() && self.activation_radius >= 0.0) {
            return Err(CoreError::Config(format!(
                "activation_radius must be a finite, non-negative number (got {})",
                self.activation_radius
            )));
        }
        Ok(())
    }

    /// The tick at which the run ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// `true` if players may be teleported onto `map`.
    pub fn is_map_loaded(&self, map: MapId) -> bool {
        self.loaded_maps.is_empty() || self.loaded_maps.contains(&map.0)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_ms)
    }
}
