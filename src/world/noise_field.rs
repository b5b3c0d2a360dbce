//! Deterministic layered height field
//!
//! Heights are a pure function of the world position and the [`NoiseConfig`],
//! so neighbouring chunks generated at different times line up without sharing
//! any state.

use noise::{NoiseFn, Perlin};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WorldError};

/// Exponent applied to the normalized height to sharpen transitions near the extremes
pub const SHARPEN_EXPONENT: f64 = 1.2;

/// Seed of the underlying Perlin permutation table.
/// The configured seed shifts sampling coordinates instead.
const PRIMITIVE_SEED: u32 = 0;

/// Range a zero ("unset") seed is replaced from at startup
pub const RANDOM_SEED_MIN: i32 = -10_000;
pub const RANDOM_SEED_MAX: i32 = 10_000;

/// Height field parameters, fixed for the lifetime of a world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    /// Coordinate offset; 0 means "pick one at startup"
    pub seed: i32,
    /// Horizontal scale (larger = smoother terrain)
    pub noise_scale: f64,
    /// Multiplier applied by [`NoiseField::elevation`]
    pub height_multiplier: f64,
    /// Number of noise layers summed
    pub octaves: u32,
    /// Per-octave amplitude decay
    pub persistence: f64,
    /// Per-octave frequency growth
    pub lacunarity: f64,
    /// Frequency of the first octave
    pub base_frequency: f64,
    /// Cells strictly above this height are ground, the rest water
    pub water_level: f64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            noise_scale: 20.0,
            height_multiplier: 1.0,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
            base_frequency: 1.0,
            water_level: 0.4,
        }
    }
}

impl NoiseConfig {
    /// Replace an unset (zero) seed with a random one in [-10000, 10000).
    ///
    /// Call once at startup, before building the [`NoiseField`]. A non-zero seed is
    /// returned unchanged.
    pub fn resolve_seed<R: Rng>(mut self, rng: &mut R) -> Self {
        if self.seed == 0 {
            self.seed = rng.random_range(RANDOM_SEED_MIN..RANDOM_SEED_MAX);
            log::info!("No seed configured, using random seed {}", self.seed);
        }
        self
    }

    /// Reject parameters the height formula cannot work with
    pub fn validate(&self) -> Result<()> {
        if !(self.noise_scale.is_finite() && self.noise_scale > 0.0) {
            return Err(WorldError::InvalidConfig(format!(
                "noise_scale must be positive, got {}",
                self.noise_scale
            )));
        }
        if self.octaves == 0 {
            return Err(WorldError::InvalidConfig(
                "octaves must be at least 1".to_string(),
            ));
        }
        for (name, value) in [
            ("persistence", self.persistence),
            ("lacunarity", self.lacunarity),
            ("base_frequency", self.base_frequency),
            ("water_level", self.water_level),
            ("height_multiplier", self.height_multiplier),
        ] {
            if !value.is_finite() {
                return Err(WorldError::InvalidConfig(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Multi-octave Perlin height function over continuous world coordinates
#[derive(Clone)]
pub struct NoiseField {
    config: NoiseConfig,
    perlin: Perlin,
}

impl NoiseField {
    pub fn new(config: NoiseConfig) -> Self {
        Self {
            config,
            perlin: Perlin::new(PRIMITIVE_SEED),
        }
    }

    pub fn config(&self) -> &NoiseConfig {
        &self.config
    }

    /// Normalized height at a world position.
    ///
    /// Octave `i` samples at `(world + seed) / noise_scale * base_frequency * lacunarity^i`
    /// with weight `persistence^i`; the weighted mean is mapped from [-1, 1] to [0, 1]
    /// and raised to [`SHARPEN_EXPONENT`].
    ///
    /// The mapped mean is clamped to [0, 1] before exponentiation so a primitive that
    /// overshoots its nominal range can never feed a negative base into `powf`. The
    /// result is therefore always in [0, 1] for finite input.
    pub fn height(&self, world_x: f64, world_y: f64) -> f64 {
        let cfg = &self.config;
        let seed = cfg.seed as f64;
        let base_x = (world_x + seed) / cfg.noise_scale;
        let base_y = (world_y + seed) / cfg.noise_scale;

        let mut weighted_sum = 0.0;
        let mut amplitude_sum = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = cfg.base_frequency;

        for _ in 0..cfg.octaves {
            let value = self.perlin.get([base_x * frequency, base_y * frequency]);
            weighted_sum += value * amplitude;
            amplitude_sum += amplitude;

            amplitude *= cfg.persistence;
            frequency *= cfg.lacunarity;
        }

        // Zero octaves (or zero total weight) reads as flat noise
        let mean = if amplitude_sum == 0.0 {
            0.0
        } else {
            weighted_sum / amplitude_sum
        };

        let normalized = (mean + 1.0) * 0.5;
        normalized.clamp(0.0, 1.0).powf(SHARPEN_EXPONENT)
    }

    /// Height scaled by `height_multiplier`
    pub fn elevation(&self, world_x: f64, world_y: f64) -> f64 {
        self.height(world_x, world_y) * self.config.height_multiplier
    }
}
