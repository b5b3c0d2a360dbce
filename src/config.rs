//! Terrain configuration with layered loading
//!
//! Configuration is loaded from multiple sources (lowest to highest priority):
//! 1. Compiled defaults
//! 2. `terrain.ron` file (if exists)
//! 3. Environment variables prefixed with `TERRASTREAM_`
//!
//! Example environment variable: `TERRASTREAM_NOISE__SEED=42`

use std::path::Path;

use anyhow::{Context, Result};
use config::{builder::DefaultState, Config, ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::world::{NoiseConfig, StreamingSettings};

/// Everything needed to start streaming a world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TerrainConfig {
    #[serde(default)]
    pub noise: NoiseConfig,

    #[serde(default)]
    pub streaming: StreamingSettings,
}

impl TerrainConfig {
    /// Load configuration with layered priority:
    /// 1. Compiled defaults (lowest priority)
    /// 2. `terrain.ron` file (if exists)
    /// 3. Environment variables prefixed with `TERRASTREAM_` (highest priority)
    pub fn load() -> Result<Self> {
        let builder = Self::defaults()?
            .add_source(
                File::with_name("terrain")
                    .format(FileFormat::Ron)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix("TERRASTREAM")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        Self::finish(builder)
    }

    /// Load defaults overridden by an explicit RON file
    pub fn load_from(path: &Path) -> Result<Self> {
        let builder = Self::defaults()?.add_source(File::from(path).format(FileFormat::Ron));
        Self::finish(builder)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        let noise = NoiseConfig::default();
        let streaming = StreamingSettings::default();

        Ok(Config::builder()
            .set_default("noise.seed", noise.seed as i64)?
            .set_default("noise.noise_scale", noise.noise_scale)?
            .set_default("noise.height_multiplier", noise.height_multiplier)?
            .set_default("noise.octaves", noise.octaves as i64)?
            .set_default("noise.persistence", noise.persistence)?
            .set_default("noise.lacunarity", noise.lacunarity)?
            .set_default("noise.base_frequency", noise.base_frequency)?
            .set_default("noise.water_level", noise.water_level)?
            .set_default("streaming.chunk_size", streaming.chunk_size as i64)?
            .set_default("streaming.view_distance", streaming.view_distance as i64)?
            .set_default("streaming.block_size", streaming.block_size as f64)?)
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let config: Self = builder
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.validate().context("Invalid terrain configuration")?;
        Ok(config)
    }

    /// Check both sections
    pub fn validate(&self) -> crate::error::Result<()> {
        self.noise.validate()?;
        self.streaming.validate()
    }

    /// Serialize as a RON preset that `load_from` accepts
    pub fn to_ron(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .context("Failed to serialize configuration")
    }
}
