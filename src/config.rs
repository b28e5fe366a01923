//! Configuration for the mystbin mapping layer
//!
//! Sources are layered defaults, then an optional config file, then
//! `MYSTBIN_*` environment variables. Most callers never need a config:
//! `MapperConfig::default()` reproduces the server's literal conventions.

use chrono::FixedOffset;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{MystbinError, Result};

const MINUTES_PER_DAY: i32 = 24 * 60;

/// Where a file's syntax hint comes from when mapping a response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyntaxSource {
    /// Text after the last `.` of the filename
    #[default]
    Extension,
    /// The file's `annotation` when non-empty, otherwise the extension
    Annotation,
}

/// Mapping configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MapperConfig {
    #[serde(default)]
    pub syntax_source: SyntaxSource,
    /// UTC offset, in minutes, for timestamps sent without one
    #[serde(default)]
    pub naive_offset_minutes: i32,
}

/// Builder for MapperConfig
#[derive(Debug, Default)]
pub struct MapperConfigBuilder {
    syntax_source: Option<SyntaxSource>,
    naive_offset_minutes: Option<i32>,
    config_file: Option<PathBuf>,
}

impl MapperConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn syntax_source(mut self, syntax_source: SyntaxSource) -> Self {
        self.syntax_source = Some(syntax_source);
        self
    }

    pub fn naive_offset_minutes(mut self, minutes: i32) -> Self {
        self.naive_offset_minutes = Some(minutes);
        self
    }

    pub fn config_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_file = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn build(self) -> Result<MapperConfig> {
        let mut config = MapperConfig::from_file_and_env(self.config_file.as_deref())?;

        if let Some(syntax_source) = self.syntax_source {
            config.syntax_source = syntax_source;
        }
        if let Some(minutes) = self.naive_offset_minutes {
            config.naive_offset_minutes = minutes;
        }

        config.validate()?;
        Ok(config)
    }
}

impl MapperConfig {
    pub fn builder() -> MapperConfigBuilder {
        MapperConfigBuilder::new()
    }

    /// Load from the default config path and the environment
    pub fn load() -> Result<Self> {
        let config = Self::from_file_and_env(Some(default_config_path()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file_and_env<P: AsRef<Path>>(config_file: Option<P>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("syntax_source", "extension")?
            .set_default("naive_offset_minutes", 0)?;

        if let Some(config_path) = config_file {
            let config_path = config_path.as_ref();
            if config_path.exists() {
                debug!(path = %config_path.display(), "loading mapper config file");
                builder = builder.add_source(File::from(config_path));
            }
        }
        builder = builder.add_source(Environment::with_prefix("MYSTBIN").try_parsing(true));

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    pub fn validate(&self) -> Result<()> {
        if !(-(MINUTES_PER_DAY - 1)..MINUTES_PER_DAY).contains(&self.naive_offset_minutes) {
            return Err(MystbinError::invalid_config_value(format!(
                "naive_offset_minutes must be within ±{} minutes, got {}",
                MINUTES_PER_DAY - 1,
                self.naive_offset_minutes
            )));
        }
        Ok(())
    }

    /// Offset applied to timestamps that carry none
    pub fn naive_offset(&self) -> Result<FixedOffset> {
        self.naive_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                MystbinError::invalid_config_value(format!(
                    "naive_offset_minutes out of range: {}",
                    self.naive_offset_minutes
                ))
            })
    }
}

fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mystbin")
}

pub fn default_config_path() -> PathBuf {
    default_config_dir().join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::tests::utils::{lock_env, write_temp_file, ScopedEnvVar};

    #[test]
    fn test_default_config() {
        let config = MapperConfig::default();
        assert_eq!(config.syntax_source, SyntaxSource::Extension);
        assert_eq!(config.naive_offset_minutes, 0);
        assert_eq!(config.naive_offset().unwrap(), FixedOffset::east_opt(0).unwrap());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_overrides() {
        let _env = lock_env();
        let config = MapperConfig::builder()
            .syntax_source(SyntaxSource::Annotation)
            .naive_offset_minutes(-300)
            .build()
            .unwrap();

        assert_eq!(config.syntax_source, SyntaxSource::Annotation);
        assert_eq!(config.naive_offset().unwrap(), FixedOffset::west_opt(5 * 3600).unwrap());
    }

    #[test]
    fn test_builder_rejects_offset_out_of_range() {
        let _env = lock_env();
        let err = MapperConfig::builder()
            .naive_offset_minutes(MINUTES_PER_DAY)
            .build()
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::InvalidConfigValue);
        assert!(err.is_config_error());
    }

    #[test]
    fn test_load_from_toml_file() {
        let _env = lock_env();
        let (_dir, path) = write_temp_file(
            "mapper.toml",
            "syntax_source = \"annotation\"\nnaive_offset_minutes = 60\n",
        );

        let config = MapperConfig::builder().config_file(&path).build().unwrap();
        assert_eq!(config.syntax_source, SyntaxSource::Annotation);
        assert_eq!(config.naive_offset_minutes, 60);
    }

    #[test]
    fn test_builder_wins_over_file() {
        let _env = lock_env();
        let (_dir, path) = write_temp_file("mapper.toml", "naive_offset_minutes = 60\n");

        let config = MapperConfig::builder()
            .config_file(&path)
            .naive_offset_minutes(0)
            .build()
            .unwrap();
        assert_eq!(config.naive_offset_minutes, 0);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let _env = lock_env();
        let dir = tempfile::tempdir().unwrap();
        let config = MapperConfig::from_file_and_env(Some(dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.naive_offset_minutes, 0);
    }

    #[test]
    fn test_invalid_syntax_source_in_file() {
        let _env = lock_env();
        let (_dir, path) = write_temp_file("mapper.toml", "syntax_source = \"guess\"\n");

        let err = MapperConfig::from_file_and_env(Some(&path)).unwrap_err();
        assert_eq!(err.code(), ErrorCode::ConfigError);
    }

    #[test]
    fn test_validate_rejects_i32_extremes() {
        for minutes in [i32::MIN, i32::MAX, -MINUTES_PER_DAY] {
            let config = MapperConfig {
                naive_offset_minutes: minutes,
                ..MapperConfig::default()
            };
            let err = config.validate().unwrap_err();
            assert_eq!(err.code(), ErrorCode::InvalidConfigValue, "{minutes}");
        }

        let edge = MapperConfig {
            naive_offset_minutes: -(MINUTES_PER_DAY - 1),
            ..MapperConfig::default()
        };
        assert!(edge.validate().is_ok());
    }

    #[test]
    fn test_env_overrides_file_and_builder_wins() {
        let _env = lock_env();
        let _offset = ScopedEnvVar::set("MYSTBIN_NAIVE_OFFSET_MINUTES", "30");
        let _syntax = ScopedEnvVar::set("MYSTBIN_SYNTAX_SOURCE", "annotation");
        let (_dir, path) = write_temp_file(
            "mapper.toml",
            "syntax_source = \"extension\"\nnaive_offset_minutes = 60\n",
        );

        let from_env = MapperConfig::builder().config_file(&path).build().unwrap();
        assert_eq!(from_env.naive_offset_minutes, 30);
        assert_eq!(from_env.syntax_source, SyntaxSource::Annotation);

        let overridden = MapperConfig::builder()
            .config_file(&path)
            .naive_offset_minutes(-60)
            .syntax_source(SyntaxSource::Extension)
            .build()
            .unwrap();
        assert_eq!(overridden.naive_offset_minutes, -60);
        assert_eq!(overridden.syntax_source, SyntaxSource::Extension);
    }

    #[test]
    fn test_load_reads_env() {
        let _env = lock_env();
        let _offset = ScopedEnvVar::set("MYSTBIN_NAIVE_OFFSET_MINUTES", "-90");

        let config = MapperConfig::load().unwrap();
        assert_eq!(config.naive_offset_minutes, -90);
    }

    #[test]
    fn test_load_rejects_i32_min_from_env() {
        let _env = lock_env();
        let _offset = ScopedEnvVar::set("MYSTBIN_NAIVE_OFFSET_MINUTES", "-2147483648");

        let err = MapperConfig::load().unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidConfigValue);
    }

    #[test]
    fn test_default_config_path() {
        let path = default_config_path();
        assert!(path.ends_with("mystbin/config.toml"));
        assert_eq!(path.parent(), Some(default_config_dir().as_path()));
    }
}
