//! User configuration loaded from TOML.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculator::RoundingMode;

/// Largest number of decimal places that still means something for an `f64`.
pub const MAX_PRECISION: u32 = 15;

/// Smallest bounded queue; zero would turn it into a rendezvous channel.
pub const MIN_QUEUE_CAPACITY: usize = 1;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Decimal places shown in the answer.
    pub precision: u32,
    pub rounding: RoundingMode,
    /// A `tracing` filter directive such as `"inkcalc=debug"`.
    pub log_filter: Option<String>,
    /// Bound on queued display updates. Unbounded when unset. Submissions to
    /// a full queue are rejected rather than waited on.
    pub queue_capacity: Option<usize>,
}

/// A value from the config file that was replaced by the nearest usable one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigAdjustment {
    PrecisionClamped { requested: u32 },
    QueueCapacityRaised { requested: usize },
}

impl fmt::Display for ConfigAdjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PrecisionClamped { requested } => write!(
                f,
                "precision {requested} too large, clamped to {MAX_PRECISION}"
            ),
            Self::QueueCapacityRaised { requested } => write!(
                f,
                "queue_capacity {requested} too small, raised to {MIN_QUEUE_CAPACITY}"
            ),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            precision: 2,
            rounding: RoundingMode::default(),
            log_filter: None,
            queue_capacity: None,
        }
    }
}

impl Config {
    /// `$XDG_CONFIG_HOME/inkcalc/config.toml` (or the platform equivalent).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("inkcalc").join("config.toml"))
    }

    /// Load from `path`, or from [`Config::default_path`] when `None`.
    ///
    /// A missing file at the default location gives the default config; a
    /// missing file that was asked for explicitly is an error. Out-of-range
    /// values are corrected and reported back so the caller can log them once
    /// logging is set up.
    pub fn load(path: Option<&Path>) -> Result<(Self, Vec<ConfigAdjustment>), ConfigError> {
        let (path, explicit) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => match Self::default_path() {
                Some(path) => (path, false),
                None => return Ok((Self::default(), Vec::new())),
            },
        };

        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if !explicit && err.kind() == std::io::ErrorKind::NotFound => {
                return Ok((Self::default(), Vec::new()));
            }
            Err(source) => return Err(ConfigError::Read { path, source }),
        };

        let mut config: Self =
            toml::from_str(&contents).map_err(|source| ConfigError::Parse { path, source })?;
        let adjustments = config.clamp();
        Ok((config, adjustments))
    }

    /// Decimal places actually used, never above [`MAX_PRECISION`].
    pub fn precision(&self) -> u32 {
        self.precision.min(MAX_PRECISION)
    }

    /// Bring out-of-range values into range and list what changed.
    pub fn clamp(&mut self) -> Vec<ConfigAdjustment> {
        let mut adjustments = Vec::new();

        if self.precision > MAX_PRECISION {
            adjustments.push(ConfigAdjustment::PrecisionClamped {
                requested: self.precision,
            });
            self.precision = MAX_PRECISION;
        }

        if let Some(requested) = self.queue_capacity
            && requested < MIN_QUEUE_CAPACITY
        {
            adjustments.push(ConfigAdjustment::QueueCapacityRaised { requested });
            self.queue_capacity = Some(MIN_QUEUE_CAPACITY);
        }

        adjustments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.precision, 2);
        assert_eq!(config.rounding, RoundingMode::HalfAwayFromZero);
        assert!(config.log_filter.is_none());
        assert!(config.queue_capacity.is_none());
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let file = write_config("rounding = \"half_even\"\n");
        let (config, _) = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.rounding, RoundingMode::HalfEven);
        assert_eq!(config.precision, 2);
    }

    #[test]
    fn test_load_full_file() {
        let file = write_config(
            "precision = 4\nrounding = \"half_away_from_zero\"\nlog_filter = \"inkcalc=trace\"\nqueue_capacity = 8\n",
        );
        let (config, _) = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.precision, 4);
        assert_eq!(config.log_filter.as_deref(), Some("inkcalc=trace"));
        assert_eq!(config.queue_capacity, Some(8));
    }

    #[test]
    fn test_precision_clamped() {
        let file = write_config("precision = 40\n");
        let (config, adjustments) = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.precision, MAX_PRECISION);
        assert_eq!(
            adjustments,
            vec![ConfigAdjustment::PrecisionClamped { requested: 40 }]
        );
        assert_eq!(
            adjustments[0].to_string(),
            "precision 40 too large, clamped to 15"
        );

        let unclamped = Config {
            precision: 99,
            ..Config::default()
        };
        assert_eq!(unclamped.precision(), MAX_PRECISION);
    }

    #[test]
    fn test_zero_queue_capacity_raised() {
        let file = write_config("queue_capacity = 0\n");
        let (config, adjustments) = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.queue_capacity, Some(MIN_QUEUE_CAPACITY));
        assert_eq!(
            adjustments,
            vec![ConfigAdjustment::QueueCapacityRaised { requested: 0 }]
        );
    }

    #[test]
    fn test_in_range_file_has_no_adjustments() {
        let file = write_config("precision = 3\nqueue_capacity = 16\n");
        let (_, adjustments) = Config::load(Some(file.path())).unwrap();
        assert!(adjustments.is_empty());
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let file = write_config("precision = \"two\"\n");
        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_missing_explicit_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(dir.path().join("nope.toml").as_path())).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
