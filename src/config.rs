//! Run configuration
//!
//! Values come from built-in defaults, then an optional TOML file, then
//! command line flags, later sources overriding earlier ones.
//!
//! ```toml
//! [run]
//! month = 1
//! anchor = 2026-01-05
//! dpi = 150
//!
//! [band]
//! x0 = 108
//! y0 = 145
//! x1 = 1685
//! y1 = 1170
//! ```

use std::fs;
use std::path::Path;

use chrono::{Datelike, Local, NaiveDate};
use log::debug;

use crate::errors::{SplitError, SplitResult};
use crate::geometry::Rect;

/// Week band of an A4 landscape calendar page rendered at 150 DPI
pub const DEFAULT_BAND: Rect = Rect { x0: 108.0, y0: 145.0, x1: 1685.0, y1: 1170.0 };
/// Resolution the default band was measured at
pub const DEFAULT_DPI: u32 = 150;
pub const MIN_DPI: u32 = 72;
pub const MAX_DPI: u32 = 300;

const ANCHOR_FORMAT: &str = "%Y-%m-%d";

/// Parameters of one split run
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Month to extract (1-12)
    pub target_month: u32,
    /// Date of the first column (Monday) on the first page
    pub anchor: NaiveDate,
    /// Week band at `dpi`
    pub band: Rect,
    /// Rendering resolution; the band is only valid at this DPI
    pub dpi: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            target_month: Local::now().month(),
            anchor: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap_or_default(),
            band: DEFAULT_BAND,
            dpi: DEFAULT_DPI,
        }
    }
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub target_month: Option<u32>,
    pub anchor: Option<String>,
    pub band: Option<String>,
    pub dpi: Option<u32>,
}

impl RunConfig {
    /// Parse a configuration from a TOML string on top of the defaults
    pub fn from_toml_str(content: &str) -> SplitResult<Self> {
        let toml_value: toml::Value = match content.parse() {
            Ok(value) => value,
            Err(e) => return Err(SplitError::InvalidConfig(format!("Failed to parse TOML: {}", e))),
        };

        let mut config = RunConfig::default();

        if let Some(run) = toml_value.get("run").and_then(|v| v.as_table()) {
            if let Some(month) = run.get("month") {
                config.target_month = Self::read_u32(month, "run.month")?;
            }
            if let Some(anchor) = run.get("anchor") {
                config.anchor = match (anchor.as_str(), anchor.as_datetime()) {
                    (Some(s), _) => parse_anchor(s)?,
                    (None, Some(datetime)) => parse_anchor(&datetime.to_string())?,
                    _ => return Err(SplitError::InvalidConfig("run.anchor must be a date".to_string())),
                };
            }
            if let Some(dpi) = run.get("dpi") {
                config.dpi = Self::read_u32(dpi, "run.dpi")?;
            }
        }

        if let Some(band) = toml_value.get("band").and_then(|v| v.as_table()) {
            let read = |key: &str, target: &mut f64| -> SplitResult<()> {
                if let Some(value) = band.get(key) {
                    *target = value
                        .as_float()
                        .or_else(|| value.as_integer().map(|i| i as f64))
                        .ok_or_else(|| SplitError::InvalidConfig(format!("band.{} must be a number", key)))?;
                }
                Ok(())
            };
            read("x0", &mut config.band.x0)?;
            read("y0", &mut config.band.y0)?;
            read("x1", &mut config.band.x1)?;
            read("y1", &mut config.band.y1)?;
        }

        debug!("Configuration from TOML: {:?}", config);
        Ok(config)
    }

    /// Load a configuration file
    pub fn from_file(path: &Path) -> SplitResult<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    fn read_u32(value: &toml::Value, name: &str) -> SplitResult<u32> {
        value
            .as_integer()
            .and_then(|i| u32::try_from(i).ok())
            .ok_or_else(|| SplitError::InvalidConfig(format!("{} must be a non-negative integer", name)))
    }

    /// Apply command line values on top of this configuration
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) -> SplitResult<()> {
        if let Some(month) = overrides.target_month {
            self.target_month = month;
        }
        if let Some(anchor) = &overrides.anchor {
            self.anchor = parse_anchor(anchor)?;
        }
        if let Some(band) = &overrides.band {
            self.band = Rect::from_string(band)?;
        }
        if let Some(dpi) = overrides.dpi {
            self.dpi = dpi;
        }
        Ok(())
    }

    /// Check ranges and band geometry
    pub fn validate(&self) -> SplitResult<()> {
        if !(1..=12).contains(&self.target_month) {
            return Err(SplitError::InvalidConfig(format!(
                "target month {} is not between 1 and 12",
                self.target_month
            )));
        }
        if !(MIN_DPI..=MAX_DPI).contains(&self.dpi) {
            return Err(SplitError::InvalidConfig(format!(
                "DPI {} is not between {} and {}",
                self.dpi, MIN_DPI, MAX_DPI
            )));
        }
        self.band.validate()
    }
}

/// Parse an anchor date written as YYYY-MM-DD
pub fn parse_anchor(value: &str) -> SplitResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), ANCHOR_FORMAT)
        .map_err(|e| SplitError::InvalidConfig(format!("Invalid anchor date '{}': {}", value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = RunConfig::default();
        assert_eq!(config.band, DEFAULT_BAND);
        assert_eq!(config.dpi, 150);
        assert_eq!(config.anchor, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml() {
        let config = RunConfig::from_toml_str(
            r#"
            [run]
            month = 2
            anchor = 2026-01-05
            dpi = 200

            [band]
            x0 = 100
            y0 = 140.5
            x1 = 1680
            y1 = 1160
            "#,
        )
        .unwrap();

        assert_eq!(config.target_month, 2);
        assert_eq!(config.anchor, NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());
        assert_eq!(config.dpi, 200);
        assert_eq!(config.band, Rect::new(100.0, 140.5, 1680.0, 1160.0));
    }

    #[test]
    fn test_from_toml_partial_keeps_defaults() {
        let config = RunConfig::from_toml_str("[run]\nanchor = \"2025-12-29\"\n").unwrap();
        assert_eq!(config.anchor, NaiveDate::from_ymd_opt(2025, 12, 29).unwrap());
        assert_eq!(config.band, DEFAULT_BAND);
        assert_eq!(config.dpi, DEFAULT_DPI);
    }

    #[test]
    fn test_from_toml_rejects_bad_values() {
        assert!(RunConfig::from_toml_str("[run]\nmonth = -1\n").is_err());
        assert!(RunConfig::from_toml_str("[band]\nx0 = \"left\"\n").is_err());
        assert!(RunConfig::from_toml_str("[run]\nanchor = \"05/01/2026\"\n").is_err());
        assert!(RunConfig::from_toml_str("not toml at all [").is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[run]\nmonth = 11").unwrap();
        let config = RunConfig::from_file(file.path()).unwrap();
        assert_eq!(config.target_month, 11);
    }

    #[test]
    fn test_overrides_win() {
        let mut config = RunConfig::from_toml_str("[run]\nmonth = 3\ndpi = 100\n").unwrap();
        config
            .apply_overrides(&ConfigOverrides {
                target_month: Some(4),
                anchor: Some("2026-03-30".to_string()),
                band: Some("0,0,700,300".to_string()),
                dpi: None,
            })
            .unwrap();

        assert_eq!(config.target_month, 4);
        assert_eq!(config.anchor, NaiveDate::from_ymd_opt(2026, 3, 30).unwrap());
        assert_eq!(config.band, Rect::new(0.0, 0.0, 700.0, 300.0));
        assert_eq!(config.dpi, 100);
    }

    #[test]
    fn test_validate_ranges() {
        let mut config = RunConfig::default();
        config.target_month = 13;
        assert!(matches!(config.validate(), Err(SplitError::InvalidConfig(_))));

        config.target_month = 1;
        config.dpi = 301;
        assert!(matches!(config.validate(), Err(SplitError::InvalidConfig(_))));

        config.dpi = 72;
        config.band = Rect::new(10.0, 10.0, 10.0, 20.0);
        assert!(matches!(config.validate(), Err(SplitError::InvalidGeometry(_))));
    }
}
