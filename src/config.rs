//! Site configuration.
//!
//! Every tunable of the view-state engine is a constant loaded once at
//! startup: compiled-in defaults, then an optional TOML file, then
//! `SITE__*` environment overrides. Nothing here is derived at runtime.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use thiserror::Error;

// =============================================================================
// DEFAULTS
// =============================================================================

/// Navbar switches to its solid style once scrolled past this many pixels.
pub const DEFAULT_SCROLL_THRESHOLD: f64 = 20.0;

/// Hero fades from opaque to transparent over `[0, fade_end]`.
pub const DEFAULT_FADE_END: f64 = 500.0;

/// Hero backdrop translates over `[0, translate_end]`.
pub const DEFAULT_TRANSLATE_END: f64 = 1000.0;

/// Translation reached at `translate_end`, in pixels.
pub const DEFAULT_TRANSLATE_DISTANCE: f64 = 300.0;

/// 2026-10-12T09:00:00+05:30, opening of the conference.
pub const DEFAULT_COUNTDOWN_TARGET_UNIX: i64 = 1_791_775_800;

pub const DEFAULT_TOAST_DURATION_MS: u64 = 3_000;

pub const DEFAULT_TICK_MS: u64 = 1_000;

/// Upper bound for the toast duration and tick period: one day.
pub const MAX_DURATION_MS: u64 = 86_400_000;

/// File picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "site.toml";

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid countdown target '{value}': {source}")]
    InvalidTarget {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
}

// =============================================================================
// TYPES
// =============================================================================

/// Scroll threshold and parallax ranges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollConfig {
    pub threshold: f64,
    pub fade_end: f64,
    pub translate_end: f64,
    pub translate_distance: f64,
}

impl ScrollConfig {
    /// Upper clamp for the scroll offset: the end of the longest range.
    pub fn max_offset(&self) -> f64 {
        self.fade_end.max(self.translate_end)
    }
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SCROLL_THRESHOLD,
            fade_end: DEFAULT_FADE_END,
            translate_end: DEFAULT_TRANSLATE_END,
            translate_distance: DEFAULT_TRANSLATE_DISTANCE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
    pub scroll: ScrollConfig,
    pub countdown_target: DateTime<Utc>,
    pub toast_duration_ms: u64,
    pub tick_ms: u64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            scroll: ScrollConfig::default(),
            countdown_target: DateTime::<Utc>::from_timestamp(DEFAULT_COUNTDOWN_TARGET_UNIX, 0)
                .unwrap_or_default(),
            toast_duration_ms: DEFAULT_TOAST_DURATION_MS,
            tick_ms: DEFAULT_TICK_MS,
        }
    }
}

/// On-disk shape. Every key is optional and overlays the defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    scroll_threshold: Option<f64>,
    fade_end: Option<f64>,
    translate_end: Option<f64>,
    translate_distance: Option<f64>,
    countdown_target: Option<String>,
    toast_duration_ms: Option<u64>,
    tick_ms: Option<u64>,
}

impl SiteConfig {
    pub fn toast_duration(&self) -> Duration {
        millis(self.toast_duration_ms)
    }

    pub fn tick(&self) -> Duration {
        millis(self.tick_ms)
    }

    /// Load defaults, then `path` (or `site.toml` if present), then the
    /// process environment.
    ///
    /// An explicit `path` must exist; the implicit `site.toml` is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        match path {
            Some(path) => config.apply_file(path)?,
            None => {
                let implicit = Path::new(DEFAULT_CONFIG_FILE);
                if implicit.exists() {
                    config.apply_file(implicit)?;
                }
            }
        }

        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;

        tracing::debug!(?config, "site config loaded");
        Ok(config)
    }

    /// Parse a TOML document over the defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_toml(raw, Path::new("<inline>"))?;
        config.validate()?;
        Ok(config)
    }

    fn apply_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.apply_toml(&raw, path)
    }

    fn apply_toml(&mut self, raw: &str, path: &Path) -> Result<(), ConfigError> {
        let file: FileConfig = toml::from_str(raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(v) = file.scroll_threshold {
            self.scroll.threshold = v;
        }
        if let Some(v) = file.fade_end {
            self.scroll.fade_end = v;
        }
        if let Some(v) = file.translate_end {
            self.scroll.translate_end = v;
        }
        if let Some(v) = file.translate_distance {
            self.scroll.translate_distance = v;
        }
        if let Some(v) = file.countdown_target {
            self.countdown_target = parse_target(&v)?;
        }
        if let Some(v) = file.toast_duration_ms {
            self.toast_duration_ms = v;
        }
        if let Some(v) = file.tick_ms {
            self.tick_ms = v;
        }
        Ok(())
    }

    /// Overlay `SITE__<KEY>` variables from `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("SITE__SCROLL_THRESHOLD") {
            self.scroll.threshold = parse_number("scroll_threshold", &v)?;
        }
        if let Some(v) = lookup("SITE__FADE_END") {
            self.scroll.fade_end = parse_number("fade_end", &v)?;
        }
        if let Some(v) = lookup("SITE__TRANSLATE_END") {
            self.scroll.translate_end = parse_number("translate_end", &v)?;
        }
        if let Some(v) = lookup("SITE__TRANSLATE_DISTANCE") {
            self.scroll.translate_distance = parse_number("translate_distance", &v)?;
        }
        if let Some(v) = lookup("SITE__COUNTDOWN_TARGET") {
            self.countdown_target = parse_target(&v)?;
        }
        if let Some(v) = lookup("SITE__TOAST_DURATION_MS") {
            self.toast_duration_ms = parse_number("toast_duration_ms", &v)?;
        }
        if let Some(v) = lookup("SITE__TICK_MS") {
            self.tick_ms = parse_number("tick_ms", &v)?;
        }
        Ok(())
    }

    /// Reject values the producers cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.scroll;
        check("scroll_threshold", s.threshold, s.threshold.is_finite() && s.threshold >= 0.0)?;
        check("fade_end", s.fade_end, s.fade_end.is_finite() && s.fade_end > 0.0)?;
        check(
            "translate_end",
            s.translate_end,
            s.translate_end.is_finite() && s.translate_end > 0.0,
        )?;
        check(
            "translate_distance",
            s.translate_distance,
            s.translate_distance.is_finite(),
        )?;
        check(
            "toast_duration_ms",
            self.toast_duration_ms,
            (1..=MAX_DURATION_MS).contains(&self.toast_duration_ms),
        )?;
        check("tick_ms", self.tick_ms, (1..=MAX_DURATION_MS).contains(&self.tick_ms))?;
        Ok(())
    }
}

/// Milliseconds to a `Duration`, saturating instead of wrapping.
fn millis(ms: u64) -> Duration {
    i64::try_from(ms)
        .ok()
        .and_then(Duration::try_milliseconds)
        .unwrap_or(Duration::MAX)
}

fn check<T: ToString>(key: &'static str, value: T, ok: bool) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
        })
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
    })
}

/// Parse an RFC 3339 timestamp with any offset into UTC.
pub fn parse_target(raw: &str) -> Result<DateTime<Utc>, ConfigError> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|source| ConfigError::InvalidTarget {
            value: raw.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_target_is_conference_opening() {
        let expected = parse_target("2026-10-12T09:00:00+05:30").unwrap();
        assert_eq!(SiteConfig::default().countdown_target, expected);
    }

    #[test]
    fn test_defaults_validate() {
        let config = SiteConfig::default();
        config.validate().unwrap();
        assert_eq!(config.scroll.max_offset(), 1000.0);
        assert_eq!(config.toast_duration(), Duration::milliseconds(3000));
        assert_eq!(config.tick(), Duration::milliseconds(1000));
    }

    #[test]
    fn test_toml_overlays_defaults() {
        let config = SiteConfig::from_toml_str(
            r#"
            scroll_threshold = 40
            countdown_target = "2026-06-01T00:00:00Z"
            toast_duration_ms = 1500
            "#,
        )
        .unwrap();

        assert_eq!(config.scroll.threshold, 40.0);
        assert_eq!(config.scroll.fade_end, DEFAULT_FADE_END);
        assert_eq!(config.countdown_target, parse_target("2026-06-01T00:00:00Z").unwrap());
        assert_eq!(config.toast_duration_ms, 1500);
        assert_eq!(config.tick_ms, DEFAULT_TICK_MS);
    }

    #[test]
    fn test_toml_rejects_unknown_keys() {
        let err = SiteConfig::from_toml_str("scrol_threshold = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_invalid_target_is_reported() {
        let err = SiteConfig::from_toml_str(r#"countdown_target = "next tuesday""#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTarget { .. }));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("SITE__SCROLL_THRESHOLD", "64"),
            ("SITE__TICK_MS", "250"),
        ]
        .into_iter()
        .collect();

        let mut config = SiteConfig::default();
        config
            .apply_env(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.scroll.threshold, 64.0);
        assert_eq!(config.tick_ms, 250);
    }

    #[test]
    fn test_env_rejects_garbage() {
        let mut config = SiteConfig::default();
        let err = config
            .apply_env(|key| (key == "SITE__TOAST_DURATION_MS").then(|| "soon".to_string()))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: "toast_duration_ms",
                ..
            }
        ));
    }

    #[test]
    fn test_validate_rejects_zero_durations() {
        let mut config = SiteConfig::default();
        config.tick_ms = 0;
        assert!(config.validate().is_err());

        let mut config = SiteConfig::default();
        config.scroll.fade_end = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_huge_durations() {
        let err = SiteConfig::from_toml_str("toast_duration_ms = 100000000000000000").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: "toast_duration_ms",
                ..
            }
        ));

        let mut config = SiteConfig::default();
        config.tick_ms = MAX_DURATION_MS + 1;
        assert!(config.validate().is_err());
        config.tick_ms = MAX_DURATION_MS;
        config.validate().unwrap();
    }

    #[test]
    fn test_env_duration_above_i64_is_rejected() {
        let mut config = SiteConfig::default();
        config
            .apply_env(|key| (key == "SITE__TOAST_DURATION_MS").then(|| u64::MAX.to_string()))
            .unwrap();
        assert!(config.validate().is_err());

        // Conversion saturates rather than wrapping negative
        assert_eq!(config.toast_duration(), Duration::MAX);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let err = SiteConfig::load(Some(Path::new("/nonexistent/site.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
