use std::{path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{CarouselError, Result};

/// Longest autoplay interval a browser timer can represent.
pub const MAX_INTERVAL_MS: u64 = u32::MAX as u64;

/// Top-level configuration structure for the carousel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    pub autoplay: AutoplayConfig,
    pub swipe: SwipeConfig,
    pub keyboard: KeyboardScope,
}

impl CarouselConfig {
    /// Parses a JSON document and validates it.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON config file. Missing fields fall back to their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.autoplay.interval_ms == 0 {
            return Err(CarouselError::invalid(
                "autoplay.interval_ms",
                "must be greater than zero",
            ));
        }
        if self.autoplay.interval_ms > MAX_INTERVAL_MS {
            return Err(CarouselError::invalid(
                "autoplay.interval_ms",
                format!("must not exceed {MAX_INTERVAL_MS}, got {}", self.autoplay.interval_ms),
            ));
        }
        if !self.swipe.min_threshold_px.is_finite() || self.swipe.min_threshold_px < 0.0 {
            return Err(CarouselError::invalid(
                "swipe.min_threshold_px",
                format!("expected a non-negative number, got {}", self.swipe.min_threshold_px),
            ));
        }
        if !(0.0..=1.0).contains(&self.swipe.viewport_fraction) {
            return Err(CarouselError::invalid(
                "swipe.viewport_fraction",
                format!("expected a value in [0, 1], got {}", self.swipe.viewport_fraction),
            ));
        }
        Ok(())
    }
}

/// Automatic advancement settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoplayConfig {
    pub enabled: bool,
    pub interval_ms: u64,
}

impl AutoplayConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_ms: 5_000,
        }
    }
}

/// Distance a drag has to cover before it commits to a slide change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwipeConfig {
    pub min_threshold_px: f64,
    /// Fraction of the viewport width; the larger of the two wins.
    pub viewport_fraction: f64,
}

impl SwipeConfig {
    pub fn threshold(&self, viewport_width: f64) -> f64 {
        self.min_threshold_px
            .max(viewport_width.max(0.0) * self.viewport_fraction)
    }
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            min_threshold_px: 30.0,
            viewport_fraction: 0.12,
        }
    }
}

/// Where arrow keys are listened for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyboardScope {
    /// Arrow keys anywhere on the page drive the carousel.
    #[default]
    Page,
    /// Arrow keys only count while focus is inside the carousel viewport.
    Carousel,
}
