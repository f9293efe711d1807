//! Core configuration for galleria-core.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{GalleryError, Result};

/// Configuration for transition timing, queue sizing and gesture thresholds.
///
/// `transition_ms` is the single source of truth for the crossfade duration:
/// the controller hands it to the presentation layer at start and waits it
/// out before retiring an outgoing visual.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Crossfade duration in milliseconds.
    pub transition_ms: u32,
    /// Maximum deferred navigation intents held while a transition runs.
    pub queue_capacity: usize,
    /// Maximum events retained before the oldest are discarded.
    pub max_events: usize,
    pub gestures: GestureConfig,
}

/// Thresholds used by the gesture recognizer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    pub swipe: SwipeThreshold,
    /// Minimum horizontal wheel delta that counts as a navigation intent.
    pub wheel_threshold: f32,
    /// Minimum horizontal pointer displacement for a mouse drag.
    pub drag_threshold: f32,
}

/// Horizontal distance a touch swipe must cover.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeThreshold {
    /// Fixed distance in CSS pixels.
    Pixels(f32),
    /// Fraction of the viewport width, in (0, 1].
    ViewportFraction(f32),
}

impl SwipeThreshold {
    /// Resolve the threshold in pixels for the given viewport width.
    #[inline]
    pub fn resolve(&self, viewport_width: f32) -> f32 {
        match *self {
            SwipeThreshold::Pixels(px) => px,
            SwipeThreshold::ViewportFraction(f) => f * viewport_width,
        }
    }
}

impl Default for SwipeThreshold {
    fn default() -> Self {
        SwipeThreshold::Pixels(60.0)
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            swipe: SwipeThreshold::default(),
            wheel_threshold: 40.0,
            drag_threshold: 40.0,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            transition_ms: 500,
            queue_capacity: 3,
            max_events: 256,
            gestures: GestureConfig::default(),
        }
    }
}

fn check_threshold(name: &str, value: f32) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(GalleryError::InvalidConfig(format!(
            "{name} must be a finite non-negative number, got {value}"
        )));
    }
    Ok(())
}

impl Config {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(s: &str) -> Result<Self> {
        let cfg: Config =
            serde_json::from_str(s).map_err(|e| GalleryError::InvalidConfig(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.transition_ms == 0 {
            return Err(GalleryError::InvalidConfig(
                "transition_ms must be greater than zero".into(),
            ));
        }
        if self.max_events == 0 {
            return Err(GalleryError::InvalidConfig(
                "max_events must be greater than zero".into(),
            ));
        }
        check_threshold("wheel_threshold", self.gestures.wheel_threshold)?;
        check_threshold("drag_threshold", self.gestures.drag_threshold)?;
        match self.gestures.swipe {
            SwipeThreshold::Pixels(px) => check_threshold("swipe pixels", px)?,
            SwipeThreshold::ViewportFraction(f) => {
                if !(f > 0.0 && f <= 1.0) {
                    return Err(GalleryError::InvalidConfig(format!(
                        "swipe viewport fraction must be in (0, 1], got {f}"
                    )));
                }
            }
        }
        Ok(())
    }

    #[inline]
    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(u64::from(self.transition_ms))
    }

    /// Duration formatted as a CSS time value, e.g. `500ms`.
    pub fn css_duration(&self) -> String {
        format!("{}ms", self.transition_ms)
    }
}
