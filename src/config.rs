//! Engine configuration parsed from environment variables.
//!
//! Every field defaults to the matching constant in [`crate::consts`]. Each
//! can be overridden with a `SKETCHBOARD_*` variable; an override that is not
//! a positive number is rejected rather than silently ignored.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::consts;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} (expected a positive number)")]
    Invalid { key: &'static str, value: String },
}

/// Tunable thresholds for hit testing, snapping, transforms and commits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Slop around element boxes for `hit_test`.
    pub hit_padding: f64,
    /// Gap between the selection box and its handle frame.
    pub selection_padding: f64,
    /// Rotate handle radius.
    pub handle_size: f64,
    /// Half-extent of corner/edge handle hot-zones.
    pub handle_hit_size: f64,
    /// Distance of the rotate handle above the frame.
    pub rotate_handle_offset: f64,
    /// Radius of line start/end/mid handles.
    pub line_handle_radius: f64,
    /// Maximum snap distance for connector endpoints.
    pub snap_radius: f64,
    /// Lower clamp for per-step resize factors.
    pub min_scale_factor: f64,
    /// Shapes must exceed this on both axes to commit.
    pub min_commit_shape_size: f64,
    /// Lines and arrows must exceed this length to commit.
    pub min_commit_connector_length: f64,
    /// Marquees must exceed this on either axis to select.
    pub min_marquee_size: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub zoom_factor: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hit_padding: consts::HIT_TEST_PADDING,
            selection_padding: consts::SELECTION_PADDING,
            handle_size: consts::HANDLE_SIZE,
            handle_hit_size: consts::HANDLE_HIT_SIZE,
            rotate_handle_offset: consts::ROTATE_HANDLE_OFFSET,
            line_handle_radius: consts::LINE_HANDLE_RADIUS,
            snap_radius: consts::SNAP_RADIUS,
            min_scale_factor: consts::MIN_SCALE_FACTOR,
            min_commit_shape_size: consts::MIN_COMMIT_SHAPE_SIZE,
            min_commit_connector_length: consts::MIN_COMMIT_CONNECTOR_LENGTH,
            min_marquee_size: consts::MIN_MARQUEE_SIZE,
            min_zoom: consts::MIN_SCALE,
            max_zoom: consts::MAX_SCALE,
            zoom_factor: consts::ZOOM_FACTOR,
        }
    }
}

impl EngineConfig {
    /// Build config from the process environment.
    ///
    /// Recognized variables: `SKETCHBOARD_HIT_PADDING`, `SKETCHBOARD_SELECTION_PADDING`,
    /// `SKETCHBOARD_HANDLE_SIZE`, `SKETCHBOARD_HANDLE_HIT_SIZE`,
    /// `SKETCHBOARD_ROTATE_HANDLE_OFFSET`, `SKETCHBOARD_LINE_HANDLE_RADIUS`,
    /// `SKETCHBOARD_SNAP_RADIUS`, `SKETCHBOARD_MIN_SCALE_FACTOR`,
    /// `SKETCHBOARD_MIN_SHAPE_SIZE`, `SKETCHBOARD_MIN_CONNECTOR_LENGTH`,
    /// `SKETCHBOARD_MIN_MARQUEE_SIZE`, `SKETCHBOARD_MIN_ZOOM`, `SKETCHBOARD_MAX_ZOOM`,
    /// `SKETCHBOARD_ZOOM_FACTOR`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if a variable is set but is not a positive number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var_os(key).map(|v| v.to_string_lossy().into_owned()))
    }

    /// Build config from an arbitrary key lookup (the environment, a map, ...).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if a value is present but is not a positive
    /// number, or if the zoom bounds are inverted.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let d = Self::default();
        let get = |key: &'static str, default: f64| parse_positive(key, lookup(key), default);

        let config = Self {
            hit_padding: get("SKETCHBOARD_HIT_PADDING", d.hit_padding)?,
            selection_padding: get("SKETCHBOARD_SELECTION_PADDING", d.selection_padding)?,
            handle_size: get("SKETCHBOARD_HANDLE_SIZE", d.handle_size)?,
            handle_hit_size: get("SKETCHBOARD_HANDLE_HIT_SIZE", d.handle_hit_size)?,
            rotate_handle_offset: get("SKETCHBOARD_ROTATE_HANDLE_OFFSET", d.rotate_handle_offset)?,
            line_handle_radius: get("SKETCHBOARD_LINE_HANDLE_RADIUS", d.line_handle_radius)?,
            snap_radius: get("SKETCHBOARD_SNAP_RADIUS", d.snap_radius)?,
            min_scale_factor: get("SKETCHBOARD_MIN_SCALE_FACTOR", d.min_scale_factor)?,
            min_commit_shape_size: get("SKETCHBOARD_MIN_SHAPE_SIZE", d.min_commit_shape_size)?,
            min_commit_connector_length: get("SKETCHBOARD_MIN_CONNECTOR_LENGTH", d.min_commit_connector_length)?,
            min_marquee_size: get("SKETCHBOARD_MIN_MARQUEE_SIZE", d.min_marquee_size)?,
            min_zoom: get("SKETCHBOARD_MIN_ZOOM", d.min_zoom)?,
            max_zoom: get("SKETCHBOARD_MAX_ZOOM", d.max_zoom)?,
            zoom_factor: get("SKETCHBOARD_ZOOM_FACTOR", d.zoom_factor)?,
        };
        if config.min_zoom > config.max_zoom {
            return Err(ConfigError::Invalid { key: "SKETCHBOARD_MIN_ZOOM", value: config.min_zoom.to_string() });
        }
        tracing::debug!(snap_radius = config.snap_radius, hit_padding = config.hit_padding, "engine config loaded");
        Ok(config)
    }
}

fn parse_positive(key: &'static str, raw: Option<String>, default: f64) -> Result<f64, ConfigError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => {
            tracing::warn!(key, value = %raw, "rejected config override");
            Err(ConfigError::Invalid { key, value: raw })
        }
    }
}
