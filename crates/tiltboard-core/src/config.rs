//! Board layout configuration.
//!
//! A `BoardConfig` describes everything static about a round: where the pins
//! sit, how far they may travel, where the hazards are, and the loss
//! threshold. Configs are plain serde data so hosts can ship custom layouts
//! as JSON; `default_classic` is the built-in reference board.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while loading or validating a board config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse board config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("pin y range is inverted: [{0}, {1}]")]
    InvertedPinRange(f32, f32),
    #[error("pin start height {start} outside the allowed range [{min}, {max}]")]
    PinStartOutOfRange { start: f32, min: f32, max: f32 },
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },
    #[error("loss fraction must be in (0, 1], got {0}")]
    LossFractionOutOfRange(f32),
    #[error("board has no hazards")]
    NoHazards,
}

/// Static description of a board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Fixed x positions of the left and right pin.
    #[serde(default = "default_pin_x")]
    pub pin_x: [f32; 2],
    /// Starting height of both pins.
    #[serde(default = "default_pin_start_y")]
    pub pin_start_y: f32,
    /// Vertical band the pins may travel in.
    #[serde(default = "default_pin_y_range")]
    pub pin_y_range: [f32; 2],
    /// Pin travel per tick while a movement key is held.
    #[serde(default = "default_pin_step")]
    pub pin_step: f32,
    /// Maximum platform tilt, degrees from horizontal.
    #[serde(default = "default_max_tilt_deg")]
    pub max_tilt_deg: f32,
    /// Ball radius.
    #[serde(default = "default_ball_radius")]
    pub ball_radius: f32,
    /// x position the ball spawns at (centered between the pins).
    #[serde(default = "default_ball_spawn_x")]
    pub ball_spawn_x: f32,
    /// Vertical clearance between the platform center and the spawned ball.
    #[serde(default = "default_spawn_clearance")]
    pub spawn_clearance: f32,
    /// Ball y beyond which recovery teleports it back above the platform.
    #[serde(default = "default_kill_y")]
    pub kill_y: f32,
    /// Hazard circle centers.
    #[serde(default = "classic_hazards")]
    pub hazards: Vec<[f32; 2]>,
    /// Hazard circle radius.
    #[serde(default = "default_hazard_radius")]
    pub hazard_radius: f32,
    /// Fraction of the ball's area that must sit inside a hazard to lose.
    #[serde(default = "default_loss_fraction")]
    pub loss_fraction: f32,
}

fn default_pin_x() -> [f32; 2] {
    [200.0, 600.0]
}

fn default_pin_start_y() -> f32 {
    300.0
}

fn default_pin_y_range() -> [f32; 2] {
    [100.0, 500.0]
}

fn default_pin_step() -> f32 {
    1.0
}

fn default_max_tilt_deg() -> f32 {
    30.0
}

fn default_ball_radius() -> f32 {
    12.0
}

fn default_ball_spawn_x() -> f32 {
    400.0
}

fn default_spawn_clearance() -> f32 {
    30.0
}

fn default_kill_y() -> f32 {
    600.0
}

fn default_hazard_radius() -> f32 {
    // 10% larger than the ball, rounded up.
    (default_ball_radius() * 1.1).ceil()
}

fn default_loss_fraction() -> f32 {
    0.8
}

/// The 25-hazard reference layout: a staggered grid between the pins plus
/// corner and center zones.
fn classic_hazards() -> Vec<[f32; 2]> {
    vec![
        [300.0, 200.0],
        [500.0, 200.0],
        [400.0, 400.0],
        [250.0, 150.0],
        [350.0, 150.0],
        [450.0, 150.0],
        [550.0, 150.0],
        [250.0, 250.0],
        [350.0, 250.0],
        [450.0, 250.0],
        [550.0, 250.0],
        [250.0, 350.0],
        [350.0, 350.0],
        [450.0, 350.0],
        [550.0, 350.0],
        [250.0, 450.0],
        [350.0, 450.0],
        [450.0, 450.0],
        [550.0, 450.0],
        [220.0, 120.0],
        [580.0, 120.0],
        [220.0, 480.0],
        [580.0, 480.0],
        [400.0, 200.0],
        [400.0, 300.0],
    ]
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::default_classic()
    }
}

impl BoardConfig {
    /// The reference board: pins at x=200/600 starting level at y=300, 25
    /// hazards, loss at 80% overlap.
    pub fn default_classic() -> Self {
        Self {
            pin_x: default_pin_x(),
            pin_start_y: default_pin_start_y(),
            pin_y_range: default_pin_y_range(),
            pin_step: default_pin_step(),
            max_tilt_deg: default_max_tilt_deg(),
            ball_radius: default_ball_radius(),
            ball_spawn_x: default_ball_spawn_x(),
            spawn_clearance: default_spawn_clearance(),
            kill_y: default_kill_y(),
            hazards: classic_hazards(),
            hazard_radius: default_hazard_radius(),
            loss_fraction: default_loss_fraction(),
        }
    }

    /// Parses a config from JSON and validates it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks internal consistency of the layout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let [min_y, max_y] = self.pin_y_range;
        if min_y >= max_y {
            return Err(ConfigError::InvertedPinRange(min_y, max_y));
        }
        if self.pin_start_y < min_y || self.pin_start_y > max_y {
            return Err(ConfigError::PinStartOutOfRange {
                start: self.pin_start_y,
                min: min_y,
                max: max_y,
            });
        }
        for (name, value) in [
            ("pin_step", self.pin_step),
            ("max_tilt_deg", self.max_tilt_deg),
            ("ball_radius", self.ball_radius),
            ("hazard_radius", self.hazard_radius),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        if self.loss_fraction <= 0.0 || self.loss_fraction > 1.0 {
            return Err(ConfigError::LossFractionOutOfRange(self.loss_fraction));
        }
        if self.hazards.is_empty() {
            return Err(ConfigError::NoHazards);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_config_is_valid() {
        let config = BoardConfig::default_classic();
        assert!(config.validate().is_ok());
        assert_eq!(config.hazards.len(), 25);
        assert_eq!(config.hazard_radius, 14.0);
    }

    #[test]
    fn test_inverted_pin_range_rejected() {
        let mut config = BoardConfig::default_classic();
        config.pin_y_range = [500.0, 100.0];
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvertedPinRange(..))
        ));
    }

    #[test]
    fn test_non_positive_radius_rejected() {
        let mut config = BoardConfig::default_classic();
        config.ball_radius = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { name: "ball_radius", .. })
        ));
    }

    #[test]
    fn test_from_json_applies_defaults() {
        // An empty object is the classic board.
        let config = BoardConfig::from_json("{}").unwrap();
        assert_eq!(config.pin_x, [200.0, 600.0]);
        assert_eq!(config.loss_fraction, 0.8);

        // Overrides merge with defaults.
        let config = BoardConfig::from_json(r#"{"pin_step": 2.0}"#).unwrap();
        assert_eq!(config.pin_step, 2.0);
        assert_eq!(config.hazards.len(), 25);
    }

    #[test]
    fn test_from_json_rejects_bad_layout() {
        let err = BoardConfig::from_json(r#"{"hazards": []}"#).unwrap_err();
        assert!(matches!(err, ConfigError::NoHazards));
    }
}
