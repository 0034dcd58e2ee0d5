/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct that contains all the
 * tunable parameters for the firefly flock. Defaults match the stock
 * installation; a JSON file can override any subset of them.
 */

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::bounds::Bounds;
use crate::error::ConfigError;

/// Environment variable naming an optional JSON configuration file.
pub const CONFIG_ENV: &str = "FIREFLIES_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    pub num_leaders: usize,
    pub max_participants: usize,
    pub max_speed: f32,
    // Seconds of simulated time between leadership changeups
    pub changeup_cooldown: f32,
    // Rainbow hue advance per second
    pub rainbow_speed: f32,
    // Seconds between spawned fireflies
    pub spawn_interval: f32,
    pub volume_center: [f32; 3],
    pub volume_height: f32,
    pub volume_radius: f32,
    pub transition_distance: f32,
    pub fixed_physics_fps: f32,
    pub seed: Option<u64>,
    pub pause_simulation: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            num_leaders: 5,
            max_participants: 50,
            max_speed: 15.0,
            changeup_cooldown: 10.0,
            rainbow_speed: 0.1,
            spawn_interval: 0.5,
            volume_center: [0.0, 0.0, 0.0],
            volume_height: 40.0,
            volume_radius: 30.0,
            transition_distance: 5.0,
            fixed_physics_fps: 30.0,
            seed: None,
            pause_simulation: false,
        }
    }
}

impl SimulationParams {
    // Load parameters from a JSON file; missing fields keep their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let params: SimulationParams = serde_json::from_str(&text)?;
        params.validate()?;
        Ok(params)
    }

    // Load from the file named by FIREFLIES_CONFIG, or fall back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => {
                log::info!("loading configuration from {}", Path::new(&path).display());
                Self::load(path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_leaders == 0 {
            return Err(invalid("num_leaders", "at least one leader is required"));
        }
        if self.num_leaders > self.max_participants {
            return Err(invalid(
                "num_leaders",
                format!("{} leaders exceed the {} participant cap", self.num_leaders, self.max_participants),
            ));
        }
        positive("max_speed", self.max_speed)?;
        if self.max_speed < crate::MIN_SPEED {
            return Err(invalid("max_speed", format!("must be at least {}", crate::MIN_SPEED)));
        }
        positive("changeup_cooldown", self.changeup_cooldown)?;
        positive("spawn_interval", self.spawn_interval)?;
        positive("fixed_physics_fps", self.fixed_physics_fps)?;
        if !self.rainbow_speed.is_finite() {
            return Err(invalid("rainbow_speed", "must be finite"));
        }
        Bounds::from_params(self).map(|_| ())
    }

    // Get parameter ranges for UI sliders
    pub fn max_speed_range() -> std::ops::RangeInclusive<f32> {
        1.0..=50.0
    }

    pub fn rainbow_speed_range() -> std::ops::RangeInclusive<f32> {
        0.0..=2.0
    }
}

fn invalid(name: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidParam { name, reason: reason.into() }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(name, format!("must be a positive number, got {}", value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(SimulationParams::default().validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let params: SimulationParams =
            serde_json::from_str(r#"{ "max_speed": 9.5, "seed": 7 }"#).unwrap();
        assert_eq!(params.max_speed, 9.5);
        assert_eq!(params.seed, Some(7));
        assert_eq!(params.num_leaders, 5);
        assert_eq!(params.volume_radius, 30.0);
    }

    #[test]
    fn more_leaders_than_participants_is_rejected() {
        let params = SimulationParams { num_leaders: 8, max_participants: 4, ..Default::default() };
        assert!(matches!(
            params.validate(),
            Err(ConfigError::InvalidParam { name: "num_leaders", .. })
        ));
    }

    #[test]
    fn overlapping_fade_zones_are_rejected() {
        let params = SimulationParams { transition_distance: 25.0, ..Default::default() };
        assert!(matches!(params.validate(), Err(ConfigError::InvalidBounds(_))));
    }

    #[test]
    fn load_reports_missing_file() {
        let result = SimulationParams::load("/nonexistent/fireflies.json");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
