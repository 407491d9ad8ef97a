//! Game settings and balance
//!
//! Loaded from a JSON file next to the executable's working directory. Every
//! field has a default, so a partial file only overrides what it names.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Default settings file name
pub const SETTINGS_FILE: &str = "paddleball.json";

/// Gameplay balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Initial ball speed (px/s)
    pub ball_speed: f32,
    /// SpeedUp never pushes the ball past this (px/s)
    pub max_ball_speed: f32,
    pub ball_radius: f32,
    /// Pad speed (px/s)
    pub pad_speed: f32,
    /// Consecutive same-direction ticks per unit of return-speed bonus
    pub streak_scale: f32,
    /// Half-height of the band around the pad top that counts as contact (px)
    pub contact_tolerance: f32,
    pub power_up_radius: f32,
    /// Power-up fall speed (px/s)
    pub power_up_fall_speed: f32,
    /// Per-tick probability that a hidden power-up appears
    pub spawn_chance: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ball_speed: 240.0,
            max_ball_speed: 600.0,
            ball_radius: 20.0,
            pad_speed: 300.0,
            streak_scale: 100.0,
            contact_tolerance: 5.0,
            power_up_radius: 15.0,
            power_up_fall_speed: 90.0,
            spawn_chance: 0.0001,
        }
    }
}

/// Window, camera and gameplay settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub title: String,
    /// Initial window size (logical pixels)
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
    /// Fixed RNG seed; a time-derived seed is used when absent
    pub seed: Option<u64>,
    pub camera_position: Vec3,
    /// Free-fly speed (units/s); zero pins the camera
    pub camera_speed: f32,
    pub mouse_sensitivity: f32,
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: "Paddleball".to_string(),
            width: 800,
            height: 600,
            vsync: true,
            seed: None,
            camera_position: Vec3::new(0.0, 0.0, -300.0),
            // A/D steer the pad, so the camera stays put unless asked
            camera_speed: 0.0,
            mouse_sensitivity: 1.0,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings.sanitized()
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings in {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No settings at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Replace values the game cannot run with
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        if self.width == 0 || self.height == 0 {
            log::warn!("Window size {}x{} is invalid, using defaults", self.width, self.height);
            self.width = defaults.width;
            self.height = defaults.height;
        }
        if !self.camera_position.is_finite() {
            log::warn!("Camera position is not finite, using default");
            self.camera_position = defaults.camera_position;
        }
        if !(self.camera_speed.is_finite() && self.camera_speed >= 0.0) {
            log::warn!("Camera speed {} is invalid, pinning camera", self.camera_speed);
            self.camera_speed = 0.0;
        }
        if !(self.mouse_sensitivity.is_finite() && self.mouse_sensitivity >= 0.0) {
            log::warn!("Mouse sensitivity {} is invalid, using default", self.mouse_sensitivity);
            self.mouse_sensitivity = defaults.mouse_sensitivity;
        }

        let t = &mut self.tuning;
        let d = defaults.tuning;
        fix_positive("ball_radius", &mut t.ball_radius, d.ball_radius);
        fix_positive("ball_speed", &mut t.ball_speed, d.ball_speed);
        fix_positive("max_ball_speed", &mut t.max_ball_speed, d.max_ball_speed);
        fix_positive("pad_speed", &mut t.pad_speed, d.pad_speed);
        fix_positive("streak_scale", &mut t.streak_scale, d.streak_scale);
        fix_positive("contact_tolerance", &mut t.contact_tolerance, d.contact_tolerance);
        fix_positive("power_up_radius", &mut t.power_up_radius, d.power_up_radius);
        fix_positive("power_up_fall_speed", &mut t.power_up_fall_speed, d.power_up_fall_speed);
        if t.max_ball_speed < t.ball_speed {
            log::warn!("max_ball_speed below ball_speed, raising it");
            t.max_ball_speed = t.ball_speed;
        }
        if !(0.0..=1.0).contains(&t.spawn_chance) {
            log::warn!("spawn_chance {} is not a probability, clamping", t.spawn_chance);
            t.spawn_chance = if t.spawn_chance.is_nan() {
                d.spawn_chance
            } else {
                t.spawn_chance.clamp(0.0, 1.0)
            };
        }

        self
    }
}

fn fix_positive(name: &str, value: &mut f32, default: f32) {
    if !(value.is_finite() && *value > 0.0) {
        log::warn!("{} = {} is invalid, using {}", name, value, default);
        *value = default;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "width": 1024, "tuning": { "pad_speed": 420.0 } }"#)
            .unwrap();
        assert_eq!(settings.width, 1024);
        assert_eq!(settings.height, 600);
        assert_eq!(settings.tuning.pad_speed, 420.0);
        assert_eq!(settings.tuning.ball_speed, Tuning::default().ball_speed);
    }

    #[test]
    fn test_json_round_trip() {
        let mut settings = Settings::default();
        settings.seed = Some(42);
        settings.camera_position = Vec3::new(1.0, 2.0, 3.0);

        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Settings::from_json("{ width: ").is_err());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let settings = Settings::load("/nonexistent/dir/paddleball.json");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_sanitized_repairs_bad_values() {
        let mut settings = Settings::default();
        settings.width = 0;
        settings.camera_speed = -5.0;
        settings.tuning.ball_radius = -1.0;
        settings.tuning.max_ball_speed = 10.0;
        settings.tuning.spawn_chance = 3.0;

        let fixed = settings.sanitized();
        assert_eq!(fixed.width, 800);
        assert_eq!(fixed.camera_speed, 0.0);
        assert_eq!(fixed.tuning.ball_radius, 20.0);
        assert_eq!(fixed.tuning.max_ball_speed, fixed.tuning.ball_speed);
        assert_eq!(fixed.tuning.spawn_chance, 1.0);
    }

    #[test]
    fn test_defaults_are_already_sane() {
        assert_eq!(Settings::default().sanitized(), Settings::default());
    }
}
