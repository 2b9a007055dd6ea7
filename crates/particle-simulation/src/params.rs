//! Simulation parameters for runtime tuning

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use particle_physics::{
    ColorPreset, ShapeKind, FORCE_RADIUS_MAX, FORCE_RADIUS_MIN, FORCE_STRENGTH_MAX,
    FORCE_STRENGTH_MIN, PARTICLE_COUNT_MAX, PARTICLE_COUNT_MIN,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How the hand drives the particles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForceMode {
    /// Closed hand gathers, opening it explodes, springs reform the shape
    #[default]
    Gesture,
    /// Continuous push (open) / pull (closed) around the hand position
    Proximity,
}

impl ForceMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ForceMode::Gesture => "gesture",
            ForceMode::Proximity => "proximity",
        }
    }
}

impl fmt::Display for ForceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown force mode '{0}' (expected gesture or proximity)")]
pub struct ParseForceModeError(pub String);

impl FromStr for ForceMode {
    type Err = ParseForceModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gesture" => Ok(ForceMode::Gesture),
            "proximity" => Ok(ForceMode::Proximity),
            _ => Err(ParseForceModeError(s.to_string())),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("unknown colour preset '{0}'")]
    UnknownPreset(String),
}

fn check_range<T: Into<f64> + PartialOrd + Copy>(
    field: &'static str,
    value: T,
    min: T,
    max: T,
) -> Result<(), ConfigError> {
    // NaN fails both comparisons, so it is rejected too
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value: value.into(),
            min: min.into(),
            max: max.into(),
        })
    }
}

pub fn check_particle_count(count: u32) -> Result<(), ConfigError> {
    check_range("particle_count", count, PARTICLE_COUNT_MIN, PARTICLE_COUNT_MAX)
}

pub fn check_force_strength(strength: f32) -> Result<(), ConfigError> {
    check_range("force_strength", strength, FORCE_STRENGTH_MIN, FORCE_STRENGTH_MAX)
}

pub fn check_force_radius(radius: f32) -> Result<(), ConfigError> {
    check_range("force_radius", radius, FORCE_RADIUS_MIN, FORCE_RADIUS_MAX)
}

/// Resolve a preset name against the registry
pub fn lookup_preset(name: &str) -> Result<&'static ColorPreset, ConfigError> {
    ColorPreset::named(name).ok_or_else(|| ConfigError::UnknownPreset(name.to_string()))
}

/// Externally supplied simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub particle_count: u32,
    pub force_strength: f32,
    /// Only used by [`ForceMode::Proximity`]
    pub force_radius: f32,
    pub force_mode: ForceMode,
    pub shape: ShapeKind,
    /// Colour preset per shape; shapes without an entry use their default
    pub color_presets: BTreeMap<ShapeKind, String>,
    /// Fixed seed for reproducible runs
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            particle_count: 15_000,
            force_strength: 0.15,
            force_radius: 3.0,
            force_mode: ForceMode::Gesture,
            shape: ShapeKind::Sphere,
            color_presets: BTreeMap::new(),
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_particle_count(self.particle_count)?;
        check_force_strength(self.force_strength)?;
        check_force_radius(self.force_radius)?;
        for name in self.color_presets.values() {
            lookup_preset(name)?;
        }
        Ok(())
    }

    /// Colour preset configured for `shape`
    pub fn preset_for(&self, shape: ShapeKind) -> &'static ColorPreset {
        self.color_presets
            .get(&shape)
            .and_then(|name| ColorPreset::named(name))
            .or_else(|| ColorPreset::named(shape.default_preset()))
            .unwrap_or(&particle_physics::COLOR_PRESETS[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(SimulationConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_ranges_are_inclusive() {
        assert!(check_particle_count(5_000).is_ok());
        assert!(check_particle_count(50_000).is_ok());
        assert!(check_particle_count(4_999).is_err());
        assert!(check_force_strength(0.05).is_ok());
        assert!(check_force_strength(0.51).is_err());
        assert!(check_force_radius(6.0).is_ok());
        assert!(check_force_radius(0.5).is_err());
        assert!(check_force_radius(f32::NAN).is_err());
    }

    #[test]
    fn test_out_of_range_error_names_field() {
        let config = SimulationConfig {
            force_strength: 2.0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { field: "force_strength", .. }));
        assert!(err.to_string().contains("force_strength"));
    }

    #[test]
    fn test_unknown_preset_rejected() {
        let mut config = SimulationConfig::default();
        config.color_presets.insert(ShapeKind::Cube, "plaid".into());
        assert_eq!(
            config.validate(),
            Err(ConfigError::UnknownPreset("plaid".into()))
        );
    }

    #[test]
    fn test_preset_for_falls_back_to_shape_default() {
        let mut config = SimulationConfig::default();
        config.color_presets.insert(ShapeKind::Heart, "ember".into());

        assert_eq!(config.preset_for(ShapeKind::Heart).name, "ember");
        assert_eq!(config.preset_for(ShapeKind::Spiral).name, "galaxy");
    }

    #[test]
    fn test_yaml_with_defaults() {
        let yaml = "
particle_count: 8000
shape: heart
force_mode: proximity
color_presets:
  heart: aurora
";
        let config: SimulationConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.particle_count, 8000);
        assert_eq!(config.shape, ShapeKind::Heart);
        assert_eq!(config.force_mode, ForceMode::Proximity);
        assert_eq!(config.force_strength, 0.15);
        assert_eq!(config.preset_for(ShapeKind::Heart).name, "aurora");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_force_mode_from_str() {
        assert_eq!("Proximity".parse::<ForceMode>(), Ok(ForceMode::Proximity));
        assert!("magnet".parse::<ForceMode>().is_err());
    }
}
