//! Data-driven game balance
//!
//! Every field falls back to the built-in value when missing from JSON, so a
//! tuning file only needs to name what it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{LoadError, read_file};

/// Game balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Launch ===
    /// Longest drag from the anchor (drag point is clamped onto this circle)
    pub max_drag: f32,
    /// Releases at or under this distance are cancelled
    pub min_launch_distance: f32,
    /// Live projectile cap
    pub max_projectiles: usize,
    /// Launch speed per unit of impulse magnitude
    pub launch_speed_scale: f32,
    /// Ticks spent in Cooldown after a launch (0 = straight back to Idle)
    pub launch_cooldown_ticks: u32,

    // === Destruction ===
    /// Contact impulses below this are ignored
    pub min_impulse: f32,
    /// Contact impulses above this destroy tracked entities on both sides
    pub destroy_impulse: f32,

    // === Abilities ===
    /// Split fan half-angle (degrees)
    pub split_angle_deg: f32,
    /// Lateral displacement of each split projectile
    pub split_offset: f32,
    /// Speed multiplier for the speed variant (1.0 keeps speed)
    pub speed_variant_multiplier: f32,

    // === Progression ===
    /// Reset score to zero when a new level is built
    pub reset_score_on_level: bool,

    // === World ===
    /// Projectiles this far outside the world are culled
    pub cull_margin: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_drag: MAX_DRAG,
            min_launch_distance: MIN_LAUNCH_DISTANCE,
            max_projectiles: MAX_BIRDS,
            launch_speed_scale: 7.0,
            launch_cooldown_ticks: 0,

            min_impulse: MIN_REPORTED_IMPULSE,
            destroy_impulse: DESTROY_IMPULSE,

            split_angle_deg: 15.0,
            split_offset: 10.0,
            speed_variant_multiplier: 1.0,

            reset_score_on_level: false,

            cull_margin: 200.0,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load_file(path: &Path) -> Result<Self, LoadError> {
        let tuning = Self::from_json(&read_file(path)?)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    fn validate(&self) -> Result<(), LoadError> {
        if self.max_drag <= 0.0 {
            return Err(LoadError::Invalid(format!("max_drag must be positive, got {}", self.max_drag)));
        }
        if self.min_launch_distance < 0.0 || self.min_launch_distance >= self.max_drag {
            return Err(LoadError::Invalid(format!(
                "min_launch_distance must be in [0, max_drag), got {}",
                self.min_launch_distance
            )));
        }
        if self.destroy_impulse < self.min_impulse {
            return Err(LoadError::Invalid("destroy_impulse is below min_impulse".into()));
        }
        if self.speed_variant_multiplier <= 0.0 {
            return Err(LoadError::Invalid("speed_variant_multiplier must be positive".into()));
        }
        Ok(())
    }

    /// Split fan half-angle in radians
    pub fn split_angle(&self) -> f32 {
        self.split_angle_deg.to_radians()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_constants() {
        let t = Tuning::default();
        assert_eq!(t.max_drag, 150.0);
        assert_eq!(t.min_launch_distance, 10.0);
        assert_eq!(t.max_projectiles, 30);
        assert_eq!(t.min_impulse, 100.0);
        assert_eq!(t.destroy_impulse, 1200.0);
        assert!(!t.reset_score_on_level);
        assert_eq!(t.speed_variant_multiplier, 1.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let t = Tuning::from_json(r#"{ "max_projectiles": 5, "reset_score_on_level": true }"#).unwrap();
        assert_eq!(t.max_projectiles, 5);
        assert!(t.reset_score_on_level);
        assert_eq!(t.max_drag, 150.0);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Tuning::from_json(r#"{ "max_drag": 0.0 }"#),
            Err(LoadError::Invalid(_))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "destroy_impulse": 50.0 }"#),
            Err(LoadError::Invalid(_))
        ));
        assert!(matches!(Tuning::from_json("not json"), Err(LoadError::Parse(_))));
    }
}
