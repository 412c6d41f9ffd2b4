//! Game state
//!
//! Everything the rules read or write between ticks. Owned by the frame
//! driver and handed to each component by reference.

use super::entity::AbilityKind;
use super::launch::{LaunchController, LaunchPoint};
use super::registry::Registry;

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Score (only ever increases within a level)
    pub score: u64,
    /// Current level (1-based)
    pub level: u32,
    /// Every live pig, column and projectile
    pub registry: Registry,
    /// Slingshot gesture
    pub launch: LaunchController,
    /// Current launch point, rebuilt with each level
    pub launch_point: Option<LaunchPoint>,
    /// Ability tagged onto the next launched projectile
    pub next_ability: AbilityKind,
    /// Background of the current level
    pub background: String,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Empty state at level 1; the world is built by level setup
    pub fn new() -> Self {
        Self {
            score: 0,
            level: 1,
            registry: Registry::new(),
            launch: LaunchController::new(),
            launch_point: None,
            next_ability: AbilityKind::None,
            background: String::new(),
            time_ticks: 0,
        }
    }

    pub fn add_score(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    /// Live projectile count
    pub fn projectile_count(&self) -> usize {
        self.registry.projectile_count()
    }
}
