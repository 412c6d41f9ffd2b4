//! Slingshot - a physics projectile-launch game core
//!
//! Core modules:
//! - `sim`: Game-state core (entities, launch, collisions, abilities, levels)
//! - `physics`: Physics engine capability trait + headless backend
//! - `renderer`: Sprite/render capability trait + headless draw list
//! - `platform`: Input event types delivered by the host
//! - `tuning`: Data-driven game balance

pub mod error;
pub mod physics;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use error::LoadError;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// World dimensions
    pub const WORLD_WIDTH: f32 = 1600.0;
    pub const WORLD_HEIGHT: f32 = 800.0;
    /// Downward gravity (pixels/s²)
    pub const GRAVITY: f32 = -900.0;
    /// Height of the static floor segment
    pub const FLOOR_Y: f32 = 12.0;

    /// Launch point (slingshot) center
    pub const LAUNCH_X: f32 = 300.0;
    pub const LAUNCH_Y: f32 = 110.0;
    pub const LAUNCH_WIDTH: f32 = 40.0;
    pub const LAUNCH_HEIGHT: f32 = 80.0;

    /// Longest allowed drag from the anchor
    pub const MAX_DRAG: f32 = 150.0;
    /// Releases at or under this distance cancel the launch
    pub const MIN_LAUNCH_DISTANCE: f32 = 10.0;
    /// Live projectile cap
    pub const MAX_BIRDS: usize = 30;

    /// Contact impulses below this are ignored entirely
    pub const MIN_REPORTED_IMPULSE: f32 = 100.0;
    /// Contact impulses above this destroy both sides of the pair
    pub const DESTROY_IMPULSE: f32 = 1200.0;

    /// Target placement heights
    pub const COLUMN_Y: f32 = 50.0;
    pub const PIG_Y: f32 = 100.0;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: Vec2) -> (f32, f32) {
    (pos.length(), pos.y.atan2(pos.x))
}
