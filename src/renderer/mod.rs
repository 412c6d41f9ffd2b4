//! Render/sprite capability interface
//!
//! The core owns no textures or GPU state. It registers one sprite per game
//! object, pushes the physics pose into it every frame, and asks the list to
//! draw. Hit-testing the launch point also goes through the sprite list.

pub mod draw_list;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::physics::Pose;

pub use draw_list::{DrawCommand, DrawList};

/// Handle to a sprite in the list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpriteHandle(pub u32);

/// Texture identity for a sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Texture {
    Slingshot,
    Pig,
    ColumnVertical,
    ColumnHorizontal,
    /// Plain projectile
    Bird,
    /// Projectile carrying the split ability
    SplitBird,
    /// Projectile produced by the speed-variant ability
    SpeedBird,
}

/// A sprite to add to the list
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteDesc {
    pub texture: Texture,
    /// Full width/height in world units
    pub size: Vec2,
    pub pose: Pose,
}

/// Ordered drawable list the core drives
pub trait SpriteList {
    /// Append a sprite (drawn after everything already in the list)
    fn add(&mut self, desc: SpriteDesc) -> SpriteHandle;

    /// Remove a sprite. Returns false if it was not present.
    fn remove(&mut self, handle: SpriteHandle) -> bool;

    /// Sync a sprite to its physics pose
    fn set_pose(&mut self, handle: SpriteHandle, pose: Pose);

    /// Whether the world-space point lies on the sprite
    fn hit_test(&self, handle: SpriteHandle, point: Vec2) -> bool;

    fn set_background(&mut self, id: &str);

    /// Batched draw of every sprite in order
    fn draw(&mut self);

    /// Debug line (used for the aim line)
    fn draw_line(&mut self, from: Vec2, to: Vec2, width: f32);

    /// HUD text
    fn draw_text(&mut self, text: &str, at: Vec2);
}
