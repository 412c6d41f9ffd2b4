//! Physics engine capability interface
//!
//! The game core never integrates bodies or solves contacts itself. It drives
//! a `PhysicsWorld`: registers single-shape bodies, steps the world once per
//! tick, and reads back poses, velocities and the step's post-solve contacts.

pub mod headless;

use glam::Vec2;
use serde::{Deserialize, Serialize};

pub use headless::HeadlessWorld;

/// Handle to a body and its (single) collision shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyHandle(pub u32);

/// Collision shape attached to a body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Circle { radius: f32 },
    /// Axis-aligned box given by half extents
    Box { half_extents: Vec2 },
}

impl Shape {
    /// Half extents of the shape's bounding box
    pub fn half_extents(&self) -> Vec2 {
        match *self {
            Shape::Circle { radius } => Vec2::splat(radius),
            Shape::Box { half_extents } => half_extents,
        }
    }
}

/// Everything needed to create a dynamic body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyDesc {
    pub position: Vec2,
    pub velocity: Vec2,
    pub angle: f32,
    pub shape: Shape,
    /// Mass (0 = static)
    pub mass: f32,
    pub friction: f32,
    pub elasticity: f32,
}

impl BodyDesc {
    pub fn new(position: Vec2, shape: Shape, mass: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            angle: 0.0,
            shape,
            mass,
            friction: 1.0,
            elasticity: 0.0,
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_material(mut self, friction: f32, elasticity: f32) -> Self {
        self.friction = friction;
        self.elasticity = elasticity;
        self
    }
}

/// Position + rotation of a body
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec2,
    pub angle: f32,
}

/// Post-solve report for one touching shape pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactEvent {
    pub shapes: [BodyHandle; 2],
    /// Magnitude of the impulse accumulated for this pair during the step
    pub impulse: f32,
}

impl ContactEvent {
    pub fn new(a: BodyHandle, b: BodyHandle, impulse: f32) -> Self {
        Self {
            shapes: [a, b],
            impulse,
        }
    }

    /// Whether `handle` is one side of this pair
    pub fn involves(&self, handle: BodyHandle) -> bool {
        self.shapes.contains(&handle)
    }
}

/// A physics space the game core drives
pub trait PhysicsWorld {
    /// Register a body+shape pair
    fn add_body(&mut self, desc: &BodyDesc) -> BodyHandle;

    /// Unregister a body+shape pair. Returns false if it was not present.
    fn remove_body(&mut self, handle: BodyHandle) -> bool;

    /// Current pose, `None` once removed
    fn pose(&self, handle: BodyHandle) -> Option<Pose>;

    /// Current linear velocity, `None` once removed
    fn velocity(&self, handle: BodyHandle) -> Option<Vec2>;

    /// Advance the world by `dt`, returning every touching pair's post-solve
    /// report in solve order
    fn step(&mut self, dt: f32) -> Vec<ContactEvent>;

    fn contains(&self, handle: BodyHandle) -> bool {
        self.pose(handle).is_some()
    }
}
