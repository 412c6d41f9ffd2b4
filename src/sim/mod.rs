//! Game-state core
//!
//! All gameplay rules live here. Physics integration and drawing are reached
//! only through the `PhysicsWorld` and `SpriteList` traits:
//! - Fixed timestep only
//! - Stable iteration order (registry insertion order)
//! - Collision-triggered removals applied within the step that caused them

pub mod ability;
pub mod collision;
pub mod entity;
pub mod launch;
pub mod level;
pub mod registry;
pub mod state;
pub mod tick;

pub use ability::{AbilityOutcome, select_ability, trigger_ability};
pub use collision::{ContactOutcome, ImpactClass, classify_impulse, resolve_contact, resolve_contacts};
pub use entity::{AbilityKind, AbilityState, EntityId, EntityKind, GameObject};
pub use launch::{
    ImpulseVector, LaunchController, LaunchPoint, LaunchState, Point2D, Release, angle,
    clamp_drag, distance, impulse_vector,
};
pub use level::{ColumnSpec, LevelLayout, LevelSet, Orientation, PigSpec, check_level_up, setup_level};
pub use registry::Registry;
pub use state::GameState;
pub use tick::{Game, InputOutcome, TickReport};
