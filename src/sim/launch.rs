//! Launch math and the slingshot gesture
//!
//! A drag starts on the launch point, is clamped to a circle around it, and on
//! release fires a projectile back through the anchor.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{AbilityKind, AbilityState, EntityId, EntityKind};
use super::registry::Registry;
use crate::consts::{LAUNCH_HEIGHT, LAUNCH_WIDTH};
use crate::physics::{PhysicsWorld, Pose};
use crate::renderer::{SpriteDesc, SpriteHandle, SpriteList, Texture};
use crate::polar_to_cartesian;
use crate::tuning::Tuning;

/// Screen/world point
pub type Point2D = Vec2;

/// Launch direction and strength
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpulseVector {
    /// Radians
    pub angle: f32,
    /// Always >= 0
    pub magnitude: f32,
}

impl ImpulseVector {
    /// Launch velocity for a given speed-per-unit-impulse scale
    pub fn velocity(&self, scale: f32) -> Vec2 {
        polar_to_cartesian(self.magnitude * scale, self.angle)
    }
}

/// Angle of the vector from `from` to `to`
#[inline]
pub fn angle(from: Point2D, to: Point2D) -> f32 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Euclidean distance
#[inline]
pub fn distance(a: Point2D, b: Point2D) -> f32 {
    (b - a).length()
}

/// Launch vector for a drag from `anchor` to `current`: points from the drag
/// point back through the anchor, with strength equal to the drag length
pub fn impulse_vector(anchor: Point2D, current: Point2D) -> ImpulseVector {
    let iv = ImpulseVector {
        angle: angle(current, anchor),
        magnitude: distance(current, anchor),
    };
    log::debug!(
        "Impulse vector - angle: {:.1}°, magnitude: {:.1}",
        iv.angle.to_degrees(),
        iv.magnitude
    );
    iv
}

/// Keep `raw` within `max_drag` of `anchor`, preserving its direction
pub fn clamp_drag(anchor: Point2D, raw: Point2D, max_drag: f32) -> Point2D {
    let offset = raw - anchor;
    let length = offset.length();
    // Zero-length offset never needs clamping (and can't be normalized)
    if length <= max_drag || length == 0.0 {
        return raw;
    }
    anchor + offset / length * max_drag
}

/// The slingshot: where gestures start and projectiles appear
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaunchPoint {
    pub center: Point2D,
    pub sprite: SpriteHandle,
}

impl LaunchPoint {
    pub fn spawn(center: Point2D, sprites: &mut dyn SpriteList) -> Self {
        let sprite = sprites.add(SpriteDesc {
            texture: Texture::Slingshot,
            size: Vec2::new(LAUNCH_WIDTH, LAUNCH_HEIGHT),
            pose: Pose {
                position: center,
                angle: 0.0,
            },
        });
        Self { center, sprite }
    }

    pub fn despawn(self, sprites: &mut dyn SpriteList) {
        sprites.remove(self.sprite);
    }

    /// Whether `point` is inside the launch point's hit region
    pub fn hit(&self, point: Point2D, sprites: &dyn SpriteList) -> bool {
        sprites.hit_test(self.sprite, point)
    }
}

/// Gesture state
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LaunchState {
    #[default]
    Idle,
    /// Dragging; `current` is already clamped
    Aiming { anchor: Point2D, current: Point2D },
    /// Post-launch pause before the next gesture may start
    Cooldown { ticks: u32 },
}

/// Result of releasing a gesture
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Release {
    /// No gesture in progress
    NotAiming,
    /// Too short to launch
    Cancelled,
    /// Projectile cap reached, launch dropped
    Dropped(ImpulseVector),
    Launched { id: EntityId, impulse: ImpulseVector },
}

/// Drag-to-launch state machine
#[derive(Debug, Clone, Default)]
pub struct LaunchController {
    state: LaunchState,
}

impl LaunchController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LaunchState {
        self.state
    }

    pub fn is_aiming(&self) -> bool {
        matches!(self.state, LaunchState::Aiming { .. })
    }

    /// Back to Idle, dropping any gesture or cooldown
    pub fn reset(&mut self) {
        self.state = LaunchState::Idle;
    }

    /// Start aiming if the press landed on the launch point
    pub fn begin(&mut self, press: Point2D, launch_point: &LaunchPoint, sprites: &dyn SpriteList) -> bool {
        if !matches!(self.state, LaunchState::Idle) || !launch_point.hit(press, sprites) {
            return false;
        }
        let anchor = launch_point.center;
        self.state = LaunchState::Aiming {
            anchor,
            current: anchor,
        };
        log::debug!("Start point: {anchor}");
        true
    }

    /// Move the drag point (clamped to `max_drag`)
    pub fn drag(&mut self, pos: Point2D, tuning: &Tuning) {
        if let LaunchState::Aiming { anchor, ref mut current } = self.state {
            *current = clamp_drag(anchor, pos, tuning.max_drag);
            log::debug!("Dragging to: {}", *current);
        }
    }

    /// Finish the gesture, spawning a projectile when it is long enough and
    /// the cap allows
    pub fn release(
        &mut self,
        ability: AbilityKind,
        registry: &mut Registry,
        physics: &mut dyn PhysicsWorld,
        sprites: &mut dyn SpriteList,
        tuning: &Tuning,
    ) -> Release {
        let LaunchState::Aiming { anchor, current } = self.state else {
            return Release::NotAiming;
        };
        self.state = LaunchState::Idle;
        log::debug!("Releasing from: {current}");

        if distance(anchor, current) <= tuning.min_launch_distance {
            log::debug!("Launch cancelled (drag too short)");
            return Release::Cancelled;
        }

        let impulse = impulse_vector(anchor, current);
        if registry.projectile_count() >= tuning.max_projectiles {
            log::warn!("Projectile cap ({}) reached, launch dropped", tuning.max_projectiles);
            return Release::Dropped(impulse);
        }

        let desc = EntityKind::Projectile
            .body_desc(anchor)
            .with_velocity(impulse.velocity(tuning.launch_speed_scale));
        let id = registry.spawn(
            EntityKind::Projectile,
            &desc,
            Some(AbilityState::armed(ability)),
            physics,
            sprites,
        );
        if tuning.launch_cooldown_ticks > 0 {
            self.state = LaunchState::Cooldown {
                ticks: tuning.launch_cooldown_ticks,
            };
        }
        Release::Launched { id, impulse }
    }

    /// Count down an active cooldown
    pub fn tick(&mut self) {
        if let LaunchState::Cooldown { ticks } = self.state {
            self.state = if ticks <= 1 {
                LaunchState::Idle
            } else {
                LaunchState::Cooldown { ticks: ticks - 1 }
            };
        }
    }

    /// Aim line endpoints while aiming
    pub fn aim_line(&self) -> Option<(Point2D, Point2D)> {
        match self.state {
            LaunchState::Aiming { anchor, current } => Some((anchor, current)),
            _ => None,
        }
    }
}
