//! Game object types
//!
//! Every tracked object is a `GameObject`: a kind tag, one physics body and
//! one sprite. Behavior and scoring dispatch on the `EntityKind` tag.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::physics::{BodyDesc, BodyHandle, Shape};
use crate::renderer::{SpriteHandle, Texture};

/// Stable identifier of a tracked object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// What a game object is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Pig,
    ColumnVertical,
    ColumnHorizontal,
    Projectile,
}

/// Pig radius
pub const PIG_RADIUS: f32 = 15.0;
/// Projectile radius
pub const BIRD_RADIUS: f32 = 12.0;
/// Long/short sides of a column
pub const COLUMN_LENGTH: f32 = 80.0;
pub const COLUMN_WIDTH: f32 = 20.0;

impl EntityKind {
    /// Points awarded when an object of this kind is destroyed
    pub fn score_value(self) -> u64 {
        match self {
            EntityKind::Pig => 100,
            EntityKind::ColumnVertical | EntityKind::ColumnHorizontal => 50,
            EntityKind::Projectile => 0,
        }
    }

    pub fn is_projectile(self) -> bool {
        self == EntityKind::Projectile
    }

    pub fn shape(self) -> Shape {
        match self {
            EntityKind::Pig => Shape::Circle { radius: PIG_RADIUS },
            EntityKind::Projectile => Shape::Circle { radius: BIRD_RADIUS },
            EntityKind::ColumnVertical => Shape::Box {
                half_extents: Vec2::new(COLUMN_WIDTH / 2.0, COLUMN_LENGTH / 2.0),
            },
            EntityKind::ColumnHorizontal => Shape::Box {
                half_extents: Vec2::new(COLUMN_LENGTH / 2.0, COLUMN_WIDTH / 2.0),
            },
        }
    }

    /// Body description (shape, mass, material) at rest at `position`
    pub fn body_desc(self, position: Vec2) -> BodyDesc {
        let (mass, friction, elasticity) = match self {
            EntityKind::Pig => (2.0, 1.0, 0.3),
            EntityKind::ColumnVertical | EntityKind::ColumnHorizontal => (10.0, 1.0, 0.0),
            EntityKind::Projectile => (5.0, 1.0, 0.9),
        };
        BodyDesc::new(position, self.shape(), mass).with_material(friction, elasticity)
    }

    /// Sprite size in world units
    pub fn sprite_size(self) -> Vec2 {
        self.shape().half_extents() * 2.0
    }

    /// Texture for this kind; projectiles look like their ability
    pub fn texture(self, ability: Option<AbilityState>) -> Texture {
        match self {
            EntityKind::Pig => Texture::Pig,
            EntityKind::ColumnVertical => Texture::ColumnVertical,
            EntityKind::ColumnHorizontal => Texture::ColumnHorizontal,
            EntityKind::Projectile => ability.unwrap_or_default().texture(),
        }
    }
}

/// Post-launch behavior carried by a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AbilityKind {
    #[default]
    None,
    /// Splits into two diverging projectiles
    Split,
    /// Re-launches as the speed variant
    SpeedVariant,
}

/// Ability tag on a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AbilityState {
    pub kind: AbilityKind,
    pub used: bool,
}

impl AbilityState {
    /// Fresh, unused ability
    pub fn armed(kind: AbilityKind) -> Self {
        Self { kind, used: false }
    }

    /// Already spent (ability products never chain)
    pub fn spent(kind: AbilityKind) -> Self {
        Self { kind, used: true }
    }

    /// Texture for a projectile carrying this ability. The speed variant
    /// only shows once it has fired.
    pub fn texture(&self) -> Texture {
        match (self.kind, self.used) {
            (AbilityKind::None, _) | (AbilityKind::SpeedVariant, false) => Texture::Bird,
            (AbilityKind::Split, _) => Texture::SplitBird,
            (AbilityKind::SpeedVariant, true) => Texture::SpeedBird,
        }
    }

    /// Can still be triggered
    pub fn is_ready(&self) -> bool {
        self.kind != AbilityKind::None && !self.used
    }
}

/// A tracked game object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameObject {
    pub id: EntityId,
    pub kind: EntityKind,
    /// Body + shape, owned exclusively by this object
    pub body: BodyHandle,
    pub sprite: SpriteHandle,
    /// Only projectiles carry an ability
    pub ability: Option<AbilityState>,
}

impl GameObject {
    pub fn texture(&self) -> Texture {
        self.kind.texture(self.ability)
    }

    /// Ability that can still be triggered on this object
    pub fn ready_ability(&self) -> Option<AbilityKind> {
        self.ability.filter(AbilityState::is_ready).map(|a| a.kind)
    }
}
