//! Input events in world space

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::AbilityKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Keys that pick the next launch's ability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbilityKey {
    /// `0`
    None,
    /// `1`
    Split,
    /// `2`
    SpeedVariant,
}

impl AbilityKey {
    /// Map a typed character to an ability key
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(AbilityKey::None),
            '1' => Some(AbilityKey::Split),
            '2' => Some(AbilityKey::SpeedVariant),
            _ => None,
        }
    }

    pub fn ability(self) -> AbilityKind {
        match self {
            AbilityKey::None => AbilityKind::None,
            AbilityKey::Split => AbilityKind::Split,
            AbilityKey::SpeedVariant => AbilityKind::SpeedVariant,
        }
    }
}

/// One input event, positions already converted to world coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    Press { button: MouseButton, pos: Vec2 },
    /// Pointer moved with `button` held
    Drag { button: MouseButton, pos: Vec2 },
    Release { button: MouseButton, pos: Vec2 },
    Key(AbilityKey),
}
