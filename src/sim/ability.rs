//! Post-launch projectile abilities
//!
//! The selected ability is stamped onto each projectile when it is launched.
//! A later trigger transforms the first moving projectile whose ability is
//! still unused; the products are marked used so abilities never chain.

use glam::Vec2;

use super::entity::{AbilityKind, AbilityState, EntityId, EntityKind};
use super::state::GameState;
use crate::physics::PhysicsWorld;
use crate::renderer::SpriteList;
use crate::tuning::Tuning;
use crate::{cartesian_to_polar, polar_to_cartesian};

/// What a trigger did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbilityOutcome {
    Split {
        original: EntityId,
        spawned: [EntityId; 2],
    },
    SpeedVariant {
        original: EntityId,
        spawned: EntityId,
    },
}

/// Choose the ability for subsequent launches. Projectiles already in flight
/// keep theirs.
pub fn select_ability(state: &mut GameState, kind: AbilityKind) {
    if state.next_ability != kind {
        log::debug!("Next ability: {:?}", kind);
    }
    state.next_ability = kind;
}

/// A projectile picked for transformation
#[derive(Debug, Clone, Copy)]
struct Candidate {
    id: EntityId,
    kind: AbilityKind,
    position: Vec2,
    velocity: Vec2,
}

/// First projectile (registry order) that is moving and has an unused ability
fn find_candidate(state: &GameState, physics: &dyn PhysicsWorld) -> Option<Candidate> {
    state.registry.iter().find_map(|object| {
        let kind = object.ready_ability()?;
        let velocity = physics.velocity(object.body)?;
        if velocity.length() <= 0.0 {
            return None;
        }
        let position = physics.pose(object.body)?.position;
        Some(Candidate {
            id: object.id,
            kind,
            position,
            velocity,
        })
    })
}

/// Fire the ability of the first eligible projectile. No eligible projectile
/// (or no room under the cap for a split) makes this a no-op.
pub fn trigger_ability(
    state: &mut GameState,
    physics: &mut dyn PhysicsWorld,
    sprites: &mut dyn SpriteList,
    tuning: &Tuning,
) -> Option<AbilityOutcome> {
    let Some(candidate) = find_candidate(state, physics) else {
        log::debug!("Ability trigger ignored: no eligible projectile");
        return None;
    };

    let (speed, heading) = cartesian_to_polar(candidate.velocity);

    match candidate.kind {
        AbilityKind::None => None,
        AbilityKind::Split => {
            // Net +1 projectile
            if state.projectile_count() >= tuning.max_projectiles {
                log::debug!("Split skipped: projectile cap reached");
                return None;
            }
            state.registry.remove(candidate.id, physics, sprites);

            let lateral = Vec2::new(-heading.sin(), heading.cos());
            let spread = tuning.split_angle();
            let mut spawned = [candidate.id; 2];
            for (slot, side) in spawned.iter_mut().zip([1.0f32, -1.0]) {
                let position = candidate.position + lateral * (side * tuning.split_offset);
                let velocity = polar_to_cartesian(speed, heading + side * spread);
                let desc = EntityKind::Projectile.body_desc(position).with_velocity(velocity);
                *slot = state.registry.spawn(
                    EntityKind::Projectile,
                    &desc,
                    Some(AbilityState::spent(AbilityKind::Split)),
                    physics,
                    sprites,
                );
            }
            log::debug!("Split {:?} into {:?}", candidate.id, spawned);
            Some(AbilityOutcome::Split {
                original: candidate.id,
                spawned,
            })
        }
        AbilityKind::SpeedVariant => {
            state.registry.remove(candidate.id, physics, sprites);

            let velocity = polar_to_cartesian(speed * tuning.speed_variant_multiplier, heading);
            let desc = EntityKind::Projectile
                .body_desc(candidate.position)
                .with_velocity(velocity);
            let spawned = state.registry.spawn(
                EntityKind::Projectile,
                &desc,
                Some(AbilityState::spent(AbilityKind::SpeedVariant)),
                physics,
                sprites,
            );
            log::debug!("Speed variant {:?} -> {:?}", candidate.id, spawned);
            Some(AbilityOutcome::SpeedVariant {
                original: candidate.id,
                spawned,
            })
        }
    }
}
