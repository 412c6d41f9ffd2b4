//! Collision-triggered destruction and scoring
//!
//! Every post-solve contact is classified by its impulse. Only destructive
//! contacts change state: each tracked object on either side of the pair is
//! removed from the registry (body and sprite together) and its kind's score
//! value is added.

use super::entity::{EntityId, EntityKind};
use super::state::GameState;
use crate::physics::{ContactEvent, PhysicsWorld};
use crate::renderer::SpriteList;
use crate::tuning::Tuning;

/// How hard a contact was
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImpactClass {
    /// Below the reporting floor (resting contact and the like)
    Ignored,
    /// Noticeable but harmless
    Observed,
    /// Destroys tracked objects on both sides
    Destructive,
}

/// Classify a contact impulse magnitude
pub fn classify_impulse(impulse: f32, tuning: &Tuning) -> ImpactClass {
    if impulse < tuning.min_impulse {
        ImpactClass::Ignored
    } else if impulse <= tuning.destroy_impulse {
        ImpactClass::Observed
    } else {
        ImpactClass::Destructive
    }
}

/// What one contact did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactOutcome {
    pub destroyed: Vec<(EntityId, EntityKind)>,
    pub points: u64,
}

/// Apply the destruction policy to a single contact pair
pub fn resolve_contact(
    state: &mut GameState,
    contact: &ContactEvent,
    physics: &mut dyn PhysicsWorld,
    sprites: &mut dyn SpriteList,
    tuning: &Tuning,
) -> ContactOutcome {
    let mut outcome = ContactOutcome::default();
    match classify_impulse(contact.impulse, tuning) {
        ImpactClass::Ignored => return outcome,
        ImpactClass::Observed => {
            log::debug!("Contact impulse {:.0}", contact.impulse);
            return outcome;
        }
        ImpactClass::Destructive => {
            log::debug!("Contact impulse {:.0} (destructive)", contact.impulse);
        }
    }

    // Resolve both sides before removing so a pair naming one body twice
    // can't double count
    let mut victims: Vec<EntityId> = Vec::with_capacity(2);
    for shape in contact.shapes {
        if let Some(object) = state.registry.find_by_body(shape)
            && !victims.contains(&object.id)
        {
            victims.push(object.id);
        }
    }

    for id in victims {
        // Already-removed entities make this a no-op
        if let Some(object) = state.registry.remove(id, physics, sprites) {
            let points = object.kind.score_value();
            state.add_score(points);
            outcome.points += points;
            outcome.destroyed.push((object.id, object.kind));
        }
    }
    outcome
}

/// Apply the destruction policy to every contact from one physics step, in
/// solve order. Returns the points awarded.
pub fn resolve_contacts(
    state: &mut GameState,
    contacts: &[ContactEvent],
    physics: &mut dyn PhysicsWorld,
    sprites: &mut dyn SpriteList,
    tuning: &Tuning,
) -> u64 {
    let mut points = 0;
    for contact in contacts {
        points += resolve_contact(state, contact, physics, sprites, tuning).points;
    }
    points
}
