//! Entity registry
//!
//! Owns every live game object and keeps its physics body and sprite paired:
//! an object enters with both and leaves with both.

use glam::Vec2;

use super::entity::{AbilityKind, AbilityState, EntityId, EntityKind, GameObject};
use crate::physics::{BodyDesc, BodyHandle, PhysicsWorld};
use crate::renderer::{SpriteDesc, SpriteList};

/// Tracked objects in insertion order
#[derive(Debug, Clone)]
pub struct Registry {
    objects: Vec<GameObject>,
    next_id: u32,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Track an object whose body and sprite already exist
    pub fn add(&mut self, object: GameObject) {
        debug_assert!(
            !self.objects.iter().any(|o| o.id == object.id),
            "entity {:?} added twice",
            object.id
        );
        self.objects.push(object);
    }

    /// Create body + sprite for a new object and track it
    ///
    /// `ability` is ignored for non-projectiles.
    pub fn spawn(
        &mut self,
        kind: EntityKind,
        desc: &BodyDesc,
        ability: Option<AbilityState>,
        physics: &mut dyn PhysicsWorld,
        sprites: &mut dyn SpriteList,
    ) -> EntityId {
        let ability = if kind.is_projectile() {
            Some(ability.unwrap_or(AbilityState::armed(AbilityKind::None)))
        } else {
            None
        };
        let id = self.next_entity_id();
        let body = physics.add_body(desc);
        let sprite = sprites.add(SpriteDesc {
            texture: kind.texture(ability),
            size: kind.sprite_size(),
            pose: physics.pose(body).unwrap_or_default(),
        });
        self.add(GameObject {
            id,
            kind,
            body,
            sprite,
            ability,
        });
        id
    }

    /// Stop tracking an object and detach its body and sprite together
    ///
    /// Removing an unknown or already-removed ID is a no-op returning `None`.
    pub fn remove(
        &mut self,
        id: EntityId,
        physics: &mut dyn PhysicsWorld,
        sprites: &mut dyn SpriteList,
    ) -> Option<GameObject> {
        let idx = self.objects.iter().position(|o| o.id == id)?;
        let object = self.objects.remove(idx);
        physics.remove_body(object.body);
        sprites.remove(object.sprite);
        Some(object)
    }

    /// Remove every tracked object; returns how many were removed
    pub fn clear(&mut self, physics: &mut dyn PhysicsWorld, sprites: &mut dyn SpriteList) -> usize {
        let count = self.objects.len();
        for object in self.objects.drain(..) {
            physics.remove_body(object.body);
            sprites.remove(object.sprite);
        }
        count
    }

    /// Visit every object in insertion order
    pub fn for_each(&self, mut visitor: impl FnMut(&GameObject)) {
        for object in &self.objects {
            visitor(object);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameObject> {
        self.objects.iter()
    }

    pub fn get(&self, id: EntityId) -> Option<&GameObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    /// Objects whose body is `body` (at most one while bodies are exclusively owned)
    pub fn find_by_body(&self, body: BodyHandle) -> Option<&GameObject> {
        self.objects.iter().find(|o| o.body == body)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Live projectile count
    pub fn projectile_count(&self) -> usize {
        self.objects.iter().filter(|o| o.kind.is_projectile()).count()
    }

    /// Live objects of one kind
    pub fn count_kind(&self, kind: EntityKind) -> usize {
        self.objects.iter().filter(|o| o.kind == kind).count()
    }

    /// Push each body's pose into its sprite
    pub fn sync_sprites(&self, physics: &dyn PhysicsWorld, sprites: &mut dyn SpriteList) {
        for object in &self.objects {
            if let Some(pose) = physics.pose(object.body) {
                sprites.set_pose(object.sprite, pose);
            }
        }
    }

    /// Position of a tracked object's body
    pub fn position(&self, id: EntityId, physics: &dyn PhysicsWorld) -> Option<Vec2> {
        self.get(id)
            .and_then(|o| physics.pose(o.body))
            .map(|p| p.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::HeadlessWorld;
    use crate::renderer::DrawList;

    fn spawn_pig(reg: &mut Registry, physics: &mut HeadlessWorld, sprites: &mut DrawList) -> EntityId {
        let desc = EntityKind::Pig.body_desc(Vec2::new(600.0, 100.0));
        reg.spawn(EntityKind::Pig, &desc, None, physics, sprites)
    }

    #[test]
    fn test_spawn_pairs_body_and_sprite() {
        let mut physics = HeadlessWorld::default();
        let mut sprites = DrawList::new();
        let mut reg = Registry::new();

        let id = spawn_pig(&mut reg, &mut physics, &mut sprites);
        let obj = reg.get(id).unwrap().clone();
        assert!(physics.contains(obj.body));
        assert!(sprites.contains(obj.sprite));
        assert_eq!(obj.ability, None);
        assert_eq!(reg.find_by_body(obj.body).map(|o| o.id), Some(id));
    }

    #[test]
    fn test_remove_detaches_both_and_is_idempotent() {
        let mut physics = HeadlessWorld::default();
        let mut sprites = DrawList::new();
        let mut reg = Registry::new();

        let id = spawn_pig(&mut reg, &mut physics, &mut sprites);
        let removed = reg.remove(id, &mut physics, &mut sprites).unwrap();
        assert!(!physics.contains(removed.body));
        assert!(!sprites.contains(removed.sprite));
        assert!(reg.is_empty());

        assert!(reg.remove(id, &mut physics, &mut sprites).is_none());
    }

    #[test]
    fn test_clear_removes_everything() {
        let mut physics = HeadlessWorld::default();
        let mut sprites = DrawList::new();
        let mut reg = Registry::new();

        for _ in 0..4 {
            spawn_pig(&mut reg, &mut physics, &mut sprites);
        }
        let floor_only = 1;
        assert_eq!(physics.body_count(), 4 + floor_only);

        assert_eq!(reg.clear(&mut physics, &mut sprites), 4);
        assert!(reg.is_empty());
        assert!(sprites.is_empty());
        assert_eq!(physics.body_count(), floor_only);
    }

    #[test]
    fn test_projectiles_always_carry_ability() {
        let mut physics = HeadlessWorld::default();
        let mut sprites = DrawList::new();
        let mut reg = Registry::new();

        let desc = EntityKind::Projectile.body_desc(Vec2::new(300.0, 110.0));
        let id = reg.spawn(EntityKind::Projectile, &desc, None, &mut physics, &mut sprites);
        assert_eq!(reg.get(id).unwrap().ability, Some(AbilityState::armed(AbilityKind::None)));
        assert_eq!(reg.projectile_count(), 1);
    }

    #[test]
    fn test_for_each_visits_in_insertion_order() {
        let mut physics = HeadlessWorld::default();
        let mut sprites = DrawList::new();
        let mut reg = Registry::new();

        let ids: Vec<_> = (0..3).map(|_| spawn_pig(&mut reg, &mut physics, &mut sprites)).collect();
        let mut seen = Vec::new();
        reg.for_each(|o| seen.push(o.id));
        assert_eq!(seen, ids);
    }
}
