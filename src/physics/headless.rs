//! Headless physics backend
//!
//! A small impulse solver good enough to drive the game without a real engine:
//! semi-implicit Euler, circles and axis-aligned boxes, one normal impulse per
//! touching pair per step, no rotation. Used by the native driver and tests.

use glam::Vec2;

use super::{BodyDesc, BodyHandle, ContactEvent, PhysicsWorld, Pose, Shape};
use crate::consts::{FLOOR_Y, GRAVITY, WORLD_WIDTH};

/// Fraction of penetration removed per step
const POSITION_CORRECTION: f32 = 0.8;
/// Penetration allowed before correcting (keeps resting contacts touching)
const PENETRATION_SLOP: f32 = 0.05;
/// Floor slab thickness
const FLOOR_THICKNESS: f32 = 40.0;

#[derive(Debug, Clone, Copy)]
struct Body {
    handle: BodyHandle,
    pos: Vec2,
    vel: Vec2,
    angle: f32,
    shape: Shape,
    inv_mass: f32,
    friction: f32,
    elasticity: f32,
}

impl Body {
    fn is_static(&self) -> bool {
        self.inv_mass == 0.0
    }
}

/// Result of a narrow-phase check between two bodies
#[derive(Debug, Clone, Copy)]
struct Manifold {
    /// Unit normal pointing from the first body to the second
    normal: Vec2,
    penetration: f32,
}

/// Self-contained physics space with gravity and a static floor
#[derive(Debug, Clone)]
pub struct HeadlessWorld {
    gravity: Vec2,
    bodies: Vec<Body>,
    floor: BodyHandle,
    next_handle: u32,
}

impl Default for HeadlessWorld {
    fn default() -> Self {
        Self::new(Vec2::new(0.0, GRAVITY), FLOOR_Y, WORLD_WIDTH)
    }
}

impl HeadlessWorld {
    /// Create a space with the given gravity and a floor whose top surface is
    /// at `floor_y`, spanning `[0, width]`
    pub fn new(gravity: Vec2, floor_y: f32, width: f32) -> Self {
        let mut world = Self {
            gravity,
            bodies: Vec::new(),
            floor: BodyHandle(0),
            next_handle: 0,
        };
        let floor_desc = BodyDesc::new(
            Vec2::new(width / 2.0, floor_y - FLOOR_THICKNESS / 2.0),
            Shape::Box {
                half_extents: Vec2::new(width / 2.0, FLOOR_THICKNESS / 2.0),
            },
            0.0,
        )
        .with_material(10.0, 0.0);
        world.floor = world.add_body(&floor_desc);
        world
    }

    /// Handle of the static floor
    pub fn floor(&self) -> BodyHandle {
        self.floor
    }

    /// Number of registered bodies, floor included
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    fn index_of(&self, handle: BodyHandle) -> Option<usize> {
        self.bodies.iter().position(|b| b.handle == handle)
    }

    /// Resolve one pair; returns the applied normal impulse when touching
    fn solve_pair(a: &mut Body, b: &mut Body) -> Option<f32> {
        let m = collide(a, b)?;
        let inv_sum = a.inv_mass + b.inv_mass;
        if inv_sum == 0.0 {
            return None;
        }

        // Normal impulse, only when approaching
        let rel_vel = b.vel - a.vel;
        let vn = rel_vel.dot(m.normal);
        let mut j = 0.0;
        if vn < 0.0 {
            let e = a.elasticity.min(b.elasticity);
            j = -(1.0 + e) * vn / inv_sum;
            a.vel -= m.normal * (j * a.inv_mass);
            b.vel += m.normal * (j * b.inv_mass);

            // Coulomb friction along the tangent
            let tangent = Vec2::new(-m.normal.y, m.normal.x);
            let vt = (b.vel - a.vel).dot(tangent);
            let mu = (a.friction * b.friction).sqrt();
            let jt = (-vt / inv_sum).clamp(-mu * j, mu * j);
            a.vel -= tangent * (jt * a.inv_mass);
            b.vel += tangent * (jt * b.inv_mass);
        }

        // Push apart
        let correction = (m.penetration - PENETRATION_SLOP).max(0.0) / inv_sum * POSITION_CORRECTION;
        a.pos -= m.normal * (correction * a.inv_mass);
        b.pos += m.normal * (correction * b.inv_mass);

        Some(j)
    }
}

impl PhysicsWorld for HeadlessWorld {
    fn add_body(&mut self, desc: &BodyDesc) -> BodyHandle {
        let handle = BodyHandle(self.next_handle);
        self.next_handle += 1;
        let inv_mass = if desc.mass > 0.0 { 1.0 / desc.mass } else { 0.0 };
        self.bodies.push(Body {
            handle,
            pos: desc.position,
            vel: desc.velocity,
            angle: desc.angle,
            shape: desc.shape,
            inv_mass,
            friction: desc.friction,
            elasticity: desc.elasticity,
        });
        handle
    }

    fn remove_body(&mut self, handle: BodyHandle) -> bool {
        match self.index_of(handle) {
            Some(idx) => {
                self.bodies.remove(idx);
                true
            }
            None => false,
        }
    }

    fn pose(&self, handle: BodyHandle) -> Option<Pose> {
        self.bodies
            .iter()
            .find(|b| b.handle == handle)
            .map(|b| Pose {
                position: b.pos,
                angle: b.angle,
            })
    }

    fn velocity(&self, handle: BodyHandle) -> Option<Vec2> {
        self.bodies.iter().find(|b| b.handle == handle).map(|b| b.vel)
    }

    fn step(&mut self, dt: f32) -> Vec<ContactEvent> {
        for body in self.bodies.iter_mut().filter(|b| !b.is_static()) {
            body.vel += self.gravity * dt;
            body.pos += body.vel * dt;
        }

        // Pairs in insertion order for stable reports
        let mut contacts = Vec::new();
        for i in 0..self.bodies.len() {
            for j in (i + 1)..self.bodies.len() {
                let (left, right) = self.bodies.split_at_mut(j);
                let a = &mut left[i];
                let b = &mut right[0];
                if a.is_static() && b.is_static() {
                    continue;
                }
                if let Some(impulse) = Self::solve_pair(a, b) {
                    contacts.push(ContactEvent::new(a.handle, b.handle, impulse.abs()));
                }
            }
        }
        contacts
    }
}

/// Narrow phase between two bodies
fn collide(a: &Body, b: &Body) -> Option<Manifold> {
    match (a.shape, b.shape) {
        (Shape::Circle { radius: ra }, Shape::Circle { radius: rb }) => {
            circle_circle(a.pos, ra, b.pos, rb)
        }
        (Shape::Box { half_extents: ha }, Shape::Box { half_extents: hb }) => {
            box_box(a.pos, ha, b.pos, hb)
        }
        (Shape::Circle { radius }, Shape::Box { half_extents }) => {
            circle_box(a.pos, radius, b.pos, half_extents)
        }
        (Shape::Box { half_extents }, Shape::Circle { radius }) => {
            circle_box(b.pos, radius, a.pos, half_extents).map(|m| Manifold {
                normal: -m.normal,
                penetration: m.penetration,
            })
        }
    }
}

fn circle_circle(pa: Vec2, ra: f32, pb: Vec2, rb: f32) -> Option<Manifold> {
    let d = pb - pa;
    let dist = d.length();
    let penetration = ra + rb - dist;
    if penetration <= 0.0 {
        return None;
    }
    let normal = if dist > 1e-6 { d / dist } else { Vec2::Y };
    Some(Manifold { normal, penetration })
}

fn box_box(pa: Vec2, ha: Vec2, pb: Vec2, hb: Vec2) -> Option<Manifold> {
    let d = pb - pa;
    let overlap = ha + hb - d.abs();
    if overlap.x <= 0.0 || overlap.y <= 0.0 {
        return None;
    }
    // Separate along the axis of least overlap
    if overlap.x < overlap.y {
        let sign = if d.x < 0.0 { -1.0 } else { 1.0 };
        Some(Manifold {
            normal: Vec2::new(sign, 0.0),
            penetration: overlap.x,
        })
    } else {
        let sign = if d.y < 0.0 { -1.0 } else { 1.0 };
        Some(Manifold {
            normal: Vec2::new(0.0, sign),
            penetration: overlap.y,
        })
    }
}

/// Circle first, box second; normal points from circle to box
fn circle_box(pc: Vec2, r: f32, pb: Vec2, hb: Vec2) -> Option<Manifold> {
    let closest = pc.clamp(pb - hb, pb + hb);
    let d = closest - pc;
    let dist = d.length();
    if dist > 1e-6 {
        if dist >= r {
            return None;
        }
        return Some(Manifold {
            normal: d / dist,
            penetration: r - dist,
        });
    }
    // Center inside the box: fall back to box-vs-box on the circle's bounds
    box_box(pc, Vec2::splat(r), pb, hb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;

    fn ball(world: &mut HeadlessWorld, pos: Vec2, vel: Vec2, mass: f32) -> BodyHandle {
        let desc = BodyDesc::new(pos, Shape::Circle { radius: 12.0 }, mass)
            .with_velocity(vel)
            .with_material(1.0, 0.8);
        world.add_body(&desc)
    }

    #[test]
    fn test_gravity_pulls_bodies_down() {
        let mut world = HeadlessWorld::default();
        let h = ball(&mut world, Vec2::new(100.0, 400.0), Vec2::ZERO, 5.0);
        world.step(SIM_DT);
        let pose = world.pose(h).unwrap();
        assert!(pose.position.y < 400.0);
        assert!(world.velocity(h).unwrap().y < 0.0);
    }

    #[test]
    fn test_floor_stops_falling_body() {
        let mut world = HeadlessWorld::default();
        let h = ball(&mut world, Vec2::new(100.0, 60.0), Vec2::ZERO, 5.0);
        for _ in 0..240 {
            world.step(SIM_DT);
        }
        let y = world.pose(h).unwrap().position.y;
        assert!(y > FLOOR_Y, "ball sank through the floor: y={y}");
        assert!(y < FLOOR_Y + 14.0);
    }

    #[test]
    fn test_fast_head_on_contact_reports_large_impulse() {
        let mut world = HeadlessWorld::default();
        let a = ball(&mut world, Vec2::new(300.0, 400.0), Vec2::new(800.0, 0.0), 5.0);
        let b = ball(&mut world, Vec2::new(330.0, 400.0), Vec2::ZERO, 2.0);
        let mut best = 0.0f32;
        for _ in 0..3 {
            for contact in world.step(SIM_DT) {
                if contact.involves(a) && contact.involves(b) {
                    best = best.max(contact.impulse);
                }
            }
        }
        assert!(best > 1200.0, "impulse was {best}");
        // Struck body now moves away
        assert!(world.velocity(b).unwrap().x > 0.0);
    }

    #[test]
    fn test_remove_body_is_idempotent() {
        let mut world = HeadlessWorld::default();
        let h = ball(&mut world, Vec2::new(100.0, 400.0), Vec2::ZERO, 5.0);
        assert!(world.remove_body(h));
        assert!(!world.remove_body(h));
        assert!(world.pose(h).is_none());
        assert!(!world.contains(h));
    }

    #[test]
    fn test_box_box_picks_shallow_axis() {
        let m = box_box(Vec2::ZERO, Vec2::new(10.0, 40.0), Vec2::new(18.0, 0.0), Vec2::new(10.0, 40.0))
            .unwrap();
        assert_eq!(m.normal, Vec2::X);
        assert!((m.penetration - 2.0).abs() < 1e-5);
    }
}
