//! Fixed timestep frame driver
//!
//! `Game` owns the state and both collaborators and runs one simulation step
//! per `tick`, in a fixed order:
//! physics step, contact policy, culling, cooldown, level check, sprite sync.

use glam::Vec2;

use super::ability::{AbilityOutcome, select_ability, trigger_ability};
use super::collision::resolve_contacts;
use super::entity::EntityId;
use super::launch::Release;
use super::level::{LevelSet, check_level_up, setup_level};
use super::state::GameState;
use crate::consts::*;
use crate::physics::PhysicsWorld;
use crate::platform::{InputEvent, MouseButton};
use crate::renderer::SpriteList;
use crate::tuning::Tuning;

/// Aim line thickness
const AIM_LINE_WIDTH: f32 = 3.0;

/// What one tick did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Contacts reported by the physics step
    pub contacts: usize,
    /// Points scored this tick
    pub points: u64,
    /// Projectiles removed for leaving the world
    pub culled: usize,
    /// A level transition happened
    pub level_up: bool,
}

/// What one input event did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputOutcome {
    Ignored,
    AimStarted,
    Aimed,
    Released(Release),
    Ability(AbilityOutcome),
    AbilitySelected,
}

/// Game state plus the physics and sprite collaborators
pub struct Game<P: PhysicsWorld, S: SpriteList> {
    state: GameState,
    physics: P,
    sprites: S,
    tuning: Tuning,
    levels: LevelSet,
}

impl<P: PhysicsWorld, S: SpriteList> Game<P, S> {
    /// Build level 1
    pub fn new(physics: P, sprites: S, tuning: Tuning, levels: LevelSet) -> Self {
        let mut game = Self {
            state: GameState::new(),
            physics,
            sprites,
            tuning,
            levels,
        };
        setup_level(
            &mut game.state,
            &game.levels,
            &mut game.physics,
            &mut game.sprites,
        );
        game
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn physics(&self) -> &P {
        &self.physics
    }

    pub fn sprites(&self) -> &S {
        &self.sprites
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn levels(&self) -> &LevelSet {
        &self.levels
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn level(&self) -> u32 {
        self.state.level
    }

    /// World position of a tracked object
    pub fn position(&self, id: EntityId) -> Option<Vec2> {
        self.state.registry.position(id, &self.physics)
    }

    /// Apply one input event
    pub fn handle_input(&mut self, event: InputEvent) -> InputOutcome {
        match event {
            InputEvent::Press {
                button: MouseButton::Left,
                pos,
            } => self.press(pos),
            InputEvent::Drag {
                button: MouseButton::Left,
                pos,
            } => {
                if !self.state.launch.is_aiming() {
                    return InputOutcome::Ignored;
                }
                self.state.launch.drag(pos, &self.tuning);
                InputOutcome::Aimed
            }
            InputEvent::Release {
                button: MouseButton::Left,
                ..
            } => {
                let release = self.state.launch.release(
                    self.state.next_ability,
                    &mut self.state.registry,
                    &mut self.physics,
                    &mut self.sprites,
                    &self.tuning,
                );
                match release {
                    Release::NotAiming => InputOutcome::Ignored,
                    other => InputOutcome::Released(other),
                }
            }
            InputEvent::Key(key) => {
                select_ability(&mut self.state, key.ability());
                InputOutcome::AbilitySelected
            }
            _ => InputOutcome::Ignored,
        }
    }

    /// Left press: on the launch point starts aiming, anywhere else fires the
    /// first ready ability
    fn press(&mut self, pos: Vec2) -> InputOutcome {
        let on_launch_point = self
            .state
            .launch_point
            .is_some_and(|lp| lp.hit(pos, &self.sprites));

        if on_launch_point {
            let Some(lp) = self.state.launch_point else {
                return InputOutcome::Ignored;
            };
            return if self.state.launch.begin(pos, &lp, &self.sprites) {
                InputOutcome::AimStarted
            } else {
                InputOutcome::Ignored
            };
        }

        match trigger_ability(
            &mut self.state,
            &mut self.physics,
            &mut self.sprites,
            &self.tuning,
        ) {
            Some(outcome) => InputOutcome::Ability(outcome),
            None => InputOutcome::Ignored,
        }
    }

    /// Advance the simulation by one fixed step
    pub fn tick(&mut self, dt: f32) -> TickReport {
        let mut report = TickReport::default();
        self.state.time_ticks += 1;

        // Contacts are resolved before anything else reads the registry
        let contacts = self.physics.step(dt);
        report.contacts = contacts.len();
        report.points = resolve_contacts(
            &mut self.state,
            &contacts,
            &mut self.physics,
            &mut self.sprites,
            &self.tuning,
        );

        report.culled = self.cull_projectiles();
        self.state.launch.tick();

        report.level_up = check_level_up(
            &mut self.state,
            &self.levels,
            &mut self.physics,
            &mut self.sprites,
            &self.tuning,
        );

        self.state
            .registry
            .sync_sprites(&self.physics, &mut self.sprites);
        report
    }

    /// Remove projectiles that have left the world
    fn cull_projectiles(&mut self) -> usize {
        let margin = self.tuning.cull_margin;
        let out_of_bounds = |p: Vec2| {
            p.x < -margin || p.x > WORLD_WIDTH + margin || p.y < FLOOR_Y - margin
        };

        let gone: Vec<EntityId> = self
            .state
            .registry
            .iter()
            .filter(|o| o.kind.is_projectile())
            .filter(|o| {
                self.physics
                    .pose(o.body)
                    .is_some_and(|pose| out_of_bounds(pose.position))
            })
            .map(|o| o.id)
            .collect();

        for &id in &gone {
            self.state
                .registry
                .remove(id, &mut self.physics, &mut self.sprites);
        }
        if !gone.is_empty() {
            log::debug!("Culled {} projectiles", gone.len());
        }
        gone.len()
    }

    /// Queue the overlay and draw the frame
    pub fn draw(&mut self) {
        if let Some((from, to)) = self.state.launch.aim_line() {
            self.sprites.draw_line(from, to, AIM_LINE_WIDTH);
        }
        let text = format!("Score: {}   Level: {}", self.state.score, self.state.level);
        self.sprites
            .draw_text(&text, Vec2::new(20.0, WORLD_HEIGHT - 30.0));
        self.sprites.draw();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::HeadlessWorld;
    use crate::platform::AbilityKey;
    use crate::renderer::{DrawCommand, DrawList};
    use crate::sim::entity::{AbilityKind, EntityKind};
    use crate::sim::launch::LaunchState;

    fn game() -> Game<HeadlessWorld, DrawList> {
        Game::new(
            HeadlessWorld::default(),
            DrawList::new(),
            Tuning::default(),
            LevelSet::builtin(),
        )
    }

    fn press(pos: Vec2) -> InputEvent {
        InputEvent::Press {
            button: MouseButton::Left,
            pos,
        }
    }

    fn drag(pos: Vec2) -> InputEvent {
        InputEvent::Drag {
            button: MouseButton::Left,
            pos,
        }
    }

    fn release(pos: Vec2) -> InputEvent {
        InputEvent::Release {
            button: MouseButton::Left,
            pos,
        }
    }

    fn launch(game: &mut Game<HeadlessWorld, DrawList>, to: Vec2) -> InputOutcome {
        let anchor = Vec2::new(LAUNCH_X, LAUNCH_Y);
        game.handle_input(press(anchor));
        game.handle_input(drag(to));
        game.handle_input(release(to))
    }

    #[test]
    fn test_new_builds_level_one() {
        let game = game();
        assert_eq!(game.level(), 1);
        assert_eq!(game.score(), 0);
        assert_eq!(game.state().registry.count_kind(EntityKind::Pig), 6);
        assert!(game.state().launch_point.is_some());
    }

    #[test]
    fn test_press_drag_release_launches() {
        let mut game = game();
        let anchor = Vec2::new(LAUNCH_X, LAUNCH_Y);
        assert_eq!(game.handle_input(press(anchor)), InputOutcome::AimStarted);
        assert_eq!(game.handle_input(drag(anchor + Vec2::new(-500.0, 0.0))), InputOutcome::Aimed);

        // Drag is clamped
        let LaunchState::Aiming { current, .. } = game.state().launch.state() else {
            panic!("expected aiming");
        };
        assert!((current - anchor).length() <= 150.0 + 1e-3);

        let outcome = game.handle_input(release(current));
        assert!(matches!(outcome, InputOutcome::Released(Release::Launched { .. })));
        assert_eq!(game.state().projectile_count(), 1);
    }

    #[test]
    fn test_short_release_cancels() {
        let mut game = game();
        let outcome = launch(&mut game, Vec2::new(LAUNCH_X - 5.0, LAUNCH_Y));
        assert_eq!(outcome, InputOutcome::Released(Release::Cancelled));
        assert_eq!(game.state().projectile_count(), 0);
    }

    #[test]
    fn test_other_buttons_ignored() {
        let mut game = game();
        let outcome = game.handle_input(InputEvent::Press {
            button: MouseButton::Right,
            pos: Vec2::new(LAUNCH_X, LAUNCH_Y),
        });
        assert_eq!(outcome, InputOutcome::Ignored);
        assert!(!game.state().launch.is_aiming());
    }

    #[test]
    fn test_key_then_press_elsewhere_triggers_ability() {
        let mut game = game();
        game.handle_input(InputEvent::Key(AbilityKey::Split));
        assert_eq!(game.state().next_ability, AbilityKind::Split);

        launch(&mut game, Vec2::new(200.0, 60.0));
        game.tick(SIM_DT);
        let outcome = game.handle_input(press(Vec2::new(1000.0, 600.0)));
        assert!(matches!(outcome, InputOutcome::Ability(AbilityOutcome::Split { .. })));
        assert_eq!(game.state().projectile_count(), 2);
    }

    #[test]
    fn test_press_elsewhere_without_projectiles_is_noop() {
        let mut game = game();
        assert_eq!(game.handle_input(press(Vec2::new(1000.0, 600.0))), InputOutcome::Ignored);
    }

    #[test]
    fn test_tick_advances_time_and_syncs() {
        let mut game = game();
        let report = game.tick(SIM_DT);
        assert!(!report.level_up);
        assert_eq!(game.state().time_ticks, 1);
    }

    #[test]
    fn test_projectiles_leaving_world_are_culled() {
        let mut game = game();
        let desc = EntityKind::Projectile
            .body_desc(Vec2::new(-500.0, 400.0))
            .with_velocity(Vec2::new(-100.0, 0.0));
        let state = &mut game.state;
        state
            .registry
            .spawn(EntityKind::Projectile, &desc, None, &mut game.physics, &mut game.sprites);

        let report = game.tick(SIM_DT);
        assert_eq!(report.culled, 1);
        assert_eq!(game.state().projectile_count(), 0);
    }

    #[test]
    fn test_score_reaching_threshold_advances_one_level() {
        let mut game = game();
        game.state_mut().score = 5000;
        assert!(game.tick(SIM_DT).level_up);
        assert_eq!(game.level(), 2);
        assert!(game.tick(SIM_DT).level_up);
        assert_eq!(game.level(), 3);
        assert!(!game.tick(SIM_DT).level_up);
    }

    #[test]
    fn test_draw_includes_aim_line_and_hud() {
        let mut game = game();
        let anchor = Vec2::new(LAUNCH_X, LAUNCH_Y);
        game.handle_input(press(anchor));
        game.handle_input(drag(anchor + Vec2::new(-60.0, -20.0)));
        game.draw();

        let frame = game.sprites().last_frame();
        assert_eq!(frame[0], DrawCommand::Background("background31".into()));
        assert!(frame.iter().any(|c| matches!(
            c,
            DrawCommand::Line { from, width, .. } if *from == anchor && *width == 3.0
        )));
        assert!(frame.iter().any(|c| matches!(
            c,
            DrawCommand::Text { text, .. } if text.contains("Score: 0") && text.contains("Level: 1")
        )));

        // No aim line once released
        game.handle_input(release(anchor));
        game.draw();
        assert!(!game
            .sprites()
            .last_frame()
            .iter()
            .any(|c| matches!(c, DrawCommand::Line { .. })));
    }
}
