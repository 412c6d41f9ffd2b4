//! End-to-end play over the headless backends

use glam::Vec2;

use slingshot::consts::*;
use slingshot::physics::{HeadlessWorld, PhysicsWorld};
use slingshot::platform::{AbilityKey, InputEvent, MouseButton};
use slingshot::renderer::DrawList;
use slingshot::sim::{
    AbilityOutcome, ColumnSpec, EntityKind, Game, InputOutcome, LevelLayout, LevelSet, Orientation,
    PigSpec, Release,
};
use slingshot::tuning::Tuning;

type HeadlessGame = Game<HeadlessWorld, DrawList>;

const ANCHOR: Vec2 = Vec2::new(LAUNCH_X, LAUNCH_Y);

fn layout(background: &str, pig_x: f32, pigs: u32, threshold: Option<u64>) -> LevelLayout {
    LevelLayout {
        background: background.into(),
        columns: ColumnSpec {
            start_x: 1200.0,
            spacing: 60.0,
            count: 0,
            orientation: Orientation::Vertical,
        },
        pigs: PigSpec {
            start_x: pig_x,
            spacing: 40.0,
            count: pigs,
        },
        threshold,
    }
}

fn shoot(game: &mut HeadlessGame, offset: Vec2) -> InputOutcome {
    game.handle_input(InputEvent::Press {
        button: MouseButton::Left,
        pos: ANCHOR,
    });
    game.handle_input(InputEvent::Drag {
        button: MouseButton::Left,
        pos: ANCHOR + offset,
    });
    game.handle_input(InputEvent::Release {
        button: MouseButton::Left,
        pos: ANCHOR + offset,
    })
}

#[test]
fn test_flat_shot_destroys_pig_and_advances_level() {
    let levels = LevelSet::new(vec![
        layout("near", 420.0, 1, Some(100)),
        layout("far", 900.0, 3, None),
    ])
    .unwrap();
    let mut game = Game::new(
        HeadlessWorld::default(),
        DrawList::new(),
        Tuning::default(),
        levels,
    );
    assert_eq!(game.state().registry.count_kind(EntityKind::Pig), 1);

    let outcome = shoot(&mut game, Vec2::new(-150.0, 0.0));
    assert!(matches!(outcome, InputOutcome::Released(Release::Launched { .. })));

    let mut transitioned = false;
    for _ in 0..30 {
        let report = game.tick(SIM_DT);
        if report.level_up {
            assert_eq!(report.points, 100);
            transitioned = true;
            break;
        }
    }
    assert!(transitioned, "fast projectile should destroy the pig");
    assert_eq!(game.level(), 2);
    assert_eq!(game.score(), 100);
    assert_eq!(game.state().background, "far");
    assert_eq!(game.state().registry.count_kind(EntityKind::Pig), 3);
    assert_eq!(game.state().projectile_count(), 0);
}

#[test]
fn test_projectile_cap_holds_across_play() {
    let mut game = Game::new(
        HeadlessWorld::default(),
        DrawList::new(),
        Tuning::default(),
        LevelSet::builtin(),
    );

    for _ in 0..40 {
        shoot(&mut game, Vec2::new(-20.0, -15.0));
        game.tick(SIM_DT);
        assert!(game.state().projectile_count() <= MAX_BIRDS);
    }

    // Back-to-back releases with no ticks in between stop at the cap
    let mut launched = game.state().projectile_count();
    while launched < MAX_BIRDS {
        assert!(matches!(
            shoot(&mut game, Vec2::new(-20.0, -15.0)),
            InputOutcome::Released(Release::Launched { .. })
        ));
        launched += 1;
    }
    assert!(matches!(
        shoot(&mut game, Vec2::new(-20.0, -15.0)),
        InputOutcome::Released(Release::Dropped(_))
    ));
    assert_eq!(game.state().projectile_count(), MAX_BIRDS);
}

#[test]
fn test_split_shot_via_input_keeps_speed() {
    let mut game = Game::new(
        HeadlessWorld::default(),
        DrawList::new(),
        Tuning::default(),
        LevelSet::builtin(),
    );
    game.handle_input(InputEvent::Key(AbilityKey::Split));
    shoot(&mut game, Vec2::new(-150.0, -100.0));
    game.tick(SIM_DT);

    let bird = game
        .state()
        .registry
        .iter()
        .find(|o| o.kind == EntityKind::Projectile)
        .map(|o| o.body)
        .unwrap();
    let speed = game.physics().velocity(bird).unwrap().length();

    let outcome = game.handle_input(InputEvent::Press {
        button: MouseButton::Left,
        pos: Vec2::new(1500.0, 700.0),
    });
    let InputOutcome::Ability(AbilityOutcome::Split { spawned, .. }) = outcome else {
        panic!("expected a split, got {outcome:?}");
    };
    for id in spawned {
        let body = game.state().registry.get(id).unwrap().body;
        let v = game.physics().velocity(body).unwrap().length();
        assert!((v - speed).abs() < 1e-2);
    }

    // The split products carry a spent ability
    let again = game.handle_input(InputEvent::Press {
        button: MouseButton::Left,
        pos: Vec2::new(1500.0, 700.0),
    });
    assert_eq!(again, InputOutcome::Ignored);
}

#[test]
fn test_settling_level_scores_nothing() {
    let mut game = Game::new(
        HeadlessWorld::default(),
        DrawList::new(),
        Tuning::default(),
        LevelSet::builtin(),
    );
    let targets = game.state().registry.len();
    for _ in 0..180 {
        game.tick(SIM_DT);
    }
    assert_eq!(game.score(), 0);
    assert_eq!(game.level(), 1);
    assert_eq!(game.state().registry.len(), targets);
}

#[test]
fn test_json_configuration_drives_game() {
    let tuning = Tuning::from_json(r#"{ "max_projectiles": 2 }"#).unwrap();
    let levels = LevelSet::from_json(
        r#"[{ "background": "custom",
              "columns": { "start_x": 800, "spacing": 90, "count": 2, "orientation": "Horizontal" },
              "pigs": { "start_x": 800, "spacing": 50, "count": 2 } }]"#,
    )
    .unwrap();
    let mut game = Game::new(HeadlessWorld::default(), DrawList::new(), tuning, levels);
    assert_eq!(game.state().registry.count_kind(EntityKind::ColumnHorizontal), 2);

    for _ in 0..2 {
        assert!(matches!(
            shoot(&mut game, Vec2::new(-50.0, -50.0)),
            InputOutcome::Released(Release::Launched { .. })
        ));
    }
    assert!(matches!(
        shoot(&mut game, Vec2::new(-50.0, -50.0)),
        InputOutcome::Released(Release::Dropped(_))
    ));
}
