//! Level layouts and progression
//!
//! Each level is a background, a row of columns, a row of pigs and the score
//! needed to move on. Advancing tears the whole world down and builds the
//! next layout from scratch.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::EntityKind;
use super::launch::LaunchPoint;
use super::state::GameState;
use crate::consts::{COLUMN_Y, LAUNCH_X, LAUNCH_Y, PIG_Y};
use crate::error::{LoadError, read_file};
use crate::physics::PhysicsWorld;
use crate::renderer::SpriteList;
use crate::tuning::Tuning;

/// Column orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

impl Orientation {
    fn kind(self) -> EntityKind {
        match self {
            Orientation::Vertical => EntityKind::ColumnVertical,
            Orientation::Horizontal => EntityKind::ColumnHorizontal,
        }
    }
}

/// A row of evenly spaced columns
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub start_x: f32,
    pub spacing: f32,
    pub count: u32,
    #[serde(default)]
    pub orientation: Orientation,
}

/// A row of evenly spaced pigs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PigSpec {
    pub start_x: f32,
    pub spacing: f32,
    pub count: u32,
}

/// One level's layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelLayout {
    pub background: String,
    pub columns: ColumnSpec,
    pub pigs: PigSpec,
    /// Score needed to advance (`None` never advances)
    #[serde(default)]
    pub threshold: Option<u64>,
}

impl LevelLayout {
    /// Column centers, left to right
    pub fn column_positions(&self) -> impl Iterator<Item = Vec2> + '_ {
        let c = self.columns;
        (0..c.count).map(move |i| Vec2::new(c.start_x + i as f32 * c.spacing, COLUMN_Y))
    }

    /// Pig centers, left to right
    pub fn pig_positions(&self) -> impl Iterator<Item = Vec2> + '_ {
        let p = self.pigs;
        (0..p.count).map(move |i| Vec2::new(p.start_x + i as f32 * p.spacing, PIG_Y))
    }
}

/// Ordered level layouts, indexed from level 1
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelSet {
    levels: Vec<LevelLayout>,
}

impl Default for LevelSet {
    fn default() -> Self {
        Self::builtin()
    }
}

impl LevelSet {
    /// The three stock levels
    pub fn builtin() -> Self {
        let vertical = |start_x, spacing, count| ColumnSpec {
            start_x,
            spacing,
            count,
            orientation: Orientation::Vertical,
        };
        let pigs = |start_x, spacing, count| PigSpec {
            start_x,
            spacing,
            count,
        };
        Self {
            levels: vec![
                LevelLayout {
                    background: "background31".into(),
                    columns: vertical(600.0, 120.0, 1),
                    pigs: pigs(600.0, 50.0, 6),
                    threshold: Some(400),
                },
                LevelLayout {
                    background: "background32".into(),
                    columns: vertical(500.0, 60.0, 15),
                    pigs: pigs(550.0, 55.0, 5),
                    threshold: Some(700),
                },
                LevelLayout {
                    background: "background33".into(),
                    columns: vertical(500.0, 60.0, 15),
                    pigs: pigs(550.0, 55.0, 15),
                    threshold: None,
                },
            ],
        }
    }

    pub fn new(levels: Vec<LevelLayout>) -> Result<Self, LoadError> {
        let set = Self { levels };
        set.validate()?;
        Ok(set)
    }

    /// Parse a JSON array of layouts
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let set: LevelSet = serde_json::from_str(json)?;
        set.validate()?;
        Ok(set)
    }

    /// Load layouts from a JSON file
    pub fn load_file(path: &Path) -> Result<Self, LoadError> {
        let set = Self::from_json(&read_file(path)?)?;
        log::info!("Loaded {} levels from {}", set.len(), path.display());
        Ok(set)
    }

    fn validate(&self) -> Result<(), LoadError> {
        if self.levels.is_empty() {
            return Err(LoadError::Invalid("level set is empty".into()));
        }
        for (i, layout) in self.levels.iter().enumerate() {
            if layout.columns.spacing < 0.0 || layout.pigs.spacing < 0.0 {
                return Err(LoadError::Invalid(format!("level {} has negative spacing", i + 1)));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Layout of a 1-based level
    pub fn get(&self, level: u32) -> Option<&LevelLayout> {
        let idx = (level as usize).checked_sub(1)?;
        self.levels.get(idx)
    }

    /// Score needed to leave `level`; the last level never advances
    pub fn threshold(&self, level: u32) -> Option<u64> {
        if self.is_final(level) {
            return None;
        }
        self.get(level).and_then(|l| l.threshold)
    }

    pub fn is_final(&self, level: u32) -> bool {
        level as usize >= self.levels.len()
    }
}

/// Build the world for `state.level`: clear the registry, reset the gesture,
/// recreate the launch point and place the layout's targets
///
/// Returns the number of targets spawned.
pub fn setup_level(
    state: &mut GameState,
    levels: &LevelSet,
    physics: &mut dyn PhysicsWorld,
    sprites: &mut dyn SpriteList,
) -> usize {
    let cleared = state.registry.clear(physics, sprites);
    state.launch.reset();
    if let Some(old) = state.launch_point.take() {
        old.despawn(sprites);
    }
    state.launch_point = Some(LaunchPoint::spawn(Vec2::new(LAUNCH_X, LAUNCH_Y), sprites));

    let Some(layout) = levels.get(state.level) else {
        log::warn!("No layout for level {}, world left empty", state.level);
        return 0;
    };

    state.background.clone_from(&layout.background);
    sprites.set_background(&layout.background);

    let column_kind = layout.columns.orientation.kind();
    for pos in layout.column_positions() {
        let desc = column_kind.body_desc(pos);
        state.registry.spawn(column_kind, &desc, None, physics, sprites);
    }
    for pos in layout.pig_positions() {
        let desc = EntityKind::Pig.body_desc(pos);
        state.registry.spawn(EntityKind::Pig, &desc, None, physics, sprites);
    }

    let spawned = state.registry.len();
    log::info!(
        "Level {} set up: {} columns, {} pigs on {} ({} objects cleared)",
        state.level,
        layout.columns.count,
        layout.pigs.count,
        layout.background,
        cleared
    );
    spawned
}

/// Advance at most one level when the score has reached the current
/// threshold. Returns whether a transition happened.
pub fn check_level_up(
    state: &mut GameState,
    levels: &LevelSet,
    physics: &mut dyn PhysicsWorld,
    sprites: &mut dyn SpriteList,
    tuning: &Tuning,
) -> bool {
    let Some(threshold) = levels.threshold(state.level) else {
        return false;
    };
    if state.score < threshold {
        return false;
    }

    state.level += 1;
    log::info!("Level {} reached (score {})", state.level, state.score);
    if tuning.reset_score_on_level {
        state.score = 0;
    }
    setup_level(state, levels, physics, sprites);
    true
}
