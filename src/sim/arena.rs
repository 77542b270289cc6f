//! Arena loader
//!
//! A level is a 15x15 grid of tile codes. Row `i`, column `j` maps to world
//! position `(4j, -4i)`, so row 0 is the top of the arena.
//!
//! | Code    | Meaning                                          |
//! |---------|--------------------------------------------------|
//! | 0       | empty                                            |
//! | 1       | wall                                             |
//! | 2       | player start                                     |
//! | 3..=6   | enemy, always spawned                            |
//! | 7..=10  | enemy (behaviour `code - 4`), Normal and Hard    |
//! | 11..=13 | enemy (behaviour `code - 8`), Hard only          |

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::{Enemy, EnemyBehavior, EnemyTuning};
use super::entity::{EntityTag, PhysicsWorld};
use crate::consts::*;
use crate::error::ArenaError;
use crate::physics::{BodyDef, BodyHandle, BodyKind, Shape};

/// A 15x15 grid of tile codes
pub type LevelGrid = [[u8; GRID_SIZE]; GRID_SIZE];

pub const CODE_EMPTY: u8 = 0;
pub const CODE_WALL: u8 = 1;
pub const CODE_START: u8 = 2;

/// Enemy spawn gating
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    /// Tier number (1..=3)
    pub fn tier(self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Normal => 2,
            Difficulty::Hard => 3,
        }
    }

    pub fn from_tier(tier: u8) -> Option<Self> {
        match tier {
            1 => Some(Difficulty::Easy),
            2 => Some(Difficulty::Normal),
            3 => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Menu cycling order: Easy -> Normal -> Hard -> Easy
    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Normal,
            Difficulty::Normal => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" | "1" => Ok(Difficulty::Easy),
            "normal" | "2" => Ok(Difficulty::Normal),
            "hard" | "3" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty '{other}' (expected easy, normal or hard)")),
        }
    }
}

/// Enemy behaviour for a tile code if it spawns at this difficulty
pub fn enemy_spawn(code: u8, difficulty: Difficulty) -> Option<EnemyBehavior> {
    match code {
        3..=6 => EnemyBehavior::from_code(code),
        7..=10 if difficulty >= Difficulty::Normal => EnemyBehavior::from_code(code - 4),
        11..=13 if difficulty >= Difficulty::Hard => EnemyBehavior::from_code(code - 8),
        _ => None,
    }
}

/// True for any code that places an enemy at some difficulty
pub fn is_enemy_code(code: u8) -> bool {
    (3..=13).contains(&code)
}

/// Number of enemies a grid spawns at a difficulty
pub fn count_spawns(grid: &LevelGrid, difficulty: Difficulty) -> usize {
    grid.iter()
        .flatten()
        .filter(|&&code| enemy_spawn(code, difficulty).is_some())
        .count()
}

/// World position of a grid cell
pub fn cell_position(row: usize, col: usize) -> Vec2 {
    Vec2::new(TILE_SIZE * col as f32, -TILE_SIZE * row as f32)
}

/// Check a grid for a single start cell and a roster that fits
///
/// The Easy tier spawns at every difficulty and must hold at least one enemy.
pub fn validate_grid(level: u32, grid: &LevelGrid) -> Result<(), ArenaError> {
    let starts = grid.iter().flatten().filter(|&&c| c == CODE_START).count();
    if starts != 1 {
        return Err(ArenaError::StartCell { level, found: starts });
    }
    let enemies = grid.iter().flatten().filter(|&&c| is_enemy_code(c)).count();
    if enemies > MAX_ENEMIES {
        return Err(ArenaError::TooManyEnemies {
            level,
            found: enemies,
            max: MAX_ENEMIES,
        });
    }
    if count_spawns(grid, Difficulty::Easy) == 0 {
        return Err(ArenaError::NoEnemies { level });
    }
    Ok(())
}

/// Built-in campaign
pub const BUILTIN_LEVELS: [LevelGrid; 3] = [
    [
        [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
        [1, 13, 0, 0, 0, 0, 0, 13, 0, 0, 0, 0, 0, 0, 1],
        [1, 2, 0, 0, 0, 0, 0, 3, 0, 0, 0, 1, 0, 10, 1],
        [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 12, 0, 0, 1],
        [1, 5, 0, 0, 0, 0, 0, 9, 0, 0, 0, 1, 0, 0, 1],
        [1, 3, 0, 0, 0, 0, 0, 3, 0, 0, 0, 0, 0, 7, 1],
        [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    ],
    [
        [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
        [1, 2, 0, 0, 0, 13, 0, 5, 0, 0, 0, 0, 0, 9, 1],
        [0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
        [0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 11, 0, 0, 6, 1],
        [0, 0, 0, 1, 3, 0, 0, 0, 0, 0, 0, 0, 0, 12, 1],
        [0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
        [0, 0, 0, 0, 0, 1, 7, 0, 0, 0, 0, 0, 0, 0, 1],
        [0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 10, 1],
        [0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 1],
        [0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1],
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1],
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 1],
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 1],
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 6, 1],
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1],
    ],
    [
        [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
        [1, 4, 0, 0, 0, 5, 0, 0, 0, 3, 0, 0, 0, 10, 1],
        [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 1],
        [1, 0, 0, 0, 12, 0, 0, 0, 8, 0, 5, 0, 0, 6, 1],
        [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
        [1, 4, 0, 0, 0, 0, 0, 0, 6, 0, 0, 0, 0, 0, 1],
        [1, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
        [1, 0, 0, 0, 0, 0, 5, 9, 0, 0, 0, 0, 0, 0, 1],
        [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
        [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
        [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 1],
        [1, 12, 0, 0, 1, 13, 0, 0, 3, 0, 0, 0, 0, 0, 1],
        [1, 1, 0, 0, 3, 0, 0, 0, 1, 0, 0, 0, 0, 10, 1],
        [1, 2, 0, 0, 1, 7, 0, 0, 0, 7, 0, 3, 0, 0, 1],
        [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    ],
];

/// A set of levels played in order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelPack {
    pub levels: Vec<LevelGrid>,
}

impl Default for LevelPack {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Level pack as written on disk (rows of any length, checked on load)
#[derive(Debug, Deserialize)]
struct RawLevelPack {
    levels: Vec<Vec<Vec<u8>>>,
}

impl LevelPack {
    pub fn builtin() -> Self {
        Self {
            levels: BUILTIN_LEVELS.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Check that the pack is non-empty and every grid is playable
    pub fn validate(&self) -> Result<(), ArenaError> {
        if self.levels.is_empty() {
            return Err(ArenaError::EmptyPack);
        }
        for (index, grid) in self.levels.iter().enumerate() {
            validate_grid(index as u32 + 1, grid)?;
        }
        Ok(())
    }

    /// Grid for a 1-based level number
    pub fn grid(&self, level: u32) -> Result<&LevelGrid, ArenaError> {
        level
            .checked_sub(1)
            .and_then(|i| self.levels.get(i as usize))
            .ok_or(ArenaError::UnknownLevel(level, self.levels.len()))
    }

    /// Parse and validate a JSON level pack: `{ "levels": [[[u8; 15]; 15], ...] }`
    pub fn from_json(json: &str) -> Result<Self, ArenaError> {
        let raw: RawLevelPack = serde_json::from_str(json)?;
        if raw.levels.is_empty() {
            return Err(ArenaError::EmptyPack);
        }

        let mut levels = Vec::with_capacity(raw.levels.len());
        for (index, rows) in raw.levels.iter().enumerate() {
            let level = index as u32 + 1;
            if rows.len() != GRID_SIZE {
                return Err(ArenaError::RowCount {
                    level,
                    expected: GRID_SIZE,
                    found: rows.len(),
                });
            }
            let mut grid: LevelGrid = [[CODE_EMPTY; GRID_SIZE]; GRID_SIZE];
            for (row, cells) in rows.iter().enumerate() {
                if cells.len() != GRID_SIZE {
                    return Err(ArenaError::ColumnCount {
                        level,
                        row,
                        expected: GRID_SIZE,
                        found: cells.len(),
                    });
                }
                grid[row].copy_from_slice(cells);
            }
            validate_grid(level, &grid)?;
            levels.push(grid);
        }

        log::info!("Loaded level pack with {} levels", levels.len());
        Ok(Self { levels })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ArenaError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

/// One decoded grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TileCell {
    pub code: u8,
    /// Wall body, only for code 1
    pub body: Option<BodyHandle>,
}

/// A loaded level: walls, start position and enemy roster
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Arena {
    pub level: u32,
    pub difficulty: Difficulty,
    cells: Vec<TileCell>,
    start_position: Vec2,
    pub enemies: Vec<Enemy>,
    enemies_alive: usize,
}

impl Arena {
    /// Build every body for a grid into the world
    pub fn load(
        world: &mut PhysicsWorld,
        grid: &LevelGrid,
        level: u32,
        difficulty: Difficulty,
        tuning: EnemyTuning,
    ) -> Self {
        let mut cells = vec![TileCell::default(); GRID_SIZE * GRID_SIZE];
        let mut start_position = None;
        let mut enemies = Vec::new();

        for (i, row) in grid.iter().enumerate() {
            for (j, &code) in row.iter().enumerate() {
                let pos = cell_position(i, j);
                let cell = &mut cells[i * GRID_SIZE + j];
                cell.code = code;

                match code {
                    CODE_EMPTY => {}
                    CODE_WALL => {
                        cell.body = Some(world.create_body(BodyDef::new(
                            BodyKind::Static,
                            pos,
                            Shape::square(TILE_HALF_SIZE),
                            EntityTag::tile(),
                        )));
                    }
                    CODE_START => {
                        if start_position.is_some() {
                            log::warn!("Level {level}: extra start cell at ({i}, {j}) ignored");
                        } else {
                            start_position = Some(pos);
                        }
                    }
                    code if is_enemy_code(code) => {
                        let Some(behavior) = enemy_spawn(code, difficulty) else {
                            continue;
                        };
                        if enemies.len() >= MAX_ENEMIES {
                            log::warn!("Level {level}: enemy roster full, skipping ({i}, {j})");
                            continue;
                        }
                        let id = enemies.len() as u32;
                        enemies.push(Enemy::new(world, id, behavior, pos, tuning));
                    }
                    other => {
                        log::warn!("Level {level}: unknown tile code {other} at ({i}, {j})");
                    }
                }
            }
        }

        let start_position = start_position.unwrap_or_else(|| {
            log::warn!("Level {level}: no start cell, using origin");
            Vec2::ZERO
        });

        let enemies_alive = enemies.len();
        log::info!(
            "Loaded level {} ({}): {} walls, {} enemies",
            level,
            difficulty.as_str(),
            cells.iter().filter(|c| c.body.is_some()).count(),
            enemies_alive
        );

        Self {
            level,
            difficulty,
            cells,
            start_position,
            enemies,
            enemies_alive,
        }
    }

    /// Load a level from a pack
    pub fn load_level(
        world: &mut PhysicsWorld,
        pack: &LevelPack,
        level: u32,
        difficulty: Difficulty,
        tuning: EnemyTuning,
    ) -> Result<Self, ArenaError> {
        let grid = pack.grid(level)?;
        Ok(Self::load(world, grid, level, difficulty, tuning))
    }

    /// Destroy every body this arena created
    pub fn teardown(self, world: &mut PhysicsWorld) {
        for cell in &self.cells {
            if let Some(body) = cell.body {
                world.destroy_body(body);
            }
        }
        for enemy in self.enemies {
            enemy.destroy(world);
        }
    }

    pub fn start_position(&self) -> Vec2 {
        self.start_position
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&TileCell> {
        if row >= GRID_SIZE || col >= GRID_SIZE {
            return None;
        }
        self.cells.get(row * GRID_SIZE + col)
    }

    pub fn enemy_count(&self) -> usize {
        self.enemies.len()
    }

    pub fn enemies_alive(&self) -> usize {
        self.enemies_alive
    }

    pub fn enemy_mut(&mut self, id: u32) -> Option<&mut Enemy> {
        self.enemies.get_mut(id as usize)
    }

    /// Kill an enemy by roster id. Returns the remaining count, or None if
    /// the enemy was unknown or already dead.
    pub fn kill_enemy(&mut self, world: &mut PhysicsWorld, id: u32) -> Option<usize> {
        let enemy = self.enemies.get_mut(id as usize)?;
        if !enemy.is_alive() {
            return None;
        }
        enemy.kill(world);
        self.enemies_alive = self.enemies_alive.saturating_sub(1);
        Some(self.enemies_alive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> PhysicsWorld {
        PhysicsWorld::new(Vec2::new(0.0, -GRAVITY))
    }

    fn small_grid() -> LevelGrid {
        let mut grid = [[CODE_EMPTY; GRID_SIZE]; GRID_SIZE];
        grid[0][0] = CODE_WALL;
        grid[0][1] = CODE_WALL;
        grid[1][0] = CODE_START;
        grid[1][2] = 3;
        grid[1][3] = 8;
        grid[1][4] = 12;
        grid
    }

    #[test]
    fn test_spawn_gating() {
        assert_eq!(enemy_spawn(3, Difficulty::Easy), Some(EnemyBehavior::Floor));
        assert_eq!(enemy_spawn(7, Difficulty::Easy), None);
        assert_eq!(enemy_spawn(7, Difficulty::Normal), Some(EnemyBehavior::Floor));
        assert_eq!(enemy_spawn(10, Difficulty::Hard), Some(EnemyBehavior::LeftWall));
        assert_eq!(enemy_spawn(11, Difficulty::Normal), None);
        assert_eq!(enemy_spawn(13, Difficulty::Hard), Some(EnemyBehavior::Ceiling));
        assert_eq!(enemy_spawn(14, Difficulty::Hard), None);
    }

    #[test]
    fn test_builtin_enemy_counts() {
        let expected = [[4, 7, 10], [4, 7, 10], [11, 17, 20]];
        for (grid, counts) in BUILTIN_LEVELS.iter().zip(expected) {
            assert_eq!(count_spawns(grid, Difficulty::Easy), counts[0]);
            assert_eq!(count_spawns(grid, Difficulty::Normal), counts[1]);
            assert_eq!(count_spawns(grid, Difficulty::Hard), counts[2]);
        }
    }

    #[test]
    fn test_builtin_levels_are_valid() {
        for (i, grid) in BUILTIN_LEVELS.iter().enumerate() {
            assert!(validate_grid(i as u32 + 1, grid).is_ok());
        }
    }

    #[test]
    fn test_load_places_cells() {
        let mut world = world();
        let arena = Arena::load(
            &mut world,
            &small_grid(),
            1,
            Difficulty::Normal,
            EnemyTuning::default(),
        );

        assert_eq!(arena.start_position(), Vec2::new(0.0, -4.0));
        assert!(arena.cell(0, 1).and_then(|c| c.body).is_some());
        let wall = arena.cell(0, 1).and_then(|c| c.body).unwrap();
        assert_eq!(world.position(wall), Some(Vec2::new(4.0, 0.0)));
        assert!(arena.cell(1, 0).and_then(|c| c.body).is_none());
        assert!(arena.cell(15, 0).is_none());

        // Codes 3 and 8 spawn at Normal, 12 does not
        assert_eq!(arena.enemy_count(), 2);
        assert_eq!(arena.enemies[1].behavior, EnemyBehavior::RightWall);
        assert_eq!(arena.enemies[1].position(&world), Vec2::new(12.0, -4.0));
    }

    #[test]
    fn test_teardown_removes_all_bodies() {
        let mut world = world();
        let arena = Arena::load(
            &mut world,
            &BUILTIN_LEVELS[2],
            3,
            Difficulty::Hard,
            EnemyTuning::default(),
        );
        assert!(world.body_count() > 0);
        arena.teardown(&mut world);
        assert_eq!(world.body_count(), 0);
    }

    #[test]
    fn test_load_is_deterministic() {
        let mut w1 = world();
        let mut w2 = world();
        let tuning = EnemyTuning::default();
        let a = Arena::load(&mut w1, &BUILTIN_LEVELS[0], 1, Difficulty::Hard, tuning);
        let b = Arena::load(&mut w2, &BUILTIN_LEVELS[0], 1, Difficulty::Hard, tuning);
        assert_eq!(a.enemy_count(), b.enemy_count());
        for (x, y) in a.enemies.iter().zip(&b.enemies) {
            assert_eq!(x.position(&w1), y.position(&w2));
            assert_eq!(x.behavior, y.behavior);
        }
    }

    #[test]
    fn test_kill_enemy_counts_down_once() {
        let mut world = world();
        let mut arena = Arena::load(
            &mut world,
            &small_grid(),
            1,
            Difficulty::Easy,
            EnemyTuning::default(),
        );
        assert_eq!(arena.enemies_alive(), 1);
        assert_eq!(arena.kill_enemy(&mut world, 0), Some(0));
        assert_eq!(arena.kill_enemy(&mut world, 0), None);
        assert_eq!(arena.kill_enemy(&mut world, 9), None);
        assert_eq!(arena.enemies_alive(), 0);
    }

    #[test]
    fn test_pack_rejects_bad_dimensions() {
        let err = LevelPack::from_json(r#"{"levels": [[[0, 1]]]}"#).unwrap_err();
        assert!(matches!(err, ArenaError::RowCount { level: 1, found: 1, .. }));

        let mut rows = vec![vec![0u8; GRID_SIZE]; GRID_SIZE];
        rows[3] = vec![0; 4];
        let json = serde_json::json!({ "levels": [rows] }).to_string();
        let err = LevelPack::from_json(&json).unwrap_err();
        assert!(matches!(err, ArenaError::ColumnCount { row: 3, found: 4, .. }));
    }

    #[test]
    fn test_pack_rejects_start_and_roster_errors() {
        let rows = vec![vec![0u8; GRID_SIZE]; GRID_SIZE];
        let json = serde_json::json!({ "levels": [rows] }).to_string();
        assert!(matches!(
            LevelPack::from_json(&json),
            Err(ArenaError::StartCell { found: 0, .. })
        ));

        let mut rows = vec![vec![3u8; GRID_SIZE]; GRID_SIZE];
        rows[0][0] = CODE_START;
        let json = serde_json::json!({ "levels": [rows] }).to_string();
        assert!(matches!(
            LevelPack::from_json(&json),
            Err(ArenaError::TooManyEnemies { max: MAX_ENEMIES, .. })
        ));

        // Start cell but only Hard-tier enemies: nothing to kill at Easy
        let mut rows = vec![vec![0u8; GRID_SIZE]; GRID_SIZE];
        rows[0][0] = CODE_START;
        rows[3][3] = 11;
        let json = serde_json::json!({ "levels": [rows] }).to_string();
        assert!(matches!(
            LevelPack::from_json(&json),
            Err(ArenaError::NoEnemies { level: 1 })
        ));

        assert!(matches!(
            LevelPack::from_json(r#"{"levels": []}"#),
            Err(ArenaError::EmptyPack)
        ));
        assert!(matches!(LevelPack::from_json("not json"), Err(ArenaError::Json(_))));
    }

    #[test]
    fn test_validate_checks_every_level() {
        assert!(LevelPack::builtin().validate().is_ok());

        let mut empty_level: LevelGrid = [[CODE_EMPTY; GRID_SIZE]; GRID_SIZE];
        empty_level[1][1] = CODE_START;
        let pack = LevelPack {
            levels: vec![BUILTIN_LEVELS[0], empty_level],
        };
        assert!(matches!(pack.validate(), Err(ArenaError::NoEnemies { level: 2 })));
        assert!(matches!(
            LevelPack { levels: Vec::new() }.validate(),
            Err(ArenaError::EmptyPack)
        ));
    }

    #[test]
    fn test_pack_accepts_builtin_json() {
        let json = serde_json::to_string(&LevelPack::builtin()).unwrap();
        let pack = LevelPack::from_json(&json).unwrap();
        assert_eq!(pack, LevelPack::builtin());
        assert!(pack.grid(0).is_err());
        assert!(pack.grid(3).is_ok());
        assert!(matches!(pack.grid(4), Err(ArenaError::UnknownLevel(4, 3))));
    }

    #[test]
    fn test_difficulty_cycle_and_parse() {
        assert_eq!(Difficulty::Easy.next(), Difficulty::Normal);
        assert_eq!(Difficulty::Hard.next(), Difficulty::Easy);
        assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!("2".parse::<Difficulty>(), Ok(Difficulty::Normal));
        assert!("extreme".parse::<Difficulty>().is_err());
        assert_eq!(Difficulty::from_tier(3), Some(Difficulty::Hard));
    }
}
