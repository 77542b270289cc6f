//! Game state and level flow
//!
//! Everything the simulation needs between frames lives here: the physics
//! world, the camera, the player, the loaded arena and the campaign
//! position.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::Player;
use super::arena::{Arena, BUILTIN_LEVELS, Difficulty, LevelGrid, LevelPack};
use super::camera::{Cardinal, GravityCamera};
use super::entity::PhysicsWorld;
use crate::error::ArenaError;
use crate::settings::Settings;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen: start a level or change difficulty
    #[default]
    Menu,
    Playing,
    Paused,
}

/// Who fired a shot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shooter {
    Player,
    Enemy(u32),
}

/// Things a frontend may want to play a sound for or show on the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    ShotFired { by: Shooter },
    /// Player turned their shot into a blast
    BulletDetonated,
    PlayerHit { health: i32 },
    PlayerDied,
    EnemyDestroyed { enemies_left: usize },
    /// A level was cleared; `level` is the next level to play
    LevelCleared { level: u32 },
    /// Last level cleared, back to the menu
    CampaignComplete,
    /// Gravity finished a quarter turn
    GravityRotated { target: Cardinal },
    /// Player started or stopped driving
    Moving(bool),
    DifficultyChanged(Difficulty),
}

/// Autopilot state for idle/demo mode
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Autopilot {
    /// Current stick X (-1, 0 or +1)
    pub drive: f32,
    /// Frames until a new drive direction is picked
    pub hold_frames: u32,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed (autopilot only; the simulation itself never draws randomness)
    pub seed: u64,
    pub rng: Pcg32,
    pub settings: Settings,
    pub phase: GamePhase,
    pub difficulty: Difficulty,
    /// Current level (1-based)
    pub level: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub world: PhysicsWorld,
    pub camera: GravityCamera,
    pub player: Player,
    pub arena: Arena,
    pub levels: LevelPack,
    /// Last non-zero aim stick reading
    pub aim_stick: Vec2,
    pub autopilot: Autopilot,
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// New game on the built-in campaign, sitting in the menu at level 1
    pub fn new(settings: Settings) -> Self {
        Self::build(settings, LevelPack::builtin(), &BUILTIN_LEVELS[0])
    }

    /// New game on a custom level pack
    pub fn with_levels(settings: Settings, levels: LevelPack) -> Result<Self, ArenaError> {
        levels.validate()?;
        let first = *levels.grid(1)?;
        Ok(Self::build(settings, levels, &first))
    }

    fn build(settings: Settings, levels: LevelPack, first: &LevelGrid) -> Self {
        let camera = GravityCamera::new();
        let mut world = PhysicsWorld::new(camera.gravity(settings.gravity));
        let difficulty = settings.difficulty;
        let arena = Arena::load(&mut world, first, 1, difficulty, settings.enemy_tuning());
        let player = Player::new(&mut world, arena.start_position(), settings.player_max_health);

        Self {
            seed: settings.seed,
            rng: Pcg32::seed_from_u64(settings.seed),
            phase: GamePhase::Menu,
            difficulty,
            level: 1,
            time_ticks: 0,
            world,
            camera,
            player,
            arena,
            levels,
            aim_stick: Vec2::Y,
            autopilot: Autopilot::default(),
            events: Vec::new(),
            settings,
        }
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Tear the arena down and rebuild a level with the player at its start
    ///
    /// Health is carried over; the camera and gravity go back to "up".
    pub fn load_level(&mut self, level: u32) {
        std::mem::take(&mut self.arena).teardown(&mut self.world);

        let level = if self.levels.grid(level).is_ok() {
            level
        } else {
            log::warn!("Level {} not in pack, falling back to level 1", level);
            1
        };
        let tuning = self.settings.enemy_tuning();
        let loaded =
            Arena::load_level(&mut self.world, &self.levels, level, self.difficulty, tuning);
        self.arena = match loaded {
            Ok(arena) => arena,
            Err(e) => {
                log::warn!("Failed to load level {}: {}", level, e);
                Arena::load(&mut self.world, &BUILTIN_LEVELS[0], 1, self.difficulty, tuning)
            }
        };
        self.level = self.arena.level;

        self.camera.reset();
        self.world.set_gravity(self.camera.gravity(self.settings.gravity));
        self.player.reset(&mut self.world, self.arena.start_position());
        self.aim_stick = Vec2::Y;
    }

    /// Start (or restart) the current level from the menu
    pub fn start_game(&mut self) {
        self.load_level(self.level);
        self.phase = GamePhase::Playing;
        log::info!("Starting level {} on {}", self.level, self.difficulty.as_str());
    }

    /// Advance to the next level, or back to the menu after the last one
    pub fn level_cleared(&mut self) {
        let next = self.level as usize % self.levels.len().max(1) + 1;
        let next = next as u32;
        self.load_level(next);
        if next == 1 {
            log::info!("Campaign complete");
            self.phase = GamePhase::Menu;
            self.push_event(GameEvent::CampaignComplete);
        } else {
            self.phase = GamePhase::Playing;
            self.push_event(GameEvent::LevelCleared { level: next });
        }
    }

    /// Restore health, reload the level and return to the menu
    pub fn player_death(&mut self) {
        log::info!("Player died on level {}", self.level);
        self.player.actor.restore_health();
        self.load_level(self.level);
        self.phase = GamePhase::Menu;
    }

    /// Menu only: Easy -> Normal -> Hard -> Easy
    pub fn cycle_difficulty(&mut self) {
        if self.phase != GamePhase::Menu {
            return;
        }
        self.difficulty = self.difficulty.next();
        log::info!("Difficulty set to {}", self.difficulty.as_str());
        self.push_event(GameEvent::DifficultyChanged(self.difficulty));
    }

    pub fn player_health(&self) -> i32 {
        self.player.actor.health()
    }

    pub fn enemies_alive(&self) -> usize {
        self.arena.enemies_alive()
    }
}
