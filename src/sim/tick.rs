//! Per-frame simulation tick
//!
//! Order within a playing frame:
//! aim -> drive/camera -> fire -> gravity -> enemies -> physics step ->
//! contact resolution -> level flow.

use glam::Vec2;
use rand::Rng;

use super::actor::stick_for;
use super::collision::{self, Outcome};
use super::state::{GameEvent, GamePhase, GameState, Shooter};
use crate::consts::*;
use crate::fps_scale;

/// Controller state for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Movement stick X (-1..1); beyond the dead zone drives left/right
    pub move_x: f32,
    /// Aim stick (y up); `None` or zero keeps the previous aim
    pub aim: Option<Vec2>,
    /// Fire, or detonate the shot already in flight
    pub fire: bool,
    /// Next drive attempt stops instead of moving
    pub hold: bool,
    /// Start/pause button
    pub start: bool,
    /// Menu only: cycle difficulty
    pub cycle_difficulty: bool,
    /// Idle/demo mode - the autopilot plays the game
    pub idle_mode: bool,
}

/// Advance the game by one frame
///
/// `frame_time` is the real time since the previous frame. The physics step
/// is always [`SIM_DT`]; frame time only scales speeds, gravity and enemy
/// timers.
pub fn tick(state: &mut GameState, input: &TickInput, frame_time: f32) {
    let input = if input.idle_mode {
        autopilot_input(state, input)
    } else {
        input.clone()
    };

    match state.phase {
        GamePhase::Menu => {
            if input.cycle_difficulty {
                state.cycle_difficulty();
            }
            if input.start {
                state.start_game();
            }
            return;
        }
        GamePhase::Paused => {
            if input.start {
                state.phase = GamePhase::Playing;
                log::info!("Resumed");
            }
            return;
        }
        GamePhase::Playing => {
            if input.start {
                state.phase = GamePhase::Paused;
                log::info!("Paused");
                return;
            }
        }
    }

    state.time_ticks += 1;
    let scale = fps_scale(frame_time);

    // Keep the last non-zero aim so the turret always points somewhere
    if let Some(aim) = input.aim {
        if aim != Vec2::ZERO {
            state.aim_stick = aim;
        }
    }
    if input.hold {
        state.player.hold = true;
    }
    let up = state.camera.up();
    state.player.update(&mut state.world, state.aim_stick, up);

    let was_moving = state.player.moving;
    let speed = state.settings.player_speed * scale;
    if input.move_x >= STICK_THRESHOLD {
        drive_pressed(state, 1, speed);
        state.player.hold = false;
    } else if input.move_x <= -STICK_THRESHOLD {
        drive_pressed(state, -1, speed);
        state.player.hold = false;
    } else {
        state.player.stop(&mut state.world, &state.camera);
        if !state.camera.is_rotating() {
            state.player.pressing_right = false;
            state.player.pressing_left = false;
        }
    }
    if state.player.moving != was_moving {
        state.push_event(GameEvent::Moving(state.player.moving));
    }

    if input.fire {
        if state.player.can_fire() {
            if state.player.shoot(&mut state.world, state.settings.bullet_speed) {
                state.push_event(GameEvent::ShotFired { by: Shooter::Player });
            }
        } else if state.player.detonate(&mut state.world) {
            state.push_event(GameEvent::BulletDetonated);
        }
    }

    // Gravity follows the camera, including mid-rotation
    let gravity = state.camera.gravity(state.settings.gravity * scale);
    state.world.set_gravity(gravity);

    // Enemies
    let player_pos = state.player.position(&state.world);
    for enemy in &mut state.arena.enemies {
        if enemy.update(&mut state.world, gravity, player_pos, scale) {
            state.events.push(GameEvent::ShotFired {
                by: Shooter::Enemy(enemy.id),
            });
        }
    }

    state
        .world
        .step(SIM_DT, VELOCITY_ITERATIONS, POSITION_ITERATIONS);

    let outcome = collision::resolve(
        &mut state.world,
        &mut state.player,
        &mut state.arena,
        &mut state.events,
    );
    match outcome {
        Outcome::Continue => {}
        Outcome::PlayerDied => state.player_death(),
        Outcome::LevelCleared => state.level_cleared(),
    }
}

/// Drive toward the camera's right (`sign` = 1) or left (`sign` = -1)
///
/// Pushing against a wall while standing still starts a quarter turn of
/// gravity so the wall becomes the floor. Holding the stick keeps the turn
/// going; reversing the stick mid-turn swings back to the previous floor.
fn drive_pressed(state: &mut GameState, sign: i32, speed: f32) {
    // Turning toward the pushed wall rotates the camera the opposite way
    let turn = -sign;
    let player = &mut state.player;
    let camera = &mut state.camera;

    let (pressing_this, pressing_other) = if sign > 0 {
        (player.pressing_right, player.pressing_left)
    } else {
        (player.pressing_left, player.pressing_right)
    };
    let set_pressing = |player: &mut super::actor::Player, this: bool, other: bool| {
        if sign > 0 {
            player.pressing_right = this;
            player.pressing_left = other;
        } else {
            player.pressing_left = this;
            player.pressing_right = other;
        }
    };

    if camera.is_rotating() {
        if pressing_other {
            camera.change_target(turn);
        }
        if camera.check_target_reached() {
            camera.set_rotating(false);
            set_pressing(player, false, false);
            let target = camera.current_target();
            log::debug!("Gravity now {:?}", target);
            state.events.push(GameEvent::GravityRotated { target });
        } else {
            camera.rotate_step(turn);
            set_pressing(player, true, false);
        }
        return;
    }

    let v = player.actor.velocity(&state.world);
    if v.x.abs() < REST_SPEED && v.y.abs() < REST_SPEED && pressing_this {
        log::debug!("Pushing against a wall, rotating gravity");
        camera.begin_rotation(turn);
        state.world.set_linear_velocity(player.actor.body, Vec2::ZERO);
        set_pressing(player, pressing_this, false);
        return;
    }

    player.drive(&mut state.world, camera, sign as f32, speed);
    set_pressing(player, true, false);
}

/// Generate input for idle/demo mode
///
/// Drives in random bursts, aims at the nearest living enemy, fires whenever
/// a shot is available and detonates shots that pass close to an enemy.
fn autopilot_input(state: &mut GameState, input: &TickInput) -> TickInput {
    let mut input = input.clone();

    if state.phase == GamePhase::Menu {
        input.start = true;
        return input;
    }
    if state.phase != GamePhase::Playing {
        return input;
    }

    let pilot = &mut state.autopilot;
    if pilot.hold_frames == 0 {
        pilot.drive = match state.rng.random_range(0..3) {
            0 => -1.0,
            1 => 0.0,
            _ => 1.0,
        };
        pilot.hold_frames = state.rng.random_range(30..120);
    }
    pilot.hold_frames -= 1;
    input.move_x = pilot.drive;

    let player_pos = state.player.position(&state.world);
    let nearest = state
        .arena
        .enemies
        .iter()
        .filter(|e| e.is_alive())
        .map(|e| e.position(&state.world))
        .min_by(|a, b| {
            a.distance_squared(player_pos)
                .partial_cmp(&b.distance_squared(player_pos))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    if let Some(target) = nearest {
        let dir = (target - player_pos).normalize_or_zero();
        input.aim = Some(stick_for(dir, state.camera.up()));

        if state.player.can_fire() {
            input.fire = state.rng.random_bool(0.25);
        } else if let Some(shot) = state.player.actor.projectile.position(&state.world) {
            let close = state.player.actor.projectile.is_active(&state.world)
                && shot.distance(target) < EXPLOSION_HALF_SIZE + ENEMY_RADIUS;
            input.fire = close;
        }
    }

    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::camera::Cardinal;

    fn playing_state() -> GameState {
        let mut state = GameState::new(Settings::default());
        tick(
            &mut state,
            &TickInput {
                start: true,
                ..Default::default()
            },
            SIM_DT,
        );
        state
    }

    #[test]
    fn test_tick_menu_to_playing() {
        let mut state = GameState::new(Settings::default());
        assert_eq!(state.phase, GamePhase::Menu);

        // Nothing runs in the menu
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.time_ticks, 0);

        let input = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_tick_pause() {
        let mut state = playing_state();
        tick(&mut state, &TickInput::default(), SIM_DT);
        let ticks = state.time_ticks;
        let pos = state.player.position(&state.world);

        let input = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.phase, GamePhase::Paused);

        // Frozen while paused
        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.player.position(&state.world), pos);

        // Unpause
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_menu_cycles_difficulty() {
        let mut state = GameState::new(Settings::default());
        let input = TickInput {
            cycle_difficulty: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.difficulty.tier(), 3);
        assert_eq!(state.phase, GamePhase::Menu);
    }

    #[test]
    fn test_fire_then_detonate() {
        let mut state = playing_state();
        let fire = TickInput {
            fire: true,
            aim: Some(Vec2::new(1.0, 0.0)),
            ..Default::default()
        };
        tick(&mut state, &fire, SIM_DT);
        assert!(state.player.actor.projectile.is_active(&state.world));

        // Let the shot get clear of the player before blowing it up
        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert!(state.player.actor.projectile.is_active(&state.world));
        tick(&mut state, &fire, SIM_DT);
        assert!(!state.player.actor.projectile.is_active(&state.world));
        assert!(state.player.is_exploding(&state.world));

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::ShotFired { by: Shooter::Player }));
        assert!(events.contains(&GameEvent::BulletDetonated));
    }

    #[test]
    fn test_drive_moves_along_camera_right() {
        let mut state = playing_state();
        // Settle onto the floor
        for _ in 0..30 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        let input = TickInput {
            move_x: 1.0,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        let v = state.player.actor.velocity(&state.world);
        assert!(v.x > 0.0);
        assert!(state.player.pressing_right);
    }

    #[test]
    fn test_pushing_into_wall_rotates_gravity() {
        let mut state = playing_state();
        for _ in 0..30 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }

        // Level 1 start has a wall on its left: drive into it until gravity turns
        let left = TickInput {
            move_x: -1.0,
            ..Default::default()
        };
        let mut frames = 0;
        while !state.camera.is_rotating() {
            tick(&mut state, &left, SIM_DT);
            frames += 1;
            assert!(frames < 120, "never started rotating");
        }
        assert_eq!(state.camera.current_target(), Cardinal::Right);

        // Keep holding until the turn completes
        let mut frames = 0;
        while state.camera.is_rotating() {
            tick(&mut state, &left, SIM_DT);
            frames += 1;
            assert!(frames < 60, "rotation never finished");
        }
        assert_eq!(state.camera.up(), Vec2::new(1.0, 0.0));
        assert_eq!(state.world.gravity(), Vec2::new(-GRAVITY, 0.0));
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::GravityRotated {
                    target: Cardinal::Right
                })
        );
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(Settings {
            seed: 99999,
            ..Default::default()
        });
        let mut state2 = state1.clone();

        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for _ in 0..300 {
            tick(&mut state1, &input, SIM_DT);
            tick(&mut state2, &input, SIM_DT);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.level, state2.level);
        assert_eq!(state1.player_health(), state2.player_health());
        assert_eq!(
            state1.player.position(&state1.world),
            state2.player.position(&state2.world)
        );
    }
}
