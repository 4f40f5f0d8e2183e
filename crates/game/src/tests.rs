//! Whole-round scenarios driven through `GameState::tick`.

use engine_core::Vec3;
use input::InputSnapshot;

use crate::config::GameConfig;
use crate::enemy::{Axis, BehaviorKind};
use crate::events::GameEvent;
use crate::host::{FrameView, HudSurface, RenderSurface};
use crate::spawner::RespawnPolicy;
use crate::state::{GamePhase, GameState};

const DT: f32 = 1.0 / 60.0;

#[derive(Default)]
struct Recorder {
    renders: u32,
    last_enemy_count: usize,
    scores: Vec<u32>,
    times: Vec<u32>,
    game_overs: Vec<u32>,
}

impl RenderSurface for Recorder {
    fn render(&mut self, frame: &FrameView<'_>) {
        self.renders += 1;
        self.last_enemy_count = frame.enemies.len();
    }
}

impl HudSurface for Recorder {
    fn show_score(&mut self, score: u32) {
        self.scores.push(score);
    }

    fn show_time(&mut self, remaining: u32) {
        self.times.push(remaining);
    }

    fn game_over(&mut self, final_score: u32) {
        self.game_overs.push(final_score);
    }
}

/// Player standing at the origin on a floor at y = 0.
fn range_config() -> GameConfig {
    GameConfig {
        floor_height: 0.0,
        player_spawn: Vec3::ZERO,
        muzzle_speed: 20.0,
        hit_radius: 3.0,
        seed: Some(7),
        ..Default::default()
    }
}

fn fire() -> InputSnapshot {
    InputSnapshot {
        fire: true,
        ..Default::default()
    }
}

fn count_hits(events: &[GameEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, GameEvent::EnemyHit { .. }))
        .count()
}

/// Fire once, then tick until a hit or `seconds` elapse. Returns the hit time.
fn shoot_and_wait(game: &mut GameState, host: &mut Recorder, seconds: f32) -> Option<f32> {
    let mut elapsed = 0.0;
    let mut input = fire();
    while elapsed < seconds {
        let events = game.tick(&input, true, DT, host);
        input = InputSnapshot::default();
        elapsed += DT;
        if count_hits(&events) > 0 {
            return Some(elapsed);
        }
    }
    None
}

#[test]
fn chasing_enemy_is_hit_along_initial_bearing() {
    let enemy_start = Vec3::new(30.0, 2.5, -30.0);
    let mut game = GameState::new(GameConfig {
        enemy_spawns: vec![enemy_start],
        enemy_behavior: BehaviorKind::Chase,
        ..range_config()
    });
    let mut host = Recorder::default();
    game.player.rig.look_at(enemy_start);

    let hit_at = shoot_and_wait(&mut game, &mut host, 5.0);
    assert!(hit_at.is_some(), "no hit within 5 seconds");
    assert_eq!(game.score(), 1);
    assert_eq!(host.scores.last(), Some(&1));
}

#[test]
fn small_aim_error_still_hits() {
    let enemy_start = Vec3::new(30.0, 2.5, -30.0);
    let mut game = GameState::new(GameConfig {
        enemy_spawns: vec![enemy_start],
        ..range_config()
    });
    let mut host = Recorder::default();
    game.player.rig.look_at(enemy_start);
    let (yaw, pitch) = (game.player.rig.yaw(), game.player.rig.pitch());
    game.player.rig.set_yaw_pitch(yaw + 0.9f32.to_radians(), pitch);

    assert!(shoot_and_wait(&mut game, &mut host, 5.0).is_some());
    assert_eq!(game.score(), 1);
}

#[test]
fn hit_enemy_is_repositioned_by_default() {
    let enemy_start = Vec3::new(0.0, 0.0, -10.0);
    let mut game = GameState::new(GameConfig {
        enemy_spawns: vec![enemy_start],
        chase_speed: 0.0,
        ..range_config()
    });
    let mut host = Recorder::default();

    assert!(shoot_and_wait(&mut game, &mut host, 2.0).is_some());
    let positions = game.enemy_positions();
    assert_eq!(positions.len(), 1);
    assert_ne!(positions[0], enemy_start);
    assert_eq!(positions[0].y, 2.5);
    assert!(positions[0].x.abs() <= 50.0 && positions[0].z.abs() <= 50.0);
}

#[test]
fn overlapping_enemies_credit_one_hit_to_the_earliest_spawned() {
    let mut game = GameState::new(GameConfig {
        // The second enemy is closer, but the first spawned wins the tie.
        enemy_spawns: vec![Vec3::new(0.0, 0.0, -1.0), Vec3::new(0.0, 0.0, -0.5)],
        chase_speed: 0.0,
        respawn: RespawnPolicy::Replenish {
            target_count: 0,
            radius: 20.0,
            height: 0.0,
        },
        ..range_config()
    });
    let mut host = Recorder::default();
    let targets = game.enemies.targets(&game.world);
    let (first, second) = (targets[0].entity, targets[1].entity);

    let events = game.tick(&fire(), true, DT, &mut host);
    assert_eq!(count_hits(&events), 1);
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::EnemyHit { enemy, score: 1, .. } if *enemy == first)));
    assert!(events.contains(&GameEvent::EnemyRemoved { enemy: first }));
    assert_eq!(game.score(), 1);
    assert!(!game.world.contains(first));
    assert!(game.world.contains(second));
    assert_eq!(game.enemy_positions(), vec![Vec3::new(0.0, 0.0, -0.5)]);
    assert_eq!(game.projectile_count(), 0);

    for _ in 0..30 {
        let events = game.tick(&InputSnapshot::default(), true, DT, &mut host);
        assert_eq!(count_hits(&events), 0);
    }
    assert_eq!(game.score(), 1);
}

#[test]
fn missed_projectile_expires_once_and_never_scores() {
    let mut game = GameState::new(GameConfig {
        enemy_spawns: Vec::new(),
        max_range: 50.0,
        ..range_config()
    });
    let mut host = Recorder::default();

    let mut expired = 0;
    let mut input = fire();
    for _ in 0..300 {
        let events = game.tick(&input, true, DT, &mut host);
        input = InputSnapshot::default();
        expired += events
            .iter()
            .filter(|e| matches!(e, GameEvent::ProjectileExpired { .. }))
            .count();
    }
    assert_eq!(expired, 1);
    assert_eq!(game.projectile_count(), 0);
    assert_eq!(game.world.len(), 0);
    assert_eq!(game.score(), 0);
}

#[test]
fn replenish_keeps_population_steady() {
    let mut game = GameState::new(GameConfig {
        enemy_spawns: vec![Vec3::new(0.0, 0.0, -5.0)],
        chase_speed: 0.0,
        respawn: RespawnPolicy::Replenish {
            target_count: 3,
            radius: 40.0,
            height: 2.5,
        },
        ..range_config()
    });
    let mut host = Recorder::default();

    // First tick tops the population up to three.
    let events = game.tick(&InputSnapshot::default(), true, DT, &mut host);
    let spawned = events
        .iter()
        .filter(|e| matches!(e, GameEvent::EnemySpawned { .. }))
        .count();
    assert_eq!(spawned, 2);
    assert_eq!(host.last_enemy_count, 3);

    assert!(shoot_and_wait(&mut game, &mut host, 2.0).is_some());
    assert_eq!(game.enemy_positions().len(), 3);
    assert!(!game.enemy_positions().contains(&Vec3::new(0.0, 0.0, -5.0)));
}

#[test]
fn patrolling_enemy_reflects_at_the_bound() {
    let mut game = GameState::new(GameConfig {
        enemy_spawns: vec![Vec3::new(7.5, 2.5, 0.0)],
        enemy_behavior: BehaviorKind::Patrol,
        patrol_speed: 1.0,
        patrol_bound: 8.0,
        ..range_config()
    });
    let mut host = Recorder::default();

    game.tick(&InputSnapshot::default(), true, 1.0, &mut host);
    assert_eq!(game.enemy_positions(), vec![Vec3::new(8.5, 2.5, 0.0)]);
    game.tick(&InputSnapshot::default(), true, 1.0, &mut host);
    assert_eq!(game.enemy_positions(), vec![Vec3::new(7.5, 2.5, 0.0)]);
}

#[test]
fn nothing_moves_without_capture_but_frames_still_render() {
    let enemy_start = Vec3::new(30.0, 2.5, -30.0);
    let mut game = GameState::new(GameConfig {
        enemy_spawns: vec![enemy_start],
        ..range_config()
    });
    let mut host = Recorder::default();
    let moving = InputSnapshot {
        forward: true,
        fire: true,
        ..Default::default()
    };

    for _ in 0..10 {
        let events = game.tick(&moving, false, DT, &mut host);
        assert!(events.is_empty());
    }
    assert_eq!(host.renders, 10);
    assert_eq!(game.player.position(), Vec3::ZERO);
    assert_eq!(game.enemy_positions(), vec![enemy_start]);
    assert_eq!(game.projectile_count(), 0);
    assert!(game.fire(false).is_none());
    assert!(!game.countdown.is_running());
}

#[test]
fn countdown_ends_the_round_once() {
    let mut game = GameState::new(GameConfig {
        round_seconds: 2,
        enemy_spawns: vec![Vec3::new(0.0, 0.0, -10.0)],
        chase_speed: 0.0,
        ..range_config()
    });
    let mut host = Recorder::default();

    // Seconds before the first captured frame do not count.
    assert!(game.on_timer_second(true, &mut host).is_none());
    assert_eq!(game.remaining_time(), 2);

    assert!(shoot_and_wait(&mut game, &mut host, 2.0).is_some());
    assert_eq!(host.times.first(), Some(&2));

    assert!(game.on_timer_second(false, &mut host).is_none());
    assert!(game.on_timer_second(true, &mut host).is_none());
    assert_eq!(game.remaining_time(), 1);

    let over = game.on_timer_second(true, &mut host);
    assert_eq!(over, Some(GameEvent::GameOver { final_score: 1 }));
    assert_eq!(game.phase, GamePhase::Over);
    assert_eq!(host.game_overs, vec![1]);

    assert!(game.on_timer_second(true, &mut host).is_none());
    assert_eq!(host.game_overs.len(), 1);

    // Frozen after game over: no firing, no movement, but still rendering.
    let renders = host.renders;
    let events = game.tick(&fire(), true, DT, &mut host);
    assert!(events.is_empty());
    assert_eq!(host.renders, renders + 1);

    game.reset();
    assert_eq!(game.phase, GamePhase::Playing);
    assert_eq!(game.score(), 0);
    assert_eq!(game.remaining_time(), 2);
    assert_eq!(game.enemy_positions(), vec![Vec3::new(0.0, 0.0, -10.0)]);
}

#[test]
fn jump_reports_a_single_landing() {
    let mut game = GameState::new(GameConfig {
        enemy_spawns: Vec::new(),
        ..range_config()
    });
    let mut host = Recorder::default();
    let mut input = InputSnapshot {
        jump: true,
        ..Default::default()
    };

    let mut landings = 0;
    for _ in 0..120 {
        let events = game.tick(&input, true, DT, &mut host);
        input = InputSnapshot::default();
        landings += events
            .iter()
            .filter(|e| matches!(e, GameEvent::Landed { .. }))
            .count();
        assert!(game.player.position().y >= 0.0);
    }
    assert_eq!(landings, 1);
}

#[test]
fn hit_on_the_final_tick_of_lifetime_counts() {
    let mut game = GameState::new(GameConfig {
        enemy_spawns: vec![Vec3::new(0.0, 0.0, -0.3)],
        chase_speed: 0.0,
        projectile_lifetime: 0.001,
        ..range_config()
    });
    let mut host = Recorder::default();

    let events = game.tick(&fire(), true, DT, &mut host);
    assert_eq!(count_hits(&events), 1);
    assert!(!events
        .iter()
        .any(|e| matches!(e, GameEvent::ProjectileExpired { .. })));
    assert_eq!(game.score(), 1);
    assert_eq!(game.projectile_count(), 0);
}

#[test]
fn patrol_follows_the_configured_axis() {
    let mut game = GameState::new(GameConfig {
        enemy_spawns: vec![Vec3::new(3.0, 2.5, 7.5)],
        enemy_behavior: BehaviorKind::Patrol,
        patrol_axis: Axis::Z,
        patrol_speed: 1.0,
        patrol_bound: 8.0,
        ..range_config()
    });
    let mut host = Recorder::default();

    game.tick(&InputSnapshot::default(), true, 1.0, &mut host);
    assert_eq!(game.enemy_positions(), vec![Vec3::new(3.0, 2.5, 8.5)]);
    game.tick(&InputSnapshot::default(), true, 1.0, &mut host);
    assert_eq!(game.enemy_positions(), vec![Vec3::new(3.0, 2.5, 7.5)]);
}
