//! Game state and the per-frame tick.
//!
//! The host owns one `GameState` and calls [`GameState::tick`] once per
//! animation frame and [`GameState::on_timer_second`] once per real second.
//! Nothing here is global; every subsystem gets the state it needs passed in.

use engine_core::{Retired, Transform, Vec3};
use hecs::{Entity, World};
use input::InputSnapshot;

use crate::clock::{Countdown, CountdownTick, Scoreboard};
use crate::config::GameConfig;
use crate::enemy::{Enemy, EnemyBehavior, EnemySet};
use crate::events::GameEvent;
use crate::host::{FrameView, HudSurface, RenderSurface};
use crate::player::PlayerController;
use crate::projectile::{Projectile, ProjectileManager};
use crate::spawner::{EnemySpawner, HitOutcome};

/// Round phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Playing,
    /// The countdown ran out. Only rendering continues until `reset`.
    Over,
}

/// All mutable gameplay state.
pub struct GameState {
    pub config: GameConfig,
    pub world: World,
    pub player: PlayerController,
    pub projectiles: ProjectileManager,
    pub enemies: EnemySet,
    pub spawner: EnemySpawner,
    pub score: Scoreboard,
    pub countdown: Countdown,
    pub phase: GamePhase,
    despawn_buffer: Vec<Entity>,
}

impl GameState {
    pub fn new(config: GameConfig) -> Self {
        let mut world = World::new();
        let mut enemies = EnemySet::new();
        let behavior = EnemyBehavior::from_config(&config);
        for &position in &config.enemy_spawns {
            enemies.spawn(&mut world, position, behavior);
        }

        Self {
            player: PlayerController::new(&config),
            projectiles: ProjectileManager::new(&config),
            spawner: EnemySpawner::new(config.respawn, config.seed),
            countdown: Countdown::new(config.round_seconds),
            score: Scoreboard::default(),
            phase: GamePhase::Playing,
            despawn_buffer: Vec::new(),
            enemies,
            world,
            config,
        }
    }

    /// Throw everything away and start a fresh round with the same config.
    pub fn reset(&mut self) {
        log::info!("Resetting round (final score {})", self.score.score());
        *self = Self::new(self.config.clone());
    }

    /// Run one frame: movement, projectiles, enemies, compaction, render.
    ///
    /// While input is not captured, or after the round is over, the
    /// simulation is frozen and only the render request goes out.
    pub fn tick<H>(&mut self, input: &InputSnapshot, capture_active: bool, dt: f32, host: &mut H) -> Vec<GameEvent>
    where
        H: RenderSurface + HudSurface,
    {
        let mut events = Vec::new();
        if self.phase == GamePhase::Playing && capture_active {
            if self.countdown.start() {
                log::info!("Round started: {}s on the clock", self.countdown.remaining());
                host.show_time(self.countdown.remaining());
                host.show_score(self.score.score());
            }
            self.step(input, capture_active, dt, host, &mut events);
        }
        self.render(host);
        events
    }

    fn step<H: HudSurface>(
        &mut self,
        input: &InputSnapshot,
        capture_active: bool,
        dt: f32,
        hud: &mut H,
        events: &mut Vec<GameEvent>,
    ) {
        if self.player.update(input, dt) {
            let position = self.player.position();
            log::debug!("Landed at {:?}", position);
            events.push(GameEvent::Landed { position });
        }

        if input.fire {
            events.extend(self.fire(capture_active));
        }

        let targets = self.enemies.targets(&self.world);
        let report = self.projectiles.update(&mut self.world, &targets, dt);
        for hit in report.hits {
            let score = self.score.record_hit();
            hud.show_score(score);
            log::debug!("Hit {:?} at {:?}, score {}", hit.enemy, hit.position, score);
            events.push(GameEvent::EnemyHit {
                projectile: hit.projectile,
                enemy: hit.enemy,
                position: hit.position,
                score,
            });
            events.push(match self.spawner.on_enemy_hit(&mut self.world, hit.enemy) {
                HitOutcome::Repositioned(position) => GameEvent::EnemyRepositioned {
                    enemy: hit.enemy,
                    position,
                },
                HitOutcome::Removed => GameEvent::EnemyRemoved { enemy: hit.enemy },
            });
        }
        events.extend(
            report
                .expired
                .into_iter()
                .map(|projectile| GameEvent::ProjectileExpired { projectile }),
        );

        self.enemies.update(&mut self.world, self.player.position(), dt);

        let behavior = EnemyBehavior::from_config(&self.config);
        for (enemy, position) in self.spawner.replenish(&mut self.world, &mut self.enemies, behavior) {
            events.push(GameEvent::EnemySpawned { enemy, position });
        }

        self.compact();
    }

    /// Fire along the rig's aim. Does nothing unless input is captured and
    /// the round is still running.
    pub fn fire(&mut self, capture_active: bool) -> Option<GameEvent> {
        if !capture_active || self.phase != GamePhase::Playing {
            return None;
        }
        let origin = self.player.position();
        let (projectile, velocity) = self.projectiles.fire(&mut self.world, origin, self.player.rig.forward());
        Some(GameEvent::Fired {
            projectile,
            origin,
            velocity,
        })
    }

    /// Advance the round clock by one real second.
    pub fn on_timer_second<H: HudSurface>(&mut self, capture_active: bool, hud: &mut H) -> Option<GameEvent> {
        match self.countdown.on_second(capture_active && self.phase == GamePhase::Playing) {
            CountdownTick::Idle => None,
            CountdownTick::Remaining(remaining) => {
                hud.show_time(remaining);
                None
            }
            CountdownTick::Expired => {
                let final_score = self.score.score();
                self.phase = GamePhase::Over;
                self.countdown.cancel();
                log::info!("Time up! Final score: {}", final_score);
                hud.show_time(0);
                hud.game_over(final_score);
                Some(GameEvent::GameOver { final_score })
            }
        }
    }

    /// Despawn everything marked retired during this tick.
    fn compact(&mut self) {
        self.despawn_buffer.clear();
        self.despawn_buffer
            .extend(self.world.query::<&Retired>().iter().map(|(entity, _)| entity));
        for entity in self.despawn_buffer.drain(..) {
            let _ = self.world.despawn(entity);
        }
    }

    fn render<R: RenderSurface>(&self, renderer: &mut R) {
        let enemies = self.positions_of::<Enemy>();
        let projectiles = self.positions_of::<Projectile>();
        renderer.render(&FrameView {
            eye: &self.player.rig.transform,
            enemies: &enemies,
            projectiles: &projectiles,
        });
    }

    fn positions_of<C: hecs::Component>(&self) -> Vec<Vec3> {
        self.world
            .query::<(&Transform, Option<&Retired>)>()
            .with::<&C>()
            .iter()
            .filter(|(_, (_, retired))| retired.is_none())
            .map(|(_, (transform, _))| transform.position)
            .collect()
    }

    pub fn enemy_positions(&self) -> Vec<Vec3> {
        self.positions_of::<Enemy>()
    }

    pub fn projectile_count(&self) -> usize {
        self.projectiles.live_count(&self.world)
    }

    pub fn score(&self) -> u32 {
        self.score.score()
    }

    pub fn remaining_time(&self) -> u32 {
        self.countdown.remaining()
    }
}
