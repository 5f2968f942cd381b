//! Game state and core simulation types
//!
//! `GameState` owns every actor and projectile of one session. Projectiles
//! are removed from it when destroyed and never referenced again.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{BounceResult, KinematicStepper, SimpleStepper, ricochet_step};
use super::damage::{DamageOutcome, Vitals};
use super::input::{HeldKeys, KeyAction, KeyBindings, KeyCode};
use super::rect::Rect;
use crate::error::{ArenaError, Result};
use crate::heading_degrees;
use crate::tuning::Tuning;

/// Static map geometry, fixed for the whole session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Arena {
    /// Block players and bounce bullets
    pub walls: Vec<Rect>,
    /// Decorative only
    pub floor: Vec<Rect>,
    /// Damage actors standing on them
    pub hazards: Vec<Rect>,
    /// Spawn point per player slot, in slot order
    pub spawns: Vec<Vec2>,
}

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    /// At most one actor still has lives; ticks no longer advance anything
    GameOver,
}

/// Why a projectile left play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DestroyReason {
    HitActor,
    BounceBudget,
}

/// What damaged an actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageSource {
    Projectile { id: u32 },
    Hazard,
}

/// Things that happened during input handling or a tick, in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Shot { actor: u32, projectile: u32 },
    Dashed { actor: u32 },
    Bounced { projectile: u32, bounce_count: u32 },
    ProjectileDestroyed { projectile: u32, reason: DestroyReason },
    Damaged { actor: u32, source: DamageSource, health: i32 },
    Died { actor: u32, lives_left: u32 },
    Respawned { actor: u32, pos: Vec2 },
    Eliminated { actor: u32 },
    GameOver { winner: Option<u32> },
}

/// A player-controlled body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub id: u32,
    /// Center position
    pub pos: Vec2,
    pub size: Vec2,
    pub spawn: Vec2,
    /// Normalized direction from held movement keys (zero when idle)
    pub move_dir: Vec2,
    /// Last non-zero movement direction; bullets fire along it
    pub facing: Vec2,
    pub base_speed: f32,
    /// Current speed, raised while dashing
    pub speed: f32,
    pub vitals: Vitals,
    pub held: HeldKeys,
    pub last_dash_time: Option<f64>,
    pub dash_until: Option<f64>,
    /// The kinematic step this tick ran into a wall
    pub blocked: bool,
    /// Overlapping a hazard tile this tick
    pub on_hazard: bool,
    bindings: KeyBindings,
}

impl Actor {
    pub fn new(
        id: u32,
        spawn: Vec2,
        size: Vec2,
        speed: f32,
        bindings: KeyBindings,
        vitals: Vitals,
    ) -> Self {
        Self {
            id,
            pos: spawn,
            size,
            spawn,
            move_dir: Vec2::ZERO,
            facing: Vec2::X,
            base_speed: speed,
            speed,
            vitals,
            held: HeldKeys::default(),
            last_dash_time: None,
            dash_until: None,
            blocked: false,
            on_hazard: false,
            bindings,
        }
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn bbox(&self) -> Rect {
        Rect::from_center(self.pos, self.size)
    }

    /// Commanded velocity for the next kinematic step
    pub fn velocity_intent(&self) -> Vec2 {
        self.move_dir * self.speed
    }

    pub fn is_active(&self) -> bool {
        !self.vitals.eliminated
    }

    /// Route damage through the cooldown gate; a death with lives left sends
    /// the actor back to its spawn
    pub fn take_damage(&mut self, amount: i32) -> DamageOutcome {
        let outcome = self.vitals.apply_damage(amount);
        if let DamageOutcome::Died { lives_left } = outcome
            && lives_left > 0
        {
            self.pos = self.spawn;
        }
        outcome
    }
}

/// A bullet in flight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    /// Shooter; `None` for bullets placed by the session itself
    pub owner: Option<u32>,
    /// Center position
    pub pos: Vec2,
    /// Displacement per tick
    pub vel: Vec2,
    pub size: Vec2,
    pub bounce_count: u32,
    pub max_bounces: u32,
    /// Heading in degrees, kept in sync with `vel` after every bounce
    pub angle: f32,
    pub destroyed: bool,
}

impl Projectile {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, size: Vec2, max_bounces: u32) -> Self {
        Self {
            id,
            owner: None,
            pos,
            vel,
            size,
            bounce_count: 0,
            max_bounces,
            angle: heading_degrees(vel),
            destroyed: false,
        }
    }

    pub fn bbox(&self) -> Rect {
        Rect::from_center(self.pos, self.size)
    }

    /// Move one tick, bouncing off walls axis by axis
    pub fn advance(&mut self, walls: &[Rect]) -> BounceResult {
        let result = ricochet_step(&mut self.pos, &mut self.vel, self.size, walls);
        if result.any() {
            self.bounce_count += result.count();
            self.angle = heading_degrees(self.vel);
        }
        result
    }

    pub fn over_budget(&self) -> bool {
        self.bounce_count > self.max_bounces
    }

    /// Whether this projectile can hit `actor`. A shooter is safe from its
    /// own bullet until the bullet has ricocheted at least once.
    pub fn can_hit(&self, actor: &Actor) -> bool {
        self.owner != Some(actor.id) || self.bounce_count > 0
    }

    /// Mark for removal. Returns false if it was already destroyed.
    pub fn destroy(&mut self) -> bool {
        !std::mem::replace(&mut self.destroyed, true)
    }
}

/// Everything that changes during play (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub actors: Vec<Actor>,
    /// Live projectiles, in spawn order
    pub projectiles: Vec<Projectile>,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Seconds of simulated time; drives dash gating
    pub clock: f64,
    /// Events since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    pub fn new(actors: Vec<Actor>) -> Self {
        let next_id = actors.iter().map(|a| a.id).max().unwrap_or(0) + 1;
        Self {
            actors,
            projectiles: Vec::new(),
            phase: GamePhase::Playing,
            time_ticks: 0,
            clock: 0.0,
            events: Vec::new(),
            next_id,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn actor(&self, id: u32) -> Option<&Actor> {
        self.actors.iter().find(|a| a.id == id)
    }

    /// Ids of actors that still have lives
    pub fn active_actors(&self) -> impl Iterator<Item = u32> + '_ {
        self.actors.iter().filter(|a| a.is_active()).map(|a| a.id)
    }
}

/// Final standings handed back by [`Session::end`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub ticks: u64,
    pub clock: f64,
    pub phase: GamePhase,
    pub winner: Option<u32>,
    pub actors: Vec<ActorSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorSummary {
    pub id: u32,
    pub health: i32,
    pub lives: u32,
    pub eliminated: bool,
}

/// One match on one arena: owns the game state and drives it from input
/// events and ticks
pub struct Session {
    arena: Arena,
    tuning: Tuning,
    state: GameState,
    stepper: Box<dyn KinematicStepper>,
}

impl Session {
    /// Set up a match with one actor per binding layout, placed on the arena
    /// spawns in order
    pub fn start(arena: Arena, tuning: Tuning, layouts: &[KeyBindings]) -> Result<Self> {
        tuning.validate()?;
        if let Some(key) = KeyBindings::find_conflict(layouts) {
            return Err(ArenaError::KeyConflict { key });
        }
        if arena.spawns.len() < layouts.len() {
            return Err(ArenaError::MissingSpawn {
                player: arena.spawns.len() + 1,
            });
        }

        let actors = layouts
            .iter()
            .enumerate()
            .map(|(slot, bindings)| {
                Actor::new(
                    slot as u32 + 1,
                    arena.spawns[slot],
                    Vec2::splat(tuning.player.size),
                    tuning.player.speed_for(slot),
                    *bindings,
                    Vitals::new(
                        tuning.player.max_health,
                        tuning.player.lives,
                        tuning.damage.cooldown_secs,
                    ),
                )
            })
            .collect();

        log::info!(
            "Session started: {} actors, {} walls, {} hazards",
            layouts.len(),
            arena.walls.len(),
            arena.hazards.len()
        );

        Ok(Self {
            arena,
            tuning,
            state: GameState::new(actors),
            stepper: Box::new(SimpleStepper),
        })
    }

    /// Replace the player-vs-wall movement stepper
    pub fn with_stepper(mut self, stepper: Box<dyn KinematicStepper>) -> Self {
        self.stepper = stepper;
        self
    }

    /// Finish the match and report the standings
    pub fn end(self) -> SessionSummary {
        let winner = match self.state.phase {
            GamePhase::GameOver => self.state.active_actors().next(),
            GamePhase::Playing => None,
        };
        let summary = SessionSummary {
            ticks: self.state.time_ticks,
            clock: self.state.clock,
            phase: self.state.phase,
            winner,
            actors: self
                .state
                .actors
                .iter()
                .map(|a| ActorSummary {
                    id: a.id,
                    health: a.vitals.health,
                    lives: a.vitals.lives,
                    eliminated: a.vitals.eliminated,
                })
                .collect(),
        };
        log::info!(
            "Session ended after {} ticks (winner: {:?})",
            summary.ticks,
            summary.winner
        );
        summary
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn actors(&self) -> &[Actor] {
        &self.state.actors
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.state.projectiles
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Take all events recorded since the previous call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }

    /// Deliver a key press to every actor
    pub fn key_down(&mut self, key: KeyCode) {
        let mut handled = false;
        let GameState {
            actors,
            projectiles,
            events,
            clock,
            next_id,
            ..
        } = &mut self.state;

        for actor in actors.iter_mut() {
            let Some(action) = actor.bindings().action_for(key) else {
                continue;
            };
            handled = true;
            match action {
                KeyAction::Move(_) => {
                    actor.on_key_change(key, true);
                }
                KeyAction::Dash => {
                    if actor.on_dash_key(*clock, &self.tuning.dash) {
                        events.push(GameEvent::Dashed { actor: actor.id });
                    }
                }
                KeyAction::Shoot => {
                    if let Some(bullet) = actor.shoot(*next_id, &self.tuning.bullet) {
                        *next_id += 1;
                        log::debug!("Actor {} fired projectile {}", actor.id, bullet.id);
                        events.push(GameEvent::Shot {
                            actor: actor.id,
                            projectile: bullet.id,
                        });
                        projectiles.push(bullet);
                    }
                }
            }
        }

        if !handled {
            log::trace!("Ignoring unbound key {:?}", key);
        }
    }

    /// Deliver a key release to every actor
    pub fn key_up(&mut self, key: KeyCode) {
        for actor in &mut self.state.actors {
            actor.on_key_change(key, false);
        }
    }

    /// Place a free bullet (no owner) in the arena
    pub fn spawn_projectile(&mut self, pos: Vec2, vel: Vec2) -> u32 {
        let id = self.state.next_entity_id();
        let bullet = &self.tuning.bullet;
        self.state.projectiles.push(Projectile::new(
            id,
            pos,
            vel,
            Vec2::splat(bullet.size),
            bullet.max_bounces,
        ));
        id
    }

    /// Run one fixed-length simulation step
    pub fn tick(&mut self) {
        super::tick::tick(
            &mut self.state,
            &self.arena,
            &self.tuning,
            self.stepper.as_mut(),
        );
    }
}
