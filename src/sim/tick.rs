//! Fixed timestep simulation tick
//!
//! One call is one pass in a fixed order; no step re-runs within a tick:
//! 1. bullets move, ricochet and hit actors
//! 2. hazard contact
//! 3. damage timers advance
//! 4. players move through the kinematic stepper
//! 5. destroyed bullets are removed

use super::collision::KinematicStepper;
use super::damage::DamageOutcome;
use super::rect::overlaps_any;
use super::state::{Actor, Arena, DamageSource, DestroyReason, GameEvent, GamePhase, GameState};
use crate::tuning::Tuning;

/// Advance the game state by one fixed timestep
pub fn tick(
    state: &mut GameState,
    arena: &Arena,
    tuning: &Tuning,
    stepper: &mut dyn KinematicStepper,
) {
    if state.phase == GamePhase::GameOver {
        return;
    }

    let dt = tuning.dt;
    state.time_ticks += 1;
    state.clock += dt as f64;

    let GameState {
        actors,
        projectiles,
        events,
        clock,
        ..
    } = &mut *state;

    // --- BULLETS ---
    for bullet in projectiles.iter_mut() {
        if bullet.destroyed {
            continue;
        }

        if bullet.advance(&arena.walls).any() {
            log::debug!(
                "Projectile {} bounced ({} of {})",
                bullet.id,
                bullet.bounce_count,
                bullet.max_bounces
            );
            events.push(GameEvent::Bounced {
                projectile: bullet.id,
                bounce_count: bullet.bounce_count,
            });
        }

        // Every actor under the bullet takes the hit, then the bullet is spent
        let bbox = bullet.bbox();
        let mut hit_any = false;
        for actor in actors.iter_mut() {
            if !actor.is_active() || !bullet.can_hit(actor) || !bbox.overlaps(&actor.bbox()) {
                continue;
            }
            hit_any = true;
            damage_actor(
                actor,
                tuning.bullet.damage,
                DamageSource::Projectile { id: bullet.id },
                events,
            );
        }

        let reason = if hit_any {
            Some(DestroyReason::HitActor)
        } else if bullet.over_budget() {
            Some(DestroyReason::BounceBudget)
        } else {
            None
        };
        if let Some(reason) = reason
            && bullet.destroy()
        {
            events.push(GameEvent::ProjectileDestroyed {
                projectile: bullet.id,
                reason,
            });
        }
    }

    // --- HAZARDS ---
    for actor in actors.iter_mut() {
        actor.on_hazard = actor.is_active() && overlaps_any(&actor.bbox(), &arena.hazards);
        if actor.on_hazard {
            damage_actor(
                actor,
                tuning.damage.hazard_damage,
                DamageSource::Hazard,
                events,
            );
        }
    }

    // --- DAMAGE TIMERS ---
    for actor in actors.iter_mut() {
        actor.vitals.update(dt);
    }

    // --- MOVEMENT ---
    for actor in actors.iter_mut() {
        if !actor.is_active() {
            actor.blocked = false;
            continue;
        }
        actor.expire_dash(*clock);

        let mut body = actor.bbox();
        let hits = stepper.step(&mut body, actor.velocity_intent(), &arena.walls);
        actor.pos = body.center();
        actor.blocked = !hits.is_empty();
    }

    // --- CLEANUP ---
    projectiles.retain(|p| !p.destroyed);

    check_game_over(state);
}

/// Apply damage and record what it did
fn damage_actor(actor: &mut Actor, amount: i32, source: DamageSource, events: &mut Vec<GameEvent>) {
    match actor.take_damage(amount) {
        DamageOutcome::Suppressed => {}
        DamageOutcome::Hurt { health } => {
            log::debug!("Actor {} took {} damage ({} left)", actor.id, amount, health);
            events.push(GameEvent::Damaged {
                actor: actor.id,
                source,
                health,
            });
        }
        DamageOutcome::Died { lives_left } => {
            log::info!("Actor {} died ({} lives left)", actor.id, lives_left);
            events.push(GameEvent::Damaged {
                actor: actor.id,
                source,
                health: 0,
            });
            events.push(GameEvent::Died {
                actor: actor.id,
                lives_left,
            });
            if lives_left > 0 {
                events.push(GameEvent::Respawned {
                    actor: actor.id,
                    pos: actor.pos,
                });
            } else {
                log::info!("Actor {} eliminated", actor.id);
                events.push(GameEvent::Eliminated { actor: actor.id });
            }
        }
    }
}

/// End the match once no more than one actor can still play
fn check_game_over(state: &mut GameState) {
    let active = state.active_actors().count();
    let over = if state.actors.len() > 1 {
        active <= 1
    } else {
        active == 0
    };
    if !over {
        return;
    }

    let winner = state.active_actors().next();
    state.phase = GamePhase::GameOver;
    log::info!("Game over after {} ticks (winner: {:?})", state.time_ticks, winner);
    state.events.push(GameEvent::GameOver { winner });
}
