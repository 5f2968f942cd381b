//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - No randomness
//! - Stable iteration order (spawn order for actors and bullets)
//! - No rendering or platform dependencies

pub mod collision;
pub mod damage;
pub mod input;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{BounceResult, KinematicStepper, SimpleStepper, ricochet_step};
pub use damage::{DamageGate, DamageOutcome, Vitals};
pub use input::{HeldKeys, KeyAction, KeyBindings, KeyCode, MoveKey};
pub use rect::{Rect, overlaps_any, rects_overlapping};
pub use state::{
    Actor, ActorSummary, Arena, DamageSource, DestroyReason, GameEvent, GamePhase, GameState,
    Projectile, Session, SessionSummary,
};
pub use tick::tick;
