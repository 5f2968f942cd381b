//! Keyboard input: movement aggregation, dash and shooting
//!
//! Key events are delivered between ticks. Each actor owns a fixed set of
//! bindings; a key that is not in an actor's bindings is ignored by it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Actor, Projectile};
use crate::heading_degrees;
use crate::tuning::{BulletTuning, DashPolicy, DashTuning};

/// Platform key identifier (X11 keysym numbering, as delivered by the window layer)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const A: KeyCode = KeyCode(b'a' as u32);
    pub const C: KeyCode = KeyCode(b'c' as u32);
    pub const D: KeyCode = KeyCode(b'd' as u32);
    pub const I: KeyCode = KeyCode(b'i' as u32);
    pub const J: KeyCode = KeyCode(b'j' as u32);
    pub const K: KeyCode = KeyCode(b'k' as u32);
    pub const L: KeyCode = KeyCode(b'l' as u32);
    pub const N: KeyCode = KeyCode(b'n' as u32);
    pub const S: KeyCode = KeyCode(b's' as u32);
    pub const W: KeyCode = KeyCode(b'w' as u32);
    pub const LSHIFT: KeyCode = KeyCode(0xffe1);
    pub const RSHIFT: KeyCode = KeyCode(0xffe2);
}

/// One of the four movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveKey {
    Up,
    Down,
    Left,
    Right,
}

impl MoveKey {
    pub const ALL: [MoveKey; 4] = [MoveKey::Up, MoveKey::Down, MoveKey::Left, MoveKey::Right];

    /// Unit vector for this direction (world y grows upward)
    pub fn vector(self) -> Vec2 {
        match self {
            MoveKey::Up => Vec2::Y,
            MoveKey::Down => Vec2::NEG_Y,
            MoveKey::Left => Vec2::NEG_X,
            MoveKey::Right => Vec2::X,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// What a bound key does for its actor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Move(MoveKey),
    Dash,
    Shoot,
}

/// An actor's key layout. Fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub up: KeyCode,
    pub down: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
    pub dash: KeyCode,
    pub shoot: KeyCode,
}

impl KeyBindings {
    /// W/A/S/D, left shift to dash, C to shoot
    pub const PLAYER_ONE: KeyBindings = KeyBindings {
        up: KeyCode::W,
        down: KeyCode::S,
        left: KeyCode::A,
        right: KeyCode::D,
        dash: KeyCode::LSHIFT,
        shoot: KeyCode::C,
    };

    /// I/J/K/L, right shift to dash, N to shoot
    pub const PLAYER_TWO: KeyBindings = KeyBindings {
        up: KeyCode::I,
        down: KeyCode::K,
        left: KeyCode::J,
        right: KeyCode::L,
        dash: KeyCode::RSHIFT,
        shoot: KeyCode::N,
    };

    pub fn keys(&self) -> [KeyCode; 6] {
        [
            self.up, self.down, self.left, self.right, self.dash, self.shoot,
        ]
    }

    pub fn action_for(&self, key: KeyCode) -> Option<KeyAction> {
        match key {
            k if k == self.up => Some(KeyAction::Move(MoveKey::Up)),
            k if k == self.down => Some(KeyAction::Move(MoveKey::Down)),
            k if k == self.left => Some(KeyAction::Move(MoveKey::Left)),
            k if k == self.right => Some(KeyAction::Move(MoveKey::Right)),
            k if k == self.dash => Some(KeyAction::Dash),
            k if k == self.shoot => Some(KeyAction::Shoot),
            _ => None,
        }
    }

    /// First key that appears twice across all the given layouts
    pub fn find_conflict(layouts: &[KeyBindings]) -> Option<KeyCode> {
        let mut seen: Vec<KeyCode> = Vec::with_capacity(layouts.len() * 6);
        for key in layouts.iter().flat_map(|b| b.keys()) {
            if seen.contains(&key) {
                return Some(key);
            }
            seen.push(key);
        }
        None
    }
}

/// Which movement keys are currently held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldKeys([bool; 4]);

impl HeldKeys {
    pub fn set(&mut self, key: MoveKey, pressed: bool) {
        self.0[key.index()] = pressed;
    }

    pub fn is_held(&self, key: MoveKey) -> bool {
        self.0[key.index()]
    }

    /// Normalized sum of held directions; zero when nothing is held or
    /// opposing keys cancel out
    pub fn direction(&self) -> Vec2 {
        MoveKey::ALL
            .iter()
            .filter(|k| self.is_held(**k))
            .map(|k| k.vector())
            .sum::<Vec2>()
            .normalize_or_zero()
    }
}

impl Actor {
    /// Record a movement key press/release and recompute the movement intent.
    ///
    /// Returns false (and changes nothing) for keys outside this actor's
    /// movement bindings.
    pub fn on_key_change(&mut self, key: KeyCode, pressed: bool) -> bool {
        let Some(KeyAction::Move(dir)) = self.bindings().action_for(key) else {
            return false;
        };

        self.held.set(dir, pressed);
        self.move_dir = self.held.direction();
        if self.move_dir != Vec2::ZERO {
            self.facing = self.move_dir;
        }
        true
    }

    /// Trigger a dash at session time `now` (seconds) if the cooldown allows.
    pub fn on_dash_key(&mut self, now: f64, tuning: &DashTuning) -> bool {
        if self.vitals.eliminated {
            return false;
        }
        if let Some(last) = self.last_dash_time
            && now - last <= tuning.cooldown_secs
        {
            return false;
        }

        match tuning.policy {
            DashPolicy::Compounding => {
                self.speed *= tuning.multiplier;
            }
            DashPolicy::Timed { duration_secs } => {
                self.speed = self.base_speed * tuning.multiplier;
                self.dash_until = Some(now + duration_secs);
            }
        }
        self.last_dash_time = Some(now);
        log::debug!("Actor {} dashed (speed {})", self.id, self.speed);
        true
    }

    /// Drop a timed dash boost once its window has passed
    pub fn expire_dash(&mut self, now: f64) {
        if let Some(until) = self.dash_until
            && now >= until
        {
            self.speed = self.base_speed;
            self.dash_until = None;
        }
    }

    pub fn is_dashing(&self) -> bool {
        self.dash_until.is_some()
    }

    /// Fire a bullet from the actor's center along its facing direction
    pub fn shoot(&self, id: u32, tuning: &BulletTuning) -> Option<Projectile> {
        if self.vitals.eliminated {
            return None;
        }
        let vel = self.facing * tuning.speed;
        Some(Projectile {
            id,
            owner: Some(self.id),
            pos: self.pos,
            vel,
            size: Vec2::splat(tuning.size),
            bounce_count: 0,
            max_bounces: tuning.max_bounces,
            angle: heading_degrees(vel),
            destroyed: false,
        })
    }
}
