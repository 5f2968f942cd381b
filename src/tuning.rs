//! Game balance values
//!
//! Loaded from JSON when provided; every field falls back to the defaults in
//! [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ArenaError, Result};

/// How a dash's speed boost wears off
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DashPolicy {
    /// Speed becomes `base * multiplier` and returns to base after the duration
    Timed { duration_secs: f64 },
    /// Speed is multiplied on every dash and never restored
    Compounding,
}

impl Default for DashPolicy {
    fn default() -> Self {
        DashPolicy::Timed {
            duration_secs: DASH_DURATION_SECS,
        }
    }
}

impl DashPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DashPolicy::Timed { .. } => "timed",
            DashPolicy::Compounding => "compounding",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerTuning {
    /// Player one's movement speed, in pixels per tick
    pub speed: f32,
    /// Movement speed for every other player slot
    pub second_speed: f32,
    /// Bounding box edge length
    pub size: f32,
    pub max_health: i32,
    pub lives: u32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            speed: PLAYER_SPEED,
            second_speed: PLAYER_SECOND_SPEED,
            size: PLAYER_SIZE,
            max_health: PLAYER_MAX_HEALTH,
            lives: PLAYER_LIVES,
        }
    }
}

impl PlayerTuning {
    /// Base speed for the player in `slot`
    pub fn speed_for(&self, slot: usize) -> f32 {
        match slot {
            0 => self.speed,
            _ => self.second_speed,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BulletTuning {
    /// Pixels per tick
    pub speed: f32,
    pub size: f32,
    pub max_bounces: u32,
    pub damage: i32,
}

impl Default for BulletTuning {
    fn default() -> Self {
        Self {
            speed: BULLET_SPEED,
            size: BULLET_SIZE,
            max_bounces: BULLET_MAX_BOUNCES,
            damage: BULLET_DAMAGE,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DamageTuning {
    pub cooldown_secs: f32,
    pub hazard_damage: i32,
}

impl Default for DamageTuning {
    fn default() -> Self {
        Self {
            cooldown_secs: DAMAGE_COOLDOWN_SECS,
            hazard_damage: HAZARD_DAMAGE,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashTuning {
    pub cooldown_secs: f64,
    pub multiplier: f32,
    pub policy: DashPolicy,
}

impl Default for DashTuning {
    fn default() -> Self {
        Self {
            cooldown_secs: DASH_COOLDOWN_SECS,
            multiplier: DASH_MULTIPLIER,
            policy: DashPolicy::default(),
        }
    }
}

/// All balance values for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tuning {
    pub player: PlayerTuning,
    pub bullet: BulletTuning,
    pub damage: DamageTuning,
    pub dash: DashTuning,
    /// Fixed tick length in seconds
    pub dt: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player: PlayerTuning::default(),
            bullet: BulletTuning::default(),
            damage: DamageTuning::default(),
            dash: DashTuning::default(),
            dt: SIM_DT,
        }
    }
}

impl Tuning {
    /// Parse tuning from a JSON document; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read and parse a tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ArenaError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!(
            "Loaded tuning from {} (dash policy: {})",
            path.display(),
            tuning.dash.policy.as_str()
        );
        Ok(tuning)
    }

    /// Reject values that would make the simulation meaningless
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| Err(ArenaError::InvalidTuning(msg.to_string()));

        if !(self.dt > 0.0) {
            return invalid("dt must be positive");
        }
        if !(self.player.speed > 0.0) || !(self.player.second_speed > 0.0) {
            return invalid("player speeds must be positive");
        }
        if !(self.player.size > 0.0) || !(self.bullet.size > 0.0) {
            return invalid("sizes must be positive");
        }
        if self.player.max_health <= 0 {
            return invalid("max_health must be positive");
        }
        if !(self.bullet.speed > 0.0) {
            return invalid("bullet speed must be positive");
        }
        if self.bullet.damage < 0 || self.damage.hazard_damage < 0 {
            return invalid("damage amounts cannot be negative");
        }
        if !(self.damage.cooldown_secs >= 0.0) || !(self.dash.cooldown_secs >= 0.0) {
            return invalid("cooldowns cannot be negative");
        }
        if !(self.dash.multiplier > 0.0) {
            return invalid("dash multiplier must be positive");
        }
        if let DashPolicy::Timed { duration_secs } = self.dash.policy
            && !(duration_secs > 0.0)
        {
            return invalid("dash duration must be positive");
        }
        Ok(())
    }
}
