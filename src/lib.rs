//! Ricochet Arena - A two-player top-down arena shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, ricochets, damage, tick order)
//! - `map`: Tile map loading into wall/floor/hazard layers
//! - `tuning`: Data-driven game balance
//! - `error`: Setup-time errors (map, tuning, key bindings)

pub mod error;
pub mod map;
pub mod sim;
pub mod tuning;

pub use error::ArenaError;
pub use map::TileMap;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per rendered frame at 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Minimum seconds between two damage applications on the same actor
    pub const DAMAGE_COOLDOWN_SECS: f32 = 1.0;
    /// Initial damage timer so a fresh actor is immediately vulnerable
    pub const DAMAGE_TIMER_START: f32 = 1000.0;
    /// Damage dealt by a bullet hit
    pub const BULLET_DAMAGE: i32 = 10;
    /// Damage dealt per pulse while standing on a hazard tile
    pub const HAZARD_DAMAGE: i32 = 10;

    /// Dash cooldown (seconds between two dashes)
    pub const DASH_COOLDOWN_SECS: f64 = 2.0;
    /// Speed multiplier applied by a dash
    pub const DASH_MULTIPLIER: f32 = 2.0;
    /// How long a timed dash lasts
    pub const DASH_DURATION_SECS: f64 = 0.25;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_SECOND_SPEED: f32 = 3.0;
    pub const PLAYER_SIZE: f32 = 32.0;
    pub const PLAYER_MAX_HEALTH: i32 = 100;
    pub const PLAYER_LIVES: u32 = 3;

    /// Bullet defaults (speed is per tick, like player speed)
    pub const BULLET_SPEED: f32 = 5.0;
    pub const BULLET_SIZE: f32 = 8.0;
    pub const BULLET_MAX_BOUNCES: u32 = 3;

    /// Tile edge length before scaling
    pub const TILE_SIZE: f32 = 32.0;
    pub const TILE_SCALING: f32 = 1.5;
}

/// Heading of a vector in degrees, in (-180, 180]
#[inline]
pub fn heading_degrees(v: Vec2) -> f32 {
    v.y.atan2(v.x).to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_degrees() {
        assert!((heading_degrees(Vec2::new(1.0, 0.0))).abs() < 1e-4);
        assert!((heading_degrees(Vec2::new(0.0, 1.0)) - 90.0).abs() < 1e-4);
        assert!((heading_degrees(Vec2::new(-5.0, 0.0)) - 180.0).abs() < 1e-4);
        assert!((heading_degrees(Vec2::new(1.0, -1.0)) + 45.0).abs() < 1e-4);
    }
}
