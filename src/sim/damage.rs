//! Damage cooldown gate and health/lives bookkeeping
//!
//! Raw damage events (bullet hits, hazard contact) arrive every tick; the gate
//! turns them into at most one health loss per cooldown window per actor.

use serde::{Deserialize, Serialize};

use crate::consts::{DAMAGE_COOLDOWN_SECS, DAMAGE_TIMER_START};

/// Timer-gated guard: open once more than `cooldown` seconds have passed
/// since it last fired.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageGate {
    time_since_last_damage: f32,
    cooldown: f32,
}

impl Default for DamageGate {
    fn default() -> Self {
        Self::new(DAMAGE_COOLDOWN_SECS)
    }
}

impl DamageGate {
    pub fn new(cooldown: f32) -> Self {
        Self {
            time_since_last_damage: DAMAGE_TIMER_START,
            cooldown,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.time_since_last_damage += dt;
    }

    pub fn time_since_last_damage(&self) -> f32 {
        self.time_since_last_damage
    }

    /// Still inside the window opened by the last accepted hit
    pub fn is_cooling(&self) -> bool {
        self.time_since_last_damage <= self.cooldown
    }

    /// Fire the gate if open. A closed gate is left untouched.
    pub fn try_fire(&mut self) -> bool {
        if self.is_cooling() {
            return false;
        }
        self.time_since_last_damage = 0.0;
        true
    }
}

/// What a damage application did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Gate closed or actor already out of the game; nothing changed
    Suppressed,
    /// Health dropped and the actor is still standing
    Hurt { health: i32 },
    /// Health reached zero. Health has been refilled if lives remain.
    Died { lives_left: u32 },
}

/// Health, lives and the damage gate of one actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    pub health: i32,
    pub max_health: i32,
    pub lives: u32,
    /// Out of lives; immune to further damage
    pub eliminated: bool,
    pub gate: DamageGate,
}

impl Vitals {
    pub fn new(max_health: i32, lives: u32, cooldown: f32) -> Self {
        Self {
            health: max_health,
            max_health,
            lives,
            eliminated: lives == 0,
            gate: DamageGate::new(cooldown),
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.gate.update(dt);
    }

    /// Apply `amount` damage through the cooldown gate.
    ///
    /// Health clamps at zero. Reaching zero costs one life and refills health;
    /// losing the last life eliminates the actor with health left at zero.
    pub fn apply_damage(&mut self, amount: i32) -> DamageOutcome {
        if self.eliminated || !self.gate.try_fire() {
            return DamageOutcome::Suppressed;
        }

        self.health = (self.health - amount.max(0)).max(0);
        if self.health > 0 {
            return DamageOutcome::Hurt {
                health: self.health,
            };
        }

        self.lives = self.lives.saturating_sub(1);
        if self.lives > 0 {
            self.health = self.max_health;
        } else {
            self.eliminated = true;
        }
        DamageOutcome::Died {
            lives_left: self.lives,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_fresh_gate_is_open() {
        let mut gate = DamageGate::default();
        assert!(!gate.is_cooling());
        assert!(gate.try_fire());
        assert!(gate.is_cooling());
        assert_eq!(gate.time_since_last_damage(), 0.0);
    }

    #[test]
    fn test_second_hit_within_window_is_ignored() {
        let mut vitals = Vitals::new(100, 3, 1.0);
        assert_eq!(vitals.apply_damage(10), DamageOutcome::Hurt { health: 90 });
        vitals.update(0.3);
        assert_eq!(vitals.apply_damage(10), DamageOutcome::Suppressed);
        assert_eq!(vitals.health, 90);
        // Suppressed hits do not restart the window
        assert!((vitals.gate.time_since_last_damage() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_cooldown_boundary() {
        let mut vitals = Vitals::new(100, 3, 1.0);
        vitals.apply_damage(10);

        vitals.update(1.0);
        assert_eq!(vitals.apply_damage(10), DamageOutcome::Suppressed);
        assert_eq!(vitals.health, 90);

        vitals.update(0.001);
        assert_eq!(vitals.apply_damage(10), DamageOutcome::Hurt { health: 80 });
    }

    #[test]
    fn test_hits_at_zero_half_and_one_point_one_seconds() {
        let mut vitals = Vitals::new(100, 3, 1.0);
        vitals.apply_damage(10);
        vitals.update(0.5);
        vitals.apply_damage(10);
        assert_eq!(vitals.health, 90);
        vitals.update(0.6);
        vitals.apply_damage(10);
        assert_eq!(vitals.health, 80);
    }

    #[test]
    fn test_death_costs_a_life_and_refills() {
        let mut vitals = Vitals::new(100, 3, 1.0);
        vitals.health = 5;
        assert_eq!(vitals.apply_damage(10), DamageOutcome::Died { lives_left: 2 });
        assert_eq!(vitals.health, 100);
        assert!(!vitals.eliminated);
    }

    #[test]
    fn test_last_life_eliminates_once() {
        let mut vitals = Vitals::new(100, 1, 1.0);
        vitals.health = 10;
        assert_eq!(vitals.apply_damage(10), DamageOutcome::Died { lives_left: 0 });
        assert!(vitals.eliminated);
        assert_eq!(vitals.health, 0);

        vitals.update(5.0);
        assert_eq!(vitals.apply_damage(10), DamageOutcome::Suppressed);
        assert_eq!(vitals.health, 0);
        assert_eq!(vitals.lives, 0);
    }

    proptest! {
        #[test]
        fn prop_health_never_negative(
            hits in prop::collection::vec((0i32..250, 0.0f32..2.0), 1..40)
        ) {
            let mut vitals = Vitals::new(100, 2, 1.0);
            for (amount, dt) in hits {
                vitals.apply_damage(amount);
                vitals.update(dt);
                prop_assert!(vitals.health >= 0);
                prop_assert!(vitals.health <= vitals.max_health);
            }
        }

        #[test]
        fn prop_one_hit_per_window(
            amount in 1i32..50,
            gaps in prop::collection::vec(0.0f32..0.2, 1..5),
        ) {
            // Total elapsed stays under one second, so only the first hit lands
            let mut vitals = Vitals::new(100, 3, 1.0);
            vitals.apply_damage(amount);
            for dt in gaps {
                vitals.update(dt);
                vitals.apply_damage(amount);
            }
            prop_assert_eq!(vitals.health, 100 - amount);
        }
    }
}
