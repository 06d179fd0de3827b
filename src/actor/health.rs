//! Hit points with post-damage invincibility

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Health {
    current: i32,
    max: i32,
    /// Invincibility granted after a hit that leaves the owner alive
    pub invincibility_duration: f32,
    invincible_timer: f32,
}

impl Health {
    pub fn new(max: i32, invincibility_duration: f32) -> Self {
        let max = max.max(1);
        Self {
            current: max,
            max,
            invincibility_duration,
            invincible_timer: 0.0,
        }
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_timer > 0.0
    }

    pub fn set_invincible(&mut self, duration: f32) {
        self.invincible_timer = duration.max(0.0);
    }

    /// Apply damage. Returns false when nothing happened: non-positive
    /// amount, already dead, or invincible.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if amount <= 0 || !self.is_alive() || self.is_invincible() {
            return false;
        }
        self.current = (self.current - amount).max(0);
        if self.is_alive() && self.invincibility_duration > 0.0 {
            self.set_invincible(self.invincibility_duration);
        }
        true
    }

    /// Restore health up to the maximum. Returns the new value.
    pub fn heal(&mut self, amount: i32) -> i32 {
        if amount > 0 && self.is_alive() {
            self.current = self.current.saturating_add(amount).min(self.max);
        }
        self.current
    }

    /// Count down invincibility
    pub fn tick(&mut self, dt: f32) {
        if self.invincible_timer > 0.0 {
            self.invincible_timer = (self.invincible_timer - dt).max(0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_grants_invincibility() {
        let mut health = Health::new(3, 1.0);
        assert!(health.take_damage(1));
        assert_eq!(health.current(), 2);
        assert!(health.is_invincible());
        assert!(!health.take_damage(1));
        assert_eq!(health.current(), 2);

        health.tick(1.0);
        assert!(!health.is_invincible());
        assert!(health.take_damage(1));
    }

    #[test]
    fn test_lethal_damage() {
        let mut health = Health::new(2, 1.0);
        assert!(health.take_damage(5));
        assert_eq!(health.current(), 0);
        assert!(!health.is_alive());
        assert!(!health.is_invincible());
        assert!(!health.take_damage(1));
        assert_eq!(health.heal(1), 0);
    }

    #[test]
    fn test_rejects_non_positive_damage() {
        let mut health = Health::new(3, 0.0);
        assert!(!health.take_damage(0));
        assert!(!health.take_damage(-2));
        assert_eq!(health.current(), 3);
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut health = Health::new(3, 0.0);
        health.take_damage(2);
        assert_eq!(health.heal(5), 3);
    }

    #[test]
    fn test_heal_saturates_on_huge_amount() {
        let mut health = Health::new(3, 0.0);
        health.take_damage(1);
        assert_eq!(health.heal(i32::MAX), 3);
        assert_eq!(health.current(), health.max());
    }
}
