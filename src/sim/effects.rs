//! Timed power-up effects
//!
//! Effects count down in simulation ticks, so they stop while the game is
//! paused and expire inside the same update that moves the ball.

use super::brick::PowerUp;

/// One running timed effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveEffect {
    pub kind: PowerUp,
    pub remaining_ticks: u32,
}

/// Active power-up effects, oldest first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActiveEffects {
    effects: Vec<ActiveEffect>,
}

impl ActiveEffects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, kind: PowerUp, duration_ticks: u32) {
        self.effects.push(ActiveEffect {
            kind,
            remaining_ticks: duration_ticks,
        });
    }

    /// Count down one tick and return the kinds that just expired, in start order
    pub fn tick(&mut self) -> Vec<PowerUp> {
        let mut expired = Vec::new();
        self.effects.retain_mut(|effect| {
            effect.remaining_ticks = effect.remaining_ticks.saturating_sub(1);
            if effect.remaining_ticks == 0 {
                expired.push(effect.kind);
                false
            } else {
                true
            }
        });
        expired
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveEffect> {
        self.effects.iter()
    }

    pub fn is_active(&self, kind: PowerUp) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expires_after_duration() {
        let mut effects = ActiveEffects::new();
        effects.start(PowerUp::Yellow, 3);
        assert!(effects.tick().is_empty());
        assert!(effects.tick().is_empty());
        assert_eq!(effects.tick(), vec![PowerUp::Yellow]);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_overlapping_effects_expire_independently() {
        let mut effects = ActiveEffects::new();
        effects.start(PowerUp::Red, 2);
        effects.start(PowerUp::Green, 1);
        assert_eq!(effects.tick(), vec![PowerUp::Green]);
        assert!(effects.is_active(PowerUp::Red));
        assert!(!effects.is_active(PowerUp::Green));
        assert_eq!(effects.tick(), vec![PowerUp::Red]);
    }
}
