use super::config::GameConfig;

/// Stamina-gated dash state
///
/// Drains at a fixed rate per frame while dashing and regenerates otherwise,
/// always clamped to `[0, stamina_max]`. Engaging requires stamina above the
/// configured minimum; depletion to zero forces a release.
#[derive(Debug, Clone, PartialEq)]
pub struct Stamina {
    pub value: f32,
    pub dashing: bool,
}

impl Stamina {
    pub fn full(config: &GameConfig) -> Self {
        Self {
            value: config.stamina_max,
            dashing: false,
        }
    }

    /// Attempt to engage a dash; returns true on the idle -> dashing
    /// transition
    pub fn try_engage(&mut self, config: &GameConfig) -> bool {
        if self.dashing || self.value <= config.dash_min_stamina {
            return false;
        }
        self.dashing = true;
        true
    }

    /// Voluntary release; returns true on the dashing -> idle transition
    pub fn release(&mut self) -> bool {
        let was_dashing = self.dashing;
        self.dashing = false;
        was_dashing
    }

    /// Per-frame drain or regen; returns true when depletion forced the
    /// dash to end this frame
    pub fn tick(&mut self, config: &GameConfig) -> bool {
        if self.dashing {
            self.value = (self.value - config.stamina_drain).max(0.0);
            if self.value <= 0.0 {
                self.dashing = false;
                return true;
            }
        } else {
            self.value = (self.value + config.stamina_regen).min(config.stamina_max);
        }
        false
    }

    /// Bonus granted on eating a pickup, in any state
    pub fn on_eat(&mut self, config: &GameConfig) {
        self.value = (self.value + config.stamina_eat_bonus).min(config.stamina_max);
    }

    /// Fill fraction in [0, 1] for the HUD gauge
    pub fn ratio(&self, config: &GameConfig) -> f32 {
        (self.value / config.stamina_max).clamp(0.0, 1.0)
    }
}
