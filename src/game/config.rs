use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors caught by [`GameConfig::validate`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("playfield {axis} ({pixels}px) is not a multiple of the grid size ({grid}px)")]
    MisalignedPlayfield {
        axis: &'static str,
        pixels: i32,
        grid: i32,
    },
    #[error("{which} speed ({speed}px/frame) does not evenly divide the grid size ({grid}px)")]
    MisalignedSpeed {
        which: &'static str,
        speed: i32,
        grid: i32,
    },
    #[error("playfield must be at least 3x3 grid cells, got {cols}x{rows}")]
    PlayfieldTooSmall { cols: i32, rows: i32 },
    #[error("self-collision sampling stride must be non-zero")]
    ZeroSelfStride,
    #[error("music step interval must be at least one frame")]
    ZeroMusicInterval,
}

/// Configuration for a game session
///
/// Positions and dimensions are in pixels; speeds are pixels per frame. A
/// direction change only takes effect when the head sits exactly on a grid
/// intersection, so every speed must evenly divide the grid size or the head
/// drifts off the intersection lattice and can never turn again. Callers are
/// expected to [`validate`](GameConfig::validate) before starting a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Playfield width in pixels
    pub width: i32,
    /// Playfield height in pixels
    pub height: i32,
    /// Grid cell size in pixels
    pub grid: i32,
    /// Cruise speed in pixels per frame
    pub base_speed: i32,
    /// Dash speed in pixels per frame
    pub dash_speed: i32,
    /// Whether the dash mechanic is available
    pub dash_enabled: bool,

    /// Body segments at score zero
    pub base_segments: u32,
    /// Trail entries laid out behind the head at start
    pub seed_trail_len: usize,

    // Stamina (dash variant)
    pub stamina_max: f32,
    /// Stamina drained per frame while dashing
    pub stamina_drain: f32,
    /// Stamina regained per frame while not dashing
    pub stamina_regen: f32,
    /// Stamina granted on eating a pickup
    pub stamina_eat_bonus: f32,
    /// Minimum stamina required to engage a dash
    pub dash_min_stamina: f32,

    // Self-collision sampling
    /// Trail entries nearest the head excluded from self-collision
    pub safe_zone: usize,
    /// Sampling stride through the trail
    pub self_stride: usize,
    /// Per-axis pixel tolerance for a self hit
    pub self_tolerance: i32,
    /// Pickup consumption radius as a fraction of the grid size
    pub pickup_radius_frac: f32,

    // Visual effects
    /// Particles spawned per eat/dash burst
    pub particle_burst: usize,
    /// Life removed from each particle per frame
    pub particle_decay: f32,
    /// Drifting background circuit lines
    pub circuit_lines: usize,

    /// Frames between music sequencer steps (9 frames at 60 FPS is the
    /// original 150ms chiptune tempo)
    pub frames_per_music_step: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            grid: 40,
            base_speed: 2,
            dash_speed: 4,
            dash_enabled: false,
            base_segments: 3,
            seed_trail_len: 12,
            stamina_max: 100.0,
            stamina_drain: 0.8,
            stamina_regen: 0.3,
            stamina_eat_bonus: 25.0,
            dash_min_stamina: 10.0,
            safe_zone: 40,
            self_stride: 4,
            self_tolerance: 5,
            pickup_radius_frac: 0.8,
            particle_burst: 15,
            particle_decay: 0.04,
            circuit_lines: 25,
            frames_per_music_step: 9,
        }
    }
}

impl GameConfig {
    /// Classic rules: queue of two, snake pre-moves at start, no dash
    pub fn classic() -> Self {
        Self::default()
    }

    /// Dash rules: queue of three, snake waits for the first input,
    /// stamina-gated speed boost
    pub fn dash() -> Self {
        Self {
            dash_enabled: true,
            ..Self::default()
        }
    }

    /// Override the playfield size
    pub fn with_playfield(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Check the intersection-lattice invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= 0 || self.width % self.grid != 0 {
            return Err(ConfigError::MisalignedPlayfield {
                axis: "width",
                pixels: self.width,
                grid: self.grid,
            });
        }
        if self.height <= 0 || self.height % self.grid != 0 {
            return Err(ConfigError::MisalignedPlayfield {
                axis: "height",
                pixels: self.height,
                grid: self.grid,
            });
        }
        if self.base_speed <= 0 || self.grid % self.base_speed != 0 {
            return Err(ConfigError::MisalignedSpeed {
                which: "base",
                speed: self.base_speed,
                grid: self.grid,
            });
        }
        if self.dash_enabled && (self.dash_speed <= 0 || self.grid % self.dash_speed != 0) {
            return Err(ConfigError::MisalignedSpeed {
                which: "dash",
                speed: self.dash_speed,
                grid: self.grid,
            });
        }
        let (cols, rows) = (self.cols(), self.rows());
        if cols < 3 || rows < 3 {
            return Err(ConfigError::PlayfieldTooSmall { cols, rows });
        }
        // A zero stride would spin the sampling loop in place
        if self.self_stride == 0 {
            return Err(ConfigError::ZeroSelfStride);
        }
        if self.frames_per_music_step == 0 {
            return Err(ConfigError::ZeroMusicInterval);
        }
        Ok(())
    }

    /// Grid columns across the playfield
    pub fn cols(&self) -> i32 {
        self.width / self.grid
    }

    /// Grid rows down the playfield
    pub fn rows(&self) -> i32 {
        self.height / self.grid
    }

    /// Input queue capacity for the active variant
    pub fn input_queue_cap(&self) -> usize {
        if self.dash_enabled {
            3
        } else {
            2
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configs_are_valid() {
        assert_eq!(GameConfig::classic().validate(), Ok(()));
        assert_eq!(GameConfig::dash().validate(), Ok(()));
    }

    #[test]
    fn test_queue_capacity_by_variant() {
        assert_eq!(GameConfig::classic().input_queue_cap(), 2);
        assert_eq!(GameConfig::dash().input_queue_cap(), 3);
    }

    #[test]
    fn test_rejects_misaligned_playfield() {
        let config = GameConfig::classic().with_playfield(810, 600);
        assert_eq!(
            config.validate(),
            Err(ConfigError::MisalignedPlayfield {
                axis: "width",
                pixels: 810,
                grid: 40,
            })
        );
    }

    #[test]
    fn test_rejects_speed_not_dividing_grid() {
        let mut config = GameConfig::classic();
        config.base_speed = 3;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MisalignedSpeed { which: "base", .. })
        ));

        let mut config = GameConfig::dash();
        config.dash_speed = 7;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MisalignedSpeed { which: "dash", .. })
        ));
    }

    #[test]
    fn test_rejects_zero_stride_and_interval() {
        let mut config = GameConfig::classic();
        config.self_stride = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroSelfStride));

        let mut config = GameConfig::classic();
        config.frames_per_music_step = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroMusicInterval));
    }

    #[test]
    fn test_dash_speed_unchecked_in_classic() {
        let mut config = GameConfig::classic();
        config.dash_speed = 7;
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_grid_dimensions() {
        let config = GameConfig::classic();
        assert_eq!(config.cols(), 20);
        assert_eq!(config.rows(), 15);
    }
}
