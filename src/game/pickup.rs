use rand::Rng;

use super::config::GameConfig;
use super::snake::Position;

/// The single active pickup on the grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pickup {
    pub pos: Position,
    /// Render-only spin, advanced each frame
    pub angle: f32,
}

impl Pickup {
    /// Place a pickup at a fresh random cell
    pub fn spawn(rng: &mut impl Rng, config: &GameConfig) -> Self {
        let mut pickup = Self {
            pos: Position::new(0, 0),
            angle: 0.0,
        };
        pickup.respawn(rng, config);
        pickup
    }

    /// Move to a uniformly random interior cell, never the border ring
    pub fn respawn(&mut self, rng: &mut impl Rng, config: &GameConfig) {
        let col = rng.gen_range(0..config.cols() - 2) + 1;
        let row = rng.gen_range(0..config.rows() - 2) + 1;
        self.pos = Position::new(col * config.grid, row * config.grid);
    }
}
