use rand::Rng;

use super::config::GameConfig;

/// A drifting neon circuit line in the backdrop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircuitLine {
    pub x: f32,
    pub y: f32,
    pub length: f32,
    pub horizontal: bool,
    pub speed: f32,
    pub opacity: f32,
}

/// The animated circuit-board backdrop
///
/// Purely decorative; advances every frame in every phase, including while
/// the session sits on the start or game-over screen.
#[derive(Debug, Clone, Default)]
pub struct Background {
    pub lines: Vec<CircuitLine>,
}

impl Background {
    pub fn generate(rng: &mut impl Rng, config: &GameConfig) -> Self {
        let lines = (0..config.circuit_lines)
            .map(|_| CircuitLine {
                x: rng.gen::<f32>() * config.width as f32,
                y: rng.gen::<f32>() * config.height as f32,
                length: rng.gen::<f32>() * 100.0 + 50.0,
                horizontal: rng.gen_bool(0.5),
                speed: (rng.gen::<f32>() * 2.0 + 1.0) * if rng.gen_bool(0.5) { 1.0 } else { -1.0 },
                opacity: rng.gen::<f32>() * 0.2,
            })
            .collect();
        Self { lines }
    }

    /// Drift each line along its axis, wrapping at the playfield edges
    pub fn tick(&mut self, config: &GameConfig) {
        let (w, h) = (config.width as f32, config.height as f32);
        for line in &mut self.lines {
            if line.horizontal {
                line.x += line.speed;
            } else {
                line.y += line.speed;
            }
            if line.x > w {
                line.x = 0.0;
            }
            if line.x < 0.0 {
                line.x = w;
            }
            if line.y > h {
                line.y = 0.0;
            }
            if line.y < 0.0 {
                line.y = h;
            }
        }
    }
}
