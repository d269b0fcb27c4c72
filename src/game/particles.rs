use rand::Rng;

use super::config::GameConfig;

/// Burst colors, resolved to real colors by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurstColor {
    /// Pickup consumed
    Pink,
    /// Dash engaged
    Teal,
}

/// A single decaying spark
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Remaining life in (0, 1]
    pub life: f32,
    pub size: f32,
    pub color: BurstColor,
}

/// Ephemeral visual feedback for eat and dash events; no gameplay effect
#[derive(Debug, Clone, Default)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Spawn a burst of sparks with randomized velocity and size
    pub fn spawn_burst(&mut self, rng: &mut impl Rng, x: f32, y: f32, color: BurstColor, count: usize) {
        for _ in 0..count {
            self.particles.push(Particle {
                x,
                y,
                vx: (rng.gen::<f32>() - 0.5) * 10.0,
                vy: (rng.gen::<f32>() - 0.5) * 10.0,
                life: 1.0,
                size: rng.gen::<f32>() * 4.0 + 1.0,
                color,
            });
        }
    }

    /// Integrate positions and decay; drops dead sparks
    pub fn tick(&mut self, config: &GameConfig) {
        for p in &mut self.particles {
            p.x += p.vx;
            p.y += p.vy;
            p.life -= config.particle_decay;
        }
        self.particles.retain(|p| p.life > 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_size() {
        let config = GameConfig::classic();
        let mut rng = rand::thread_rng();
        let mut system = ParticleSystem::new();

        system.spawn_burst(&mut rng, 100.0, 100.0, BurstColor::Pink, config.particle_burst);
        assert_eq!(system.len(), config.particle_burst);
        assert!(system.iter().all(|p| p.life == 1.0));
    }

    #[test]
    fn test_decay_removes_dead_particles() {
        let config = GameConfig::classic();
        let mut rng = rand::thread_rng();
        let mut system = ParticleSystem::new();
        system.spawn_burst(&mut rng, 0.0, 0.0, BurstColor::Teal, 5);

        // 1.0 / 0.04 = 25 frames to fully decay
        let frames = (1.0 / config.particle_decay).ceil() as usize;
        for _ in 0..frames {
            system.tick(&config);
        }
        assert!(system.is_empty());
    }

    #[test]
    fn test_particles_drift() {
        let config = GameConfig::classic();
        let mut rng = rand::thread_rng();
        let mut system = ParticleSystem::new();
        system.spawn_burst(&mut rng, 50.0, 50.0, BurstColor::Pink, 10);

        system.tick(&config);
        for p in system.iter() {
            assert!((p.x - 50.0 - p.vx).abs() < 1e-3);
            assert!((p.y - 50.0 - p.vy).abs() < 1e-3);
        }
    }
}
