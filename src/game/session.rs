use rand::rngs::ThreadRng;

use super::background::Background;
use super::collision;
use super::config::{ConfigError, GameConfig};
use super::direction::Direction;
use super::events::GameEvent;
use super::particles::{BurstColor, ParticleSystem};
use super::pickup::Pickup;
use super::sequencer::MusicSequencer;
use super::snake::Snake;

/// Phase of the run state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    GameOver,
}

/// One complete game: snake, pickup, particles, backdrop, sequencer and
/// run state, advanced by a single `frame()` call per display tick
///
/// Everything mutates synchronously inside `frame()`; there are no other
/// writers. Input lands in the snake's bounded queue via [`queue_turn`]
/// and is only applied at the next frame, keeping per-tick processing
/// deterministic.
///
/// [`queue_turn`]: GameSession::queue_turn
pub struct GameSession {
    pub config: GameConfig,
    pub phase: Phase,
    pub score: u32,
    pub frames: u64,
    pub snake: Snake,
    pub pickup: Pickup,
    pub particles: ParticleSystem,
    pub background: Background,
    sequencer: MusicSequencer,
    rng: ThreadRng,
}

impl GameSession {
    /// Build an idle session; fails on a configuration that would strand
    /// the snake off the intersection lattice
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = rand::thread_rng();
        let snake = Snake::spawn(&config);
        let pickup = Pickup::spawn(&mut rng, &config);
        let background = Background::generate(&mut rng, &config);
        let sequencer = MusicSequencer::new(config.frames_per_music_step);
        Ok(Self {
            config,
            phase: Phase::Idle,
            score: 0,
            frames: 0,
            snake,
            pickup,
            particles: ParticleSystem::new(),
            background,
            sequencer,
            rng,
        })
    }

    /// Begin (or restart) a run, resetting score, snake, pickup, particles
    /// and the music sequencer
    pub fn start(&mut self) -> GameEvent {
        self.phase = Phase::Running;
        self.score = 0;
        self.snake = Snake::spawn(&self.config);
        self.pickup.respawn(&mut self.rng, &self.config);
        self.particles.clear();
        self.sequencer.reset();
        GameEvent::Started
    }

    /// Buffer a turn intent; returns true if the snake accepted it
    /// (the front end plays the move blip on acceptance)
    pub fn queue_turn(&mut self, dir: Direction) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        self.snake.queue_turn(dir, &self.config)
    }

    /// Press or release the dash control
    ///
    /// Engagement is stamina-gated and only meaningful in the dash variant
    /// while running; a successful engage spawns a teal burst at the head.
    pub fn set_dash_held(&mut self, held: bool) -> Option<GameEvent> {
        if !self.config.dash_enabled {
            return None;
        }
        if self.phase != Phase::Running {
            return None;
        }
        if held {
            if self.snake.stamina.try_engage(&self.config) {
                let half = self.config.grid as f32 / 2.0;
                self.particles.spawn_burst(
                    &mut self.rng,
                    self.snake.pos.x as f32 + half,
                    self.snake.pos.y as f32 + half,
                    BurstColor::Teal,
                    self.config.particle_burst,
                );
                return Some(GameEvent::DashStarted);
            }
        } else if self.snake.stamina.release() {
            return Some(GameEvent::DashEnded);
        }
        None
    }

    /// Advance one display tick
    ///
    /// While running: stamina, motion, trail, collisions, pickup and the
    /// music step. In every phase: particles, backdrop and the frame
    /// counter, so ambience keeps animating on the start and game-over
    /// screens.
    pub fn frame(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();

        if self.phase == Phase::Running {
            self.simulate(&mut events);
        }

        self.particles.tick(&self.config);
        self.background.tick(&self.config);
        self.pickup.angle += 0.05;
        self.frames += 1;
        events
    }

    fn simulate(&mut self, events: &mut Vec<GameEvent>) {
        if self.config.dash_enabled && self.snake.stamina.tick(&self.config) {
            events.push(GameEvent::DashEnded);
        }

        if self.snake.step_motion(&self.config) {
            self.snake.push_trail();
            self.snake.enforce_trail_length(self.score, &self.config);

            if collision::check_fatal(&self.snake, &self.config).is_some() {
                self.phase = Phase::GameOver;
                events.push(GameEvent::Crashed {
                    final_score: self.score,
                });
                return;
            }

            if collision::pickup_reached(self.snake.pos, self.pickup.pos, &self.config) {
                self.consume_pickup(events);
            }
        }

        if let Some(step) = self.sequencer.advance() {
            events.push(GameEvent::MusicStep {
                step,
                dashing: self.snake.stamina.dashing,
            });
        }
    }

    fn consume_pickup(&mut self, events: &mut Vec<GameEvent>) {
        self.score += 1;
        if self.config.dash_enabled {
            self.snake.stamina.on_eat(&self.config);
        }
        let half = self.config.grid as f32 / 2.0;
        self.particles.spawn_burst(
            &mut self.rng,
            self.pickup.pos.x as f32 + half,
            self.pickup.pos.y as f32 + half,
            BurstColor::Pink,
            self.config.particle_burst,
        );
        self.pickup.respawn(&mut self.rng, &self.config);
        events.push(GameEvent::Ate { score: self.score });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::snake::Position;

    fn running_session(config: GameConfig) -> GameSession {
        let mut session = GameSession::new(config).unwrap();
        session.start();
        session
    }

    #[test]
    fn test_start_resets_run_state() {
        let mut session = running_session(GameConfig::classic());
        session.score = 7;
        session.phase = Phase::GameOver;

        assert_eq!(session.start(), GameEvent::Started);
        assert_eq!(session.phase, Phase::Running);
        assert_eq!(session.score, 0);
        assert!(!session.snake.trail.is_empty());
    }

    #[test]
    fn test_idle_frame_animates_ambience_only() {
        let mut session = GameSession::new(GameConfig::classic()).unwrap();
        let head = session.snake.pos;

        let events = session.frame();
        assert!(events.is_empty());
        assert_eq!(session.frames, 1);
        assert_eq!(session.snake.pos, head);
    }

    #[test]
    fn test_wall_crash_transitions_to_game_over() {
        let mut session = running_session(GameConfig::classic());
        session.frame(); // drain the seeded rightward turn
        session.snake.pos = Position::new(0, 200);
        session.snake.vel = (-session.config.base_speed, 0);

        let events = session.frame();
        assert!(events.contains(&GameEvent::Crashed { final_score: 0 }));
        assert_eq!(session.phase, Phase::GameOver);

        // Terminal state: the snake no longer advances
        let head = session.snake.pos;
        session.frame();
        assert_eq!(session.snake.pos, head);
    }

    #[test]
    fn test_eating_scores_respawns_and_bursts() {
        let mut session = running_session(GameConfig::classic());
        let grid = session.config.grid;

        // Put the pickup within the consumption radius of the next head
        // position
        session.snake.pos = Position::new(8 * grid, 6 * grid);
        session.snake.vel = (session.config.base_speed, 0);
        let head_after = session.snake.pos.x + session.config.base_speed;
        session.pickup.pos = Position::new(head_after + (grid as f32 * 0.5) as i32, 6 * grid);
        let old_pickup = session.pickup.pos;

        let events = session.frame();
        assert!(events.contains(&GameEvent::Ate { score: 1 }));
        assert_eq!(session.score, 1);
        assert_ne!(session.pickup.pos, old_pickup);
        // Burst spawned this frame, one decay tick applied
        assert_eq!(session.particles.len(), session.config.particle_burst);
    }

    #[test]
    fn test_music_steps_only_while_running() {
        let mut session = GameSession::new(GameConfig::classic()).unwrap();
        let frames = session.config.frames_per_music_step as usize * 3;
        for _ in 0..frames {
            assert!(session.frame().is_empty());
        }

        session.start();
        // Classic snake cruises from center; a few steps are safe
        let mut steps = Vec::new();
        for _ in 0..frames {
            for event in session.frame() {
                if let GameEvent::MusicStep { step, .. } = event {
                    steps.push(step);
                }
            }
        }
        assert_eq!(steps, vec![0, 1, 2]);
    }

    #[test]
    fn test_dash_lifecycle() {
        let mut session = running_session(GameConfig::dash());
        session.queue_turn(Direction::Right);
        session.frame();

        assert_eq!(session.set_dash_held(true), Some(GameEvent::DashStarted));
        assert!(session.snake.stamina.dashing);
        // Engage burst is visible
        assert!(session.particles.len() > 0);

        assert_eq!(session.set_dash_held(false), Some(GameEvent::DashEnded));
        assert!(!session.snake.stamina.dashing);
    }

    #[test]
    fn test_dash_rejected_below_threshold() {
        let mut session = running_session(GameConfig::dash());
        session.queue_turn(Direction::Right);
        session.frame();

        session.snake.stamina.value = 5.0;
        assert_eq!(session.set_dash_held(true), None);
        assert!(!session.snake.stamina.dashing);
    }

    #[test]
    fn test_dash_depletion_emits_end_event() {
        let mut config = GameConfig::dash();
        config.stamina_drain = 60.0; // deplete in two frames
        let mut session = running_session(config);
        session.queue_turn(Direction::Right);
        session.frame();
        session.set_dash_held(true);

        let mut ended = false;
        for _ in 0..4 {
            if session.frame().contains(&GameEvent::DashEnded) {
                ended = true;
                break;
            }
        }
        assert!(ended);
        assert!(!session.snake.stamina.dashing);
        assert_eq!(session.snake.stamina.value, 0.0);
    }

    #[test]
    fn test_dash_ignored_in_classic_variant() {
        let mut session = running_session(GameConfig::classic());
        assert_eq!(session.set_dash_held(true), None);
        assert!(!session.snake.stamina.dashing);
    }

    #[test]
    fn test_turns_ignored_unless_running() {
        let mut session = GameSession::new(GameConfig::dash()).unwrap();
        assert!(!session.queue_turn(Direction::Up));
        session.start();
        assert!(session.queue_turn(Direction::Up));
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = GameConfig::dash();
        config.dash_speed = 7;
        assert!(GameSession::new(config).is_err());
    }
}
