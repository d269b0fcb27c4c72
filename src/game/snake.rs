use std::collections::VecDeque;

use super::config::GameConfig;
use super::direction::Direction;
use super::stamina::Stamina;

/// A position in pixel space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// True when both coordinates sit exactly on the grid lattice
    pub fn at_intersection(&self, grid: i32) -> bool {
        self.x % grid == 0 && self.y % grid == 0
    }
}

/// The snake: head position, axis-aligned velocity, buffered turn intents
/// and the trail of past head positions (newest first)
///
/// Velocity keeps at most one non-zero component, and that component's
/// magnitude is always exactly the current speed constant. Turns are queued
/// rather than applied immediately and take effect only at intersections.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    pub pos: Position,
    /// (vx, vy); at most one component non-zero
    pub vel: (i32, i32),
    input_queue: VecDeque<Direction>,
    pub trail: VecDeque<Position>,
    pub stamina: Stamina,
}

impl Snake {
    /// Spawn at the center of the playfield with a short seed trail laid
    /// out to the left of the head
    ///
    /// Classic rules pre-seed the queue with a rightward turn so the snake
    /// moves immediately; dash rules leave velocity zero until the player
    /// picks a direction.
    pub fn spawn(config: &GameConfig) -> Self {
        let pos = Position::new(
            config.cols() / 2 * config.grid,
            config.rows() / 2 * config.grid,
        );

        let mut input_queue = VecDeque::new();
        if !config.dash_enabled {
            input_queue.push_back(Direction::Right);
        }

        let mut trail = VecDeque::new();
        for i in 0..config.seed_trail_len as i32 {
            trail.push_back(Position::new(pos.x - i * config.base_speed, pos.y));
        }

        Self {
            pos,
            vel: (0, 0),
            input_queue,
            trail,
            stamina: Stamina::full(config),
        }
    }

    /// Current speed constant for this frame
    pub fn current_speed(&self, config: &GameConfig) -> i32 {
        if self.stamina.dashing {
            config.dash_speed
        } else {
            config.base_speed
        }
    }

    /// Buffer a turn intent; returns true if it was accepted
    ///
    /// Rejected when the queue is at capacity or the request shares an axis
    /// with the last buffered (or current) direction, which covers both
    /// reversals and no-op repeats.
    pub fn queue_turn(&mut self, dir: Direction, config: &GameConfig) -> bool {
        if self.input_queue.len() >= config.input_queue_cap() {
            return false;
        }
        let conflicts = match self.input_queue.back() {
            Some(last) => dir.same_axis(*last),
            None => {
                // No buffered intent: test against the current heading;
                // a stationary snake accepts any direction
                let (dx, dy) = dir.delta();
                (dx != 0 && self.vel.0 != 0) || (dy != 0 && self.vel.1 != 0)
            }
        };
        if conflicts {
            return false;
        }
        self.input_queue.push_back(dir);
        true
    }

    pub fn queued_turns(&self) -> usize {
        self.input_queue.len()
    }

    #[cfg(test)]
    pub(crate) fn clear_input_queue(&mut self) {
        self.input_queue.clear();
    }

    /// Advance one frame; returns true if the head actually moved
    ///
    /// At an intersection the oldest buffered turn becomes the new velocity;
    /// with an empty queue the velocity magnitude is renormalized to the
    /// current speed (so a dash toggle lands on the next intersection in the
    /// classic path). Between intersections the dash variant renormalizes
    /// every frame, but only once the coordinate on the motion axis is a
    /// multiple of the new speed, keeping the trajectory on the lattice.
    pub fn step_motion(&mut self, config: &GameConfig) -> bool {
        let speed = self.current_speed(config);

        if self.pos.at_intersection(config.grid) {
            if let Some(dir) = self.input_queue.pop_front() {
                let (dx, dy) = dir.delta();
                self.vel = (dx * speed, dy * speed);
            } else {
                self.vel.0 = self.vel.0.signum() * speed;
                self.vel.1 = self.vel.1.signum() * speed;
            }
        } else if config.dash_enabled {
            if self.vel.0 != 0 && self.pos.x % speed == 0 {
                self.vel.0 = self.vel.0.signum() * speed;
            }
            if self.vel.1 != 0 && self.pos.y % speed == 0 {
                self.vel.1 = self.vel.1.signum() * speed;
            }
        }

        if self.vel == (0, 0) {
            return false;
        }
        self.pos.x += self.vel.0;
        self.pos.y += self.vel.1;
        true
    }

    /// Record the new head position in the trail
    pub fn push_trail(&mut self) {
        self.trail.push_front(self.pos);
    }

    /// Truncate the trail beyond the score-derived target length
    ///
    /// Target entries scale inversely with speed so the rendered segment
    /// spacing stays constant as the dash toggles.
    pub fn enforce_trail_length(&mut self, score: u32, config: &GameConfig) {
        let speed = self.current_speed(config);
        let target = ((config.base_segments + score) as i32 * config.grid / speed) as usize;
        while self.trail.len() > target.max(1) {
            self.trail.pop_back();
        }
    }
}
