use super::config::GameConfig;
use super::snake::{Position, Snake};

/// A run-ending collision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    /// Head left the playfield
    Wall,
    /// Head ran into the trail
    SelfHit,
}

/// Check for a fatal collision at the snake's current head position
///
/// The self check samples the trail at a fixed stride, starting past the
/// safe zone so segments right behind the head never register, and flags a
/// hit when both axis deltas are inside the pixel tolerance. This is the
/// original sampled approximation rather than exact cell occupancy; the
/// constants live in [`GameConfig`]. While dashing the self check is
/// skipped entirely (walls stay lethal).
pub fn check_fatal(snake: &Snake, config: &GameConfig) -> Option<Collision> {
    let head = snake.pos;
    if head.x < 0 || head.x >= config.width || head.y < 0 || head.y >= config.height {
        return Some(Collision::Wall);
    }

    if !snake.stamina.dashing {
        let mut i = config.safe_zone;
        while i < snake.trail.len() {
            let p = snake.trail[i];
            if (head.x - p.x).abs() < config.self_tolerance
                && (head.y - p.y).abs() < config.self_tolerance
            {
                return Some(Collision::SelfHit);
            }
            i += config.self_stride;
        }
    }

    None
}

/// True when the head is close enough to the pickup to consume it
///
/// Euclidean distance between cell centers, against a fraction of the grid
/// size.
pub fn pickup_reached(head: Position, pickup: Position, config: &GameConfig) -> bool {
    let half = config.grid as f32 / 2.0;
    let dx = (head.x as f32 + half) - (pickup.x as f32 + half);
    let dy = (head.y as f32 + half) - (pickup.y as f32 + half);
    dx.hypot(dy) < config.grid as f32 * config.pickup_radius_frac
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::direction::Direction;

    fn snake_at(x: i32, y: i32, config: &GameConfig) -> Snake {
        let mut snake = Snake::spawn(config);
        // Drop the classic variant's seeded rightward turn so the set
        // velocity survives the next intersection
        snake.clear_input_queue();
        snake.pos = Position::new(x, y);
        snake.trail.clear();
        snake.trail.push_front(snake.pos);
        snake
    }

    #[test]
    fn test_wall_collision_on_left_edge() {
        let config = GameConfig::classic();
        let mut snake = snake_at(0, 200, &config);
        snake.vel = (-config.base_speed, 0);
        snake.step_motion(&config);
        assert_eq!(check_fatal(&snake, &config), Some(Collision::Wall));
    }

    #[test]
    fn test_wall_collision_on_far_edge() {
        let config = GameConfig::classic();
        let snake = snake_at(config.width, 200, &config);
        assert_eq!(check_fatal(&snake, &config), Some(Collision::Wall));

        let snake = snake_at(config.width - 1, 200, &config);
        assert_eq!(check_fatal(&snake, &config), None);
    }

    #[test]
    fn test_self_collision_past_safe_zone() {
        let config = GameConfig::classic();
        let mut snake = snake_at(400, 200, &config);

        // Pad the trail past the safe zone, far from the head, then plant
        // a segment back under it at a sampled index
        for i in 0..config.safe_zone as i32 + 7 {
            snake.trail.push_back(Position::new(100 + i, 500));
        }
        snake.trail.push_back(Position::new(401, 202));
        assert_eq!((snake.trail.len() - 1 - config.safe_zone) % config.self_stride, 0);

        assert_eq!(check_fatal(&snake, &config), Some(Collision::SelfHit));
    }

    #[test]
    fn test_safe_zone_excludes_near_segments() {
        let config = GameConfig::classic();
        let mut snake = snake_at(400, 200, &config);

        // Everything within the safe zone overlaps the head exactly
        for _ in 0..config.safe_zone - 1 {
            snake.trail.push_back(snake.pos);
        }
        assert_eq!(check_fatal(&snake, &config), None);
    }

    #[test]
    fn test_dash_suppresses_self_collision_only() {
        let config = GameConfig::dash();
        let mut snake = snake_at(400, 200, &config);
        for i in 0..config.safe_zone as i32 + 8 {
            snake.trail.push_back(Position::new(100 + i, 500));
        }
        snake.trail.push_back(snake.pos);
        assert!(snake.stamina.try_engage(&config));

        assert_eq!(check_fatal(&snake, &config), None);

        // Walls stay lethal while dashing
        snake.pos = Position::new(-config.dash_speed, 200);
        assert_eq!(check_fatal(&snake, &config), Some(Collision::Wall));
    }

    #[test]
    fn test_pickup_radius() {
        let config = GameConfig::classic();
        let head = Position::new(400, 200);

        let near = Position::new(400 + (config.grid as f32 * 0.79) as i32, 200);
        assert!(pickup_reached(head, near, &config));

        let far = Position::new(400 + (config.grid as f32 * 0.81) as i32, 200);
        assert!(!pickup_reached(head, far, &config));
    }

    #[test]
    fn test_moving_snake_survives_open_field() {
        let config = GameConfig::classic();
        let mut snake = Snake::spawn(&config);
        snake.queue_turn(Direction::Up, &config);
        for _ in 0..20 {
            snake.step_motion(&config);
            snake.push_trail();
            assert_eq!(check_fatal(&snake, &config), None);
        }
    }
}
