//! Core simulation for the neon snake arcade loop
//!
//! Everything in here is free of I/O, rendering and audio dependencies:
//! the session advances one deterministic `frame()` at a time and reports
//! state transitions as [`GameEvent`]s, so it can be driven headless in
//! tests as easily as from the terminal front end.

pub mod background;
pub mod collision;
pub mod config;
pub mod direction;
pub mod events;
pub mod particles;
pub mod pickup;
pub mod sequencer;
pub mod session;
pub mod snake;
pub mod stamina;

// Re-export commonly used types
pub use collision::Collision;
pub use config::{ConfigError, GameConfig};
pub use direction::Direction;
pub use events::GameEvent;
pub use particles::{BurstColor, Particle, ParticleSystem};
pub use pickup::Pickup;
pub use sequencer::MusicSequencer;
pub use session::{GameSession, Phase};
pub use snake::{Position, Snake};
pub use stamina::Stamina;
