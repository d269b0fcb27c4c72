//! Neon Serpent - a neon arcade snake for the terminal
//!
//! This library provides:
//! - Core simulation (game module): grid-locked motion, trail, collisions,
//!   pickups, stamina-gated dash, particles and the music step sequencer
//! - Procedural audio (audio module): rodio/fundsp chiptune cues and track
//! - TUI rendering (render module)
//! - Key mapping (input module) and interactive play (modes module)

pub mod audio;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
