//! Jetpack Adventure: a side-scrolling jetpack arcade game for the terminal.
//!
//! - `entities`: pure game data
//! - `compute`: physics, spawning, collisions and the game state machine
//! - `effects`: particles and explosions
//! - `background`: parallax skyline
//! - `input`: terminal events to commands, with held-key inference
//! - `render`: the `Canvas` seam and the per-frame draw order
//! - `audio`: sound cues, procedural synthesis and output sinks
//! - `config`: command-line options

pub mod audio;
pub mod background;
pub mod compute;
pub mod config;
pub mod effects;
pub mod entities;
pub mod input;
pub mod render;
