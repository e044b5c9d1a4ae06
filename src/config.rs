//! Command-line configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Parser, Debug, Clone)]
#[command(name = "jetpack_adventure", version, about = "Dodge missiles and lasers, grab coins, don't touch the ground too hard")]
pub struct Config {
    /// Seed the random number generator for a repeatable run.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Target frames per second.
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,

    /// Start with background music switched off.
    #[arg(long)]
    pub no_music: bool,

    /// Start with sound effects switched off.
    #[arg(long)]
    pub no_sfx: bool,

    /// Write logs to this file (filtered by RUST_LOG, default `info`).
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.fps
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
