use std::time::Duration;

use clap::Parser;
use jetpack_adventure::config::Config;
use rand::Rng;

#[test]
fn defaults() {
    let config = Config::try_parse_from(["jetpack_adventure"]).unwrap();
    assert_eq!(config.fps, 60);
    assert_eq!(config.seed, None);
    assert!(!config.no_music);
    assert!(!config.no_sfx);
    assert!(config.log_file.is_none());
    assert_eq!(config.frame_duration(), Duration::from_nanos(16_666_666));
}

#[test]
fn flags_parse() {
    let config = Config::try_parse_from([
        "jetpack_adventure",
        "--seed",
        "7",
        "--fps",
        "30",
        "--no-music",
        "--no-sfx",
        "--log-file",
        "game.log",
    ])
    .unwrap();
    assert_eq!(config.seed, Some(7));
    assert_eq!(config.fps, 30);
    assert!(config.no_music && config.no_sfx);
    assert_eq!(config.log_file.as_deref(), Some(std::path::Path::new("game.log")));
}

#[test]
fn fps_out_of_range_is_rejected() {
    assert!(Config::try_parse_from(["jetpack_adventure", "--fps", "0"]).is_err());
    assert!(Config::try_parse_from(["jetpack_adventure", "--fps", "1000"]).is_err());
}

#[test]
fn seeded_runs_repeat() {
    let config = Config::try_parse_from(["jetpack_adventure", "--seed", "99"]).unwrap();
    let a: u64 = config.rng().gen();
    let b: u64 = config.rng().gen();
    assert_eq!(a, b);
}
