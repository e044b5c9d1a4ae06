mod display;

use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;

use jetpack_adventure::audio::{self, AudioSink, SilentAudio};
use jetpack_adventure::compute::{apply_command, init_state, tick};
use jetpack_adventure::config::Config;
use jetpack_adventure::entities::{Command, GameStatus};
use jetpack_adventure::input::InputMapper;
use jetpack_adventure::render::{draw_frame, SoundStatus};

use display::Screen;

// ── Setup ─────────────────────────────────────────────────────────────────────

/// Logs go to a file, never the terminal the game is drawing on.
fn init_logging(config: &Config) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = std::fs::File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

#[cfg(feature = "sound")]
fn open_audio(config: &Config, rng: &mut StdRng) -> Box<dyn AudioSink> {
    let bank = audio::synth::SoundBank::generate(rng);
    match audio::DeviceAudio::open(bank, !config.no_music, !config.no_sfx) {
        Ok(device) => Box::new(device),
        Err(err) => {
            log::warn!("audio device unavailable, playing silently: {err}");
            Box::new(SilentAudio::new(!config.no_music, !config.no_sfx))
        }
    }
}

#[cfg(not(feature = "sound"))]
fn open_audio(config: &Config, _rng: &mut StdRng) -> Box<dyn AudioSink> {
    log::info!("built without the `sound` feature, audio is silent");
    Box::new(SilentAudio::new(!config.no_music, !config.no_sfx))
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// One iteration per tick: drain input → update → draw → sleep out the frame.
/// Returns when the player quits.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &Config,
    reports_release: bool,
) -> Result<()> {
    let mut rng = config.rng();
    let mut sink = open_audio(config, &mut rng);
    let mut state = init_state(&mut rng);

    let (cols, rows) = terminal::size().context("cannot read terminal size")?;
    let mut screen = Screen::new(cols, rows);
    let mut input = InputMapper::new(reports_release);
    let mut commands = Vec::new();

    let frame = config.frame_duration();
    let clock = Instant::now();
    log::info!("{cols}x{rows} terminal, {} fps", config.fps);

    loop {
        let frame_start = Instant::now();
        let now_ms = clock.elapsed().as_millis() as u64;

        // ── Input ─────────────────────────────────────────────────────────────
        commands.clear();
        while let Ok(ev) = rx.try_recv() {
            if let Event::Resize(c, r) = ev {
                screen.resize(c, r);
                display::wipe(out)?;
            }
            input.map(&ev, now_ms, &mut commands);
        }
        input.expire(now_ms, &mut commands);

        for &cmd in &commands {
            match cmd {
                Command::Quit => return Ok(()),
                Command::ToggleMusic => sink.toggle_music(),
                Command::ToggleSfx => sink.toggle_sfx(),
                Command::Press | Command::Release => {
                    let events = apply_command(&mut state, cmd, now_ms);
                    audio::respond(sink.as_mut(), &events);
                }
            }
        }

        // ── Update ────────────────────────────────────────────────────────────
        let events = tick(&mut state, now_ms, &mut rng);
        audio::respond(sink.as_mut(), &events);
        sink.set_thrust(state.status == GameStatus::Playing && state.player.thrusting());

        // ── Draw ──────────────────────────────────────────────────────────────
        screen.clear();
        let sound = SoundStatus { music: sink.music_playing(), sfx: sink.sfx_enabled() };
        draw_frame(&mut screen, &state, sound);
        screen.present(out)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let config = Config::parse();
    init_logging(&config)?;
    log::info!("Jetpack Adventure starting");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("cannot switch terminal to raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(terminal::DisableLineWrap)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Ask before the reader thread starts: the query itself reads from stdin.
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
    log::info!("key release reporting: {keyboard_enhanced}");

    // Blocking reads live on their own thread and feed the loop over a channel.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let result = game_loop(&mut out, &rx, &config, keyboard_enhanced);

    // Restore the terminal on every exit path.
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::EnableLineWrap);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = &result {
        log::error!("exiting on error: {err:#}");
    }
    log::info!("bye");
    result
}
