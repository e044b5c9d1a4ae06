use jetpack_adventure::compute::*;
use jetpack_adventure::entities::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

fn rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// A running game at t=0 with no spawns due.
fn playing_state(rng: &mut StdRng) -> GameState {
    let mut state = init_state(rng);
    start_game(&mut state, 0);
    state
}

// ── Player physics ────────────────────────────────────────────────────────────

#[test]
fn gravity_accelerates_until_terminal_velocity() {
    let mut rng = rng();
    let mut p = new_player();
    p.y = 0.0;
    let mut sink: Vec<Particle> = Vec::new();

    for _ in 0..60 {
        let before = p.velocity;
        update_player(&mut p, &mut sink, &mut rng);
        let expected = (before + GRAVITY).min(MAX_VELOCITY);
        assert!(approx(p.velocity, expected), "{} vs {}", p.velocity, expected);
        assert!(p.velocity <= MAX_VELOCITY);
    }
    assert_eq!(p.velocity, MAX_VELOCITY);
    assert!(sink.is_empty(), "falling emits nothing");
}

#[test]
fn jetpack_lifts_until_terminal_velocity() {
    let mut rng = rng();
    let mut p = new_player();
    p.y = 600.0;
    p.jetpack_on = true;
    let mut sink: Vec<Particle> = Vec::new();

    for _ in 0..20 {
        let before = p.velocity;
        update_player(&mut p, &mut sink, &mut rng);
        let expected = (before - JETPACK_ACCELERATION).max(-MAX_VELOCITY);
        assert!(approx(p.velocity, expected), "{} vs {}", p.velocity, expected);
    }
    assert_eq!(p.velocity, -MAX_VELOCITY);
    assert!(p.y < 600.0);
    assert!(sink.iter().all(|s| s.kind == ParticleKind::Smoke));
}

#[test]
fn thrust_smokes_about_thirty_percent_of_ticks() {
    let mut rng = rng();
    let mut p = new_player();
    p.jetpack_on = true;
    let mut sink: Vec<Particle> = Vec::new();

    let ticks = 2000;
    for _ in 0..ticks {
        update_player(&mut p, &mut sink, &mut rng);
    }
    // Pinned against the ceiling the whole time: no dust, only exhaust
    assert!(sink.iter().all(|s| s.kind == ParticleKind::Smoke));
    let rate = sink.len() as f32 / ticks as f32;
    assert!((0.25..=0.35).contains(&rate), "smoke rate {rate}");
    for s in &sink {
        assert_eq!(s.x, PLAYER_X + 5.0);
    }
}

#[test]
fn releasing_jetpack_bleeds_upward_velocity() {
    let mut rng = rng();
    let mut sink: Vec<Particle> = Vec::new();

    let mut p = new_player();
    p.velocity = -5.0;
    update_player(&mut p, &mut sink, &mut rng);
    assert!(approx(p.velocity, -4.3));

    // Bleed never flips the sign
    let mut p = new_player();
    p.velocity = -0.5;
    update_player(&mut p, &mut sink, &mut rng);
    assert_eq!(p.velocity, 0.0);

    // Gravity alone already made it positive: no bleed
    let mut p = new_player();
    p.velocity = -0.2;
    update_player(&mut p, &mut sink, &mut rng);
    assert!(approx(p.velocity, 0.1));
}

#[test]
fn ceiling_bounce() {
    let mut rng = rng();
    let mut p = new_player();
    p.y = 2.0;
    p.velocity = -10.0;
    p.jetpack_on = true;
    let mut sink: Vec<Particle> = Vec::new();

    update_player(&mut p, &mut sink, &mut rng);
    assert_eq!(p.y, 0.0);
    assert!(approx(p.velocity, 10.8 * 0.2));
}

#[test]
fn hard_landing_bounces_and_kicks_up_dust() {
    let mut rng = rng();
    let mut p = new_player();
    p.y = 615.0;
    p.velocity = 10.0;
    let mut sink: Vec<Particle> = Vec::new();

    update_player(&mut p, &mut sink, &mut rng);
    assert_eq!(p.y, SCREEN_HEIGHT - PLAYER_HEIGHT);
    assert!(approx(p.velocity, -10.3 * 0.2));
    assert_eq!(sink.len(), 5);
    for d in &sink {
        assert_eq!(d.kind, ParticleKind::Dust);
        assert!(d.x >= PLAYER_X + 10.0 && d.x <= PLAYER_X + PLAYER_WIDTH - 10.0);
        assert_eq!(d.y, SCREEN_HEIGHT);
    }
}

#[test]
fn soft_landing_raises_no_dust() {
    let mut rng = rng();
    let mut p = new_player();
    p.y = 619.9;
    p.velocity = 0.5;
    let mut sink: Vec<Particle> = Vec::new();

    update_player(&mut p, &mut sink, &mut rng);
    assert_eq!(p.y, SCREEN_HEIGHT - PLAYER_HEIGHT);
    assert!(sink.is_empty());
}

#[test]
fn player_stays_in_bounds() {
    let mut rng = rng();
    let mut p = new_player();
    let mut sink: Vec<Particle> = Vec::new();

    for i in 0..600 {
        p.jetpack_on = (i / 50) % 2 == 0;
        update_player(&mut p, &mut sink, &mut rng);
        assert!(p.y >= 0.0 && p.y <= SCREEN_HEIGHT - PLAYER_HEIGHT);
        assert!(p.velocity.abs() <= MAX_VELOCITY);
        assert!(p.frame >= 0.0 && p.frame < PLAYER_FRAMES as f32);
    }
}

#[test]
fn hitbox_follows_player() {
    let mut rng = rng();
    let mut p = new_player();
    let mut sink: Vec<Particle> = Vec::new();
    update_player(&mut p, &mut sink, &mut rng);

    assert_eq!(p.rect.x, PLAYER_X + HITBOX_INSET);
    assert_eq!(p.rect.y, p.y + HITBOX_INSET);
    assert_eq!(p.rect.w, 40.0);
    assert_eq!(p.rect.h, 60.0);
}

#[test]
fn dead_player_is_frozen() {
    let mut rng = rng();
    let mut p = new_player();
    p.alive = false;
    p.jetpack_on = true;
    let mut sink: Vec<Particle> = Vec::new();

    update_player(&mut p, &mut sink, &mut rng);
    assert_eq!(p.y, SCREEN_HEIGHT / 2.0);
    assert_eq!(p.velocity, 0.0);
    assert!(sink.is_empty());
}

// ── Obstacles ─────────────────────────────────────────────────────────────────

#[test]
fn obstacles_move_at_their_own_speed() {
    let mut m = new_obstacle(ObstacleKind::Missile, 100.0, 200.0);
    let mut l = new_obstacle(ObstacleKind::Laser, 100.0, 200.0);
    update_obstacle(&mut m);
    update_obstacle(&mut l);
    assert_eq!(m.x, 92.0);
    assert_eq!(m.rect.x, 92.0);
    assert_eq!(l.x, 95.0);
    assert_eq!(l.rect.y, 200.0);
}

#[test]
fn spawned_obstacles_respect_their_ranges() {
    let mut rng = rng();
    let mut seen_missile = false;
    let mut seen_laser = false;

    for _ in 0..200 {
        let o = spawn_obstacle(&mut rng);
        let (lo, hi) = o.kind.spawn_range();
        assert_eq!(o.x, SCREEN_WIDTH);
        assert!(o.y >= lo && o.y <= hi, "{:?} at y={}", o.kind, o.y);
        assert_eq!(o.y.fract(), 0.0);
        match o.kind {
            ObstacleKind::Missile => seen_missile = true,
            ObstacleKind::Laser => seen_laser = true,
        }
    }
    assert!(seen_missile && seen_laser);
}

#[test]
fn obstacle_leaving_screen_pays_bonus_once() {
    let mut rng = rng();
    let mut state = playing_state(&mut rng);
    state.obstacles.push(new_obstacle(ObstacleKind::Laser, -25.0, 0.0));

    // Right edge lands exactly on x=0: still on screen
    tick(&mut state, 0, &mut rng);
    assert_eq!(state.obstacles.len(), 1);
    assert!(approx(state.score, SURVIVAL_SCORE));

    tick(&mut state, 0, &mut rng);
    assert!(state.obstacles.is_empty());
    assert!(approx(state.score, OBSTACLE_BONUS + 2.0 * SURVIVAL_SCORE));

    tick(&mut state, 0, &mut rng);
    assert!(approx(state.score, OBSTACLE_BONUS + 3.0 * SURVIVAL_SCORE));
}

// ── Coins ─────────────────────────────────────────────────────────────────────

#[test]
fn zigzag_cluster_layout() {
    let coins = coin_cluster(CoinPattern::Zigzag, 5, 1200.0, 300.0);
    let xs: Vec<f32> = coins.iter().map(|c| c.x).collect();
    let ys: Vec<f32> = coins.iter().map(|c| c.y).collect();
    assert_eq!(xs, vec![1200.0, 1240.0, 1280.0, 1320.0, 1360.0]);
    assert_eq!(ys, vec![350.0, 250.0, 350.0, 250.0, 350.0]);
    assert!(coins.iter().all(|c| !c.collected));
}

#[test]
fn line_and_arc_cluster_layout() {
    let line = coin_cluster(CoinPattern::Line, 3, 1200.0, 200.0);
    assert!(line.iter().all(|c| c.y == 200.0));

    let arc = coin_cluster(CoinPattern::Arc, 4, 1200.0, 200.0);
    let ys: Vec<f32> = arc.iter().map(|c| c.y).collect();
    // trunc(80 * sin(0.5 * i))
    assert_eq!(ys, vec![200.0, 238.0, 267.0, 279.0]);
}

#[test]
fn spawned_clusters_are_well_formed() {
    let mut rng = rng();
    for _ in 0..100 {
        let coins = spawn_coins(&mut rng);
        assert!((3..=8).contains(&coins.len()));
        assert_eq!(coins[0].x, SCREEN_WIDTH);
        for pair in coins.windows(2) {
            assert_eq!(pair[1].x - pair[0].x, COIN_SPACING);
        }
    }
}

#[test]
fn coin_is_collected_exactly_once() {
    let mut rng = rng();
    let mut state = playing_state(&mut rng);
    // After one tick the player hitbox is (210, ~360, 40, 60); this coin
    // scrolls to x=210.
    state.coins.push(new_coin(215.0, 370.0));

    let events = tick(&mut state, 0, &mut rng);
    assert!(events.contains(&GameEvent::CoinCollected));
    assert_eq!(state.coins_collected, 1);
    assert!(approx(state.score, COIN_SCORE + SURVIVAL_SCORE));
    assert!(state.coins.is_empty());

    let events = tick(&mut state, 0, &mut rng);
    assert!(!events.contains(&GameEvent::CoinCollected));
    assert_eq!(state.coins_collected, 1);
}

#[test]
fn missed_coin_is_pruned_off_screen() {
    let mut rng = rng();
    let mut state = playing_state(&mut rng);
    state.coins.push(new_coin(-20.0, 100.0));

    tick(&mut state, 0, &mut rng);
    tick(&mut state, 0, &mut rng);
    assert_eq!(state.coins.len(), 1, "right edge at exactly 0 is kept");
    tick(&mut state, 0, &mut rng);
    assert!(state.coins.is_empty());
    assert_eq!(state.coins_collected, 0);
}

// ── Spawn timers ──────────────────────────────────────────────────────────────

#[test]
fn obstacle_spawns_on_the_interval() {
    let mut rng = rng();
    let mut state = init_state(&mut rng);
    start_game(&mut state, 1000);

    let events = tick(&mut state, 1000 + OBSTACLE_FREQUENCY_MS - 1, &mut rng);
    assert!(state.obstacles.is_empty());
    assert!(events.is_empty());

    let events = tick(&mut state, 1000 + OBSTACLE_FREQUENCY_MS, &mut rng);
    assert_eq!(state.obstacles.len(), 1);
    assert!(matches!(events.as_slice(), [GameEvent::ObstacleSpawned(_)]));
    assert_eq!(state.last_obstacle_time, 1000 + OBSTACLE_FREQUENCY_MS);
}

#[test]
fn coins_spawn_on_the_interval() {
    let mut rng = rng();
    let mut state = playing_state(&mut rng);

    tick(&mut state, COIN_FREQUENCY_MS - 1, &mut rng);
    assert!(state.coins.is_empty());
    tick(&mut state, COIN_FREQUENCY_MS, &mut rng);
    assert!((3..=8).contains(&state.coins.len()));
    assert_eq!(state.last_coin_time, COIN_FREQUENCY_MS);
}

// ── Collisions & game over ────────────────────────────────────────────────────

/// A laser that will overlap the player's hitbox after this tick's moves.
fn laser_on_player(state: &GameState) -> Obstacle {
    let p = &state.player;
    new_obstacle(ObstacleKind::Laser, p.rect.x + ObstacleKind::Laser.speed(), p.y - 40.0)
}

#[test]
fn collision_ends_the_run() {
    let mut rng = rng();
    let mut state = playing_state(&mut rng);
    state.score = 42.0;
    state.high_score = 10.0;
    let o = laser_on_player(&state);
    state.obstacles.push(o);

    let events = tick(&mut state, 0, &mut rng);
    assert_eq!(
        events,
        vec![GameEvent::PlayerKilled, GameEvent::GameOver { score: 42.0, new_high: true }]
    );
    assert_eq!(state.status, GameStatus::GameOver);
    assert!(!state.player.alive);
    assert_eq!(state.explosions.len(), 1);
    // No survival score on the tick the player dies
    assert_eq!(state.score, 42.0);
    assert_eq!(state.high_score, 42.0);
}

#[test]
fn high_score_never_drops() {
    let mut rng = rng();
    let mut state = playing_state(&mut rng);
    state.score = 42.0;
    state.high_score = 100.0;

    let events = kill_player(&mut state, &mut rng);
    assert!(events.contains(&GameEvent::GameOver { score: 42.0, new_high: false }));
    assert_eq!(state.high_score, 100.0);
}

#[test]
fn kill_is_idempotent() {
    let mut rng = rng();
    let mut state = playing_state(&mut rng);
    let o = laser_on_player(&state);
    state.obstacles.push(o.clone());
    state.obstacles.push(o);

    let events = tick(&mut state, 0, &mut rng);
    let kills = events.iter().filter(|e| **e == GameEvent::PlayerKilled).count();
    assert_eq!(kills, 1);
    assert_eq!(state.explosions.len(), 1);

    assert!(kill_player(&mut state, &mut rng).is_empty());
    assert_eq!(state.explosions.len(), 1);
}

#[test]
fn game_over_freezes_the_world_but_not_effects() {
    let mut rng = rng();
    let mut state = playing_state(&mut rng);
    kill_player(&mut state, &mut rng);
    state.obstacles.push(new_obstacle(ObstacleKind::Missile, 600.0, 300.0));
    let score = state.score;

    for t in 0..20 {
        let events = tick(&mut state, 10_000 + t, &mut rng);
        assert!(events.is_empty());
    }
    assert_eq!(state.obstacles[0].x, 600.0);
    assert_eq!(state.score, score);
    // The explosion has played out
    assert!(state.explosions.is_empty());
}

// ── State machine ─────────────────────────────────────────────────────────────

#[test]
fn new_game_waits_on_the_menu() {
    let mut rng = rng();
    let mut state = init_state(&mut rng);
    assert_eq!(state.status, GameStatus::Menu);
    assert_eq!(state.score, 0.0);
    assert_eq!(state.background.layers.len(), 5);

    for t in 0..100 {
        tick(&mut state, t * 100, &mut rng);
    }
    assert_eq!(state.player.y, SCREEN_HEIGHT / 2.0);
    assert!(state.obstacles.is_empty());
    assert!(state.coins.is_empty());
    assert_eq!(state.score, 0.0);
    // The skyline still scrolls behind the menu
    assert_eq!(state.background.layers[1].x, -100.0);
}

#[test]
fn commands_drive_the_state_machine() {
    let mut rng = rng();
    let mut state = init_state(&mut rng);

    assert!(apply_command(&mut state, Command::Release, 0).is_empty());
    assert_eq!(state.status, GameStatus::Menu);

    let events = apply_command(&mut state, Command::Press, 500);
    assert_eq!(events, vec![GameEvent::GameStarted]);
    assert_eq!(state.status, GameStatus::Playing);
    assert_eq!(state.last_obstacle_time, 500);
    assert_eq!(state.last_coin_time, 500);
    // The starting press does not also fire the jetpack
    assert!(!state.player.jetpack_on);

    assert!(apply_command(&mut state, Command::Press, 600).is_empty());
    assert!(state.player.jetpack_on);
    assert!(apply_command(&mut state, Command::Release, 700).is_empty());
    assert!(!state.player.jetpack_on);

    for cmd in [Command::ToggleMusic, Command::ToggleSfx, Command::Quit] {
        assert!(apply_command(&mut state, cmd, 800).is_empty());
        assert_eq!(state.status, GameStatus::Playing);
    }
}

#[test]
fn restart_keeps_high_score_only() {
    let mut rng = rng();
    let mut state = playing_state(&mut rng);
    state.score = 77.0;
    state.coins_collected = 3;
    state.coins.push(new_coin(500.0, 500.0));
    kill_player(&mut state, &mut rng);
    assert_eq!(state.status, GameStatus::GameOver);

    let events = apply_command(&mut state, Command::Press, 9000);
    assert_eq!(events, vec![GameEvent::GameStarted]);
    assert_eq!(state.status, GameStatus::Playing);
    assert_eq!(state.score, 0.0);
    assert_eq!(state.coins_collected, 0);
    assert_eq!(state.high_score, 77.0);
    assert!(state.player.alive);
    assert!(state.coins.is_empty());
    assert!(state.explosions.is_empty());
}

// ── End to end ────────────────────────────────────────────────────────────────

#[test]
fn short_run_spawns_one_obstacle_then_crashes() {
    let mut rng = rng();
    let mut state = init_state(&mut rng);
    apply_command(&mut state, Command::Press, 1000);

    let mut spawned = 0;
    for i in 1..=60u64 {
        let events = tick(&mut state, 1000 + i * 25, &mut rng);
        spawned += events
            .iter()
            .filter(|e| matches!(e, GameEvent::ObstacleSpawned(_)))
            .count();
    }
    assert_eq!(spawned, 1);
    assert_eq!(state.obstacles.len(), 1);
    assert!(state.coins.is_empty());
    assert!(approx(state.score, 60.0 * SURVIVAL_SCORE));

    let o = laser_on_player(&state);
    state.obstacles.push(o);
    let events = tick(&mut state, 2525, &mut rng);
    assert!(events.contains(&GameEvent::PlayerKilled));
    assert_eq!(state.status, GameStatus::GameOver);
    assert_eq!(state.high_score, state.score);
}
