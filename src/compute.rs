//! Game logic: player physics, spawners, collisions, scoring and the
//! menu → playing → game-over state machine.
//!
//! Every function mutates only the state it is handed. Randomness comes
//! through an injected RNG and wall-clock time through an explicit `now_ms`
//! argument, so a test can drive the whole game deterministically.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::background::{new_background, update_background};
use crate::effects::{
    new_explosion, new_particle, update_explosion, update_particle, ParticleSink,
};
use crate::entities::{
    Coin, CoinPattern, Command, GameEvent, GameState, GameStatus, Obstacle, ObstacleKind,
    ParticleKind, Player, Rect, COIN_FRAMES, COIN_SIZE, HITBOX_INSET, PLAYER_FRAMES,
    PLAYER_HEIGHT, PLAYER_WIDTH, PLAYER_X, SCREEN_HEIGHT, SCREEN_WIDTH,
};

// ── Physics ──────────────────────────────────────────────────────────────────

pub const GRAVITY: f32 = 0.3;
pub const JETPACK_ACCELERATION: f32 = 0.8;
/// Extra upward-velocity bleed once the jetpack is released.
pub const JETPACK_DECELERATION: f32 = 0.4;
pub const MAX_VELOCITY: f32 = 12.0;
/// Velocity multiplier when the player hits the ceiling or the floor.
pub const BOUNCE: f32 = -0.2;
/// Landing faster than this kicks up dust.
pub const DUST_IMPACT_SPEED: f32 = 3.0;
const DUST_PER_IMPACT: usize = 5;
const SMOKE_CHANCE: f64 = 0.3;
const PLAYER_ANIMATION_SPEED: f32 = 0.2;

// ── Spawning & scoring ───────────────────────────────────────────────────────

pub const SCROLL_SPEED: f32 = 5.0;
pub const OBSTACLE_FREQUENCY_MS: u64 = 1500;
pub const COIN_FREQUENCY_MS: u64 = 2000;
pub const COIN_SPACING: f32 = 40.0;
const COIN_ANIMATION_SPEED: f32 = 0.1;
const ARC_AMPLITUDE: f32 = 80.0;
const ZIGZAG_OFFSET: f32 = 50.0;

pub const OBSTACLE_BONUS: f32 = 5.0;
pub const COIN_SCORE: f32 = 10.0;
/// Score accrued per tick survived.
pub const SURVIVAL_SCORE: f32 = 0.1;

// ── Constructors ─────────────────────────────────────────────────────────────

pub fn new_player() -> Player {
    let y = SCREEN_HEIGHT / 2.0;
    Player {
        x: PLAYER_X,
        y,
        width: PLAYER_WIDTH,
        height: PLAYER_HEIGHT,
        velocity: 0.0,
        jetpack_on: false,
        alive: true,
        frame: 0.0,
        rect: hitbox(PLAYER_X, y),
    }
}

fn hitbox(x: f32, y: f32) -> Rect {
    Rect::new(
        x + HITBOX_INSET,
        y + HITBOX_INSET,
        PLAYER_WIDTH - 2.0 * HITBOX_INSET,
        PLAYER_HEIGHT - 2.0 * HITBOX_INSET,
    )
}

pub fn new_obstacle(kind: ObstacleKind, x: f32, y: f32) -> Obstacle {
    let (w, h) = kind.size();
    Obstacle { x, y, kind, passed: false, rect: Rect::new(x, y, w, h) }
}

pub fn new_coin(x: f32, y: f32) -> Coin {
    Coin { x, y, collected: false, frame: 0.0, rect: Rect::new(x, y, COIN_SIZE, COIN_SIZE) }
}

/// Fresh state sitting on the title menu.
pub fn init_state(rng: &mut impl Rng) -> GameState {
    GameState {
        player: new_player(),
        background: new_background(rng),
        obstacles: Vec::new(),
        coins: Vec::new(),
        explosions: Vec::new(),
        particles: Vec::new(),
        score: 0.0,
        high_score: 0.0,
        coins_collected: 0,
        status: GameStatus::Menu,
        last_obstacle_time: 0,
        last_coin_time: 0,
    }
}

// ── State machine ────────────────────────────────────────────────────────────

/// Begin a new run. Entities and score are reset; the high score and the
/// background survive.
pub fn start_game(state: &mut GameState, now_ms: u64) -> Vec<GameEvent> {
    state.player = new_player();
    state.obstacles.clear();
    state.coins.clear();
    state.explosions.clear();
    state.particles.clear();
    state.score = 0.0;
    state.coins_collected = 0;
    state.status = GameStatus::Playing;
    state.last_obstacle_time = now_ms;
    state.last_coin_time = now_ms;
    log::info!("run started (high score {})", state.high_score as u32);
    vec![GameEvent::GameStarted]
}

/// Apply one player command. Audio toggles and quit belong to the caller and
/// leave the game untouched.
pub fn apply_command(state: &mut GameState, cmd: Command, now_ms: u64) -> Vec<GameEvent> {
    match (cmd, state.status) {
        (Command::Press, GameStatus::Menu | GameStatus::GameOver) => start_game(state, now_ms),
        (Command::Press, GameStatus::Playing) => {
            state.player.jetpack_on = true;
            Vec::new()
        }
        (Command::Release, GameStatus::Playing) => {
            state.player.jetpack_on = false;
            Vec::new()
        }
        _ => Vec::new(),
    }
}

/// Kill the player and end the run. A no-op if the player is already dead.
pub fn kill_player(state: &mut GameState, rng: &mut impl Rng) -> Vec<GameEvent> {
    if !state.player.alive {
        return Vec::new();
    }
    state.player.alive = false;
    let (cx, cy) = state.player.centre();
    state.explosions.push(new_explosion(cx, cy, rng));

    state.status = GameStatus::GameOver;
    let new_high = state.score > state.high_score;
    if new_high {
        state.high_score = state.score;
    }
    log::info!(
        "game over: score {} coins {}{}",
        state.score as u32,
        state.coins_collected,
        if new_high { " (new high score)" } else { "" }
    );
    vec![GameEvent::PlayerKilled, GameEvent::GameOver { score: state.score, new_high }]
}

// ── Player physics ───────────────────────────────────────────────────────────

/// Advance the player one tick. Exhaust and landing dust go to `sink`.
pub fn update_player(player: &mut Player, sink: &mut impl ParticleSink, rng: &mut impl Rng) {
    if !player.alive {
        return;
    }

    if player.jetpack_on {
        player.velocity -= JETPACK_ACCELERATION;
        if rng.gen_bool(SMOKE_CHANCE) {
            sink.emit(new_particle(
                player.x + 5.0,
                player.y + player.height - 20.0,
                ParticleKind::Smoke,
                rng,
            ));
        }
    } else {
        player.velocity += GRAVITY;
        if player.velocity < 0.0 {
            player.velocity = (player.velocity + JETPACK_DECELERATION).min(0.0);
        }
    }

    player.velocity = player.velocity.clamp(-MAX_VELOCITY, MAX_VELOCITY);
    player.y += player.velocity;

    let floor = SCREEN_HEIGHT - player.height;
    if player.y < 0.0 {
        player.y = 0.0;
        player.velocity *= BOUNCE;
    } else if player.y > floor {
        let impact = player.velocity;
        player.y = floor;
        player.velocity *= BOUNCE;
        if impact > DUST_IMPACT_SPEED {
            for _ in 0..DUST_PER_IMPACT {
                let x = player.x + rng.gen_range(10.0..=player.width - 10.0);
                sink.emit(new_particle(x, player.y + player.height, ParticleKind::Dust, rng));
            }
        }
    }

    player.rect = hitbox(player.x, player.y);
    player.frame = (player.frame + PLAYER_ANIMATION_SPEED) % PLAYER_FRAMES as f32;
}

// ── Obstacles ────────────────────────────────────────────────────────────────

/// A random obstacle entering at the right edge.
pub fn spawn_obstacle(rng: &mut impl Rng) -> Obstacle {
    let kind = *ObstacleKind::ALL.choose(rng).unwrap_or(&ObstacleKind::Missile);
    let (lo, hi) = kind.spawn_range();
    let y = rng.gen_range(lo as i32..=hi as i32) as f32;
    new_obstacle(kind, SCREEN_WIDTH, y)
}

pub fn update_obstacle(o: &mut Obstacle) {
    o.x -= o.kind.speed();
    o.rect.x = o.x;
}

// ── Coins ────────────────────────────────────────────────────────────────────

/// Lay out `count` coins starting at the anchor `(x0, y0)`.
pub fn coin_cluster(pattern: CoinPattern, count: usize, x0: f32, y0: f32) -> Vec<Coin> {
    (0..count)
        .map(|i| {
            let x = x0 + i as f32 * COIN_SPACING;
            let y = match pattern {
                CoinPattern::Line => y0,
                CoinPattern::Arc => y0 + (ARC_AMPLITUDE * (i as f32 * 0.5).sin()).trunc(),
                CoinPattern::Zigzag => {
                    if i % 2 == 0 {
                        y0 + ZIGZAG_OFFSET
                    } else {
                        y0 - ZIGZAG_OFFSET
                    }
                }
            };
            new_coin(x, y)
        })
        .collect()
}

/// A random cluster of 3–8 coins entering at the right edge.
pub fn spawn_coins(rng: &mut impl Rng) -> Vec<Coin> {
    let count = rng.gen_range(3..=8);
    let y0 = rng.gen_range(100..=(SCREEN_HEIGHT - 150.0) as i32) as f32;
    let pattern = *CoinPattern::ALL.choose(rng).unwrap_or(&CoinPattern::Line);
    coin_cluster(pattern, count, SCREEN_WIDTH, y0)
}

pub fn update_coin(c: &mut Coin) {
    c.x -= SCROLL_SPEED;
    c.rect.x = c.x;
    c.frame = (c.frame + COIN_ANIMATION_SPEED) % COIN_FRAMES as f32;
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the whole game by one tick at wall-clock time `now_ms`.
pub fn tick(state: &mut GameState, now_ms: u64, rng: &mut impl Rng) -> Vec<GameEvent> {
    let mut events = Vec::new();

    update_background(&mut state.background);

    if state.status == GameStatus::Playing {
        update_player(&mut state.player, &mut state.particles, rng);

        // ── Spawners ─────────────────────────────────────────────────────────
        if now_ms.saturating_sub(state.last_obstacle_time) >= OBSTACLE_FREQUENCY_MS {
            let obstacle = spawn_obstacle(rng);
            log::debug!("spawned {:?} at y={}", obstacle.kind, obstacle.y);
            events.push(GameEvent::ObstacleSpawned(obstacle.kind));
            state.obstacles.push(obstacle);
            state.last_obstacle_time = now_ms;
        }
        if now_ms.saturating_sub(state.last_coin_time) >= COIN_FREQUENCY_MS {
            let cluster = spawn_coins(rng);
            log::debug!("spawned {} coins", cluster.len());
            state.coins.extend(cluster);
            state.last_coin_time = now_ms;
        }

        // ── Obstacles: move, collide, pay out the pass bonus ─────────────────
        let mut hit = false;
        let mut bonus = 0.0;
        for o in &mut state.obstacles {
            update_obstacle(o);
            if state.player.alive && state.player.rect.intersects(&o.rect) {
                hit = true;
            }
            if o.rect.right() < 0.0 && !o.passed {
                o.passed = true;
                bonus += OBSTACLE_BONUS;
            }
        }
        state.obstacles.retain(|o| !o.passed);
        state.score += bonus;
        if hit {
            events.extend(kill_player(state, rng));
        }

        // ── Coins: move, collect, prune ──────────────────────────────────────
        for c in &mut state.coins {
            update_coin(c);
            if state.player.alive && !c.collected && state.player.rect.intersects(&c.rect) {
                c.collected = true;
                state.score += COIN_SCORE;
                state.coins_collected += 1;
                events.push(GameEvent::CoinCollected);
            }
        }
        state.coins.retain(|c| !c.collected && c.rect.right() >= 0.0);

        if state.status == GameStatus::Playing {
            state.score += SURVIVAL_SCORE;
        }
    }

    state.explosions.retain_mut(update_explosion);
    state.particles.retain_mut(update_particle);

    events
}
