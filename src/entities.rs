//! Game entities and world constants. Plain data plus a few geometry lookups.

// ── World geometry ───────────────────────────────────────────────────────────

/// Logical playfield size. The terminal canvas scales this to fit.
pub const SCREEN_WIDTH: f32 = 1200.0;
pub const SCREEN_HEIGHT: f32 = 700.0;

pub const PLAYER_X: f32 = 200.0;
pub const PLAYER_WIDTH: f32 = 60.0;
pub const PLAYER_HEIGHT: f32 = 80.0;
/// The hitbox is the sprite shrunk by this much on every side.
pub const HITBOX_INSET: f32 = 10.0;
/// Frames per animation cycle (both the running and the flying set).
pub const PLAYER_FRAMES: usize = 4;

pub const COIN_SIZE: f32 = 30.0;
pub const COIN_FRAMES: usize = 8;

/// Height of the ground strip at the bottom of the background.
pub const GROUND_HEIGHT: f32 = 100.0;

// ── Colours ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const WHITE: Rgb = Rgb(255, 255, 255);
pub const BLACK: Rgb = Rgb(0, 0, 0);
pub const RED: Rgb = Rgb(255, 50, 50);
pub const GREEN: Rgb = Rgb(50, 255, 50);
pub const BLUE: Rgb = Rgb(50, 50, 255);
pub const YELLOW: Rgb = Rgb(255, 255, 0);
pub const ORANGE: Rgb = Rgb(255, 165, 0);
pub const GRAY: Rgb = Rgb(100, 100, 100);
pub const LIGHT_BLUE: Rgb = Rgb(135, 206, 250);

impl Rgb {
    /// Shift every channel by `delta`, saturating at 0 and 255.
    pub fn shifted(self, delta: i16) -> Rgb {
        let ch = |c: u8| (c as i16 + delta).clamp(0, 255) as u8;
        Rgb(ch(self.0), ch(self.1), ch(self.2))
    }
}

// ── Rectangles & sprites ─────────────────────────────────────────────────────

/// Axis-aligned rectangle in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Rect { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Strict overlap: rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    pub fn offset(&self, dx: f32, dy: f32) -> Rect {
        Rect { x: self.x + dx, y: self.y + dy, ..*self }
    }
}

/// One filled rectangle of a sprite, relative to the sprite's origin.
#[derive(Clone, Debug, PartialEq)]
pub struct Patch {
    pub rect: Rect,
    pub color: Rgb,
}

/// A precomputed vector image: a stack of filled rectangles painted in order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sprite {
    pub width: f32,
    pub height: f32,
    pub patches: Vec<Patch>,
}

impl Sprite {
    pub fn new(width: f32, height: f32) -> Self {
        Sprite { width, height, patches: Vec::new() }
    }

    pub fn push(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb) {
        self.patches.push(Patch { rect: Rect::new(x, y, w, h), color });
    }
}

// ── Player ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Vertical velocity in world units per tick (positive = falling).
    pub velocity: f32,
    pub jetpack_on: bool,
    pub alive: bool,
    /// Fractional animation frame in `0.0..PLAYER_FRAMES`.
    pub frame: f32,
    /// Collision rectangle, inset from the sprite by `HITBOX_INSET`.
    pub rect: Rect,
}

impl Player {
    pub fn thrusting(&self) -> bool {
        self.alive && self.jetpack_on
    }

    pub fn centre(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

// ── Obstacles ────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObstacleKind {
    Missile,
    Laser,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 2] = [ObstacleKind::Missile, ObstacleKind::Laser];

    /// (width, height) of the obstacle's body and hitbox.
    pub fn size(self) -> (f32, f32) {
        match self {
            ObstacleKind::Missile => (80.0, 30.0),
            ObstacleKind::Laser => (30.0, 150.0),
        }
    }

    /// Leftward speed per tick.
    pub fn speed(self) -> f32 {
        match self {
            ObstacleKind::Missile => 8.0,
            ObstacleKind::Laser => 5.0,
        }
    }

    /// Inclusive range for the spawn y coordinate.
    pub fn spawn_range(self) -> (f32, f32) {
        match self {
            ObstacleKind::Missile => (100.0, SCREEN_HEIGHT - 150.0),
            ObstacleKind::Laser => (0.0, SCREEN_HEIGHT - 200.0),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Obstacle {
    pub x: f32,
    pub y: f32,
    pub kind: ObstacleKind,
    /// Set when the obstacle scrolls off-screen and its bonus is paid.
    pub passed: bool,
    pub rect: Rect,
}

// ── Coins ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoinPattern {
    /// Constant height.
    Line,
    /// Height follows a sine arc.
    Arc,
    /// Alternates 50 units below and above the anchor.
    Zigzag,
}

impl CoinPattern {
    pub const ALL: [CoinPattern; 3] = [CoinPattern::Line, CoinPattern::Arc, CoinPattern::Zigzag];
}

#[derive(Clone, Debug)]
pub struct Coin {
    pub x: f32,
    pub y: f32,
    pub collected: bool,
    /// Fractional spin frame in `0.0..COIN_FRAMES`.
    pub frame: f32,
    pub rect: Rect,
}

// ── Visual effects ───────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleKind {
    /// Kicked up on a hard landing; falls under gravity.
    Dust,
    /// Jetpack exhaust; drifts left.
    Smoke,
}

#[derive(Clone, Debug)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Remaining life; the particle dies at or below zero.
    pub life: f32,
    pub size: f32,
    pub color: Rgb,
    pub kind: ParticleKind,
}

#[derive(Clone, Debug)]
pub struct Explosion {
    /// Centre of the blast.
    pub x: f32,
    pub y: f32,
    /// Fractional index into `frames`.
    pub frame: f32,
    pub frames: Vec<Sprite>,
}

// ── Background ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Layer {
    pub sprite: Sprite,
    /// Leftward scroll per tick; 0 for a static layer.
    pub speed: f32,
    /// Current horizontal offset in `-SCREEN_WIDTH..=0`.
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Debug)]
pub struct Background {
    /// Back to front.
    pub layers: Vec<Layer>,
}

// ── Input & events ───────────────────────────────────────────────────────────

/// Player intent, already decoupled from the device that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Space down or pointer down.
    Press,
    /// Space up or pointer up.
    Release,
    ToggleMusic,
    ToggleSfx,
    Quit,
}

/// Something that happened during an update, for the audio layer and logs.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    GameStarted,
    ObstacleSpawned(ObstacleKind),
    CoinCollected,
    PlayerKilled,
    GameOver { score: f32, new_high: bool },
}

// ── Master game state ────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Menu,
    Playing,
    GameOver,
}

/// The entire game state, owned by the main loop and mutated only by
/// `compute` during a tick.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub background: Background,
    pub obstacles: Vec<Obstacle>,
    pub coins: Vec<Coin>,
    pub explosions: Vec<Explosion>,
    pub particles: Vec<Particle>,
    pub score: f32,
    /// Best score over completed runs in this process.
    pub high_score: f32,
    pub coins_collected: u32,
    pub status: GameStatus,
    /// Wall-clock milliseconds of the last obstacle spawn (or game start).
    pub last_obstacle_time: u64,
    /// Wall-clock milliseconds of the last coin cluster (or game start).
    pub last_coin_time: u64,
}
