//! Particles and explosions: construction and per-tick decay.
//!
//! Randomness always comes through an injected RNG so tests can seed it.

use rand::Rng;

use crate::entities::{
    Explosion, Particle, ParticleKind, Sprite, GRAY, ORANGE, RED, WHITE, YELLOW,
};

// ── Tuning ───────────────────────────────────────────────────────────────────

pub const PARTICLE_DECAY: f32 = 0.05;
pub const PARTICLE_SHRINK: f32 = 0.95;
pub const DUST_GRAVITY: f32 = 0.1;

pub const EXPLOSION_FRAMES: usize = 8;
pub const EXPLOSION_SIZE: f32 = 100.0;
pub const EXPLOSION_FRAME_SPEED: f32 = 0.5;
/// Side of one "pixel" in an explosion frame.
const EXPLOSION_CELL: f32 = 4.0;
const DEBRIS_PER_FRAME: usize = 10;

// ── Particle sink ────────────────────────────────────────────────────────────

/// Capability handed to entity updates that want to spawn particles.
pub trait ParticleSink {
    fn emit(&mut self, particle: Particle);
}

impl ParticleSink for Vec<Particle> {
    fn emit(&mut self, particle: Particle) {
        self.push(particle);
    }
}

// ── Particles ────────────────────────────────────────────────────────────────

pub fn new_particle(x: f32, y: f32, kind: ParticleKind, rng: &mut impl Rng) -> Particle {
    let size = rng.gen_range(3..=8) as f32;
    let life = rng.gen_range(0.5..=1.5);
    let (vx, vy, color) = match kind {
        ParticleKind::Dust => (rng.gen_range(-2.0..=2.0), rng.gen_range(-3.0..=-1.0), GRAY),
        ParticleKind::Smoke => {
            let color = match rng.gen_range(0..3) {
                0 => ORANGE,
                1 => YELLOW,
                _ => GRAY,
            };
            (rng.gen_range(-3.0..=-1.0), rng.gen_range(-0.5..=0.5), color)
        }
    };
    Particle { x, y, vx, vy, life, size, color, kind }
}

/// Advance one tick. Returns `false` once the particle has burnt out.
pub fn update_particle(p: &mut Particle) -> bool {
    p.x += p.vx;
    p.y += p.vy;
    if p.kind == ParticleKind::Dust {
        p.vy += DUST_GRAVITY;
    }
    p.life -= PARTICLE_DECAY;
    p.size = (p.size * PARTICLE_SHRINK).max(1.0);
    p.life > 0.0
}

/// Opacity in `0.0..=1.0`, proportional to remaining life.
pub fn particle_alpha(p: &Particle) -> f32 {
    p.life.clamp(0.0, 1.0)
}

// ── Explosions ───────────────────────────────────────────────────────────────

pub fn new_explosion(x: f32, y: f32, rng: &mut impl Rng) -> Explosion {
    let frames = (0..EXPLOSION_FRAMES)
        .map(|i| explosion_frame(frame_size(i), rng))
        .collect();
    Explosion { x, y, frame: 0.0, frames }
}

/// Side length of frame `i`: grows from half size to full, then shrinks back,
/// snapped down to a multiple of 4.
pub fn frame_size(i: usize) -> f32 {
    let half = EXPLOSION_FRAMES / 2;
    let factor = if i < half {
        0.5 + i as f32 / half as f32 * 0.5
    } else {
        1.0 - (i - half) as f32 / half as f32 * 0.5
    };
    let size = (EXPLOSION_SIZE * factor) as u32;
    (size - size % 4) as f32
}

fn explosion_frame(size: f32, rng: &mut impl Rng) -> Sprite {
    let mut sprite = Sprite::new(size, size);
    let radius = size / 2.0;
    let cells = (size / EXPLOSION_CELL) as usize;

    for row in 0..cells {
        for col in 0..cells {
            let x = col as f32 * EXPLOSION_CELL;
            let y = row as f32 * EXPLOSION_CELL;
            let dx = x + EXPLOSION_CELL / 2.0 - radius;
            let dy = y + EXPLOSION_CELL / 2.0 - radius;
            let distance = (dx * dx + dy * dy).sqrt();
            if distance >= radius {
                continue;
            }
            let mut band = if distance < radius * 0.3 {
                0
            } else if distance < radius * 0.6 {
                1
            } else {
                2
            };
            // Occasionally demote a cell one band outward for a ragged look.
            if rng.gen_bool(0.2) {
                band += 1;
            }
            let color = match band {
                0 => WHITE,
                1 => YELLOW,
                2 => ORANGE,
                _ => RED,
            };
            sprite.push(x, y, EXPLOSION_CELL, EXPLOSION_CELL, color);
        }
    }

    for _ in 0..DEBRIS_PER_FRAME {
        let angle = rng.gen_range(0.0..std::f32::consts::TAU);
        let distance = rng.gen_range(0.0..=radius);
        let speck = rng.gen_range(2..=4) as f32;
        sprite.push(
            radius + angle.cos() * distance,
            radius + angle.sin() * distance,
            speck,
            speck,
            YELLOW,
        );
    }

    sprite
}

/// Advance one tick. Returns `false` once every frame has been shown.
pub fn update_explosion(e: &mut Explosion) -> bool {
    e.frame += EXPLOSION_FRAME_SPEED;
    (e.frame as usize) < e.frames.len()
}

pub fn current_frame(e: &Explosion) -> Option<&Sprite> {
    e.frames.get(e.frame as usize)
}

