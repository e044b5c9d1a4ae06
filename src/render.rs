//! Drawing: the `Canvas` a frontend implements, and the fixed-order scene
//! walk that issues draw calls against it.
//!
//! Everything here is in world coordinates (`SCREEN_WIDTH` × `SCREEN_HEIGHT`);
//! scaling to real pixels is the canvas's business.

use crate::effects::{current_frame, particle_alpha};
use crate::entities::{
    Coin, Explosion, GameState, GameStatus, Obstacle, ObstacleKind, Particle, Player, Rect, Rgb,
    Sprite, BLACK, BLUE, COIN_FRAMES, COIN_SIZE, GRAY, GREEN, LIGHT_BLUE, ORANGE, RED,
    SCREEN_HEIGHT, SCREEN_WIDTH, WHITE, YELLOW,
};

// ── Canvas ───────────────────────────────────────────────────────────────────

/// Horizontal placement of a text run relative to its x coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    Left,
    Centre,
}

/// Rendering collaborator.
pub trait Canvas {
    /// Fill `rect` with `color` blended at `alpha` (0 = invisible, 1 = opaque).
    fn fill_rect(&mut self, rect: Rect, color: Rgb, alpha: f32);

    /// Draw a line of text whose top edge is at `y`.
    fn text(&mut self, x: f32, y: f32, text: &str, color: Rgb, anchor: Anchor);

    fn fill(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb) {
        self.fill_rect(Rect::new(x, y, w, h), color, 1.0);
    }

    /// Paint every patch of `sprite` with its origin at `(x, y)`.
    fn blit(&mut self, sprite: &Sprite, x: f32, y: f32, alpha: f32) {
        for patch in &sprite.patches {
            self.fill_rect(patch.rect.offset(x, y), patch.color, alpha);
        }
    }

    /// Rectangle outline of the given thickness.
    fn outline(&mut self, rect: Rect, color: Rgb, thickness: f32) {
        let t = thickness;
        self.fill(rect.x, rect.y, rect.w, t, color);
        self.fill(rect.x, rect.bottom() - t, rect.w, t, color);
        self.fill(rect.x, rect.y, t, rect.h, color);
        self.fill(rect.right() - t, rect.y, t, rect.h, color);
    }
}

/// Audio switches shown in the HUD while playing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SoundStatus {
    pub music: bool,
    pub sfx: bool,
}

// ── Public entry point ───────────────────────────────────────────────────────

/// Issue the draw calls for one frame: background, obstacles, coins,
/// particles, player, explosions, HUD, then the menu or game-over overlay.
pub fn draw_frame(canvas: &mut impl Canvas, state: &GameState, sound: SoundStatus) {
    draw_background(canvas, state);
    for obstacle in &state.obstacles {
        draw_obstacle(canvas, obstacle);
    }
    for coin in &state.coins {
        draw_coin(canvas, coin);
    }
    for particle in &state.particles {
        draw_particle(canvas, particle);
    }
    draw_player(canvas, &state.player);
    for explosion in &state.explosions {
        draw_explosion(canvas, explosion);
    }
    draw_hud(canvas, state, sound);

    match state.status {
        GameStatus::Menu => draw_menu(canvas),
        GameStatus::GameOver => draw_game_over(canvas, state),
        GameStatus::Playing => {}
    }
}

// ── Scene ────────────────────────────────────────────────────────────────────

fn draw_background(canvas: &mut impl Canvas, state: &GameState) {
    for layer in &state.background.layers {
        canvas.blit(&layer.sprite, layer.x, layer.y, 1.0);
        if layer.speed > 0.0 {
            canvas.blit(&layer.sprite, layer.x + SCREEN_WIDTH, layer.y, 1.0);
        }
    }
}

fn draw_obstacle(canvas: &mut impl Canvas, o: &Obstacle) {
    let (w, h) = o.kind.size();
    let (x, y) = (o.x, o.y);
    match o.kind {
        ObstacleKind::Missile => {
            // body
            canvas.fill(x + 20.0, y + 5.0, w - 30.0, h - 10.0, GRAY);
            // nose, pointing left
            for i in 0..10 {
                let nh = ((i + 1) as f32).min(h - 2.0 * i as f32);
                canvas.fill(x + 10.0 - i as f32, y + h / 2.0 - nh / 2.0, (i + 1) as f32, nh, RED);
            }
            // fins
            canvas.fill(x + w - 15.0, y, 15.0, 5.0, GRAY);
            canvas.fill(x + w - 15.0, y + h - 5.0, 15.0, 5.0, GRAY);
            canvas.fill(x + 25.0, y + h / 2.0 - 4.0, 8.0, 8.0, LIGHT_BLUE);
            // exhaust
            canvas.fill(x + w - 5.0, y + h / 2.0 - 3.0, 20.0, 6.0, ORANGE);
        }
        ObstacleKind::Laser => {
            let mut sy = 0.0;
            while sy < h {
                canvas.fill(x, y + sy, w, 3.0_f32.min(h - sy), RED);
                sy += 4.0;
            }
            let (ew, eh) = (15.0, 50.0);
            canvas.fill(x + w - ew, y + h / 2.0 - eh / 2.0, ew, eh, GRAY);
            canvas.fill(x + w - ew + 3.0, y + h / 2.0 - 8.0, 8.0, 16.0, RED);
        }
    }
}

fn draw_coin(canvas: &mut impl Canvas, c: &Coin) {
    if c.collected {
        return;
    }
    // Spin: the face narrows towards edge-on and widens again.
    let phase = (c.frame as usize % COIN_FRAMES) as f32 / COIN_FRAMES as f32;
    let width = (COIN_SIZE * (phase * std::f32::consts::PI).sin().abs()).max(4.0).floor();
    let left = c.x + (COIN_SIZE - width) / 2.0;
    canvas.fill(left, c.y, width, COIN_SIZE, YELLOW);
    if width > COIN_SIZE * 0.6 {
        let inner = (width / 2.0).max(2.0);
        canvas.fill(
            c.x + (COIN_SIZE - inner) / 2.0,
            c.y + (COIN_SIZE - inner) / 2.0,
            inner,
            inner,
            Rgb(200, 200, 0),
        );
        let shine = (width / 4.0).max(2.0);
        canvas.fill(left + width / 4.0, c.y + COIN_SIZE / 4.0, shine, shine, WHITE);
    } else if width > 2.0 {
        canvas.fill(left + 1.0, c.y + 1.0, width - 2.0, COIN_SIZE - 2.0, Rgb(200, 200, 0));
    }
}

fn draw_particle(canvas: &mut impl Canvas, p: &Particle) {
    let size = p.size.floor();
    canvas.fill_rect(Rect::new(p.x, p.y, size, size), p.color, particle_alpha(p));
}

fn draw_player(canvas: &mut impl Canvas, p: &Player) {
    let (x, y, w, h) = (p.x, p.y, p.width, p.height);
    let frame = p.frame as usize;

    // body, head, eye, helmet
    canvas.fill(x + 10.0, y + 10.0, w - 20.0, h - 35.0, BLUE);
    canvas.fill(x + 15.0, y + 5.0, w - 30.0, 25.0, BLUE);
    canvas.fill(x + w - 25.0, y + 10.0, 10.0, 10.0, WHITE);
    canvas.fill(x + w - 22.0, y + 13.0, 4.0, 4.0, BLACK);
    canvas.fill(x + 10.0, y + 5.0, w - 20.0, 10.0, ORANGE);
    canvas.fill(x + 5.0, y + 10.0, 10.0, 15.0, ORANGE);

    if p.jetpack_on {
        canvas.fill(x, y + h - 60.0, 15.0, 40.0, GRAY);
        let flame = 15.0 + frame as f32 * 8.0;
        let mut fy = 0.0;
        while fy < flame {
            let fw = (15.0 * (1.0 - fy / flame)).max(3.0).floor();
            canvas.fill(x + ((15.0 - fw) / 2.0).floor(), y + h - 20.0 + fy, fw, 2.0, ORANGE);
            fy += 2.0;
        }
    } else if frame % 2 == 0 {
        canvas.fill(x + 15.0, y + h - 30.0, 15.0, 25.0, BLUE);
        canvas.fill(x + w - 30.0, y + h - 20.0, 15.0, 15.0, BLUE);
    } else {
        canvas.fill(x + 15.0, y + h - 20.0, 15.0, 15.0, BLUE);
        canvas.fill(x + w - 30.0, y + h - 30.0, 15.0, 25.0, BLUE);
    }
}

fn draw_explosion(canvas: &mut impl Canvas, e: &Explosion) {
    if let Some(frame) = current_frame(e) {
        canvas.blit(frame, e.x - frame.width / 2.0, e.y - frame.height / 2.0, 1.0);
    }
}

// ── HUD ──────────────────────────────────────────────────────────────────────

fn draw_hud(canvas: &mut impl Canvas, state: &GameState, sound: SoundStatus) {
    let panel = Rect::new(10.0, 10.0, 280.0, 70.0);
    canvas.fill_rect(panel, BLACK, 1.0);
    canvas.outline(panel, Rgb(50, 50, 50), 2.0);
    canvas.text(20.0, 20.0, &format!("SCORE:{}", state.score as u32), WHITE, Anchor::Left);
    canvas.text(
        150.0,
        20.0,
        &format!("HI-SCORE:{}", state.high_score as u32),
        WHITE,
        Anchor::Left,
    );
    canvas.fill(20.0, 45.0, 16.0, 16.0, YELLOW);
    canvas.fill(22.0, 47.0, 12.0, 12.0, Rgb(200, 200, 0));
    canvas.text(45.0, 45.0, &format!("x{}", state.coins_collected), YELLOW, Anchor::Left);

    if state.status == GameStatus::Playing {
        let panel = Rect::new(SCREEN_WIDTH - 150.0, 10.0, 140.0, 50.0);
        canvas.fill_rect(panel, BLACK, 1.0);
        canvas.outline(panel, Rgb(50, 50, 50), 2.0);
        canvas.text(SCREEN_WIDTH - 140.0, 15.0, "M:MUSIC", WHITE, Anchor::Left);
        canvas.text(SCREEN_WIDTH - 140.0, 35.0, "S:SFX", WHITE, Anchor::Left);
        for (on, y) in [(sound.music, 15.0), (sound.sfx, 35.0)] {
            let (label, color) = if on { ("ON", GREEN) } else { ("OFF", RED) };
            canvas.text(SCREEN_WIDTH - 60.0, y, label, color, Anchor::Left);
        }
    }
}

// ── Overlays ─────────────────────────────────────────────────────────────────

const PANEL: Rect = Rect::new((SCREEN_WIDTH - 600.0) / 2.0, 150.0, 600.0, 400.0);

/// Dim the screen and draw a three-step framed panel.
fn draw_panel(canvas: &mut impl Canvas, outer: Rgb, inner: Rgb) {
    canvas.fill_rect(Rect::new(0.0, 0.0, SCREEN_WIDTH, SCREEN_HEIGHT), BLACK, 150.0 / 255.0);
    canvas.fill_rect(PANEL, outer, 1.0);
    canvas.fill_rect(Rect::new(PANEL.x + 4.0, PANEL.y + 4.0, PANEL.w - 8.0, PANEL.h - 8.0), inner, 1.0);
    canvas.fill_rect(Rect::new(PANEL.x + 8.0, PANEL.y + 8.0, PANEL.w - 16.0, PANEL.h - 16.0), BLACK, 1.0);
}

fn draw_menu(canvas: &mut impl Canvas) {
    let cx = SCREEN_WIDTH / 2.0;
    draw_panel(canvas, Rgb(50, 50, 50), GRAY);

    canvas.text(cx, 200.0, "JETPACK ADVENTURE", WHITE, Anchor::Centre);
    canvas.fill(cx - 170.0, 240.0, 340.0, 4.0, YELLOW);
    canvas.text(cx, 300.0, "PRESS SPACE OR CLICK", WHITE, Anchor::Centre);
    canvas.text(cx, 330.0, "TO START", WHITE, Anchor::Centre);
    canvas.text(cx, 380.0, "HOLD SPACE OR MOUSE", WHITE, Anchor::Centre);
    canvas.text(cx, 405.0, "BUTTON TO FLY", WHITE, Anchor::Centre);
    canvas.text(cx, 440.0, "M:MUSIC  S:SFX", WHITE, Anchor::Centre);

    // jetpack icon
    let (ix, iy) = (cx - 20.0, 470.0);
    canvas.fill(ix + 10.0, iy, 20.0, 40.0, BLUE);
    canvas.fill(ix, iy + 20.0, 10.0, 30.0, GRAY);
    canvas.fill(ix, iy + 50.0, 10.0, 10.0, ORANGE);
}

fn draw_game_over(canvas: &mut impl Canvas, state: &GameState) {
    let cx = SCREEN_WIDTH / 2.0;
    draw_panel(canvas, Rgb(100, 0, 0), Rgb(150, 0, 0));

    canvas.text(cx, 200.0, "GAME OVER", RED, Anchor::Centre);
    canvas.fill(cx - 90.0, 240.0, 180.0, 4.0, RED);
    canvas.text(cx, 280.0, &format!("FINAL SCORE:{}", state.score as u32), WHITE, Anchor::Centre);
    canvas.fill(cx - 100.0, 330.0, 24.0, 24.0, YELLOW);
    canvas.fill(cx - 96.0, 334.0, 16.0, 16.0, Rgb(200, 200, 0));
    canvas.text(cx, 330.0, &format!("COINS:{}", state.coins_collected), YELLOW, Anchor::Centre);
    canvas.text(cx, 380.0, "PRESS SPACE OR CLICK", WHITE, Anchor::Centre);
    canvas.text(cx, 410.0, "TO RESTART", WHITE, Anchor::Centre);

    // skull
    let (sx, sy, s) = (cx - 30.0, 460.0, 60.0);
    canvas.fill(sx + 10.0, sy + 10.0, s - 20.0, s - 20.0, WHITE);
    canvas.fill(sx + 15.0, sy + 25.0, 10.0, 10.0, BLACK);
    canvas.fill(sx + s - 25.0, sy + 25.0, 10.0, 10.0, BLACK);
    canvas.fill(sx + s / 2.0 - 2.0, sy + 35.0, 4.0, 4.0, BLACK);
    for i in 0..3 {
        canvas.fill(sx + 20.0 + i as f32 * 10.0, sy + 45.0, 2.0, 10.0, BLACK);
    }
}
