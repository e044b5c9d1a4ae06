//! Parallax city skyline: layer generation and scrolling.

use rand::Rng;

use crate::entities::{
    Background, Layer, Rgb, Sprite, GRAY, GROUND_HEIGHT, LIGHT_BLUE, SCREEN_HEIGHT, SCREEN_WIDTH,
    YELLOW,
};

pub const BACKGROUND_SPEED: f32 = 2.0;

/// Building dimensions snap to this grid.
const GRID: f32 = 8.0;
const WINDOW_SIZE: f32 = 8.0;
const WINDOW_PITCH: f32 = 24.0;
const WINDOW_MARGIN: f32 = 16.0;
const UNLIT_WINDOW: Rgb = Rgb(50, 50, 50);
const TOWER_LEGS: Rgb = Rgb(100, 50, 50);

/// Sky, three skyline layers of increasing speed, and the ground strip.
pub fn new_background(rng: &mut impl Rng) -> Background {
    let mut sky = Sprite::new(SCREEN_WIDTH, SCREEN_HEIGHT);
    sky.push(0.0, 0.0, SCREEN_WIDTH, SCREEN_HEIGHT, LIGHT_BLUE);

    let layers = vec![
        Layer { sprite: sky, speed: 0.0, x: 0.0, y: 0.0 },
        Layer { sprite: buildings_layer(200, 300, GRAY, rng), speed: 1.0, x: 0.0, y: 0.0 },
        Layer {
            sprite: buildings_layer(150, 350, Rgb(80, 80, 100), rng),
            speed: 2.0,
            x: 0.0,
            y: 0.0,
        },
        Layer {
            sprite: buildings_layer(100, 400, Rgb(50, 50, 70), rng),
            speed: 3.0,
            x: 0.0,
            y: 0.0,
        },
        Layer {
            sprite: ground(rng),
            speed: BACKGROUND_SPEED,
            x: 0.0,
            y: SCREEN_HEIGHT - GROUND_HEIGHT,
        },
    ];

    Background { layers }
}

/// Two screen widths of buildings whose heights fall in `min_h..=max_h`.
pub fn buildings_layer(min_h: u32, max_h: u32, base: Rgb, rng: &mut impl Rng) -> Sprite {
    let width = SCREEN_WIDTH * 2.0;
    let mut layer = Sprite::new(width, SCREEN_HEIGHT);

    let mut x = 0.0;
    while x < width {
        let bw = rng.gen_range(8..=20) as f32 * GRID;
        let bh = rng.gen_range(min_h / 8..=max_h / 8) as f32 * GRID;
        let color = base.shifted(rng.gen_range(-20..=20));
        let top = SCREEN_HEIGHT - bh;

        layer.push(x, top, bw, bh, color);

        let mut wy = top + WINDOW_MARGIN;
        while wy < SCREEN_HEIGHT - WINDOW_MARGIN {
            let mut wx = x + WINDOW_MARGIN;
            while wx < x + bw - WINDOW_MARGIN {
                let lit = rng.gen_bool(0.7);
                layer.push(wx, wy, WINDOW_SIZE, WINDOW_SIZE, if lit { YELLOW } else { UNLIT_WINDOW });
                wx += WINDOW_PITCH;
            }
            wy += WINDOW_PITCH;
        }

        layer.push(x, top, bw, GRID, color.shifted(-30));

        if rng.gen_bool(0.3) {
            if rng.gen_bool(0.5) {
                // antenna
                layer.push(x + bw / 2.0 - 2.0, top - 24.0, 4.0, 24.0, GRAY);
            } else {
                // water tower
                let (tw, th) = (16.0, 24.0);
                let tx = x + rng.gen_range(tw..=bw - tw * 2.0);
                layer.push(tx, top - th, tw, th, GRAY);
                layer.push(tx - 4.0, top - th / 2.0, tw + 8.0, th / 2.0, TOWER_LEGS);
            }
        }

        x += bw + rng.gen_range(0..=16) as f32;
    }

    layer
}

fn ground(rng: &mut impl Rng) -> Sprite {
    let mut strip = Sprite::new(SCREEN_WIDTH, GROUND_HEIGHT);
    strip.push(0.0, 0.0, SCREEN_WIDTH, GROUND_HEIGHT, GRAY);
    for _ in 0..100 {
        let x = rng.gen_range(0.0..=SCREEN_WIDTH);
        let y = rng.gen_range(0.0..=GROUND_HEIGHT);
        let size = rng.gen_range(2..=5) as f32;
        strip.push(x, y, size, size, Rgb(80, 80, 80));
    }
    strip
}

/// Scroll every moving layer; offsets wrap after one full screen width.
pub fn update_background(bg: &mut Background) {
    for layer in &mut bg.layers {
        layer.x -= layer.speed;
        if layer.speed > 0.0 && layer.x <= -SCREEN_WIDTH {
            layer.x = 0.0;
        }
    }
}
