use jetpack_adventure::background::*;
use jetpack_adventure::effects::*;
use jetpack_adventure::entities::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

// ── Particles ─────────────────────────────────────────────────────────────────

#[test]
fn new_particles_fall_in_range() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..100 {
        let dust = new_particle(0.0, 0.0, ParticleKind::Dust, &mut rng);
        assert!(dust.vx >= -2.0 && dust.vx <= 2.0);
        assert!(dust.vy >= -3.0 && dust.vy <= -1.0);
        assert_eq!(dust.color, GRAY);

        let smoke = new_particle(0.0, 0.0, ParticleKind::Smoke, &mut rng);
        assert!(smoke.vx >= -3.0 && smoke.vx <= -1.0);
        assert!(smoke.vy >= -0.5 && smoke.vy <= 0.5);
        assert!([ORANGE, YELLOW, GRAY].contains(&smoke.color));

        for p in [&dust, &smoke] {
            assert!(p.size >= 3.0 && p.size <= 8.0);
            assert!(p.life >= 0.5 && p.life <= 1.5);
        }
    }
}

#[test]
fn dust_falls_smoke_drifts() {
    let mut dust = Particle {
        x: 0.0,
        y: 0.0,
        vx: 1.0,
        vy: -2.0,
        life: 1.0,
        size: 5.0,
        color: GRAY,
        kind: ParticleKind::Dust,
    };
    let mut smoke = Particle { kind: ParticleKind::Smoke, ..dust.clone() };

    assert!(update_particle(&mut dust));
    assert!(update_particle(&mut smoke));

    assert_eq!((dust.x, dust.y), (1.0, -2.0));
    assert!((dust.vy - -1.9).abs() < 1e-6);
    assert_eq!(smoke.vy, -2.0);
    assert!((dust.life - 0.95).abs() < 1e-6);
    assert!((dust.size - 4.75).abs() < 1e-6);
}

#[test]
fn particles_burn_out_and_never_shrink_below_one() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut p = new_particle(100.0, 100.0, ParticleKind::Smoke, &mut rng);

    let mut ticks = 0;
    while update_particle(&mut p) {
        ticks += 1;
        assert!(p.size >= 1.0);
        assert!(ticks < 100, "particle never died");
    }
    // life in 0.5..=1.5 at 0.05 per tick
    assert!((9..=30).contains(&ticks));
    assert!(p.life <= 0.0);
    assert_eq!(particle_alpha(&p), 0.0);
}

#[test]
fn particle_alpha_tracks_life() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut p = new_particle(0.0, 0.0, ParticleKind::Dust, &mut rng);
    p.life = 1.4;
    assert_eq!(particle_alpha(&p), 1.0);
    p.life = 0.25;
    assert_eq!(particle_alpha(&p), 0.25);
}

#[test]
fn vec_is_a_particle_sink() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut sink: Vec<Particle> = Vec::new();
    sink.emit(new_particle(1.0, 2.0, ParticleKind::Dust, &mut rng));
    assert_eq!(sink.len(), 1);
    assert_eq!((sink[0].x, sink[0].y), (1.0, 2.0));
}

// ── Explosions ────────────────────────────────────────────────────────────────

#[test]
fn explosion_frame_sizes_grow_then_shrink() {
    let sizes: Vec<f32> = (0..EXPLOSION_FRAMES).map(frame_size).collect();
    assert_eq!(sizes, vec![48.0, 60.0, 72.0, 84.0, 100.0, 84.0, 72.0, 60.0]);
}

#[test]
fn explosion_frames_are_built_to_size() {
    let mut rng = StdRng::seed_from_u64(3);
    let e = new_explosion(300.0, 200.0, &mut rng);
    assert_eq!(e.frames.len(), EXPLOSION_FRAMES);
    assert_eq!((e.x, e.y, e.frame), (300.0, 200.0, 0.0));
    for (i, frame) in e.frames.iter().enumerate() {
        assert_eq!(frame.width, frame_size(i));
        assert!(!frame.patches.is_empty());
    }
}

#[test]
fn explosion_lives_sixteen_ticks() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut e = new_explosion(0.0, 0.0, &mut rng);

    for _ in 0..15 {
        assert!(update_explosion(&mut e));
        assert!(current_frame(&e).is_some());
    }
    assert!(!update_explosion(&mut e));
    assert!(current_frame(&e).is_none());
}

// ── Background ────────────────────────────────────────────────────────────────

#[test]
fn background_layers() {
    let mut rng = StdRng::seed_from_u64(42);
    let bg = new_background(&mut rng);
    let speeds: Vec<f32> = bg.layers.iter().map(|l| l.speed).collect();
    assert_eq!(speeds, vec![0.0, 1.0, 2.0, 3.0, BACKGROUND_SPEED]);
    assert_eq!(bg.layers[4].y, SCREEN_HEIGHT - GROUND_HEIGHT);
    assert!(bg.layers.iter().all(|l| l.x == 0.0));
}

#[test]
fn background_wraps_after_one_screen() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut bg = new_background(&mut rng);

    for _ in 0..399 {
        update_background(&mut bg);
        for l in &bg.layers {
            assert!(l.x > -SCREEN_WIDTH && l.x <= 0.0);
        }
    }
    assert_eq!(bg.layers[3].x, -1197.0);
    update_background(&mut bg);
    assert_eq!(bg.layers[3].x, 0.0);
    assert_eq!(bg.layers[1].x, -400.0);
    assert_eq!(bg.layers[0].x, 0.0);
}

#[test]
fn buildings_layer_spans_two_screens() {
    let mut rng = StdRng::seed_from_u64(42);
    let layer = buildings_layer(100, 400, GRAY, &mut rng);
    assert_eq!(layer.width, SCREEN_WIDTH * 2.0);

    let rightmost = layer.patches.iter().map(|p| p.rect.right()).fold(0.0, f32::max);
    // Buildings keep coming until the gap after the last one crosses the edge
    assert!(rightmost >= SCREEN_WIDTH * 2.0 - 16.0);
    for patch in &layer.patches {
        assert!(patch.rect.bottom() <= SCREEN_HEIGHT);
        assert!(patch.rect.y >= SCREEN_HEIGHT - 400.0 - 24.0);
    }
}
