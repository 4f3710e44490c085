use glam::Vec2;
use rand::prelude::*;
use std::time::Duration;

use super::surface::{Canvas2d, LineCap};
use crate::constants::*;

/// A single falling streak.
///
/// `position` is the top of the streak in logical pixels; `speed` is in
/// pixels per second. `age` and `ttl` are seconds.
#[derive(Clone, Debug, PartialEq)]
pub struct Raindrop {
    pub position: Vec2,
    pub speed: f32,
    pub length: f32,
    pub opacity: f32,
    pub age: f32,
    pub ttl: f32,
}

impl Raindrop {
    #[inline]
    fn expired(&self, height: f32) -> bool {
        self.position.y > height || self.age >= self.ttl
    }
}

/// Pool of independently aging raindrops.
///
/// Callers decide how many drops to add per tick; the pool applies no cap of
/// its own. Bounds may change at any time without touching live drops.
pub struct Rainfall {
    drops: Vec<Raindrop>,
    width: f32,
    height: f32,
    rng: StdRng,
}

impl Rainfall {
    pub fn new(width: f32, height: f32, seed: u64) -> Self {
        Self {
            drops: Vec::new(),
            width,
            height,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn drops(&self) -> &[Raindrop] {
        &self.drops
    }

    pub fn len(&self) -> usize {
        self.drops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drops.is_empty()
    }

    pub fn bounds(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn set_bounds(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Spawn one drop at a random position along the top edge.
    pub fn add(&mut self) {
        let rng = &mut self.rng;
        let length = rng.gen_range(RAINDROP_LENGTH_MIN..RAINDROP_LENGTH_MAX);
        let drop = Raindrop {
            position: Vec2::new(
                rng.gen_range(0.0..self.width.max(1.0)),
                -rng.gen_range(0.0..RAINDROP_SPAWN_HEADROOM) - length,
            ),
            speed: rng.gen_range(RAINDROP_SPEED_MIN..RAINDROP_SPEED_MAX),
            length,
            opacity: rng.gen_range(RAINDROP_OPACITY_MIN..RAINDROP_OPACITY_MAX),
            age: 0.0,
            ttl: rng.gen_range(RAINDROP_TTL_MIN_SEC..RAINDROP_TTL_MAX_SEC),
        };
        self.drops.push(drop);
    }

    /// Advance every drop by `dt` and drop the ones that fell out or aged out.
    pub fn tick(&mut self, dt: Duration) {
        let dt = dt.min(MAX_TICK_DT).as_secs_f32();
        let height = self.height;
        for drop in self.drops.iter_mut() {
            drop.position.y += drop.speed * dt;
            drop.age += dt;
        }
        self.drops.retain(|d| !d.expired(height));
    }

    /// Draw every live drop. Does not clear; the caller owns clearing.
    pub fn render<C: Canvas2d + ?Sized>(&self, canvas: &mut C) {
        canvas.save();
        canvas.set_stroke_style(RAINDROP_COLOR);
        canvas.set_line_width(RAINDROP_WIDTH as f64);
        canvas.set_line_cap(LineCap::Round);
        for drop in &self.drops {
            canvas.set_global_alpha(drop.opacity as f64);
            canvas.begin_path();
            canvas.move_to(drop.position.x as f64, drop.position.y as f64);
            canvas.line_to(
                drop.position.x as f64,
                (drop.position.y + drop.length) as f64,
            );
            canvas.stroke();
        }
        canvas.restore();
    }
}
