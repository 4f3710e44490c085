//! The room the rain is watched from: wall, window frame, a cat on the sill
//! and a wall clock. Drawn on its own canvas above the rain layer; the window
//! opening is left transparent.

use std::f64::consts::{PI, TAU};

use super::layout::SceneLayout;
use super::surface::{Canvas2d, LineCap};
use crate::constants::*;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Displayed wall-clock time, advanced once per second by the owner's timer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WallClock {
    seconds_of_day: u32,
}

impl WallClock {
    pub fn new(time_of_day_secs: f64) -> Self {
        let mut clock = Self::default();
        clock.tick(time_of_day_secs);
        clock
    }

    pub fn tick(&mut self, time_of_day_secs: f64) {
        let t = if time_of_day_secs.is_finite() {
            time_of_day_secs.rem_euclid(SECONDS_PER_DAY)
        } else {
            0.0
        };
        self.seconds_of_day = t as u32;
    }

    pub fn hms(&self) -> (u32, u32, u32) {
        let s = self.seconds_of_day;
        (s / 3600, (s / 60) % 60, s % 60)
    }

    /// Hand angles in radians, clockwise from twelve: (hour, minute, second).
    pub fn hand_angles(&self) -> (f64, f64, f64) {
        let (h, m, s) = self.hms();
        let second = s as f64 / 60.0 * TAU;
        let minute = (m as f64 + s as f64 / 60.0) / 60.0 * TAU;
        let hour = ((h % 12) as f64 + m as f64 / 60.0) / 12.0 * TAU;
        (hour, minute, second)
    }
}

/// Window opening in logical pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindowRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl WindowRect {
    fn from_layout(layout: &SceneLayout) -> Self {
        Self {
            left: layout.one_third_width / 2.0,
            top: layout.one_third_height / 2.0,
            right: layout.canvas_width - layout.one_third_width / 2.0,
            bottom: layout.sill_y(),
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

struct Cat {
    x: f64,
    head_radius: f64,
    body_height: f64,
    body_width: f64,
}

impl Cat {
    fn new(layout: &SceneLayout) -> Self {
        let t = layout.window_frame_thickness;
        Self {
            x: layout.one_third_width * 2.0 - t * 1.2,
            head_radius: t,
            body_height: t * 3.0,
            body_width: t * 2.2,
        }
    }

    fn render<C: Canvas2d + ?Sized>(&self, canvas: &mut C, layout: &SceneLayout) {
        canvas.save();
        canvas.set_fill_style(CAT_COLOR);
        canvas.set_stroke_style(CAT_COLOR);
        self.head(canvas, layout);
        self.body(canvas, layout);
        self.tail(canvas, layout);
        canvas.restore();
    }

    fn head<C: Canvas2d + ?Sized>(&self, canvas: &mut C, layout: &SceneLayout) {
        let r = self.head_radius;
        let y = layout.sill_y() - self.body_height - r;

        canvas.begin_path();
        canvas.arc(self.x, y, r, 0.0, TAU);
        canvas.fill();

        canvas.save();
        canvas.translate(self.x, y);
        canvas.set_line_width(r * 0.25);
        // (base start, tip, base end) as fractions of a turn plus tip reach
        let ears = [(0.85, 0.8, 1.4, 0.7), (1.2, 1.22, 1.5, 1.3)];
        for (start, tip, reach, end) in ears {
            let polar = |turn: f64, k: f64| ((PI * turn).sin() * r * k, (PI * turn).cos() * r * k);
            let (sx, sy) = polar(start, 1.0);
            let (tx, ty) = polar(tip, reach);
            let (ex, ey) = polar(end, 1.0);
            canvas.begin_path();
            canvas.move_to(sx, sy);
            canvas.line_to(tx, ty);
            canvas.line_to(ex, ey);
            canvas.close_path();
            canvas.fill();
            canvas.stroke();
        }
        canvas.restore();
    }

    fn body<C: Canvas2d + ?Sized>(&self, canvas: &mut C, layout: &SceneLayout) {
        let (x, r, w, h) = (self.x, self.head_radius, self.body_width, self.body_height);
        let t = layout.window_frame_thickness;
        let y = layout.sill_y() - h;
        let floor = y + h + t;

        canvas.begin_path();
        canvas.move_to(x, y - r / 2.0);
        canvas.quadratic_curve_to(x - w * 0.75, y + h / 4.0, x - w / 3.0, floor);
        canvas.line_to(x + w / 2.0, floor);
        canvas.quadratic_curve_to(x + w * 1.2, floor, x + w / 3.0, y - r / 3.0);
        canvas.close_path();
        canvas.fill();

        // haunch
        canvas.begin_path();
        canvas.move_to(x - w / 4.0, y + h * 0.3);
        canvas.quadratic_curve_to(x - w, y + h, x - w / 3.0, floor);
        canvas.line_to(x + w / 2.0, floor);
        canvas.close_path();
        canvas.fill();
    }

    fn tail<C: Canvas2d + ?Sized>(&self, canvas: &mut C, layout: &SceneLayout) {
        let t = layout.window_frame_thickness;
        let tail_width = t / 2.0;
        let y = layout.sill_y() + t - tail_width / 2.0;

        canvas.set_line_width(tail_width);
        canvas.set_line_cap(LineCap::Round);
        canvas.begin_path();
        canvas.move_to(self.x, y);
        canvas.line_to(self.x - self.body_width, y);
        canvas.stroke();
    }
}

/// The static room around the window plus the wall clock.
pub struct Home {
    layout: SceneLayout,
    window: WindowRect,
    cat: Cat,
    pub clock: WallClock,
}

impl Home {
    pub fn new(width: f64, height: f64, time_of_day_secs: f64) -> Self {
        let layout = SceneLayout::new(width, height);
        Self {
            window: WindowRect::from_layout(&layout),
            cat: Cat::new(&layout),
            layout,
            clock: WallClock::new(time_of_day_secs),
        }
    }

    pub fn layout(&self) -> &SceneLayout {
        &self.layout
    }

    pub fn window(&self) -> WindowRect {
        self.window
    }

    /// Full redraw of the home layer.
    pub fn render<C: Canvas2d + ?Sized>(&self, canvas: &mut C) {
        let l = &self.layout;
        canvas.clear_rect(0.0, 0.0, l.canvas_width, l.canvas_height);
        self.wall(canvas);
        self.frame(canvas);
        self.cat.render(canvas, l);
        self.clock_face(canvas);
    }

    fn wall<C: Canvas2d + ?Sized>(&self, canvas: &mut C) {
        let (l, w) = (&self.layout, &self.window);
        canvas.set_fill_style(WALL_COLOR);
        canvas.fill_rect(0.0, 0.0, l.canvas_width, w.top);
        canvas.fill_rect(0.0, w.bottom, l.canvas_width, l.canvas_height - w.bottom);
        canvas.fill_rect(0.0, w.top, w.left, w.height());
        canvas.fill_rect(w.right, w.top, l.canvas_width - w.right, w.height());
    }

    fn frame<C: Canvas2d + ?Sized>(&self, canvas: &mut C) {
        let (t, w) = (self.layout.window_frame_thickness, &self.window);
        canvas.set_fill_style(FRAME_COLOR);
        canvas.fill_rect(w.left - t, w.top - t, w.width() + t * 2.0, t);
        canvas.fill_rect(w.left - t, w.top, t, w.height());
        canvas.fill_rect(w.right, w.top, t, w.height());
        // mullions
        let cx = w.left + w.width() / 2.0;
        let cy = w.top + w.height() / 2.0;
        canvas.fill_rect(cx - t / 4.0, w.top, t / 2.0, w.height());
        canvas.fill_rect(w.left, cy - t / 4.0, w.width(), t / 2.0);

        canvas.set_fill_style(SILL_COLOR);
        canvas.fill_rect(w.left - t * 1.5, w.bottom, w.width() + t * 3.0, t);
    }

    fn clock_face<C: Canvas2d + ?Sized>(&self, canvas: &mut C) {
        let l = &self.layout;
        let cx = self.window.left / 2.0;
        let cy = l.one_third_height;
        let radius = (self.window.left / 2.0 * 0.7).min(l.window_frame_thickness * 3.0);
        if radius <= 1.0 {
            return;
        }

        canvas.save();
        canvas.set_fill_style(CLOCK_FACE_COLOR);
        canvas.begin_path();
        canvas.arc(cx, cy, radius, 0.0, TAU);
        canvas.fill();

        canvas.set_stroke_style(CLOCK_HAND_COLOR);
        canvas.set_line_cap(LineCap::Round);
        let (hour, minute, second) = self.clock.hand_angles();
        for (angle, reach, width) in [(hour, 0.5, 0.08), (minute, 0.78, 0.05), (second, 0.88, 0.02)] {
            canvas.set_line_width(radius * width);
            canvas.begin_path();
            canvas.move_to(cx, cy);
            canvas.line_to(cx + angle.sin() * radius * reach, cy - angle.cos() * radius * reach);
            canvas.stroke();
        }
        canvas.restore();
    }
}
