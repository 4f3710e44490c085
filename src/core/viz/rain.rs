use instant::Instant;
use std::time::Duration;

use super::{FrameSignal, FrameTime, Visualization, VisualizationKind};
use crate::constants::CLOCK_PERIOD;
use crate::core::error::VizError;
use crate::core::home::Home;
use crate::core::quality::{gated_spawn_count, QualityTier};
use crate::core::rain::Rainfall;
use crate::core::reactive::elapsed_between;
use crate::core::surface::{fit_canvas, Canvas2d, SurfaceMetrics};
use crate::core::timer::IntervalTimer;

const RAIN_SEED: u64 = 0x0000_5241_494E;
// Step used for the very first tick, before a previous sample exists
const FIRST_TICK: Duration = Duration::from_millis(16);

/// Rain seen through a window: a particle layer under a home layer.
pub struct RainViz<C: Canvas2d> {
    rain_canvas: C,
    home_canvas: C,
    rainfall: Option<Rainfall>,
    home: Option<Home>,
    clock_timer: Option<IntervalTimer>,
    quality: QualityTier,
    metrics: SurfaceMetrics,
    last_tick: Option<Instant>,
    released: bool,
}

impl<C: Canvas2d> RainViz<C> {
    pub fn new(
        rain_canvas: C,
        home_canvas: C,
        quality: QualityTier,
        metrics: SurfaceMetrics,
        time: &FrameTime,
    ) -> Self {
        let mut viz = Self {
            rain_canvas,
            home_canvas,
            rainfall: None,
            home: None,
            clock_timer: None,
            quality,
            metrics,
            last_tick: None,
            released: false,
        };
        viz.resize(metrics, time);
        viz
    }

    pub fn rainfall(&self) -> Option<&Rainfall> {
        self.rainfall.as_ref()
    }

    pub fn home(&self) -> Option<&Home> {
        self.home.as_ref()
    }

    pub fn clock_timer(&self) -> Option<&IntervalTimer> {
        self.clock_timer.as_ref()
    }
}

impl<C: Canvas2d> Visualization for RainViz<C> {
    fn kind(&self) -> VisualizationKind {
        VisualizationKind::Rain
    }

    fn resize(&mut self, metrics: SurfaceMetrics, time: &FrameTime) {
        if self.released {
            return;
        }
        self.metrics = metrics;
        let (w, h) = (metrics.width, metrics.height);

        fit_canvas(&mut self.home_canvas, &metrics);
        let home = Home::new(w, h, time.time_of_day);
        home.render(&mut self.home_canvas);
        self.home = Some(home);
        // replacing the timer cancels the previous one
        self.clock_timer = Some(IntervalTimer::start(CLOCK_PERIOD, time.now));

        fit_canvas(&mut self.rain_canvas, &metrics);
        match self.rainfall.as_mut() {
            Some(rainfall) => rainfall.set_bounds(w as f32, h as f32),
            None => self.rainfall = Some(Rainfall::new(w as f32, h as f32, RAIN_SEED)),
        }
    }

    fn on_sample(&mut self, signal: &FrameSignal<'_>) -> Result<(), VizError> {
        if self.released {
            return Ok(());
        }
        let Some(rainfall) = self.rainfall.as_mut() else {
            return Ok(());
        };
        let count = gated_spawn_count(signal.smoothed_intensity, self.quality, rainfall.len());
        for _ in 0..count {
            rainfall.add();
        }

        let dt = match self.last_tick.replace(signal.now) {
            Some(prev) => elapsed_between(prev, signal.now),
            None => FIRST_TICK,
        };
        rainfall.tick(dt);

        let (w, h) = (self.metrics.width, self.metrics.height);
        self.rain_canvas.clear_rect(0.0, 0.0, w, h);
        rainfall.render(&mut self.rain_canvas);
        Ok(())
    }

    fn on_frame(&mut self, time: &FrameTime) -> Result<(), VizError> {
        if self.released {
            return Ok(());
        }
        let fired = self
            .clock_timer
            .as_mut()
            .map(|t| t.poll(time.now))
            .unwrap_or(false);
        if let (true, Some(home)) = (fired, self.home.as_mut()) {
            home.clock.tick(time.time_of_day);
            home.render(&mut self.home_canvas);
        }
        Ok(())
    }

    fn cleanup(&mut self, _now: Instant) {
        if self.released {
            return;
        }
        self.released = true;
        self.clock_timer = None;
        self.rain_canvas.release();
        self.home_canvas.release();
        log::debug!(
            "[rain] released with {} live drops",
            self.rainfall.as_ref().map(Rainfall::len).unwrap_or(0)
        );
    }
}
