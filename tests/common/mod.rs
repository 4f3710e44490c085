// Recording fakes for the platform seams, shared by the host-side tests.

#![allow(dead_code)]

use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use viz_web::core::scene::{SceneFrame, SceneRenderer};
use viz_web::core::surface::LineCap;
use viz_web::core::{Canvas2d, Deferred, FrameTime, Platform, SurfaceMetrics, VizError};

#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    Backing(u32, u32),
    PixelRatio(f64),
    Clear,
    FillRect,
    Stroke,
    Fill,
    MoveTo(f64),
    LineTo(f64),
    Text(String),
    Release,
}

#[derive(Debug, Default)]
pub struct CanvasLog {
    pub layer: &'static str,
    pub ops: Vec<Op>,
    pub backing: (u32, u32),
    pub released: bool,
}

impl CanvasLog {
    /// Ops recorded after the canvas was released.
    pub fn ops_after_release(&self) -> usize {
        match self.ops.iter().position(|op| *op == Op::Release) {
            Some(i) => self.ops.len() - i - 1,
            None => 0,
        }
    }

    pub fn count(&self, op: &Op) -> usize {
        self.ops.iter().filter(|o| *o == op).count()
    }

    pub fn last_clear(&self) -> Option<usize> {
        self.ops.iter().rposition(|op| *op == Op::Clear)
    }

    /// X coordinates of the path points, in drawing order.
    pub fn path_xs(&self) -> Vec<f64> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::MoveTo(x) | Op::LineTo(x) => Some(*x),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Records every call, including ones made after `release`, so tests can
/// catch drawing on a detached surface.
pub struct RecordingCanvas {
    log: Rc<RefCell<CanvasLog>>,
}

impl RecordingCanvas {
    fn push(&self, op: Op) {
        self.log.borrow_mut().ops.push(op);
    }
}

impl Canvas2d for RecordingCanvas {
    fn set_backing_size(&mut self, width: u32, height: u32) {
        let mut log = self.log.borrow_mut();
        log.backing = (width, height);
        log.ops.push(Op::Backing(width, height));
    }

    fn backing_size(&self) -> (u32, u32) {
        self.log.borrow().backing
    }

    fn set_pixel_ratio(&mut self, ratio: f64) {
        self.push(Op::PixelRatio(ratio));
    }

    fn clear_rect(&mut self, _x: f64, _y: f64, _w: f64, _h: f64) {
        self.push(Op::Clear);
    }

    fn fill_rect(&mut self, _x: f64, _y: f64, _w: f64, _h: f64) {
        self.push(Op::FillRect);
    }

    fn set_fill_style(&mut self, _css: &str) {}
    fn set_stroke_style(&mut self, _css: &str) {}
    fn set_global_alpha(&mut self, _alpha: f64) {}
    fn set_line_width(&mut self, _width: f64) {}
    fn set_line_cap(&mut self, _cap: LineCap) {}
    fn begin_path(&mut self) {}
    fn close_path(&mut self) {}

    fn move_to(&mut self, x: f64, _y: f64) {
        self.push(Op::MoveTo(x));
    }

    fn line_to(&mut self, x: f64, _y: f64) {
        self.push(Op::LineTo(x));
    }

    fn quadratic_curve_to(&mut self, _cpx: f64, _cpy: f64, _x: f64, _y: f64) {}
    fn arc(&mut self, _x: f64, _y: f64, _r: f64, _s: f64, _e: f64) {}

    fn fill(&mut self) {
        self.push(Op::Fill);
    }

    fn stroke(&mut self) {
        self.push(Op::Stroke);
    }

    fn save(&mut self) {}
    fn restore(&mut self) {}
    fn translate(&mut self, _x: f64, _y: f64) {}
    fn set_font(&mut self, _css: &str) {}

    fn fill_text(&mut self, text: &str, _x: f64, _y: f64) {
        self.push(Op::Text(text.to_string()));
    }

    fn release(&mut self) {
        let mut log = self.log.borrow_mut();
        log.released = true;
        log.ops.push(Op::Release);
    }
}

#[derive(Debug, Default)]
pub struct SceneLog {
    pub resizes: Vec<(u32, u32)>,
    /// Light intensity seen by each rendered frame.
    pub lights: Vec<f32>,
    pub star_counts: Vec<usize>,
    pub releases: u32,
    pub renders_after_release: u32,
    pub fail_renders: bool,
}

pub struct FakeScene {
    log: Rc<RefCell<SceneLog>>,
}

impl SceneRenderer for FakeScene {
    fn resize(&mut self, width: u32, height: u32) {
        self.log.borrow_mut().resizes.push((width, height));
    }

    fn render(&mut self, frame: &SceneFrame<'_>) -> Result<(), VizError> {
        let mut log = self.log.borrow_mut();
        if log.releases > 0 {
            log.renders_after_release += 1;
        }
        if log.fail_renders {
            return Err(VizError::Render("device lost".into()));
        }
        log.lights.push(frame.light.intensity);
        log.star_counts.push(frame.stars.len());
        Ok(())
    }

    fn release(&mut self) {
        self.log.borrow_mut().releases += 1;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneMode {
    Ready,
    Pending,
    Fail,
}

pub struct FakePlatform {
    pub scene_mode: SceneMode,
    pub fail_canvas: bool,
    pub canvases: Vec<Rc<RefCell<CanvasLog>>>,
    pub scenes: Vec<Rc<RefCell<SceneLog>>>,
    pub pending: Vec<Deferred<FakeScene>>,
    pub styles: Vec<Option<String>>,
}

impl FakePlatform {
    pub fn new(scene_mode: SceneMode) -> Self {
        Self {
            scene_mode,
            fail_canvas: false,
            canvases: Vec::new(),
            scenes: Vec::new(),
            pending: Vec::new(),
            styles: Vec::new(),
        }
    }

    pub fn live_canvases(&self) -> usize {
        self.canvases.iter().filter(|c| !c.borrow().released).count()
    }

    pub fn live_scenes(&self) -> usize {
        self.scenes.iter().filter(|s| s.borrow().releases == 0).count()
    }

    pub fn canvas(&self, layer: &str) -> Option<Rc<RefCell<CanvasLog>>> {
        self.canvases
            .iter()
            .rev()
            .find(|c| c.borrow().layer == layer)
            .cloned()
    }

    /// Complete the oldest still-pending scene.
    pub fn resolve_pending(&mut self, result: Result<(), VizError>) {
        if self.pending.is_empty() {
            return;
        }
        let deferred = self.pending.remove(0);
        match result {
            Ok(()) => {
                let log = Rc::new(RefCell::new(SceneLog::default()));
                self.scenes.push(log.clone());
                deferred.resolve(Ok(FakeScene { log }));
            }
            Err(e) => deferred.resolve(Err(e)),
        }
    }
}

impl Platform for FakePlatform {
    type Canvas = RecordingCanvas;
    type Scene = FakeScene;

    fn create_canvas(&mut self, layer: &'static str, style: Option<&str>) -> Result<RecordingCanvas, VizError> {
        if self.fail_canvas {
            return Err(VizError::NoCanvasContext { layer });
        }
        self.styles.push(style.map(str::to_string));
        let log = Rc::new(RefCell::new(CanvasLog {
            layer,
            ..Default::default()
        }));
        self.canvases.push(log.clone());
        Ok(RecordingCanvas { log })
    }

    fn create_scene(&mut self, _metrics: SurfaceMetrics, style: Option<&str>) -> Deferred<FakeScene> {
        self.styles.push(style.map(str::to_string));
        match self.scene_mode {
            SceneMode::Ready => {
                let log = Rc::new(RefCell::new(SceneLog::default()));
                self.scenes.push(log.clone());
                Deferred::ready(FakeScene { log })
            }
            SceneMode::Pending => {
                let d = Deferred::pending();
                self.pending.push(d.clone());
                d
            }
            SceneMode::Fail => Deferred::failed(VizError::NoRenderingContext("webgpu unavailable".into())),
        }
    }
}

pub fn metrics() -> SurfaceMetrics {
    SurfaceMetrics::new(800.0, 600.0, 2.0)
}

/// Frame `ms` milliseconds after `t0`, at a fixed wall-clock time.
pub fn at(t0: Instant, ms: u64) -> FrameTime {
    FrameTime::new(t0 + Duration::from_millis(ms), 12.0 * 3600.0)
}
