use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::audio::{self, AnalyserTap};
use crate::core::{FeatureExtractor, FrameTime, Stage};
use crate::dom;
use crate::platform::WebPlatform;

/// Everything one animation frame touches.
pub struct FrameContext {
    pub stage: Stage<WebPlatform>,
    pub extractor: FeatureExtractor,
    pub tap: Option<AnalyserTap>,
}

impl FrameContext {
    pub fn now() -> FrameTime {
        FrameTime::new(Instant::now(), dom::time_of_day())
    }

    /// One frame: sample, feed, animate. Returns false once nothing is
    /// mounted, which ends the loop.
    pub fn frame(&mut self) -> bool {
        let time = Self::now();
        let sample = audio::next_sample(self.tap.as_mut(), &mut self.extractor);
        if let Err(e) = self.stage.push_sample(&sample, time.now) {
            log::warn!("[frame] sample rejected: {}", e);
        }
        if let Err(e) = self.stage.animation_frame(&time) {
            log::error!("[frame] stopping: {}", e);
        }
        self.stage.is_mounted()
    }
}

/// requestAnimationFrame loop that can be stopped from outside.
///
/// The callback holds a clone of its own slot; `cancel` breaks that cycle.
pub struct FrameLoop {
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
    raf_id: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    pub fn start(frame_ctx: Rc<RefCell<FrameContext>>) -> Self {
        let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        let raf_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let tick_clone = tick.clone();
        let raf_clone = raf_id.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            raf_clone.set(None);
            let keep_going = frame_ctx.borrow_mut().frame();
            if keep_going {
                raf_clone.set(request_frame(&tick_clone));
            }
        }) as Box<dyn FnMut()>));
        raf_id.set(request_frame(&tick));
        Self { tick, raf_id }
    }

    pub fn is_running(&self) -> bool {
        self.raf_id.get().is_some()
    }

    /// Cancel the pending frame and drop the callback. Must not be called
    /// from inside the callback itself.
    pub fn cancel(&self) {
        if let Some(id) = self.raf_id.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
        self.tick.borrow_mut().take();
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) -> Option<i32> {
    let w = web::window()?;
    let slot = tick.borrow();
    let cb = slot.as_ref()?;
    w.request_animation_frame(cb.as_ref().unchecked_ref()).ok()
}
