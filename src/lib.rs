//! Audio-reactive visualizations for the browser.
//!
//! The `core` module holds everything that can be reasoned about off the
//! page; the wasm-only modules bind it to the DOM, Canvas 2D and WebGPU.

pub mod config;
pub mod constants;
pub mod core;

#[cfg(target_arch = "wasm32")]
mod audio;
#[cfg(target_arch = "wasm32")]
mod canvas;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod frame;
#[cfg(target_arch = "wasm32")]
mod platform;
#[cfg(target_arch = "wasm32")]
mod render;

#[cfg(target_arch = "wasm32")]
pub use web_entry::*;

#[cfg(target_arch = "wasm32")]
mod web_entry {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys as web;

    use crate::audio::AnalyserTap;
    use crate::config::{AppConfig, QUERY_KEYS};
    use crate::constants::SMOOTHING_ALPHA;
    use crate::core::{FeatureExtractor, MountOptions, QualityTier, Stage, VisualizationKind};
    use crate::dom;
    use crate::frame::{FrameContext, FrameLoop};
    use crate::platform::WebPlatform;

    thread_local! {
        static AUTO_MOUNTED: RefCell<Option<VisualizerHandle>> = const { RefCell::new(None) };
    }

    fn js_err(e: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&e.to_string())
    }

    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();
        log::info!("viz-web starting");

        let params = dom::query_params(&QUERY_KEYS);
        let config = AppConfig::from_params(params.iter().map(|(k, v)| (*k, v.as_str())));
        let has_container = dom::window_document()
            .and_then(|d| d.get_element_by_id(&config.container_id))
            .is_some();
        if !has_container {
            log::info!(
                "[start] no #{} on the page; waiting for VisualizerHandle.mount",
                config.container_id
            );
            return Ok(());
        }
        let options = config.mount_options(dom::is_mobile_device());
        let handle = VisualizerHandle::mount_with(&config.container_id, config.visualization, options)?;
        AUTO_MOUNTED.with(|slot| *slot.borrow_mut() = Some(handle));
        Ok(())
    }

    /// A mounted visualizer. Dropping or calling `unmount` stops the loop and
    /// removes every surface it created.
    #[wasm_bindgen]
    pub struct VisualizerHandle {
        ctx: Rc<RefCell<FrameContext>>,
        frame_loop: Option<FrameLoop>,
        resize_listener: Option<Closure<dyn FnMut()>>,
    }

    #[wasm_bindgen]
    impl VisualizerHandle {
        /// Mount `visualization` ("stars", "rain", "waveform") into the element
        /// with id `container_id`.
        pub fn mount(
            container_id: &str,
            visualization: &str,
            quality: Option<String>,
            style: Option<String>,
        ) -> Result<VisualizerHandle, JsValue> {
            let kind: VisualizationKind = visualization.parse().map_err(js_err)?;
            let quality = match quality.as_deref() {
                Some(q) => q.parse().map_err(js_err)?,
                None => QualityTier::default(),
            };
            let options = MountOptions {
                quality,
                style,
                mobile: dom::is_mobile_device(),
            };
            Self::mount_with(container_id, kind, options)
        }

        pub fn set_quality(&mut self, quality: &str) -> Result<(), JsValue> {
            let quality: QualityTier = quality.parse().map_err(js_err)?;
            let time = FrameContext::now();
            self.ctx.borrow_mut().stage.set_quality(quality, &time).map_err(js_err)?;
            self.ensure_running();
            Ok(())
        }

        pub fn swap(&mut self, visualization: &str) -> Result<(), JsValue> {
            let kind: VisualizationKind = visualization.parse().map_err(js_err)?;
            let time = FrameContext::now();
            self.ctx.borrow_mut().stage.swap(kind, &time).map_err(js_err)?;
            self.ensure_running();
            Ok(())
        }

        /// Feed frequency data from a host-owned analyser node.
        pub fn attach_analyser(&mut self, analyser: web::AnalyserNode) {
            self.ctx.borrow_mut().tap = Some(AnalyserTap::new(analyser));
        }

        pub fn detach_analyser(&mut self) {
            self.ctx.borrow_mut().tap = None;
        }

        pub fn visualization(&self) -> String {
            self.ctx.borrow().stage.kind().to_string()
        }

        /// What is on screen, which differs from `visualization` when the
        /// mobile notice stands in for it. Empty when unmounted.
        pub fn active_visualization(&self) -> String {
            self.ctx
                .borrow()
                .stage
                .active_kind()
                .map(|k| k.to_string())
                .unwrap_or_default()
        }

        pub fn quality(&self) -> String {
            self.ctx.borrow().stage.quality().to_string()
        }

        pub fn unmount(&mut self) {
            if let Some(l) = self.frame_loop.take() {
                l.cancel();
            }
            if let Some(cb) = self.resize_listener.take() {
                if let Some(w) = web::window() {
                    _ = w.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
                }
            }
            self.ctx.borrow_mut().stage.unmount(instant::Instant::now());
        }
    }

    impl VisualizerHandle {
        fn mount_with(container_id: &str, kind: VisualizationKind, options: MountOptions) -> Result<Self, JsValue> {
            let platform = WebPlatform::new(container_id).map_err(|e| JsValue::from_str(&format!("{e:#}")))?;
            let time = FrameContext::now();
            let stage = Stage::mount(platform, kind, options, dom::window_metrics(), &time).map_err(js_err)?;
            let ctx = Rc::new(RefCell::new(FrameContext {
                stage,
                extractor: FeatureExtractor::new(SMOOTHING_ALPHA),
                tap: None,
            }));

            let ctx_resize = ctx.clone();
            let resize_listener = Closure::wrap(Box::new(move || {
                let time = FrameContext::now();
                if let Err(e) = ctx_resize.borrow_mut().stage.resize(dom::window_metrics(), &time) {
                    log::warn!("[resize] ignored: {}", e);
                }
            }) as Box<dyn FnMut()>);
            if let Some(w) = web::window() {
                _ = w.add_event_listener_with_callback("resize", resize_listener.as_ref().unchecked_ref());
            }

            let frame_loop = FrameLoop::start(ctx.clone());
            Ok(Self {
                ctx,
                frame_loop: Some(frame_loop),
                resize_listener: Some(resize_listener),
            })
        }

        /// Restart the loop if an earlier failure ended it.
        fn ensure_running(&mut self) {
            let running = self.frame_loop.as_ref().is_some_and(FrameLoop::is_running);
            if !running && self.ctx.borrow().stage.is_mounted() {
                self.frame_loop = Some(FrameLoop::start(self.ctx.clone()));
            }
        }
    }

    impl Drop for VisualizerHandle {
        fn drop(&mut self) {
            self.unmount();
        }
    }
}
