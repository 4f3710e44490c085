use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

use crate::canvas::WebCanvas;
use crate::core::{Deferred, Platform, SceneRenderer, SurfaceMetrics, VizError};
use crate::dom;
use crate::render::GpuState;

/// Surfaces are layered inside one container element of the host page.
pub struct WebPlatform {
    document: web::Document,
    container: web::HtmlElement,
}

impl WebPlatform {
    pub fn new(container_id: &str) -> anyhow::Result<Self> {
        let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
        let container = document
            .get_element_by_id(container_id)
            .ok_or_else(|| anyhow::anyhow!("missing #{}", container_id))?
            .dyn_into::<web::HtmlElement>()
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
        Ok(Self {
            document,
            container,
        })
    }
}

impl Platform for WebPlatform {
    type Canvas = WebCanvas;
    type Scene = GpuState;

    fn create_canvas(&mut self, layer: &'static str, style: Option<&str>) -> Result<WebCanvas, VizError> {
        let canvas = dom::append_layer_canvas(&self.document, &self.container, layer, style)?;
        WebCanvas::new(canvas, layer)
    }

    fn create_scene(&mut self, metrics: SurfaceMetrics, style: Option<&str>) -> Deferred<GpuState> {
        let canvas = match dom::append_layer_canvas(&self.document, &self.container, "stars", style) {
            Ok(c) => c,
            Err(e) => return Deferred::failed(e),
        };
        let (w_px, h_px) = metrics.backing_size();
        canvas.set_width(w_px);
        canvas.set_height(h_px);

        let deferred = Deferred::pending();
        let slot = deferred.clone();
        spawn_local(async move {
            match GpuState::new(canvas.clone()).await {
                Ok(mut gpu) => {
                    if slot.is_abandoned() {
                        log::debug!("[gpu] renderer ready after unmount; discarding");
                        gpu.release();
                    } else {
                        slot.resolve(Ok(gpu));
                    }
                }
                Err(e) => {
                    dom::remove_canvas(&canvas);
                    if !slot.is_abandoned() {
                        slot.resolve(Err(VizError::NoRenderingContext(format!("{e:#}"))));
                    }
                }
            }
        });
        deferred
    }
}
