use wasm_bindgen::JsCast;
use web_sys as web;

use crate::core::{SurfaceMetrics, VizError};

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Logical window size and pixel ratio, as the resize handler sees them.
pub fn window_metrics() -> SurfaceMetrics {
    let Some(w) = web::window() else {
        return SurfaceMetrics::new(1.0, 1.0, 1.0);
    };
    let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(1.0);
    let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(1.0);
    SurfaceMetrics::new(width, height, w.device_pixel_ratio())
}

/// Local wall-clock time in seconds since midnight.
pub fn time_of_day() -> f64 {
    let d = js_sys::Date::new_0();
    d.get_hours() as f64 * 3600.0
        + d.get_minutes() as f64 * 60.0
        + d.get_seconds() as f64
        + d.get_milliseconds() as f64 / 1000.0
}

/// Decoded values of `keys` from `location.search`, in key order.
pub fn query_params(keys: &[&'static str]) -> Vec<(&'static str, String)> {
    let params = web::window()
        .and_then(|w| w.location().search().ok())
        .and_then(|search| web::UrlSearchParams::new_with_str(&search).ok());
    let Some(params) = params else {
        return Vec::new();
    };
    keys.iter().filter_map(|k| params.get(k).map(|v| (*k, v))).collect()
}

/// User-agent sniff for phones and tablets.
pub fn is_mobile_device() -> bool {
    let Some(ua) = web::window().and_then(|w| w.navigator().user_agent().ok()) else {
        return false;
    };
    ["Android", "iPhone", "iPad", "iPod", "Mobile"]
        .iter()
        .any(|needle| ua.contains(needle))
}

/// Append a full-window canvas layer to `container`. Later layers stack on
/// top of earlier ones.
pub fn append_layer_canvas(
    document: &web::Document,
    container: &web::HtmlElement,
    layer: &'static str,
    style: Option<&str>,
) -> Result<web::HtmlCanvasElement, VizError> {
    let canvas = document
        .create_element("canvas")
        .map_err(|e| VizError::Dom(format!("create canvas: {:?}", e)))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| VizError::Dom(format!("not a canvas: {:?}", e)))?;
    canvas.set_class_name(&format!("viz-layer viz-{layer}"));
    let css = canvas.style();
    for (k, v) in [
        ("position", "absolute"),
        ("left", "0"),
        ("top", "0"),
        ("width", "100%"),
        ("height", "100%"),
        ("pointer-events", "none"),
    ] {
        _ = css.set_property(k, v);
    }
    if let Some(extra) = style {
        let merged = format!("{}{}", css.css_text(), extra);
        css.set_css_text(&merged);
    }
    container
        .append_child(&canvas)
        .map_err(|e| VizError::Dom(format!("append {layer} canvas: {:?}", e)))?;
    Ok(canvas)
}

/// Detach a canvas and drop its backing store.
pub fn remove_canvas(canvas: &web::HtmlCanvasElement) {
    canvas.set_width(0);
    canvas.set_height(0);
    canvas.remove();
}
