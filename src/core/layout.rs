use crate::constants::FRAME_THICKNESS_DIVISOR;

/// Proportional layout constants shared by every 2D scene element.
///
/// Elements position themselves from these values instead of absolute pixel
/// coordinates, which keeps the scene resolution-independent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneLayout {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub one_third_width: f64,
    pub one_third_height: f64,
    pub one_half_height: f64,
    pub window_frame_thickness: f64,
}

impl SceneLayout {
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            canvas_width,
            canvas_height,
            one_third_width: canvas_width / 3.0,
            one_third_height: canvas_height / 3.0,
            one_half_height: canvas_height / 2.0,
            window_frame_thickness: canvas_width.min(canvas_height) / FRAME_THICKNESS_DIVISOR as f64,
        }
    }

    /// Y coordinate of the window sill, where the cat sits.
    #[inline]
    pub fn sill_y(&self) -> f64 {
        self.one_half_height * 3.0 / 2.0
    }
}
