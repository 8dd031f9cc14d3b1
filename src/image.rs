use ndarray::{Array2, Array3};

/// A convinence struct that holds a color image and a metric depth image.
///
/// Depth values are in meters; 0 marks pixels without a sensor return.
pub struct RgbdImage {
    pub color: Array3<u8>,
    pub depth: Array2<f32>,
}

impl RgbdImage {
    pub fn new(color: Array3<u8>, depth: Array2<f32>) -> Self {
        Self { color, depth }
    }

    pub fn width(&self) -> usize {
        self.color.shape()[1]
    }

    pub fn height(&self) -> usize {
        self.color.shape()[0]
    }
}
