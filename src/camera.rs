use nalgebra::{Matrix3, Vector3};

/// Camera intrinsic parameters.
#[derive(Clone, Debug)]
pub struct CameraIntrinsics {
    /// Focal length and pixel scale in the X-axis.
    pub fx: f64,
    /// Focal length and pixel scale in the Y-axis.
    pub fy: f64,
    /// Camera X-center.
    pub cx: f64,
    /// Camera Y-center.
    pub cy: f64,
}

impl CameraIntrinsics {
    pub fn from_simple_intrinsic(fx: f64, fy: f64, cx: f64, cy: f64) -> Self {
        Self { fx, fy, cx, cy }
    }

    /// Build from a 3x3 pinhole matrix `[[fx, 0, cx], [0, fy, cy], [0, 0, 1]]`.
    pub fn from_matrix3(matrix: &Matrix3<f64>) -> Self {
        Self {
            fx: matrix[(0, 0)],
            fy: matrix[(1, 1)],
            cx: matrix[(0, 2)],
            cy: matrix[(1, 2)],
        }
    }

    /// Project a 3D point into image space.
    ///
    /// # Arguments
    ///
    /// * point: The 3D point.
    ///
    /// # Returns
    ///
    /// * (x and y) coordinates.
    pub fn project(&self, point: &Vector3<f32>) -> (f32, f32) {
        (
            point[0] * self.fx as f32 / point[2] + self.cx as f32,
            point[1] * self.fy as f32 / point[2] + self.cy as f32,
        )
    }

    /// Project a 3D point onto integer pixel coordinates by rounding.
    ///
    /// The result may lie outside the image or behind the camera; visibility
    /// is decided downstream.
    pub fn project_pixel(&self, point: &Vector3<f32>) -> (i64, i64) {
        let (u, v) = self.project(point);
        (u.round() as i64, v.round() as i64)
    }

}

#[cfg(test)]
mod tests {
    use super::CameraIntrinsics;
    use nalgebra::{Matrix3, Vector3};

    #[test]
    fn test_project_pixel() {
        let intrinsics = CameraIntrinsics::from_simple_intrinsic(525.0, 525.0, 320.0, 240.0);

        let (u, v) = intrinsics.project_pixel(&Vector3::new(0.0, 0.0, 1.0));
        assert_eq!((u, v), (320, 240));

        // Behind-camera and off-image points still project, unchecked.
        let (u, _) = intrinsics.project_pixel(&Vector3::new(-2.0, 0.0, 1.0));
        assert!(u < 0);
    }

    #[test]
    fn test_from_matrix3() {
        let matrix = Matrix3::new(525.0, 0.0, 320.0, 0.0, 520.0, 240.0, 0.0, 0.0, 1.0);
        let intrinsics = CameraIntrinsics::from_matrix3(&matrix);
        assert_eq!(intrinsics.fx, 525.0);
        assert_eq!(intrinsics.fy, 520.0);
        assert_eq!(intrinsics.cx, 320.0);
        assert_eq!(intrinsics.cy, 240.0);
    }

    #[test]
    fn test_rounding_to_nearest_pixel() {
        let intrinsics = CameraIntrinsics::from_simple_intrinsic(6.0, 6.0, 4.0, 4.0);

        // 5.5 and 2.5 both round away from zero.
        let (u, v) = intrinsics.project_pixel(&Vector3::new(0.5, -0.5, 2.0));
        assert_eq!((u, v), (6, 3));
    }
}
