use nalgebra::ClosedAdd;
use nalgebra::Scalar;
use nalgebra::Vector3;
use num::Zero;

/// Axis-aligned box in world coordinates.
#[derive(Clone, Debug)]
pub struct Box3D<T>
where
    T: Scalar + Zero + ClosedAdd,
{
    pub min: Vector3<T>,
    pub max: Vector3<T>,
}

impl<T> Box3D<T>
where
    T: Scalar + Zero + ClosedAdd,
{
    pub fn new(min: Vector3<T>, max: Vector3<T>) -> Self {
        Box3D { min, max }
    }

    ///
    /// # Arguments
    ///
    /// * `start_point`: The minimum point in the X, Y, and Z axis.
    /// * `size`: The size of in the X, Y, and Z axis.
    pub fn from_extents(start_point: Vector3<T>, size: Vector3<T>) -> Self {
        Box3D {
            min: start_point.clone(),
            max: start_point + &size,
        }
    }
}

pub type Box3Df = Box3D<f32>;

impl Box3Df {
    pub fn extent(&self) -> Vector3<f32> {
        self.max - self.min
    }
}
