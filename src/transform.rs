use nalgebra::{self, Rotation3};

use nalgebra::{Isometry3, Matrix4, Translation3, UnitQuaternion, Vector3};
use ndarray::Axis;
use ndarray::{self, Array2, ArrayView2};

use std::ops;

/// Rigid transform between coordinate spaces, e.g. camera to world.
#[derive(Clone, Debug)]
pub struct Transform(Isometry3<f32>);

impl Transform {
    pub fn from_matrix4(matrix: &Matrix4<f32>) -> Self {
        let translation = Translation3::new(matrix[(0, 3)], matrix[(1, 3)], matrix[(2, 3)]);
        let so3 = UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix(
            &matrix.fixed_slice::<3, 3>(0, 0).into_owned(),
        ));
        Self(Isometry3::<f32>::from_parts(translation, so3))
    }

    pub fn inverse(&self) -> Self {
        Self(self.0.inverse())
    }
}

impl ops::Mul<&ndarray::Array2<f32>> for &Transform {
    type Output = ndarray::Array2<f32>;

    fn mul(self, rhs: &ndarray::Array2<f32>) -> Self::Output {
        let mut result = ndarray::Array2::<f32>::zeros((rhs.len_of(Axis(0)), 3));

        for (in_iter, mut out_iter) in rhs.axis_iter(Axis(0)).zip(result.axis_iter_mut(Axis(0))) {
            let v = self.0 * Vector3::new(in_iter[0], in_iter[1], in_iter[2]);
            out_iter[0] = v[0];
            out_iter[1] = v[1];
            out_iter[2] = v[2];
        }

        result
    }
}

/// Map voxel indices to world coordinates, `world = origin + index * voxel_size`.
///
/// # Arguments
///
/// * `origin`: World position of voxel (0, 0, 0).
/// * `voxel_coords`: Voxel indices, one per row. Shape is (Nx3).
/// * `voxel_size`: Edge length of a voxel.
///
/// # Returns
///
/// * World points, same shape as `voxel_coords`.
pub fn voxel_to_world(
    origin: &Vector3<f32>,
    voxel_coords: &ArrayView2<f32>,
    voxel_size: f32,
) -> Array2<f32> {
    let mut world_points = Array2::<f32>::zeros((voxel_coords.len_of(Axis(0)), 3));

    for (voxel, mut point) in voxel_coords
        .axis_iter(Axis(0))
        .zip(world_points.axis_iter_mut(Axis(0)))
    {
        for c in 0..3 {
            point[c] = origin[c] + voxel[c] * voxel_size;
        }
    }

    world_points
}
