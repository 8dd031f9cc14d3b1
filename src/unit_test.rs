use nalgebra::{Matrix4, Vector3};
use ndarray::{Array2, Array3};
use rstest::fixture;

use crate::bounds::Box3Df;
use crate::camera::CameraIntrinsics;
use crate::io::Geometry;
use crate::transform::Transform;
use crate::{RgbdImage, TsdfVolume};

/// A frame looking straight down the world -Z axis from z = 2.
pub struct FrontalFrame {
    pub image: RgbdImage,
    pub intrinsics: CameraIntrinsics,
    pub camera_to_world: Transform,
}

/// 2x2x2 volume over the world unit cube with 0.5 voxels.
#[fixture]
pub fn unit_volume() -> TsdfVolume {
    TsdfVolume::new(
        &Box3Df::new(Vector3::zeros(), Vector3::new(1.0, 1.0, 1.0)),
        0.5,
    )
    .unwrap()
}

/// 3x3 frame at a constant 2 m depth whose camera sits 2 units along +Z,
/// looking at the origin. Every voxel of [`unit_volume`] projects to the
/// center pixel.
#[fixture]
pub fn frontal_frame() -> FrontalFrame {
    let mut color = Array3::<u8>::zeros((3, 3, 3));
    color.fill(128);
    let depth = Array2::<f32>::from_elem((3, 3), 2.0);

    // 180 degree flip around X maps camera +Z onto world -Z.
    let camera_to_world = Transform::from_matrix4(&Matrix4::new(
        1.0, 0.0, 0.0, 0.0, //
        0.0, -1.0, 0.0, 0.0, //
        0.0, 0.0, -1.0, 2.0, //
        0.0, 0.0, 0.0, 1.0,
    ));

    FrontalFrame {
        image: RgbdImage::new(color, depth),
        intrinsics: CameraIntrinsics::from_simple_intrinsic(1.0, 1.0, 1.0, 1.0),
        camera_to_world,
    }
}

/// Small all-attribute geometry for codec tests.
#[fixture]
pub fn sample_triangle_geometry() -> Geometry {
    let points = ndarray::array![
        [0.0_f32, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.5, 0.5, 1.0]
    ];
    let normals = ndarray::array![
        [0.0_f32, 0.0, 1.0],
        [0.0, 0.0, 1.0],
        [0.0, 0.0, 1.0],
        [0.0, 0.0, 1.0]
    ];
    let colors = ndarray::array![
        [255_u8, 0, 0],
        [0, 255, 0],
        [0, 0, 255],
        [128, 128, 128]
    ];
    let faces = ndarray::array![[0_usize, 1, 2], [0, 1, 3], [1, 2, 3]];

    Geometry::new(points, Some(normals), Some(colors), Some(faces)).unwrap()
}
