use approx::assert_relative_eq;
use nalgebra::{Matrix4, Vector3};
use ndarray::{Array2, Array3};

use fuse3d::bounds::Box3Df;
use fuse3d::camera::CameraIntrinsics;
use fuse3d::error::FusionError;
use fuse3d::transform::Transform;
use fuse3d::volume::MarchingCubes;
use fuse3d::{RgbdImage, TsdfVolume};

fn unit_volume() -> TsdfVolume {
    TsdfVolume::new(
        &Box3Df::new(Vector3::zeros(), Vector3::new(1.0, 1.0, 1.0)),
        0.5,
    )
    .unwrap()
}

/// Camera two units along +Z looking back at the origin.
fn frontal_pose() -> Transform {
    Transform::from_matrix4(&Matrix4::new(
        1.0, 0.0, 0.0, 0.0, //
        0.0, -1.0, 0.0, 0.0, //
        0.0, 0.0, -1.0, 2.0, //
        0.0, 0.0, 0.0, 1.0,
    ))
}

fn constant_frame(size: usize, depth: f32, gray: u8) -> RgbdImage {
    RgbdImage::new(
        Array3::from_elem((size, size, 3), gray),
        Array2::from_elem((size, size), depth),
    )
}

#[test]
fn single_frame_reduces_to_direct_assignment() {
    let mut volume = unit_volume();
    let intrinsics = CameraIntrinsics::from_simple_intrinsic(1.0, 1.0, 1.0, 1.0);

    volume
        .integrate(&constant_frame(3, 2.0, 128), &intrinsics, &frontal_pose(), 1.0)
        .unwrap();

    // All 8 voxels see the 2.0 m wall; a voxel at world z has camera depth
    // 2 - z, so its margin distance is z / truncation_margin = z.
    for ((_, _, z), distance) in volume.distance_field().indexed_iter() {
        assert_relative_eq!(*distance, z as f32 * 0.5, epsilon = 1e-5);
    }
    for weight in volume.weight_field().iter() {
        assert_eq!(*weight, 1.0);
    }
    for color in volume.color_field().iter() {
        assert_eq!(*color, Vector3::new(128.0, 128.0, 128.0));
    }
}

/// Wide intrinsics spread the voxel columns over the image, so masking depth
/// columns splits the grid into disjoint halves along X.
fn half_frames() -> (RgbdImage, RgbdImage, CameraIntrinsics) {
    let intrinsics = CameraIntrinsics::from_simple_intrinsic(6.0, 6.0, 4.0, 4.0);

    let mut left = constant_frame(9, 2.0, 50);
    let mut right = constant_frame(9, 2.0, 200);
    for v in 0..9 {
        for u in 5..9 {
            left.depth[[v, u]] = 0.0;
        }
        for u in 0..5 {
            right.depth[[v, u]] = 0.0;
        }
    }

    (left, right, intrinsics)
}

#[test]
fn disjoint_frames_commute() {
    let pose = frontal_pose();
    let (left, right, intrinsics) = half_frames();

    let mut ab = unit_volume();
    ab.integrate(&left, &intrinsics, &pose, 1.0).unwrap();
    ab.integrate(&right, &intrinsics, &pose, 1.0).unwrap();

    let mut ba = unit_volume();
    ba.integrate(&right, &intrinsics, &pose, 1.0).unwrap();
    ba.integrate(&left, &intrinsics, &pose, 1.0).unwrap();

    assert_eq!(ab.distance_field(), ba.distance_field());
    assert_eq!(ab.weight_field(), ba.weight_field());
    assert_eq!(ab.color_field(), ba.color_field());

    // Both halves were actually touched, once each.
    assert!(ab.weight_field().iter().all(|w| *w == 1.0));
}

#[test]
fn overlapping_frames_average_by_weight() {
    let pose = frontal_pose();
    let intrinsics = CameraIntrinsics::from_simple_intrinsic(1.0, 1.0, 1.0, 1.0);
    let near = constant_frame(3, 2.0, 100);
    let far = constant_frame(3, 2.5, 200);

    let mut volume = unit_volume();
    volume.integrate(&near, &intrinsics, &pose, 1.0).unwrap();
    volume.integrate(&far, &intrinsics, &pose, 3.0).unwrap();

    let mut reversed = unit_volume();
    reversed.integrate(&far, &intrinsics, &pose, 3.0).unwrap();
    reversed.integrate(&near, &intrinsics, &pose, 1.0).unwrap();

    for ((_, _, z), distance) in volume.distance_field().indexed_iter() {
        let z = z as f32 * 0.5;
        let margin_near = z;
        let margin_far = (0.5 + z).clamp(-1.0, 1.0);
        let expected = (margin_near + 3.0 * margin_far) / 4.0;
        assert_relative_eq!(*distance, expected, epsilon = 1e-5);
    }

    for (a, b) in volume
        .distance_field()
        .iter()
        .zip(reversed.distance_field().iter())
    {
        assert_relative_eq!(*a, *b, epsilon = 1e-5);
    }

    for weight in volume.weight_field().iter() {
        assert_eq!(*weight, 4.0);
    }
    for color in volume.color_field().iter() {
        // round((1*100 + 3*200) / 4)
        assert_eq!(*color, Vector3::new(175.0, 175.0, 175.0));
    }
}

#[test]
fn extract_mesh_after_integration() {
    let mut volume = unit_volume();
    let intrinsics = CameraIntrinsics::from_simple_intrinsic(1.0, 1.0, 1.0, 1.0);

    // A wall at 1.9 m puts the z = 0 voxel layer behind the surface and the
    // z = 0.5 layer in front, so the distance field crosses zero.
    volume
        .integrate(&constant_frame(3, 1.9, 90), &intrinsics, &frontal_pose(), 1.0)
        .unwrap();

    let geometry = volume.extract_mesh(&MarchingCubes).unwrap();

    assert!(geometry.len_vertices() > 0);
    assert!(geometry.len_faces() > 0);

    let bounds = volume.bounds();
    for point in geometry.points.outer_iter() {
        for c in 0..3 {
            assert!(point[c] >= bounds.min[c] - 1e-5);
            assert!(point[c] <= bounds.max[c] + 1e-5);
        }
    }

    let colors = geometry.colors.unwrap();
    assert_eq!(colors.nrows(), geometry.points.nrows());
    assert!(colors.iter().all(|c| *c == 90));

    let normals = geometry.normals.unwrap();
    assert_eq!(normals.dim(), geometry.points.dim());

    let faces = geometry.faces.unwrap();
    assert!(faces.iter().all(|i| *i < geometry.points.nrows()));
}

#[test]
fn extract_mesh_on_pristine_volume_fails() {
    let volume = unit_volume();
    let result = volume.extract_mesh(&MarchingCubes);
    assert!(matches!(result, Err(FusionError::ExtractionFailed(_))));
}

#[test]
fn integration_does_not_grow_the_grid() {
    let mut volume = unit_volume();
    let intrinsics = CameraIntrinsics::from_simple_intrinsic(1.0, 1.0, 1.0, 1.0);
    let pose = frontal_pose();

    for _ in 0..16 {
        volume
            .integrate(&constant_frame(3, 2.0, 128), &intrinsics, &pose, 1.0)
            .unwrap();
    }

    assert_eq!(volume.dimensions(), [2, 2, 2]);
    assert!(volume.weight_field().iter().all(|w| *w == 16.0));
}
