use nalgebra::Vector3;
use ndarray::{Array2, Axis};
use rayon::prelude::*;

use crate::camera::CameraIntrinsics;
use crate::error::FusionError;
use crate::image::RgbdImage;
use crate::transform::{voxel_to_world, Transform};

use super::TsdfVolume;

/// Whether a projected voxel takes part in this frame's fusion.
///
/// The depth image is only sampled after the bounds and the behind-camera
/// tests pass, so out-of-image projections never touch it.
pub(super) fn valid_voxel(depth: &Array2<f32>, u: i64, v: i64, z: f32) -> bool {
    let (height, width) = depth.dim();
    if u < 0 || u >= width as i64 || v < 0 || v >= height as i64 || z <= 0.0 {
        return false;
    }

    depth[[v as usize, u as usize]] > 0.0
}

/// Cumulative moving average update for one voxel's distance and weight.
pub(super) fn fuse_distance(
    distance_old: f32,
    margin_distance: f32,
    weight_old: f32,
    observation_weight: f32,
) -> (f32, f32) {
    let weight_new = weight_old + observation_weight;
    let distance_new =
        (weight_old * distance_old + observation_weight * margin_distance) / weight_new;
    (distance_new, weight_new)
}

/// Weighted color average sharing the already-updated weight. The old weight
/// scales the accumulated color, the new one normalizes.
pub(super) fn fuse_color(
    color_old: &Vector3<f32>,
    color_observed: &Vector3<f32>,
    weight_old: f32,
    weight_new: f32,
    observation_weight: f32,
) -> Vector3<f32> {
    Vector3::from_fn(|c, _| {
        ((weight_old * color_old[c] + observation_weight * color_observed[c]) / weight_new)
            .round()
            .clamp(0.0, 255.0)
    })
}

fn unravel(index: usize, dimensions: &[usize; 3]) -> (usize, usize, usize) {
    let (ny, nz) = (dimensions[1], dimensions[2]);
    (index / (ny * nz), (index / nz) % ny, index % nz)
}

struct VoxelUpdate {
    coord: (usize, usize, usize),
    distance: f32,
    weight: f32,
    color: Vector3<f32>,
}

impl TsdfVolume {
    /// Fuse one RGB-D observation into the volume.
    ///
    /// Every voxel is projected into the frame; the ones that land inside the
    /// image, in front of the camera and on a pixel with a valid depth return
    /// are merged into the distance, weight and color fields by weighted
    /// running average. Everything else is skipped, never raised, so a noisy
    /// frame cannot abort an ongoing reconstruction.
    ///
    /// # Arguments
    ///
    /// * `image`: Color and metric depth frame.
    /// * `intrinsics`: 3x3 pinhole parameters of the frame.
    /// * `camera_to_world`: Pose of the camera that captured the frame.
    /// * `observation_weight`: Contribution of this frame to the averages,
    ///   strictly positive, usually 1.0.
    pub fn integrate(
        &mut self,
        image: &RgbdImage,
        intrinsics: &CameraIntrinsics,
        camera_to_world: &Transform,
        observation_weight: f32,
    ) -> Result<(), FusionError> {
        let (height, width) = (image.height(), image.width());
        if image.depth.dim() != (height, width) {
            return Err(FusionError::invalid_input(format!(
                "depth shape {:?} does not match color shape {:?}",
                image.depth.shape(),
                image.color.shape()
            )));
        }
        if image.color.shape()[2] != 3 {
            return Err(FusionError::invalid_input(
                "color image must have 3 channels",
            ));
        }
        if !(observation_weight > 0.0) {
            return Err(FusionError::invalid_input(format!(
                "observation weight must be positive, got {}",
                observation_weight
            )));
        }

        let world_points =
            voxel_to_world(&self.origin(), &self.voxel_coordinates.view(), self.voxel_size());
        let camera_points = &camera_to_world.inverse() * &world_points;

        let truncation_margin = self.truncation_margin();
        let dimensions = self.dimensions();

        // Project -> filter -> fuse, data-parallel per voxel. The scatter
        // write stays serial; each voxel appears at most once per call.
        let updates: Vec<VoxelUpdate> = camera_points
            .axis_iter(Axis(0))
            .into_par_iter()
            .enumerate()
            .filter_map(|(index, point)| {
                let z = point[2];
                let (u, v) =
                    intrinsics.project_pixel(&Vector3::new(point[0], point[1], z));
                if !valid_voxel(&image.depth, u, v, z) {
                    return None;
                }
                let (v, u) = (v as usize, u as usize);

                let margin_distance =
                    ((image.depth[[v, u]] - z) / truncation_margin).clamp(-1.0, 1.0);
                let observed_color = Vector3::new(
                    image.color[[v, u, 0]] as f32,
                    image.color[[v, u, 1]] as f32,
                    image.color[[v, u, 2]] as f32,
                );

                let coord = unravel(index, &dimensions);
                let weight_old = self.weight[coord];
                let (distance, weight) = fuse_distance(
                    self.distance[coord],
                    margin_distance,
                    weight_old,
                    observation_weight,
                );
                let color = fuse_color(
                    &self.color[coord],
                    &observed_color,
                    weight_old,
                    weight,
                    observation_weight,
                );

                Some(VoxelUpdate {
                    coord,
                    distance,
                    weight,
                    color,
                })
            })
            .collect();

        for update in updates {
            self.distance[update.coord] = update.distance;
            self.weight[update.coord] = update.weight;
            self.color[update.coord] = update.color;
        }

        Ok(())
    }
}
