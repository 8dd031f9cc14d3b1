use itertools::iproduct;
use nalgebra::Vector3;
use ndarray::{Array2, Array3};

use crate::bounds::Box3Df;
use crate::error::FusionError;

/// Dense truncated signed distance volume over a regular voxel grid.
///
/// Distance values are normalized by the truncation margin, so they live in
/// [-1, 1]; 1 marks unobserved voxels. Weights accumulate per observation and
/// never decrease. Colors hold the running RGB average of the observations.
pub struct TsdfVolume {
    origin: Vector3<f32>,
    voxel_size: f32,
    truncation_margin: f32,
    dimensions: [usize; 3],
    pub(super) distance: Array3<f32>,
    pub(super) weight: Array3<f32>,
    pub(super) color: Array3<Vector3<f32>>,
    pub(super) voxel_coordinates: Array2<f32>,
}

impl TsdfVolume {
    /// Allocate a volume covering `bounds` with cubic voxels of edge
    /// `voxel_size`.
    ///
    /// The grid extent is the requested extent rounded up to whole voxels, so
    /// the covered bounds never shrink: `max = min + dimensions * voxel_size`.
    ///
    /// # Arguments
    ///
    /// * `bounds`: Requested world-space bounds.
    /// * `voxel_size`: Voxel edge length, strictly positive.
    pub fn new(bounds: &Box3Df, voxel_size: f32) -> Result<Self, FusionError> {
        if !(voxel_size > 0.0) {
            return Err(FusionError::invalid_configuration(format!(
                "voxel size must be positive, got {}",
                voxel_size
            )));
        }

        for i in 0..3 {
            if !(bounds.max[i] >= bounds.min[i]) {
                return Err(FusionError::invalid_configuration(format!(
                    "invalid bounds on axis {}: [{}, {}]",
                    i, bounds.min[i], bounds.max[i]
                )));
            }
        }

        let extent = bounds.extent();
        let dimensions = [
            (extent[0] / voxel_size).ceil() as usize,
            (extent[1] / voxel_size).ceil() as usize,
            (extent[2] / voxel_size).ceil() as usize,
        ];
        let shape = (dimensions[0], dimensions[1], dimensions[2]);
        let num_voxels = dimensions[0] * dimensions[1] * dimensions[2];

        // Static ij-ordered enumeration; row i corresponds to linear
        // (row-major) index i of the fields.
        let mut voxel_coordinates = Array2::<f32>::zeros((num_voxels, 3));
        for (row, (x, y, z)) in
            iproduct!(0..dimensions[0], 0..dimensions[1], 0..dimensions[2]).enumerate()
        {
            voxel_coordinates[[row, 0]] = x as f32;
            voxel_coordinates[[row, 1]] = y as f32;
            voxel_coordinates[[row, 2]] = z as f32;
        }

        Ok(Self {
            origin: bounds.min,
            voxel_size,
            truncation_margin: 2.0 * voxel_size,
            dimensions,
            distance: Array3::ones(shape),
            weight: Array3::zeros(shape),
            color: Array3::from_elem(shape, Vector3::zeros()),
            voxel_coordinates,
        })
    }

    pub fn origin(&self) -> Vector3<f32> {
        self.origin
    }

    pub fn voxel_size(&self) -> f32 {
        self.voxel_size
    }

    pub fn truncation_margin(&self) -> f32 {
        self.truncation_margin
    }

    pub fn dimensions(&self) -> [usize; 3] {
        self.dimensions
    }

    pub fn num_voxels(&self) -> usize {
        self.dimensions.iter().product()
    }

    /// World bounds after snapping the maximum to whole voxels.
    pub fn bounds(&self) -> Box3Df {
        Box3Df::from_extents(
            self.origin,
            Vector3::new(
                self.dimensions[0] as f32 * self.voxel_size,
                self.dimensions[1] as f32 * self.voxel_size,
                self.dimensions[2] as f32 * self.voxel_size,
            ),
        )
    }

    pub fn distance_field(&self) -> &Array3<f32> {
        &self.distance
    }

    pub fn weight_field(&self) -> &Array3<f32> {
        &self.weight
    }

    pub fn color_field(&self) -> &Array3<Vector3<f32>> {
        &self.color
    }

    /// The distance and color volumes, as read by mesh extraction.
    pub fn distance_and_color(&self) -> (&Array3<f32>, &Array3<Vector3<f32>>) {
        (&self.distance, &self.color)
    }
}
