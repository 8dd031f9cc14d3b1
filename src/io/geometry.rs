use ndarray::prelude::*;

use super::LoadError;

/// Generic representation of attributes found in 3D model/object/geometry files.
pub struct Geometry {
    /// The 3D points. Shape is (Nx3).
    pub points: Array2<f32>,
    /// The RGB colors. Shape is (Nx3).
    pub colors: Option<Array2<u8>>,
    /// Per vertices normals. Shape is (Nx3)
    pub normals: Option<Array2<f32>>,
    /// The indices to connect vertices that make faces in the geometry.
    /// Shape is (Kx3), we always convert to triangles.
    pub faces: Option<Array2<usize>>,
}

impl Geometry {
    /// Assemble a geometry, checking that every per-vertex attribute has one
    /// row per point and that faces are triangles.
    pub fn new(
        points: Array2<f32>,
        normals: Option<Array2<f32>>,
        colors: Option<Array2<u8>>,
        faces: Option<Array2<usize>>,
    ) -> Result<Self, LoadError> {
        if points.ncols() != 3 {
            return Err(LoadError::ParseError(format!(
                "points should have shape (N, 3), got (N, {})",
                points.ncols()
            )));
        }

        if let Some(normals) = &normals {
            if normals.dim() != points.dim() {
                return Err(LoadError::ParseError(
                    "normals and points differ in shape".to_string(),
                ));
            }
        }

        if let Some(colors) = &colors {
            if colors.dim() != points.dim() {
                return Err(LoadError::ParseError(
                    "colors and points differ in shape".to_string(),
                ));
            }
        }

        if let Some(faces) = &faces {
            if faces.ncols() != 3 {
                return Err(LoadError::ParseError(
                    "faces should be triangles of shape (K, 3)".to_string(),
                ));
            }
        }

        Ok(Self {
            points,
            colors,
            normals,
            faces,
        })
    }

    pub fn len_vertices(&self) -> usize {
        self.points.nrows()
    }

    pub fn len_faces(&self) -> usize {
        self.faces.as_ref().map(|faces| faces.nrows()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::Geometry;
    use ndarray::{array, Array2};

    #[test]
    fn test_len_accessors() {
        let geometry = Geometry::new(
            array![[0.0_f32, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            None,
            None,
            Some(array![[0_usize, 1, 2]]),
        )
        .unwrap();

        assert_eq!(geometry.len_vertices(), 3);
        assert_eq!(geometry.len_faces(), 1);
    }

    #[test]
    fn test_rejects_mismatched_attributes() {
        let points = array![[0.0_f32, 0.0, 0.0], [1.0, 0.0, 0.0]];
        assert!(Geometry::new(points.clone(), Some(Array2::zeros((3, 3))), None, None).is_err());
        assert!(Geometry::new(points, None, Some(Array2::zeros((1, 3))), None).is_err());
    }
}
