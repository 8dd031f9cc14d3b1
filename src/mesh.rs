use nalgebra::Vector3;
use ndarray::{Array2, ArrayView2, Axis};

/// Per-vertex normals averaged from the normals of the incident faces.
///
/// # Arguments
///
/// * `points`: Vertex positions. Shape is (Nx3).
/// * `faces`: Triangle vertex indices. Shape is (Kx3).
///
/// # Returns
///
/// * Vertex normals. Shape is (Nx3).
pub fn compute_normals(points: &ArrayView2<f32>, faces: &ArrayView2<usize>) -> Array2<f32> {
    let point = |i: usize| Vector3::new(points[[i, 0]], points[[i, 1]], points[[i, 2]]);

    let face_normals = faces
        .axis_iter(Axis(0))
        .map(|face| {
            let p0 = point(face[0]);
            let p1 = point(face[1]);
            let p2 = point(face[2]);
            let v0 = p1 - p0;
            let v1 = p2 - p0;

            let mut normal = v0.cross(&v1);
            let mag = normal.magnitude();
            if mag > 0.0 {
                normal /= mag;
            }

            normal
        })
        .collect::<Vec<_>>();

    let mut vertex_normals = vec![Vector3::<f32>::zeros(); points.nrows()];
    let mut vertex_face_count = vec![0usize; points.nrows()];
    faces
        .axis_iter(Axis(0))
        .zip(face_normals)
        .for_each(|(face, face_normal)| {
            for f in [face[0], face[1], face[2]] {
                vertex_normals[f] += face_normal;
                vertex_face_count[f] += 1;
            }
        });

    vertex_normals
        .iter_mut()
        .zip(vertex_face_count.iter())
        .for_each(|(normal, face_count)| {
            if *face_count > 0 {
                *normal /= *face_count as f32;
            }
        });

    Array2::from_shape_fn((points.nrows(), 3), |(i, c)| vertex_normals[i][c])
}

#[cfg(test)]
mod tests {
    use super::compute_normals;
    use ndarray::array;

    #[test]
    fn test_compute_normals() {
        // Two triangles in the z = 0 plane; all normals point along +-z.
        let points = array![
            [0.0_f32, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [1.0, 1.0, 0.0]
        ];
        let faces = array![[0_usize, 1, 2], [1, 3, 2]];

        let normals = compute_normals(&points.view(), &faces.view());
        assert_eq!(normals.shape(), &[4, 3]);
        for row in normals.outer_iter() {
            assert!((row[2].abs() - 1.0).abs() < 1e-6);
            assert!(row[0].abs() < 1e-6 && row[1].abs() < 1e-6);
        }
    }

    #[test]
    fn test_unreferenced_vertex_keeps_zero_normal() {
        let points = array![
            [0.0_f32, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [5.0, 5.0, 5.0]
        ];
        let faces = array![[0_usize, 1, 2]];

        let normals = compute_normals(&points.view(), &faces.view());
        assert_eq!(normals.row(3).to_vec(), vec![0.0, 0.0, 0.0]);
    }
}
