use cgmath::{Matrix, Matrix3, Matrix4, SquareMatrix};

/// Column-major array, the layout WGSL `mat4x4<f32>` expects
pub fn convert_matrix4_to_array(matrix4: Matrix4<f32>) -> [[f32; 4]; 4] {
    matrix4.into()
}

/// Inverse-transpose of the upper 3x3 of `m`, embedded in a 4x4.
///
/// Used to carry normals through non-uniform scales. A singular input
/// (a zero scale) falls back to identity.
pub fn normal_matrix(m: &Matrix4<f32>) -> Matrix4<f32> {
    let upper = Matrix3::from_cols(m.x.truncate(), m.y.truncate(), m.z.truncate());

    match upper.invert() {
        Some(inverse) => Matrix4::from(inverse.transpose()),
        None => {
            log::warn!("normal matrix requested for a singular transform, using identity");
            Matrix4::identity()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{vec3, InnerSpace, Vector4};

    #[test]
    fn test_normal_matrix_of_identity() {
        assert_eq!(normal_matrix(&Matrix4::identity()), Matrix4::identity());
    }

    #[test]
    fn test_normal_matrix_ignores_translation() {
        let m = Matrix4::from_translation(vec3(4.0, -2.0, 1.0));
        assert_eq!(normal_matrix(&m), Matrix4::identity());
    }

    #[test]
    fn test_normal_matrix_keeps_normals_perpendicular() {
        // Squash a 45 degree slope; the transformed normal must stay
        // perpendicular to the transformed surface tangent.
        let m = Matrix4::from_nonuniform_scale(5.0, 0.5, 5.0);
        let tangent = (m * Vector4::new(1.0, 1.0, 0.0, 0.0)).truncate();
        let normal = (normal_matrix(&m) * Vector4::new(-1.0, 1.0, 0.0, 0.0)).truncate();
        assert!(tangent.dot(normal).abs() < 1e-5);
    }

    #[test]
    fn test_singular_matrix_falls_back_to_identity() {
        let m = Matrix4::from_nonuniform_scale(1.0, 0.0, 1.0);
        assert_eq!(normal_matrix(&m), Matrix4::identity());
    }

    #[test]
    fn test_convert_matrix_is_column_major() {
        let m = Matrix4::from_translation(vec3(1.0, 2.0, 3.0));
        let a = convert_matrix4_to_array(m);
        assert_eq!(a[3], [1.0, 2.0, 3.0, 1.0]);
    }
}
