use serde::{Deserialize, Serialize};

use crate::math::prelude::*;

/// `Transform` is used to store and manipulate the position, rotation and scale
/// of the object. We use a right handed, y-up coordinate system, and the
/// forward direction of an object is its positive z-axis.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub scale: Vector3<f32>,
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Transform {
            scale: Vector3::new(1.0, 1.0, 1.0),
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Quaternion::one(),
        }
    }
}

impl Transform {
    /// Decomposes a matrix into translation, rotation and scale.
    ///
    /// The scale is the length of each basis column, so any shear in `m` is
    /// lost and a mirrored basis comes back as a rotation with positive scale.
    /// Only a column of zero length falls back to the unit axis.
    pub fn from_matrix(m: Matrix4<f32>) -> Self {
        let position = m.w.truncate();
        let (x, y, z) = (m.x.truncate(), m.y.truncate(), m.z.truncate());
        let scale = Vector3::new(x.magnitude(), y.magnitude(), z.magnitude());

        let axis = |v: Vector3<f32>, len: f32, fallback: Vector3<f32>| {
            if len > 0.0 {
                v / len
            } else {
                fallback
            }
        };

        let basis = Matrix3::from_cols(
            axis(x, scale.x, Vector3::unit_x()),
            axis(y, scale.y, Vector3::unit_y()),
            axis(z, scale.z, Vector3::unit_z()),
        );

        Transform {
            scale,
            position,
            rotation: normalize_rotation(Quaternion::from(basis)),
        }
    }

    /// Returns the matrix representation, `M = T * R * S`.
    #[inline]
    pub fn matrix(&self) -> Matrix4<f32> {
        let m: Matrix3<_> = self.rotation.into();
        let mut m = Matrix4::from(m) * Matrix4::from_nonuniform_scale(
            self.scale.x,
            self.scale.y,
            self.scale.z,
        );
        m.w = self.position.extend(1.0);
        m
    }

    /// Transforms direction from local space to transform's space.
    ///
    /// This operation is not affected by scale or position of the transform. The returned
    /// vector has the same length as direction.
    #[inline]
    pub fn transform_direction<T>(&self, v: T) -> Vector3<f32>
    where
        T: Into<Vector3<f32>>,
    {
        let v: Vector3<f32> = v.into();
        self.rotation * v
    }
}

/// Normalizes a rotation of any non-zero length. A zero or non-finite quaternion
/// falls back to identity.
#[inline]
pub(crate) fn normalize_rotation(rotation: Quaternion<f32>) -> Quaternion<f32> {
    let len2 = rotation.magnitude2();
    if len2 > 0.0 && len2.is_finite() {
        rotation.normalize()
    } else {
        Quaternion::one()
    }
}
