use cgmath::prelude::*;
use cgmath::{Deg, Quaternion, Vector3};
use serde::{Deserialize, Serialize};

/// Builds a rotation from pitch, yaw and roll angles in degrees.
///
/// The angles are applied about the fixed axes in the order pitch (X), yaw (Y)
/// and then roll (Z), which makes the result `roll * yaw * pitch`.
pub fn euler<T1, T2, T3>(pitch: T1, yaw: T2, roll: T3) -> Quaternion<f32>
where
    T1: Into<Deg<f32>>,
    T2: Into<Deg<f32>>,
    T3: Into<Deg<f32>>,
{
    let (pitch, yaw, roll): (Deg<f32>, Deg<f32>, Deg<f32>) = (pitch.into(), yaw.into(), roll.into());

    let qx = Quaternion::from_angle_x(pitch);
    let qy = Quaternion::from_angle_y(yaw);
    let qz = Quaternion::from_angle_z(roll);
    qz * qy * qx
}

/// One of the three basis axes of a local frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Returns the unit vector along this axis.
    #[inline]
    pub fn unit(self) -> Vector3<f32> {
        match self {
            Axis::X => Vector3::unit_x(),
            Axis::Y => Vector3::unit_y(),
            Axis::Z => Vector3::unit_z(),
        }
    }
}
