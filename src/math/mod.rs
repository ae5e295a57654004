//! This module contains the math utils that mainly comes from `cgmath`.
//!
//! Everything in this crate uses column vectors: a matrix transforms a point
//! as `m * p`, so the rightmost factor of a product is applied first.

pub use cgmath::*;

pub mod euler;
pub use self::euler::{euler, Axis};

pub mod prelude {
    pub use cgmath::prelude::{
        Angle, Array, ElementWise, EuclideanSpace, InnerSpace, Matrix, MetricSpace, Rotation,
        Rotation3, SquareMatrix, VectorSpace,
    };
    pub use cgmath::Transform as _;
    pub use cgmath::{Deg, Matrix3, Matrix4, One, Point3, Quaternion, Rad, Vector3, Vector4, Zero};

    pub use super::euler::{euler, Axis};
}
