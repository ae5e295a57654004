use crate::errors::*;
use crate::math::prelude::*;
use crate::Entity;

use super::graph::SceneGraph;
use super::Space;

impl SceneGraph {
    /// Moves the node along its own axes, e.g. `[0.0, 0.0, 1.0]` steps forward by
    /// one unit whatever way it is facing.
    pub fn advance<T>(&mut self, ent: Entity, offset: T) -> Result<()>
    where
        T: Into<Vector3<f32>>,
    {
        let index = self.index(ent)?;
        let offset: Vector3<f32> = offset.into();
        let local = self.local_transforms[index];
        let position = local.position + local.transform_direction(offset);
        self.set_position(ent, position, Space::Local)
    }

    /// Moves the node in the direction and distance of translation, expressed in `space`.
    pub fn translate<T>(&mut self, ent: Entity, translation: T, space: Space) -> Result<()>
    where
        T: Into<Vector3<f32>>,
    {
        let position = self
            .position(ent, space)
            .ok_or(Error::NonNodeFound(ent))?;

        let translation: Vector3<f32> = translation.into();
        self.set_position(ent, position + translation, space)
    }

    /// Turns the node by pitch, yaw and roll angles on top of its current rotation.
    ///
    /// In world space the turn is applied after the world rotation, about the axes
    /// of the forest. In local space it is applied before the local rotation,
    /// about the node's own axes.
    pub fn turn<T1, T2, T3>(
        &mut self,
        ent: Entity,
        pitch: T1,
        yaw: T2,
        roll: T3,
        space: Space,
    ) -> Result<()>
    where
        T1: Into<Deg<f32>>,
        T2: Into<Deg<f32>>,
        T3: Into<Deg<f32>>,
    {
        let turn = euler(pitch, yaw, roll);
        let rotation = self
            .rotation(ent, space)
            .ok_or(Error::NonNodeFound(ent))?;

        let rotation = match space {
            Space::World => turn * rotation,
            Space::Local => rotation * turn,
        };

        self.set_rotation(ent, rotation, space)
    }

    /// Replaces the rotation with one built from pitch, yaw and roll angles.
    pub fn set_euler<T1, T2, T3>(
        &mut self,
        ent: Entity,
        pitch: T1,
        yaw: T2,
        roll: T3,
        space: Space,
    ) -> Result<()>
    where
        T1: Into<Deg<f32>>,
        T2: Into<Deg<f32>>,
        T3: Into<Deg<f32>>,
    {
        self.set_rotation(ent, euler(pitch, yaw, roll), space)
    }

    /// Rotates the node so its forward axis points at `target`.
    ///
    /// Yaw comes from the horizontal components of the direction and pitch from
    /// its vertical component. There is no up vector to correct against, the roll
    /// about the forward axis is taken as given.
    pub fn point_at<T>(&mut self, ent: Entity, target: Entity, roll: T) -> Result<()>
    where
        T: Into<Deg<f32>>,
    {
        let eye = self
            .position(ent, Space::World)
            .ok_or(Error::NonNodeFound(ent))?;

        let center = self
            .position(target, Space::World)
            .ok_or(Error::NonNodeFound(target))?;

        let roll: Deg<f32> = roll.into();
        let dir = center - eye;
        let yaw = Rad(dir.x.atan2(dir.z));
        let pitch = Rad(-dir.y.atan2((dir.x * dir.x + dir.z * dir.z).sqrt()));

        let rotation = Quaternion::from_angle_y(yaw)
            * Quaternion::from_angle_x(pitch)
            * Quaternion::from_angle_z(roll);

        self.set_rotation(ent, rotation, Space::World)
    }

    /// Rotates the node so that its local `axis` lines up with a world space
    /// `direction`.
    ///
    /// `rate` is clamped to `[0, 1]` and picks how far to go: `0` leaves the node
    /// as is, `1` aligns it fully, anything in between interpolates spherically.
    /// A zero `direction` leaves the node untouched.
    pub fn align<T>(&mut self, ent: Entity, direction: T, axis: Axis, rate: f32) -> Result<()>
    where
        T: Into<Vector3<f32>>,
    {
        let rotation = self
            .rotation(ent, Space::World)
            .ok_or(Error::NonNodeFound(ent))?;

        let direction: Vector3<f32> = direction.into();
        if direction.magnitude2() <= ::std::f32::EPSILON {
            return Ok(());
        }

        let current = rotation * axis.unit();
        let arc = Quaternion::from_arc(current, direction.normalize(), None);
        let rate = rate.max(0.0).min(1.0);
        let delta = Quaternion::one().slerp(arc, rate);

        self.set_rotation(ent, delta * rotation, Space::World)
    }
}
