use smallvec::SmallVec;

use crate::errors::*;
use crate::math::prelude::*;
use crate::Entity;

use super::dirty::Dirty;
use super::graph::SceneGraph;
use super::transform::{normalize_rotation, Transform};
use super::Space;

impl SceneGraph {
    /// Returns true if the cached matrix of `space` is stale.
    #[inline]
    pub fn is_dirty(&self, ent: Entity, space: Space) -> Option<bool> {
        let flag = match space {
            Space::Local => Dirty::LOCAL,
            Space::World => Dirty::WORLD,
        };

        self.index(ent).ok().map(|v| self.dirty[v].contains(flag))
    }

    /// Returns how many times a node has been newly flagged as world-dirty.
    /// Flagging an already dirty node does not count.
    #[inline]
    pub fn invalidations(&self) -> usize {
        self.invalidations
    }

    pub(crate) fn invalidate_local(&mut self, index: usize) {
        self.dirty[index].insert(Dirty::LOCAL);
        self.invalidate_world(index);
    }

    /// Flags the node and its subtree as world-dirty. Subtrees that are already
    /// dirty are skipped, since every descendant of a dirty node is dirty too.
    pub(crate) fn invalidate_world(&mut self, index: usize) {
        let mut stack: SmallVec<[usize; 16]> = SmallVec::new();
        stack.push(index);

        while let Some(index) = stack.pop() {
            if self.dirty[index].contains(Dirty::WORLD) {
                continue;
            }

            self.dirty[index].insert(Dirty::WORLD);
            self.invalidations += 1;

            let mut cursor = self.nodes[index].first_child;
            while let Some(child) = cursor {
                let child_index = self.slot(child);
                stack.push(child_index);
                cursor = self.nodes[child_index].next_sib;
            }
        }
    }

    fn local_matrix_at(&mut self, index: usize) -> Matrix4<f32> {
        if self.dirty[index].contains(Dirty::LOCAL) {
            self.local_matrices[index] = self.local_transforms[index].matrix();
            self.dirty[index].remove(Dirty::LOCAL);
        }

        self.local_matrices[index]
    }

    fn world_matrix_at(&mut self, index: usize) -> Matrix4<f32> {
        if !self.dirty[index].contains(Dirty::WORLD) {
            return self.world_matrices[index];
        }

        // A clean node always has a clean ancestor chain, so only the dirty
        // prefix of the chain needs to be recomposed, top-down.
        let mut chain: SmallVec<[usize; 16]> = SmallVec::new();
        chain.push(index);

        let mut cursor = self.nodes[index].parent;
        while let Some(parent) = cursor {
            let parent_index = self.slot(parent);
            if !self.dirty[parent_index].contains(Dirty::WORLD) {
                break;
            }

            chain.push(parent_index);
            cursor = self.nodes[parent_index].parent;
        }

        while let Some(v) = chain.pop() {
            let local = self.local_matrix_at(v);
            self.world_matrices[v] = match self.nodes[v].parent {
                Some(parent) => self.world_matrices[self.slot(parent)] * local,
                None => local,
            };

            self.dirty[v].remove(Dirty::WORLD);
        }

        self.world_matrices[index]
    }

    fn world_rotation_at(&self, index: usize) -> Quaternion<f32> {
        self.ancestors(self.entities()[index])
            .fold(self.local_transforms[index].rotation, |acc, v| {
                self.local_transforms[self.slot(v)].rotation * acc
            })
    }

    fn world_scale_at(&self, index: usize) -> Vector3<f32> {
        self.ancestors(self.entities()[index])
            .fold(self.local_transforms[index].scale, |acc, v| {
                self.local_transforms[self.slot(v)].scale.mul_element_wise(acc)
            })
    }

    /// Returns the inverse world matrix of the parent of `child`, if it has one.
    fn parent_inverse(&mut self, child: Entity, index: usize) -> Result<Option<Matrix4<f32>>> {
        match self.nodes[index].parent {
            Some(parent) => {
                let m = self.world_matrix_at(self.slot(parent));
                match m.invert() {
                    Some(inverse) => Ok(Some(inverse)),
                    None => {
                        warn!("Can not express {} in the space of a singular parent.", child);
                        Err(Error::CanNotInverseTransform(child))
                    }
                }
            }
            None => Ok(None),
        }
    }

    /// Recomposes every stale cache in the forest. Afterwards all world and local
    /// matrices can be read without further work.
    pub fn flush(&mut self) {
        for index in 0..self.entities().len() {
            self.world_matrix_at(index);
        }
    }
}

impl SceneGraph {
    /// Gets the position, rotation and scale in local space.
    #[inline]
    pub fn local_transform(&self, ent: Entity) -> Option<Transform> {
        self.index(ent).ok().map(|v| self.local_transforms[v])
    }

    /// Sets the position, rotation and scale in local space.
    pub fn set_local_transform(&mut self, ent: Entity, transform: Transform) -> Result<()> {
        let index = self.index(ent)?;
        self.local_transforms[index] = Transform {
            rotation: normalize_rotation(transform.rotation),
            ..transform
        };

        self.invalidate_local(index);
        Ok(())
    }

    /// Gets the transform matrix, recomposing it first if it is stale.
    ///
    /// The local matrix is `T * R * S`, and the world matrix is the world matrix
    /// of the parent multiplied by the local matrix.
    pub fn matrix(&mut self, ent: Entity, space: Space) -> Option<Matrix4<f32>> {
        let index = self.index(ent).ok()?;
        Some(match space {
            Space::Local => self.local_matrix_at(index),
            Space::World => self.world_matrix_at(index),
        })
    }

    /// Sets the transform from a matrix, which is decomposed into position,
    /// rotation and scale. Shear can not be represented and is dropped.
    pub fn set_matrix(&mut self, ent: Entity, matrix: Matrix4<f32>, space: Space) -> Result<()> {
        let index = self.index(ent)?;
        let matrix = match space {
            Space::World => match self.parent_inverse(ent, index)? {
                Some(inverse) => inverse * matrix,
                None => matrix,
            },
            Space::Local => matrix,
        };

        self.local_transforms[index] = Transform::from_matrix(matrix);
        self.invalidate_local(index);
        Ok(())
    }
}

impl SceneGraph {
    /// Gets the position. In world space this is the translation of the world
    /// matrix.
    pub fn position(&mut self, ent: Entity, space: Space) -> Option<Vector3<f32>> {
        let index = self.index(ent).ok()?;
        Some(match space {
            Space::Local => self.local_transforms[index].position,
            Space::World => self.world_matrix_at(index).w.truncate(),
        })
    }

    /// Sets the position. A world position is brought into the space of the
    /// parent through the inverse of the parent's world matrix.
    pub fn set_position<T>(&mut self, ent: Entity, position: T, space: Space) -> Result<()>
    where
        T: Into<Vector3<f32>>,
    {
        let index = self.index(ent)?;
        let mut position: Vector3<f32> = position.into();

        if space == Space::World {
            if let Some(inverse) = self.parent_inverse(ent, index)? {
                position = inverse.transform_point(Point3::from_vec(position)).to_vec();
            }
        }

        self.local_transforms[index].position = position;
        self.invalidate_local(index);
        Ok(())
    }
}

impl SceneGraph {
    /// Gets the rotation. The world rotation is `parent_world * local`.
    pub fn rotation(&self, ent: Entity, space: Space) -> Option<Quaternion<f32>> {
        let index = self.index(ent).ok()?;
        Some(match space {
            Space::Local => self.local_transforms[index].rotation,
            Space::World => self.world_rotation_at(index),
        })
    }

    /// Sets the rotation, which is normalized before being stored. A world
    /// rotation becomes `inverse(parent_world) * rotation` in local space.
    pub fn set_rotation<T>(&mut self, ent: Entity, rotation: T, space: Space) -> Result<()>
    where
        T: Into<Quaternion<f32>>,
    {
        let index = self.index(ent)?;
        let mut rotation: Quaternion<f32> = rotation.into();

        if space == Space::World {
            if let Some(parent) = self.nodes[index].parent {
                let parent_rotation = self.world_rotation_at(self.slot(parent));
                rotation = parent_rotation.invert() * rotation;
            }
        }

        self.local_transforms[index].rotation = normalize_rotation(rotation);
        self.invalidate_local(index);
        Ok(())
    }
}

impl SceneGraph {
    /// Gets the scale. The world scale is the component-wise product of the local
    /// scales along the ancestor chain, rather than something extracted from the
    /// world matrix.
    pub fn scale(&self, ent: Entity, space: Space) -> Option<Vector3<f32>> {
        let index = self.index(ent).ok()?;
        Some(match space {
            Space::Local => self.local_transforms[index].scale,
            Space::World => self.world_scale_at(index),
        })
    }

    /// Sets the scale. A world scale is divided by the world scale of the parent,
    /// which fails if any of its components is zero.
    pub fn set_scale<T>(&mut self, ent: Entity, scale: T, space: Space) -> Result<()>
    where
        T: Into<Vector3<f32>>,
    {
        let index = self.index(ent)?;
        let mut scale: Vector3<f32> = scale.into();

        if space == Space::World {
            if let Some(parent) = self.nodes[index].parent {
                let parent_scale = self.world_scale_at(self.slot(parent));
                let singular =
                    parent_scale.x == 0.0 || parent_scale.y == 0.0 || parent_scale.z == 0.0;

                if singular {
                    warn!("Can not express the scale of {} under a flat parent.", ent);
                    return Err(Error::CanNotInverseTransform(ent));
                }

                scale = scale.div_element_wise(parent_scale);
            }
        }

        self.local_transforms[index].scale = scale;
        self.invalidate_local(index);
        Ok(())
    }
}
