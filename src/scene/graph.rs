use inlinable_string::InlinableString;

use crate::errors::*;
use crate::math::prelude::*;
use crate::utils::prelude::{FastHashMap, HandlePool};
use crate::Entity;

use super::dirty::Dirty;
use super::node::{Node, Properties};
use super::transform::Transform;
use super::SceneParams;

/// A scene graph that stores the position, rotation and scale of nodes, and the
/// tree relationships between them, so transforms can be read and written in both
/// local and world space.
///
/// The graph owns the whole forest: nodes without a parent are chained into an
/// ordered top-level list, every other node sits in the ordered child list of its
/// parent. Deleting a node deletes its subtree.
///
/// Reads of world space properties recompose stale caches in place, so they take
/// `&mut self`. The graph is meant to be mutated and queried from one thread; call
/// `flush` before handing out a shared reference if readers need settled matrices.
pub struct SceneGraph {
    pool: HandlePool<Entity>,
    remap: FastHashMap<Entity, usize>,
    entities: Vec<Entity>,

    pub(crate) nodes: Vec<Node>,
    pub(crate) properties: Vec<Properties>,
    pub(crate) local_transforms: Vec<Transform>,
    pub(crate) local_matrices: Vec<Matrix4<f32>>,
    pub(crate) world_matrices: Vec<Matrix4<f32>>,
    pub(crate) dirty: Vec<Dirty>,
    pub(crate) invalidations: usize,

    first_root: Option<Entity>,
    last_root: Option<Entity>,
}

impl Default for SceneGraph {
    fn default() -> Self {
        SceneGraph::new()
    }
}

impl SceneGraph {
    pub fn new() -> Self {
        SceneGraph::with_params(SceneParams::default())
    }

    pub fn with_params(params: SceneParams) -> Self {
        let capacity = params.capacity;
        let mut remap = FastHashMap::default();
        remap.reserve(capacity);

        SceneGraph {
            pool: HandlePool::with_capacity(capacity),
            remap,
            entities: Vec::with_capacity(capacity),
            nodes: Vec::with_capacity(capacity),
            properties: Vec::with_capacity(capacity),
            local_transforms: Vec::with_capacity(capacity),
            local_matrices: Vec::with_capacity(capacity),
            world_matrices: Vec::with_capacity(capacity),
            dirty: Vec::with_capacity(capacity),
            invalidations: 0,
            first_root: None,
            last_root: None,
        }
    }

    /// Creates a node at the tail of the top-level list, with identity transform.
    /// It starts out visible, enabled and with both caches stale.
    pub fn create(&mut self) -> Entity {
        let ent = self.pool.create();

        self.remap.insert(ent, self.entities.len());
        self.entities.push(ent);
        self.nodes.push(Node::default());
        self.properties.push(Properties::default());
        self.local_transforms.push(Transform::default());
        self.local_matrices.push(Matrix4::identity());
        self.world_matrices.push(Matrix4::identity());
        self.dirty.push(Dirty::default());
        self.link(ent);

        trace!("Creates {}.", ent);
        ent
    }

    /// Creates a new top-level node with the name, flags and local transform of
    /// `ent`. Children are not copied.
    pub fn duplicate(&mut self, ent: Entity) -> Result<Entity> {
        let index = self.index(ent)?;
        let properties = self.properties[index].clone();
        let transform = self.local_transforms[index];

        let copy = self.create();
        let copy_index = self.slot(copy);
        self.properties[copy_index] = properties;
        self.local_transforms[copy_index] = transform;
        Ok(copy)
    }

    /// Removes a node and all of its descendants. Returns the removed entities,
    /// children ahead of their parents, or `None` if `ent` is not alive.
    pub fn delete(&mut self, ent: Entity) -> Option<Vec<Entity>> {
        if !self.remap.contains_key(&ent) {
            return None;
        }

        self.unlink(ent);

        let mut removes: Vec<_> = self.descendants(ent).collect();
        removes.reverse();
        removes.push(ent);

        for &v in &removes {
            self.release(v);
        }

        debug!("Deletes {} with {} descendants.", ent, removes.len() - 1);
        Some(removes)
    }

    /// Returns true if `ent` is alive in this graph.
    #[inline]
    pub fn contains(&self, ent: Entity) -> bool {
        self.pool.contains(ent)
    }

    /// Returns the number of nodes in the forest.
    #[inline]
    pub fn len(&self) -> usize {
        self.pool.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    /// Returns every alive entity, in storage order.
    #[inline]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    #[inline]
    pub(crate) fn index(&self, ent: Entity) -> Result<usize> {
        self.remap
            .get(&ent)
            .cloned()
            .ok_or(Error::NonNodeFound(ent))
    }

    /// Looks up an entity that is reachable through the links of a live node.
    #[inline]
    pub(crate) fn slot(&self, ent: Entity) -> usize {
        self.remap[&ent]
    }

    fn release(&mut self, ent: Entity) {
        if let Some(index) = self.remap.remove(&ent) {
            self.entities.swap_remove(index);
            self.nodes.swap_remove(index);
            self.properties.swap_remove(index);
            self.local_transforms.swap_remove(index);
            self.local_matrices.swap_remove(index);
            self.world_matrices.swap_remove(index);
            self.dirty.swap_remove(index);

            if index != self.entities.len() {
                self.remap.insert(self.entities[index], index);
            }

            self.pool.free(ent);
        }
    }

    /// Appends the node to the tail of the list its `parent` link points to.
    fn link(&mut self, ent: Entity) {
        let index = self.slot(ent);
        let parent = self.nodes[index].parent.map(|v| self.slot(v));
        let tail = match parent {
            Some(pi) => self.nodes[pi].last_child,
            None => self.last_root,
        };

        self.nodes[index].prev_sib = tail;
        self.nodes[index].next_sib = None;

        match (tail, parent) {
            (Some(tail), _) => {
                let ti = self.slot(tail);
                self.nodes[ti].next_sib = Some(ent);
            }
            (None, Some(pi)) => self.nodes[pi].first_child = Some(ent),
            (None, None) => self.first_root = Some(ent),
        }

        match parent {
            Some(pi) => self.nodes[pi].last_child = Some(ent),
            None => self.last_root = Some(ent),
        }
    }

    /// Splices the node out of whichever list holds it. The `parent` link is kept.
    fn unlink(&mut self, ent: Entity) {
        let index = self.slot(ent);
        let parent = self.nodes[index].parent.map(|v| self.slot(v));
        let (prev_sib, next_sib) = {
            let node = &mut self.nodes[index];
            (node.prev_sib.take(), node.next_sib.take())
        };

        match (prev_sib, parent) {
            (Some(prev_sib), _) => {
                let psi = self.slot(prev_sib);
                self.nodes[psi].next_sib = next_sib;
            }
            (None, Some(pi)) => self.nodes[pi].first_child = next_sib,
            (None, None) => self.first_root = next_sib,
        }

        match (next_sib, parent) {
            (Some(next_sib), _) => {
                let nsi = self.slot(next_sib);
                self.nodes[nsi].prev_sib = prev_sib;
            }
            (None, Some(pi)) => self.nodes[pi].last_child = prev_sib,
            (None, None) => self.last_root = prev_sib,
        }
    }
}

impl SceneGraph {
    /// Attachs the node to the tail of `parent`'s children, or to the tail of the
    /// top-level list if `parent` is `None`.
    ///
    /// The local transform is kept as is, so the world pose follows the new parent.
    /// Attaching a node into its own subtree is rejected.
    pub fn set_parent<T>(&mut self, child: Entity, parent: T) -> Result<()>
    where
        T: Into<Option<Entity>>,
    {
        let child_index = self.index(child)?;
        let parent = parent.into();

        if self.nodes[child_index].parent == parent {
            return Ok(());
        }

        if let Some(parent) = parent {
            if parent == child {
                return Err(Error::CanNotAttachSelfAsParent);
            }

            self.index(parent)?;
            if self.is_ancestor(parent, child) {
                return Err(Error::CyclicHierarchy { child, parent });
            }
        }

        self.unlink(child);
        self.nodes[child_index].parent = parent;
        self.link(child);
        self.invalidate_world(child_index);

        debug!("Attachs {} to {:?}.", child, parent);
        Ok(())
    }

    /// Gets the parent node.
    #[inline]
    pub fn parent(&self, ent: Entity) -> Option<Entity> {
        self.remap.get(&ent).and_then(|&v| self.nodes[v].parent)
    }

    /// Gets the first node in the child list.
    #[inline]
    pub fn first_child(&self, ent: Entity) -> Option<Entity> {
        self.remap.get(&ent).and_then(|&v| self.nodes[v].first_child)
    }

    /// Gets the last node in the child list.
    #[inline]
    pub fn last_child(&self, ent: Entity) -> Option<Entity> {
        self.remap.get(&ent).and_then(|&v| self.nodes[v].last_child)
    }

    /// Gets the next node in the same sibling list.
    #[inline]
    pub fn next_sibling(&self, ent: Entity) -> Option<Entity> {
        self.remap.get(&ent).and_then(|&v| self.nodes[v].next_sib)
    }

    /// Gets the previous node in the same sibling list.
    #[inline]
    pub fn prev_sibling(&self, ent: Entity) -> Option<Entity> {
        self.remap.get(&ent).and_then(|&v| self.nodes[v].prev_sib)
    }

    /// Gets the head of the top-level list.
    #[inline]
    pub fn first_root(&self) -> Option<Entity> {
        self.first_root
    }

    /// Gets the tail of the top-level list.
    #[inline]
    pub fn last_root(&self) -> Option<Entity> {
        self.last_root
    }

    /// Returns ture if this is the leaf of a hierarchy, aka. has no child.
    #[inline]
    pub fn is_leaf(&self, ent: Entity) -> bool {
        self.remap
            .get(&ent)
            .map(|&v| self.nodes[v].first_child.is_none())
            .unwrap_or(false)
    }

    /// Returns ture if this is the root of a hierarchy, aka. has no parent.
    #[inline]
    pub fn is_root(&self, ent: Entity) -> bool {
        self.remap
            .get(&ent)
            .map(|&v| self.nodes[v].parent.is_none())
            .unwrap_or(false)
    }

    /// Return true if rhs is one of the ancestor of lhs.
    #[inline]
    pub fn is_ancestor(&self, lhs: Entity, rhs: Entity) -> bool {
        self.ancestors(lhs).any(|v| v == rhs)
    }

    /// Returns an iterator of the top-level nodes, in insertion order.
    #[inline]
    pub fn roots(&self) -> Siblings {
        Siblings {
            cursor: self.first_root,
            scene: self,
        }
    }

    /// Returns an iterator of references to its ancestors, nearest first.
    #[inline]
    pub fn ancestors(&self, ent: Entity) -> Ancestors {
        Ancestors {
            cursor: self.parent(ent),
            scene: self,
        }
    }

    /// Returns an iterator of references to this node's children.
    #[inline]
    pub fn children(&self, ent: Entity) -> Siblings {
        Siblings {
            cursor: self.first_child(ent),
            scene: self,
        }
    }

    /// Returns an iterator of references to this node's descendants in tree order.
    #[inline]
    pub fn descendants(&self, ent: Entity) -> Descendants {
        Descendants {
            root: ent,
            cursor: self.first_child(ent),
            scene: self,
        }
    }
}

impl SceneGraph {
    /// Gets the name of the node.
    #[inline]
    pub fn name(&self, ent: Entity) -> Option<&str> {
        self.remap
            .get(&ent)
            .and_then(|&v| self.properties[v].name.as_ref())
            .map(AsRef::<str>::as_ref)
    }

    pub fn set_name<T>(&mut self, ent: Entity, name: T) -> Result<()>
    where
        T: AsRef<str>,
    {
        let index = self.index(ent)?;
        self.properties[index].name = Some(InlinableString::from(name.as_ref()));
        Ok(())
    }

    pub fn clear_name(&mut self, ent: Entity) -> Result<()> {
        let index = self.index(ent)?;
        self.properties[index].name = None;
        Ok(())
    }

    /// Finds the first node with `name`, searching the forest in tree order.
    pub fn find<T>(&self, name: T) -> Option<Entity>
    where
        T: AsRef<str>,
    {
        let name = name.as_ref();
        self.roots()
            .flat_map(|root| ::std::iter::once(root).chain(self.descendants(root)))
            .find(|&v| self.name(v) == Some(name))
    }

    #[inline]
    pub fn is_visible(&self, ent: Entity) -> bool {
        self.remap
            .get(&ent)
            .map(|&v| self.properties[v].visible)
            .unwrap_or(false)
    }

    #[inline]
    pub fn set_visible(&mut self, ent: Entity, visible: bool) -> Result<()> {
        let index = self.index(ent)?;
        self.properties[index].visible = visible;
        Ok(())
    }

    #[inline]
    pub fn is_enabled(&self, ent: Entity) -> bool {
        self.remap
            .get(&ent)
            .map(|&v| self.properties[v].enabled)
            .unwrap_or(false)
    }

    #[inline]
    pub fn set_enabled(&mut self, ent: Entity, enabled: bool) -> Result<()> {
        let index = self.index(ent)?;
        self.properties[index].enabled = enabled;
        Ok(())
    }
}

/// An iterator of references to its ancestors.
pub struct Ancestors<'a> {
    scene: &'a SceneGraph,
    cursor: Option<Entity>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = Entity;

    fn next(&mut self) -> Option<Self::Item> {
        let ent = self.cursor?;
        let index = self.scene.slot(ent);
        ::std::mem::replace(&mut self.cursor, self.scene.nodes[index].parent)
    }
}

/// An iterator of the nodes in one sibling list.
pub struct Siblings<'a> {
    scene: &'a SceneGraph,
    cursor: Option<Entity>,
}

impl<'a> Iterator for Siblings<'a> {
    type Item = Entity;

    fn next(&mut self) -> Option<Self::Item> {
        let ent = self.cursor?;
        let index = self.scene.slot(ent);
        ::std::mem::replace(&mut self.cursor, self.scene.nodes[index].next_sib)
    }
}

/// An iterator of references to its descendants, in tree order.
pub struct Descendants<'a> {
    scene: &'a SceneGraph,
    root: Entity,
    cursor: Option<Entity>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = Entity;

    fn next(&mut self) -> Option<Self::Item> {
        let ent = self.cursor?;
        let mut v = self.scene.nodes[self.scene.slot(ent)];

        // Deep first search when iterating children recursively.
        if v.first_child.is_some() {
            return ::std::mem::replace(&mut self.cursor, v.first_child);
        }

        if v.next_sib.is_some() {
            return ::std::mem::replace(&mut self.cursor, v.next_sib);
        }

        // Travel back when we reach leaf-node.
        while let Some(parent) = v.parent {
            if parent == self.root {
                break;
            }

            v = self.scene.nodes[self.scene.slot(parent)];
            if v.next_sib.is_some() {
                return ::std::mem::replace(&mut self.cursor, v.next_sib);
            }
        }

        self.cursor.take()
    }
}
