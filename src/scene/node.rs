use inlinable_string::InlinableString;

use crate::Entity;

/// `Node` records where an entity sits in the forest.
///
/// Every node lives in exactly one sibling list at a time: the child list of
/// its `parent`, or the top-level list of the `SceneGraph` when it has no
/// parent. `prev_sib` and `next_sib` link it into that list. `first_child` and
/// `last_child` are the head and tail of its own child list, and are either
/// both set or both empty.
///
/// Links are plain `Entity` handles, so every access goes through the
/// remapping table of the graph. The `parent` link is only ever used to walk
/// upwards; ownership flows strictly from parent to children.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub parent: Option<Entity>,
    pub next_sib: Option<Entity>,
    pub prev_sib: Option<Entity>,
    pub first_child: Option<Entity>,
    pub last_child: Option<Entity>,
}

/// Plain attributes of a node. Changing them never touches the transform caches.
#[derive(Debug, Clone, PartialEq)]
pub struct Properties {
    pub name: Option<InlinableString>,
    pub visible: bool,
    pub enabled: bool,
}

impl Default for Properties {
    fn default() -> Self {
        Properties {
            name: None,
            visible: true,
            enabled: true,
        }
    }
}
