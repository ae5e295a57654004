//! A forest of nodes with hierarchical, lazily cached transforms.
//!
//! Every node owns a local transform (position, rotation and scale relative to
//! its parent) and a cached world transform composed with all of its ancestors.
//! Writes only flag caches as stale; matrices are recomposed on the next read.
//!
//! ```
//! use trellis::prelude::*;
//!
//! let mut scene = SceneGraph::new();
//! let sun = scene.create();
//! let earth = scene.create();
//! scene.set_parent(earth, sun).unwrap();
//! scene.set_position(earth, [0.0, 0.0, 5.0], Space::Local).unwrap();
//!
//! scene.turn(sun, Deg(0.0), Deg(90.0), Deg(0.0), Space::Local).unwrap();
//! let p = scene.position(earth, Space::World).unwrap();
//! assert!((p.x - 5.0).abs() < 1e-5 && p.z.abs() < 1e-5);
//! ```

pub mod dirty;
pub mod graph;
pub mod node;
pub mod transform;

mod motion;
mod spatial;

pub mod prelude {
    pub use super::dirty::Dirty;
    pub use super::graph::{Ancestors, Descendants, SceneGraph, Siblings};
    pub use super::node::{Node, Properties};
    pub use super::transform::Transform;
    pub use super::{SceneParams, Space};
}

use serde::{Deserialize, Serialize};

/// Selects the coordinate space a transform is read or written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Space {
    /// Relative to the parent node, or absolute for a top-level node.
    Local,
    /// Relative to the origin of the forest.
    World,
}

/// The setup parameters of a `SceneGraph`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneParams {
    /// Number of nodes to reserve storage for up front.
    pub capacity: usize,
}

impl Default for SceneParams {
    fn default() -> Self {
        SceneParams { capacity: 64 }
    }
}
