//! # What is This?
//!
//! Trellis is a small hierarchical scene graph. It keeps a forest of nodes, each
//! with a local transform relative to its parent, and composes world transforms
//! lazily: writes only flag caches as stale, and matrices are recomposed on the
//! next read.
//!
//! The crate has no rendering dependency. A renderer walks the forest once per
//! frame through `SceneGraph::roots`, `SceneGraph::children` or the raw sibling
//! links, and pulls world matrices for every node it wants to draw.
//!
//! ```
//! use trellis::prelude::*;
//!
//! let mut scene = SceneGraph::new();
//! let center = scene.create();
//! let child = scene.create();
//! scene.set_parent(child, center).unwrap();
//! scene.set_position(child, [0.0, 0.0, -5.0], Space::Local).unwrap();
//! scene.set_position(center, [1.0, 0.0, 0.0], Space::World).unwrap();
//!
//! let mut cursor = scene.first_root();
//! while let Some(ent) = cursor {
//!     let _world = scene.matrix(ent, Space::World).unwrap();
//!     cursor = scene.next_sibling(ent);
//! }
//!
//! assert_eq!(scene.position(child, Space::World), Some([1.0, 0.0, -5.0].into()));
//! ```

#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;

#[cfg(test)]
#[macro_use]
extern crate approx;

#[macro_use]
pub mod utils;
pub mod errors;
pub mod math;
pub mod scene;

impl_handle!(Entity);

pub mod prelude {
    pub use crate::errors::{Error, Result};
    pub use crate::math::prelude::*;
    pub use crate::scene::prelude::*;
    pub use crate::Entity;
}
