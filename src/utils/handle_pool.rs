use std::cmp::Reverse;
use std::collections::binary_heap::BinaryHeap;
use std::marker::PhantomData;

use super::handle::{HandleIndex, HandleLike};

/// `HandlePool` manages the manipulations of a `Handle` collection, which are
/// created with a continuous `index` field. Freed indices are recycled lowest
/// first, and every recycle bumps the version so stale handles never come
/// back to life.
pub struct HandlePool<H: HandleLike> {
    versions: Vec<HandleIndex>,
    frees: BinaryHeap<Reverse<HandleIndex>>,
    _phantom: PhantomData<H>,
}

impl<H: HandleLike> Default for HandlePool<H> {
    fn default() -> Self {
        HandlePool::new()
    }
}

impl<H: HandleLike> HandlePool<H> {
    /// Constructs a new, empty `HandlePool`.
    pub fn new() -> Self {
        HandlePool {
            versions: Vec::new(),
            frees: BinaryHeap::new(),
            _phantom: PhantomData,
        }
    }

    /// Constructs a new `HandlePool` with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        HandlePool {
            versions: Vec::with_capacity(capacity),
            frees: BinaryHeap::new(),
            _phantom: PhantomData,
        }
    }

    /// Creates a unused `Handle`.
    pub fn create(&mut self) -> H {
        if let Some(Reverse(index)) = self.frees.pop() {
            let version = &mut self.versions[index as usize];
            *version += 1;
            H::new(index, *version)
        } else {
            self.versions.push(1);
            H::new(self.versions.len() as HandleIndex - 1, 1)
        }
    }

    /// Returns true if this `Handle` was created by `HandlePool`, and has not been
    /// freed yet.
    pub fn contains(&self, handle: H) -> bool {
        let index = handle.index() as usize;
        self.is_alive_at(index) && (self.versions[index] == handle.version())
    }

    #[inline]
    fn is_alive_at(&self, index: usize) -> bool {
        (index < self.versions.len()) && ((self.versions[index] & 0x1) == 1)
    }

    /// Recycles the `Handle` index, and mark its version as dead.
    pub fn free(&mut self, handle: H) -> bool {
        if !self.contains(handle) {
            false
        } else {
            self.versions[handle.index() as usize] += 1;
            self.frees.push(Reverse(handle.index()));
            true
        }
    }

    /// Returns the total number of alive handle in this `HandlePool`.
    #[inline]
    pub fn len(&self) -> usize {
        self.versions.len() - self.frees.len()
    }

    /// Returns true if there is no alive handle in this `HandlePool`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::utils::handle::Handle;

    #[test]
    fn recycle() {
        let mut pool: HandlePool<Handle> = HandlePool::new();
        let e1 = pool.create();
        let e2 = pool.create();
        assert_eq!(pool.len(), 2);

        assert!(pool.free(e1));
        assert!(!pool.free(e1));
        assert!(!pool.contains(e1));
        assert!(pool.contains(e2));

        // The lowest free index comes back first, with a fresh version.
        let e3 = pool.create();
        assert_eq!(e3.index(), e1.index());
        assert_ne!(e3.version(), e1.version());
        assert!(pool.contains(e3));
        assert!(!pool.contains(e1));
    }

    #[test]
    fn len() {
        let mut pool: HandlePool<Handle> = HandlePool::with_capacity(8);
        assert!(pool.is_empty());

        let handles: Vec<_> = (0..8).map(|_| pool.create()).collect();
        for v in handles.iter().filter(|v| v.index() % 2 == 0) {
            pool.free(*v);
        }

        assert_eq!(pool.len(), 4);
        for v in &handles {
            assert_eq!(pool.contains(*v), v.index() % 2 == 1);
        }

        pool.create();
        assert_eq!(pool.len(), 5);
    }
}
