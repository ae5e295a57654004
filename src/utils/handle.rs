use std::fmt;

/// `HandleIndex` type is arbitrary. Keeping it 32-bits allows for
/// a single 64-bits word per `Handle`.
pub type HandleIndex = u32;

/// `Handle` is made up of two field, `index` and `version`. `index` addresses a
/// slot in the pool that minted it and is recycled once the handle is freed, so
/// two handles may share an index. `version` tells them apart: a slot is alive
/// while its version is odd, and every free bumps it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Handle {
    index: HandleIndex,
    version: HandleIndex,
}

impl Handle {
    /// Constructs a new `Handle`.
    #[inline]
    pub fn new(index: HandleIndex, version: HandleIndex) -> Self {
        Handle { index, version }
    }

    /// Returns true if this `Handle` has been initialized.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.version > 0
    }

    #[inline]
    pub fn index(self) -> HandleIndex {
        self.index
    }

    #[inline]
    pub fn version(self) -> HandleIndex {
        self.version
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Handle ({}, {})", self.index, self.version)
    }
}

pub trait HandleLike: fmt::Debug + Copy + std::hash::Hash + PartialEq + Eq {
    fn new(index: HandleIndex, version: HandleIndex) -> Self;
    fn index(&self) -> HandleIndex;
    fn version(&self) -> HandleIndex;
}

impl HandleLike for Handle {
    #[inline]
    fn new(index: HandleIndex, version: HandleIndex) -> Self {
        Handle { index, version }
    }

    #[inline]
    fn index(&self) -> HandleIndex {
        self.index
    }

    #[inline]
    fn version(&self) -> HandleIndex {
        self.version
    }
}

/// Declares a type-safe wrapper around `Handle`.
#[macro_export]
macro_rules! impl_handle {
    ($name:ident) => {
        #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name($crate::utils::handle::Handle);

        impl From<$name> for $crate::utils::handle::Handle {
            fn from(handle: $name) -> Self {
                handle.0
            }
        }

        impl From<$crate::utils::handle::Handle> for $name {
            fn from(handle: $crate::utils::handle::Handle) -> Self {
                $name(handle)
            }
        }

        impl ::std::ops::Deref for $name {
            type Target = $crate::utils::handle::Handle;
            fn deref(&self) -> &$crate::utils::handle::Handle {
                &self.0
            }
        }

        impl $crate::utils::handle::HandleLike for $name {
            #[inline]
            fn new(
                index: $crate::utils::handle::HandleIndex,
                version: $crate::utils::handle::HandleIndex,
            ) -> Self {
                $name($crate::utils::handle::Handle::new(index, version))
            }

            #[inline]
            fn index(&self) -> $crate::utils::handle::HandleIndex {
                self.0.index()
            }

            #[inline]
            fn version(&self) -> $crate::utils::handle::HandleIndex {
                self.0.version()
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                write!(
                    f,
                    "{} ({}, {})",
                    stringify!($name),
                    self.0.index(),
                    self.0.version()
                )
            }
        }
    };
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::utils::hash::FastHashSet;

    #[test]
    fn basic() {
        let h1 = Handle::new(2, 5);
        assert_eq!(h1.index(), 2);
        assert_eq!(h1.version(), 5);
        assert!(h1.is_valid());
        assert!(!Handle::default().is_valid());
    }

    #[test]
    fn container() {
        let h1 = Handle::new(1, 1);
        let h2 = Handle::new(1, 3);
        let h3 = Handle::new(2, 1);
        let h4 = Handle::new(1, 1);

        let mut set = FastHashSet::default();
        assert!(set.insert(h1));
        assert!(set.contains(&h1));
        assert!(!set.insert(h4));
        assert!(set.insert(h2));
        assert!(set.insert(h3));
    }

    impl_handle!(TypeSafeHandle);

    #[test]
    fn type_safe_handle() {
        let h1 = TypeSafeHandle::default();
        assert_eq!(h1, TypeSafeHandle::from(Handle::default()));

        let h2 = TypeSafeHandle::from(Handle::new(3, 1));
        assert_eq!(*h2, Handle::new(3, 1));
        assert_eq!(format!("{}", h2), "TypeSafeHandle (3, 1)");
    }
}
