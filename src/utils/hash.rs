use std::collections::{HashMap, HashSet};
use std::hash::BuildHasherDefault;

use rustc_hash::FxHasher;

/// A `HashMap` keyed with the fast, non-cryptographic `FxHasher`.
pub type FastHashMap<K, V> = HashMap<K, V, BuildHasherDefault<FxHasher>>;

/// A `HashSet` keyed with the fast, non-cryptographic `FxHasher`.
pub type FastHashSet<K> = HashSet<K, BuildHasherDefault<FxHasher>>;
