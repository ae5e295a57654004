use bitflags::bitflags;

bitflags! {
    /// Marks which cached matrices of a node are stale.
    ///
    /// `LOCAL` covers the matrix composed from the local position, rotation and
    /// scale. `WORLD` covers the matrix composed with every ancestor. A node that
    /// is world-dirty always has a world-dirty subtree, and a clean node always
    /// has a clean ancestor chain.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Dirty: u8 {
        const LOCAL = 0b01;
        const WORLD = 0b10;
    }
}

impl Default for Dirty {
    fn default() -> Self {
        Dirty::all()
    }
}
