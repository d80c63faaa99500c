//! Arena handles.
//!
//! Every entity of a module lives in one of the module's arenas and is
//! referred to by a 32-bit index. Handles are `Copy`, so cyclic structures
//! (a block address naming its own function, a phi naming its own block)
//! need no owning references.

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Create an id from a raw index.
            #[inline]
            pub const fn new(raw: u32) -> Self {
                Self(raw)
            }

            /// Get the raw `u32` value.
            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }

            /// Get the index as `usize` (for indexing into `Vec`s).
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            #[expect(
                clippy::cast_possible_truncation,
                reason = "arena sizes never exceed u32"
            )]
            pub(crate) fn from_index(index: usize) -> Self {
                Self(index as u32)
            }
        }
    };
}

define_id!(
    /// A constant in the module's constant arena.
    ConstId
);
define_id!(
    /// A global variable.
    GlobalId
);
define_id!(
    /// A function.
    FuncId
);
define_id!(
    /// A global alias.
    AliasId
);
define_id!(
    /// An indirect function.
    IFuncId
);
define_id!(
    /// A function parameter.
    ParamId
);
define_id!(
    /// A basic block.
    BlockId
);
define_id!(
    /// An instruction or terminator.
    InstId
);

impl ConstId {
    /// The `token none` sentinel.
    pub const NONE: Self = Self(0);
    /// The `i1 false` sentinel.
    pub const FALSE: Self = Self(1);
    /// The `i1 true` sentinel.
    pub const TRUE: Self = Self(2);

    /// Number of sentinel slots at the start of every constant arena.
    pub const SENTINEL_COUNT: u32 = 3;

    /// Check if this id is one of the shared sentinels.
    #[inline]
    pub const fn is_sentinel(self) -> bool {
        self.0 < Self::SENTINEL_COUNT
    }
}

#[cfg(test)]
mod tests {
    use std::mem;

    use super::*;

    #[test]
    fn id_basics() {
        let b = BlockId::new(7);
        assert_eq!(b.raw(), 7);
        assert_eq!(b.index(), 7);
        assert_eq!(InstId::from_index(3), InstId::new(3));
    }

    #[test]
    fn sentinels() {
        assert!(ConstId::NONE.is_sentinel());
        assert!(ConstId::TRUE.is_sentinel());
        assert!(!ConstId::new(ConstId::SENTINEL_COUNT).is_sentinel());
        assert_ne!(ConstId::TRUE, ConstId::FALSE);
    }

    #[test]
    fn id_sizes() {
        assert_eq!(mem::size_of::<ConstId>(), 4);
        assert_eq!(mem::size_of::<InstId>(), 4);
    }
}
