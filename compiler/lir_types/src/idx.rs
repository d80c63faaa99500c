//! Type index handle.
//!
//! `Idx` is the only way a type is referred to outside the pool. Types are
//! interned, so two structurally equal types always share one index and type
//! equality is a `u32` comparison.
//!
//! The common primitive types occupy fixed indices (0-17), pre-interned when
//! the pool is created. They are the same in every pool, so they can be used
//! as constants without a pool at hand.

use std::fmt;

/// A 32-bit index into the type pool.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Idx(u32);

impl Idx {
    // === Primitive Types (indices 0-17) ===

    /// `void`.
    pub const VOID: Self = Self(0);
    /// `i1`, the boolean type.
    pub const I1: Self = Self(1);
    /// `i8`.
    pub const I8: Self = Self(2);
    /// `i16`.
    pub const I16: Self = Self(3);
    /// `i32`.
    pub const I32: Self = Self(4);
    /// `i64`.
    pub const I64: Self = Self(5);
    /// `i128`.
    pub const I128: Self = Self(6);
    /// `half` (IEEE binary16).
    pub const HALF: Self = Self(7);
    /// `bfloat` (brain floating point).
    pub const BFLOAT: Self = Self(8);
    /// `float` (IEEE binary32).
    pub const FLOAT: Self = Self(9);
    /// `double` (IEEE binary64).
    pub const DOUBLE: Self = Self(10);
    /// `x86_fp80`.
    pub const X86_FP80: Self = Self(11);
    /// `fp128` (IEEE binary128).
    pub const FP128: Self = Self(12);
    /// `ppc_fp128` (double-double).
    pub const PPC_FP128: Self = Self(13);
    /// `ptr` in address space 0.
    pub const PTR: Self = Self(14);
    /// `label`, the type of basic blocks.
    pub const LABEL: Self = Self(15);
    /// `token`.
    pub const TOKEN: Self = Self(16);
    /// `metadata`.
    pub const METADATA: Self = Self(17);

    /// Number of pre-interned primitive types.
    pub const PRIMITIVE_COUNT: u32 = 18;

    /// Sentinel value indicating no type.
    pub const NONE: Self = Self(u32::MAX);

    /// Create an index from a raw u32 value.
    ///
    /// The caller must make sure the index exists in the pool it is used with.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Get the index as `usize` (for indexing into `Vec`s).
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Check if this is a pre-interned primitive.
    #[inline]
    pub const fn is_primitive(self) -> bool {
        self.0 < Self::PRIMITIVE_COUNT
    }

    /// Check if this is the NONE sentinel.
    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    /// Textual syntax of a primitive, or `None` for pool-allocated types.
    #[inline]
    pub const fn name(self) -> Option<&'static str> {
        match self.0 {
            0 => Some("void"),
            1 => Some("i1"),
            2 => Some("i8"),
            3 => Some("i16"),
            4 => Some("i32"),
            5 => Some("i64"),
            6 => Some("i128"),
            7 => Some("half"),
            8 => Some("bfloat"),
            9 => Some("float"),
            10 => Some("double"),
            11 => Some("x86_fp80"),
            12 => Some("fp128"),
            13 => Some("ppc_fp128"),
            14 => Some("ptr"),
            15 => Some("label"),
            16 => Some("token"),
            17 => Some("metadata"),
            _ => None,
        }
    }
}

impl fmt::Debug for Idx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "Idx({name})"),
            None if self.is_none() => write!(f, "Idx::NONE"),
            None => write!(f, "Idx({})", self.0),
        }
    }
}

#[cfg(test)]
mod tests;
