//! Pre-computed type category flags.
//!
//! `TypeFlags` are computed once when a type is interned and cached next to
//! the item, so category checks (`is this an integer?`, `is this a vector?`)
//! never need to look at the type's payload.

use bitflags::bitflags;

use crate::Tag;

bitflags! {
    /// Category flags for a pooled type.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct TypeFlags: u32 {
        /// Pre-interned primitive.
        const IS_PRIMITIVE = 1 << 0;
        /// Integer type.
        const IS_INT = 1 << 1;
        /// Floating-point type.
        const IS_FLOAT = 1 << 2;
        /// Pointer type.
        const IS_POINTER = 1 << 3;
        /// Vector type.
        const IS_VECTOR = 1 << 4;
        /// Array or struct type.
        const IS_AGGREGATE = 1 << 5;
        /// Function type.
        const IS_FUNCTION = 1 << 6;
        /// Identified (named) struct.
        const IS_NAMED = 1 << 7;
        /// Can be produced by an instruction or held in a register.
        const IS_FIRST_CLASS = 1 << 8;
        /// Integer, float or pointer.
        const IS_SCALAR = 1 << 9;
    }
}

impl TypeFlags {
    /// Compute the flags for a freshly interned type.
    pub(crate) fn for_tag(tag: Tag) -> Self {
        match tag {
            Tag::Void => Self::empty(),
            Tag::Half
            | Tag::BFloat
            | Tag::Float
            | Tag::Double
            | Tag::X86Fp80
            | Tag::Fp128
            | Tag::PpcFp128 => Self::IS_FLOAT | Self::IS_SCALAR | Self::IS_FIRST_CLASS,
            Tag::Label | Tag::Token | Tag::Metadata => Self::IS_FIRST_CLASS,
            Tag::Int => Self::IS_INT | Self::IS_SCALAR | Self::IS_FIRST_CLASS,
            Tag::Pointer => Self::IS_POINTER | Self::IS_SCALAR | Self::IS_FIRST_CLASS,
            Tag::Array | Tag::Struct => Self::IS_AGGREGATE | Self::IS_FIRST_CLASS,
            Tag::Vector => Self::IS_VECTOR | Self::IS_FIRST_CLASS,
            Tag::Function => Self::IS_FUNCTION,
            Tag::NamedStruct => Self::IS_AGGREGATE | Self::IS_NAMED | Self::IS_FIRST_CLASS,
        }
    }

    /// Check if the type is an integer.
    #[inline]
    pub const fn is_int(self) -> bool {
        self.contains(Self::IS_INT)
    }

    /// Check if the type is a floating-point type.
    #[inline]
    pub const fn is_float(self) -> bool {
        self.contains(Self::IS_FLOAT)
    }

    /// Check if the type is a pointer.
    #[inline]
    pub const fn is_pointer(self) -> bool {
        self.contains(Self::IS_POINTER)
    }

    /// Check if the type is a vector.
    #[inline]
    pub const fn is_vector(self) -> bool {
        self.contains(Self::IS_VECTOR)
    }

    /// Check if the type is an array or struct.
    #[inline]
    pub const fn is_aggregate(self) -> bool {
        self.contains(Self::IS_AGGREGATE)
    }
}
