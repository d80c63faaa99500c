//! Type kind tag for tag-driven dispatch.
//!
//! Each type in the pool has a `Tag` that identifies its kind.
//! The tag determines how to interpret the associated `data` field.
//!
//! # Tag Categories
//!
//! - 0-15: Unparameterized primitives (data unused)
//! - 16-31: Parameterized scalars (data = inline parameter)
//! - 32-47: Sequential types (data = extra index)
//! - 48-63: Structural types (data = extra index with length)
//! - 80-95: Identified types (data = index into the named struct table)

use std::fmt;

/// Type kind discriminant.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum Tag {
    // === Primitives (0-15) ===
    /// `void`.
    Void = 0,
    /// 16-bit IEEE float.
    Half = 1,
    /// 16-bit brain float.
    BFloat = 2,
    /// 32-bit IEEE float.
    Float = 3,
    /// 64-bit IEEE float.
    Double = 4,
    /// 80-bit x87 extended float.
    X86Fp80 = 5,
    /// 128-bit IEEE float.
    Fp128 = 6,
    /// 128-bit PowerPC double-double.
    PpcFp128 = 7,
    /// Basic block label.
    Label = 8,
    /// Opaque token.
    Token = 9,
    /// Metadata.
    Metadata = 10,

    // === Parameterized Scalars (16-31) ===
    /// Integer; data = bit width.
    Int = 16,
    /// Opaque pointer; data = address space.
    Pointer = 17,

    // === Sequential (32-47) ===
    /// `[N x T]`; extra = `[len_lo, len_hi, elem]`.
    Array = 32,
    /// `<N x T>`; extra = `[len, elem]`.
    Vector = 33,

    // === Structural (48-63) ===
    /// Literal struct; extra = `[packed, count, fields...]`.
    Struct = 48,
    /// Function; extra = `[variadic, count, params..., ret]`.
    Function = 49,

    // === Identified (80-95) ===
    /// Named struct `%name`; data = named struct slot.
    NamedStruct = 80,
}

impl Tag {
    /// Check if this tag uses the extra array for data.
    #[inline]
    pub const fn uses_extra(self) -> bool {
        matches!(
            self,
            Self::Array | Self::Vector | Self::Struct | Self::Function
        )
    }

    /// Check if this tag is a floating-point kind.
    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(
            self,
            Self::Half
                | Self::BFloat
                | Self::Float
                | Self::Double
                | Self::X86Fp80
                | Self::Fp128
                | Self::PpcFp128
        )
    }

    /// Check if this tag represents a struct, literal or identified.
    #[inline]
    pub const fn is_struct(self) -> bool {
        matches!(self, Self::Struct | Self::NamedStruct)
    }

    /// Get the name of this tag as a static string.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Void => "void",
            Self::Half => "half",
            Self::BFloat => "bfloat",
            Self::Float => "float",
            Self::Double => "double",
            Self::X86Fp80 => "x86_fp80",
            Self::Fp128 => "fp128",
            Self::PpcFp128 => "ppc_fp128",
            Self::Label => "label",
            Self::Token => "token",
            Self::Metadata => "metadata",
            Self::Int => "integer",
            Self::Pointer => "pointer",
            Self::Array => "array",
            Self::Vector => "vector",
            Self::Struct => "struct",
            Self::Function => "function",
            Self::NamedStruct => "named struct",
        }
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag::{}", self.name())
    }
}

#[cfg(test)]
mod tests;
