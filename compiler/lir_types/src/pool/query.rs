//! Structural queries over pooled types.
//!
//! Every accessor returns `None` when the type is not of the requested
//! kind, so callers validating user input never index into the wrong
//! payload layout.

use super::Pool;
use crate::{Idx, Tag};

impl Pool {
    // === Scalars ===

    /// Bit width of an integer type.
    pub fn int_width(&self, idx: Idx) -> Option<u32> {
        (self.tag(idx) == Tag::Int).then(|| self.data(idx))
    }

    /// Address space of a pointer type.
    pub fn pointer_addrspace(&self, idx: Idx) -> Option<u32> {
        (self.tag(idx) == Tag::Pointer).then(|| self.data(idx))
    }

    /// Bit width of a floating-point type.
    pub fn float_width(&self, idx: Idx) -> Option<u32> {
        match self.tag(idx) {
            Tag::Half | Tag::BFloat => Some(16),
            Tag::Float => Some(32),
            Tag::Double => Some(64),
            Tag::X86Fp80 => Some(80),
            Tag::Fp128 | Tag::PpcFp128 => Some(128),
            _ => None,
        }
    }

    // === Sequential ===

    /// Element count of an array type.
    pub fn array_len(&self, idx: Idx) -> Option<u64> {
        if self.tag(idx) != Tag::Array {
            return None;
        }
        let extra = self.extra_at(idx);
        Some(u64::from(extra[0]) | (u64::from(extra[1]) << 32))
    }

    /// Element type of an array type.
    pub fn array_elem(&self, idx: Idx) -> Option<Idx> {
        (self.tag(idx) == Tag::Array).then(|| Idx::from_raw(self.extra_at(idx)[2]))
    }

    /// Element count of a vector type.
    pub fn vector_len(&self, idx: Idx) -> Option<u32> {
        (self.tag(idx) == Tag::Vector).then(|| self.extra_at(idx)[0])
    }

    /// Element type of a vector type.
    pub fn vector_elem(&self, idx: Idx) -> Option<Idx> {
        (self.tag(idx) == Tag::Vector).then(|| Idx::from_raw(self.extra_at(idx)[1]))
    }

    /// The element type for vectors, the type itself otherwise.
    pub fn scalar_type(&self, idx: Idx) -> Idx {
        self.vector_elem(idx).unwrap_or(idx)
    }

    // === Structs ===

    /// Field types of a struct. `None` for non-structs and opaque named structs.
    pub fn struct_fields(&self, idx: Idx) -> Option<Vec<Idx>> {
        match self.tag(idx) {
            Tag::Struct => {
                let extra = self.extra_at(idx);
                let count = extra[1] as usize;
                Some(extra[2..2 + count].iter().map(|&r| Idx::from_raw(r)).collect())
            }
            Tag::NamedStruct => self.named[self.data(idx) as usize]
                .body
                .as_ref()
                .map(|body| body.fields.clone()),
            _ => None,
        }
    }

    /// Whether a struct is packed. Opaque structs report `false`.
    pub fn struct_is_packed(&self, idx: Idx) -> bool {
        match self.tag(idx) {
            Tag::Struct => self.extra_at(idx)[0] != 0,
            Tag::NamedStruct => self.named[self.data(idx) as usize]
                .body
                .as_ref()
                .is_some_and(|body| body.packed),
            _ => false,
        }
    }

    /// Name of a named struct.
    pub fn struct_name(&self, idx: Idx) -> Option<&str> {
        (self.tag(idx) == Tag::NamedStruct).then(|| self.named[self.data(idx) as usize].name.as_str())
    }

    /// Whether `idx` is a named struct without a body.
    pub fn is_opaque(&self, idx: Idx) -> bool {
        self.tag(idx) == Tag::NamedStruct && self.named[self.data(idx) as usize].body.is_none()
    }

    // === Functions ===

    /// Parameter types of a function type.
    pub fn function_params(&self, idx: Idx) -> Option<Vec<Idx>> {
        if self.tag(idx) != Tag::Function {
            return None;
        }
        let extra = self.extra_at(idx);
        let count = extra[1] as usize;
        Some(extra[2..2 + count].iter().map(|&r| Idx::from_raw(r)).collect())
    }

    /// Return type of a function type.
    pub fn function_return(&self, idx: Idx) -> Option<Idx> {
        if self.tag(idx) != Tag::Function {
            return None;
        }
        let extra = self.extra_at(idx);
        let count = extra[1] as usize;
        Some(Idx::from_raw(extra[2 + count]))
    }

    /// Whether a function type accepts trailing variadic arguments.
    pub fn function_is_variadic(&self, idx: Idx) -> bool {
        self.tag(idx) == Tag::Function && self.extra_at(idx)[0] != 0
    }

    // === Aggregates ===

    /// Number of elements of an array, vector or struct.
    pub fn aggregate_len(&self, idx: Idx) -> Option<u64> {
        match self.tag(idx) {
            Tag::Array => self.array_len(idx),
            Tag::Vector => self.vector_len(idx).map(u64::from),
            Tag::Struct | Tag::NamedStruct => self.struct_fields(idx).map(|f| f.len() as u64),
            _ => None,
        }
    }

    /// Type of the element at `index` of an array, vector or struct.
    ///
    /// Returns `None` when the index is out of bounds.
    pub fn element_type(&self, idx: Idx, index: u64) -> Option<Idx> {
        match self.tag(idx) {
            Tag::Array => {
                let len = self.array_len(idx)?;
                (index < len).then(|| self.array_elem(idx)).flatten()
            }
            Tag::Vector => {
                let len = u64::from(self.vector_len(idx)?);
                (index < len).then(|| self.vector_elem(idx)).flatten()
            }
            Tag::Struct | Tag::NamedStruct => {
                let fields = self.struct_fields(idx)?;
                usize::try_from(index).ok().and_then(|i| fields.get(i).copied())
            }
            _ => None,
        }
    }

    // === Layout ===

    /// Size in bits of a type whose size does not depend on the target.
    ///
    /// Integers, floats and vectors of them. Pointers and aggregates are
    /// target-dependent and return `None`.
    pub fn primitive_size_bits(&self, idx: Idx) -> Option<u64> {
        match self.tag(idx) {
            Tag::Int => Some(u64::from(self.data(idx))),
            Tag::Vector => {
                let elem = self.vector_elem(idx)?;
                let len = u64::from(self.vector_len(idx)?);
                self.primitive_size_bits(elem).map(|bits| bits * len)
            }
            _ => self.float_width(idx).map(u64::from),
        }
    }

    /// Whether values of this type have a size (can be stored in memory).
    pub fn is_sized(&self, idx: Idx) -> bool {
        let mut visiting = Vec::new();
        self.is_sized_inner(idx, &mut visiting)
    }

    fn is_sized_inner(&self, idx: Idx, visiting: &mut Vec<Idx>) -> bool {
        match self.tag(idx) {
            Tag::Void | Tag::Label | Tag::Token | Tag::Metadata | Tag::Function => false,
            Tag::Int | Tag::Pointer => true,
            Tag::Array | Tag::Vector => self
                .element_type(idx, 0)
                .or_else(|| self.array_elem(idx))
                .is_some_and(|elem| self.is_sized_inner(elem, visiting)),
            Tag::Struct | Tag::NamedStruct => {
                if visiting.contains(&idx) {
                    return false;
                }
                let Some(fields) = self.struct_fields(idx) else {
                    return false;
                };
                visiting.push(idx);
                let sized = fields.iter().all(|&f| self.is_sized_inner(f, visiting));
                visiting.pop();
                sized
            }
            _ => self.float_width(idx).is_some(),
        }
    }
}

#[cfg(test)]
mod tests;
