//! Type construction helpers for the Pool.

use super::{NamedStruct, Pool, StructBody};
use crate::{Idx, Tag, TypeError};

/// Largest integer bit width the textual IR accepts.
pub const MAX_INT_WIDTH: u32 = (1 << 23) - 1;

impl Pool {
    // === Scalars ===

    /// Create an integer type `iN`.
    ///
    /// Common widths resolve to the pre-interned primitives.
    pub fn int(&mut self, width: u32) -> Idx {
        debug_assert!(
            (1..=MAX_INT_WIDTH).contains(&width),
            "integer width {width} out of range"
        );
        self.intern(Tag::Int, width)
    }

    /// Create an opaque pointer type in `addrspace`.
    pub fn pointer(&mut self, addrspace: u32) -> Idx {
        self.intern(Tag::Pointer, addrspace)
    }

    // === Sequential ===

    /// Create an array type `[len x elem]`.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "length is split into two u32 halves"
    )]
    pub fn array(&mut self, len: u64, elem: Idx) -> Idx {
        // Layout: [len_lo, len_hi, elem]
        let lo = len as u32;
        let hi = (len >> 32) as u32;
        self.intern_complex(Tag::Array, &[lo, hi, elem.raw()])
    }

    /// Create a vector type `<len x elem>`.
    pub fn vector(&mut self, len: u32, elem: Idx) -> Idx {
        debug_assert!(len > 0, "vector types need at least one element");
        self.intern_complex(Tag::Vector, &[len, elem.raw()])
    }

    // === Structural ===

    /// Create a literal struct type `{ fields... }` (or `<{ ... }>` if packed).
    #[expect(
        clippy::cast_possible_truncation,
        reason = "field counts never exceed u32"
    )]
    pub fn struct_type(&mut self, fields: &[Idx], packed: bool) -> Idx {
        // Layout: [packed, count, field0, field1, ...]
        let mut extra = Vec::with_capacity(fields.len() + 2);
        extra.push(u32::from(packed));
        extra.push(fields.len() as u32);
        extra.extend(fields.iter().map(|f| f.raw()));
        self.intern_complex(Tag::Struct, &extra)
    }

    /// Create a function type `ret (params...)`.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "parameter counts never exceed u32"
    )]
    pub fn function(&mut self, params: &[Idx], ret: Idx, variadic: bool) -> Idx {
        // Layout: [variadic, param_count, param0, param1, ..., return_type]
        let mut extra = Vec::with_capacity(params.len() + 3);
        extra.push(u32::from(variadic));
        extra.push(params.len() as u32);
        extra.extend(params.iter().map(|p| p.raw()));
        extra.push(ret.raw());
        self.intern_complex(Tag::Function, &extra)
    }

    // === Identified Structs ===

    /// Create an opaque named struct `%name`.
    ///
    /// Each name can be defined once per pool. The body is attached later
    /// with [`set_struct_body`](Self::set_struct_body).
    #[expect(
        clippy::cast_possible_truncation,
        reason = "named struct slots never exceed u32"
    )]
    pub fn named_struct(&mut self, name: impl Into<String>) -> Result<Idx, TypeError> {
        let name = name.into();
        if self.named_lookup.contains_key(&name) {
            return Err(TypeError::DuplicateStructName { name });
        }
        let slot = self.named.len() as u32;
        self.named.push(NamedStruct {
            name: name.clone(),
            body: None,
        });
        let idx = self.push(super::Item {
            tag: Tag::NamedStruct,
            data: slot,
        });
        tracing::debug!(%name, ?idx, "declared named struct");
        self.named_lookup.insert(name, idx);
        Ok(idx)
    }

    /// Attach a body to an opaque named struct.
    pub fn set_struct_body(
        &mut self,
        idx: Idx,
        fields: &[Idx],
        packed: bool,
    ) -> Result<(), TypeError> {
        if self.tag(idx) != Tag::NamedStruct {
            return Err(TypeError::NotNamedStruct {
                ty: self.format_type(idx),
            });
        }
        let slot = self.data(idx) as usize;
        let entry = &mut self.named[slot];
        if entry.body.is_some() {
            return Err(TypeError::StructBodyAlreadySet {
                name: entry.name.clone(),
            });
        }
        tracing::debug!(name = %entry.name, fields = fields.len(), packed, "set struct body");
        entry.body = Some(StructBody {
            fields: fields.to_vec(),
            packed,
        });
        Ok(())
    }

    /// Look up a named struct by name.
    pub fn named_struct_by_name(&self, name: &str) -> Option<Idx> {
        self.named_lookup.get(name).copied()
    }

    /// All named structs in definition order.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "pool indices never exceed u32"
    )]
    pub fn named_structs(&self) -> impl Iterator<Item = Idx> + '_ {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.tag == Tag::NamedStruct)
            .map(|(i, _)| Idx::from_raw(i as u32))
    }
}
