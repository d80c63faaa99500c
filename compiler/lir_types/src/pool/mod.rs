//! Interned type storage.
//!
//! Every type lives in a flat `items` array as a `(tag, data)` pair. Types
//! with variable-size payloads (arrays, vectors, structs, functions) keep
//! their words in a shared `extra` array and store the start offset in
//! `data`. Interning goes through `intern_map`, so constructing the same type
//! twice returns the same [`Idx`].
//!
//! Named structs are the one exception to structural interning: each
//! `named_struct` call creates a distinct identity whose body is attached
//! later, which is what makes recursive types possible.

mod construct;
mod format;
mod query;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

pub use construct::MAX_INT_WIDTH;
pub use format::TypeDisplay;

use crate::{Idx, Tag, TypeFlags};

/// A pooled type: its kind plus one word of payload.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Item {
    pub tag: Tag,
    pub data: u32,
}

/// Interning key. Simple types use their single data word; extra-backed
/// types use their full payload.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct InternKey {
    tag: Tag,
    words: SmallVec<[u32; 4]>,
}

/// Body of an identified struct, present once `set_struct_body` has run.
#[derive(Clone, Debug)]
struct StructBody {
    fields: Vec<Idx>,
    packed: bool,
}

#[derive(Clone, Debug)]
struct NamedStruct {
    name: String,
    body: Option<StructBody>,
}

/// The type pool.
#[derive(Clone, Debug)]
pub struct Pool {
    items: Vec<Item>,
    flags: Vec<TypeFlags>,
    extra: Vec<u32>,
    intern_map: FxHashMap<InternKey, Idx>,
    named: Vec<NamedStruct>,
    named_lookup: FxHashMap<String, Idx>,
}

impl Default for Pool {
    fn default() -> Self {
        Self::new()
    }
}

/// Primitive items in `Idx` order.
const PRIMITIVES: [Item; Idx::PRIMITIVE_COUNT as usize] = [
    Item { tag: Tag::Void, data: 0 },
    Item { tag: Tag::Int, data: 1 },
    Item { tag: Tag::Int, data: 8 },
    Item { tag: Tag::Int, data: 16 },
    Item { tag: Tag::Int, data: 32 },
    Item { tag: Tag::Int, data: 64 },
    Item { tag: Tag::Int, data: 128 },
    Item { tag: Tag::Half, data: 0 },
    Item { tag: Tag::BFloat, data: 0 },
    Item { tag: Tag::Float, data: 0 },
    Item { tag: Tag::Double, data: 0 },
    Item { tag: Tag::X86Fp80, data: 0 },
    Item { tag: Tag::Fp128, data: 0 },
    Item { tag: Tag::PpcFp128, data: 0 },
    Item { tag: Tag::Pointer, data: 0 },
    Item { tag: Tag::Label, data: 0 },
    Item { tag: Tag::Token, data: 0 },
    Item { tag: Tag::Metadata, data: 0 },
];

impl Pool {
    /// Create a pool with every primitive pre-interned at its fixed index.
    pub fn new() -> Self {
        let mut pool = Self {
            items: Vec::with_capacity(64),
            flags: Vec::with_capacity(64),
            extra: Vec::with_capacity(256),
            intern_map: FxHashMap::default(),
            named: Vec::new(),
            named_lookup: FxHashMap::default(),
        };
        for item in PRIMITIVES {
            let idx = pool.intern(item.tag, item.data);
            pool.flags[idx.index()] |= TypeFlags::IS_PRIMITIVE;
        }
        debug_assert_eq!(pool.items.len(), Idx::PRIMITIVE_COUNT as usize);
        pool
    }

    /// Number of types in the pool.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// The pool is never empty (primitives are always present).
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Kind of a type.
    #[inline]
    pub fn tag(&self, idx: Idx) -> Tag {
        self.items[idx.index()].tag
    }

    /// Raw data word of a type.
    #[inline]
    pub fn data(&self, idx: Idx) -> u32 {
        self.items[idx.index()].data
    }

    /// Pre-computed category flags of a type.
    #[inline]
    pub fn flags(&self, idx: Idx) -> TypeFlags {
        self.flags[idx.index()]
    }

    /// Intern a type whose payload fits in the data word.
    pub(crate) fn intern(&mut self, tag: Tag, data: u32) -> Idx {
        debug_assert!(!tag.uses_extra(), "{tag:?} must go through intern_complex");
        let key = InternKey {
            tag,
            words: SmallVec::from_slice(&[data]),
        };
        if let Some(&idx) = self.intern_map.get(&key) {
            return idx;
        }
        let idx = self.push(Item { tag, data });
        self.intern_map.insert(key, idx);
        idx
    }

    /// Intern a type whose payload lives in `extra`.
    pub(crate) fn intern_complex(&mut self, tag: Tag, words: &[u32]) -> Idx {
        debug_assert!(tag.uses_extra(), "{tag:?} must go through intern");
        let key = InternKey {
            tag,
            words: SmallVec::from_slice(words),
        };
        if let Some(&idx) = self.intern_map.get(&key) {
            return idx;
        }
        let data = self.extra_len();
        self.extra.extend_from_slice(words);
        let idx = self.push(Item { tag, data });
        self.intern_map.insert(key, idx);
        idx
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "pool indices never exceed u32"
    )]
    fn push(&mut self, item: Item) -> Idx {
        let idx = Idx::from_raw(self.items.len() as u32);
        self.items.push(item);
        self.flags.push(TypeFlags::for_tag(item.tag));
        tracing::trace!(?idx, tag = item.tag.name(), "interned type");
        idx
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "extra array never exceeds u32 words"
    )]
    fn extra_len(&self) -> u32 {
        self.extra.len() as u32
    }

    /// Extra words starting at the type's data offset.
    #[inline]
    fn extra_at(&self, idx: Idx) -> &[u32] {
        &self.extra[self.data(idx) as usize..]
    }
}

#[cfg(test)]
mod tests;
