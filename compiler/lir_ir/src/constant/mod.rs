//! The constant variant set.
//!
//! Constants are interned per module: building a structurally equal
//! constant twice returns the same [`ConstId`]. The arena starts with the
//! three sentinels at fixed slots (`token none`, `i1 false`, `i1 true`),
//! the same way the type pool starts with its primitives, so sentinel
//! identity never depends on construction order.
//!
//! Integer payloads are stored exactly as given, so `i8 200` prints as
//! `i8 200`. Every `i1` constant resolves to a sentinel: `0` is `false`,
//! `1` and `-1` are `true`.

mod construct;
mod expr;
mod float;
mod format;

use lir_types::Idx;
use num_bigint::BigInt;
use rustc_hash::FxHashMap;

pub(crate) use construct::int_bits;
pub use expr::{ConstExpr, ExprOp};

use crate::ids::{BlockId, ConstId, FuncId};
use crate::value::GlobalRef;

/// A compile-time constant.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Constant {
    /// Integer, in whichever reading it was built from.
    Int { ty: Idx, value: BigInt },
    /// Floating-point literal. The payload is the bit pattern of the
    /// `f64` it was built from, which is exact in the target type.
    Float { ty: Idx, bits: u64 },
    /// Null pointer.
    Null { ty: Idx },
    /// The `token none` sentinel.
    NoneToken,
    Struct { ty: Idx, fields: Vec<ConstId> },
    Array { ty: Idx, elems: Vec<ConstId> },
    /// Array of `i8` stored as raw bytes.
    CharArray { ty: Idx, bytes: Vec<u8> },
    Vector { ty: Idx, elems: Vec<ConstId> },
    ZeroInitializer { ty: Idx },
    Undef { ty: Idx },
    Poison { ty: Idx },
    /// Address of a basic block inside its function.
    BlockAddress { func: FuncId, block: BlockId },
    /// Operation over constant operands, never folded.
    Expression(ConstExpr),
    /// Address of a global entity.
    GlobalAddress(GlobalRef),
}

impl Constant {
    /// Short kind name used in diagnostics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Int { .. } => "int",
            Self::Float { .. } => "float",
            Self::Null { .. } => "null",
            Self::NoneToken => "none",
            Self::Struct { .. } => "struct",
            Self::Array { .. } => "array",
            Self::CharArray { .. } => "char array",
            Self::Vector { .. } => "vector",
            Self::ZeroInitializer { .. } => "zeroinitializer",
            Self::Undef { .. } => "undef",
            Self::Poison { .. } => "poison",
            Self::BlockAddress { .. } => "blockaddress",
            Self::Expression(_) => "expression",
            Self::GlobalAddress(_) => "global address",
        }
    }

    /// Elements of a struct, array or vector constant.
    pub fn elements(&self) -> Option<&[ConstId]> {
        match self {
            Self::Struct { fields: elems, .. }
            | Self::Array { elems, .. }
            | Self::Vector { elems, .. } => Some(elems),
            _ => None,
        }
    }
}

/// Interned constant storage with the sentinels at fixed slots.
#[derive(Clone, Debug)]
pub(crate) struct ConstArena {
    consts: Vec<Constant>,
    types: Vec<Idx>,
    intern_map: FxHashMap<Constant, ConstId>,
}

impl ConstArena {
    pub(crate) fn new() -> Self {
        let mut arena = Self {
            consts: Vec::with_capacity(64),
            types: Vec::with_capacity(64),
            intern_map: FxHashMap::default(),
        };
        let none = arena.intern(Constant::NoneToken, Idx::TOKEN);
        let false_ = arena.intern(
            Constant::Int {
                ty: Idx::I1,
                value: BigInt::from(0),
            },
            Idx::I1,
        );
        let true_ = arena.intern(
            Constant::Int {
                ty: Idx::I1,
                value: BigInt::from(1),
            },
            Idx::I1,
        );
        debug_assert_eq!(none, ConstId::NONE);
        debug_assert_eq!(false_, ConstId::FALSE);
        debug_assert_eq!(true_, ConstId::TRUE);
        arena
    }

    /// Intern a constant of type `ty`, returning the existing id for an
    /// equal constant.
    pub(crate) fn intern(&mut self, constant: Constant, ty: Idx) -> ConstId {
        if let Some(&id) = self.intern_map.get(&constant) {
            return id;
        }
        let id = ConstId::from_index(self.consts.len());
        tracing::trace!(?id, kind = constant.kind(), ?ty, "interned constant");
        self.consts.push(constant.clone());
        self.types.push(ty);
        self.intern_map.insert(constant, id);
        id
    }

    #[inline]
    pub(crate) fn get(&self, id: ConstId) -> &Constant {
        &self.consts[id.index()]
    }

    #[inline]
    pub(crate) fn ty(&self, id: ConstId) -> Idx {
        self.types[id.index()]
    }

    pub(crate) fn len(&self) -> usize {
        self.consts.len()
    }
}
