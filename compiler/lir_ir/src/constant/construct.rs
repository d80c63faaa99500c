//! Checked constant constructors.
//!
//! Every constructor validates its input against the requested type before
//! anything is interned, so a failed call leaves the module untouched.

use lir_types::{Idx, Tag, TypeFlags};
use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive, Zero};

use super::{float, Constant};
use crate::error::{IrError, Result};
use crate::ids::{BlockId, ConstId, FuncId};
use crate::module::Module;
use crate::value::{GlobalRef, Value};

/// Whether `value` fits `width` bits under the signed or the unsigned
/// reading, `[-2^(w-1), 2^w - 1]`.
pub(crate) fn fits_int(value: &BigInt, width: u32) -> bool {
    let modulus = BigInt::one() << width;
    let half = BigInt::one() << (width - 1);
    *value >= -half && *value < modulus
}

/// The `width`-bit pattern of an in-range `value`, read as unsigned.
pub(crate) fn int_bits(value: &BigInt, width: u32) -> BigInt {
    if value.is_negative() {
        value + (BigInt::one() << width)
    } else {
        value.clone()
    }
}

impl Module {
    // ── Lookup ──────────────────────────────────────────────────────

    /// The constant behind an id.
    pub fn constant(&self, id: ConstId) -> &Constant {
        self.consts.get(id)
    }

    /// Number of interned constants, sentinels included.
    pub fn const_count(&self) -> usize {
        self.consts.len()
    }

    /// Value of an integer constant, as it was built.
    pub fn const_int_value(&self, id: ConstId) -> Option<&BigInt> {
        match self.consts.get(id) {
            Constant::Int { value, .. } => Some(value),
            _ => None,
        }
    }

    // ── Scalars ─────────────────────────────────────────────────────

    /// Integer constant. `value` may use either the signed or the unsigned
    /// reading of the type's bits and is kept as given.
    ///
    /// `i1` values resolve to the `false` and `true` sentinels.
    pub fn const_int(&mut self, ty: Idx, value: impl Into<BigInt>) -> Result<ConstId> {
        let value = value.into();
        let Some(width) = self.types.int_width(ty) else {
            return Err(self.invalid_type("integer", ty));
        };
        if !fits_int(&value, width) {
            return Err(IrError::IntegerOverflow {
                value,
                ty: self.type_str(ty),
            });
        }
        if ty == Idx::I1 {
            return Ok(self.const_bool(!value.is_zero()));
        }
        Ok(self.consts.intern(Constant::Int { ty, value }, ty))
    }

    /// The shared `i1 true` or `i1 false`.
    pub fn const_bool(&self, value: bool) -> ConstId {
        if value {
            ConstId::TRUE
        } else {
            ConstId::FALSE
        }
    }

    /// The shared `token none`.
    pub fn const_none(&self) -> ConstId {
        ConstId::NONE
    }

    /// Floating-point constant. The value must convert to `ty` exactly.
    pub fn const_float(&mut self, ty: Idx, value: f64) -> Result<ConstId> {
        if self.types.float_width(ty).is_none() {
            return Err(self.invalid_type("floating-point", ty));
        }
        if !float::is_representable(self.types.tag(ty), value) {
            return Err(IrError::FloatNotRepresentable {
                value,
                ty: self.type_str(ty),
            });
        }
        Ok(self.consts.intern(
            Constant::Float {
                ty,
                bits: value.to_bits(),
            },
            ty,
        ))
    }

    /// Null pointer of a pointer type.
    pub fn const_null(&mut self, ty: Idx) -> Result<ConstId> {
        if self.types.tag(ty) != Tag::Pointer {
            return Err(self.invalid_type("null", ty));
        }
        Ok(self.consts.intern(Constant::Null { ty }, ty))
    }

    // ── Aggregates ──────────────────────────────────────────────────

    /// Struct constant. `ty` is a literal struct or a named struct with a body.
    pub fn const_struct(&mut self, ty: Idx, fields: &[Value]) -> Result<ConstId> {
        let Some(field_tys) = self.types.struct_fields(ty) else {
            return Err(self.invalid_type("struct", ty));
        };
        let fields = self.check_elements(ty, field_tys.len() as u64, |i| field_tys[i], fields)?;
        Ok(self.consts.intern(Constant::Struct { ty, fields }, ty))
    }

    /// Array constant. Arrays of plain `i8` integers become character arrays.
    pub fn const_array(&mut self, ty: Idx, elems: &[Value]) -> Result<ConstId> {
        let (Some(len), Some(elem_ty)) = (self.types.array_len(ty), self.types.array_elem(ty))
        else {
            return Err(self.invalid_type("array", ty));
        };
        let elems = self.check_elements(ty, len, |_| elem_ty, elems)?;
        if elem_ty == Idx::I8 {
            let bytes: Option<Vec<u8>> = elems
                .iter()
                .map(|&id| {
                    self.const_int_value(id)
                        .and_then(|value| int_bits(value, 8).to_u8())
                })
                .collect();
            if let Some(bytes) = bytes {
                return Ok(self.consts.intern(Constant::CharArray { ty, bytes }, ty));
            }
        }
        Ok(self.consts.intern(Constant::Array { ty, elems }, ty))
    }

    /// Vector constant.
    pub fn const_vector(&mut self, ty: Idx, elems: &[Value]) -> Result<ConstId> {
        let (Some(len), Some(elem_ty)) = (self.types.vector_len(ty), self.types.vector_elem(ty))
        else {
            return Err(self.invalid_type("vector", ty));
        };
        let elems = self.check_elements(ty, u64::from(len), |_| elem_ty, elems)?;
        Ok(self.consts.intern(Constant::Vector { ty, elems }, ty))
    }

    /// `[N x i8]` constant holding `bytes` verbatim.
    pub fn const_char_array(&mut self, bytes: &[u8]) -> ConstId {
        let ty = self.types.array(bytes.len() as u64, Idx::I8);
        self.consts.intern(
            Constant::CharArray {
                ty,
                bytes: bytes.to_vec(),
            },
            ty,
        )
    }

    /// Character array of the UTF-8 bytes of `text`. No terminator is added.
    pub fn const_string(&mut self, text: &str) -> ConstId {
        self.const_char_array(text.as_bytes())
    }

    /// Check element count and element types, returning the constant ids.
    fn check_elements(
        &self,
        aggregate: Idx,
        expected_len: u64,
        elem_ty: impl Fn(usize) -> Idx,
        elems: &[Value],
    ) -> Result<Vec<ConstId>> {
        if elems.len() as u64 != expected_len {
            return Err(IrError::AggregateLengthMismatch {
                aggregate: self.type_str(aggregate),
                expected: expected_len,
                found: elems.len(),
            });
        }
        elems
            .iter()
            .enumerate()
            .map(|(index, &elem)| {
                let expected = elem_ty(index);
                match elem.as_const() {
                    Some(id) if self.consts.ty(id) == expected => Ok(id),
                    constant => Err(IrError::InvalidAggregateElement {
                        aggregate: self.type_str(aggregate),
                        index,
                        expected: if constant.is_some() {
                            self.type_str(expected)
                        } else {
                            format!("constant {}", self.type_str(expected))
                        },
                        found: self.value_str(elem),
                    }),
                }
            })
            .collect()
    }

    // ── Placeholders ────────────────────────────────────────────────

    /// The all-zero value of `ty`.
    ///
    /// Scalars get their ordinary form (`i32 0`, `double 0.000000e+00`, `ptr null`);
    /// aggregates and vectors get `zeroinitializer`.
    pub fn const_zero(&mut self, ty: Idx) -> Result<ConstId> {
        if !self.types.is_sized(ty) {
            return Err(self.invalid_type("zeroinitializer", ty));
        }
        match self.types.tag(ty) {
            Tag::Int => self.const_int(ty, BigInt::zero()),
            Tag::Pointer => self.const_null(ty),
            _ if self.types.float_width(ty).is_some() => self.const_float(ty, 0.0),
            _ => Ok(self.consts.intern(Constant::ZeroInitializer { ty }, ty)),
        }
    }

    /// Unspecified value of `ty`.
    pub fn const_undef(&mut self, ty: Idx) -> Result<ConstId> {
        self.check_placeholder("undef", ty)?;
        Ok(self.consts.intern(Constant::Undef { ty }, ty))
    }

    /// Poison value of `ty`.
    pub fn const_poison(&mut self, ty: Idx) -> Result<ConstId> {
        self.check_placeholder("poison", ty)?;
        Ok(self.consts.intern(Constant::Poison { ty }, ty))
    }

    fn check_placeholder(&self, kind: &'static str, ty: Idx) -> Result<()> {
        let first_class = self.types.flags(ty).contains(TypeFlags::IS_FIRST_CLASS);
        if first_class && !matches!(self.types.tag(ty), Tag::Label | Tag::Metadata) {
            Ok(())
        } else {
            Err(self.invalid_type(kind, ty))
        }
    }

    // ── Addresses ───────────────────────────────────────────────────

    /// Address of `block`, which must belong to `func`.
    pub fn const_block_address(&mut self, func: FuncId, block: BlockId) -> Result<ConstId> {
        if self.block_parent(block) != func {
            let mut func_ident = String::new();
            self.global_ident_into(GlobalRef::Func(func), &mut func_ident);
            return Err(IrError::BlockNotInFunction {
                block: self.ident(Value::Block(block)),
                func: func_ident,
            });
        }
        Ok(self
            .consts
            .intern(Constant::BlockAddress { func, block }, Idx::PTR))
    }

    fn invalid_type(&self, kind: &'static str, ty: Idx) -> IrError {
        IrError::InvalidConstantType {
            kind,
            ty: self.type_str(ty),
        }
    }
}
