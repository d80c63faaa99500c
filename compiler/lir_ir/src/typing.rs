//! Typing rules shared by instructions and constant expressions.
//!
//! Each rule takes operand types and returns the result type, or the error
//! describing which rule was broken. Rules that may produce a new vector
//! type (`icmp` over vectors, `shufflevector`) take the pool mutably.

use lir_types::{Idx, Pool, Tag};
use num_bigint::BigInt;
use num_traits::ToPrimitive;

use crate::error::{IrError, Result};
use crate::op::{ArithFlags, BinaryOp, CastOp};

fn invalid(op: &'static str, reason: impl Into<String>) -> IrError {
    IrError::InvalidOperation {
        op,
        reason: reason.into(),
    }
}

/// `TypeMismatch` unless both types are the same.
pub(crate) fn same(pool: &Pool, expected: Idx, found: Idx) -> Result<()> {
    if expected == found {
        return Ok(());
    }
    Err(IrError::TypeMismatch {
        expected: pool.format_type(expected),
        found: pool.format_type(found),
    })
}

pub(crate) fn binary(
    pool: &Pool,
    op: BinaryOp,
    flags: ArithFlags,
    lhs: Idx,
    rhs: Idx,
) -> Result<Idx> {
    same(pool, lhs, rhs)?;
    let scalar = pool.flags(pool.scalar_type(lhs));
    let (ok, wanted) = if op.is_float() {
        (scalar.is_float(), "floating-point")
    } else {
        (scalar.is_int(), "integer")
    };
    if !ok {
        return Err(invalid(
            op.name(),
            format!("expected {wanted} operands, found `{}`", pool.format_type(lhs)),
        ));
    }
    let rejected = flags.difference(op.allowed_flags());
    if !rejected.is_empty() {
        let mut names = String::new();
        rejected.push_to(&mut names);
        return Err(invalid(
            op.name(),
            format!("flags `{}` are not allowed", names.trim_end()),
        ));
    }
    Ok(lhs)
}

pub(crate) fn fneg(pool: &Pool, ty: Idx) -> Result<Idx> {
    if pool.flags(pool.scalar_type(ty)).is_float() {
        Ok(ty)
    } else {
        Err(invalid(
            "fneg",
            format!("expected a floating-point operand, found `{}`", pool.format_type(ty)),
        ))
    }
}

pub(crate) fn cast(pool: &Pool, op: CastOp, src: Idx, dst: Idx) -> Result<Idx> {
    let fail = || {
        invalid(
            op.name(),
            format!(
                "cannot convert `{}` to `{}`",
                pool.format_type(src),
                pool.format_type(dst)
            ),
        )
    };

    if op == CastOp::BitCast {
        let (sf, df) = (pool.flags(src), pool.flags(dst));
        let ok = if sf.is_pointer() || df.is_pointer() {
            sf.is_pointer() && df.is_pointer() && src == dst
        } else {
            pool.primitive_size_bits(src)
                .is_some_and(|bits| pool.primitive_size_bits(dst) == Some(bits))
        };
        return if ok { Ok(dst) } else { Err(fail()) };
    }

    if pool.vector_len(src) != pool.vector_len(dst) {
        return Err(fail());
    }
    let (s, d) = (pool.scalar_type(src), pool.scalar_type(dst));
    let (sf, df) = (pool.flags(s), pool.flags(d));
    let ints = sf.is_int() && df.is_int();
    let floats = sf.is_float() && df.is_float();
    let ok = match op {
        CastOp::Trunc => ints && pool.int_width(s) > pool.int_width(d),
        CastOp::ZExt | CastOp::SExt => ints && pool.int_width(s) < pool.int_width(d),
        CastOp::FPTrunc => floats && pool.float_width(s) > pool.float_width(d),
        CastOp::FPExt => floats && pool.float_width(s) < pool.float_width(d),
        CastOp::FPToUI | CastOp::FPToSI => sf.is_float() && df.is_int(),
        CastOp::UIToFP | CastOp::SIToFP => sf.is_int() && df.is_float(),
        CastOp::PtrToInt => sf.is_pointer() && df.is_int(),
        CastOp::IntToPtr => sf.is_int() && df.is_pointer(),
        CastOp::AddrSpaceCast => {
            sf.is_pointer()
                && df.is_pointer()
                && pool.pointer_addrspace(s) != pool.pointer_addrspace(d)
        }
        CastOp::BitCast => false,
    };
    if ok {
        Ok(dst)
    } else {
        Err(fail())
    }
}

/// `i1`, or `<N x i1>` for vector operands.
fn bool_result(pool: &mut Pool, operand: Idx) -> Idx {
    match pool.vector_len(operand) {
        Some(len) => pool.vector(len, Idx::I1),
        None => Idx::I1,
    }
}

pub(crate) fn icmp(pool: &mut Pool, lhs: Idx, rhs: Idx) -> Result<Idx> {
    same(pool, lhs, rhs)?;
    let scalar = pool.flags(pool.scalar_type(lhs));
    if !scalar.is_int() && !scalar.is_pointer() {
        return Err(invalid(
            "icmp",
            format!(
                "expected integer or pointer operands, found `{}`",
                pool.format_type(lhs)
            ),
        ));
    }
    Ok(bool_result(pool, lhs))
}

pub(crate) fn fcmp(pool: &mut Pool, lhs: Idx, rhs: Idx) -> Result<Idx> {
    same(pool, lhs, rhs)?;
    if !pool.flags(pool.scalar_type(lhs)).is_float() {
        return Err(invalid(
            "fcmp",
            format!(
                "expected floating-point operands, found `{}`",
                pool.format_type(lhs)
            ),
        ));
    }
    Ok(bool_result(pool, lhs))
}

pub(crate) fn select(pool: &Pool, cond: Idx, on_true: Idx, on_false: Idx) -> Result<Idx> {
    same(pool, on_true, on_false)?;
    let cond_ok = match pool.vector_len(cond) {
        Some(len) => pool.vector_elem(cond) == Some(Idx::I1) && pool.vector_len(on_true) == Some(len),
        None => cond == Idx::I1,
    };
    if !cond_ok {
        return Err(invalid(
            "select",
            format!(
                "condition `{}` does not select between `{}` values",
                pool.format_type(cond),
                pool.format_type(on_true)
            ),
        ));
    }
    Ok(on_true)
}

/// One `getelementptr` index: its type and, when constant, its value.
pub(crate) type GepIndex<'a> = (Idx, Option<&'a BigInt>);

pub(crate) fn getelementptr(
    pool: &Pool,
    source: Idx,
    base: Idx,
    indices: &[GepIndex<'_>],
) -> Result<Idx> {
    if !pool.flags(base).is_pointer() {
        return Err(invalid(
            "getelementptr",
            format!("base must be a pointer, found `{}`", pool.format_type(base)),
        ));
    }
    if !pool.is_sized(source) {
        return Err(invalid(
            "getelementptr",
            format!("source type `{}` is unsized", pool.format_type(source)),
        ));
    }
    let Some((&(first, _), rest)) = indices.split_first() else {
        return Err(invalid("getelementptr", "at least one index is required"));
    };
    if !pool.flags(first).is_int() {
        return Err(invalid(
            "getelementptr",
            format!("index must be an integer, found `{}`", pool.format_type(first)),
        ));
    }

    let mut current = source;
    for &(index_ty, value) in rest {
        current = match pool.tag(current) {
            Tag::Array | Tag::Vector => {
                if !pool.flags(index_ty).is_int() {
                    return Err(invalid(
                        "getelementptr",
                        format!(
                            "index must be an integer, found `{}`",
                            pool.format_type(index_ty)
                        ),
                    ));
                }
                pool.element_type(current, 0)
                    .or_else(|| pool.array_elem(current))
                    .unwrap_or(current)
            }
            Tag::Struct | Tag::NamedStruct => {
                let field = value
                    .filter(|_| index_ty == Idx::I32)
                    .and_then(ToPrimitive::to_u64)
                    .and_then(|i| pool.element_type(current, i));
                let Some(field) = field else {
                    return Err(invalid(
                        "getelementptr",
                        format!(
                            "struct `{}` must be indexed by an in-range constant `i32`",
                            pool.format_type(current)
                        ),
                    ));
                };
                field
            }
            _ => {
                return Err(invalid(
                    "getelementptr",
                    format!("cannot index into `{}`", pool.format_type(current)),
                ))
            }
        };
    }
    Ok(base)
}

fn expect_vector(pool: &Pool, op: &'static str, ty: Idx) -> Result<Idx> {
    pool.vector_elem(ty).ok_or_else(|| {
        invalid(
            op,
            format!("expected a vector, found `{}`", pool.format_type(ty)),
        )
    })
}

fn expect_index(pool: &Pool, op: &'static str, ty: Idx) -> Result<()> {
    if pool.flags(ty).is_int() {
        Ok(())
    } else {
        Err(invalid(
            op,
            format!("index must be an integer, found `{}`", pool.format_type(ty)),
        ))
    }
}

pub(crate) fn extract_element(pool: &Pool, vector: Idx, index: Idx) -> Result<Idx> {
    let elem = expect_vector(pool, "extractelement", vector)?;
    expect_index(pool, "extractelement", index)?;
    Ok(elem)
}

pub(crate) fn insert_element(pool: &Pool, vector: Idx, elem: Idx, index: Idx) -> Result<Idx> {
    let expected = expect_vector(pool, "insertelement", vector)?;
    same(pool, expected, elem)?;
    expect_index(pool, "insertelement", index)?;
    Ok(vector)
}

pub(crate) fn shuffle_vector(pool: &mut Pool, lhs: Idx, rhs: Idx, mask: Idx) -> Result<Idx> {
    same(pool, lhs, rhs)?;
    let elem = expect_vector(pool, "shufflevector", lhs)?;
    let Some(len) = pool
        .vector_len(mask)
        .filter(|_| pool.vector_elem(mask) == Some(Idx::I32))
    else {
        return Err(invalid(
            "shufflevector",
            format!("mask must be a vector of i32, found `{}`", pool.format_type(mask)),
        ));
    };
    Ok(pool.vector(len, elem))
}
