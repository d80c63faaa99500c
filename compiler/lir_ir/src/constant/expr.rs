//! Constant expressions.
//!
//! An expression is an opcode over constant operands. Nothing is folded:
//! `add (i32 1, i32 2)` stays an expression. The result type is derived
//! once, when the expression is built, by the same rules instructions use.

use lir_types::Idx;
use num_bigint::BigInt;
use smallvec::SmallVec;

use super::Constant;
use crate::error::{IrError, Result};
use crate::ids::ConstId;
use crate::module::Module;
use crate::op::{ArithFlags, BinaryOp, CastOp, FloatPredicate, IntPredicate};
use crate::typing;
use crate::value::Value;

/// Operation of a constant expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExprOp {
    Binary(BinaryOp, ArithFlags),
    FNeg,
    /// Conversion to the given type.
    Cast(CastOp, Idx),
    ICmp(IntPredicate),
    FCmp(FloatPredicate),
    Select,
    /// Address arithmetic over `source`. Operands are the base pointer
    /// followed by the indices.
    GetElementPtr { source: Idx, inbounds: bool },
    ExtractElement,
    InsertElement,
    ShuffleVector,
}

impl ExprOp {
    /// Mnemonic in the textual IR.
    pub fn name(self) -> &'static str {
        match self {
            Self::Binary(op, _) => op.name(),
            Self::FNeg => "fneg",
            Self::Cast(op, _) => op.name(),
            Self::ICmp(_) => "icmp",
            Self::FCmp(_) => "fcmp",
            Self::Select => "select",
            Self::GetElementPtr { .. } => "getelementptr",
            Self::ExtractElement => "extractelement",
            Self::InsertElement => "insertelement",
            Self::ShuffleVector => "shufflevector",
        }
    }

    /// Predicate keyword of a comparison.
    pub fn predicate(self) -> Option<&'static str> {
        match self {
            Self::ICmp(pred) => Some(pred.name()),
            Self::FCmp(pred) => Some(pred.name()),
            _ => None,
        }
    }

    /// Required operand count. `None` for variable arity.
    fn arity(self) -> Option<usize> {
        match self {
            Self::FNeg | Self::Cast(..) => Some(1),
            Self::Binary(..) | Self::ICmp(_) | Self::FCmp(_) | Self::ExtractElement => Some(2),
            Self::Select | Self::InsertElement | Self::ShuffleVector => Some(3),
            Self::GetElementPtr { .. } => None,
        }
    }
}

/// An opcode applied to constant operands.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ConstExpr {
    pub op: ExprOp,
    pub operands: SmallVec<[ConstId; 3]>,
}

impl Module {
    /// Build a constant expression.
    ///
    /// Every operand must be a constant; the operand types must satisfy the
    /// typing rule of `op`.
    pub fn const_expr(&mut self, op: ExprOp, operands: &[Value]) -> Result<ConstId> {
        let mut ids = SmallVec::<[ConstId; 3]>::with_capacity(operands.len());
        for (index, &operand) in operands.iter().enumerate() {
            let Some(id) = operand.as_const() else {
                return Err(IrError::NonConstantOperand {
                    context: op.name(),
                    index,
                    operand: self.value_str(operand),
                });
            };
            ids.push(id);
        }
        let arity_ok = match op.arity() {
            Some(n) => ids.len() == n,
            None => ids.len() >= 2,
        };
        if !arity_ok {
            return Err(IrError::InvalidOperation {
                op: op.name(),
                reason: format!("wrong number of operands ({})", ids.len()),
            });
        }

        let ty = self.expr_type(op, &ids)?;
        Ok(self.consts.intern(
            Constant::Expression(ConstExpr { op, operands: ids }),
            ty,
        ))
    }

    fn expr_type(&mut self, op: ExprOp, ids: &[ConstId]) -> Result<Idx> {
        let tys: SmallVec<[Idx; 3]> = ids.iter().map(|&id| self.consts.ty(id)).collect();
        let pool = &mut self.types;
        match op {
            ExprOp::Binary(bin, flags) => typing::binary(pool, bin, flags, tys[0], tys[1]),
            ExprOp::FNeg => typing::fneg(pool, tys[0]),
            ExprOp::Cast(cast, to) => typing::cast(pool, cast, tys[0], to),
            ExprOp::ICmp(_) => typing::icmp(pool, tys[0], tys[1]),
            ExprOp::FCmp(_) => typing::fcmp(pool, tys[0], tys[1]),
            ExprOp::Select => typing::select(pool, tys[0], tys[1], tys[2]),
            ExprOp::GetElementPtr { source, .. } => {
                let indices: Vec<typing::GepIndex<'_>> = ids[1..]
                    .iter()
                    .zip(&tys[1..])
                    .map(|(&id, &ty)| (ty, int_value(self.consts.get(id))))
                    .collect();
                typing::getelementptr(pool, source, tys[0], &indices)
            }
            ExprOp::ExtractElement => typing::extract_element(pool, tys[0], tys[1]),
            ExprOp::InsertElement => typing::insert_element(pool, tys[0], tys[1], tys[2]),
            ExprOp::ShuffleVector => typing::shuffle_vector(pool, tys[0], tys[1], tys[2]),
        }
    }
}

fn int_value(constant: &Constant) -> Option<&BigInt> {
    match constant {
        Constant::Int { value, .. } => Some(value),
        _ => None,
    }
}

#[cfg(test)]
mod tests;
