//! Instructions and terminators.
//!
//! Instructions are the Users of the IR: each owns an ordered operand list
//! of [`Value`]s. Builders check the typing rules before anything is
//! appended, so every instruction in a module is well-typed when built and
//! [`Module::set_operand`] keeps it that way.
//!
//! # Operand layout
//!
//! - `phi`: value, block, value, block, ...
//! - `call`: callee, then arguments
//! - `br`: destination; conditional `br`: condition, then, else
//! - `switch`: condition, default, then case value, destination pairs

mod format;

use lir_types::{Idx, Tag};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::constant::int_bits;
use crate::error::{IrError, Result};
use crate::ids::{BlockId, ConstId, FuncId, InstId};
use crate::module::Module;
use crate::op::{ArithFlags, BinaryOp, CastOp, FloatPredicate, IntPredicate};
use crate::typing;
use crate::value::{NameSlot, Value};

/// Instruction opcode with its non-operand payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InstKind {
    Binary(BinaryOp, ArithFlags),
    FNeg,
    Cast(CastOp),
    ICmp(IntPredicate),
    FCmp(FloatPredicate),
    Select,
    /// Stack slot for one value of `allocated`.
    Alloca { allocated: Idx },
    Load,
    Store,
    /// Call through a callee of function type `callee_ty`.
    Call { callee_ty: Idx },
    Phi,
    Ret,
    Br,
    CondBr,
    Switch,
    Unreachable,
}

impl InstKind {
    /// Mnemonic in the textual IR.
    pub fn name(self) -> &'static str {
        match self {
            Self::Binary(op, _) => op.name(),
            Self::FNeg => "fneg",
            Self::Cast(op) => op.name(),
            Self::ICmp(_) => "icmp",
            Self::FCmp(_) => "fcmp",
            Self::Select => "select",
            Self::Alloca { .. } => "alloca",
            Self::Load => "load",
            Self::Store => "store",
            Self::Call { .. } => "call",
            Self::Phi => "phi",
            Self::Ret => "ret",
            Self::Br | Self::CondBr => "br",
            Self::Switch => "switch",
            Self::Unreachable => "unreachable",
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

    /// Whether the instruction ends its block.
    pub fn is_terminator(self) -> bool {
        matches!(
            self,
            Self::Ret | Self::Br | Self::CondBr | Self::Switch | Self::Unreachable
        )
    }

    /// Whether operand `index` only accepts constants.
    pub fn requires_constant(self, index: usize) -> bool {
        // Switch case values sit at 2, 4, 6, ...
        self == Self::Switch && index >= 2 && index % 2 == 0
    }
}

/// An instruction in the module's instruction arena.
#[derive(Clone, Debug)]
pub(crate) struct InstData {
    pub(crate) name: NameSlot,
    pub(crate) block: BlockId,
    pub(crate) kind: InstKind,
    pub(crate) ty: Idx,
    pub(crate) operands: SmallVec<[Value; 4]>,
}

impl Module {
    // ── Queries ─────────────────────────────────────────────────────

    pub fn inst_kind(&self, inst: InstId) -> InstKind {
        self.insts[inst.index()].kind
    }

    /// Block containing an instruction.
    pub fn inst_parent(&self, inst: InstId) -> BlockId {
        self.insts[inst.index()].block
    }

    /// Terminator of a block, if it has one.
    pub fn terminator(&self, block: BlockId) -> Option<InstId> {
        self.blocks[block.index()]
            .insts
            .last()
            .copied()
            .filter(|&inst| self.insts[inst.index()].kind.is_terminator())
    }

    fn push_inst(
        &mut self,
        block: BlockId,
        kind: InstKind,
        ty: Idx,
        operands: &[Value],
    ) -> Result<InstId> {
        if self.terminator(block).is_some() {
            return Err(IrError::BlockTerminated {
                block: self.ident(Value::Block(block)),
            });
        }
        let id = InstId::from_index(self.insts.len());
        self.insts.push(InstData {
            name: NameSlot::default(),
            block,
            kind,
            ty,
            operands: SmallVec::from_slice(operands),
        });
        self.blocks[block.index()].insts.push(id);
        tracing::trace!(?id, op = kind.name(), ?block, "appended instruction");
        Ok(id)
    }

    // ── Builders ────────────────────────────────────────────────────

    pub fn build_binary(
        &mut self,
        block: BlockId,
        op: BinaryOp,
        flags: ArithFlags,
        lhs: Value,
        rhs: Value,
    ) -> Result<InstId> {
        let ty = typing::binary(&self.types, op, flags, self.type_of(lhs), self.type_of(rhs))?;
        self.push_inst(block, InstKind::Binary(op, flags), ty, &[lhs, rhs])
    }

    pub fn build_fneg(&mut self, block: BlockId, operand: Value) -> Result<InstId> {
        let ty = typing::fneg(&self.types, self.type_of(operand))?;
        self.push_inst(block, InstKind::FNeg, ty, &[operand])
    }

    pub fn build_cast(
        &mut self,
        block: BlockId,
        op: CastOp,
        operand: Value,
        to: Idx,
    ) -> Result<InstId> {
        let ty = typing::cast(&self.types, op, self.type_of(operand), to)?;
        self.push_inst(block, InstKind::Cast(op), ty, &[operand])
    }

    pub fn build_icmp(
        &mut self,
        block: BlockId,
        pred: IntPredicate,
        lhs: Value,
        rhs: Value,
    ) -> Result<InstId> {
        let (l, r) = (self.type_of(lhs), self.type_of(rhs));
        let ty = typing::icmp(&mut self.types, l, r)?;
        self.push_inst(block, InstKind::ICmp(pred), ty, &[lhs, rhs])
    }

    pub fn build_fcmp(
        &mut self,
        block: BlockId,
        pred: FloatPredicate,
        lhs: Value,
        rhs: Value,
    ) -> Result<InstId> {
        let (l, r) = (self.type_of(lhs), self.type_of(rhs));
        let ty = typing::fcmp(&mut self.types, l, r)?;
        self.push_inst(block, InstKind::FCmp(pred), ty, &[lhs, rhs])
    }

    pub fn build_select(
        &mut self,
        block: BlockId,
        cond: Value,
        on_true: Value,
        on_false: Value,
    ) -> Result<InstId> {
        let ty = typing::select(
            &self.types,
            self.type_of(cond),
            self.type_of(on_true),
            self.type_of(on_false),
        )?;
        self.push_inst(block, InstKind::Select, ty, &[cond, on_true, on_false])
    }

    /// Stack slot for one value of `allocated`. Produces a `ptr`.
    pub fn build_alloca(&mut self, block: BlockId, allocated: Idx) -> Result<InstId> {
        if !self.types.is_sized(allocated) {
            return Err(IrError::InvalidOperation {
                op: "alloca",
                reason: format!("cannot allocate unsized type `{}`", self.type_str(allocated)),
            });
        }
        self.push_inst(block, InstKind::Alloca { allocated }, Idx::PTR, &[])
    }

    pub fn build_load(&mut self, block: BlockId, ty: Idx, ptr: Value) -> Result<InstId> {
        self.expect_pointer_operand("load", ptr)?;
        if !self.types.is_sized(ty) {
            return Err(IrError::InvalidOperation {
                op: "load",
                reason: format!("cannot load unsized type `{}`", self.type_str(ty)),
            });
        }
        self.push_inst(block, InstKind::Load, ty, &[ptr])
    }

    pub fn build_store(&mut self, block: BlockId, value: Value, ptr: Value) -> Result<InstId> {
        self.expect_pointer_operand("store", ptr)?;
        if !self.types.is_sized(self.type_of(value)) {
            return Err(IrError::InvalidOperation {
                op: "store",
                reason: format!("cannot store `{}`", self.value_str(value)),
            });
        }
        self.push_inst(block, InstKind::Store, Idx::VOID, &[value, ptr])
    }

    /// Call `callee` (a pointer) as a function of type `callee_ty`.
    pub fn build_call(
        &mut self,
        block: BlockId,
        callee_ty: Idx,
        callee: Value,
        args: &[Value],
    ) -> Result<InstId> {
        let (Some(params), Some(ret)) = (
            self.types.function_params(callee_ty),
            self.types.function_return(callee_ty),
        ) else {
            return Err(IrError::ExpectedFunctionType {
                ty: self.type_str(callee_ty),
            });
        };
        self.expect_pointer_operand("call", callee)?;
        let variadic = self.types.function_is_variadic(callee_ty);
        if args.len() < params.len() || (!variadic && args.len() > params.len()) {
            return Err(IrError::InvalidOperation {
                op: "call",
                reason: format!(
                    "`{}` takes {} arguments, {} given",
                    self.type_str(callee_ty),
                    params.len(),
                    args.len()
                ),
            });
        }
        for (&param, &arg) in params.iter().zip(args) {
            self.expect_type(param, self.type_of(arg))?;
        }
        let mut operands = Vec::with_capacity(args.len() + 1);
        operands.push(callee);
        operands.extend_from_slice(args);
        self.push_inst(block, InstKind::Call { callee_ty }, ret, &operands)
    }

    /// Phi node of type `ty`. Incoming blocks must share the phi's function.
    pub fn build_phi(
        &mut self,
        block: BlockId,
        ty: Idx,
        incoming: &[(Value, BlockId)],
    ) -> Result<InstId> {
        let func = self.block_parent(block);
        let mut operands = Vec::with_capacity(incoming.len() * 2);
        for &(value, pred) in incoming {
            self.expect_type(ty, self.type_of(value))?;
            self.expect_same_function("phi", func, pred)?;
            operands.push(value);
            operands.push(Value::Block(pred));
        }
        self.push_inst(block, InstKind::Phi, ty, &operands)
    }

    /// `ret` with an optional value, checked against the function's return type.
    pub fn build_ret(&mut self, block: BlockId, value: Option<Value>) -> Result<InstId> {
        let sig = self.funcs[self.block_parent(block).index()].sig;
        let ret = self.types.function_return(sig).unwrap_or(Idx::VOID);
        match value {
            Some(value) => {
                self.expect_type(ret, self.type_of(value))?;
                self.push_inst(block, InstKind::Ret, Idx::VOID, &[value])
            }
            None => {
                self.expect_type(ret, Idx::VOID)?;
                self.push_inst(block, InstKind::Ret, Idx::VOID, &[])
            }
        }
    }

    pub fn build_br(&mut self, block: BlockId, dest: BlockId) -> Result<InstId> {
        self.expect_same_function("br", self.block_parent(block), dest)?;
        self.push_inst(block, InstKind::Br, Idx::VOID, &[Value::Block(dest)])
    }

    pub fn build_cond_br(
        &mut self,
        block: BlockId,
        cond: Value,
        then_dest: BlockId,
        else_dest: BlockId,
    ) -> Result<InstId> {
        self.expect_type(Idx::I1, self.type_of(cond))?;
        let func = self.block_parent(block);
        self.expect_same_function("br", func, then_dest)?;
        self.expect_same_function("br", func, else_dest)?;
        self.push_inst(
            block,
            InstKind::CondBr,
            Idx::VOID,
            &[cond, Value::Block(then_dest), Value::Block(else_dest)],
        )
    }

    /// `switch` on an integer. Case values must be distinct constants of the
    /// condition's type.
    pub fn build_switch(
        &mut self,
        block: BlockId,
        cond: Value,
        default: BlockId,
        cases: &[(ConstId, BlockId)],
    ) -> Result<InstId> {
        let cond_ty = self.type_of(cond);
        if self.types.tag(cond_ty) != Tag::Int {
            return Err(IrError::InvalidOperation {
                op: "switch",
                reason: format!("condition must be an integer, found `{}`", self.value_str(cond)),
            });
        }
        let func = self.block_parent(block);
        self.expect_same_function("switch", func, default)?;
        let mut operands = Vec::with_capacity(2 + cases.len() * 2);
        operands.push(cond);
        operands.push(Value::Block(default));
        let width = self.types.int_width(cond_ty).unwrap_or_default();
        let mut seen = FxHashSet::default();
        for &(value, dest) in cases {
            self.expect_type(cond_ty, self.consts.ty(value))?;
            self.expect_same_function("switch", func, dest)?;
            if let Some(bits) = self.const_int_value(value).map(|v| int_bits(v, width)) {
                if !seen.insert(bits) {
                    return Err(IrError::InvalidOperation {
                        op: "switch",
                        reason: format!(
                            "duplicate case value `{}`",
                            self.value_str(Value::Const(value))
                        ),
                    });
                }
            }
            operands.push(Value::Const(value));
            operands.push(Value::Block(dest));
        }
        self.push_inst(block, InstKind::Switch, Idx::VOID, &operands)
    }

    pub fn build_unreachable(&mut self, block: BlockId) -> Result<InstId> {
        self.push_inst(block, InstKind::Unreachable, Idx::VOID, &[])
    }

    // ── Checks ──────────────────────────────────────────────────────

    fn expect_pointer_operand(&self, op: &'static str, value: Value) -> Result<()> {
        if self.types.tag(self.type_of(value)) == Tag::Pointer {
            Ok(())
        } else {
            Err(IrError::InvalidOperation {
                op,
                reason: format!("expected a pointer, found `{}`", self.value_str(value)),
            })
        }
    }

    fn expect_same_function(
        &self,
        op: &'static str,
        func: FuncId,
        dest: BlockId,
    ) -> Result<()> {
        if self.block_parent(dest) == func {
            Ok(())
        } else {
            Err(IrError::InvalidOperation {
                op,
                reason: format!(
                    "block `{}` belongs to another function",
                    self.ident(Value::Block(dest))
                ),
            })
        }
    }
}

#[cfg(test)]
mod tests;
