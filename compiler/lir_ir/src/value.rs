//! The Value and Named contracts.
//!
//! A [`Value`] is anything that can sit in an operand slot: a constant, a
//! function parameter, a basic block (as a branch target) or the result of
//! an instruction. Its type is fixed when it is created. Its identifier is
//! derived from the current name on every read and never cached, so a
//! rename is visible to every later print.
//!
//! [`Named`] is the subset with a mutable name: the four kinds of global
//! entity (addressed through their `GlobalAddress` constant), parameters,
//! blocks and value-producing instructions.

use std::fmt;

use lir_types::{syntax, Idx};

use crate::constant::Constant;
use crate::ids::{AliasId, BlockId, ConstId, FuncId, GlobalId, IFuncId, InstId, ParamId};
use crate::module::Module;

/// An operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Value {
    Const(ConstId),
    Param(ParamId),
    Block(BlockId),
    Inst(InstId),
}

impl Value {
    /// Whether the value is a compile-time constant.
    #[inline]
    pub fn is_constant(self) -> bool {
        matches!(self, Self::Const(_))
    }

    /// The constant id, if the value is a constant.
    #[inline]
    pub fn as_const(self) -> Option<ConstId> {
        match self {
            Self::Const(id) => Some(id),
            _ => None,
        }
    }
}

impl From<ConstId> for Value {
    fn from(id: ConstId) -> Self {
        Self::Const(id)
    }
}

impl From<ParamId> for Value {
    fn from(id: ParamId) -> Self {
        Self::Param(id)
    }
}

impl From<BlockId> for Value {
    fn from(id: BlockId) -> Self {
        Self::Block(id)
    }
}

impl From<InstId> for Value {
    fn from(id: InstId) -> Self {
        Self::Inst(id)
    }
}

/// A module-level entity whose address is a constant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GlobalRef {
    Var(GlobalId),
    Func(FuncId),
    Alias(AliasId),
    IFunc(IFuncId),
}

impl From<GlobalId> for GlobalRef {
    fn from(id: GlobalId) -> Self {
        Self::Var(id)
    }
}

impl From<FuncId> for GlobalRef {
    fn from(id: FuncId) -> Self {
        Self::Func(id)
    }
}

impl From<AliasId> for GlobalRef {
    fn from(id: AliasId) -> Self {
        Self::Alias(id)
    }
}

impl From<IFuncId> for GlobalRef {
    fn from(id: IFuncId) -> Self {
        Self::IFunc(id)
    }
}

/// A value with a mutable, externally visible name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Named {
    Global(GlobalRef),
    Param(ParamId),
    Block(BlockId),
    Inst(InstId),
}

macro_rules! named_global_from {
    ($($id:ty),* $(,)?) => {
        $(
            impl From<$id> for Named {
                fn from(id: $id) -> Self {
                    Self::Global(id.into())
                }
            }
        )*
    };
}

named_global_from!(GlobalId, FuncId, AliasId, IFuncId);

impl From<GlobalRef> for Named {
    fn from(global: GlobalRef) -> Self {
        Self::Global(global)
    }
}

impl From<ParamId> for Named {
    fn from(id: ParamId) -> Self {
        Self::Param(id)
    }
}

impl From<BlockId> for Named {
    fn from(id: BlockId) -> Self {
        Self::Block(id)
    }
}

impl From<InstId> for Named {
    fn from(id: InstId) -> Self {
        Self::Inst(id)
    }
}

/// Name storage shared by every named entity.
///
/// `number` is filled in by [`Module::number_values`] for anonymous values
/// and cleared whenever the name changes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct NameSlot {
    pub(crate) name: String,
    pub(crate) number: Option<u32>,
}

impl NameSlot {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            number: None,
        }
    }

    /// Append `sigil` plus the name, the allocated number, or `<badref>`.
    pub(crate) fn push_ident(&self, buf: &mut String, sigil: char) {
        if !self.name.is_empty() {
            syntax::push_name(buf, sigil, &self.name);
        } else if let Some(number) = self.number {
            buf.push(sigil);
            buf.push_str(&number.to_string());
        } else {
            buf.push_str("<badref>");
        }
    }
}

// ── Value contract ──────────────────────────────────────────────────

impl Module {
    /// Type of a value. Fixed at construction.
    pub fn type_of(&self, value: Value) -> Idx {
        match value {
            Value::Const(id) => self.consts.ty(id),
            Value::Param(id) => self.params[id.index()].ty,
            Value::Block(_) => Idx::LABEL,
            Value::Inst(id) => self.insts[id.index()].ty,
        }
    }

    /// Bare operand form of a value: `%x`, `@g`, `42`, `null`, ...
    pub fn ident(&self, value: Value) -> String {
        let mut buf = String::new();
        self.ident_into(value, &mut buf);
        buf
    }

    /// Append the bare operand form of a value to `buf`.
    pub fn ident_into(&self, value: Value, buf: &mut String) {
        match value {
            Value::Const(id) => self.const_ident_into(id, buf),
            Value::Param(id) => self.params[id.index()].name.push_ident(buf, '%'),
            Value::Block(id) => self.blocks[id.index()].name.push_ident(buf, '%'),
            Value::Inst(id) => self.insts[id.index()].name.push_ident(buf, '%'),
        }
    }

    /// Append `<type> <ident>` to `buf`.
    pub fn typed_ident_into(&self, value: Value, buf: &mut String) {
        self.types.format_type_into(self.type_of(value), buf);
        buf.push(' ');
        self.ident_into(value, buf);
    }

    /// The `<type> <ident>` form of a value, as a `Display` adapter.
    pub fn display(&self, value: Value) -> ValueDisplay<'_> {
        ValueDisplay {
            module: self,
            value,
        }
    }

    // ── Named contract ──────────────────────────────────────────────

    /// View a value through the Named contract.
    ///
    /// Constants are named only when they are the address of a global
    /// entity. Instructions producing `void` have no name.
    pub fn named(&self, value: Value) -> Option<Named> {
        match value {
            Value::Const(id) => match self.consts.get(id) {
                Constant::GlobalAddress(global) => Some(Named::Global(*global)),
                _ => None,
            },
            Value::Param(id) => Some(Named::Param(id)),
            Value::Block(id) => Some(Named::Block(id)),
            Value::Inst(id) => (self.insts[id.index()].ty != Idx::VOID).then_some(Named::Inst(id)),
        }
    }

    /// The value a named entity is used as.
    pub fn value_of(&self, named: Named) -> Value {
        match named {
            Named::Global(global) => Value::Const(self.global_address(global)),
            Named::Param(id) => Value::Param(id),
            Named::Block(id) => Value::Block(id),
            Named::Inst(id) => Value::Inst(id),
        }
    }

    /// Current name. Empty for anonymous values.
    pub fn name(&self, named: Named) -> &str {
        &self.name_slot(named).name
    }

    /// Rename a value. Every later `ident` reflects the new name.
    pub fn set_name(&mut self, named: Named, name: impl Into<String>) {
        let name = name.into();
        let slot = self.name_slot_mut(named);
        tracing::debug!(?named, old = %slot.name, new = %name, "rename");
        slot.name = name;
        slot.number = None;
    }

    pub(crate) fn name_slot(&self, named: Named) -> &NameSlot {
        match named {
            Named::Global(GlobalRef::Var(id)) => &self.globals[id.index()].name,
            Named::Global(GlobalRef::Func(id)) => &self.funcs[id.index()].name,
            Named::Global(GlobalRef::Alias(id)) => &self.aliases[id.index()].name,
            Named::Global(GlobalRef::IFunc(id)) => &self.ifuncs[id.index()].name,
            Named::Param(id) => &self.params[id.index()].name,
            Named::Block(id) => &self.blocks[id.index()].name,
            Named::Inst(id) => &self.insts[id.index()].name,
        }
    }

    pub(crate) fn name_slot_mut(&mut self, named: Named) -> &mut NameSlot {
        match named {
            Named::Global(GlobalRef::Var(id)) => &mut self.globals[id.index()].name,
            Named::Global(GlobalRef::Func(id)) => &mut self.funcs[id.index()].name,
            Named::Global(GlobalRef::Alias(id)) => &mut self.aliases[id.index()].name,
            Named::Global(GlobalRef::IFunc(id)) => &mut self.ifuncs[id.index()].name,
            Named::Param(id) => &mut self.params[id.index()].name,
            Named::Block(id) => &mut self.blocks[id.index()].name,
            Named::Inst(id) => &mut self.insts[id.index()].name,
        }
    }

    /// Append the `@` identifier of a global entity.
    pub(crate) fn global_ident_into(&self, global: GlobalRef, buf: &mut String) {
        self.name_slot(Named::Global(global)).push_ident(buf, '@');
    }
}

/// `Display` adapter printing a value as `<type> <ident>`.
pub struct ValueDisplay<'a> {
    module: &'a Module,
    value: Value,
}

impl fmt::Display for ValueDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = String::new();
        self.module.typed_ident_into(self.value, &mut buf);
        f.write_str(&buf)
    }
}
