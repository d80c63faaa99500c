//! The module arena.
//!
//! A [`Module`] owns every entity of one translation unit: the type pool,
//! the constant arena, global variables, functions, aliases, indirect
//! functions, and the parameters, blocks and instructions of its function
//! bodies. Entities refer to each other by id, so back-references (a block
//! naming its function, an instruction naming its block) are plain data.
//!
//! Adding a global entity also interns its `GlobalAddress` constant, which
//! is how the entity is used as an operand.

mod numbering;
mod print;

use lir_types::{Idx, Pool, Tag};

use crate::constant::{ConstArena, Constant};
use crate::error::{IrError, Result};
use crate::ids::{AliasId, BlockId, ConstId, FuncId, GlobalId, IFuncId, InstId, ParamId};
use crate::inst::InstData;
use crate::value::{GlobalRef, NameSlot, Named, Value};

/// Linkage of a global entity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Linkage {
    #[default]
    External,
    Private,
    Internal,
    AvailableExternally,
    LinkOnce,
    LinkOnceOdr,
    Weak,
    WeakOdr,
    Common,
    Appending,
    ExternWeak,
}

impl Linkage {
    /// Keyword in the textual IR. Empty for the default external linkage.
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::External => "",
            Self::Private => "private",
            Self::Internal => "internal",
            Self::AvailableExternally => "available_externally",
            Self::LinkOnce => "linkonce",
            Self::LinkOnceOdr => "linkonce_odr",
            Self::Weak => "weak",
            Self::WeakOdr => "weak_odr",
            Self::Common => "common",
            Self::Appending => "appending",
            Self::ExternWeak => "extern_weak",
        }
    }
}

// ── Entities ────────────────────────────────────────────────────────

/// A global variable.
#[derive(Clone, Debug)]
pub struct GlobalVar {
    pub(crate) name: NameSlot,
    pub(crate) content_ty: Idx,
    pub(crate) init: Option<ConstId>,
    pub(crate) is_constant: bool,
    pub(crate) linkage: Linkage,
    pub(crate) addrspace: u32,
    pub(crate) addr: ConstId,
}

impl GlobalVar {
    /// Type of the stored value.
    pub fn content_type(&self) -> Idx {
        self.content_ty
    }

    /// Initializer; `None` for an external declaration.
    pub fn initializer(&self) -> Option<ConstId> {
        self.init
    }

    /// Whether the variable is immutable (`constant` rather than `global`).
    pub fn is_constant(&self) -> bool {
        self.is_constant
    }

    pub fn linkage(&self) -> Linkage {
        self.linkage
    }

    pub fn addrspace(&self) -> u32 {
        self.addrspace
    }

    /// The `GlobalAddress` constant of this variable.
    pub fn address(&self) -> ConstId {
        self.addr
    }
}

/// A function declaration or definition.
#[derive(Clone, Debug)]
pub struct Function {
    pub(crate) name: NameSlot,
    pub(crate) sig: Idx,
    pub(crate) linkage: Linkage,
    pub(crate) params: Vec<ParamId>,
    pub(crate) blocks: Vec<BlockId>,
    pub(crate) addr: ConstId,
}

impl Function {
    /// The function type.
    pub fn signature(&self) -> Idx {
        self.sig
    }

    pub fn linkage(&self) -> Linkage {
        self.linkage
    }

    pub fn params(&self) -> &[ParamId] {
        &self.params
    }

    /// Blocks in layout order. The first is the entry block.
    pub fn blocks(&self) -> &[BlockId] {
        &self.blocks
    }

    /// A function without blocks is a declaration.
    pub fn is_declaration(&self) -> bool {
        self.blocks.is_empty()
    }

    /// The `GlobalAddress` constant of this function.
    pub fn address(&self) -> ConstId {
        self.addr
    }
}

/// A second name for a pointer constant.
#[derive(Clone, Debug)]
pub struct Alias {
    pub(crate) name: NameSlot,
    pub(crate) content_ty: Idx,
    pub(crate) aliasee: ConstId,
    pub(crate) linkage: Linkage,
    pub(crate) addr: ConstId,
}

impl Alias {
    pub fn content_type(&self) -> Idx {
        self.content_ty
    }

    pub fn aliasee(&self) -> ConstId {
        self.aliasee
    }

    pub fn linkage(&self) -> Linkage {
        self.linkage
    }

    pub fn address(&self) -> ConstId {
        self.addr
    }
}

/// A function whose address is picked at load time by a resolver.
#[derive(Clone, Debug)]
pub struct IFunc {
    pub(crate) name: NameSlot,
    pub(crate) sig: Idx,
    pub(crate) resolver: ConstId,
    pub(crate) linkage: Linkage,
    pub(crate) addr: ConstId,
}

impl IFunc {
    pub fn signature(&self) -> Idx {
        self.sig
    }

    pub fn resolver(&self) -> ConstId {
        self.resolver
    }

    pub fn linkage(&self) -> Linkage {
        self.linkage
    }

    pub fn address(&self) -> ConstId {
        self.addr
    }
}

#[derive(Clone, Debug)]
pub(crate) struct ParamData {
    pub(crate) name: NameSlot,
    pub(crate) ty: Idx,
    pub(crate) func: FuncId,
}

#[derive(Clone, Debug)]
pub(crate) struct BlockData {
    pub(crate) name: NameSlot,
    pub(crate) func: FuncId,
    pub(crate) insts: Vec<InstId>,
}

// ── Module ──────────────────────────────────────────────────────────

/// One translation unit and every value in it.
#[derive(Clone, Debug)]
pub struct Module {
    pub(crate) id: String,
    pub(crate) types: Pool,
    pub(crate) consts: ConstArena,
    pub(crate) globals: Vec<GlobalVar>,
    pub(crate) funcs: Vec<Function>,
    pub(crate) aliases: Vec<Alias>,
    pub(crate) ifuncs: Vec<IFunc>,
    pub(crate) params: Vec<ParamData>,
    pub(crate) blocks: Vec<BlockData>,
    pub(crate) insts: Vec<InstData>,
}

impl Default for Module {
    fn default() -> Self {
        Self::new("")
    }
}

impl Module {
    /// Create an empty module. The sentinel constants are already present.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            types: Pool::new(),
            consts: ConstArena::new(),
            globals: Vec::new(),
            funcs: Vec::new(),
            aliases: Vec::new(),
            ifuncs: Vec::new(),
            params: Vec::new(),
            blocks: Vec::new(),
            insts: Vec::new(),
        }
    }

    /// The module identifier printed in the `; ModuleID` header.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn types(&self) -> &Pool {
        &self.types
    }

    /// Mutable access to the type pool, for building types.
    pub fn types_mut(&mut self) -> &mut Pool {
        &mut self.types
    }

    // ── Global variables ────────────────────────────────────────────

    /// Add a global variable in address space 0.
    pub fn add_global(
        &mut self,
        name: impl Into<String>,
        content_ty: Idx,
        init: Option<ConstId>,
    ) -> Result<GlobalId> {
        self.add_global_in(name, content_ty, init, 0)
    }

    /// Add a global variable in the given address space.
    pub fn add_global_in(
        &mut self,
        name: impl Into<String>,
        content_ty: Idx,
        init: Option<ConstId>,
        addrspace: u32,
    ) -> Result<GlobalId> {
        if !self.types.is_sized(content_ty) {
            return Err(IrError::InvalidConstantType {
                kind: "global variable",
                ty: self.type_str(content_ty),
            });
        }
        if let Some(init) = init {
            self.expect_type(content_ty, self.consts.ty(init))?;
        }
        let id = GlobalId::from_index(self.globals.len());
        let ptr = self.types.pointer(addrspace);
        let addr = self
            .consts
            .intern(Constant::GlobalAddress(GlobalRef::Var(id)), ptr);
        self.globals.push(GlobalVar {
            name: NameSlot::new(name),
            content_ty,
            init,
            is_constant: false,
            linkage: Linkage::External,
            addrspace,
            addr,
        });
        Ok(id)
    }

    /// Replace the initializer of a global variable.
    pub fn set_initializer(&mut self, global: GlobalId, init: Option<ConstId>) -> Result<()> {
        if let Some(init) = init {
            self.expect_type(self.globals[global.index()].content_ty, self.consts.ty(init))?;
        }
        self.globals[global.index()].init = init;
        Ok(())
    }

    /// Mark a global variable as immutable or mutable.
    pub fn set_global_constant(&mut self, global: GlobalId, is_constant: bool) {
        self.globals[global.index()].is_constant = is_constant;
    }

    pub fn global(&self, id: GlobalId) -> &GlobalVar {
        &self.globals[id.index()]
    }

    /// Global variables in creation order.
    pub fn globals(&self) -> impl Iterator<Item = GlobalId> + '_ {
        (0..self.globals.len()).map(GlobalId::from_index)
    }

    // ── Functions ───────────────────────────────────────────────────

    /// Add a function with the given function type. Parameters are created
    /// anonymous; the function is a declaration until a block is added.
    pub fn add_function(&mut self, name: impl Into<String>, sig: Idx) -> Result<FuncId> {
        let Some(param_tys) = self.types.function_params(sig) else {
            return Err(IrError::ExpectedFunctionType {
                ty: self.type_str(sig),
            });
        };
        let id = FuncId::from_index(self.funcs.len());
        let params = param_tys
            .into_iter()
            .map(|ty| {
                let param = ParamId::from_index(self.params.len());
                self.params.push(ParamData {
                    name: NameSlot::default(),
                    ty,
                    func: id,
                });
                param
            })
            .collect();
        let addr = self
            .consts
            .intern(Constant::GlobalAddress(GlobalRef::Func(id)), Idx::PTR);
        self.funcs.push(Function {
            name: NameSlot::new(name),
            sig,
            linkage: Linkage::External,
            params,
            blocks: Vec::new(),
            addr,
        });
        Ok(id)
    }

    pub fn function(&self, id: FuncId) -> &Function {
        &self.funcs[id.index()]
    }

    /// Functions in creation order.
    pub fn functions(&self) -> impl Iterator<Item = FuncId> + '_ {
        (0..self.funcs.len()).map(FuncId::from_index)
    }

    /// The `index`th parameter of a function.
    pub fn param(&self, func: FuncId, index: usize) -> Option<ParamId> {
        self.funcs[func.index()].params.get(index).copied()
    }

    /// Function owning a parameter.
    pub fn param_parent(&self, param: ParamId) -> FuncId {
        self.params[param.index()].func
    }

    /// Append a basic block to a function.
    pub fn add_block(&mut self, func: FuncId, name: impl Into<String>) -> BlockId {
        let id = BlockId::from_index(self.blocks.len());
        self.blocks.push(BlockData {
            name: NameSlot::new(name),
            func,
            insts: Vec::new(),
        });
        self.funcs[func.index()].blocks.push(id);
        id
    }

    /// Function owning a block.
    pub fn block_parent(&self, block: BlockId) -> FuncId {
        self.blocks[block.index()].func
    }

    /// Instructions of a block in order.
    pub fn block_insts(&self, block: BlockId) -> &[InstId] {
        &self.blocks[block.index()].insts
    }

    // ── Aliases and indirect functions ──────────────────────────────

    /// Add an alias of `content_ty` for a pointer-typed constant.
    pub fn add_alias(
        &mut self,
        name: impl Into<String>,
        content_ty: Idx,
        aliasee: ConstId,
    ) -> Result<AliasId> {
        let aliasee_ty = self.expect_pointer(aliasee)?;
        let addrspace = self.types.pointer_addrspace(aliasee_ty).unwrap_or_default();
        let id = AliasId::from_index(self.aliases.len());
        let ptr = self.types.pointer(addrspace);
        let addr = self
            .consts
            .intern(Constant::GlobalAddress(GlobalRef::Alias(id)), ptr);
        self.aliases.push(Alias {
            name: NameSlot::new(name),
            content_ty,
            aliasee,
            linkage: Linkage::External,
            addr,
        });
        Ok(id)
    }

    pub fn alias(&self, id: AliasId) -> &Alias {
        &self.aliases[id.index()]
    }

    /// Add an indirect function of type `sig` resolved by `resolver`.
    pub fn add_ifunc(
        &mut self,
        name: impl Into<String>,
        sig: Idx,
        resolver: ConstId,
    ) -> Result<IFuncId> {
        if self.types.tag(sig) != Tag::Function {
            return Err(IrError::ExpectedFunctionType {
                ty: self.type_str(sig),
            });
        }
        self.expect_pointer(resolver)?;
        let id = IFuncId::from_index(self.ifuncs.len());
        let addr = self
            .consts
            .intern(Constant::GlobalAddress(GlobalRef::IFunc(id)), Idx::PTR);
        self.ifuncs.push(IFunc {
            name: NameSlot::new(name),
            sig,
            resolver,
            linkage: Linkage::External,
            addr,
        });
        Ok(id)
    }

    pub fn ifunc(&self, id: IFuncId) -> &IFunc {
        &self.ifuncs[id.index()]
    }

    // ── Any global entity ───────────────────────────────────────────

    /// The `GlobalAddress` constant of a global entity.
    pub fn global_address(&self, global: GlobalRef) -> ConstId {
        match global {
            GlobalRef::Var(id) => self.globals[id.index()].addr,
            GlobalRef::Func(id) => self.funcs[id.index()].addr,
            GlobalRef::Alias(id) => self.aliases[id.index()].addr,
            GlobalRef::IFunc(id) => self.ifuncs[id.index()].addr,
        }
    }

    pub fn linkage(&self, global: GlobalRef) -> Linkage {
        match global {
            GlobalRef::Var(id) => self.globals[id.index()].linkage,
            GlobalRef::Func(id) => self.funcs[id.index()].linkage,
            GlobalRef::Alias(id) => self.aliases[id.index()].linkage,
            GlobalRef::IFunc(id) => self.ifuncs[id.index()].linkage,
        }
    }

    pub fn set_linkage(&mut self, global: GlobalRef, linkage: Linkage) {
        match global {
            GlobalRef::Var(id) => self.globals[id.index()].linkage = linkage,
            GlobalRef::Func(id) => self.funcs[id.index()].linkage = linkage,
            GlobalRef::Alias(id) => self.aliases[id.index()].linkage = linkage,
            GlobalRef::IFunc(id) => self.ifuncs[id.index()].linkage = linkage,
        }
    }

    /// Find a global entity by name.
    pub fn lookup_global(&self, name: &str) -> Option<GlobalRef> {
        let vars = self.globals().map(GlobalRef::Var);
        let funcs = self.functions().map(GlobalRef::Func);
        let aliases = (0..self.aliases.len()).map(|i| GlobalRef::Alias(AliasId::from_index(i)));
        let ifuncs = (0..self.ifuncs.len()).map(|i| GlobalRef::IFunc(IFuncId::from_index(i)));
        vars.chain(funcs)
            .chain(aliases)
            .chain(ifuncs)
            .find(|&global| !name.is_empty() && self.name(Named::Global(global)) == name)
    }

    // ── Error rendering ─────────────────────────────────────────────

    pub(crate) fn type_str(&self, ty: Idx) -> String {
        self.types.format_type(ty)
    }

    pub(crate) fn value_str(&self, value: Value) -> String {
        let mut buf = String::new();
        self.typed_ident_into(value, &mut buf);
        buf
    }

    /// `Ok` if `found == expected`, `TypeMismatch` otherwise.
    pub(crate) fn expect_type(&self, expected: Idx, found: Idx) -> Result<()> {
        if expected == found {
            Ok(())
        } else {
            Err(IrError::TypeMismatch {
                expected: self.type_str(expected),
                found: self.type_str(found),
            })
        }
    }

    fn expect_pointer(&self, constant: ConstId) -> Result<Idx> {
        let ty = self.consts.ty(constant);
        if self.types.tag(ty) == Tag::Pointer {
            Ok(ty)
        } else {
            Err(IrError::TypeMismatch {
                expected: "ptr".to_owned(),
                found: self.type_str(ty),
            })
        }
    }
}

#[cfg(test)]
mod tests;
