//! Whole-module printing.
//!
//! Order: header, named struct definitions, global variables, aliases,
//! indirect functions, then function declarations and definitions. Anonymous
//! values print as `<badref>` until [`Module::number_values`] has run.

#![allow(clippy::format_push_string)] // Formatting prioritizes clarity over allocation

use std::fmt;

use lir_types::{syntax, Idx};

use super::{Linkage, Module};
use crate::ids::{AliasId, FuncId, GlobalId, IFuncId};
use crate::value::{GlobalRef, Value};

/// Append a blank line and `lines`, unless there are none.
fn push_section(buf: &mut String, lines: Vec<String>) {
    if lines.is_empty() {
        return;
    }
    buf.push('\n');
    for line in lines {
        buf.push_str(&line);
        buf.push('\n');
    }
}

fn push_linkage(buf: &mut String, linkage: Linkage) {
    if linkage != Linkage::External {
        buf.push_str(linkage.keyword());
        buf.push(' ');
    }
}

impl Module {
    /// Print the module in the textual IR syntax.
    pub fn print(&self) -> String {
        let mut buf = String::new();
        buf.push_str("; ModuleID = '");
        syntax::push_escaped(&mut buf, self.id.as_bytes());
        buf.push_str("'\n");

        let structs = self
            .types
            .named_structs()
            .map(|ty| self.types.format_struct_definition(ty))
            .collect();
        push_section(&mut buf, structs);
        push_section(&mut buf, self.globals().map(|g| self.global_line(g)).collect());
        push_section(
            &mut buf,
            (0..self.aliases.len()).map(|i| self.alias_line(i)).collect(),
        );
        push_section(
            &mut buf,
            (0..self.ifuncs.len()).map(|i| self.ifunc_line(i)).collect(),
        );

        for func in self.functions() {
            buf.push('\n');
            self.push_function(func, &mut buf);
        }
        buf
    }

    fn global_line(&self, id: GlobalId) -> String {
        let global = &self.globals[id.index()];
        let mut buf = String::new();
        self.global_ident_into(GlobalRef::Var(id), &mut buf);
        buf.push_str(" = ");
        if global.init.is_none() && global.linkage == Linkage::External {
            buf.push_str("external ");
        } else {
            push_linkage(&mut buf, global.linkage);
        }
        if global.addrspace != 0 {
            buf.push_str(&format!("addrspace({}) ", global.addrspace));
        }
        buf.push_str(if global.is_constant { "constant " } else { "global " });
        self.types.format_type_into(global.content_ty, &mut buf);
        if let Some(init) = global.init {
            buf.push(' ');
            self.ident_into(Value::Const(init), &mut buf);
        }
        buf
    }

    fn alias_line(&self, index: usize) -> String {
        let alias = &self.aliases[index];
        let mut buf = String::new();
        self.global_ident_into(GlobalRef::Alias(AliasId::from_index(index)), &mut buf);
        buf.push_str(" = ");
        push_linkage(&mut buf, alias.linkage);
        buf.push_str("alias ");
        self.types.format_type_into(alias.content_ty, &mut buf);
        buf.push_str(", ");
        self.typed_ident_into(Value::Const(alias.aliasee), &mut buf);
        buf
    }

    fn ifunc_line(&self, index: usize) -> String {
        let ifunc = &self.ifuncs[index];
        let mut buf = String::new();
        self.global_ident_into(GlobalRef::IFunc(IFuncId::from_index(index)), &mut buf);
        buf.push_str(" = ");
        push_linkage(&mut buf, ifunc.linkage);
        buf.push_str("ifunc ");
        self.types.format_type_into(ifunc.sig, &mut buf);
        buf.push_str(", ");
        self.typed_ident_into(Value::Const(ifunc.resolver), &mut buf);
        buf
    }

    fn push_function(&self, id: FuncId, buf: &mut String) {
        let func = &self.funcs[id.index()];
        let declaration = func.is_declaration();
        buf.push_str(if declaration { "declare " } else { "define " });
        push_linkage(buf, func.linkage);
        let ret = self.types.function_return(func.sig).unwrap_or(Idx::VOID);
        self.types.format_type_into(ret, buf);
        buf.push(' ');
        self.global_ident_into(GlobalRef::Func(id), buf);
        buf.push('(');
        for (i, &param) in func.params.iter().enumerate() {
            if i > 0 {
                buf.push_str(", ");
            }
            if declaration {
                self.types.format_type_into(self.params[param.index()].ty, buf);
            } else {
                self.typed_ident_into(Value::Param(param), buf);
            }
        }
        if self.types.function_is_variadic(func.sig) {
            buf.push_str(if func.params.is_empty() { "..." } else { ", ..." });
        }
        buf.push(')');
        if declaration {
            buf.push('\n');
            return;
        }

        buf.push_str(" {\n");
        for (i, &block) in func.blocks.iter().enumerate() {
            if i > 0 {
                buf.push('\n');
            }
            let slot = &self.blocks[block.index()].name;
            if !slot.name.is_empty() {
                if syntax::needs_quotes(&slot.name) {
                    buf.push('"');
                    syntax::push_escaped(buf, slot.name.as_bytes());
                    buf.push('"');
                } else {
                    buf.push_str(&slot.name);
                }
                buf.push_str(":\n");
            } else if let Some(number) = slot.number {
                buf.push_str(&format!("{number}:\n"));
            }
            for &inst in &self.blocks[block.index()].insts {
                buf.push_str("  ");
                self.format_inst_into(inst, buf);
                buf.push('\n');
            }
        }
        buf.push_str("}\n");
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.print())
    }
}
