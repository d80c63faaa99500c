//! Instruction printing in the textual IR syntax.

use lir_types::Idx;

use super::InstKind;
use crate::ids::InstId;
use crate::module::Module;
use crate::value::Value;

impl Module {
    /// Format one instruction without indentation.
    pub fn format_inst(&self, inst: InstId) -> String {
        let mut buf = String::new();
        self.format_inst_into(inst, &mut buf);
        buf
    }

    /// Format one instruction into an existing buffer.
    pub fn format_inst_into(&self, inst: InstId, buf: &mut String) {
        let data = &self.insts[inst.index()];
        let ops = &data.operands;
        if data.ty != Idx::VOID {
            self.ident_into(Value::Inst(inst), buf);
            buf.push_str(" = ");
        }
        buf.push_str(data.kind.name());
        match data.kind {
            InstKind::Binary(_, flags) => {
                buf.push(' ');
                flags.push_to(buf);
                self.typed_ident_into(ops[0], buf);
                buf.push_str(", ");
                self.ident_into(ops[1], buf);
            }
            InstKind::ICmp(_) | InstKind::FCmp(_) => {
                buf.push(' ');
                buf.push_str(data.kind.predicate().unwrap_or_default());
                buf.push(' ');
                self.typed_ident_into(ops[0], buf);
                buf.push_str(", ");
                self.ident_into(ops[1], buf);
            }
            InstKind::Cast(_) => {
                buf.push(' ');
                self.typed_ident_into(ops[0], buf);
                buf.push_str(" to ");
                self.types.format_type_into(data.ty, buf);
            }
            InstKind::Alloca { allocated } => {
                buf.push(' ');
                self.types.format_type_into(allocated, buf);
            }
            InstKind::Load => {
                buf.push(' ');
                self.types.format_type_into(data.ty, buf);
                buf.push_str(", ");
                self.typed_ident_into(ops[0], buf);
            }
            InstKind::Call { callee_ty } => {
                buf.push(' ');
                // Variadic callees print their full type, others only the return type.
                if self.types.function_is_variadic(callee_ty) {
                    self.types.format_type_into(callee_ty, buf);
                } else {
                    self.types.format_type_into(data.ty, buf);
                }
                buf.push(' ');
                self.ident_into(ops[0], buf);
                buf.push('(');
                self.push_typed_list(&ops[1..], buf);
                buf.push(')');
            }
            InstKind::Phi => {
                buf.push(' ');
                self.types.format_type_into(data.ty, buf);
                for (i, pair) in ops.chunks(2).enumerate() {
                    buf.push_str(if i == 0 { " [ " } else { ", [ " });
                    self.ident_into(pair[0], buf);
                    buf.push_str(", ");
                    self.ident_into(pair[1], buf);
                    buf.push_str(" ]");
                }
            }
            InstKind::Ret => {
                buf.push(' ');
                if let Some(&value) = ops.first() {
                    self.typed_ident_into(value, buf);
                } else {
                    buf.push_str("void");
                }
            }
            InstKind::Switch => {
                buf.push(' ');
                self.typed_ident_into(ops[0], buf);
                buf.push_str(", ");
                self.typed_ident_into(ops[1], buf);
                buf.push_str(" [");
                for case in ops[2..].chunks(2) {
                    buf.push_str("\n    ");
                    self.typed_ident_into(case[0], buf);
                    buf.push_str(", ");
                    self.typed_ident_into(case[1], buf);
                }
                buf.push_str("\n  ]");
            }
            InstKind::FNeg
            | InstKind::Select
            | InstKind::Store
            | InstKind::Br
            | InstKind::CondBr => {
                buf.push(' ');
                self.push_typed_list(ops, buf);
            }
            InstKind::Unreachable => {}
        }
    }

    fn push_typed_list(&self, values: &[Value], buf: &mut String) {
        for (i, &value) in values.iter().enumerate() {
            if i > 0 {
                buf.push_str(", ");
            }
            self.typed_ident_into(value, buf);
        }
    }
}
