//! Constant printing in the textual IR syntax.

use lir_types::{syntax, Idx};
use num_traits::Zero;

use super::{float, ConstExpr, Constant, ExprOp};
use crate::ids::ConstId;
use crate::module::Module;
use crate::value::{GlobalRef, Value};

impl Module {
    /// Append the bare operand form of a constant.
    pub(crate) fn const_ident_into(&self, id: ConstId, buf: &mut String) {
        match self.consts.get(id) {
            Constant::Int { ty, value } => {
                if *ty == Idx::I1 {
                    buf.push_str(if value.is_zero() { "false" } else { "true" });
                } else {
                    buf.push_str(&value.to_string());
                }
            }
            Constant::Float { ty, bits } => {
                float::push_float(buf, self.types.tag(*ty), f64::from_bits(*bits));
            }
            Constant::Null { .. } => buf.push_str("null"),
            Constant::NoneToken => buf.push_str("none"),
            Constant::Struct { ty, fields } => {
                let packed = self.types.struct_is_packed(*ty);
                if fields.is_empty() {
                    buf.push_str(if packed { "<{}>" } else { "{}" });
                } else {
                    buf.push_str(if packed { "<{ " } else { "{ " });
                    self.push_const_list(fields, buf);
                    buf.push_str(if packed { " }>" } else { " }" });
                }
            }
            Constant::Array { elems, .. } => {
                buf.push('[');
                self.push_const_list(elems, buf);
                buf.push(']');
            }
            Constant::CharArray { bytes, .. } => {
                buf.push_str("c\"");
                syntax::push_escaped(buf, bytes);
                buf.push('"');
            }
            Constant::Vector { elems, .. } => {
                buf.push('<');
                self.push_const_list(elems, buf);
                buf.push('>');
            }
            Constant::ZeroInitializer { .. } => buf.push_str("zeroinitializer"),
            Constant::Undef { .. } => buf.push_str("undef"),
            Constant::Poison { .. } => buf.push_str("poison"),
            Constant::BlockAddress { func, block } => {
                buf.push_str("blockaddress(");
                self.global_ident_into(GlobalRef::Func(*func), buf);
                buf.push_str(", ");
                self.ident_into(Value::Block(*block), buf);
                buf.push(')');
            }
            Constant::Expression(expr) => self.push_expr(expr, buf),
            Constant::GlobalAddress(global) => self.global_ident_into(*global, buf),
        }
    }

    /// `<type> <ident>` items separated by `, `.
    fn push_const_list(&self, ids: &[ConstId], buf: &mut String) {
        for (i, &id) in ids.iter().enumerate() {
            if i > 0 {
                buf.push_str(", ");
            }
            self.typed_ident_into(Value::Const(id), buf);
        }
    }

    fn push_expr(&self, expr: &ConstExpr, buf: &mut String) {
        buf.push_str(expr.op.name());
        buf.push(' ');
        match expr.op {
            ExprOp::Binary(_, flags) => {
                flags.push_to(buf);
                buf.push('(');
                self.push_const_list(&expr.operands, buf);
                buf.push(')');
            }
            ExprOp::Cast(_, to) => {
                buf.push('(');
                self.push_const_list(&expr.operands, buf);
                buf.push_str(" to ");
                self.types.format_type_into(to, buf);
                buf.push(')');
            }
            ExprOp::ICmp(_) | ExprOp::FCmp(_) => {
                buf.push_str(expr.op.predicate().unwrap_or_default());
                buf.push_str(" (");
                self.push_const_list(&expr.operands, buf);
                buf.push(')');
            }
            ExprOp::GetElementPtr { source, inbounds } => {
                if inbounds {
                    buf.push_str("inbounds ");
                }
                buf.push('(');
                self.types.format_type_into(source, buf);
                buf.push_str(", ");
                self.push_const_list(&expr.operands, buf);
                buf.push(')');
            }
            ExprOp::FNeg
            | ExprOp::Select
            | ExprOp::ExtractElement
            | ExprOp::InsertElement
            | ExprOp::ShuffleVector => {
                buf.push('(');
                self.push_const_list(&expr.operands, buf);
                buf.push(')');
            }
        }
    }
}
