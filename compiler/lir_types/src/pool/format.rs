//! Type formatting in the textual IR syntax.

#![allow(clippy::format_push_string)] // Formatting prioritizes clarity over allocation

use std::fmt;

use super::Pool;
use crate::{syntax, Idx, Tag};

impl Pool {
    /// Format a type as it appears in the textual IR.
    pub fn format_type(&self, idx: Idx) -> String {
        let mut buf = String::new();
        self.format_type_into(idx, &mut buf);
        buf
    }

    /// Format a type into an existing string buffer.
    pub fn format_type_into(&self, idx: Idx, buf: &mut String) {
        let tag = self.tag(idx);
        match tag {
            Tag::Void
            | Tag::Half
            | Tag::BFloat
            | Tag::Float
            | Tag::Double
            | Tag::X86Fp80
            | Tag::Fp128
            | Tag::PpcFp128
            | Tag::Label
            | Tag::Token
            | Tag::Metadata => buf.push_str(tag.name()),

            Tag::Int => {
                buf.push('i');
                buf.push_str(&self.data(idx).to_string());
            }
            Tag::Pointer => {
                buf.push_str("ptr");
                let addrspace = self.data(idx);
                if addrspace != 0 {
                    buf.push_str(&format!(" addrspace({addrspace})"));
                }
            }

            Tag::Array => {
                let len = self.array_len(idx).unwrap_or_default();
                buf.push_str(&format!("[{len} x "));
                self.format_opt_into(self.array_elem(idx), buf);
                buf.push(']');
            }
            Tag::Vector => {
                let len = self.vector_len(idx).unwrap_or_default();
                buf.push_str(&format!("<{len} x "));
                self.format_opt_into(self.vector_elem(idx), buf);
                buf.push('>');
            }

            Tag::Struct => {
                let fields = self.struct_fields(idx).unwrap_or_default();
                self.format_struct_body_into(&fields, self.struct_is_packed(idx), buf);
            }
            Tag::NamedStruct => {
                let name = self.struct_name(idx).unwrap_or_default();
                syntax::push_name(buf, '%', name);
            }

            Tag::Function => {
                self.format_opt_into(self.function_return(idx), buf);
                buf.push_str(" (");
                let params = self.function_params(idx).unwrap_or_default();
                for (i, &param) in params.iter().enumerate() {
                    if i > 0 {
                        buf.push_str(", ");
                    }
                    self.format_type_into(param, buf);
                }
                if self.function_is_variadic(idx) {
                    if !params.is_empty() {
                        buf.push_str(", ");
                    }
                    buf.push_str("...");
                }
                buf.push(')');
            }
        }
    }

    /// Format the body of a struct: `{ a, b }`, `<{ a, b }>` or `{}`.
    ///
    /// Used for literal struct types and for named struct definitions.
    pub fn format_struct_body_into(&self, fields: &[Idx], packed: bool, buf: &mut String) {
        if packed {
            buf.push('<');
        }
        if fields.is_empty() {
            buf.push_str("{}");
        } else {
            buf.push_str("{ ");
            for (i, &field) in fields.iter().enumerate() {
                if i > 0 {
                    buf.push_str(", ");
                }
                self.format_type_into(field, buf);
            }
            buf.push_str(" }");
        }
        if packed {
            buf.push('>');
        }
    }

    /// Format a named struct definition: `%name = type { ... }` or `%name = type opaque`.
    pub fn format_struct_definition(&self, idx: Idx) -> String {
        let mut buf = String::new();
        syntax::push_name(&mut buf, '%', self.struct_name(idx).unwrap_or_default());
        buf.push_str(" = type ");
        match self.struct_fields(idx) {
            Some(fields) => self.format_struct_body_into(&fields, self.struct_is_packed(idx), &mut buf),
            None => buf.push_str("opaque"),
        }
        buf
    }

    fn format_opt_into(&self, idx: Option<Idx>, buf: &mut String) {
        match idx {
            Some(idx) => self.format_type_into(idx, buf),
            None => buf.push_str("<invalid>"),
        }
    }

    /// Borrowing display adapter for use in `format!` arguments.
    pub fn display(&self, idx: Idx) -> TypeDisplay<'_> {
        TypeDisplay { pool: self, idx }
    }
}

/// A type paired with its pool, printable with `{}`.
#[derive(Copy, Clone)]
pub struct TypeDisplay<'a> {
    pool: &'a Pool,
    idx: Idx,
}

impl fmt::Display for TypeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pool.format_type(self.idx))
    }
}
