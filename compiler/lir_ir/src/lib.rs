//! Values, constants and operand slots of the lir IR.
//!
//! # Architecture
//!
//! - **[`Value`]**: anything that can be an operand. Its type is fixed at
//!   construction; its identifier is derived from its current name.
//! - **[`Named`]**: values with a mutable name (globals, parameters,
//!   blocks, value-producing instructions).
//! - **[`Constant`]**: the closed set of compile-time constants, interned
//!   per module. `none`, `false` and `true` sit at fixed [`ConstId`]s.
//! - **Users**: instructions, whose operands are reached through
//!   [`OperandSlot`]s and rewritten only through [`Module::set_operand`].
//!
//! Everything lives in a [`Module`] and is referred to by 32-bit ids.
//! Construction and mutation are checked eagerly: an invalid request
//! returns an [`IrError`] and leaves the module unchanged.

mod constant;
mod error;
mod ids;
mod inst;
mod module;
mod op;
mod typing;
mod user;
mod value;

use std::sync::Once;

pub use constant::{ConstExpr, Constant, ExprOp};
pub use error::{IrError, Result};
pub use ids::{AliasId, BlockId, ConstId, FuncId, GlobalId, IFuncId, InstId, ParamId};
pub use inst::InstKind;
pub use module::{Alias, Function, GlobalVar, IFunc, Linkage, Module};
pub use op::{ArithFlags, BinaryOp, CastOp, FloatPredicate, IntPredicate};
pub use user::OperandSlot;
pub use value::{GlobalRef, Named, Value, ValueDisplay};

pub use lir_types;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debugging.
///
/// Call once at startup. Set `RUST_LOG` to control the level, for example
/// `RUST_LOG=lir_ir=debug` for renames and operand rewrites or
/// `RUST_LOG=lir_ir=trace` to also see every interned constant.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
