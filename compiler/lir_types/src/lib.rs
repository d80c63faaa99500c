//! Type system for the lir IR.
//!
//! Types are interned in a [`Pool`] and referred to by [`Idx`], a 32-bit
//! handle. Interning makes type equality an index comparison, which is what
//! the value layer relies on when it checks operand and element types.
//!
//! # Layout (after Zig's `InternPool`)
//!
//! - Primitives (`void`, `i1`..`i128`, the float kinds, `ptr`, `label`,
//!   `token`, `metadata`) are pre-interned at fixed indices.
//! - Every other type is a `(Tag, data)` item, with variable-size payloads
//!   stored in a shared `extra` array.
//! - Named structs are identities rather than structures, so they can be
//!   recursive.

mod error;
mod flags;
mod idx;
mod pool;
pub mod syntax;
mod tag;

pub use error::TypeError;
pub use flags::TypeFlags;
pub use idx::Idx;
pub use pool::{Item, Pool, TypeDisplay, MAX_INT_WIDTH};
pub use tag::Tag;
