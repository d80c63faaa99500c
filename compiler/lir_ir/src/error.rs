//! Construction and mutation errors.
//!
//! Every check in this crate runs when a value is built or an operand slot
//! is written, never later. A failed call leaves the module exactly as it
//! was. Types and values are rendered in the textual syntax at the point of
//! failure so the message names the offending pair.

use lir_types::TypeError;
use num_bigint::BigInt;

/// Result alias for fallible IR operations.
pub type Result<T> = std::result::Result<T, IrError>;

/// A violated value-layer invariant.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum IrError {
    /// An integer literal does not fit the bit width of its type.
    #[error("integer {value} does not fit in `{ty}`")]
    IntegerOverflow { value: BigInt, ty: String },

    /// A floating-point literal cannot be represented exactly in its type.
    #[error("{value} is not exactly representable as `{ty}`")]
    FloatNotRepresentable { value: f64, ty: String },

    /// A constant kind was requested for a type that cannot hold it.
    #[error("cannot build a {kind} constant of type `{ty}`")]
    InvalidConstantType { kind: &'static str, ty: String },

    /// An aggregate element is not a constant or has the wrong type.
    #[error("element {index} of `{aggregate}`: expected `{expected}`, found `{found}`")]
    InvalidAggregateElement {
        aggregate: String,
        index: usize,
        expected: String,
        found: String,
    },

    /// An aggregate was given a different number of elements than its type declares.
    #[error("`{aggregate}` has {expected} elements, {found} given")]
    AggregateLengthMismatch {
        aggregate: String,
        expected: u64,
        found: usize,
    },

    /// A constant-only position received a runtime value.
    #[error("operand {index} of `{context}` must be constant, found `{operand}`")]
    NonConstantOperand {
        context: &'static str,
        index: usize,
        operand: String,
    },

    /// A block address names a block of another function.
    #[error("block `{block}` does not belong to function `{func}`")]
    BlockNotInFunction { block: String, func: String },

    /// Two types that must be equal are not.
    #[error("type mismatch: expected `{expected}`, found `{found}`")]
    TypeMismatch { expected: String, found: String },

    /// Operand types do not satisfy the typing rule of an operation.
    #[error("invalid `{op}`: {reason}")]
    InvalidOperation { op: &'static str, reason: String },

    /// A function entity was declared with a non-function type.
    #[error("expected a function type, found `{ty}`")]
    ExpectedFunctionType { ty: String },

    /// An operand slot index past the end of the user's operand list.
    #[error("operand slot {index} out of range ({len} operands)")]
    OperandOutOfRange { index: usize, len: usize },

    /// An instruction was appended after the block's terminator.
    #[error("block `{block}` already has a terminator")]
    BlockTerminated { block: String },

    /// The type pool rejected a request.
    #[error(transparent)]
    Type(#[from] TypeError),
}
