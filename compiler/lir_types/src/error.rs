//! Errors raised by the type pool.

/// Failure to build or complete a type.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    /// A named struct with this name already exists in the pool.
    #[error("named struct `%{name}` is already defined")]
    DuplicateStructName { name: String },

    /// A body was requested for a type that is not a named struct.
    #[error("`{ty}` is not a named struct")]
    NotNamedStruct { ty: String },

    /// The named struct already has a body.
    #[error("body of named struct `%{name}` is already set")]
    StructBodyAlreadySet { name: String },
}
