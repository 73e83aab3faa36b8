//! Binding model and Binding Resolver for the javelin analysis engine.
//!
//! This crate provides:
//! - Binding records for types, methods, variables and packages (`Binding`)
//! - Content-derived identity keys (`BindingKey`)
//! - The per-session binding store and its builder API (`BindingTable`)
//! - Hierarchy-aware lookups, override search and visibility
//!   (`BindingResolver`)

// Identity keys
pub mod key;
pub use key::BindingKey;

// Binding records
pub mod binding;
pub use binding::{
    Binding, BindingData, BindingKind, ClassKind, MethodData, Nesting, PrimitiveKind, TypeData,
    TypeShape, VariableData, VariableKind, bindings_equal,
};

// Storage and construction
pub mod table;
mod table_builder;
pub use table::{
    BindingTable, JAVA_IO_SERIALIZABLE, JAVA_LANG_CLONEABLE, JAVA_LANG_OBJECT, JAVA_LANG_STRING,
};

// Resolution
pub mod resolver;
mod overrides;
mod visibility;
pub use resolver::BindingResolver;
