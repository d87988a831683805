//! # relmap-core — The Type-Descriptor Contract
//!
//! This crate defines how a persistence layer talks to the scalar types it
//! stores. Each logical type is described by one [`TypeDescriptor`], which
//! converts values to and from relational representations, compares and
//! hashes them, and owns the [`MutabilityPlan`] that decides how values are
//! copied into and out of a cache. Concrete descriptors live in
//! `relmap-types`; this crate depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Closed representation set.** [`ValueKind`] and [`JdbcValue`] are
//!    exhaustive enums. A descriptor's coercions are a `match` with one
//!    fallback arm, and an unsupported kind is a typed error, never a panic.
//!
//! 2. **One authoritative descriptor per logical type.** The
//!    [`TypeRegistry`] is built once and is read-only afterwards. Temporal
//!    precision resolution returns the registry's own instance.
//!
//! 3. **Stateless, thread-safe descriptors.** Every descriptor and plan is
//!    `Send + Sync`. The [`SessionContext`] is borrowed per call.
//!
//! 4. **Null is `None`.** Coercions pass `None` through; only operations that
//!    need a value (`hash_nullable`, `compare_nullable`) reject it.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod comparator;
pub mod context;
pub mod descriptor;
pub mod error;
pub mod kind;
pub mod mutability;
pub mod registry;
pub mod settings;
pub mod temporal;
pub mod wire;

// Re-export primary types for ergonomic imports.
pub use comparator::Comparator;
pub use context::{DefaultSessionContext, SessionContext};
pub use descriptor::{
    default_are_equal, hash_of, parse_literal, unknown_unwrap, unknown_wrap, TypeDescriptor,
    NULL_MARKER,
};
pub use error::{ConfigError, ConversionError, Direction, TypeError};
pub use kind::{JdbcValue, ObjectRef, ValueKind};
pub use mutability::{
    ArrayMutabilityPlan, CachedValue, ImmutableMutabilityPlan, MutabilityPlan,
    MutableMutabilityPlan,
};
pub use registry::{DynDescriptor, TypeRegistry, TypeRegistryBuilder};
pub use settings::{ColumnIndicators, TypeSettings};
pub use temporal::{
    resolve_precision, supported_precisions, TemporalPrecision, TemporalTypeDescriptor,
};
pub use wire::{EnumStorage, WireTypeCode, WireTypeIndicators};
