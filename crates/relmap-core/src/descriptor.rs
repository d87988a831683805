//! # Type Descriptors
//!
//! The per-type capability bundle the persistence layer works through:
//! identity, string round trip, equality and hashing, ordering, coercion to
//! and from relational representations, the mutability plan, and the
//! recommended column type.
//!
//! ## Contract
//!
//! - Descriptors are stateless after construction and `Send + Sync`.
//! - `are_equal(a, b)` implies `extract_hash_code(a) == extract_hash_code(b)`.
//! - `wrap(unwrap(v, k)) == v` for every `k` in [`supported_kinds`], for
//!   values representable in `k`.
//! - `None` passes through `wrap` and `unwrap` unchanged. A kind outside
//!   [`supported_kinds`] fails with [`TypeError::UnsupportedConversion`],
//!   produced by [`unknown_unwrap`] / [`unknown_wrap`] in the fallback arm.
//!
//! [`supported_kinds`]: TypeDescriptor::supported_kinds

use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::comparator::Comparator;
use crate::context::SessionContext;
use crate::error::{ConversionError, Direction, TypeError};
use crate::kind::{JdbcValue, ValueKind};
use crate::mutability::MutabilityPlan;
use crate::wire::{WireTypeCode, WireTypeIndicators};

/// Loggable rendering of an absent value.
pub const NULL_MARKER: &str = "null";

/// Capabilities of one logical type whose values are `T`.
pub trait TypeDescriptor<T>: Send + Sync {
    /// The logical type name, unique within a registry.
    fn type_name(&self) -> &'static str;

    /// Canonical text form of a value.
    fn to_string(&self, value: &T) -> String;

    /// Parse the canonical text form.
    fn from_string(&self, text: &str) -> Result<T, ConversionError>;

    /// Equality under this type's semantics. Two `None`s are equal.
    fn are_equal(&self, a: Option<&T>, b: Option<&T>) -> bool;

    /// Hash consistent with [`are_equal`](Self::are_equal).
    fn extract_hash_code(&self, value: &T) -> u64;

    /// Convert a value into the relational representation `kind`.
    fn unwrap(
        &self,
        value: Option<&T>,
        kind: ValueKind,
        session: &dyn SessionContext,
    ) -> Result<Option<JdbcValue>, TypeError>;

    /// Convert a relational representation into a value.
    fn wrap(
        &self,
        value: Option<JdbcValue>,
        session: &dyn SessionContext,
    ) -> Result<Option<T>, TypeError>;

    /// The closed set of kinds accepted by both `wrap` and `unwrap`.
    fn supported_kinds(&self) -> &'static [ValueKind];

    /// Ordering for the type, fixed at construction.
    fn comparator(&self) -> Comparator<T>;

    /// Copy and cache strategy for the type.
    fn mutability_plan(&self) -> &dyn MutabilityPlan<T>;

    /// Column type to use given the column's resolved schema context.
    fn recommended_wire_type(&self, indicators: &dyn WireTypeIndicators) -> WireTypeCode;

    /// Text for log output; never fails.
    fn extract_loggable_representation(&self, value: Option<&T>) -> String {
        match value {
            Some(v) => self.to_string(v),
            None => NULL_MARKER.to_string(),
        }
    }

    /// [`extract_hash_code`](Self::extract_hash_code) for an optional value.
    fn hash_nullable(&self, value: Option<&T>) -> Result<u64, TypeError> {
        value
            .map(|v| self.extract_hash_code(v))
            .ok_or_else(|| TypeError::NullValue {
                type_name: self.type_name().to_string(),
                operation: "extract_hash_code",
            })
    }

    /// Compare two optional values with [`comparator`](Self::comparator).
    fn compare_nullable(&self, a: Option<&T>, b: Option<&T>) -> Result<Ordering, TypeError> {
        match (a, b) {
            (Some(a), Some(b)) => Ok(self.comparator().compare(a, b)),
            _ => Err(TypeError::NullValue {
                type_name: self.type_name().to_string(),
                operation: "compare",
            }),
        }
    }

    /// Whether `kind` is in [`supported_kinds`](Self::supported_kinds).
    fn supports(&self, kind: ValueKind) -> bool {
        self.supported_kinds().contains(&kind)
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────

/// Value equality over optional values.
pub fn default_are_equal<T: PartialEq + ?Sized>(a: Option<&T>, b: Option<&T>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a == b,
        (None, None) => true,
        _ => false,
    }
}

/// Hash of a value with a fixed-key hasher, stable within a process.
pub fn hash_of<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// The error for unwrapping `type_name` to an unsupported kind.
pub fn unknown_unwrap(type_name: &str, kind: ValueKind) -> TypeError {
    TypeError::UnsupportedConversion {
        type_name: type_name.to_string(),
        kind,
        direction: Direction::Unwrap,
    }
}

/// The error for wrapping an unsupported representation into `type_name`.
pub fn unknown_wrap(type_name: &str, value: &JdbcValue) -> TypeError {
    TypeError::UnsupportedConversion {
        type_name: type_name.to_string(),
        kind: value.kind(),
        direction: Direction::Wrap,
    }
}

/// Parse `text` with `V`'s standard literal grammar.
pub fn parse_literal<V>(type_name: &str, text: &str) -> Result<V, ConversionError>
where
    V: FromStr,
    V::Err: std::fmt::Display,
{
    text.parse::<V>()
        .map_err(|e| ConversionError::invalid_literal(type_name, text, e))
}
