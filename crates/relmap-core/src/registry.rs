//! # Type Registry
//!
//! Holds the single authoritative descriptor for each logical type, keyed by
//! type name, plus a default descriptor per Rust value type.
//!
//! ## Design
//!
//! A registry is assembled once with [`TypeRegistryBuilder`] and is
//! read-only afterwards: `TypeRegistry` has no mutating methods, so sharing
//! it across threads needs no locking. Every lookup hands out a clone of the
//! same `Arc`, which makes "the authoritative instance" checkable with
//! `Arc::ptr_eq`.
//!
//! Each entry is stored three ways:
//!
//! - typed, as `Arc<dyn TypeDescriptor<T>>`, for callers that know `T`;
//! - temporal, as `Arc<dyn TemporalTypeDescriptor<T>>`, for precision
//!   resolution (temporal entries only, same allocation as the typed form);
//! - erased, as `Arc<dyn DynDescriptor>`, for tooling that works on text.
//!
//! Registering a name twice replaces the earlier entry and logs a warning.
//! The first descriptor registered for a value type becomes that type's
//! default.

use std::any::{Any, TypeId};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::context::SessionContext;
use crate::descriptor::TypeDescriptor;
use crate::error::TypeError;
use crate::kind::{JdbcValue, ValueKind};
use crate::temporal::{
    resolve_precision, supported_precisions, TemporalPrecision, TemporalTypeDescriptor,
};
use crate::wire::{WireTypeCode, WireTypeIndicators};

// ─── Erased Descriptors ──────────────────────────────────────────────

/// A descriptor driven through text, independent of its value type.
pub trait DynDescriptor: Send + Sync {
    fn type_name(&self) -> &'static str;

    /// The Rust type of the descriptor's values.
    fn value_type_name(&self) -> &'static str;

    fn supported_kinds(&self) -> &'static [ValueKind];

    fn is_mutable(&self) -> bool;

    fn is_ordered(&self) -> bool;

    /// Native precision, for temporal types.
    fn temporal_precision(&self) -> Option<TemporalPrecision>;

    /// Precisions the type can resolve to; empty for non-temporal types.
    fn supported_precisions(&self) -> Vec<TemporalPrecision>;

    fn recommended_wire_type(&self, indicators: &dyn WireTypeIndicators) -> WireTypeCode;

    /// Parse `text` and render it back in canonical form.
    fn normalize_text(&self, text: &str) -> Result<String, TypeError>;

    /// Parse `text` and unwrap the value to `kind`.
    fn text_to_wire(
        &self,
        text: &str,
        kind: ValueKind,
        session: &dyn SessionContext,
    ) -> Result<Option<JdbcValue>, TypeError>;

    /// Wrap `value` and render the result in canonical form.
    fn wire_to_text(
        &self,
        value: JdbcValue,
        session: &dyn SessionContext,
    ) -> Result<Option<String>, TypeError>;

    /// Parse `text`, pass it through the cache plan and render the result.
    fn cache_round_trip_text(
        &self,
        text: &str,
        session: &dyn SessionContext,
    ) -> Result<Option<String>, TypeError>;

    fn hash_text(&self, text: &str) -> Result<u64, TypeError>;

    fn compare_text(&self, a: &str, b: &str) -> Result<Ordering, TypeError>;

    fn equal_text(&self, a: &str, b: &str) -> Result<bool, TypeError>;

    /// Name of the descriptor serving `requested` precision.
    ///
    /// # Errors
    ///
    /// [`TypeError::UnsupportedPrecision`] for non-temporal types and for
    /// precisions the type does not support.
    fn resolve_for_precision(
        &self,
        requested: Option<TemporalPrecision>,
        registry: &TypeRegistry,
    ) -> Result<&'static str, TypeError>;
}

struct Erased<T: 'static> {
    typed: Arc<dyn TypeDescriptor<T>>,
    temporal: Option<Arc<dyn TemporalTypeDescriptor<T>>>,
}

impl<T: 'static> DynDescriptor for Erased<T> {
    fn type_name(&self) -> &'static str {
        self.typed.type_name()
    }

    fn value_type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn supported_kinds(&self) -> &'static [ValueKind] {
        self.typed.supported_kinds()
    }

    fn is_mutable(&self) -> bool {
        self.typed.mutability_plan().is_mutable()
    }

    fn is_ordered(&self) -> bool {
        self.typed.comparator().is_ordered()
    }

    fn temporal_precision(&self) -> Option<TemporalPrecision> {
        self.temporal.as_ref().map(|t| t.precision())
    }

    fn supported_precisions(&self) -> Vec<TemporalPrecision> {
        self.temporal
            .as_deref()
            .map(|temporal| supported_precisions(temporal))
            .unwrap_or_default()
    }

    fn recommended_wire_type(&self, indicators: &dyn WireTypeIndicators) -> WireTypeCode {
        self.typed.recommended_wire_type(indicators)
    }

    fn normalize_text(&self, text: &str) -> Result<String, TypeError> {
        let value = self.typed.from_string(text)?;
        Ok(self.typed.to_string(&value))
    }

    fn text_to_wire(
        &self,
        text: &str,
        kind: ValueKind,
        session: &dyn SessionContext,
    ) -> Result<Option<JdbcValue>, TypeError> {
        let value = self.typed.from_string(text)?;
        self.typed.unwrap(Some(&value), kind, session)
    }

    fn wire_to_text(
        &self,
        value: JdbcValue,
        session: &dyn SessionContext,
    ) -> Result<Option<String>, TypeError> {
        let wrapped = self.typed.wrap(Some(value), session)?;
        Ok(wrapped.map(|v| self.typed.to_string(&v)))
    }

    fn cache_round_trip_text(
        &self,
        text: &str,
        session: &dyn SessionContext,
    ) -> Result<Option<String>, TypeError> {
        let value = self.typed.from_string(text)?;
        let plan = self.typed.mutability_plan();
        let cached = plan.disassemble(Some(&value), session);
        let assembled = plan.assemble(cached.as_ref(), session)?;
        Ok(assembled.map(|v| self.typed.to_string(&v)))
    }

    fn hash_text(&self, text: &str) -> Result<u64, TypeError> {
        let value = self.typed.from_string(text)?;
        Ok(self.typed.extract_hash_code(&value))
    }

    fn compare_text(&self, a: &str, b: &str) -> Result<Ordering, TypeError> {
        let a = self.typed.from_string(a)?;
        let b = self.typed.from_string(b)?;
        Ok(self.typed.comparator().compare(&a, &b))
    }

    fn equal_text(&self, a: &str, b: &str) -> Result<bool, TypeError> {
        let a = self.typed.from_string(a)?;
        let b = self.typed.from_string(b)?;
        Ok(self.typed.are_equal(Some(&a), Some(&b)))
    }

    fn resolve_for_precision(
        &self,
        requested: Option<TemporalPrecision>,
        registry: &TypeRegistry,
    ) -> Result<&'static str, TypeError> {
        match &self.temporal {
            Some(temporal) => resolve_precision(temporal, requested, registry)
                .map(|resolved| resolved.type_name()),
            None => Err(TypeError::UnsupportedPrecision {
                type_name: self.type_name().to_string(),
                precision: requested.unwrap_or(TemporalPrecision::Timestamp),
            }),
        }
    }
}

// ─── Registry ────────────────────────────────────────────────────────

struct RegisteredType {
    value_type: TypeId,
    /// `Arc<dyn TypeDescriptor<T>>`
    typed: Box<dyn Any + Send + Sync>,
    /// `Arc<dyn TemporalTypeDescriptor<T>>`
    temporal: Option<Box<dyn Any + Send + Sync>>,
    erased: Arc<dyn DynDescriptor>,
}

/// The set of authoritative descriptors, read-only once built.
pub struct TypeRegistry {
    entries: BTreeMap<&'static str, RegisteredType>,
    defaults: HashMap<TypeId, &'static str>,
}

impl TypeRegistry {
    /// Start assembling a registry.
    pub fn builder() -> TypeRegistryBuilder {
        TypeRegistryBuilder::new()
    }

    /// The descriptor registered under `name`, if its values are `T`.
    pub fn get<T: 'static>(&self, name: &str) -> Option<Arc<dyn TypeDescriptor<T>>> {
        self.entries
            .get(name)?
            .typed
            .downcast_ref::<Arc<dyn TypeDescriptor<T>>>()
            .cloned()
    }

    /// The default descriptor for values of `T`.
    pub fn descriptor_for<T: 'static>(&self) -> Option<Arc<dyn TypeDescriptor<T>>> {
        let name = self.defaults.get(&TypeId::of::<T>())?;
        self.get::<T>(name)
    }

    /// The temporal descriptor registered under `name` for values of `T`.
    ///
    /// # Errors
    ///
    /// [`TypeError::UnknownType`] when nothing temporal over `T` is
    /// registered under `name`.
    pub fn temporal<T: 'static>(
        &self,
        name: &str,
    ) -> Result<Arc<dyn TemporalTypeDescriptor<T>>, TypeError> {
        self.entries
            .get(name)
            .and_then(|entry| entry.temporal.as_ref())
            .and_then(|t| t.downcast_ref::<Arc<dyn TemporalTypeDescriptor<T>>>())
            .cloned()
            .ok_or_else(|| TypeError::UnknownType {
                name: name.to_string(),
            })
    }

    /// The erased descriptor registered under `name`.
    pub fn lookup(&self, name: &str) -> Result<Arc<dyn DynDescriptor>, TypeError> {
        self.entries
            .get(name)
            .map(|entry| Arc::clone(&entry.erased))
            .ok_or_else(|| TypeError::UnknownType {
                name: name.to_string(),
            })
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    /// Erased descriptors in name order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn DynDescriptor> + '_ {
        self.entries.values().map(|entry| entry.erased.as_ref())
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Whether the value type of `name` is `T`.
    pub fn holds<T: 'static>(&self, name: &str) -> bool {
        self.entries
            .get(name)
            .is_some_and(|entry| entry.value_type == TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("types", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

// ─── Builder ─────────────────────────────────────────────────────────

/// Assembles a [`TypeRegistry`].
#[derive(Default)]
pub struct TypeRegistryBuilder {
    entries: BTreeMap<&'static str, RegisteredType>,
    defaults: HashMap<TypeId, &'static str>,
}

impl TypeRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor under its type name.
    pub fn register<T, D>(self, descriptor: D) -> Self
    where
        T: 'static,
        D: TypeDescriptor<T> + 'static,
    {
        let typed: Arc<dyn TypeDescriptor<T>> = Arc::new(descriptor);
        let erased: Arc<dyn DynDescriptor> = Arc::new(Erased {
            typed: Arc::clone(&typed),
            temporal: None,
        });
        self.insert(typed.type_name(), TypeId::of::<T>(), Box::new(typed), None, erased)
    }

    /// Register a temporal descriptor under its type name.
    pub fn register_temporal<T, D>(self, descriptor: D) -> Self
    where
        T: 'static,
        D: TemporalTypeDescriptor<T> + 'static,
    {
        let shared = Arc::new(descriptor);
        let typed: Arc<dyn TypeDescriptor<T>> = Arc::clone(&shared) as Arc<dyn TypeDescriptor<T>>;
        let temporal: Arc<dyn TemporalTypeDescriptor<T>> = shared;
        let erased: Arc<dyn DynDescriptor> = Arc::new(Erased {
            typed: Arc::clone(&typed),
            temporal: Some(Arc::clone(&temporal)),
        });
        self.insert(
            typed.type_name(),
            TypeId::of::<T>(),
            Box::new(typed),
            Some(Box::new(temporal)),
            erased,
        )
    }

    fn insert(
        mut self,
        name: &'static str,
        value_type: TypeId,
        typed: Box<dyn Any + Send + Sync>,
        temporal: Option<Box<dyn Any + Send + Sync>>,
        erased: Arc<dyn DynDescriptor>,
    ) -> Self {
        let entry = RegisteredType {
            value_type,
            typed,
            temporal,
            erased,
        };
        if let Some(previous) = self.entries.insert(name, entry) {
            tracing::warn!(
                type_name = name,
                replaced = previous.erased.value_type_name(),
                "descriptor registration replaced an existing entry"
            );
            if previous.value_type != value_type {
                self.defaults.retain(|_, default| *default != name);
            }
        }
        self.defaults.entry(value_type).or_insert(name);
        self
    }

    /// Freeze the registry.
    pub fn build(self) -> TypeRegistry {
        tracing::debug!(types = self.entries.len(), "type registry built");
        TypeRegistry {
            entries: self.entries,
            defaults: self.defaults,
        }
    }
}
