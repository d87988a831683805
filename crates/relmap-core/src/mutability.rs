//! # Mutability Plans
//!
//! Decide whether values of a logical type need defensive copying, and how
//! they cross a cache boundary.
//!
//! ## Plans
//!
//! - [`ImmutableMutabilityPlan`]: no independent copy is ever made. Correct
//!   only if the type really is immutable.
//! - [`MutableMutabilityPlan`]: copies through a type-specific copier. A
//!   cache round trip copies twice, once on [`disassemble`] and once on
//!   [`assemble`], so the cached value and both call sites are independent.
//! - [`ArrayMutabilityPlan`]: element-wise copy of a `Vec<E>`. Elements are
//!   cloned and not copied through any plan of their own, so `E` must be
//!   immutable. The plan cannot check this.
//!
//! ## Round-trip law
//!
//! For every plan and every `v`, `assemble(disassemble(v))` is equal to `v`
//! under the type's equality, and `None` maps to `None`.
//!
//! [`disassemble`]: MutabilityPlan::disassemble
//! [`assemble`]: MutabilityPlan::assemble

use std::any::Any;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::context::SessionContext;
use crate::error::TypeError;

/// The storable form of a value held in a cache.
///
/// Shared and type-erased; a plan reinterprets it back into its value type
/// on [`MutabilityPlan::assemble`].
#[derive(Clone)]
pub struct CachedValue(Arc<dyn Any + Send + Sync>);

impl CachedValue {
    /// Store a value.
    pub fn new<V: Any + Send + Sync>(value: V) -> Self {
        Self(Arc::new(value))
    }

    /// Borrow the stored value if it is a `V`.
    pub fn downcast_ref<V: Any>(&self) -> Option<&V> {
        self.0.downcast_ref::<V>()
    }
}

impl std::fmt::Debug for CachedValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CachedValue(..)")
    }
}

/// Copy and cache strategy for values of `T`.
pub trait MutabilityPlan<T>: Send + Sync {
    /// Whether values of `T` can change after construction.
    fn is_mutable(&self) -> bool;

    /// A value independent of `value` but equal to it. `None` maps to `None`.
    fn deep_copy(&self, value: Option<&T>) -> Option<T>;

    /// Convert a value into its storable cache form.
    fn disassemble(&self, value: Option<&T>, session: &dyn SessionContext) -> Option<CachedValue>;

    /// Rebuild a value from its storable cache form.
    ///
    /// # Errors
    ///
    /// [`TypeError::CacheMismatch`] when `cached` holds a value of another type.
    fn assemble(
        &self,
        cached: Option<&CachedValue>,
        session: &dyn SessionContext,
    ) -> Result<Option<T>, TypeError>;
}

fn downcast_cached<'a, T: Any>(cached: &'a CachedValue) -> Result<&'a T, TypeError> {
    cached.downcast_ref::<T>().ok_or_else(|| TypeError::CacheMismatch {
        type_name: std::any::type_name::<T>().to_string(),
    })
}

// ─── Immutable ───────────────────────────────────────────────────────

/// Plan for types whose values never change.
///
/// `deep_copy` hands back the value itself: `Clone` on an immutable value
/// (or on a shared handle such as `Arc`) yields the same value, never an
/// independent one.
pub struct ImmutableMutabilityPlan<T>(PhantomData<fn() -> T>);

impl<T> ImmutableMutabilityPlan<T> {
    /// The plan.
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for ImmutableMutabilityPlan<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for ImmutableMutabilityPlan<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ImmutableMutabilityPlan<T> {}

impl<T> std::fmt::Debug for ImmutableMutabilityPlan<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ImmutableMutabilityPlan")
    }
}

impl<T: Clone + Send + Sync + 'static> MutabilityPlan<T> for ImmutableMutabilityPlan<T> {
    fn is_mutable(&self) -> bool {
        false
    }

    fn deep_copy(&self, value: Option<&T>) -> Option<T> {
        value.cloned()
    }

    fn disassemble(&self, value: Option<&T>, _session: &dyn SessionContext) -> Option<CachedValue> {
        value.map(|v| CachedValue::new(v.clone()))
    }

    fn assemble(
        &self,
        cached: Option<&CachedValue>,
        _session: &dyn SessionContext,
    ) -> Result<Option<T>, TypeError> {
        cached
            .map(|c| downcast_cached::<T>(c).cloned())
            .transpose()
    }
}

// ─── Mutable ─────────────────────────────────────────────────────────

/// Plan for types whose values can change, copying through `copier`.
pub struct MutableMutabilityPlan<T> {
    copier: fn(&T) -> T,
}

impl<T> MutableMutabilityPlan<T> {
    /// A plan copying non-null values with `copier`.
    pub const fn new(copier: fn(&T) -> T) -> Self {
        Self { copier }
    }
}

impl<T: Clone> MutableMutabilityPlan<T> {
    /// A plan copying through `Clone`.
    pub fn cloning() -> Self {
        Self::new(T::clone)
    }
}

impl<T> std::fmt::Debug for MutableMutabilityPlan<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("MutableMutabilityPlan")
    }
}

impl<T: Send + Sync + 'static> MutabilityPlan<T> for MutableMutabilityPlan<T> {
    fn is_mutable(&self) -> bool {
        true
    }

    fn deep_copy(&self, value: Option<&T>) -> Option<T> {
        value.map(self.copier)
    }

    fn disassemble(&self, value: Option<&T>, _session: &dyn SessionContext) -> Option<CachedValue> {
        self.deep_copy(value).map(CachedValue::new)
    }

    fn assemble(
        &self,
        cached: Option<&CachedValue>,
        _session: &dyn SessionContext,
    ) -> Result<Option<T>, TypeError> {
        cached
            .map(|c| downcast_cached::<T>(c).map(self.copier))
            .transpose()
    }
}

// ─── Arrays ──────────────────────────────────────────────────────────

/// Plan for `Vec<E>` copying element by element.
///
/// Elements are cloned, not deep-copied through a plan of their own. Using
/// this plan for a vector of mutable elements (shared handles with interior
/// mutability, for instance) leaves the copies aliased.
pub struct ArrayMutabilityPlan<E>(PhantomData<fn() -> E>);

impl<E> ArrayMutabilityPlan<E> {
    /// The plan.
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<E> Default for ArrayMutabilityPlan<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Debug for ArrayMutabilityPlan<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ArrayMutabilityPlan")
    }
}

impl<E: Clone + Send + Sync + 'static> MutabilityPlan<Vec<E>> for ArrayMutabilityPlan<E> {
    fn is_mutable(&self) -> bool {
        true
    }

    fn deep_copy(&self, value: Option<&Vec<E>>) -> Option<Vec<E>> {
        value.map(|v| v.as_slice().to_vec())
    }

    fn disassemble(
        &self,
        value: Option<&Vec<E>>,
        _session: &dyn SessionContext,
    ) -> Option<CachedValue> {
        self.deep_copy(value).map(CachedValue::new)
    }

    fn assemble(
        &self,
        cached: Option<&CachedValue>,
        _session: &dyn SessionContext,
    ) -> Result<Option<Vec<E>>, TypeError> {
        cached
            .map(|c| downcast_cached::<Vec<E>>(c).map(|v| v.as_slice().to_vec()))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::DefaultSessionContext;

    #[test]
    fn immutable_deep_copy_keeps_identity() {
        let plan = ImmutableMutabilityPlan::<Arc<str>>::new();
        let value: Arc<str> = Arc::from("shared");
        let copy = plan.deep_copy(Some(&value)).unwrap();
        assert!(Arc::ptr_eq(&value, &copy));
        assert!(!plan.is_mutable());
    }

    #[test]
    fn immutable_cache_roundtrip() {
        let ctx = DefaultSessionContext::new();
        let plan = ImmutableMutabilityPlan::<String>::new();
        let value = "cached".to_string();
        let stored = plan.disassemble(Some(&value), &ctx);
        let back = plan.assemble(stored.as_ref(), &ctx).unwrap();
        assert_eq!(back.as_deref(), Some("cached"));
        assert!(plan.disassemble(None, &ctx).is_none());
        assert!(plan.assemble(None, &ctx).unwrap().is_none());
    }

    #[test]
    fn mutable_deep_copy_is_independent() {
        let plan = MutableMutabilityPlan::<Vec<u8>>::cloning();
        let original = vec![1, 2, 3];
        let mut copy = plan.deep_copy(Some(&original)).unwrap();
        copy[0] = 9;
        assert_eq!(original, vec![1, 2, 3]);
        assert!(plan.deep_copy(None).is_none());
    }

    #[test]
    fn mutable_cache_copies_both_ways() {
        let ctx = DefaultSessionContext::new();
        let plan = MutableMutabilityPlan::<Vec<u8>>::cloning();
        let original = vec![4, 5];
        let stored = plan.disassemble(Some(&original), &ctx).unwrap();
        let mut first = plan.assemble(Some(&stored), &ctx).unwrap().unwrap();
        first.push(6);
        let second = plan.assemble(Some(&stored), &ctx).unwrap().unwrap();
        assert_eq!(second, vec![4, 5]);
        assert_eq!(original, vec![4, 5]);
    }

    #[test]
    fn array_plan_copies_elements() {
        let ctx = DefaultSessionContext::new();
        let plan = ArrayMutabilityPlan::<char>::new();
        let original = vec!['a', 'b'];
        let mut copy = plan.deep_copy(Some(&original)).unwrap();
        copy[1] = 'z';
        assert_eq!(original, vec!['a', 'b']);
        let stored = plan.disassemble(Some(&original), &ctx);
        assert_eq!(plan.assemble(stored.as_ref(), &ctx).unwrap(), Some(original));
    }

    #[test]
    fn array_plan_shares_mutable_elements() {
        // Cloning an `Arc` element aliases it; the precondition is the caller's.
        let plan = ArrayMutabilityPlan::<Arc<std::sync::Mutex<i32>>>::new();
        let original = vec![Arc::new(std::sync::Mutex::new(1))];
        let copy = plan.deep_copy(Some(&original)).unwrap();
        *copy[0].lock().unwrap() = 2;
        assert_eq!(*original[0].lock().unwrap(), 2);
    }

    #[test]
    fn assemble_rejects_foreign_cached_value() {
        let ctx = DefaultSessionContext::new();
        let plan = ImmutableMutabilityPlan::<i32>::new();
        let stored = CachedValue::new("not an i32".to_string());
        assert!(matches!(
            plan.assemble(Some(&stored), &ctx),
            Err(TypeError::CacheMismatch { .. })
        ));
    }
}
