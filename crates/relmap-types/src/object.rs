//! `object`: an opaque handle passed to the driver as-is.
//!
//! Values have no text form and compare by identity.

use relmap_core::{
    unknown_unwrap, unknown_wrap, Comparator, ConversionError, ImmutableMutabilityPlan, JdbcValue,
    MutabilityPlan, ObjectRef, SessionContext, TypeDescriptor, TypeError, ValueKind, WireTypeCode,
    WireTypeIndicators,
};

/// Descriptor for `object`.
#[derive(Debug, Default)]
pub struct ObjectDescriptor {
    plan: ImmutableMutabilityPlan<ObjectRef>,
}

impl ObjectDescriptor {
    pub const fn new() -> Self {
        Self {
            plan: ImmutableMutabilityPlan::new(),
        }
    }
}

impl TypeDescriptor<ObjectRef> for ObjectDescriptor {
    fn type_name(&self) -> &'static str {
        "object"
    }

    fn to_string(&self, value: &ObjectRef) -> String {
        format!("{value:?}")
    }

    fn from_string(&self, text: &str) -> Result<ObjectRef, ConversionError> {
        Err(ConversionError::invalid_literal(
            self.type_name(),
            text,
            "opaque objects have no text form",
        ))
    }

    fn are_equal(&self, a: Option<&ObjectRef>, b: Option<&ObjectRef>) -> bool {
        match (a, b) {
            (Some(a), Some(b)) => a.same_object(b),
            (None, None) => true,
            _ => false,
        }
    }

    fn extract_hash_code(&self, value: &ObjectRef) -> u64 {
        value.address() as u64
    }

    fn unwrap(
        &self,
        value: Option<&ObjectRef>,
        kind: ValueKind,
        _session: &dyn SessionContext,
    ) -> Result<Option<JdbcValue>, TypeError> {
        let Some(v) = value else { return Ok(None) };
        match kind {
            ValueKind::Object => Ok(Some(JdbcValue::Object(v.clone()))),
            other => Err(unknown_unwrap(self.type_name(), other)),
        }
    }

    fn wrap(
        &self,
        value: Option<JdbcValue>,
        _session: &dyn SessionContext,
    ) -> Result<Option<ObjectRef>, TypeError> {
        match value {
            None => Ok(None),
            Some(JdbcValue::Object(handle)) => Ok(Some(handle)),
            Some(other) => Err(unknown_wrap(self.type_name(), &other)),
        }
    }

    fn supported_kinds(&self) -> &'static [ValueKind] {
        &[ValueKind::Object]
    }

    fn comparator(&self) -> Comparator<ObjectRef> {
        Comparator::unordered()
    }

    fn mutability_plan(&self) -> &dyn MutabilityPlan<ObjectRef> {
        &self.plan
    }

    fn recommended_wire_type(&self, _indicators: &dyn WireTypeIndicators) -> WireTypeCode {
        WireTypeCode::JavaObject
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relmap_core::DefaultSessionContext;

    #[test]
    fn identity_equality() {
        let d = ObjectDescriptor::new();
        let a = ObjectRef::new(vec![1u8, 2, 3]);
        let b = ObjectRef::new(vec![1u8, 2, 3]);
        assert!(d.are_equal(Some(&a), Some(&a.clone())));
        assert!(!d.are_equal(Some(&a), Some(&b)));
        assert_eq!(d.extract_hash_code(&a), d.extract_hash_code(&a.clone()));
    }

    #[test]
    fn passes_through_object_kind_only() {
        let d = ObjectDescriptor::new();
        let ctx = DefaultSessionContext::new();
        let a = ObjectRef::new("payload");
        let back = d
            .wrap(d.unwrap(Some(&a), ValueKind::Object, &ctx).unwrap(), &ctx)
            .unwrap();
        assert!(back.is_some_and(|b| b.same_object(&a)));
        assert!(d.unwrap(Some(&a), ValueKind::String, &ctx).is_err());
        assert!(d.from_string("anything").is_err());
    }
}
