//! `json`: a `serde_json::Value` document, stored as text or UTF-8 bytes.
//!
//! Documents are mutable, so the cache holds an independent copy. Equality
//! is structural; object member order does not matter.

use relmap_core::{
    hash_of, unknown_unwrap, unknown_wrap, Comparator, ConversionError, JdbcValue, MutabilityPlan,
    MutableMutabilityPlan, SessionContext, TypeDescriptor, TypeError, ValueKind, WireTypeCode,
    WireTypeIndicators,
};
use serde_json::Value;

/// Descriptor for `json`.
#[derive(Debug)]
pub struct JsonDescriptor {
    plan: MutableMutabilityPlan<Value>,
}

impl JsonDescriptor {
    pub fn new() -> Self {
        Self {
            plan: MutableMutabilityPlan::cloning(),
        }
    }
}

impl Default for JsonDescriptor {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeDescriptor<Value> for JsonDescriptor {
    fn type_name(&self) -> &'static str {
        "json"
    }

    fn to_string(&self, value: &Value) -> String {
        value.to_string()
    }

    fn from_string(&self, text: &str) -> Result<Value, ConversionError> {
        serde_json::from_str(text).map_err(|e| ConversionError::invalid_literal(self.type_name(), text, e))
    }

    fn are_equal(&self, a: Option<&Value>, b: Option<&Value>) -> bool {
        a == b
    }

    // serde_json's default map is sorted, so the compact text is canonical.
    fn extract_hash_code(&self, value: &Value) -> u64 {
        hash_of(&value.to_string())
    }

    fn unwrap(
        &self,
        value: Option<&Value>,
        kind: ValueKind,
        _session: &dyn SessionContext,
    ) -> Result<Option<JdbcValue>, TypeError> {
        let Some(v) = value else { return Ok(None) };
        let out = match kind {
            ValueKind::String => JdbcValue::String(v.to_string()),
            ValueKind::Bytes => JdbcValue::Bytes(v.to_string().into_bytes()),
            other => return Err(unknown_unwrap(self.type_name(), other)),
        };
        Ok(Some(out))
    }

    fn wrap(
        &self,
        value: Option<JdbcValue>,
        _session: &dyn SessionContext,
    ) -> Result<Option<Value>, TypeError> {
        let Some(value) = value else { return Ok(None) };
        let out = match value {
            JdbcValue::String(s) => self.from_string(&s)?,
            JdbcValue::Bytes(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                TypeError::from(ConversionError::invalid_literal(
                    self.type_name(),
                    &String::from_utf8_lossy(&bytes),
                    e,
                ))
            })?,
            other => return Err(unknown_wrap(self.type_name(), &other)),
        };
        Ok(Some(out))
    }

    fn supported_kinds(&self) -> &'static [ValueKind] {
        &[ValueKind::String, ValueKind::Bytes]
    }

    fn comparator(&self) -> Comparator<Value> {
        Comparator::unordered()
    }

    fn mutability_plan(&self) -> &dyn MutabilityPlan<Value> {
        &self.plan
    }

    fn recommended_wire_type(&self, _indicators: &dyn WireTypeIndicators) -> WireTypeCode {
        WireTypeCode::Json
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relmap_core::DefaultSessionContext;
    use serde_json::json;

    #[test]
    fn member_order_is_irrelevant() {
        let d = JsonDescriptor::new();
        let a = d.from_string(r#"{"a":1,"b":[true,null]}"#).unwrap();
        let b = d.from_string(r#"{ "b": [true, null], "a": 1 }"#).unwrap();
        assert!(d.are_equal(Some(&a), Some(&b)));
        assert_eq!(d.extract_hash_code(&a), d.extract_hash_code(&b));
    }

    #[test]
    fn bytes_and_text() {
        let d = JsonDescriptor::new();
        let ctx = DefaultSessionContext::new();
        let v = json!({"zone": "pk", "ids": [1, 2, 3]});
        for kind in d.supported_kinds() {
            let wire = d.unwrap(Some(&v), *kind, &ctx).unwrap();
            assert_eq!(d.wrap(wire, &ctx).unwrap(), Some(v.clone()));
        }
        assert!(d.wrap(Some(JdbcValue::Bytes(vec![0xff, 0xfe])), &ctx).is_err());
        assert!(d.from_string("{unquoted: 1}").is_err());
    }

    #[test]
    fn cached_copy_is_independent() {
        let d = JsonDescriptor::new();
        let ctx = DefaultSessionContext::new();
        let mut v = json!({"n": 1});
        let cached = d.mutability_plan().disassemble(Some(&v), &ctx);
        v["n"] = json!(2);
        let restored = d.mutability_plan().assemble(cached.as_ref(), &ctx).unwrap();
        assert_eq!(restored, Some(json!({"n": 1})));
        assert!(d.mutability_plan().is_mutable());
    }
}
