//! # Identifier Types
//!
//! - `uuid`: a [`Uuid`], stored natively, as hyphenated text, or as its 16
//!   big-endian bytes. The column type follows the deployment's preferred
//!   UUID type.
//! - `url`: a parsed [`Url`], stored as its serialized text. Parsing
//!   normalizes, so `http://example.com` reads back as `http://example.com/`.

use relmap_core::{
    default_are_equal, hash_of, unknown_unwrap, unknown_wrap, Comparator, ConversionError,
    ImmutableMutabilityPlan, JdbcValue, MutabilityPlan, SessionContext, TypeDescriptor, TypeError,
    ValueKind, WireTypeCode, WireTypeIndicators,
};
use url::Url;
use uuid::Uuid;

use crate::binary::to_hex;

// ─── uuid ────────────────────────────────────────────────────────────

/// Descriptor for `uuid`.
#[derive(Debug, Default)]
pub struct UuidDescriptor {
    plan: ImmutableMutabilityPlan<Uuid>,
}

impl UuidDescriptor {
    pub const fn new() -> Self {
        Self {
            plan: ImmutableMutabilityPlan::new(),
        }
    }
}

impl TypeDescriptor<Uuid> for UuidDescriptor {
    fn type_name(&self) -> &'static str {
        "uuid"
    }

    fn to_string(&self, value: &Uuid) -> String {
        value.hyphenated().to_string()
    }

    fn from_string(&self, text: &str) -> Result<Uuid, ConversionError> {
        Uuid::parse_str(text).map_err(|e| ConversionError::invalid_literal(self.type_name(), text, e))
    }

    fn are_equal(&self, a: Option<&Uuid>, b: Option<&Uuid>) -> bool {
        default_are_equal(a, b)
    }

    fn extract_hash_code(&self, value: &Uuid) -> u64 {
        hash_of(value)
    }

    fn unwrap(
        &self,
        value: Option<&Uuid>,
        kind: ValueKind,
        _session: &dyn SessionContext,
    ) -> Result<Option<JdbcValue>, TypeError> {
        let Some(v) = value else { return Ok(None) };
        match kind {
            ValueKind::Uuid => Ok(Some(JdbcValue::Uuid(*v))),
            ValueKind::String => Ok(Some(JdbcValue::String(self.to_string(v)))),
            ValueKind::Bytes => Ok(Some(JdbcValue::Bytes(v.as_bytes().to_vec()))),
            other => Err(unknown_unwrap(self.type_name(), other)),
        }
    }

    fn wrap(
        &self,
        value: Option<JdbcValue>,
        _session: &dyn SessionContext,
    ) -> Result<Option<Uuid>, TypeError> {
        let Some(value) = value else { return Ok(None) };
        match value {
            JdbcValue::Uuid(u) => Ok(Some(u)),
            JdbcValue::String(s) => Ok(Some(self.from_string(&s)?)),
            JdbcValue::Bytes(bytes) => Uuid::from_slice(&bytes).map(Some).map_err(|_| {
                TypeError::from(ConversionError::WrongLength {
                    type_name: self.type_name().to_string(),
                    text: to_hex(&bytes),
                    expected: 16,
                    actual: bytes.len(),
                })
            }),
            other => Err(unknown_wrap(self.type_name(), &other)),
        }
    }

    fn supported_kinds(&self) -> &'static [ValueKind] {
        &[ValueKind::Uuid, ValueKind::String, ValueKind::Bytes]
    }

    fn comparator(&self) -> Comparator<Uuid> {
        Comparator::natural()
    }

    fn mutability_plan(&self) -> &dyn MutabilityPlan<Uuid> {
        &self.plan
    }

    fn recommended_wire_type(&self, indicators: &dyn WireTypeIndicators) -> WireTypeCode {
        indicators.preferred_uuid_type()
    }
}

// ─── url ─────────────────────────────────────────────────────────────

/// Descriptor for `url`.
#[derive(Debug, Default)]
pub struct UrlDescriptor {
    plan: ImmutableMutabilityPlan<Url>,
}

impl UrlDescriptor {
    pub const fn new() -> Self {
        Self {
            plan: ImmutableMutabilityPlan::new(),
        }
    }
}

impl TypeDescriptor<Url> for UrlDescriptor {
    fn type_name(&self) -> &'static str {
        "url"
    }

    fn to_string(&self, value: &Url) -> String {
        value.as_str().to_string()
    }

    fn from_string(&self, text: &str) -> Result<Url, ConversionError> {
        Url::parse(text).map_err(|e| ConversionError::invalid_literal(self.type_name(), text, e))
    }

    fn are_equal(&self, a: Option<&Url>, b: Option<&Url>) -> bool {
        default_are_equal(a, b)
    }

    fn extract_hash_code(&self, value: &Url) -> u64 {
        hash_of(value)
    }

    fn unwrap(
        &self,
        value: Option<&Url>,
        kind: ValueKind,
        _session: &dyn SessionContext,
    ) -> Result<Option<JdbcValue>, TypeError> {
        let Some(v) = value else { return Ok(None) };
        match kind {
            ValueKind::String => Ok(Some(JdbcValue::String(self.to_string(v)))),
            other => Err(unknown_unwrap(self.type_name(), other)),
        }
    }

    fn wrap(
        &self,
        value: Option<JdbcValue>,
        _session: &dyn SessionContext,
    ) -> Result<Option<Url>, TypeError> {
        let Some(value) = value else { return Ok(None) };
        match value {
            JdbcValue::String(s) => Ok(Some(self.from_string(&s)?)),
            other => Err(unknown_wrap(self.type_name(), &other)),
        }
    }

    fn supported_kinds(&self) -> &'static [ValueKind] {
        &[ValueKind::String]
    }

    fn comparator(&self) -> Comparator<Url> {
        Comparator::unordered()
    }

    fn mutability_plan(&self) -> &dyn MutabilityPlan<Url> {
        &self.plan
    }

    fn recommended_wire_type(&self, _indicators: &dyn WireTypeIndicators) -> WireTypeCode {
        WireTypeCode::VarChar
    }
}
