//! # Binary Type
//!
//! `binary`: a `Vec<u8>`. Its text form is lowercase hex; parsing accepts
//! either case. Values are mutable and copied element by element when
//! cached.

use relmap_core::{
    default_are_equal, hash_of, unknown_unwrap, unknown_wrap, ArrayMutabilityPlan, Comparator,
    ConversionError, JdbcValue, MutabilityPlan, SessionContext, TypeDescriptor, TypeError,
    ValueKind, WireTypeCode, WireTypeIndicators,
};

/// Render bytes as lowercase hex.
pub fn to_hex(bytes: &[u8]) -> String {
    use std::fmt::Write;
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(out, "{b:02x}");
    }
    out
}

/// Parse hex text (either case) into bytes.
pub fn from_hex(type_name: &str, text: &str) -> Result<Vec<u8>, ConversionError> {
    if text.len() % 2 != 0 {
        return Err(ConversionError::invalid_literal(
            type_name,
            text,
            "hex text must have an even number of digits",
        ));
    }
    if !text.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ConversionError::invalid_literal(type_name, text, "invalid hex digit"));
    }
    Ok(text
        .as_bytes()
        .chunks(2)
        .map(|pair| (hex_value(pair[0]) << 4) | hex_value(pair[1]))
        .collect())
}

fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        b'A'..=b'F' => digit - b'A' + 10,
        _ => 0,
    }
}

/// Descriptor for `binary`.
#[derive(Debug, Default)]
pub struct BinaryDescriptor {
    plan: ArrayMutabilityPlan<u8>,
}

impl BinaryDescriptor {
    pub const fn new() -> Self {
        Self {
            plan: ArrayMutabilityPlan::new(),
        }
    }
}

impl TypeDescriptor<Vec<u8>> for BinaryDescriptor {
    fn type_name(&self) -> &'static str {
        "binary"
    }

    fn to_string(&self, value: &Vec<u8>) -> String {
        to_hex(value)
    }

    fn from_string(&self, text: &str) -> Result<Vec<u8>, ConversionError> {
        from_hex(self.type_name(), text)
    }

    fn are_equal(&self, a: Option<&Vec<u8>>, b: Option<&Vec<u8>>) -> bool {
        default_are_equal(a, b)
    }

    fn extract_hash_code(&self, value: &Vec<u8>) -> u64 {
        hash_of(value)
    }

    fn unwrap(
        &self,
        value: Option<&Vec<u8>>,
        kind: ValueKind,
        _session: &dyn SessionContext,
    ) -> Result<Option<JdbcValue>, TypeError> {
        let Some(v) = value else { return Ok(None) };
        match kind {
            ValueKind::Bytes => Ok(Some(JdbcValue::Bytes(v.clone()))),
            ValueKind::String => Ok(Some(JdbcValue::String(to_hex(v)))),
            other => Err(unknown_unwrap(self.type_name(), other)),
        }
    }

    fn wrap(
        &self,
        value: Option<JdbcValue>,
        _session: &dyn SessionContext,
    ) -> Result<Option<Vec<u8>>, TypeError> {
        let Some(value) = value else { return Ok(None) };
        match value {
            JdbcValue::Bytes(bytes) => Ok(Some(bytes)),
            JdbcValue::String(s) => Ok(Some(self.from_string(&s)?)),
            other => Err(unknown_wrap(self.type_name(), &other)),
        }
    }

    fn supported_kinds(&self) -> &'static [ValueKind] {
        &[ValueKind::Bytes, ValueKind::String]
    }

    fn comparator(&self) -> Comparator<Vec<u8>> {
        Comparator::unordered()
    }

    fn mutability_plan(&self) -> &dyn MutabilityPlan<Vec<u8>> {
        &self.plan
    }

    fn recommended_wire_type(&self, indicators: &dyn WireTypeIndicators) -> WireTypeCode {
        if indicators.is_lob() {
            return WireTypeCode::Blob;
        }
        match indicators.column_length() {
            Some(len) if len > indicators.max_varbinary_length() => WireTypeCode::LongVarBinary,
            _ => WireTypeCode::VarBinary,
        }
    }
}
