//! # Character and Text Types
//!
//! - `character`: a single `char`. Text must hold exactly one character.
//! - `string`: a `String`, also readable from and writable as characters.
//! - `characters`: a `Vec<char>`, copied element by element when cached.
//!
//! Column recommendations for text follow the column's length and LOB flag:
//! a LOB maps to `CLOB`, a declared length beyond the maximum `VARCHAR` to
//! `LONGVARCHAR`, anything else to `VARCHAR`. Nationalized columns use the
//! `N` forms.

use relmap_core::{
    default_are_equal, hash_of, unknown_unwrap, unknown_wrap, ArrayMutabilityPlan, Comparator,
    ConversionError, ImmutableMutabilityPlan, JdbcValue, MutabilityPlan, SessionContext,
    TypeDescriptor, TypeError, ValueKind, WireTypeCode, WireTypeIndicators,
};

/// Column type for character data under `indicators`.
pub fn text_wire_type(indicators: &dyn WireTypeIndicators) -> WireTypeCode {
    let national = indicators.is_nationalized();
    let long = indicators
        .column_length()
        .is_some_and(|len| len > indicators.max_varchar_length());
    match (indicators.is_lob(), long, national) {
        (true, _, false) => WireTypeCode::Clob,
        (true, _, true) => WireTypeCode::NClob,
        (false, true, false) => WireTypeCode::LongVarChar,
        (false, true, true) => WireTypeCode::LongNVarChar,
        (false, false, false) => WireTypeCode::VarChar,
        (false, false, true) => WireTypeCode::NVarChar,
    }
}

// ─── character ───────────────────────────────────────────────────────

/// Descriptor for `character`.
#[derive(Debug, Default)]
pub struct CharacterDescriptor {
    plan: ImmutableMutabilityPlan<char>,
}

impl CharacterDescriptor {
    pub const fn new() -> Self {
        Self {
            plan: ImmutableMutabilityPlan::new(),
        }
    }
}

impl TypeDescriptor<char> for CharacterDescriptor {
    fn type_name(&self) -> &'static str {
        "character"
    }

    fn to_string(&self, value: &char) -> String {
        value.to_string()
    }

    fn from_string(&self, text: &str) -> Result<char, ConversionError> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(ConversionError::WrongLength {
                type_name: self.type_name().to_string(),
                text: text.to_string(),
                expected: 1,
                actual: text.chars().count(),
            }),
        }
    }

    fn are_equal(&self, a: Option<&char>, b: Option<&char>) -> bool {
        default_are_equal(a, b)
    }

    fn extract_hash_code(&self, value: &char) -> u64 {
        hash_of(value)
    }

    fn unwrap(
        &self,
        value: Option<&char>,
        kind: ValueKind,
        _session: &dyn SessionContext,
    ) -> Result<Option<JdbcValue>, TypeError> {
        let Some(&c) = value else { return Ok(None) };
        match kind {
            ValueKind::Char => Ok(Some(JdbcValue::Char(c))),
            ValueKind::String => Ok(Some(JdbcValue::String(c.to_string()))),
            ValueKind::Integer => Ok(Some(JdbcValue::Integer(u32::from(c) as i32))),
            other => Err(unknown_unwrap(self.type_name(), other)),
        }
    }

    fn wrap(
        &self,
        value: Option<JdbcValue>,
        _session: &dyn SessionContext,
    ) -> Result<Option<char>, TypeError> {
        let Some(value) = value else { return Ok(None) };
        match value {
            JdbcValue::Char(c) => Ok(Some(c)),
            JdbcValue::String(s) => Ok(Some(self.from_string(&s)?)),
            JdbcValue::Integer(n) => u32::try_from(n)
                .ok()
                .and_then(char::from_u32)
                .map(Some)
                .ok_or_else(|| TypeError::from(ConversionError::out_of_range(self.type_name(), n))),
            other => Err(unknown_wrap(self.type_name(), &other)),
        }
    }

    fn supported_kinds(&self) -> &'static [ValueKind] {
        &[ValueKind::Char, ValueKind::String, ValueKind::Integer]
    }

    fn comparator(&self) -> Comparator<char> {
        Comparator::natural()
    }

    fn mutability_plan(&self) -> &dyn MutabilityPlan<char> {
        &self.plan
    }

    fn recommended_wire_type(&self, indicators: &dyn WireTypeIndicators) -> WireTypeCode {
        if indicators.is_nationalized() {
            WireTypeCode::NChar
        } else {
            WireTypeCode::Char
        }
    }
}

// ─── string ──────────────────────────────────────────────────────────

/// Descriptor for `string`.
#[derive(Debug, Default)]
pub struct StringDescriptor {
    plan: ImmutableMutabilityPlan<String>,
}

impl StringDescriptor {
    pub const fn new() -> Self {
        Self {
            plan: ImmutableMutabilityPlan::new(),
        }
    }
}

impl TypeDescriptor<String> for StringDescriptor {
    fn type_name(&self) -> &'static str {
        "string"
    }

    fn to_string(&self, value: &String) -> String {
        value.clone()
    }

    fn from_string(&self, text: &str) -> Result<String, ConversionError> {
        Ok(text.to_string())
    }

    fn are_equal(&self, a: Option<&String>, b: Option<&String>) -> bool {
        default_are_equal(a, b)
    }

    fn extract_hash_code(&self, value: &String) -> u64 {
        hash_of(value)
    }

    fn unwrap(
        &self,
        value: Option<&String>,
        kind: ValueKind,
        _session: &dyn SessionContext,
    ) -> Result<Option<JdbcValue>, TypeError> {
        let Some(v) = value else { return Ok(None) };
        match kind {
            ValueKind::String => Ok(Some(JdbcValue::String(v.clone()))),
            ValueKind::Characters => Ok(Some(JdbcValue::Characters(v.chars().collect()))),
            other => Err(unknown_unwrap(self.type_name(), other)),
        }
    }

    fn wrap(
        &self,
        value: Option<JdbcValue>,
        _session: &dyn SessionContext,
    ) -> Result<Option<String>, TypeError> {
        let Some(value) = value else { return Ok(None) };
        match value {
            JdbcValue::String(s) => Ok(Some(s)),
            JdbcValue::Characters(chars) => Ok(Some(chars.into_iter().collect())),
            other => Err(unknown_wrap(self.type_name(), &other)),
        }
    }

    fn supported_kinds(&self) -> &'static [ValueKind] {
        &[ValueKind::String, ValueKind::Characters]
    }

    fn comparator(&self) -> Comparator<String> {
        Comparator::natural()
    }

    fn mutability_plan(&self) -> &dyn MutabilityPlan<String> {
        &self.plan
    }

    fn recommended_wire_type(&self, indicators: &dyn WireTypeIndicators) -> WireTypeCode {
        text_wire_type(indicators)
    }
}

// ─── characters ──────────────────────────────────────────────────────

/// Descriptor for `characters`.
#[derive(Debug, Default)]
pub struct CharactersDescriptor {
    plan: ArrayMutabilityPlan<char>,
}

impl CharactersDescriptor {
    pub const fn new() -> Self {
        Self {
            plan: ArrayMutabilityPlan::new(),
        }
    }
}

impl TypeDescriptor<Vec<char>> for CharactersDescriptor {
    fn type_name(&self) -> &'static str {
        "characters"
    }

    fn to_string(&self, value: &Vec<char>) -> String {
        value.iter().collect()
    }

    fn from_string(&self, text: &str) -> Result<Vec<char>, ConversionError> {
        Ok(text.chars().collect())
    }

    fn are_equal(&self, a: Option<&Vec<char>>, b: Option<&Vec<char>>) -> bool {
        default_are_equal(a, b)
    }

    fn extract_hash_code(&self, value: &Vec<char>) -> u64 {
        hash_of(value)
    }

    fn unwrap(
        &self,
        value: Option<&Vec<char>>,
        kind: ValueKind,
        _session: &dyn SessionContext,
    ) -> Result<Option<JdbcValue>, TypeError> {
        let Some(v) = value else { return Ok(None) };
        match kind {
            ValueKind::Characters => Ok(Some(JdbcValue::Characters(v.clone()))),
            ValueKind::String => Ok(Some(JdbcValue::String(self.to_string(v)))),
            other => Err(unknown_unwrap(self.type_name(), other)),
        }
    }

    fn wrap(
        &self,
        value: Option<JdbcValue>,
        _session: &dyn SessionContext,
    ) -> Result<Option<Vec<char>>, TypeError> {
        let Some(value) = value else { return Ok(None) };
        match value {
            JdbcValue::Characters(chars) => Ok(Some(chars)),
            JdbcValue::String(s) => Ok(Some(s.chars().collect())),
            other => Err(unknown_wrap(self.type_name(), &other)),
        }
    }

    fn supported_kinds(&self) -> &'static [ValueKind] {
        &[ValueKind::Characters, ValueKind::String]
    }

    fn comparator(&self) -> Comparator<Vec<char>> {
        Comparator::unordered()
    }

    fn mutability_plan(&self) -> &dyn MutabilityPlan<Vec<char>> {
        &self.plan
    }

    fn recommended_wire_type(&self, indicators: &dyn WireTypeIndicators) -> WireTypeCode {
        text_wire_type(indicators)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relmap_core::{ColumnIndicators, DefaultSessionContext, TypeSettings};

    #[test]
    fn character_requires_one_char() {
        let d = CharacterDescriptor::new();
        assert_eq!(d.from_string("é").unwrap(), 'é');
        assert!(matches!(
            d.from_string("ab"),
            Err(ConversionError::WrongLength { expected: 1, actual: 2, .. })
        ));
        assert!(matches!(
            d.from_string(""),
            Err(ConversionError::WrongLength { actual: 0, .. })
        ));
    }

    #[test]
    fn character_code_points() {
        let d = CharacterDescriptor::new();
        let ctx = DefaultSessionContext::new();
        assert!(matches!(
            d.unwrap(Some(&'A'), ValueKind::Integer, &ctx).unwrap(),
            Some(JdbcValue::Integer(65))
        ));
        assert_eq!(d.wrap(Some(JdbcValue::Integer(97)), &ctx).unwrap(), Some('a'));
        assert!(d.wrap(Some(JdbcValue::Integer(0xD800)), &ctx).is_err());
        assert!(d.wrap(Some(JdbcValue::Integer(-1)), &ctx).is_err());
    }

    #[test]
    fn string_and_characters_interchange() {
        let s = StringDescriptor::new();
        let c = CharactersDescriptor::new();
        let ctx = DefaultSessionContext::new();
        let chars = s
            .unwrap(Some(&"héllo".to_string()), ValueKind::Characters, &ctx)
            .unwrap();
        let back = c.wrap(chars, &ctx).unwrap().unwrap();
        assert_eq!(back, vec!['h', 'é', 'l', 'l', 'o']);
        assert_eq!(c.to_string(&back), "héllo");
    }

    #[test]
    fn characters_copy_is_independent() {
        let c = CharactersDescriptor::new();
        let original = vec!['a', 'b'];
        let mut copy = c.mutability_plan().deep_copy(Some(&original)).unwrap();
        copy.push('c');
        assert_eq!(original.len(), 2);
        assert!(c.mutability_plan().is_mutable());
        assert!(!c.comparator().is_ordered());
    }

    #[test]
    fn text_wire_types() {
        let settings = TypeSettings::default();
        let plain = ColumnIndicators::new(&settings);
        assert_eq!(text_wire_type(&plain), WireTypeCode::VarChar);
        assert_eq!(text_wire_type(&plain.length(10_000)), WireTypeCode::LongVarChar);
        assert_eq!(text_wire_type(&plain.lob(true)), WireTypeCode::Clob);
        assert_eq!(text_wire_type(&plain.nationalized(true)), WireTypeCode::NVarChar);
        assert_eq!(
            text_wire_type(&plain.nationalized(true).lob(true)),
            WireTypeCode::NClob
        );
        assert_eq!(
            CharacterDescriptor::new().recommended_wire_type(&plain.nationalized(true)),
            WireTypeCode::NChar
        );
    }

    #[test]
    fn unsupported_kinds() {
        let ctx = DefaultSessionContext::new();
        assert!(StringDescriptor::new()
            .unwrap(Some(&"x".to_string()), ValueKind::Bytes, &ctx)
            .is_err());
        assert!(CharactersDescriptor::new()
            .wrap(Some(JdbcValue::Integer(1)), &ctx)
            .is_err());
    }
}
