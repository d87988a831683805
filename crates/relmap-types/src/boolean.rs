//! # Boolean Types
//!
//! Four logical types share `bool` as their value and differ only in the
//! characters used for a single-character column and in the column type
//! they recommend:
//!
//! | name              | true / false | recommended column         |
//! |-------------------|--------------|----------------------------|
//! | `boolean`         | `Y` / `N`    | the preferred boolean type |
//! | `yes_no`          | `Y` / `N`    | `CHAR`                     |
//! | `true_false`      | `T` / `F`    | `CHAR`                     |
//! | `numeric_boolean` | `Y` / `N`    | `INTEGER`                  |
//!
//! Text is always `true` / `false`. A one-character string handed to
//! `wrap` is read with the type's characters, so a `CHAR(1)` column
//! round-trips through both `Char` and `String`.

use relmap_core::{
    default_are_equal, hash_of, unknown_unwrap, unknown_wrap, Comparator, ConversionError,
    ImmutableMutabilityPlan, JdbcValue, MutabilityPlan, SessionContext, TypeDescriptor, TypeError,
    ValueKind, WireTypeCode, WireTypeIndicators,
};

const KINDS: &[ValueKind] = &[
    ValueKind::Boolean,
    ValueKind::TinyInt,
    ValueKind::SmallInt,
    ValueKind::Integer,
    ValueKind::BigInt,
    ValueKind::Char,
    ValueKind::String,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Preferred,
    Char,
    Integer,
}

/// Descriptor for a `bool`-valued logical type.
#[derive(Debug)]
pub struct BooleanDescriptor {
    name: &'static str,
    true_char: char,
    false_char: char,
    column: Column,
    plan: ImmutableMutabilityPlan<bool>,
}

impl BooleanDescriptor {
    const fn new(name: &'static str, true_char: char, false_char: char, column: Column) -> Self {
        Self {
            name,
            true_char,
            false_char,
            column,
            plan: ImmutableMutabilityPlan::new(),
        }
    }

    /// `boolean`: native column of the preferred boolean type.
    pub const fn boolean() -> Self {
        Self::new("boolean", 'Y', 'N', Column::Preferred)
    }

    /// `yes_no`: `CHAR` column holding `Y` or `N`.
    pub const fn yes_no() -> Self {
        Self::new("yes_no", 'Y', 'N', Column::Char)
    }

    /// `true_false`: `CHAR` column holding `T` or `F`.
    pub const fn true_false() -> Self {
        Self::new("true_false", 'T', 'F', Column::Char)
    }

    /// `numeric_boolean`: `INTEGER` column holding 1 or 0.
    pub const fn numeric_boolean() -> Self {
        Self::new("numeric_boolean", 'Y', 'N', Column::Integer)
    }

    fn to_char(&self, value: bool) -> char {
        if value {
            self.true_char
        } else {
            self.false_char
        }
    }

    fn from_char(&self, c: char) -> Result<bool, ConversionError> {
        let upper = c.to_ascii_uppercase();
        if upper == self.true_char {
            Ok(true)
        } else if upper == self.false_char {
            Ok(false)
        } else {
            Err(ConversionError::invalid_literal(
                self.name,
                &c.to_string(),
                format!("expected '{}' or '{}'", self.true_char, self.false_char),
            ))
        }
    }
}

impl TypeDescriptor<bool> for BooleanDescriptor {
    fn type_name(&self) -> &'static str {
        self.name
    }

    fn to_string(&self, value: &bool) -> String {
        value.to_string()
    }

    fn from_string(&self, text: &str) -> Result<bool, ConversionError> {
        if text.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if text.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(ConversionError::invalid_literal(self.name, text, "expected true or false"))
        }
    }

    fn are_equal(&self, a: Option<&bool>, b: Option<&bool>) -> bool {
        default_are_equal(a, b)
    }

    fn extract_hash_code(&self, value: &bool) -> u64 {
        hash_of(value)
    }

    fn unwrap(
        &self,
        value: Option<&bool>,
        kind: ValueKind,
        _session: &dyn SessionContext,
    ) -> Result<Option<JdbcValue>, TypeError> {
        let Some(&v) = value else { return Ok(None) };
        let bit = u8::from(v);
        let out = match kind {
            ValueKind::Boolean => JdbcValue::Boolean(v),
            ValueKind::TinyInt => JdbcValue::TinyInt(bit as i8),
            ValueKind::SmallInt => JdbcValue::SmallInt(i16::from(bit)),
            ValueKind::Integer => JdbcValue::Integer(i32::from(bit)),
            ValueKind::BigInt => JdbcValue::BigInt(i64::from(bit)),
            ValueKind::Char => JdbcValue::Char(self.to_char(v)),
            ValueKind::String if self.column == Column::Char => {
                JdbcValue::String(self.to_char(v).to_string())
            }
            ValueKind::String => JdbcValue::String(self.to_string(&v)),
            other => return Err(unknown_unwrap(self.name, other)),
        };
        Ok(Some(out))
    }

    fn wrap(
        &self,
        value: Option<JdbcValue>,
        _session: &dyn SessionContext,
    ) -> Result<Option<bool>, TypeError> {
        let Some(value) = value else { return Ok(None) };
        let out = match value {
            JdbcValue::Boolean(b) => b,
            JdbcValue::TinyInt(n) => n != 0,
            JdbcValue::SmallInt(n) => n != 0,
            JdbcValue::Integer(n) => n != 0,
            JdbcValue::BigInt(n) => n != 0,
            JdbcValue::Char(c) => self.from_char(c)?,
            JdbcValue::String(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => self.from_char(c)?,
                    _ => self.from_string(&s)?,
                }
            }
            other => return Err(unknown_wrap(self.name, &other)),
        };
        Ok(Some(out))
    }

    fn supported_kinds(&self) -> &'static [ValueKind] {
        KINDS
    }

    fn comparator(&self) -> Comparator<bool> {
        Comparator::natural()
    }

    fn mutability_plan(&self) -> &dyn MutabilityPlan<bool> {
        &self.plan
    }

    fn recommended_wire_type(&self, indicators: &dyn WireTypeIndicators) -> WireTypeCode {
        match self.column {
            Column::Preferred => indicators.preferred_boolean_type(),
            Column::Char => WireTypeCode::Char,
            Column::Integer => WireTypeCode::Integer,
        }
    }
}
