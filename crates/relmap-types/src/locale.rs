//! # Locale and Currency Types
//!
//! - `locale`: a [`Locale`] of language, country and variant, written
//!   `language_COUNTRY_variant` with trailing empty parts dropped (`en`,
//!   `en_US`, `_GB`, `de__POSIX`).
//! - `currency`: a [`CurrencyCode`], three upper-case ASCII letters.
//!
//! Both are stored as text and have no meaningful order.

use std::str::FromStr;

use relmap_core::{
    default_are_equal, hash_of, unknown_unwrap, unknown_wrap, Comparator, ConversionError,
    ImmutableMutabilityPlan, JdbcValue, MutabilityPlan, SessionContext, TypeDescriptor, TypeError,
    ValueKind, WireTypeCode, WireTypeIndicators,
};

// ─── Values ──────────────────────────────────────────────────────────

/// An ISO 4217 style currency code, e.g. `EUR`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CurrencyCode {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let len = s.chars().count();
        if len != 3 {
            return Err(ConversionError::WrongLength {
                type_name: "currency".to_string(),
                text: s.to_string(),
                expected: 3,
                actual: len,
            });
        }
        if !s.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(ConversionError::invalid_literal(
                "currency",
                s,
                "expected three upper-case ASCII letters",
            ));
        }
        Ok(Self(s.to_string()))
    }
}

/// A language, country and variant triple. Any part may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Locale {
    language: String,
    country: String,
    variant: String,
}

impl Locale {
    /// Build a locale, lower-casing the language and upper-casing the country.
    pub fn new(language: &str, country: &str, variant: &str) -> Result<Self, ConversionError> {
        let text = format!("{language}_{country}_{variant}");
        if !language.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConversionError::invalid_literal("locale", &text, "language must be letters"));
        }
        if !country.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ConversionError::invalid_literal(
                "locale",
                &text,
                "country must be letters or digits",
            ));
        }
        Ok(Self {
            language: language.to_ascii_lowercase(),
            country: country.to_ascii_uppercase(),
            variant: variant.to_string(),
        })
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn variant(&self) -> &str {
        &self.variant
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.language)?;
        if !self.country.is_empty() || !self.variant.is_empty() {
            write!(f, "_{}", self.country)?;
        }
        if !self.variant.is_empty() {
            write!(f, "_{}", self.variant)?;
        }
        Ok(())
    }
}

impl FromStr for Locale {
    type Err = ConversionError;

    /// The variant is everything after the second `_`, underscores included.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, '_');
        let language = parts.next().unwrap_or_default();
        let country = parts.next().unwrap_or_default();
        let variant = parts.next().unwrap_or_default();
        if s.ends_with('_') && variant.is_empty() {
            return Err(ConversionError::invalid_literal("locale", s, "trailing separator"));
        }
        Self::new(language, country, variant)
    }
}

// ─── Descriptors ─────────────────────────────────────────────────────

macro_rules! text_descriptor {
    ($(#[$meta:meta])* $name:ident, $value:ty, $type_name:literal) => {
        $(#[$meta])*
        #[derive(Debug, Default)]
        pub struct $name {
            plan: ImmutableMutabilityPlan<$value>,
        }

        impl $name {
            pub const fn new() -> Self {
                Self {
                    plan: ImmutableMutabilityPlan::new(),
                }
            }
        }

        impl TypeDescriptor<$value> for $name {
            fn type_name(&self) -> &'static str {
                $type_name
            }

            fn to_string(&self, value: &$value) -> String {
                value.to_string()
            }

            fn from_string(&self, text: &str) -> Result<$value, ConversionError> {
                text.parse()
            }

            fn are_equal(&self, a: Option<&$value>, b: Option<&$value>) -> bool {
                default_are_equal(a, b)
            }

            fn extract_hash_code(&self, value: &$value) -> u64 {
                hash_of(value)
            }

            fn unwrap(
                &self,
                value: Option<&$value>,
                kind: ValueKind,
                _session: &dyn SessionContext,
            ) -> Result<Option<JdbcValue>, TypeError> {
                let Some(v) = value else { return Ok(None) };
                match kind {
                    ValueKind::String => Ok(Some(JdbcValue::String(v.to_string()))),
                    other => Err(unknown_unwrap($type_name, other)),
                }
            }

            fn wrap(
                &self,
                value: Option<JdbcValue>,
                _session: &dyn SessionContext,
            ) -> Result<Option<$value>, TypeError> {
                let Some(value) = value else { return Ok(None) };
                match value {
                    JdbcValue::String(s) => Ok(Some(self.from_string(&s)?)),
                    other => Err(unknown_wrap($type_name, &other)),
                }
            }

            fn supported_kinds(&self) -> &'static [ValueKind] {
                &[ValueKind::String]
            }

            fn comparator(&self) -> Comparator<$value> {
                Comparator::unordered()
            }

            fn mutability_plan(&self) -> &dyn MutabilityPlan<$value> {
                &self.plan
            }

            fn recommended_wire_type(&self, _indicators: &dyn WireTypeIndicators) -> WireTypeCode {
                WireTypeCode::VarChar
            }
        }
    };
}

text_descriptor!(
    /// Descriptor for `currency`.
    CurrencyDescriptor,
    CurrencyCode,
    "currency"
);

text_descriptor!(
    /// Descriptor for `locale`.
    LocaleDescriptor,
    Locale,
    "locale"
);

#[cfg(test)]
mod tests {
    use super::*;
    use relmap_core::DefaultSessionContext;

    #[test]
    fn currency_validation() {
        let d = CurrencyDescriptor::new();
        assert_eq!(d.from_string("EUR").unwrap().as_str(), "EUR");
        assert!(matches!(
            d.from_string("EURO"),
            Err(ConversionError::WrongLength { expected: 3, actual: 4, .. })
        ));
        assert!(matches!(d.from_string("eur"), Err(ConversionError::InvalidLiteral { .. })));
    }

    #[test]
    fn locale_text_forms() {
        let d = LocaleDescriptor::new();
        for text in ["en", "en_US", "_GB", "de__POSIX", "th_TH_TH_#u-nu-thai", ""] {
            let locale = d.from_string(text).unwrap();
            assert_eq!(d.to_string(&locale), text);
        }
        let locale = d.from_string("EN_us").unwrap();
        assert_eq!(locale.language(), "en");
        assert_eq!(locale.country(), "US");
        assert!(locale.variant().is_empty());
    }

    #[test]
    fn locale_rejects_bad_parts() {
        let d = LocaleDescriptor::new();
        assert!(d.from_string("e1").is_err());
        assert!(d.from_string("en_U-S").is_err());
        assert!(d.from_string("en_").is_err());
    }

    #[test]
    fn text_coercion_only() {
        let d = LocaleDescriptor::new();
        let ctx = DefaultSessionContext::new();
        let locale = d.from_string("fr_CA").unwrap();
        let text = d.unwrap(Some(&locale), ValueKind::String, &ctx).unwrap();
        assert_eq!(d.wrap(text, &ctx).unwrap(), Some(locale.clone()));
        assert!(d.unwrap(Some(&locale), ValueKind::Integer, &ctx).is_err());
        assert!(!d.comparator().is_ordered());
    }
}
