//! # Conversion Subcommands
//!
//! `convert` parses a literal and unwraps it to a value kind, then wraps the
//! result back. `cache` sends a literal through the type's mutability plan.

use anyhow::{Context, Result};
use clap::Args;
use relmap_core::ValueKind;

use crate::Environment;

/// Arguments for the convert subcommand.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Logical type name.
    pub type_name: String,

    /// Literal in the type's text form.
    pub text: String,

    /// Value kind to unwrap to, e.g. `string`, `big_int` or `timestamp`.
    #[arg(long)]
    pub to: ValueKind,
}

/// Arguments for the cache subcommand.
#[derive(Args, Debug)]
pub struct CacheArgs {
    /// Logical type name.
    pub type_name: String,

    /// Literal in the type's text form.
    pub text: String,
}

/// Result of a `convert` run.
#[derive(Debug, PartialEq, Eq)]
pub struct Conversion {
    pub kind: ValueKind,
    /// The relational value, rendered.
    pub wire: String,
    /// The relational value wrapped back, in canonical text form.
    pub back: String,
}

/// Parse `text` as `type_name`, unwrap to `kind` and wrap back.
pub fn convert(env: &Environment, type_name: &str, text: &str, kind: ValueKind) -> Result<Conversion> {
    let descriptor = env.descriptor(type_name)?;
    let wire = descriptor
        .text_to_wire(text, kind, &env.session)?
        .context("conversion produced no value")?;
    let rendered = wire.to_string();
    let back = descriptor
        .wire_to_text(wire, &env.session)?
        .context("wrapping produced no value")?;
    Ok(Conversion {
        kind,
        wire: rendered,
        back,
    })
}

/// Execute the convert subcommand.
pub fn run_convert(env: &Environment, args: &ConvertArgs) -> Result<u8> {
    let conversion = convert(env, &args.type_name, &args.text, args.to)
        .with_context(|| format!("cannot convert \"{}\" as `{}`", args.text, args.type_name))?;
    println!("  {}: {}", conversion.kind, conversion.wire);
    println!("  back: {}", conversion.back);
    Ok(0)
}

/// Execute the cache subcommand.
pub fn run_cache(env: &Environment, args: &CacheArgs) -> Result<u8> {
    let descriptor = env.descriptor(&args.type_name)?;
    let restored = descriptor
        .cache_round_trip_text(&args.text, &env.session)?
        .context("cache produced no value")?;
    let equal = descriptor.equal_text(&args.text, &restored)?;
    println!(
        "  plan:     {}",
        if descriptor.is_mutable() { "mutable" } else { "immutable" }
    );
    println!("  restored: {restored}");
    println!("  equal:    {equal}");
    Ok(if equal { 0 } else { 1 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use relmap_core::TypeSettings;

    fn env() -> Environment {
        Environment::with_settings(TypeSettings::default())
    }

    #[test]
    fn narrowing_conversion() {
        let c = convert(&env(), "integer", "300", ValueKind::TinyInt).unwrap();
        assert_eq!(c.wire, "44");
        assert_eq!(c.back, "44");
    }

    #[test]
    fn boolean_as_char() {
        let c = convert(&env(), "yes_no", "true", ValueKind::Char).unwrap();
        assert_eq!(c.wire, "Y");
        assert_eq!(c.back, "true");
    }

    #[test]
    fn jdbc_zone_from_settings() {
        let settings = TypeSettings {
            jdbc_time_zone: "-05:00".to_string(),
            ..TypeSettings::default()
        };
        let env = Environment::with_settings(settings);
        let c = convert(&env, "instant", "2024-06-01T12:00:00Z", ValueKind::Timestamp).unwrap();
        assert_eq!(c.wire, "2024-06-01 07:00:00");
        assert_eq!(c.back, "2024-06-01T12:00:00Z");
    }

    #[test]
    fn unsupported_kind_fails() {
        assert!(convert(&env(), "uuid", "67e55044-10b1-426f-9247-bb680e5fe0c8", ValueKind::Date).is_err());
        assert!(convert(&env(), "integer", "twelve", ValueKind::Integer).is_err());
    }
}
