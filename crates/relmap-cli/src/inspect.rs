//! # Inspection Subcommands
//!
//! `types`, `describe` and `resolve`: read-only views of the registry.

use anyhow::Result;
use clap::Args;
use relmap_core::{ColumnIndicators, DynDescriptor, EnumStorage, TemporalPrecision};
use serde::Serialize;

use crate::Environment;

/// Arguments for the types subcommand.
#[derive(Args, Debug)]
pub struct TypesArgs {
    /// Only list temporal types.
    #[arg(long)]
    pub temporal: bool,

    /// Emit JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the describe subcommand.
#[derive(Args, Debug)]
pub struct DescribeArgs {
    /// Logical type name, e.g. `string` or `instant`.
    pub type_name: String,

    /// Treat the column as nationalized.
    #[arg(long)]
    pub nationalized: bool,

    /// Treat the column as a LOB.
    #[arg(long)]
    pub lob: bool,

    /// Declared column length.
    #[arg(long)]
    pub length: Option<u32>,

    /// Enum storage for the column (`ordinal` or `string`).
    #[arg(long)]
    pub enum_storage: Option<EnumStorage>,

    /// Emit JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the resolve subcommand.
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Temporal type to resolve from.
    pub type_name: String,

    /// Requested precision (`date`, `time` or `timestamp`). Defaults to the
    /// type's own.
    pub precision: Option<TemporalPrecision>,
}

/// Everything `describe` reports about a type.
#[derive(Debug, Serialize)]
pub struct TypeReport {
    pub name: &'static str,
    pub value_type: &'static str,
    pub kinds: Vec<&'static str>,
    pub mutable: bool,
    pub ordered: bool,
    pub precision: Option<TemporalPrecision>,
    pub precisions: Vec<TemporalPrecision>,
    pub wire_type: &'static str,
    pub wire_code: i32,
}

/// Build the report for `descriptor` under the column flags in `args`.
pub fn describe(env: &Environment, descriptor: &dyn DynDescriptor, args: &DescribeArgs) -> TypeReport {
    let mut indicators = ColumnIndicators::new(&env.settings).lob(args.lob);
    if args.nationalized {
        indicators = indicators.nationalized(true);
    }
    if let Some(length) = args.length {
        indicators = indicators.length(length);
    }
    if let Some(storage) = args.enum_storage {
        indicators = indicators.enum_storage(storage);
    }
    let wire = descriptor.recommended_wire_type(&indicators);
    TypeReport {
        name: descriptor.type_name(),
        value_type: descriptor.value_type_name(),
        kinds: descriptor.supported_kinds().iter().map(|k| k.as_str()).collect(),
        mutable: descriptor.is_mutable(),
        ordered: descriptor.is_ordered(),
        precision: descriptor.temporal_precision(),
        precisions: descriptor.supported_precisions(),
        wire_type: wire.as_str(),
        wire_code: wire.code(),
    }
}

/// Text rendering of a [`TypeReport`].
pub fn render_report(report: &TypeReport) -> String {
    let precisions = report
        .precisions
        .iter()
        .map(|p| p.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let mut out = String::new();
    out.push_str(&format!("  name:        {}\n", report.name));
    out.push_str(&format!("  value type:  {}\n", report.value_type));
    out.push_str(&format!("  kinds:       {}\n", report.kinds.join(", ")));
    out.push_str(&format!(
        "  plan:        {}\n",
        if report.mutable { "mutable" } else { "immutable" }
    ));
    out.push_str(&format!(
        "  order:       {}\n",
        if report.ordered { "ordered" } else { "none" }
    ));
    if let Some(precision) = report.precision {
        out.push_str(&format!("  precision:   {precision} (resolves to: {precisions})\n"));
    }
    out.push_str(&format!("  column:      {} ({})\n", report.wire_type, report.wire_code));
    out
}

/// One line per registered type, optionally only temporal ones.
pub fn list_types(env: &Environment, temporal_only: bool) -> Vec<(&'static str, &'static str)> {
    env.registry
        .iter()
        .filter(|d| !temporal_only || d.temporal_precision().is_some())
        .map(|d| (d.type_name(), d.value_type_name()))
        .collect()
}

/// Execute the types subcommand.
pub fn run_types(env: &Environment, args: &TypesArgs) -> Result<u8> {
    let types = list_types(env, args.temporal);
    if args.json {
        let entries: Vec<_> = types
            .iter()
            .map(|(name, value_type)| serde_json::json!({ "name": name, "value_type": value_type }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(0);
    }
    for (name, value_type) in &types {
        println!("  {name:<18} {value_type}");
    }
    println!();
    println!("Total: {} types", types.len());
    Ok(0)
}

/// Execute the describe subcommand.
pub fn run_describe(env: &Environment, args: &DescribeArgs) -> Result<u8> {
    let descriptor = env.descriptor(&args.type_name)?;
    let report = describe(env, descriptor.as_ref(), args);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_report(&report));
    }
    Ok(0)
}

/// Execute the resolve subcommand.
pub fn run_resolve(env: &Environment, args: &ResolveArgs) -> Result<u8> {
    let descriptor = env.descriptor(&args.type_name)?;
    let resolved = descriptor.resolve_for_precision(args.precision, env.registry)?;
    tracing::debug!(from = %args.type_name, to = resolved, "resolved");
    println!("{resolved}");
    Ok(0)
}
