//! # relmap-cli — Command-Line Interface for the Type Registry
//!
//! Provides the `relmap` binary for inspecting and exercising the standard
//! type descriptors without writing a program against them.
//!
//! ## Subcommands
//!
//! - `relmap types`: list registered logical types.
//! - `relmap describe`: kinds, plan, ordering, precision and column type.
//! - `relmap convert`: parse a literal and unwrap it to a value kind.
//! - `relmap cache`: pass a literal through the type's cache plan.
//! - `relmap resolve`: resolve a temporal type at a precision.
//!
//! ```bash
//! relmap describe string --length 10000 --nationalized
//! relmap convert integer 300 --to tiny_int
//! relmap --config settings.yaml convert instant 2024-06-01T12:00:00Z --to timestamp
//! relmap resolve timestamp date
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in the subcommand modules; rendering is a pure
//!   function of the registry so it can be tested without a terminal.
//! - Handlers delegate to `relmap-core` and `relmap-types`.

pub mod convert;
pub mod inspect;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use relmap_core::{DefaultSessionContext, DynDescriptor, TypeRegistry, TypeSettings};

/// What every subcommand runs against.
pub struct Environment {
    pub settings: TypeSettings,
    pub session: DefaultSessionContext,
    pub registry: &'static TypeRegistry,
}

impl Environment {
    /// Load settings from `config` when given, defaults otherwise, and pair
    /// them with the standard registry.
    pub fn load(config: Option<&Path>) -> Result<Self> {
        let settings = match config {
            Some(path) => TypeSettings::load(path)
                .with_context(|| format!("failed to load settings: {}", path.display()))?,
            None => TypeSettings::default(),
        };
        Ok(Self::with_settings(settings))
    }

    pub fn with_settings(settings: TypeSettings) -> Self {
        let session = DefaultSessionContext::from_settings(&settings);
        Self {
            settings,
            session,
            registry: relmap_types::global(),
        }
    }

    /// The descriptor registered under `name`.
    pub fn descriptor(&self, name: &str) -> Result<Arc<dyn DynDescriptor>> {
        self.registry.lookup(name).map_err(|e| {
            let known = self.registry.names().collect::<Vec<_>>().join(", ");
            anyhow::anyhow!("{e}. Known types: {known}")
        })
    }
}
