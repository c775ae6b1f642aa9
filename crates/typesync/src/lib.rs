//! ## Crate layout
//! - `schema`: declarations, the type registry, models and validation.
//! - `core`: records, stores, identity tracking and the synchronizers.
//! - `macros`: the `Declare` derive.
//! - `config`: TOML configuration of a startup run.
//! - `startup`: the once-per-process entry point.

pub use typesync_core as core;
pub use typesync_derive as macros;
pub use typesync_schema as schema;

pub mod config;
pub mod startup;

// export so the derive resolves inside this crate too
extern crate self as typesync;

/// re-exports
///
/// generated code reaches its dependencies through here, so downstream
/// crates do not have to depend on them directly
pub mod __reexports {
    pub use uuid;
}

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use config::{ConfigError, FailurePolicy, TypesyncConfig};
pub use startup::{CategoryFailure, Startup, StartupError, StartupReport};

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        config::{FailurePolicy, TypesyncConfig},
        core::prelude::*,
        macros::Declare,
        schema::prelude::*,
        startup::{Startup, StartupReport},
    };
}
