//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! CLI flags (args.rs)
//!     → optional config file (TOML) → loader.rs (parse & deserialize)
//!     → CLI overrides applied
//!     → validation.rs (semantic checks)
//!     → BridgeConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup; the backend handle is never rebuilt
//! - All fields have defaults so the bridge runs with no file at all
//! - Queue key and topic name are constants, not configuration

pub mod args;
pub mod loader;
pub mod schema;
pub mod validation;

pub use args::{BackendCommand, Cli};
pub use loader::{read_config, ConfigError};
pub use schema::{BackendConfig, BackendKind, BridgeConfig, LimitsConfig, ListenerConfig, ObservabilityConfig};
pub use validation::{validate_config, ValidationError};
