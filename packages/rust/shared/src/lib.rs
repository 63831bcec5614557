//! Shared types, error model, and configuration for mailsplit.
//!
//! This crate is the foundation depended on by all other mailsplit crates.
//! It provides:
//! - [`MailsplitError`], the unified error type
//! - Domain types ([`Category`], [`CategoryMapping`], wire request/response)
//! - Configuration ([`AppConfig`], [`ClientConfig`], config loading)

pub mod config;
pub mod error;
pub mod text;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, ClientConfig, DEFAULT_ENDPOINT, DisplayConfig, EndpointConfig, config_dir,
    config_file_path, init_config, load_config, load_config_from, validate_endpoint,
};
pub use error::{MailsplitError, Result};
pub use text::{is_space, trim_space};
pub use types::{Category, CategoryMapping, FALLBACK_TEXT, GenerateRequest, GenerateResponse};
