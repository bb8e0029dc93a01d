//! Validating serialize/deserialize entry point for hedwig messages.
//!
//! [`Validator`] is the "just works" layer: build it once from a schema set
//! and a [`ValidatorConfig`], then call [`Validator::serialize`] before
//! publishing and [`Validator::deserialize`] on every received message.
//! Every failure comes back as an [`Error`], either a schema problem or a
//! validation problem.

pub mod config;
pub mod defaults;
pub mod error;
pub mod validator;

pub use config::{ValidatorConfig, WireMode};
pub use defaults::{default_schemas, install_default_schemas};
pub use error::{Error, Result, SchemaError, ValidationError};
pub use validator::Validator;
