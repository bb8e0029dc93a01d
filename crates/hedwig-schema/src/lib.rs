//! Schema identifiers and payload decoder resolution for hedwig messages.
//!
//! Every hedwig message names its payload shape with a schema identifier of
//! the form `{type}/{major}.{minor}`. This crate parses those identifiers and
//! maps them, by naming convention, onto a registry of Protobuf payload types:
//! `trip_created/1.0` resolves to the type registered as `TripCreatedV1`.
//!
//! The registry is built once from a [`SchemaSet`] and is read-only after
//! that, so a [`SchemaResolver`] can be shared freely between threads.

pub mod error;
pub mod payload;
pub mod resolver;
pub mod schema_id;
pub mod set;

pub use error::{Result, SchemaError};
pub use payload::{Decoder, Payload};
pub use resolver::{expected_type_name, SchemaResolver};
pub use schema_id::SchemaId;
pub use set::SchemaSet;
