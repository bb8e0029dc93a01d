//! Versioned message envelopes for message-queue transports.
//!
//! hedwig validates, encodes and decodes messages whose payloads are
//! Protobuf types selected by a `{type}/{major}.{minor}` schema identifier.
//!
//! # Crate Structure
//!
//! - [`schema`]: schema identifiers and convention-based decoder resolution
//! - [`envelope`]: container and transport-attribute wire codecs
//! - [`validator`]: the validating serialize/deserialize entry point
//!
//! # Example
//!
//! ```
//! use hedwig::{Message, SchemaId, SchemaSet, Validator};
//!
//! #[derive(Clone, PartialEq, prost::Message)]
//! struct TripCreatedV1 {
//!     #[prost(string, tag = "1")]
//!     vehicle_id: String,
//! }
//!
//! impl prost::Name for TripCreatedV1 {
//!     const NAME: &'static str = "TripCreatedV1";
//!     const PACKAGE: &'static str = "example";
//! }
//!
//! let mut schemas = SchemaSet::new();
//! schemas.register::<TripCreatedV1>()?;
//! let validator = Validator::with_schemas(schemas)?;
//!
//! let trip = TripCreatedV1 { vehicle_id: "C_1234567890123456".into() };
//! let message = Message::builder(SchemaId::new("trip_created", 1, 0), trip.clone())
//!     .publisher("myapp")
//!     .build()?;
//!
//! let (body, attributes) = validator.serialize(&message)?;
//! let decoded = validator.deserialize(&body, &attributes, ())?;
//! assert_eq!(decoded.data_as::<TripCreatedV1>(), Some(&trip));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// Re-export schema types.
pub mod schema {
    pub use hedwig_schema::*;
}

/// Re-export envelope codec types.
pub mod envelope {
    pub use hedwig_envelope::*;
}

/// Re-export validator types.
pub mod validator {
    pub use hedwig_validator::*;
}

pub use hedwig_envelope::{Attributes, DecodedMessage, Message, Metadata};
pub use hedwig_schema::{Payload, SchemaId, SchemaSet};
pub use hedwig_validator::{
    install_default_schemas, Error, Result, SchemaError, ValidationError, Validator,
    ValidatorConfig, WireMode,
};
