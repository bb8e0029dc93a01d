//! Envelope codecs for hedwig messages.
//!
//! A hedwig message travels in one of two wire conventions:
//! - **container**: metadata, schema id and the encoded payload are packed
//!   into a single Protobuf `PayloadV1` envelope that forms the message body
//! - **transport attributes**: the body is the bare encoded payload and the
//!   metadata rides in `hedwig_*` transport attributes
//!
//! Both are implementations of [`EnvelopeCodec`], picked once by the caller.
//! Decoding classifies every failure as either a [`SchemaError`] (the schema
//! is malformed or has no registered payload type) or a [`ValidationError`]
//! (the body or attributes are missing, mistyped, or undecodable).

pub mod attributes;
pub mod codec;
pub mod error;
pub mod message;
pub mod wire;

pub use attributes::{
    AttributeSource, Attributes, MetaAttributes, RawAttribute, FORMAT_VERSION_ATTR, HEADERS_ATTR,
    ID_ATTR, PUBLISHER_ATTR, RESERVED_PREFIX, SCHEMA_ATTR, TIMESTAMP_ATTR,
};
pub use codec::{AttributeCodec, ContainerCodec, EnvelopeCodec, FORMAT_VERSION};
pub use error::{Error, Result, ValidationError};
pub use hedwig_schema::SchemaError;
pub use message::{DecodedMessage, Message, MessageBuilder, Metadata};
pub use wire::{MetadataV1, PayloadV1};
