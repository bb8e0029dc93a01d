use bytes::Bytes;
use hedwig_schema::{Decoder, Payload, SchemaId, SchemaResolver};
use prost::Message as _;
use tracing::trace;

use crate::attributes::{AttributeSource, Attributes, MetaAttributes};
use crate::error::{Result, ValidationError};
use crate::message::{DecodedMessage, Message, Metadata};
use crate::wire::{timestamp_from_millis, timestamp_to_millis, MetadataV1, PayloadV1};

/// The only envelope format version currently produced and accepted.
pub const FORMAT_VERSION: &str = "1.0";

/// One wire convention for hedwig messages.
///
/// Implementations are stateless after construction and safe to share
/// between threads.
pub trait EnvelopeCodec: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Encode a message into a body and transport attributes.
    fn encode(&self, message: &Message) -> Result<(Bytes, Attributes)>;

    /// Decode a received body and its transport attributes.
    fn decode(&self, body: &[u8], attributes: &dyn AttributeSource) -> Result<DecodedMessage>;

    /// The resolver used to find payload decoders.
    fn resolver(&self) -> &SchemaResolver;
}

/// Metadata and payload packed into one `PayloadV1` body.
///
/// The returned attributes are the message headers, for transport-level
/// filtering only; decoding ignores them.
#[derive(Debug, Clone)]
pub struct ContainerCodec {
    resolver: SchemaResolver,
    check_format_version: bool,
}

impl ContainerCodec {
    pub fn new(resolver: SchemaResolver) -> Self {
        Self {
            resolver,
            check_format_version: true,
        }
    }

    /// Toggle rejection of envelopes whose format version is not `1.0`.
    pub fn check_format_version(mut self, enabled: bool) -> Self {
        self.check_format_version = enabled;
        self
    }
}

impl EnvelopeCodec for ContainerCodec {
    fn name(&self) -> &'static str {
        "container"
    }

    fn encode(&self, message: &Message) -> Result<(Bytes, Attributes)> {
        let metadata = message.metadata();
        let envelope = PayloadV1 {
            format_version: FORMAT_VERSION.to_string(),
            id: message.id().to_string(),
            metadata: Some(MetadataV1 {
                publisher: metadata.publisher().to_string(),
                timestamp: Some(timestamp_from_millis(metadata.timestamp())),
                headers: metadata.headers().clone(),
            }),
            schema: message.schema().to_string(),
            data: message.data().encode_payload(),
        };

        let body = Bytes::from(envelope.encode_to_vec());
        trace!(
            id = message.id(),
            schema = %message.schema(),
            size = body.len(),
            "encoded container envelope"
        );
        Ok((body, metadata.headers().clone()))
    }

    fn decode(&self, body: &[u8], _attributes: &dyn AttributeSource) -> Result<DecodedMessage> {
        let envelope = PayloadV1::decode(body).map_err(ValidationError::InvalidEnvelope)?;

        // proto3 decodes an empty body to all defaults
        if envelope.format_version.is_empty() {
            return Err(ValidationError::MissingEnvelopeField("format_version").into());
        }
        if envelope.schema.is_empty() {
            return Err(ValidationError::MissingEnvelopeField("schema").into());
        }
        if self.check_format_version {
            ensure_format_version(&envelope.format_version)?;
        }
        let schema = SchemaId::parse(&envelope.schema)?;
        let decoder = self.resolver.resolve(&schema)?;
        let data = decode_data(decoder, &envelope.data)?;

        let metadata = match envelope.metadata {
            Some(metadata) => Metadata::new(
                metadata.publisher,
                metadata
                    .timestamp
                    .as_ref()
                    .map_or(0, timestamp_to_millis),
                metadata.headers,
            ),
            None => Metadata::default(),
        };

        trace!(id = %envelope.id, %schema, "decoded container envelope");
        Ok(DecodedMessage {
            id: envelope.id,
            schema,
            format_version: envelope.format_version,
            metadata,
            data,
            provider_metadata: (),
        })
    }

    fn resolver(&self) -> &SchemaResolver {
        &self.resolver
    }
}

/// Bare payload body with metadata in `hedwig_*` transport attributes.
#[derive(Debug, Clone)]
pub struct AttributeCodec {
    resolver: SchemaResolver,
    check_format_version: bool,
}

impl AttributeCodec {
    pub fn new(resolver: SchemaResolver) -> Self {
        Self {
            resolver,
            check_format_version: true,
        }
    }

    /// Toggle rejection of attributes whose format version is not `1.0`.
    pub fn check_format_version(mut self, enabled: bool) -> Self {
        self.check_format_version = enabled;
        self
    }
}

impl EnvelopeCodec for AttributeCodec {
    fn name(&self) -> &'static str {
        "attributes"
    }

    fn encode(&self, message: &Message) -> Result<(Bytes, Attributes)> {
        let metadata = message.metadata();
        let attributes = MetaAttributes {
            format_version: FORMAT_VERSION.to_string(),
            schema: message.schema().to_string(),
            id: message.id().to_string(),
            publisher: metadata.publisher().to_string(),
            timestamp: metadata.timestamp(),
            headers: metadata.headers().clone(),
        }
        .to_attributes()?;

        let body = Bytes::from(message.data().encode_payload());
        trace!(
            id = message.id(),
            schema = %message.schema(),
            size = body.len(),
            "encoded attribute message"
        );
        Ok((body, attributes))
    }

    fn decode(&self, body: &[u8], attributes: &dyn AttributeSource) -> Result<DecodedMessage> {
        let meta = MetaAttributes::from_source(attributes)?;

        if self.check_format_version {
            ensure_format_version(&meta.format_version)?;
        }
        let schema = SchemaId::parse(&meta.schema)?;
        let decoder = self.resolver.resolve(&schema)?;
        let data = decode_data(decoder, body)?;

        trace!(id = %meta.id, %schema, "decoded attribute message");
        Ok(DecodedMessage {
            id: meta.id,
            schema,
            format_version: meta.format_version,
            metadata: Metadata::new(meta.publisher, meta.timestamp, meta.headers),
            data,
            provider_metadata: (),
        })
    }

    fn resolver(&self) -> &SchemaResolver {
        &self.resolver
    }
}

fn ensure_format_version(format_version: &str) -> std::result::Result<(), ValidationError> {
    if format_version == FORMAT_VERSION {
        Ok(())
    } else {
        Err(ValidationError::UnsupportedFormatVersion(
            format_version.to_string(),
        ))
    }
}

fn decode_data(
    decoder: Decoder,
    bytes: &[u8],
) -> std::result::Result<Box<dyn Payload>, ValidationError> {
    decoder
        .decode(bytes)
        .map_err(|err| ValidationError::InvalidData {
            message: decoder.name(),
            detail: err.to_string(),
        })
}
