use std::fmt;

use bytes::Bytes;
use hedwig_envelope::{
    AttributeCodec, AttributeSource, Attributes, ContainerCodec, DecodedMessage, EnvelopeCodec,
    Message,
};
use hedwig_schema::{SchemaError, SchemaResolver, SchemaSet};
use tracing::debug;

use crate::config::{ValidatorConfig, WireMode};
use crate::defaults::default_schemas;
use crate::error::Result;

/// Validating entry point for serializing and deserializing hedwig messages.
///
/// The wire convention is fixed at construction. After that the validator
/// holds only read-only state and can be shared across threads.
pub struct Validator {
    codec: Box<dyn EnvelopeCodec>,
    config: ValidatorConfig,
}

impl Validator {
    /// Build a validator.
    ///
    /// With `schemas` omitted, the process default set is used. Fails if
    /// there is no usable set or it does not cover its declared types.
    pub fn new(
        config: ValidatorConfig,
        schemas: Option<SchemaSet>,
    ) -> std::result::Result<Self, SchemaError> {
        let schemas = match schemas {
            Some(schemas) => schemas,
            None => default_schemas()
                .cloned()
                .ok_or(SchemaError::EmptySchemaSet)?,
        };
        let resolver = SchemaResolver::new(schemas)?;

        let codec: Box<dyn EnvelopeCodec> = match config.wire_mode {
            WireMode::Attributes => Box::new(
                AttributeCodec::new(resolver).check_format_version(config.check_format_version),
            ),
            WireMode::Container => Box::new(
                ContainerCodec::new(resolver).check_format_version(config.check_format_version),
            ),
        };

        debug!(codec = codec.name(), "validator ready");
        Ok(Self { codec, config })
    }

    /// Build a validator with default config from an explicit schema set.
    pub fn with_schemas(schemas: SchemaSet) -> std::result::Result<Self, SchemaError> {
        Self::new(ValidatorConfig::default(), Some(schemas))
    }

    /// Encode a message for publishing.
    ///
    /// The payload is encoded as-is; its field-level contents are not checked.
    pub fn serialize(&self, message: &Message) -> Result<(Bytes, Attributes)> {
        self.codec.encode(message)
    }

    /// Validate and decode a received message.
    ///
    /// `provider_metadata` is passed through untouched to the result.
    pub fn deserialize<P>(
        &self,
        body: &[u8],
        attributes: &dyn AttributeSource,
        provider_metadata: P,
    ) -> Result<DecodedMessage<P>> {
        match self.codec.decode(body, attributes) {
            Ok(decoded) => Ok(decoded.with_provider_metadata(provider_metadata)),
            Err(err) => {
                debug!(
                    codec = self.codec.name(),
                    schema_error = err.is_schema(),
                    error = %err,
                    "rejected message"
                );
                Err(err)
            }
        }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn wire_mode(&self) -> WireMode {
        self.config.wire_mode
    }

    pub fn resolver(&self) -> &SchemaResolver {
        self.codec.resolver()
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("codec", &self.codec.name())
            .field("config", &self.config)
            .field("types", &self.resolver().type_names())
            .finish()
    }
}
