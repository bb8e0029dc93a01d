use hedwig_schema::SchemaError;

/// Errors about the shape or content of an envelope, its attributes, or its payload bytes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required transport attribute is missing or not a string.
    #[error(
        "Invalid message attribute: {key} must be string, found: {}",
        .found.as_deref().unwrap_or("None")
    )]
    InvalidAttribute {
        key: &'static str,
        found: Option<String>,
    },

    /// The timestamp attribute is not a decimal integer.
    #[error("Invalid message attribute: hedwig_message_timestamp must be integer, found: {0}")]
    InvalidTimestamp(String),

    /// The headers attribute is not a JSON object of strings.
    #[error("Invalid message attribute: hedwig_headers must be a JSON object of strings: {0}")]
    InvalidHeaders(String),

    /// The envelope declares a format version this codec does not speak.
    #[error("Invalid format version: {0}")]
    UnsupportedFormatVersion(String),

    /// The container body is not a parseable envelope.
    #[error("Invalid payload: cannot parse envelope: {0}")]
    InvalidEnvelope(prost::DecodeError),

    /// The container envelope lacks a required field.
    #[error("Invalid payload: envelope is missing {0}")]
    MissingEnvelopeField(&'static str),

    /// The payload bytes do not decode as the resolved payload type.
    #[error("Invalid data for message: {message}: {detail}")]
    InvalidData {
        message: &'static str,
        detail: String,
    },

    /// A caller-supplied header uses the reserved `hedwig_` prefix.
    #[error("Invalid header key: {0} (the 'hedwig_' prefix is reserved)")]
    ReservedHeader(String),
}

/// Every way encoding or decoding a message can fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl Error {
    /// The schema is malformed or has no registered payload type.
    pub fn is_schema(&self) -> bool {
        matches!(self, Error::Schema(_))
    }

    /// The message itself is malformed.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
