/// Errors raised while building or querying the schema registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// The schema identifier is not of the form `{type}/{major}[.{minor}]`.
    #[error("Invalid schema found: {0}")]
    InvalidSchemaId(String),

    /// No payload type is registered under the conventional name.
    #[error(
        "Protobuf message class not found for '{msg_type}' v{major}. Must be named '{expected}'"
    )]
    NotFound {
        msg_type: String,
        major: u32,
        expected: String,
    },

    /// The schema set carries no decodable payload types at all.
    #[error("schema set contains no Protobuf message types")]
    EmptySchemaSet,

    /// Two payload types were registered under the same name.
    #[error("Protobuf message type registered twice: {0}")]
    Duplicate(String),
}

pub type Result<T> = std::result::Result<T, SchemaError>;
