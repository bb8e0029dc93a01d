use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SchemaError};

/// A parsed `{type}/{major}.{minor}` schema identifier.
///
/// The minor component is optional on input and defaults to `0`. Only the
/// type and major version take part in decoder resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchemaId {
    msg_type: String,
    major: u32,
    minor: u32,
}

impl SchemaId {
    /// Create a schema identifier from its parts.
    pub fn new(msg_type: impl Into<String>, major: u32, minor: u32) -> Self {
        Self {
            msg_type: msg_type.into(),
            major,
            minor,
        }
    }

    /// Parse `{type}/{major}` or `{type}/{major}.{minor}`.
    pub fn parse(schema: &str) -> Result<Self> {
        let invalid = || SchemaError::InvalidSchemaId(schema.to_string());

        let (msg_type, version) = schema.split_once('/').ok_or_else(invalid)?;
        if !is_valid_type(msg_type) {
            return Err(invalid());
        }

        let (major, minor) = match version.split_once('.') {
            Some((major, minor)) => (major, Some(minor)),
            None => (version, None),
        };
        let major = parse_version_component(major).ok_or_else(invalid)?;
        let minor = match minor {
            Some(minor) => parse_version_component(minor).ok_or_else(invalid)?,
            None => 0,
        };

        Ok(Self::new(msg_type, major, minor))
    }

    /// Logical message type, e.g. `trip_created`.
    pub fn msg_type(&self) -> &str {
        &self.msg_type
    }

    /// Major version; selects the payload type.
    pub fn major(&self) -> u32 {
        self.major
    }

    /// Minor version; informational only.
    pub fn minor(&self) -> u32 {
        self.minor
    }
}

impl fmt::Display for SchemaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}.{}", self.msg_type, self.major, self.minor)
    }
}

impl FromStr for SchemaId {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Lowercase ASCII words separated by `_` or `.`.
fn is_valid_type(msg_type: &str) -> bool {
    !msg_type.is_empty()
        && msg_type
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_' || b == b'.')
}

fn parse_version_component(component: &str) -> Option<u32> {
    if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    component.parse().ok()
}
