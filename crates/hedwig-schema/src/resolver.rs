use std::collections::HashMap;

use tracing::debug;

use crate::error::{Result, SchemaError};
use crate::payload::Decoder;
use crate::schema_id::SchemaId;
use crate::set::SchemaSet;

/// Read-only lookup from schema identifiers to payload decoders.
#[derive(Debug, Clone)]
pub struct SchemaResolver {
    decoders: HashMap<&'static str, Decoder>,
}

impl SchemaResolver {
    /// Build a resolver, checking the set up front.
    ///
    /// Fails if the set registers no payload types, or if any declared
    /// `(type, major)` pair has no payload type under its conventional name.
    pub fn new(set: SchemaSet) -> Result<Self> {
        if set.is_empty() {
            return Err(SchemaError::EmptySchemaSet);
        }

        let declared: Vec<(String, u32)> = set
            .declared()
            .map(|(msg_type, major)| (msg_type.to_string(), major))
            .collect();
        let resolver = Self {
            decoders: set.into_decoders(),
        };

        for (msg_type, major) in &declared {
            resolver.lookup(msg_type, *major)?;
        }

        debug!(
            types = resolver.decoders.len(),
            declared = declared.len(),
            "schema resolver ready"
        );
        Ok(resolver)
    }

    /// Resolve a raw `{type}/{major}.{minor}` string.
    pub fn resolve_str(&self, schema: &str) -> Result<Decoder> {
        self.resolve(&SchemaId::parse(schema)?)
    }

    /// Resolve a parsed identifier. The minor version is ignored.
    pub fn resolve(&self, id: &SchemaId) -> Result<Decoder> {
        self.lookup(id.msg_type(), id.major())
    }

    /// Returns true if `id` would resolve.
    pub fn contains(&self, id: &SchemaId) -> bool {
        self.resolve(id).is_ok()
    }

    /// Registered payload type names, sorted.
    pub fn type_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.decoders.keys().copied().collect();
        names.sort_unstable();
        names
    }

    fn lookup(&self, msg_type: &str, major: u32) -> Result<Decoder> {
        let expected = expected_type_name(msg_type, major);
        self.decoders
            .get(expected.as_str())
            .copied()
            .ok_or_else(|| SchemaError::NotFound {
                msg_type: msg_type.to_string(),
                major,
                expected,
            })
    }
}

/// Conventional payload type name for a message type and major version.
///
/// Each `_`- or `.`-separated segment is capitalized and the results are
/// joined, then `V{major}` is appended: `trip_created` v1 is `TripCreatedV1`.
pub fn expected_type_name(msg_type: &str, major: u32) -> String {
    let mut name = String::with_capacity(msg_type.len() + 4);
    for segment in msg_type.split(['_', '.']) {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            name.extend(first.to_uppercase());
            name.extend(chars.flat_map(char::to_lowercase));
        }
    }
    name.push('V');
    name.push_str(&major.to_string());
    name
}
