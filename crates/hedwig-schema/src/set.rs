use std::collections::{BTreeSet, HashMap};

use crate::error::{Result, SchemaError};
use crate::payload::Decoder;
use crate::schema_id::SchemaId;

/// The payload types and declared message types a resolver is built from.
///
/// Decoders are keyed by their Protobuf message name. Declarations list the
/// `(type, major)` pairs the host expects to handle; each one must resolve
/// when the set is turned into a [`SchemaResolver`](crate::SchemaResolver).
#[derive(Debug, Clone, Default)]
pub struct SchemaSet {
    decoders: HashMap<&'static str, Decoder>,
    declared: BTreeSet<(String, u32)>,
}

impl SchemaSet {
    /// Create an empty schema set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the payload type `T` under its `prost::Name`.
    pub fn register<T>(&mut self) -> Result<()>
    where
        T: prost::Message + prost::Name + Default + Clone + PartialEq + 'static,
    {
        self.register_decoder(Decoder::of::<T>())
    }

    /// Register an already constructed decoder handle.
    pub fn register_decoder(&mut self, decoder: Decoder) -> Result<()> {
        if self.decoders.contains_key(decoder.name()) {
            return Err(SchemaError::Duplicate(decoder.name().to_string()));
        }
        self.decoders.insert(decoder.name(), decoder);
        Ok(())
    }

    /// Declare a message type from a `{type}/{major}[.{minor}]` string.
    pub fn declare(&mut self, schema: &str) -> Result<()> {
        let id = SchemaId::parse(schema)?;
        self.declare_id(&id);
        Ok(())
    }

    /// Declare a message type from a parsed identifier. The minor is dropped.
    pub fn declare_id(&mut self, id: &SchemaId) {
        self.declared.insert((id.msg_type().to_string(), id.major()));
    }

    /// Returns true if no payload types are registered.
    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }

    /// Number of registered payload types.
    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    /// Registered payload type names, sorted.
    pub fn type_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.decoders.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Declared `(type, major)` pairs, sorted.
    pub fn declared(&self) -> impl Iterator<Item = (&str, u32)> {
        self.declared
            .iter()
            .map(|(msg_type, major)| (msg_type.as_str(), *major))
    }

    pub(crate) fn into_decoders(self) -> HashMap<&'static str, Decoder> {
        self.decoders
    }
}
