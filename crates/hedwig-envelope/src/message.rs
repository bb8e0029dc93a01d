use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use hedwig_schema::{Payload, SchemaId};

use crate::attributes::RESERVED_PREFIX;
use crate::error::ValidationError;

/// Publisher, creation time and free-form headers of a message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    publisher: String,
    timestamp: i64,
    headers: BTreeMap<String, String>,
}

impl Metadata {
    pub fn new(
        publisher: impl Into<String>,
        timestamp: i64,
        headers: BTreeMap<String, String>,
    ) -> Self {
        Self {
            publisher: publisher.into(),
            timestamp,
            headers,
        }
    }

    pub fn publisher(&self) -> &str {
        &self.publisher
    }

    /// Creation time in milliseconds since the Unix epoch.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }
}

/// A message ready to be serialized.
#[derive(Debug, Clone)]
pub struct Message {
    id: String,
    schema: SchemaId,
    metadata: Metadata,
    data: Box<dyn Payload>,
}

impl Message {
    /// Start building a message with the given schema and payload.
    pub fn builder(schema: SchemaId, data: impl Payload) -> MessageBuilder {
        MessageBuilder {
            schema,
            data: Box::new(data),
            id: None,
            publisher: String::new(),
            timestamp: None,
            headers: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn schema(&self) -> &SchemaId {
        &self.schema
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn data(&self) -> &dyn Payload {
        self.data.as_ref()
    }

    /// Borrow the payload as its concrete type.
    pub fn data_as<T: Payload>(&self) -> Option<&T> {
        self.data.downcast_ref::<T>()
    }
}

impl PartialEq for Message {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.schema == other.schema
            && self.metadata == other.metadata
            && self.data.payload_eq(other.data.as_ref())
    }
}

/// Builder for [`Message`].
#[derive(Debug)]
pub struct MessageBuilder {
    schema: SchemaId,
    data: Box<dyn Payload>,
    id: Option<String>,
    publisher: String,
    timestamp: Option<i64>,
    headers: BTreeMap<String, String>,
}

impl MessageBuilder {
    /// Message id. Defaults to a random UUID.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn publisher(mut self, publisher: impl Into<String>) -> Self {
        self.publisher = publisher.into();
        self
    }

    /// Creation time in epoch milliseconds. Defaults to now.
    pub fn timestamp(mut self, millis: i64) -> Self {
        self.timestamp = Some(millis);
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Finish the message, rejecting header keys in the reserved namespace.
    pub fn build(self) -> Result<Message, ValidationError> {
        if let Some(key) = self
            .headers
            .keys()
            .find(|key| key.starts_with(RESERVED_PREFIX))
        {
            return Err(ValidationError::ReservedHeader(key.clone()));
        }

        Ok(Message {
            id: self
                .id
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            schema: self.schema,
            metadata: Metadata {
                publisher: self.publisher,
                timestamp: self.timestamp.unwrap_or_else(now_millis),
                headers: self.headers,
            },
            data: self.data,
        })
    }
}

/// A successfully decoded message.
#[derive(Debug, Clone)]
pub struct DecodedMessage<P = ()> {
    pub id: String,
    pub schema: SchemaId,
    pub format_version: String,
    pub metadata: Metadata,
    pub data: Box<dyn Payload>,
    /// Opaque transport data handed in by the caller, e.g. an ack handle.
    pub provider_metadata: P,
}

impl<P> DecodedMessage<P> {
    /// Borrow the payload as its concrete type.
    pub fn data_as<T: Payload>(&self) -> Option<&T> {
        self.data.downcast_ref::<T>()
    }

    /// Replace the provider metadata.
    pub fn with_provider_metadata<Q>(self, provider_metadata: Q) -> DecodedMessage<Q> {
        DecodedMessage {
            id: self.id,
            schema: self.schema,
            format_version: self.format_version,
            metadata: self.metadata,
            data: self.data,
            provider_metadata,
        }
    }

    /// Drop transport details and keep the logical message.
    pub fn into_message(self) -> Message {
        Message {
            id: self.id,
            schema: self.schema,
            metadata: self.metadata,
            data: self.data,
        }
    }
}

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, prost::Message)]
    struct TripCreatedV1 {
        #[prost(string, tag = "1")]
        vehicle_id: String,
    }

    impl prost::Name for TripCreatedV1 {
        const NAME: &'static str = "TripCreatedV1";
        const PACKAGE: &'static str = "tests";
    }

    fn trip(vehicle_id: &str) -> TripCreatedV1 {
        TripCreatedV1 {
            vehicle_id: vehicle_id.to_string(),
        }
    }

    #[test]
    fn builder_fills_defaults() {
        let message = Message::builder(SchemaId::new("trip_created", 1, 0), trip("C_1234567890123456"))
            .build()
            .unwrap();

        assert!(uuid::Uuid::parse_str(message.id()).is_ok());
        assert!(message.metadata().timestamp() > 0);
        assert_eq!(message.metadata().publisher(), "");
        assert!(message.metadata().headers().is_empty());
        assert_eq!(
            message.data_as::<TripCreatedV1>().map(|t| t.vehicle_id.as_str()),
            Some("C_1234567890123456")
        );
    }

    #[test]
    fn builder_keeps_explicit_fields() {
        let message = Message::builder(SchemaId::new("trip_created", 1, 0), trip("v"))
            .id("msg-1")
            .publisher("myapp")
            .timestamp(1_700_000_000_000)
            .header("request_id", "abc")
            .headers([("trace", "t-1")])
            .build()
            .unwrap();

        assert_eq!(message.id(), "msg-1");
        assert_eq!(message.metadata().publisher(), "myapp");
        assert_eq!(message.metadata().timestamp(), 1_700_000_000_000);
        assert_eq!(message.metadata().headers().len(), 2);
    }

    #[test]
    fn reserved_header_prefix_is_rejected() {
        let err = Message::builder(SchemaId::new("trip_created", 1, 0), trip("v"))
            .header("hedwig_id", "spoofed")
            .build()
            .unwrap_err();

        assert_eq!(err, ValidationError::ReservedHeader("hedwig_id".to_string()));
    }

    #[test]
    fn equality_compares_payloads() {
        let build = |vehicle_id: &str| {
            Message::builder(SchemaId::new("trip_created", 1, 0), trip(vehicle_id))
                .id("same")
                .timestamp(1)
                .build()
                .unwrap()
        };

        assert_eq!(build("a"), build("a"));
        assert_ne!(build("a"), build("b"));
    }

    #[test]
    fn decoded_message_swaps_provider_metadata() {
        let decoded = DecodedMessage {
            id: "id".to_string(),
            schema: SchemaId::new("trip_created", 1, 0),
            format_version: "1.0".to_string(),
            metadata: Metadata::default(),
            data: Box::new(trip("v")),
            provider_metadata: (),
        }
        .with_provider_metadata("ack-7");

        assert_eq!(decoded.provider_metadata, "ack-7");
        assert!(decoded.data_as::<TripCreatedV1>().is_some());

        let message = decoded.into_message();
        assert_eq!(message.id(), "id");
    }
}
