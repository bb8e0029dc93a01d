//! Protobuf container envelope.
//!
//! Field numbers match the published `protobuf_container_schema.proto`:
//!
//! ```text
//! message MetadataV1 {
//!   string publisher = 1;
//!   google.protobuf.Timestamp timestamp = 2;
//!   map<string, string> headers = 3;
//! }
//!
//! message PayloadV1 {
//!   string format_version = 1;
//!   string id = 2;
//!   MetadataV1 metadata = 3;
//!   string schema = 4;
//!   bytes data = 5;
//! }
//! ```
//!
//! Headers are held in a `BTreeMap` so the same message always encodes to
//! the same bytes.

use std::collections::BTreeMap;

use prost_types::Timestamp;

/// Message metadata inside the container envelope.
#[derive(Clone, PartialEq, prost::Message)]
pub struct MetadataV1 {
    #[prost(string, tag = "1")]
    pub publisher: String,
    #[prost(message, optional, tag = "2")]
    pub timestamp: Option<Timestamp>,
    #[prost(btree_map = "string, string", tag = "3")]
    pub headers: BTreeMap<String, String>,
}

impl prost::Name for MetadataV1 {
    const NAME: &'static str = "MetadataV1";
    const PACKAGE: &'static str = "";
}

/// The container envelope carried as the message body.
#[derive(Clone, PartialEq, prost::Message)]
pub struct PayloadV1 {
    #[prost(string, tag = "1")]
    pub format_version: String,
    #[prost(string, tag = "2")]
    pub id: String,
    #[prost(message, optional, tag = "3")]
    pub metadata: Option<MetadataV1>,
    #[prost(string, tag = "4")]
    pub schema: String,
    #[prost(bytes = "vec", tag = "5")]
    pub data: Vec<u8>,
}

impl prost::Name for PayloadV1 {
    const NAME: &'static str = "PayloadV1";
    const PACKAGE: &'static str = "";
}

/// Convert epoch milliseconds to a Protobuf timestamp.
pub fn timestamp_from_millis(millis: i64) -> Timestamp {
    Timestamp {
        seconds: millis.div_euclid(1000),
        // always in 0..1_000_000_000
        nanos: (millis.rem_euclid(1000) * 1_000_000) as i32,
    }
}

/// Convert a Protobuf timestamp to epoch milliseconds, truncating sub-millisecond precision.
pub fn timestamp_to_millis(timestamp: &Timestamp) -> i64 {
    timestamp
        .seconds
        .saturating_mul(1000)
        .saturating_add(i64::from(timestamp.nanos).div_euclid(1_000_000))
}
