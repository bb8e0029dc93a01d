//! Payload types and schema sets shared by the integration tests.

#![allow(dead_code)]

use hedwig::{Message, SchemaId, SchemaSet};

pub const MESSAGE_ID: &str = "2acd99ec-47ac-3232-a7f3-6049146aad15";

#[derive(Clone, PartialEq, prost::Message)]
pub struct TripCreatedV1 {
    #[prost(string, tag = "1")]
    pub vehicle_id: String,
    #[prost(string, tag = "2")]
    pub user_id: String,
}

impl prost::Name for TripCreatedV1 {
    const NAME: &'static str = "TripCreatedV1";
    const PACKAGE: &'static str = "tests";
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct TripCreatedV2 {
    #[prost(string, tag = "1")]
    pub vehicle_id: String,
    #[prost(string, tag = "2")]
    pub user_id: String,
    #[prost(uint64, tag = "3")]
    pub distance_meters: u64,
}

impl prost::Name for TripCreatedV2 {
    const NAME: &'static str = "TripCreatedV2";
    const PACKAGE: &'static str = "tests";
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct DeviceCreatedV1 {
    #[prost(string, tag = "1")]
    pub device_id: String,
    #[prost(string, tag = "2")]
    pub user_id: String,
}

impl prost::Name for DeviceCreatedV1 {
    const NAME: &'static str = "DeviceCreatedV1";
    const PACKAGE: &'static str = "tests";
}

/// Not named by convention and carrying a field `DeviceCreatedV1` lacks.
#[derive(Clone, PartialEq, prost::Message)]
pub struct DeviceCreated {
    #[prost(string, tag = "1")]
    pub device_id: String,
    #[prost(int64, tag = "7")]
    pub foobar: i64,
}

impl prost::Name for DeviceCreated {
    const NAME: &'static str = "DeviceCreated";
    const PACKAGE: &'static str = "tests_bad";
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Every test payload type, with declarations for each.
pub fn schemas() -> SchemaSet {
    init_tracing();
    let mut set = SchemaSet::new();
    set.register::<TripCreatedV1>().unwrap();
    set.register::<TripCreatedV2>().unwrap();
    set.register::<DeviceCreatedV1>().unwrap();
    set.declare("trip_created/1.0").unwrap();
    set.declare("trip_created/2.0").unwrap();
    set.declare("device.created/1.0").unwrap();
    set
}

/// Declares `trip_created` v1 but has no `TripCreatedV1`.
pub fn schemas_missing_v1() -> SchemaSet {
    let mut set = SchemaSet::new();
    set.register::<DeviceCreatedV1>().unwrap();
    set.register::<TripCreatedV2>().unwrap();
    set.declare("trip_created/1.0").unwrap();
    set.declare("trip_created/2.0").unwrap();
    set
}

/// Declares `trip_created` v2 but has no `TripCreatedV2`.
pub fn schemas_missing_v2() -> SchemaSet {
    let mut set = SchemaSet::new();
    set.register::<DeviceCreatedV1>().unwrap();
    set.register::<TripCreatedV1>().unwrap();
    set.declare("trip_created/1.0").unwrap();
    set.declare("trip_created/2.0").unwrap();
    set
}

pub fn trip_created() -> TripCreatedV1 {
    TripCreatedV1 {
        vehicle_id: "C_1234567890123456".to_string(),
        user_id: "U_1234567890123456".to_string(),
    }
}

pub fn trip_message() -> Message {
    Message::builder(SchemaId::new("trip_created", 1, 0), trip_created())
        .id(MESSAGE_ID)
        .publisher("myapp")
        .timestamp(1_700_000_000_123)
        .header("request_id", "4a8ab1e2")
        .header("region", "us-west-2")
        .build()
        .unwrap()
}

pub fn attributes(schema: &str) -> std::collections::HashMap<String, String> {
    [
        ("hedwig_format_version", "1.0"),
        ("hedwig_schema", schema),
        ("hedwig_id", MESSAGE_ID),
        ("hedwig_publisher", ""),
        ("hedwig_headers", "{}"),
        ("hedwig_message_timestamp", "1"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}
