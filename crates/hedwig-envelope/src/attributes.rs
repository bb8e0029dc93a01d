use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use crate::error::ValidationError;

pub const FORMAT_VERSION_ATTR: &str = "hedwig_format_version";
pub const SCHEMA_ATTR: &str = "hedwig_schema";
pub const ID_ATTR: &str = "hedwig_id";
pub const PUBLISHER_ATTR: &str = "hedwig_publisher";
pub const TIMESTAMP_ATTR: &str = "hedwig_message_timestamp";
pub const HEADERS_ATTR: &str = "hedwig_headers";

/// Prefix reserved for hedwig's own attributes.
pub const RESERVED_PREFIX: &str = "hedwig_";

/// Flat transport attribute map produced by encoding.
pub type Attributes = BTreeMap<String, String>;

/// One attribute as seen by the validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawAttribute<'a> {
    Missing,
    String(&'a str),
    /// Present, but not a string. Holds a rendering of the value.
    Other(String),
}

/// A transport's received attributes.
pub trait AttributeSource {
    fn attribute(&self, key: &str) -> RawAttribute<'_>;
}

impl<S: BuildHasher> AttributeSource for HashMap<String, String, S> {
    fn attribute(&self, key: &str) -> RawAttribute<'_> {
        self.get(key)
            .map_or(RawAttribute::Missing, |value| RawAttribute::String(value.as_str()))
    }
}

impl AttributeSource for BTreeMap<String, String> {
    fn attribute(&self, key: &str) -> RawAttribute<'_> {
        self.get(key)
            .map_or(RawAttribute::Missing, |value| RawAttribute::String(value.as_str()))
    }
}

impl AttributeSource for serde_json::Map<String, serde_json::Value> {
    fn attribute(&self, key: &str) -> RawAttribute<'_> {
        match self.get(key) {
            None => RawAttribute::Missing,
            Some(serde_json::Value::String(value)) => RawAttribute::String(value),
            Some(other) => RawAttribute::Other(other.to_string()),
        }
    }
}

/// The hedwig metadata carried in transport attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaAttributes {
    pub format_version: String,
    pub schema: String,
    pub id: String,
    pub publisher: String,
    pub timestamp: i64,
    pub headers: BTreeMap<String, String>,
}

impl MetaAttributes {
    /// Read and type-check the hedwig attributes.
    ///
    /// Required keys are checked in a fixed order: format version, schema,
    /// id, publisher, timestamp. The first failing key is reported.
    /// A missing headers attribute means no headers.
    pub fn from_source(source: &dyn AttributeSource) -> Result<Self, ValidationError> {
        let format_version = required(source, FORMAT_VERSION_ATTR)?;
        let schema = required(source, SCHEMA_ATTR)?;
        let id = required(source, ID_ATTR)?;
        let publisher = required(source, PUBLISHER_ATTR)?;
        let timestamp = required(source, TIMESTAMP_ATTR)?;

        let timestamp = parse_timestamp(timestamp)?;
        let headers = match source.attribute(HEADERS_ATTR) {
            RawAttribute::Missing => BTreeMap::new(),
            RawAttribute::String(raw) => parse_headers(raw)?,
            RawAttribute::Other(found) => {
                return Err(ValidationError::InvalidAttribute {
                    key: HEADERS_ATTR,
                    found: Some(found),
                })
            }
        };

        Ok(Self {
            format_version: format_version.to_string(),
            schema: schema.to_string(),
            id: id.to_string(),
            publisher: publisher.to_string(),
            timestamp,
            headers,
        })
    }

    /// Render as a flat transport attribute map.
    pub fn to_attributes(&self) -> Result<Attributes, ValidationError> {
        let headers = serde_json::to_string(&self.headers)
            .map_err(|err| ValidationError::InvalidHeaders(err.to_string()))?;

        let mut attributes = Attributes::new();
        attributes.insert(
            FORMAT_VERSION_ATTR.to_string(),
            self.format_version.clone(),
        );
        attributes.insert(SCHEMA_ATTR.to_string(), self.schema.clone());
        attributes.insert(ID_ATTR.to_string(), self.id.clone());
        attributes.insert(PUBLISHER_ATTR.to_string(), self.publisher.clone());
        attributes.insert(TIMESTAMP_ATTR.to_string(), self.timestamp.to_string());
        attributes.insert(HEADERS_ATTR.to_string(), headers);
        Ok(attributes)
    }
}

fn required<'a>(
    source: &'a dyn AttributeSource,
    key: &'static str,
) -> Result<&'a str, ValidationError> {
    match source.attribute(key) {
        RawAttribute::String(value) => Ok(value),
        RawAttribute::Missing => Err(ValidationError::InvalidAttribute { key, found: None }),
        RawAttribute::Other(found) => Err(ValidationError::InvalidAttribute {
            key,
            found: Some(found),
        }),
    }
}

fn parse_timestamp(raw: &str) -> Result<i64, ValidationError> {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidTimestamp(raw.to_string()));
    }
    raw.parse()
        .map_err(|_| ValidationError::InvalidTimestamp(raw.to_string()))
}

fn parse_headers(raw: &str) -> Result<BTreeMap<String, String>, ValidationError> {
    serde_json::from_str(raw).map_err(|err| ValidationError::InvalidHeaders(err.to_string()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn valid_attributes() -> HashMap<String, String> {
        [
            (FORMAT_VERSION_ATTR, "1.0"),
            (SCHEMA_ATTR, "trip_created/1.0"),
            (ID_ATTR, "2acd99ec-47ac-3232-a7f3-6049146aad15"),
            (PUBLISHER_ATTR, ""),
            (HEADERS_ATTR, r#"{"request_id":"abc"}"#),
            (TIMESTAMP_ATTR, "1"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn parses_complete_attributes() {
        let meta = MetaAttributes::from_source(&valid_attributes()).unwrap();
        assert_eq!(meta.format_version, "1.0");
        assert_eq!(meta.schema, "trip_created/1.0");
        assert_eq!(meta.publisher, "");
        assert_eq!(meta.timestamp, 1);
        assert_eq!(meta.headers.get("request_id").map(String::as_str), Some("abc"));
    }

    #[test]
    fn empty_map_reports_format_version_first() {
        let err = MetaAttributes::from_source(&HashMap::<String, String>::new()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid message attribute: hedwig_format_version must be string, found: None"
        );
    }

    #[test]
    fn keys_are_checked_in_fixed_order() {
        let order = [
            FORMAT_VERSION_ATTR,
            SCHEMA_ATTR,
            ID_ATTR,
            PUBLISHER_ATTR,
            TIMESTAMP_ATTR,
        ];
        for (i, key) in order.iter().enumerate() {
            let mut attrs = valid_attributes();
            for later in &order[i..] {
                attrs.remove(*later);
            }
            assert_eq!(
                MetaAttributes::from_source(&attrs),
                Err(ValidationError::InvalidAttribute {
                    key: *key,
                    found: None
                })
            );
        }
    }

    #[test]
    fn non_string_json_values_are_rejected() {
        let attrs = json!({
            "hedwig_format_version": "1.0",
            "hedwig_schema": "trip_created/1.0",
            "hedwig_id": 42,
            "hedwig_publisher": "",
            "hedwig_message_timestamp": "1",
        });
        let attrs = attrs.as_object().unwrap();

        assert_eq!(
            MetaAttributes::from_source(attrs).unwrap_err().to_string(),
            "Invalid message attribute: hedwig_id must be string, found: 42"
        );
    }

    #[test]
    fn missing_headers_means_empty() {
        let mut attrs = valid_attributes();
        attrs.remove(HEADERS_ATTR);
        assert!(MetaAttributes::from_source(&attrs)
            .unwrap()
            .headers
            .is_empty());
    }

    #[test]
    fn bad_timestamp_is_rejected() {
        for bad in ["", "abc", "1.5", "+1", "99999999999999999999"] {
            let mut attrs = valid_attributes();
            attrs.insert(TIMESTAMP_ATTR.to_string(), bad.to_string());
            assert_eq!(
                MetaAttributes::from_source(&attrs),
                Err(ValidationError::InvalidTimestamp(bad.to_string()))
            );
        }
    }

    #[test]
    fn bad_headers_are_rejected() {
        for bad in ["not json", "[]", r#"{"a":1}"#] {
            let mut attrs = valid_attributes();
            attrs.insert(HEADERS_ATTR.to_string(), bad.to_string());
            assert!(matches!(
                MetaAttributes::from_source(&attrs),
                Err(ValidationError::InvalidHeaders(_))
            ));
        }
    }

    #[test]
    fn renders_flat_attribute_map() {
        let meta = MetaAttributes::from_source(&valid_attributes()).unwrap();
        let attrs = meta.to_attributes().unwrap();

        assert_eq!(attrs.len(), 6);
        assert_eq!(attrs[TIMESTAMP_ATTR], "1");
        assert_eq!(attrs[HEADERS_ATTR], r#"{"request_id":"abc"}"#);
        assert_eq!(MetaAttributes::from_source(&attrs).unwrap(), meta);
    }
}
