use std::any::Any;
use std::fmt;

/// A decoded message payload of some registered Protobuf type.
///
/// Implemented for every `prost` message that also implements
/// [`prost::Name`]; the name is what schema resolution matches against.
pub trait Payload: fmt::Debug + Send + Sync + 'static {
    /// The Protobuf message name, e.g. `TripCreatedV1`.
    fn type_name(&self) -> &'static str;

    /// Encode this payload with its own binary encoding.
    fn encode_payload(&self) -> Vec<u8>;

    fn as_any(&self) -> &dyn Any;

    /// Structural equality against another payload of any type.
    fn payload_eq(&self, other: &dyn Payload) -> bool;

    fn clone_payload(&self) -> Box<dyn Payload>;
}

impl<T> Payload for T
where
    T: prost::Message + prost::Name + Clone + PartialEq + 'static,
{
    fn type_name(&self) -> &'static str {
        T::NAME
    }

    fn encode_payload(&self) -> Vec<u8> {
        self.encode_to_vec()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn payload_eq(&self, other: &dyn Payload) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| other == self)
    }

    fn clone_payload(&self) -> Box<dyn Payload> {
        Box::new(self.clone())
    }
}

impl dyn Payload {
    /// Borrow the payload as its concrete type.
    pub fn downcast_ref<T: Payload>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Returns true if the payload is of type `T`.
    pub fn is<T: Payload>(&self) -> bool {
        self.as_any().is::<T>()
    }
}

impl PartialEq for dyn Payload {
    fn eq(&self, other: &Self) -> bool {
        self.payload_eq(other)
    }
}

impl Clone for Box<dyn Payload> {
    fn clone(&self) -> Self {
        self.clone_payload()
    }
}

type DecodeFn = fn(&[u8]) -> std::result::Result<Box<dyn Payload>, prost::DecodeError>;

/// Handle to a registered payload type's decoder.
#[derive(Clone, Copy)]
pub struct Decoder {
    name: &'static str,
    decode: DecodeFn,
}

impl Decoder {
    /// Decoder for the `prost` message type `T`.
    pub fn of<T>() -> Self
    where
        T: prost::Message + prost::Name + Default + Clone + PartialEq + 'static,
    {
        Self {
            name: T::NAME,
            decode: decode_as::<T>,
        }
    }

    /// Registered type name, e.g. `TripCreatedV1`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Decode raw payload bytes into the registered type.
    ///
    /// Fields unknown to the type are skipped, not rejected.
    pub fn decode(&self, bytes: &[u8]) -> std::result::Result<Box<dyn Payload>, prost::DecodeError> {
        (self.decode)(bytes)
    }
}

impl fmt::Debug for Decoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decoder").field("name", &self.name).finish()
    }
}

fn decode_as<T>(bytes: &[u8]) -> std::result::Result<Box<dyn Payload>, prost::DecodeError>
where
    T: prost::Message + prost::Name + Default + Clone + PartialEq + 'static,
{
    T::decode(bytes).map(|message| Box::new(message) as Box<dyn Payload>)
}
