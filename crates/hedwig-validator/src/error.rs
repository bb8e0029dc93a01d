//! The validator surfaces the codec's error taxonomy unchanged.

pub use hedwig_envelope::{Error, Result, SchemaError, ValidationError};
