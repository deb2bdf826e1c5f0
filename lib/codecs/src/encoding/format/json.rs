use bytes::{BufMut, BytesMut};
use serde::{Deserialize, Serialize};

use crate::Record;

/// Config used to build a `JsonSerializer`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct JsonSerializerConfig;

impl JsonSerializerConfig {
    /// Creates a new `JsonSerializerConfig`.
    pub const fn new() -> Self {
        Self
    }

    /// Build the `JsonSerializer` from this configuration.
    pub const fn build(&self) -> JsonSerializer {
        JsonSerializer
    }
}

/// Serializer that converts a `Record` to bytes using the JSON format.
///
/// Every field is written under its own name with the column kind dropped.
#[derive(Debug, Clone, Default)]
pub struct JsonSerializer;

impl JsonSerializer {
    /// Creates a new `JsonSerializer`.
    pub const fn new() -> Self {
        Self
    }

    /// Encode the record and represent it as a JSON value.
    pub fn to_json_value(&self, record: &Record) -> Result<serde_json::Value, crate::Error> {
        serde_json::to_value(record).map_err(Into::into)
    }

    /// Serializes `record` into `buffer`.
    pub fn encode(&self, record: &Record, buffer: &mut BytesMut) -> Result<(), crate::Error> {
        serde_json::to_writer(buffer.writer(), record).map_err(Into::into)
    }
}
