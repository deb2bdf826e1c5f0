use std::io::Write;

use bytes::{BufMut, BytesMut};
use serde::{Deserialize, Serialize};

use crate::{Column, Record};

/// Options for building a `StatsdSerializer`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct StatsdSerializerOptions {
    /// Prefix prepended to every metric name, separated by a period.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

/// Config used to build a `StatsdSerializer`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct StatsdSerializerConfig {
    /// Configuration options for the StatsdSerializer
    #[serde(default)]
    pub options: StatsdSerializerOptions,
}

impl StatsdSerializerConfig {
    /// Creates a new `StatsdSerializerConfig`.
    pub const fn new(options: StatsdSerializerOptions) -> Self {
        Self { options }
    }

    /// Build the `StatsdSerializer` from this configuration.
    pub fn build(&self) -> StatsdSerializer {
        StatsdSerializer::new(self.options.namespace.clone())
    }
}

/// Serializer that converts the numeric columns of a `Record` to StatsD line protocol.
///
/// Each gauge, metric and counter column becomes one `name:value|type` entry. Entries are
/// written back to back with no separator; text columns are skipped.
#[derive(Debug, Clone, Default)]
pub struct StatsdSerializer {
    namespace: Option<String>,
}

impl StatsdSerializer {
    /// Creates a new `StatsdSerializer`.
    pub const fn new(namespace: Option<String>) -> Self {
        Self { namespace }
    }

    /// Serializes `record` into `buffer`.
    pub fn encode(&self, record: &Record, buffer: &mut BytesMut) -> Result<(), crate::Error> {
        let mut writer = buffer.writer();

        for (name, column) in record {
            let (value, suffix) = match column {
                Column::Gauge(value) => (value, "g"),
                Column::Metric(value) => (value, "m"),
                Column::Counter(value) => (value, "c"),
                Column::String(_) => continue,
            };

            match &self.namespace {
                Some(namespace) => write!(writer, "{namespace}.{name}:{value}|{suffix}")?,
                None => write!(writer, "{name}:{value}|{suffix}")?,
            }
        }

        Ok(())
    }
}
