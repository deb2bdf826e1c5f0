use bytes::{BufMut, BytesMut};
use serde::{Deserialize, Serialize};

use crate::Record;

/// Config used to build a `RawStringSerializer`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct RawStringSerializerConfig;

impl RawStringSerializerConfig {
    /// Creates a new `RawStringSerializerConfig`.
    pub const fn new() -> Self {
        Self
    }

    /// Build the `RawStringSerializer` from this configuration.
    pub const fn build(&self) -> RawStringSerializer {
        RawStringSerializer
    }
}

/// Serializer that writes the text of every string column, each followed by a newline.
///
/// Numeric columns are ignored.
#[derive(Debug, Clone, Default)]
pub struct RawStringSerializer;

impl RawStringSerializer {
    /// Creates a new `RawStringSerializer`.
    pub const fn new() -> Self {
        Self
    }

    /// Serializes `record` into `buffer`.
    pub fn encode(&self, record: &Record, buffer: &mut BytesMut) -> Result<(), crate::Error> {
        for value in record.iter().filter_map(|(_, column)| column.as_str()) {
            buffer.reserve(value.len() + 1);
            buffer.put_slice(value.as_bytes());
            buffer.put_u8(b'\n');
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use bytes::{Bytes, BytesMut};

    use super::*;
    use crate::{Column, record};

    fn serialize(record: &Record) -> Bytes {
        let mut buffer = BytesMut::new();
        RawStringSerializer::new().encode(record, &mut buffer).unwrap();
        buffer.freeze()
    }

    #[test]
    fn serialize_string_column() {
        assert_eq!(serialize(&record! { "message" => "foo" }), "foo\n");
    }

    #[test]
    fn serialize_every_string_column() {
        let bytes = serialize(&record! {
            "a" => "x",
            "b" => "y",
        });

        let mut lines = std::str::from_utf8(&bytes)
            .unwrap()
            .split_inclusive('\n')
            .collect::<Vec<_>>();
        lines.sort_unstable();

        assert_eq!(lines, ["x\n", "y\n"]);
    }

    #[test]
    fn ignores_numeric_columns() {
        let bytes = serialize(&record! {
            "message" => "foo",
            "hits" => Column::Counter(1),
            "temperature" => Column::Gauge(20),
        });

        assert_eq!(bytes, "foo\n");
        assert_eq!(serialize(&record! { "hits" => Column::Counter(1) }), "");
    }
}
