use std::{borrow::Cow, collections::BTreeMap};

use bytes::{BufMut, BytesMut};
use serde::{Deserialize, Serialize, Serializer, ser::SerializeMap};

use crate::{
    Column, Record,
    gelf::{FieldRank, INVALID_FIELD_CHARS_REGEX, VALID_FIELD_REGEX, gelf_field_name},
    gelf_fields::{GELF_VERSION, VERSION},
};

/// Options for building a `GelfSerializer`.
#[derive(Debug, Clone, Default, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub struct GelfSerializerOptions {
    /// Replace characters GELF does not allow in additional field names with `-`.
    #[serde(default)]
    pub sanitize: bool,
}

/// Config used to build a `GelfSerializer`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct GelfSerializerConfig {
    /// Configuration options for the GelfSerializer
    #[serde(default)]
    pub options: GelfSerializerOptions,
}

impl GelfSerializerConfig {
    /// Creates a new `GelfSerializerConfig`.
    pub const fn new(options: GelfSerializerOptions) -> Self {
        Self { options }
    }

    /// Build the `GelfSerializer` from this configuration.
    pub const fn build(&self) -> GelfSerializer {
        GelfSerializer::new(self.options)
    }
}

/// Serializer that converts a `Record` to bytes using the GELF format.
/// Spec: https://docs.graylog.org/docs/gelf
///
/// Record fields are renamed to their GELF counterparts, anything without a GELF meaning becomes
/// an `_`-prefixed additional field, and `version` is always `"1.1"`.
#[derive(Debug, Clone, Default)]
pub struct GelfSerializer {
    sanitize: bool,
}

impl GelfSerializer {
    /// Creates a new `GelfSerializer`.
    pub const fn new(options: GelfSerializerOptions) -> Self {
        Self {
            sanitize: options.sanitize,
        }
    }

    /// Encode the record and represent it as a JSON value.
    pub fn to_json_value(&self, record: &Record) -> Result<serde_json::Value, crate::Error> {
        serde_json::to_value(self.to_message(record)).map_err(Into::into)
    }

    /// Serializes `record` into `buffer`.
    pub fn encode(&self, record: &Record, buffer: &mut BytesMut) -> Result<(), crate::Error> {
        let writer = buffer.writer();
        serde_json::to_writer(writer, &self.to_message(record)).map_err(Into::into)
    }

    fn to_message<'a>(&self, record: &'a Record) -> GelfMessage<'a> {
        let mut fields: BTreeMap<Cow<'a, str>, (FieldRank, &'a Column)> = BTreeMap::new();

        for (key, column) in record {
            let (name, rank) = gelf_field_name(key);
            let name = match rank {
                FieldRank::Additional if self.sanitize => sanitize_field_name(name),
                _ => name,
            };

            match fields.get(&name) {
                Some((existing, _)) if *existing > rank => {}
                _ => {
                    fields.insert(name, (rank, column));
                }
            }
        }

        GelfMessage { fields }
    }
}

/// Replaces every run of characters not allowed in an additional field name with a dash.
fn sanitize_field_name(name: Cow<'_, str>) -> Cow<'_, str> {
    if VALID_FIELD_REGEX.is_match(&name) {
        return name;
    }
    Cow::Owned(INVALID_FIELD_CHARS_REGEX.replace_all(&name, "-").into_owned())
}

/// A record after its fields have been renamed for GELF.
struct GelfMessage<'a> {
    fields: BTreeMap<Cow<'a, str>, (FieldRank, &'a Column)>,
}

impl Serialize for GelfMessage<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Record fields never map onto `version`, a record's own `version` lands in `_version`.
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        for (name, (_, column)) in &self.fields {
            map.serialize_entry(name, column)?;
        }
        map.serialize_entry(VERSION, GELF_VERSION)?;
        map.end()
    }
}
