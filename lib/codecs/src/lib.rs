//! Serializers that turn structured records into the byte payloads expected by log and metric
//! shipping sinks: JSON, GELF, StatsD, and plain text.

#![deny(missing_docs)]

pub mod encoding;
pub mod gelf;
mod record;

pub use encoding::{
    BytesEncoder, BytesEncoderConfig, CharacterDelimitedEncoder, CharacterDelimitedEncoderConfig,
    Framer, FramingConfig, GelfSerializer, GelfSerializerConfig, JsonSerializer,
    JsonSerializerConfig, NewlineDelimitedEncoder, NewlineDelimitedEncoderConfig,
    RawStringSerializer, RawStringSerializerConfig, Serializer, SerializerConfig,
    StatsdSerializer, StatsdSerializerConfig,
};
pub use gelf::{VALID_FIELD_REGEX, gelf_fields};
pub use record::{Column, ColumnType, Record};

/// A boxed error raised by a serializer.
pub type Error = Box<dyn std::error::Error + Send + Sync + 'static>;
