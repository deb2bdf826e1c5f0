//! Selection and dispatch over the supported serialization formats.

use bytes::BytesMut;
use serde::{Deserialize, Serialize};
use url::Url;

use super::{
    format::{
        GelfSerializer, GelfSerializerConfig, JsonSerializer, JsonSerializerConfig,
        RawStringSerializer, RawStringSerializerConfig, StatsdSerializer, StatsdSerializerConfig,
    },
    framing::FramingConfig,
};
use crate::Record;

/// Scheme segment selecting the JSON codec.
pub const JSON_SCHEME: &str = "json";

/// Scheme segment selecting the GELF codec.
pub const GELF_SCHEME: &str = "gelf";

/// Scheme segment selecting the StatsD codec.
pub const STATSD_SCHEME: &str = "statsd";

/// Serializer configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(tag = "codec", rename_all = "snake_case")]
pub enum SerializerConfig {
    /// Encodes a record as a JSON object.
    Json,

    /// Encodes a record as a [GELF][gelf] message.
    ///
    /// [gelf]: https://docs.graylog.org/docs/gelf
    Gelf(GelfSerializerConfig),

    /// Encodes the numeric columns of a record as StatsD line protocol.
    Statsd(StatsdSerializerConfig),

    /// Writes the text of every string column, one per line.
    #[default]
    RawString,
}

impl SerializerConfig {
    /// Selects the codec named by the last `+`-separated segment of a URI scheme.
    ///
    /// `udp+gelf` selects GELF, `tcp+statsd` selects StatsD and `json` selects JSON. Any other
    /// scheme, including an empty one, falls back to the raw string codec.
    pub fn from_scheme(scheme: &str) -> Self {
        match scheme.rsplit('+').next() {
            Some(JSON_SCHEME) => Self::Json,
            Some(GELF_SCHEME) => Self::Gelf(GelfSerializerConfig::default()),
            Some(STATSD_SCHEME) => Self::Statsd(StatsdSerializerConfig::default()),
            _ => Self::RawString,
        }
    }

    /// Selects the codec for a destination URL from its scheme.
    pub fn from_url(url: &Url) -> Self {
        Self::from_scheme(url.scheme())
    }

    /// Build the `Serializer` from this configuration.
    pub fn build(&self) -> Serializer {
        match self {
            Self::Json => Serializer::Json(JsonSerializerConfig::new().build()),
            Self::Gelf(config) => Serializer::Gelf(config.build()),
            Self::Statsd(config) => Serializer::Statsd(config.build()),
            Self::RawString => Serializer::RawString(RawStringSerializerConfig::new().build()),
        }
    }

    /// Returns the framing this codec is shipped with unless configured otherwise.
    ///
    /// JSON documents are newline delimited. GELF and StatsD framing belongs to the transport,
    /// and the raw string codec already terminates each line itself.
    pub const fn default_framing(&self) -> FramingConfig {
        match self {
            Self::Json => FramingConfig::NewlineDelimited,
            Self::Gelf(_) | Self::Statsd(_) | Self::RawString => FramingConfig::Bytes,
        }
    }

    /// The name of the codec, as used in configuration.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Json => JSON_SCHEME,
            Self::Gelf(_) => GELF_SCHEME,
            Self::Statsd(_) => STATSD_SCHEME,
            Self::RawString => "raw_string",
        }
    }
}

/// Serialize a structured record into a byte frame.
#[derive(Debug, Clone)]
pub enum Serializer {
    /// Uses a `JsonSerializer` for serialization.
    Json(JsonSerializer),
    /// Uses a `GelfSerializer` for serialization.
    Gelf(GelfSerializer),
    /// Uses a `StatsdSerializer` for serialization.
    Statsd(StatsdSerializer),
    /// Uses a `RawStringSerializer` for serialization.
    RawString(RawStringSerializer),
}

impl Serializer {
    /// Serializes `record`, appending the output to `buffer`.
    ///
    /// On error, `buffer` may hold a partial payload; callers that need all-or-nothing output
    /// should serialize into a fresh split of their buffer.
    pub fn encode(&self, record: &Record, buffer: &mut BytesMut) -> Result<(), crate::Error> {
        match self {
            Self::Json(serializer) => serializer.encode(record, buffer),
            Self::Gelf(serializer) => serializer.encode(record, buffer),
            Self::Statsd(serializer) => serializer.encode(record, buffer),
            Self::RawString(serializer) => serializer.encode(record, buffer),
        }
    }

    /// Encode the record and represent it as a JSON value, for the JSON based codecs.
    pub fn to_json_value(&self, record: &Record) -> Option<Result<serde_json::Value, crate::Error>> {
        match self {
            Self::Json(serializer) => Some(serializer.to_json_value(record)),
            Self::Gelf(serializer) => Some(serializer.to_json_value(record)),
            Self::Statsd(_) | Self::RawString(_) => None,
        }
    }
}

impl From<JsonSerializer> for Serializer {
    fn from(serializer: JsonSerializer) -> Self {
        Self::Json(serializer)
    }
}

impl From<GelfSerializer> for Serializer {
    fn from(serializer: GelfSerializer) -> Self {
        Self::Gelf(serializer)
    }
}

impl From<StatsdSerializer> for Serializer {
    fn from(serializer: StatsdSerializer) -> Self {
        Self::Statsd(serializer)
    }
}

impl From<RawStringSerializer> for Serializer {
    fn from(serializer: RawStringSerializer) -> Self {
        Self::RawString(serializer)
    }
}
