//! Configuration of the encoding side of a sink.
//!
//! Sinks embed [`SinkEncodingConfig`] in their own configuration; reading that configuration from
//! disk is up to them.

use ::codecs::encoding::{FramingConfig, SerializerConfig};
use serde::{Deserialize, Serialize};
use snafu::{ResultExt, Snafu};
use url::Url;

use crate::codecs::{Encoder, EncodingConfig};

#[derive(Debug, Snafu)]
pub enum ConfigError {
    #[snafu(display("Invalid sink encoding config: {}", source))]
    ParseToml { source: toml::de::Error },
}

/// Where a sink sends its records, and how they are encoded on the way.
///
/// Unless `encoding` is set explicitly, the codec is selected from the scheme of `uri`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct SinkEncodingConfig {
    /// The destination, e.g. `udp+gelf://graylog:12201`.
    pub uri: Url,

    /// Overrides the codec selected from the URI scheme.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<SerializerConfig>,

    /// Overrides the codec's default framing.
    ///
    /// The codec's default framing is part of its wire format: JSON records end with a newline,
    /// GELF and StatsD payloads end with nothing. An override replaces that, so a `json` sink
    /// framed with `bytes` writes records with no newline between them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framing: Option<FramingConfig>,
}

impl SinkEncodingConfig {
    /// Creates a config that selects everything from `uri`.
    pub const fn new(uri: Url) -> Self {
        Self {
            uri,
            encoding: None,
            framing: None,
        }
    }

    /// Parses a config from TOML.
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        toml::from_str(input).context(ParseTomlSnafu)
    }

    /// Resolves the effective encoding config.
    pub fn encoding_config(&self) -> EncodingConfig {
        let encoding = match &self.encoding {
            Some(encoding) => encoding.clone(),
            None => EncodingConfig::from_url(&self.uri).encoding().clone(),
        };
        EncodingConfig::new(self.framing.clone(), encoding)
    }

    /// Builds the `Encoder` for this sink.
    pub fn build(&self) -> Encoder {
        self.encoding_config().build()
    }
}
