//! A collection of support structures that are used in the process of encoding
//! records into bytes.

pub mod format;
pub mod framing;
pub mod serializer;
pub use format::{
    GelfSerializer, GelfSerializerConfig, GelfSerializerOptions, JsonSerializer,
    JsonSerializerConfig, RawStringSerializer, RawStringSerializerConfig, StatsdSerializer,
    StatsdSerializerConfig, StatsdSerializerOptions,
};
pub use framing::{
    BoxedFramer, BoxedFramingError, BytesEncoder, BytesEncoderConfig, CharacterDelimitedEncoder,
    CharacterDelimitedEncoderConfig, CharacterDelimitedEncoderOptions, FrameEncoder, Framer,
    FramingConfig, FramingError, NewlineDelimitedEncoder, NewlineDelimitedEncoderConfig,
};
pub use serializer::{Serializer, SerializerConfig};

/// An error that occurred while encoding structured records into byte frames.
#[derive(Debug)]
pub enum Error {
    /// The error occurred while encoding the byte frame boundaries.
    FramingError(BoxedFramingError),
    /// The error occurred while serializing a structured record into bytes.
    SerializingError(crate::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FramingError(error) => write!(formatter, "FramingError({error})"),
            Self::SerializingError(error) => write!(formatter, "SerializingError({error})"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::FramingError(Box::new(error))
    }
}
