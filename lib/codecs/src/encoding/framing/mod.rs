//! A collection of framing methods that can be used to delimit serialized
//! payloads before they are handed to a transport.

#![deny(missing_docs)]

mod bytes;
mod character_delimited;
mod newline_delimited;

pub use self::bytes::{BytesEncoder, BytesEncoderConfig};
pub use character_delimited::{
    CharacterDelimitedEncoder, CharacterDelimitedEncoderConfig, CharacterDelimitedEncoderOptions,
};
pub use newline_delimited::{NewlineDelimitedEncoder, NewlineDelimitedEncoderConfig};

use std::fmt::Debug;

use ::bytes::BytesMut;
use dyn_clone::DynClone;
use serde::{Deserialize, Serialize};
use tokio_util::codec::Encoder;

/// An error that occurred while framing bytes.
pub trait FramingError: std::error::Error + Send + Sync {}

impl std::error::Error for BoxedFramingError {}

impl FramingError for std::io::Error {}

impl From<std::io::Error> for BoxedFramingError {
    fn from(error: std::io::Error) -> Self {
        Box::new(error)
    }
}

/// A `Box` containing a `FramingError`.
pub type BoxedFramingError = Box<dyn FramingError>;

/// Wrap bytes into a frame.
pub trait FrameEncoder:
    Encoder<(), Error = BoxedFramingError> + DynClone + Debug + Send + Sync
{
}

/// Default implementation for `FrameEncoder`s that implement
/// `tokio_util::codec::Encoder`.
impl<E> FrameEncoder for E where E: Encoder<(), Error = BoxedFramingError> + Clone + Debug + Send + Sync
{}

dyn_clone::clone_trait_object!(FrameEncoder);

/// A `Box` containing a `FrameEncoder`.
pub type BoxedFramer = Box<dyn FrameEncoder>;

/// Framing configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum FramingConfig {
    /// Payloads are not delimited at all.
    Bytes,

    /// Payloads are delimited by a single ASCII (7-bit) character.
    CharacterDelimited(CharacterDelimitedEncoderConfig),

    /// Payloads are delimited by a newline (LF) character.
    NewlineDelimited,
}

impl FramingConfig {
    /// Build the `Framer` from this configuration.
    pub fn build(&self) -> Framer {
        match self {
            Self::Bytes => Framer::Bytes(BytesEncoderConfig::new().build()),
            Self::CharacterDelimited(config) => Framer::CharacterDelimited(config.build()),
            Self::NewlineDelimited => {
                Framer::NewlineDelimited(NewlineDelimitedEncoderConfig::new().build())
            }
        }
    }
}

/// Wraps a serialized payload into a frame.
#[derive(Debug, Clone)]
pub enum Framer {
    /// Uses a `BytesEncoder` for framing.
    Bytes(BytesEncoder),
    /// Uses a `CharacterDelimitedEncoder` for framing.
    CharacterDelimited(CharacterDelimitedEncoder),
    /// Uses a `NewlineDelimitedEncoder` for framing.
    NewlineDelimited(NewlineDelimitedEncoder),
    /// Uses an opaque `FrameEncoder` implementation for framing.
    Boxed(BoxedFramer),
}

impl Framer {
    /// Frames the payload held in `buffer` in place.
    pub fn frame(&mut self, buffer: &mut BytesMut) -> Result<(), BoxedFramingError> {
        match self {
            Self::Bytes(framer) => framer.frame(buffer),
            Self::CharacterDelimited(framer) => framer.frame(buffer),
            Self::NewlineDelimited(framer) => framer.frame(buffer),
            Self::Boxed(framer) => framer.encode((), buffer),
        }
    }

    /// Frames the payload held in `buffer` in place, through a shared reference.
    ///
    /// The built-in framers hold no state. A boxed framer may, so it frames with a copy of
    /// itself and its own state is left as it was.
    pub fn frame_shared(&self, buffer: &mut BytesMut) -> Result<(), BoxedFramingError> {
        match self {
            Self::Bytes(framer) => framer.frame(buffer),
            Self::CharacterDelimited(framer) => framer.frame(buffer),
            Self::NewlineDelimited(framer) => framer.frame(buffer),
            Self::Boxed(framer) => framer.clone().encode((), buffer),
        }
    }
}

impl Encoder<()> for Framer {
    type Error = BoxedFramingError;

    fn encode(&mut self, _: (), buffer: &mut BytesMut) -> Result<(), Self::Error> {
        self.frame(buffer)
    }
}
