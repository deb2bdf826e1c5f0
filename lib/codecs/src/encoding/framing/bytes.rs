use bytes::BytesMut;
use serde::{Deserialize, Serialize};
use tokio_util::codec::Encoder;

use super::BoxedFramingError;

/// Config used to build a `BytesEncoder`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct BytesEncoderConfig;

impl BytesEncoderConfig {
    /// Creates a `BytesEncoderConfig`.
    pub const fn new() -> Self {
        Self
    }

    /// Build the `BytesEncoder` from this configuration.
    pub const fn build(&self) -> BytesEncoder {
        BytesEncoder
    }
}

/// An encoder for handling of plain bytes.
///
/// This encoder does nothing, it just passes the payload through without framing. It is used
/// where framing is defined by the transport, such as one datagram per payload.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct BytesEncoder;

impl BytesEncoder {
    /// Leaves the payload in `buffer` as it is.
    pub fn frame(&self, _buffer: &mut BytesMut) -> Result<(), BoxedFramingError> {
        Ok(())
    }
}

impl Encoder<()> for BytesEncoder {
    type Error = BoxedFramingError;

    fn encode(&mut self, _: (), buffer: &mut BytesMut) -> Result<(), BoxedFramingError> {
        self.frame(buffer)
    }
}
