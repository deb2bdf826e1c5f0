use ::codecs::{
    Record,
    encoding::{BoxedFramingError, Error, Framer, FramingConfig, Serializer, SerializerConfig},
};
use bytes::{Bytes, BytesMut};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::internal_events::{EncoderFramingError, EncoderSelected, EncoderSerializeError};

#[derive(Debug, Clone)]
/// An encoder that can encode structured records into byte frames.
///
/// Encoders hold no per-record state, one instance can serve every record bound for a sink.
pub struct Encoder {
    framer: Framer,
    serializer: Serializer,
}

impl Default for Encoder {
    fn default() -> Self {
        EncodingConfig::default().build()
    }
}

impl Encoder {
    /// Creates a new `Encoder` with the specified `Serializer` to produce bytes
    /// from a structured record, and the `Framer` to wrap these into a byte
    /// frame.
    pub const fn new(framer: Framer, serializer: Serializer) -> Self {
        Self { framer, serializer }
    }

    /// Creates the `Encoder` matching a destination URL's scheme.
    pub fn for_url(url: &Url) -> Self {
        EncodingConfig::from_url(url).build()
    }

    /// Get the framer.
    pub const fn framer(&self) -> &Framer {
        &self.framer
    }

    /// Get the serializer.
    pub const fn serializer(&self) -> &Serializer {
        &self.serializer
    }

    /// Encodes one record into a standalone payload, ready for a single write.
    pub fn encode_record(&self, record: &Record) -> Result<Bytes, Error> {
        let mut buffer = BytesMut::new();
        encode_framed(
            &mut buffer,
            |payload| self.serializer.encode(record, payload),
            |payload| self.framer.frame_shared(payload),
        )?;
        Ok(buffer.freeze())
    }
}

/// Appends a serialized and framed payload to `buffer`.
///
/// Either the whole frame is appended or, on error, `buffer` is left untouched.
fn encode_framed(
    buffer: &mut BytesMut,
    serialize: impl FnOnce(&mut BytesMut) -> Result<(), ::codecs::Error>,
    frame: impl FnOnce(&mut BytesMut) -> Result<(), BoxedFramingError>,
) -> Result<(), Error> {
    let len = buffer.len();

    let mut payload = buffer.split_off(len);

    // Serialize the record.
    serialize(&mut payload).map_err(|error| {
        emit!(EncoderSerializeError { error: &error });
        Error::SerializingError(error)
    })?;

    // Frame the serialized record.
    frame(&mut payload).map_err(|error| {
        emit!(EncoderFramingError { error: &error });
        Error::FramingError(error)
    })?;

    buffer.unsplit(payload);

    Ok(())
}

impl tokio_util::codec::Encoder<Record> for Encoder {
    type Error = Error;

    fn encode(&mut self, item: Record, buffer: &mut BytesMut) -> Result<(), Self::Error> {
        encode_framed(
            buffer,
            |payload| self.serializer.encode(&item, payload),
            |payload| self.framer.frame(payload),
        )
    }
}

/// Config used to build an `Encoder`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct EncodingConfig {
    /// The framing config. Falls back to the codec's default framing when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    framing: Option<FramingConfig>,
    /// The encoding config.
    #[serde(default)]
    encoding: SerializerConfig,
}

impl EncodingConfig {
    /// Creates a new `EncodingConfig` with the provided `FramingConfig` and
    /// `SerializerConfig`.
    pub const fn new(framing: Option<FramingConfig>, encoding: SerializerConfig) -> Self {
        Self { framing, encoding }
    }

    /// Selects the codec from a URI scheme, keeping the codec's default framing.
    pub fn from_scheme(scheme: &str) -> Self {
        let encoding = SerializerConfig::from_scheme(scheme);
        emit!(EncoderSelected {
            scheme,
            codec: encoding.name(),
        });
        Self::new(None, encoding)
    }

    /// Selects the codec from a destination URL's scheme.
    pub fn from_url(url: &Url) -> Self {
        Self::from_scheme(url.scheme())
    }

    /// Get the framing config, if one was set explicitly.
    pub const fn framing(&self) -> Option<&FramingConfig> {
        self.framing.as_ref()
    }

    /// Get the encoding config.
    pub const fn encoding(&self) -> &SerializerConfig {
        &self.encoding
    }

    /// Builds an `Encoder` from the provided configuration.
    pub fn build(&self) -> Encoder {
        // Build the framer.
        let framer = self
            .framing
            .clone()
            .unwrap_or_else(|| self.encoding.default_framing())
            .build();

        // Build the serializer.
        let serializer = self.encoding.build();

        Encoder::new(framer, serializer)
    }
}

#[cfg(test)]
mod tests {
    use ::codecs::{
        Column, FramingConfig, RawStringSerializer,
        encoding::CharacterDelimitedEncoderConfig,
        record,
    };
    use bytes::BufMut;
    use futures::{SinkExt, StreamExt};
    use tokio_util::codec::FramedWrite;
    use tracing_test::traced_test;

    use super::*;

    #[derive(Debug, Clone)]
    struct ParenEncoder;

    impl ParenEncoder {
        pub const fn new() -> Self {
            Self
        }
    }

    impl tokio_util::codec::Encoder<()> for ParenEncoder {
        type Error = BoxedFramingError;

        fn encode(&mut self, _: (), dst: &mut BytesMut) -> Result<(), Self::Error> {
            dst.reserve(2);
            let inner = dst.split();
            dst.put_u8(b'(');
            dst.unsplit(inner);
            dst.put_u8(b')');
            Ok(())
        }
    }

    #[derive(Debug, Clone)]
    struct ErrorNthEncoder<T>(T, usize, usize)
    where
        T: tokio_util::codec::Encoder<(), Error = BoxedFramingError>;

    impl<T> ErrorNthEncoder<T>
    where
        T: tokio_util::codec::Encoder<(), Error = BoxedFramingError>,
    {
        pub fn new(encoder: T, n: usize) -> Self {
            Self(encoder, 0, n)
        }
    }

    impl<T> tokio_util::codec::Encoder<()> for ErrorNthEncoder<T>
    where
        T: tokio_util::codec::Encoder<(), Error = BoxedFramingError>,
    {
        type Error = BoxedFramingError;

        fn encode(&mut self, _: (), dst: &mut BytesMut) -> Result<(), Self::Error> {
            self.0.encode((), dst)?;
            let result = if self.1 == self.2 {
                Err(Box::new(std::io::Error::other("error")) as _)
            } else {
                Ok(())
            };
            self.1 += 1;
            result
        }
    }

    fn message(text: &str) -> Record {
        record! { "message" => text }
    }

    fn paren_encoder() -> Encoder {
        Encoder::new(
            Framer::Boxed(Box::new(ParenEncoder::new())),
            Serializer::RawString(RawStringSerializer::new()),
        )
    }

    fn failing_paren_encoder(n: usize) -> Encoder {
        Encoder::new(
            Framer::Boxed(Box::new(ErrorNthEncoder::new(ParenEncoder::new(), n))),
            Serializer::RawString(RawStringSerializer::new()),
        )
    }

    #[tokio::test]
    async fn test_encode_records_sink_empty() {
        let source = futures::stream::iter(vec![message("foo"), message("bar"), message("baz")])
            .map(Ok);
        let sink = Vec::new();
        let mut framed = FramedWrite::new(sink, paren_encoder());
        source.forward(&mut framed).await.unwrap();
        let sink = framed.into_inner();
        assert_eq!(sink, b"(foo\n)(bar\n)(baz\n)");
    }

    #[tokio::test]
    async fn test_encode_records_sink_non_empty() {
        let source = futures::stream::iter(vec![message("bar"), message("baz"), message("bat")])
            .map(Ok);
        let sink = Vec::from("(foo\n)");
        let mut framed = FramedWrite::new(sink, paren_encoder());
        source.forward(&mut framed).await.unwrap();
        let sink = framed.into_inner();
        assert_eq!(sink, b"(foo\n)(bar\n)(baz\n)(bat\n)");
    }

    #[tokio::test]
    async fn test_encode_records_sink_empty_handle_framing_error() {
        let source = futures::stream::iter(vec![message("foo"), message("bar"), message("baz")])
            .map(Ok);
        let sink = Vec::new();
        let mut framed = FramedWrite::new(sink, failing_paren_encoder(1));
        assert!(source.forward(&mut framed).await.is_err());
        framed.flush().await.unwrap();
        let sink = framed.into_inner();
        assert_eq!(sink, b"(foo\n)");
    }

    #[tokio::test]
    async fn test_encode_records_sink_non_empty_handle_framing_error() {
        let source = futures::stream::iter(vec![message("bar"), message("baz"), message("bat")])
            .map(Ok);
        let sink = Vec::from("(foo\n)");
        let mut framed = FramedWrite::new(sink, failing_paren_encoder(1));
        assert!(source.forward(&mut framed).await.is_err());
        framed.flush().await.unwrap();
        let sink = framed.into_inner();
        assert_eq!(sink, b"(foo\n)(bar\n)");
    }

    #[test]
    #[traced_test]
    fn framing_error_leaves_buffer_untouched() {
        let mut encoder = failing_paren_encoder(0);
        let mut buffer = BytesMut::from("prefix");

        let result = tokio_util::codec::Encoder::encode(&mut encoder, message("foo"), &mut buffer);

        assert!(matches!(result, Err(Error::FramingError(_))));
        assert_eq!(buffer, "prefix");
        assert!(logs_contain("Failed framing bytes."));
    }

    #[test]
    fn encode_record_leaves_boxed_framer_state_alone() {
        // Fails on the second frame produced by any one copy of the framer.
        let encoder = failing_paren_encoder(1);

        for _ in 0..3 {
            assert_eq!(encoder.encode_record(&message("foo")).unwrap(), "(foo\n)");
        }
    }

    #[test]
    #[traced_test]
    fn serialize_error_leaves_buffer_untouched() {
        let mut buffer = BytesMut::from("prefix");

        let result = encode_framed(
            &mut buffer,
            |payload| {
                payload.put_slice(b"partial");
                Err("unserializable record".into())
            },
            |_| panic!("framing must not run after a serialize error"),
        );

        assert!(matches!(result, Err(Error::SerializingError(_))));
        assert_eq!(buffer, "prefix");
        assert!(logs_contain("Failed serializing frame."));
        assert!(logs_contain("unserializable record"));
    }

    #[test]
    fn json_is_newline_delimited() {
        let encoder = EncodingConfig::from_scheme("tcp+json").build();
        let record = record! {
            "a" => "x",
            "b" => Column::Gauge(5),
        };

        let bytes = encoder.encode_record(&record).unwrap();

        assert_eq!(bytes, concat!(r#"{"a":"x","b":5}"#, "\n"));
    }

    #[test]
    fn gelf_has_no_framing() {
        let encoder = EncodingConfig::from_scheme("udp+gelf").build();

        let bytes = encoder.encode_record(&record! { "custom" => "x" }).unwrap();

        assert_eq!(bytes, r#"{"_custom":"x","version":"1.1"}"#);
    }

    #[test]
    fn statsd_concatenates_entries() {
        let encoder = EncodingConfig::from_scheme("udp+statsd").build();
        let record = record! {
            "requests" => Column::Counter(3),
            "queue" => Column::Gauge(12),
            "message" => "ignored",
        };

        let bytes = encoder.encode_record(&record).unwrap();

        assert_eq!(bytes, "queue:12|grequests:3|c");
    }

    #[test]
    fn unknown_scheme_falls_back_to_raw_string() {
        let encoder = EncodingConfig::from_scheme("tcp").build();

        let bytes = encoder
            .encode_record(&record! {
                "message" => "hello",
                "hits" => Column::Counter(1),
            })
            .unwrap();

        assert_eq!(bytes, "hello\n");
    }

    #[test]
    fn explicit_framing_overrides_default() {
        let config = EncodingConfig::new(
            Some(FramingConfig::CharacterDelimited(
                CharacterDelimitedEncoderConfig::new(b'\0'),
            )),
            SerializerConfig::from_scheme("gelf"),
        );

        let bytes = config.build().encode_record(&message("hi")).unwrap();

        assert_eq!(bytes, "{\"short_message\":\"hi\",\"version\":\"1.1\"}\0");
    }

    #[test]
    fn encoding_is_idempotent() {
        let record = record! {
            "_hostname" => "example.org",
            "message" => "hello",
            "a" => "x",
            "b" => "y",
            "hits" => Column::Counter(7),
            "latency" => Column::Metric(20),
        };

        for scheme in ["json", "gelf", "statsd", "raw"] {
            let encoder = EncodingConfig::from_scheme(scheme).build();
            assert_eq!(
                encoder.encode_record(&record).unwrap(),
                encoder.encode_record(&record).unwrap(),
            );
        }
    }
}
