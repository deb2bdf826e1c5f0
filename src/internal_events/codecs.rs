use metrics::counter;

use super::{ComponentEventsDropped, InternalEvent, UNINTENTIONAL, error_stage, error_type};

#[derive(Debug)]
pub struct EncoderSelected<'a> {
    pub scheme: &'a str,
    pub codec: &'static str,
}

impl InternalEvent for EncoderSelected<'_> {
    fn emit(self) {
        debug!(
            message = "Selected encoder for destination.",
            scheme = %self.scheme,
            codec = %self.codec,
        );
    }

    fn name(&self) -> Option<&'static str> {
        Some("EncoderSelected")
    }
}

#[derive(Debug)]
pub struct EncoderFramingError<'a> {
    pub error: &'a ::codecs::encoding::BoxedFramingError,
}

impl InternalEvent for EncoderFramingError<'_> {
    fn emit(self) {
        let reason = "Failed framing bytes.";
        error!(
            message = reason,
            error = %self.error,
            error_code = "encoder_frame",
            error_type = error_type::ENCODER_FAILED,
            stage = error_stage::PROCESSING,
        );
        counter!(
            "component_errors_total",
            "error_code" => "encoder_frame",
            "error_type" => error_type::ENCODER_FAILED,
            "stage" => error_stage::PROCESSING,
        )
        .increment(1);
        counter!("encoder_framing_errors_total").increment(1);
        emit!(ComponentEventsDropped::<UNINTENTIONAL> { count: 1, reason });
    }

    fn name(&self) -> Option<&'static str> {
        Some("EncoderFramingError")
    }
}

#[derive(Debug)]
pub struct EncoderSerializeError<'a> {
    pub error: &'a ::codecs::Error,
}

impl InternalEvent for EncoderSerializeError<'_> {
    fn emit(self) {
        const SERIALIZE_REASON: &str = "Failed serializing frame.";
        error!(
            message = SERIALIZE_REASON,
            error = %self.error,
            error_code = "encoder_serialize",
            error_type = error_type::ENCODER_FAILED,
            stage = error_stage::PROCESSING,
        );
        counter!(
            "component_errors_total",
            "error_code" => "encoder_serialize",
            "error_type" => error_type::ENCODER_FAILED,
            "stage" => error_stage::PROCESSING,
        )
        .increment(1);
        counter!("encoder_serialize_errors_total").increment(1);
        emit!(ComponentEventsDropped::<UNINTENTIONAL> {
            count: 1,
            reason: SERIALIZE_REASON
        });
    }

    fn name(&self) -> Option<&'static str> {
        Some("EncoderSerializeError")
    }
}
