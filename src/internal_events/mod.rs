//! Internal events: the structured log lines and counters emitted while encoding.

/// An observable event raised by the encoding path.
pub trait InternalEvent: Sized {
    fn emit(self);

    fn name(&self) -> Option<&'static str> {
        None
    }
}

pub fn emit(event: impl InternalEvent) {
    event.emit();
}

#[macro_export]
macro_rules! emit {
    ($event:expr) => {
        $crate::internal_events::emit($event)
    };
}

// Modules that require emit! macro so they need to be defined after the macro.
mod codecs;

pub use self::codecs::*;

pub mod error_stage {
    pub const PROCESSING: &str = "processing";
}

pub mod error_type {
    pub const ENCODER_FAILED: &str = "encoder_failed";
}

pub const UNINTENTIONAL: bool = false;

/// Records that were dropped because they could not be encoded.
#[derive(Debug)]
pub struct ComponentEventsDropped<'a, const INTENDED: bool> {
    pub count: usize,
    pub reason: &'a str,
}

impl<const INTENDED: bool> InternalEvent for ComponentEventsDropped<'_, INTENDED> {
    fn emit(self) {
        let intentional_str = if INTENDED { "true" } else { "false" };
        if INTENDED {
            debug!(
                message = "Events dropped.",
                count = %self.count,
                intentional = %intentional_str,
                reason = %self.reason,
            );
        } else {
            error!(
                message = "Events dropped.",
                count = %self.count,
                intentional = %intentional_str,
                reason = %self.reason,
            );
        }
        metrics::counter!(
            "component_discarded_events_total",
            "intentional" => intentional_str,
        )
        .increment(self.count as u64);
    }

    fn name(&self) -> Option<&'static str> {
        Some("ComponentEventsDropped")
    }
}
