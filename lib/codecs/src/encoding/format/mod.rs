//! A collection of formats that can be used to convert from records to byte
//! sequences.

#![deny(missing_docs)]

mod gelf;
mod json;
mod raw_string;
mod statsd;

pub use gelf::{GelfSerializer, GelfSerializerConfig, GelfSerializerOptions};
pub use json::{JsonSerializer, JsonSerializerConfig};
pub use raw_string::{RawStringSerializer, RawStringSerializerConfig};
pub use statsd::{StatsdSerializer, StatsdSerializerConfig, StatsdSerializerOptions};
