//! Encoders that turn structured records into the payloads shipped by log and metric sinks.
//!
//! The codec is picked from the sink's destination URI: `udp+gelf://…` encodes GELF,
//! `udp+statsd://…` StatsD, `tcp+json://…` newline delimited JSON, and anything else the text of
//! each string column.

#[macro_use]
extern crate tracing;

#[macro_use]
pub mod internal_events;

pub mod codecs;
pub mod config;
pub mod trace;

pub use ::codecs::{Column, ColumnType, Record, record};

pub use crate::{
    codecs::{Encoder, EncodingConfig},
    config::{ConfigError, SinkEncodingConfig},
};
