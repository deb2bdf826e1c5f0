//! The sink-facing side of encoding: a selected serializer paired with its framing.

mod encoder;

pub use encoder::{Encoder, EncodingConfig};
