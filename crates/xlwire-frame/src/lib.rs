//! Event decoding, batch framing and transmit encoding for XL driver
//! records.
//!
//! A receive buffer holds a driver-reported number of records back to
//! back. Each record is an envelope header followed by a payload whose
//! layout is chosen by the envelope tag:
//! - self-describing families carry the overall record size in the header
//! - fixed-stride families occupy a constant number of bytes per record
//!
//! Decoding is all-or-nothing per record; unknown tags are reported, not
//! guessed.

pub mod codec;
mod constraints;
pub mod envelope;
pub mod error;
pub mod event;
pub mod reader;
pub mod writer;

pub use codec::{decode_one, DecodeConfig, Decoder, UnknownVariantPolicy};
pub use envelope::Envelope;
pub use error::{ErrorKind, FrameError, Result};
pub use event::Event;
pub use reader::BatchReader;
pub use writer::{encode_a429_msg, encode_eth_frame, encode_event, EventWriter, TransmitBatch};
