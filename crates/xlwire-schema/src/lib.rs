//! Byte-exact wire layouts for the XL driver record family.
//!
//! Every record the driver exchanges is a fixed sequence of little-endian
//! fields. This crate declares those layouts once ([`wire_record!`]),
//! groups them into per-family payload enums ([`catalog`]) and indexes them
//! by tag in an immutable [`TagRegistry`].

pub mod catalog;
pub mod envelope;
pub mod error;
pub mod family;
pub mod registry;
pub mod tags;
pub mod wire;

pub use catalog::channel::{BusParams, ChannelConfig};
pub use catalog::Payload;
pub use envelope::{A429Header, CanTxHeader, ClassicHeader, EthernetHeader, SizedHeader};
pub use error::{Result, SchemaError};
pub use family::{EnvelopeShape, Family, Framing, UnknownFamily};
pub use registry::{Direction, Selector, TagRegistry, UnionHead, VariantKey, VariantSpec};
pub use wire::{Field, FieldKind, FieldSpec, FieldValue, Layout, Record, Scalar, Wire};

#[doc(hidden)]
pub mod __private {
    pub use bytes::BytesMut;
}
