use tracing::debug;
use xlwire_schema::{Family, Framing, Payload, SchemaError, TagRegistry};

use crate::envelope::Envelope;
use crate::error::{FrameError, Result};
use crate::event::Event;

/// What a batch does with a record whose tag is not registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownVariantPolicy {
    /// Yield `Err(UnknownVariant)` and continue with the next record.
    #[default]
    Yield,
    /// Yield the error and end the batch.
    Abort,
}

/// Configuration for the event decoder.
#[derive(Debug, Clone, Default)]
pub struct DecodeConfig {
    pub unknown_variants: UnknownVariantPolicy,
    /// Upper bound on a self-describing record size. The family maximum
    /// always applies; this can only lower it.
    pub max_event_size: Option<usize>,
}

/// Decodes single records of one family.
#[derive(Debug, Clone)]
pub struct Decoder {
    family: Family,
    config: DecodeConfig,
    registry: &'static TagRegistry,
}

impl Decoder {
    /// Create a decoder with default configuration.
    pub fn new(family: Family) -> Result<Self> {
        Self::with_config(family, DecodeConfig::default())
    }

    /// Create a decoder with explicit configuration.
    pub fn with_config(family: Family, config: DecodeConfig) -> Result<Self> {
        Ok(Self {
            family,
            config,
            registry: TagRegistry::global()?,
        })
    }

    pub fn family(&self) -> Family {
        self.family
    }

    /// Current decoder configuration.
    pub fn config(&self) -> &DecodeConfig {
        &self.config
    }

    /// Largest record size accepted for this family.
    pub fn max_event_size(&self) -> Option<usize> {
        match self.family.framing() {
            Framing::FixedStride(_) => None,
            Framing::SelfDescribing { max_size } => Some(
                self.config
                    .max_event_size
                    .map_or(max_size, |limit| limit.min(max_size)),
            ),
        }
    }

    /// Decode the record at `offset` and return it with the number of
    /// bytes it occupies.
    pub fn decode_one(&self, buf: &[u8], offset: usize) -> Result<(Event, usize)> {
        self.decode_at(buf, offset).inspect_err(|err| {
            if !err.is_recoverable() {
                debug!(family = %self.family, offset, error = %err, "record decode failed");
            }
        })
    }

    fn decode_at(&self, buf: &[u8], offset: usize) -> Result<(Event, usize)> {
        let shape = self.family.envelope();
        let header = shape.header_size();
        let src = buf.get(offset..).unwrap_or_default();
        if src.len() < header {
            return Err(FrameError::Truncated {
                offset,
                needed: header,
                available: src.len(),
            });
        }

        let envelope = Envelope::decode(shape, src)?;

        let size = match self.family.framing() {
            Framing::FixedStride(stride) => stride,
            Framing::SelfDescribing { .. } => {
                let size = envelope.size().map_or(0, |size| size as usize);
                if size < header {
                    return Err(FrameError::Undersized {
                        offset,
                        size,
                        header,
                    });
                }
                let max = self.max_event_size().unwrap_or(usize::MAX);
                if size > max {
                    return Err(FrameError::Oversized { offset, size, max });
                }
                size
            }
        };

        if src.len() < size {
            return Err(FrameError::Truncated {
                offset,
                needed: size,
                available: src.len(),
            });
        }

        let body = &src[header..size];
        let spec = match self.registry.resolve(self.family, envelope.tag(), body) {
            Ok(spec) => spec,
            Err(SchemaError::UnknownKey(key)) => {
                return Err(FrameError::UnknownVariant {
                    key,
                    consumed: size,
                })
            }
            Err(err) => return Err(err.into()),
        };

        if body.len() != spec.layout.size {
            return Err(FrameError::SizeMismatch {
                key: spec.key,
                actual: body.len(),
                expected: spec.layout.size,
            });
        }

        let payload = Payload::decode(spec, body)?;
        Ok((Event { envelope, payload }, size))
    }
}

/// Decode the record of `family` at `offset` with default configuration.
pub fn decode_one(family: Family, buf: &[u8], offset: usize) -> Result<(Event, usize)> {
    Decoder::new(family)?.decode_one(buf, offset)
}

#[cfg(test)]
mod tests {
    use bytes::{BufMut, BytesMut};
    use xlwire_schema::catalog::canfd::CanFdRxPayload;
    use xlwire_schema::catalog::classic::ClassicPayload;
    use xlwire_schema::tags::{canfd, classic};
    use xlwire_schema::VariantKey;

    use super::*;
    use crate::error::ErrorKind;

    fn classic_header(buf: &mut BytesMut, tag: u8, channel: u8) {
        buf.put_u8(tag);
        buf.put_u8(channel);
        buf.put_u16_le(0);
        buf.put_u16_le(0);
        buf.put_u8(0);
        buf.put_u8(0);
        buf.put_u64_le(1_000);
    }

    fn sized_header(buf: &mut BytesMut, size: u32, tag: u16) {
        buf.put_u32_le(size);
        buf.put_u16_le(tag);
        buf.put_u16_le(0);
        buf.put_u32_le(0);
        buf.put_u16_le(0);
        buf.put_u16_le(0);
        buf.put_u64_le(0);
        buf.put_u64_le(0);
    }

    #[test]
    fn classic_record_uses_fixed_stride() {
        let mut buf = BytesMut::new();
        classic_header(&mut buf, classic::RECEIVE_MSG as u8, 1);
        buf.put_u32_le(0x123);
        buf.put_u16_le(0);
        buf.put_u16_le(8);
        buf.put_u64_le(0);
        buf.put_slice(&[1, 2, 3, 4, 5, 6, 7, 8]);
        buf.put_u64_le(0);

        let (event, consumed) = decode_one(Family::Classic, &buf, 0).unwrap();
        assert_eq!(consumed, 48);
        assert_eq!(event.channel(), 1);
        assert_eq!(event.id(), Some(0x123));
        assert!(matches!(
            event.payload,
            Payload::Classic(ClassicPayload::ReceiveMsg(_))
        ));
    }

    #[test]
    fn short_header_is_truncated() {
        let err = decode_one(Family::Classic, &[0u8; 10], 0).unwrap_err();
        assert_eq!(
            err,
            FrameError::Truncated {
                offset: 0,
                needed: 16,
                available: 10
            }
        );
    }

    #[test]
    fn offset_past_end_is_truncated() {
        let err = decode_one(Family::Classic, &[0u8; 48], 64).unwrap_err();
        assert!(matches!(err, FrameError::Truncated { available: 0, .. }));
    }

    #[test]
    fn declared_size_below_header() {
        let mut buf = BytesMut::new();
        sized_header(&mut buf, 16, canfd::CHIP_STATE);
        let err = decode_one(Family::CanFdRx, &buf, 0).unwrap_err();
        assert!(matches!(err, FrameError::Undersized { size: 16, .. }));
    }

    #[test]
    fn declared_size_above_family_maximum() {
        let mut buf = BytesMut::new();
        sized_header(&mut buf, 4096, canfd::RX_OK);
        let err = decode_one(Family::CanFdRx, &buf, 0).unwrap_err();
        assert!(matches!(err, FrameError::Oversized { max: 128, .. }));
    }

    #[test]
    fn configured_maximum_only_lowers_the_limit() {
        let config = DecodeConfig {
            max_event_size: Some(64),
            ..DecodeConfig::default()
        };
        let decoder = Decoder::with_config(Family::CanFdRx, config).unwrap();
        assert_eq!(decoder.max_event_size(), Some(64));

        let config = DecodeConfig {
            max_event_size: Some(1 << 20),
            ..DecodeConfig::default()
        };
        let decoder = Decoder::with_config(Family::CanFdRx, config).unwrap();
        assert_eq!(decoder.max_event_size(), Some(128));
        assert_eq!(Decoder::new(Family::Classic).unwrap().max_event_size(), None);
    }

    #[test]
    fn size_disagreeing_with_layout() {
        let mut buf = BytesMut::new();
        // Chip state payload is 8 bytes; declare 12.
        sized_header(&mut buf, 44, canfd::CHIP_STATE);
        buf.put_slice(&[0u8; 12]);
        let err = decode_one(Family::CanFdRx, &buf, 0).unwrap_err();
        assert_eq!(
            err,
            FrameError::SizeMismatch {
                key: VariantKey::new(Family::CanFdRx, canfd::CHIP_STATE),
                actual: 12,
                expected: 8,
            }
        );
        assert_eq!(err.kind(), ErrorKind::Framing);
    }

    #[test]
    fn unknown_tag_reports_consumed_size() {
        let mut buf = BytesMut::new();
        sized_header(&mut buf, 40, 0x0777);
        buf.put_slice(&[0u8; 8]);
        let err = decode_one(Family::CanFdRx, &buf, 0).unwrap_err();
        assert_eq!(
            err,
            FrameError::UnknownVariant {
                key: VariantKey::new(Family::CanFdRx, 0x0777),
                consumed: 40,
            }
        );
    }

    #[test]
    fn chip_state_decodes_at_offset() {
        let mut buf = BytesMut::new();
        buf.put_slice(&[0xEE; 5]);
        sized_header(&mut buf, 40, canfd::CHIP_STATE);
        buf.put_slice(&[3, 7, 9, 0, 0, 0, 0, 0]);

        let (event, consumed) = decode_one(Family::CanFdRx, &buf, 5).unwrap();
        assert_eq!(consumed, 40);
        match event.payload {
            Payload::CanFdRx(CanFdRxPayload::ChipState(state)) => {
                assert_eq!(state.bus_status, 3);
                assert_eq!(state.tx_error_counter, 7);
                assert_eq!(state.rx_error_counter, 9);
            }
            other => panic!("unexpected payload {other:?}"),
        }
    }
}
