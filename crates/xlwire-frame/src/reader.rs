use std::iter::FusedIterator;

use tracing::warn;
use xlwire_schema::Family;

use crate::codec::{DecodeConfig, Decoder, UnknownVariantPolicy};
use crate::error::{FrameError, Result};
use crate::event::Event;

/// Iterates the records of one receive buffer in buffer order.
///
/// `count` is authoritative: the reader yields exactly that many slots and
/// never looks at the bytes after the last record, which may be garbage.
/// A framing error is yielded once and ends the batch. Unknown variants are
/// stepped over under [`UnknownVariantPolicy::Yield`].
#[derive(Debug, Clone)]
pub struct BatchReader<'a> {
    decoder: Decoder,
    buf: &'a [u8],
    count: usize,
    yielded: usize,
    offset: usize,
    done: bool,
}

impl<'a> BatchReader<'a> {
    /// Create a batch reader with default configuration.
    pub fn new(family: Family, buf: &'a [u8], count: usize) -> Result<Self> {
        Ok(Self::from_decoder(Decoder::new(family)?, buf, count))
    }

    /// Create a batch reader with explicit configuration.
    pub fn with_config(
        family: Family,
        buf: &'a [u8],
        count: usize,
        config: DecodeConfig,
    ) -> Result<Self> {
        Ok(Self::from_decoder(
            Decoder::with_config(family, config)?,
            buf,
            count,
        ))
    }

    pub fn from_decoder(decoder: Decoder, buf: &'a [u8], count: usize) -> Self {
        Self {
            decoder,
            buf,
            count,
            yielded: 0,
            offset: 0,
            done: count == 0,
        }
    }

    pub fn family(&self) -> Family {
        self.decoder.family()
    }

    /// Bytes consumed by the records read so far.
    pub fn consumed(&self) -> usize {
        self.offset
    }

    /// Slots not yet yielded. Zero once the batch has ended.
    pub fn remaining(&self) -> usize {
        if self.done {
            0
        } else {
            self.count - self.yielded
        }
    }
}

impl Iterator for BatchReader<'_> {
    type Item = Result<Event>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let index = self.yielded;
        self.yielded += 1;
        if self.yielded == self.count {
            self.done = true;
        }

        match self.decoder.decode_one(self.buf, self.offset) {
            Ok((event, consumed)) => {
                self.offset += consumed;
                Some(Ok(event))
            }
            Err(FrameError::UnknownVariant { key, consumed })
                if self.decoder.config().unknown_variants == UnknownVariantPolicy::Yield =>
            {
                warn!(%key, index, offset = self.offset, "skipping unknown record");
                self.offset += consumed;
                Some(Err(FrameError::UnknownVariant { key, consumed }))
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining()))
    }
}

impl FusedIterator for BatchReader<'_> {}

#[cfg(test)]
mod tests {
    use bytes::{BufMut, BytesMut};
    use xlwire_schema::tags::canfd;

    use super::*;

    fn chip_state(buf: &mut BytesMut, tag: u16, bus_status: u8) {
        buf.put_u32_le(40);
        buf.put_u16_le(tag);
        buf.put_u16_le(0);
        buf.put_u32_le(0);
        buf.put_u16_le(0);
        buf.put_u16_le(0);
        buf.put_u64_le(0);
        buf.put_u64_le(0);
        buf.put_slice(&[bus_status, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn zero_count_yields_nothing() {
        let mut reader = BatchReader::new(Family::CanFdRx, &[0xFF; 64], 0).unwrap();
        assert!(reader.next().is_none());
        assert_eq!(reader.consumed(), 0);
    }

    #[test]
    fn stops_after_count_despite_trailing_bytes() {
        let mut buf = BytesMut::new();
        chip_state(&mut buf, canfd::CHIP_STATE, 1);
        chip_state(&mut buf, canfd::CHIP_STATE, 2);
        buf.put_slice(&[0xAB; 40]);

        let reader = BatchReader::new(Family::CanFdRx, &buf, 2).unwrap();
        let events: Vec<_> = reader.collect::<Result<_>>().unwrap();
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn unknown_record_is_yielded_then_skipped() {
        let mut buf = BytesMut::new();
        chip_state(&mut buf, 0x0777, 0);
        chip_state(&mut buf, canfd::CHIP_STATE, 5);

        let mut reader = BatchReader::new(Family::CanFdRx, &buf, 2).unwrap();
        assert!(matches!(
            reader.next(),
            Some(Err(FrameError::UnknownVariant { consumed: 40, .. }))
        ));
        assert!(matches!(reader.next(), Some(Ok(_))));
        assert!(reader.next().is_none());
        assert_eq!(reader.consumed(), 80);
    }

    #[test]
    fn abort_policy_ends_on_unknown_record() {
        let mut buf = BytesMut::new();
        chip_state(&mut buf, 0x0777, 0);
        chip_state(&mut buf, canfd::CHIP_STATE, 5);

        let config = DecodeConfig {
            unknown_variants: UnknownVariantPolicy::Abort,
            ..DecodeConfig::default()
        };
        let mut reader = BatchReader::with_config(Family::CanFdRx, &buf, 2, config).unwrap();
        assert!(matches!(
            reader.next(),
            Some(Err(FrameError::UnknownVariant { .. }))
        ));
        assert!(reader.next().is_none());
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn framing_error_is_terminal() {
        let mut buf = BytesMut::new();
        chip_state(&mut buf, canfd::CHIP_STATE, 1);

        let mut reader = BatchReader::new(Family::CanFdRx, &buf, 3).unwrap();
        assert_eq!(reader.size_hint(), (0, Some(3)));
        assert!(matches!(reader.next(), Some(Ok(_))));
        assert!(matches!(
            reader.next(),
            Some(Err(FrameError::Truncated { offset: 40, .. }))
        ));
        assert!(reader.next().is_none());
        assert!(reader.next().is_none());
    }
}
