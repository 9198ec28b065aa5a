use bytes::BytesMut;
use xlwire_schema::{
    A429Header, CanTxHeader, ClassicHeader, EnvelopeShape, EthernetHeader, Field, Record,
    SizedHeader, Wire,
};

use crate::error::Result;

/// Decoded envelope header of one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Envelope {
    Classic(ClassicHeader),
    Sized(SizedHeader),
    Ethernet(EthernetHeader),
    A429(A429Header),
    CanTx(CanTxHeader),
}

impl Envelope {
    /// Decode the header of the given shape from the front of `src`.
    pub fn decode(shape: EnvelopeShape, src: &[u8]) -> Result<Self> {
        Ok(match shape {
            EnvelopeShape::Classic => Envelope::Classic(ClassicHeader::decode(src)?),
            EnvelopeShape::Sized => Envelope::Sized(SizedHeader::decode(src)?),
            EnvelopeShape::Ethernet => Envelope::Ethernet(EthernetHeader::decode(src)?),
            EnvelopeShape::A429 => Envelope::A429(A429Header::decode(src)?),
            EnvelopeShape::CanTx => Envelope::CanTx(CanTxHeader::decode(src)?),
        })
    }

    /// An all-zero header carrying only `tag` and, for self-describing
    /// shapes, the overall record `size`.
    pub fn blank(shape: EnvelopeShape, tag: u16, size: u32) -> Self {
        match shape {
            EnvelopeShape::Classic => Envelope::Classic(ClassicHeader {
                // Classic tags fit in one byte.
                tag: tag as u8,
                ..ClassicHeader::zeroed()
            }),
            EnvelopeShape::Sized => Envelope::Sized(SizedHeader {
                size,
                tag,
                ..SizedHeader::zeroed()
            }),
            EnvelopeShape::Ethernet => Envelope::Ethernet(EthernetHeader {
                size,
                tag,
                ..EthernetHeader::zeroed()
            }),
            EnvelopeShape::A429 => Envelope::A429(A429Header {
                size,
                tag,
                ..A429Header::zeroed()
            }),
            EnvelopeShape::CanTx => Envelope::CanTx(CanTxHeader {
                tag,
                ..CanTxHeader::zeroed()
            }),
        }
    }

    pub fn encode(&self, dst: &mut BytesMut) -> Result<()> {
        match self {
            Envelope::Classic(h) => h.encode(dst)?,
            Envelope::Sized(h) => h.encode(dst)?,
            Envelope::Ethernet(h) => h.encode(dst)?,
            Envelope::A429(h) => h.encode(dst)?,
            Envelope::CanTx(h) => h.encode(dst)?,
        }
        Ok(())
    }

    pub fn shape(&self) -> EnvelopeShape {
        match self {
            Envelope::Classic(_) => EnvelopeShape::Classic,
            Envelope::Sized(_) => EnvelopeShape::Sized,
            Envelope::Ethernet(_) => EnvelopeShape::Ethernet,
            Envelope::A429(_) => EnvelopeShape::A429,
            Envelope::CanTx(_) => EnvelopeShape::CanTx,
        }
    }

    pub fn tag(&self) -> u16 {
        match self {
            Envelope::Classic(h) => u16::from(h.tag),
            Envelope::Sized(h) => h.tag,
            Envelope::Ethernet(h) => h.tag,
            Envelope::A429(h) => h.tag,
            Envelope::CanTx(h) => h.tag,
        }
    }

    /// Declared overall record size; `None` for fixed-stride shapes.
    pub fn size(&self) -> Option<u32> {
        match self {
            Envelope::Sized(h) => Some(h.size),
            Envelope::Ethernet(h) => Some(h.size),
            Envelope::A429(h) => Some(h.size),
            Envelope::Classic(_) | Envelope::CanTx(_) => None,
        }
    }

    pub fn channel_index(&self) -> u16 {
        match self {
            Envelope::Classic(h) => u16::from(h.chan_index),
            Envelope::Sized(h) => h.channel_index,
            Envelope::Ethernet(h) => h.channel_index,
            Envelope::A429(h) => u16::from(h.channel_index),
            Envelope::CanTx(h) => u16::from(h.channel_index),
        }
    }

    /// Raw hardware timestamp in nanoseconds. The transmit header has none
    /// and Ethernet records only carry the synchronized stamp.
    pub fn time_stamp(&self) -> Option<u64> {
        match self {
            Envelope::Classic(h) => Some(h.time_stamp),
            Envelope::Sized(h) => Some(h.time_stamp),
            Envelope::A429(h) => Some(h.time_stamp),
            Envelope::Ethernet(_) | Envelope::CanTx(_) => None,
        }
    }

    /// Second timestamp. MOST25 stores the original (unsynchronized) time
    /// here.
    pub fn time_stamp_sync(&self) -> Option<u64> {
        match self {
            Envelope::Sized(h) => Some(h.time_stamp_sync),
            Envelope::Ethernet(h) => Some(h.time_stamp_sync),
            Envelope::A429(h) => Some(h.time_stamp_sync),
            Envelope::Classic(_) | Envelope::CanTx(_) => None,
        }
    }

    /// Correlation handle: `transId` or `userHandle` depending on shape.
    pub fn handle(&self) -> u32 {
        match self {
            Envelope::Classic(h) => u32::from(h.trans_id),
            Envelope::Sized(h) => h.user_handle,
            Envelope::Ethernet(h) => h.user_handle,
            Envelope::A429(h) => h.user_handle,
            Envelope::CanTx(h) => u32::from(h.trans_id),
        }
    }

    pub fn nonzero_reserved(&self) -> Option<&'static str> {
        match self {
            Envelope::Classic(h) => h.nonzero_reserved(),
            Envelope::Sized(h) => h.nonzero_reserved(),
            Envelope::Ethernet(h) => h.nonzero_reserved(),
            Envelope::A429(h) => h.nonzero_reserved(),
            Envelope::CanTx(h) => h.nonzero_reserved(),
        }
    }

    pub fn fields(&self) -> Vec<Field> {
        match self {
            Envelope::Classic(h) => h.fields(),
            Envelope::Sized(h) => h.fields(),
            Envelope::Ethernet(h) => h.fields(),
            Envelope::A429(h) => h.fields(),
            Envelope::CanTx(h) => h.fields(),
        }
    }

    /// Shapes with a one-byte channel field keep the low byte.
    pub(crate) fn set_channel_index(&mut self, channel: u16) {
        match self {
            Envelope::Classic(h) => h.chan_index = channel as u8,
            Envelope::Sized(h) => h.channel_index = channel,
            Envelope::Ethernet(h) => h.channel_index = channel,
            Envelope::A429(h) => h.channel_index = channel as u8,
            Envelope::CanTx(h) => h.channel_index = channel as u8,
        }
    }

    pub(crate) fn set_time_stamp(&mut self, time_stamp: u64) {
        match self {
            Envelope::Classic(h) => h.time_stamp = time_stamp,
            Envelope::Sized(h) => h.time_stamp = time_stamp,
            Envelope::A429(h) => h.time_stamp = time_stamp,
            Envelope::Ethernet(h) => h.time_stamp_sync = time_stamp,
            Envelope::CanTx(_) => {}
        }
    }

    pub(crate) fn set_handle(&mut self, handle: u32) {
        match self {
            Envelope::Classic(h) => h.trans_id = handle as u16,
            Envelope::Sized(h) => h.user_handle = handle,
            Envelope::Ethernet(h) => h.user_handle = handle,
            Envelope::A429(h) => h.user_handle = handle,
            Envelope::CanTx(h) => h.trans_id = handle as u16,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_sets_tag_and_size() {
        let env = Envelope::blank(EnvelopeShape::Sized, 0x0400, 128);
        assert_eq!(env.tag(), 0x0400);
        assert_eq!(env.size(), Some(128));
        assert_eq!(env.nonzero_reserved(), None);

        let classic = Envelope::blank(EnvelopeShape::Classic, 0x0001, 0);
        assert_eq!(classic.size(), None);
        assert_eq!(classic.shape(), EnvelopeShape::Classic);
    }

    #[test]
    fn encode_emits_header_size() {
        for shape in [
            EnvelopeShape::Classic,
            EnvelopeShape::Sized,
            EnvelopeShape::Ethernet,
            EnvelopeShape::A429,
            EnvelopeShape::CanTx,
        ] {
            let mut dst = BytesMut::new();
            Envelope::blank(shape, 1, 0).encode(&mut dst).unwrap();
            assert_eq!(dst.len(), shape.header_size());
        }
    }

    #[test]
    fn a429_channel_is_one_byte() {
        let mut raw = [0u8; 32];
        raw[6] = 3;
        raw[7] = 0xFF;
        let env = Envelope::decode(EnvelopeShape::A429, &raw).unwrap();
        assert_eq!(env.channel_index(), 3);
        assert_eq!(env.nonzero_reserved(), Some("reserved"));
    }

    #[test]
    fn ethernet_has_no_raw_stamp() {
        let mut raw = [0u8; 32];
        raw[16..24].copy_from_slice(&7u64.to_le_bytes());
        raw[24..32].copy_from_slice(&9u64.to_le_bytes());
        let env = Envelope::decode(EnvelopeShape::Ethernet, &raw).unwrap();
        assert_eq!(env.time_stamp(), None);
        assert_eq!(env.time_stamp_sync(), Some(9));
        assert_eq!(env.nonzero_reserved(), Some("reserved1"));
    }
}
