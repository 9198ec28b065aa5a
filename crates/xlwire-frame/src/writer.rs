use bytes::{BufMut, Bytes, BytesMut};
use xlwire_schema::catalog::a429::A429MsgTx;
use xlwire_schema::catalog::ethernet::EthFrameTx;
use xlwire_schema::{Direction, Family, Wire};

use crate::constraints;
use crate::error::{FrameError, Result};
use crate::event::Event;

const INITIAL_BUFFER_CAPACITY: usize = 4 * 1024;

/// Encode one event: envelope header followed by its payload.
///
/// All checks run first; on error `dst` is left untouched. Checksums and
/// CRCs are not computed, fields are written as given.
pub fn encode_event(event: &Event, dst: &mut BytesMut) -> Result<()> {
    constraints::check_event(event)?;

    let mut scratch = BytesMut::with_capacity(event.payload.layout().size);
    event.payload.encode(&mut scratch)?;
    constraints::check_selector(&event.payload, &scratch)?;

    dst.reserve(event.wire_size());
    event.envelope.encode(dst)?;
    dst.put_slice(&scratch);
    Ok(())
}

/// Encode an ARINC429 transmit entry. These records have no envelope.
pub fn encode_a429_msg(msg: &A429MsgTx, dst: &mut BytesMut) -> Result<()> {
    constraints::check_a429_msg(msg)?;
    Wire::put(msg, dst);
    Ok(())
}

/// Encode an Ethernet transmit frame. These records have no envelope.
pub fn encode_eth_frame(frame: &EthFrameTx, dst: &mut BytesMut) -> Result<()> {
    constraints::check_eth_frame(frame)?;
    Wire::put(frame, dst);
    Ok(())
}

/// An encoded transmit batch: bytes plus the record count the driver
/// expects alongside them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransmitBatch {
    /// `None` when nothing was pushed.
    pub family: Option<Family>,
    pub count: usize,
    pub bytes: Bytes,
}

/// Builds a transmit batch of caller-transmitted events of one family.
#[derive(Debug, Default)]
pub struct EventWriter {
    family: Option<Family>,
    count: usize,
    buf: BytesMut,
}

impl EventWriter {
    pub fn new() -> Self {
        Self {
            family: None,
            count: 0,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
        }
    }

    /// Append an event. Receive-only variants and events of a different
    /// family than the first one are rejected.
    pub fn push(&mut self, event: &Event) -> Result<()> {
        if event.payload.direction() != Direction::Transmit {
            return Err(FrameError::constraint(
                event.name(),
                "receive-only variant cannot be transmitted",
            ));
        }
        match self.family {
            Some(family) if family != event.family() => {
                return Err(FrameError::constraint(
                    event.name(),
                    format!("batch already holds {family} events"),
                ));
            }
            _ => {}
        }

        encode_event(event, &mut self.buf)?;
        self.family = Some(event.family());
        self.count += 1;
        Ok(())
    }

    /// Number of events pushed.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Number of bytes encoded.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn clear(&mut self) {
        self.family = None;
        self.count = 0;
        self.buf.clear();
    }

    pub fn finish(self) -> TransmitBatch {
        TransmitBatch {
            family: self.family,
            count: self.count,
            bytes: self.buf.freeze(),
        }
    }
}

#[cfg(test)]
mod tests {
    use xlwire_schema::catalog::canfd::{CanFdTxMsg, CanFdTxPayload};
    use xlwire_schema::catalog::classic::{CanMsg, ClassicPayload};
    use xlwire_schema::catalog::ethernet::{EthChannelStatus, EthernetPayload};
    use xlwire_schema::catalog::kline::{KlineError, KlineErrorCause, KlineRxTxData};
    use xlwire_schema::tags::{can_flags, kline};
    use xlwire_schema::Record;

    use super::*;
    use crate::codec::decode_one;
    use crate::error::ErrorKind;

    fn can_tx(dlc: u16) -> Event {
        Event::new(ClassicPayload::TransmitMsg(CanMsg {
            id: 0x321,
            dlc,
            data: [9; 8],
            ..CanMsg::zeroed()
        }))
        .with_channel(1)
    }

    #[test]
    fn encode_then_decode_classic() {
        let mut buf = BytesMut::new();
        encode_event(&can_tx(4), &mut buf).unwrap();
        assert_eq!(buf.len(), 48);

        let (event, consumed) = decode_one(Family::Classic, &buf, 0).unwrap();
        assert_eq!(consumed, 48);
        assert_eq!(event, can_tx(4));
    }

    #[test]
    fn rejected_event_leaves_buffer_untouched() {
        let mut buf = BytesMut::from(&b"prefix"[..]);
        let err = encode_event(&can_tx(12), &mut buf).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Constraint);
        assert_eq!(buf.as_ref(), b"prefix");
    }

    #[test]
    fn tampered_envelope_is_rejected() {
        let mut event = can_tx(1);
        event.envelope = crate::Envelope::blank(Family::Classic.envelope(), 0x05, 0);
        assert!(matches!(
            encode_event(&event, &mut BytesMut::new()),
            Err(FrameError::Constraint { .. })
        ));

        let mut event = Event::new(CanFdTxPayload::TxMsg(CanFdTxMsg::zeroed()));
        event.envelope = crate::Envelope::blank(Family::CanFdRx.envelope(), 0x0440, 88);
        assert!(encode_event(&event, &mut BytesMut::new()).is_err());
    }

    #[test]
    fn ethernet_reserved_stamp_must_be_zero() {
        let status = EthChannelStatus {
            link: 1,
            ..EthChannelStatus::zeroed()
        };
        let event = Event::new(EthernetPayload::ChannelStatus(status)).with_time_stamp(42);
        assert_eq!(event.time_stamp(), None);
        let mut buf = BytesMut::new();
        encode_event(&event, &mut buf).unwrap();
        let (decoded, _) = decode_one(Family::Ethernet, &buf, 0).unwrap();
        assert_eq!(decoded.envelope.time_stamp_sync(), Some(42));

        let mut tampered = event.clone();
        if let crate::Envelope::Ethernet(header) = &mut tampered.envelope {
            header.reserved1 = 0xDEAD_BEEF;
        }
        let err = encode_event(&tampered, &mut BytesMut::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Constraint);
        assert!(err.to_string().contains("reserved1"));
    }

    #[test]
    fn union_selector_must_match_variant() {
        let data = KlineRxTxData {
            evt_tag: kline::EVT_TX_DATA,
            ..KlineRxTxData::zeroed()
        };
        let event = Event::new(ClassicPayload::KlineRxData(data));
        let err = encode_event(&event, &mut BytesMut::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Constraint);

        let error = KlineError::new(KlineErrorCause::Tester5Bd {
            tester_5bd_err: 2,
            reserved: [0; 3],
        });
        let event = Event::new(ClassicPayload::KlineError(error));
        assert!(encode_event(&event, &mut BytesMut::new()).is_ok());

        let shadowing = KlineError::new(KlineErrorCause::Other {
            error_tag: kline::ERROR_TYPE_5BD_TESTER,
            raw: [2, 0, 0, 0],
        });
        let event = Event::new(ClassicPayload::KlineError(shadowing));
        let err = encode_event(&event, &mut BytesMut::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Constraint);
    }

    #[test]
    fn writer_builds_a_single_family_batch() {
        let mut writer = EventWriter::new();
        writer.push(&can_tx(8)).unwrap();
        writer.push(&can_tx(2)).unwrap();
        assert_eq!(writer.count(), 2);
        assert_eq!(writer.len(), 96);

        let fd = Event::new(CanFdTxPayload::TxMsg(CanFdTxMsg {
            dlc: 9,
            msg_flags: can_flags::TXMSG_FLAG_EDL,
            ..CanFdTxMsg::zeroed()
        }));
        assert!(writer.push(&fd).is_err());

        let rx = Event::new(ClassicPayload::ReceiveMsg(CanMsg::zeroed()));
        assert!(writer.push(&rx).is_err());
        assert_eq!(writer.count(), 2);

        let batch = writer.finish();
        assert_eq!(batch.family, Some(Family::Classic));
        assert_eq!(batch.count, 2);
        assert_eq!(batch.bytes.len(), 96);
    }

    #[test]
    fn clear_resets_family() {
        let mut writer = EventWriter::new();
        writer.push(&can_tx(8)).unwrap();
        writer.clear();
        assert!(writer.is_empty());

        let fd = Event::new(CanFdTxPayload::TxMsg(CanFdTxMsg::zeroed()));
        writer.push(&fd).unwrap();
        assert_eq!(writer.as_bytes().len(), 88);
    }

    #[test]
    fn standalone_transmit_records() {
        let mut buf = BytesMut::new();
        let msg = A429MsgTx {
            label: 0o310,
            data: 0x1234,
            ..A429MsgTx::zeroed()
        };
        encode_a429_msg(&msg, &mut buf).unwrap();
        assert_eq!(buf.len(), 24);

        let frame = EthFrameTx {
            data_len: 60,
            ..EthFrameTx::zeroed()
        };
        encode_eth_frame(&frame, &mut buf).unwrap();
        assert_eq!(buf.len(), 24 + 1544);
    }
}
