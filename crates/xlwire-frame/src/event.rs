use xlwire_schema::catalog::canfd::{CanFdRxPayload, CanFdTxPayload};
use xlwire_schema::catalog::classic::ClassicPayload;
use xlwire_schema::catalog::flexray::FlexRayPayload;
use xlwire_schema::catalog::kline::KlineError;
use xlwire_schema::{Family, FieldValue, Framing, Payload, VariantKey};

use crate::envelope::Envelope;

/// One decoded record: its envelope and exactly one payload variant.
///
/// The accessors below expose the fields of the active variant directly
/// on the event. They read through to the payload; nothing is copied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub envelope: Envelope,
    pub payload: Payload,
}

impl Event {
    /// Build an event around `payload` with a zeroed envelope of the
    /// payload's family. Tag and size are filled in.
    pub fn new(payload: impl Into<Payload>) -> Self {
        let payload = payload.into();
        let family = payload.family();
        let size = family.envelope().header_size() + payload.layout().size;
        let envelope = Envelope::blank(family.envelope(), payload.key().tag, size as u32);
        Self { envelope, payload }
    }

    pub fn with_channel(mut self, channel: u16) -> Self {
        self.envelope.set_channel_index(channel);
        self
    }

    /// Ethernet headers take this as the synchronized stamp; the CAN-FD
    /// transmit header has no stamp and ignores it.
    pub fn with_time_stamp(mut self, time_stamp: u64) -> Self {
        self.envelope.set_time_stamp(time_stamp);
        self
    }

    /// Set the correlation handle (`transId` or `userHandle`).
    pub fn with_handle(mut self, handle: u32) -> Self {
        self.envelope.set_handle(handle);
        self
    }

    pub fn family(&self) -> Family {
        self.payload.family()
    }

    pub fn key(&self) -> VariantKey {
        self.payload.key()
    }

    pub fn tag(&self) -> u16 {
        self.envelope.tag()
    }

    pub fn name(&self) -> &'static str {
        self.payload.name()
    }

    pub fn channel(&self) -> u16 {
        self.envelope.channel_index()
    }

    pub fn time_stamp(&self) -> Option<u64> {
        self.envelope.time_stamp()
    }

    /// Bytes the record occupies in a buffer.
    pub fn wire_size(&self) -> usize {
        match self.family().framing() {
            Framing::FixedStride(stride) => stride,
            Framing::SelfDescribing { .. } => {
                self.envelope.shape().header_size() + self.payload.layout().size
            }
        }
    }

    /// Frame identifier: CAN/CAN-FD id, LIN id or FlexRay slot.
    pub fn id(&self) -> Option<u32> {
        match &self.payload {
            Payload::Classic(
                ClassicPayload::ReceiveMsg(m) | ClassicPayload::TransmitMsg(m),
            ) => Some(m.id),
            Payload::Classic(ClassicPayload::LinMsg(m) | ClassicPayload::LinErrMsg(m)) => {
                Some(u32::from(m.id))
            }
            Payload::Classic(ClassicPayload::LinNoAns(m)) => Some(u32::from(m.id)),
            Payload::Classic(ClassicPayload::LinCrcInfo(m)) => Some(u32::from(m.id)),
            Payload::CanFdRx(CanFdRxPayload::RxOk(m) | CanFdRxPayload::TxOk(m)) => Some(m.can_id),
            Payload::CanFdRx(CanFdRxPayload::TxRequest(m)) => Some(m.can_id),
            Payload::CanFdTx(CanFdTxPayload::TxMsg(m)) => Some(m.can_id),
            Payload::FlexRay(
                FlexRayPayload::RxFrame(f)
                | FlexRayPayload::TxAckFrame(f)
                | FlexRayPayload::InvalidFrame(f),
            ) => Some(u32::from(f.slot_id)),
            Payload::FlexRay(FlexRayPayload::TxFrame(f)) => Some(u32::from(f.slot_id)),
            Payload::FlexRay(FlexRayPayload::SpyFrame(f)) => Some(u32::from(f.slot_id)),
            _ => None,
        }
    }

    /// Data length code of CAN, CAN-FD and LIN frames.
    pub fn dlc(&self) -> Option<u16> {
        match &self.payload {
            Payload::Classic(
                ClassicPayload::ReceiveMsg(m) | ClassicPayload::TransmitMsg(m),
            ) => Some(m.dlc),
            Payload::Classic(ClassicPayload::LinMsg(m) | ClassicPayload::LinErrMsg(m)) => {
                Some(u16::from(m.dlc))
            }
            Payload::CanFdRx(CanFdRxPayload::RxOk(m) | CanFdRxPayload::TxOk(m)) => {
                Some(u16::from(m.dlc))
            }
            Payload::CanFdRx(CanFdRxPayload::TxRequest(m)) => Some(u16::from(m.dlc)),
            Payload::CanFdTx(CanFdTxPayload::TxMsg(m)) => Some(u16::from(m.dlc)),
            _ => None,
        }
    }

    /// Frame data trimmed to its length field.
    pub fn data(&self) -> Option<&[u8]> {
        match &self.payload {
            Payload::Classic(
                ClassicPayload::ReceiveMsg(m) | ClassicPayload::TransmitMsg(m),
            ) => Some(&m.data[..usize::from(m.dlc).min(m.data.len())]),
            Payload::Classic(ClassicPayload::LinMsg(m) | ClassicPayload::LinErrMsg(m)) => {
                Some(&m.data[..usize::from(m.dlc).min(m.data.len())])
            }
            Payload::CanFdRx(CanFdRxPayload::RxOk(m) | CanFdRxPayload::TxOk(m)) => {
                Some(m.payload())
            }
            Payload::CanFdRx(CanFdRxPayload::TxRequest(m)) => Some(
                &m.data[..xlwire_schema::tags::canfd_dlc_to_len(m.dlc)],
            ),
            Payload::CanFdTx(CanFdTxPayload::TxMsg(m)) => Some(m.payload()),
            Payload::FlexRay(
                FlexRayPayload::RxFrame(f)
                | FlexRayPayload::TxAckFrame(f)
                | FlexRayPayload::InvalidFrame(f),
            ) => Some(f.payload()),
            Payload::FlexRay(FlexRayPayload::TxFrame(f)) => Some(f.payload()),
            _ => None,
        }
    }

    /// Message flags of CAN, CAN-FD, LIN and FlexRay frames.
    pub fn flags(&self) -> Option<u32> {
        match &self.payload {
            Payload::Classic(
                ClassicPayload::ReceiveMsg(m) | ClassicPayload::TransmitMsg(m),
            ) => Some(u32::from(m.flags)),
            Payload::Classic(ClassicPayload::LinMsg(m) | ClassicPayload::LinErrMsg(m)) => {
                Some(u32::from(m.flags))
            }
            Payload::CanFdRx(CanFdRxPayload::RxOk(m) | CanFdRxPayload::TxOk(m)) => {
                Some(m.msg_flags)
            }
            Payload::CanFdRx(CanFdRxPayload::TxRequest(m)) => Some(m.msg_flags),
            Payload::CanFdTx(CanFdTxPayload::TxMsg(m)) => Some(m.msg_flags),
            Payload::FlexRay(
                FlexRayPayload::RxFrame(f)
                | FlexRayPayload::TxAckFrame(f)
                | FlexRayPayload::InvalidFrame(f),
            ) => Some(u32::from(f.flags)),
            Payload::FlexRay(FlexRayPayload::TxFrame(f)) => Some(u32::from(f.flags)),
            _ => None,
        }
    }

    fn kline_error(&self) -> Option<&KlineError> {
        match &self.payload {
            Payload::Classic(ClassicPayload::KlineError(e)) => Some(e),
            _ => None,
        }
    }

    /// K-Line IBS error code, when the record is a K-Line IBS error.
    pub fn ibs_err(&self) -> Option<u32> {
        self.kline_error().and_then(KlineError::ibs_err)
    }

    /// K-Line receive/transmit error data of RX/TX and IBS errors.
    pub fn rxtx_err_data(&self) -> Option<u32> {
        self.kline_error().and_then(KlineError::rxtx_err_data)
    }

    /// Look up a payload field by name for display.
    pub fn field(&self, name: &str) -> Option<FieldValue> {
        self.payload
            .fields()
            .into_iter()
            .find(|field| field.name == name)
            .map(|field| field.value)
    }
}

#[cfg(test)]
mod tests {
    use xlwire_schema::catalog::canfd::CanFdTxMsg;
    use xlwire_schema::catalog::classic::CanMsg;
    use xlwire_schema::catalog::kline::KlineErrorCause;
    use xlwire_schema::tags::classic;
    use xlwire_schema::Record;

    use super::*;

    fn can_event(dlc: u16) -> Event {
        let msg = CanMsg {
            id: 0x123,
            dlc,
            data: [1, 2, 3, 4, 5, 6, 7, 8],
            ..CanMsg::zeroed()
        };
        Event::new(ClassicPayload::ReceiveMsg(msg)).with_channel(2)
    }

    #[test]
    fn new_fills_tag_and_size() {
        let event = can_event(8);
        assert_eq!(event.tag(), classic::RECEIVE_MSG);
        assert_eq!(event.channel(), 2);
        assert_eq!(event.wire_size(), 48);

        let tx = Event::new(CanFdTxPayload::TxMsg(CanFdTxMsg::zeroed()));
        assert_eq!(tx.envelope.size(), None);
        assert_eq!(tx.wire_size(), 88);
    }

    #[test]
    fn data_is_trimmed_to_dlc() {
        let event = can_event(3);
        assert_eq!(event.id(), Some(0x123));
        assert_eq!(event.dlc(), Some(3));
        assert_eq!(event.data(), Some(&[1u8, 2, 3][..]));
        assert_eq!(event.ibs_err(), None);
    }

    #[test]
    fn kline_accessors_read_through() {
        let cause = KlineErrorCause::Ibs {
            ibs_err: 4,
            rxtx_err_data: 9,
            reserved: [0; 2],
        };
        let event = Event::new(ClassicPayload::KlineError(KlineError::new(cause)));
        assert_eq!(event.ibs_err(), Some(4));
        assert_eq!(event.rxtx_err_data(), Some(9));
        assert_eq!(event.id(), None);
    }

    #[test]
    fn field_lookup() {
        let event = can_event(8);
        assert_eq!(event.field("id"), Some(FieldValue::Unsigned(0x123)));
        assert_eq!(event.field("nope"), None);
    }
}
