//! Encode-time invariants. Every check runs before a byte is written.

use xlwire_schema::catalog::a429::A429MsgTx;
use xlwire_schema::catalog::canfd::{CanFdRxPayload, CanFdTxMsg, CanFdTxPayload};
use xlwire_schema::catalog::classic::ClassicPayload;
use xlwire_schema::catalog::ethernet::{EthFrameTx, EthernetPayload};
use xlwire_schema::catalog::flexray::FlexRayPayload;
use xlwire_schema::catalog::most::Most25Payload;
use xlwire_schema::catalog::most150::Most150Payload;
use xlwire_schema::tags::{a429, can_flags, flexray, limits};
use xlwire_schema::{Payload, TagRegistry};

use crate::error::{FrameError, Result};
use crate::event::Event;

type Check = Result<()>;

fn at_most<T: PartialOrd + std::fmt::Display>(
    variant: &'static str,
    field: &str,
    value: T,
    max: T,
) -> Check {
    if value > max {
        return Err(FrameError::constraint(
            variant,
            format!("{field} {value} exceeds {max}"),
        ));
    }
    Ok(())
}

/// Envelope consistency, reserved fields and per-variant limits.
pub(crate) fn check_event(event: &Event) -> Check {
    let name = event.name();
    let family = event.family();
    let key = event.key();
    let envelope = &event.envelope;

    if envelope.shape() != family.envelope() {
        return Err(FrameError::constraint(
            name,
            format!("{:?} envelope cannot carry a {family} payload", envelope.shape()),
        ));
    }
    if envelope.tag() != key.tag {
        return Err(FrameError::constraint(
            name,
            format!("envelope tag {:#06x} differs from {:#06x}", envelope.tag(), key.tag),
        ));
    }
    if let Some(size) = envelope.size() {
        let expected = envelope.shape().header_size() + event.payload.layout().size;
        if size as usize != expected {
            return Err(FrameError::constraint(
                name,
                format!("declared size {size} differs from {expected}"),
            ));
        }
    }
    if let Some(field) = envelope.nonzero_reserved() {
        return Err(FrameError::constraint(
            name,
            format!("reserved header field {field} is non-zero"),
        ));
    }

    check_payload(&event.payload)
}

pub(crate) fn check_payload(payload: &Payload) -> Check {
    let name = payload.name();
    if let Some(field) = payload.nonzero_reserved() {
        return Err(FrameError::constraint(
            name,
            format!("reserved field {field} is non-zero"),
        ));
    }

    match payload {
        Payload::Classic(p) => match p {
            ClassicPayload::ReceiveMsg(m) | ClassicPayload::TransmitMsg(m) => {
                at_most(name, "dlc", m.dlc, limits::CAN_MAX_DLC)
            }
            ClassicPayload::LinMsg(m) | ClassicPayload::LinErrMsg(m) => {
                at_most(name, "dlc", m.dlc, limits::LIN_MAX_DLC)
            }
            _ => Ok(()),
        },
        Payload::CanFdRx(p) => match p {
            CanFdRxPayload::RxOk(m) | CanFdRxPayload::TxOk(m) => {
                at_most(name, "dlc", m.dlc, limits::CANFD_MAX_DLC)
            }
            CanFdRxPayload::TxRequest(m) => at_most(name, "dlc", m.dlc, limits::CANFD_MAX_DLC),
            _ => Ok(()),
        },
        Payload::CanFdTx(CanFdTxPayload::TxMsg(m)) => check_canfd_tx(name, m),
        Payload::FlexRay(p) => match p {
            FlexRayPayload::RxFrame(f)
            | FlexRayPayload::TxAckFrame(f)
            | FlexRayPayload::InvalidFrame(f) => at_most(
                name,
                "payload_length",
                f.payload_length,
                limits::FR_MAX_PAYLOAD_WORDS,
            ),
            FlexRayPayload::TxFrame(f) => {
                at_most(
                    name,
                    "payload_length",
                    f.payload_length,
                    limits::FR_MAX_PAYLOAD_WORDS,
                )?;
                match f.tx_mode {
                    flexray::TX_MODE_CYCLIC
                    | flexray::TX_MODE_SINGLE_SHOT
                    | flexray::TX_MODE_NONE => Ok(()),
                    mode => Err(FrameError::constraint(
                        name,
                        format!("unknown tx_mode {mode:#04x}"),
                    )),
                }
            }
            FlexRayPayload::SpyFrame(f) => at_most(
                name,
                "payload_length",
                f.payload_length,
                limits::FR_MAX_PAYLOAD_WORDS,
            ),
            _ => Ok(()),
        },
        Payload::Most25(p) => match p {
            Most25Payload::AsyncMsg(m) => {
                at_most(name, "length", m.length, limits::MOST_ASYNC_MAX_LENGTH)
            }
            Most25Payload::AsyncTx(m) => {
                at_most(name, "length", m.length, limits::MOST_ASYNC_MAX_LENGTH)
            }
            _ => Ok(()),
        },
        Payload::Most150(p) => match p {
            Most150Payload::CtrlRx(m) => {
                at_most(name, "tel_len", usize::from(m.tel_len), m.ctrl_data.len())
            }
            Most150Payload::CtrlTxAck(m) => {
                at_most(name, "tel_len", usize::from(m.tel_len), m.ctrl_data.len())
            }
            Most150Payload::AsyncSpy(m) => {
                at_most(name, "length", usize::from(m.length), m.async_data.len())
            }
            Most150Payload::AsyncRx(m) => {
                at_most(name, "length", usize::from(m.length), m.async_data.len())
            }
            Most150Payload::EthernetRx(m) => {
                at_most(name, "length", m.length as usize, m.ethernet_data.len())
            }
            _ => Ok(()),
        },
        Payload::Ethernet(p) => {
            let data_len = match p {
                EthernetPayload::FrameRx(f) => f.data_len,
                EthernetPayload::FrameRxError(f) => f.data_len,
                EthernetPayload::FrameTxAck(f)
                | EthernetPayload::FrameTxAckSwitch(f)
                | EthernetPayload::FrameTxAckOtherApp(f) => f.data_len,
                EthernetPayload::FrameTxError(f) | EthernetPayload::FrameTxErrorSwitch(f) => {
                    f.tx_frame.data_len
                }
                _ => return Ok(()),
            };
            at_most(name, "data_len", data_len, limits::ETH_MAX_DATA_LEN)
        }
        Payload::A429(_) => Ok(()),
    }
}

fn check_canfd_tx(name: &'static str, m: &CanFdTxMsg) -> Check {
    at_most(name, "dlc", m.dlc, limits::CANFD_MAX_DLC)?;
    let edl = m.msg_flags & can_flags::TXMSG_FLAG_EDL != 0;
    if m.msg_flags & can_flags::TXMSG_FLAG_BRS != 0 && !edl {
        return Err(FrameError::constraint(name, "BRS requires EDL"));
    }
    if edl && m.msg_flags & can_flags::TXMSG_FLAG_RTR != 0 {
        return Err(FrameError::constraint(name, "RTR is not allowed with EDL"));
    }
    if m.dlc > 8 && !edl {
        return Err(FrameError::constraint(
            name,
            format!("dlc {} requires EDL", m.dlc),
        ));
    }
    Ok(())
}

/// Compare the union discriminant in the encoded payload with the key.
pub(crate) fn check_selector(payload: &Payload, encoded: &[u8]) -> Check {
    let key = payload.key();
    let registry = TagRegistry::global()?;
    let Some(head) = registry.union_head(key.family, key.tag) else {
        return Ok(());
    };
    let found = head.selector.read(encoded);
    if found != key.secondary {
        return Err(FrameError::constraint(
            payload.name(),
            format!(
                "{} selector {:?} does not match {:?}",
                head.name, found, key.secondary
            ),
        ));
    }
    Ok(())
}

pub(crate) fn check_a429_msg(msg: &A429MsgTx) -> Check {
    const NAME: &str = "A429MsgTx";
    if let Some(field) = xlwire_schema::Wire::nonzero_reserved(msg) {
        return Err(FrameError::constraint(
            NAME,
            format!("reserved field {field} is non-zero"),
        ));
    }
    if msg.parity > a429::MSG_PARITY_EVEN {
        return Err(FrameError::constraint(
            NAME,
            format!("unknown parity mode {}", msg.parity),
        ));
    }
    if msg.flags & a429::MSG_FLAG_CYCLIC != 0 && msg.cycle_time == 0 {
        return Err(FrameError::constraint(NAME, "cyclic message needs a cycle_time"));
    }
    at_most(NAME, "data", msg.data, limits::A429_MAX_DATA)
}

pub(crate) fn check_eth_frame(frame: &EthFrameTx) -> Check {
    const NAME: &str = "EthFrameTx";
    if let Some(field) = xlwire_schema::Wire::nonzero_reserved(frame) {
        return Err(FrameError::constraint(
            NAME,
            format!("reserved field {field} is non-zero"),
        ));
    }
    at_most(NAME, "data_len", frame.data_len, limits::ETH_MAX_DATA_LEN)
}

#[cfg(test)]
mod tests {
    use xlwire_schema::catalog::classic::{CanMsg, LinMsg};
    use xlwire_schema::catalog::flexray::FrTxFrame;
    use xlwire_schema::Record;

    use super::*;
    use crate::error::ErrorKind;

    fn fd_tx(dlc: u8, msg_flags: u32) -> Payload {
        Payload::from(CanFdTxPayload::TxMsg(CanFdTxMsg {
            can_id: 0x10,
            msg_flags,
            dlc,
            ..CanFdTxMsg::zeroed()
        }))
    }

    #[test]
    fn classic_dlc_limit() {
        let msg = CanMsg {
            dlc: 9,
            ..CanMsg::zeroed()
        };
        let err = check_payload(&ClassicPayload::TransmitMsg(msg).into()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Constraint);
        assert_eq!(err.to_string(), "TransmitMsg: dlc 9 exceeds 8");

        let lin = LinMsg {
            dlc: 8,
            ..LinMsg::zeroed()
        };
        assert!(check_payload(&ClassicPayload::LinMsg(lin).into()).is_ok());
    }

    #[test]
    fn canfd_mode_rules() {
        use can_flags::{TXMSG_FLAG_BRS as BRS, TXMSG_FLAG_EDL as EDL, TXMSG_FLAG_RTR as RTR};

        assert!(check_payload(&fd_tx(15, EDL | BRS)).is_ok());
        assert!(check_payload(&fd_tx(8, RTR)).is_ok());
        assert!(check_payload(&fd_tx(4, BRS)).is_err());
        assert!(check_payload(&fd_tx(4, EDL | RTR)).is_err());
        assert!(check_payload(&fd_tx(9, 0)).is_err());
        assert!(check_payload(&fd_tx(16, EDL)).is_err());
    }

    #[test]
    fn flexray_tx_mode_must_be_known() {
        let frame = FrTxFrame {
            payload_length: 4,
            tx_mode: flexray::TX_MODE_SINGLE_SHOT,
            ..FrTxFrame::zeroed()
        };
        assert!(check_payload(&FlexRayPayload::TxFrame(frame).into()).is_ok());

        let frame = FrTxFrame { tx_mode: 7, ..frame };
        assert!(check_payload(&FlexRayPayload::TxFrame(frame).into()).is_err());

        let frame = FrTxFrame {
            payload_length: 128,
            tx_mode: flexray::TX_MODE_CYCLIC,
            ..frame
        };
        assert!(check_payload(&FlexRayPayload::TxFrame(frame).into()).is_err());
    }

    #[test]
    fn a429_parity_and_cycle_time() {
        let msg = A429MsgTx {
            label: 0o205,
            parity: a429::MSG_PARITY_ODD,
            data: 0x12345,
            ..A429MsgTx::zeroed()
        };
        assert!(check_a429_msg(&msg).is_ok());
        assert!(check_a429_msg(&A429MsgTx { parity: 4, ..msg }).is_err());
        assert!(check_a429_msg(&A429MsgTx {
            flags: a429::MSG_FLAG_CYCLIC,
            ..msg
        })
        .is_err());
        assert!(check_a429_msg(&A429MsgTx {
            flags: a429::MSG_FLAG_CYCLIC,
            cycle_time: 100,
            ..msg
        })
        .is_ok());
        assert!(check_a429_msg(&A429MsgTx {
            data: 0x0100_0000,
            ..msg
        })
        .is_err());
    }

    #[test]
    fn eth_frame_length() {
        let frame = EthFrameTx {
            data_len: 1503,
            ..EthFrameTx::zeroed()
        };
        assert!(check_eth_frame(&frame).is_err());
        assert!(check_eth_frame(&EthFrameTx {
            data_len: 64,
            ..frame
        })
        .is_ok());
    }
}
