//! Payloads of the 48-byte classic event: CAN, LIN, DAIO, K-Line and
//! housekeeping. Every payload fills the 32-byte tag data area.

use crate::tags::{self, classic, daio, kline};
use crate::wire_record;

use super::kline::{
    Kline5Bd, KlineConfirmation, KlineError, KlineFastInitPattern, KlineRxTxData,
};

wire_record! {
    /// Classic CAN frame, received or transmitted.
    pub struct CanMsg {
        /// Identifier; bit 31 marks a 29-bit id.
        pub id: u32,
        pub flags: u16,
        pub dlc: u16,
        pub res1: u64 = reserved,
        pub data: [u8; 8],
        pub res2: u64 = reserved,
    }
}

impl CanMsg {
    pub fn is_extended(&self) -> bool {
        self.id & tags::can_flags::EXT_MSG_ID != 0
    }
}

wire_record! {
    pub struct ChipState {
        pub bus_status: u8,
        pub tx_error_counter: u8,
        pub rx_error_counter: u8,
        pub reserved: [u8; 29] = reserved,
    }
}

wire_record! {
    pub struct Transceiver {
        pub event_reason: u8,
        pub is_present: u8,
        pub reserved: [u8; 30] = reserved,
    }
}

wire_record! {
    /// Tag data of events that carry no payload (timer, LIN sync error).
    pub struct EmptyTagData {
        pub reserved: [u8; 32] = reserved,
    }
}

wire_record! {
    pub struct SyncPulse {
        pub pulse_code: u8,
        pub reserved: [u8; 7] = reserved,
        pub time: u64,
        pub tail: [u8; 16] = reserved,
    }
}

wire_record! {
    pub struct AppNotification {
        pub notify_reason: u32,
        pub reserved: [u32; 7] = reserved,
    }
}

wire_record! {
    /// LIN frame; also the payload of LIN error messages.
    pub struct LinMsg {
        pub id: u8,
        pub dlc: u8,
        pub flags: u16,
        pub data: [u8; 8],
        pub crc: u8,
        pub reserved: [u8; 19] = reserved,
    }
}

wire_record! {
    pub struct LinNoAns {
        pub id: u8,
        pub reserved: [u8; 31] = reserved,
    }
}

wire_record! {
    pub struct LinWakeUp {
        pub flag: u8,
        pub unused: [u8; 3] = reserved,
        pub start_offs: u32,
        pub width: u32,
        pub reserved: [u8; 20] = reserved,
    }
}

wire_record! {
    pub struct LinSleep {
        pub flag: u8,
        pub reserved: [u8; 31] = reserved,
    }
}

wire_record! {
    pub struct LinCrcInfo {
        pub id: u8,
        pub flags: u8,
        pub reserved: [u8; 30] = reserved,
    }
}

wire_record! {
    /// Digital/analog I/O sample.
    pub struct DaioData {
        pub flags: u16,
        pub pad: u16 = reserved,
        pub timestamp_correction: u32,
        pub mask_digital: u8,
        pub value_digital: u8,
        pub mask_analog: u8,
        pub reserved0: u8 = reserved,
        pub value_analog: [u16; 4],
        pub pwm_frequency: u32,
        pub pwm_value: u16,
        pub pad2: u16 = reserved,
        pub reserved1: u32 = reserved,
    }
}

wire_record! {
    /// I/O piggyback sample. `data` is a union selected by `daio_evt_tag`;
    /// see [`DaioPiggyData::view`].
    pub struct DaioPiggyData {
        pub daio_evt_tag: u32,
        pub trigger_type: u32,
        pub data: [u32; 4],
        pub reserved: [u8; 8] = reserved,
    }
}

/// Typed view of the piggyback data union.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PiggyData {
    Digital { input: u32 },
    Analog { values: [u32; 4] },
    /// Unrecognised event id; the union bytes as stored.
    Raw([u32; 4]),
}

impl DaioPiggyData {
    pub fn view(&self) -> PiggyData {
        match self.daio_evt_tag {
            daio::EVT_ID_DIGITAL => PiggyData::Digital {
                input: self.data[0],
            },
            daio::EVT_ID_ANALOG => PiggyData::Analog { values: self.data },
            _ => PiggyData::Raw(self.data),
        }
    }
}

family_payload! {
    /// Payload of a classic 48-byte event.
    pub enum ClassicPayload in Classic {
        ReceiveMsg(CanMsg) = classic::RECEIVE_MSG;
        TransmitMsg(CanMsg) = classic::TRANSMIT_MSG => Transmit;
        ChipState(ChipState) = classic::CHIP_STATE;
        Transceiver(Transceiver) = classic::TRANSCEIVER;
        Timer(EmptyTagData) = classic::TIMER;
        SyncPulse(SyncPulse) = classic::SYNC_PULSE;
        AppNotification(AppNotification) = classic::APPLICATION_NOTIFICATION;
        LinMsg(LinMsg) = classic::LIN_MSG => Transmit;
        LinErrMsg(LinMsg) = classic::LIN_ERRMSG;
        LinSyncErr(EmptyTagData) = classic::LIN_SYNCERR;
        LinNoAns(LinNoAns) = classic::LIN_NOANS;
        LinWakeUp(LinWakeUp) = classic::LIN_WAKEUP;
        LinSleep(LinSleep) = classic::LIN_SLEEP;
        LinCrcInfo(LinCrcInfo) = classic::LIN_CRCINFO;
        DaioData(DaioData) = classic::RECEIVE_DAIO_DATA;
        DaioPiggy(DaioPiggyData) = classic::RECEIVE_DAIO_PIGGY;
        KlineRxData(KlineRxTxData) = classic::KLINE_MSG [kline::EVT_RX_DATA];
        KlineTxData(KlineRxTxData) = classic::KLINE_MSG [kline::EVT_TX_DATA];
        KlineTester5Bd(Kline5Bd) = classic::KLINE_MSG [kline::EVT_TESTER_5BD];
        KlineEcu5Bd(Kline5Bd) = classic::KLINE_MSG [kline::EVT_ECU_5BD];
        KlineTesterFiWuPattern(KlineFastInitPattern) =
            classic::KLINE_MSG [kline::EVT_TESTER_FI_WU_PATTERN];
        KlineEcuFiWuPattern(KlineFastInitPattern) =
            classic::KLINE_MSG [kline::EVT_ECU_FI_WU_PATTERN];
        KlineError(KlineError) = classic::KLINE_MSG [kline::EVT_ERROR];
        KlineConfirmation(KlineConfirmation) = classic::KLINE_MSG [kline::EVT_CONFIRMATION];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::Record;

    #[test]
    fn every_classic_payload_fills_the_tag_data_area() {
        for spec in ClassicPayload::VARIANTS {
            assert_eq!(spec.layout.size, 32, "{}", spec.name);
            assert_eq!(spec.layout.field_bytes(), 32, "{}", spec.name);
        }
    }

    #[test]
    fn can_msg_offsets() {
        assert_eq!(CanMsg::LAYOUT.offset_of("dlc"), Some(6));
        assert_eq!(CanMsg::LAYOUT.offset_of("data"), Some(16));
    }

    #[test]
    fn piggy_view_follows_event_id() {
        let mut piggy = DaioPiggyData::zeroed();
        piggy.data = [7, 1, 2, 3];
        piggy.daio_evt_tag = daio::EVT_ID_DIGITAL;
        assert_eq!(piggy.view(), PiggyData::Digital { input: 7 });
        piggy.daio_evt_tag = daio::EVT_ID_ANALOG;
        assert_eq!(piggy.view(), PiggyData::Analog { values: [7, 1, 2, 3] });
        piggy.daio_evt_tag = 0x99;
        assert_eq!(piggy.view(), PiggyData::Raw([7, 1, 2, 3]));
    }
}
