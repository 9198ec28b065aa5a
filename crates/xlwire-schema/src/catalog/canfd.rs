//! CAN-FD receive events (`XLcanRxEvent`) and the transmit record
//! (`XLcanTxEvent`).

use crate::tags::{self, canfd};
use crate::wire_record;

wire_record! {
    /// Received frame; also reported back for `TX_OK`.
    pub struct CanFdRxMsg {
        pub can_id: u32,
        pub msg_flags: u32,
        pub crc: u32,
        pub reserved1: [u8; 12] = reserved,
        pub total_bit_cnt: u16,
        pub dlc: u8,
        pub reserved: [u8; 5] = reserved,
        pub data: [u8; 64],
    }
}

wire_record! {
    pub struct CanFdTxRequest {
        pub can_id: u32,
        pub msg_flags: u32,
        pub dlc: u8,
        pub tx_attempt_conf: u8,
        pub reserved: u16 = reserved,
        pub data: [u8; 64],
    }
}

wire_record! {
    pub struct CanFdError {
        pub error_code: u8,
        pub reserved: [u8; 95] = reserved,
    }
}

wire_record! {
    pub struct CanFdChipState {
        pub bus_status: u8,
        pub tx_error_counter: u8,
        pub rx_error_counter: u8,
        pub reserved: u8 = reserved,
        pub reserved0: u32 = reserved,
    }
}

wire_record! {
    pub struct CanFdSyncPulse {
        pub trigger_source: u32,
        pub reserved: u32 = reserved,
        pub time: u64,
    }
}

wire_record! {
    /// Frame handed to the driver for transmission.
    pub struct CanFdTxMsg {
        pub can_id: u32,
        pub msg_flags: u32,
        pub dlc: u8,
        pub reserved: [u8; 7] = reserved,
        pub data: [u8; 64],
    }
}

impl CanFdRxMsg {
    /// Data bytes covered by the DLC code.
    pub fn payload(&self) -> &[u8] {
        &self.data[..tags::canfd_dlc_to_len(self.dlc)]
    }
}

impl CanFdTxMsg {
    pub fn payload(&self) -> &[u8] {
        &self.data[..tags::canfd_dlc_to_len(self.dlc)]
    }
}

family_payload! {
    pub enum CanFdRxPayload in CanFdRx {
        RxOk(CanFdRxMsg) = canfd::RX_OK;
        TxOk(CanFdRxMsg) = canfd::TX_OK;
        TxRequest(CanFdTxRequest) = canfd::TX_REQUEST;
        RxError(CanFdError) = canfd::RX_ERROR;
        TxError(CanFdError) = canfd::TX_ERROR;
        ChipState(CanFdChipState) = canfd::CHIP_STATE;
        SyncPulse(CanFdSyncPulse) = canfd::SYNC_PULSE;
    }
}

family_payload! {
    pub enum CanFdTxPayload in CanFdTx {
        TxMsg(CanFdTxMsg) = canfd::TX_MSG => Transmit;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::family::{Family, CANFD_MAX_EVENT_SIZE, CANFD_TX_EVENT_SIZE};
    use crate::wire::Record;

    #[test]
    fn record_sizes_fit_the_family() {
        assert_eq!(CanFdRxMsg::LAYOUT.size, 96);
        assert_eq!(CanFdTxRequest::LAYOUT.size, 76);
        for spec in CanFdRxPayload::VARIANTS {
            let header = Family::CanFdRx.envelope().header_size();
            assert!(header + spec.layout.size <= CANFD_MAX_EVENT_SIZE);
        }
        let header = Family::CanFdTx.envelope().header_size();
        assert_eq!(header + CanFdTxMsg::LAYOUT.size, CANFD_TX_EVENT_SIZE);
    }

    #[test]
    fn payload_follows_dlc_table() {
        let mut msg = CanFdRxMsg::zeroed();
        msg.dlc = 9;
        assert_eq!(msg.payload().len(), 12);
        msg.dlc = 15;
        assert_eq!(msg.payload().len(), 64);
    }
}
