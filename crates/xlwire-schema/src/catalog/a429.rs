//! ARINC429 receive events and the transmit message record.

use crate::tags::a429;
use crate::wire_record;

wire_record! {
    pub struct A429TxOk {
        pub frame_length: u32,
        pub bitrate: u32,
        pub label: u8,
        pub msg_ctrl: u8,
        pub reserved: u16 = reserved,
        pub data: u32,
    }
}

wire_record! {
    pub struct A429TxErr {
        pub error_position: u32,
        pub frame_length: u32,
        pub bitrate: u32,
        pub label: u8,
        pub error_reason: u8,
        pub msg_ctrl: u8,
        pub reserved: u8 = reserved,
        pub data: u32,
    }
}

wire_record! {
    pub struct A429RxOk {
        pub frame_length: u32,
        pub bitrate: u32,
        pub label: u8,
        pub reserved: [u8; 3] = reserved,
        pub data: u32,
    }
}

wire_record! {
    pub struct A429RxErr {
        pub error_position: u32,
        pub frame_length: u32,
        pub bitrate: u32,
        pub error_reason: u32,
        pub critical_bit: u32,
        pub label: u8,
        pub reserved: [u8; 3] = reserved,
        pub data: u32,
    }
}

wire_record! {
    pub struct A429BusStatistic {
        pub bitrate: u32,
        pub rx_frames: u32,
        pub tx_frames: u32,
        pub reserved: u32 = reserved,
    }
}

wire_record! {
    /// One entry of a transmit request. Not framed by an envelope: the
    /// driver accepts an array of these.
    pub struct A429MsgTx {
        pub user_handle: u16,
        pub reserved0: u16 = reserved,
        pub flags: u32,
        pub cycle_time: u32,
        pub gap: u32,
        pub label: u8,
        pub parity: u8,
        pub reserved1: u16 = reserved,
        pub data: u32,
    }
}

family_payload! {
    pub enum A429Payload in A429 {
        TxOk(A429TxOk) = a429::TX_OK;
        TxErr(A429TxErr) = a429::TX_ERR;
        RxOk(A429RxOk) = a429::RX_OK;
        RxErr(A429RxErr) = a429::RX_ERR;
        BusStatistic(A429BusStatistic) = a429::BUS_STATISTIC;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::Record;

    #[test]
    fn record_sizes() {
        assert_eq!(A429TxOk::LAYOUT.size, 16);
        assert_eq!(A429TxErr::LAYOUT.size, 20);
        assert_eq!(A429RxOk::LAYOUT.size, 16);
        assert_eq!(A429RxErr::LAYOUT.size, 28);
        assert_eq!(A429BusStatistic::LAYOUT.size, 16);
        assert_eq!(A429MsgTx::LAYOUT.size, 24);
    }
}
