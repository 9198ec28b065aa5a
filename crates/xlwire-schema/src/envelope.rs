//! Envelope header layouts shared by every record of a family.

use crate::wire_record;

wire_record! {
    /// Header of the 48-byte `XLevent`.
    pub struct ClassicHeader {
        pub tag: u8,
        pub chan_index: u8,
        pub trans_id: u16,
        pub port_handle: u16,
        pub flags: u8,
        pub reserved: u8 = reserved,
        pub time_stamp: u64,
    }
}

wire_record! {
    /// Self-describing 32-byte header of the CAN-FD receive, FlexRay and
    /// MOST events. For MOST25 the second stamp carries the original
    /// (unsynchronized) time.
    pub struct SizedHeader {
        /// Overall record size including this header.
        pub size: u32,
        pub tag: u16,
        pub channel_index: u16,
        pub user_handle: u32,
        pub flags_chip: u16,
        pub reserved0: u16 = reserved,
        pub time_stamp: u64,
        pub time_stamp_sync: u64,
    }
}

wire_record! {
    /// Header of `T_XL_ETH_EVENT`. Only the synchronized stamp is filled.
    pub struct EthernetHeader {
        pub size: u32,
        pub tag: u16,
        pub channel_index: u16,
        pub user_handle: u32,
        pub flags_chip: u16,
        pub reserved: u16 = reserved,
        pub reserved1: u64 = reserved,
        pub time_stamp_sync: u64,
    }
}

wire_record! {
    /// Header of `XLa429RxEvent`: a one-byte channel index.
    pub struct A429Header {
        pub size: u32,
        pub tag: u16,
        pub channel_index: u8,
        pub reserved: u8 = reserved,
        pub user_handle: u32,
        pub flags_chip: u16,
        pub reserved0: u16 = reserved,
        pub time_stamp: u64,
        pub time_stamp_sync: u64,
    }
}

wire_record! {
    /// Header of `XLcanTxEvent`.
    pub struct CanTxHeader {
        pub tag: u16,
        pub trans_id: u16,
        pub channel_index: u8,
        pub reserved: [u8; 3] = reserved,
    }
}
