//! Numeric discriminants, flag bits and protocol limits of the driver
//! record family.
//!
//! Tag values are only unique within a [`Family`](crate::Family); the
//! registry always keys on the family first.

/// Primary tags of the classic 48-byte `XLevent`.
pub mod classic {
    pub const RECEIVE_MSG: u16 = 0x0001;
    pub const CHIP_STATE: u16 = 0x0004;
    pub const TRANSCEIVER: u16 = 0x0006;
    pub const TIMER: u16 = 0x0008;
    pub const TRANSMIT_MSG: u16 = 0x000A;
    pub const SYNC_PULSE: u16 = 0x000B;
    pub const APPLICATION_NOTIFICATION: u16 = 0x000F;
    pub const LIN_MSG: u16 = 0x0014;
    pub const LIN_ERRMSG: u16 = 0x0015;
    pub const LIN_SYNCERR: u16 = 0x0016;
    pub const LIN_NOANS: u16 = 0x0017;
    pub const LIN_WAKEUP: u16 = 0x0018;
    pub const LIN_SLEEP: u16 = 0x0019;
    pub const LIN_CRCINFO: u16 = 0x001A;
    pub const RECEIVE_DAIO_DATA: u16 = 0x0020;
    pub const RECEIVE_DAIO_PIGGY: u16 = 0x0022;
    pub const KLINE_MSG: u16 = 0x0024;
}

/// Secondary discriminant (`klineEvtTag`) of K-Line events.
pub mod kline {
    pub const EVT_RX_DATA: u32 = 1;
    pub const EVT_TX_DATA: u32 = 2;
    pub const EVT_TESTER_5BD: u32 = 3;
    pub const EVT_ECU_5BD: u32 = 4;
    pub const EVT_TESTER_FI_WU_PATTERN: u32 = 5;
    pub const EVT_ECU_FI_WU_PATTERN: u32 = 6;
    pub const EVT_ERROR: u32 = 7;
    pub const EVT_CONFIRMATION: u32 = 8;

    /// Sub-causes of `EVT_ERROR` (`klineErrorTag`).
    pub const ERROR_TYPE_RXTX_ERROR: u32 = 1;
    pub const ERROR_TYPE_5BD_TESTER: u32 = 2;
    pub const ERROR_TYPE_5BD_ECU: u32 = 3;
    pub const ERROR_TYPE_IBS: u32 = 4;
}

/// DAIO piggyback event ids (`daioEvtTag`).
pub mod daio {
    pub const EVT_ID_DIGITAL: u32 = 0x0001;
    pub const EVT_ID_ANALOG: u32 = 0x0002;
}

/// Tags of the CAN-FD receive (`XLcanRxEvent`) and transmit
/// (`XLcanTxEvent`) families.
pub mod canfd {
    pub const SYNC_PULSE: u16 = 0x000B;
    pub const RX_OK: u16 = 0x0400;
    pub const RX_ERROR: u16 = 0x0401;
    pub const TX_ERROR: u16 = 0x0402;
    pub const TX_REQUEST: u16 = 0x0403;
    pub const TX_OK: u16 = 0x0404;
    pub const CHIP_STATE: u16 = 0x0409;
    pub const TX_MSG: u16 = 0x0440;
}

/// Tags of `XLfrEvent`.
pub mod flexray {
    pub const START_CYCLE: u16 = 0x0080;
    pub const RX_FRAME: u16 = 0x0081;
    pub const TX_FRAME: u16 = 0x0082;
    pub const TXACK_FRAME: u16 = 0x0083;
    pub const INVALID_FRAME: u16 = 0x0084;
    pub const WAKEUP: u16 = 0x0085;
    pub const SYMBOL_WINDOW: u16 = 0x0086;
    pub const ERROR: u16 = 0x0087;
    pub const STATUS: u16 = 0x0088;
    pub const NM_VECTOR: u16 = 0x008A;
    pub const SPY_FRAME: u16 = 0x008E;
    pub const SPY_SYMBOL: u16 = 0x008F;

    /// Secondary discriminant of `ERROR` (first payload byte).
    pub const ERROR_POC_MODE: u32 = 0x01;
    pub const ERROR_SYNC_FRAMES_BELOWMIN: u32 = 0x02;
    pub const ERROR_SYNC_FRAMES_OVERLOAD: u32 = 0x03;
    pub const ERROR_CLOCK_CORR_FAILURE: u32 = 0x04;
    pub const ERROR_NIT_FAILURE: u32 = 0x05;
    pub const ERROR_CC_ERROR: u32 = 0x06;

    pub const TX_MODE_CYCLIC: u8 = 0x01;
    pub const TX_MODE_SINGLE_SHOT: u8 = 0x02;
    pub const TX_MODE_NONE: u8 = 0xFF;
}

/// Tags of `XLmostEvent` (MOST25).
pub mod most {
    pub const EVENTSOURCES: u16 = 0x0103;
    pub const ALLBYPASS: u16 = 0x0107;
    pub const TIMINGMODE: u16 = 0x0108;
    pub const FREQUENCY: u16 = 0x0109;
    pub const REGISTER_BYTES: u16 = 0x010A;
    pub const REGISTER_BITS: u16 = 0x010B;
    pub const SPECIAL_REGISTER: u16 = 0x010C;
    pub const CTRL_RX_SPY: u16 = 0x010D;
    pub const CTRL_RX_OS8104: u16 = 0x010E;
    pub const CTRL_TX: u16 = 0x010F;
    pub const ASYNC_MSG: u16 = 0x0110;
    pub const ASYNC_TX: u16 = 0x0111;
    pub const SYNC_ALLOCTABLE: u16 = 0x0112;
    pub const SYNC_VOLUME_STATUS: u16 = 0x0116;
    pub const RXLIGHT: u16 = 0x0117;
    pub const TXLIGHT: u16 = 0x0118;
    pub const LOCKSTATUS: u16 = 0x0119;
    pub const ERROR: u16 = 0x011A;
    pub const CTRL_RXBUFFER: u16 = 0x011C;
    pub const SYNC_TX_UNDERFLOW: u16 = 0x011D;
    pub const SYNC_RX_OVERFLOW: u16 = 0x011E;
    pub const CTRL_SYNC_AUDIO: u16 = 0x011F;
    pub const SYNC_MUTE_STATUS: u16 = 0x0120;
    pub const GENLIGHTERROR: u16 = 0x0121;
    pub const GENLOCKERROR: u16 = 0x0122;
    pub const TXLIGHT_POWER: u16 = 0x0123;
    pub const CTRL_BUSLOAD: u16 = 0x0126;
    pub const ASYNC_BUSLOAD: u16 = 0x0127;
    pub const CTRL_SYNC_AUDIO_EX: u16 = 0x012A;
    pub const TIMINGMODE_SPDIF: u16 = 0x012B;
    pub const STREAM_STATE: u16 = 0x012C;
    pub const STREAM_BUFFER: u16 = 0x012D;
}

/// Tags of `XLmost150event`.
pub mod most150 {
    pub const EVENT_SOURCE: u16 = 0x0203;
    pub const DEVICE_MODE: u16 = 0x0204;
    pub const SYNC_ALLOC_INFO: u16 = 0x0205;
    pub const FREQUENCY: u16 = 0x0206;
    pub const SPECIAL_NODE_INFO: u16 = 0x0207;
    pub const CTRL_RX: u16 = 0x0208;
    pub const CTRL_TX_ACK: u16 = 0x0209;
    pub const ASYNC_SPY: u16 = 0x020A;
    pub const ASYNC_RX: u16 = 0x020B;
    pub const SYNC_VOLUME_STATUS: u16 = 0x020D;
    pub const TX_LIGHT: u16 = 0x020E;
    pub const RXLIGHT_LOCKSTATUS: u16 = 0x020F;
    pub const ERROR: u16 = 0x0210;
    pub const CONFIGURE_RX_BUFFER: u16 = 0x0211;
    pub const CTRL_SYNC_AUDIO: u16 = 0x0212;
    pub const SYNC_MUTE_STATUS: u16 = 0x0213;
    pub const LIGHT_POWER: u16 = 0x0214;
    pub const GEN_LIGHT_ERROR: u16 = 0x0215;
    pub const GEN_LOCK_ERROR: u16 = 0x0216;
    pub const CTRL_BUSLOAD: u16 = 0x0217;
    pub const ASYNC_BUSLOAD: u16 = 0x0218;
    pub const ETHERNET_RX: u16 = 0x0219;
    pub const SYSTEMLOCK_FLAG: u16 = 0x021A;
    pub const SHUTDOWN_FLAG: u16 = 0x021B;
    pub const NW_STARTUP: u16 = 0x021C;
    pub const NW_SHUTDOWN: u16 = 0x021D;
    pub const STREAM_STATE: u16 = 0x021E;
    pub const STREAM_TX_BUFFER: u16 = 0x021F;
    pub const STREAM_RX_BUFFER: u16 = 0x0220;
    pub const STREAM_TX_LABEL: u16 = 0x0221;
    pub const STREAM_TX_UNDERFLOW: u16 = 0x0222;
    pub const GEN_BYPASS_STRESS: u16 = 0x0223;
    pub const ECL_CHANGE: u16 = 0x0224;
    pub const ECL_TERMINATION_CHANGE: u16 = 0x0225;
}

/// Tags of `T_XL_ETH_EVENT`.
pub mod eth {
    pub const FRAMERX: u16 = 0x0500;
    pub const FRAMERX_ERROR: u16 = 0x0501;
    pub const FRAMETX_ERROR: u16 = 0x0506;
    pub const FRAMETX_ERROR_SWITCH: u16 = 0x0507;
    pub const FRAMETX_ACK: u16 = 0x0510;
    pub const FRAMETX_ACK_SWITCH: u16 = 0x0511;
    pub const FRAMETX_ACK_OTHER_APP: u16 = 0x0513;
    pub const CHANNEL_STATUS: u16 = 0x0520;
    pub const CONFIGRESULT: u16 = 0x0530;
    pub const LOSTEVENT: u16 = 0x05FE;
}

/// Tags of `XLa429RxEvent`.
pub mod a429 {
    pub const TX_OK: u16 = 0x0601;
    pub const TX_ERR: u16 = 0x0602;
    pub const RX_OK: u16 = 0x0608;
    pub const RX_ERR: u16 = 0x0609;
    pub const BUS_STATISTIC: u16 = 0x060F;

    pub const MSG_FLAG_ON_CHANGE: u32 = 0x0000_0001;
    pub const MSG_FLAG_CYCLIC: u32 = 0x0000_0002;
    pub const MSG_FLAG_DELETE_CYCLIC: u32 = 0x0000_0004;

    pub const MSG_PARITY_DEFAULT: u8 = 0;
    pub const MSG_PARITY_DISABLED: u8 = 1;
    pub const MSG_PARITY_ODD: u8 = 2;
    pub const MSG_PARITY_EVEN: u8 = 3;
}

/// `busType` values of the bus parameter union.
pub mod bus_type {
    pub const NONE: u32 = 0x0000_0000;
    pub const CAN: u32 = 0x0000_0001;
    pub const LIN: u32 = 0x0000_0002;
    pub const FLEXRAY: u32 = 0x0000_0004;
    pub const MOST: u32 = 0x0000_0010;
    pub const DAIO: u32 = 0x0000_0040;
    pub const KLINE: u32 = 0x0000_0800;
    pub const ETHERNET: u32 = 0x0000_1000;
    pub const A429: u32 = 0x0000_2000;

    /// `canOpMode` bits shared by the CAN and CAN-FD parameter arms.
    pub const CANOPMODE_CAN20: u8 = 0x01;
    pub const CANOPMODE_CANFD: u8 = 0x02;
    pub const CANOPMODE_CANFD_NO_ISO: u8 = 0x08;
}

/// CAN flag bits.
pub mod can_flags {
    /// Classic `XLevent` message flags.
    pub const MSG_FLAG_ERROR_FRAME: u16 = 0x0001;
    pub const MSG_FLAG_OVERRUN: u16 = 0x0002;
    pub const MSG_FLAG_REMOTE_FRAME: u16 = 0x0010;
    pub const MSG_FLAG_TX_COMPLETED: u16 = 0x0040;

    /// Set in the id for 29-bit identifiers.
    pub const EXT_MSG_ID: u32 = 0x8000_0000;

    /// CAN-FD transmit flags (`XLcanTxEvent`).
    pub const TXMSG_FLAG_EDL: u32 = 0x0001;
    pub const TXMSG_FLAG_BRS: u32 = 0x0002;
    pub const TXMSG_FLAG_RTR: u32 = 0x0010;
    pub const TXMSG_FLAG_HIGHPRIO: u32 = 0x0080;
    pub const TXMSG_FLAG_WAKEUP: u32 = 0x0200;

    /// CAN-FD receive flags.
    pub const RXMSG_FLAG_EDL: u32 = 0x0001;
    pub const RXMSG_FLAG_BRS: u32 = 0x0002;
    pub const RXMSG_FLAG_ESI: u32 = 0x0004;
    pub const RXMSG_FLAG_RTR: u32 = 0x0010;
}

/// Protocol maxima enforced by the encoder.
pub mod limits {
    /// Classic CAN data bytes.
    pub const CAN_MAX_DLC: u16 = 8;
    /// Largest CAN-FD DLC code (64 data bytes).
    pub const CANFD_MAX_DLC: u8 = 15;
    /// CAN-FD data bytes.
    pub const CANFD_MAX_DATA_LEN: usize = 64;
    /// LIN data bytes.
    pub const LIN_MAX_DLC: u8 = 8;
    /// FlexRay payload in bytes; `payloadLength` counts 16-bit words.
    pub const FR_MAX_DATA_LENGTH: usize = 254;
    pub const FR_MAX_PAYLOAD_WORDS: u8 = 127;
    /// Ethernet frame payload.
    pub const ETH_PAYLOAD_SIZE_MAX: usize = 1500;
    /// `dataLen` covers the ether type plus payload.
    pub const ETH_MAX_DATA_LEN: u16 = 2 + ETH_PAYLOAD_SIZE_MAX as u16;
    /// MOST25 control message data bytes.
    pub const MOST_CTRL_DATA_LEN: usize = 17;
    /// MOST25 asynchronous transmit data bytes.
    pub const MOST_ASYNC_TX_DATA_LEN: usize = 1014;
    /// MOST25 `length` field counts quadlets of the async packet.
    pub const MOST_ASYNC_MAX_LENGTH: u8 = 254;
    /// ARINC429 labels are 8 bits; data words carry 23 bits plus SSM.
    pub const A429_MAX_DATA: u32 = 0x007F_FFFF;
}

/// Map a CAN-FD DLC code to its data length in bytes.
pub const fn canfd_dlc_to_len(dlc: u8) -> usize {
    match dlc {
        0..=8 => dlc as usize,
        9 => 12,
        10 => 16,
        11 => 20,
        12 => 24,
        13 => 32,
        14 => 48,
        _ => 64,
    }
}
