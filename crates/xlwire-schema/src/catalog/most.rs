//! MOST25 events (`XLmostEvent`).

use crate::tags::most;
use crate::wire_record;

wire_record! {
    pub struct MostEventSource {
        pub mask: u32,
        pub state: u32,
    }
}

wire_record! {
    /// Single-word state reports: bypass, timing mode, frequency, light,
    /// lock status and the various on/off flags.
    pub struct MostWord {
        pub value: u32,
    }
}

wire_record! {
    pub struct MostRegister {
        pub number: u32,
        pub address: u32,
        pub value: [u8; 16],
    }
}

wire_record! {
    pub struct MostRegisterBit {
        pub address: u32,
        pub value: u32,
        pub mask: u32,
    }
}

wire_record! {
    pub struct MostSpecialRegister {
        pub change_mask: u32,
        pub lock_status: u32,
        pub register_bnah: u8,
        pub register_bga: u8,
        pub register_apa: u8,
        pub register_npr: u8,
        pub register_mpr: u8,
        pub register_ndr: u8,
        pub register_mdr: u8,
        pub register_sbc: u8,
        pub register_xtim: u8,
        pub register_xrty: u8,
        pub pad: u16 = reserved,
    }
}

wire_record! {
    pub struct MostCtrlSpy {
        pub arbitration: u32,
        pub target_address: u16,
        pub source_address: u16,
        pub ctrl_type: u8,
        pub ctrl_data: [u8; 17],
        pub crc: u16,
        pub tx_status: u16,
        pub ctrl_res: u16,
        pub spy_rx_msg_status: u32,
    }
}

wire_record! {
    /// Control message; received from the OS8104 or handed over for
    /// transmission.
    pub struct MostCtrlMsg {
        pub ctrl_prio: u8,
        pub ctrl_type: u8,
        pub target_address: u16,
        pub source_address: u16,
        pub ctrl_data: [u8; 17],
        pub direction: u8,
        pub status: u32,
    }
}

wire_record! {
    pub struct MostAsyncMsg {
        pub status: u32,
        pub crc: u32,
        pub arbitration: u8,
        /// Packet length in quadlets.
        pub length: u8,
        pub target_address: u16,
        pub source_address: u16,
        pub async_data: [u8; 1018],
    }
}

wire_record! {
    pub struct MostAsyncTx {
        pub arbitration: u8,
        pub length: u8,
        pub target_address: u16,
        pub source_address: u16,
        pub async_data: [u8; 1014],
    }
}

wire_record! {
    pub struct MostSyncAlloc {
        pub alloc_table: [u8; 64],
    }
}

wire_record! {
    /// Device and setting pair: volume and mute reports.
    pub struct MostDeviceSetting {
        pub device: u32,
        pub value: u32,
    }
}

wire_record! {
    pub struct MostError {
        pub error_code: u32,
        pub parameter: [u32; 3],
    }
}

wire_record! {
    pub struct MostStreamMask {
        pub stream_mask: u32,
        pub reserved: u32 = reserved,
    }
}

wire_record! {
    pub struct MostCtrlSyncAudio {
        pub channel_mask: [u32; 4],
        pub device: u32,
        pub mode: u32,
    }
}

wire_record! {
    pub struct MostCtrlSyncAudioEx {
        pub channel_mask: [u32; 16],
        pub device: u32,
        pub mode: u32,
    }
}

wire_record! {
    pub struct MostStreamState {
        pub stream_handle: u32,
        pub stream_state: u32,
        pub stream_error: u32,
        pub reserved: u32 = reserved,
    }
}

wire_record! {
    pub struct MostStreamBuffer {
        pub stream_handle: u32,
        pub buffer_low: u32,
        pub valid_bytes: u32,
        pub status: u32,
        pub buffer_high: u32,
    }
}

family_payload! {
    pub enum Most25Payload in Most25 {
        EventSource(MostEventSource) = most::EVENTSOURCES;
        AllBypass(MostWord) = most::ALLBYPASS;
        TimingMode(MostWord) = most::TIMINGMODE;
        Frequency(MostWord) = most::FREQUENCY;
        RegisterBytes(MostRegister) = most::REGISTER_BYTES;
        RegisterBits(MostRegisterBit) = most::REGISTER_BITS;
        SpecialRegister(MostSpecialRegister) = most::SPECIAL_REGISTER;
        CtrlRxSpy(MostCtrlSpy) = most::CTRL_RX_SPY;
        CtrlRxOs8104(MostCtrlMsg) = most::CTRL_RX_OS8104;
        CtrlTx(MostCtrlMsg) = most::CTRL_TX => Transmit;
        AsyncMsg(MostAsyncMsg) = most::ASYNC_MSG;
        AsyncTx(MostAsyncTx) = most::ASYNC_TX => Transmit;
        SyncAllocTable(MostSyncAlloc) = most::SYNC_ALLOCTABLE;
        SyncVolumeStatus(MostDeviceSetting) = most::SYNC_VOLUME_STATUS;
        RxLight(MostWord) = most::RXLIGHT;
        TxLight(MostWord) = most::TXLIGHT;
        LockStatus(MostWord) = most::LOCKSTATUS;
        Error(MostError) = most::ERROR;
        CtrlRxBuffer(MostWord) = most::CTRL_RXBUFFER;
        SyncTxUnderflow(MostStreamMask) = most::SYNC_TX_UNDERFLOW;
        SyncRxOverflow(MostStreamMask) = most::SYNC_RX_OVERFLOW;
        CtrlSyncAudio(MostCtrlSyncAudio) = most::CTRL_SYNC_AUDIO;
        SyncMuteStatus(MostDeviceSetting) = most::SYNC_MUTE_STATUS;
        GenLightError(MostWord) = most::GENLIGHTERROR;
        GenLockError(MostWord) = most::GENLOCKERROR;
        TxLightPower(MostWord) = most::TXLIGHT_POWER;
        CtrlBusload(MostWord) = most::CTRL_BUSLOAD;
        AsyncBusload(MostWord) = most::ASYNC_BUSLOAD;
        CtrlSyncAudioEx(MostCtrlSyncAudioEx) = most::CTRL_SYNC_AUDIO_EX;
        TimingModeSpdif(MostWord) = most::TIMINGMODE_SPDIF;
        StreamState(MostStreamState) = most::STREAM_STATE;
        StreamBuffer(MostStreamBuffer) = most::STREAM_BUFFER;
    }
}
