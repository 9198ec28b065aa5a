//! MOST150 events (`XLmost150event`).

use crate::tags::most150;
use crate::wire_record;

use super::most::{MostDeviceSetting, MostError, MostWord};

wire_record! {
    pub struct Most150SyncAllocInfo {
        pub alloc_table: [u8; 372],
    }
}

wire_record! {
    pub struct Most150SpecialNodeInfo {
        pub change_mask: u32,
        pub node_address: u16,
        pub group_address: u16,
        pub npr: u8,
        pub mpr: u8,
        pub sbc: u8,
        pub ctrl_retry_time: u8,
        pub ctrl_send_attempts: u8,
        pub async_retry_time: u8,
        pub async_send_attempts: u8,
        pub mac_addr: [u8; 6],
        pub npr_spy: u8,
        pub mpr_spy: u8,
        pub sbc_spy: u8,
        pub inic_ni_state: u8,
        pub reserved1: [u8; 3] = reserved,
        pub reserved2: [u32; 3] = reserved,
    }
}

wire_record! {
    pub struct Most150CtrlRx {
        pub target_address: u16,
        pub source_address: u16,
        pub fblock_id: u8,
        pub inst_id: u8,
        pub function_id: u16,
        pub op_type: u8,
        pub tel_id: u8,
        pub tel_len: u16,
        pub ctrl_data: [u8; 45],
        pub pad: u8 = reserved,
    }
}

wire_record! {
    pub struct Most150CtrlTxAck {
        pub target_address: u16,
        pub source_address: u16,
        pub ctrl_prio: u8,
        pub ctrl_send_attempts: u8,
        pub fblock_id: u8,
        pub inst_id: u8,
        pub function_id: u16,
        pub op_type: u8,
        pub tel_id: u8,
        pub tel_len: u16,
        pub ctrl_data: [u8; 45],
        pub pad: u8 = reserved,
        pub status: u32,
    }
}

wire_record! {
    pub struct Most150AsyncSpy {
        pub frame_length: u32,
        pub target_address: u16,
        pub source_address: u16,
        pub length: u16,
        pub status: u16,
        pub crc: u32,
        pub async_data: [u8; 1524],
    }
}

wire_record! {
    pub struct Most150AsyncRx {
        pub target_address: u16,
        pub source_address: u16,
        pub length: u16,
        pub reserved: u16 = reserved,
        pub async_data: [u8; 1524],
    }
}

wire_record! {
    pub struct Most150EthernetRx {
        pub source_address: [u8; 6],
        pub dest_address: [u8; 6],
        pub length: u32,
        pub ethernet_data: [u8; 1510],
        pub pad: u16 = reserved,
    }
}

wire_record! {
    pub struct Most150RxBufferConfig {
        pub buffer_type: u32,
        pub buffer_mode: u32,
    }
}

wire_record! {
    pub struct Most150CtrlSyncAudio {
        pub label: u32,
        pub width: u32,
        pub device: u32,
        pub mode: u32,
    }
}

wire_record! {
    /// Network startup and shutdown results.
    pub struct Most150NwResult {
        pub error: u32,
        pub error_info: u32,
    }
}

wire_record! {
    pub struct Most150StreamState {
        pub stream_handle: u32,
        pub stream_state: u32,
        pub stream_error: u32,
    }
}

wire_record! {
    pub struct Most150StreamTxBuffer {
        pub stream_handle: u32,
        pub number_of_bytes: u32,
        pub status: u32,
    }
}

wire_record! {
    pub struct Most150StreamRxBuffer {
        pub stream_handle: u32,
        pub number_of_bytes: u32,
        pub status: u32,
        pub label_info: u32,
    }
}

wire_record! {
    pub struct Most150StreamTxLabel {
        pub stream_handle: u32,
        pub error_info: u32,
        pub conn_label: u32,
        pub width: u32,
    }
}

wire_record! {
    pub struct Most150StreamTxUnderflow {
        pub stream_handle: u32,
        pub reserved: u32 = reserved,
    }
}

family_payload! {
    pub enum Most150Payload in Most150 {
        EventSource(MostWord) = most150::EVENT_SOURCE;
        DeviceMode(MostWord) = most150::DEVICE_MODE;
        SyncAllocInfo(Most150SyncAllocInfo) = most150::SYNC_ALLOC_INFO;
        Frequency(MostWord) = most150::FREQUENCY;
        SpecialNodeInfo(Most150SpecialNodeInfo) = most150::SPECIAL_NODE_INFO;
        CtrlRx(Most150CtrlRx) = most150::CTRL_RX;
        CtrlTxAck(Most150CtrlTxAck) = most150::CTRL_TX_ACK;
        AsyncSpy(Most150AsyncSpy) = most150::ASYNC_SPY;
        AsyncRx(Most150AsyncRx) = most150::ASYNC_RX;
        SyncVolumeStatus(MostDeviceSetting) = most150::SYNC_VOLUME_STATUS;
        TxLight(MostWord) = most150::TX_LIGHT;
        RxLightLockStatus(MostWord) = most150::RXLIGHT_LOCKSTATUS;
        Error(MostError) = most150::ERROR;
        ConfigureRxBuffer(Most150RxBufferConfig) = most150::CONFIGURE_RX_BUFFER;
        CtrlSyncAudio(Most150CtrlSyncAudio) = most150::CTRL_SYNC_AUDIO;
        SyncMuteStatus(MostDeviceSetting) = most150::SYNC_MUTE_STATUS;
        LightPower(MostWord) = most150::LIGHT_POWER;
        GenLightError(MostWord) = most150::GEN_LIGHT_ERROR;
        GenLockError(MostWord) = most150::GEN_LOCK_ERROR;
        CtrlBusload(MostWord) = most150::CTRL_BUSLOAD;
        AsyncBusload(MostWord) = most150::ASYNC_BUSLOAD;
        EthernetRx(Most150EthernetRx) = most150::ETHERNET_RX;
        SystemLockFlag(MostWord) = most150::SYSTEMLOCK_FLAG;
        ShutdownFlag(MostWord) = most150::SHUTDOWN_FLAG;
        NwStartup(Most150NwResult) = most150::NW_STARTUP;
        NwShutdown(Most150NwResult) = most150::NW_SHUTDOWN;
        StreamState(Most150StreamState) = most150::STREAM_STATE;
        StreamTxBuffer(Most150StreamTxBuffer) = most150::STREAM_TX_BUFFER;
        StreamRxBuffer(Most150StreamRxBuffer) = most150::STREAM_RX_BUFFER;
        StreamTxLabel(Most150StreamTxLabel) = most150::STREAM_TX_LABEL;
        StreamTxUnderflow(Most150StreamTxUnderflow) = most150::STREAM_TX_UNDERFLOW;
        GenBypassStress(MostWord) = most150::GEN_BYPASS_STRESS;
        EclChange(MostWord) = most150::ECL_CHANGE;
        EclTerminationChange(MostWord) = most150::ECL_TERMINATION_CHANGE;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::family::MOST150_MAX_EVENT_SIZE;
    use crate::wire::Record;

    #[test]
    fn record_sizes() {
        assert_eq!(Most150SpecialNodeInfo::LAYOUT.size, 40);
        assert_eq!(Most150CtrlRx::LAYOUT.size, 58);
        assert_eq!(Most150CtrlTxAck::LAYOUT.size, 64);
        assert_eq!(Most150AsyncSpy::LAYOUT.size, 1540);
        assert_eq!(Most150AsyncRx::LAYOUT.size, 1532);
        assert_eq!(Most150EthernetRx::LAYOUT.size, 1528);
        assert_eq!(Most150SyncAllocInfo::LAYOUT.size, 372);
    }

    #[test]
    fn every_variant_fits_the_family_maximum() {
        for spec in Most150Payload::VARIANTS {
            assert!(32 + spec.layout.size <= MOST150_MAX_EVENT_SIZE, "{}", spec.name);
        }
    }
}
