//! Ethernet events (`T_XL_ETH_EVENT`) and the transmit frame record.

use crate::tags::eth;
use crate::wire_record;

wire_record! {
    /// Ether type followed by the frame payload, as carried on the wire.
    pub struct EthFrameData {
        pub ether_type: [u8; 2],
        pub payload: [u8; 1500],
    }
}

impl EthFrameData {
    /// The first `data_len` bytes: ether type plus payload.
    pub fn bytes(&self, data_len: u16) -> Vec<u8> {
        let len = usize::from(data_len).min(2 + self.payload.len());
        let mut out = Vec::with_capacity(len);
        out.extend_from_slice(&self.ether_type);
        out.extend_from_slice(&self.payload);
        out.truncate(len);
        out
    }
}

wire_record! {
    pub struct EthFrameRx {
        pub frame_identifier: u32,
        pub frame_duration: u32,
        pub data_len: u16,
        pub reserved: u16 = reserved,
        pub reserved2: [u32; 3] = reserved,
        pub fcs: u32,
        pub dest_mac: [u8; 6],
        pub source_mac: [u8; 6],
        pub frame_data: EthFrameData,
        pub pad: u16 = reserved,
    }
}

wire_record! {
    pub struct EthFrameRxError {
        pub frame_identifier: u32,
        pub frame_duration: u32,
        pub error_flags: u32,
        pub data_len: u16,
        pub reserved: u16 = reserved,
        pub reserved2: [u32; 3] = reserved,
        pub fcs: u32,
        pub dest_mac: [u8; 6],
        pub source_mac: [u8; 6],
        pub frame_data: EthFrameData,
        pub pad: u16 = reserved,
    }
}

wire_record! {
    /// Transmitted frame as reported back by the driver.
    pub struct EthFrameTxEvent {
        pub frame_identifier: u32,
        pub flags: u32,
        pub data_len: u16,
        pub reserved: u16 = reserved,
        pub frame_duration: u32,
        pub reserved2: [u32; 2] = reserved,
        pub dest_mac: [u8; 6],
        pub source_mac: [u8; 6],
        pub frame_data: EthFrameData,
        pub pad: u16 = reserved,
    }
}

wire_record! {
    pub struct EthFrameTxError {
        pub error_type: u32,
        pub tx_frame: EthFrameTxEvent,
    }
}

wire_record! {
    pub struct EthChannelStatus {
        pub link: u32,
        pub speed: u32,
        pub duplex: u32,
        pub mdi_type: u32,
        pub active_connector: u32,
        pub active_phy: u32,
        pub clock_mode: u32,
        pub br_pairs: u32,
    }
}

wire_record! {
    pub struct EthConfigResult {
        pub result: u32,
    }
}

wire_record! {
    pub struct EthLostEvent {
        pub event_type_lost: u16,
        pub reserved: u16 = reserved,
        pub reason: u32,
        pub frame_identifier: u32,
        pub fcs: u32,
        pub source_mac: [u8; 6],
        pub reserved2: [u8; 2] = reserved,
    }
}

wire_record! {
    /// Frame handed to the driver for transmission. Not framed by an
    /// envelope.
    pub struct EthFrameTx {
        pub frame_identifier: u32,
        pub flags: u32,
        pub data_len: u16,
        pub reserved: u16 = reserved,
        pub reserved2: [u32; 4] = reserved,
        pub dest_mac: [u8; 6],
        pub source_mac: [u8; 6],
        pub frame_data: EthFrameData,
        pub pad: u16 = reserved,
    }
}

family_payload! {
    pub enum EthernetPayload in Ethernet {
        FrameRx(EthFrameRx) = eth::FRAMERX;
        FrameRxError(EthFrameRxError) = eth::FRAMERX_ERROR;
        FrameTxError(EthFrameTxError) = eth::FRAMETX_ERROR;
        FrameTxErrorSwitch(EthFrameTxError) = eth::FRAMETX_ERROR_SWITCH;
        FrameTxAck(EthFrameTxEvent) = eth::FRAMETX_ACK;
        FrameTxAckSwitch(EthFrameTxEvent) = eth::FRAMETX_ACK_SWITCH;
        FrameTxAckOtherApp(EthFrameTxEvent) = eth::FRAMETX_ACK_OTHER_APP;
        ChannelStatus(EthChannelStatus) = eth::CHANNEL_STATUS;
        ConfigResult(EthConfigResult) = eth::CONFIGRESULT;
        LostEvent(EthLostEvent) = eth::LOSTEVENT;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::Record;

    #[test]
    fn record_sizes() {
        assert_eq!(EthFrameData::LAYOUT.size, 1502);
        assert_eq!(EthFrameRx::LAYOUT.size, 1544);
        assert_eq!(EthFrameRxError::LAYOUT.size, 1548);
        assert_eq!(EthFrameTxEvent::LAYOUT.size, 1540);
        assert_eq!(EthFrameTxError::LAYOUT.size, 1544);
        assert_eq!(EthLostEvent::LAYOUT.size, 24);
        assert_eq!(EthFrameTx::LAYOUT.size, 1544);
    }

    #[test]
    fn frame_bytes_stop_at_data_len() {
        let mut frame = EthFrameData::zeroed();
        frame.ether_type = [0x08, 0x00];
        frame.payload[0] = 0x45;
        assert_eq!(frame.bytes(3), vec![0x08, 0x00, 0x45]);
        assert_eq!(frame.bytes(u16::MAX).len(), 1502);
    }
}
