//! FlexRay events (`XLfrEvent`). The `ERROR` payload is a union keyed by its
//! first byte.

use crate::tags::flexray;
use crate::wire_record;

wire_record! {
    pub struct FrStartCycle {
        pub cycle_count: u8,
        pub pad: [u8; 3] = reserved,
        pub v_rate_correction: i32,
        pub v_offset_correction: i32,
        pub v_clock_correction_failed: u32,
        pub v_allow_passiv_to_active: u32,
        pub reserved: [u32; 3] = reserved,
    }
}

wire_record! {
    /// Received frame; also used for transmit acknowledgements and
    /// invalid frames.
    pub struct FrRxFrame {
        pub flags: u16,
        pub header_crc: u16,
        pub slot_id: u16,
        pub cycle_count: u8,
        /// Payload length in 16-bit words.
        pub payload_length: u8,
        pub data: [u8; 254],
    }
}

wire_record! {
    pub struct FrTxFrame {
        pub flags: u16,
        pub slot_id: u16,
        pub offset: u8,
        pub repetition: u8,
        /// Payload length in 16-bit words.
        pub payload_length: u8,
        pub tx_mode: u8,
        pub increment_size: u8,
        pub increment_offset: u8,
        pub reserved0: u8 = reserved,
        pub reserved1: u8 = reserved,
        pub data: [u8; 254],
    }
}

impl FrRxFrame {
    pub fn payload(&self) -> &[u8] {
        &self.data[..(usize::from(self.payload_length) * 2).min(self.data.len())]
    }
}

impl FrTxFrame {
    pub fn payload(&self) -> &[u8] {
        &self.data[..(usize::from(self.payload_length) * 2).min(self.data.len())]
    }
}

wire_record! {
    pub struct FrWakeup {
        pub cycle_count: u8,
        pub wakeup_symbol: u8,
        pub reserved: [u8; 6] = reserved,
    }
}

wire_record! {
    pub struct FrSymbolWindow {
        pub symbol: u32,
        pub flags: u32,
        pub cycle_count: u8,
        pub reserved: [u8; 7] = reserved,
    }
}

wire_record! {
    pub struct FrStatus {
        pub status_type: u32,
        pub reserved: u32 = reserved,
    }
}

wire_record! {
    pub struct FrNmVector {
        pub nm_vector: [u8; 12],
        pub cycle_count: u8,
        pub reserved: [u8; 3] = reserved,
    }
}

wire_record! {
    pub struct FrSpyFrame {
        pub frame_length: u32,
        pub frame_error: u8,
        pub tss_length: u8,
        pub header_flags: u16,
        pub slot_id: u16,
        pub header_crc: u16,
        pub payload_length: u8,
        pub cycle_count: u8,
        pub reserved: u16 = reserved,
        pub frame_crc: u32,
        pub data: [u8; 254],
        pub pad: u16 = reserved,
    }
}

wire_record! {
    pub struct FrSpySymbol {
        pub low_length: u16,
        pub reserved: u16 = reserved,
    }
}

wire_record! {
    pub struct FrErrorPocMode {
        pub tag: u8,
        pub cycle_count: u8,
        pub reserved: [u8; 6] = reserved,
        pub error_mode: u8,
        pub pad: [u8; 3] = reserved,
        pub tail: [u8; 16] = reserved,
    }
}

wire_record! {
    /// Sync frame counters; shared by the below-minimum and overload arms.
    pub struct FrErrorSyncFrames {
        pub tag: u8,
        pub cycle_count: u8,
        pub reserved: [u8; 6] = reserved,
        pub even_sync_frames_a: u16,
        pub odd_sync_frames_a: u16,
        pub even_sync_frames_b: u16,
        pub odd_sync_frames_b: u16,
        pub reserved0: u32 = reserved,
        pub tail: [u8; 8] = reserved,
    }
}

wire_record! {
    pub struct FrErrorClockCorrFailure {
        pub tag: u8,
        pub cycle_count: u8,
        pub reserved: [u8; 6] = reserved,
        pub even_sync_frames_a: u16,
        pub odd_sync_frames_a: u16,
        pub even_sync_frames_b: u16,
        pub odd_sync_frames_b: u16,
        pub flags: u32,
        pub clock_corr_failed_counter: u32,
        pub reserved0: u32 = reserved,
    }
}

wire_record! {
    pub struct FrErrorNitFailure {
        pub tag: u8,
        pub cycle_count: u8,
        pub reserved: [u8; 6] = reserved,
        pub flags: u32,
        pub reserved0: u32 = reserved,
        pub tail: [u8; 12] = reserved,
    }
}

wire_record! {
    pub struct FrErrorCcError {
        pub tag: u8,
        pub cycle_count: u8,
        pub reserved: [u8; 6] = reserved,
        pub cc_error: u32,
        pub reserved0: u32 = reserved,
        pub tail: [u8; 12] = reserved,
    }
}

family_payload! {
    pub enum FlexRayPayload in FlexRay {
        StartCycle(FrStartCycle) = flexray::START_CYCLE;
        RxFrame(FrRxFrame) = flexray::RX_FRAME;
        TxFrame(FrTxFrame) = flexray::TX_FRAME => Transmit;
        TxAckFrame(FrRxFrame) = flexray::TXACK_FRAME;
        InvalidFrame(FrRxFrame) = flexray::INVALID_FRAME;
        Wakeup(FrWakeup) = flexray::WAKEUP;
        SymbolWindow(FrSymbolWindow) = flexray::SYMBOL_WINDOW;
        Status(FrStatus) = flexray::STATUS;
        NmVector(FrNmVector) = flexray::NM_VECTOR;
        SpyFrame(FrSpyFrame) = flexray::SPY_FRAME;
        SpySymbol(FrSpySymbol) = flexray::SPY_SYMBOL;
        ErrorPocMode(FrErrorPocMode) = flexray::ERROR [flexray::ERROR_POC_MODE];
        ErrorSyncFramesBelowMin(FrErrorSyncFrames) =
            flexray::ERROR [flexray::ERROR_SYNC_FRAMES_BELOWMIN];
        ErrorSyncFramesOverload(FrErrorSyncFrames) =
            flexray::ERROR [flexray::ERROR_SYNC_FRAMES_OVERLOAD];
        ErrorClockCorrFailure(FrErrorClockCorrFailure) =
            flexray::ERROR [flexray::ERROR_CLOCK_CORR_FAILURE];
        ErrorNitFailure(FrErrorNitFailure) = flexray::ERROR [flexray::ERROR_NIT_FAILURE];
        ErrorCcError(FrErrorCcError) = flexray::ERROR [flexray::ERROR_CC_ERROR];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::Record;

    #[test]
    fn record_sizes() {
        assert_eq!(FrStartCycle::LAYOUT.size, 32);
        assert_eq!(FrRxFrame::LAYOUT.size, 262);
        assert_eq!(FrTxFrame::LAYOUT.size, 266);
        assert_eq!(FrSpyFrame::LAYOUT.size, 276);
    }

    #[test]
    fn error_arms_share_one_size() {
        let sizes: Vec<usize> = FlexRayPayload::VARIANTS
            .iter()
            .filter(|spec| spec.key.tag == flexray::ERROR)
            .map(|spec| spec.layout.size)
            .collect();
        assert_eq!(sizes.len(), 6);
        assert!(sizes.iter().all(|size| *size == 28));
    }

    #[test]
    fn payload_counts_words() {
        let mut frame = FrRxFrame::zeroed();
        frame.payload_length = 3;
        assert_eq!(frame.payload().len(), 6);
        frame.payload_length = 200;
        assert_eq!(frame.payload().len(), 254);
    }
}
