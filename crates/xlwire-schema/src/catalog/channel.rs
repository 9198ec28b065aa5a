//! Channel configuration record and the bus parameter union it embeds.
//!
//! These are plain records: they are not framed by an envelope and carry no
//! tag. The driver fills them once per channel activation.

use bytes::{Buf, BufMut, BytesMut};

use crate::tags::bus_type;
use crate::wire::{Field, FieldKind, FieldSpec, FieldValue, Layout, Record, Wire};
use crate::wire_record;

/// Size of the bus parameter union.
pub const BUS_PARAMS_DATA_LEN: usize = 28;

/// Offset of `canOpMode` inside the union; shared by the CAN and CAN-FD arms.
const CAN_OP_MODE_OFFSET: usize = 16;

wire_record! {
    pub struct CanParams {
        pub bit_rate: u32,
        pub sjw: u8,
        pub tseg1: u8,
        pub tseg2: u8,
        pub sam: u8,
        pub output_mode: u8,
        pub reserved1: [u8; 7] = reserved,
        pub can_op_mode: u8,
        pub tail: [u8; 11] = reserved,
    }
}

wire_record! {
    pub struct CanFdParams {
        pub arbitration_bit_rate: u32,
        pub sjw_abr: u8,
        pub tseg1_abr: u8,
        pub tseg2_abr: u8,
        pub sam_abr: u8,
        pub output_mode: u8,
        pub sjw_dbr: u8,
        pub tseg1_dbr: u8,
        pub tseg2_dbr: u8,
        pub data_bit_rate: u32,
        pub can_op_mode: u8,
        pub tail: [u8; 11] = reserved,
    }
}

wire_record! {
    pub struct FlexRayParams {
        pub status: u32,
        pub cfg_mode: u32,
        pub baudrate: u32,
        pub tail: [u8; 16] = reserved,
    }
}

wire_record! {
    pub struct MostParams {
        pub active_speed_grade: u32,
        pub compatible_speed_grade: u32,
        pub inic_fw_version: u32,
        pub tail: [u8; 16] = reserved,
    }
}

wire_record! {
    pub struct EthernetParams {
        pub mac_addr: [u8; 6],
        pub connector: u8,
        pub phy: u8,
        pub link: u8,
        pub speed: u8,
        pub clock_mode: u8,
        pub bypass: u8,
        pub tail: [u8; 16] = reserved,
    }
}

wire_record! {
    /// ARINC429 parameters. `config` holds the direction-specific words:
    /// bitrate, parity and gap for transmit channels; bitrate limits,
    /// parity, gap and auto-baudrate for receive channels.
    pub struct A429Params {
        pub channel_direction: u16,
        pub res1: u16 = reserved,
        pub config: [u32; 6],
    }
}

/// `XLbusParams`: the bus type plus the union arm it selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusParams {
    Can(CanParams),
    CanFd(CanFdParams),
    FlexRay(FlexRayParams),
    Most(MostParams),
    Ethernet(EthernetParams),
    A429(A429Params),
    /// Bus types without a typed arm (none, LIN, DAIO, K-Line, unknown).
    Raw {
        bus_type: u32,
        data: [u8; BUS_PARAMS_DATA_LEN],
    },
}

impl BusParams {
    pub fn bus_type(&self) -> u32 {
        match self {
            BusParams::Can(_) | BusParams::CanFd(_) => bus_type::CAN,
            BusParams::FlexRay(_) => bus_type::FLEXRAY,
            BusParams::Most(_) => bus_type::MOST,
            BusParams::Ethernet(_) => bus_type::ETHERNET,
            BusParams::A429(_) => bus_type::A429,
            BusParams::Raw { bus_type, .. } => *bus_type,
        }
    }

    fn from_union(bus: u32, data: [u8; BUS_PARAMS_DATA_LEN]) -> Self {
        let arm = data.as_slice();
        match bus {
            bus_type::CAN => {
                let fd_bits = bus_type::CANOPMODE_CANFD | bus_type::CANOPMODE_CANFD_NO_ISO;
                if data[CAN_OP_MODE_OFFSET] & fd_bits != 0 {
                    BusParams::CanFd(super::get_arm(arm))
                } else {
                    BusParams::Can(super::get_arm(arm))
                }
            }
            bus_type::FLEXRAY => BusParams::FlexRay(super::get_arm(arm)),
            bus_type::MOST => BusParams::Most(super::get_arm(arm)),
            bus_type::ETHERNET => BusParams::Ethernet(super::get_arm(arm)),
            bus_type::A429 => BusParams::A429(super::get_arm(arm)),
            bus_type => BusParams::Raw { bus_type, data },
        }
    }

    fn arm_value(&self) -> FieldValue {
        match self {
            BusParams::Can(p) => p.value(),
            BusParams::CanFd(p) => p.value(),
            BusParams::FlexRay(p) => p.value(),
            BusParams::Most(p) => p.value(),
            BusParams::Ethernet(p) => p.value(),
            BusParams::A429(p) => p.value(),
            BusParams::Raw { data, .. } => data.value(),
        }
    }
}

impl Wire for BusParams {
    const SIZE: usize = Self::LAYOUT.size;
    const KIND: FieldKind = FieldKind::Nested(&Self::LAYOUT);

    fn get(src: &mut &[u8]) -> Self {
        let bus = src.get_u32_le();
        let data = <[u8; BUS_PARAMS_DATA_LEN]>::get(src);
        Self::from_union(bus, data)
    }

    fn put(&self, dst: &mut BytesMut) {
        dst.put_u32_le(self.bus_type());
        match self {
            BusParams::Can(p) => p.put(dst),
            BusParams::CanFd(p) => p.put(dst),
            BusParams::FlexRay(p) => p.put(dst),
            BusParams::Most(p) => p.put(dst),
            BusParams::Ethernet(p) => p.put(dst),
            BusParams::A429(p) => p.put(dst),
            BusParams::Raw { data, .. } => Wire::put(data, dst),
        }
    }

    fn value(&self) -> FieldValue {
        FieldValue::Record(self.fields())
    }

    fn is_zero(&self) -> bool {
        self.bus_type() == 0 && self.arm_value().is_zero()
    }

    fn nonzero_reserved(&self) -> Option<&'static str> {
        match self {
            BusParams::Can(p) => p.nonzero_reserved(),
            BusParams::CanFd(p) => p.nonzero_reserved(),
            BusParams::FlexRay(p) => p.nonzero_reserved(),
            BusParams::Most(p) => p.nonzero_reserved(),
            BusParams::Ethernet(p) => p.nonzero_reserved(),
            BusParams::A429(p) => p.nonzero_reserved(),
            BusParams::Raw { .. } => None,
        }
    }
}

impl Record for BusParams {
    const LAYOUT: Layout = Layout {
        name: "BusParams",
        size: 4 + BUS_PARAMS_DATA_LEN,
        fields: &[
            FieldSpec {
                name: "bus_type",
                kind: u32::KIND,
                reserved: false,
            },
            FieldSpec {
                name: "data",
                kind: <[u8; BUS_PARAMS_DATA_LEN]>::KIND,
                reserved: false,
            },
        ],
    };

    fn fields(&self) -> Vec<Field> {
        vec![
            Field {
                name: "bus_type",
                value: self.bus_type().value(),
                reserved: false,
            },
            Field {
                name: "data",
                value: self.arm_value(),
                reserved: false,
            },
        ]
    }
}

wire_record! {
    /// `XLchannelConfig`, byte-packed.
    pub struct ChannelConfig {
        pub name: [u8; 32],
        pub hw_type: u8,
        pub hw_index: u8,
        pub hw_channel: u8,
        pub transceiver_type: u16,
        pub transceiver_state: u16,
        pub config_error: u16,
        pub channel_index: u8,
        pub channel_mask: u64,
        pub channel_capabilities: u32,
        pub channel_bus_capabilities: u32,
        pub is_on_bus: u8,
        pub connected_bus_type: u32,
        pub bus_params: BusParams,
        pub do_not_use: u32,
        pub driver_version: u32,
        pub interface_version: u32,
        pub raw_data: [u32; 10],
        pub serial_number: u32,
        pub article_number: u32,
        pub transceiver_name: [u8; 32],
        pub special_cab_flags: u32,
        pub dominant_timeout: u32,
        pub dominant_recessive_delay: u8,
        pub recessive_dominant_delay: u8,
        pub connection_info: u8,
        pub currently_available_timestamps: u8,
        pub minimal_supply_voltage: u16,
        pub maximal_supply_voltage: u16,
        pub maximal_baudrate: u32,
        pub fpga_core_capabilities: u8,
        pub special_device_status: u8,
        pub channel_bus_active_capabilities: u16,
        pub break_offset: u16,
        pub delimiter_offset: u16,
        pub reserved: [u32; 3] = reserved,
    }
}

impl ChannelConfig {
    /// Channel name up to the first NUL.
    pub fn name(&self) -> String {
        c_string(&self.name)
    }

    pub fn transceiver_name(&self) -> String {
        c_string(&self.transceiver_name)
    }
}

fn c_string(raw: &[u8]) -> String {
    let end = raw.iter().position(|b| *b == 0).unwrap_or(raw.len());
    String::from_utf8_lossy(&raw[..end]).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn can_params_bytes(op_mode: u8) -> Vec<u8> {
        let mut raw = vec![0u8; BusParams::LAYOUT.size];
        raw[..4].copy_from_slice(&bus_type::CAN.to_le_bytes());
        raw[4..8].copy_from_slice(&500_000u32.to_le_bytes());
        raw[4 + CAN_OP_MODE_OFFSET] = op_mode;
        raw
    }

    #[test]
    fn union_arms_fill_the_union() {
        for layout in [
            &CanParams::LAYOUT,
            &CanFdParams::LAYOUT,
            &FlexRayParams::LAYOUT,
            &MostParams::LAYOUT,
            &EthernetParams::LAYOUT,
            &A429Params::LAYOUT,
        ] {
            assert_eq!(layout.size, BUS_PARAMS_DATA_LEN, "{}", layout.name);
        }
        assert_eq!(CanParams::LAYOUT.offset_of("can_op_mode"), Some(16));
        assert_eq!(CanFdParams::LAYOUT.offset_of("can_op_mode"), Some(16));
        assert_eq!(BusParams::LAYOUT.size, 32);
    }

    #[test]
    fn can_op_mode_selects_the_fd_arm() {
        let classic = BusParams::decode(&can_params_bytes(bus_type::CANOPMODE_CAN20)).unwrap();
        assert!(matches!(classic, BusParams::Can(p) if p.bit_rate == 500_000));

        let raw = can_params_bytes(bus_type::CANOPMODE_CANFD);
        let fd = BusParams::decode(&raw).unwrap();
        assert!(matches!(fd, BusParams::CanFd(p) if p.arbitration_bit_rate == 500_000));
        assert_eq!(fd.to_bytes().unwrap().as_ref(), raw.as_slice());
    }

    #[test]
    fn unknown_bus_keeps_raw_union() {
        let mut raw = vec![0u8; 32];
        raw[..4].copy_from_slice(&bus_type::LIN.to_le_bytes());
        raw[4] = 0xAB;
        let params = BusParams::decode(&raw).unwrap();
        assert!(matches!(params, BusParams::Raw { bus_type: bus_type::LIN, data } if data[0] == 0xAB));
        assert_eq!(params.to_bytes().unwrap().as_ref(), raw.as_slice());
    }

    #[test]
    fn channel_config_is_packed() {
        assert_eq!(ChannelConfig::LAYOUT.size, 227);
        assert_eq!(ChannelConfig::LAYOUT.field_bytes(), 227);
        assert_eq!(ChannelConfig::LAYOUT.offset_of("channel_mask"), Some(42));
        assert_eq!(ChannelConfig::LAYOUT.offset_of("bus_params"), Some(63));
        assert_eq!(ChannelConfig::LAYOUT.offset_of("transceiver_name"), Some(155));
        assert_eq!(ChannelConfig::LAYOUT.offset_of("reserved"), Some(215));
    }

    #[test]
    fn names_stop_at_nul() {
        let mut config = ChannelConfig::zeroed();
        config.name[..8].copy_from_slice(b"VN1630 1");
        assert_eq!(config.name(), "VN1630 1");
        assert_eq!(config.transceiver_name(), "");
    }
}
