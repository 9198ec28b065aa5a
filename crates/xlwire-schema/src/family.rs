use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::envelope::{A429Header, CanTxHeader, ClassicHeader, EthernetHeader, SizedHeader};
use crate::wire::{Layout, Record};

/// Protocol family: selects the envelope shape, the framing mode and the
/// tag namespace of a receive buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Family {
    /// 48-byte `XLevent`: classic CAN, LIN, DAIO, K-Line and housekeeping.
    Classic,
    /// `XLcanRxEvent`.
    CanFdRx,
    /// `XLcanTxEvent`.
    CanFdTx,
    /// `XLfrEvent`.
    FlexRay,
    /// `XLmostEvent`.
    Most25,
    /// `XLmost150event`.
    Most150,
    /// `T_XL_ETH_EVENT`.
    Ethernet,
    /// `XLa429RxEvent`.
    A429,
}

/// How consecutive records are delimited inside a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    /// The envelope carries the overall record size.
    SelfDescribing { max_size: usize },
    /// Every record occupies exactly this many bytes.
    FixedStride(usize),
}

/// Envelope header layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnvelopeShape {
    Classic,
    Sized,
    Ethernet,
    A429,
    CanTx,
}

impl EnvelopeShape {
    pub fn layout(self) -> &'static Layout {
        match self {
            EnvelopeShape::Classic => &ClassicHeader::LAYOUT,
            EnvelopeShape::Sized => &SizedHeader::LAYOUT,
            EnvelopeShape::Ethernet => &EthernetHeader::LAYOUT,
            EnvelopeShape::A429 => &A429Header::LAYOUT,
            EnvelopeShape::CanTx => &CanTxHeader::LAYOUT,
        }
    }

    pub fn header_size(self) -> usize {
        self.layout().size
    }
}

/// `sizeof(XLevent)`.
pub const CLASSIC_EVENT_SIZE: usize = 48;
/// `sizeof(XLcanTxEvent)`.
pub const CANFD_TX_EVENT_SIZE: usize = 88;
/// `XL_CANFD_MAX_EVENT_SIZE`.
pub const CANFD_MAX_EVENT_SIZE: usize = 128;
/// `XL_FR_MAX_EVENT_SIZE`.
pub const FR_MAX_EVENT_SIZE: usize = 512;
/// Header plus `XL_ETH_EVENT_SIZE_MAX` tag data.
pub const ETH_MAX_EVENT_SIZE: usize = 32 + 2048;
pub const MOST_MAX_EVENT_SIZE: usize = 2048;
pub const MOST150_MAX_EVENT_SIZE: usize = 2048;
pub const A429_MAX_EVENT_SIZE: usize = 128;

impl Family {
    pub const ALL: [Family; 8] = [
        Family::Classic,
        Family::CanFdRx,
        Family::CanFdTx,
        Family::FlexRay,
        Family::Most25,
        Family::Most150,
        Family::Ethernet,
        Family::A429,
    ];

    pub const fn envelope(self) -> EnvelopeShape {
        match self {
            Family::Classic => EnvelopeShape::Classic,
            Family::CanFdTx => EnvelopeShape::CanTx,
            Family::A429 => EnvelopeShape::A429,
            Family::Ethernet => EnvelopeShape::Ethernet,
            Family::CanFdRx | Family::FlexRay | Family::Most25 | Family::Most150 => {
                EnvelopeShape::Sized
            }
        }
    }

    pub const fn framing(self) -> Framing {
        match self {
            Family::Classic => Framing::FixedStride(CLASSIC_EVENT_SIZE),
            Family::CanFdTx => Framing::FixedStride(CANFD_TX_EVENT_SIZE),
            Family::CanFdRx => Framing::SelfDescribing {
                max_size: CANFD_MAX_EVENT_SIZE,
            },
            Family::FlexRay => Framing::SelfDescribing {
                max_size: FR_MAX_EVENT_SIZE,
            },
            Family::Most25 => Framing::SelfDescribing {
                max_size: MOST_MAX_EVENT_SIZE,
            },
            Family::Most150 => Framing::SelfDescribing {
                max_size: MOST150_MAX_EVENT_SIZE,
            },
            Family::Ethernet => Framing::SelfDescribing {
                max_size: ETH_MAX_EVENT_SIZE,
            },
            Family::A429 => Framing::SelfDescribing {
                max_size: A429_MAX_EVENT_SIZE,
            },
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Family::Classic => "classic",
            Family::CanFdRx => "can-fd-rx",
            Family::CanFdTx => "can-fd-tx",
            Family::FlexRay => "flex-ray",
            Family::Most25 => "most25",
            Family::Most150 => "most150",
            Family::Ethernet => "ethernet",
            Family::A429 => "a429",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown family name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown protocol family: {0}")]
pub struct UnknownFamily(pub String);

impl FromStr for Family {
    type Err = UnknownFamily;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Family::ALL
            .into_iter()
            .find(|family| family.name() == lower)
            .ok_or_else(|| UnknownFamily(s.to_string()))
    }
}
