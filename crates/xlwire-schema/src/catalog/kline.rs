//! K-Line sub-events. The classic `KLINE_MSG` payload is a union selected by
//! the leading `evt_tag` word.

use bytes::{Buf, BufMut, BytesMut};

use crate::error::{Result, SchemaError};
use crate::tags::kline;
use crate::wire::{Field, FieldKind, FieldSpec, FieldValue, Layout, Record, Wire};
use crate::wire_record;

wire_record! {
    /// Received or transmitted K-Line byte.
    pub struct KlineRxTxData {
        pub evt_tag: u32,
        pub time_diff: u32,
        pub data: u32,
        pub error: u32,
        pub reserved: [u8; 16] = reserved,
    }
}

wire_record! {
    /// Five-baud initialization byte seen from the tester or the ECU.
    pub struct Kline5Bd {
        pub evt_tag: u32,
        pub tag_5bd: u32,
        pub time_diff: u32,
        pub data: u32,
        pub reserved: [u8; 16] = reserved,
    }
}

wire_record! {
    pub struct KlineFastInitPattern {
        pub evt_tag: u32,
        pub time_diff: u32,
        pub fast_init_edge_time_diff: u32,
        pub reserved: [u8; 20] = reserved,
    }
}

wire_record! {
    pub struct KlineConfirmation {
        pub evt_tag: u32,
        pub channel: u32,
        pub conf_tag: u32,
        pub result: u32,
        pub reserved: [u8; 16] = reserved,
    }
}

/// Sub-cause of a K-Line error, selected by `klineErrorTag`.
///
/// Each arm owns the full 16-byte union region; words an arm does not name
/// are reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KlineErrorCause {
    RxTx {
        rxtx_err_data: u32,
        reserved: [u32; 3],
    },
    Tester5Bd {
        tester_5bd_err: u32,
        reserved: [u32; 3],
    },
    Ecu5Bd {
        ecu_5bd_err: u32,
        reserved: [u32; 3],
    },
    Ibs {
        ibs_err: u32,
        rxtx_err_data: u32,
        reserved: [u32; 2],
    },
    /// Error tag this catalog does not know; the raw union words.
    Other { error_tag: u32, raw: [u32; 4] },
}

impl KlineErrorCause {
    fn from_words(error_tag: u32, w: [u32; 4]) -> Self {
        match error_tag {
            kline::ERROR_TYPE_RXTX_ERROR => Self::RxTx {
                rxtx_err_data: w[0],
                reserved: [w[1], w[2], w[3]],
            },
            kline::ERROR_TYPE_5BD_TESTER => Self::Tester5Bd {
                tester_5bd_err: w[0],
                reserved: [w[1], w[2], w[3]],
            },
            kline::ERROR_TYPE_5BD_ECU => Self::Ecu5Bd {
                ecu_5bd_err: w[0],
                reserved: [w[1], w[2], w[3]],
            },
            kline::ERROR_TYPE_IBS => Self::Ibs {
                ibs_err: w[0],
                rxtx_err_data: w[1],
                reserved: [w[2], w[3]],
            },
            error_tag => Self::Other { error_tag, raw: w },
        }
    }

    /// False for a raw arm whose tag selects one of the typed arms. Such a
    /// value would decode back as the typed arm.
    pub fn is_canonical(&self) -> bool {
        match *self {
            Self::Other { error_tag, raw } => {
                matches!(Self::from_words(error_tag, raw), Self::Other { .. })
            }
            _ => true,
        }
    }

    /// The `klineErrorTag` value that selects this arm.
    pub fn error_tag(&self) -> u32 {
        match self {
            Self::RxTx { .. } => kline::ERROR_TYPE_RXTX_ERROR,
            Self::Tester5Bd { .. } => kline::ERROR_TYPE_5BD_TESTER,
            Self::Ecu5Bd { .. } => kline::ERROR_TYPE_5BD_ECU,
            Self::Ibs { .. } => kline::ERROR_TYPE_IBS,
            Self::Other { error_tag, .. } => *error_tag,
        }
    }

    fn words(&self) -> [u32; 4] {
        match *self {
            Self::RxTx {
                rxtx_err_data: a,
                reserved: [b, c, d],
            }
            | Self::Tester5Bd {
                tester_5bd_err: a,
                reserved: [b, c, d],
            }
            | Self::Ecu5Bd {
                ecu_5bd_err: a,
                reserved: [b, c, d],
            } => [a, b, c, d],
            Self::Ibs {
                ibs_err,
                rxtx_err_data,
                reserved: [c, d],
            } => [ibs_err, rxtx_err_data, c, d],
            Self::Other { raw, .. } => raw,
        }
    }

    fn reserved_words(&self) -> &[u32] {
        match self {
            Self::RxTx { reserved, .. }
            | Self::Tester5Bd { reserved, .. }
            | Self::Ecu5Bd { reserved, .. } => reserved.as_slice(),
            Self::Ibs { reserved, .. } => reserved.as_slice(),
            Self::Other { .. } => &[],
        }
    }

    fn fields(&self) -> Vec<Field> {
        let named = |name: &'static str, v: u32| Field {
            name,
            value: FieldValue::Unsigned(u64::from(v)),
            reserved: false,
        };
        match *self {
            Self::RxTx { rxtx_err_data, .. } => vec![named("rxtx_err_data", rxtx_err_data)],
            Self::Tester5Bd { tester_5bd_err, .. } => {
                vec![named("tester_5bd_err", tester_5bd_err)]
            }
            Self::Ecu5Bd { ecu_5bd_err, .. } => vec![named("ecu_5bd_err", ecu_5bd_err)],
            Self::Ibs {
                ibs_err,
                rxtx_err_data,
                ..
            } => vec![
                named("ibs_err", ibs_err),
                named("rxtx_err_data", rxtx_err_data),
            ],
            Self::Other { raw, .. } => vec![Field {
                name: "raw",
                value: raw.value(),
                reserved: false,
            }],
        }
    }
}

/// K-Line error event. The error tag is derived from [`KlineErrorCause`]
/// so it can never disagree with the active arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KlineError {
    pub evt_tag: u32,
    pub cause: KlineErrorCause,
    pub reserved: u32,
    pub tail: [u8; 4],
}

impl KlineError {
    pub fn new(cause: KlineErrorCause) -> Self {
        Self {
            evt_tag: kline::EVT_ERROR,
            cause,
            reserved: 0,
            tail: [0; 4],
        }
    }

    /// Reject a raw cause that shadows a typed arm.
    pub fn check_arm(&self) -> Result<()> {
        if self.cause.is_canonical() {
            Ok(())
        } else {
            Err(SchemaError::ShadowedArm {
                layout: Self::LAYOUT.name,
                tag: self.cause.error_tag(),
            })
        }
    }

    pub fn ibs_err(&self) -> Option<u32> {
        match self.cause {
            KlineErrorCause::Ibs { ibs_err, .. } => Some(ibs_err),
            _ => None,
        }
    }

    pub fn rxtx_err_data(&self) -> Option<u32> {
        match self.cause {
            KlineErrorCause::RxTx { rxtx_err_data, .. }
            | KlineErrorCause::Ibs { rxtx_err_data, .. } => Some(rxtx_err_data),
            _ => None,
        }
    }
}

impl Wire for KlineError {
    const SIZE: usize = Self::LAYOUT.size;
    const KIND: FieldKind = FieldKind::Nested(&Self::LAYOUT);

    fn get(src: &mut &[u8]) -> Self {
        let evt_tag = src.get_u32_le();
        let error_tag = src.get_u32_le();
        let reserved = src.get_u32_le();
        let words = <[u32; 4]>::get(src);
        let tail = <[u8; 4]>::get(src);
        Self {
            evt_tag,
            cause: KlineErrorCause::from_words(error_tag, words),
            reserved,
            tail,
        }
    }

    fn put(&self, dst: &mut BytesMut) {
        dst.put_u32_le(self.evt_tag);
        dst.put_u32_le(self.cause.error_tag());
        dst.put_u32_le(self.reserved);
        Wire::put(&self.cause.words(), dst);
        Wire::put(&self.tail, dst);
    }

    fn value(&self) -> FieldValue {
        FieldValue::Record(self.fields())
    }

    fn is_zero(&self) -> bool {
        self.evt_tag == 0
            && self.cause.error_tag() == 0
            && self.reserved == 0
            && self.cause.words().is_zero()
            && self.tail.is_zero()
    }

    fn nonzero_reserved(&self) -> Option<&'static str> {
        if self.reserved != 0 {
            Some("reserved")
        } else if self.cause.reserved_words().iter().any(|w| *w != 0) {
            Some("cause.reserved")
        } else if !self.tail.is_zero() {
            Some("tail")
        } else {
            None
        }
    }
}

impl Record for KlineError {
    const LAYOUT: Layout = Layout {
        name: "KlineError",
        size: 32,
        fields: &[
            FieldSpec {
                name: "evt_tag",
                kind: u32::KIND,
                reserved: false,
            },
            FieldSpec {
                name: "kline_error_tag",
                kind: u32::KIND,
                reserved: false,
            },
            FieldSpec {
                name: "reserved",
                kind: u32::KIND,
                reserved: true,
            },
            FieldSpec {
                name: "cause",
                kind: <[u32; 4]>::KIND,
                reserved: false,
            },
            FieldSpec {
                name: "tail",
                kind: <[u8; 4]>::KIND,
                reserved: true,
            },
        ],
    };

    fn fields(&self) -> Vec<Field> {
        vec![
            Field {
                name: "evt_tag",
                value: self.evt_tag.value(),
                reserved: false,
            },
            Field {
                name: "kline_error_tag",
                value: self.cause.error_tag().value(),
                reserved: false,
            },
            Field {
                name: "reserved",
                value: self.reserved.value(),
                reserved: true,
            },
            Field {
                name: "cause",
                value: FieldValue::Record(self.cause.fields()),
                reserved: false,
            },
            Field {
                name: "tail",
                value: self.tail.value(),
                reserved: true,
            },
        ]
    }

    fn encode(&self, dst: &mut BytesMut) -> Result<()> {
        self.check_arm()?;
        if let Some(field) = self.nonzero_reserved() {
            return Err(SchemaError::ReservedNotZero {
                layout: Self::LAYOUT.name,
                field,
            });
        }
        dst.reserve(Self::LAYOUT.size);
        self.put(dst);
        Ok(())
    }
}
