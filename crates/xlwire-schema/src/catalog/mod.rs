//! The record catalog: every payload variant the driver can emit or accept,
//! grouped by protocol family.

use bytes::BytesMut;

use crate::error::{Result, SchemaError};
use crate::family::Family;
use crate::registry::{Direction, Selector, UnionHead, VariantKey, VariantSpec};
use crate::tags;
use crate::wire::{Field, Layout, Wire};

#[doc(hidden)]
#[macro_export]
macro_rules! __secondary {
    () => {
        None
    };
    ($sec:path) => {
        Some($sec)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __direction {
    () => {
        $crate::Direction::Receive
    };
    ($dir:ident) => {
        $crate::Direction::$dir
    };
}

/// Declare the payload enum of one family together with its registry rows.
///
/// Each line maps a primary tag (and optionally a bracketed secondary tag)
/// to a record type. `=> Transmit` marks variants the application sends.
macro_rules! family_payload {
    (
        $(#[$meta:meta])*
        pub enum $name:ident in $family:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident($ty:ty) = $tag:path $([$sec:path])? $(=> $dir:ident)?
            );+ $(;)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant($ty),
            )+
        }

        impl $name {
            /// Registry rows contributed by this family.
            pub const VARIANTS: &'static [$crate::VariantSpec] = &[
                $(
                    $crate::VariantSpec {
                        key: $crate::VariantKey {
                            family: $crate::Family::$family,
                            tag: $tag,
                            secondary: $crate::__secondary!($($sec)?),
                        },
                        name: stringify!($variant),
                        layout: &<$ty as $crate::Record>::LAYOUT,
                        direction: $crate::__direction!($($dir)?),
                    },
                )+
            ];

            pub(crate) fn read(key: &$crate::VariantKey, src: &mut &[u8]) -> Option<Self> {
                match (key.tag, key.secondary) {
                    $(
                        ($tag, $crate::__secondary!($($sec)?)) => {
                            Some(Self::$variant(<$ty as $crate::Wire>::get(src)))
                        }
                    )+
                    _ => None,
                }
            }

            pub fn key(&self) -> $crate::VariantKey {
                match self {
                    $(
                        Self::$variant(_) => $crate::VariantKey {
                            family: $crate::Family::$family,
                            tag: $tag,
                            secondary: $crate::__secondary!($($sec)?),
                        },
                    )+
                }
            }

            pub fn name(&self) -> &'static str {
                match self {
                    $( Self::$variant(_) => stringify!($variant), )+
                }
            }

            pub fn layout(&self) -> &'static $crate::Layout {
                match self {
                    $( Self::$variant(_) => &<$ty as $crate::Record>::LAYOUT, )+
                }
            }

            pub fn direction(&self) -> $crate::Direction {
                match self {
                    $( Self::$variant(_) => $crate::__direction!($($dir)?), )+
                }
            }

            pub(crate) fn put(&self, dst: &mut bytes::BytesMut) {
                match self {
                    $( Self::$variant(v) => $crate::Wire::put(v, dst), )+
                }
            }

            pub fn fields(&self) -> Vec<$crate::Field> {
                match self {
                    $( Self::$variant(v) => $crate::Record::fields(v), )+
                }
            }

            pub fn nonzero_reserved(&self) -> Option<&'static str> {
                match self {
                    $( Self::$variant(v) => $crate::Wire::nonzero_reserved(v), )+
                }
            }
        }

        impl From<$name> for $crate::Payload {
            fn from(payload: $name) -> Self {
                $crate::Payload::$family(payload)
            }
        }
    };
}

pub mod a429;
pub mod canfd;
pub mod channel;
pub mod classic;
pub mod ethernet;
pub mod flexray;
pub mod kline;
pub mod most;
pub mod most150;

pub use a429::A429Payload;
pub use canfd::{CanFdRxPayload, CanFdTxPayload};
pub use classic::ClassicPayload;
pub use ethernet::EthernetPayload;
pub use flexray::FlexRayPayload;
pub use most::Most25Payload;
pub use most150::Most150Payload;

/// Primary tags whose payload is itself a tagged union.
pub const UNION_HEADS: &[UnionHead] = &[
    UnionHead {
        family: Family::Classic,
        tag: tags::classic::KLINE_MSG,
        name: "KlineData",
        selector: Selector {
            offset: 0,
            width: 4,
        },
    },
    UnionHead {
        family: Family::FlexRay,
        tag: tags::flexray::ERROR,
        name: "FrError",
        selector: Selector {
            offset: 0,
            width: 1,
        },
    },
];

/// One decoded payload: exactly one variant of exactly one family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Classic(ClassicPayload),
    CanFdRx(CanFdRxPayload),
    CanFdTx(CanFdTxPayload),
    FlexRay(FlexRayPayload),
    Most25(Most25Payload),
    Most150(Most150Payload),
    Ethernet(EthernetPayload),
    A429(A429Payload),
}

macro_rules! each_family {
    ($value:expr, $p:ident => $body:expr) => {
        match $value {
            Payload::Classic($p) => $body,
            Payload::CanFdRx($p) => $body,
            Payload::CanFdTx($p) => $body,
            Payload::FlexRay($p) => $body,
            Payload::Most25($p) => $body,
            Payload::Most150($p) => $body,
            Payload::Ethernet($p) => $body,
            Payload::A429($p) => $body,
        }
    };
}

impl Payload {
    /// Decode the payload described by `spec` from the front of `src`.
    pub fn decode(spec: &VariantSpec, src: &[u8]) -> Result<Self> {
        let size = spec.layout.size;
        if src.len() < size {
            return Err(SchemaError::Truncated {
                layout: spec.layout.name,
                needed: size,
                available: src.len(),
            });
        }

        let key = &spec.key;
        let mut cursor = &src[..size];
        let payload = match key.family {
            Family::Classic => ClassicPayload::read(key, &mut cursor).map(Payload::Classic),
            Family::CanFdRx => CanFdRxPayload::read(key, &mut cursor).map(Payload::CanFdRx),
            Family::CanFdTx => CanFdTxPayload::read(key, &mut cursor).map(Payload::CanFdTx),
            Family::FlexRay => FlexRayPayload::read(key, &mut cursor).map(Payload::FlexRay),
            Family::Most25 => Most25Payload::read(key, &mut cursor).map(Payload::Most25),
            Family::Most150 => Most150Payload::read(key, &mut cursor).map(Payload::Most150),
            Family::Ethernet => EthernetPayload::read(key, &mut cursor).map(Payload::Ethernet),
            Family::A429 => A429Payload::read(key, &mut cursor).map(Payload::A429),
        };
        payload.ok_or(SchemaError::UnknownKey(*key))
    }

    /// Serialize the payload, rejecting non-zero reserved fields.
    pub fn encode(&self, dst: &mut BytesMut) -> Result<()> {
        if let Some(field) = self.nonzero_reserved() {
            return Err(SchemaError::ReservedNotZero {
                layout: self.layout().name,
                field,
            });
        }
        if let Payload::Classic(ClassicPayload::KlineError(err)) = self {
            err.check_arm()?;
        }
        dst.reserve(self.layout().size);
        each_family!(self, p => p.put(dst));
        Ok(())
    }

    pub fn family(&self) -> Family {
        self.key().family
    }

    pub fn key(&self) -> VariantKey {
        each_family!(self, p => p.key())
    }

    pub fn name(&self) -> &'static str {
        each_family!(self, p => p.name())
    }

    pub fn layout(&self) -> &'static Layout {
        each_family!(self, p => p.layout())
    }

    pub fn fields(&self) -> Vec<Field> {
        each_family!(self, p => p.fields())
    }

    pub fn nonzero_reserved(&self) -> Option<&'static str> {
        each_family!(self, p => p.nonzero_reserved())
    }

    pub fn direction(&self) -> Direction {
        each_family!(self, p => p.direction())
    }
}

/// Every registry row of every family, in catalog order.
pub fn all_variants() -> impl Iterator<Item = &'static VariantSpec> {
    ClassicPayload::VARIANTS
        .iter()
        .chain(CanFdRxPayload::VARIANTS)
        .chain(CanFdTxPayload::VARIANTS)
        .chain(FlexRayPayload::VARIANTS)
        .chain(Most25Payload::VARIANTS)
        .chain(Most150Payload::VARIANTS)
        .chain(EthernetPayload::VARIANTS)
        .chain(A429Payload::VARIANTS)
}

/// Decode a nested record that sits inside a fixed-size union region.
pub(crate) fn get_arm<T: Wire>(region: &[u8]) -> T {
    let mut cursor = region;
    T::get(&mut cursor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_matches_registry_rows() {
        for spec in all_variants() {
            let zeros = vec![0u8; spec.layout.size];
            let payload = Payload::decode(spec, &zeros).unwrap();
            assert_eq!(payload.direction(), spec.direction, "{}", spec.key);
        }
    }
}
