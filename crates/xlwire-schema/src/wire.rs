//! Fixed-width field types and the [`Record`] layout contract.
//!
//! Every record is an ordered list of little-endian integers and fixed-length
//! arrays. There is no implicit padding: bytes the C compiler would insert
//! are spelled out as reserved fields so the declared size is exact.

use std::fmt;

use bytes::{Buf, BufMut, Bytes, BytesMut};
use serde::{Serialize, Serializer};

use crate::error::{Result, SchemaError};

/// Shape of a single field inside a [`Layout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Little-endian integer of `width` bytes.
    Scalar { width: usize, signed: bool },
    /// `len` consecutive integers of `width` bytes each.
    Array { width: usize, len: usize },
    /// An embedded record with its own layout.
    Nested(&'static Layout),
}

impl FieldKind {
    /// Number of bytes the field occupies on the wire.
    pub const fn size(&self) -> usize {
        match self {
            FieldKind::Scalar { width, .. } => *width,
            FieldKind::Array { width, len } => *width * *len,
            FieldKind::Nested(layout) => layout.size,
        }
    }
}

/// One named field of a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Reserved fields are preserved on decode and must be zero on encode.
    pub reserved: bool,
}

/// Static description of a record: field order, widths and total size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub name: &'static str,
    pub size: usize,
    pub fields: &'static [FieldSpec],
}

impl Layout {
    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Byte offset of a field from the start of the record.
    pub fn offset_of(&self, name: &str) -> Option<usize> {
        let mut offset = 0usize;
        for field in self.fields {
            if field.name == name {
                return Some(offset);
            }
            offset += field.kind.size();
        }
        None
    }

    /// Sum of the field sizes. Equals `size` for every well-formed layout.
    pub fn field_bytes(&self) -> usize {
        self.fields.iter().map(|f| f.kind.size()).sum()
    }

    /// Bytes occupied by reserved fields.
    pub fn reserved_bytes(&self) -> usize {
        self.fields
            .iter()
            .filter(|f| f.reserved)
            .map(|f| f.kind.size())
            .sum()
    }
}

/// Decoded value of one field, used for display and JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Unsigned(u64),
    Signed(i64),
    #[serde(serialize_with = "serialize_hex")]
    Bytes(Vec<u8>),
    Words(Vec<u64>),
    Record(Vec<Field>),
}

impl FieldValue {
    pub fn is_zero(&self) -> bool {
        match self {
            FieldValue::Unsigned(v) => *v == 0,
            FieldValue::Signed(v) => *v == 0,
            FieldValue::Bytes(b) => b.iter().all(|v| *v == 0),
            FieldValue::Words(w) => w.iter().all(|v| *v == 0),
            FieldValue::Record(fields) => fields.iter().all(|f| f.value.is_zero()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Unsigned(v) => write!(f, "{v}"),
            FieldValue::Signed(v) => write!(f, "{v}"),
            FieldValue::Bytes(bytes) => f.write_str(&hex(bytes)),
            FieldValue::Words(words) => {
                let parts: Vec<String> = words.iter().map(|w| format!("{w:#x}")).collect();
                write!(f, "[{}]", parts.join(" "))
            }
            FieldValue::Record(fields) => {
                let parts: Vec<String> = fields
                    .iter()
                    .filter(|field| !field.reserved)
                    .map(|field| format!("{}={}", field.name, field.value))
                    .collect();
                write!(f, "{{{}}}", parts.join(" "))
            }
        }
    }
}

/// A named decoded field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub name: &'static str,
    pub value: FieldValue,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub reserved: bool,
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn serialize_hex<S: Serializer>(
    bytes: &[u8],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex(bytes))
}

/// A type with a fixed little-endian wire representation.
pub trait Wire: Sized {
    /// Exact number of bytes on the wire.
    const SIZE: usize;
    /// Descriptor entry for fields of this type.
    const KIND: FieldKind;

    /// Read the value from the front of `src`.
    ///
    /// Callers must guarantee `src.len() >= Self::SIZE`; [`Record::decode`]
    /// performs that check once per record.
    fn get(src: &mut &[u8]) -> Self;

    /// Append the value to `dst`.
    fn put(&self, dst: &mut BytesMut);

    /// Display/JSON view of the value.
    fn value(&self) -> FieldValue;

    /// True when every byte of the value is zero.
    fn is_zero(&self) -> bool;

    /// Name of the first non-zero reserved field inside this value.
    fn nonzero_reserved(&self) -> Option<&'static str> {
        None
    }
}

/// Integers usable as array elements.
pub trait Scalar: Wire + Copy {
    fn word(self) -> u64;
}

macro_rules! scalar_wire {
    ($($ty:ty => $get:ident, $put:ident, $variant:ident as $cast:ty, $signed:expr);+ $(;)?) => {$(
        impl Wire for $ty {
            const SIZE: usize = std::mem::size_of::<$ty>();
            const KIND: FieldKind = FieldKind::Scalar {
                width: std::mem::size_of::<$ty>(),
                signed: $signed,
            };

            fn get(src: &mut &[u8]) -> Self {
                src.$get()
            }

            fn put(&self, dst: &mut BytesMut) {
                dst.$put(*self);
            }

            fn value(&self) -> FieldValue {
                FieldValue::$variant(*self as $cast)
            }

            fn is_zero(&self) -> bool {
                *self == 0
            }
        }
    )+};
}

scalar_wire! {
    u8 => get_u8, put_u8, Unsigned as u64, false;
    u16 => get_u16_le, put_u16_le, Unsigned as u64, false;
    u32 => get_u32_le, put_u32_le, Unsigned as u64, false;
    u64 => get_u64_le, put_u64_le, Unsigned as u64, false;
    i32 => get_i32_le, put_i32_le, Signed as i64, true;
}

macro_rules! scalar_word {
    ($($ty:ty),+) => {$(
        impl Scalar for $ty {
            fn word(self) -> u64 {
                self as u64
            }
        }
    )+};
}

scalar_word!(u8, u16, u32, u64);

impl<T: Scalar, const N: usize> Wire for [T; N] {
    const SIZE: usize = T::SIZE * N;
    const KIND: FieldKind = FieldKind::Array {
        width: T::SIZE,
        len: N,
    };

    fn get(src: &mut &[u8]) -> Self {
        std::array::from_fn(|_| T::get(src))
    }

    fn put(&self, dst: &mut BytesMut) {
        for item in self {
            item.put(dst);
        }
    }

    fn value(&self) -> FieldValue {
        if T::SIZE == 1 {
            FieldValue::Bytes(self.iter().map(|v| v.word() as u8).collect())
        } else {
            FieldValue::Words(self.iter().map(|v| v.word()).collect())
        }
    }

    fn is_zero(&self) -> bool {
        self.iter().all(|v| v.word() == 0)
    }
}

/// A fixed-size record with a static [`Layout`].
pub trait Record: Wire {
    const LAYOUT: Layout;

    /// Named field dump in layout order.
    fn fields(&self) -> Vec<Field>;

    /// Decode from the front of `src`, which must hold at least
    /// `LAYOUT.size` bytes. Trailing bytes are ignored.
    fn decode(src: &[u8]) -> Result<Self> {
        let size = Self::LAYOUT.size;
        if src.len() < size {
            return Err(SchemaError::Truncated {
                layout: Self::LAYOUT.name,
                needed: size,
                available: src.len(),
            });
        }
        let mut cursor = &src[..size];
        Ok(Self::get(&mut cursor))
    }

    /// Append exactly `LAYOUT.size` bytes to `dst`.
    fn encode(&self, dst: &mut BytesMut) -> Result<()> {
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

    /// Encode into a fresh buffer.
    fn to_bytes(&self) -> Result<Bytes> {
        let mut dst = BytesMut::with_capacity(Self::LAYOUT.size);
        self.encode(&mut dst)?;
        Ok(dst.freeze())
    }

    /// The all-zero value of this record.
    fn zeroed() -> Self {
        let zeros = vec![0u8; Self::LAYOUT.size];
        Self::get(&mut zeros.as_slice())
    }
}

/// Declare a fixed-layout record.
///
/// Fields are listed in wire order. A field followed by `= reserved` is kept
/// on decode and rejected on encode unless zero.
///
/// ```
/// use xlwire_schema::{wire_record, Record};
///
/// wire_record! {
///     /// Two counters and a padding word.
///     pub struct Counters {
///         pub rx: u16,
///         pub tx: u16,
///         pub pad: u32 = reserved,
///     }
/// }
///
/// assert_eq!(Counters::LAYOUT.size, 8);
/// ```
#[macro_export]
macro_rules! wire_record {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                pub $field:ident : $ty:ty $(= $marker:ident)?
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name {
            $(
                $(#[$fmeta])*
                pub $field: $ty,
            )+
        }

        impl $crate::Wire for $name {
            const SIZE: usize = <Self as $crate::Record>::LAYOUT.size;
            const KIND: $crate::FieldKind =
                $crate::FieldKind::Nested(&<Self as $crate::Record>::LAYOUT);

            fn get(src: &mut &[u8]) -> Self {
                Self {
                    $( $field: <$ty as $crate::Wire>::get(src), )+
                }
            }

            fn put(&self, dst: &mut $crate::__private::BytesMut) {
                $( $crate::Wire::put(&self.$field, dst); )+
            }

            fn value(&self) -> $crate::FieldValue {
                $crate::FieldValue::Record($crate::Record::fields(self))
            }

            fn is_zero(&self) -> bool {
                true $( && $crate::Wire::is_zero(&self.$field) )+
            }

            fn nonzero_reserved(&self) -> Option<&'static str> {
                $(
                    if $crate::__reserved!($($marker)?) {
                        if !$crate::Wire::is_zero(&self.$field) {
                            return Some(stringify!($field));
                        }
                    } else if let Some(name) = $crate::Wire::nonzero_reserved(&self.$field) {
                        return Some(name);
                    }
                )+
                None
            }
        }

        impl $crate::Record for $name {
            const LAYOUT: $crate::Layout = $crate::Layout {
                name: stringify!($name),
                size: 0 $( + <$ty as $crate::Wire>::SIZE )+,
                fields: &[
                    $(
                        $crate::FieldSpec {
                            name: stringify!($field),
                            kind: <$ty as $crate::Wire>::KIND,
                            reserved: $crate::__reserved!($($marker)?),
                        },
                    )+
                ],
            };

            fn fields(&self) -> Vec<$crate::Field> {
                vec![
                    $(
                        $crate::Field {
                            name: stringify!($field),
                            value: $crate::Wire::value(&self.$field),
                            reserved: $crate::__reserved!($($marker)?),
                        },
                    )+
                ]
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __reserved {
    () => {
        false
    };
    (reserved) => {
        true
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    wire_record! {
        pub struct Probe {
            pub a: u8,
            pub pad: u8 = reserved,
            pub b: u16,
            pub c: u32,
            pub d: [u8; 3],
            pub tail: [u8; 5] = reserved,
            pub e: u64,
            pub f: i32,
            pub g: [u16; 2],
        }
    }

    wire_record! {
        pub struct Outer {
            pub head: u32,
            pub inner: Probe,
        }
    }

    fn sample_bytes() -> Vec<u8> {
        let mut raw = vec![0u8; Probe::LAYOUT.size];
        raw[0] = 0x11;
        raw[2..4].copy_from_slice(&0x2233u16.to_le_bytes());
        raw[4..8].copy_from_slice(&0x44556677u32.to_le_bytes());
        raw[8..11].copy_from_slice(&[1, 2, 3]);
        raw[16..24].copy_from_slice(&0x0102030405060708u64.to_le_bytes());
        raw[24..28].copy_from_slice(&(-5i32).to_le_bytes());
        raw[28..30].copy_from_slice(&7u16.to_le_bytes());
        raw[30..32].copy_from_slice(&9u16.to_le_bytes());
        raw
    }

    #[test]
    fn layout_size_and_offsets() {
        assert_eq!(Probe::LAYOUT.size, 32);
        assert_eq!(Probe::LAYOUT.field_bytes(), 32);
        assert_eq!(Probe::LAYOUT.offset_of("c"), Some(4));
        assert_eq!(Probe::LAYOUT.offset_of("e"), Some(16));
        assert_eq!(Probe::LAYOUT.reserved_bytes(), 6);
        assert_eq!(Outer::LAYOUT.size, 36);
        assert!(matches!(
            Outer::LAYOUT.field("inner").map(|f| f.kind),
            Some(FieldKind::Nested(layout)) if layout.name == "Probe"
        ));
    }

    #[test]
    fn decode_reads_little_endian_in_order() {
        let probe = Probe::decode(&sample_bytes()).unwrap();
        assert_eq!(probe.a, 0x11);
        assert_eq!(probe.b, 0x2233);
        assert_eq!(probe.c, 0x44556677);
        assert_eq!(probe.d, [1, 2, 3]);
        assert_eq!(probe.e, 0x0102030405060708);
        assert_eq!(probe.f, -5);
        assert_eq!(probe.g, [7, 9]);
    }

    #[test]
    fn encode_is_byte_identical() {
        let raw = sample_bytes();
        let probe = Probe::decode(&raw).unwrap();
        assert_eq!(probe.to_bytes().unwrap().as_ref(), raw.as_slice());
    }

    #[test]
    fn decode_rejects_short_input() {
        let err = Probe::decode(&[0u8; 31]).unwrap_err();
        assert_eq!(
            err,
            SchemaError::Truncated {
                layout: "Probe",
                needed: 32,
                available: 31
            }
        );
    }

    #[test]
    fn reserved_preserved_on_decode_rejected_on_encode() {
        let mut raw = sample_bytes();
        raw[12] = 0xEE;
        let probe = Probe::decode(&raw).unwrap();
        assert_eq!(probe.tail[1], 0xEE);
        let err = probe.to_bytes().unwrap_err();
        assert_eq!(
            err,
            SchemaError::ReservedNotZero {
                layout: "Probe",
                field: "tail"
            }
        );
    }

    #[test]
    fn nested_reserved_is_reported() {
        let mut outer = Outer::zeroed();
        outer.inner.pad = 1;
        assert_eq!(outer.nonzero_reserved(), Some("pad"));
        assert!(outer.to_bytes().is_err());
    }

    #[test]
    fn field_dump_serializes_bytes_as_hex() {
        let probe = Probe::decode(&sample_bytes()).unwrap();
        let fields = probe.fields();
        assert_eq!(fields.len(), Probe::LAYOUT.fields.len());
        let json = serde_json::to_value(&fields).unwrap();
        assert_eq!(json[4]["value"], "010203");
        assert_eq!(json[7]["value"], -5);
        assert!(json[1].get("reserved").is_some());
        assert!(json[0].get("reserved").is_none());
    }

    #[test]
    fn zeroed_is_all_zero() {
        let outer = Outer::zeroed();
        assert!(outer.is_zero());
        assert_eq!(outer.to_bytes().unwrap().len(), 36);
    }
}
