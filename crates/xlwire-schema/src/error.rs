use crate::registry::VariantKey;

/// Errors raised while reading or writing fixed wire layouts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// The input is shorter than the layout's declared size.
    #[error("truncated {layout}: need {needed} bytes, have {available}")]
    Truncated {
        layout: &'static str,
        needed: usize,
        available: usize,
    },

    /// A reserved field carries a non-zero value on encode.
    #[error("reserved field {layout}.{field} must be zero")]
    ReservedNotZero {
        layout: &'static str,
        field: &'static str,
    },

    /// A raw union arm carries a discriminant that selects a typed arm.
    #[error("{layout}: raw arm carries tag {tag}, which selects a typed arm")]
    ShadowedArm { layout: &'static str, tag: u32 },

    /// Two catalog entries claim the same registry key.
    #[error("duplicate registry key {0}")]
    DuplicateKey(VariantKey),

    /// A variant carries a secondary tag without a union head, or lacks one
    /// where its primary tag opens a union.
    #[error("variant {0} disagrees with the union heads")]
    InconsistentUnion(VariantKey),

    /// No catalog entry exists for the key.
    #[error("no variant registered for {0}")]
    UnknownKey(VariantKey),
}

pub type Result<T> = std::result::Result<T, SchemaError>;
