use xlwire_schema::{SchemaError, VariantKey};

/// Errors that can occur while decoding or encoding event records.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    /// The buffer ends before the record does.
    #[error("record at offset {offset} needs {needed} bytes, buffer has {available}")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// The declared record size is smaller than the envelope header.
    #[error("record at offset {offset} declares size {size}, below the {header}-byte header")]
    Undersized {
        offset: usize,
        size: usize,
        header: usize,
    },

    /// The declared record size exceeds the family maximum.
    #[error("record at offset {offset} declares size {size}, above the maximum {max}")]
    Oversized {
        offset: usize,
        size: usize,
        max: usize,
    },

    /// The payload length disagrees with the registered layout.
    #[error("payload of {key} is {actual} bytes, layout declares {expected}")]
    SizeMismatch {
        key: VariantKey,
        actual: usize,
        expected: usize,
    },

    /// The tag is not in the registry. `consumed` is the record size, so
    /// a batch can step over it.
    #[error("unknown variant {key} ({consumed} bytes)")]
    UnknownVariant { key: VariantKey, consumed: usize },

    /// An encode-time invariant does not hold.
    #[error("{variant}: {reason}")]
    Constraint {
        variant: &'static str,
        reason: String,
    },

    /// A layout-level failure.
    #[error(transparent)]
    Layout(#[from] SchemaError),
}

/// Coarse classification of a [`FrameError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Size, tag or truncation mismatch against the registry.
    Framing,
    /// Tag absent from the registry; recoverable.
    UnknownVariant,
    /// Encode-time invariant violation.
    Constraint,
}

impl FrameError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FrameError::UnknownVariant { .. } | FrameError::Layout(SchemaError::UnknownKey(_)) => {
                ErrorKind::UnknownVariant
            }
            FrameError::Constraint { .. }
            | FrameError::Layout(SchemaError::ReservedNotZero { .. })
            | FrameError::Layout(SchemaError::ShadowedArm { .. }) => ErrorKind::Constraint,
            _ => ErrorKind::Framing,
        }
    }

    /// True when a batch may continue past this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, FrameError::UnknownVariant { .. })
    }

    pub(crate) fn constraint(variant: &'static str, reason: impl Into<String>) -> Self {
        FrameError::Constraint {
            variant,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FrameError>;

#[cfg(test)]
mod tests {
    use xlwire_schema::Family;

    use super::*;

    #[test]
    fn kinds() {
        let key = VariantKey::new(Family::Classic, 0x7F);
        let unknown = FrameError::UnknownVariant { key, consumed: 48 };
        assert_eq!(unknown.kind(), ErrorKind::UnknownVariant);
        assert!(unknown.is_recoverable());

        let reserved = FrameError::Layout(SchemaError::ReservedNotZero {
            layout: "CanMsg",
            field: "res1",
        });
        assert_eq!(reserved.kind(), ErrorKind::Constraint);

        let short = FrameError::Truncated {
            offset: 0,
            needed: 48,
            available: 10,
        };
        assert_eq!(short.kind(), ErrorKind::Framing);
        assert!(!short.is_recoverable());
    }

    #[test]
    fn messages_name_the_variant() {
        let err = FrameError::constraint("CanFdTxMsg", "BRS requires EDL");
        assert_eq!(err.to_string(), "CanFdTxMsg: BRS requires EDL");
    }
}
