use std::fmt;
use std::io;

use xlwire::frame::FrameError;
use xlwire::schema::SchemaError;

pub const SUCCESS: i32 = 0;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const NO_INPUT: i32 = 66;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::NotFound => NO_INPUT,
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn frame_error(context: &str, err: FrameError) -> CliError {
    // Registry construction failures are internal; the rest comes from input.
    let code = match &err {
        FrameError::Layout(SchemaError::DuplicateKey(_) | SchemaError::InconsistentUnion(_)) => {
            INTERNAL
        }
        _ => DATA_INVALID,
    };
    CliError::new(code, format!("{context}: {err}"))
}

#[cfg(test)]
mod tests {
    use xlwire::schema::{Family, VariantKey};

    use super::*;

    #[test]
    fn truncation_is_invalid_data() {
        let err = frame_error(
            "record 0",
            FrameError::Truncated {
                offset: 0,
                needed: 48,
                available: 10,
            },
        );
        assert_eq!(err.code, DATA_INVALID);
        assert!(err.message.starts_with("record 0: "));
    }

    #[test]
    fn short_union_body_is_invalid_data() {
        let err = frame_error(
            "record 0",
            FrameError::Layout(SchemaError::Truncated {
                layout: "FrError",
                needed: 1,
                available: 0,
            }),
        );
        assert_eq!(err.code, DATA_INVALID);
    }

    #[test]
    fn broken_registry_is_internal() {
        let err = frame_error(
            "decoder",
            FrameError::Layout(SchemaError::DuplicateKey(VariantKey::new(Family::Classic, 1))),
        );
        assert_eq!(err.code, INTERNAL);
    }

    #[test]
    fn missing_file_is_no_input() {
        let err = io_error("read", io::Error::from(io::ErrorKind::NotFound));
        assert_eq!(err.code, NO_INPUT);
    }
}
