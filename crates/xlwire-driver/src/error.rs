use serde::Serialize;

use crate::status::Status;

/// A driver call returned a code other than success or pending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{operation} failed: {description} (status {code})")]
pub struct DriverStatusError {
    /// Numeric status code as returned by the driver.
    pub code: u16,
    /// Text from the describe-code lookup.
    pub description: String,
    /// The driver operation that produced the code.
    pub operation: String,
}

impl DriverStatusError {
    pub fn status(&self) -> Status {
        Status(self.code)
    }
}

pub type Result<T> = std::result::Result<T, DriverStatusError>;
