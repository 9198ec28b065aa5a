//! Driver-facing boundary of the XL record codec.
//!
//! Status codes are converted into typed errors at the call site with
//! [`check`]; buffers, channel configuration and code descriptions come in
//! through the traits in [`traits`].

pub mod channel;
pub mod error;
pub mod status;
pub mod traits;

pub use channel::{AccessMask, ChannelConfigCache};
pub use error::{DriverStatusError, Result};
pub use status::{check, Outcome, Status, StatusCatalog, StatusClass, StatusEntry};
pub use traits::{ChannelConfigSource, DescribeStatus, EventSource, RawReceive, ReceiveSignature};
