//! The driver boundary. The codec never calls a driver itself; it is handed
//! implementations of these traits.

use xlwire_schema::{ChannelConfig, Family};

use crate::channel::AccessMask;
use crate::error::Result;
use crate::status::Status;

/// The driver's describe-code operation.
pub trait DescribeStatus {
    fn describe(&self, status: Status) -> String;
}

impl<F> DescribeStatus for F
where
    F: Fn(Status) -> String,
{
    fn describe(&self, status: Status) -> String {
        self(status)
    }
}

/// Supplies channel configuration records on demand.
pub trait ChannelConfigSource {
    /// Query the configuration of one hardware channel.
    fn channel_config(&self, channel: u8) -> Result<ChannelConfig>;
}

/// Shape of the receive call a source actually implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReceiveSignature {
    /// Filters by the access mask passed in.
    Published,
    /// The call takes no access mask and returns events of every channel
    /// on the port, unlike the published prototype.
    WithoutAccessMask,
}

/// Raw result of one receive call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawReceive {
    pub status: Status,
    /// Number of records the driver reports in `buffer`.
    pub count: usize,
    pub buffer: Vec<u8>,
}

/// One receive call of the driver.
pub trait EventSource {
    /// Receive the pending records of `family`. `access` is `None` when
    /// the caller has no mask to pass.
    fn receive(&mut self, family: Family, access: Option<AccessMask>) -> RawReceive;

    /// The receive shape of this source for `family`.
    fn signature(&self, _family: Family) -> ReceiveSignature {
        ReceiveSignature::Published
    }
}
