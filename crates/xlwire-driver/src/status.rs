//! Driver status codes.
//!
//! Every driver operation returns one 16-bit code. `SUCCESS` and `PENDING`
//! are outcomes; everything else becomes a [`DriverStatusError`] at the
//! boundary via [`check`]. The table below mirrors the vendor header for
//! display; the driver's own describe-code operation stays authoritative.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::error::{DriverStatusError, Result};
use crate::traits::DescribeStatus;

/// Raw status code returned by a driver call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Status(pub u16);

/// Result of a call that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Completed,
    /// Accepted; the result arrives later and the caller may poll.
    Pending,
}

/// Coarse partition of the status space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusClass {
    Success,
    Pending,
    Error,
}

/// One row of the mirrored status table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusEntry {
    pub status: Status,
    pub name: &'static str,
    pub description: &'static str,
}

macro_rules! status_table {
    ($( $name:ident = $code:expr, $text:literal; )+) => {
        impl Status {
            $( pub const $name: Status = Status($code); )+
        }

        static TABLE: &[StatusEntry] = &[
            $(
                StatusEntry {
                    status: Status($code),
                    name: concat!("XL_", stringify!($name)),
                    description: $text,
                },
            )+
        ];
    };
}

status_table! {
    SUCCESS = 0, "success";
    PENDING = 1, "pending; the result is delivered asynchronously";

    ERR_QUEUE_IS_EMPTY = 10, "receive queue is empty";
    ERR_QUEUE_IS_FULL = 11, "transmit queue is full";
    ERR_TX_NOT_POSSIBLE = 12, "transmission is not possible";
    ERR_NO_LICENSE = 14, "no license for this feature";

    ERR_WRONG_PARAMETER = 101, "wrong parameter";
    ERR_TWICE_REGISTER = 110, "registered twice";
    ERR_INVALID_CHAN_INDEX = 111, "invalid channel index";
    ERR_INVALID_ACCESS = 112, "invalid access";
    ERR_PORT_IS_OFFLINE = 113, "port is offline";
    ERR_CHAN_IS_ONLINE = 116, "channel is online";
    ERR_NOT_IMPLEMENTED = 117, "not implemented";
    ERR_INVALID_PORT = 118, "invalid port";
    ERR_HW_NOT_READY = 120, "hardware not ready";
    ERR_CMD_TIMEOUT = 121, "command timed out";
    ERR_CMD_HANDLING = 122, "command handling failed";
    ERR_HW_NOT_PRESENT = 129, "hardware not present";
    ERR_NOTIFY_ALREADY_ACTIVE = 131, "notification already active";
    ERR_INVALID_TAG = 132, "invalid tag";
    ERR_INVALID_RESERVED_FLD = 133, "reserved field is not zero";
    ERR_INVALID_SIZE = 134, "invalid size";
    ERR_INSUFFICIENT_BUFFER = 135, "buffer too small";
    ERR_ERROR_CRC = 136, "CRC error";
    ERR_BAD_EXE_FORMAT = 137, "bad executable format";
    ERR_NO_SYSTEM_RESOURCES = 138, "no system resources";
    ERR_NOT_FOUND = 139, "not found";
    ERR_INVALID_ADDRESS = 140, "invalid address";
    ERR_REQ_NOT_ACCEP = 141, "request not accepted";
    ERR_INVALID_LEVEL = 142, "invalid level";
    ERR_NO_DATA_DETECTED = 143, "no data detected";
    ERR_INTERNAL_ERROR = 144, "internal error";
    ERR_UNEXP_NET_ERR = 145, "unexpected network error";
    ERR_INVALID_USER_BUFFER = 146, "invalid user buffer";
    ERR_INVALID_PORT_ACCESS_TYPE = 147, "invalid port access type";
    ERR_NO_RESOURCES = 152, "no resources";
    ERR_WRONG_CHIP_TYPE = 153, "wrong chip type";
    ERR_WRONG_COMMAND = 154, "wrong command";
    ERR_INVALID_HANDLE = 155, "invalid handle";
    ERR_RESERVED_NOT_ZERO = 157, "reserved parameter is not zero";
    ERR_INIT_ACCESS_MISSING = 158, "init access missing";
    ERR_WRONG_VERSION = 160, "wrong version";

    ERR_CANNOT_OPEN_DRIVER = 201, "cannot open driver";
    ERR_WRONG_BUS_TYPE = 202, "wrong bus type";
    ERR_DLL_NOT_FOUND = 203, "driver library not found";
    ERR_INVALID_CHANNEL_MASK = 204, "invalid channel mask";
    ERR_NOT_SUPPORTED = 205, "not supported";
    ERR_CONNECTION_BROKEN = 210, "connection broken";
    ERR_CONNECTION_CLOSED = 211, "connection closed";
    ERR_INVALID_STREAM_NAME = 212, "invalid stream name";
    ERR_CONNECTION_FAILED = 213, "connection failed";
    ERR_STREAM_NOT_FOUND = 214, "stream not found";
    ERR_STREAM_NOT_CONNECTED = 215, "stream not connected";
    ERR_QUEUE_OVERRUN = 216, "queue overrun";
    ERROR = 255, "unspecified error";

    ERR_PDU_OUT_OF_MEMORY = 0x0104, "PDU: out of memory";
    ERR_FR_CLUSTERCONFIG_MISSING = 0x0105, "FlexRay cluster configuration missing";
    ERR_PDU_OFFSET_REPET_INVALID = 0x0106, "PDU: invalid offset or repetition";
    ERR_PDU_PAYLOAD_SIZE_INVALID = 0x0107, "PDU: invalid payload size";
    ERR_FR_NBR_FRAMES_OVERFLOW = 0x0109, "FlexRay: too many frames";
    ERR_FR_SLOT_ID_INVALID = 0x010B, "FlexRay: invalid slot id";
    ERR_FR_SLOT_ALREADY_OCCUPIED_BY_ERAY = 0x010C, "FlexRay: slot occupied by the E-Ray";
    ERR_FR_SLOT_ALREADY_OCCUPIED_BY_COLDC = 0x010D, "FlexRay: slot occupied by the coldstart controller";
    ERR_FR_SLOT_OCCUPIED_BY_OTHER_APP = 0x010E, "FlexRay: slot occupied by another application";
    ERR_FR_SLOT_IN_WRONG_SEGMENT = 0x010F, "FlexRay: slot in wrong segment";
    ERR_FR_FRAME_CYCLE_MULTIPLEX_ERROR = 0x0110, "FlexRay: frame cycle multiplex error";
    ERR_PDU_NO_UNMAP_OF_SYNCFRAME = 0x0116, "PDU: sync frame cannot be unmapped";
    ERR_SYNC_FRAME_MODE = 0x0123, "FlexRay: sync frame mode";

    ERR_INVALID_DLC = 0x0201, "invalid DLC";
    ERR_INVALID_CANID = 0x0202, "invalid CAN id";
    ERR_INVALID_FDFLAG_MODE20 = 0x0203, "FD flag set in CAN 2.0 mode";
    ERR_EDL_RTR = 0x0204, "EDL and RTR set together";
    ERR_EDL_NOT_SET = 0x0205, "EDL not set for FD frame";
    ERR_UNKNOWN_FLAG = 0x0206, "unknown flag";

    ERR_ETH_PHY_ACTIVATION_FAILED = 0x1100, "Ethernet PHY activation failed";
    ERR_ETH_PHY_CONFIG_ABORTED = 0x1103, "Ethernet PHY configuration aborted";
    ERR_ETH_RESET_FAILED = 0x1104, "Ethernet reset failed";
    ERR_ETH_SET_CONFIG_DELAYED = 0x1105, "Ethernet configuration delayed";
    ERR_ETH_UNSUPPORTED_FEATURE = 0x1106, "Ethernet feature not supported";
    ERR_ETH_MAC_ACTIVATION_FAILED = 0x1107, "Ethernet MAC activation failed";
    ERR_NET_ETH_SWITCH_IS_ONLINE = 0x110C, "Ethernet switch is online";
}

impl Status {
    pub fn code(self) -> u16 {
        self.0
    }

    pub fn class(self) -> StatusClass {
        match self {
            Status::SUCCESS => StatusClass::Success,
            Status::PENDING => StatusClass::Pending,
            _ => StatusClass::Error,
        }
    }

    pub fn is_error(self) -> bool {
        self.class() == StatusClass::Error
    }

    /// Symbolic name from the mirrored table.
    pub fn name(self) -> Option<&'static str> {
        StatusCatalog.lookup(self).map(|entry| entry.name)
    }
}

impl From<u16> for Status {
    fn from(code: u16) -> Self {
        Status(code)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name} ({})", self.0),
            None => write!(f, "status {}", self.0),
        }
    }
}

/// The mirrored status table.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusCatalog;

impl StatusCatalog {
    pub fn lookup(&self, status: Status) -> Option<&'static StatusEntry> {
        TABLE.iter().find(|entry| entry.status == status)
    }

    pub fn entries(&self) -> impl Iterator<Item = &'static StatusEntry> {
        TABLE.iter()
    }
}

impl DescribeStatus for StatusCatalog {
    fn describe(&self, status: Status) -> String {
        match self.lookup(status) {
            Some(entry) => entry.description.to_string(),
            None => format!("unknown status code {}", status.0),
        }
    }
}

/// Convert a driver status into an outcome, or into an error carrying the
/// description and the failed operation.
pub fn check(status: Status, operation: &str, describe: &dyn DescribeStatus) -> Result<Outcome> {
    match status.class() {
        StatusClass::Success => Ok(Outcome::Completed),
        StatusClass::Pending => Ok(Outcome::Pending),
        StatusClass::Error => {
            let description = describe.describe(status);
            debug!(code = status.0, operation, %description, "driver call failed");
            Err(DriverStatusError {
                code: status.0,
                description,
                operation: operation.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn success_and_pending_are_distinct_outcomes() {
        assert_eq!(
            check(Status::SUCCESS, "xlActivateChannel", &StatusCatalog),
            Ok(Outcome::Completed)
        );
        assert_eq!(
            check(Status::PENDING, "xlActivateChannel", &StatusCatalog),
            Ok(Outcome::Pending)
        );
    }

    #[test]
    fn invalid_channel_index_surfaces_as_error() {
        let err = check(Status(111), "xlCanTransmit", &StatusCatalog).unwrap_err();
        assert_eq!(err.code, 111);
        assert_eq!(err.description, "invalid channel index");
        assert_eq!(err.operation, "xlCanTransmit");
        assert_eq!(err.status(), Status::ERR_INVALID_CHAN_INDEX);
        assert_eq!(
            err.to_string(),
            "xlCanTransmit failed: invalid channel index (status 111)"
        );
    }

    #[test]
    fn description_comes_from_the_lookup() {
        let driver = |status: Status| format!("driver text for {}", status.0);
        let err = check(Status(111), "xlReceive", &driver).unwrap_err();
        assert_eq!(err.description, "driver text for 111");
    }

    #[test]
    fn unknown_codes_are_errors_too() {
        let err = check(Status(0x7777), "xlReceive", &StatusCatalog).unwrap_err();
        assert_eq!(err.description, "unknown status code 30583");
        assert_eq!(Status(0x7777).name(), None);
        assert_eq!(Status(0x7777).to_string(), "status 30583");
    }

    #[test]
    fn table_codes_and_names_are_unique() {
        let mut codes = HashSet::new();
        let mut names = HashSet::new();
        for entry in StatusCatalog.entries() {
            assert!(codes.insert(entry.status), "{}", entry.name);
            assert!(names.insert(entry.name), "{}", entry.name);
        }
        assert!(codes.len() > 75);
    }

    #[test]
    fn names_carry_the_vendor_prefix() {
        assert_eq!(Status::SUCCESS.name(), Some("XL_SUCCESS"));
        assert_eq!(
            Status::ERR_INVALID_CHAN_INDEX.to_string(),
            "XL_ERR_INVALID_CHAN_INDEX (111)"
        );
        assert_eq!(serde_json::to_string(&Status(111)).unwrap(), "111");
    }
}
