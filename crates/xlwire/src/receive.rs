use tracing::{debug, warn};
use xlwire_driver::{
    check, AccessMask, DescribeStatus, EventSource, Outcome, ReceiveSignature, Result, Status,
};
use xlwire_frame::{BatchReader, DecodeConfig};
use xlwire_schema::Family;

/// Driver call name used when reporting receive failures for `family`.
pub fn receive_operation(family: Family) -> &'static str {
    match family {
        Family::Classic | Family::CanFdTx => "xlReceive",
        Family::CanFdRx => "xlCanReceive",
        Family::FlexRay => "xlFrReceive",
        Family::Most25 => "xlMostReceive",
        Family::Most150 => "xlMost150Receive",
        Family::Ethernet => "xlEthReceive",
        Family::A429 => "xlA429Receive",
    }
}

/// Buffer returned by one successful receive call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedBatch {
    family: Family,
    status: Status,
    outcome: Outcome,
    count: usize,
    filtered: bool,
    buffer: Vec<u8>,
}

impl ReceivedBatch {
    pub fn family(&self) -> Family {
        self.family
    }

    /// The status the driver returned.
    pub fn status(&self) -> Status {
        self.status
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Record count reported by the driver.
    pub fn count(&self) -> usize {
        self.count
    }

    /// False when the source ignored the access mask, so the buffer may hold
    /// records of channels outside it.
    pub fn is_filtered(&self) -> bool {
        self.filtered
    }

    pub fn bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    /// Iterate the records with the default decode configuration.
    pub fn reader(&self) -> xlwire_frame::Result<BatchReader<'_>> {
        BatchReader::new(self.family, &self.buffer, self.count)
    }

    pub fn reader_with(&self, config: DecodeConfig) -> xlwire_frame::Result<BatchReader<'_>> {
        BatchReader::with_config(self.family, &self.buffer, self.count, config)
    }
}

/// Perform one receive call on `source` and check its status.
///
/// Error statuses become [`DriverStatusError`](xlwire_driver::DriverStatusError)
/// carrying the code, the text from `describe` and the call name. A pending
/// status is returned as [`Outcome::Pending`], never as success.
pub fn receive_events(
    source: &mut dyn EventSource,
    family: Family,
    access: AccessMask,
    describe: &dyn DescribeStatus,
) -> Result<ReceivedBatch> {
    let filtered = match source.signature(family) {
        ReceiveSignature::Published => true,
        ReceiveSignature::WithoutAccessMask => {
            warn!(
                %family,
                %access,
                "receive call takes no access mask; records of every channel on the port are returned"
            );
            false
        }
    };

    let raw = source.receive(family, filtered.then_some(access));
    let outcome = check(raw.status, receive_operation(family), describe)?;
    debug!(
        %family,
        count = raw.count,
        bytes = raw.buffer.len(),
        ?outcome,
        "received batch"
    );

    Ok(ReceivedBatch {
        family,
        status: raw.status,
        outcome,
        count: raw.count,
        filtered,
        buffer: raw.buffer,
    })
}

#[cfg(test)]
mod tests {
    use bytes::BytesMut;
    use xlwire_driver::{RawReceive, StatusCatalog};
    use xlwire_frame::{encode_event, Event};
    use xlwire_schema::catalog::classic::{CanMsg, ClassicPayload};
    use xlwire_schema::Record;

    use super::*;

    struct Fixed {
        signature: ReceiveSignature,
        status: Status,
        count: usize,
        buffer: Vec<u8>,
        seen: Vec<Option<AccessMask>>,
    }

    impl Fixed {
        fn new(status: Status, count: usize, buffer: Vec<u8>) -> Self {
            Self {
                signature: ReceiveSignature::Published,
                status,
                count,
                buffer,
                seen: Vec::new(),
            }
        }
    }

    impl EventSource for Fixed {
        fn receive(&mut self, _family: Family, access: Option<AccessMask>) -> RawReceive {
            self.seen.push(access);
            RawReceive {
                status: self.status,
                count: self.count,
                buffer: self.buffer.clone(),
            }
        }

        fn signature(&self, _family: Family) -> ReceiveSignature {
            self.signature
        }
    }

    fn can_buffer(ids: &[u32]) -> Vec<u8> {
        let mut buf = BytesMut::new();
        for (index, id) in ids.iter().enumerate() {
            let mut msg = CanMsg::zeroed();
            msg.id = *id;
            msg.dlc = 1;
            msg.data[0] = index as u8;
            let event = Event::new(ClassicPayload::ReceiveMsg(msg)).with_channel(index as u16);
            encode_event(&event, &mut buf).unwrap();
        }
        buf.to_vec()
    }

    #[test]
    fn successful_receive_decodes() {
        let mut source = Fixed::new(Status::SUCCESS, 2, can_buffer(&[0x100, 0x200]));
        let batch =
            receive_events(&mut source, Family::Classic, AccessMask(0b11), &StatusCatalog).unwrap();
        assert_eq!(batch.outcome(), Outcome::Completed);
        assert!(batch.is_filtered());
        assert_eq!(source.seen, vec![Some(AccessMask(0b11))]);

        let ids: Vec<u32> = batch
            .reader()
            .unwrap()
            .map(|event| event.unwrap().id().unwrap())
            .collect();
        assert_eq!(ids, vec![0x100, 0x200]);
    }

    #[test]
    fn error_status_names_the_call() {
        let mut source = Fixed::new(Status::ERR_INVALID_CHAN_INDEX, 0, Vec::new());
        let err = receive_events(&mut source, Family::FlexRay, AccessMask(1), &StatusCatalog)
            .unwrap_err();
        assert_eq!(err.code, 111);
        assert_eq!(err.operation, "xlFrReceive");
        assert_eq!(err.description, "invalid channel index");
    }

    #[test]
    fn pending_status_is_reported() {
        let mut source = Fixed::new(Status::PENDING, 0, Vec::new());
        let batch =
            receive_events(&mut source, Family::CanFdRx, AccessMask(1), &StatusCatalog).unwrap();
        assert_eq!(batch.outcome(), Outcome::Pending);
        assert_eq!(batch.reader().unwrap().count(), 0);
    }

    #[test]
    fn maskless_source_is_flagged() {
        let mut source = Fixed::new(Status::SUCCESS, 1, can_buffer(&[0x7ff]));
        source.signature = ReceiveSignature::WithoutAccessMask;
        let batch =
            receive_events(&mut source, Family::Classic, AccessMask(0b100), &StatusCatalog).unwrap();
        assert!(!batch.is_filtered());
        assert_eq!(source.seen, vec![None]);
    }
}
