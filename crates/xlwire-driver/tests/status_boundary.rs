use xlwire_driver::{
    check, AccessMask, DescribeStatus, EventSource, Outcome, RawReceive, ReceiveSignature, Status,
    StatusCatalog,
};
use xlwire_schema::Family;

struct Scripted {
    status: Status,
    seen: Vec<Option<AccessMask>>,
}

impl EventSource for Scripted {
    fn receive(&mut self, _family: Family, access: Option<AccessMask>) -> RawReceive {
        self.seen.push(access);
        RawReceive {
            status: self.status,
            count: 0,
            buffer: Vec::new(),
        }
    }
}

struct DriverText;

impl DescribeStatus for DriverText {
    fn describe(&self, status: Status) -> String {
        match status {
            Status::ERR_INVALID_CHAN_INDEX => "XL_ERR_INVALID_CHAN_INDEX".to_string(),
            other => format!("code {}", other.code()),
        }
    }
}

#[test]
fn status_111_is_never_silently_ignored() {
    let mut source = Scripted {
        status: Status(111),
        seen: Vec::new(),
    };
    let raw = source.receive(Family::Classic, Some(AccessMask::from_channel(1)));
    let err = check(raw.status, "xlReceive", &DriverText).unwrap_err();
    assert_eq!(err.code, 111);
    assert_eq!(err.description, "XL_ERR_INVALID_CHAN_INDEX");
    assert_eq!(err.operation, "xlReceive");
    assert_eq!(source.seen, vec![Some(AccessMask(0b10))]);
}

#[test]
fn pending_is_not_success() {
    assert_eq!(
        check(Status::PENDING, "xlCanTransmitEx", &StatusCatalog).unwrap(),
        Outcome::Pending
    );
    assert_ne!(
        check(Status::SUCCESS, "xlCanTransmitEx", &StatusCatalog).unwrap(),
        Outcome::Pending
    );
}

#[test]
fn sources_default_to_the_published_signature() {
    let source = Scripted {
        status: Status::SUCCESS,
        seen: Vec::new(),
    };
    assert_eq!(source.signature(Family::CanFdRx), ReceiveSignature::Published);
}

#[test]
fn error_serializes_with_its_code() {
    let err = check(Status::ERR_WRONG_PARAMETER, "xlSetTimerRate", &StatusCatalog).unwrap_err();
    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(json["code"], 101);
    assert_eq!(json["operation"], "xlSetTimerRate");
    assert_eq!(json["description"], "wrong parameter");
}
